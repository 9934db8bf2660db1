//! Line counting shared by the length rules.

use taylor_core::Component;

/// Lines spanned by `component`, minus lines covered by comment and
/// blank-line descendants.
///
/// A comment or blank-line node is subtracted as a whole; its own
/// descendants are not visited.
#[must_use]
pub fn effective_lines(component: &Component) -> usize {
    component
        .range
        .line_count()
        .saturating_sub(redundant_lines(component))
}

fn redundant_lines(component: &Component) -> usize {
    component
        .children
        .iter()
        .map(|child| {
            if child.kind.is_redundant_line() {
                child.range.line_count()
            } else {
                redundant_lines(child)
            }
        })
        .sum()
}
