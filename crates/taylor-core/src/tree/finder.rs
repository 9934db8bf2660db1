//! Text heuristics that add nodes the declaration tree does not describe.
//!
//! Each finder returns candidate nodes that are inserted into the working
//! tree by containment. Scans run over the file text with string literals
//! blanked out, so byte offsets stay valid.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::chunk::Chunks;
use super::kind::component_type;
use super::node::WorkingNode;
use super::offset::OffsetRange;
use crate::component::ComponentType;
use crate::source::SyntaxToken;

/// A compiled pattern. A pattern that fails to compile matches nothing.
struct Scanner {
    regex: Option<Regex>,
}

impl Scanner {
    fn new(pattern: &str) -> Self {
        let regex = Regex::new(pattern)
            .map_err(|e| warn!("Disabling scan for pattern {pattern:?}: {e}"))
            .ok();
        Self { regex }
    }

    /// Byte spans `(start, end)` of all non-overlapping matches, end exclusive.
    fn spans(&self, text: &str) -> Vec<(usize, usize)> {
        self.regex.as_ref().map_or_else(Vec::new, |regex| {
            regex
                .find_iter(text)
                .map(|m| (m.start(), m.end()))
                .collect()
        })
    }

    fn first(&self, text: &str) -> Option<(usize, usize)> {
        self.regex
            .as_ref()
            .and_then(|regex| regex.find(text))
            .map(|m| (m.start(), m.end()))
    }
}

static STRING_LITERAL: LazyLock<Scanner> = LazyLock::new(|| Scanner::new(r#"(?s)".*?""#));
static OR: LazyLock<Scanner> = LazyLock::new(|| Scanner::new(r"\|\|"));
static AND: LazyLock<Scanner> = LazyLock::new(|| Scanner::new(r"&&"));
static NIL_COALESCING: LazyLock<Scanner> = LazyLock::new(|| Scanner::new(r"\?\?"));
static TERNARY: LazyLock<Scanner> =
    LazyLock::new(|| Scanner::new(r"(?s)\s+\?(?:[^?:].*?)?:"));
static EMPTY_LINES: LazyLock<Scanner> = LazyLock::new(|| Scanner::new(r"\n[ \t\n]*\n"));
static GET: LazyLock<Scanner> = LazyLock::new(|| Scanner::new(r"get($|[ \t\n{}])"));
static SET: LazyLock<Scanner> = LazyLock::new(|| Scanner::new(r"set($|[ \t\n{}])"));
static WILL_SET: LazyLock<Scanner> = LazyLock::new(|| Scanner::new(r"willSet($|[ \t\n{}])"));
static DID_SET: LazyLock<Scanner> = LazyLock::new(|| Scanner::new(r"didSet($|[ \t\n{}])"));

/// Heuristic scanner over one file.
pub struct Finder<'a> {
    text: String,
    tokens: &'a [SyntaxToken],
}

impl<'a> Finder<'a> {
    /// Prepares a finder, blanking string literals part by part.
    #[must_use]
    pub fn new(text: &str, chunks: &Chunks, tokens: &'a [SyntaxToken]) -> Self {
        let mut blanked = String::with_capacity(text.len());
        for part in chunks.parts() {
            blanked.push_str(&blank_strings(part.text(text)));
        }
        Self {
            text: blanked,
            tokens,
        }
    }

    /// The text that is scanned, with string literals replaced by spaces.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Accessor functions (`get`, `set`, `willSet`, `didSet`) inside variable nodes.
    #[must_use]
    pub fn accessors(&self, nodes: &[WorkingNode]) -> Vec<WorkingNode> {
        nodes
            .iter()
            .filter(|node| node.is_a(ComponentType::Variable))
            .flat_map(|variable| {
                let OffsetRange { start, end } = variable.range;
                let body = self
                    .text
                    .get(start..end.min(self.text.len()))
                    .unwrap_or_default();
                find_accessors(body)
                    .into_iter()
                    .map(move |mut accessor| {
                        accessor.range = accessor.range.shifted(start);
                        accessor
                    })
            })
            .collect()
    }

    /// Comments, logical operators and blank-line runs, in that order.
    #[must_use]
    pub fn lexical(&self) -> Vec<WorkingNode> {
        let mut nodes = self.comments();
        nodes.extend(self.logical_operators());
        nodes.extend(self.empty_lines());
        nodes
    }

    /// Comment tokens from the syntax map.
    #[must_use]
    pub fn comments(&self) -> Vec<WorkingNode> {
        self.tokens
            .iter()
            .filter(|token| component_type(&token.kind) == ComponentType::Comment)
            .map(|token| {
                WorkingNode::new(
                    ComponentType::Comment,
                    OffsetRange::token(token.offset, token.length),
                )
            })
            .collect()
    }

    /// Ternary, nil-coalescing, `||` and `&&` operators.
    #[must_use]
    pub fn logical_operators(&self) -> Vec<WorkingNode> {
        [
            (&TERNARY, ComponentType::Ternary),
            (&NIL_COALESCING, ComponentType::NilCoalescing),
            (&OR, ComponentType::Or),
            (&AND, ComponentType::And),
        ]
        .into_iter()
        .flat_map(|(scanner, kind)| {
            scanner
                .spans(&self.text)
                .into_iter()
                .map(move |(start, end)| WorkingNode::new(kind, OffsetRange::new(start, end)))
        })
        .collect()
    }

    /// Runs of blank lines, excluding the newlines around them.
    #[must_use]
    pub fn empty_lines(&self) -> Vec<WorkingNode> {
        EMPTY_LINES
            .spans(&self.text)
            .into_iter()
            .map(|(start, end)| {
                WorkingNode::new(ComponentType::EmptyLines, OffsetRange::blank_lines(start, end))
            })
            .collect()
    }
}

fn blank_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, end) in STRING_LITERAL.spans(text) {
        out.push_str(&text[last..start]);
        out.push_str(&" ".repeat(end - start));
        last = end;
    }
    out.push_str(&text[last..]);
    out
}

/// Finds accessor blocks in the text of one variable, relative to its start.
fn find_accessors(text: &str) -> Vec<WorkingNode> {
    let Some(getter) = GET.first(text) else {
        return find_observers(text);
    };

    let mut accessors = vec![accessor("get", getter)];
    if let Some(setter) = SET.first(text) {
        accessors.push(accessor("set", setter));
    }
    close_accessors(accessors, text.len())
}

fn find_observers(text: &str) -> Vec<WorkingNode> {
    let accessors = [("willSet", &WILL_SET), ("didSet", &DID_SET)]
        .into_iter()
        .filter_map(|(name, scanner)| scanner.first(text).map(|span| accessor(name, span)))
        .collect();
    close_accessors(accessors, text.len())
}

fn accessor(name: &str, (start, end): (usize, usize)) -> WorkingNode {
    WorkingNode::new(ComponentType::Function, OffsetRange::new(start, end)).named(name)
}

/// Orders accessors and extends each one up to the next, the last one to the end of text.
fn close_accessors(mut accessors: Vec<WorkingNode>, len: usize) -> Vec<WorkingNode> {
    accessors.sort_by_key(|a| a.range.start);
    let last_byte = len.saturating_sub(1);
    let starts: Vec<usize> = accessors.iter().map(|a| a.range.start).collect();
    for (index, accessor) in accessors.iter_mut().enumerate() {
        accessor.range.end = starts
            .get(index + 1)
            .map_or(last_byte, |next| next.saturating_sub(1));
    }
    accessors
}
