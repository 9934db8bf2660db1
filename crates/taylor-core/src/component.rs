//! Line-addressed component tree consumed by rules and reporters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a node in the component tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentType {
    /// Class declaration.
    Class,
    /// Struct declaration.
    Struct,
    /// Enum declaration.
    Enum,
    /// Protocol declaration.
    Protocol,
    /// Extension declaration.
    Extension,
    /// Function, method, initializer or accessor.
    Function,
    /// Function or closure parameter.
    Parameter,
    /// Stored or computed variable.
    Variable,
    /// Closure literal.
    Closure,
    /// `if` statement.
    If,
    /// `else if` branch.
    ElseIf,
    /// Trailing `else` branch.
    Else,
    /// `for` loop.
    For,
    /// `while` loop.
    While,
    /// `repeat ... while` loop.
    Repeat,
    /// `switch` statement.
    Switch,
    /// `case` of a switch.
    Case,
    /// `guard` statement.
    Guard,
    /// Bare block of statements.
    Brace,
    /// Comment or documentation comment.
    Comment,
    /// Run of blank lines.
    EmptyLines,
    /// Ternary conditional operator.
    Ternary,
    /// Nil-coalescing operator.
    NilCoalescing,
    /// Logical or operator.
    Or,
    /// Logical and operator.
    And,
    /// Anything else, including the file root.
    Other,
}

impl ComponentType {
    /// Returns true for constructs whose body may arrive wrapped in an extra brace node.
    #[must_use]
    pub fn is_braced(self) -> bool {
        matches!(
            self,
            Self::If | Self::ElseIf | Self::For | Self::While | Self::Repeat | Self::Closure | Self::Guard
        )
    }

    /// Returns true for kinds that make a variable a computed property when nested in it.
    #[must_use]
    pub fn is_significant(self) -> bool {
        matches!(
            self,
            Self::Function
                | Self::Class
                | Self::Struct
                | Self::Enum
                | Self::Protocol
                | Self::Extension
                | Self::For
                | Self::While
                | Self::Repeat
                | Self::If
                | Self::Guard
                | Self::Switch
                | Self::Case
                | Self::Brace
                | Self::Closure
                | Self::Parameter
        )
    }

    /// Returns true for lines that do not count towards a length metric.
    #[must_use]
    pub fn is_redundant_line(self) -> bool {
        matches!(self, Self::Comment | Self::EmptyLines)
    }

    /// Returns true for kinds that name an enclosing type in reports.
    #[must_use]
    pub fn is_type_declaration(self) -> bool {
        matches!(self, Self::Class | Self::Struct | Self::Enum | Self::Extension)
    }

    /// Returns the camelCase name used in serialized output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Protocol => "protocol",
            Self::Extension => "extension",
            Self::Function => "function",
            Self::Parameter => "parameter",
            Self::Variable => "variable",
            Self::Closure => "closure",
            Self::If => "if",
            Self::ElseIf => "elseIf",
            Self::Else => "else",
            Self::For => "for",
            Self::While => "while",
            Self::Repeat => "repeat",
            Self::Switch => "switch",
            Self::Case => "case",
            Self::Guard => "guard",
            Self::Brace => "brace",
            Self::Comment => "comment",
            Self::EmptyLines => "emptyLines",
            Self::Ternary => "ternary",
            Self::NilCoalescing => "nilCoalescing",
            Self::Or => "or",
            Self::And => "and",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive, 1-based line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRange {
    /// First line.
    pub start_line: usize,
    /// Last line.
    pub end_line: usize,
}

impl ComponentRange {
    /// Creates a new line range.
    #[must_use]
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// Number of lines covered, counting both ends.
    #[must_use]
    pub fn line_count(&self) -> usize {
        (self.end_line + 1).saturating_sub(self.start_line)
    }

    /// Returns true if `other` lies entirely within this range.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.start_line <= other.start_line && self.end_line >= other.end_line
    }
}

impl fmt::Display for ComponentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_line, self.end_line)
    }
}

/// A node of the public, read-only component tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Node kind.
    #[serde(rename = "type")]
    pub kind: ComponentType,
    /// Lines spanned by the node.
    pub range: ComponentRange,
    /// Declared name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Children ordered by position in the file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Component>,
}

impl Component {
    /// Creates an unnamed component without children.
    #[must_use]
    pub fn new(kind: ComponentType, range: ComponentRange) -> Self {
        Self {
            kind,
            range,
            name: None,
            children: Vec::new(),
        }
    }

    /// Sets the component name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends a child and returns self.
    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child and returns a mutable reference to it.
    pub fn push(&mut self, child: Component) -> &mut Component {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Returns true if the component is of the given kind.
    #[must_use]
    pub fn is_a(&self, kind: ComponentType) -> bool {
        self.kind == kind
    }

    /// Counts direct children of the given kind.
    #[must_use]
    pub fn count_children(&self, kind: ComponentType) -> usize {
        self.children.iter().filter(|c| c.is_a(kind)).count()
    }

    /// Returns the name or `unknown` when absent.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unknown")
    }

    /// Visits this component and all descendants, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Component)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
