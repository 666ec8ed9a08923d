//! Provenance segments linking AST statements back to their parse subtrees

use serde::{Deserialize, Serialize};

/// Byte range of a parse node in the original statement text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// True if `other` lies entirely within this span
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// A normalized table reference extracted from a privilege clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    /// Owner/schema qualifier, if the reference was written as `qualifier.name`
    pub qualifier: Option<String>,
    pub name: String,
    /// Source position of the full `qualifier.name` text
    pub span: Span,
}

impl TableRef {
    /// Render the reference as it would appear in SQL, e.g. `dbo.Orders`
    pub fn qualified_name(&self) -> String {
        match &self.qualifier {
            Some(qualifier) => format!("{}.{}", qualifier, self.name),
            None => self.name.clone(),
        }
    }
}

/// Which grammar production a consumed fragment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FragmentKind {
    /// `ON (class::)? table` scoping clause of an object-class privilege
    OnClassClause,
    /// `classtype::securable` scoping clause of an object-class-type privilege
    OnClassTypeClause,
}

/// A parse-tree fragment a statement consumed while being built
///
/// Rewrite tooling uses these to locate table references at their original
/// source positions, so a statement must never report a table whose
/// originating fragment is missing from its fragment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub span: Span,
}

impl Fragment {
    pub fn new(kind: FragmentKind, span: Span) -> Self {
        Self { kind, span }
    }
}
