//! Dialect-independent AST for DCL statements

use serde::{Deserialize, Serialize};

use crate::segment::{Fragment, TableRef};

/// A normalized DCL statement
///
/// One variant per recognized statement kind, so downstream consumers can
/// match exhaustively and the compiler flags any kind added without a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DclStatement {
    Grant(GrantStatement),
    Revoke(RevokeStatement),
    Deny(DenyStatement),
    CreateUser(CreateUserStatement),
    AlterUser(AlterUserStatement),
    DropUser(DropUserStatement),
    CreateRole(CreateRoleStatement),
    AlterRole(AlterRoleStatement),
    DropRole(DropRoleStatement),
    CreateLogin(CreateLoginStatement),
    AlterLogin(AlterLoginStatement),
    DropLogin(DropLoginStatement),
}

/// GRANT: zero or more table targets, one per privilege scoping clause
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GrantStatement {
    /// Referenced tables in clause-appearance order; duplicates are kept,
    /// membership is a downstream concern
    pub tables: Vec<TableRef>,
    pub fragments: Vec<Fragment>,
}

/// REVOKE: same shape as GRANT
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevokeStatement {
    pub tables: Vec<TableRef>,
    pub fragments: Vec<Fragment>,
}

/// DENY: a single table slot, the last scoping clause walked wins
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DenyStatement {
    pub table: Option<TableRef>,
    pub fragments: Vec<Fragment>,
}

macro_rules! principal_statements {
    ($($(#[$doc:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
            pub struct $name {
                pub fragments: Vec<Fragment>,
            }
        )+
    };
}

// Principal lifecycle statements carry no fields beyond provenance: the
// statement kind itself is the entire signal, nothing in the subtree is
// inspected.
principal_statements!(
    CreateUserStatement,
    AlterUserStatement,
    DropUserStatement,
    CreateRoleStatement,
    AlterRoleStatement,
    DropRoleStatement,
    CreateLoginStatement,
    AlterLoginStatement,
    DropLoginStatement,
);

impl DclStatement {
    /// All parse-tree fragments this statement consumed, in source order
    pub fn fragments(&self) -> &[Fragment] {
        match self {
            DclStatement::Grant(stmt) => &stmt.fragments,
            DclStatement::Revoke(stmt) => &stmt.fragments,
            DclStatement::Deny(stmt) => &stmt.fragments,
            DclStatement::CreateUser(stmt) => &stmt.fragments,
            DclStatement::AlterUser(stmt) => &stmt.fragments,
            DclStatement::DropUser(stmt) => &stmt.fragments,
            DclStatement::CreateRole(stmt) => &stmt.fragments,
            DclStatement::AlterRole(stmt) => &stmt.fragments,
            DclStatement::DropRole(stmt) => &stmt.fragments,
            DclStatement::CreateLogin(stmt) => &stmt.fragments,
            DclStatement::AlterLogin(stmt) => &stmt.fragments,
            DclStatement::DropLogin(stmt) => &stmt.fragments,
        }
    }

    /// Tables this statement targets, in clause-appearance order
    ///
    /// This is the hook the routing/rewrite layer collects table references
    /// through; principal lifecycle statements never reference tables.
    pub fn referenced_tables(&self) -> Vec<&TableRef> {
        match self {
            DclStatement::Grant(stmt) => stmt.tables.iter().collect(),
            DclStatement::Revoke(stmt) => stmt.tables.iter().collect(),
            DclStatement::Deny(stmt) => stmt.table.iter().collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{FragmentKind, Span};

    fn table(qualifier: Option<&str>, name: &str, start: usize, end: usize) -> TableRef {
        TableRef {
            qualifier: qualifier.map(str::to_string),
            name: name.to_string(),
            span: Span::new(start, end),
        }
    }

    #[test]
    fn test_grant_referenced_tables_keep_order() {
        let stmt = DclStatement::Grant(GrantStatement {
            tables: vec![table(Some("dbo"), "A", 16, 21), table(None, "B", 30, 31)],
            fragments: vec![
                Fragment::new(FragmentKind::OnClassClause, Span::new(13, 21)),
                Fragment::new(FragmentKind::OnClassTypeClause, Span::new(23, 31)),
            ],
        });

        let tables = stmt.referenced_tables();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].name, "A");
        assert_eq!(tables[1].name, "B");
        assert_eq!(stmt.fragments().len(), 2);
    }

    #[test]
    fn test_deny_reports_at_most_one_table() {
        let stmt = DclStatement::Deny(DenyStatement {
            table: Some(table(Some("dbo"), "Orders", 13, 23)),
            fragments: vec![Fragment::new(FragmentKind::OnClassClause, Span::new(10, 23))],
        });
        assert_eq!(stmt.referenced_tables().len(), 1);

        let empty = DclStatement::Deny(DenyStatement::default());
        assert!(empty.referenced_tables().is_empty());
    }

    #[test]
    fn test_principal_statements_are_empty() {
        let stmt = DclStatement::CreateLogin(CreateLoginStatement::default());
        assert!(stmt.fragments().is_empty());
        assert!(stmt.referenced_tables().is_empty());
    }

    #[test]
    fn test_statement_json_round_trip() {
        let stmt = DclStatement::Revoke(RevokeStatement {
            tables: vec![table(None, "Products", 18, 26)],
            fragments: vec![Fragment::new(FragmentKind::OnClassClause, Span::new(15, 26))],
        });

        let json = serde_json::to_string(&stmt).unwrap();
        let back: DclStatement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stmt);
    }
}
