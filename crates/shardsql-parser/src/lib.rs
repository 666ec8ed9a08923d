//! SQL Server DCL parser
//!
//! Parses T-SQL DCL statements and normalizes their dialect-specific parse
//! trees into the uniform [`DclStatement`] AST from `shardsql-core`.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use shardsql_core::{
    AlterLoginStatement, AlterRoleStatement, AlterUserStatement, CreateLoginStatement,
    CreateRoleStatement, CreateUserStatement, DclStatement, DenyStatement, DropLoginStatement,
    DropRoleStatement, DropUserStatement, Fragment, FragmentKind, GrantStatement, RevokeStatement,
    Span, TableRef,
};

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct DclParser;

/// Errors raised while turning statement text into an AST
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("syntax error: {0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),
    #[error("input does not contain a DCL statement")]
    NotDcl,
}

/// Parse a single DCL statement into its normalized AST
pub fn parse_dcl(sql: &str) -> Result<DclStatement, ParseError> {
    let pairs = DclParser::parse(Rule::program, sql).map_err(Box::new)?;

    for pair in pairs {
        if pair.as_rule() == Rule::program {
            for inner_pair in pair.into_inner() {
                if inner_pair.as_rule() == Rule::dcl_statement {
                    let statement = inner_pair.into_inner().next().ok_or(ParseError::NotDcl)?;
                    return Ok(build_statement(statement));
                }
            }
        }
    }

    Err(ParseError::NotDcl)
}

/// Build the normalized statement for a DCL parse subtree
///
/// Total over the recognized statement rules. Handing in any other rule is a
/// caller contract violation and panics; a silent fallback would leave a
/// grammar production without AST coverage.
pub fn build_statement(pair: Pair<Rule>) -> DclStatement {
    match pair.as_rule() {
        Rule::grant_statement => {
            let (tables, fragments) = collect_privilege_clauses(pair);
            DclStatement::Grant(GrantStatement { tables, fragments })
        }
        Rule::revoke_statement => {
            let (tables, fragments) = collect_privilege_clauses(pair);
            DclStatement::Revoke(RevokeStatement { tables, fragments })
        }
        Rule::deny_statement => {
            // Clauses are walked in grammar order, object-class before
            // object-class-type, and DENY keeps a single table slot: the
            // last clause that names a table wins.
            let (tables, fragments) = collect_privilege_clauses(pair);
            DclStatement::Deny(DenyStatement {
                table: tables.into_iter().last(),
                fragments,
            })
        }
        Rule::create_user_statement => DclStatement::CreateUser(CreateUserStatement::default()),
        Rule::alter_user_statement => DclStatement::AlterUser(AlterUserStatement::default()),
        Rule::drop_user_statement => DclStatement::DropUser(DropUserStatement::default()),
        Rule::create_role_statement => DclStatement::CreateRole(CreateRoleStatement::default()),
        Rule::alter_role_statement => DclStatement::AlterRole(AlterRoleStatement::default()),
        Rule::drop_role_statement => DclStatement::DropRole(DropRoleStatement::default()),
        Rule::create_login_statement => DclStatement::CreateLogin(CreateLoginStatement::default()),
        Rule::alter_login_statement => DclStatement::AlterLogin(AlterLoginStatement::default()),
        Rule::drop_login_statement => DclStatement::DropLogin(DropLoginStatement::default()),
        rule => unreachable!("not a DCL statement rule: {:?}", rule),
    }
}

/// The two privilege scoping clause shapes
///
/// Structurally distinct grammar productions that expose the same optional ON
/// sub-clause, so the extractor can stay single-bodied without collapsing the
/// grammar's distinction.
trait PrivilegeClause<'i> {
    const FRAGMENT_KIND: FragmentKind;

    fn on_clause(&self) -> Option<Pair<'i, Rule>>;
}

struct ClassPrivilegesClause<'i>(Pair<'i, Rule>);

impl<'i> PrivilegeClause<'i> for ClassPrivilegesClause<'i> {
    const FRAGMENT_KIND: FragmentKind = FragmentKind::OnClassClause;

    fn on_clause(&self) -> Option<Pair<'i, Rule>> {
        self.0
            .clone()
            .into_inner()
            .find(|pair| pair.as_rule() == Rule::on_class_clause)
    }
}

struct ClassTypePrivilegesClause<'i>(Pair<'i, Rule>);

impl<'i> PrivilegeClause<'i> for ClassTypePrivilegesClause<'i> {
    const FRAGMENT_KIND: FragmentKind = FragmentKind::OnClassTypeClause;

    fn on_clause(&self) -> Option<Pair<'i, Rule>> {
        self.0
            .clone()
            .into_inner()
            .find(|pair| pair.as_rule() == Rule::on_class_type_clause)
    }
}

/// Walk the privilege clauses of a GRANT/REVOKE/DENY subtree, recording one
/// fragment per ON sub-clause present and the tables they name
fn collect_privilege_clauses(pair: Pair<Rule>) -> (Vec<TableRef>, Vec<Fragment>) {
    let mut tables = Vec::new();
    let mut fragments = Vec::new();

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::class_privileges_clause => {
                consume_clause(&ClassPrivilegesClause(inner_pair), &mut tables, &mut fragments);
            }
            Rule::class_type_privileges_clause => {
                consume_clause(
                    &ClassTypePrivilegesClause(inner_pair),
                    &mut tables,
                    &mut fragments,
                );
            }
            _ => {}
        }
    }

    (tables, fragments)
}

fn consume_clause<'i, C: PrivilegeClause<'i>>(
    clause: &C,
    tables: &mut Vec<TableRef>,
    fragments: &mut Vec<Fragment>,
) {
    if let Some(on_clause) = clause.on_clause() {
        fragments.push(Fragment::new(C::FRAGMENT_KIND, span_of(&on_clause)));
    }
    tables.extend(table_references(clause));
}

/// Extract the zero-or-one table reference a privilege clause scopes to
///
/// A clause without an ON sub-clause, or whose ON sub-clause names no table
/// (schema- or server-level privileges), yields an empty list; that is an
/// expected outcome, not an error.
fn table_references<'i, C: PrivilegeClause<'i>>(clause: &C) -> Vec<TableRef> {
    let Some(on_clause) = clause.on_clause() else {
        return Vec::new();
    };

    match on_clause
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::table_name)
    {
        Some(table_name) => vec![visit_table_name(table_name)],
        None => Vec::new(),
    }
}

fn visit_table_name(pair: Pair<Rule>) -> TableRef {
    let span = span_of(&pair);
    let mut qualifier = None;
    let mut name = String::new();

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::qualifier => qualifier = Some(unquote(part.as_str())),
            Rule::object_name => name = unquote(part.as_str()),
            _ => {}
        }
    }

    TableRef {
        qualifier,
        name,
        span,
    }
}

fn span_of(pair: &Pair<Rule>) -> Span {
    let span = pair.as_span();
    Span::new(span.start(), span.end())
}

/// Strip bracket delimiters from an identifier, e.g. `[Order Details]`
fn unquote(identifier: &str) -> String {
    identifier
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string()
}
