//! # ShardSQL Core
//!
//! Dialect-independent AST types for SQL Server DCL statements, shared by the
//! parser and by downstream privilege analysis and rewrite tooling.

pub mod segment;
pub mod statement;

pub use segment::*;
pub use statement::*;
