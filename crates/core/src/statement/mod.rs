//! Read-only account statements.

pub mod builder;
pub mod types;

pub use builder::build_statement;
pub use types::{AccountStatement, StatementLine, StatementTotals};
