//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to keep the data layer separate from business logic. The Redis-backed
//! rate-limit counter store lives here as well.

pub mod ad;
pub mod counter;
pub mod user;

use sea_orm::sea_query::{Expr, ExprTrait, Func, IntoColumnRef};

/// Builds `LOWER(column) = LOWER(value)` for case-insensitive username matching.
///
/// Both sides fold through the database's `LOWER`, so they agree on non-ASCII input.
pub(crate) fn lower_eq<C: IntoColumnRef>(column: C, value: &str) -> Expr {
    ExprTrait::eq(
        Expr::expr(Func::lower(Expr::col(column))),
        Func::lower(Expr::val(value)),
    )
}

#[cfg(test)]
mod test;
