//! The polynomial algebra engine.
//!
//! This module is decoupled from the [parser] and the [interpreter] because:
//!
//! - every operation here is pure: inputs are borrowed and every result is a freshly owned,
//!   canonical [Poly];
//! - canonical form is established in exactly one place, the [reducer][reduce], and every other
//!   operation either preserves it or routes through it.
//!
//! [parser]: crate::parser
//! [interpreter]: crate::interpreter

mod poly;
pub use poly::*;

mod arith;
pub use arith::ExpOverflow;

pub(crate) mod reduce;

mod subst;
