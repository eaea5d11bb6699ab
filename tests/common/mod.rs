//! Shared test utilities for seminar-feed integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Every helper that depends on the clock takes a fixed
//! `now` so results never drift with the calendar.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
