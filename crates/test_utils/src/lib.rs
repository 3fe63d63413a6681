//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! ledger engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: seeded tenants and stores for common scenarios
//! - `builders`: builder patterns for business events and templates
//! - `assertions`: custom assertion helpers for domain types
//! - `generators`: property-based test data generators

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
