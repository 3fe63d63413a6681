//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL adapters behind the domain store
//! ports, implemented on SQLx. Domain crates never see a connection pool:
//! they talk to `LedgerStore` / `RecurringStore` trait objects, and this
//! crate supplies the implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PgLedgerStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/ledger")).await?;
//! let store = PgLedgerStore::new(pool);
//! let poster = LedgerPoster::new(&store);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;
pub mod settings;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::{PgLedgerStore, PgRecurringStore};
pub use settings::DatabaseSettings;
