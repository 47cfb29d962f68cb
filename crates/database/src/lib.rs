//! # School Locator Database Crate
//!
//! This crate is the Record Store Adapter: the only part of the system that
//! talks to the persistence service.
//!
//! ## Architectural Principles
//!
//! - **Thin Adapter:** Every operation is a single request/response call. There
//!   are no retries, no local caching and no transactions spanning operations.
//! - **Opaque Failures:** Whatever the service reports is surfaced as a
//!   `StoreError` carrying the underlying message; nothing is classified here.
//! - **Swappable Backends:** `SchoolStore` is implemented for a Supabase REST
//!   endpoint (`RestRepository`) and for PostgreSQL (`DbRepository`).
//!
//! ## Public API
//!
//! - `connect`: Builds the shared store handle from the configured URL.
//! - `connect_pool` / `run_migrations`: Direct PostgreSQL access for schema setup.
//! - `SchoolStore`: `insert` one school, `list_all` schools.
//! - `StoreError`: The error type returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod rest;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_pool, run_migrations};
pub use error::StoreError;
pub use repository::DbRepository;
pub use rest::RestRepository;
pub use store::SchoolStore;
