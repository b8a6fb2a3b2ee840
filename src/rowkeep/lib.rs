//! # Rowkeep Architecture
//!
//! Rowkeep is a **generic record store**: an ordered, identity-unique
//! collection with CRUD, lookup and circular navigation, meant to sit behind a
//! form-style UI ("first / previous / next / last", "save", "reopen",
//! "delete"). The store is the product; the binary is a thin demo client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs) / Scripts (script.rs)                         │
//! │  - Cursor-based browsing facade, scenario replay            │
//! │  - Returns structured results, never prints                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - DataStore / GuardedStore traits                          │
//! │  - RecordStore: in-memory, insertion-ordered                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Record Contract
//!
//! A record type implements [`model::Identifiable`] (and
//! [`model::Activatable`] to take part in guarded updates). The store never
//! reads any other field. See [`store`] for identity, ordering, navigation and
//! the Locked/Editable update guard.
//!
//! ## Errors
//!
//! Store rejections are values ([`error::StoreError`], or the flat
//! [`error::Status`]), never panics. [`error::RowkeepError`] covers the outer
//! layers: I/O, JSON and configuration.
//!
//! ## Module Overview
//!
//! - [`model`]: record capabilities and the `Contact` / `Ticket` record types
//! - [`store`]: storage traits, navigation arithmetic, in-memory store
//! - [`api`]: cursor-based facade for UI clients
//! - [`script`]: JSON scenario scripts
//! - [`config`]: configuration management
//! - [`error`]: error and status types

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod script;
pub mod store;
