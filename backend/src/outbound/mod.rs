//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: in-process document store, the default backing store
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **security**: Argon2id password hashing and HS256 identity tokens
//!
//! Adapters translate between domain types and infrastructure
//! representations and carry no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
