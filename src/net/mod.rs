//! Networking: REST client, transport seam and wire schema.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` classifies REST outcomes, `transport` performs raw HTTP exchanges,
//! `types` defines the JSON schema and `error` the failure taxonomy.

pub mod api;
pub mod error;
pub mod transport;
pub mod types;
