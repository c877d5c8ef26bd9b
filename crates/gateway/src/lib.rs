//! Remote data gateway for the playbook backend.
//!
//! Owns the three concerns every remote call shares: the per-device
//! owner token ([`identity`]), the endpoint configuration ([`config`]),
//! and the GraphQL request/response cycle itself ([`client`]).

pub mod client;
pub mod config;
pub mod error;
pub mod identity;

pub use client::Gateway;
pub use config::GatewayConfig;
pub use error::{GatewayError, GraphQlError};
pub use identity::TokenStore;
