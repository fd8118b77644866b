//! Shared request and response types for the Crewdeck console API.
//!
//! These mirror the payloads served by the console backend under
//! `/api/v1`. The root crate's HTTP client and query cache both consume
//! them, so wire changes land here first.

pub mod activity;
pub mod agents;
pub mod boards;
pub mod custom_fields;
pub mod gateways;
pub mod h5_users;
pub mod metrics;
pub mod pagination;
pub mod skills;
pub mod tags;

pub use pagination::{ListPage, PageRequest};
