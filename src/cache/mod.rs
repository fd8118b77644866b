//! Crewdeck query cache.
//!
//! Caches paginated console list responses and metrics snapshots under
//! structured query keys, and hosts the optimistic list-delete
//! coordinator the mutation paths run through.
//!
//! ## Configuration
//!
//! Cache behavior is controlled via `crewdeck.toml`:
//!
//! ```toml
//! [cache]
//! enable_query_cache = true
//! list_page_limit = 64
//! # ... see config.rs for all options
//! ```

mod config;
mod keys;
mod lock;
mod optimistic;
mod store;

pub use config::CacheConfig;
pub use keys::{ListKey, QueryKey, ResourceKind, hash_value};
pub use optimistic::{MutationContext, OptimisticListDelete};
pub use store::{ListStore, QueryCache, StaleMarker};
