//! Client data layer for the Crewdeck operator console.
//!
//! Wraps the console backend API behind typed application services with an
//! in-memory query cache. List deletes are applied optimistically: the
//! cached page is patched before the request settles and rolled back if the
//! backend rejects the delete.

pub mod application;
pub mod cache;
pub mod config;
pub mod infra;

pub use application::Console;
