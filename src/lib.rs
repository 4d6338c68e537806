//! Recipe discovery and recommendation core
//!
//! Resolves a (culinary area, main ingredient) criteria pair into an ordered
//! candidate set by intersecting two single-dimension catalog queries, cycles
//! through candidates with a stable presentation order, enriches the current
//! candidate with lazily fetched detail, and records votes into a bounded,
//! persisted history. Remote reads go through a cache-backed gateway that
//! falls back to the last good response when the network is unavailable.
//!
//! This crate is a library consumed by presentation code; it exposes no CLI
//! and no server.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use db::{CacheKey, Gateway, MemoryStorage, RedisStorage, Storage};
pub use error::{AppError, AppResult};
pub use services::{
    CandidateView, CatalogSource, Cycler, DetailEnricher, DiscoverySession, HistoryStore,
    MealDbClient,
};
