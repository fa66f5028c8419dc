//! COW Fleet Analytics Library
//!
//! A Rust library for analyzing the movements of mobile cell towers ("COWs")
//! across a fleet of sites and warehouses. It ingests sheet-exported
//! movement records plus a location directory, classifies each movement, and
//! derives the aggregate views a fleet dashboard renders: per-entity
//! metrics, warehouse dwell time, off-air idle aging, and event/vendor
//! rollups.
//!
//! ## Core Features
//!
//! - **Movement classification**: deterministic `Full`/`Half`/`Zero` rule
//!   table over endpoint locations, preserving source-supplied values
//! - **Per-entity aggregation**: independent COW, warehouse, and region
//!   passes over the same enriched batch
//! - **Dwell-time reconstruction**: chronological per-COW stay intervals
//!   with top-N rollups
//! - **Off-air aging**: month-bucketed idle analysis with a short-idle
//!   day-band variant
//! - **Noise tolerance**: malformed records are excluded from the relevant
//!   computation, never aborting the batch
//!
//! ## Architecture Overview
//!
//! - [`models`] - record types and serializable output shapes
//! - [`directory`] - the by-ID location lookup every pass is built on
//! - [`classify`] - movement classifier and batch enricher
//! - [`analytics`] - the pure aggregation passes
//! - [`ingest`] - CSV/JSON sheet-export adapter (the only I/O layer)
//! - [`analyzer`] - orchestration: load, enrich, aggregate, report
//! - [`report`] - terminal/JSON rendering
//! - [`config`] - layered configuration with environment overrides
//! - [`logging`] - structured logging setup
//!
//! ## Main Entry Point
//!
//! ```rust,no_run
//! use cowtrack::analyzer::{FleetAnalyzer, RunOptions};
//!
//! # fn example() -> anyhow::Result<()> {
//! let analyzer = FleetAnalyzer::new();
//! let options = RunOptions {
//!     json_output: false,
//!     limit: Some(10),
//!     ..RunOptions::default()
//! };
//!
//! analyzer.run_command("dwell", options)?;
//! # Ok(())
//! # }
//! ```
//!
//! The analytics passes are also usable directly over in-memory batches:
//!
//! ```rust
//! use cowtrack::classify;
//! use cowtrack::directory::LocationDirectory;
//! use cowtrack::analytics::cows;
//!
//! let directory = LocationDirectory::new(&[]);
//! let enriched = classify::enrich(&[], &directory);
//! assert!(cows::all_cow_metrics(&enriched, &directory).is_empty());
//! ```

pub mod aliases;
pub mod analytics;
pub mod analyzer;
pub mod classify;
pub mod config;
pub mod directory;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod report;
pub mod timestamp;

pub use analyzer::FleetAnalyzer;
pub use models::*;
