//! Fleet Analysis Engine
//!
//! The main coordinator for the analytics pipeline. It is the only place
//! where the excluded collaborators (ingestion, rendering) meet the pure
//! analytics core:
//!
//! 1. **Load**: the ingestion adapter reads the location directory and
//!    movement batch from the configured (or overridden) paths
//! 2. **Enrich**: the classifier fills in missing movement types, leaving
//!    source-supplied ones untouched
//! 3. **Aggregate**: the requested analytics pass runs over the enriched
//!    batch
//! 4. **Report**: the result is rendered as a colored terminal report or
//!    JSON
//!
//! Every aggregation is re-derived from the same enriched batch - there is
//! no state between commands.

use crate::analytics::{self, aging, cows, dwell, regions, rollups, warehouses};
use crate::classify;
use crate::config::get_config;
use crate::directory::LocationDirectory;
use crate::ingest::SheetIngestor;
use crate::models::Movement;
use crate::report::ReportManager;
use anyhow::Result;
use std::path::PathBuf;
use tracing::warn;

/// Per-invocation options, assembled by the CLI layer.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub json_output: bool,
    pub limit: Option<usize>,
    pub cow: Option<String>,
    pub short: bool,
    pub locations_file: Option<PathBuf>,
    pub movements_file: Option<PathBuf>,
}

pub struct FleetAnalyzer {
    ingestor: SheetIngestor,
    report: ReportManager,
}

impl Default for FleetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FleetAnalyzer {
    pub fn new() -> Self {
        Self {
            ingestor: SheetIngestor::new(),
            report: ReportManager::new(),
        }
    }

    /// Load and enrich the batch the analytics passes will consume.
    pub fn load(&self, options: &RunOptions) -> Result<(LocationDirectory, Vec<Movement>)> {
        let config = get_config();
        let locations_path = options
            .locations_file
            .clone()
            .unwrap_or_else(|| config.paths.locations_file.clone());
        let movements_path = options
            .movements_file
            .clone()
            .unwrap_or_else(|| config.paths.movements_file.clone());

        let data = self.ingestor.load(&locations_path, &movements_path)?;
        let directory = LocationDirectory::new(&data.locations);
        let enriched = classify::enrich(&data.movements, &directory);
        Ok((directory, enriched))
    }

    pub fn run_command(&self, command: &str, options: RunOptions) -> Result<()> {
        let (directory, movements) = self.load(&options)?;

        if movements.is_empty() {
            warn!("No movement data found");
            if options.json_output {
                println!("[]");
            } else {
                println!("No movement data found.");
            }
            return Ok(());
        }

        let top_limit = options.limit.unwrap_or(get_config().analytics.top_limit);

        match command {
            "summary" => {
                let summary = analytics::fleet_summary(&movements, &directory);
                self.report.display_summary(&summary, options.json_output);
            }
            "cows" => {
                let metrics = match &options.cow {
                    Some(cow_id) => match cows::cow_metrics(cow_id, &movements, &directory) {
                        Some(metrics) => vec![metrics],
                        None => anyhow::bail!("No movements found for COW {}", cow_id),
                    },
                    None => cows::all_cow_metrics(&movements, &directory),
                };
                self.report.display_cows(&metrics, options.limit, options.json_output);
            }
            "warehouses" => {
                let metrics = warehouses::all_warehouse_metrics(&movements, &directory);
                self.report.display_warehouses(&metrics, options.limit, options.json_output);
            }
            "regions" => {
                let metrics = regions::all_region_metrics(&movements, &directory);
                self.report.display_regions(&metrics, options.json_output);
            }
            "dwell" => {
                let report = dwell::dwell_report(&movements, &directory, top_limit);
                self.report.display_dwell(&report, options.json_output);
            }
            "aging" => {
                let report = if options.short {
                    aging::short_idle_report(&movements, &directory)
                } else {
                    aging::aging_report(&movements, &directory)
                };
                self.report.display_aging(&report, options.short, options.json_output);
            }
            "events" => {
                let top = rollups::top_events(&movements, top_limit);
                let filtered_total = rollups::filtered_event_total(&movements);
                self.report.display_events(&top, filtered_total, options.json_output);
            }
            "vendors" => {
                let top = rollups::top_vendors(&movements, top_limit);
                self.report.display_vendors(&top, options.json_output);
            }
            "map" => {
                let points = analytics::map_points(&movements, &directory);
                self.report.display_map(&points, options.json_output);
            }
            _ => {
                anyhow::bail!("Unknown command: {}", command);
            }
        }

        Ok(())
    }
}
