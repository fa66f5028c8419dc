//! Output Formatting and Display Management
//!
//! Renders every analytics output either as structured JSON (for
//! programmatic consumption - the same camelCase shapes the dashboard UI
//! reads) or as a colored terminal report with text bar charts.
//!
//! The renderer is deliberately dumb: it receives finished aggregate records
//! from the analytics engine and only formats them. No analytics logic lives
//! here.

use crate::config::get_config;
use crate::models::{
    AgingReport, CowMetrics, DwellReport, EventCount, FleetSummary, MapPoint, RegionMetrics,
    WarehouseMetrics,
};
use colored::Colorize;
use serde::Serialize;

pub struct ReportManager;

impl Default for ReportManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportManager {
    pub fn new() -> Self {
        Self
    }

    fn emit_json<T: Serialize>(&self, key: &str, data: &T) {
        let output = serde_json::json!({ key: data });
        let rendered = if get_config().output.json_pretty {
            serde_json::to_string_pretty(&output)
        } else {
            serde_json::to_string(&output)
        };
        match rendered {
            Ok(json_str) => println!("{}", json_str),
            Err(e) => eprintln!("Error serializing {} to JSON: {}", key, e),
        }
    }

    fn header(&self, title: &str) {
        println!("\n{}", "=".repeat(80).bright_cyan());
        println!("{}", title.bright_white().bold());
        println!("{}", "=".repeat(80).bright_cyan());
    }

    fn bar(&self, value: f64, max: f64) -> String {
        let width = get_config().analytics.chart_width as f64;
        if max <= 0.0 {
            return String::new();
        }
        let len = ((value / max) * width).round().clamp(0.0, width) as usize;
        "\u{2588}".repeat(len)
    }

    pub fn display_summary(&self, summary: &FleetSummary, json_output: bool) {
        if json_output {
            self.emit_json("summary", summary);
            return;
        }

        self.header("COW Fleet Report - Summary");
        println!(
            "\n  Movements: {} • COWs: {} • Distance: {} km",
            summary.total_movements.to_string().bright_white().bold(),
            summary.total_cows.to_string().bright_white().bold(),
            format!("{:.2}", summary.total_distance_km).bright_green().bold()
        );
        println!(
            "  Mix: {} Full / {} Half / {} Zero",
            summary.movement_mix.full.to_string().bright_green(),
            summary.movement_mix.half.to_string().bright_yellow(),
            summary.movement_mix.zero.to_string().bright_red()
        );
        println!(
            "  Directory: {} warehouses, {} sites\n",
            summary.warehouse_count.to_string().bright_white(),
            summary.site_count.to_string().bright_white()
        );
    }

    pub fn display_cows(&self, metrics: &[CowMetrics], limit: Option<usize>, json_output: bool) {
        if json_output {
            self.emit_json("cows", &metrics);
            return;
        }

        self.header("COW Fleet Report - Per-COW Metrics");
        let shown = limit.unwrap_or(metrics.len()).min(metrics.len());
        println!(
            "\n  {:12} {:>6} {:>10} {:>9} {:>14} {:>9} {:>7}  {}",
            "COW", "Moves", "Dist km", "Avg km", "Mix F/H/Z", "Idle d", "Static", "Regions"
        );
        println!("  {}", "-".repeat(90));
        for cow in metrics.iter().take(shown) {
            println!(
                "  {:12} {:>6} {:>10.2} {:>9.2} {:>14} {:>9.2} {:>7}  {}",
                cow.cow_id.bright_cyan(),
                cow.total_movements,
                cow.total_distance_km,
                cow.avg_distance_km,
                format!(
                    "{}/{}/{}",
                    cow.movement_mix.full, cow.movement_mix.half, cow.movement_mix.zero
                ),
                cow.avg_idle_days,
                if cow.is_static { "yes".bright_red() } else { "no".bright_green() },
                cow.regions_served.join(", ")
            );
        }
        if shown < metrics.len() {
            println!("  ... {} more", metrics.len() - shown);
        }
        println!();
    }

    pub fn display_warehouses(
        &self,
        metrics: &[WarehouseMetrics],
        limit: Option<usize>,
        json_output: bool,
    ) {
        if json_output {
            self.emit_json("warehouses", &metrics);
            return;
        }

        self.header("COW Fleet Report - Warehouse Metrics");
        let shown = limit.unwrap_or(metrics.len()).min(metrics.len());
        for wh in metrics.iter().take(shown) {
            println!(
                "\n  {} ({})",
                wh.warehouse_name.bright_white().bold(),
                wh.location_id.bright_cyan()
            );
            println!(
                "    out: {} moves (avg {} km) • in: {} moves (avg {} km) • idle: {} days",
                wh.outgoing_movements.to_string().bright_white(),
                format!("{:.2}", wh.avg_outgoing_distance_km).bright_green(),
                wh.incoming_movements.to_string().bright_white(),
                format!("{:.2}", wh.avg_incoming_distance_km).bright_green(),
                format!("{:.2}", wh.total_idle_days).bright_yellow()
            );
            if !wh.top_destination_regions.is_empty() {
                let regions: Vec<String> = wh
                    .top_destination_regions
                    .iter()
                    .map(|point| format!("{} ({})", point.name, point.value as usize))
                    .collect();
                println!("    destinations: {}", regions.join(", "));
            }
        }
        println!();
    }

    pub fn display_regions(&self, metrics: &[RegionMetrics], json_output: bool) {
        if json_output {
            self.emit_json("regions", &metrics);
            return;
        }

        self.header("COW Fleet Report - Region Metrics");
        println!(
            "\n  {:10} {:>9} {:>9} {:>8} {:>8} {:>13} {:>12}",
            "Region", "Moves", "Deployed", "Active", "Static", "Cross-region", "Avg deploy d"
        );
        println!("  {}", "-".repeat(74));
        for region in metrics {
            println!(
                "  {:10} {:>9} {:>9} {:>8} {:>8} {:>13} {:>12.2}",
                region.region.bright_cyan(),
                region.total_movements,
                region.deployed_cows,
                region.active_cows,
                region.static_cows,
                region.cross_region_movements,
                region.avg_deployment_days
            );
        }
        println!();
    }

    pub fn display_dwell(&self, report: &DwellReport, json_output: bool) {
        if json_output {
            self.emit_json("dwell", report);
            return;
        }

        self.header("COW Fleet Report - Warehouse Dwell Time");

        println!("\n  Top COWs by total stay days");
        println!("  {}", "-".repeat(70));
        let max = report.top_cows.first().map(|p| p.value).unwrap_or(0.0);
        for point in &report.top_cows {
            println!(
                "  {:12} {:>9.2}  {}",
                point.name.bright_cyan(),
                point.value,
                self.bar(point.value, max).bright_yellow()
            );
        }

        println!("\n  Top locations by accumulated stay days");
        println!("  {}", "-".repeat(70));
        let max = report.top_warehouses.first().map(|p| p.value).unwrap_or(0.0);
        for point in &report.top_warehouses {
            println!(
                "  {:24} {:>9.2}  {}",
                point.name.bright_white(),
                point.value,
                self.bar(point.value, max).bright_yellow()
            );
        }

        println!("\n  Average stay per location");
        println!("  {}", "-".repeat(70));
        for point in &report.avg_stay_per_warehouse {
            println!("  {:24} {:>9.2} days", point.name, point.value);
        }
        println!("\n  {} closed stays total\n", report.stays.len().to_string().bright_white());
    }

    pub fn display_aging(&self, report: &AgingReport, short: bool, json_output: bool) {
        if json_output {
            self.emit_json(if short { "shortIdle" } else { "aging" }, report);
            return;
        }

        let (title, unit) = if short {
            ("COW Fleet Report - Short Idle Time", "days")
        } else {
            ("COW Fleet Report - Off-Air Warehouse Aging", "months")
        };
        self.header(title);

        println!("\n  COWs by idle {}", unit);
        println!("  {}", "-".repeat(70));
        let max = report.buckets.iter().map(|b| b.value).fold(0.0, f64::max);
        for bucket in &report.buckets {
            println!(
                "  {:>6} {}  {:>5}  {}",
                bucket.name.bright_white(),
                unit,
                bucket.value as usize,
                self.bar(bucket.value, max).bright_red()
            );
        }

        println!("\n  {:12} {:>6} {:>12}  {}", "COW", "Moves", "Avg idle d", "Top warehouse");
        println!("  {}", "-".repeat(70));
        for row in &report.rows {
            println!(
                "  {:12} {:>6} {:>12.2}  {}",
                row.cow_id.bright_cyan(),
                row.total_movements,
                row.avg_idle_days,
                row.top_warehouse
            );
        }
        println!();
    }

    pub fn display_events(
        &self,
        events: &[EventCount],
        filtered_total: usize,
        json_output: bool,
    ) {
        if json_output {
            self.emit_json("events", &serde_json::json!({
                "top": events,
                "filteredTotal": filtered_total,
            }));
            return;
        }

        self.header("COW Fleet Report - Top Events");
        println!(
            "\n  {} movements with a usable event value\n",
            filtered_total.to_string().bright_white().bold()
        );
        let max = events.first().map(|e| e.count as f64).unwrap_or(0.0);
        for event in events {
            println!(
                "  {:28} {:>6} {:>7.2}%  {}",
                event.name.bright_cyan(),
                event.count,
                event.percentage,
                self.bar(event.count as f64, max).bright_yellow()
            );
        }
        println!();
    }

    pub fn display_vendors(&self, vendors: &[EventCount], json_output: bool) {
        if json_output {
            self.emit_json("vendors", &vendors);
            return;
        }

        self.header("COW Fleet Report - Top Vendors");
        println!();
        let max = vendors.first().map(|v| v.count as f64).unwrap_or(0.0);
        for vendor in vendors {
            println!(
                "  {:28} {:>6} {:>7.2}%  {}",
                vendor.name.bright_cyan(),
                vendor.count,
                vendor.percentage,
                self.bar(vendor.count as f64, max).bright_yellow()
            );
        }
        println!();
    }

    pub fn display_map(&self, points: &[MapPoint], json_output: bool) {
        if json_output {
            self.emit_json("map", &points);
            return;
        }

        self.header("COW Fleet Report - Movement Volume by Location");
        println!("\n  {:>10} {:>10} {:>8}", "Lat", "Lon", "Moves");
        println!("  {}", "-".repeat(32));
        for point in points {
            println!("  {:>10.4} {:>10.4} {:>8}", point.lat, point.lon, point.value as usize);
        }
        println!();
    }
}
