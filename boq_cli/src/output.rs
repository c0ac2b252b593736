//! Output formatting module
//!
//! Rounding happens here and only here; the report itself is un-rounded.

use std::fmt::Write;

use boq_core::calculations::{CostSummary, QuantityReport};
use boq_core::project::{Project, ProjectSettings};

use crate::cli::OutputFormat;

/// Print the report (or only its cost summary) in the requested format.
pub fn output_report(
    format: OutputFormat,
    project: &Project,
    report: &QuantityReport,
    summary_only: bool,
) -> Result<(), serde_json::Error> {
    let summary = report.cost_summary();
    match format {
        OutputFormat::Json if summary_only => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Json => {
            let combined = serde_json::json!({
                "project": project.meta.name,
                "currency": project.settings.currency,
                "report": report,
                "cost_summary": summary,
            });
            println!("{}", serde_json::to_string_pretty(&combined)?);
        }
        OutputFormat::Table if summary_only => {
            print!("{}", render_summary(&summary, &project.settings));
        }
        OutputFormat::Table => {
            print!("{}", render_table(project, report));
            print!("{}", render_summary(&summary, &project.settings));
        }
    }
    Ok(())
}

/// Human-readable report.
pub fn render_table(project: &Project, report: &QuantityReport) -> String {
    let d = project.settings.display_decimals;
    let mut out = String::new();

    let _ = writeln!(out, "BILL OF QUANTITIES - {}", project.meta.name);
    let _ = writeln!(out, "{}", "=".repeat(72));

    let _ = writeln!(out, "\nSteel by floor");
    let _ = writeln!(out, "{:<20} {:>12} {:>14} {:>12}", "Floor", "Area m²", "Steel kg/m²", "Steel t");
    for row in &report.steel_calculation.floors {
        let _ = writeln!(
            out,
            "{:<20} {:>12.d$} {:>14.d$} {:>12.d$}",
            row.floor_name, row.area, row.steel_factor, row.steel_tons,
        );
    }
    let _ = writeln!(
        out,
        "{:<20} {:>12.d$} {:>14} {:>12.d$}",
        "Total", report.total_area, "", report.steel_calculation.total_steel_tons,
    );

    let _ = writeln!(out, "\nUnit materials ({} units)", report.total_units);
    let _ = writeln!(out, "{:<28} {:<6} {:>12} {:>12} {:>14}", "Item", "Unit", "Quantity", "Unit price", "Total");
    for row in &report.unit_materials {
        let flag = if row.warnings.is_empty() { "" } else { " !" };
        let _ = writeln!(
            out,
            "{:<28} {:<6} {:>12.d$} {:>12.d$} {:>14.d$}{}",
            row.item_name, row.unit, row.quantity, row.unit_price, row.total_price, flag,
        );
    }

    let _ = writeln!(out, "\nArea materials");
    let _ = writeln!(
        out,
        "{:<28} {:<6} {:<14} {:<8} {:>12} {:>12} {:>14}",
        "Item", "Unit", "Scope", "Method", "Quantity", "Unit price", "Total"
    );
    for row in &report.area_materials {
        let scope = row.resolved_floor_name.as_deref().unwrap_or("All floors");
        let method = if row.tile_override_applied {
            "Tiles"
        } else {
            row.calculation_method.display_name()
        };
        let flag = if row.warnings.is_empty() { "" } else { " !" };
        let _ = writeln!(
            out,
            "{:<28} {:<6} {:<14} {:<8} {:>12.d$} {:>12.d$} {:>14.d$}{}",
            row.item_name, row.unit, scope, method, row.quantity, row.unit_price, row.total_price, flag,
        );
    }

    let warnings = report.warnings();
    if !warnings.is_empty() {
        let _ = writeln!(out, "\nNeeds review");
        for (item, warning) in warnings {
            let _ = writeln!(out, "  ! {}: {}", item, warning);
        }
    }
    out
}

/// Cost subtotals and grand total.
pub fn render_summary(summary: &CostSummary, settings: &ProjectSettings) -> String {
    let d = settings.display_decimals;
    let c = &settings.currency;
    let mut out = String::new();
    let _ = writeln!(out, "\nCost summary ({})", c);
    let _ = writeln!(out, "  Unit materials: {:>16.d$}", summary.total_unit_materials_cost);
    let _ = writeln!(out, "  Area materials: {:>16.d$}", summary.total_area_materials_cost);
    let _ = writeln!(out, "  Total:          {:>16.d$}", summary.total_materials_cost);
    out
}
