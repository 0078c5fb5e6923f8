use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::models::{DependencyRecord, Ecosystem};

/// Render a colored terminal summary of the scan.
pub fn render(
    records: &[DependencyRecord],
    inventory_path: &Path,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let total = records.len();

    if quiet {
        println!("Total: {}  Inventory: {}", total, inventory_path.display());
        return Ok(());
    }

    println!("\n {} v{}", "depcanary".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Inventory: {}\n", inventory_path.display());

    if records.is_empty() {
        println!(" {} No dependencies found in the scanned lockfiles.\n", "⚠".yellow());
        return Ok(());
    }

    render_summary_table(records);
    println!();

    if verbose {
        println!(" All recorded dependencies:\n");
        render_full_table(records);
        println!();
    }

    Ok(())
}

fn render_summary_table(records: &[DependencyRecord]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Ecosystem").add_attribute(Attribute::Bold),
            Cell::new("Packages").add_attribute(Attribute::Bold),
            Cell::new("Dev").add_attribute(Attribute::Bold),
        ]);

    for ecosystem in Ecosystem::ALL {
        let count = records.iter().filter(|r| r.ecosystem == ecosystem).count();
        if count == 0 {
            continue;
        }
        let dev_count = records
            .iter()
            .filter(|r| r.ecosystem == ecosystem && r.dev == Some(true))
            .count();
        table.add_row(vec![
            Cell::new(ecosystem.to_string()),
            Cell::new(count).set_alignment(CellAlignment::Right),
            Cell::new(dev_count).set_alignment(CellAlignment::Right),
        ]);
    }

    table.add_row(vec![
        Cell::new("total").add_attribute(Attribute::Bold),
        Cell::new(records.len())
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
        Cell::new(records.iter().filter(|r| r.dev == Some(true)).count())
            .set_alignment(CellAlignment::Right),
    ]);

    println!("{}", table);
}

fn render_full_table(records: &[DependencyRecord]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Ecosystem").add_attribute(Attribute::Bold),
            Cell::new("Dev").add_attribute(Attribute::Bold),
            Cell::new("Lockfile").add_attribute(Attribute::Bold),
        ]);

    for record in records {
        let dev = match record.dev {
            Some(true) => "yes",
            Some(false) => "no",
            None => "-",
        };
        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(&record.version),
            Cell::new(record.ecosystem.to_string()),
            Cell::new(dev).set_alignment(CellAlignment::Center),
            Cell::new(record.source.as_deref().unwrap_or("-")),
        ]);
    }

    println!("{}", table);
}
