use anyhow::Result;
use std::env;
use std::path::Path;

use sales_dashboard::{format_sales, write_formatted_csv, DashboardConfig, FormattedSalesTable};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("format") => run_format(args.get(2).map(String::as_str)),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("Sales Dashboard v{}", sales_dashboard::VERSION);
    println!();
    println!("Usage:");
    println!("  sales-dashboard format [config.toml]   Run the sales formatter");
    println!("  sales-server [config.toml]             Serve the dashboard");
}

fn load_config(config_path: Option<&str>) -> Result<DashboardConfig> {
    match config_path {
        Some(path) => DashboardConfig::from_toml_file(Path::new(path)),
        None => Ok(DashboardConfig::default()),
    }
}

fn run_format(config_path: Option<&str>) -> Result<()> {
    println!("📊 Sales Formatter - raw daily sales → formatted table");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = load_config(config_path)?;

    // 1. Load and format every input file
    println!("\n📂 Loading {} sales files...", config.input_files.len());
    let outcome = format_sales(&config.input_files, &config.target_product)?;
    println!(
        "✓ Kept {} rows for product {:?}",
        outcome.records.len(),
        config.target_product
    );

    // 2. Report skipped rows (bad price, bad date, unknown region)
    if !outcome.skipped.is_empty() {
        eprintln!("\n⚠️  Skipped {} malformed rows:", outcome.skipped.len());
        for skipped in &outcome.skipped {
            eprintln!("   {}", skipped);
        }
    }

    // 3. Export step
    println!("\n💾 Writing formatted table...");
    write_formatted_csv(&config.output_file, &outcome.records)?;
    println!("✓ Wrote {:?}", config.output_file);

    // 4. Summary
    let table = FormattedSalesTable::new(outcome.records);
    if let Some((from, to)) = table.date_range() {
        println!("\n🔍 {} rows covering {} → {}", table.len(), from, to);
        let regions: Vec<String> = table
            .regions_present()
            .iter()
            .map(|r| r.to_string())
            .collect();
        println!("✓ Regions present: {}", regions.join(", "));
    } else {
        println!("\n⚠️  No rows matched - the dashboard will render empty charts");
    }

    Ok(())
}
