// Sales Formatter - raw daily sales CSV -> formatted {sales, date, region}
//
// Pure transform: filter one product line, strip the currency symbol,
// derive sales = price x quantity, project to the minimal schema, and
// concatenate sources in the order given. Malformed rows are skipped
// and reported with their line number, never abort the whole load.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

use crate::error::FormatError;
use crate::table::{FormattedSalesRecord, Region};

/// Currency symbol stripped from the price column
pub const CURRENCY_SYMBOL: char = '$';

/// Columns every raw sales file must carry in its header row
pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "region", "product", "quantity", "price"];

// ============================================================================
// RAW RECORD
// ============================================================================

/// One row of a daily sales file, as shipped by the source system.
/// The price keeps its raw currency text (e.g. "$3.50") until formatting.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSalesRecord {
    pub product: String,
    pub quantity: u32,
    pub price: String,
    pub date: NaiveDate,
    pub region: String,
}

// ============================================================================
// LOAD OUTCOME
// ============================================================================

/// A row the formatter refused, with enough context to find it again
#[derive(Debug, Clone)]
pub struct SkippedRow {
    pub source: String,
    pub line: u64,
    pub reason: String,
}

impl std::fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.source, self.line, self.reason)
    }
}

/// Result of loading one or more raw sales files: the formatted records
/// that survived, plus a report of every row that was skipped.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub records: Vec<FormattedSalesRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl LoadOutcome {
    /// Append another source's outcome, preserving row order within
    /// each source and source order across the whole table
    pub fn extend(&mut self, other: LoadOutcome) {
        self.records.extend(other.records);
        self.skipped.extend(other.skipped);
    }
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Parse a raw price cell: strip one leading currency symbol, then parse
/// the remainder as a decimal number. Negative prices are invalid.
pub fn parse_price(raw: &str) -> Result<f64, FormatError> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix(CURRENCY_SYMBOL).unwrap_or(trimmed);
    let value: f64 = stripped
        .parse()
        .map_err(|_| FormatError::MalformedPrice(raw.to_string()))?;
    if value < 0.0 {
        return Err(FormatError::NegativePrice(value));
    }
    Ok(value)
}

/// Format one raw row. Returns `Ok(None)` when the product is not the
/// target (case-sensitive exact match), `Err` when the row is malformed.
pub fn format_record(
    raw: &RawSalesRecord,
    target_product: &str,
) -> Result<Option<FormattedSalesRecord>, FormatError> {
    if raw.product != target_product {
        return Ok(None);
    }
    let region = Region::parse(&raw.region)?;
    let price = parse_price(&raw.price)?;
    Ok(Some(FormattedSalesRecord {
        sales: price * f64::from(raw.quantity),
        date: raw.date,
        region,
    }))
}

/// Load one raw sales CSV and format it.
///
/// The header is validated up front (a missing required column fails the
/// whole file); after that, each bad row is skipped and reported rather
/// than aborting the load.
pub fn load_sales_csv(path: &Path, target_product: &str) -> Result<LoadOutcome> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open sales file {:?}", path))?;

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row of {:?}", path))?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            bail!("{}: missing required column {:?}", source, column);
        }
    }

    let mut outcome = LoadOutcome::default();
    for (index, result) in reader.deserialize::<RawSalesRecord>().enumerate() {
        // Header is line 1, first record is line 2
        let line = index as u64 + 2;
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                outcome.skipped.push(SkippedRow {
                    source: source.clone(),
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match format_record(&raw, target_product) {
            Ok(Some(record)) => outcome.records.push(record),
            Ok(None) => {} // other product line, filtered out
            Err(e) => outcome.skipped.push(SkippedRow {
                source: source.clone(),
                line,
                reason: e.to_string(),
            }),
        }
    }

    Ok(outcome)
}

/// Run the formatter over every input file, concatenating results in
/// the order the paths are given.
pub fn format_sales<P: AsRef<Path>>(paths: &[P], target_product: &str) -> Result<LoadOutcome> {
    let mut merged = LoadOutcome::default();
    for path in paths {
        let outcome = load_sales_csv(path.as_ref(), target_product)?;
        merged.extend(outcome);
    }
    Ok(merged)
}

/// Export step: write the formatted table as CSV with header
/// `sales,date,region`, in table order.
pub fn write_formatted_csv(path: &Path, records: &[FormattedSalesRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output file {:?}", path))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush output file {:?}", path))?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
