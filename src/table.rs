// Formatted sales table - the immutable in-memory data model
//
// The table is built once at startup and never mutated afterwards. Every
// query returns fresh data, so concurrent viewers can share one table
// without locking and repeated filters cannot observe each other.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::FormatError;

// ============================================================================
// REGION
// ============================================================================

/// Fixed geographic partition of the sales data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    East,
    South,
    West,
}

impl Region {
    /// All known regions, in selector order
    pub const ALL: [Region; 4] = [Region::North, Region::East, Region::South, Region::West];

    /// Lowercase token as it appears in the CSV files and the selector
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "north",
            Region::East => "east",
            Region::South => "south",
            Region::West => "west",
        }
    }

    /// Parse a raw region cell. Case-sensitive: the input files use
    /// lowercase tokens and anything else is a malformed row.
    pub fn parse(raw: &str) -> Result<Region, FormatError> {
        match raw {
            "north" => Ok(Region::North),
            "east" => Ok(Region::East),
            "south" => Ok(Region::South),
            "west" => Ok(Region::West),
            other => Err(FormatError::UnknownRegion(other.to_string())),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user picked in the region selector: one region, or the
/// "all" sentinel that aggregates every region into a single series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RegionSelection {
    AllRegions,
    Region(Region),
}

impl RegionSelection {
    /// Parse a selector value at the interface boundary. Unknown values
    /// are rejected here so they never reach the render operation.
    pub fn parse(raw: &str) -> Result<RegionSelection, FormatError> {
        if raw == "all" {
            Ok(RegionSelection::AllRegions)
        } else {
            Region::parse(raw).map(RegionSelection::Region)
        }
    }

    /// Selector token ("all" or the region name)
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionSelection::AllRegions => "all",
            RegionSelection::Region(region) => region.as_str(),
        }
    }

    /// Whether a row with the given region contributes to this selection
    pub fn includes(&self, region: Region) -> bool {
        match self {
            RegionSelection::AllRegions => true,
            RegionSelection::Region(selected) => *selected == region,
        }
    }
}

impl std::fmt::Display for RegionSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for RegionSelection {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RegionSelection::parse(&value)
    }
}

impl From<RegionSelection> for String {
    fn from(selection: RegionSelection) -> String {
        selection.as_str().to_string()
    }
}

// ============================================================================
// FORMATTED RECORD
// ============================================================================

/// One sales row reduced to {sales, date, region}.
///
/// Field order matches the exported CSV header: sales,date,region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSalesRecord {
    /// Derived revenue: numeric price x quantity
    pub sales: f64,
    pub date: NaiveDate,
    pub region: Region,
}

/// One point of a chart series: total sales on one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub sales: f64,
}

// ============================================================================
// SALES TABLE
// ============================================================================

/// Ordered concatenation of formatted records from all input sources.
///
/// No uniqueness constraint on (date, region): multiple records per
/// day and region may exist and are summed when a series is built.
#[derive(Debug, Clone, Default)]
pub struct FormattedSalesTable {
    rows: Vec<FormattedSalesRecord>,
}

impl FormattedSalesTable {
    pub fn new(rows: Vec<FormattedSalesRecord>) -> Self {
        FormattedSalesTable { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in table order (source concatenation order)
    pub fn rows(&self) -> &[FormattedSalesRecord] {
        &self.rows
    }

    /// Rows belonging to one region, in table order
    pub fn rows_for_region(&self, region: Region) -> Vec<&FormattedSalesRecord> {
        self.rows.iter().filter(|row| row.region == region).collect()
    }

    /// Distinct regions present, in first-appearance order. Drives the
    /// selector options so an empty region never shows up as a choice.
    pub fn regions_present(&self) -> Vec<Region> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.region) {
                seen.push(row.region);
            }
        }
        seen
    }

    /// Earliest and latest date in the table, if any rows exist
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rows.first()?.date;
        let mut min = first;
        let mut max = first;
        for row in &self.rows {
            if row.date < min {
                min = row.date;
            }
            if row.date > max {
                max = row.date;
            }
        }
        Some((min, max))
    }

    /// Build one chart series for a selection: rows matching the selection,
    /// summed per date, in ascending date order. For `AllRegions` the value
    /// at date D is the sum of sales across every region on D.
    pub fn series_for(&self, selection: RegionSelection) -> Vec<SeriesPoint> {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for row in &self.rows {
            if selection.includes(row.region) {
                *by_date.entry(row.date).or_insert(0.0) += row.sales;
            }
        }
        by_date
            .into_iter()
            .map(|(date, sales)| SeriesPoint { date, sales })
            .collect()
    }
}

// ============================================================================
// SERIES SCANS
// ============================================================================

/// Point with the maximum sales value, by linear scan.
/// Ties break to the first occurrence, i.e. the earliest date.
pub fn peak(series: &[SeriesPoint]) -> Option<SeriesPoint> {
    let mut best: Option<SeriesPoint> = None;
    for point in series {
        match best {
            Some(current) if point.sales <= current.sales => {}
            _ => best = Some(*point),
        }
    }
    best
}

/// Point with the minimum sales value, ties to the earliest date.
pub fn trough(series: &[SeriesPoint]) -> Option<SeriesPoint> {
    let mut best: Option<SeriesPoint> = None;
    for point in series {
        match best {
            Some(current) if point.sales >= current.sales => {}
            _ => best = Some(*point),
        }
    }
    best
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn row(sales: f64, d: &str, region: Region) -> FormattedSalesRecord {
        FormattedSalesRecord {
            sales,
            date: date(d),
            region,
        }
    }

    #[test]
    fn test_region_parse() {
        assert_eq!(Region::parse("north").unwrap(), Region::North);
        assert_eq!(Region::parse("west").unwrap(), Region::West);
        assert!(Region::parse("North").is_err());
        assert!(Region::parse("central").is_err());
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(
            RegionSelection::parse("all").unwrap(),
            RegionSelection::AllRegions
        );
        assert_eq!(
            RegionSelection::parse("south").unwrap(),
            RegionSelection::Region(Region::South)
        );
        assert_eq!(
            RegionSelection::parse("everywhere"),
            Err(FormatError::UnknownRegion("everywhere".to_string()))
        );
    }

    #[test]
    fn test_all_regions_sums_per_date() {
        // Two regions selling on the same day
        let table = FormattedSalesTable::new(vec![
            row(12.0, "2021-01-15", Region::North),
            row(8.0, "2021-01-15", Region::South),
        ]);

        let series = table.series_for(RegionSelection::AllRegions);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, date("2021-01-15"));
        assert_eq!(series[0].sales, 20.0);
    }

    #[test]
    fn test_region_series_is_filtered_and_sorted() {
        let table = FormattedSalesTable::new(vec![
            row(5.0, "2021-01-16", Region::North),
            row(3.0, "2021-01-14", Region::North),
            row(99.0, "2021-01-15", Region::East),
            row(4.0, "2021-01-14", Region::North),
        ]);

        let series = table.series_for(RegionSelection::Region(Region::North));
        assert_eq!(series.len(), 2);
        // Ascending dates, same-day rows summed
        assert_eq!(series[0].date, date("2021-01-14"));
        assert_eq!(series[0].sales, 7.0);
        assert_eq!(series[1].date, date("2021-01-16"));
        assert_eq!(series[1].sales, 5.0);
    }

    #[test]
    fn test_rows_for_region_keeps_table_order() {
        let table = FormattedSalesTable::new(vec![
            row(5.0, "2021-01-16", Region::North),
            row(9.0, "2021-01-14", Region::East),
            row(3.0, "2021-01-14", Region::North),
        ]);

        let north = table.rows_for_region(Region::North);
        assert_eq!(north.len(), 2);
        assert_eq!(north[0].sales, 5.0);
        assert_eq!(north[1].sales, 3.0);
    }

    #[test]
    fn test_empty_selection_yields_empty_series() {
        let table = FormattedSalesTable::new(vec![row(5.0, "2021-01-16", Region::North)]);
        let series = table.series_for(RegionSelection::Region(Region::West));
        assert!(series.is_empty());
    }

    #[test]
    fn test_peak_ties_break_to_earliest_date() {
        let series = vec![
            SeriesPoint {
                date: date("2020-06-01"),
                sales: 50.0,
            },
            SeriesPoint {
                date: date("2020-06-02"),
                sales: 50.0,
            },
            SeriesPoint {
                date: date("2020-06-03"),
                sales: 10.0,
            },
        ];

        let top = peak(&series).unwrap();
        assert_eq!(top.date, date("2020-06-01"));
        assert_eq!(top.sales, 50.0);
    }

    #[test]
    fn test_trough_finds_minimum() {
        let series = vec![
            SeriesPoint {
                date: date("2020-06-01"),
                sales: 50.0,
            },
            SeriesPoint {
                date: date("2020-06-02"),
                sales: 7.5,
            },
        ];

        let low = trough(&series).unwrap();
        assert_eq!(low.date, date("2020-06-02"));
        assert_eq!(low.sales, 7.5);
    }

    #[test]
    fn test_peak_of_empty_series_is_none() {
        assert!(peak(&[]).is_none());
        assert!(trough(&[]).is_none());
    }

    #[test]
    fn test_regions_present_in_table_order() {
        let table = FormattedSalesTable::new(vec![
            row(1.0, "2020-01-01", Region::South),
            row(1.0, "2020-01-02", Region::North),
            row(1.0, "2020-01-03", Region::South),
        ]);
        assert_eq!(table.regions_present(), vec![Region::South, Region::North]);
    }

    #[test]
    fn test_date_range() {
        let table = FormattedSalesTable::new(vec![
            row(1.0, "2020-05-01", Region::North),
            row(1.0, "2019-12-31", Region::East),
            row(1.0, "2021-02-03", Region::West),
        ]);
        assert_eq!(
            table.date_range(),
            Some((date("2019-12-31"), date("2021-02-03")))
        );
        assert_eq!(FormattedSalesTable::default().date_range(), None);
    }
}
