// Dashboard configuration
//
// Event dates, marker colors, the line color per region and the input
// file paths all live here, so a new annotation is a config edit, not a
// code change. `Default` is the stock Soul Foods setup; a TOML file can
// override any part of it.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::table::{Region, RegionSelection};

/// Which extreme of the rendered series an event marker is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesExtreme {
    /// Pin the marker at the maximum sales value of the series
    Maximum,
    /// Pin the marker at the minimum sales value of the series
    Minimum,
}

/// A fixed business event shown as a chart callout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMarker {
    pub date: NaiveDate,
    pub label: String,
    pub color: String,
    pub anchor: SeriesExtreme,
}

/// Label and color for the computed "highest sales" callout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakMarker {
    pub label: String,
    pub color: String,
}

/// Line color per selector value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineColors {
    pub all: String,
    pub north: String,
    pub east: String,
    pub south: String,
    pub west: String,
}

impl LineColors {
    pub fn for_selection(&self, selection: RegionSelection) -> &str {
        match selection {
            RegionSelection::AllRegions => &self.all,
            RegionSelection::Region(Region::North) => &self.north,
            RegionSelection::Region(Region::East) => &self.east,
            RegionSelection::Region(Region::South) => &self.south,
            RegionSelection::Region(Region::West) => &self.west,
        }
    }
}

impl Default for LineColors {
    fn default() -> Self {
        LineColors {
            all: "#007bff".to_string(),
            north: "#1f77b4".to_string(),
            east: "#ff7f0e".to_string(),
            south: "#2ca02c".to_string(),
            west: "#d62728".to_string(),
        }
    }
}

/// Full dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page / dashboard title
    pub title: String,
    /// Product line the formatter keeps (case-sensitive exact match)
    pub target_product: String,
    /// Raw daily sales files, loaded in this order
    pub input_files: Vec<PathBuf>,
    /// Where the format step writes the formatted table
    pub output_file: PathBuf,
    /// Selector value shown when the page first loads
    pub default_selection: RegionSelection,
    pub line_colors: LineColors,
    /// Fixed business events rendered as callouts
    pub events: Vec<EventMarker>,
    pub peak_marker: PeakMarker,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            title: "Soul Foods Sales Data Visualiser".to_string(),
            target_product: "pink morsel".to_string(),
            input_files: vec![
                PathBuf::from("data/daily_sales_data_0.csv"),
                PathBuf::from("data/daily_sales_data_1.csv"),
                PathBuf::from("data/daily_sales_data_2.csv"),
            ],
            output_file: PathBuf::from("data/formatted_sales_data.csv"),
            default_selection: RegionSelection::AllRegions,
            line_colors: LineColors::default(),
            events: vec![
                EventMarker {
                    date: NaiveDate::from_ymd_opt(2021, 1, 15).expect("valid date"),
                    label: "Price Increase".to_string(),
                    color: "red".to_string(),
                    anchor: SeriesExtreme::Maximum,
                },
                EventMarker {
                    date: NaiveDate::from_ymd_opt(2020, 7, 1).expect("valid date"),
                    label: "Marketing Event".to_string(),
                    color: "purple".to_string(),
                    anchor: SeriesExtreme::Minimum,
                },
            ],
            peak_marker: PeakMarker {
                label: "Highest Sales".to_string(),
                color: "green".to_string(),
            },
        }
    }
}

impl DashboardConfig {
    /// Load overrides from a TOML file on top of the defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: DashboardConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_events() {
        let config = DashboardConfig::default();
        assert_eq!(config.target_product, "pink morsel");
        assert_eq!(config.events.len(), 2);

        let price_increase = &config.events[0];
        assert_eq!(price_increase.label, "Price Increase");
        assert_eq!(
            price_increase.date,
            NaiveDate::from_ymd_opt(2021, 1, 15).unwrap()
        );
        assert_eq!(price_increase.anchor, SeriesExtreme::Maximum);

        let marketing = &config.events[1];
        assert_eq!(marketing.date, NaiveDate::from_ymd_opt(2020, 7, 1).unwrap());
        assert_eq!(marketing.anchor, SeriesExtreme::Minimum);
    }

    #[test]
    fn test_toml_overrides() {
        let toml_src = r#"
            title = "Regional Sales"
            default_selection = "north"

            [[events]]
            date = "2022-03-01"
            label = "Store Opening"
            color = "blue"
            anchor = "maximum"
        "#;

        let config: DashboardConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.title, "Regional Sales");
        assert_eq!(
            config.default_selection,
            RegionSelection::Region(Region::North)
        );
        // Events list is replaced wholesale, not merged
        assert_eq!(config.events.len(), 1);
        assert_eq!(config.events[0].label, "Store Opening");
        // Untouched fields keep their defaults
        assert_eq!(config.target_product, "pink morsel");
    }

    #[test]
    fn test_line_color_lookup() {
        let colors = LineColors::default();
        assert_eq!(
            colors.for_selection(RegionSelection::AllRegions),
            colors.all
        );
        assert_eq!(
            colors.for_selection(RegionSelection::Region(Region::East)),
            colors.east
        );
    }
}
