// ChartSpec - declarative chart description
//
// The controller produces these; the rendering collaborator (the served
// dashboard page, or anything else that speaks JSON) just draws them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::table::SeriesPoint;

/// A callout pinned to a chart coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// X position (calendar date)
    pub date: NaiveDate,
    /// Y position (sales value the arrow points at)
    pub sales: f64,
    pub label: String,
    /// CSS-style color for the marker
    pub color: String,
}

/// One entry of the static legend block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// Declarative description of the sales line chart.
///
/// `empty` is set when the selection matched no rows; the series and
/// annotations are empty and the renderer shows a "no data" state
/// instead of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Line color for the selected region
    pub line_color: String,
    pub series: Vec<SeriesPoint>,
    pub annotations: Vec<Annotation>,
    pub legend: Vec<LegendEntry>,
    pub empty: bool,
}

impl ChartSpec {
    /// Valid empty-state chart for a selection with no matching rows
    pub fn empty_state(title: String, x_label: String, y_label: String) -> Self {
        ChartSpec {
            title,
            x_label,
            y_label,
            line_color: String::new(),
            series: Vec::new(),
            annotations: Vec::new(),
            legend: Vec::new(),
            empty: true,
        }
    }
}
