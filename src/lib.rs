// Sales Dashboard - Core Library
// Exposes all modules for use in the CLI, the web server, and tests

pub mod chart;
pub mod config;
pub mod controller;
pub mod error;
pub mod formatter;
pub mod table;

// Re-export commonly used types
pub use chart::{Annotation, ChartSpec, LegendEntry};
pub use config::{DashboardConfig, EventMarker, LineColors, PeakMarker, SeriesExtreme};
pub use controller::DashboardController;
pub use error::FormatError;
pub use formatter::{
    format_record, format_sales, load_sales_csv, parse_price, write_formatted_csv, LoadOutcome,
    RawSalesRecord, SkippedRow,
};
pub use table::{FormattedSalesRecord, FormattedSalesTable, Region, RegionSelection, SeriesPoint};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
