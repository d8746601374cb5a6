// Dashboard Controller
//
// Owns the formatted sales table (immutable after load) and turns one
// selector value into one ChartSpec. One interaction, one synchronous
// recompute over the in-memory table; nothing is cached or mutated, so
// any number of viewers can share a controller behind an Arc.

use crate::chart::{Annotation, ChartSpec, LegendEntry};
use crate::config::{DashboardConfig, SeriesExtreme};
use crate::table::{self, FormattedSalesTable, Region, RegionSelection};

pub const X_LABEL: &str = "Date";
pub const Y_LABEL: &str = "Total Sales";

pub struct DashboardController {
    table: FormattedSalesTable,
    config: DashboardConfig,
}

impl DashboardController {
    /// Explicit initialization step: the table is loaded once at startup
    /// and handed in by value, never loaded on import or reloaded later.
    pub fn new(table: FormattedSalesTable, config: DashboardConfig) -> Self {
        DashboardController { table, config }
    }

    pub fn table(&self) -> &FormattedSalesTable {
        &self.table
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Values offered by the region selector: "all" plus every known region
    pub fn selector_values(&self) -> Vec<String> {
        let mut values = vec![RegionSelection::AllRegions.as_str().to_string()];
        values.extend(Region::ALL.iter().map(|r| r.as_str().to_string()));
        values
    }

    fn title_for(&self, selection: RegionSelection) -> String {
        match selection {
            RegionSelection::AllRegions => "Sales Across All Regions".to_string(),
            RegionSelection::Region(region) => format!("Sales in {} Region", region),
        }
    }

    /// The single render operation: filter, scan, annotate.
    ///
    /// An empty selection degrades to a valid empty-state chart instead of
    /// faulting. Unknown selector values never get here - they are rejected
    /// when the selector string is parsed into a `RegionSelection`.
    pub fn render_chart(&self, selection: RegionSelection) -> ChartSpec {
        let series = self.table.series_for(selection);
        let title = self.title_for(selection);

        // Empty filtered set: max/min are undefined, render the empty state
        let (peak, trough) = match (table::peak(&series), table::trough(&series)) {
            (Some(peak), Some(trough)) => (peak, trough),
            _ => {
                return ChartSpec::empty_state(
                    format!("{} (no data)", title),
                    X_LABEL.to_string(),
                    Y_LABEL.to_string(),
                );
            }
        };

        let mut annotations = Vec::with_capacity(self.config.events.len() + 1);
        for event in &self.config.events {
            let sales = match event.anchor {
                SeriesExtreme::Maximum => peak.sales,
                SeriesExtreme::Minimum => trough.sales,
            };
            annotations.push(Annotation {
                date: event.date,
                sales,
                label: event.label.clone(),
                color: event.color.clone(),
            });
        }

        // Computed marker at the highest point of this series
        annotations.push(Annotation {
            date: peak.date,
            sales: peak.sales,
            label: self.config.peak_marker.label.clone(),
            color: self.config.peak_marker.color.clone(),
        });

        let legend = annotations
            .iter()
            .map(|a| LegendEntry {
                label: a.label.clone(),
                color: a.color.clone(),
            })
            .collect();

        ChartSpec {
            title,
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            line_color: self.config.line_colors.for_selection(selection).to_string(),
            series,
            annotations,
            legend,
            empty: false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::FormattedSalesRecord;
    use chrono::NaiveDate;

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

    fn controller(rows: Vec<FormattedSalesRecord>) -> DashboardController {
        DashboardController::new(FormattedSalesTable::new(rows), DashboardConfig::default())
    }

    #[test]
    fn test_render_all_regions_sums_per_date() {
        let ctrl = controller(vec![
            row(12.0, "2021-01-15", Region::North),
            row(8.0, "2021-01-15", Region::South),
            row(3.0, "2021-01-14", Region::East),
        ]);

        let spec = ctrl.render_chart(RegionSelection::AllRegions);
        assert!(!spec.empty);
        assert_eq!(spec.title, "Sales Across All Regions");
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[0].date, date("2021-01-14"));
        assert_eq!(spec.series[1].sales, 20.0);
    }

    #[test]
    fn test_render_single_region_filters() {
        let ctrl = controller(vec![
            row(12.0, "2021-01-15", Region::North),
            row(99.0, "2021-01-15", Region::South),
            row(5.0, "2021-01-10", Region::North),
        ]);

        let spec = ctrl.render_chart(RegionSelection::Region(Region::North));
        assert_eq!(spec.title, "Sales in north Region");
        assert_eq!(spec.series.len(), 2);
        // Ascending dates, south's 99.0 nowhere in the series
        assert_eq!(spec.series[0].sales, 5.0);
        assert_eq!(spec.series[1].sales, 12.0);
        assert_eq!(spec.line_color, ctrl.config().line_colors.north);
    }

    #[test]
    fn test_annotations_anchor_to_extremes() {
        let ctrl = controller(vec![
            row(2.0, "2020-06-01", Region::North),
            row(50.0, "2020-08-01", Region::North),
            row(10.0, "2020-10-01", Region::North),
        ]);

        let spec = ctrl.render_chart(RegionSelection::Region(Region::North));
        // Two configured events plus the computed peak marker
        assert_eq!(spec.annotations.len(), 3);

        let price_increase = &spec.annotations[0];
        assert_eq!(price_increase.label, "Price Increase");
        assert_eq!(price_increase.date, date("2021-01-15"));
        assert_eq!(price_increase.sales, 50.0); // pinned at the maximum

        let marketing = &spec.annotations[1];
        assert_eq!(marketing.date, date("2020-07-01"));
        assert_eq!(marketing.sales, 2.0); // pinned at the minimum

        let highest = &spec.annotations[2];
        assert_eq!(highest.label, "Highest Sales");
        assert_eq!(highest.date, date("2020-08-01"));
        assert_eq!(highest.sales, 50.0);

        // Legend mirrors the annotations
        assert_eq!(spec.legend.len(), 3);
        assert_eq!(spec.legend[0].label, "Price Increase");
    }

    #[test]
    fn test_empty_selection_degrades_to_empty_chart() {
        let ctrl = controller(vec![row(12.0, "2021-01-15", Region::North)]);

        let spec = ctrl.render_chart(RegionSelection::Region(Region::West));
        assert!(spec.empty);
        assert_eq!(spec.title, "Sales in west Region (no data)");
        assert!(spec.series.is_empty());
        assert!(spec.annotations.is_empty());
    }

    #[test]
    fn test_empty_table_renders_empty_all_regions() {
        let ctrl = controller(vec![]);
        let spec = ctrl.render_chart(RegionSelection::AllRegions);
        assert!(spec.empty);
    }

    #[test]
    fn test_selector_values() {
        let ctrl = controller(vec![]);
        assert_eq!(
            ctrl.selector_values(),
            vec!["all", "north", "east", "south", "west"]
        );
    }
}
