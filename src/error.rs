// Row-level error taxonomy for the sales formatter
// A FormatError invalidates one row, never the whole load

use thiserror::Error;

/// Errors that can invalidate a single raw sales row or a selector value.
///
/// Load-time policy: the formatter skips the offending row and reports it
/// with its source file and line number. Render-time policy: an unknown
/// region is rejected at the API boundary before the controller sees it.
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    /// Price text did not parse as a decimal number after stripping the
    /// currency symbol (e.g. "$3.5O", "three dollars")
    #[error("price {0:?} is not a parsable currency amount")]
    MalformedPrice(String),

    /// Price parsed but was negative - sales must stay non-negative
    #[error("price {0} is negative")]
    NegativePrice(f64),

    /// Region value is not one of the configured set
    #[error("unknown region {0:?} (expected north, east, south, west or all)")]
    UnknownRegion(String),
}
