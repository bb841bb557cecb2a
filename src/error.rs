//! The [`IsoMajorError`] `enum` definition and error messages.
//!
use std::num::ParseFloatError;
use thiserror::Error;

/// The [`IsoMajorError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum IsoMajorError {
    // IO related errors
    #[error("I/O error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("TSV reading error: {0}")]
    TsvError(#[from] csv::Error),

    // File parsing related errors
    #[error("Input is empty: expected a header line with condition columns")]
    EmptyInput,
    #[error("Header has too few columns ({0}). The first nine columns must be transcript descriptors, followed by at least one condition block.")]
    HeaderTooFewColumns(usize),
    #[error("Row for transcript '{transcript}' has {found} columns, but the header requires at least {required}")]
    RowTooFewColumns {
        transcript: String,
        found: usize,
        required: usize,
    },
    #[error("Float parsing error for transcript '{transcript}' at column {column} ('{value}'): {source}")]
    ExpressionParseError {
        transcript: String,
        column: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    // Threshold errors
    #[error("Invalid fraction threshold {0}: must be within [0, 1]")]
    InvalidFraction(f64),
    #[error("Invalid minimum FPKM threshold {0}: must be finite and non-negative")]
    InvalidMinFpkm(f64),
}
