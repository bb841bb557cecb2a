//! Parsers for Cufflinks-style FPKM tracking tables.
//!
//! A tracking table is a TSV file with one header line and one row per transcript.
//! [`header`] defines the fixed column layout and extracts the condition names;
//! [`tracking`] provides [`TrackingReader`], a lazy parsing iterator yielding
//! [`TranscriptRow`]s. Both plaintext and gzip-compressed input are supported
//! through [`InputStream`](crate::io::InputStream).
//!
//! Under the hood, this uses the [`csv`] crate, with quoting disabled so that
//! identifiers are taken literally.

pub mod header;
pub mod tracking;

pub use header::parse_conditions;
pub use tracking::{build_tracking_reader, TrackingReader, TranscriptRow};
