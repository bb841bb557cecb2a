//! # isomajor: major isoform switching across conditions
//!
//! `isomajor` reads a Cufflinks-style `isoforms.fpkm_tracking` table (one row
//! per transcript, with per-condition FPKM values), groups transcripts by gene,
//! calls the *major isoform* of each gene under each condition, and reports the
//! genes whose major isoform changes between conditions.
//!
//! The pipeline has three stages:
//!
//!  1. [`TrackingReader`] parses the header into the list of condition names and
//!     yields [`TranscriptRow`]s.
//!  2. [`GeneGrouper`] sorts rows by gene id and lazily yields one [`GeneRecord`]
//!     per gene.
//!  3. [`GeneMajorIsoforms`] calls the major isoform of a gene per condition and
//!     decides whether the gene is reported.
//!
//! [`isomajor_report()`] wires these together; it is what the `isomajor` command
//! line tool runs.
//!
//! [`TrackingReader`]: crate::io::TrackingReader
//! [`TranscriptRow`]: crate::io::parsers::tracking::TranscriptRow
//! [`GeneGrouper`]: crate::grouping::GeneGrouper
//! [`GeneRecord`]: crate::grouping::GeneRecord
//! [`GeneMajorIsoforms`]: crate::major::GeneMajorIsoforms
//! [`isomajor_report()`]: crate::commands::isomajor_report

pub mod commands;
pub mod error;
pub mod grouping;
pub mod io;
pub mod major;
pub mod reporting;
pub mod test_utilities;
pub mod traits;

/// The expression value type (FPKM).
pub type Fpkm = f64;

pub mod prelude {
    pub use crate::commands::{isomajor_report, write_major_isoform_report, ReportParams};
    pub use crate::error::IsoMajorError;
    pub use crate::grouping::{GeneGrouper, GeneRecord};
    pub use crate::io::{InputStream, OutputStream, TrackingReader};
    pub use crate::major::{call_major, GeneMajorIsoforms, LinkTemplate, MajorCall, Thresholds};
    pub use crate::reporting::{CommandOutput, Report, ReportSummary};
    pub use crate::traits::TsvSerialize;
}
