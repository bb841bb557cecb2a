//! A lazy parser for FPKM tracking tables, built on the [`csv`] crate.

use csv::{Reader, ReaderBuilder, StringRecord};
use std::io::Read;

use super::header::{
    condition_column, parse_conditions, required_columns, GENE_ID_COLUMN, TRANSCRIPT_ID_COLUMN,
};
use crate::{error::IsoMajorError, io::InputStream};

/// One transcript row of a tracking table.
///
/// The expression cells are kept unparsed, in condition order; they are
/// converted to [`Fpkm`](crate::Fpkm) values when rows are grouped into genes.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptRow {
    pub transcript_id: String,
    pub gene_id: String,
    pub expression: Vec<String>,
}

/// Build a TSV reader for tracking tables: tab-delimited, no quoting, and
/// records of varying lengths are passed on to be checked against the header.
pub fn build_tracking_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader)
}

/// Reads the header of a tracking table and then yields one [`TranscriptRow`]
/// per remaining line.
pub struct TrackingReader<R> {
    reader: Reader<R>,
    conditions: Vec<String>,
    record: StringRecord,
}

impl<R> std::fmt::Debug for TrackingReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingReader")
            .field("conditions", &self.conditions)
            .finish_non_exhaustive()
    }
}

impl TrackingReader<Box<dyn Read>> {
    /// Open an [`InputStream`] and parse its header.
    pub fn new(input: &InputStream) -> Result<Self, IsoMajorError> {
        let reader: Box<dyn Read> = Box::new(input.reader()?);
        Self::from_reader(reader)
    }
}

impl<R: Read> TrackingReader<R> {
    /// Wrap any reader, consuming and parsing the header line.
    pub fn from_reader(reader: R) -> Result<Self, IsoMajorError> {
        let mut reader = build_tracking_reader(reader);
        let mut header = StringRecord::new();
        if !reader.read_record(&mut header)? {
            return Err(IsoMajorError::EmptyInput);
        }
        let conditions = parse_conditions(&header)?;
        Ok(Self {
            reader,
            conditions,
            record: StringRecord::new(),
        })
    }

    /// The condition names, in header order.
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    /// The minimum number of columns a row needs to carry every condition's value.
    pub fn required_columns(&self) -> usize {
        required_columns(self.conditions.len())
    }

    fn parse_record(&self) -> Result<TranscriptRow, IsoMajorError> {
        let transcript_id = self
            .record
            .get(TRANSCRIPT_ID_COLUMN)
            .unwrap_or_default()
            .to_string();
        let required = self.required_columns();
        if self.record.len() < required {
            return Err(IsoMajorError::RowTooFewColumns {
                transcript: transcript_id,
                found: self.record.len(),
                required,
            });
        }
        let expression = (0..self.conditions.len())
            .map(|index| self.record[condition_column(index)].to_string())
            .collect();
        Ok(TranscriptRow {
            transcript_id,
            gene_id: self.record[GENE_ID_COLUMN].to_string(),
            expression,
        })
    }
}

impl<R: Read> Iterator for TrackingReader<R> {
    type Item = Result<TranscriptRow, IsoMajorError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => Some(self.parse_record()),
            Err(e) => Some(Err(e.into())),
        }
    }
}
