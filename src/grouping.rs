//! Grouping transcript rows into per-gene records.
//!
//! Rows of a tracking table are not ordered by gene, so [`GeneGrouper`] loads
//! all rows into memory, sorts them by gene id, and then lazily yields one
//! [`GeneRecord`] per gene in gene id order. The sort is stable, so transcripts
//! of one gene keep their input order; this makes the output reproducible.

use std::iter::Peekable;
use std::vec::IntoIter;

use crate::{
    error::IsoMajorError,
    io::{
        parsers::header::{condition_column, required_columns},
        TranscriptRow,
    },
    Fpkm,
};

/// All transcripts of one gene, with their expression values per condition.
///
/// `expression[condition][transcript]` is the FPKM of `transcripts[transcript]`
/// under `condition`; every condition's vector has one entry per transcript.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneRecord {
    pub gene_id: String,
    pub transcripts: Vec<String>,
    pub expression: Vec<Vec<Fpkm>>,
}

impl GeneRecord {
    pub fn new(gene_id: impl Into<String>, num_conditions: usize) -> Self {
        Self {
            gene_id: gene_id.into(),
            transcripts: Vec::new(),
            expression: vec![Vec::new(); num_conditions],
        }
    }

    /// Append a transcript and its per-condition values.
    ///
    /// # Panics
    /// Panics if `values` does not have one entry per condition.
    pub fn push_transcript(&mut self, transcript_id: impl Into<String>, values: &[Fpkm]) {
        assert_eq!(values.len(), self.expression.len());
        self.transcripts.push(transcript_id.into());
        for (condition, value) in self.expression.iter_mut().zip(values) {
            condition.push(*value);
        }
    }

    pub fn num_transcripts(&self) -> usize {
        self.transcripts.len()
    }

    pub fn num_conditions(&self) -> usize {
        self.expression.len()
    }

    /// The sum of every expression value of every transcript in every condition.
    pub fn total_expression(&self) -> Fpkm {
        self.expression.iter().map(|values| values.iter().sum::<Fpkm>()).sum()
    }
}

/// Parse one expression cell, the way tracking tables format them.
fn parse_fpkm(
    cell: &str,
    transcript: &str,
    condition_index: usize,
) -> Result<Fpkm, IsoMajorError> {
    cell.trim()
        .parse::<Fpkm>()
        .map_err(|source| IsoMajorError::ExpressionParseError {
            transcript: transcript.to_string(),
            column: condition_column(condition_index),
            value: cell.to_string(),
            source,
        })
}

/// An iterator over [`GeneRecord`]s, in gene id order.
pub struct GeneGrouper {
    rows: Peekable<IntoIter<TranscriptRow>>,
    num_conditions: usize,
}

impl GeneGrouper {
    /// Load every row into memory and sort them by gene id.
    ///
    /// Any error from the row iterator is returned immediately.
    pub fn new<I>(rows: I, num_conditions: usize) -> Result<Self, IsoMajorError>
    where
        I: IntoIterator<Item = Result<TranscriptRow, IsoMajorError>>,
    {
        let mut rows = rows.into_iter().collect::<Result<Vec<_>, _>>()?;
        rows.sort_by(|a, b| a.gene_id.cmp(&b.gene_id));
        Ok(Self {
            rows: rows.into_iter().peekable(),
            num_conditions,
        })
    }

    fn add_row(&self, gene: &mut GeneRecord, row: TranscriptRow) -> Result<(), IsoMajorError> {
        if row.expression.len() < self.num_conditions {
            return Err(IsoMajorError::RowTooFewColumns {
                transcript: row.transcript_id,
                found: required_columns(row.expression.len()),
                required: required_columns(self.num_conditions),
            });
        }
        let values = row
            .expression
            .iter()
            .take(self.num_conditions)
            .enumerate()
            .map(|(index, cell)| parse_fpkm(cell, &row.transcript_id, index))
            .collect::<Result<Vec<_>, _>>()?;
        gene.push_transcript(row.transcript_id, &values);
        Ok(())
    }

    fn next_gene(&mut self, first: TranscriptRow) -> Result<GeneRecord, IsoMajorError> {
        let mut gene = GeneRecord::new(first.gene_id.clone(), self.num_conditions);
        self.add_row(&mut gene, first)?;
        while let Some(row) = self.rows.next_if(|row| row.gene_id == gene.gene_id) {
            self.add_row(&mut gene, row)?;
        }
        Ok(gene)
    }
}

impl Iterator for GeneGrouper {
    type Item = Result<GeneRecord, IsoMajorError>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rows.next()?;
        Some(self.next_gene(first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(transcript: &str, gene: &str, values: &[&str]) -> Result<TranscriptRow, IsoMajorError> {
        Ok(TranscriptRow {
            transcript_id: transcript.to_string(),
            gene_id: gene.to_string(),
            expression: values.iter().map(|v| v.to_string()).collect(),
        })
    }

    #[test]
    fn test_grouper_sorts_and_groups() {
        let rows = vec![
            row("T3", "G2", &["1", "2"]),
            row("T1", "G1", &["3", "4"]),
            row("T4", "G2", &["5", "6"]),
            row("T2", "G1", &["7", "8"]),
            row("T5", "G3", &["0", "0"]),
        ];
        let genes: Vec<GeneRecord> = GeneGrouper::new(rows, 2)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(genes.len(), 3);
        assert_eq!(genes[0].gene_id, "G1");
        assert_eq!(genes[0].transcripts, vec!["T1", "T2"]);
        assert_eq!(genes[0].expression, vec![vec![3.0, 7.0], vec![4.0, 8.0]]);
        assert_eq!(genes[1].gene_id, "G2");
        assert_eq!(genes[1].transcripts, vec!["T3", "T4"]);
        assert_eq!(genes[2].num_transcripts(), 1);
        assert_eq!(genes[2].num_conditions(), 2);
    }

    #[test]
    fn test_total_expression() {
        let mut gene = GeneRecord::new("G1", 2);
        gene.push_transcript("T1", &[0.125, 1.5]);
        gene.push_transcript("T2", &[2.0, 0.375]);
        assert_eq!(gene.total_expression(), 4.0);
    }

    #[test]
    fn test_grouper_parse_error() {
        let rows = vec![
            row("T1", "G1", &["1.0"]),
            row("T2", "G2", &["n/a"]),
        ];
        let mut grouper = GeneGrouper::new(rows, 1).unwrap();
        assert!(grouper.next().unwrap().is_ok());
        match grouper.next().unwrap() {
            Err(IsoMajorError::ExpressionParseError {
                transcript, column, ..
            }) => {
                assert_eq!(transcript, "T2");
                assert_eq!(column, 9);
            }
            other => panic!("expected ExpressionParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_grouper_short_row() {
        let rows = vec![row("T1", "G1", &["1.0", "2.0"]), row("T2", "G1", &["3.0"])];
        let mut grouper = GeneGrouper::new(rows, 2).unwrap();
        match grouper.next().unwrap() {
            Err(IsoMajorError::RowTooFewColumns {
                transcript,
                found,
                required,
            }) => {
                assert_eq!(transcript, "T2");
                assert_eq!(found, 10);
                assert_eq!(required, 14);
            }
            other => panic!("expected RowTooFewColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_grouper_propagates_read_errors() {
        let rows = vec![row("T1", "G1", &["1.0"]), Err(IsoMajorError::EmptyInput)];
        assert!(GeneGrouper::new(rows, 1).is_err());
    }

    #[test]
    fn test_grouper_empty() {
        let rows: Vec<Result<TranscriptRow, IsoMajorError>> = Vec::new();
        assert!(GeneGrouper::new(rows, 3).unwrap().next().is_none());
    }

    #[test]
    fn test_parse_fpkm_whitespace() {
        assert_eq!(parse_fpkm(" 2.5\r", "T1", 0).unwrap(), 2.5);
        assert_eq!(parse_fpkm("1e2", "T1", 0).unwrap(), 100.0);
    }
}
