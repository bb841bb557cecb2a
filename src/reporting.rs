//! Types for standardized reports to the user about a run.
//!
//! Commands return a [`CommandOutput<U>`], pairing their result with a [`Report`]
//! of notes for the user, e.g. how many genes were skipped and why.
//!

use crate::major::Skipped;

/// The [`CommandOutput<U>`] type output is generic over some data output
/// from a command, and a [`Report`] that reports information to the user.
#[derive(Debug)]
pub struct CommandOutput<U> {
    value: U,
    report: Report,
}

impl<U> CommandOutput<U> {
    pub fn new(value: U, report: Report) -> Self {
        Self { value, report }
    }

    pub fn value(&self) -> &U {
        &self.value
    }

    pub fn report(&self) -> &Report {
        &self.report
    }
}

/// A type to (semi) standardize reporting to the user.
#[derive(Debug, Default)]
pub struct Report {
    entries: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, message: String) {
        self.entries.push(message)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Gene counts of a major isoform report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// All genes in the input.
    pub genes: usize,
    /// Genes with two or more transcripts.
    pub multi_transcript: usize,
    /// Genes with two or more major isoforms, i.e. reported genes.
    pub reported: usize,
}

impl ReportSummary {
    /// Count one gene, given whether (and why) it was skipped.
    pub fn count(&mut self, outcome: Result<(), Skipped>) {
        self.genes += 1;
        match outcome {
            Err(Skipped::SingleTranscript) => {}
            Err(Skipped::SingleMajorIsoform) => self.multi_transcript += 1,
            Ok(()) => {
                self.multi_transcript += 1;
                self.reported += 1;
            }
        }
    }

    /// Notes for the user about skipped genes.
    pub fn to_report(&self) -> Report {
        let mut report = Report::new();
        let single = self.genes - self.multi_transcript;
        if single > 0 {
            report.add_issue(format!(
                "{} genes were skipped because they have a single transcript",
                single
            ));
        }
        let constant = self.multi_transcript - self.reported;
        if constant > 0 {
            report.add_issue(format!(
                "{} genes were skipped because fewer than two transcripts were ever called major",
                constant
            ));
        }
        report
    }
}

impl std::fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} genes\n {} genes with 2+ transcripts\n {} genes with 2+ major isoforms",
            self.genes, self.multi_transcript, self.reported
        )
    }
}
