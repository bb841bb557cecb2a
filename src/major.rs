//! Major isoform calls.
//!
//! For each condition, the *major isoform* of a gene is the transcript with the
//! highest expression, provided that:
//!
//!  1. its expression is at least [`Thresholds::min_fpkm`], otherwise the call is
//!     [`MajorCall::NoExpression`];
//!  2. it exceeds the second most expressed transcript by a relative margin of
//!     at least [`Thresholds::frac`] (measured against the top value), otherwise
//!     the call is [`MajorCall::Ambiguous`].
//!
//! A gene is reported when at least two different transcripts are called major
//! across the conditions. See [`GeneMajorIsoforms::from_record()`].

use indexmap::IndexMap;

use crate::{error::IsoMajorError, grouping::GeneRecord, Fpkm};

pub const DEFAULT_FRAC: f64 = 0.25;
pub const DEFAULT_MIN_FPKM: Fpkm = 1.0;

/// The default link template: a spreadsheet hyperlink formula to the Ensembl
/// gene summary page.
pub const DEFAULT_LINK: &str =
    "=hyperlink(\"http://www.ensembl.org/Danio_rerio/Gene/Summary?db=core;g=%s\", \"%s\")";

/// The placeholder substituted with the gene id in a [`LinkTemplate`].
pub const LINK_PLACEHOLDER: &str = "%s";

/// The two fixed thresholds of the major isoform call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    /// Minimum relative margin between the top two expression values.
    pub frac: f64,
    /// Minimum expression of a major isoform.
    pub min_fpkm: Fpkm,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            frac: DEFAULT_FRAC,
            min_fpkm: DEFAULT_MIN_FPKM,
        }
    }
}

impl Thresholds {
    /// Create new [`Thresholds`], checking that `frac` is within `[0, 1]` and
    /// `min_fpkm` is finite and non-negative.
    pub fn new(frac: f64, min_fpkm: Fpkm) -> Result<Self, IsoMajorError> {
        if !(0.0..=1.0).contains(&frac) {
            return Err(IsoMajorError::InvalidFraction(frac));
        }
        if !min_fpkm.is_finite() || min_fpkm < 0.0 {
            return Err(IsoMajorError::InvalidMinFpkm(min_fpkm));
        }
        Ok(Self { frac, min_fpkm })
    }
}

/// The major isoform call of one gene under one condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MajorCall {
    /// The most expressed transcript is below the minimum expression.
    NoExpression,
    /// The top two transcripts are too close to call.
    Ambiguous,
    /// The index (within the gene's transcripts) of the major isoform.
    Transcript(usize),
}

impl MajorCall {
    pub const NO_EXPRESSION_CODE: i32 = 0;
    pub const AMBIGUOUS_CODE: i32 = -1;

    pub fn transcript(&self) -> Option<usize> {
        match self {
            MajorCall::Transcript(index) => Some(*index),
            _ => None,
        }
    }
}

/// Call the major isoform from one condition's expression values, one per transcript.
///
/// If several transcripts share the maximum value, the first one wins (though
/// with a non-zero `frac` such a tie is always ambiguous). A lone transcript has
/// no runner-up and so is never ambiguous.
pub fn call_major(values: &[Fpkm], thresholds: &Thresholds) -> MajorCall {
    let Some((top_index, top)) = values
        .iter()
        .copied()
        .enumerate()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
    else {
        return MajorCall::NoExpression;
    };

    let second = values
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != top_index)
        .map(|(_, value)| *value)
        .reduce(Fpkm::max);

    if top < thresholds.min_fpkm {
        MajorCall::NoExpression
    } else if second.map_or(false, |second| (1.0 - thresholds.frac) * top < second) {
        MajorCall::Ambiguous
    } else {
        MajorCall::Transcript(top_index)
    }
}

/// Substitutes a gene id into a link template, e.g. a spreadsheet hyperlink
/// formula. Every `%s` in the template is replaced by the gene id; an empty
/// template leaves gene ids as they are.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkTemplate {
    template: Option<String>,
}

impl LinkTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            template: (!template.is_empty()).then_some(template),
        }
    }

    /// A template that leaves gene ids bare.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn apply(&self, gene_id: &str) -> String {
        match &self.template {
            Some(template) => template.replace(LINK_PLACEHOLDER, gene_id),
            None => gene_id.to_string(),
        }
    }
}

/// Why a gene is not reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skipped {
    /// The gene has a single transcript.
    SingleTranscript,
    /// Fewer than two transcripts were ever called major.
    SingleMajorIsoform,
}

/// The major isoform calls of a reported gene.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneMajorIsoforms {
    pub gene_id: String,
    pub num_transcripts: usize,
    pub total_expression: Fpkm,
    /// One call per condition, in condition order.
    pub calls: Vec<MajorCall>,
    /// Transcripts called major in at least one condition, most called first.
    /// Transcripts called equally often keep their order within the gene.
    pub ever_major: Vec<String>,
    /// The calls recoded as integers: `0` for [`MajorCall::NoExpression`], `-1`
    /// for [`MajorCall::Ambiguous`], otherwise the 1-based position of the
    /// transcript in `ever_major`.
    pub codes: Vec<i32>,
}

impl GeneMajorIsoforms {
    /// Call the major isoform of a gene in every condition.
    ///
    /// Returns the reason the gene is skipped if it has a single transcript, or if
    /// fewer than two distinct transcripts were called major.
    pub fn from_record(gene: &GeneRecord, thresholds: &Thresholds) -> Result<Self, Skipped> {
        if gene.num_transcripts() < 2 {
            return Err(Skipped::SingleTranscript);
        }

        let calls: Vec<MajorCall> = gene
            .expression
            .iter()
            .map(|values| call_major(values, thresholds))
            .collect();

        // count how often each transcript is major, keeping transcript order
        let mut counts: IndexMap<&str, usize> = gene
            .transcripts
            .iter()
            .map(|transcript| (transcript.as_str(), 0))
            .collect();
        for index in calls.iter().filter_map(MajorCall::transcript) {
            *counts
                .entry(gene.transcripts[index].as_str())
                .or_default() += 1;
        }
        counts.retain(|_, count| *count > 0);
        // stable, so ties keep transcript order
        counts.sort_by(|_, a, _, b| b.cmp(a));

        if counts.len() < 2 {
            return Err(Skipped::SingleMajorIsoform);
        }

        let codes = calls
            .iter()
            .map(|call| match call {
                MajorCall::NoExpression => MajorCall::NO_EXPRESSION_CODE,
                MajorCall::Ambiguous => MajorCall::AMBIGUOUS_CODE,
                MajorCall::Transcript(index) => {
                    let position = counts
                        .get_index_of(gene.transcripts[*index].as_str())
                        .unwrap_or_default();
                    position as i32 + 1
                }
            })
            .collect();

        Ok(Self {
            gene_id: gene.gene_id.clone(),
            num_transcripts: gene.num_transcripts(),
            total_expression: gene.total_expression(),
            calls,
            ever_major: counts.keys().map(|t| t.to_string()).collect(),
            codes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene(transcripts: &[&str], expression: &[&[Fpkm]]) -> GeneRecord {
        let mut gene = GeneRecord::new("G1", expression.len());
        for (index, transcript) in transcripts.iter().enumerate() {
            let values: Vec<Fpkm> = expression.iter().map(|values| values[index]).collect();
            gene.push_transcript(*transcript, &values);
        }
        gene
    }

    #[test]
    fn test_call_major_clear_winner() {
        let thresholds = Thresholds::default();
        assert_eq!(call_major(&[5.0, 1.0], &thresholds), MajorCall::Transcript(0));
        assert_eq!(call_major(&[1.0, 5.0], &thresholds), MajorCall::Transcript(1));
    }

    #[test]
    fn test_call_major_ambiguous() {
        let thresholds = Thresholds::default();
        // 0.75 * 5.0 = 3.75 < 4.5
        assert_eq!(call_major(&[5.0, 4.5], &thresholds), MajorCall::Ambiguous);
        // exactly at the margin is not ambiguous
        assert_eq!(call_major(&[4.0, 3.0], &thresholds), MajorCall::Transcript(0));
    }

    #[test]
    fn test_call_major_low_expression() {
        let thresholds = Thresholds::default();
        assert_eq!(call_major(&[0.5, 0.1], &thresholds), MajorCall::NoExpression);
        // low expression takes priority over ambiguity
        assert_eq!(call_major(&[0.5, 0.5], &thresholds), MajorCall::NoExpression);
        assert_eq!(call_major(&[], &thresholds), MajorCall::NoExpression);
    }

    #[test]
    fn test_call_major_ties() {
        let no_margin = Thresholds::new(0.0, 1.0).unwrap();
        assert_eq!(
            call_major(&[2.0, 7.0, 7.0], &no_margin),
            MajorCall::Transcript(1)
        );
        assert_eq!(
            call_major(&[2.0, 7.0, 7.0], &Thresholds::default()),
            MajorCall::Ambiguous
        );
    }

    #[test]
    fn test_call_major_single_transcript() {
        let thresholds = Thresholds::default();
        assert_eq!(call_major(&[3.0], &thresholds), MajorCall::Transcript(0));
    }

    #[test]
    fn test_thresholds_validation() {
        assert!(Thresholds::new(0.25, 1.0).is_ok());
        assert!(matches!(
            Thresholds::new(1.5, 1.0),
            Err(IsoMajorError::InvalidFraction(_))
        ));
        assert!(matches!(
            Thresholds::new(0.25, -1.0),
            Err(IsoMajorError::InvalidMinFpkm(_))
        ));
        assert!(Thresholds::new(0.25, f64::NAN).is_err());
    }

    #[test]
    fn test_link_template() {
        let link = LinkTemplate::new(DEFAULT_LINK);
        assert_eq!(
            link.apply("ENSDARG01"),
            "=hyperlink(\"http://www.ensembl.org/Danio_rerio/Gene/Summary?db=core;g=ENSDARG01\", \"ENSDARG01\")"
        );
        assert_eq!(LinkTemplate::new("").apply("G1"), "G1");
        assert_eq!(LinkTemplate::none().apply("G1"), "G1");
        assert_eq!(LinkTemplate::new("gene:%s").apply("G1"), "gene:G1");
    }

    #[test]
    fn test_switching_gene_reported() {
        let record = gene(&["T1", "T2"], &[&[5.0, 1.0], &[1.0, 5.0]]);
        let majors = GeneMajorIsoforms::from_record(&record, &Thresholds::default()).unwrap();
        assert_eq!(majors.codes, vec![1, 2]);
        assert_eq!(majors.ever_major, vec!["T1", "T2"]);
        assert_eq!(majors.num_transcripts, 2);
        assert_eq!(majors.total_expression, 12.0);
    }

    #[test]
    fn test_most_called_first() {
        let record = gene(
            &["T1", "T2", "T3"],
            &[
                &[5.0, 1.0, 0.0],
                &[1.0, 5.0, 0.0],
                &[0.0, 9.0, 1.0],
                &[4.9, 4.8, 0.0],
                &[0.1, 0.1, 0.1],
            ],
        );
        let majors = GeneMajorIsoforms::from_record(&record, &Thresholds::default()).unwrap();
        assert_eq!(majors.ever_major, vec!["T2", "T1"]);
        assert_eq!(majors.codes, vec![2, 1, 1, -1, 0]);
        assert_eq!(
            majors.calls,
            vec![
                MajorCall::Transcript(0),
                MajorCall::Transcript(1),
                MajorCall::Transcript(1),
                MajorCall::Ambiguous,
                MajorCall::NoExpression
            ]
        );
    }

    #[test]
    fn test_single_transcript_skipped() {
        let record = gene(&["T1"], &[&[5.0], &[100.0]]);
        assert_eq!(
            GeneMajorIsoforms::from_record(&record, &Thresholds::default()),
            Err(Skipped::SingleTranscript)
        );
    }

    #[test]
    fn test_constant_major_skipped() {
        let record = gene(&["T1", "T2"], &[&[5.0, 1.0], &[8.0, 1.0]]);
        assert_eq!(
            GeneMajorIsoforms::from_record(&record, &Thresholds::default()),
            Err(Skipped::SingleMajorIsoform)
        );

        let record = gene(&["T1", "T2"], &[&[5.0, 4.5], &[0.1, 0.2]]);
        assert_eq!(
            GeneMajorIsoforms::from_record(&record, &Thresholds::default()),
            Err(Skipped::SingleMajorIsoform)
        );
    }
}
