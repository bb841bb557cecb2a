//! TSV serializing helpers for the major isoform report.

use crate::{major::GeneMajorIsoforms, major::LinkTemplate, traits::TsvSerialize};

/// Number of decimals the FPKM sum is written with.
pub const FPKM_SUM_PRECISION: usize = 2;

/// Number of ever-major transcript label columns in the report header.
pub const EVER_MAJOR_LABELS: usize = 5;

/// This is an extensible type to handle TSV output configuration,
/// e.g. how gene ids are linked.
#[derive(Clone, Debug)]
pub struct TsvConfig {
    pub link: LinkTemplate,
    pub precision: usize,
}

impl Default for TsvConfig {
    fn default() -> Self {
        Self {
            link: LinkTemplate::none(),
            precision: FPKM_SUM_PRECISION,
        }
    }
}

impl TsvConfig {
    pub fn new(link: LinkTemplate) -> Self {
        Self {
            link,
            ..Default::default()
        }
    }
}

/// The two header lines of the report, including the trailing newline.
pub fn report_header(conditions: &[String]) -> String {
    let labels = (0..EVER_MAJOR_LABELS)
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("\t");
    format!(
        "#\n#gene id\tno. of transcripts\tFPKM sum\t{}\t{}\n",
        conditions.join("\t"),
        labels
    )
}

impl TsvSerialize for String {
    #![allow(unused_variables)]
    fn to_tsv(&self, config: &TsvConfig) -> String {
        self.to_string()
    }
}

impl TsvSerialize for i32 {
    #![allow(unused_variables)]
    fn to_tsv(&self, config: &TsvConfig) -> String {
        self.to_string()
    }
}

impl<U: TsvSerialize> TsvSerialize for Vec<U> {
    fn to_tsv(&self, config: &TsvConfig) -> String {
        self.iter()
            .map(|x| x.to_tsv(config))
            .collect::<Vec<_>>()
            .join("\t")
    }
}

impl TsvSerialize for GeneMajorIsoforms {
    /// One report row (without newline): the (linked) gene id, the number of
    /// transcripts, the FPKM sum, the recoded calls, an empty column, and the
    /// ever-major transcripts.
    fn to_tsv(&self, config: &TsvConfig) -> String {
        format!(
            "{}\t{}\t{:.*}\t{}\t\t{}",
            config.link.apply(&self.gene_id),
            self.num_transcripts,
            config.precision,
            self.total_expression,
            self.codes.to_tsv(config),
            self.ever_major.to_tsv(config),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::major::MajorCall;

    fn example_majors() -> GeneMajorIsoforms {
        GeneMajorIsoforms {
            gene_id: "G1".to_string(),
            num_transcripts: 3,
            total_expression: 12.346,
            calls: vec![
                MajorCall::Transcript(0),
                MajorCall::Ambiguous,
                MajorCall::Transcript(2),
                MajorCall::NoExpression,
            ],
            ever_major: vec!["T1".to_string(), "T3".to_string()],
            codes: vec![1, -1, 2, 0],
        }
    }

    #[test]
    fn test_report_header() {
        let conditions = vec!["liver".to_string(), "brain".to_string()];
        assert_eq!(
            report_header(&conditions),
            "#\n#gene id\tno. of transcripts\tFPKM sum\tliver\tbrain\t0\t1\t2\t3\t4\n"
        );
    }

    #[test]
    fn test_gene_majors_to_tsv() {
        let config = TsvConfig::default();
        assert_eq!(
            example_majors().to_tsv(&config),
            "G1\t3\t12.35\t1\t-1\t2\t0\t\tT1\tT3"
        );

        let config = TsvConfig::new(LinkTemplate::new("<%s>"));
        assert!(example_majors().to_tsv(&config).starts_with("<G1>\t3\t"));
    }

    #[test]
    fn test_sum_rounds() {
        let mut majors = example_majors();
        majors.total_expression = 0.999;
        assert!(majors
            .to_tsv(&TsvConfig::default())
            .starts_with("G1\t3\t1.00\t"));
    }
}
