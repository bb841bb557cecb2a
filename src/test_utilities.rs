//! Test cases and test utility functions.
//!

use rand::{seq::SliceRandom, thread_rng, Rng};
use std::io::Write;
use tempfile::NamedTempFile;

use crate::{io::parsers::header::CONDITION_OFFSET, Fpkm};

/// The nine transcript descriptor columns of a Cufflinks tracking table.
pub const DESCRIPTOR_COLUMNS: [&str; CONDITION_OFFSET] = [
    "tracking_id",
    "class_code",
    "nearest_ref_id",
    "gene_id",
    "gene_short_name",
    "tss_id",
    "locus",
    "length",
    "coverage",
];

// Random tracking table defaults
//
// expression range
pub const MAX_FPKM: Fpkm = 50.0;
// probability a transcript is not expressed in a condition
pub const ZERO_FPKM_PROB: f64 = 0.2;

/// Build the header columns of a tracking table for some conditions.
pub fn tracking_header(conditions: &[&str]) -> Vec<String> {
    let mut columns: Vec<String> = DESCRIPTOR_COLUMNS.iter().map(|c| c.to_string()).collect();
    for condition in conditions {
        columns.push(format!("{}_FPKM", condition));
        columns.push(format!("{}_conf_lo", condition));
        columns.push(format!("{}_conf_hi", condition));
        columns.push(format!("{}_status", condition));
    }
    columns
}

/// Build one tracking table line (with newline) for a transcript.
pub fn tracking_row(transcript: &str, gene: &str, values: &[Fpkm]) -> String {
    let mut columns: Vec<String> = vec![
        transcript.to_string(),
        "=".to_string(),
        transcript.to_string(),
        gene.to_string(),
        "-".to_string(),
        "TSS1".to_string(),
        "chr1:100-2000".to_string(),
        "-".to_string(),
        "-".to_string(),
    ];
    for value in values {
        columns.push(value.to_string());
        columns.push("0".to_string());
        columns.push("0".to_string());
        columns.push("OK".to_string());
    }
    format!("{}\n", columns.join("\t"))
}

/// Build a tracking table from `(transcript, gene, values)` rows.
pub fn tracking_table(conditions: &[&str], rows: &[(&str, &str, Vec<Fpkm>)]) -> String {
    let mut table = format!("{}\n", tracking_header(conditions).join("\t"));
    for (transcript, gene, values) in rows {
        table.push_str(&tracking_row(transcript, gene, values));
    }
    table
}

/// Build a random tracking table, with rows in random order.
pub fn random_tracking_table(
    num_genes: usize,
    max_transcripts: usize,
    num_conditions: usize,
) -> String {
    let mut rng = thread_rng();
    let condition_names: Vec<String> = (1..=num_conditions).map(|i| format!("q{}", i)).collect();
    let conditions: Vec<&str> = condition_names.iter().map(|c| c.as_str()).collect();

    let mut rows = Vec::new();
    for gene in 0..num_genes {
        let num_transcripts = rng.gen_range(1..=max_transcripts.max(1));
        for transcript in 0..num_transcripts {
            let values: Vec<Fpkm> = (0..num_conditions)
                .map(|_| {
                    if rng.gen_bool(ZERO_FPKM_PROB) {
                        0.0
                    } else {
                        rng.gen_range(0.0..MAX_FPKM)
                    }
                })
                .collect();
            rows.push((
                format!("TCONS_{:08}_{}", gene, transcript),
                format!("XLOC_{:06}", gene),
                values,
            ));
        }
    }

    // shuffle, since tracking tables are not sorted by gene
    rows.shuffle(&mut rng);

    let rows: Vec<(&str, &str, Vec<Fpkm>)> = rows
        .iter()
        .map(|(t, g, v)| (t.as_str(), g.as_str(), v.clone()))
        .collect();
    tracking_table(&conditions, &rows)
}

/// Write some contents to a temporary `.tsv` file.
pub fn temp_tsvfile(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".tsv")
        .tempfile()
        .expect("could not create temporary file");
    file.write_all(contents.as_bytes())
        .expect("could not write temporary file");
    file.flush().expect("could not flush temporary file");
    file
}
