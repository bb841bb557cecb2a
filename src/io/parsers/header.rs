//! Header parsing for FPKM tracking tables.
//!
//! The header has nine transcript descriptor columns, followed by one
//! four-column block per condition:
//!
//! ```text
//! tracking_id class_code nearest_ref_id gene_id gene_short_name tss_id locus length coverage \
//!     q1_FPKM q1_conf_lo q1_conf_hi q1_status q2_FPKM ...
//! ```
//!
//! Only the first column of each block (the FPKM value) is used.

use csv::StringRecord;

use crate::error::IsoMajorError;

/// Column index of the first condition block.
pub const CONDITION_OFFSET: usize = 9;

/// Number of columns in each condition block.
pub const CONDITION_STRIDE: usize = 4;

/// Length of the suffix (`_FPKM`) removed from each condition column name.
///
/// The suffix is removed unconditionally: a column named `q1_value` yields
/// `q1_v`. Headers from other tools must carry a five character suffix too.
pub const FPKM_SUFFIX_LEN: usize = 5;

/// Column index of the gene id.
pub const GENE_ID_COLUMN: usize = 3;

/// Column index of the transcript id.
pub const TRANSCRIPT_ID_COLUMN: usize = 0;

/// Column index of condition `index`'s FPKM value.
pub fn condition_column(index: usize) -> usize {
    CONDITION_OFFSET + CONDITION_STRIDE * index
}

/// The minimum number of columns a row needs to carry `num_conditions` values.
pub fn required_columns(num_conditions: usize) -> usize {
    match num_conditions {
        0 => CONDITION_OFFSET,
        n => condition_column(n - 1) + 1,
    }
}

/// Strip the fixed-length FPKM suffix from a condition column name.
pub fn strip_fpkm_suffix(name: &str) -> String {
    let keep = name.chars().count().saturating_sub(FPKM_SUFFIX_LEN);
    name.chars().take(keep).collect()
}

/// Extract the ordered condition names from a header record.
///
/// The number of conditions is the number of condition blocks that start
/// within the header, i.e. a trailing partial block still counts.
pub fn parse_conditions(header: &StringRecord) -> Result<Vec<String>, IsoMajorError> {
    if header.len() <= CONDITION_OFFSET {
        return Err(IsoMajorError::HeaderTooFewColumns(header.len()));
    }
    let conditions = header
        .iter()
        .skip(CONDITION_OFFSET)
        .step_by(CONDITION_STRIDE)
        .map(strip_fpkm_suffix)
        .collect();
    Ok(conditions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::tracking_header;

    #[test]
    fn test_strip_fpkm_suffix() {
        assert_eq!(strip_fpkm_suffix("Cond1_FPKM"), "Cond1");
        // removal is by length only
        assert_eq!(strip_fpkm_suffix("q1_value"), "q1_");
        assert_eq!(strip_fpkm_suffix("FPKM"), "");
    }

    #[test]
    fn test_parse_conditions() {
        let header = StringRecord::from(tracking_header(&["liver", "brain", "heart"]));
        let conditions = parse_conditions(&header).unwrap();
        assert_eq!(conditions, vec!["liver", "brain", "heart"]);
    }

    #[test]
    fn test_parse_conditions_partial_block() {
        let mut columns = tracking_header(&["a"]);
        columns.push("b_FPKM".to_string());
        let header = StringRecord::from(columns);
        assert_eq!(parse_conditions(&header).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_conditions_too_few_columns() {
        let header = StringRecord::from(vec!["tracking_id", "class_code", "nearest_ref_id"]);
        assert!(matches!(
            parse_conditions(&header),
            Err(IsoMajorError::HeaderTooFewColumns(3))
        ));

        // descriptors only, no condition blocks
        let columns = tracking_header(&[]);
        assert_eq!(columns.len(), CONDITION_OFFSET);
        assert!(parse_conditions(&StringRecord::from(columns)).is_err());
    }

    #[test]
    fn test_condition_column() {
        assert_eq!(condition_column(0), 9);
        assert_eq!(condition_column(2), 17);
    }

    #[test]
    fn test_required_columns() {
        assert_eq!(required_columns(0), 9);
        assert_eq!(required_columns(1), 10);
        assert_eq!(required_columns(2), 14);
    }
}
