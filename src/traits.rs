//! Traits used by the isomajor library.
//!

use crate::io::tsv::TsvConfig;

/// Defines how to serialize something to TSV.
pub trait TsvSerialize {
    // Serialize something to a TSV [`String`].
    fn to_tsv(&self, config: &TsvConfig) -> String;
}
