use std::io::{Read, Write};
use std::path::PathBuf;

use log::info;

use crate::{
    error::IsoMajorError,
    grouping::GeneGrouper,
    io::{report_header, InputStream, OutputStream, TrackingReader, TsvConfig},
    major::{GeneMajorIsoforms, LinkTemplate, Thresholds},
    reporting::{CommandOutput, ReportSummary},
    traits::TsvSerialize,
};

/// Parameters of a major isoform report.
#[derive(Clone, Debug, Default)]
pub struct ReportParams {
    pub thresholds: Thresholds,
    pub link: LinkTemplate,
}

/// Read a tracking table from `reader` and write the major isoform report to `writer`.
///
/// Rows are written as genes are processed, so on error the output written so
/// far remains.
pub fn write_major_isoform_report<R: Read, W: Write>(
    reader: R,
    writer: &mut W,
    params: &ReportParams,
) -> Result<ReportSummary, IsoMajorError> {
    let tracking = TrackingReader::from_reader(reader)?;
    let conditions = tracking.conditions().to_vec();
    info!("{} conditions: {}", conditions.len(), conditions.join(", "));

    writer.write_all(report_header(&conditions).as_bytes())?;

    let config = TsvConfig::new(params.link.clone());
    let mut summary = ReportSummary::default();

    let genes = GeneGrouper::new(tracking, conditions.len())?;
    for gene in genes {
        let gene = gene?;
        match GeneMajorIsoforms::from_record(&gene, &params.thresholds) {
            Ok(majors) => {
                writeln!(writer, "{}", majors.to_tsv(&config))?;
                summary.count(Ok(()));
            }
            Err(skipped) => summary.count(Err(skipped)),
        }
    }
    writer.flush()?;
    Ok(summary)
}

/// Report the genes whose major isoform differs between conditions.
///
/// Reads from standard input if `input` is `None`, and writes to standard
/// output if `output` is `None`.
pub fn isomajor_report(
    input: Option<&PathBuf>,
    output: Option<&PathBuf>,
    params: &ReportParams,
) -> Result<CommandOutput<ReportSummary>, IsoMajorError> {
    let input_stream = InputStream::from_option(input);
    let output_stream = OutputStream::from_option(output);
    let mut writer = output_stream.writer()?;

    let summary = write_major_isoform_report(input_stream.reader()?, &mut writer, params)?;
    info!("{}", summary);

    Ok(CommandOutput::new(summary, summary.to_report()))
}
