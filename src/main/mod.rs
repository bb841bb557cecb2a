use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use isomajor::{
    commands::{isomajor_report, ReportParams},
    major::{LinkTemplate, Thresholds, DEFAULT_FRAC, DEFAULT_LINK, DEFAULT_MIN_FPKM},
    prelude::IsoMajorError,
    Fpkm,
};
use log::{info, warn, LevelFilter};

const INFO: &str = "\
isomajor: report the major isoform of each gene in each condition
usage: isomajor [--help] [-i isoforms.fpkm_tracking] [-o report.tsv]

Genes whose major isoform differs between conditions are reported, one row per
gene. Calls are recoded as integers: 0 no expression, -1 ambiguous, otherwise
the position of the transcript among the ever-major transcripts listed at the
end of the row (most often major first).
";

#[derive(Debug, Parser)]
#[clap(name = "isomajor", version)]
#[clap(about = INFO)]
struct Cli {
    /// verbose: log options, conditions and gene counts
    #[arg(short, long)]
    verbose: bool,

    /// isoforms.fpkm_tracking file (standard input will be used if not specified)
    #[arg(short = 'i', long = "fpkm")]
    fpkm: Option<PathBuf>,

    /// an optional output file (standard output will be used if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// the major isoform has to be at least this fraction larger than the second most expressed
    #[arg(short, long, default_value_t = DEFAULT_FRAC)]
    frac: f64,

    /// minimum FPKM of a major isoform
    #[arg(short, long = "min-fpkm", alias = "minFPKM", default_value_t = DEFAULT_MIN_FPKM)]
    min_fpkm: Fpkm,

    /// gene id link template; every %s is replaced by the gene id
    #[arg(long, default_value = DEFAULT_LINK, conflicts_with = "no_link")]
    link: String,

    /// report bare gene ids, without a link
    #[arg(long)]
    no_link: bool,
}

fn run() -> Result<(), IsoMajorError> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    info!("Options: {:?}", cli);

    let link = if cli.no_link {
        LinkTemplate::none()
    } else {
        LinkTemplate::new(cli.link.as_str())
    };
    let params = ReportParams {
        thresholds: Thresholds::new(cli.frac, cli.min_fpkm)?,
        link,
    };

    let output = isomajor_report(cli.fpkm.as_ref(), cli.output.as_ref(), &params)?;
    for issue in output.report().entries() {
        info!("{}", issue);
    }
    if output.value().reported == 0 {
        warn!("no genes with 2+ major isoforms were found");
    }
    Ok(())
}

fn main() {
    let start = Instant::now();

    // rows already written are left in place
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("\nCtrl-C pressed!");
        eprintln!("#Time elapsed: {:?}", start.elapsed());
        std::process::exit(1);
    }) {
        eprintln!("Warning: could not install the Ctrl-C handler: {}", e);
    }

    let result = run();
    if let Err(e) = &result {
        eprintln!("Error: {}", e);
    }
    eprintln!("#Time elapsed: {:?}", start.elapsed());
    if result.is_err() {
        std::process::exit(1);
    }
}
