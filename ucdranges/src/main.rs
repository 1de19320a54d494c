use anyhow::{Context, Result};
use clap::{builder::TypedValueParser as _, Parser};
use std::{io, path::PathBuf};
use tracing::info;
use ucdranges::{DataSource, GeneralCategory, OutputFormat, RangeExtractor, UNICODE_DATA_URL};

/// Unicode codepoint range extractor.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The general categories to extract.
    #[arg(short, long, required = true, num_args = 1..)]
    category: Vec<GeneralCategory>,

    /// Output file (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generate a markdown table with the codepoints in it
    #[arg(short, long)]
    table: bool,

    /// Generate a rule literal with the codepoints in it
    #[arg(short = 'k', long, visible_alias = "kemonomimi")]
    rule: bool,

    /// Number of columns in the markdown table or rule literal
    #[arg(short = 'C', long, default_value_t = ucdranges::DEFAULT_COLUMNS,
          value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    cols: usize,

    /// A local copy of UnicodeData.txt to use instead of downloading one
    #[arg(long, env = "UCDRANGES_DATA")]
    data: Option<PathBuf>,

    /// Where to download UnicodeData.txt from
    #[arg(long, default_value = UNICODE_DATA_URL)]
    url: String,

    /// Extract every codepoint of `<..., First>`/`<..., Last>` blocks, not just their ends
    #[arg(long)]
    expand_blocks: bool,

    /// Whether to enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = if args.verbose { ucdranges_common::FILTER_SPEC } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let source = match args.data {
        Some(path) => DataSource::File(path),
        None => DataSource::Download { url: args.url, cache_dir: None },
    };

    let mut extractor = RangeExtractor::new();
    for category in args.category {
        extractor.category(category);
    }
    extractor
        .format(OutputFormat::from_flags(args.table, args.rule))
        .columns(args.cols)
        .expand_blocks(args.expand_blocks);

    let result = extractor.extract_from(&source)?;

    if let Some(target) = args.output {
        std::fs::write(&target, result)
            .with_context(|| format!("Could not write '{}'", target.display()))?;
        info!("Wrote '{}'.", target.display());
    } else {
        println!("{result}");
    }

    Ok(())
}
