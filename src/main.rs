#![forbid(unsafe_code)]

use clap::Parser;
use log::{LevelFilter, debug};
use mdroff::{ConvertOptions, Dialect, EmphasisMarkers, FileConfig, SynopsisStyle};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "mdroff", version, about)]
struct Cli {
    /// Markdown files to convert; `-` or nothing reads standard input
    #[arg(value_name = "FILE")]
    inputs: Vec<String>,

    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Macro package: man, mdoc, mm, mom or ms
    #[arg(short = 'T', long = "dialect", value_name = "DIALECT")]
    dialect: Option<Dialect>,

    /// Follow man-pages(7): hide boilerplate sections and fix common word misuse
    #[arg(short = 'z', long = "official")]
    official: bool,

    /// `*`/`**` for bold and `_`/`__` for italics
    #[arg(short = 'q', long = "alternate-emphasis")]
    alternate_emphasis: bool,

    /// SYNOPSIS rendering: plain, highlight, sy or nm (also 0 to 3)
    #[arg(short = 'p', long = "synopsis-style", value_name = "STYLE")]
    synopsis_style: Option<SynopsisStyle>,

    /// YAML configuration file
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Date for the title block instead of today (YYYY-MM-DD)
    #[arg(long = "date", value_name = "DATE")]
    date: Option<String>,

    /// More log output; repeat for more
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp(None);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    let _ = builder.try_init();
}

fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

/// Name used when a document has no title line.
fn document_name(path: &str) -> String {
    if path == "-" {
        return "stdin".to_string();
    }
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

fn build_options(cli: &Cli) -> Result<ConvertOptions, mdroff::MdroffError> {
    let mut options = ConvertOptions::default();
    if let Some(path) = &cli.config {
        debug!("loading configuration from {}", path.display());
        FileConfig::load(path)?.apply(&mut options);
    }
    if let Some(dialect) = cli.dialect {
        options.dialect = dialect;
    }
    if cli.official {
        options.official = true;
    }
    if cli.alternate_emphasis {
        options.emphasis = EmphasisMarkers::Alternate;
    }
    if let Some(style) = cli.synopsis_style {
        options.synopsis_style = style;
    }
    if let Some(date) = &cli.date {
        options.date = Some(mdroff::config::parse_date(date)?);
    }
    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let options = build_options(&cli)?;

    let inputs = if cli.inputs.is_empty() {
        vec!["-".to_string()]
    } else {
        cli.inputs.clone()
    };

    let mut out: BufWriter<Box<dyn Write>> = BufWriter::new(match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    });
    for input in &inputs {
        let source = read_input(input)?;
        out = mdroff::convert(&document_name(input), &source, &options, out)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_name_uses_file_stem() {
        assert_eq!(document_name("-"), "stdin");
        assert_eq!(document_name("docs/tool.md"), "tool");
        assert_eq!(document_name("README"), "README");
    }

    #[test]
    fn cli_flags_override_defaults() {
        let cli = Cli::parse_from([
            "mdroff", "-T", "mdoc", "-z", "-q", "-p", "3", "--date", "2026-01-02", "page.md",
        ]);
        let options = build_options(&cli).unwrap();
        assert_eq!(options.dialect, Dialect::Mdoc);
        assert!(options.official);
        assert_eq!(options.emphasis, EmphasisMarkers::Alternate);
        assert_eq!(options.synopsis_style, SynopsisStyle::Nm);
        assert_eq!(options.date, chrono::NaiveDate::from_ymd_opt(2026, 1, 2));
        assert_eq!(cli.inputs, vec!["page.md".to_string()]);
    }

    #[test]
    fn bad_date_is_rejected() {
        let cli = Cli::parse_from(["mdroff", "--date", "yesterday"]);
        assert!(build_options(&cli).is_err());
    }
}
