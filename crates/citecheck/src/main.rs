//! citecheck CLI: verify BibTeX citations and emit a report.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use citecheck::bibtex::{self, CitationEntry};
use citecheck::config::Config;
use citecheck::models::OverallStatus;
use citecheck::report;
use citecheck::verify::Verifier;

/// Verify academic citations in BibTeX files.
#[derive(Debug, Parser)]
#[command(name = "citecheck", version, about)]
struct Cli {
    /// Path to the BibTeX file.
    #[arg(long, default_value = "references.bib")]
    bib: PathBuf,

    /// Start index (1-based, inclusive).
    #[arg(long)]
    start: Option<usize>,

    /// End index (1-based, inclusive).
    #[arg(long)]
    end: Option<usize>,

    /// Verify a single citation by key.
    #[arg(long, conflicts_with_all = ["start", "end"])]
    key: Option<String>,

    /// Output file path (stdout when omitted).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Report format.
    #[arg(long, short, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Enable verbose logging.
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    #[value(alias = "md")]
    Markdown,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(fabricated) if fabricated > 0 => {
            eprintln!("WARNING: {fabricated} FABRICATED citations detected!");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run the verification; returns the number of FABRICATED classifications.
async fn run(cli: Cli) -> anyhow::Result<usize> {
    let content = std::fs::read_to_string(&cli.bib)
        .with_context(|| format!("BibTeX file not found: {}", cli.bib.display()))?;
    let entries = bibtex::parse_entries(&content);

    let selected = select_entries(&entries, cli.key.as_deref(), cli.start, cli.end)?;
    eprintln!("Verifying {} citations...", selected.len());

    let verifier = Verifier::new(Config::from_env())?;
    let results = verifier.verify_all(&selected).await;

    let rendered = match cli.format {
        Format::Text => report::render_text(&results),
        Format::Json => report::render_json(&results)?,
        Format::Markdown => report::render_markdown(&results),
    };

    if let Some(path) = &cli.output {
        std::fs::write(path, &rendered)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        eprintln!("Report saved to: {}", path.display());
    } else {
        println!("{rendered}");
    }

    print_summary(&results);
    Ok(report::count_status(&results, OverallStatus::Fabricated))
}

/// Pick entries by key or by 1-based inclusive range.
fn select_entries(
    entries: &[CitationEntry],
    key: Option<&str>,
    start: Option<usize>,
    end: Option<usize>,
) -> anyhow::Result<Vec<CitationEntry>> {
    if let Some(key) = key {
        let matched: Vec<CitationEntry> =
            entries.iter().filter(|e| e.key == key).cloned().collect();
        if matched.is_empty() {
            let available: Vec<&str> =
                entries.iter().take(10).map(|e| e.key.as_str()).collect();
            bail!("citation key not found: {key} (available: {}, ...)", available.join(", "));
        }
        return Ok(matched);
    }

    let (Some(start), Some(end)) = (start, end) else {
        bail!("must specify either --key or both --start and --end");
    };
    if start < 1 || end > entries.len() || start > end {
        bail!("invalid range {start}..{end}: file has {} entries", entries.len());
    }

    Ok(entries[start - 1..end].to_vec())
}

/// Per-status summary on stderr, independent of the report destination.
fn print_summary(results: &[citecheck::VerificationResult]) {
    eprintln!("{}", "=".repeat(60));
    eprintln!("VERIFICATION SUMMARY");
    eprintln!("{}", "=".repeat(60));
    for status in OverallStatus::SEVERITY_ORDER {
        let count = report::count_status(results, status);
        if count > 0 {
            let percentage = 100.0 * count as f64 / results.len() as f64;
            eprintln!("  {:18}: {count:3} ({percentage:5.1}%)", status.to_string());
        }
    }
    eprintln!("{}", "=".repeat(60));
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "citecheck=debug" } else { "citecheck=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<CitationEntry> {
        bibtex::parse_entries(
            "@article{a1,\n  title = {One}\n}\n\
             @article{a2,\n  title = {Two}\n}\n\
             @article{a3,\n  title = {Three}\n}\n",
        )
    }

    #[test]
    fn test_select_by_key() {
        let entries = sample_entries();
        let selected = select_entries(&entries, Some("a2"), None, None).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].key, "a2");
    }

    #[test]
    fn test_select_unknown_key_fails() {
        let entries = sample_entries();
        let err = select_entries(&entries, Some("nope"), None, None).unwrap_err();
        assert!(err.to_string().contains("citation key not found"));
    }

    #[test]
    fn test_select_by_range_inclusive() {
        let entries = sample_entries();
        let selected = select_entries(&entries, None, Some(2), Some(3)).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].key, "a2");
        assert_eq!(selected[1].key, "a3");
    }

    #[test]
    fn test_select_out_of_range_fails() {
        let entries = sample_entries();
        assert!(select_entries(&entries, None, Some(0), Some(2)).is_err());
        assert!(select_entries(&entries, None, Some(1), Some(4)).is_err());
        assert!(select_entries(&entries, None, Some(3), Some(2)).is_err());
    }

    #[test]
    fn test_select_requires_key_or_range() {
        let entries = sample_entries();
        assert!(select_entries(&entries, None, Some(1), None).is_err());
        assert!(select_entries(&entries, None, None, None).is_err());
    }
}
