//! citecheck
//!
//! Verifies citations in BibTeX files against authoritative metadata
//! sources: DOIs against CrossRef with a doi.org Handle System fallback,
//! plus title/author corroboration through Semantic Scholar. Mismatched
//! authors, titles, years and non-existent identifiers are flagged and each
//! entry is classified into a confidence tier, from VERIFIED down to
//! FABRICATED.
//!
//! # Example
//!
//! ```no_run
//! use citecheck::{bibtex, config::Config, verify::Verifier};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let entries = bibtex::parse_entries(&std::fs::read_to_string("references.bib")?);
//!     let verifier = Verifier::new(Config::from_env())?;
//!     let results = verifier.verify_all(&entries).await;
//!
//!     println!("{}", citecheck::report::render_text(&results));
//!     Ok(())
//! }
//! ```

pub mod bibtex;
pub mod client;
pub mod config;
pub mod error;
pub mod fixes;
pub mod models;
pub mod report;
pub mod textmatch;
pub mod verify;

pub use client::CitationClient;
pub use config::Config;
pub use error::LookupError;
pub use models::{OverallStatus, VerificationResult};
pub use verify::Verifier;
