//! Contribution analytics over `git log --numstat` output.
//!
//! Raw log text is parsed into commits ([`parser`]), bucketed per author and
//! period ([`aggregate`]), scored ([`metrics`]), ranked ([`rank`]) and
//! reduced to a best-performer list ([`best`]). [`analysis`] runs that
//! pipeline for one repository and [`batch`] for many.

pub mod aggregate;
pub mod analysis;
pub mod batch;
pub mod best;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod metrics;
pub mod model;
pub mod output;
pub mod parser;
pub mod period;
pub mod rank;

pub use analysis::{analyze_log, analyze_log_with_keyer, AnalysisOptions};
pub use error::{CommitRankError, Result};
