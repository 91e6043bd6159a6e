//! Report generation for scored repositories
//!
//! Two generators are provided, each accessed through a `generate` function:
//! - **Console**: Terminal output with optional ANSI colors
//! - **JSON**: Machine-readable structured data
//!
//! Both operate on a slice of [`ReportableRepo`], which pairs a repository with its
//! score and records whether the score was served from the cache.

mod console;
mod json;
mod reportable_repo;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
pub use reportable_repo::ReportableRepo;

/// Rating tier used to color a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Good,
    Fair,
    Poor,
}

impl Tier {
    const fn of(score: f64) -> Self {
        if score >= 7.0 {
            Self::Good
        } else if score >= 4.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}
