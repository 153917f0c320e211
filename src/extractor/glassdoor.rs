use tracing::debug;

use crate::{
    error::Result,
    extractor::{Extractor, LineQueue},
    review::{Origin, Review, ReviewDraft},
};

/// Glassdoor export: score and credentials first, then header, date and optional sections.
///
/// ```text
/// 4.0 Current Employee, more than 3 years
/// Great place to grow
/// Jan 5, 2019 - Software Engineer in Boston, MA
/// Pros - Good pay
/// Cons - Long hours
/// Advice to Management - Hire more people
/// ```
pub struct Glassdoor;

pub const PROS_PREFIX: &str = "Pros - ";
pub const CONS_PREFIX: &str = "Cons - ";
pub const ADVICE_PREFIX: &str = "Advice to Management - ";

impl Extractor for Glassdoor {
    fn origin(&self) -> Origin {
        Origin::Glassdoor
    }

    fn extract_lines(&self, lines: &mut LineQueue<'_>) -> Result<Review> {
        let first = lines.pop_required("score")?;
        let (score, credentials) = first
            .split_once(char::is_whitespace)
            .unwrap_or((first, ""));
        let header = lines.pop_required("header")?;
        // Only the part before " - " is the date, the rest is the job title.
        let date = lines
            .pop_required("date")?
            .split(" - ")
            .next()
            .unwrap_or_default();

        let [pros, cons, advice_to_mgmt] =
            lines.pop_sections([PROS_PREFIX, CONS_PREFIX, ADVICE_PREFIX]);
        if !lines.is_empty() {
            debug!(extra = lines.len(), "ignoring trailing lines in glassdoor review");
        }

        Review::new(ReviewDraft {
            score,
            date,
            header,
            credentials,
            pros,
            cons,
            advice_to_mgmt,
            ..ReviewDraft::new(Origin::Glassdoor)
        })
    }
}
