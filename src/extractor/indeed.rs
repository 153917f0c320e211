use tracing::debug;

use crate::{
    error::{ParseError, Result},
    extractor::{Extractor, LineQueue},
    review::{Origin, Review, ReviewDraft},
};

/// Indeed export: star rating and header first, then credentials/location/date and the body.
///
/// ```text
/// 1 Star - Terrible place
/// Analyst - Boston, MA - March 3, 2020
/// Would not recommend.
/// Pros - Parking
/// Cons - Everything else
/// ```
pub struct Indeed;

/// NOTE: Ordering matters, the plural form is tried first.
static RATING_SEPARATORS: &[&str] = &[" Stars - ", " Star - "];

const DETAIL_SEPARATOR: &str = " - ";

pub const PROS_PREFIX: &str = "Pros - ";
pub const CONS_PREFIX: &str = "Cons - ";

impl Extractor for Indeed {
    fn origin(&self) -> Origin {
        Origin::Indeed
    }

    fn extract_lines(&self, lines: &mut LineQueue<'_>) -> Result<Review> {
        let first = lines.pop_required("rating")?;
        let Some((score, header)) = RATING_SEPARATORS
            .iter()
            .find_map(|sep| first.split_once(*sep))
        else {
            // Not a new review: this is the tail of the previous review's body.
            let rest = lines.drain_joined();
            let text = if rest.is_empty() {
                first.to_string()
            } else {
                format!("{first} {rest}")
            };
            return Err(ParseError::StructuralMismatch(text));
        };

        let details = lines.pop_required("details")?;
        let [credentials, location, date] = split_details(details)?;
        let content = lines.pop_required("content")?;

        let [pros, cons] = lines.pop_sections([PROS_PREFIX, CONS_PREFIX]);
        if !lines.is_empty() {
            debug!(extra = lines.len(), "ignoring trailing lines in indeed review");
        }

        Review::new(ReviewDraft {
            score,
            date,
            header,
            credentials,
            location: Some(location),
            content: Some(content),
            pros,
            cons,
            ..ReviewDraft::new(Origin::Indeed)
        })
    }
}

/// `credentials - location - date`, exactly three parts.
fn split_details(line: &str) -> Result<[&str; 3]> {
    let parts: Vec<&str> = line.split(DETAIL_SEPARATOR).collect();
    match parts.as_slice() {
        [credentials, location, date] => Ok([*credentials, *location, *date]),
        _ => Err(ParseError::validation(
            "details",
            format!(
                "expected credentials, location and date separated by {DETAIL_SEPARATOR:?}, found {} parts",
                parts.len()
            ),
        )),
    }
}
