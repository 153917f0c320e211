use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{
    date::normalise_date,
    error::{ParseError, Result},
    location::LocationCanonicalizer,
};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 5.0;

/// Characters that already close a sentence, so a continuation can follow with a plain space.
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Which site a review was scraped from.
///
/// The origin fixes which optional fields can ever be populated: Glassdoor reviews carry
/// advice to management but no location or body text, Indeed reviews the opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Glassdoor,
    Indeed,
}

impl Origin {
    pub const ALL: [Origin; 2] = [Origin::Glassdoor, Origin::Indeed];

    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Glassdoor => "glassdoor",
            Origin::Indeed => "indeed",
        }
    }

    fn allows_location(self) -> bool {
        self == Origin::Indeed
    }

    fn allows_content(self) -> bool {
        self == Origin::Indeed
    }

    fn allows_advice(self) -> bool {
        self == Origin::Glassdoor
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let t = s.trim();
        Origin::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(t))
            .ok_or_else(|| ParseError::UnknownSource(s.to_string()))
    }
}

/// Borrowed, unvalidated fields as an extractor pulled them out of a block.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft<'a> {
    pub origin: Origin,
    pub score: &'a str,
    pub date: &'a str,
    pub header: &'a str,
    pub credentials: &'a str,
    pub location: Option<&'a str>,
    pub content: Option<&'a str>,
    pub pros: Option<&'a str>,
    pub cons: Option<&'a str>,
    pub advice_to_mgmt: Option<&'a str>,
}

impl<'a> ReviewDraft<'a> {
    pub fn new(origin: Origin) -> Self {
        Self {
            origin,
            score: "",
            date: "",
            header: "",
            credentials: "",
            location: None,
            content: None,
            pros: None,
            cons: None,
            advice_to_mgmt: None,
        }
    }
}

/// A validated employee review.
///
/// Fields are read-only once built. The only mutation is appending continuation text, and that
/// is only reachable through [`OpenReview`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    score: f64,
    date: i64,
    header: String,
    credentials: String,
    location: Option<String>,
    content: Option<String>,
    pros: Option<String>,
    cons: Option<String>,
    advice_to_mgmt: Option<String>,
    origin: Origin,
}

impl Review {
    /// Validate a draft and build the record.
    pub fn new(draft: ReviewDraft<'_>) -> Result<Self> {
        let origin = draft.origin;

        let score = parse_score(draft.score)?;
        let header = required("header", draft.header)?;
        let credentials = required("credentials", draft.credentials)?;

        if draft.location.is_some() && !origin.allows_location() {
            return Err(ParseError::validation("location", format!("not reported by {origin}")));
        }
        if draft.content.is_some() && !origin.allows_content() {
            return Err(ParseError::validation("content", format!("not reported by {origin}")));
        }
        if draft.advice_to_mgmt.is_some() && !origin.allows_advice() {
            return Err(ParseError::validation(
                "advice_to_mgmt",
                format!("not reported by {origin}"),
            ));
        }

        let date = normalise_date(draft.date)?;

        Ok(Review {
            score,
            date,
            header,
            credentials,
            location: draft.location.map(|s| s.trim().to_string()),
            content: draft.content.map(|s| s.trim().to_string()),
            pros: draft.pros.map(|s| s.trim().to_string()),
            cons: draft.cons.map(|s| s.trim().to_string()),
            advice_to_mgmt: draft.advice_to_mgmt.map(|s| s.trim().to_string()),
            origin,
        })
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Publication date in epoch seconds, always at midnight UTC.
    pub fn date(&self) -> i64 {
        self.date
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn credentials(&self) -> &str {
        &self.credentials
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn pros(&self) -> Option<&str> {
        self.pros.as_deref()
    }

    pub fn cons(&self) -> Option<&str> {
        self.cons.as_deref()
    }

    pub fn advice_to_mgmt(&self) -> Option<&str> {
        self.advice_to_mgmt.as_deref()
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn location_key(&self, canon: &LocationCanonicalizer) -> Option<String> {
        canon.geocoding_key(self.location())
    }

    pub fn location_bucket(&self, canon: &LocationCanonicalizer) -> Option<String> {
        canon.display_bucket(self.location())
    }
}

/// The most recent review of a source, still able to receive continuation text.
///
/// It stays open until the next structurally valid block of the same source arrives, at which
/// point the dispatcher [`close`](OpenReview::close)s it.
#[derive(Debug)]
pub struct OpenReview(Review);

impl OpenReview {
    pub fn new(review: Review) -> Self {
        OpenReview(review)
    }

    pub fn review(&self) -> &Review {
        &self.0
    }

    pub fn close(self) -> Review {
        self.0
    }

    /// Append a continuation fragment to the body text.
    ///
    /// The fragment's first letter is capitalised, and `". "` is inserted unless the existing
    /// body already ends a sentence.
    pub fn append_content(&mut self, fragment: &str) -> Result<()> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Ok(());
        }
        let review = &mut self.0;
        if !review.origin.allows_content() {
            return Err(ParseError::validation(
                "content",
                format!("not reported by {}", review.origin),
            ));
        }

        let fragment = capitalise_first(fragment);
        review.content = match review.content.take() {
            Some(mut existing) if !existing.is_empty() => {
                if existing.ends_with(SENTENCE_TERMINATORS) {
                    existing.push(' ');
                } else {
                    existing.push_str(". ");
                }
                existing.push_str(&fragment);
                Some(existing)
            }
            _ => Some(fragment),
        };
        Ok(())
    }
}

fn parse_score(raw: &str) -> Result<f64> {
    let t = raw.trim();
    let score: f64 = t
        .parse()
        .map_err(|_| ParseError::validation("score", format!("{t:?} is not a number")))?;
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(ParseError::validation(
            "score",
            format!("{score} outside {MIN_SCORE}..={MAX_SCORE}"),
        ));
    }
    Ok(score)
}

fn required(field: &'static str, raw: &str) -> Result<String> {
    let t = raw.trim();
    if t.is_empty() {
        return Err(ParseError::validation(field, "must not be empty"));
    }
    Ok(t.to_string())
}

fn capitalise_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
