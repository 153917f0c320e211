//! Workplace-location canonicalisation.
//!
//! Free-text locations ("Boston, MA", "boston ma", "Worcester, Massachusetts", "Lowell") are run
//! through one normalisation pipeline and then projected either to a geocoding key
//! (`"boston, ma"`) or to a display bucket (`"Boston"`). Both projections read the same
//! [`Place`], so `geocoding_key` minus its state suffix always equals the lower-cased bucket.

use once_cell::sync::Lazy;
use regex::Regex;

/// Full state names and informal spellings, collapsed to their postal abbreviation.
static STATE_ALIASES: &[(&str, &str)] = &[
    ("massachusetts", "ma"),
    ("mass", "ma"),
    ("rhode island", "ri"),
    ("new hampshire", "nh"),
    ("connecticut", "ct"),
    ("conn", "ct"),
    ("vermont", "vt"),
    ("maine", "me"),
];

static STATE_ALIAS_RES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    STATE_ALIASES
        .iter()
        .map(|(alias, abbr)| {
            let re = Regex::new(&format!(r"\b{}\b", regex::escape(alias))).unwrap();
            (re, *abbr)
        })
        .collect()
});

pub const DEFAULT_STATE: &str = "ma";

/// A normalised location split into its place and (optional) state suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Place {
    place: String,
    state: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LocationCanonicalizer {
    default_state: String,
}

impl Default for LocationCanonicalizer {
    fn default() -> Self {
        Self::new(DEFAULT_STATE)
    }
}

impl LocationCanonicalizer {
    pub fn new(default_state: impl AsRef<str>) -> Self {
        Self {
            default_state: default_state.as_ref().trim().to_lowercase(),
        }
    }

    pub fn default_state(&self) -> &str {
        &self.default_state
    }

    /// Canonical lower-case key for geocoding and deduplication, e.g. `"boston, ma"`.
    ///
    /// Locations without a state get the default state appended.
    pub fn geocoding_key(&self, raw: Option<&str>) -> Option<String> {
        let Place { place, state } = self.split(raw?)?;
        let state = state.unwrap_or_else(|| self.default_state.clone());
        if place.is_empty() {
            Some(state)
        } else {
            Some(format!("{place}, {state}"))
        }
    }

    /// Capitalised city/region name with the state stripped, e.g. `"New Bedford"`.
    pub fn display_bucket(&self, raw: Option<&str>) -> Option<String> {
        let Place { place, .. } = self.split(raw?)?;
        if place.is_empty() {
            return None;
        }
        Some(
            place
                .split(' ')
                .map(capitalise)
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    fn split(&self, raw: &str) -> Option<Place> {
        let s = normalise(raw);
        if s.is_empty() {
            return None;
        }

        let parts: Vec<&str> = s.split(", ").collect();

        // "boston, ma, usa": the first state component ends the place, the rest is dropped.
        if let Some(i) = (1..parts.len()).find(|&i| self.is_state(parts[i])) {
            return Some(Place {
                place: parts[..i].join(", "),
                state: Some(parts[i].to_string()),
            });
        }

        // "boston ma": the state is already there, only the comma is missing.
        let head = parts[0];
        match head.rsplit_once(' ') {
            Some((place, last)) if self.is_state(last) => {
                return Some(Place {
                    place: place.to_string(),
                    state: Some(last.to_string()),
                });
            }
            None if parts.len() == 1 && self.is_state(head) => {
                return Some(Place {
                    place: String::new(),
                    state: Some(head.to_string()),
                });
            }
            _ => {}
        }

        // No known state anywhere: the last component is taken as the region.
        match parts.split_last() {
            Some((last, init)) if !init.is_empty() => Some(Place {
                place: init.join(", "),
                state: Some(last.to_string()),
            }),
            _ => Some(Place {
                place: head.to_string(),
                state: None,
            }),
        }
    }

    fn is_state(&self, token: &str) -> bool {
        token == self.default_state || STATE_ALIASES.iter().any(|(_, abbr)| *abbr == token)
    }
}

/// Shared prefix of both projections.
fn normalise(raw: &str) -> String {
    let mut s = raw.to_lowercase().replace(',', ", ").replace('.', " ");
    for (re, abbr) in STATE_ALIAS_RES.iter() {
        s = re.replace_all(&s, *abbr).into_owned();
    }
    let s = s.split_whitespace().collect::<Vec<_>>().join(" ");
    s.replace(" ,", ",")
        .trim_matches(|c: char| c == ',' || c == ' ')
        .to_string()
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
