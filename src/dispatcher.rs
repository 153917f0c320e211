use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::{
    error::{ParseError, Result},
    extractor::{Extractor, Glassdoor, Indeed},
    review::{OpenReview, Origin, Review},
};

/// Reviews in an export are separated by a blank line.
pub const DEFAULT_SEPARATOR: &str = "\n\n";

/// Something the caller may want to know about, but that did not stop the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A block could not be turned into a review and was skipped.
    Dropped {
        source: String,
        fragment: String,
        error: ParseError,
    },
    /// No extractor handles this source, none of its blocks were read.
    UnknownSource { source: String },
}

impl Diagnostic {
    pub fn source(&self) -> &str {
        match self {
            Diagnostic::Dropped { source, .. } | Diagnostic::UnknownSource { source } => source,
        }
    }
}

/// Per-source outcome of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub source: String,
    pub origin: Origin,
    pub parsed: usize,
    pub dropped: usize,
}

/// Everything parsed out of one source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBatch {
    pub summary: SourceSummary,
    pub reviews: Vec<Review>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Everything parsed out of a set of sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Reviews of all processed sources, in input order.
    pub reviews: Vec<Review>,
    /// One entry per processed source. Unknown sources have none.
    pub sources: Vec<SourceSummary>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BatchReport {
    pub fn dropped(&self) -> usize {
        self.sources.iter().map(|s| s.dropped).sum()
    }

    pub fn skipped_sources(&self) -> impl Iterator<Item = &str> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::UnknownSource { source } => Some(source.as_str()),
            _ => None,
        })
    }
}

/// Routes each source's blocks to the extractor registered for its origin.
///
/// The registry is fixed at construction and only read afterwards, so one dispatcher can serve
/// any number of batches, from any number of threads.
pub struct Dispatcher {
    registry: BTreeMap<Origin, Box<dyn Extractor>>,
    separator: String,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::standard(DEFAULT_SEPARATOR)
    }
}

impl Dispatcher {
    /// A dispatcher with no extractors registered.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            registry: BTreeMap::new(),
            separator: separator.into().replace("\r\n", "\n"),
        }
    }

    /// A dispatcher knowing every supported site.
    pub fn standard(separator: impl Into<String>) -> Self {
        Self::new(separator)
            .with_extractor(Box::new(Glassdoor))
            .with_extractor(Box::new(Indeed))
    }

    /// Register `extractor` for its origin, replacing any previous one.
    pub fn with_extractor(mut self, extractor: Box<dyn Extractor>) -> Self {
        self.registry.insert(extractor.origin(), extractor);
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Parse every source, skipping (and reporting) the ones nothing is registered for.
    pub fn parse_batch<'a, I>(&self, sources: I) -> BatchReport
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut report = BatchReport::default();
        for (name, text) in sources {
            match self.parse_source(name, text) {
                Ok(batch) => {
                    info!(
                        source = name,
                        parsed = batch.summary.parsed,
                        dropped = batch.summary.dropped,
                        "parsed {} {} reviews",
                        batch.summary.parsed,
                        batch.summary.origin
                    );
                    report.reviews.extend(batch.reviews);
                    report.sources.push(batch.summary);
                    report.diagnostics.extend(batch.diagnostics);
                }
                Err(e) => {
                    warn!(source = name, "unable to parse reviews: {e}");
                    report.diagnostics.push(Diagnostic::UnknownSource {
                        source: name.to_string(),
                    });
                }
            }
        }
        report
    }

    /// Parse all blocks of one source.
    ///
    /// Fails only when `name` has no registered extractor. Bad blocks are dropped and reported
    /// in the returned batch.
    pub fn parse_source(&self, name: &str, text: &str) -> Result<SourceBatch> {
        let extractor = name
            .parse::<Origin>()
            .ok()
            .and_then(|origin| self.registry.get(&origin))
            .ok_or_else(|| ParseError::UnknownSource(name.to_string()))?;

        let mut reviews = Vec::new();
        let mut diagnostics = Vec::new();
        let mut open: Option<OpenReview> = None;

        // Exports saved on Windows would otherwise never match a "\n\n" separator.
        let text = text.replace("\r\n", "\n");
        for block in text.split(self.separator.as_str()) {
            if block.trim().is_empty() {
                continue;
            }
            match extractor.extract(block) {
                Ok(review) => {
                    debug!(source = name, header = review.header(), "parsed review");
                    if let Some(prev) = open.replace(OpenReview::new(review)) {
                        reviews.push(prev.close());
                    }
                }
                Err(ParseError::StructuralMismatch(fragment)) => {
                    let appended = match open.as_mut() {
                        Some(prev) => prev.append_content(&fragment),
                        None => Err(ParseError::NoPriorRecord(fragment)),
                    };
                    match appended {
                        Ok(()) => debug!(source = name, "appended continuation to previous review"),
                        Err(e) => drop_block(&mut diagnostics, name, block, e),
                    }
                }
                Err(e) => {
                    // The block did start a new review, so nothing after it may extend the old one.
                    if let Some(prev) = open.take() {
                        reviews.push(prev.close());
                    }
                    drop_block(&mut diagnostics, name, block, e);
                }
            }
        }
        if let Some(last) = open.take() {
            reviews.push(last.close());
        }

        Ok(SourceBatch {
            summary: SourceSummary {
                source: name.to_string(),
                origin: extractor.origin(),
                parsed: reviews.len(),
                dropped: diagnostics.len(),
            },
            reviews,
            diagnostics,
        })
    }
}

fn drop_block(diagnostics: &mut Vec<Diagnostic>, source: &str, block: &str, error: ParseError) {
    let fragment = block.trim().to_string();
    warn!(source, fragment = %fragment, "dropping review block: {error}");
    diagnostics.push(Diagnostic::Dropped {
        source: source.to_string(),
        fragment,
        error,
    });
}
