//! Parser and normaliser for scraped employee reviews.
//!
//! Raw exports (one text blob per site, reviews separated by a blank line) go through the
//! [`Dispatcher`], which hands every block to the [`Extractor`] of that site and collects the
//! validated [`Review`]s. The [`date`] and [`location`] modules hold the normalisers the
//! extractors and downstream consumers share.
//!
//! ```text
//! raw text ──► Dispatcher ──► Extractor (glassdoor | indeed) ──► Review
//!                  │                 │
//!                  │                 └─ continuation ──► previous Review's content
//!                  └─ Diagnostics (drops, unknown sources)
//! ```

pub mod config;
pub mod date;
pub mod dispatcher;
pub mod error;
pub mod extractor;
pub mod location;
pub mod review;

pub use dispatcher::{BatchReport, Diagnostic, Dispatcher, SourceSummary};
pub use error::ParseError;
pub use extractor::Extractor;
pub use location::LocationCanonicalizer;
pub use review::{Origin, Review};
