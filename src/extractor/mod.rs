use std::collections::VecDeque;

use crate::{
    error::{ParseError, Result},
    review::{Origin, Review},
};

pub mod glassdoor;
pub mod indeed;

pub use glassdoor::Glassdoor;
pub use indeed::Indeed;

/// Turns one raw review block of a particular site into a [`Review`].
///
/// Implementations only know their own line layout; picking the right one for a source is the
/// dispatcher's job.
pub trait Extractor: Send + Sync {
    /// The origin stamped on every review this extractor produces.
    fn origin(&self) -> Origin;

    /// Parse the lines of one block.
    ///
    /// Returns [`ParseError::StructuralMismatch`] when the block does not open a new review at
    /// all. The mismatch carries the block text so it can be folded into the previous review.
    fn extract_lines(&self, lines: &mut LineQueue<'_>) -> Result<Review>;

    /// Strip quote characters from a raw block and parse it.
    fn extract(&self, block: &str) -> Result<Review> {
        let cleaned = strip_quotes(block);
        let mut lines = LineQueue::new(&cleaned);
        self.extract_lines(&mut lines)
    }
}

/// Scraped text sometimes carries stray quoting, drop all of it before splitting.
pub fn strip_quotes(block: &str) -> String {
    block.replace(['\'', '"'], "")
}

/// The lines of one block, consumed strictly from the front.
#[derive(Debug, Clone)]
pub struct LineQueue<'a> {
    lines: VecDeque<&'a str>,
}

impl<'a> LineQueue<'a> {
    pub fn new(block: &'a str) -> Self {
        let block = block.trim_matches(|c: char| c == '\n' || c == '\r');
        let lines = if block.is_empty() {
            VecDeque::new()
        } else {
            block.split('\n').map(str::trim).collect()
        };
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.lines.front().copied()
    }

    /// Pop a line the layout cannot do without.
    pub fn pop_required(&mut self, name: &'static str) -> Result<&'a str> {
        self.lines.pop_front().ok_or(ParseError::MissingLine(name))
    }

    /// Pop the optional trailing sections, in order, stripping their prefixes.
    ///
    /// A section is absent when the queue has run out, or when the next line already belongs to
    /// a later section. A line without any known prefix is taken as-is for the current section.
    /// Blank lines never count as a section.
    pub fn pop_sections<const N: usize>(&mut self, prefixes: [&str; N]) -> [Option<&'a str>; N] {
        let mut out = [None; N];
        for (i, prefix) in prefixes.iter().enumerate() {
            while self.peek() == Some("") {
                self.lines.pop_front();
            }
            let Some(line) = self.peek() else {
                break;
            };
            if prefixes[i + 1..].iter().any(|later| has_prefix(line, later)) {
                continue;
            }
            self.lines.pop_front();
            out[i] = Some(strip_prefix(line, prefix));
        }
        out
    }

    /// Everything left in the queue, joined into a single line.
    pub fn drain_joined(&mut self) -> String {
        self.lines
            .drain(..)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// Lines are trimmed, so an empty section ("Cons -") has lost the prefix's trailing space.
fn has_prefix(line: &str, prefix: &str) -> bool {
    line.starts_with(prefix) || line == prefix.trim_end()
}

fn strip_prefix<'a>(line: &'a str, prefix: &str) -> &'a str {
    line.strip_prefix(prefix)
        .or_else(|| line.strip_prefix(prefix.trim_end()))
        .unwrap_or(line)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_trims_lines_and_outer_newlines() {
        let mut q = LineQueue::new("\n  first \r\nsecond\n\n");
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop_required("a"), Ok("first"));
        assert_eq!(q.pop_required("b"), Ok("second"));
        assert_eq!(q.pop_required("c"), Err(ParseError::MissingLine("c")));
    }

    #[test]
    fn empty_block_has_no_lines() {
        assert!(LineQueue::new("").is_empty());
        assert!(LineQueue::new("\n\r\n").is_empty());
    }

    #[test]
    fn sections_absent_on_exhaustion() {
        let mut q = LineQueue::new("Pros - Pay");
        assert_eq!(
            q.pop_sections(["Pros - ", "Cons - ", "Advice to Management - "]),
            [Some("Pay"), None, None]
        );
    }

    #[test]
    fn sections_skip_when_a_later_prefix_shows_up() {
        let mut q = LineQueue::new("Cons - Hours\nAdvice to Management - Hire more");
        assert_eq!(
            q.pop_sections(["Pros - ", "Cons - ", "Advice to Management - "]),
            [None, Some("Hours"), Some("Hire more")]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn unprefixed_line_is_taken_positionally() {
        let mut q = LineQueue::new("Free coffee\nCons -");
        assert_eq!(q.pop_sections(["Pros - ", "Cons - "]), [Some("Free coffee"), Some("")]);
    }

    #[test]
    fn blank_lines_are_not_sections() {
        let mut q = LineQueue::new("Pros - Pay\n   \nCons - Hours\n\t");
        assert_eq!(q.pop_sections(["Pros - ", "Cons - "]), [Some("Pay"), Some("Hours")]);
        assert!(q.is_empty());
    }

    #[test]
    fn prefixes_are_case_sensitive() {
        let mut q = LineQueue::new("pros - lowercase");
        assert_eq!(q.pop_sections(["Pros - "]), [Some("pros - lowercase")]);
    }

    #[test]
    fn strip_quotes_removes_both_kinds() {
        assert_eq!(strip_quotes(r#"It's "fine""#), "Its fine");
    }
}
