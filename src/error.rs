use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Everything that can go wrong while turning one raw block into a [`Review`](crate::Review).
///
/// All of these are fatal to a single block at most. The dispatcher catches them at the block
/// boundary and turns them into [`Diagnostic`](crate::dispatcher::Diagnostic)s.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A field would violate its constraint (score out of range, empty header, ...).
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// None of the known date patterns matched.
    #[error("unrecognised date: {0:?}")]
    DateFormat(String),

    /// The first line does not carry the delimiter the active format expects.
    #[error("line does not start a new review: {0:?}")]
    StructuralMismatch(String),

    /// The block ran out of lines before a required one could be read.
    #[error("block is missing its {0} line")]
    MissingLine(&'static str),

    /// A continuation line arrived with no open review to receive it.
    #[error("continuation has no preceding review: {0:?}")]
    NoPriorRecord(String),

    /// No extractor is registered for the source identity.
    #[error("no extractor registered for source {0:?}")]
    UnknownSource(String),
}

impl ParseError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        ParseError::Validation {
            field,
            reason: reason.into(),
        }
    }
}
