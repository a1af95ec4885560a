//! Error types for the editor

use thiserror::Error;

use crate::history::HistoryError;
use crate::mutations::MutationError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),
}

/// Coarse classification of editor diagnostics
///
/// None of these are fatal; the editor state is unchanged whenever an error
/// is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced block does not exist
    NotFound,

    /// Unknown block type or badly shaped update
    InvalidInput,

    /// The operation would not change anything
    NoOp,

    /// Nothing left to undo or redo
    HistoryExhausted,
}

impl EditorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditorError::Mutation(err) => match err {
                MutationError::BlockNotFound(_) => ErrorKind::NotFound,
                MutationError::Registry(_)
                | MutationError::PatchMismatch { .. }
                | MutationError::MalformedPatch(_) => ErrorKind::InvalidInput,
                MutationError::AtBoundary(..)
                | MutationError::SameBlock(_)
                | MutationError::Unchanged => ErrorKind::NoOp,
            },
            EditorError::History(_) => ErrorKind::HistoryExhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryError;

    #[test]
    fn test_error_kinds() {
        let not_found: EditorError = MutationError::BlockNotFound("x".into()).into();
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let invalid: EditorError =
            MutationError::from(RegistryError::UnknownBlockType("video".into())).into();
        assert_eq!(invalid.kind(), ErrorKind::InvalidInput);

        let noop: EditorError = MutationError::Unchanged.into();
        assert_eq!(noop.kind(), ErrorKind::NoOp);

        let exhausted: EditorError = HistoryError::NothingToRedo.into();
        assert_eq!(exhausted.kind(), ErrorKind::HistoryExhausted);
    }

    #[test]
    fn test_error_messages() {
        let err: EditorError = MutationError::BlockNotFound("block-7".into()).into();
        assert_eq!(err.to_string(), "Mutation error: Block not found: block-7");
    }
}
