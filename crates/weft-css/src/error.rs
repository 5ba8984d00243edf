//! Error type shared by every stage of the engine.

use thiserror::Error;

use crate::values::Unit;

/// Failures surfaced by the selector parser, the property registry, the
/// computed style record, and the length resolver.
///
/// Recoverable problems (a malformed selector node, a rejected declaration
/// value) are reported through `warn_once` and never reach this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// Selector text contains a character the grammar does not know.
    #[error("unknown char {ch:?} at {offset} in selector `{selector}`")]
    Syntax {
        /// The full selector text.
        selector: String,
        /// Byte offset of the offending character.
        offset: usize,
        /// The offending character.
        ch: char,
    },

    /// A hard size limit was exceeded; the operation was aborted.
    #[error("{what} exceeds the limit of {limit}")]
    LimitExceeded {
        /// What overflowed, e.g. "selector depth".
        what: &'static str,
        /// The limit that was hit.
        limit: usize,
    },

    /// A length carries a unit that cannot be converted to pixels in this context.
    #[error("cannot convert unit `{unit}` to px")]
    UnsupportedUnit {
        /// The unit that was met.
        unit: Unit,
    },

    /// Growing a slot array failed; the record keeps its previous size.
    #[error("cannot grow style record to {requested} slots")]
    AllocationFailure {
        /// Number of slots that was requested.
        requested: usize,
    },

    /// A property or keyword name is already registered.
    #[error("name `{name}` is already registered")]
    DuplicateName {
        /// The rejected name.
        name: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StyleError>;
