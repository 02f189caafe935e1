//! Error types shared by the map backends and the rule resolver.

/// Result type defaulting to [`MapError`].
pub type Result<T, E = MapError> = std::result::Result<T, E>;

/// Errors raised by the map backends.
///
/// Looking up or removing an absent key is not an error; those operations
/// return `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// The operation is not supported by this structure.
    #[error("Operation '{operation}' is not supported.")]
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// Balanced construction received keys that are not strictly ascending.
    #[error("Pairs must be sorted by strictly ascending key, but index {index} is out of order.")]
    UnsortedInput {
        /// Position of the first pair whose key does not exceed its predecessor's.
        index: usize,
    },

    /// The backend name is not one of `hash`, `bst` or `rbt`.
    #[error("Invalid data structure '{0}' received.")]
    UnknownBackend(String),
}

/// Errors raised while reading and resolving replacement rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A line is not of the form `old -> new`.
    #[error("Malformed replacement rule on line {line}: '{content}'")]
    MalformedRule {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// Adding the rule would make a word eventually replace itself.
    #[error("Cycle detected when trying to add replacement rule: {from} -> {to}")]
    Cycle {
        /// Left-hand side of the rejected rule.
        from: String,
        /// Right-hand side of the rejected rule.
        to: String,
    },
}
