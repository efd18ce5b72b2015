//! Error types for the index.
//!
//! Mirrors the two-layer shape the teacher crate uses (`FederationError` wrapping
//! `SingleFederationError`): most call sites only ever produce one error, but a couple
//! of bulk operations can report several, so the outer type stays a thin wrapper
//! rather than forcing everything through a `Vec` up front.

/// A single failure from the index.
#[derive(Clone, Debug, thiserror::Error)]
pub enum SingleIndexError {
    /// An invariant the core is supposed to maintain was found broken. This should
    /// never happen from safe, single-threaded use of the public API; if it does, it
    /// indicates a bug in this crate (or in a user-supplied `IsoMatcher`/`TagMap` that
    /// violates its contract).
    #[error("internal error: {message}")]
    Internal { message: String },

    /// `put` was called for a key that already exists with a different graph. Per the
    /// specification, `put` is an idempotent upsert only when the graph is unchanged;
    /// callers that want to replace an entry must `remove` it first.
    #[error("key already exists with a different graph")]
    KeyAlreadyExists,

    /// `remove`/`get` was called with a key the index has no record of.
    #[error("unknown key")]
    UnknownKey,
}

impl SingleIndexError {
    pub fn internal(message: impl Into<String>) -> Self {
        SingleIndexError::Internal {
            message: message.into(),
        }
    }
}

/// Wraps one or more [`SingleIndexError`]s.
#[derive(Clone, Debug, thiserror::Error)]
pub enum IndexError {
    #[error(transparent)]
    Single(#[from] SingleIndexError),
    #[error("multiple errors occurred:\n{}", format_many(.0))]
    Multiple(Vec<SingleIndexError>),
}

fn format_many(errors: &[SingleIndexError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl IndexError {
    pub fn internal(message: impl Into<String>) -> Self {
        SingleIndexError::internal(message).into()
    }

    pub fn key_already_exists() -> Self {
        SingleIndexError::KeyAlreadyExists.into()
    }

    pub fn unknown_key() -> Self {
        SingleIndexError::UnknownKey.into()
    }
}

