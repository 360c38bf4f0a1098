use std::fmt;

/// What kind of tampering or corruption a chain check found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// Stored hash does not match the hash recomputed from the block's fields.
    HashMismatch,
    /// `previous_hash` differs from the predecessor's stored hash.
    BrokenLink,
    /// The first block has a non-empty `previous_hash`.
    MalformedGenesis,
    /// No blocks at all.
    Empty,
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityViolation::HashMismatch => write!(f, "stored hash does not match contents"),
            IntegrityViolation::BrokenLink => write!(f, "previous hash does not match predecessor"),
            IntegrityViolation::MalformedGenesis => write!(f, "genesis block has a previous hash"),
            IntegrityViolation::Empty => write!(f, "chain has no genesis block"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Payload rejected: {reason}")]
    PayloadRejected { reason: String },

    #[error("Integrity violation at block {index}: {kind}")]
    Integrity {
        index: usize,
        kind: IntegrityViolation,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChainError {
    pub fn integrity(index: usize, kind: IntegrityViolation) -> Self {
        ChainError::Integrity { index, kind }
    }

    /// The violation kind, if this is an integrity error.
    pub fn violation(&self) -> Option<(usize, IntegrityViolation)> {
        match self {
            ChainError::Integrity { index, kind } => Some((*index, *kind)),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_message() {
        let err = ChainError::integrity(2, IntegrityViolation::BrokenLink);
        assert_eq!(
            err.to_string(),
            "Integrity violation at block 2: previous hash does not match predecessor"
        );
        assert_eq!(err.violation(), Some((2, IntegrityViolation::BrokenLink)));
    }

    #[test]
    fn test_rejection_has_no_violation() {
        let err = ChainError::PayloadRejected {
            reason: "too big".to_string(),
        };
        assert_eq!(err.to_string(), "Payload rejected: too big");
        assert!(err.violation().is_none());
    }
}
