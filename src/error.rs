use thiserror::Error;

use crate::node::node_model::NodeAddress;

/// Why a host tree snapshot was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// A node address reappeared on its own ancestor path.
    Cycle,
    /// The tree is nested deeper than the configured maximum.
    TooDeep,
    /// The tree holds more nodes than the configured maximum.
    TooManyNodes,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedReason::Cycle => write!(f, "address revisited on its own path"),
            MalformedReason::TooDeep => write!(f, "maximum depth exceeded"),
            MalformedReason::TooManyNodes => write!(f, "maximum node count exceeded"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Malformed tree at {address}: {reason}")]
    MalformedTree {
        reason: MalformedReason,
        address: NodeAddress,
    },
}

impl TreeError {
    pub fn reason(&self) -> MalformedReason {
        match self {
            TreeError::MalformedTree { reason, .. } => *reason,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No password value found at {0}")]
    MissingPassword(NodeAddress),

    #[error("Password at {0} is masked")]
    MaskedPassword(NodeAddress),

    #[error("Form has no password field")]
    NoPasswordField,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read credential store {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse credential store {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Failed to encode credential store {path}: {source}")]
    Encode {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Failed to write credential store {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Credential store rejected entry: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}
