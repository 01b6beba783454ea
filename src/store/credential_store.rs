use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::form::form_model::FormOrigin;
use crate::plan::plan_model::SavedCredentials;

/// Reference to a stored secret. The secret itself never passes through
/// the classifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretHandle(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub username: Option<String>,
    pub secret: SecretHandle,
}

// ============================================================================
// CredentialStore trait — lookup and persistence by match key
// ============================================================================

pub trait CredentialStore {
    /// Entries stored under `origin`, zero or more.
    fn lookup(&self, origin: &FormOrigin) -> Vec<CredentialEntry>;

    /// Store newly submitted credentials under their origin.
    fn persist(&mut self, credentials: SavedCredentials) -> Result<CredentialEntry, StoreError>;
}
