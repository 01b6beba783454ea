use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::form::form_model::FormOrigin;
use crate::plan::plan_model::SavedCredentials;
use crate::store::credential_store::{CredentialEntry, CredentialStore, SecretHandle};

/// In-process credential store, optionally seeded from a YAML file.
///
/// ```yaml
/// apps:
///   com.example.app:
///     - username: alice
///       secret: vault/example/alice
/// sites:
///   example.com:
///     - username: bob
///       secret: vault/web/bob
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryCredentialStore {
    #[serde(default)]
    apps: BTreeMap<String, Vec<CredentialEntry>>,
    #[serde(default)]
    sites: BTreeMap<String, Vec<CredentialEntry>>,
    #[serde(skip)]
    secrets: BTreeMap<SecretHandle, String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &str) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_string(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Like [`load`](Self::load), but a file that does not exist yet is an
    /// empty store.
    pub fn load_or_empty(path: &str) -> Result<Self, StoreError> {
        if std::path::Path::new(path).exists() {
            Self::load(path)
        } else {
            tracing::debug!(path, "no credential store file, starting empty");
            Ok(Self::new())
        }
    }

    /// Write entries back as YAML. Secrets are never written, only handles.
    pub fn save(&self, path: &str) -> Result<(), StoreError> {
        let content = serde_yaml::to_string(self).map_err(|source| StoreError::Encode {
            path: path.to_string(),
            source,
        })?;
        std::fs::write(path, content).map_err(|source| StoreError::Write {
            path: path.to_string(),
            source,
        })
    }

    pub fn insert(&mut self, origin: &FormOrigin, entry: CredentialEntry) {
        self.entries_mut(origin).push(entry);
    }

    /// Secrets persisted during this process. Seeded entries only carry handles.
    pub fn secret(&self, handle: &SecretHandle) -> Option<&str> {
        self.secrets.get(handle).map(String::as_str)
    }

    fn entries(&self, origin: &FormOrigin) -> Option<&Vec<CredentialEntry>> {
        match origin {
            FormOrigin::App(id) => self.apps.get(id),
            FormOrigin::Web(id) => self.sites.get(id),
        }
    }

    fn entries_mut(&mut self, origin: &FormOrigin) -> &mut Vec<CredentialEntry> {
        match origin {
            FormOrigin::App(id) => self.apps.entry(id.clone()).or_default(),
            FormOrigin::Web(id) => self.sites.entry(id.clone()).or_default(),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn lookup(&self, origin: &FormOrigin) -> Vec<CredentialEntry> {
        self.entries(origin).cloned().unwrap_or_default()
    }

    fn persist(&mut self, credentials: SavedCredentials) -> Result<CredentialEntry, StoreError> {
        if credentials.password.is_empty() {
            return Err(StoreError::Rejected("empty password".into()));
        }

        let origin = credentials.origin;
        let entries = self.entries_mut(&origin);
        let name = match &credentials.username {
            Some(username) => username.clone(),
            None => format!("entry{}", entries.len()),
        };
        let entry = CredentialEntry {
            username: credentials.username,
            secret: SecretHandle(format!("{}/{}", origin, name)),
        };

        match entries
            .iter_mut()
            .find(|e| e.username.is_some() && e.username == entry.username)
        {
            Some(existing) => *existing = entry.clone(),
            None => entries.push(entry.clone()),
        }

        tracing::info!(%origin, handle = %entry.secret.0, "stored credentials");
        self.secrets.insert(entry.secret.clone(), credentials.password);
        Ok(entry)
    }
}
