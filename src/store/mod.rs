pub mod credential_store;
pub mod memory_store;

pub use credential_store::{CredentialEntry, CredentialStore, SecretHandle};
pub use memory_store::MemoryCredentialStore;
