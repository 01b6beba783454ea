use std::collections::BTreeSet;

use serde::Serialize;

use crate::form::form_model::{FormOrigin, LoginForm};
use crate::node::node_model::NodeAddress;
use crate::store::SecretHandle;

/// How to fill a login form. Built once per request and handed off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillPlan {
    pub(crate) form: LoginForm,
    pub(crate) requested_match_key: FormOrigin,
}

impl FillPlan {
    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn requested_match_key(&self) -> &FormOrigin {
        &self.requested_match_key
    }

    /// Stable SHA-1 over roles, addresses and the match key.
    pub fn fingerprint(&self) -> String {
        form_fingerprint(&self.form, &self.requested_match_key)
    }
}

/// Which fields to read back after the user submits the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavePlan {
    pub(crate) form: LoginForm,
    pub(crate) addresses_to_reread: BTreeSet<NodeAddress>,
}

impl SavePlan {
    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn addresses_to_reread(&self) -> &BTreeSet<NodeAddress> {
        &self.addresses_to_reread
    }

    pub fn fingerprint(&self) -> String {
        form_fingerprint(&self.form, &self.form.package_or_origin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FillValue {
    Username(String),
    Secret(SecretHandle),
}

/// One suggestion: values to put into host fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<(NodeAddress, FillValue)>,
}

/// Credentials read back from a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedCredentials {
    pub username: Option<String>,
    pub password: String,
    pub origin: FormOrigin,
}

fn form_fingerprint(form: &LoginForm, key: &FormOrigin) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(key.to_string().as_bytes());
    for field in form.fields() {
        hasher.update(format!("|{:?}@{}#{}", field.role, field.address, field.confidence.rank()).as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
