use std::collections::{BTreeSet, HashMap};

use crate::error::{ExtractError, SaveError};
use crate::form::form_model::{ClassifiedField, FieldRole, LoginForm};
use crate::node::node_model::{Node, NodeAddress};
use crate::node::walker::{TreeWalker, WalkLimits};
use crate::plan::plan_model::{Dataset, FillPlan, FillValue, SavePlan, SavedCredentials};
use crate::store::CredentialEntry;

pub fn build_fill_plan(form: LoginForm) -> FillPlan {
    let requested_match_key = form.package_or_origin.clone();
    FillPlan {
        form,
        requested_match_key,
    }
}

pub fn build_save_plan(form: LoginForm) -> SavePlan {
    let addresses_to_reread: BTreeSet<NodeAddress> = form
        .fields()
        .filter(|f| f.role != FieldRole::Irrelevant)
        .map(|f| f.address.clone())
        .collect();

    SavePlan {
        form,
        addresses_to_reread,
    }
}

/// One dataset per stored credential.
///
/// The secret goes into every current-password field; a form with a single
/// password field takes it there whatever its role.
pub fn build_datasets(plan: &FillPlan, entries: &[CredentialEntry]) -> Vec<Dataset> {
    let form = plan.form();
    let secret_targets: Vec<&ClassifiedField> = if form.password_fields.len() == 1 {
        form.password_fields.iter().collect()
    } else {
        form.current_passwords().collect()
    };

    entries
        .iter()
        .map(|entry| {
            let mut values = Vec::new();
            if let (Some(field), Some(username)) = (&form.username_field, &entry.username) {
                values.push((field.address.clone(), FillValue::Username(username.clone())));
            }
            for field in &secret_targets {
                values.push((field.address.clone(), FillValue::Secret(entry.secret.clone())));
            }

            Dataset {
                label: entry
                    .username
                    .clone()
                    .unwrap_or_else(|| plan.requested_match_key().identifier().to_string()),
                values,
            }
        })
        .collect()
}

/// Read the submitted values named by `plan` out of a save-time snapshot.
///
/// The first new password wins over the current one, since a change form is
/// storing the replacement.
pub fn extract_credentials(
    plan: &SavePlan,
    snapshot: &Node,
    limits: WalkLimits,
) -> Result<SavedCredentials, SaveError> {
    let mut values: HashMap<&NodeAddress, &str> = HashMap::new();
    for visit in TreeWalker::new(snapshot, limits) {
        let node = visit?.node;
        if plan.addresses_to_reread.contains(&node.address) {
            if let Some(value) = node.value.as_deref() {
                values.insert(&node.address, value);
            }
        }
    }

    let form = plan.form();
    let password_field = form
        .new_passwords()
        .next()
        .or_else(|| form.password_fields.first())
        .ok_or(ExtractError::NoPasswordField)?;

    let password = match values.get(&password_field.address) {
        Some(value) if !value.is_empty() => *value,
        _ => return Err(ExtractError::MissingPassword(password_field.address.clone()).into()),
    };
    if is_masked(password) {
        return Err(ExtractError::MaskedPassword(password_field.address.clone()).into());
    }

    let username = form
        .username_field
        .as_ref()
        .and_then(|f| values.get(&f.address))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    Ok(SavedCredentials {
        username,
        password: password.to_string(),
        origin: form.package_or_origin.clone(),
    })
}

fn is_masked(password: &str) -> bool {
    password.chars().all(|c| c == '*' || c == '•')
}
