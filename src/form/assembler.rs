use crate::config::AutofillConfig;
use crate::error::TreeError;
use crate::form::classifier::{ClassifiedNode, ClassifiedTree, classify_tree};
use crate::form::form_model::{ClassifiedField, FieldRole, LoginForm};
use crate::form::origin::resolve_origin;
use crate::node::node_model::{Node, NodeAddress};

/// Classify `root` and assemble at most one login form from it.
///
/// Denylisted packages return `Ok(None)` without walking the tree, which is
/// indistinguishable from a tree that holds no login form.
pub fn assemble_form(
    root: &Node,
    package: &str,
    config: &AutofillConfig,
) -> Result<Option<LoginForm>, TreeError> {
    if config.is_denylisted(package) {
        return Ok(None);
    }

    let tree = classify_tree(root, config.walk_limits())?;
    Ok(assemble(&tree, package, config))
}

/// Group classified fields into a login form.
///
/// When passwords sit in several `<form>` scopes, only the scope holding the
/// strongest password field is kept. Ties go to the scope holding the focused
/// field, then to the focused password, then to the earliest.
pub fn assemble(tree: &ClassifiedTree, package: &str, config: &AutofillConfig) -> Option<LoginForm> {
    let scope = pick_scope(tree)?;

    let in_scope: Vec<&ClassifiedNode> = tree
        .fields
        .iter()
        .filter(|n| n.form_scope == scope)
        .collect();

    let passwords: Vec<&ClassifiedNode> = in_scope
        .iter()
        .copied()
        .filter(|n| n.field.role.is_password())
        .collect();
    let first_password_order = passwords.first()?.order;

    let username = pick_username(&in_scope, first_password_order);

    let field_origins: Vec<Option<&str>> = username
        .iter()
        .chain(passwords.iter())
        .map(|n| n.web_origin.as_deref())
        .collect();
    let origin = resolve_origin(
        package,
        config.is_browser(package),
        &tree.web_origins,
        &field_origins,
    )?;

    Some(LoginForm {
        username_field: username.map(|n| n.field.clone()),
        password_fields: disambiguate_passwords(&passwords),
        package_or_origin: origin,
    })
}

fn pick_scope(tree: &ClassifiedTree) -> Option<Option<NodeAddress>> {
    let focused_scope = tree.fields.iter().find(|n| n.focused).map(|n| &n.form_scope);

    tree.fields
        .iter()
        .filter(|n| n.field.role.is_password())
        .min_by_key(|n| {
            (
                n.field.confidence,
                focused_scope != Some(&n.form_scope),
                !n.focused,
                n.order,
            )
        })
        .map(|n| n.form_scope.clone())
}

/// Position decides the role: the first password is the current one and
/// every later one is a new password, whatever the hints said.
fn disambiguate_passwords(passwords: &[&ClassifiedNode]) -> Vec<ClassifiedField> {
    passwords
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let role = match i {
                0 => FieldRole::CurrentPassword,
                _ => FieldRole::NewPassword,
            };
            ClassifiedField {
                role,
                ..n.field.clone()
            }
        })
        .collect()
}

/// Strongest username; ties go to the focused one, then to the one closest
/// before the first password, then to the earliest.
fn pick_username<'a>(
    fields: &[&'a ClassifiedNode],
    first_password_order: usize,
) -> Option<&'a ClassifiedNode> {
    let usernames: Vec<&ClassifiedNode> = fields
        .iter()
        .copied()
        .filter(|n| n.field.role == FieldRole::Username)
        .collect();
    let best = usernames.iter().map(|n| n.field.confidence).min()?;
    let strongest: Vec<&ClassifiedNode> = usernames
        .into_iter()
        .filter(|n| n.field.confidence == best)
        .collect();

    if let Some(focused) = strongest.iter().copied().find(|n| n.focused) {
        return Some(focused);
    }

    let mut earliest = None;
    let mut preceding = None;
    for n in strongest {
        earliest.get_or_insert(n);
        if n.order < first_password_order {
            preceding = Some(n);
        }
    }
    preceding.or(earliest)
}
