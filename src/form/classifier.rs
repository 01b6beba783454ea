use crate::error::TreeError;
use crate::form::form_model::{ClassifiedField, Confidence, FieldRole};
use crate::node::node_model::{Node, NodeAddress};
use crate::node::walker::{TreeWalker, WalkLimits};

const PASSWORD_HINTS: [(&str, FieldRole); 3] = [
    ("new-password", FieldRole::NewPassword),
    ("current-password", FieldRole::CurrentPassword),
    ("password", FieldRole::CurrentPassword),
];
const USERNAME_HINTS: [&str; 3] = ["username", "emailaddress", "email"];

const PASSWORD_TERMS: [&str; 2] = ["pass", "pwd"];
const USERNAME_TERMS: [&str; 3] = ["user", "login", "email"];

// Address bars and search boxes
const EXCLUDED_TERMS: [&str; 3] = ["url_bar", "search", "find"];

/// A classified node plus the structural facts the assembler groups by.
#[derive(Debug, Clone)]
pub struct ClassifiedNode {
    pub field: ClassifiedField,
    /// Position among all walked nodes.
    pub order: usize,
    /// Nearest enclosing `<form>`, if any.
    pub form_scope: Option<NodeAddress>,
    /// Own web origin, or the nearest ancestor's.
    pub web_origin: Option<String>,
    /// Host reported input focus on this node.
    pub focused: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ClassifiedTree {
    /// Every non-irrelevant field, tree order.
    pub fields: Vec<ClassifiedNode>,
    /// Distinct web origins seen anywhere, first-seen order.
    pub web_origins: Vec<String>,
}

/// Walk `root` and classify every node. Irrelevant nodes are dropped.
pub fn classify_tree(root: &Node, limits: WalkLimits) -> Result<ClassifiedTree, TreeError> {
    let mut tree = ClassifiedTree::default();

    for (order, visit) in TreeWalker::new(root, limits).enumerate() {
        let visit = visit?;
        let node = visit.node;

        if let Some(origin) = node.web_origin() {
            if !tree.web_origins.contains(&origin) {
                tracing::trace!(%origin, "web origin encountered");
                tree.web_origins.push(origin);
            }
        }

        let field = classify_node(node);
        if field.role == FieldRole::Irrelevant {
            continue;
        }
        tracing::debug!(
            address = %field.address,
            role = ?field.role,
            rank = field.confidence.rank(),
            "classified field"
        );

        let form_scope = visit
            .ancestors
            .iter()
            .rev()
            .find(|a| a.is_form_boundary())
            .map(|a| a.address.clone());

        let web_origin = node.web_origin().or_else(|| {
            visit
                .ancestors
                .iter()
                .rev()
                .find_map(|a| a.web_origin())
        });

        tree.fields.push(ClassifiedNode {
            field,
            order,
            form_scope,
            web_origin,
            focused: node.is_focused,
        });
    }

    Ok(tree)
}

/// Assign a role to one node. First matching rule wins.
pub fn classify_node(node: &Node) -> ClassifiedField {
    let (role, confidence) = if !is_candidate(node) {
        (FieldRole::Irrelevant, Confidence::Default)
    } else if let Some(role) = role_from_hints(&node.hints) {
        (role, Confidence::ExplicitHint)
    } else if has_excluded_term(node) {
        (FieldRole::Irrelevant, Confidence::Default)
    } else if let Some(role) = role_from_kind(node) {
        (role, Confidence::DeclaredKind)
    } else if let Some(role) = role_from_text(node) {
        (role, Confidence::TextHeuristic)
    } else {
        (FieldRole::Irrelevant, Confidence::Default)
    };

    ClassifiedField {
        address: node.address.clone(),
        role,
        confidence,
    }
}

fn is_candidate(node: &Node) -> bool {
    node.is_visible && node.is_focusable && (node.kind.is_input() || !node.hints.is_empty())
}

fn role_from_hints(hints: &[String]) -> Option<FieldRole> {
    let normalized: Vec<String> = hints.iter().map(|h| h.trim().to_lowercase()).collect();

    for (token, role) in PASSWORD_HINTS {
        if normalized.iter().any(|h| h == token) {
            return Some(role);
        }
    }

    if normalized
        .iter()
        .any(|h| USERNAME_HINTS.contains(&h.as_str()))
    {
        return Some(FieldRole::Username);
    }

    None
}

fn role_from_kind(node: &Node) -> Option<FieldRole> {
    if node.kind.is_password() {
        Some(FieldRole::CurrentPassword)
    } else if node.kind.is_username() {
        Some(FieldRole::Username)
    } else {
        None
    }
}

fn role_from_text(node: &Node) -> Option<FieldRole> {
    [&node.id_name, &node.label_text, &node.hint_text]
        .into_iter()
        .flatten()
        .find_map(|text| role_from_keywords(&text.to_lowercase()))
}

fn role_from_keywords(text: &str) -> Option<FieldRole> {
    if PASSWORD_TERMS.iter().any(|t| text.contains(t)) {
        Some(FieldRole::CurrentPassword)
    } else if USERNAME_TERMS.iter().any(|t| text.contains(t)) {
        Some(FieldRole::Username)
    } else {
        None
    }
}

fn has_excluded_term(node: &Node) -> bool {
    [&node.id_name, &node.hint_text]
        .into_iter()
        .flatten()
        .map(|text| text.to_lowercase())
        .any(|text| EXCLUDED_TERMS.iter().any(|t| text.contains(t)))
}
