use serde::Serialize;

use crate::node::node_model::NodeAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldRole {
    Username,
    CurrentPassword,
    NewPassword,
    Irrelevant,
}

impl FieldRole {
    pub fn is_password(self) -> bool {
        matches!(self, FieldRole::CurrentPassword | FieldRole::NewPassword)
    }
}

/// Which classifier rule produced a role. Declaration order is strength:
/// `ExplicitHint` sorts lowest and is the most trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Confidence {
    ExplicitHint,
    DeclaredKind,
    TextHeuristic,
    Default,
}

impl Confidence {
    /// Rule number, 1 through 4.
    pub fn rank(self) -> u8 {
        match self {
            Confidence::ExplicitHint => 1,
            Confidence::DeclaredKind => 2,
            Confidence::TextHeuristic => 3,
            Confidence::Default => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassifiedField {
    pub address: NodeAddress,
    pub role: FieldRole,
    pub confidence: Confidence,
}

/// Credential match key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "type", content = "identifier")]
pub enum FormOrigin {
    /// Native app, identified by package name.
    App(String),
    /// Web page, identified by canonical domain.
    Web(String),
}

impl FormOrigin {
    pub fn identifier(&self) -> &str {
        match self {
            FormOrigin::App(id) | FormOrigin::Web(id) => id,
        }
    }
}

impl std::fmt::Display for FormOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormOrigin::App(id) => write!(f, "app:{}", id),
            FormOrigin::Web(id) => write!(f, "web:{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub username_field: Option<ClassifiedField>,
    /// Tree order. Never empty.
    pub password_fields: Vec<ClassifiedField>,
    pub package_or_origin: FormOrigin,
}

impl LoginForm {
    /// Username first, then passwords in tree order.
    pub fn fields(&self) -> impl Iterator<Item = &ClassifiedField> {
        self.username_field.iter().chain(self.password_fields.iter())
    }

    pub fn current_passwords(&self) -> impl Iterator<Item = &ClassifiedField> {
        self.password_fields
            .iter()
            .filter(|f| f.role == FieldRole::CurrentPassword)
    }

    pub fn new_passwords(&self) -> impl Iterator<Item = &ClassifiedField> {
        self.password_fields
            .iter()
            .filter(|f| f.role == FieldRole::NewPassword)
    }
}
