use serde::{Deserialize, Serialize};

/// Opaque host identifier for a node; handed back to the host unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeAddress(pub String);

impl NodeAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input type as declared by the host. Only a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    /// Containers, labels, buttons.
    #[default]
    None,
    Text,
    Password,
    VisiblePassword,
    NumberPassword,
    Email,
    Username,
    Phone,
    Number,
    /// An input whose type the host did not declare.
    Unknown,
}

impl InputKind {
    pub fn is_input(self) -> bool {
        !matches!(self, InputKind::None)
    }

    pub fn is_password(self) -> bool {
        matches!(
            self,
            InputKind::Password | InputKind::VisiblePassword | InputKind::NumberPassword
        )
    }

    pub fn is_username(self) -> bool {
        matches!(self, InputKind::Email | InputKind::Username)
    }
}

/// Owned snapshot of one host UI element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub address: NodeAddress,

    #[serde(default)]
    pub kind: InputKind,

    #[serde(default)]
    pub hints: Vec<String>,

    pub id_name: Option<String>,
    pub label_text: Option<String>,
    pub hint_text: Option<String>,

    pub html_tag: Option<String>,
    pub web_domain: Option<String>,
    pub web_scheme: Option<String>,

    /// Current text; only filled in save-time snapshots.
    pub value: Option<String>,

    #[serde(default = "default_true")]
    pub is_focusable: bool,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub is_focused: bool,

    #[serde(default)]
    pub children: Vec<Node>,
}

fn default_true() -> bool {
    true
}

impl Node {
    /// Visible, focusable container with no input semantics.
    pub fn container(address: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            address: NodeAddress::new(address),
            kind: InputKind::None,
            hints: vec![],
            id_name: None,
            label_text: None,
            hint_text: None,
            html_tag: None,
            web_domain: None,
            web_scheme: None,
            value: None,
            is_focusable: true,
            is_visible: true,
            is_focused: false,
            children,
        }
    }

    /// Visible, focusable input leaf of the given kind.
    pub fn input(address: impl Into<String>, kind: InputKind) -> Self {
        Self {
            kind,
            ..Self::container(address, vec![])
        }
    }

    pub fn with_id_name(mut self, id_name: impl Into<String>) -> Self {
        self.id_name = Some(id_name.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label_text = Some(label.into());
        self
    }

    pub fn with_hint_text(mut self, hint: impl Into<String>) -> Self {
        self.hint_text = Some(hint.into());
        self
    }

    pub fn with_hints(mut self, hints: &[&str]) -> Self {
        self.hints = hints.iter().map(|h| h.to_string()).collect();
        self
    }

    pub fn with_html_tag(mut self, tag: impl Into<String>) -> Self {
        self.html_tag = Some(tag.into());
        self
    }

    pub fn with_web_origin(mut self, scheme: impl Into<String>, domain: impl Into<String>) -> Self {
        self.web_scheme = Some(scheme.into());
        self.web_domain = Some(domain.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    pub fn focused(mut self) -> Self {
        self.is_focused = true;
        self
    }

    pub fn is_form_boundary(&self) -> bool {
        self.html_tag
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("form"))
    }

    /// `scheme://domain` when the host reported a web domain. Scheme defaults to http.
    pub fn web_origin(&self) -> Option<String> {
        self.web_domain.as_ref().map(|domain| {
            let scheme = self.web_scheme.as_deref().unwrap_or("http");
            format!("{}://{}", scheme, domain)
        })
    }
}
