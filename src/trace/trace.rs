use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::form::form_model::LoginForm;

/// One JSONL record per handled request.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub request: String,
    pub package: String,

    pub outcome: String,

    pub match_key: Option<String>,
    pub fields: Vec<String>,
    pub fingerprint: Option<String>,
    pub error: Option<String>,
}

impl TraceEvent {
    pub fn now(request: &str, package: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            request: request.to_string(),
            package: package.to_string(),
            outcome: "no_form".to_string(),
            match_key: None,
            fields: vec![],
            fingerprint: None,
            error: None,
        }
    }

    pub fn with_form(mut self, form: &LoginForm, fingerprint: String) -> Self {
        self.outcome = "form".to_string();
        self.match_key = Some(form.package_or_origin.to_string());
        self.fields = form
            .fields()
            .map(|f| format!("{:?}@{}#{}", f.role, f.address, f.confidence.rank()))
            .collect();
        self.fingerprint = Some(fingerprint);
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.outcome = "error".to_string();
        self.error = Some(error.to_string());
        self
    }
}
