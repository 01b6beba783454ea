use std::sync::Arc;

use crate::config::AutofillConfig;
use crate::error::TreeError;
use crate::form::assembler::assemble_form;
use crate::node::node_model::Node;
use crate::plan::builder::{build_fill_plan, build_save_plan};
use crate::plan::plan_model::{FillPlan, SavePlan};

/// Stateless entry point into the classifier.
///
/// Cheap to clone and safe to share across threads; the only shared state
/// is the read-only config.
#[derive(Debug, Clone, Default)]
pub struct AutofillClassifier {
    config: Arc<AutofillConfig>,
}

impl AutofillClassifier {
    pub fn new(config: AutofillConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn with_shared_config(config: Arc<AutofillConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AutofillConfig {
        &self.config
    }

    /// `Ok(None)` covers both "not a login form" and denylisted origins.
    pub fn classify_fill_request(&self, root: &Node, origin: &str) -> Result<Option<FillPlan>, TreeError> {
        let form = assemble_form(root, origin, &self.config)?;
        Ok(form.map(build_fill_plan))
    }

    pub fn classify_save_request(&self, root: &Node, origin: &str) -> Result<Option<SavePlan>, TreeError> {
        let form = assemble_form(root, origin, &self.config)?;
        Ok(form.map(build_save_plan))
    }
}
