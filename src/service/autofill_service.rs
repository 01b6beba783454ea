use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::error::SaveError;
use crate::node::node_model::Node;
use crate::plan::builder::{build_datasets, build_save_plan, extract_credentials};
use crate::plan::plan_model::{Dataset, FillPlan, SavePlan, SavedCredentials};
use crate::service::autofill_classifier::AutofillClassifier;
use crate::store::CredentialStore;

/// Advisory cancellation flag shared with the host.
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal {
    cancelled: Arc<AtomicBool>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// A host request: one or more tree snapshots from the requesting package.
#[derive(Debug, Clone)]
pub struct AutofillRequest {
    pub package: String,
    pub contexts: Vec<Node>,
}

impl AutofillRequest {
    pub fn new(package: impl Into<String>, root: Node) -> Self {
        Self {
            package: package.into(),
            contexts: vec![root],
        }
    }

    /// Only the most recent snapshot is processed.
    fn latest_context(&self) -> Option<&Node> {
        if self.contexts.len() > 1 {
            tracing::warn!(
                package = %self.package,
                contexts = self.contexts.len(),
                "multiple fill contexts not supported, using the last"
            );
        }
        self.contexts.last()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FillResponse {
    pub plan: FillPlan,
    pub datasets: Vec<Dataset>,
    /// Fields the host should watch for a later save request.
    pub save_plan: SavePlan,
}

/// Host-facing boundary around the classifier and a credential store.
pub struct AutofillService<S> {
    classifier: AutofillClassifier,
    store: S,
}

impl<S: CredentialStore> AutofillService<S> {
    pub fn new(classifier: AutofillClassifier, store: S) -> Self {
        Self { classifier, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// `None` means "no suggestions": no form, denylisted, malformed tree,
    /// or cancelled.
    pub fn on_fill_request(
        &self,
        request: &AutofillRequest,
        cancellation: &CancellationSignal,
    ) -> Option<FillResponse> {
        tracing::debug!(package = %request.package, "fill request");
        let root = request.latest_context()?;

        if cancellation.is_cancelled() {
            tracing::debug!(package = %request.package, "fill request cancelled");
            return None;
        }

        let plan = match self.classifier.classify_fill_request(root, &request.package) {
            Ok(Some(plan)) => plan,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(package = %request.package, error = %e, "rejected view tree");
                return None;
            }
        };

        if cancellation.is_cancelled() {
            tracing::debug!(package = %request.package, "fill request cancelled");
            return None;
        }

        Some(self.respond(plan))
    }

    /// Attach store matches and the save plan to an already built fill plan.
    pub fn respond(&self, plan: FillPlan) -> FillResponse {
        let entries = self.store.lookup(plan.requested_match_key());
        let datasets = build_datasets(&plan, &entries);
        tracing::info!(
            origin = %plan.requested_match_key(),
            matches = datasets.len(),
            "fill plan ready"
        );

        let save_plan = build_save_plan(plan.form().clone());
        FillResponse {
            plan,
            datasets,
            save_plan,
        }
    }

    /// Classify the submitted tree, read back its values and persist them.
    pub fn on_save_request(
        &mut self,
        request: &AutofillRequest,
    ) -> Result<Option<SavedCredentials>, SaveError> {
        tracing::debug!(package = %request.package, "save request");
        let Some(root) = request.latest_context() else {
            return Ok(None);
        };

        let Some(plan) = self.classifier.classify_save_request(root, &request.package)? else {
            return Ok(None);
        };

        self.persist(&plan, root).map(Some)
    }

    /// Read the submitted values named by `plan` out of `root` and store them.
    pub fn persist(&mut self, plan: &SavePlan, root: &Node) -> Result<SavedCredentials, SaveError> {
        let credentials = extract_credentials(plan, root, self.classifier.config().walk_limits())?;
        self.store.persist(credentials.clone())?;
        Ok(credentials)
    }
}
