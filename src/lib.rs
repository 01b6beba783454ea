//! Login-form detection over host view-tree snapshots.
//!
//! A snapshot is walked ([`node::walker`]), each node classified
//! ([`form::classifier`]), the fields grouped into at most one login form
//! ([`form::assembler`]) and turned into fill and save plans
//! ([`plan::builder`]). [`AutofillClassifier`] is the entry point;
//! [`AutofillService`] wraps it for a host with a credential store.

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod node;
pub mod plan;
pub mod service;
pub mod store;
pub mod trace;

pub use config::AutofillConfig;
pub use error::TreeError;
pub use form::form_model::{ClassifiedField, Confidence, FieldRole, FormOrigin, LoginForm};
pub use node::node_model::{InputKind, Node, NodeAddress};
pub use plan::plan_model::{FillPlan, SavePlan};
pub use service::autofill_classifier::AutofillClassifier;
pub use service::autofill_service::AutofillService;
