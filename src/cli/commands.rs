use crate::config::AutofillConfig;
use crate::form::classifier::classify_tree;
use crate::node::node_model::Node;
use crate::plan::builder::extract_credentials;
use crate::plan::plan_model::{SavePlan, SavedCredentials};
use crate::service::autofill_classifier::AutofillClassifier;
use crate::service::autofill_service::AutofillService;
use crate::store::MemoryCredentialStore;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

/// Read a host view-tree snapshot from a JSON file.
pub fn load_tree(path: &str) -> Result<Node, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read tree {}: {}", path, e))?;
    let node = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse tree {}: {}", path, e))?;
    Ok(node)
}

// ============================================================================
// fill subcommand
// ============================================================================

/// Print the fill response as JSON. Returns whether a login form was found.
pub fn cmd_fill(
    config: AutofillConfig,
    tree_path: &str,
    origin: &str,
    store_path: Option<&str>,
    trace_path: Option<&str>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let root = load_tree(tree_path)?;
    let store = match store_path {
        Some(p) => MemoryCredentialStore::load(p)?,
        None => MemoryCredentialStore::new(),
    };
    let tracer = TraceLogger::open(trace_path);
    let classifier = AutofillClassifier::new(config);
    let event = TraceEvent::now("fill", origin);

    // A malformed tree means no suggestions, but the trace keeps the reason.
    let plan = match classifier.classify_fill_request(&root, origin) {
        Ok(Some(plan)) => plan,
        Ok(None) => {
            tracer.record(&event);
            println!("No login form found for {}", origin);
            return Ok(false);
        }
        Err(e) => {
            tracer.record(&event.with_error(&e));
            println!("No login form found for {}", origin);
            return Ok(false);
        }
    };

    let response = AutofillService::new(classifier, store).respond(plan);
    tracer.record(&event.with_form(response.plan.form(), response.plan.fingerprint()));
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(true)
}

// ============================================================================
// save subcommand
// ============================================================================

/// Print the save plan and the credentials read back from the snapshot.
///
/// With `store_path`, the credentials are persisted into that YAML store and
/// the file is written back. Without it nothing is persisted.
pub fn cmd_save(
    config: AutofillConfig,
    tree_path: &str,
    origin: &str,
    store_path: Option<&str>,
    trace_path: Option<&str>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let root = load_tree(tree_path)?;
    let tracer = TraceLogger::open(trace_path);
    let classifier = AutofillClassifier::new(config);
    let event = TraceEvent::now("save", origin);

    let plan = match classifier.classify_save_request(&root, origin) {
        Ok(Some(plan)) => plan,
        Ok(None) => {
            tracer.record(&event);
            println!("No login form found for {}", origin);
            return Ok(false);
        }
        Err(e) => {
            tracer.record(&event.with_error(&e));
            return Err(e.into());
        }
    };
    let event = event.with_form(plan.form(), plan.fingerprint());
    println!("{}", serde_json::to_string_pretty(&plan)?);

    let saved = match store_path {
        Some(path) => persist_to_file(classifier, path, &plan, &root),
        None => extract_credentials(&plan, &root, classifier.config().walk_limits())
            .map_err(Into::into),
    };

    match saved {
        Ok(saved) => {
            tracer.record(&event);
            let verb = if store_path.is_some() { "Saved" } else { "Extracted" };
            println!(
                "{} credentials for {} (username: {})",
                verb,
                saved.origin,
                saved.username.as_deref().unwrap_or("<none>")
            );
            Ok(true)
        }
        Err(e) => {
            tracer.record(&event.with_error(&e));
            Err(e)
        }
    }
}

fn persist_to_file(
    classifier: AutofillClassifier,
    path: &str,
    plan: &SavePlan,
    root: &Node,
) -> Result<SavedCredentials, Box<dyn std::error::Error>> {
    let store = MemoryCredentialStore::load_or_empty(path)?;
    let mut service = AutofillService::new(classifier, store);
    let saved = service.persist(plan, root)?;
    service.into_store().save(path)?;
    Ok(saved)
}

// ============================================================================
// inspect subcommand
// ============================================================================

pub fn cmd_inspect(config: AutofillConfig, tree_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let root = load_tree(tree_path)?;
    let tree = classify_tree(&root, config.walk_limits())?;

    println!("Classified fields ({}):", tree.fields.len());
    for node in &tree.fields {
        println!(
            "  [{}] {} {:?} (rule {}){}",
            node.order,
            node.field.address,
            node.field.role,
            node.field.confidence.rank(),
            node.form_scope
                .as_ref()
                .map(|s| format!(" in form {}", s))
                .unwrap_or_default()
        );
    }

    if !tree.web_origins.is_empty() {
        println!("Web origins: {}", tree.web_origins.join(", "));
    }

    Ok(())
}
