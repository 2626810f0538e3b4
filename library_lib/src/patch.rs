//! JSON Patch (RFC 6902) application over the editable view of a book.
//!
//! Only the top-level members of [`BookForUpdate`] are addressable. Member
//! names in paths match case-insensitively. Failures are reported as
//! validation failures so they surface as 422 alongside model errors.

use library_api::types::BookForUpdate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::ValidationFailure;

const PATCH_DOCUMENT: &str = "JsonPatchDocument";

/// A single patch operation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

/// An ordered list of operations, applied all-or-nothing.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

impl PatchDocument {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self(operations)
    }

    /// Applies the document to `target`, returning the patched copy.
    pub fn apply(&self, target: &BookForUpdate) -> Result<BookForUpdate, Vec<ValidationFailure>> {
        let mut document = match serde_json::to_value(target) {
            Ok(Value::Object(map)) => map,
            _ => return Err(vec![failure("target could not be represented as an object")]),
        };
        for operation in &self.0 {
            apply_operation(&mut document, operation).map_err(|message| vec![failure(&message)])?;
        }
        serde_json::from_value(Value::Object(document))
            .map_err(|e| vec![failure(&format!("patched document is invalid: {}", e))])
    }
}

fn failure(message: &str) -> ValidationFailure {
    ValidationFailure::new(PATCH_DOCUMENT, message)
}

/// Resolves a pointer like `/title` to the existing member name it addresses.
fn member(document: &Map<String, Value>, pointer: &str) -> Result<String, String> {
    let segment = pointer
        .strip_prefix('/')
        .filter(|s| !s.is_empty() && !s.contains('/'))
        .ok_or_else(|| format!("the path '{}' does not address a member", pointer))?;
    let segment = segment.replace("~1", "/").replace("~0", "~");
    document
        .keys()
        .find(|k| k.eq_ignore_ascii_case(&segment))
        .cloned()
        .ok_or_else(|| {
            format!(
                "the target location specified by path segment '{}' was not found",
                segment
            )
        })
}

fn apply_operation(document: &mut Map<String, Value>, operation: &PatchOperation) -> Result<(), String> {
    match operation {
        PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
            let key = member(document, path)?;
            document.insert(key, value.clone());
        }
        PatchOperation::Remove { path } => {
            let key = member(document, path)?;
            document.insert(key, Value::Null);
        }
        PatchOperation::Move { from, path } => {
            let source = member(document, from)?;
            let target = member(document, path)?;
            let value = document.get(&source).cloned().unwrap_or(Value::Null);
            document.insert(source, Value::Null);
            document.insert(target, value);
        }
        PatchOperation::Copy { from, path } => {
            let source = member(document, from)?;
            let target = member(document, path)?;
            let value = document.get(&source).cloned().unwrap_or(Value::Null);
            document.insert(target, value);
        }
        PatchOperation::Test { path, value } => {
            let key = member(document, path)?;
            if document.get(&key) != Some(value) {
                return Err(format!("the current value at '{}' is not equal to the test value", path));
            }
        }
    }
    Ok(())
}
