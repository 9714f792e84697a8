use std::collections::BTreeSet;

use sha2::{Digest, Sha256};

use crate::domain::CategoryNode;
use crate::error::AppError;

/// Parse the JSON category tree.
///
/// Unknown keys are ignored. A metric missing `product`, `sales`, `change` or `description`
/// fails the whole parse, so nothing downstream (including summarizer calls) runs on a
/// partially valid tree.
pub fn parse_dataset(json: &str) -> Result<CategoryNode, AppError> {
    if json.trim().is_empty() {
        return Err(AppError::new("INPUT_JSON_INVALID", "Input dataset is empty"));
    }
    serde_json::from_str(json).map_err(|e| {
        AppError::new("INPUT_JSON_INVALID", "Input is not a valid sales dataset")
            .with_details(format!("line={}; column={}; err={e}", e.line(), e.column()))
    })
}

/// Content fingerprint of the raw input, used to tie a report back to the dataset it came from.
pub fn dataset_fingerprint(json: &str) -> String {
    hex::encode(Sha256::digest(json.as_bytes()))
}

/// Every category name in the tree, deduplicated and sorted.
pub fn collect_categories(root: &CategoryNode) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if let Some(name) = node.name.as_deref() {
            out.insert(name.to_string());
        }
        stack.extend(node.children.iter());
    }
    out
}
