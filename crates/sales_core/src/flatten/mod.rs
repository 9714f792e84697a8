use tracing::debug;

use crate::domain::{CategoryNode, FlatRecord};

/// Flatten the category tree into one record per product.
///
/// Traversal is depth-first pre-order with children in input order; a node's own metrics are
/// emitted before its children are visited. That order is what "first occurrence" means for
/// everything downstream.
pub fn flatten(root: &CategoryNode) -> Vec<FlatRecord> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    let mut slots = Vec::new();
    walk(root, &mut path, &mut slots, &mut out);
    debug!(records = out.len(), "flattened category tree");
    out
}

fn walk(
    node: &CategoryNode,
    path: &mut Vec<String>,
    slots: &mut Vec<String>,
    out: &mut Vec<FlatRecord>,
) {
    let pushed_name = match node.name.as_deref() {
        Some(name) => {
            path.push(name.to_string());
            true
        }
        None => false,
    };
    let pushed_slot = match node.comment.as_deref() {
        Some(c) => {
            slots.push(c.trim().to_string());
            true
        }
        None => false,
    };

    let path_comments: Vec<String> = slots.iter().filter(|c| !c.is_empty()).cloned().collect();
    for metric in &node.metrics {
        out.push(FlatRecord {
            path: path.clone(),
            path_comments: path_comments.clone(),
            comment_slots: slots.clone(),
            product: metric.product.clone(),
            sales: metric.sales,
            change: metric.change,
            description: metric.description.clone(),
            comment: metric.comment.clone(),
        });
    }

    for child in &node.children {
        walk(child, path, slots, out);
    }

    if pushed_slot {
        slots.pop();
    }
    if pushed_name {
        path.pop();
    }
}
