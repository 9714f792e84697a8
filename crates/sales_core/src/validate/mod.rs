use std::collections::BTreeMap;

use tracing::warn;

use crate::domain::{product_id, CategoryNode, Change, ValidationWarning};
use crate::numeric::extract_percentages;

/// Data-quality checks on a parsed dataset.
///
/// Nothing here blocks a run; structural problems are already rejected by parsing. The
/// warnings surface things that make the annotated output misleading, e.g. two products
/// sharing an anchor so a source link cannot tell them apart.
pub fn validate_dataset(root: &CategoryNode) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut anchors: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if let Some(name) = node.name.as_deref() {
            if name.trim().is_empty() {
                warnings.push(ValidationWarning::new(
                    "VALIDATION_EMPTY_CATEGORY",
                    "Category name is empty",
                ));
            }
        }

        for m in &node.metrics {
            let category = node.name.as_deref().unwrap_or("UNKNOWN");
            if m.product.trim().is_empty() {
                warnings.push(
                    ValidationWarning::new("VALIDATION_EMPTY_PRODUCT", "Product name is empty")
                        .with_details(format!("category={category}")),
                );
            }
            if m.sales < 0 {
                warnings.push(
                    ValidationWarning::new("VALIDATION_NEGATIVE_SALES", "Sales value is negative")
                        .with_details(format!("product={}; sales={}", m.product, m.sales)),
                );
            }
            if m.change == Change::Stable && !extract_percentages(&m.description).is_empty() {
                warnings.push(
                    ValidationWarning::new(
                        "VALIDATION_STABLE_WITH_PERCENT",
                        "Product marked stable but its description states a percentage",
                    )
                    .with_details(format!("product={}", m.product)),
                );
            }
            anchors
                .entry(product_id(&m.product))
                .or_default()
                .push(m.product.clone());
        }

        stack.extend(node.children.iter().rev());
    }

    for (anchor, products) in anchors {
        if products.len() > 1 {
            warnings.push(
                ValidationWarning::new(
                    "VALIDATION_DUPLICATE_ANCHOR",
                    "Several products share one anchor; source links are ambiguous",
                )
                .with_details(format!("anchor={anchor}; products={}", products.join(", "))),
            );
        }
    }

    for w in &warnings {
        warn!(code = %w.code, details = ?w.details, "{}", w.message);
    }
    warnings
}
