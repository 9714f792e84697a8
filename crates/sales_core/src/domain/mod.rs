use serde::{Deserialize, Serialize};

/// Separator used when a category path is rendered or used as a lookup key.
pub const PATH_SEPARATOR: &str = " > ";

/// One node of the input category tree.
///
/// Every key is optional at every level; a node without `category` contributes nothing to the
/// path of its descendants. The tree is read-only input and is never mutated by the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryNode {
    #[serde(rename = "category", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "subcategories", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<ProductMetric>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Increase,
    Decrease,
    Stable,
}

impl Change {
    pub fn as_str(self) -> &'static str {
        match self {
            Change::Increase => "increase",
            Change::Decrease => "decrease",
            Change::Stable => "stable",
        }
    }
}

/// Leaf-level product entry. Owned by exactly one `CategoryNode`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductMetric {
    pub product: String,
    pub sales: i64,
    pub change: Change,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A product with the category context it was found under.
///
/// `path` and `path_comments` are built from the same root-to-node chain, but only nodes with a
/// non-empty comment contribute to `path_comments`, so the two lengths may differ.
/// `comment_slots` keeps one entry per node that carried a `comment` at all, blank ones
/// included as empty strings; the legend counts depth against it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlatRecord {
    pub path: Vec<String>,
    pub path_comments: Vec<String>,
    #[serde(default)]
    pub comment_slots: Vec<String>,
    pub product: String,
    pub sales: i64,
    pub change: Change,
    pub description: String,
    pub comment: Option<String>,
}

impl FlatRecord {
    pub fn category_path(&self) -> String {
        self.path.join(PATH_SEPARATOR)
    }

    pub fn product_id(&self) -> String {
        product_id(&self.product)
    }
}

/// Anchor identifier for a product.
///
/// Renderers that emit per-product anchors must use this exact rule so that source links
/// produced by the annotator resolve.
pub fn product_id(product: &str) -> String {
    product.replace([' ', '/'], "_")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationWarning {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl ValidationWarning {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
