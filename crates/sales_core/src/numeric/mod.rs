use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Change, FlatRecord};

static RE_PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)%").expect("percent pattern"));

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Percentage,
    Sales,
}

/// The record a numeric token was found in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumericSource {
    /// Position of the record in flattener output.
    pub ordinal: usize,
    pub product: String,
    pub product_id: String,
    pub category_path: String,
    pub change: Change,
    pub sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumericEntry {
    pub token: String,
    pub kind: TokenKind,
    pub sources: Vec<NumericSource>,
}

impl NumericEntry {
    /// The only source, when the token is unambiguous.
    pub fn unique_source(&self) -> Option<&NumericSource> {
        match self.sources.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Reverse index from literal numeric tokens to the records that produced them.
///
/// Entries keep first-insertion order; sources within an entry keep record order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct NumericIndex {
    entries: Vec<NumericEntry>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl NumericIndex {
    pub fn get(&self, token: &str) -> Option<&NumericEntry> {
        self.positions.get(token).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[NumericEntry] {
        &self.entries
    }

    pub fn percentages(&self) -> impl Iterator<Item = &NumericEntry> {
        self.entries
            .iter()
            .filter(|e| e.kind == TokenKind::Percentage)
    }

    pub fn sales(&self) -> impl Iterator<Item = &NumericEntry> {
        self.entries.iter().filter(|e| e.kind == TokenKind::Sales)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, token: String, kind: TokenKind, source: NumericSource) {
        let idx = match self.positions.get(&token) {
            Some(&i) => i,
            None => {
                self.entries.push(NumericEntry {
                    token: token.clone(),
                    kind,
                    sources: Vec::new(),
                });
                self.positions.insert(token, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[idx].sources.push(source);
    }
}

/// Every percentage mention in `text`, as written (e.g. `"12.5%"`).
pub fn extract_percentages(text: &str) -> Vec<String> {
    RE_PERCENT
        .captures_iter(text)
        .map(|c| format!("{}%", &c[1]))
        .collect()
}

/// Decimal rendering with comma thousands separators: `2850` -> `"2,850"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn build_index(records: &[FlatRecord]) -> NumericIndex {
    let mut index = NumericIndex::default();

    for (ordinal, record) in records.iter().enumerate() {
        let source = NumericSource {
            ordinal,
            product: record.product.clone(),
            product_id: record.product_id(),
            category_path: record.category_path(),
            change: record.change,
            sales: record.sales,
        };

        for token in extract_percentages(&record.description) {
            index.push(token, TokenKind::Percentage, source.clone());
        }
        index.push(format_thousands(record.sales), TokenKind::Sales, source);
    }

    debug!(
        records = records.len(),
        tokens = index.len(),
        "built numeric index"
    );
    index
}
