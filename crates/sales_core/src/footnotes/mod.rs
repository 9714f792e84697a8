use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{FlatRecord, PATH_SEPARATOR};

const LEGEND_FALLBACK: &str = "상위 카테고리 정보";

/// Footnote numbers for every category path prefix found in the records.
///
/// `by_path` is numbered `1..=K` in ascending lexicographic order of the joined path.
/// `by_leaf` maps a bare category name to the number of the first path (in that same order)
/// ending in it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FootnoteMap {
    pub by_path: BTreeMap<String, u32>,
    pub by_leaf: BTreeMap<String, u32>,
}

impl FootnoteMap {
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Exact path match first, then the leaf-name fallback.
    pub fn number_for(&self, key: &str) -> Option<u32> {
        self.by_path
            .get(key)
            .or_else(|| self.by_leaf.get(key))
            .copied()
    }

    /// `(path, number)` pairs in footnote-number order.
    pub fn numbered(&self) -> impl Iterator<Item = (&str, u32)> {
        // BTreeMap order is the assignment order.
        self.by_path.iter().map(|(p, n)| (p.as_str(), *n))
    }
}

/// Last segment of a joined category path.
pub fn leaf_name(path: &str) -> &str {
    path.rsplit(PATH_SEPARATOR).next().unwrap_or(path)
}

pub fn assign_footnotes(records: &[FlatRecord]) -> FootnoteMap {
    let mut paths: BTreeSet<String> = BTreeSet::new();
    for record in records {
        for depth in 1..=record.path.len() {
            paths.insert(record.path[..depth].join(PATH_SEPARATOR));
        }
    }

    let mut map = FootnoteMap::default();
    for (i, path) in paths.into_iter().enumerate() {
        let number = (i + 1) as u32;
        map.by_leaf
            .entry(leaf_name(&path).to_string())
            .or_insert(number);
        map.by_path.insert(path, number);
    }

    debug!(footnotes = map.len(), "assigned category footnotes");
    map
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegendEntry {
    pub number: u32,
    pub path: String,
    pub comment: String,
}

/// Numbered category legend.
///
/// Each entry carries the comments of the first record filed under that path, cut to the
/// path's depth and then stripped of blanks. Depth counts commented nodes, so a category with
/// no `comment` key at all shifts the ones below it, while `"comment": ""` holds its place.
pub fn legend(records: &[FlatRecord], footnotes: &FootnoteMap) -> Vec<LegendEntry> {
    footnotes
        .numbered()
        .map(|(path, number)| {
            let parts: Vec<&str> = path.split(PATH_SEPARATOR).collect();
            let comments = records
                .iter()
                .find(|r| {
                    r.path.len() >= parts.len()
                        && r.path.iter().zip(parts.iter()).all(|(a, b)| a == b)
                })
                .map(|r| {
                    r.comment_slots
                        .iter()
                        .take(parts.len())
                        .map(String::as_str)
                        .filter(|c| !c.is_empty())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();

            let comment = if comments.is_empty() {
                LEGEND_FALLBACK.to_string()
            } else {
                comments.join(" / ")
            };
            LegendEntry {
                number,
                path: path.to_string(),
                comment,
            }
        })
        .collect()
}
