use std::cmp::Reverse;
use std::ops::Range;

use tracing::debug;

use crate::footnotes::{leaf_name, FootnoteMap};
use crate::numeric::{NumericIndex, NumericSource};

/// Opening of every source marker; also how already-linked numbers are recognised.
pub const SOURCE_LINK_PREFIX: &str = "<a href=\"#";
const SOURCE_LINK_CLOSE: &str = "</a>";

pub fn footnote_marker(number: u32) -> String {
    format!("[{number}]")
}

pub fn source_marker(source: &NumericSource) -> String {
    format!(
        "{SOURCE_LINK_PREFIX}{}\" style=\"color: #1f77b4; text-decoration: none;\">[{}]{SOURCE_LINK_CLOSE}",
        source.product_id, source.product
    )
}

/// Annotate generated prose with category footnotes and numeric source links.
///
/// Category names are handled first, longest path first, then percentages, then sales figures.
/// Only the first free occurrence of each name or number is marked. Numbers with more than one
/// source record are left alone. Running this on its own output adds nothing.
pub fn annotate(text: &str, footnotes: &FootnoteMap, index: &NumericIndex) -> String {
    let mut plan = EditPlan::new(text);
    plan_category_footnotes(&mut plan, footnotes);
    plan_numeric_links(&mut plan, index);
    debug!(edits = plan.edits.len(), "annotated summary text");
    plan.apply()
}

fn plan_category_footnotes(plan: &mut EditPlan<'_>, footnotes: &FootnoteMap) {
    let mut paths: Vec<(&str, u32)> = footnotes.numbered().collect();
    // Stable: equal lengths keep ascending path order.
    paths.sort_by_key(|(path, _)| Reverse(path.chars().count()));

    let mut marked: Vec<&str> = Vec::new();
    for (path, number) in paths {
        let leaf = leaf_name(path);
        if leaf.is_empty() {
            continue;
        }

        let bracketed = format!("{leaf}[");
        if plan.text.contains(&bracketed) {
            // Already annotated by an earlier pass; keep its spans out of reach of shorter names.
            plan.protect_all(&bracketed, leaf.len());
            continue;
        }
        if marked.iter().any(|m| m.ends_with(leaf)) {
            continue;
        }

        if let Some(start) = plan.first_free(leaf, |_, _| true) {
            plan.claim(start..start + leaf.len(), footnote_marker(number));
            marked.push(leaf);
        }
    }
}

fn plan_numeric_links(plan: &mut EditPlan<'_>, index: &NumericIndex) {
    let candidates = index
        .percentages()
        .chain(index.sales().filter(|e| e.token.contains(',')));

    for entry in candidates {
        let Some(source) = entry.unique_source() else {
            continue;
        };
        let token = entry.token.as_str();
        if plan.text.contains(&format!("{token}{SOURCE_LINK_PREFIX}")) {
            continue;
        }
        if let Some(start) = plan.first_free(token, at_numeric_boundary) {
            plan.claim(start..start + token.len(), source_marker(source));
        }
    }
}

/// True when `range` is a whole number in `text`, not a piece of a longer one
/// (`5%` inside `15%`, `2,850` inside `12,850` or `2,850,000`).
fn at_numeric_boundary(text: &str, range: Range<usize>) -> bool {
    let before = text[..range.start].chars().next_back();
    if matches!(before, Some(c) if c.is_numeric() || c == '.' || c == ',') {
        return false;
    }
    if text[range.clone()].ends_with('%') {
        return true;
    }

    let mut after = text[range.end..].chars();
    match (after.next(), after.next()) {
        (Some(c), _) if c.is_numeric() => false,
        (Some(',' | '.'), Some(d)) if d.is_numeric() => false,
        _ => true,
    }
}

/// Insertions planned against the original text and applied in one pass.
struct EditPlan<'a> {
    text: &'a str,
    claimed: Vec<Range<usize>>,
    edits: Vec<(usize, String)>,
}

impl<'a> EditPlan<'a> {
    fn new(text: &'a str) -> Self {
        let mut plan = Self {
            text,
            claimed: Vec::new(),
            edits: Vec::new(),
        };
        plan.protect_existing_links();
        plan
    }

    fn protect_existing_links(&mut self) {
        let mut from = 0;
        while let Some(pos) = self.text[from..].find(SOURCE_LINK_PREFIX) {
            let start = from + pos;
            let end = match self.text[start..].find(SOURCE_LINK_CLOSE) {
                Some(rel) => start + rel + SOURCE_LINK_CLOSE.len(),
                None => self.text.len(),
            };
            self.claimed.push(start..end);
            from = end;
        }
    }

    /// Mark every `needle` occurrence's first `len` bytes as taken without editing.
    fn protect_all(&mut self, needle: &str, len: usize) {
        let spans: Vec<Range<usize>> = self
            .text
            .match_indices(needle)
            .map(|(start, _)| start..start + len)
            .collect();
        self.claimed.extend(spans);
    }

    fn is_free(&self, range: &Range<usize>) -> bool {
        self.claimed
            .iter()
            .all(|c| c.end <= range.start || range.end <= c.start)
    }

    fn first_free(&self, needle: &str, accept: impl Fn(&str, Range<usize>) -> bool) -> Option<usize> {
        self.text
            .match_indices(needle)
            .map(|(start, m)| start..start + m.len())
            .find(|r| self.is_free(r) && accept(self.text, r.clone()))
            .map(|r| r.start)
    }

    fn claim(&mut self, range: Range<usize>, insertion: String) {
        self.edits.push((range.end, insertion));
        self.claimed.push(range);
    }

    fn apply(mut self) -> String {
        self.edits.sort_by_key(|(at, _)| *at);
        let extra: usize = self.edits.iter().map(|(_, s)| s.len()).sum();
        let mut out = String::with_capacity(self.text.len() + extra);
        let mut cursor = 0;
        for (at, insertion) in &self.edits {
            out.push_str(&self.text[cursor..*at]);
            out.push_str(insertion);
            cursor = *at;
        }
        out.push_str(&self.text[cursor..]);
        out
    }
}
