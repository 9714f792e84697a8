use std::collections::BTreeSet;

use crate::domain::{FlatRecord, ValidationWarning};
use crate::footnotes::{legend, FootnoteMap};
use crate::numeric::{format_thousands, NumericIndex};

/// Everything the report needs, borrowed from one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct ReportView<'a> {
    pub dataset_sha256: &'a str,
    pub generated_at: Option<&'a str>,
    pub categories: &'a BTreeSet<String>,
    pub records: &'a [FlatRecord],
    pub index: &'a NumericIndex,
    pub footnotes: &'a FootnoteMap,
    pub individual_summaries: &'a [String],
    pub raw_summary: &'a str,
    pub annotated_summary: &'a str,
    pub warnings: &'a [ValidationWarning],
}

/// Render the analysis as Markdown with inline HTML anchors.
///
/// Every product gets a `<div id="…">` anchor using the same identifier rule the annotator
/// links to. Output is deterministic for a fixed view apart from `generated_at`.
pub fn render_report(view: &ReportView<'_>) -> String {
    let mut out = String::new();
    out.push_str("# 매출 데이터 분석 결과\n\n");
    out.push_str(&format!("- Dataset SHA-256: `{}`\n", view.dataset_sha256));
    if let Some(ts) = view.generated_at {
        out.push_str(&format!("- Generated at: {ts}\n"));
    }
    out.push_str(&format!("- Products: **{}**\n\n", view.records.len()));

    out.push_str("## 분석 카테고리\n\n");
    if view.categories.is_empty() {
        out.push_str("- None.\n");
    }
    for c in view.categories {
        out.push_str(&format!("- {c}\n"));
    }
    out.push('\n');

    out.push_str("## 전체 트렌드 요약\n\n");
    out.push_str(view.annotated_summary.trim());
    out.push_str("\n\n");
    if view.annotated_summary != view.raw_summary {
        out.push_str("_수치 출처 정보와 주석이 자동으로 추가되었습니다._\n\n");
    }

    out.push_str("## 카테고리 참조\n\n");
    let entries = legend(view.records, view.footnotes);
    if entries.is_empty() {
        out.push_str("- None.\n");
    }
    for e in &entries {
        out.push_str(&format!("[{}] {}: {}\n\n", e.number, e.path, e.comment));
    }

    out.push_str("## 개별 상품별 요약\n\n");
    for (i, s) in view.individual_summaries.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, s.trim()));
    }
    out.push('\n');

    out.push_str("## 수치 출처 매핑\n\n");
    let mut any = false;
    for entry in view.index.percentages() {
        any = true;
        out.push_str(&format!("**{}:**\n", entry.token));
        for s in &entry.sources {
            out.push_str(&format!("- {} ({})\n", s.product, s.category_path));
        }
        out.push('\n');
    }
    if !any {
        out.push_str("- None.\n\n");
    }

    out.push_str("## 추출된 메트릭\n\n");
    for r in view.records {
        out.push_str(&format!(
            "### 상품 {} - {}\n\n<div id=\"{}\"></div>\n\n",
            r.product,
            r.category_path(),
            r.product_id()
        ));
        out.push_str(&format!("- **경로:** {}\n", r.category_path()));
        out.push_str(&format!("- **매출:** {}\n", format_thousands(r.sales)));
        out.push_str(&format!("- **변화:** {}\n", r.change.as_str()));
        out.push_str(&format!("- **설명:** {}\n", r.description));
        if let Some(c) = r.comment.as_deref().filter(|c| !c.is_empty()) {
            out.push_str(&format!("- **상품 코멘트:** {c}\n"));
        }
        out.push('\n');
    }

    if !view.warnings.is_empty() {
        out.push_str("## 데이터 검증 경고\n\n");
        for w in view.warnings {
            match &w.details {
                Some(d) => out.push_str(&format!("- `{}` {} ({d})\n", w.code, w.message)),
                None => out.push_str(&format!("- `{}` {}\n", w.code, w.message)),
            }
        }
        out.push('\n');
    }

    out
}
