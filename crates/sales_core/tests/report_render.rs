use std::collections::BTreeSet;

use sales_core::annotate::annotate;
use sales_core::flatten::flatten;
use sales_core::footnotes::assign_footnotes;
use sales_core::ingest::{collect_categories, dataset_fingerprint, parse_dataset};
use sales_core::numeric::build_index;
use sales_core::report::{render_report, ReportView};

#[test]
fn report_contains_anchors_legend_and_sources() {
    let json = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../fixtures/sample/living.json"
    ));
    let root = parse_dataset(json).unwrap();
    let records = flatten(&root);
    let index = build_index(&records);
    let footnotes = assign_footnotes(&records);
    let categories = collect_categories(&root);
    let raw = "TV 시장에서 A가 15% 증가했다.";
    let annotated = annotate(raw, &footnotes, &index);
    let sha = dataset_fingerprint(json);
    let summaries = vec!["A 요약".to_string(), "B 요약".to_string()];

    let md = render_report(&ReportView {
        dataset_sha256: &sha,
        generated_at: None,
        categories: &categories,
        records: &records,
        index: &index,
        footnotes: &footnotes,
        individual_summaries: &summaries,
        raw_summary: raw,
        annotated_summary: &annotated,
        warnings: &[],
    });

    assert!(md.contains(&format!("`{sha}`")));
    assert!(md.contains("<div id=\"A\"></div>"));
    assert!(md.contains("<div id=\"B\"></div>"));
    assert!(md.contains(&annotated));
    assert!(md.contains("_수치 출처 정보와 주석이 자동으로 추가되었습니다._"));
    assert!(md.contains("[1] 생활: 전체적으로 시장이 안정적이며"));
    assert!(md.contains("[3] 생활 > 가전제품 > TV: "));
    assert!(md.contains("**15%:**\n- A (생활 > 가전제품 > TV)\n"));
    assert!(md.contains("- **매출:** 1,150\n"));
    assert!(md.contains("1. A 요약\n2. B 요약\n"));
    assert!(!md.contains("## 데이터 검증 경고"));
}

#[test]
fn report_is_deterministic() {
    let records = Vec::new();
    let index = build_index(&records);
    let footnotes = assign_footnotes(&records);
    let categories = BTreeSet::new();
    let view = ReportView {
        dataset_sha256: "abc",
        generated_at: None,
        categories: &categories,
        records: &records,
        index: &index,
        footnotes: &footnotes,
        individual_summaries: &[],
        raw_summary: "no data",
        annotated_summary: "no data",
        warnings: &[],
    };
    let a = render_report(&view);
    assert_eq!(a, render_report(&view));
    assert!(!a.contains("자동으로 추가"));
}
