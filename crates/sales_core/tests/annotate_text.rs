use pretty_assertions::assert_eq;
use sales_core::annotate::{annotate, source_marker};
use sales_core::domain::{Change, FlatRecord};
use sales_core::flatten::flatten;
use sales_core::footnotes::assign_footnotes;
use sales_core::ingest::parse_dataset;
use sales_core::numeric::build_index;

fn record(product: &str, path: &[&str], sales: i64, description: &str) -> FlatRecord {
    FlatRecord {
        path: path.iter().map(|s| s.to_string()).collect(),
        path_comments: vec![],
        comment_slots: vec![],
        product: product.to_string(),
        sales,
        change: Change::Increase,
        description: description.to_string(),
        comment: None,
    }
}

fn living_records() -> Vec<FlatRecord> {
    let json = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../fixtures/sample/living.json"
    ));
    flatten(&parse_dataset(json).unwrap())
}

#[test]
fn unique_percentage_gets_a_source_link() {
    let records = vec![record("A", &["TV"], 1150, "신제품 출시로 15% 증가")];
    let index = build_index(&records);
    let footnotes = assign_footnotes(&[]);

    let out = annotate("매출이 15% 증가했다.", &footnotes, &index);
    let marker = source_marker(index.get("15%").unwrap().unique_source().unwrap());
    assert_eq!(out, format!("매출이 15%{marker} 증가했다."));
    assert!(marker.contains("href=\"#A\""));
    assert!(marker.contains("[A]"));
}

#[test]
fn ambiguous_percentage_is_left_unmarked() {
    let records = vec![
        record("P1", &["모바일기기", "태블릿"], 2650, "전문가용 기능으로 20% 증가"),
        record("P2", &["컴퓨터", "노트북"], 1700, "신규 수요로 20% 증가"),
    ];
    let index = build_index(&records);
    let text = "두 제품 모두 20% 증가했다.";
    assert_eq!(annotate(text, &assign_footnotes(&[]), &index), text);
}

#[test]
fn percentage_repeated_in_one_description_is_left_unmarked() {
    let records = vec![record("A", &["생활", "TV"], 1150, "15% 증가, 전년 대비 15%")];
    let index = build_index(&records);
    let out = annotate("매출 15% 증가, 1,150 달성", &assign_footnotes(&[]), &index);
    assert!(out.starts_with("매출 15% 증가, 1,150<a href=\"#A\""));
}

#[test]
fn sales_without_thousands_separator_are_not_linked() {
    let records = vec![record("B", &["TV"], 840, "경쟁 심화로 8% 감소")];
    let index = build_index(&records);
    let out = annotate("B는 840 판매.", &assign_footnotes(&[]), &index);
    assert_eq!(out, "B는 840 판매.");
}

#[test]
fn only_first_occurrence_is_marked() {
    let records = living_records();
    let index = build_index(&records);
    let footnotes = assign_footnotes(&records);

    let out = annotate("TV 매출 1,150 기록, TV 시장 1,150 유지.", &footnotes, &index);
    assert_eq!(out.matches("TV[3]").count(), 1);
    assert!(out.starts_with("TV[3] 매출 1,150<a href=\"#A\""));
    assert!(out.ends_with("TV 시장 1,150 유지."));
}

#[test]
fn category_footnotes_and_numbers_together() {
    let records = living_records();
    let index = build_index(&records);
    let footnotes = assign_footnotes(&records);

    let text = "생활 부문 가전제품 중 TV는 A가 15% 증가했고 B는 8% 감소했다.";
    let out = annotate(text, &footnotes, &index);
    let a = source_marker(index.get("15%").unwrap().unique_source().unwrap());
    let b = source_marker(index.get("8%").unwrap().unique_source().unwrap());
    assert_eq!(
        out,
        format!("생활[1] 부문 가전제품[2] 중 TV[3]는 A가 15%{a} 증가했고 B는 8%{b} 감소했다.")
    );
}

#[test]
fn shorter_name_does_not_match_inside_longer_one() {
    let records = vec![
        record("p1", &["가전", "가전제품"], 1, "x"),
    ];
    let footnotes = assign_footnotes(&records);
    // "가전 > 가전제품" (2) is longer than "가전" (1) and is placed first.
    let out = annotate("가전제품 시장", &footnotes, &build_index(&[]));
    assert_eq!(out, "가전제품[2] 시장");
}

#[test]
fn embedded_numbers_are_not_linked() {
    let records = vec![record("A", &["TV"], 2850, "5% 증가")];
    let index = build_index(&records);
    let text = "15% 상승, 매출 12,850 및 2,850,000";
    assert_eq!(annotate(text, &assign_footnotes(&[]), &index), text);
}

#[test]
fn annotating_twice_adds_nothing() {
    let records = living_records();
    let index = build_index(&records);
    let footnotes = assign_footnotes(&records);

    let text = "생활 가전제품의 TV 시장에서 A는 15% 증가(1,150), B는 8% 감소. TV 전망 밝음.";
    let once = annotate(text, &footnotes, &index);
    let twice = annotate(&once, &footnotes, &index);
    assert_eq!(twice, once);
}

#[test]
fn text_without_matches_passes_through() {
    let records = living_records();
    let index = build_index(&records);
    let footnotes = assign_footnotes(&records);
    let err = "요약 호출 중 오류 발생: [AI_SUMMARY_FAILED] connection refused";
    assert_eq!(annotate(err, &footnotes, &index), err);
    assert_eq!(annotate("", &footnotes, &index), "");
}

#[test]
fn empty_maps_are_a_no_op() {
    let text = "TV 15% 1,150";
    assert_eq!(annotate(text, &assign_footnotes(&[]), &build_index(&[])), text);
}
