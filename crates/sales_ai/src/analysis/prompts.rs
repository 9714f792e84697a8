use sales_core::domain::FlatRecord;

/// One-line description of a record fed to the per-product prompt.
pub fn summary_input_line(record: &FlatRecord) -> String {
    format!(
        "카테고리 경로: {}, 경로 코멘트: {}, 상품: {}, 변화: {}, 설명: {}, 매출: {}, 상품 코멘트: {}",
        record.category_path(),
        record.path_comments.join(" / "),
        record.product,
        record.change.as_str(),
        record.description,
        record.sales,
        record.comment.as_deref().unwrap_or(""),
    )
}

pub fn record_summary_prompt(input_line: &str) -> String {
    format!(
        "다음 상품 매출 데이터를 한 문장으로 요약하세요. 반드시 카테고리 경로(depth 전체)와 각 경로 및 상품별 코멘트가 반영되어야 합니다:\n{input_line}"
    )
}

pub fn overall_summary_prompt(
    individual_summaries: &str,
    category_list: &str,
    structured_output: bool,
) -> String {
    let mut prompt = format!(
        r#"아래는 각 상품 및 카테고리 경로별 요약입니다:
{individual_summaries}

분석 대상 카테고리: {category_list}

모든 카테고리별 핵심 트렌드와 특징을 포함하여 전체 시장 동향을 3-4문장으로 요약하세요.
반드시 주요 수치(퍼센트 증감률, 매출액 등)를 포함하여 구체적으로 작성하세요."#
    );

    if structured_output {
        prompt.push_str(
            r#"

각 수치 정보(퍼센트, 매출액 등)를 언급할 때는 다음 형식을 사용하세요:
- 퍼센트: "25% 증가[제품명]"
- 매출액: "2,850만원[제품명]"
각 카테고리명을 언급할 때는 구체적인 카테고리 이름을 사용하세요."#,
        );
    } else {
        prompt.push_str("\n각 카테고리명을 언급할 때는 구체적인 카테고리 이름을 사용하세요.");
    }
    prompt
}
