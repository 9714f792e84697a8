use std::collections::BTreeSet;

use sales_core::annotate::annotate;
use sales_core::domain::{CategoryNode, FlatRecord, ValidationWarning};
use sales_core::error::AppError;
use sales_core::flatten::flatten;
use sales_core::footnotes::{assign_footnotes, FootnoteMap};
use sales_core::ingest::{collect_categories, parse_dataset};
use sales_core::numeric::{build_index, NumericIndex};
use sales_core::report::ReportView;
use sales_core::validate::validate_dataset;
use serde::Serialize;
use tracing::{debug, info};

use crate::summarizer::Summarizer;

pub mod prompts;

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    /// Ask the model to tag each number with its product name.
    pub structured_output: bool,
}

/// Everything produced by one run, handed to the presentation layer as-is.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub records: Vec<FlatRecord>,
    pub index: NumericIndex,
    pub footnotes: FootnoteMap,
    pub categories: BTreeSet<String>,
    pub warnings: Vec<ValidationWarning>,
    pub individual_summaries: Vec<String>,
    pub raw_summary: String,
    pub annotated_summary: String,
}

impl AnalysisOutcome {
    pub fn report_view<'a>(
        &'a self,
        dataset_sha256: &'a str,
        generated_at: Option<&'a str>,
    ) -> ReportView<'a> {
        ReportView {
            dataset_sha256,
            generated_at,
            categories: &self.categories,
            records: &self.records,
            index: &self.index,
            footnotes: &self.footnotes,
            individual_summaries: &self.individual_summaries,
            raw_summary: &self.raw_summary,
            annotated_summary: &self.annotated_summary,
            warnings: &self.warnings,
        }
    }
}

/// Parse, then analyze. A malformed dataset fails here, before any summarizer call.
pub fn analyze_json(
    json: &str,
    summarizer: &dyn Summarizer,
    options: AnalysisOptions,
) -> Result<AnalysisOutcome, AppError> {
    let root = parse_dataset(json)?;
    Ok(analyze(&root, summarizer, options))
}

/// Flatten, index, number the categories, summarize each product and then the whole set,
/// and annotate the overall summary.
///
/// Summarizer calls are sequential: one per record, then one aggregate.
pub fn analyze(
    root: &CategoryNode,
    summarizer: &dyn Summarizer,
    options: AnalysisOptions,
) -> AnalysisOutcome {
    let warnings = validate_dataset(root);
    let records = flatten(root);
    let index = build_index(&records);
    let footnotes = assign_footnotes(&records);
    let categories = collect_categories(root);

    info!(
        records = records.len(),
        tokens = index.len(),
        footnotes = footnotes.len(),
        warnings = warnings.len(),
        "starting analysis"
    );

    let mut individual_summaries = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let line = prompts::summary_input_line(record);
        let summary = summarizer.summarize(&prompts::record_summary_prompt(&line));
        debug!(ordinal = i, product = %record.product, "record summarized");
        individual_summaries.push(summary);
    }

    let category_list = categories.iter().cloned().collect::<Vec<_>>().join(", ");
    let overall_prompt = prompts::overall_summary_prompt(
        &individual_summaries.join("\n"),
        &category_list,
        options.structured_output,
    );
    let raw_summary = summarizer.summarize(&overall_prompt);
    let annotated_summary = annotate(&raw_summary, &footnotes, &index);

    info!(
        annotated = annotated_summary != raw_summary,
        "analysis finished"
    );

    AnalysisOutcome {
        records,
        index,
        footnotes,
        categories,
        warnings,
        individual_summaries,
        raw_summary,
        annotated_summary,
    }
}
