//! JSON rendering of a run.

use anyhow::{Context, Result};
use serde::Serialize;

use gradecalc_core::engine::RunOutput;
use gradecalc_core::lexicon::Locale;
use gradecalc_core::model::GradeRecord;
use gradecalc_core::statistics::AggregateReport;

#[derive(Serialize)]
struct JsonReport<'a> {
    locale: Locale,
    records: &'a [GradeRecord],
    excluded: Vec<&'a GradeRecord>,
    report: &'a AggregateReport,
}

/// Render the sorted records and the aggregate report as pretty JSON.
pub fn render_json(output: &RunOutput, locale: Locale) -> Result<String> {
    let json = JsonReport {
        locale,
        records: &output.snapshot.records,
        excluded: output.snapshot.partition().1,
        report: &output.report,
    };
    serde_json::to_string_pretty(&json).context("failed to serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradecalc_core::model::{Category, Status, TranscriptSnapshot};
    use gradecalc_core::statistics::CreditPolicy;

    #[test]
    fn json_contains_report_and_null_average() {
        let snapshot = TranscriptSnapshot::new(vec![GradeRecord {
            exam_code: "7654321".into(),
            description: "Ethics".into(),
            term: "SoSe23".into(),
            attempt: 1,
            grade: None,
            status: Some(Status::InProgress),
            credit: Some(3),
            remark: Some("pending".into()),
            category: Some(Category::GeneralElective),
        }]);
        let output = RunOutput {
            extracted: None,
            report: AggregateReport::compute(&snapshot, CreditPolicy::default()),
            snapshot,
        };

        let json = render_json(&output, Locale::De).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["locale"], "de");
        assert!(value["report"]["overall_average"].is_null());
        assert_eq!(value["excluded"][0]["exam_code"], "7654321");
        assert_eq!(value["report"]["ungraded"]["remaining"], 31);
        assert_eq!(value["records"][0]["category"], "general_elective");
    }
}
