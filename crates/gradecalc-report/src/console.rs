//! Console report.
//!
//! Section order: extracted entries (document runs only), excluded entries
//! and the without-grade reconciliation, credit summary, overall average,
//! per-term averages, grade histogram, then one detail table per term.

use std::fmt::Write;

use comfy_table::{Cell, CellAlignment, Table};

use gradecalc_core::engine::RunOutput;
use gradecalc_core::lexicon::{localize, Key, Locale};
use gradecalc_core::model::{format_grade, GradeRecord, TranscriptSnapshot};
use gradecalc_core::statistics::{
    AggregateReport, CreditSummary, GradeCount, TermStats, UngradedReconciliation,
};

fn number(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

fn optional_grade(grade: Option<f64>) -> Cell {
    number(grade.map(format_grade).unwrap_or_default())
}

/// All columns of the given records.
pub fn records_table(records: &[&GradeRecord], locale: Locale) -> Table {
    let mut table = Table::new();
    table.set_header(
        Key::COLUMNS
            .iter()
            .map(|key| localize(locale, *key))
            .collect::<Vec<_>>(),
    );

    for r in records {
        table.add_row(vec![
            Cell::new(&r.exam_code),
            Cell::new(&r.description),
            Cell::new(&r.term),
            number(r.attempt),
            optional_grade(r.grade),
            Cell::new(r.status.as_ref().map(|s| s.label(locale)).unwrap_or("")),
            number(r.credit.map(|c| c.to_string()).unwrap_or_default()),
            Cell::new(r.remark.as_deref().unwrap_or("")),
            Cell::new(r.category.map(|c| c.tag()).unwrap_or("")),
        ]);
    }
    table
}

/// Exam code, description, grade and credit of the given records.
pub fn detail_table(records: &[&GradeRecord], locale: Locale) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        localize(locale, Key::ExamCode),
        localize(locale, Key::Description),
        localize(locale, Key::Grade),
        localize(locale, Key::Credit),
    ]);

    for r in records {
        table.add_row(vec![
            Cell::new(&r.exam_code),
            Cell::new(&r.description),
            optional_grade(r.grade),
            number(r.credit.map(|c| c.to_string()).unwrap_or_default()),
        ]);
    }
    table
}

/// Required, without-grade, with-grade and open credits.
pub fn credit_table(summary: &CreditSummary, locale: Locale) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        localize(locale, Key::ShortDescription),
        localize(locale, Key::Credit),
    ]);

    let with_grade = format!(
        "{} ({} {})",
        localize(locale, Key::WithGrade),
        summary.graded_count,
        localize(locale, Key::Grades)
    );
    table.add_row(vec![
        Cell::new(localize(locale, Key::Required)),
        number(summary.required),
    ]);
    table.add_row(vec![
        Cell::new(localize(locale, Key::WithoutGrade)),
        number(summary.without_grade),
    ]);
    table.add_row(vec![Cell::new(with_grade), number(summary.with_grade)]);
    table.add_row(vec![
        Cell::new(localize(locale, Key::Open)),
        number(summary.open),
    ]);
    table
}

/// `<label>: <average>`, or an explicit annotation when it is undefined.
pub fn average_line(report: &AggregateReport, locale: Locale) -> String {
    let label = localize(locale, Key::OverallAverage);
    match report.overall_average() {
        Ok(average) => format!("{label}: {average}"),
        Err(_) => format!("{label}: {}", localize(locale, Key::Undefined)),
    }
}

/// Term, weighted average and credit sum per term.
pub fn term_table(terms: &[TermStats], locale: Locale) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        localize(locale, Key::Term),
        localize(locale, Key::Average),
        localize(locale, Key::Credit),
    ]);

    for t in terms {
        let average = match t.average {
            Some(avg) => avg.to_string(),
            None => "-".to_string(),
        };
        table.add_row(vec![Cell::new(&t.term), number(average), number(t.credits)]);
    }
    table
}

/// Grade and number of occurrences.
pub fn histogram_table(histogram: &[GradeCount], locale: Locale) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        localize(locale, Key::Grade),
        localize(locale, Key::NumberOf),
    ]);

    for c in histogram {
        table.add_row(vec![number(format_grade(c.grade)), number(c.count)]);
    }
    table
}

/// `<label>: <budget> - <used> = <remaining>`.
pub fn reconciliation_line(rec: &UngradedReconciliation, locale: Locale) -> String {
    format!(
        "{}: {} - {} = {}",
        localize(locale, Key::StillRequiredWithoutGrade),
        rec.budget,
        rec.used,
        rec.remaining
    )
}

fn excluded_records(snapshot: &TranscriptSnapshot) -> Vec<&GradeRecord> {
    snapshot.partition().1
}

/// Render a whole run as console text.
pub fn render_console(output: &RunOutput, locale: Locale) -> String {
    let mut out = String::new();
    let report = &output.report;

    if let Some(extracted) = &output.extracted {
        let all: Vec<&GradeRecord> = extracted.records.iter().collect();
        let _ = writeln!(out, "{}", records_table(&all, locale));
    }

    if let Some(rec) = &report.ungraded {
        let _ = writeln!(out, "\n{}:", localize(locale, Key::NotIncludedEntries));
        let _ = writeln!(
            out,
            "{}",
            records_table(&excluded_records(&output.snapshot), locale)
        );
        let _ = writeln!(out, "\n{}", reconciliation_line(rec, locale));
    }

    let _ = writeln!(out, "\n{}", credit_table(&report.credits, locale));
    let _ = writeln!(out, "\n{}", average_line(report, locale));

    if !report.terms.is_empty() {
        let _ = writeln!(out, "\n{}", term_table(&report.terms, locale));
    }
    if !report.histogram.is_empty() {
        let _ = writeln!(out, "\n{}", histogram_table(&report.histogram, locale));
    }

    let eligible = output.snapshot.eligible_graded();
    for term in output.snapshot.terms() {
        let rows: Vec<&GradeRecord> = eligible
            .iter()
            .copied()
            .filter(|r| r.term == term)
            .collect();
        if rows.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{term}:");
        let _ = writeln!(out, "{}", detail_table(&rows, locale));
    }

    out
}
