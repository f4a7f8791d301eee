//! Credit totals, weighted grade averages and grade distribution.
//!
//! Every function here is pure over the rows it is given. Rows without a
//! grade or credit contribute nothing to an average.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::StatisticsError;
use crate::model::{GradeRecord, TranscriptSnapshot};
use crate::ranking::sort_terms;

/// The fixed ascending grade scale of the histogram.
pub const GRADE_SCALE: [f64; 10] = [1.0, 1.3, 1.7, 2.0, 2.3, 2.7, 3.0, 3.3, 3.7, 4.0];

/// Credit targets of the degree programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPolicy {
    /// Credits required for the degree.
    pub required: u32,
    /// Credits earned in modules that are never graded.
    pub without_grade: u32,
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self {
            required: 210,
            without_grade: 34,
        }
    }
}

/// Credit totals against the required threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSummary {
    pub required: u32,
    pub without_grade: u32,
    pub with_grade: u32,
    /// Number of graded rows behind `with_grade`.
    pub graded_count: usize,
    /// Remaining credits; negative once the requirement is exceeded.
    pub open: i64,
}

/// Weighted average and credit sum of one term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStats {
    pub term: String,
    /// `None` when the term's rows carry no credit.
    pub average: Option<f64>,
    pub credits: u32,
}

/// Occurrences of one grade on the fixed scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeCount {
    pub grade: f64,
    pub count: usize,
}

/// How much of the credit-without-grade budget the ungraded rows cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UngradedReconciliation {
    pub budget: u32,
    /// Credits of the excluded rows.
    pub used: u32,
    /// `budget - used`; informational, may go negative.
    pub remaining: i64,
    /// Number of excluded rows.
    pub excluded: usize,
}

/// The derived statistics of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub credits: CreditSummary,
    /// Rounded overall average, `None` when undefined.
    pub overall_average: Option<f64>,
    pub terms: Vec<TermStats>,
    pub histogram: Vec<GradeCount>,
    /// Present only when rows were excluded for a missing grade.
    pub ungraded: Option<UngradedReconciliation>,
}

impl AggregateReport {
    /// Compute all statistics for a snapshot.
    ///
    /// Averages, credit sums and the histogram use the graded rows whose
    /// status counts; the reconciliation uses every ungraded row.
    pub fn compute(snapshot: &TranscriptSnapshot, policy: CreditPolicy) -> Self {
        let (_, ungraded) = snapshot.partition();
        let rows = snapshot.eligible_graded();

        tracing::debug!(
            records = snapshot.len(),
            eligible = rows.len(),
            ungraded = ungraded.len(),
            "computing aggregate report"
        );

        Self {
            credits: credit_summary(&rows, policy),
            overall_average: weighted_average(&rows).ok(),
            terms: term_breakdown(&rows),
            histogram: grade_histogram(&rows),
            ungraded: (!ungraded.is_empty())
                .then(|| reconcile_ungraded(&ungraded, policy.without_grade)),
        }
    }

    /// The overall average, or the reason it is undefined.
    pub fn overall_average(&self) -> Result<f64, StatisticsError> {
        self.overall_average.ok_or(StatisticsError::NoGradedCredits)
    }
}

/// Sum credits over graded rows and derive the open remainder.
pub fn credit_summary(rows: &[&GradeRecord], policy: CreditPolicy) -> CreditSummary {
    let with_grade = credit_sum(rows);
    CreditSummary {
        required: policy.required,
        without_grade: policy.without_grade,
        with_grade,
        graded_count: rows.len(),
        open: i64::from(policy.required) - (i64::from(with_grade) + i64::from(policy.without_grade)),
    }
}

/// Credit-weighted average grade, rounded to two decimals.
///
/// Returns [`StatisticsError::NoGradedCredits`] when the rows hold no credit.
pub fn weighted_average(rows: &[&GradeRecord]) -> Result<f64, StatisticsError> {
    let (weighted, credits) = rows
        .iter()
        .filter_map(|r| Some((r.grade?, f64::from(r.credit?))))
        .fold((0.0, 0.0), |(sum, total), (grade, credit)| {
            (sum + grade * credit, total + credit)
        });

    if credits == 0.0 {
        return Err(StatisticsError::NoGradedCredits);
    }
    Ok(round2(weighted / credits))
}

/// Per-term averages and credit sums, in chronological term order.
pub fn term_breakdown(rows: &[&GradeRecord]) -> Vec<TermStats> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&GradeRecord>> = HashMap::new();
    for row in rows {
        let term = row.term.as_str();
        if !groups.contains_key(term) {
            order.push(term);
        }
        groups.entry(term).or_default().push(row);
    }

    sort_terms(order)
        .into_iter()
        .map(|term| {
            let group = &groups[term];
            TermStats {
                term: term.to_string(),
                average: weighted_average(group).ok(),
                credits: credit_sum(group),
            }
        })
        .collect()
}

/// Count grades on the fixed scale, omitting scale values that never occur.
pub fn grade_histogram(rows: &[&GradeRecord]) -> Vec<GradeCount> {
    GRADE_SCALE
        .iter()
        .map(|&grade| GradeCount {
            grade,
            count: rows
                .iter()
                .filter(|r| r.grade.is_some_and(|g| (g - grade).abs() < 1e-9))
                .count(),
        })
        .filter(|c| c.count > 0)
        .collect()
}

/// Compare the credits of ungraded rows with the without-grade budget.
pub fn reconcile_ungraded(rows: &[&GradeRecord], budget: u32) -> UngradedReconciliation {
    let used = credit_sum(rows);
    UngradedReconciliation {
        budget,
        used,
        remaining: i64::from(budget) - i64::from(used),
        excluded: rows.len(),
    }
}

/// Sum of the present credits, saturating at `u32::MAX`.
fn credit_sum(rows: &[&GradeRecord]) -> u32 {
    rows.iter()
        .filter_map(|r| r.credit)
        .fold(0, u32::saturating_add)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
