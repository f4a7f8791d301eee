//! Sort orders for academic terms, module categories and records.

use std::cmp::Ordering;

use crate::lexicon::Locale;
use crate::model::{Category, GradeRecord, Season};

const CENTURY: u16 = 2000;

/// Sort key for a term token.
///
/// Variant order puts every recognized term before the unrecognized bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TermRank {
    /// A recognized term: year first, winter before summer within a year.
    Known { year: u16, season: Season },
    /// No recognized season prefix, or no readable year.
    Unrecognized,
}

/// Rank a term token chronologically.
///
/// A winter range such as `WiSe22/23` is filed under the year it ends in, so
/// it sorts after `SoSe22` and before `SoSe23`. Summer tokens and winter
/// tokens without a slash use their trailing two digits.
pub fn term_rank(term: &str) -> TermRank {
    let Some(season) = season_of(term) else {
        return TermRank::Unrecognized;
    };

    let digits = match (season, term.split_once('/')) {
        (Season::Winter, Some((_, end))) => end,
        _ => term.get(term.len().saturating_sub(2)..).unwrap_or(""),
    };

    match two_digit_year(digits) {
        Some(yy) => TermRank::Known {
            year: CENTURY + yy,
            season,
        },
        None => TermRank::Unrecognized,
    }
}

fn season_of(term: &str) -> Option<Season> {
    [Season::Winter, Season::Summer].into_iter().find(|season| {
        Locale::all_term_prefixes(*season).any(|prefix| term.starts_with(prefix))
    })
}

fn two_digit_year(digits: &str) -> Option<u16> {
    if digits.len() == 2 && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

/// Rank a category: general electives first, specific electives last.
///
/// Compulsory, internship and unset categories share the middle bucket.
pub fn category_rank(category: Option<Category>) -> u8 {
    match category {
        Some(Category::GeneralElective) => 0,
        Some(Category::SpecificElective) => 2,
        _ => 1,
    }
}

/// Composite record order: category (optional), then term, then exam code.
pub fn compare_records(a: &GradeRecord, b: &GradeRecord, by_category: bool) -> Ordering {
    let category = if by_category {
        category_rank(a.category).cmp(&category_rank(b.category))
    } else {
        Ordering::Equal
    };

    category
        .then_with(|| term_rank(&a.term).cmp(&term_rank(&b.term)))
        .then_with(|| a.exam_code.cmp(&b.exam_code))
}

/// Return the records in composite order. The sort is stable.
pub fn sort_records(records: &[GradeRecord], by_category: bool) -> Vec<GradeRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_records(a, b, by_category));
    sorted
}

/// Return term tokens in chronological order.
pub fn sort_terms<'a>(terms: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut sorted: Vec<&str> = terms.into_iter().collect();
    sorted.sort_by_key(|t| term_rank(t));
    sorted
}
