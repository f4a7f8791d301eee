//! Locale lexicon.
//!
//! Maps abstract field, category and report keys to the display strings of
//! each supported locale. The parser reads its header phrases and term
//! prefixes from here, so adding a locale never touches the classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Category, Season};

/// Supported transcript locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    De,
    En,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Locale; 2] = [Locale::De, Locale::En];

    /// The short locale code used on the command line and in config files.
    pub fn code(self) -> &'static str {
        match self {
            Locale::De => "de",
            Locale::En => "en",
        }
    }

    /// Header phrases in classification order.
    pub fn category_headers(self) -> [(Category, &'static str); 4] {
        [
            (
                Category::GeneralElective,
                localize(self, Key::GeneralElectiveModule),
            ),
            (Category::Compulsory, localize(self, Key::CompulsoryModule)),
            (
                Category::SpecificElective,
                localize(self, Key::SpecificElectiveModule),
            ),
            (
                Category::InternshipTerm,
                localize(self, Key::InternshipSemester),
            ),
        ]
    }

    /// The prefix a term token of the given season starts with in this locale.
    pub fn term_prefix(self, season: Season) -> &'static str {
        let key = match season {
            Season::Winter => Key::WinterPrefix,
            Season::Summer => Key::SummerPrefix,
        };
        localize(self, key)
    }

    /// Term prefixes of all locales for one season.
    pub fn all_term_prefixes(season: Season) -> impl Iterator<Item = &'static str> {
        Locale::ALL.into_iter().map(move |l| l.term_prefix(season))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "de" | "german" | "deutsch" => Ok(Locale::De),
            "en" | "english" => Ok(Locale::En),
            other => Err(format!("unknown locale: {other}")),
        }
    }
}

/// Abstract lexicon keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Category header phrases
    GeneralElectiveModule,
    CompulsoryModule,
    SpecificElectiveModule,
    InternshipSemester,

    // Term-token prefixes
    WinterPrefix,
    SummerPrefix,

    // Status values
    Passed,
    InProgress,

    // Record columns
    ExamCode,
    Description,
    Term,
    Attempt,
    Grade,
    Status,
    Credit,
    Remark,
    Category,

    // Report labels
    Required,
    WithoutGrade,
    WithGrade,
    Open,
    OverallAverage,
    Grades,
    NotIncludedEntries,
    StillRequiredWithoutGrade,
    ShortDescription,
    NumberOf,
    Average,
    Undefined,
}

impl Key {
    /// Column keys in snapshot and table order.
    pub const COLUMNS: [Key; 9] = [
        Key::ExamCode,
        Key::Description,
        Key::Term,
        Key::Attempt,
        Key::Grade,
        Key::Status,
        Key::Credit,
        Key::Remark,
        Key::Category,
    ];
}

/// Look up the display string for `key` in `locale`.
pub fn localize(locale: Locale, key: Key) -> &'static str {
    match locale {
        Locale::De => german(key),
        Locale::En => english(key),
    }
}

fn german(key: Key) -> &'static str {
    match key {
        Key::GeneralElectiveModule => "Allgemeinwissenschaftliches Wahlpflichtmodul",
        Key::CompulsoryModule => "Pflichtmodule",
        Key::SpecificElectiveModule => "Fachspezifisches Wahlpflichtmodul",
        Key::InternshipSemester => "Modul Praxissemester",
        Key::WinterPrefix => "WiSe",
        Key::SummerPrefix => "SoSe",
        Key::Passed => "bestanden",
        Key::InProgress => "wip",
        Key::ExamCode => "Prüfungsnr",
        Key::Description => "Bezeichnung der Leistung",
        Key::Term => "Semester",
        Key::Attempt => "Versuch",
        Key::Grade => "Note",
        Key::Status => "Status",
        Key::Credit => "ECTS",
        Key::Remark => "Vermerk",
        Key::Category => "Art",
        Key::Required => "Erforderlich",
        Key::WithoutGrade => "Ohne Note",
        Key::WithGrade => "Mit Note",
        Key::Open => "Offen",
        Key::OverallAverage => "Gesamtdurchschnitt",
        Key::Grades => "Noten",
        Key::NotIncludedEntries => "Folgende Einträge fließen nicht in die Berechnungen ein",
        Key::StillRequiredWithoutGrade => "Noch benötigte ECTS in Modulen ohne Note",
        Key::ShortDescription => "Beschreibung",
        Key::NumberOf => "Anzahl",
        Key::Average => "Durchschnitt",
        Key::Undefined => "nicht definiert (keine benoteten ECTS)",
    }
}

fn english(key: Key) -> &'static str {
    match key {
        Key::GeneralElectiveModule => "General Compulsory Elective Module",
        Key::CompulsoryModule => "Compulsory Subjects",
        Key::SpecificElectiveModule => "Specific Compulsory Elective Module",
        Key::InternshipSemester => "Internship Semester",
        Key::WinterPrefix => "Winter",
        Key::SummerPrefix => "Summer",
        Key::Passed => "passed",
        Key::InProgress => "wip",
        Key::ExamCode => "Code",
        Key::Description => "Course/Module Title",
        Key::Term => "Semester",
        Key::Attempt => "Attempt",
        Key::Grade => "Local Grade",
        Key::Status => "Result",
        Key::Credit => "ECTS",
        Key::Remark => "Remark",
        Key::Category => "Type",
        Key::Required => "Required",
        Key::WithoutGrade => "Without Grade",
        Key::WithGrade => "With Grade",
        Key::Open => "Open",
        Key::OverallAverage => "Overall Average",
        Key::Grades => "Grades",
        Key::NotIncludedEntries => "The following entries are not included in the calculations",
        Key::StillRequiredWithoutGrade => "ECTS still required in modules without a grade",
        Key::ShortDescription => "Description",
        Key::NumberOf => "Number of",
        Key::Average => "Average",
        Key::Undefined => "undefined (no graded ECTS)",
    }
}
