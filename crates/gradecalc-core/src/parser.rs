//! Transcript text parser.
//!
//! Classifies each line of an extracted transcript as a category header, a
//! bare module-group code, an entry line or page furniture, and folds the
//! lines into raw entries that carry the category in effect when they matched.

use regex::Regex;

use crate::error::ParseError;
use crate::lexicon::Locale;
use crate::model::{Category, RawEntry, Season};

/// What a single transcript line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A category header; switches the context.
    Header(Category),
    /// A standalone module-group code; skipped.
    ModuleCode,
    /// An entry line. Its category is filled in from the context.
    Entry(RawEntry),
    /// Headers, footers and legends.
    Unrecognized,
}

/// The context carried from one line to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseContext {
    /// Category of the most recent header, unset before the first one.
    pub category: Option<Category>,
}

impl ParseContext {
    /// Apply one classified line, returning the next context and the entry
    /// the line produced, if any.
    pub fn advance(self, kind: LineKind) -> (Self, Option<RawEntry>) {
        match kind {
            LineKind::Header(category) => (
                Self {
                    category: Some(category),
                },
                None,
            ),
            LineKind::Entry(mut entry) => {
                entry.category = self.category;
                (self, Some(entry))
            }
            LineKind::ModuleCode | LineKind::Unrecognized => (self, None),
        }
    }
}

/// Line classifier for one locale.
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    locale: Locale,
    headers: [(Category, &'static str); 4],
    module_code: Regex,
    entry: Regex,
}

#[derive(Default)]
struct Scan {
    context: ParseContext,
    entries: Vec<RawEntry>,
    lines: usize,
    headers: usize,
    skipped: usize,
}

impl TranscriptParser {
    /// Build the classifier from the locale's lexicon data.
    pub fn new(locale: Locale) -> Result<Self, ParseError> {
        Ok(Self {
            locale,
            headers: locale.category_headers(),
            module_code: Regex::new(r"^\d{4,}$")?,
            entry: Regex::new(&entry_pattern())?,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Classify a single line without any context.
    pub fn classify_line(&self, line: &str) -> LineKind {
        if let Some((category, _)) = self
            .headers
            .iter()
            .find(|(_, phrase)| line.contains(phrase))
        {
            return LineKind::Header(*category);
        }

        if self.module_code.is_match(line.trim()) {
            return LineKind::ModuleCode;
        }

        match self.entry.captures(line) {
            Some(caps) => {
                let field = |name: &str| caps.name(name).map_or("", |m| m.as_str());
                let optional = |name: &str| {
                    Some(field(name).trim())
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                };
                LineKind::Entry(RawEntry {
                    exam_code: field("code").to_string(),
                    description: field("description").to_string(),
                    term: field("term").to_string(),
                    attempt: field("attempt").to_string(),
                    grade: optional("grade").map(|g| g.replace(',', ".")),
                    status: optional("status"),
                    credit: field("credit").to_string(),
                    remark: optional("remark"),
                    category: None,
                })
            }
            None => LineKind::Unrecognized,
        }
    }

    /// Parse a whole transcript text into raw entries, in line order.
    ///
    /// Returns [`ParseError::NoEntries`] when no line matched the entry
    /// grammar, which usually means a wrong locale or an unrelated document.
    pub fn parse(&self, text: &str) -> Result<Vec<RawEntry>, ParseError> {
        self.parse_from(ParseContext::default(), text)
    }

    /// Parse starting from an injected context.
    pub fn parse_from(
        &self,
        context: ParseContext,
        text: &str,
    ) -> Result<Vec<RawEntry>, ParseError> {
        let scan = text.lines().fold(
            Scan {
                context,
                ..Scan::default()
            },
            |mut scan, line| {
                let kind = self.classify_line(line);
                match kind {
                    LineKind::Header(_) => scan.headers += 1,
                    LineKind::ModuleCode | LineKind::Unrecognized => scan.skipped += 1,
                    LineKind::Entry(_) => {}
                }
                let (next, entry) = scan.context.advance(kind);
                scan.context = next;
                scan.entries.extend(entry);
                scan.lines += 1;
                scan
            },
        );

        tracing::debug!(
            locale = %self.locale,
            lines = scan.lines,
            headers = scan.headers,
            skipped = scan.skipped,
            entries = scan.entries.len(),
            "scanned transcript text"
        );

        if scan.entries.is_empty() {
            return Err(ParseError::NoEntries {
                locale: self.locale,
                lines: scan.lines,
            });
        }
        Ok(scan.entries)
    }
}

/// Parse `text` with a freshly built classifier for `locale`.
pub fn parse_transcript(text: &str, locale: Locale) -> Result<Vec<RawEntry>, ParseError> {
    TranscriptParser::new(locale)?.parse(text)
}

/// The entry-line grammar, with term prefixes of every locale.
fn entry_pattern() -> String {
    let alternatives = |season: Season| {
        Locale::all_term_prefixes(season)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|")
    };
    format!(
        r"^(?P<code>\d{{7}})\s+(?P<description>.+?)\s+(?P<term>(?:{winter})\d{{2}}/\d{{2}}|(?:{summer})\d{{2}})\s+(?P<attempt>\d+)\s+(?P<grade>[\d.,]*)\s*(?P<status>\w*)\s+(?P<credit>\d+)\s*(?P<remark>.*)$",
        winter = alternatives(Season::Winter),
        summer = alternatives(Season::Summer),
    )
}
