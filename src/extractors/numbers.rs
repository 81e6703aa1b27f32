// src/extractors/numbers.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

// --- Constants ---
// Magnitude keywords in declaration order; first match wins when a text
// span mentions more than one of them.
pub const SCALE_FACTORS: [(&str, f64); 4] = [
    ("thousand", 1e3),
    ("million", 1e6),
    ("billion", 1e9),
    ("trillion", 1e12),
];

// --- Regex Patterns (Lazy Static) ---
// Comma-grouped decimal (optional sign, optional fraction) or plain decimal.
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[-+]?\d{1,3}(?:,\d{3})*(?:\.\d+)?|\d+(?:\.\d+)?")
        .expect("Failed to compile NUMBER_RE")
});

// Same literal pattern, plus an optional trailing token that may be a
// magnitude word ("million", "billions", ...).
static NUMBER_WITH_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([-+]?\d{1,3}(?:,\d{3})*(?:\.\d+)?|\d+(?:\.\d+)?)\s*(\w+)?")
        .expect("Failed to compile NUMBER_WITH_TOKEN_RE")
});

// A line starting a new reporting table: "FY 2025" / "FY2025" / "Fiscal Year".
// Anchored to the preceding newline so headings mid-line don't count.
static TABLE_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*(?:FY\s*\d{4}|Fiscal Year)\s*")
        .expect("Failed to compile TABLE_HEADER_RE")
});

// --- Data Structures ---
/// A single numeric literal found by the contextual scan.
///
/// `scaled` is `original` multiplied by the ambient table scale in effect
/// at `position`, and by the inline magnitude word if one follows the
/// literal. `scale_word` holds the trailing token verbatim whether or not
/// it named a magnitude; `None` when no token followed the literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberRecord {
    pub original: f64,
    pub scaled: f64,
    pub scale_word: Option<String>,
    /// Character offset of the literal within its page's text. Used for
    /// ordering and debugging only.
    pub position: usize,
    pub page: u32,
}

/// A numeric literal found by the base (context-free) scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaseNumber {
    pub value: f64,
    pub page: u32,
}

/// Contextual records keyed by page number, ascending. Pages with no
/// records are absent from the map.
pub type PageResults = BTreeMap<u32, Vec<NumberRecord>>;

/// The two extraction artifacts for a whole document.
#[derive(Debug, Default, Serialize)]
pub struct DocumentNumbers {
    pub base: Vec<BaseNumber>,
    pub contextual: PageResults,
}

// --- Extraction Functions ---
/// Extracts every numeric literal from the text as a float, in position
/// order, with grouping commas stripped. Matches that fail to parse are
/// logged and skipped.
pub fn extract_all_numbers(text: &str) -> Vec<f64> {
    NUMBER_RE
        .find_iter(text)
        .filter_map(|m| match m.as_str().replace(',', "").parse::<f64>() {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!("Unable to convert to float - {:?}: {}", m.as_str(), err);
                None
            }
        })
        .collect()
}

/// Determines the ambient scale factor declared by a text span.
///
/// Looks for "in <word>" phrasing or the "($m)"-style parenthesized
/// abbreviation, case-insensitively, in keyword declaration order.
/// Returns 1.0 when the span declares no magnitude.
pub fn extract_scale_factor(text: &str) -> f64 {
    let lower = text.to_lowercase();
    for (word, factor) in SCALE_FACTORS {
        let phrase = format!("in {word}");
        let abbrev = format!("(${})", &word[..1]);
        if lower.contains(&phrase) || lower.contains(&abbrev) {
            return factor;
        }
    }
    1.0
}

/// Resolves a token immediately following a literal to a magnitude
/// factor: an exact keyword match, or a keyword with a trailing "s"
/// ("millions" -> "million"). Non-magnitude tokens resolve to `None`.
pub fn inline_scale_factor(word: &str) -> Option<f64> {
    let lower = word.to_lowercase();
    let stem = lower.strip_suffix('s').unwrap_or(&lower);
    SCALE_FACTORS
        .iter()
        .find(|(keyword, _)| *keyword == stem)
        .map(|(_, factor)| *factor)
}

/// Detects where new reporting tables start within the text.
///
/// Returns the character offsets of the newline preceding each detected
/// table header, in ascending order.
pub fn detect_table_boundaries(text: &str) -> Vec<usize> {
    TABLE_HEADER_RE.find_iter(text).map(|m| m.start()).collect()
}

/// Extracts numbers from one page's text, applying contextual scaling.
///
/// Walks every literal (with optional trailing token) left to right,
/// re-deriving the ambient scale each time the scan passes a pending
/// table boundary. Exactly one boundary is consumed per literal, so a
/// run of back-to-back table headers drains across subsequent matches.
/// The inline magnitude word stacks multiplicatively on the ambient
/// scale.
pub fn extract_numbers_with_context(text: &str, page: u32) -> Vec<NumberRecord> {
    let boundaries = detect_table_boundaries(text);
    let mut next_boundary = 0usize;
    let mut last_boundary = 0usize;
    let mut current_scale = 1.0f64;
    let mut records = Vec::new();

    for caps in NUMBER_WITH_TOKEN_RE.captures_iter(text) {
        let literal = match caps.get(1) {
            Some(m) => m,
            None => continue, // group 1 is the mandatory half of the pattern
        };
        let position = literal.start();
        let original: f64 = match literal.as_str().replace(',', "").parse() {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(
                    "Unable to convert to float - {:?}: {}",
                    literal.as_str(),
                    err
                );
                continue;
            }
        };
        let scale_word = caps.get(2).map(|m| m.as_str());

        // Crossed into a new table: re-derive the ambient scale from the
        // text since the previous boundary.
        if next_boundary < boundaries.len() && position > boundaries[next_boundary] {
            current_scale = extract_scale_factor(&text[last_boundary..position]);
            last_boundary = boundaries[next_boundary];
            next_boundary += 1;
        }

        let mut scaled = original * current_scale;
        if let Some(word) = scale_word {
            if let Some(factor) = inline_scale_factor(word) {
                scaled *= factor;
            }
        }

        records.push(NumberRecord {
            original,
            scaled,
            scale_word: scale_word.map(str::to_string),
            position,
            page,
        });
    }

    records
}

/// Runs both scans over a document's pages, in page order.
///
/// Pages yielding no contextual records get no entry in the results map.
pub fn process_pages<'a, I>(pages: I) -> DocumentNumbers
where
    I: IntoIterator<Item = (u32, &'a str)>,
{
    let mut numbers = DocumentNumbers::default();

    for (page, text) in pages {
        numbers.base.extend(
            extract_all_numbers(text)
                .into_iter()
                .map(|value| BaseNumber { value, page }),
        );

        let records = extract_numbers_with_context(text, page);
        tracing::debug!("Page {}: {} contextual records", page, records.len());
        if !records.is_empty() {
            numbers.contextual.insert(page, records);
        }
    }

    numbers
}
