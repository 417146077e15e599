//! Locate the embedded array and parse its entries.
//!
//! `\uXXXX` escapes for `"`, `\`, control characters and surrogate halves
//! are handed to the JSON parser untouched. Entries using them therefore
//! parse, where blanket unescaping to literal characters would break the
//! string and drop the entry as malformed.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::ops::Range;

use super::record::SpeciesRecord;

/// One `[...]` without nested brackets.
static ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]+)\]").expect("static entry pattern"));

static UNICODE_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\u([0-9a-fA-F]{4})").expect("static escape pattern"));

const PREVIEW_CHARS: usize = 60;

/// The `<binding> = [ ... ];` framing around the dataset.
#[derive(Debug, Clone)]
pub struct ArrayFrame {
    binding: String,
    pattern: Regex,
}

impl ArrayFrame {
    pub fn new(binding: &str) -> Self {
        let pattern = Regex::new(&format!(r"(?s){} = \[(.*?)\];", regex::escape(binding)))
            .expect("escaped binding is a valid pattern");
        Self {
            binding: binding.to_string(),
            pattern,
        }
    }

    pub fn binding(&self) -> &str {
        &self.binding
    }

    /// Byte range of the whole assignment and of the array body inside it.
    fn locate(&self, text: &str) -> Option<(Range<usize>, Range<usize>)> {
        let caps = self.pattern.captures(text)?;
        let whole = caps.get(0)?.range();
        let body = caps.get(1)?.range();
        Some((whole, body))
    }
}

impl Default for ArrayFrame {
    fn default() -> Self {
        Self::new("const FISH")
    }
}

/// An entry that could not be parsed and was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// 1-based position among the bracketed candidates.
    pub index: usize,
    /// Leading characters of the raw entry text.
    pub preview: String,
    pub reason: String,
}

/// Result of reading the dataset out of a source file.
#[derive(Debug, Clone)]
pub struct ParsedDataset {
    /// Byte range of the full `<binding> = [ ... ];` assignment in the source text.
    pub span: Range<usize>,
    /// Parsed records in source order.
    pub records: Vec<SpeciesRecord>,
    pub skipped: Vec<SkippedEntry>,
}

impl ParsedDataset {
    /// Bracketed entries seen, parsed or not.
    pub fn candidates(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

/// Extracts the dataset, or `None` if the framing is not present.
///
/// Malformed entries never fail the whole parse; they are collected in
/// [`ParsedDataset::skipped`] and logged.
pub fn parse_dataset(text: &str, frame: &ArrayFrame) -> Option<ParsedDataset> {
    let (span, body) = frame.locate(text)?;
    let body = &text[body];

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (i, caps) in ENTRY.captures_iter(body).enumerate() {
        let raw = &caps[1];
        match parse_entry(raw) {
            Ok(fields) => records.push(SpeciesRecord::new(fields)),
            Err(e) => {
                let entry = SkippedEntry {
                    index: i + 1,
                    preview: raw.trim().chars().take(PREVIEW_CHARS).collect(),
                    reason: e.to_string(),
                };
                tracing::warn!(
                    "skipping unparseable entry #{}: {} ({})",
                    entry.index,
                    entry.preview,
                    entry.reason
                );
                skipped.push(entry);
            }
        }
    }

    tracing::debug!(
        "parsed {} records, skipped {} from {} bytes of array body",
        records.len(),
        skipped.len(),
        body.len()
    );

    Some(ParsedDataset {
        span,
        records,
        skipped,
    })
}

fn parse_entry(raw: &str) -> Result<Vec<Value>, serde_json::Error> {
    let unescaped = unescape_unicode(raw);
    serde_json::from_str(&format!("[{}]", unescaped))
}

/// Replaces `\uXXXX` with the literal character.
///
/// Surrogate halves, quotes, backslashes and control characters keep their
/// escaped form; the JSON parser decodes those itself.
fn unescape_unicode(raw: &str) -> String {
    UNICODE_ESCAPE
        .replace_all(raw, |caps: &Captures| {
            let literal = u32::from_str_radix(&caps[1], 16)
                .ok()
                .and_then(char::from_u32)
                .filter(|c| !c.is_control() && *c != '"' && *c != '\\');
            match literal {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SOURCE: &str = r#"/* header */
const FISH = [
  ["Atlantic salmon","Salmo","salar","Salmonidae","Salmoniformes",150,"Marine","0-210"],
  ["Broken", "Nope", oops],
  ["Pike","Esox","lucius","Esocidae","Esociformes",150,"Freshwater","0-30",""]
];
const FISH_WITH_PHOTOS = FISH.filter(f => f[8]);
"#;

    #[test]
    fn parses_records_in_order_and_skips_malformed() {
        let parsed = parse_dataset(SOURCE, &ArrayFrame::default()).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].common_name(), "Atlantic salmon");
        assert_eq!(parsed.records[1].genus(), "Esox");
        assert_eq!(parsed.records[0].fields()[5], json!(150));
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].index, 2);
        assert!(parsed.skipped[0].preview.starts_with("\"Broken\""));
        assert_eq!(parsed.candidates(), 3);
    }

    #[test]
    fn span_covers_only_the_assignment() {
        let parsed = parse_dataset(SOURCE, &ArrayFrame::default()).unwrap();
        let region = &SOURCE[parsed.span.clone()];
        assert!(region.starts_with("const FISH = ["));
        assert!(region.ends_with("];"));
        assert!(SOURCE[parsed.span.end..].starts_with("\nconst FISH_WITH_PHOTOS"));
    }

    #[test]
    fn missing_frame_is_none() {
        assert!(parse_dataset("const BIRDS = [[\"a\"]];", &ArrayFrame::default()).is_none());
        assert!(parse_dataset("const FISH = [ never closed", &ArrayFrame::default()).is_none());
    }

    #[test]
    fn custom_binding() {
        let text = "var FISH = [\n  [\"Cod\",\"Gadus\",\"morhua\"]\n    ];";
        assert!(parse_dataset(text, &ArrayFrame::default()).is_none());
        let parsed = parse_dataset(text, &ArrayFrame::new("var FISH")).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].species(), "morhua");
    }

    #[test]
    fn unicode_escapes_become_literal() {
        let text = r#"const FISH = [ ["Gr\u00e4s", "A\u0022B", "\ud83d\udc1f"] ];"#;
        let parsed = parse_dataset(text, &ArrayFrame::default()).unwrap();
        assert!(parsed.skipped.is_empty());
        let r = &parsed.records[0];
        assert_eq!(r.common_name(), "Gräs");
        assert_eq!(r.genus(), "A\"B");
        assert_eq!(r.species(), "\u{1F41F}");
    }

    #[test]
    fn comments_between_entries_are_ignored() {
        let text = "const FISH = [\n  // Salmonids\n  [\"Trout\",\"Salmo\",\"trutta\"],\n  /* pikes */\n  [\"Pike\",\"Esox\",\"lucius\"]\n];";
        let parsed = parse_dataset(text, &ArrayFrame::default()).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert!(parsed.skipped.is_empty());
    }
}
