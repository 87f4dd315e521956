//! Markdown Link extractor: link / image / wikilink / symbol-reference /
//! include / heading records, found by regex over the raw text — the inline
//! grammar tree-sitter-md exposes is a second, separately-parsed tree, so a
//! text scan over the already-available source is simpler for this set of
//! constructs.

use crate::features::extraction::ports::{ExtractionContext, Extractor};
use crate::features::parsing::LanguageId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tree_sitter::Tree;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownLinkRecord {
    pub kind: String,
    pub target: String,
    pub line: u32,
}

static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[[^\]]*\]\(([^)]+)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|[^!])\[[^\]]*\]\(([^)]+)\)").unwrap());
static SYMBOL_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[#([^\]]+)\]\]").unwrap());
static WIKILINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[([^\]#]+)\]\]").unwrap());
static INCLUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!include\(([^)]+)\)").unwrap());
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\s)#([A-Za-z][\w-]*)").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

pub struct MarkdownLinkExtractor;

impl Extractor for MarkdownLinkExtractor {
    fn name(&self) -> &str {
        "markdown_link"
    }

    fn supports(&self, language: LanguageId) -> bool {
        language == LanguageId::Markdown
    }

    fn extract(&self, _tree: &Tree, ctx: &ExtractionContext<'_>) -> serde_json::Value {
        let mut records = Vec::new();
        for (idx, line) in ctx.source.lines().enumerate() {
            let line_no = idx as u32 + 1;
            if let Some(caps) = HEADING.captures(line) {
                records.push(MarkdownLinkRecord {
                    kind: "heading".to_string(),
                    target: caps[2].trim().to_string(),
                    line: line_no,
                });
            }
            for caps in INCLUDE.captures_iter(line) {
                records.push(MarkdownLinkRecord {
                    kind: "include".to_string(),
                    target: caps[1].to_string(),
                    line: line_no,
                });
            }
            for caps in IMAGE.captures_iter(line) {
                records.push(MarkdownLinkRecord {
                    kind: "image".to_string(),
                    target: caps[1].to_string(),
                    line: line_no,
                });
            }
            for caps in LINK.captures_iter(line) {
                records.push(MarkdownLinkRecord {
                    kind: "link".to_string(),
                    target: caps[1].to_string(),
                    line: line_no,
                });
            }
            for caps in SYMBOL_REF.captures_iter(line) {
                records.push(MarkdownLinkRecord {
                    kind: "symbol-reference".to_string(),
                    target: caps[1].to_string(),
                    line: line_no,
                });
            }
            for caps in WIKILINK.captures_iter(line) {
                records.push(MarkdownLinkRecord {
                    kind: "wiki".to_string(),
                    target: caps[1].to_string(),
                    line: line_no,
                });
            }
            for caps in HASHTAG.captures_iter(line) {
                records.push(MarkdownLinkRecord {
                    kind: "hashtag".to_string(),
                    target: caps[1].to_string(),
                    line: line_no,
                });
            }
        }
        serde_json::to_value(records).unwrap_or(serde_json::Value::Null)
    }
}
