//! The closed language vocabulary this pipeline understands.

use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    TypeScript,
    Tsx,
    JavaScript,
    Java,
    Python,
    Go,
    Markdown,
    /// A dependency resolved outside the project (a library/package).
    External,
    /// Detection failed or the extension isn't one of the supported set.
    Unknown,
}

impl LanguageId {
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::TypeScript => "typescript",
            LanguageId::Tsx => "tsx",
            LanguageId::JavaScript => "javascript",
            LanguageId::Java => "java",
            LanguageId::Python => "python",
            LanguageId::Go => "go",
            LanguageId::Markdown => "markdown",
            LanguageId::External => "external",
            LanguageId::Unknown => "unknown",
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            LanguageId::TypeScript => &["ts"],
            LanguageId::Tsx => &["tsx"],
            LanguageId::JavaScript => &["js", "jsx"],
            LanguageId::Java => &["java"],
            LanguageId::Python => &["py", "pyi"],
            LanguageId::Go => &["go"],
            LanguageId::Markdown => &["md", "markdown", "mdx"],
            LanguageId::External | LanguageId::Unknown => &[],
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.');
        [
            LanguageId::TypeScript,
            LanguageId::Tsx,
            LanguageId::JavaScript,
            LanguageId::Java,
            LanguageId::Python,
            LanguageId::Go,
            LanguageId::Markdown,
        ]
        .into_iter()
        .find(|lang| lang.extensions().contains(&ext))
    }

    /// Extension-first detection with a content-sniff fallback for shebangs.
    pub fn detect(path: &str, content: Option<&str>) -> Self {
        if let Some(ext) = Path::new(path).extension().and_then(|e| e.to_str()) {
            if let Some(lang) = Self::from_extension(ext) {
                return lang;
            }
        }
        if let Some(content) = content {
            if content.starts_with("#!") && content.contains("python") {
                return LanguageId::Python;
            }
            if content.starts_with("#!") && content.contains("node") {
                return LanguageId::JavaScript;
            }
        }
        LanguageId::Unknown
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
