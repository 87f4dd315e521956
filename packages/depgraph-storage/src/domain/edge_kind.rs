//! The closed vocabulary of edge kinds, grouped by category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    // Structural
    Contains,
    Declares,
    BelongsTo,
    // Dependency
    DependsOn,
    Imports,
    ImportsLibrary,
    ImportsFile,
    ExportsTo,
    // Execution
    Calls,
    Instantiates,
    Uses,
    Accesses,
    // Type system
    Extends,
    Implements,
    HasType,
    Returns,
    Throws,
    // Modification
    Overrides,
    Shadows,
    AssignsTo,
    // Documentation
    MdLink,
    MdImage,
    MdWikilink,
    MdSymbolRef,
    MdInclude,
    MdCodeRef,
    MdAnchor,
    MdHashtag,
    MdContainsHeading,
    // Meta
    AnnotatedWith,
    References,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 31] = [
        EdgeKind::Contains,
        EdgeKind::Declares,
        EdgeKind::BelongsTo,
        EdgeKind::DependsOn,
        EdgeKind::Imports,
        EdgeKind::ImportsLibrary,
        EdgeKind::ImportsFile,
        EdgeKind::ExportsTo,
        EdgeKind::Calls,
        EdgeKind::Instantiates,
        EdgeKind::Uses,
        EdgeKind::Accesses,
        EdgeKind::Extends,
        EdgeKind::Implements,
        EdgeKind::HasType,
        EdgeKind::Returns,
        EdgeKind::Throws,
        EdgeKind::Overrides,
        EdgeKind::Shadows,
        EdgeKind::AssignsTo,
        EdgeKind::MdLink,
        EdgeKind::MdImage,
        EdgeKind::MdWikilink,
        EdgeKind::MdSymbolRef,
        EdgeKind::MdInclude,
        EdgeKind::MdCodeRef,
        EdgeKind::MdAnchor,
        EdgeKind::MdHashtag,
        EdgeKind::MdContainsHeading,
        EdgeKind::AnnotatedWith,
        EdgeKind::References,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Contains => "contains",
            EdgeKind::Declares => "declares",
            EdgeKind::BelongsTo => "belongs_to",
            EdgeKind::DependsOn => "depends_on",
            EdgeKind::Imports => "imports",
            EdgeKind::ImportsLibrary => "imports_library",
            EdgeKind::ImportsFile => "imports_file",
            EdgeKind::ExportsTo => "exports_to",
            EdgeKind::Calls => "calls",
            EdgeKind::Instantiates => "instantiates",
            EdgeKind::Uses => "uses",
            EdgeKind::Accesses => "accesses",
            EdgeKind::Extends => "extends",
            EdgeKind::Implements => "implements",
            EdgeKind::HasType => "has_type",
            EdgeKind::Returns => "returns",
            EdgeKind::Throws => "throws",
            EdgeKind::Overrides => "overrides",
            EdgeKind::Shadows => "shadows",
            EdgeKind::AssignsTo => "assigns_to",
            EdgeKind::MdLink => "md-link",
            EdgeKind::MdImage => "md-image",
            EdgeKind::MdWikilink => "md-wikilink",
            EdgeKind::MdSymbolRef => "md-symbol-ref",
            EdgeKind::MdInclude => "md-include",
            EdgeKind::MdCodeRef => "md-code-ref",
            EdgeKind::MdAnchor => "md-anchor",
            EdgeKind::MdHashtag => "md-hashtag",
            EdgeKind::MdContainsHeading => "md-contains-heading",
            EdgeKind::AnnotatedWith => "annotated_with",
            EdgeKind::References => "references",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown edge kind '{0}'")]
pub struct UnknownEdgeKind(pub String);

impl FromStr for EdgeKind {
    type Err = UnknownEdgeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownEdgeKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_kind() {
        for kind in EdgeKind::ALL {
            assert_eq!(kind.to_string().parse::<EdgeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn all_has_no_duplicates() {
        let mut names: Vec<&str> = EdgeKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(names.len(), before);
    }
}
