//! The closed vocabulary of node kinds a node's identifier can carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    File,
    Class,
    Interface,
    Function,
    Method,
    Property,
    Field,
    Variable,
    Constant,
    Type,
    Enum,
    EnumMember,
    Constructor,
    Library,
    Package,
    ExternalResource,
    MissingFile,
    HeadingSymbol,
    Symbol,
    ErrorPlaceholder,
}

impl NodeKind {
    pub const ALL: [NodeKind; 20] = [
        NodeKind::File,
        NodeKind::Class,
        NodeKind::Interface,
        NodeKind::Function,
        NodeKind::Method,
        NodeKind::Property,
        NodeKind::Field,
        NodeKind::Variable,
        NodeKind::Constant,
        NodeKind::Type,
        NodeKind::Enum,
        NodeKind::EnumMember,
        NodeKind::Constructor,
        NodeKind::Library,
        NodeKind::Package,
        NodeKind::ExternalResource,
        NodeKind::MissingFile,
        NodeKind::HeadingSymbol,
        NodeKind::Symbol,
        NodeKind::ErrorPlaceholder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "File",
            NodeKind::Class => "Class",
            NodeKind::Interface => "Interface",
            NodeKind::Function => "Function",
            NodeKind::Method => "Method",
            NodeKind::Property => "Property",
            NodeKind::Field => "Field",
            NodeKind::Variable => "Variable",
            NodeKind::Constant => "Constant",
            NodeKind::Type => "Type",
            NodeKind::Enum => "Enum",
            NodeKind::EnumMember => "EnumMember",
            NodeKind::Constructor => "Constructor",
            NodeKind::Library => "Library",
            NodeKind::Package => "Package",
            NodeKind::ExternalResource => "ExternalResource",
            NodeKind::MissingFile => "MissingFile",
            NodeKind::HeadingSymbol => "HeadingSymbol",
            NodeKind::Symbol => "Symbol",
            NodeKind::ErrorPlaceholder => "ErrorPlaceholder",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown node kind '{0}'")]
pub struct UnknownNodeKind(pub String);

impl FromStr for NodeKind {
    type Err = UnknownNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownNodeKind(s.to_string()))
    }
}
