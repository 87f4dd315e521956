//! Stable, human-readable node identifiers.
//!
//! Grammar: `project/file#Kind:path.segments/Kind:path.segments`.
//! The fragment is a `/`-joined chain of symbol segments; each segment is a
//! kind tag followed by a `.`-joined dotted path, so `UserService`'s `login`
//! method renders as `Class:UserService/Method:login`. A bare file node has
//! no fragment at all.

use crate::domain::node_kind::NodeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolSegment {
    pub kind: NodeKind,
    pub path: Vec<String>,
}

impl SymbolSegment {
    pub fn new(kind: NodeKind, path: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            kind,
            path: path.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for SymbolSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.path.join("."))
    }
}

/// A fully-qualified, parseable node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RdfAddress {
    pub project: String,
    pub file: String,
    pub segments: Vec<SymbolSegment>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RdfAddressError {
    #[error("missing '/' separating project from file path in '{0}'")]
    MissingProjectSeparator(String),
    #[error("empty project name in '{0}'")]
    EmptyProject(String),
    #[error("empty file path in '{0}'")]
    EmptyFile(String),
    #[error("malformed symbol segment '{0}': expected 'Kind:path'")]
    MalformedSegment(String),
    #[error("unknown node kind in segment '{0}': {1}")]
    UnknownKind(String, String),
    #[error("empty dotted path in segment '{0}'")]
    EmptySegmentPath(String),
}

impl RdfAddress {
    pub fn for_file(project: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            file: file.into(),
            segments: Vec::new(),
        }
    }

    pub fn with_segment(mut self, segment: SymbolSegment) -> Self {
        self.segments.push(segment);
        self
    }

    /// The kind this identifier ultimately denotes: the last symbol segment's
    /// kind, or `NodeKind::File` when there are no segments.
    pub fn kind(&self) -> NodeKind {
        self.segments
            .last()
            .map(|s| s.kind)
            .unwrap_or(NodeKind::File)
    }

    pub fn parse(raw: &str) -> Result<Self, RdfAddressError> {
        let slash = raw
            .find('/')
            .ok_or_else(|| RdfAddressError::MissingProjectSeparator(raw.to_string()))?;
        let (project, rest) = raw.split_at(slash);
        let rest = &rest[1..];
        if project.is_empty() {
            return Err(RdfAddressError::EmptyProject(raw.to_string()));
        }

        let (file, fragment) = match rest.find('#') {
            Some(hash) => (&rest[..hash], Some(&rest[hash + 1..])),
            None => (rest, None),
        };
        if file.is_empty() {
            return Err(RdfAddressError::EmptyFile(raw.to_string()));
        }

        let mut segments = Vec::new();
        if let Some(fragment) = fragment {
            if !fragment.is_empty() {
                for piece in fragment.split('/') {
                    segments.push(parse_segment(piece)?);
                }
            }
        }

        Ok(Self {
            project: project.to_string(),
            file: file.to_string(),
            segments,
        })
    }
}

fn parse_segment(piece: &str) -> Result<SymbolSegment, RdfAddressError> {
    let colon = piece
        .find(':')
        .ok_or_else(|| RdfAddressError::MalformedSegment(piece.to_string()))?;
    let (kind_str, path_str) = piece.split_at(colon);
    let path_str = &path_str[1..];
    let kind = kind_str
        .parse::<NodeKind>()
        .map_err(|e| RdfAddressError::UnknownKind(piece.to_string(), e.to_string()))?;
    if path_str.is_empty() {
        return Err(RdfAddressError::EmptySegmentPath(piece.to_string()));
    }
    let path = path_str.split('.').map(|s| s.to_string()).collect();
    Ok(SymbolSegment { kind, path })
}

impl fmt::Display for RdfAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.file)?;
        if !self.segments.is_empty() {
            f.write_str("#")?;
            let rendered: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
            f.write_str(&rendered.join("/"))?;
        }
        Ok(())
    }
}
