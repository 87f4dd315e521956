//! The node model.

use crate::domain::node_kind::NodeKind;
use crate::domain::rdf_address::RdfAddress;
use crate::domain::span::Span;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node's identifier is the string rendering of its `RdfAddress`; it is
/// the primary key used throughout the store and query surface.
pub type NodeId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub address: RdfAddress,
    pub kind: NodeKind,
    pub name: String,
    pub file: String,
    pub location: Option<Span>,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Node {
    pub fn new(address: RdfAddress, name: impl Into<String>) -> Self {
        let kind = address.kind();
        let file = address.file.clone();
        Self {
            id: address.to_string(),
            address,
            kind,
            name: name.into(),
            file,
            location: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_location(mut self, location: Span) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
