//! SQLite-backed `GraphStore`, for persisted graphs across process restarts.

use crate::domain::edge::Edge;
use crate::domain::edge_kind::EdgeKind;
use crate::domain::node::{Node, NodeId};
use crate::domain::node_kind::NodeKind;
use crate::domain::ports::{BatchSummary, GraphOp, GraphStore};
use crate::domain::rdf_address::RdfAddress;
use crate::domain::span::Span;
use crate::error::{Result, StorageError};
use crate::infrastructure::schema::{CURRENT_SCHEMA_VERSION, DDL};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

pub struct SqliteGraphStore {
    conn: Mutex<Connection>,
}

impl SqliteGraphStore {
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(DDL)?;
        let stored_version: Option<String> = conn
            .query_row(
                "SELECT value FROM schema_meta WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        match stored_version {
            Some(version) if version != CURRENT_SCHEMA_VERSION => {
                return Err(StorageError::SchemaVersionMismatch {
                    store: version,
                    registry: CURRENT_SCHEMA_VERSION.to_string(),
                });
            }
            Some(_) => {}
            None => {
                conn.execute(
                    "INSERT INTO schema_meta (key, value) VALUES ('schema_version', ?1)",
                    params![CURRENT_SCHEMA_VERSION],
                )?;
            }
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn row_to_node(row: &rusqlite::Row<'_>) -> rusqlite::Result<Node> {
        let id: String = row.get(0)?;
        let kind: String = row.get(1)?;
        let name: String = row.get(2)?;
        let file: String = row.get(3)?;
        let address: String = row.get(4)?;
        let location: Option<String> = row.get(5)?;
        let metadata: String = row.get(6)?;
        Ok(Node {
            id,
            address: RdfAddress::parse(&address).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            kind: kind.parse::<NodeKind>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            name,
            file,
            location: location
                .map(|s| serde_json::from_str::<Span>(&s))
                .transpose()
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        5,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
            metadata: serde_json::from_str(&metadata).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    6,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
        })
    }

    fn row_to_edge(row: &rusqlite::Row<'_>) -> rusqlite::Result<Edge> {
        let source_id: String = row.get(0)?;
        let target_id: String = row.get(1)?;
        let kind: String = row.get(2)?;
        let span: Option<String> = row.get(3)?;
        let derived: i64 = row.get(4)?;
        let metadata: String = row.get(5)?;
        Ok(Edge {
            source_id,
            target_id,
            kind: kind.parse::<EdgeKind>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            span: span
                .map(|s| serde_json::from_str::<Span>(&s))
                .transpose()
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        3,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
            derived: derived != 0,
            metadata: serde_json::from_str(&metadata).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
        })
    }
}

#[async_trait]
impl GraphStore for SqliteGraphStore {
    async fn apply(&self, ops: Vec<GraphOp>) -> Result<BatchSummary> {
        let mut conn = self.conn.lock().map_err(|_| {
            StorageError::Internal("sqlite connection mutex poisoned".to_string())
        })?;
        let known: Vec<String> = ops
            .iter()
            .filter_map(|op| match op {
                GraphOp::UpsertNode(n) => Some(n.id.clone()),
                _ => None,
            })
            .collect();

        let tx = conn.transaction()?;
        let mut summary = BatchSummary::default();
        for op in &ops {
            if let GraphOp::UpsertEdge(edge) = op {
                let source_exists = known.contains(&edge.source_id)
                    || tx
                        .query_row(
                            "SELECT 1 FROM nodes WHERE id = ?1",
                            params![edge.source_id],
                            |_| Ok(()),
                        )
                        .optional()?
                        .is_some();
                if !source_exists {
                    return Err(StorageError::DanglingEndpoint(edge.source_id.clone()));
                }
                let target_exists = known.contains(&edge.target_id)
                    || tx
                        .query_row(
                            "SELECT 1 FROM nodes WHERE id = ?1",
                            params![edge.target_id],
                            |_| Ok(()),
                        )
                        .optional()?
                        .is_some();
                if !target_exists {
                    return Err(StorageError::DanglingEndpoint(edge.target_id.clone()));
                }
            }
        }

        for op in ops {
            match op {
                GraphOp::UpsertNode(node) => {
                    let location = node
                        .location
                        .map(|s| serde_json::to_string(&s))
                        .transpose()?;
                    let metadata = serde_json::to_string(&node.metadata)?;
                    tx.execute(
                        "INSERT INTO nodes (id, kind, name, file, address, location, metadata)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                         ON CONFLICT(id) DO UPDATE SET
                            kind = excluded.kind,
                            name = excluded.name,
                            file = excluded.file,
                            address = excluded.address,
                            location = excluded.location,
                            metadata = excluded.metadata",
                        params![
                            node.id,
                            node.kind.to_string(),
                            node.name,
                            node.file,
                            node.address.to_string(),
                            location,
                            metadata
                        ],
                    )?;
                    summary.nodes_upserted += 1;
                }
                GraphOp::UpsertEdge(edge) => {
                    let span = edge.span.map(|s| serde_json::to_string(&s)).transpose()?;
                    let metadata = serde_json::to_string(&edge.metadata)?;
                    tx.execute(
                        "INSERT INTO edges (source_id, target_id, kind, span, derived, metadata)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                         ON CONFLICT(source_id, target_id, kind) DO UPDATE SET
                            span = excluded.span,
                            derived = excluded.derived,
                            metadata = excluded.metadata",
                        params![
                            edge.source_id,
                            edge.target_id,
                            edge.kind.to_string(),
                            span,
                            edge.derived as i64,
                            metadata
                        ],
                    )?;
                    summary.edges_upserted += 1;
                }
                GraphOp::DeleteFile(file) => {
                    let removed_ids: Vec<String> = {
                        let mut stmt = tx.prepare("SELECT id FROM nodes WHERE file = ?1")?;
                        let rows = stmt.query_map(params![file], |row| row.get(0))?;
                        rows.collect::<rusqlite::Result<Vec<String>>>()?
                    };
                    for id in &removed_ids {
                        tx.execute(
                            "DELETE FROM edges WHERE source_id = ?1 OR target_id = ?1",
                            params![id],
                        )?;
                        summary.edges_removed += tx.changes() as usize;
                    }
                    summary.nodes_removed +=
                        tx.execute("DELETE FROM nodes WHERE file = ?1", params![file])?;
                }
                GraphOp::RemoveNode(id) => {
                    tx.execute(
                        "DELETE FROM edges WHERE source_id = ?1 OR target_id = ?1",
                        params![id],
                    )?;
                    summary.edges_removed += tx.changes() as usize;
                    summary.nodes_removed +=
                        tx.execute("DELETE FROM nodes WHERE id = ?1", params![id])?;
                }
                GraphOp::RemoveEdge {
                    source_id,
                    target_id,
                    kind,
                } => {
                    summary.edges_removed += tx.execute(
                        "DELETE FROM edges WHERE source_id = ?1 AND target_id = ?2 AND kind = ?3",
                        params![source_id, target_id, kind.to_string()],
                    )?;
                }
            }
        }
        tx.commit()?;
        Ok(summary)
    }

    async fn get_node(&self, id: &str) -> Result<Option<Node>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, kind, name, file, address, location, metadata FROM nodes WHERE id = ?1",
            params![id],
            Self::row_to_node,
        )
        .optional()
        .map_err(StorageError::from)
    }

    async fn nodes_by_kind(&self, kind: NodeKind) -> Result<Vec<Node>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, kind, name, file, address, location, metadata FROM nodes WHERE kind = ?1",
        )?;
        let rows = stmt.query_map(params![kind.to_string()], Self::row_to_node)?;
        Ok(rows.collect::<rusqlite::Result<Vec<Node>>>()?)
    }

    async fn outgoing(&self, id: &str, kind: Option<EdgeKind>) -> Result<Vec<Edge>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT source_id, target_id, kind, span, derived, metadata FROM edges
             WHERE source_id = ?1 AND (?2 IS NULL OR kind = ?2)",
        )?;
        let kind_str = kind.map(|k| k.to_string());
        let rows = stmt.query_map(params![id, kind_str], Self::row_to_edge)?;
        Ok(rows.collect::<rusqlite::Result<Vec<Edge>>>()?)
    }

    async fn incoming(&self, id: &str, kind: Option<EdgeKind>) -> Result<Vec<Edge>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT source_id, target_id, kind, span, derived, metadata FROM edges
             WHERE target_id = ?1 AND (?2 IS NULL OR kind = ?2)",
        )?;
        let kind_str = kind.map(|k| k.to_string());
        let rows = stmt.query_map(params![id, kind_str], Self::row_to_edge)?;
        Ok(rows.collect::<rusqlite::Result<Vec<Edge>>>()?)
    }

    async fn all_nodes(&self) -> Result<Vec<Node>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, kind, name, file, address, location, metadata FROM nodes")?;
        let rows = stmt.query_map([], Self::row_to_node)?;
        Ok(rows.collect::<rusqlite::Result<Vec<Node>>>()?)
    }

    async fn all_edges(&self) -> Result<Vec<Edge>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT source_id, target_id, kind, span, derived, metadata FROM edges")?;
        let rows = stmt.query_map([], Self::row_to_edge)?;
        Ok(rows.collect::<rusqlite::Result<Vec<Edge>>>()?)
    }

    async fn node_count(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM nodes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    async fn edge_count(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM edges", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
