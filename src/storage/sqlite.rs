//! SQLite storage backend
//!
//! One database file holds the key/value table used for persisted toggle
//! state and the node/edge tables of the persisted relationship store.

use super::traits::{KeyValueStore, OpenStore, RelationshipStore, StorageError, StorageResult};
use crate::graph::{GraphEdge, GraphNode};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed store
///
/// Thread-safe via internal mutex on the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Initialize the database schema
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            -- Small string settings (enabled-source set, ...)
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            -- Persisted relationship store
            CREATE TABLE IF NOT EXISTS graph_nodes (
                id TEXT PRIMARY KEY,
                entity_type TEXT NOT NULL,
                node_json TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS graph_edges (
                id TEXT PRIMARY KEY,
                source_id TEXT NOT NULL,
                target_id TEXT NOT NULL,
                relation_type TEXT NOT NULL,
                edge_json TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_graph_edges_source ON graph_edges(source_id);
            CREATE INDEX IF NOT EXISTS idx_graph_edges_target ON graph_edges(target_id);

            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))
    }

    /// Insert or replace a node in the relationship store
    pub fn save_node(&self, node: &GraphNode) -> StorageResult<()> {
        let conn = self.lock()?;
        let json = serde_json::to_string(node)?;
        conn.execute(
            r#"
            INSERT INTO graph_nodes (id, entity_type, node_json)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                entity_type = excluded.entity_type,
                node_json = excluded.node_json
            "#,
            params![node.id.as_str(), node.entity_type.as_str(), json],
        )?;
        Ok(())
    }

    /// Insert or replace an edge in the relationship store
    pub fn save_edge(&self, edge: &GraphEdge) -> StorageResult<()> {
        let conn = self.lock()?;
        let json = serde_json::to_string(edge)?;
        conn.execute(
            r#"
            INSERT INTO graph_edges (id, source_id, target_id, relation_type, edge_json)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                source_id = excluded.source_id,
                target_id = excluded.target_id,
                relation_type = excluded.relation_type,
                edge_json = excluded.edge_json
            "#,
            params![
                edge.id,
                edge.source.as_str(),
                edge.target.as_str(),
                edge.relation_type.as_str(),
                json
            ],
        )?;
        Ok(())
    }

    fn load_json_rows<T: serde::de::DeserializeOwned>(&self, sql: &str) -> StorageResult<Vec<T>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(serde_json::from_str(&row?)?);
        }
        Ok(out)
    }
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(deleted > 0)
    }
}

#[async_trait]
impl RelationshipStore for SqliteStore {
    async fn get_all_nodes(&self) -> StorageResult<Vec<GraphNode>> {
        self.load_json_rows("SELECT node_json FROM graph_nodes ORDER BY rowid")
    }

    async fn get_all_edges(&self) -> StorageResult<Vec<GraphEdge>> {
        self.load_json_rows("SELECT edge_json FROM graph_edges ORDER BY rowid")
    }
}
