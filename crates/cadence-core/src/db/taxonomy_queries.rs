//! Taxonomy node lookup and seeding.

use rusqlite::{params, Connection, OptionalExtension};

use super::utils::{id_column, optional_id_column, parse_column};
use crate::{
    error::{DatabaseResultExt, Result, SchedulerError},
    models::{TaxonomyKind, TaxonomyNode},
};

const INSERT_NODE_SQL: &str = "INSERT INTO taxonomy_nodes (kind, name, parent_id) VALUES (?1, ?2, ?3)";
const SELECT_NODE_SQL: &str = "SELECT id, kind, name, parent_id FROM taxonomy_nodes WHERE id = ?1";
const SELECT_NODES_SQL: &str =
    "SELECT id, kind, name, parent_id FROM taxonomy_nodes ORDER BY COALESCE(parent_id, id), id";

fn build_node_from_row(row: &rusqlite::Row) -> rusqlite::Result<TaxonomyNode> {
    Ok(TaxonomyNode {
        id: id_column(row, 0)?,
        kind: parse_column(row, 1)?,
        name: row.get(2)?,
        parent_id: optional_id_column(row, 3)?,
    })
}

pub(crate) fn find_node(conn: &Connection, id: u64) -> Result<Option<TaxonomyNode>> {
    conn.query_row(SELECT_NODE_SQL, params![id as i64], build_node_from_row)
        .optional()
        .db_context("Failed to query taxonomy node")
}

impl super::Database {
    /// Adds a taxonomy node under a parent of the kind one level up.
    pub fn add_taxonomy_node(
        &mut self,
        kind: TaxonomyKind,
        name: &str,
        parent_id: Option<u64>,
    ) -> Result<TaxonomyNode> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SchedulerError::invalid_input("name").with_reason("Name cannot be empty"));
        }

        match (kind.parent_kind(), parent_id) {
            (None, Some(_)) => {
                return Err(SchedulerError::invalid_input("parent_id")
                    .with_reason("A discipline cannot have a parent"));
            }
            (Some(expected), None) => {
                return Err(SchedulerError::invalid_input("parent_id").with_reason(format!(
                    "A {} needs a parent {}",
                    kind.as_str(),
                    expected.as_str()
                )));
            }
            (Some(expected), Some(parent)) => {
                let node = find_node(&self.connection, parent)?.ok_or_else(|| {
                    SchedulerError::invalid_input("parent_id")
                        .with_reason(format!("No taxonomy node with ID {parent}"))
                })?;
                if node.kind != expected {
                    return Err(SchedulerError::invalid_input("parent_id").with_reason(format!(
                        "Node {parent} is a {}, expected a {}",
                        node.kind.as_str(),
                        expected.as_str()
                    )));
                }
            }
            (None, None) => {}
        }

        self.connection
            .execute(
                INSERT_NODE_SQL,
                params![kind.as_str(), name, parent_id.map(|id| id as i64)],
            )
            .db_context("Failed to insert taxonomy node")?;

        Ok(TaxonomyNode {
            id: self.connection.last_insert_rowid() as u64,
            kind,
            name: name.to_string(),
            parent_id,
        })
    }

    /// Lists every taxonomy node.
    pub fn list_taxonomy_nodes(&self) -> Result<Vec<TaxonomyNode>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_NODES_SQL)
            .db_context("Failed to prepare query")?;
        let nodes = stmt
            .query_map([], build_node_from_row)
            .db_context("Failed to query taxonomy nodes")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch taxonomy nodes")?;

        Ok(nodes)
    }
}
