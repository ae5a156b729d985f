//! Document store abstraction
//!
//! Provides a unified interface over the in-memory and local filesystem backends

use async_trait::async_trait;
use std::path::PathBuf;

use crate::types::{NewTodo, Todo, TodoId, TodoPatch};
use crate::{Error, Result};

pub mod local;
pub mod memory;

/// Document store trait
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a new todo, returning the stored record with its id and creation time
    async fn insert(&self, todo: NewTodo) -> Result<Todo>;

    /// Return every stored todo, oldest first
    async fn find_all(&self) -> Result<Vec<Todo>>;

    /// Apply `patch` to the todo with `id`
    ///
    /// Returns the record as it was before the update, or `None` if no such todo exists.
    async fn find_by_id_and_update(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>>;

    /// Remove the todo with `id`, returning it, or `None` if no such todo exists
    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Todo>>;

    /// Release any resources held by the store
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Parse a path identifier into a todo id
pub fn parse_id(id: &str) -> Result<TodoId> {
    TodoId::parse_str(id).map_err(|_| Error::InvalidId(id.to_string()))
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Memory,
    Local { root_path: PathBuf },
}

impl StoreConfig {
    /// Parse a database connection string (`memory://` or `file://<path>`)
    pub fn from_url(url: &str) -> Result<Self> {
        let url = url.trim();

        if let Some(rest) = url.strip_prefix("memory://") {
            if !rest.is_empty() {
                return Err(Error::connection(format!(
                    "memory store takes no path, got '{}'",
                    url
                )));
            }
            return Ok(StoreConfig::Memory);
        }

        if let Some(path) = url.strip_prefix("file://") {
            if path.is_empty() {
                return Err(Error::connection("file store requires a path"));
            }
            return Ok(StoreConfig::Local {
                root_path: PathBuf::from(path),
            });
        }

        Err(Error::connection(format!(
            "unsupported database url '{}', expected memory:// or file://<path>",
            url
        )))
    }
}

/// Create a store from config
pub async fn create_store(config: StoreConfig) -> Result<Box<dyn TodoStore>> {
    match config {
        StoreConfig::Memory => Ok(Box::new(memory::MemoryStore::new())),
        StoreConfig::Local { root_path } => {
            let store = local::LocalStore::open(root_path).await?;
            Ok(Box::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_from_url() {
        assert_eq!(StoreConfig::from_url("memory://").unwrap(), StoreConfig::Memory);
        assert_eq!(
            StoreConfig::from_url(" file://./data ").unwrap(),
            StoreConfig::Local {
                root_path: PathBuf::from("./data")
            }
        );
        assert_eq!(
            StoreConfig::from_url("file:///var/lib/todos").unwrap(),
            StoreConfig::Local {
                root_path: PathBuf::from("/var/lib/todos")
            }
        );

        assert!(matches!(
            StoreConfig::from_url("mongodb://localhost:27017/todos"),
            Err(Error::Connection(_))
        ));
        assert!(matches!(
            StoreConfig::from_url("file://"),
            Err(Error::Connection(_))
        ));
        assert!(matches!(
            StoreConfig::from_url("memory://extra"),
            Err(Error::Connection(_))
        ));
    }

    #[test]
    fn test_parse_id() {
        let id = TodoId::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_id("not-an-id"), Err(Error::InvalidId(_))));
    }
}
