//! Local filesystem store backend
//!
//! Each todo is kept as a pretty-printed JSON document at `<root>/todos/<id>.json`.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::types::{NewTodo, Todo, TodoId, TodoPatch};
use crate::Result;

use super::{parse_id, TodoStore};

const COLLECTION: &str = "todos";

/// Local filesystem store
pub struct LocalStore {
    root_path: PathBuf,
    /// Serializes operations so each one sees the collection as a whole
    lock: Mutex<()>,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `root_path`
    pub async fn open(root_path: impl Into<PathBuf>) -> Result<Self> {
        let root_path = root_path.into();
        fs::create_dir_all(root_path.join(COLLECTION)).await?;
        tracing::debug!(path = %root_path.display(), "Opened local todo store");

        Ok(Self {
            root_path,
            lock: Mutex::new(()),
        })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn collection_path(&self) -> PathBuf {
        self.root_path.join(COLLECTION)
    }

    fn document_path(&self, id: &TodoId) -> PathBuf {
        self.collection_path().join(format!("{}.json", id))
    }

    async fn read_document(&self, id: &TodoId) -> Result<Option<Todo>> {
        match fs::read(self.document_path(id)).await {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(&self, todo: &Todo) -> Result<()> {
        let path = self.document_path(&todo.id);
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, serde_json::to_vec_pretty(todo)?).await?;
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                tracing::warn!(path = %tmp_path.display(), error = %cleanup, "Failed to remove temp document");
            }
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for LocalStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo> {
        let todo = Todo::new(todo);
        let _guard = self.lock.lock().await;
        self.write_document(&todo).await?;
        Ok(todo)
    }

    async fn find_all(&self) -> Result<Vec<Todo>> {
        let mut todos = Vec::new();
        let _guard = self.lock.lock().await;

        let mut entries = fs::read_dir(self.collection_path()).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let data = fs::read(&path).await?;
            todos.push(serde_json::from_slice::<Todo>(&data)?);
        }

        todos.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(todos)
    }

    async fn find_by_id_and_update(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>> {
        let id = parse_id(id)?;
        let _guard = self.lock.lock().await;

        let Some(previous) = self.read_document(&id).await? else {
            return Ok(None);
        };

        let mut updated = previous.clone();
        updated.apply(&patch);
        self.write_document(&updated).await?;

        Ok(Some(previous))
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Todo>> {
        let id = parse_id(id)?;
        let _guard = self.lock.lock().await;

        let Some(todo) = self.read_document(&id).await? else {
            return Ok(None);
        };

        fs::remove_file(self.document_path(&id)).await?;
        Ok(Some(todo))
    }

    async fn close(&self) -> Result<()> {
        // Wait for any in-flight mutation to finish
        let _guard = self.lock.lock().await;
        tracing::debug!(path = %self.root_path.display(), "Closed local todo store");
        Ok(())
    }
}
