//! In-memory store backend

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::{NewTodo, Todo, TodoPatch};
use crate::Result;

use super::{parse_id, TodoStore};

/// In-memory store, kept in insertion order. Contents are lost on shutdown.
#[derive(Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo> {
        let todo = Todo::new(todo);
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn find_all(&self) -> Result<Vec<Todo>> {
        Ok(self.todos.read().await.clone())
    }

    async fn find_by_id_and_update(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>> {
        let id = parse_id(id)?;
        let mut todos = self.todos.write().await;

        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        let previous = todo.clone();
        todo.apply(&patch);
        Ok(Some(previous))
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Todo>> {
        let id = parse_id(id)?;
        let mut todos = self.todos.write().await;

        Ok(todos
            .iter()
            .position(|t| t.id == id)
            .map(|index| todos.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoStatus;
    use crate::Error;

    #[tokio::test]
    async fn test_memory_store_lifecycle() {
        let store = MemoryStore::new();

        let first = store.insert(NewTodo::new("first")).await.unwrap();
        let second = store
            .insert(NewTodo::new("second").with_status(TodoStatus::Done))
            .await
            .unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![first.clone(), second.clone()]);

        let previous = store
            .find_by_id_and_update(&first.id.to_string(), TodoPatch::title("first, edited"))
            .await
            .unwrap()
            .expect("todo should exist");
        assert_eq!(previous, first);

        let all = store.find_all().await.unwrap();
        assert_eq!(all[0].title, "first, edited");
        assert_eq!(all[0].created_at, first.created_at);

        let deleted = store
            .find_by_id_and_delete(&second.id.to_string())
            .await
            .unwrap();
        assert_eq!(deleted, Some(second));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_missing_and_malformed_ids() {
        let store = MemoryStore::new();
        store.insert(NewTodo::new("only")).await.unwrap();

        let missing = uuid::Uuid::new_v4().to_string();
        assert!(store
            .find_by_id_and_update(&missing, TodoPatch::title("x"))
            .await
            .unwrap()
            .is_none());
        assert!(store.find_by_id_and_delete(&missing).await.unwrap().is_none());

        let result = store.find_by_id_and_delete("42").await;
        assert!(matches!(result, Err(Error::InvalidId(_))));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }
}
