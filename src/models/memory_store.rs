//! In-memory `Store` for handler tests.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use super::{
    session::{Session, Store},
    todo_model::Todo,
    user_model::User,
};
use crate::api::errors::TodoApiError;

#[derive(Debug, Clone, Default)]
struct Tables {
    todos: BTreeMap<i32, Todo>,
    users: BTreeMap<i32, User>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    opened: Arc<AtomicUsize>,
    open: Arc<AtomicUsize>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every `open_session` fails like an exhausted pool
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn insert_todo(&self, todo: Todo) {
        self.tables.lock().unwrap().todos.insert(todo.id, todo);
    }

    pub fn insert_user(&self, user: User) {
        self.tables.lock().unwrap().users.insert(user.id, user);
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.tables.lock().unwrap().todos.values().cloned().collect()
    }

    pub fn user(&self, user_id: i32) -> Option<User> {
        self.tables.lock().unwrap().users.get(&user_id).cloned()
    }

    /// Sessions opened since the store was created
    pub fn sessions_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Sessions opened and not yet dropped
    pub fn sessions_open(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

impl Store for MemoryStore {
    type Session = MemorySession;

    fn open_session(&self) -> Result<MemorySession, TodoApiError> {
        if self.unavailable {
            return Err(TodoApiError::DatabaseConnectionError);
        }

        let staged = self.tables.lock().unwrap().clone();

        self.opened.fetch_add(1, Ordering::SeqCst);
        self.open.fetch_add(1, Ordering::SeqCst);

        Ok(MemorySession {
            staged,
            tables: Arc::clone(&self.tables),
            open: Arc::clone(&self.open),
        })
    }
}

/// Works on a snapshot, `commit` publishes it
pub struct MemorySession {
    staged: Tables,
    tables: Arc<Mutex<Tables>>,
    open: Arc<AtomicUsize>,
}

impl Session for MemorySession {
    fn all_todos(&mut self) -> Result<Vec<Todo>, TodoApiError> {
        Ok(self.staged.todos.values().cloned().collect())
    }

    fn find_todo(&mut self, todo_id: i32) -> Result<Option<Todo>, TodoApiError> {
        Ok(self.staged.todos.get(&todo_id).cloned())
    }

    fn delete_todo(&mut self, todo_id: i32) -> Result<usize, TodoApiError> {
        Ok(self.staged.todos.remove(&todo_id).map_or(0, |_| 1))
    }

    fn find_user(&mut self, user_id: i32) -> Result<Option<User>, TodoApiError> {
        Ok(self.staged.users.get(&user_id).cloned())
    }

    fn set_password(&mut self, user_id: i32, new_hash: &str) -> Result<(), TodoApiError> {
        let user = self
            .staged
            .users
            .get_mut(&user_id)
            .ok_or_else(|| TodoApiError::NotFound(String::from("User")))?;

        user.hashed_password = new_hash.to_string();

        Ok(())
    }

    fn commit(&mut self) -> Result<(), TodoApiError> {
        *self.tables.lock().unwrap() = self.staged.clone();

        Ok(())
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod test {
    use super::MemoryStore;
    use crate::models::{
        session::{Session, Store},
        todo_model::Todo,
    };

    fn todo(id: i32) -> Todo {
        Todo {
            id,
            title: format!("todo {}", id),
            description: String::new(),
            priority: 1,
            complete: false,
            owner_id: 1,
        }
    }

    #[test]
    fn test_uncommitted_changes_are_discarded() {
        let store = MemoryStore::new();
        store.insert_todo(todo(1));

        {
            let mut session = store.open_session().unwrap();
            assert_eq!(session.delete_todo(1).unwrap(), 1);
            assert_eq!(store.sessions_open(), 1);
        }

        assert_eq!(store.todos().len(), 1);
        assert_eq!(store.sessions_open(), 0);
    }

    #[test]
    fn test_commit_publishes_changes() {
        let store = MemoryStore::new();
        store.insert_todo(todo(1));
        store.insert_todo(todo(2));

        let mut session = store.open_session().unwrap();
        session.delete_todo(2).unwrap();
        session.commit().unwrap();
        drop(session);

        assert_eq!(store.todos(), vec![todo(1)]);
        assert_eq!(store.sessions_opened(), 1);
    }
}
