//! Application state - single source of truth

use serde::{Deserialize, Serialize};

use crate::action::{Goal, Todo};

/// Both lists, replaced wholesale by the reducer on every dispatch
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub todos: Vec<Todo>,
    pub goals: Vec<Goal>,
}

impl AppState {
    pub fn todo(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    /// Number of todos not yet complete
    pub fn open_todos(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.complete).count()
    }
}
