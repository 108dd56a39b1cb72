//! Actions - everything that can happen to the lists
//!
//! Names follow the SCREAMING_SNAKE_CASE convention (`ADD_TODO`, ...), so the
//! action log and the `--log-include` patterns read the same way.

use minidux::Action;
use serde::{Deserialize, Serialize};

/// A todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub name: String,
    pub complete: bool,
}

impl Todo {
    /// A new, incomplete todo
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            complete: false,
        }
    }
}

/// A goal item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
}

impl Goal {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Action, Clone, Debug, PartialEq)]
#[action(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    /// Store initialization, never dispatched by the app
    #[action(init, name = "@@INIT")]
    Init,

    AddTodo(Todo),
    RemoveTodo { id: String },
    ToggleTodo { id: String },

    AddGoal(Goal),
    RemoveGoal { id: String },
}

impl TodoAction {
    /// Name carried by an add action, if any
    pub fn added_name(&self) -> Option<&str> {
        match self {
            TodoAction::AddTodo(todo) => Some(&todo.name),
            TodoAction::AddGoal(goal) => Some(&goal.name),
            _ => None,
        }
    }
}
