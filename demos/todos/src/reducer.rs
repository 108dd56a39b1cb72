//! Reducers - pure functions: (previous state, action) -> next state
//!
//! Each list has its own reducer; [`app_reducer`] combines them. `None` means
//! there is no previous state yet and the empty list is used.

use crate::action::{Goal, Todo, TodoAction};
use crate::state::AppState;

pub fn todos_reducer(state: Option<&Vec<Todo>>, action: &TodoAction) -> Vec<Todo> {
    let todos = state.map(Vec::as_slice).unwrap_or_default();

    match action {
        TodoAction::AddTodo(todo) => {
            let mut next = todos.to_vec();
            next.push(todo.clone());
            next
        }

        TodoAction::RemoveTodo { id } => todos.iter().filter(|t| &t.id != id).cloned().collect(),

        TodoAction::ToggleTodo { id } => todos
            .iter()
            .map(|todo| {
                if &todo.id == id {
                    Todo {
                        complete: !todo.complete,
                        ..todo.clone()
                    }
                } else {
                    todo.clone()
                }
            })
            .collect(),

        _ => todos.to_vec(),
    }
}

pub fn goals_reducer(state: Option<&Vec<Goal>>, action: &TodoAction) -> Vec<Goal> {
    let goals = state.map(Vec::as_slice).unwrap_or_default();

    match action {
        TodoAction::AddGoal(goal) => {
            let mut next = goals.to_vec();
            next.push(goal.clone());
            next
        }

        TodoAction::RemoveGoal { id } => goals.iter().filter(|g| &g.id != id).cloned().collect(),

        _ => goals.to_vec(),
    }
}

/// Root reducer: every action goes to both list reducers
pub fn app_reducer(state: Option<&AppState>, action: &TodoAction) -> AppState {
    AppState {
        todos: todos_reducer(state.map(|s| &s.todos), action),
        goals: goals_reducer(state.map(|s| &s.goals), action),
    }
}
