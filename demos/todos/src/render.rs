//! Plain-text rendering of both lists

use std::fmt::Write;

use crate::state::AppState;

/// Render todos and goals; completed todos are struck through with `[x]`
pub fn render(state: &AppState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Todos ({} open)", state.open_todos());
    if state.todos.is_empty() {
        out.push_str("  (none)\n");
    }
    for todo in &state.todos {
        let mark = if todo.complete { 'x' } else { ' ' };
        let _ = writeln!(out, "  [{mark}] {}  #{}", todo.name, todo.id);
    }

    out.push_str("Goals\n");
    if state.goals.is_empty() {
        out.push_str("  (none)\n");
    }
    for goal in &state.goals {
        let _ = writeln!(out, "  - {}  #{}", goal.name, goal.id);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Goal, Todo};

    #[test]
    fn test_render_empty() {
        assert_eq!(
            render(&AppState::default()),
            "Todos (0 open)\n  (none)\nGoals\n  (none)\n"
        );
    }

    #[test]
    fn test_render_lists() {
        let mut done = Todo::new("2", "Read");
        done.complete = true;
        let state = AppState {
            todos: vec![Todo::new("1", "Learn Rust"), done],
            goals: vec![Goal::new("3", "Ship it")],
        };

        assert_eq!(
            render(&state),
            "Todos (1 open)\n  [ ] Learn Rust  #1\n  [x] Read  #2\nGoals\n  - Ship it  #3\n"
        );
    }
}
