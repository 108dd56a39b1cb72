//! User commands and their translation into actions
//!
//! Commands come either as positional arguments (`add-todo "Learn Rust"
//! toggle-todo 1`) or as stdin lines (`add-todo Learn Rust`). Both forms are a
//! keyword followed by one argument: a name for adds, an id otherwise.

use std::str::FromStr;

use thiserror::Error;

use crate::action::{Goal, Todo, TodoAction};
use crate::ids::IdGenerator;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, expected one of: {known}", known = KEYWORDS.join(", "))]
    Unknown(String),

    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("empty command")]
    Empty,
}

const KEYWORDS: [&str; 5] = [
    "add-todo",
    "toggle-todo",
    "remove-todo",
    "add-goal",
    "remove-goal",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTodo { name: String },
    ToggleTodo { id: String },
    RemoveTodo { id: String },
    AddGoal { name: String },
    RemoveGoal { id: String },
}

impl Command {
    /// Build a command from its keyword and argument
    pub fn from_parts(keyword: &str, argument: Option<&str>) -> Result<Self, CommandError> {
        let keyword = keyword.trim();
        let argument = argument.map(str::trim).filter(|arg| !arg.is_empty());

        let (command, expected, build): (&'static str, &'static str, fn(String) -> Command) =
            match keyword {
                "add-todo" => ("add-todo", "a name", |name| Command::AddTodo { name }),
                "toggle-todo" => ("toggle-todo", "an id", |id| Command::ToggleTodo { id }),
                "remove-todo" => ("remove-todo", "an id", |id| Command::RemoveTodo { id }),
                "add-goal" => ("add-goal", "a name", |name| Command::AddGoal { name }),
                "remove-goal" => ("remove-goal", "an id", |id| Command::RemoveGoal { id }),
                "" => return Err(CommandError::Empty),
                other => return Err(CommandError::Unknown(other.to_string())),
            };

        argument
            .map(|arg| build(arg.to_string()))
            .ok_or(CommandError::MissingArgument { command, expected })
    }

    /// Parse positional arguments as keyword/argument pairs
    pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Vec<Self>, CommandError> {
        args.chunks(2)
            .map(|pair| {
                let keyword = pair[0].as_ref();
                Command::from_parts(keyword, pair.get(1).map(|arg| arg.as_ref()))
            })
            .collect()
    }

    /// Turn the command into an action; adds draw a fresh id from `ids`
    pub fn into_action(self, ids: &mut dyn IdGenerator) -> TodoAction {
        match self {
            Command::AddTodo { name } => TodoAction::AddTodo(Todo::new(ids.next_id(), name)),
            Command::ToggleTodo { id } => TodoAction::ToggleTodo { id },
            Command::RemoveTodo { id } => TodoAction::RemoveTodo { id },
            Command::AddGoal { name } => TodoAction::AddGoal(Goal::new(ids.next_id(), name)),
            Command::RemoveGoal { id } => TodoAction::RemoveGoal { id },
        }
    }
}

/// Parses one stdin line: the keyword, then the rest of the line as argument
impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => Command::from_parts(keyword, Some(rest)),
            None => Command::from_parts(line, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    #[test]
    fn test_parse_line_keeps_spaces_in_names() {
        let command: Command = "add-todo  Learn Rust properly ".parse().unwrap();
        assert_eq!(
            command,
            Command::AddTodo {
                name: "Learn Rust properly".into()
            }
        );
    }

    #[test]
    fn test_parse_line_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "launch-rocket now".parse::<Command>(),
            Err(CommandError::Unknown("launch-rocket".into()))
        );
        assert_eq!(
            "toggle-todo".parse::<Command>(),
            Err(CommandError::MissingArgument {
                command: "toggle-todo",
                expected: "an id"
            })
        );
    }

    #[test]
    fn test_parse_args_pairs() {
        let commands =
            Command::parse_args(&["add-goal", "Ship it", "remove-todo", "3"]).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::AddGoal {
                    name: "Ship it".into()
                },
                Command::RemoveTodo { id: "3".into() },
            ]
        );
    }

    #[test]
    fn test_parse_args_dangling_keyword() {
        let err = Command::parse_args(&["add-todo", "x", "add-goal"]).unwrap_err();
        assert_eq!(
            err,
            CommandError::MissingArgument {
                command: "add-goal",
                expected: "a name"
            }
        );
    }

    #[test]
    fn test_into_action_draws_ids_for_adds_only() {
        let mut ids = SequentialIds::new();

        let action = Command::AddTodo { name: "x".into() }.into_action(&mut ids);
        assert_eq!(action, TodoAction::AddTodo(Todo::new("1", "x")));

        let action = Command::ToggleTodo { id: "1".into() }.into_action(&mut ids);
        assert_eq!(action, TodoAction::ToggleTodo { id: "1".into() });

        let action = Command::AddGoal { name: "g".into() }.into_action(&mut ids);
        assert_eq!(action, TodoAction::AddGoal(Goal::new("2", "g")));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CommandError::Unknown("x".into()).to_string(),
            "unknown command `x`, expected one of: add-todo, toggle-todo, remove-todo, add-goal, remove-goal"
        );
    }
}
