//! Tests for #[derive(Action)] macro

use minidux::{Action, InitAction};

#[derive(Action, Clone, Debug, PartialEq)]
enum Basic {
    #[action(init)]
    Init,
    Increment,
    SetValue(i32),
    Rename { name: String },
}

#[test]
fn test_variant_names() {
    assert_eq!(Basic::Init.name(), "Init");
    assert_eq!(Basic::Increment.name(), "Increment");
    assert_eq!(Basic::SetValue(3).name(), "SetValue");
    assert_eq!(
        Basic::Rename {
            name: "x".to_string()
        }
        .name(),
        "Rename"
    );
}

#[test]
fn test_init_marker() {
    assert_eq!(Basic::init(), Basic::Init);
}

#[test]
fn test_default_summary_uses_debug() {
    assert_eq!(Basic::SetValue(7).summary(), "SetValue(7)");
}

#[derive(Action, Clone, Debug, PartialEq)]
#[action(rename_all = "SCREAMING_SNAKE_CASE")]
enum Screaming {
    #[action(init, name = "@@INIT")]
    Init,
    AddTodo(String),
    ToggleTodo { id: u32 },
}

#[test]
fn test_rename_all_and_override() {
    assert_eq!(Screaming::init().name(), "@@INIT");
    assert_eq!(Screaming::AddTodo("x".into()).name(), "ADD_TODO");
    assert_eq!(Screaming::ToggleTodo { id: 1 }.name(), "TOGGLE_TODO");
}

#[derive(Action, Clone, Debug)]
#[action(rename_all = "snake_case")]
enum Snake {
    RemoveGoal,
    #[action(name = "custom")]
    Other,
}

#[test]
fn test_snake_case() {
    assert_eq!(Snake::RemoveGoal.name(), "remove_goal");
    assert_eq!(Snake::Other.name(), "custom");
}

#[derive(Action, Clone, Debug)]
enum Generic<T: Clone + std::fmt::Debug + 'static> {
    #[action(init)]
    Init,
    Put(T),
}

#[test]
fn test_generic_enum() {
    assert_eq!(Generic::<u8>::Put(1).name(), "Put");
    assert!(matches!(Generic::<u8>::init(), Generic::Init));
}
