//! The `checker` guard: refuses to add anything about bitcoin

use minidux::Verdict;

use crate::action::TodoAction;

/// Reason reported when an add is refused
pub const BAD_IDEA: &str = "Nope. That's a bad idea";

const FORBIDDEN: &str = "bitcoin";

/// Deny `AddTodo`/`AddGoal` whose name mentions bitcoin, in any casing
pub fn checker(action: &TodoAction) -> Verdict {
    match action.added_name() {
        Some(name) if name.to_lowercase().contains(FORBIDDEN) => Verdict::deny(BAD_IDEA),
        _ => Verdict::Allow,
    }
}
