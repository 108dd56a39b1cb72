//! Id generation, injected by the caller
//!
//! The store never invents ids; add commands ask an [`IdGenerator`] before
//! the action is built, so reducers stay pure.

use uuid::Uuid;

pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// `"1"`, `"2"`, ... Deterministic, used by default and in tests
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    last: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.last += 1;
        self.last.to_string()
    }
}

/// Random v4 UUIDs in simple (hyphen-free) form
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
