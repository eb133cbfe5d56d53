//! Undo/redo log for active list edits

use std::fmt;

use crate::domain::Course;

/// A single edit of the active list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(Course),
    Remove(Course),
}

impl Action {
    /// The action that reverts this one.
    pub fn inverse(&self) -> Action {
        match self {
            Action::Add(c) => Action::Remove(c.clone()),
            Action::Remove(c) => Action::Add(c.clone()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add(c) => write!(f, "Add({})", c.name),
            Action::Remove(c) => write!(f, "Remove({})", c.name),
        }
    }
}

/// Linear history: recording a new action discards the redo branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    past: Vec<Action>,
    future: Vec<Action>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.future.clear();
        self.past.push(action);
    }

    /// Step back; returns the action to revert.
    pub fn back(&mut self) -> Option<Action> {
        let action = self.past.pop()?;
        self.future.push(action.clone());
        Some(action)
    }

    /// Step forward; returns the action to re-apply.
    pub fn forward(&mut self) -> Option<Action> {
        let action = self.future.pop()?;
        self.past.push(action.clone());
        Some(action)
    }

    pub fn reset(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn past(&self) -> &[Action] {
        &self.past
    }

    pub fn future(&self) -> &[Action] {
        &self.future
    }

    pub fn is_empty(&self) -> bool {
        self.past.is_empty() && self.future.is_empty()
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.past.as_slice() {
            [] => write!(f, "None")?,
            [only] => write!(f, "None <- {only}")?,
            [.., last] => write!(f, "... <- {last}")?,
        }
        write!(f, " <- Current -> ")?;
        match self.future.as_slice() {
            [] => write!(f, "None"),
            [only] => write!(f, "{only} -> None"),
            [.., next] => write!(f, "{next} -> ..."),
        }
    }
}
