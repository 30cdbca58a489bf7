//! Arrival-ordered queue of user input.

use crate::dispatcher::{dispatch, CalcState, Command};
use std::collections::VecDeque;

/// One queued input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    /// New content of the editable input field.
    Edit(String),
}

impl From<Command> for Input {
    fn from(command: Command) -> Self {
        Input::Command(command)
    }
}

/// Events that arrived faster than they were processed. [`CommandQueue::drain`]
/// applies them strictly in arrival order.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Input>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, input: impl Into<Input>) {
        self.pending.push_back(input.into());
    }

    pub fn push_edit(&mut self, text: &str) {
        self.pending.push_back(Input::Edit(text.to_string()));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Applies every queued event to `state` and returns the result.
    pub fn drain(&mut self, state: CalcState) -> CalcState {
        self.pending
            .drain(..)
            .fold(state, |state, input| match input {
                Input::Command(command) => dispatch(state, command),
                Input::Edit(text) => state.edit(&text),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::CommandQueue;
    use crate::dispatcher::{CalcState, Command};
    use crate::keymap::Keymap;
    use crate::machine::{BinaryOp, StackEntry};

    #[test]
    fn drains_in_arrival_order() {
        let keymap = Keymap::default();
        let mut queue = CommandQueue::new();
        for combo in ["1", "0", "enter", "4", "minus"] {
            queue.push(keymap.resolve(combo).unwrap());
        }
        assert_eq!(queue.len(), 5);

        let state = queue.drain(CalcState::new());
        assert!(queue.is_empty());
        assert_eq!(
            state.stack.entries(),
            &[StackEntry {
                value: 6.0,
                label: "(10 - 4)".to_string()
            }]
        );
    }

    #[test]
    fn reordering_changes_the_result() {
        let keymap = Keymap::default();
        let mut queue = CommandQueue::new();
        for combo in ["4", "enter", "1", "0", "minus"] {
            queue.push(keymap.resolve(combo).unwrap());
        }
        let state = queue.drain(CalcState::new());
        assert_eq!(state.stack.top().map(|e| e.value), Some(-6.0));
    }

    #[test]
    fn edits_interleave_with_commands() {
        let mut queue = CommandQueue::new();
        queue.push_edit("2.5");
        queue.push(Command::Submit);
        queue.push_edit("4");
        queue.push(Command::Operator(BinaryOp::Mul));
        queue.push(Command::ClearAll);
        queue.push_edit("7");

        let state = queue.drain(CalcState::new());
        assert!(state.stack.is_empty());
        assert_eq!(state.input.as_str(), "7");
    }

    #[test]
    fn draining_an_empty_queue_is_identity() {
        let mut queue = CommandQueue::new();
        let state = CalcState::new().edit("3");
        assert_eq!(queue.drain(state.clone()), state);
    }
}
