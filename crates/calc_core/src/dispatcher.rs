//! Command vocabulary and the dispatcher that routes commands onto the
//! input buffer and the stack machine.

use crate::error::CommandError;
use crate::input::InputBuffer;
use crate::machine::{Action, BinaryOp, Stack};
use crate::traits::Reducer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// A single decimal digit, `0` through `9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn new(digit: u8) -> Option<Self> {
        (digit <= 9).then_some(Self(digit))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// Discrete user intents. Each variant's payload shape is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Command {
    Digit(Digit),
    Dot,
    Backspace,
    /// Clears the input buffer only.
    Clear,
    /// Clears the input buffer and the stack.
    ClearAll,
    Submit,
    Operator(BinaryOp),
}

impl Command {
    /// Every command, in a stable order.
    pub fn all() -> impl Iterator<Item = Command> {
        (0..=9u8)
            .map(|d| Command::Digit(Digit(d)))
            .chain([
                Command::Dot,
                Command::Backspace,
                Command::Clear,
                Command::ClearAll,
                Command::Submit,
            ])
            .chain(BinaryOp::ALL.into_iter().map(Command::Operator))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Digit(d) => write!(f, "Digit{}", d.as_char()),
            Command::Dot => f.write_str("Dot"),
            Command::Backspace => f.write_str("Backspace"),
            Command::Clear => f.write_str("Clear"),
            Command::ClearAll => f.write_str("ClearAll"),
            Command::Submit => f.write_str("Submit"),
            Command::Operator(BinaryOp::Add) => f.write_str("Add"),
            Command::Operator(BinaryOp::Sub) => f.write_str("Sub"),
            Command::Operator(BinaryOp::Mul) => f.write_str("Mul"),
            Command::Operator(BinaryOp::Div) => f.write_str("Div"),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let command = match name {
            "Dot" => Command::Dot,
            "Backspace" => Command::Backspace,
            "Clear" => Command::Clear,
            "ClearAll" => Command::ClearAll,
            "Submit" => Command::Submit,
            "Add" => Command::Operator(BinaryOp::Add),
            "Sub" => Command::Operator(BinaryOp::Sub),
            "Mul" => Command::Operator(BinaryOp::Mul),
            "Div" => Command::Operator(BinaryOp::Div),
            other => {
                let mut rest = other
                    .strip_prefix("Digit")
                    .ok_or_else(|| CommandError::UnknownCommand(other.to_string()))?
                    .chars();
                match (rest.next().and_then(Digit::from_char), rest.next()) {
                    (Some(d), None) => Command::Digit(d),
                    _ => return Err(CommandError::UnknownCommand(other.to_string())),
                }
            }
        };
        Ok(command)
    }
}

impl TryFrom<String> for Command {
    type Error = CommandError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<Command> for String {
    fn from(command: Command) -> Self {
        command.to_string()
    }
}

/// The whole calculator session: pending input plus the committed stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalcState {
    pub input: InputBuffer,
    pub stack: Stack,
}

impl CalcState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the input buffer with text from the editable field.
    pub fn edit(self, text: &str) -> Self {
        Self {
            input: self.input.replace(text),
            stack: self.stack,
        }
    }

    /// Pushes the pending input if there is any and it parses.
    ///
    /// Returns the new state and whether a value was committed.
    fn commit_pending(self) -> (Self, bool) {
        if !self.input.is_pending() {
            return (self, false);
        }
        match self.input.parse() {
            Some(value) => {
                let state = Self {
                    input: self.input.clear(),
                    stack: self.stack.apply(Action::Push(value)),
                };
                (state, true)
            }
            None => {
                debug!(input = %self.input, "pending input does not parse; not committed");
                (self, false)
            }
        }
    }
}

impl Reducer for CalcState {
    type Action = Command;

    fn reduce(self, command: Command) -> Self {
        dispatch(self, command)
    }
}

/// Applies one command and returns the next state.
pub fn dispatch(state: CalcState, command: Command) -> CalcState {
    trace!(%command, "dispatch");
    let CalcState { input, stack } = state;
    match command {
        Command::Digit(d) => CalcState {
            input: input.append(d.as_char()),
            stack,
        },
        Command::Dot => CalcState {
            input: input.append('.'),
            stack,
        },
        Command::Backspace => CalcState {
            input: input.backspace(),
            stack,
        },
        Command::Clear => CalcState {
            input: input.clear(),
            stack,
        },
        Command::ClearAll => CalcState {
            input: input.clear(),
            stack: stack.apply(Action::ClearAll),
        },
        Command::Submit => {
            let (state, committed) = CalcState { input, stack }.commit_pending();
            if !committed {
                debug!("submit ignored; nothing to commit");
            }
            state
        }
        Command::Operator(op) => {
            // Phase 1: pending input counts as if Enter had been pressed.
            let (state, _) = CalcState { input, stack }.commit_pending();
            // Phase 2: the operator itself.
            CalcState {
                input: state.input,
                stack: state.stack.apply(Action::Apply(op)),
            }
        }
    }
}
