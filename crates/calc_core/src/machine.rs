//! The committed evaluation stack.

use crate::format::format_value;
use crate::traits::Reducer;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A committed value plus the expression that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    pub value: f64,
    pub label: String,
}

impl StackEntry {
    /// An entry for a directly pushed number; its label is the number itself.
    pub fn literal(value: f64) -> Self {
        Self {
            value,
            label: format_value(value),
        }
    }
}

/// Binary operators available on the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Pops top two values (b, a), pushes (a + b).
    Add,
    /// Pops top two values (b, a), pushes (a - b).
    Sub,
    /// Pops top two values (b, a), pushes (a * b).
    Mul,
    /// Pops top two values (b, a), pushes (a / b).
    Div,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 4] = [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div];

    /// Symbol used in derivation labels.
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => 'x',
            BinaryOp::Div => '/',
        }
    }

    /// IEEE-754 semantics throughout; division by zero yields infinities or NaN.
    pub fn eval(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
        }
    }
}

/// Transitions understood by [`Stack`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Push(f64),
    Apply(BinaryOp),
    ClearAll,
}

/// Ordered evaluation stack; the last entry is the top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack {
    entries: Vec<StackEntry>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    pub fn top(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convenience for `reduce`.
    pub fn apply(self, action: Action) -> Self {
        self.reduce(action)
    }

    fn push(mut self, value: f64) -> Self {
        self.entries.push(StackEntry::literal(value));
        self
    }

    fn binary(mut self, op: BinaryOp) -> Self {
        if self.entries.len() < 2 {
            debug!(?op, depth = self.entries.len(), "insufficient operands; stack unchanged");
            return self;
        }

        let b = self.entries.pop().map(|e| e.value).unwrap_or_default();
        let a = self.entries.pop().map(|e| e.value).unwrap_or_default();
        let label = format!(
            "({} {} {})",
            format_value(a),
            op.symbol(),
            format_value(b)
        );
        self.entries.push(StackEntry {
            value: op.eval(a, b),
            label,
        });
        self
    }
}

impl Reducer for Stack {
    type Action = Action;

    fn reduce(self, action: Action) -> Self {
        match action {
            Action::Push(value) => self.push(value),
            Action::Apply(op) => self.binary(op),
            Action::ClearAll => Stack::new(),
        }
    }
}

impl FromIterator<StackEntry> for Stack {
    fn from_iter<I: IntoIterator<Item = StackEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
