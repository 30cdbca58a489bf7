pub mod dispatcher;
pub mod error;
pub mod format;
pub mod input;
pub mod keymap;
pub mod machine;
pub mod queue;
/// The `calc_core` crate provides the evaluation engine behind the Calc page.
/// It is a small Reverse Polish Notation interpreter driven by discrete commands,
/// with no dependency on the browser.
///
/// Key components:
/// - **Traits**: `Reducer` (pure `(state, action) -> state'` transitions).
/// - **Input Buffer**: the numeric literal currently being typed.
/// - **Stack Machine**: the committed evaluation stack and its derivation labels.
/// - **Dispatcher**: maps `Command`s (and bound key chords) onto the buffer and the stack.
/// - **Keymap / Queue**: the key binding table and an arrival-ordered command queue.
pub mod traits;

pub use dispatcher::{dispatch, CalcState, Command, Digit};
pub use error::{CommandError, KeymapError};
pub use input::InputBuffer;
pub use keymap::{Binding, KeyChord, Keymap};
pub use machine::{Action, BinaryOp, Stack, StackEntry};
pub use queue::{CommandQueue, Input};
pub use traits::Reducer;
