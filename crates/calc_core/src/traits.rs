/// A pure state machine: given the current state and an action, returns the next state.
///
/// Implementors take `self` by value so a transition can never be observed half-applied;
/// callers keep the previous value (by cloning) if they need it.
pub trait Reducer: Sized {
    type Action;

    /// Consumes the current state and returns the state after `action`.
    fn reduce(self, action: Self::Action) -> Self;

    /// Applies a sequence of actions in order.
    fn reduce_all<I>(self, actions: I) -> Self
    where
        I: IntoIterator<Item = Self::Action>,
    {
        actions.into_iter().fold(self, Self::reduce)
    }
}
