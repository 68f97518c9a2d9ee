//! Edge-triggered notifications raised by a movement tick.

/// State change observed during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementEvent {
    /// Vertical velocity went from rising to falling.
    ApexReached,
    /// The floor probe found floor after finding none the tick before.
    Landed,
    /// The floor probe lost the floor it found the tick before.
    LeftFloor,
}

/// Notifications from one tick, in the order they fired.
pub type MovementEvents = Vec<MovementEvent>;
