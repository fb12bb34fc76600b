/// Turn bookkeeping for the energy-based scheduler.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Number of completed world ticks.
    pub turn: u64,

    /// Sequential identifier incremented by every attempted command.
    ///
    /// Combined with the game seed to derive the rolls of that attempt, so a
    /// replay of the same inputs reproduces the same dice.
    pub nonce: u64,

    /// Set by commands that change what the player can see; cleared once the
    /// engine has asked the vision collaborator for a fresh field of view.
    pub recompute_fov: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }
}
