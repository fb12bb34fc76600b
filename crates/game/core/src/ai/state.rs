use crate::state::Position;

/// Behaviour a template starts its monsters with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AiBehavior {
    /// Never moves; waits every turn.
    Stationary,
    /// Chases the player in eight directions.
    #[default]
    Approach,
    /// Chases the player along the four cardinal directions only.
    GridMove,
}

impl AiBehavior {
    pub fn initial_state(self) -> AiState {
        match self {
            AiBehavior::Stationary => AiState::Stationary,
            AiBehavior::Approach => AiState::Approach { path: Vec::new() },
            AiBehavior::GridMove => AiState::GridMove { path: Vec::new() },
        }
    }
}

/// Decision state of one actor.
///
/// `Confused` and `Paralyzed` are overrides: they own the state they displaced
/// and restore it verbatim once `turns_remaining` runs out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiState {
    Stationary,
    Approach {
        /// Remaining waypoints toward the player, next step first.
        path: Vec<Position>,
    },
    GridMove {
        path: Vec<Position>,
    },
    Confused {
        previous: Box<AiState>,
        turns_remaining: u32,
    },
    Paralyzed {
        previous: Box<AiState>,
        turns_remaining: u32,
    },
    /// Placeholder for the player; commands come from input.
    PlayerProxy,
}

impl AiState {
    /// Wraps this state in a confusion override lasting `turns` activations.
    pub fn confused(self, turns: u32) -> Self {
        AiState::Confused {
            previous: Box::new(self),
            turns_remaining: turns,
        }
    }

    /// Wraps this state in a paralysis override lasting `turns` activations.
    pub fn paralyzed(self, turns: u32) -> Self {
        AiState::Paralyzed {
            previous: Box::new(self),
            turns_remaining: turns,
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, AiState::Confused { .. } | AiState::Paralyzed { .. })
    }

    pub fn is_paralyzed(&self) -> bool {
        matches!(self, AiState::Paralyzed { .. })
    }

    /// Turns left on the outermost override, if any.
    pub fn override_turns(&self) -> Option<u32> {
        match self {
            AiState::Confused {
                turns_remaining, ..
            }
            | AiState::Paralyzed {
                turns_remaining, ..
            } => Some(*turns_remaining),
            _ => None,
        }
    }

    /// Drops the outermost override, putting back the state it displaced.
    pub fn restore(&mut self) {
        let current = std::mem::replace(self, AiState::Stationary);
        *self = match current {
            AiState::Confused { previous, .. } | AiState::Paralyzed { previous, .. } => *previous,
            other => other,
        };
    }

    /// Counts down the outermost override by one activation.
    ///
    /// Restores the displaced state as soon as the count reaches zero. Returns
    /// `false` when there is no override to tick.
    pub fn tick_override(&mut self) -> bool {
        let expired = match self {
            AiState::Confused {
                turns_remaining, ..
            }
            | AiState::Paralyzed {
                turns_remaining, ..
            } => {
                *turns_remaining = turns_remaining.saturating_sub(1);
                *turns_remaining == 0
            }
            _ => return false,
        };
        if expired {
            self.restore();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behaviors_start_with_empty_paths() {
        assert_eq!(AiBehavior::Stationary.initial_state(), AiState::Stationary);
        assert_eq!(
            AiBehavior::GridMove.initial_state(),
            AiState::GridMove { path: Vec::new() }
        );
        assert_eq!(AiBehavior::default(), AiBehavior::Approach);
    }

    #[test]
    fn override_restores_previous_verbatim() {
        let original = AiState::Approach {
            path: vec![Position::new(1, 1), Position::new(2, 2)],
        };
        let mut state = original.clone().confused(2);

        assert!(state.tick_override());
        assert_eq!(state.override_turns(), Some(1));
        assert!(state.tick_override());
        assert_eq!(state, original);
        assert!(!state.tick_override());
    }

    #[test]
    fn nested_overrides_unwind_one_at_a_time() {
        let mut state = AiState::Stationary.confused(1).paralyzed(1);
        state.tick_override();
        assert_eq!(state, AiState::Stationary.confused(1));
        state.tick_override();
        assert_eq!(state, AiState::Stationary);
    }

    #[test]
    fn zero_turn_override_restores_on_restore() {
        let mut state = AiState::PlayerProxy.paralyzed(0);
        assert!(state.is_paralyzed());
        state.restore();
        assert_eq!(state, AiState::PlayerProxy);
    }
}
