/// Game configuration constants and tunable parameters.
///
/// A single value is handed to the [`TurnEngine`](crate::engine::TurnEngine) at
/// construction; commands and hooks read it through the dispatcher instead of
/// consulting global settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Energy spent by one action slot.
    pub energy_threshold: u32,
    /// Refill granted per world tick to actors whose template omits one.
    pub default_refill: u32,

    /// Sides of the hit die rolled against the target number.
    pub hit_die_sides: u32,
    /// Base of the target number (`base_target + AC + attacker level`).
    pub base_target: i32,

    /// Number of distinct inventory slots (letters) available per actor.
    pub inventory_capacity: usize,
    /// Maximum number of commands resolved in a single chain.
    pub max_chain_len: usize,
    /// Maximum number of world ticks run while waiting for the player to regain energy.
    pub max_catchup_ticks: u32,

    /// Radius of the player's field of view.
    pub fov_radius: u32,
    /// Extra path cost for tiles currently occupied by another actor.
    pub occupied_tile_penalty: u32,

    /// Percent chance per tick that a regenerating actor recovers one hit point.
    pub regen_chance: u32,
    /// Per-mille chance per tick that a new monster appears out of sight.
    pub spawn_chance: u32,
    /// Percent chance that a trapped actor wriggles free on a struggle.
    pub wriggle_escape_chance: u32,
    /// Turns an actor stays caught in a bear trap.
    pub bear_trap_turns: u32,
    /// Turns of confusion or paralysis applied by gas traps.
    pub gas_trap_turns: u32,

    /// Experience needed to advance from level 0 (scaled by `level_up_factor`).
    pub level_up_base: u32,
    pub level_up_factor: u32,
    /// Maximum hit points gained per level.
    pub level_up_hp: u32,

    /// Whether a player command that fails still costs an action slot.
    pub charge_failed_commands: bool,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Inventory letters run from `a` to `z`.
    pub const MAX_INVENTORY_SLOTS: usize = 26;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ENERGY_THRESHOLD: u32 = 100;
    pub const DEFAULT_HIT_DIE_SIDES: u32 = 20;
    pub const DEFAULT_BASE_TARGET: i32 = 10;
    pub const DEFAULT_MAX_CHAIN_LEN: usize = 32;
    pub const DEFAULT_FOV_RADIUS: u32 = 8;

    pub fn new() -> Self {
        Self {
            energy_threshold: Self::DEFAULT_ENERGY_THRESHOLD,
            default_refill: Self::DEFAULT_ENERGY_THRESHOLD,
            hit_die_sides: Self::DEFAULT_HIT_DIE_SIDES,
            base_target: Self::DEFAULT_BASE_TARGET,
            inventory_capacity: Self::MAX_INVENTORY_SLOTS,
            max_chain_len: Self::DEFAULT_MAX_CHAIN_LEN,
            max_catchup_ticks: 64,
            fov_radius: Self::DEFAULT_FOV_RADIUS,
            occupied_tile_penalty: 10,
            regen_chance: 10,
            spawn_chance: 20,
            wriggle_escape_chance: 25,
            bear_trap_turns: 4,
            gas_trap_turns: 5,
            level_up_base: 200,
            level_up_factor: 150,
            level_up_hp: 10,
            charge_failed_commands: false,
        }
    }

    /// Inventory capacity clamped to the number of available letters.
    pub fn inventory_slots(&self) -> usize {
        self.inventory_capacity.min(Self::MAX_INVENTORY_SLOTS)
    }

    /// Experience required to leave `level`.
    pub fn xp_to_next(&self, level: u32) -> u32 {
        self.level_up_base + level * self.level_up_factor
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_slots_never_exceed_letters() {
        let config = GameConfig {
            inventory_capacity: 40,
            ..GameConfig::default()
        };
        assert_eq!(config.inventory_slots(), GameConfig::MAX_INVENTORY_SLOTS);
    }

    #[test]
    fn xp_curve_grows_with_level() {
        let config = GameConfig::default();
        assert_eq!(config.xp_to_next(1), 350);
        assert!(config.xp_to_next(2) > config.xp_to_next(1));
    }
}
