use core::fmt;

use crate::env::RollContext;

/// Damage dice such as `2d6+1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceSpec {
    pub count: u32,
    pub sides: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus: i32,
}

impl DiceSpec {
    pub const fn new(count: u32, sides: u32) -> Self {
        Self {
            count,
            sides,
            bonus: 0,
        }
    }

    pub const fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }

    /// Smallest possible total, floored at zero.
    pub fn min(&self) -> u32 {
        (self.count as i32 + self.bonus).max(0) as u32
    }

    /// Largest possible total, floored at zero.
    pub fn max(&self) -> u32 {
        (self.count.saturating_mul(self.sides) as i32 + self.bonus).max(0) as u32
    }

    /// Sum of the dice plus the flat bonus, floored at zero.
    pub fn total_of(&self, faces: impl IntoIterator<Item = u32>) -> u32 {
        let sum: u32 = faces.into_iter().sum();
        (sum as i32 + self.bonus).max(0) as u32
    }

    pub fn roll(&self, ctx: &mut RollContext<'_>) -> u32 {
        let faces: Vec<u32> = (0..self.count).map(|_| ctx.roll_die(self.sides)).collect();
        self.total_of(faces)
    }
}

impl fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.bonus {
            0 => Ok(()),
            bonus if bonus > 0 => write!(f, "+{bonus}"),
            bonus => write!(f, "{bonus}"),
        }
    }
}
