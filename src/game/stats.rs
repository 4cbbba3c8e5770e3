// Character stats, experience and levelling

use crate::engine::RandomSource;

/// Number of slots in a stat block
pub const STAT_SLOTS: usize = 9;

/// Raw stat layout: `[hp, (value, growth) pairs...]`
pub type StatBlock = [i32; STAT_SLOTS];

/// Independent growth trials per stat on level-up
const GROWTH_TRIALS: u32 = 3;
/// Each trial draws from `[0, GROWTH_DIE)` and succeeds below the growth chance
const GROWTH_DIE: u32 = 6;

/// Named slots in a stat block. Every slot after `Hp` is followed by its
/// growth chance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    /// Current health, no growth slot
    Hp = 0,
    MaxHp = 1,
    Attack = 3,
    Defense = 5,
    Agility = 7,
}

impl Stat {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Slot holding this stat's growth chance
    pub fn growth_index(self) -> Option<usize> {
        match self {
            Self::Hp => None,
            other => Some(other.index() + 1),
        }
    }
}

/// Experience needed to leave `level`
pub fn exp_to_level(level: u32) -> f32 {
    (level * level) as f32 * 5.0 * 0.75
}

/// Combat capability: stats, experience and level
#[derive(Debug, Clone, PartialEq)]
pub struct CombatStats {
    stats: StatBlock,
    exp: u32,
    level: u32,
    exp_to_level: f32,
}

impl CombatStats {
    /// Stats for a fresh actor at `level`, growing the template once per
    /// level above 1.
    pub fn new(template: StatBlock, level: u32, rng: &mut dyn RandomSource) -> Self {
        let level = level.max(1);
        let mut combat = Self {
            stats: template,
            exp: 0,
            level,
            exp_to_level: exp_to_level(level),
        };

        for _ in 1..level {
            combat.level_up(rng);
        }

        combat
    }

    pub fn get(&self, stat: Stat) -> i32 {
        self.stats[stat.index()]
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        self.stats[stat.index()] = value;
    }

    /// Whole stat block, including growth chances
    pub fn block(&self) -> &StatBlock {
        &self.stats
    }

    pub fn hp(&self) -> i32 {
        self.get(Stat::Hp)
    }

    pub fn exp(&self) -> u32 {
        self.exp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp_to_level(&self) -> f32 {
        self.exp_to_level
    }

    /// Subtract `amount` from Hp, returns the new Hp (may go negative)
    pub fn wound(&mut self, amount: i32) -> i32 {
        self.stats[Stat::Hp.index()] -= amount;
        self.hp()
    }

    /// Add experience. Grants at most one level per call and never resets
    /// the counter. Returns true if a level was gained.
    pub fn gain_exp(&mut self, amount: u32, rng: &mut dyn RandomSource) -> bool {
        self.exp = self.exp.saturating_add(amount);

        if self.exp as f32 >= self.exp_to_level {
            self.level_up(rng);
            self.level += 1;
            self.exp_to_level = exp_to_level(self.level);
            return true;
        }

        false
    }

    /// Roll growth for every `(value, growth)` pair
    pub fn level_up(&mut self, rng: &mut dyn RandomSource) {
        for pair in self.stats[1..].chunks_exact_mut(2) {
            let growth = pair[1];
            for _ in 0..GROWTH_TRIALS {
                if (rng.below(GROWTH_DIE) as i32) < growth {
                    pair[0] += 1;
                }
            }
        }
    }
}
