/// Match configuration: board geometry, wave timing and balance constants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Side length of the square board.
    pub board_size: i32,
    /// Columns filled with impassable walls. Lanes are the column runs between them.
    pub wall_columns: Vec<i32>,
    /// A new wave spawns at the end of every round that is a multiple of this value.
    pub wave_period: u32,
    /// Monsters requested from the template provider per wave.
    pub monsters_per_wave: usize,
    /// Seed for every random roll made by the engine.
    pub seed: u64,
    pub balance: BalanceConfig,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOARD_SIZE: i32 = 8;
    pub const DEFAULT_WALL_COLUMNS: [i32; 2] = [2, 5];
    pub const DEFAULT_WAVE_PERIOD: u32 = 4;
    pub const DEFAULT_MONSTERS_PER_WAVE: usize = 3;
    pub const DEFAULT_SEED: u64 = 0x5eed_7a10;

    pub fn new() -> Self {
        Self {
            board_size: Self::DEFAULT_BOARD_SIZE,
            wall_columns: Self::DEFAULT_WALL_COLUMNS.to_vec(),
            wave_period: Self::DEFAULT_WAVE_PERIOD,
            monsters_per_wave: Self::DEFAULT_MONSTERS_PER_WAVE,
            seed: Self::DEFAULT_SEED,
            balance: BalanceConfig::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_wave_period(mut self, wave_period: u32) -> Self {
        self.wave_period = wave_period;
        self
    }

    /// Checks that the geometry describes at least one lane and that
    /// every ratio lies in a usable range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 3 {
            return Err(ConfigError::BoardTooSmall {
                size: self.board_size,
            });
        }
        if self.wave_period == 0 {
            return Err(ConfigError::ZeroWavePeriod);
        }

        let mut previous = -1;
        for &col in &self.wall_columns {
            if col <= previous || col >= self.board_size {
                return Err(ConfigError::InvalidWallColumn { column: col });
            }
            previous = col;
        }
        if self.lane_columns().is_empty() {
            return Err(ConfigError::NoLanes);
        }

        let fractions = [
            ("retreat_heal_fraction", self.balance.retreat_heal_fraction),
            ("regen_fraction", self.balance.regen_fraction),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::FractionOutOfRange { name, value });
            }
        }
        if self.balance.xp_base_per_level_step == 0 {
            return Err(ConfigError::ZeroXpStep);
        }
        if self.balance.sell_price_percent > 100 {
            return Err(ConfigError::SellPercentOutOfRange {
                percent: self.balance.sell_price_percent,
            });
        }

        Ok(())
    }

    /// Column runs between walls, left to right. Empty runs are skipped.
    pub fn lane_columns(&self) -> Vec<Vec<i32>> {
        let mut lanes = Vec::new();
        let mut current = Vec::new();
        for col in 0..self.board_size {
            if self.wall_columns.contains(&col) {
                if !current.is_empty() {
                    lanes.push(std::mem::take(&mut current));
                }
            } else {
                current.push(col);
            }
        }
        if !current.is_empty() {
            lanes.push(current);
        }
        lanes
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Tunable combat, economy and progression constants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceConfig {
    /// Outgoing damage multiplier on Koulou (everyone) and Bush (heroes).
    pub terrain_attack_multiplier: f64,
    /// Incoming damage multiplier for heroes standing on Bush or Cave.
    pub terrain_defense_multiplier: f64,
    /// Terrain buff is `max(1, stat / terrain_buff_divisor)`.
    pub terrain_buff_divisor: u32,

    pub hero_strength_factor: f64,
    pub two_hand_multiplier: f64,
    pub dodge_agility_divisor: u32,
    pub spell_dex_divisor: u32,
    pub spell_debuff_divisor: u32,
    pub spell_ignores_defense: bool,
    pub monsters_dodge_attacks: bool,

    pub monster_base_hp: u32,
    pub monster_hp_per_level: u32,

    pub xp_per_monster_level: u64,
    pub gold_per_monster_level: u32,

    pub xp_base_per_level_step: u64,
    pub level_up_hp_bonus: u32,
    pub level_up_mana_bonus: u32,
    pub level_up_stat_bonus: u32,
    pub level_up_favored_bonus: u32,
    pub initial_favored_bonus: u32,

    pub retreat_heal_fraction: f64,
    pub retreat_immunity: u32,
    pub regen_fraction: f64,

    pub market_stock_size: usize,
    pub sell_price_percent: u32,
}

impl BalanceConfig {
    pub const DEFAULT_TERRAIN_ATTACK_MULTIPLIER: f64 = 1.1;
    pub const DEFAULT_TERRAIN_DEFENSE_MULTIPLIER: f64 = 0.9;
    pub const DEFAULT_TERRAIN_BUFF_DIVISOR: u32 = 10;
    pub const DEFAULT_HERO_STRENGTH_FACTOR: f64 = 0.5;
    pub const DEFAULT_TWO_HAND_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_DODGE_AGILITY_DIVISOR: u32 = 10;
    pub const DEFAULT_SPELL_DEX_DIVISOR: u32 = 10;
    pub const DEFAULT_SPELL_DEBUFF_DIVISOR: u32 = 5;
    pub const DEFAULT_MONSTER_BASE_HP: u32 = 100;
    pub const DEFAULT_MONSTER_HP_PER_LEVEL: u32 = 50;
    pub const DEFAULT_XP_PER_MONSTER_LEVEL: u64 = 20;
    pub const DEFAULT_GOLD_PER_MONSTER_LEVEL: u32 = 500;
    pub const DEFAULT_XP_BASE_PER_LEVEL_STEP: u64 = 10;
    pub const DEFAULT_LEVEL_UP_HP_BONUS: u32 = 50;
    pub const DEFAULT_LEVEL_UP_MANA_BONUS: u32 = 10;
    pub const DEFAULT_LEVEL_UP_STAT_BONUS: u32 = 5;
    pub const DEFAULT_LEVEL_UP_FAVORED_BONUS: u32 = 5;
    pub const DEFAULT_INITIAL_FAVORED_BONUS: u32 = 50;
    pub const DEFAULT_RETREAT_HEAL_FRACTION: f64 = 0.15;
    pub const DEFAULT_RETREAT_IMMUNITY: u32 = 1;
    pub const DEFAULT_REGEN_FRACTION: f64 = 0.1;
    pub const DEFAULT_MARKET_STOCK_SIZE: usize = 10;
    pub const DEFAULT_SELL_PRICE_PERCENT: u32 = 80;

    pub fn new() -> Self {
        Self {
            terrain_attack_multiplier: Self::DEFAULT_TERRAIN_ATTACK_MULTIPLIER,
            terrain_defense_multiplier: Self::DEFAULT_TERRAIN_DEFENSE_MULTIPLIER,
            terrain_buff_divisor: Self::DEFAULT_TERRAIN_BUFF_DIVISOR,
            hero_strength_factor: Self::DEFAULT_HERO_STRENGTH_FACTOR,
            two_hand_multiplier: Self::DEFAULT_TWO_HAND_MULTIPLIER,
            dodge_agility_divisor: Self::DEFAULT_DODGE_AGILITY_DIVISOR,
            spell_dex_divisor: Self::DEFAULT_SPELL_DEX_DIVISOR,
            spell_debuff_divisor: Self::DEFAULT_SPELL_DEBUFF_DIVISOR,
            spell_ignores_defense: false,
            monsters_dodge_attacks: false,
            monster_base_hp: Self::DEFAULT_MONSTER_BASE_HP,
            monster_hp_per_level: Self::DEFAULT_MONSTER_HP_PER_LEVEL,
            xp_per_monster_level: Self::DEFAULT_XP_PER_MONSTER_LEVEL,
            gold_per_monster_level: Self::DEFAULT_GOLD_PER_MONSTER_LEVEL,
            xp_base_per_level_step: Self::DEFAULT_XP_BASE_PER_LEVEL_STEP,
            level_up_hp_bonus: Self::DEFAULT_LEVEL_UP_HP_BONUS,
            level_up_mana_bonus: Self::DEFAULT_LEVEL_UP_MANA_BONUS,
            level_up_stat_bonus: Self::DEFAULT_LEVEL_UP_STAT_BONUS,
            level_up_favored_bonus: Self::DEFAULT_LEVEL_UP_FAVORED_BONUS,
            initial_favored_bonus: Self::DEFAULT_INITIAL_FAVORED_BONUS,
            retreat_heal_fraction: Self::DEFAULT_RETREAT_HEAL_FRACTION,
            retreat_immunity: Self::DEFAULT_RETREAT_IMMUNITY,
            regen_fraction: Self::DEFAULT_REGEN_FRACTION,
            market_stock_size: Self::DEFAULT_MARKET_STOCK_SIZE,
            sell_price_percent: Self::DEFAULT_SELL_PRICE_PERCENT,
        }
    }

    /// Monster max HP for a level: `monster_base_hp + monster_hp_per_level * level`.
    pub fn monster_hp_for_level(&self, level: u32) -> u32 {
        self.monster_base_hp + self.monster_hp_per_level * level
    }

    /// Total experience needed to reach `target_level`.
    ///
    /// # Formula
    ///
    /// `xp_base_per_level_step * n * (n + 1) / 2` where `n = target_level - 1`.
    pub fn xp_required_for_level(&self, target_level: u32) -> u64 {
        if target_level <= 1 {
            return 0;
        }
        let n = u64::from(target_level - 1);
        self.xp_base_per_level_step * n * (n + 1) / 2
    }
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size {size} is too small (minimum 3)")]
    BoardTooSmall { size: i32 },

    #[error("wave period must be at least 1")]
    ZeroWavePeriod,

    #[error("wall column {column} is out of order or outside the board")]
    InvalidWallColumn { column: i32 },

    #[error("wall layout leaves no lanes")]
    NoLanes,

    #[error("{name} must lie in 0.0..=1.0 (got {value})")]
    FractionOutOfRange { name: &'static str, value: f64 },

    #[error("xp_base_per_level_step must be at least 1")]
    ZeroXpStep,

    #[error("sell_price_percent must be at most 100 (got {percent})")]
    SellPercentOutOfRange { percent: u32 },
}

impl crate::error::GameError for ConfigError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BoardTooSmall { .. } => "CONFIG_BOARD_TOO_SMALL",
            Self::ZeroWavePeriod => "CONFIG_ZERO_WAVE_PERIOD",
            Self::InvalidWallColumn { .. } => "CONFIG_INVALID_WALL_COLUMN",
            Self::NoLanes => "CONFIG_NO_LANES",
            Self::FractionOutOfRange { .. } => "CONFIG_FRACTION_OUT_OF_RANGE",
            Self::ZeroXpStep => "CONFIG_ZERO_XP_STEP",
            Self::SellPercentOutOfRange { .. } => "CONFIG_SELL_PERCENT_OUT_OF_RANGE",
        }
    }
}
