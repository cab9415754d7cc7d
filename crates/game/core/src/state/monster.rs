use crate::config::BalanceConfig;
use crate::env::MonsterTemplate;

/// A monster on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub damage: u32,
    pub defense: u32,
    /// Dodge chance in percent.
    pub dodge: u32,
}

impl Monster {
    pub fn from_template(template: &MonsterTemplate, balance: &BalanceConfig) -> Self {
        let max_hp = balance.monster_hp_for_level(template.level);
        Self {
            name: template.name.clone(),
            level: template.level,
            hp: max_hp,
            max_hp,
            damage: template.damage,
            defense: template.defense,
            dodge: template.dodge,
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Physical hit: defense is subtracted first. Returns the HP actually lost.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        self.take_true_damage(raw.saturating_sub(self.defense))
    }

    /// Damage that bypasses defense. Returns the HP actually lost.
    pub fn take_true_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    pub fn reduce_damage(&mut self, amount: u32) {
        self.damage = self.damage.saturating_sub(amount);
    }

    pub fn reduce_defense(&mut self, amount: u32) {
        self.defense = self.defense.saturating_sub(amount);
    }

    pub fn reduce_dodge(&mut self, amount: u32) {
        self.dodge = self.dodge.saturating_sub(amount);
    }
}
