use super::dice::Dice;

/// Static monster blueprint. Instances are built from it at wave time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub name: String,
    pub level: u32,
    pub damage: u32,
    pub defense: u32,
    /// Dodge chance in percent.
    pub dodge: u32,
}

impl MonsterTemplate {
    pub fn new(name: impl Into<String>, level: u32, damage: u32, defense: u32, dodge: u32) -> Self {
        Self {
            name: name.into(),
            level,
            damage,
            defense,
            dodge,
        }
    }
}

/// Supplies monster templates scaled to a target level.
pub trait MonsterOracle: Send + Sync {
    /// Picks `count` templates for `target_level`.
    fn spawn(&self, count: usize, target_level: u32, dice: &mut Dice<'_>) -> Vec<MonsterTemplate>;
}

/// Template list with level-band selection.
///
/// Templates of exactly the target level are preferred; when none exist the
/// candidates are every template in the closest level band. Picks are
/// uniform and independent, so a wave may repeat a template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterRoster {
    templates: Vec<MonsterTemplate>,
}

impl MonsterRoster {
    pub fn new(templates: Vec<MonsterTemplate>) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &[MonsterTemplate] {
        &self.templates
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn candidates(&self, target_level: u32) -> Vec<&MonsterTemplate> {
        let desired = target_level.max(1);
        let Some(best) = self
            .templates
            .iter()
            .map(|t| t.level.abs_diff(desired))
            .min()
        else {
            return Vec::new();
        };
        self.templates
            .iter()
            .filter(|t| t.level.abs_diff(desired) == best)
            .collect()
    }
}

impl MonsterOracle for MonsterRoster {
    fn spawn(&self, count: usize, target_level: u32, dice: &mut Dice<'_>) -> Vec<MonsterTemplate> {
        let candidates = self.candidates(target_level);
        if candidates.is_empty() {
            return Vec::new();
        }
        (0..count)
            .filter_map(|_| dice.pick(&candidates).map(|t| (*t).clone()))
            .collect()
    }
}
