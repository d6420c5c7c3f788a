//! Tunable game data.

use std::{fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use crate::item::ItemKind;

/// Creature and item statistics plus engine settings.
///
/// A data file only needs to list the sections it changes, but each listed
/// creature or item section must be complete.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub player: CharacterSpec,
    pub rat: CharacterSpec,
    pub spider: CharacterSpec,
    pub sword: ItemSpec,
    pub helmet: ItemSpec,
    /// Number of lines kept in each level's event log.
    pub event_log_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            player: CharacterSpec {
                name: "Player".into(),
                icon: '@',
                hitpoints: 40,
                strength: 5,
                speed: 1.0,
                sight_range: 7,
                loot: Vec::new(),
            },
            rat: CharacterSpec {
                name: "Rat".into(),
                icon: 'R',
                hitpoints: 10,
                strength: 1,
                speed: 1.5,
                sight_range: 10,
                loot: vec![ItemKind::Weapon],
            },
            spider: CharacterSpec {
                name: "Spider".into(),
                icon: 'S',
                hitpoints: 25,
                strength: 3,
                speed: 1.0,
                sight_range: 10,
                loot: Vec::new(),
            },
            sword: ItemSpec {
                kind: ItemKind::Weapon,
                name: "Sword".into(),
                icon: 's',
                power: 2,
            },
            helmet: ItemSpec {
                kind: ItemKind::Helmet,
                name: "Helmet".into(),
                icon: 'h',
                power: 1,
            },
            event_log_len: 10,
        }
    }
}

impl Config {
    /// Load configuration from an IDM file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Config::parse(&text)
            .with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let ret: Config = idm::from_str(text).map_err(|e| anyhow!("{e}"))?;
        ret.validate()?;
        Ok(ret)
    }

    fn validate(&self) -> Result<()> {
        // The player gets exactly one action per command.
        if self.player.speed != 1.0 {
            bail!("player speed must be 1, got {}", self.player.speed);
        }
        for spec in [&self.rat, &self.spider] {
            if spec.speed.is_nan() || spec.speed <= 0.0 {
                bail!("{} speed must be positive", spec.name);
            }
        }
        Ok(())
    }

    /// Stats for the item placed by a map glyph or dropped as loot.
    pub fn item(&self, kind: ItemKind) -> Option<&ItemSpec> {
        match kind {
            ItemKind::Weapon => Some(&self.sword),
            ItemKind::Helmet => Some(&self.helmet),
            ItemKind::Other => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CharacterSpec {
    pub name: String,
    pub icon: char,
    pub hitpoints: i32,
    pub strength: i32,
    pub speed: f32,
    pub sight_range: i32,
    /// Items the creature carries from the start and drops on death.
    #[serde(default)]
    pub loot: Vec<ItemKind>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ItemSpec {
    pub kind: ItemKind,
    pub name: String,
    pub icon: char,
    pub power: i32,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn item_lookup() {
        let config = Config::default();
        assert_eq!(config.item(ItemKind::Weapon).unwrap().name, "Sword");
        assert_eq!(config.item(ItemKind::Helmet).unwrap().name, "Helmet");
        assert!(config.item(ItemKind::Other).is_none());
    }

    #[test]
    fn rat_carries_sword() {
        let config = Config::default();
        assert!(config.rat.loot.contains(&ItemKind::Weapon));
        assert!(config.rat.speed > config.spider.speed);
    }

    #[test]
    fn parse_overrides() {
        let config = Config::parse(
            "\
rat
  name Rat
  icon R
  hitpoints 12
  strength 2
  speed 2.0
  sight-range 8
event-log-len 5
",
        )
        .unwrap();
        assert_eq!(config.rat.hitpoints, 12);
        assert_eq!(config.rat.speed, 2.0);
        assert!(config.rat.loot.is_empty());
        assert_eq!(config.event_log_len, 5);
        // Sections not listed keep their defaults.
        assert_eq!(config.spider, Config::default().spider);
        assert_eq!(config.sword, Config::default().sword);
    }

    #[test]
    fn parse_rejects_partial_section() {
        assert!(Config::parse("rat\n  speed 2.0\n").is_err());
    }

    #[test]
    fn parse_rejects_bad_speed() {
        let player = "\
player
  name Player
  icon @
  hitpoints 40
  strength 5
  speed 2.0
  sight-range 7
";
        assert!(Config::parse(player).is_err());
        assert!(Config::parse(&player.replace("2.0", "1.0")).is_ok());
    }

    #[test]
    fn missing_file() {
        assert!(Config::load("/nonexistent/settings.idm").is_err());
    }
}
