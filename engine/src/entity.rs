//! Things that exist in the world.

use derive_more::{Deref, DerefMut};

use crate::{data::CharacterSpec, prelude::*, ItemIds};

/// Identity shared by everything placed on a map.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub pos: Pos,
    pub name: String,
    pub icon: char,
}

/// An active creature.
#[derive(Clone, Debug, PartialEq, Deref, DerefMut)]
pub struct Character {
    #[deref]
    #[deref_mut]
    pub entity: Entity,
    pub hitpoints: i32,
    pub strength: i32,
    /// Action points gained per tick.
    pub speed: f32,
    /// Accumulated action points, whole points are spent on actions.
    pub action_points: f32,
    pub sight_range: i32,
    /// Carried items.
    pub items: Vec<Item>,
}

impl Character {
    pub(crate) fn new(
        spec: &CharacterSpec,
        pos: Pos,
        config: &Config,
        ids: &mut ItemIds,
    ) -> Self {
        let items = spec
            .loot
            .iter()
            .filter_map(|&kind| config.item(kind))
            .map(|item| Item::new(ids.next_id(), pos, item))
            .collect();

        Character {
            entity: Entity {
                pos,
                name: spec.name.clone(),
                icon: spec.icon,
            },
            hitpoints: spec.hitpoints,
            strength: spec.strength,
            speed: spec.speed,
            action_points: 0.0,
            sight_range: spec.sight_range,
            items,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hitpoints > 0
    }

    /// Gain one tick's worth of action points.
    pub fn accumulate(&mut self) {
        self.action_points += self.speed;
    }

    /// Number of whole actions currently available.
    pub fn whole_actions(&self) -> u32 {
        self.action_points.max(0.0).floor() as u32
    }

    /// Use up one action point.
    pub fn spend(&mut self) {
        self.action_points -= 1.0;
    }

    /// Give up a tick's worth of action points without acting.
    pub fn pass(&mut self) {
        self.action_points -= self.speed;
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|e| e.id == id)
    }
}

/// The player character.
#[derive(Clone, Debug, PartialEq, Deref, DerefMut)]
pub struct Player {
    #[deref]
    #[deref_mut]
    pub character: Character,
    pub weapon: Option<Item>,
    pub helmet: Option<Item>,
}

impl Player {
    pub(crate) fn new(
        spec: &CharacterSpec,
        pos: Pos,
        config: &Config,
        ids: &mut ItemIds,
    ) -> Self {
        Player {
            character: Character::new(spec, pos, config, ids),
            weapon: None,
            helmet: None,
        }
    }

    /// Damage dealt by the player's blows.
    pub fn attack_power(&self) -> i32 {
        self.strength + self.weapon.as_ref().map_or(0, |e| e.power)
    }

    /// Damage absorbed from every incoming blow.
    pub fn armor(&self) -> i32 {
        self.helmet.as_ref().map_or(0, |e| e.power)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MonsterKind {
    Rat,
    Spider,
}

/// A hostile creature that hunts the player.
#[derive(Clone, Debug, PartialEq, Deref, DerefMut)]
pub struct Monster {
    #[deref]
    #[deref_mut]
    pub character: Character,
    pub kind: MonsterKind,
}

impl Monster {
    pub(crate) fn new(
        kind: MonsterKind,
        pos: Pos,
        config: &Config,
        ids: &mut ItemIds,
    ) -> Self {
        let spec = match kind {
            MonsterKind::Rat => &config.rat,
            MonsterKind::Spider => &config.spider,
        };
        Monster {
            character: Character::new(spec, pos, config, ids),
            kind,
        }
    }
}
