//! Entity logic for items and inventories.

use std::fmt;

use derive_more::{Deref, DerefMut};
use serde::Deserialize;

use crate::{data::ItemSpec, prelude::*};

/// World-unique item identifier that commands use to name items.
#[derive(
    Copy, Clone, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash,
)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of fresh item ids.
#[derive(Clone, Default, Debug)]
pub struct ItemIds(u32);

impl ItemIds {
    pub fn next_id(&mut self) -> ItemId {
        self.0 += 1;
        ItemId(self.0)
    }
}

#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Weapon,
    Helmet,
    #[default]
    Other,
}

#[derive(Clone, Debug, PartialEq, Deref, DerefMut)]
pub struct Item {
    #[deref]
    #[deref_mut]
    pub entity: Entity,
    pub id: ItemId,
    pub kind: ItemKind,
    /// Attack bonus for weapons, damage reduction for helmets.
    pub power: i32,
}

impl Item {
    pub fn new(id: ItemId, pos: Pos, spec: &ItemSpec) -> Self {
        Item {
            entity: Entity {
                pos,
                name: spec.name.clone(),
                icon: spec.icon,
            },
            id,
            kind: spec.kind,
            power: spec.power,
        }
    }
}

impl Level {
    /// Items lying on the ground at a position.
    pub fn items_at(&self, pos: Pos) -> &[Item] {
        self.items.get(&pos).map_or(&[], |v| v.as_slice())
    }

    /// Move an item from under the player into the player's inventory.
    pub fn take_item(&mut self, player: &mut Player, id: ItemId) -> bool {
        let pos = player.pos;
        let Some(item) = self.remove_ground_item(pos, id) else {
            log::warn!("take: no item {id} at {pos}");
            return false;
        };
        self.pick_up(player, item);
        self.last_event = Some(GameEvent::PickUp);
        true
    }

    /// Move every item under the player into the inventory, return how many
    /// were taken.
    pub fn take_all(&mut self, player: &mut Player) -> usize {
        let items = self.items.remove(&player.pos).unwrap_or_default();
        let n = items.len();
        for item in items {
            self.pick_up(player, item);
        }
        if n > 0 {
            self.last_event = Some(GameEvent::PickUp);
        }
        n
    }

    /// Move an inventory item to the ground under the player.
    pub fn drop_item(&mut self, player: &mut Player, id: ItemId) -> bool {
        let Some(idx) = player.items.iter().position(|e| e.id == id) else {
            log::warn!("drop: {} carries no item {id}", player.name);
            return false;
        };
        let mut item = player.items.remove(idx);
        item.pos = player.pos;
        self.add_event(format!("{} dropped {}", player.name, item.name));
        self.items.entry(player.pos).or_default().push(item);
        self.last_event = Some(GameEvent::Drop);
        true
    }

    /// Move an inventory item into its equipment slot. The previous
    /// occupant of the slot goes back to the inventory.
    pub fn equip(&mut self, player: &mut Player, id: ItemId) -> bool {
        let Some(idx) = player.items.iter().position(|e| e.id == id) else {
            log::warn!("equip: {} carries no item {id}", player.name);
            return false;
        };

        let kind = player.items[idx].kind;
        if kind == ItemKind::Other {
            log::warn!("equip: item {id} is not equippable");
            return false;
        }

        let item = player.items.remove(idx);
        self.add_event(format!("{} equipped {}", player.name, item.name));
        let slot = match kind {
            ItemKind::Weapon => &mut player.weapon,
            _ => &mut player.helmet,
        };
        if let Some(old) = slot.replace(item) {
            player.items.push(old);
        }
        self.last_event = Some(GameEvent::Equip);
        true
    }

    /// Put items on the ground, appending to whatever is already there.
    pub(crate) fn scatter(&mut self, pos: Pos, items: Vec<Item>) {
        if items.is_empty() {
            return;
        }
        let pile = self.items.entry(pos).or_default();
        for mut item in items {
            item.pos = pos;
            pile.push(item);
        }
    }

    fn remove_ground_item(&mut self, pos: Pos, id: ItemId) -> Option<Item> {
        let pile = self.items.get_mut(&pos)?;
        let idx = pile.iter().position(|e| e.id == id)?;
        let item = pile.remove(idx);
        if pile.is_empty() {
            self.items.remove(&pos);
        }
        Some(item)
    }

    fn pick_up(&mut self, player: &mut Player, item: Item) {
        self.add_event(format!("{} picked up {}", player.name, item.name));
        player.items.push(item);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ItemIds;

    fn setup() -> (Level, Player, ItemIds) {
        let config = Config::default();
        let mut ids = ItemIds::default();
        let level =
            Level::parse("test", "#####\n#@sh#\n#####", &config, &mut ids)
                .unwrap();
        let mut player =
            Player::new(&config.player, ivec2(1, 1), &config, &mut ids);
        player.pos = ivec2(2, 1);
        (level, player, ids)
    }

    #[test]
    fn take_and_drop() {
        let (mut level, mut player, _) = setup();
        let id = level.items_at(ivec2(2, 1))[0].id;

        assert!(level.take_item(&mut player, id));
        assert_eq!(level.last_event(), Some(GameEvent::PickUp));
        assert!(level.items_at(ivec2(2, 1)).is_empty());
        assert_eq!(player.items.len(), 1);

        // Second take of the same item is rejected.
        assert!(!level.take_item(&mut player, id));

        player.pos = ivec2(3, 1);
        assert!(level.drop_item(&mut player, id));
        assert_eq!(level.last_event(), Some(GameEvent::Drop));
        assert!(player.items.is_empty());
        let here = level.items_at(ivec2(3, 1));
        assert_eq!(here.len(), 2);
        assert_eq!(here[1].id, id);
        assert_eq!(here[1].pos, ivec2(3, 1));
    }

    #[test]
    fn take_all() {
        let (mut level, mut player, _) = setup();
        player.pos = ivec2(1, 1);
        assert_eq!(level.take_all(&mut player), 0);
        assert_eq!(level.last_event(), None);

        player.pos = ivec2(3, 1);
        assert_eq!(level.take_all(&mut player), 1);
        assert_eq!(level.last_event(), Some(GameEvent::PickUp));
        assert_eq!(
            level.events().last().map(String::as_str),
            Some("Player picked up Helmet")
        );
    }

    #[test]
    fn equip_swaps() {
        let (mut level, mut player, mut ids) = setup();
        let config = Config::default();
        player.pos = ivec2(2, 1);
        level.take_all(&mut player);
        let first = player.items[0].id;
        assert!(level.equip(&mut player, first));
        assert_eq!(level.last_event(), Some(GameEvent::Equip));
        assert_eq!(player.weapon.as_ref().map(|e| e.id), Some(first));
        assert!(player.items.is_empty());

        let second = ids.next_id();
        let pos = player.pos;
        player.items.push(Item::new(second, pos, &config.sword));
        assert!(level.equip(&mut player, second));
        assert_eq!(player.weapon.as_ref().map(|e| e.id), Some(second));
        assert_eq!(player.items.len(), 1);
        assert_eq!(player.items[0].id, first);
    }

    #[test]
    fn equip_rejects_missing() {
        let (mut level, mut player, _) = setup();
        assert!(!level.equip(&mut player, ItemId(999)));
        assert!(!level.drop_item(&mut player, ItemId(999)));
        assert_eq!(level.last_event(), None);
    }
}
