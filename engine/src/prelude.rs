pub use crate::{
    Character, Config, Entity, GameEvent, Input, Item, ItemId, ItemKind,
    Level, LevelPos, Monster, MonsterKind, Player, Pos, Runtime, Status,
};
pub use glam::{ivec2, IVec2};
pub use util::{HashMap, HashSet, IndexMap, VecExt, DIR_4};
