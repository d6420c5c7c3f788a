//! Game logic layer machinery.

mod action;
pub use action::Input;

mod controller;
pub use controller::{Client, ClientId, Controller, Snapshot};

mod data;
pub use data::{CharacterSpec, Config, ItemSpec};

mod entity;
pub use entity::{Character, Entity, Monster, MonsterKind, Player};

mod fov;

mod item;
pub use item::{Item, ItemId, ItemIds, ItemKind};

mod level;
pub use level::{Level, LevelPos};

mod mob;

mod msg;
pub use msg::{EventLog, GameEvent};

mod pathing;

pub mod prelude;

mod runtime;
pub use runtime::Runtime;

mod tile;
pub use tile::{Overlay, Terrain, Tile};

mod worldfile;

/// Grid coordinates on a level map.
pub type Pos = glam::IVec2;

#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub enum Status {
    #[default]
    Ongoing,
    Lost,
}
