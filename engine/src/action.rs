//! The player doing things

use crate::prelude::*;

/// Commands clients send to the game.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Input {
    Up,
    Down,
    Left,
    Right,
    TakeItem(ItemId),
    TakeAll,
    DropItem(ItemId),
    Equip(ItemId),
    /// Show the route to the nearest portal and wait a turn.
    Search,
    /// Detach the sending client.
    CloseClient,
    /// End the game session.
    Quit,
}

impl Input {
    /// Movement direction for step commands.
    pub fn dir(self) -> Option<IVec2> {
        match self {
            Input::Up => Some(DIR_4[0]),
            Input::Right => Some(DIR_4[1]),
            Input::Down => Some(DIR_4[2]),
            Input::Left => Some(DIR_4[3]),
            _ => None,
        }
    }
}

impl Runtime {
    /// Apply the player's command to the world.
    pub(crate) fn act(&mut self, input: Input) {
        use Input::*;

        if let Some(dir) = input.dir() {
            self.step(dir);
            return;
        }

        let (level, player) = self.split();
        let acted = match input {
            TakeItem(id) => level.take_item(player, id),
            TakeAll => level.take_all(player) > 0,
            DropItem(id) => level.drop_item(player, id),
            Equip(id) => level.equip(player, id),
            Search => {
                if !level.plot_route_to_portal(player.pos) {
                    log::info!("search: no route to a portal");
                }
                player.pass();
                return;
            }
            // Session commands are handled by the controller.
            CloseClient | Quit => return,
            Up | Down | Left | Right => return,
        };

        if acted {
            player.spend();
        }
    }

    /// Player bumps in a direction. Attacks monsters, opens doors, walks
    /// into open cells and through portals.
    fn step(&mut self, dir: IVec2) {
        let radius = self.player.sight_range;
        let (level, player) = self.split();
        let dest = player.pos + dir;

        if level.monster_at(dest).is_some() {
            level.player_attack(player, dest);
        } else if level.can_walk(dest) {
            player.spend();
            let portal = level.portal_at(dest).cloned();
            if let Some(portal) = portal {
                self.teleport(&portal);
            } else {
                player.pos = dest;
                level.last_event = Some(GameEvent::Move);
                level.update_fov(dest, radius);
            }
        } else if level.check_door(dest, player.pos, radius) {
            player.spend();
        }
    }
}
