use anyhow::{bail, Result};

use crate::prelude::*;

/// Main data container for game engine runtime.
#[derive(Clone, Debug)]
pub struct Runtime {
    levels: IndexMap<String, Level>,
    /// Index of the level the player is on.
    current: usize,
    pub(crate) player: Player,
    status: Status,
    turn: u64,
}

impl Runtime {
    pub(crate) fn new(
        levels: IndexMap<String, Level>,
        start: &str,
        player: Player,
    ) -> Result<Self> {
        let Some(current) = levels.get_index_of(start) else {
            bail!("unknown start level {start:?}");
        };

        let mut ret = Runtime {
            levels,
            current,
            player,
            status: Status::Ongoing,
            turn: 0,
        };
        let (pos, radius) = (ret.player.pos, ret.player.sight_range);
        ret.level_mut().update_fov(pos, radius);
        Ok(ret)
    }

    /// Level the player is currently on.
    pub fn level(&self) -> &Level {
        &self.levels[self.current]
    }

    pub(crate) fn level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.current]
    }

    pub fn level_named(&self, name: &str) -> Option<&Level> {
        self.levels.get(name)
    }

    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        self.levels.values()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of ticks run so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Borrow the current level and the player at the same time.
    pub(crate) fn split(&mut self) -> (&mut Level, &mut Player) {
        (&mut self.levels[self.current], &mut self.player)
    }

    /// Run one turn of the game with the player doing `input`.
    pub fn tick(&mut self, input: Input) {
        if self.status != Status::Ongoing {
            log::warn!("tick: game is already over");
            return;
        }

        self.level_mut().last_event = None;
        // The player acts once per command. Config rejects speeds other
        // than 1, so no points are lost here.
        self.player.action_points = 0.0;
        self.player.accumulate();

        self.act(input);

        let (level, player) = self.split();
        level.update_monsters(player);

        self.turn += 1;
        if !self.player.is_alive() {
            log::info!("{} died on turn {}", self.player.name, self.turn);
            self.status = Status::Lost;
        }
    }

    /// Move the player to another level.
    pub(crate) fn teleport(&mut self, dest: &LevelPos) {
        let Some(idx) = self.levels.get_index_of(&dest.level) else {
            log::warn!("teleport: no level named {:?}", dest.level);
            return;
        };
        log::info!("entering {} at {}", dest.level, dest.pos);

        self.current = idx;
        self.player.pos = dest.pos;
        let radius = self.player.sight_range;
        let level = self.level_mut();
        level.last_event = Some(GameEvent::Portal);
        level.update_fov(dest.pos, radius);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const MAP: &str = "\
#########
#@..|...#
#...#.R.#
#########";

    fn runtime() -> Runtime {
        Runtime::from_sources(&Config::default(), [("a", MAP)], "a").unwrap()
    }

    #[test]
    fn initial_view() {
        let r = runtime();
        assert_eq!(r.turn(), 0);
        assert_eq!(r.status(), Status::Ongoing);
        assert!(r.level().is_visible(ivec2(3, 1)));
        assert!(!r.level().is_seen(ivec2(6, 1)));
    }

    #[test]
    fn event_cleared_each_tick() {
        let mut r = runtime();
        r.tick(Input::Right);
        assert_eq!(r.player().pos, ivec2(2, 1));
        assert_eq!(r.level().last_event(), Some(GameEvent::Move));

        // Bumping into a wall does nothing.
        r.tick(Input::Up);
        assert_eq!(r.player().pos, ivec2(2, 1));
        assert_eq!(r.turn(), 2);
        assert_eq!(r.level().last_event(), None);
    }

    #[test]
    fn death_ends_game() {
        let mut r =
            Runtime::from_sources(&Config::default(), [("a", "#@S#")], "a")
                .unwrap();
        r.player.hitpoints = 1;
        r.tick(Input::Search);
        assert_eq!(r.status(), Status::Lost);

        let turn = r.turn();
        r.tick(Input::Search);
        assert_eq!(r.turn(), turn);
    }
}
