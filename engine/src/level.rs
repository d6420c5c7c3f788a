//! Single level map with its inhabitants.

use anyhow::{bail, Result};
use util::dijkstra_map;

use crate::{
    msg::EventLog,
    prelude::*,
    tile::{Glyph, Overlay, Terrain, Tile},
    ItemIds,
};

/// A position on a named level, the destination of a portal.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LevelPos {
    pub level: String,
    pub pos: Pos,
}

impl LevelPos {
    pub fn new(level: impl Into<String>, pos: Pos) -> Self {
        LevelPos {
            level: level.into(),
            pos,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    name: String,
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    pub(crate) monsters: HashMap<Pos, Monster>,
    pub(crate) items: HashMap<Pos, Vec<Item>>,
    pub(crate) portals: HashMap<Pos, LevelPos>,
    events: EventLog,
    pub(crate) last_event: Option<GameEvent>,
    pub(crate) debug: HashSet<Pos>,
    entrance: Option<Pos>,
}

impl Level {
    /// Build a level from a map text.
    ///
    /// Rows are padded to the width of the longest row with void. Cells
    /// under doors, stairs, creatures and items get the terrain of the
    /// nearest floor cell.
    pub fn parse(
        name: &str,
        text: &str,
        config: &Config,
        ids: &mut ItemIds,
    ) -> Result<Level> {
        let mut rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        while rows.last().is_some_and(|r| r.trim().is_empty()) {
            rows.pop();
        }

        let width =
            rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        if width == 0 || height == 0 {
            bail!("empty map");
        }

        let mut level = Level {
            name: name.to_owned(),
            width: width as i32,
            height: height as i32,
            tiles: vec![Default::default(); width * height],
            monsters: Default::default(),
            items: Default::default(),
            portals: Default::default(),
            events: EventLog::new(config.event_log_len),
            last_event: None,
            debug: Default::default(),
            entrance: None,
        };

        // Terrain still to be determined is None.
        let mut terrain: Vec<Option<Terrain>> =
            vec![Some(Terrain::Void); width * height];

        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let pos = ivec2(x as i32, y as i32);
                let Ok(glyph) = Glyph::try_from(c) else {
                    bail!(
                        "line {}, column {}: unknown map glyph {c:?}",
                        y + 1,
                        x + 1
                    );
                };
                let idx = y * width + x;

                if let Glyph::Terrain(t) = glyph {
                    terrain[idx] = Some(t);
                    continue;
                }
                terrain[idx] = None;

                match glyph {
                    Glyph::Overlay(o) => level.tiles[idx].overlay = o,
                    Glyph::Monster(kind) => {
                        let mob = Monster::new(kind, pos, config, ids);
                        level.monsters.insert(pos, mob);
                    }
                    Glyph::Item(kind) => {
                        if let Some(spec) = config.item(kind) {
                            let item = Item::new(ids.next_id(), pos, spec);
                            level.items.entry(pos).or_default().push(item);
                        }
                    }
                    Glyph::Player => {
                        if level.entrance.is_some() {
                            bail!(
                                "line {}, column {}: second player start",
                                y + 1,
                                x + 1
                            );
                        }
                        level.entrance = Some(pos);
                    }
                    Glyph::Terrain(_) => {}
                }
            }
        }

        for (idx, t) in terrain.iter().enumerate() {
            level.tiles[idx].terrain = match t {
                Some(t) => *t,
                None => nearest_floor(&terrain, width, idx),
            };
        }

        Ok(level)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    fn idx(&self, pos: Pos) -> Option<usize> {
        self.contains(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    pub fn tile(&self, pos: Pos) -> Option<&Tile> {
        self.idx(pos).map(|i| &self.tiles[i])
    }

    pub(crate) fn tile_mut(&mut self, pos: Pos) -> Option<&mut Tile> {
        self.idx(pos).map(|i| &mut self.tiles[i])
    }

    /// Iterate all tiles with their positions in row order.
    pub fn tiles(&self) -> impl Iterator<Item = (Pos, &Tile)> + '_ {
        let w = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| (ivec2(i as i32 % w, i as i32 / w), t))
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    /// A creature could step into the cell.
    pub fn can_walk(&self, pos: Pos) -> bool {
        self.can_see_through(pos) && !self.monsters.contains_key(&pos)
    }

    /// The cell doesn't block line of sight.
    pub fn can_see_through(&self, pos: Pos) -> bool {
        self.tile(pos).is_some_and(|t| !t.blocks())
    }

    /// Open a closed door at `pos` and refresh the view of `viewer`.
    ///
    /// Return whether a door was opened.
    pub fn check_door(&mut self, pos: Pos, viewer: Pos, radius: i32) -> bool {
        match self.tile_mut(pos) {
            Some(t) if t.overlay == Overlay::ClosedDoor => {
                t.overlay = Overlay::OpenDoor;
            }
            _ => return false,
        }
        self.last_event = Some(GameEvent::DoorOpen);
        self.update_fov(viewer, radius);
        true
    }

    pub fn monster_at(&self, pos: Pos) -> Option<&Monster> {
        self.monsters.get(&pos)
    }

    pub fn monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.values()
    }

    pub fn portal_at(&self, pos: Pos) -> Option<&LevelPos> {
        self.portals.get(&pos)
    }

    pub fn portals(&self) -> impl Iterator<Item = (Pos, &LevelPos)> {
        self.portals.iter().map(|(&p, dest)| (p, dest))
    }

    pub(crate) fn add_portal(&mut self, pos: Pos, dest: LevelPos) {
        self.portals.insert(pos, dest);
    }

    /// Event log lines from oldest to newest.
    pub fn events(&self) -> impl Iterator<Item = &String> {
        self.events.iter()
    }

    pub fn add_event(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::debug!("{}: {line}", self.name);
        self.events.push(line);
    }

    /// Tag of the most notable thing that happened this tick.
    pub fn last_event(&self) -> Option<GameEvent> {
        self.last_event
    }

    /// Cells highlighted for debugging.
    pub fn debug(&self) -> &HashSet<Pos> {
        &self.debug
    }

    /// Player start position if the map has one.
    pub fn entrance(&self) -> Option<Pos> {
        self.entrance
    }
}

/// Find the closest floor cell, searching through cells that aren't solid,
/// and use its terrain. Defaults to floor if there is none.
fn nearest_floor(
    terrain: &[Option<Terrain>],
    width: usize,
    idx: usize,
) -> Terrain {
    let (w, h) = (width as i32, (terrain.len() / width) as i32);
    let at = |p: Pos| -> Option<Option<Terrain>> {
        ((0..w).contains(&p.x) && (0..h).contains(&p.y))
            .then(|| terrain[(p.y * w + p.x) as usize])
    };
    let is_open = |p: Pos| match at(p) {
        Some(Some(t)) => !t.blocks(),
        Some(None) => true,
        None => false,
    };
    let start = ivec2(idx as i32 % w, idx as i32 / w);

    let ret = dijkstra_map(
        |p: &Pos| p.ns_4().filter(|&q| is_open(q)).collect::<Vec<_>>(),
        [start],
    )
    .find_map(|(p, _)| at(p).flatten().filter(|&t| t == Terrain::Floor))
    .unwrap_or(Terrain::Floor);
    ret
}
