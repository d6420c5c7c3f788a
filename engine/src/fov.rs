//! Logic for revealing unexplored game terrain

use ::fov::{field_of_view, Occluder};

use crate::prelude::*;

impl Occluder for Level {
    fn contains(&self, p: IVec2) -> bool {
        Level::contains(self, p)
    }

    fn blocks_sight(&self, p: IVec2) -> bool {
        !self.can_see_through(p)
    }
}

impl Level {
    /// Recompute which cells `viewer` currently sees.
    ///
    /// Everything seen gets marked as explored for good.
    pub fn update_fov(&mut self, viewer: Pos, radius: i32) {
        for t in self.tiles_mut() {
            t.visible = false;
        }

        let cells: Vec<Pos> = field_of_view(&*self, viewer, radius).collect();
        for p in cells {
            if let Some(t) = self.tile_mut(p) {
                t.visible = true;
                t.seen = true;
            }
        }
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.tile(pos).is_some_and(|t| t.visible)
    }

    pub fn is_seen(&self, pos: Pos) -> bool {
        self.tile(pos).is_some_and(|t| t.seen)
    }
}
