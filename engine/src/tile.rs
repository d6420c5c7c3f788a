use strum::EnumIter;

use crate::prelude::*;

/// Base terrain of a single game world map cell.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug, EnumIter)]
pub enum Terrain {
    #[default]
    Void,
    Wall,
    Floor,
    OpenDoor,
}

use Terrain::*;

impl Terrain {
    pub fn blocks(self) -> bool {
        matches!(self, Void | Wall)
    }

    pub fn icon(self) -> char {
        match self {
            Void => ' ',
            Wall => '#',
            Floor => '.',
            OpenDoor => '/',
        }
    }
}

/// Feature drawn on top of the terrain of a cell.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug, EnumIter)]
pub enum Overlay {
    #[default]
    None,
    ClosedDoor,
    OpenDoor,
    UpStairs,
    DownStairs,
}

impl Overlay {
    pub fn blocks(self) -> bool {
        self == Overlay::ClosedDoor
    }

    pub fn icon(self) -> Option<char> {
        match self {
            Overlay::None => None,
            Overlay::ClosedDoor => Some('|'),
            Overlay::OpenDoor => Some('/'),
            Overlay::UpStairs => Some('u'),
            Overlay::DownStairs => Some('d'),
        }
    }
}

#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Tile {
    pub terrain: Terrain,
    pub overlay: Overlay,
    /// Currently in the player's view.
    pub visible: bool,
    /// Has ever been in the player's view.
    pub seen: bool,
}

impl Tile {
    /// Tile stops both movement and sight.
    pub fn blocks(&self) -> bool {
        self.terrain.blocks() || self.overlay.blocks()
    }

    pub fn icon(&self) -> char {
        self.overlay.icon().unwrap_or(self.terrain.icon())
    }
}

/// What a single map file character places in a cell.
///
/// Everything except plain terrain sits on terrain that is filled in from the
/// nearest floor after the map has been read.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Glyph {
    Terrain(Terrain),
    Overlay(Overlay),
    Monster(MonsterKind),
    Item(ItemKind),
    Player,
}

impl TryFrom<char> for Glyph {
    type Error = &'static str;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            ' ' | '\t' => Ok(Glyph::Terrain(Void)),
            '#' => Ok(Glyph::Terrain(Wall)),
            '.' => Ok(Glyph::Terrain(Floor)),
            '/' => Ok(Glyph::Terrain(OpenDoor)),
            '|' => Ok(Glyph::Overlay(Overlay::ClosedDoor)),
            'u' => Ok(Glyph::Overlay(Overlay::UpStairs)),
            'd' => Ok(Glyph::Overlay(Overlay::DownStairs)),
            'R' => Ok(Glyph::Monster(MonsterKind::Rat)),
            'S' => Ok(Glyph::Monster(MonsterKind::Spider)),
            's' => Ok(Glyph::Item(ItemKind::Weapon)),
            'h' => Ok(Glyph::Item(ItemKind::Helmet)),
            '@' => Ok(Glyph::Player),
            _ => Err("invalid map glyph"),
        }
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn terrain_glyphs_round_trip() {
        for t in Terrain::iter() {
            assert_eq!(Glyph::try_from(t.icon()), Ok(Glyph::Terrain(t)));
        }
        for o in Overlay::iter().skip(1) {
            if o == Overlay::OpenDoor {
                continue;
            }
            let c = o.icon().unwrap();
            assert_eq!(Glyph::try_from(c), Ok(Glyph::Overlay(o)));
        }
    }

    #[test]
    fn opacity() {
        let door = Tile {
            terrain: Floor,
            overlay: Overlay::ClosedDoor,
            ..Default::default()
        };
        assert!(door.blocks());
        assert_eq!(door.icon(), '|');

        let open = Tile {
            overlay: Overlay::OpenDoor,
            ..door
        };
        assert!(!open.blocks());
        assert!(Tile::default().blocks());
        assert_eq!(Glyph::try_from('x'), Err("invalid map glyph"));
    }
}
