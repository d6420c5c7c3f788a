//! Loading a world from map files and a portal descriptor.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};

use crate::{prelude::*, ItemIds};

/// Name of the portal descriptor in a world directory.
const WORLD_FILE: &str = "world.txt";

impl Runtime {
    /// Load a world directory of `*.map` files and a `world.txt`
    /// descriptor.
    pub fn load(dir: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let dir = dir.as_ref();

        let mut maps = Vec::new();
        for entry in fs::read_dir(dir)
            .with_context(|| format!("reading {}", dir.display()))?
        {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("map") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str())
            else {
                bail!("bad map file name {}", path.display());
            };
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            maps.push((name.to_owned(), text));
        }
        maps.sort();

        let world_path = dir.join(WORLD_FILE);
        let world = fs::read_to_string(&world_path)
            .with_context(|| format!("reading {}", world_path.display()))?;

        let ret = Runtime::from_sources(
            config,
            maps.iter().map(|(n, t)| (n.as_str(), t.as_str())),
            &world,
        )?;
        log::info!(
            "loaded {} levels from {}, starting on {}",
            maps.len(),
            dir.display(),
            ret.level().name()
        );
        Ok(ret)
    }

    /// Build a world from named map texts and the text of a world
    /// descriptor.
    ///
    /// The first non-blank descriptor row names the starting level, every
    /// following row is a portal `source, x, y, dest, dest_x, dest_y`.
    pub fn from_sources<'a>(
        config: &Config,
        maps: impl IntoIterator<Item = (&'a str, &'a str)>,
        world: &str,
    ) -> Result<Self> {
        let mut ids = ItemIds::default();
        let mut levels = IndexMap::default();
        for (name, text) in maps {
            let level = Level::parse(name, text, config, &mut ids)
                .with_context(|| format!("{name}.map"))?;
            if levels.insert(name.to_owned(), level).is_some() {
                bail!("duplicate level {name:?}");
            }
        }

        let mut rows = world
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let Some((_, start)) = rows.next() else {
            bail!("{WORLD_FILE}: no starting level");
        };
        let start = start.split(',').next().unwrap_or_default().trim();

        for (line, row) in rows {
            let (pos, dest, source) = parse_portal(row, &levels)
                .with_context(|| format!("{WORLD_FILE}, line {line}"))?;
            if let Some(level) = levels.get_mut(&source) {
                level.add_portal(pos, dest);
            }
        }

        let Some(level) = levels.get(start) else {
            bail!("{WORLD_FILE}: unknown starting level {start:?}");
        };
        let Some(entrance) = level.entrance() else {
            bail!("{start}.map: no player start '@'");
        };

        let player = Player::new(&config.player, entrance, config, &mut ids);
        Runtime::new(levels, start, player)
    }
}

/// Parse a portal row, return the portal position, its destination and the
/// name of the level it's on.
fn parse_portal(
    row: &str,
    levels: &IndexMap<String, Level>,
) -> Result<(Pos, LevelPos, String)> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    let [source, x, y, dest, dest_x, dest_y] = fields[..] else {
        bail!("expected 6 fields, got {}", fields.len());
    };

    let pos = ivec2(coordinate(x)?, coordinate(y)?);
    let dest_pos = ivec2(coordinate(dest_x)?, coordinate(dest_y)?);

    for (name, p) in [(source, pos), (dest, dest_pos)] {
        let Some(level) = levels.get(name) else {
            bail!("unknown level {name:?}");
        };
        if !level.contains(p) {
            bail!("position {p} is outside {name}");
        }
    }

    Ok((pos, LevelPos::new(dest, dest_pos), source.to_owned()))
}

fn coordinate(s: &str) -> Result<i32> {
    s.parse().with_context(|| format!("bad coordinate {s:?}"))
}
