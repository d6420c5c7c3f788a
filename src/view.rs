//! Text display and command parsing for the console client.

use std::fmt::Write;

use anyhow::{bail, Context, Result};
use engine::{prelude::*, Snapshot};

/// Terminal escape for remembered cells that are out of sight.
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

const HELP: &str = "w/a/s/d move, g take all, t N take, r N drop, \
                    e N equip, f search, q quit";

/// Map with fog of war followed by the status panel.
pub fn render(s: &Snapshot) -> String {
    let mut ret = String::new();
    let level = &s.level;

    for y in 0..level.height() {
        for x in 0..level.width() {
            let pos = ivec2(x, y);
            let Some(tile) = level.tile(pos) else {
                continue;
            };

            if tile.visible {
                ret.push(visible_icon(s, pos));
            } else if tile.seen {
                let _ = write!(ret, "{DIM}{}{RESET}", tile.icon());
            } else {
                ret.push(' ');
            }
        }
        ret.push('\n');
    }

    let _ = writeln!(
        ret,
        "{} | turn {} | HP {} | attack {} | armor {}",
        s.level_name,
        s.turn,
        s.player.hitpoints,
        s.player.attack_power(),
        s.player.armor()
    );
    for line in level.events() {
        let _ = writeln!(ret, "  {line}");
    }

    let here = level.items_at(s.player.pos);
    if !here.is_empty() {
        let _ = writeln!(ret, "Here: {}", item_list(here));
    }
    if !s.player.items.is_empty() {
        let _ = writeln!(ret, "Carrying: {}", item_list(&s.player.items));
    }
    let slots = [("Wielding", &s.player.weapon), ("Wearing", &s.player.helmet)];
    for (slot, item) in slots {
        if let Some(item) = item {
            let _ = writeln!(ret, "{slot}: {}", item.name);
        }
    }

    ret
}

fn visible_icon(s: &Snapshot, pos: Pos) -> char {
    let level = &s.level;
    if pos == s.player.pos {
        s.player.icon
    } else if let Some(mob) = level.monster_at(pos) {
        mob.icon
    } else if let Some(item) = level.items_at(pos).last() {
        item.icon
    } else if level.debug().contains(&pos) {
        '*'
    } else {
        level.tile(pos).map_or(' ', |t| t.icon())
    }
}

fn item_list(items: &[Item]) -> String {
    items
        .iter()
        .map(|e| format!("{} {}", e.id, e.name))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn parse_command(line: &str) -> Result<Input> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let id = |s: &str| -> Result<ItemId> {
        Ok(ItemId(s.parse().with_context(|| format!("bad item {s:?}"))?))
    };

    Ok(match words[..] {
        ["w"] => Input::Up,
        ["a"] => Input::Left,
        ["s"] => Input::Down,
        ["d"] => Input::Right,
        ["g"] => Input::TakeAll,
        ["t", n] => Input::TakeItem(id(n)?),
        ["r", n] => Input::DropItem(id(n)?),
        ["e", n] => Input::Equip(id(n)?),
        ["f"] => Input::Search,
        ["q"] => Input::Quit,
        _ => bail!("unknown command {line:?}, {HELP}"),
    })
}
