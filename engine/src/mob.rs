//! Creature turns and combat.

use crate::prelude::*;

impl Level {
    /// Resolve a blow of `damage` points from `attacker` to `defender`.
    ///
    /// Return whether the defender died.
    pub fn strike(
        &mut self,
        attacker: &mut Character,
        damage: i32,
        defender: &mut Character,
    ) -> bool {
        attacker.spend();
        defender.hitpoints -= damage;

        if defender.is_alive() {
            self.add_event(format!(
                "{} attacked {} for {damage}",
                attacker.name, defender.name
            ));
            false
        } else {
            self.add_event(format!(
                "{} killed {}",
                attacker.name, defender.name
            ));
            true
        }
    }

    /// Player hits the monster at `pos` with their weapon.
    pub(crate) fn player_attack(&mut self, player: &mut Player, pos: Pos) {
        let Some(mut mob) = self.monsters.remove(&pos) else {
            return;
        };

        let damage = player.attack_power();
        self.last_event = Some(GameEvent::Attack);
        if self.strike(player, damage, &mut mob) {
            self.kill(mob);
        } else {
            self.monsters.insert(pos, mob);
        }
    }

    /// Dispose of a dead monster, whatever it carried drops to the ground.
    pub(crate) fn kill(&mut self, mut mob: Monster) {
        log::debug!("{} died at {}", mob.name, mob.pos);
        self.monsters.remove(&mob.pos);
        let loot = std::mem::take(&mut mob.items);
        self.scatter(mob.pos, loot);
    }

    /// Run every monster on the level for one tick, in row order.
    pub(crate) fn update_monsters(&mut self, player: &mut Player) {
        let mut order: Vec<Pos> = self.monsters.keys().copied().collect();
        order.sort_by_key(|p| (p.y, p.x));

        for pos in order {
            if !player.is_alive() {
                break;
            }
            self.update_monster(pos, player);
        }
    }

    /// Run one tick for the monster at `pos`.
    ///
    /// The monster walks along the shortest path towards the player and
    /// attacks once it's adjacent.
    pub(crate) fn update_monster(&mut self, pos: Pos, player: &mut Player) {
        // Keep the monster off the map while it acts.
        let Some(mut mob) = self.monsters.remove(&pos) else {
            return;
        };
        mob.accumulate();

        let path = self.astar(mob.pos, player.pos);
        if path.is_empty() {
            mob.pass();
            self.monsters.insert(mob.pos, mob);
            return;
        }

        let mut steps = path.into_iter().skip(1).peekable();
        for _ in 0..mob.whole_actions() {
            let Some(&next) = steps.peek() else {
                break;
            };

            if next == player.pos {
                let damage = (mob.strength - player.armor()).max(0);
                self.last_event = Some(GameEvent::Hit);
                if self.strike(&mut mob, damage, player) {
                    break;
                }
            } else if self.can_walk(next) {
                mob.pos = next;
                mob.spend();
                steps.next();
            } else {
                // Lose the action and stay put for the rest of the tick.
                log::debug!("{} blocked at {next}", mob.name);
                mob.spend();
                break;
            }
        }

        self.monsters.insert(mob.pos, mob);
    }
}
