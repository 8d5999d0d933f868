//! Activation-need scoring for sorceries and lands
//!
//! A card played onto a tile names directions that must be "supported": the
//! neighboring tile in that direction must hold a friendly monster or land
//! that points back at the tile. Support from a piece sharing the card's role
//! upgrades the activation; full role support makes it free.

use crate::board::Pos;
use crate::core::{Card, CardKind, Direction, PlayerSeat, Role};
use crate::game::GameState;

/// Outcome of scoring one need, or a whole activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ActivationScore {
    /// At least one need unsupported
    Blocked,
    /// All needs supported; pay full cost
    Paid,
    /// All needs supported by same-role pieces; no cost
    Free,
}

impl GameState {
    /// Score the needs of `card` if played at `pos`
    ///
    /// No needs means the card is always free to play. Otherwise every need
    /// must score at least [`ActivationScore::Paid`].
    pub fn evaluate_needs(&self, card: &Card, pos: Pos) -> ActivationScore {
        let needs = card.needs();
        if needs.is_empty() {
            return ActivationScore::Free;
        }

        let mut all_free = true;
        for dir in needs {
            match self.need_score(pos, *dir, card.owner, card.role) {
                ActivationScore::Blocked => return ActivationScore::Blocked,
                ActivationScore::Paid => all_free = false,
                ActivationScore::Free => {}
            }
        }
        if all_free {
            ActivationScore::Free
        } else {
            ActivationScore::Paid
        }
    }

    /// Score one direction: does the neighbor there point back at `pos`?
    fn need_score(
        &self,
        pos: Pos,
        dir: Direction,
        owner: PlayerSeat,
        role: Role,
    ) -> ActivationScore {
        let (dx, dy) = dir.offset(owner);
        let Some(neighbor) = pos.step(dx, dy, self.board.size()) else {
            return ActivationScore::Blocked;
        };

        // A monster on the neighboring tile takes priority. An enemy monster
        // there kills the need outright; it cannot be satisfied past it.
        if let Some(id) = self.board.get(neighbor) {
            if let Ok(card) = self.card(id) {
                if card.owner != owner {
                    return ActivationScore::Blocked;
                }
                if let CardKind::Monster(m) = &card.kind {
                    for (mdir, _) in m.movement.iter() {
                        if self.points_at(neighbor, mdir, card.owner, pos) {
                            return if card.role == role {
                                ActivationScore::Free
                            } else {
                                ActivationScore::Paid
                            };
                        }
                    }
                }
            }
        }

        // Otherwise a friendly land there may support via its own needs.
        if let Some(id) = self.land_board.get(neighbor) {
            if let Ok(card) = self.card(id) {
                if card.owner != owner {
                    return ActivationScore::Blocked;
                }
                if let CardKind::Land(l) = &card.kind {
                    for ldir in &l.creation_needs {
                        if self.points_at(neighbor, *ldir, card.owner, pos) {
                            return if card.role == role {
                                ActivationScore::Free
                            } else {
                                ActivationScore::Paid
                            };
                        }
                    }
                }
            }
        }

        ActivationScore::Blocked
    }

    fn points_at(&self, from: Pos, dir: Direction, owner: PlayerSeat, target: Pos) -> bool {
        let (dx, dy) = dir.offset(owner);
        from.step(dx, dy, self.board.size()) == Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::core::PlayerSeat;

    fn game_with(template: &str, seat: PlayerSeat, pos: Pos) -> (GameState, crate::core::CardId) {
        let mut game = GameState::new(0);
        let card = catalog::instantiate(&template.into(), seat).unwrap();
        let id = game.spawn(card);
        game.board.place(pos, id);
        (game, id)
    }

    #[test]
    fn test_no_needs_is_free() {
        let game = GameState::new(0);
        let monster = catalog::instantiate(&"bonecrawler".into(), PlayerSeat::One).unwrap();
        assert_eq!(
            game.evaluate_needs(&monster, Pos::new(3, 3)),
            ActivationScore::Free
        );
    }

    #[test]
    fn test_unsupported_need_blocks() {
        let game = GameState::new(0);
        // Blazing Rain needs "back": the tile behind must support it
        let sorcery = catalog::instantiate(&"blazing_rain".into(), PlayerSeat::One).unwrap();
        assert_eq!(
            game.evaluate_needs(&sorcery, Pos::new(3, 3)),
            ActivationScore::Blocked
        );
    }

    #[test]
    fn test_monster_pointing_back_supports() {
        // Seat One's "back" from (3,3) is (3,4). A Bonecrawler there moves
        // forward one tile, which points at (3,3).
        let (game, _) = game_with("bonecrawler", PlayerSeat::One, Pos::new(3, 4));
        let sorcery = catalog::instantiate(&"blazing_rain".into(), PlayerSeat::One).unwrap();
        // Bonecrawler is a walker, Blazing Rain an aggressor: paid, not free
        assert_eq!(
            game.evaluate_needs(&sorcery, Pos::new(3, 3)),
            ActivationScore::Paid
        );
    }

    #[test]
    fn test_matching_role_makes_it_free() {
        // Frostbite Curse (aggressor) needs "forward" = (3,2) for seat One.
        // Solar Paladin (aggressor) at (3,2) has "back" range 2, pointing at
        // (3,3) in seat One's frame.
        let (game, _) = game_with("solar_paladin", PlayerSeat::One, Pos::new(3, 2));
        let sorcery = catalog::instantiate(&"frostbite_curse".into(), PlayerSeat::One).unwrap();
        assert_eq!(
            game.evaluate_needs(&sorcery, Pos::new(3, 3)),
            ActivationScore::Free
        );
    }

    #[test]
    fn test_enemy_occupant_blocks() {
        let (game, _) = game_with("bonecrawler", PlayerSeat::Two, Pos::new(3, 4));
        let sorcery = catalog::instantiate(&"blazing_rain".into(), PlayerSeat::One).unwrap();
        assert_eq!(
            game.evaluate_needs(&sorcery, Pos::new(3, 3)),
            ActivationScore::Blocked
        );
    }

    #[test]
    fn test_land_supports_via_creation_needs() {
        // Wasteland Mine's creation need is "right": from (2,3) seat One's
        // right is (3,3), so the mine points at (3,3).
        let mut game = GameState::new(0);
        let mine = catalog::instantiate(&"wasteland_mine".into(), PlayerSeat::One).unwrap();
        let id = game.spawn(mine);
        game.land_board.place(Pos::new(2, 3), id);

        // Wanderer's Compass needs "left": from (3,3) that is the mine's
        // tile. Roles differ (walker vs manipulator), so paid rather than
        // free.
        let compass = catalog::instantiate(&"wanderers_compass".into(), PlayerSeat::One).unwrap();
        assert_eq!(
            game.evaluate_needs(&compass, Pos::new(3, 3)),
            ActivationScore::Paid
        );
    }
}
