//! Movement validation: direction tables, paths, and blocking lands

use crate::board::Pos;
use crate::core::{Card, CardId, CardKind, Direction, LandBehavior};
use crate::game::GameState;
use crate::{EngineError, Result};

/// Tiles strictly between `from` and `to`, or None when the two are not on
/// a straight or exact diagonal line
pub fn path_between(from: Pos, to: Pos) -> Option<Vec<Pos>> {
    let dx = to.x as i16 - from.x as i16;
    let dy = to.y as i16 - from.y as i16;
    if dx == 0 && dy == 0 {
        return None;
    }
    if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
        return None;
    }

    let steps = dx.abs().max(dy.abs());
    let sx = dx.signum();
    let sy = dy.signum();
    let mut path = Vec::with_capacity((steps - 1) as usize);
    for i in 1..steps {
        path.push(Pos::new(
            (from.x as i16 + sx * i) as u8,
            (from.y as i16 + sy * i) as u8,
        ));
    }
    Some(path)
}

impl GameState {
    /// Check that `card`'s movement table allows going from `from` to `to`
    pub(crate) fn check_reach(&self, card: &Card, from: Pos, to: Pos) -> Result<()> {
        let CardKind::Monster(monster) = &card.kind else {
            return Err(EngineError::illegal("only monsters move"));
        };

        let dx = to.x as i16 - from.x as i16;
        let dy = to.y as i16 - from.y as i16;
        if dx == 0 && dy == 0 {
            return Err(EngineError::illegal("no movement"));
        }
        if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
            return Err(EngineError::illegal("not a straight or diagonal line"));
        }

        let dir = Direction::from_unit(dx.signum() as i8, dy.signum() as i8, card.owner)
            .ok_or_else(|| EngineError::illegal("invalid move"))?;

        let steps = dx.abs().max(dy.abs()) as u8;
        match monster.movement.range(dir) {
            Some(range) if range.allows(steps) => Ok(()),
            Some(_) => Err(EngineError::illegal(format!("cannot move {steps} tiles {dir}"))),
            None => Err(EngineError::illegal(format!("cannot move {dir}"))),
        }
    }

    /// Walk the path, rejecting blocked tiles; returns the lands passed over
    ///
    /// Intermediate tiles must hold no monster. Any land on the path,
    /// destination included, may refuse the mover. Passed-over lands are
    /// returned so contact effects can fire after the move commits.
    pub(crate) fn check_path(&self, mover: CardId, from: Pos, to: Pos) -> Result<Vec<CardId>> {
        let card = self.card(mover)?;
        let (attack, defense, owner) = match &card.kind {
            CardKind::Monster(m) => (m.attack, m.defense, card.owner),
            _ => return Err(EngineError::illegal("only monsters move")),
        };

        let path = path_between(from, to)
            .ok_or_else(|| EngineError::illegal("not a straight or diagonal line"))?;

        let mut passed = Vec::new();
        for pos in path {
            if self.board.get(pos).is_some() {
                return Err(EngineError::illegal("path blocked by another monster"));
            }
            if let Some(land_id) = self.land_board.get(pos) {
                let land_card = self.card(land_id)?;
                if let CardKind::Land(spec) = &land_card.kind {
                    if land_card.owner != owner && spec.behavior.blocks(attack, defense) {
                        return Err(EngineError::illegal(format!(
                            "{} blocks movement",
                            land_card.name
                        )));
                    }
                    passed.push(land_id);
                }
            }
        }

        if let Some(land_id) = self.land_board.get(to) {
            let land_card = self.card(land_id)?;
            if let CardKind::Land(spec) = &land_card.kind {
                if land_card.owner != owner && spec.behavior.blocks(attack, defense) {
                    return Err(EngineError::illegal(format!(
                        "{} blocks movement",
                        land_card.name
                    )));
                }
            }
        }

        Ok(passed)
    }

    /// Apply a land's effect to a monster touching it; true when fatal
    ///
    /// `entered` distinguishes ending a move on the tile from passing over.
    pub(crate) fn apply_land_contact(
        &mut self,
        land_id: CardId,
        monster_id: CardId,
        entered: bool,
    ) -> Result<bool> {
        let land = self.card(land_id)?;
        let land_owner = land.owner;
        let land_name = land.name.clone();
        let behavior = match &land.kind {
            CardKind::Land(spec) => spec.behavior,
            _ => return Ok(false),
        };

        let card = self.card_mut(monster_id)?;
        if card.owner == land_owner {
            return Ok(false);
        }
        let Some(monster) = card.monster_mut() else {
            return Ok(false);
        };

        match behavior {
            LandBehavior::BurnOnEnter(n) if entered => {
                monster.defense -= n;
            }
            LandBehavior::WeakenAttackOnEnter(n) if entered => {
                monster.attack -= n;
            }
            LandBehavior::DrainOnContact(n) => {
                monster.attack -= n;
                monster.defense -= n;
            }
            _ => return Ok(false),
        }

        let fatal = monster.defense <= 0;
        let name = card.name.clone();
        self.logger
            .verbose(&format!("{land_name} affected {name}"));
        Ok(fatal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::core::PlayerSeat;

    #[test]
    fn test_path_between_lines() {
        // Straight line
        let p = path_between(Pos::new(2, 2), Pos::new(2, 5)).unwrap();
        assert_eq!(p, vec![Pos::new(2, 3), Pos::new(2, 4)]);
        // Exact diagonal
        let p = path_between(Pos::new(1, 1), Pos::new(3, 3)).unwrap();
        assert_eq!(p, vec![Pos::new(2, 2)]);
        // Adjacent tiles have an empty path
        assert!(path_between(Pos::new(0, 0), Pos::new(1, 0)).unwrap().is_empty());
        // Knight-like offsets are not lines
        assert!(path_between(Pos::new(0, 0), Pos::new(1, 2)).is_none());
        assert!(path_between(Pos::new(3, 3), Pos::new(3, 3)).is_none());
    }

    #[test]
    fn test_reach_respects_table() {
        let game = GameState::new(0);
        // Bonecrawler: one step in the four cardinal directions
        let card = catalog::instantiate(&"bonecrawler".into(), PlayerSeat::One).unwrap();
        assert!(game.check_reach(&card, Pos::new(3, 3), Pos::new(3, 2)).is_ok());
        assert!(game.check_reach(&card, Pos::new(3, 3), Pos::new(3, 1)).is_err());
        // No diagonal entry in its table
        assert!(game.check_reach(&card, Pos::new(3, 3), Pos::new(2, 2)).is_err());
    }

    #[test]
    fn test_reach_is_seat_relative() {
        let game = GameState::new(0);
        // Frost Revenant moves forward 2; for seat Two forward is +y
        let card = catalog::instantiate(&"frost_revenant".into(), PlayerSeat::Two).unwrap();
        assert!(game.check_reach(&card, Pos::new(3, 1), Pos::new(3, 3)).is_ok());
        assert!(game.check_reach(&card, Pos::new(3, 3), Pos::new(3, 1)).is_err());
    }

    #[test]
    fn test_blocked_path() {
        let mut game = GameState::new(0);
        let queen = catalog::instantiate(&"dreadmaw_queen".into(), PlayerSeat::One).unwrap();
        let qid = game.spawn(queen);
        game.board.place(Pos::new(3, 5), qid);
        let pawn = catalog::instantiate(&"bonecrawler".into(), PlayerSeat::One).unwrap();
        let pid = game.spawn(pawn);
        game.board.place(Pos::new(3, 4), pid);

        // Queen moving two forward passes over the occupied (3,4)
        let err = game.check_path(qid, Pos::new(3, 5), Pos::new(3, 3));
        assert!(err.is_err());
    }

    #[test]
    fn test_blocking_land_stops_enemies_only() {
        let mut game = GameState::new(0);
        let barrier = catalog::instantiate(&"frozen_barrier".into(), PlayerSeat::Two).unwrap();
        let bid = game.spawn(barrier);
        game.land_board.place(Pos::new(3, 3), bid);

        let pawn = catalog::instantiate(&"bonecrawler".into(), PlayerSeat::One).unwrap();
        let pid = game.spawn(pawn);
        game.board.place(Pos::new(3, 4), pid);
        assert!(game.check_path(pid, Pos::new(3, 4), Pos::new(3, 3)).is_err());

        let own = catalog::instantiate(&"bonecrawler".into(), PlayerSeat::Two).unwrap();
        let oid = game.spawn(own);
        game.board.place(Pos::new(3, 2), oid);
        assert!(game.check_path(oid, Pos::new(3, 2), Pos::new(3, 3)).is_ok());
    }

    #[test]
    fn test_drain_land_contact() {
        let mut game = GameState::new(0);
        let mine = catalog::instantiate(&"wasteland_mine".into(), PlayerSeat::Two).unwrap();
        let mid = game.spawn(mine);
        game.land_board.place(Pos::new(3, 3), mid);

        let pawn = catalog::instantiate(&"bonecrawler".into(), PlayerSeat::One).unwrap();
        let pid = game.spawn(pawn);

        let fatal = game.apply_land_contact(mid, pid, false).unwrap();
        assert!(!fatal);
        let m = game.card(pid).unwrap().monster().unwrap();
        assert_eq!(m.attack, 70);
        assert_eq!(m.defense, 170);
    }
}
