//! Player actions: moving, combat, summoning, land placement, turn end

use crate::board::{Pos, CENTER_TILES};
use crate::core::{CardKind, LandBehavior, PlayerSeat};
use crate::game::adjacency::ActivationScore;
use crate::game::turn::{CENTER_CONTROL_TARGET, HAND_LIMIT};
use crate::game::GameState;
use crate::{EngineError, Result};

/// Outcome of a direct attack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackReport {
    pub message: String,
    /// Set when the attack emptied the opponent's mana pool
    pub winner: Option<PlayerSeat>,
}

/// Outcome of asking to end the turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEnd {
    /// Hand is over the limit; a discard must accompany the request
    DiscardRequired { hand_size: usize },
    /// The ending seat held the center long enough to win
    Victory { winner: PlayerSeat },
    /// Turn passed to the other seat
    Ended { next: PlayerSeat },
}

impl GameState {
    /// Move a monster, resolving combat if the destination is occupied
    pub fn move_monster(&mut self, seat: PlayerSeat, from: Pos, to: Pos) -> Result<String> {
        self.ensure_unlocked()?;
        if !self.turn.can_move(seat) {
            return Err(EngineError::illegal("no moves left this turn"));
        }
        if !from.in_bounds(self.board.size()) || !to.in_bounds(self.board.size()) {
            return Err(EngineError::illegal("move is off the board"));
        }

        let mover = self
            .monster_at(from)
            .ok_or_else(|| EngineError::illegal("no card at source"))?;
        let card = self.card(mover)?;
        if card.owner != seat {
            return Err(EngineError::illegal("that is not your card"));
        }
        let mover_name = card.name.clone();
        if !card.is_monster() {
            return Err(EngineError::illegal("only monsters move"));
        }

        self.check_reach(self.card(mover)?, from, to)?;
        let passed = self.check_path(mover, from, to)?;
        if let Some(target) = self.monster_at(to) {
            if self.card(target)?.owner == seat {
                return Err(EngineError::illegal("cannot capture your own card"));
            }
        }

        // Land contact resolves before combat: stepped-over tiles first,
        // then the destination. A mover that dies here dies in place.
        for land_id in passed {
            if self.apply_land_contact(land_id, mover, false)? {
                self.board.take(from);
                self.send_to_graveyard(mover)?;
                self.turn.spend_move();
                return Ok(format!("{mover_name} was destroyed en route"));
            }
        }
        if let Some(land_id) = self.land_at(to) {
            if self.apply_land_contact(land_id, mover, true)? {
                self.board.take(from);
                self.send_to_graveyard(mover)?;
                self.turn.spend_move();
                return Ok(format!("{mover_name} was destroyed on arrival"));
            }
        }

        // Debuffs from land contact count in the combat that follows
        let mover_attack = match &self.card(mover)?.kind {
            CardKind::Monster(m) => m.attack,
            _ => return Err(EngineError::Internal("non-monster on board".into())),
        };

        // Combat resolution against an occupied destination
        let message = if let Some(target) = self.monster_at(to) {
            let target_card = self.card(target)?;
            let target_name = target_card.name.clone();
            let target_defense = match &target_card.kind {
                CardKind::Monster(m) => m.defense,
                _ => return Err(EngineError::Internal("non-monster on board".into())),
            };

            if mover_attack > target_defense {
                self.destroy_monster_at(to)?;
                self.board.take(from);
                self.board.place(to, mover);
                format!("{mover_name} defeated {target_name}!")
            } else if mover_attack == target_defense {
                self.destroy_monster_at(to)?;
                self.destroy_monster_at(from)?;
                self.turn.spend_move();
                self.logger
                    .normal(&format!("{mover_name} and {target_name} traded"));
                return Ok(format!("{mover_name} and {target_name} defeated!"));
            } else {
                self.destroy_monster_at(from)?;
                self.turn.spend_move();
                self.logger
                    .normal(&format!("{mover_name} fell to {target_name}"));
                return Ok(format!("{mover_name} was killed by {target_name}!"));
            }
        } else {
            self.board.take(from);
            self.board.place(to, mover);
            "Move successful".to_string()
        };

        self.turn.spend_move();
        self.logger
            .normal(&format!("{mover_name} moved {from} -> {to}"));

        Ok(message)
    }

    /// Summon a monster from hand onto the caller's summon row
    pub fn summon(&mut self, seat: PlayerSeat, slot: usize, to: Pos) -> Result<String> {
        self.ensure_unlocked()?;
        self.ensure_active(seat)?;
        if self.turn.flags.get(seat).summoned {
            return Err(EngineError::illegal("already summoned this turn"));
        }
        if to.y != seat.summon_row() || !to.in_bounds(self.board.size()) {
            return Err(EngineError::illegal("invalid summon position"));
        }
        if self.monster_at(to).is_some() {
            return Err(EngineError::illegal("tile is occupied"));
        }

        let id = self.hand_card(seat, slot)?;
        let card = self.card(id)?;
        if !card.is_monster() {
            return Err(EngineError::illegal("only monsters can be summoned"));
        }
        let cost = card.mana;
        let name = card.name.clone();
        if self.mana_of(seat) < cost {
            return Err(EngineError::illegal("not enough mana"));
        }

        *self.mana.get_mut(seat) -= cost;
        self.zones_mut(seat).hand.take_at(slot);
        self.board.place(to, id);
        self.turn.flags.get_mut(seat).summoned = true;
        self.logger.normal(&format!("{name} summoned at {to}"));
        Ok(format!("{name} summoned!"))
    }

    /// Attack the opponent's mana pool from the caller's own back row
    pub fn direct_attack(&mut self, seat: PlayerSeat, pos: Pos) -> Result<AttackReport> {
        self.ensure_unlocked()?;
        if !self.turn.can_move(seat) {
            return Err(EngineError::illegal("no moves left this turn"));
        }

        let id = self
            .monster_at(pos)
            .ok_or_else(|| EngineError::illegal("invalid card selected"))?;
        let card = self.card(id)?;
        if card.owner != seat || !card.is_monster() {
            return Err(EngineError::illegal("invalid card selected"));
        }
        if pos.y != seat.summon_row() {
            return Err(EngineError::illegal("not in position for direct attack"));
        }

        let damage = card.mana;
        let name = card.name.clone();
        let opponent = seat.opponent();
        let pool = self.mana.get_mut(opponent);
        *pool = (*pool - damage).max(0);
        let depleted = *pool == 0;
        self.turn.spend_move();

        if depleted {
            self.logger.minimal(&format!("{name} dealt the final blow"));
            Ok(AttackReport {
                message: format!("{name} dealt a final blow!"),
                winner: Some(seat),
            })
        } else {
            self.logger
                .normal(&format!("{name} attacked directly for {damage}"));
            Ok(AttackReport {
                message: format!("{name} attacked directly for {damage} mana!"),
                winner: None,
            })
        }
    }

    /// Place a land from the land deck onto an empty land tile
    pub fn place_land(&mut self, seat: PlayerSeat, slot: usize, to: Pos) -> Result<String> {
        self.ensure_unlocked()?;
        self.ensure_active(seat)?;
        if self.turn.flags.get(seat).land_placed {
            return Err(EngineError::illegal("already placed a land this turn"));
        }
        if !to.in_bounds(self.land_board.size()) {
            return Err(EngineError::illegal("off the land board"));
        }
        if self.land_at(to).is_some() {
            return Err(EngineError::illegal("land already exists here"));
        }
        if self.monster_at(to).is_some() {
            return Err(EngineError::illegal("tile is occupied"));
        }

        let id = self
            .zones(seat)
            .land_deck
            .get(slot)
            .ok_or_else(|| EngineError::illegal(format!("no land in slot {slot}")))?;
        let card = self.card(id)?;
        if !card.is_land() {
            return Err(EngineError::illegal("not a land card"));
        }
        let cost = card.mana;
        let name = card.name.clone();

        let free = match self.evaluate_needs(self.card(id)?, to) {
            ActivationScore::Blocked => {
                return Err(EngineError::illegal("activation needs not met"))
            }
            ActivationScore::Paid => {
                if self.mana_of(seat) < cost {
                    return Err(EngineError::illegal("not enough mana"));
                }
                false
            }
            ActivationScore::Free => true,
        };

        if !free {
            *self.mana.get_mut(seat) -= cost;
        }
        self.zones_mut(seat).land_deck.take_at(slot);
        self.land_board.place(to, id);
        self.turn.flags.get_mut(seat).land_placed = true;
        self.logger.normal(&format!("{name} placed at {to}"));
        Ok(format!("{name} placed as land"))
    }

    /// End the turn, enforcing the hand limit and checking center control
    pub fn end_turn(&mut self, seat: PlayerSeat) -> Result<TurnEnd> {
        self.ensure_unlocked()?;
        self.ensure_active(seat)?;

        let hand_size = self.zones(seat).hand.len();
        if hand_size > HAND_LIMIT {
            return Ok(TurnEnd::DiscardRequired { hand_size });
        }

        self.update_center_control();
        for holder in [seat, seat.opponent()] {
            if *self.turn.center_tile_control.get(holder) >= CENTER_CONTROL_TARGET {
                self.logger
                    .minimal(&format!("player {holder} wins by center control"));
                return Ok(TurnEnd::Victory { winner: holder });
            }
        }

        self.turn.advance();
        let next = self.turn.active;
        self.draw_card(next);
        self.apply_turn_start_lands()?;
        self.logger.normal(&format!("player {seat} ended their turn"));
        Ok(TurnEnd::Ended { next })
    }

    /// Discard a hand card, then end the turn
    pub fn end_turn_with_discard(&mut self, seat: PlayerSeat, slot: usize) -> Result<TurnEnd> {
        self.ensure_unlocked()?;
        self.ensure_active(seat)?;

        let id = self
            .zones_mut(seat)
            .hand
            .take_at(slot)
            .ok_or_else(|| EngineError::illegal(format!("no card in hand slot {slot}")))?;
        self.send_to_graveyard(id)?;
        self.logger.verbose(&format!("player {seat} discarded a card"));
        self.end_turn(seat)
    }

    /// Bump or reset the center-control counters
    ///
    /// A seat scores a turn of control when it occupies at least one of the
    /// four center tiles and the opponent occupies none.
    fn update_center_control(&mut self) {
        let mut held = [false, false];
        for pos in CENTER_TILES {
            if let Some(id) = self.monster_at(pos) {
                if let Ok(card) = self.card(id) {
                    held[card.owner.index()] = true;
                }
            }
        }

        for seat in [PlayerSeat::One, PlayerSeat::Two] {
            let counter = self.turn.center_tile_control.get_mut(seat);
            if held[seat.index()] && !held[seat.opponent().index()] {
                *counter += 1;
            } else {
                *counter = 0;
            }
        }
    }

    /// Heal-over-time lands fire for monsters standing on them
    fn apply_turn_start_lands(&mut self) -> Result<()> {
        let mut heals: Vec<(crate::core::CardId, i32)> = Vec::new();
        for (pos, monster_id) in self.board.occupied() {
            let Some(land_id) = self.land_board.get(pos) else {
                continue;
            };
            let (Ok(monster), Ok(land)) = (self.card(monster_id), self.card(land_id)) else {
                continue;
            };
            if monster.owner != land.owner {
                continue;
            }
            if let CardKind::Land(spec) = &land.kind {
                if let LandBehavior::HealOnTurnStart(n) = spec.behavior {
                    heals.push((monster_id, n));
                }
            }
        }
        for (id, n) in heals {
            if let Some(m) = self.card_mut(id)?.monster_mut() {
                m.defense += n;
            }
        }
        Ok(())
    }
}
