//! Client-facing view of the game state
//!
//! Snapshots carry everything a client needs to render the table. They are
//! plain serde structs, rebuilt from scratch on every broadcast.

use crate::core::{BySeat, Card, CardId, CardKind, Direction, MovementTable, PlayerSeat, Role};
use crate::game::interaction::AwaitingInput;
use crate::game::turn::{TurnFlags, MAX_MOVES_PER_TURN};
use crate::game::GameState;
use crate::Result;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One card as the client sees it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub card_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub owner: PlayerSeat,
    pub role: Role,
    pub mana: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_attack: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_defense: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<MovementTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs: Option<SmallVec<[Direction; 4]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CardView {
    pub fn new(id: CardId, card: &Card) -> Self {
        let mut view = CardView {
            id,
            card_id: card.template.to_string(),
            name: card.name.to_string(),
            kind: card.kind.label().to_string(),
            owner: card.owner,
            role: card.role,
            mana: card.mana,
            attack: None,
            defense: None,
            original_attack: None,
            original_defense: None,
            movement: None,
            needs: None,
            text: None,
        };
        match &card.kind {
            CardKind::Monster(m) => {
                view.attack = Some(m.attack);
                view.defense = Some(m.defense);
                view.original_attack = Some(m.base_attack);
                view.original_defense = Some(m.base_defense);
                view.movement = Some(m.movement.clone());
            }
            CardKind::Sorcery(s) => {
                view.needs = Some(s.activation_needs.clone());
                view.text = Some(s.text.to_string());
            }
            CardKind::Land(l) => {
                view.needs = Some(l.creation_needs.clone());
                view.text = Some(l.text.to_string());
            }
        }
        view
    }
}

/// The pending interaction as shown to its owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionView {
    pub owner: PlayerSeat,
    pub card_id: String,
    pub step_index: usize,
    pub step_count: usize,
    pub awaiting: AwaitingInput,
}

/// Full table state for one broadcast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Vec<Vec<Option<CardView>>>,
    pub land_board: Vec<Vec<Option<CardView>>>,
    pub hands: BySeat<Vec<CardView>>,
    pub graveyard: BySeat<Vec<CardView>>,
    pub deck_sizes: BySeat<usize>,
    pub land_deck_sizes: BySeat<usize>,
    pub mana: BySeat<i32>,
    pub turn: PlayerSeat,
    pub moves_left: u32,
    pub flags: BySeat<TurnFlags>,
    pub center_tile_control: BySeat<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<InteractionView>,
}

impl GameState {
    /// Render the whole table for broadcast
    pub fn snapshot(&self) -> Result<Snapshot> {
        let mut board = vec![vec![None; self.board.size()]; self.board.size()];
        for (pos, id) in self.board.occupied() {
            board[pos.y as usize][pos.x as usize] = Some(CardView::new(id, self.card(id)?));
        }
        let mut land_board =
            vec![vec![None; self.land_board.size()]; self.land_board.size()];
        for (pos, id) in self.land_board.occupied() {
            land_board[pos.y as usize][pos.x as usize] = Some(CardView::new(id, self.card(id)?));
        }

        let mut hands = BySeat::new(Vec::new(), Vec::new());
        let mut graveyard = BySeat::new(Vec::new(), Vec::new());
        for seat in [PlayerSeat::One, PlayerSeat::Two] {
            for id in self.zones(seat).hand.iter() {
                hands.get_mut(seat).push(CardView::new(id, self.card(id)?));
            }
            for id in self.zones(seat).graveyard.iter() {
                graveyard
                    .get_mut(seat)
                    .push(CardView::new(id, self.card(id)?));
            }
        }

        let interaction = if let Some(pending) = &self.interaction {
            match pending.current_step() {
                Some(step) if step.wants_input() => {
                    let card = self.card(pending.source)?;
                    Some(InteractionView {
                        owner: pending.owner,
                        card_id: card.template.to_string(),
                        step_index: pending.cursor,
                        step_count: pending.steps.len(),
                        awaiting: AwaitingInput {
                            step,
                            choices: self.choices_for(step)?,
                        },
                    })
                }
                _ => None,
            }
        } else {
            None
        };

        Ok(Snapshot {
            board,
            land_board,
            hands,
            graveyard,
            deck_sizes: self.zones.map(|z| z.deck.len()),
            land_deck_sizes: self.zones.map(|z| z.land_deck.len()),
            mana: self.mana.clone(),
            turn: self.turn.active,
            moves_left: MAX_MOVES_PER_TURN.saturating_sub(self.turn.moves_this_turn),
            flags: self.turn.flags.clone(),
            center_tile_control: self.turn.center_tile_control.clone(),
            interaction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;
    use crate::catalog;

    #[test]
    fn test_snapshot_shape() {
        let mut game = GameState::new(0);
        let card = catalog::instantiate(&"bonecrawler".into(), PlayerSeat::One).unwrap();
        let id = game.spawn(card);
        game.board.place(Pos::new(2, 5), id);
        let sorcery = catalog::instantiate(&"mystic_draw".into(), PlayerSeat::One).unwrap();
        let sid = game.spawn(sorcery);
        game.zones_mut(PlayerSeat::One).hand.add(sid);

        let snap = game.snapshot().unwrap();
        assert_eq!(snap.board.len(), 6);
        assert_eq!(snap.land_board.len(), 7);
        let view = snap.board[5][2].as_ref().unwrap();
        assert_eq!(view.card_id, "bonecrawler");
        assert_eq!(view.attack, Some(100));
        assert_eq!(snap.hands.get(PlayerSeat::One).len(), 1);
        assert_eq!(snap.moves_left, 3);
        assert!(snap.interaction.is_none());
        assert!(!snap.flags.get(PlayerSeat::One).summoned);

        // Rows index y, columns x
        let json = serde_json::to_value(&snap).unwrap();
        assert!(json["board"][5][2]["name"].is_string());
        assert_eq!(json["mana"]["1"], 50);
        assert_eq!(json["flags"]["1"]["summoned"], false);
    }
}
