//! Multi-step sorcery interactions
//!
//! Activating a sorcery opens a [`PendingInteraction`]: a fixed list of
//! steps with a monotone cursor. Steps that need a choice pause the engine
//! and lock every other action until the owner answers; effect steps run as
//! soon as the cursor reaches them. Values chosen by earlier steps are
//! recorded as bindings and consumed by later effect steps.

use crate::board::Pos;
use crate::core::{
    Binding, BindingKey, CardFilter, CardId, CardKind, EffectOp, InstantEffect, OwnerScope,
    PlayerSeat, ScriptKind, SorceryEffect, StepSpec, TargetedEffect, TutorFilter,
};
use crate::game::adjacency::ActivationScore;
use crate::game::GameState;
use crate::{EngineError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// An in-flight sorcery activation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingInteraction {
    pub owner: PlayerSeat,
    /// The activating sorcery; stays in hand until the last step completes
    pub source: CardId,
    /// Hand slot it was activated from (display only; the hand can shift)
    pub slot: usize,
    /// Whether the activation scored free, waiving the cost
    pub free: bool,
    /// Tile the sorcery was activated on
    pub pos: Pos,
    pub steps: Vec<StepSpec>,
    /// Index of the next step to run; only ever moves forward
    pub cursor: usize,
    pub bindings: FxHashMap<BindingKey, Binding>,
}

impl PendingInteraction {
    pub fn current_step(&self) -> Option<StepSpec> {
        self.steps.get(self.cursor).copied()
    }

    pub fn done(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    fn bound_pos(&self, key: BindingKey) -> Result<Pos> {
        match self.bindings.get(&key) {
            Some(Binding::Pos(p)) => Ok(*p),
            _ => Err(EngineError::Internal(format!("missing position binding {key:?}"))),
        }
    }

    fn bound_card(&self, key: BindingKey) -> Result<CardId> {
        match self.bindings.get(&key) {
            Some(Binding::Card(id)) => Ok(*id),
            _ => Err(EngineError::Internal(format!("missing card binding {key:?}"))),
        }
    }
}

/// Client payload answering an input step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepInput {
    Pos(Pos),
    Slot(usize),
    Card(CardId),
}

/// Legal choices for the step the engine is waiting on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceHint {
    BoardTiles(Vec<Pos>),
    LandTiles(Vec<Pos>),
    HandSlots(Vec<usize>),
    Cards(Vec<CardId>),
}

/// What the engine is waiting on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwaitingInput {
    pub step: StepSpec,
    pub choices: ChoiceHint,
}

/// Progress report after starting or stepping an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SorceryProgress {
    pub message: String,
    /// None once the interaction has fully resolved
    pub awaiting: Option<AwaitingInput>,
}

fn steps_for(effect: SorceryEffect) -> Vec<StepSpec> {
    match effect {
        SorceryEffect::Instant(e) => vec![
            StepSpec::PayCost,
            StepSpec::ApplyEffect(EffectOp::Instant(e)),
        ],
        SorceryEffect::Targeted(e) => {
            let scope = if e.enemy_only() {
                OwnerScope::Opponent
            } else {
                OwnerScope::Either
            };
            vec![
                StepSpec::PayCost,
                StepSpec::SelectBoardTarget {
                    scope,
                    bind: BindingKey::Target,
                },
                StepSpec::ApplyEffect(EffectOp::ResolveTarget {
                    effect: e,
                    target: BindingKey::Target,
                }),
            ]
        }
        SorceryEffect::Tutor(filter) => {
            let card_filter = match filter {
                TutorFilter::MonsterWithMaxAttack(_) => CardFilter::Monsters,
                TutorFilter::AnySorcery => CardFilter::Sorceries,
                TutorFilter::AnyLand => CardFilter::Lands,
            };
            vec![
                StepSpec::PayCost,
                StepSpec::SelectDeckCard {
                    scope: OwnerScope::Actor,
                    filter: card_filter,
                    bind: BindingKey::Pick,
                },
                StepSpec::ApplyEffect(EffectOp::ResolveTutor {
                    filter,
                    pick: BindingKey::Pick,
                }),
            ]
        }
        SorceryEffect::Scripted(ScriptKind::RiteOfTheFallen) => vec![
            StepSpec::PayCost,
            StepSpec::DiscardFromHand {
                scope: OwnerScope::Actor,
                bind: BindingKey::Discard,
            },
            StepSpec::SelectBoardTarget {
                scope: OwnerScope::Opponent,
                bind: BindingKey::Target,
            },
            StepSpec::ApplyEffect(EffectOp::DestroyBound {
                target: BindingKey::Target,
            }),
            StepSpec::SelectGraveyardCard {
                scope: OwnerScope::Actor,
                filter: CardFilter::Monsters,
                bind: BindingKey::Revived,
            },
            StepSpec::ApplyEffect(EffectOp::ReviveBound {
                card: BindingKey::Revived,
                at: BindingKey::Target,
            }),
        ],
    }
}

impl GameState {
    /// Activate a sorcery from hand at a tile, opening an interaction
    ///
    /// Cost and activation needs are validated up front; the cost itself is
    /// deducted by the interaction's first step.
    pub fn begin_sorcery(
        &mut self,
        seat: PlayerSeat,
        slot: usize,
        pos: Pos,
    ) -> Result<SorceryProgress> {
        self.ensure_unlocked()?;
        self.ensure_active(seat)?;
        if self.turn.flags.get(seat).sorcery_used {
            return Err(EngineError::illegal("already used a sorcery this turn"));
        }

        let id = self.hand_card(seat, slot)?;
        let card = self.card(id)?;
        let spec = card
            .sorcery()
            .ok_or_else(|| EngineError::illegal("this is not a sorcery"))?;
        let effect = spec.effect;
        let cost = card.mana;
        let name = card.name.clone();

        let free = match self.evaluate_needs(self.card(id)?, pos) {
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

        self.interaction = Some(PendingInteraction {
            owner: seat,
            source: id,
            slot,
            free,
            pos,
            steps: steps_for(effect),
            cursor: 0,
            bindings: FxHashMap::default(),
        });
        self.logger.normal(&format!("{name} activated"));

        self.run_until_input(format!("{name} activated!"))
    }

    /// Answer the input step the interaction is waiting on
    pub fn sorcery_step(&mut self, seat: PlayerSeat, input: StepInput) -> Result<SorceryProgress> {
        let pending = self
            .interaction
            .as_ref()
            .ok_or(EngineError::NoPendingInteraction)?;
        if pending.owner != seat {
            return Err(EngineError::illegal("not your interaction"));
        }
        let step = pending
            .current_step()
            .ok_or_else(|| EngineError::Internal("interaction past its last step".into()))?;

        // Invalid choices are recoverable: the interaction stays open and
        // the same step waits for another answer.
        let binding = self.validate_step_input(step, input)?;
        let pending = self
            .interaction
            .as_mut()
            .ok_or(EngineError::NoPendingInteraction)?;
        if let Some((key, value)) = binding {
            pending.bindings.insert(key, value);
        }
        pending.cursor += 1;

        self.run_until_input("choice recorded".to_string())
    }

    /// Run effect steps until the next input step or the end of the script
    fn run_until_input(&mut self, message: String) -> Result<SorceryProgress> {
        loop {
            let Some(pending) = self.interaction.as_ref() else {
                return Err(EngineError::NoPendingInteraction);
            };
            let Some(step) = pending.current_step() else {
                return self.finalize_interaction(message);
            };

            match step {
                StepSpec::PayCost => {
                    let (owner, free, source) = (pending.owner, pending.free, pending.source);
                    if !free {
                        let cost = self.card(source)?.mana;
                        *self.mana.get_mut(owner) -= cost;
                    }
                    self.advance_cursor();
                }
                StepSpec::ApplyEffect(op) => {
                    // Effect failures abort the interaction; effects already
                    // applied by earlier steps stand.
                    if let Err(e) = self.apply_effect_op(op) {
                        self.interaction = None;
                        return Err(e);
                    }
                    self.advance_cursor();
                }
                _ => {
                    let choices = self.choices_for(step)?;
                    return Ok(SorceryProgress {
                        message,
                        awaiting: Some(AwaitingInput { step, choices }),
                    });
                }
            }
        }
    }

    fn advance_cursor(&mut self) {
        if let Some(pending) = self.interaction.as_mut() {
            pending.cursor += 1;
        }
    }

    /// Retire the source card and release the lock
    fn finalize_interaction(&mut self, message: String) -> Result<SorceryProgress> {
        let Some(pending) = self.interaction.take() else {
            return Err(EngineError::NoPendingInteraction);
        };
        // The hand may have shifted (discard steps), so locate by id rather
        // than trusting the original slot.
        let zones = self.zones_mut(pending.owner);
        zones.hand.remove(pending.source);
        zones.graveyard.add(pending.source);
        self.turn.flags.get_mut(pending.owner).sorcery_used = true;
        let name = self.card(pending.source)?.name.clone();
        self.logger.normal(&format!("{name} resolved"));
        Ok(SorceryProgress {
            message,
            awaiting: None,
        })
    }

    /// Check a client answer against the current step; returns the binding
    fn validate_step_input(
        &mut self,
        step: StepSpec,
        input: StepInput,
    ) -> Result<Option<(BindingKey, Binding)>> {
        let pending = self
            .interaction
            .as_ref()
            .ok_or(EngineError::NoPendingInteraction)?;
        let actor = pending.owner;
        let source = pending.source;

        match (step, input) {
            (StepSpec::DiscardFromHand { scope, bind }, StepInput::Slot(slot)) => {
                let seat = scoped_seat(scope, actor);
                let id = self.hand_card(seat, slot)?;
                if id == source {
                    return Err(EngineError::illegal(
                        "cannot discard the card being resolved",
                    ));
                }
                self.zones_mut(seat).hand.take_at(slot);
                self.send_to_graveyard(id)?;
                Ok(Some((bind, Binding::Card(id))))
            }
            (StepSpec::SelectBoardTarget { scope, bind }, StepInput::Pos(pos)) => {
                let id = self
                    .monster_at(pos)
                    .ok_or_else(|| EngineError::illegal("no monster on that tile"))?;
                let owner = self.card(id)?.owner;
                if !scope.admits(actor, owner) {
                    return Err(EngineError::illegal("that monster is not a legal target"));
                }
                Ok(Some((bind, Binding::Pos(pos))))
            }
            (StepSpec::SelectLandTarget { scope, bind }, StepInput::Pos(pos)) => {
                let id = self
                    .land_at(pos)
                    .ok_or_else(|| EngineError::illegal("no land on that tile"))?;
                let owner = self.card(id)?.owner;
                if !scope.admits(actor, owner) {
                    return Err(EngineError::illegal("that land is not a legal target"));
                }
                Ok(Some((bind, Binding::Pos(pos))))
            }
            (StepSpec::SelectGraveyardCard { scope, filter, bind }, StepInput::Card(id)) => {
                let seat = scoped_seat(scope, actor);
                if !self.zones(seat).graveyard.contains(id) {
                    return Err(EngineError::illegal("card is not in that graveyard"));
                }
                self.check_filter(id, filter)?;
                Ok(Some((bind, Binding::Card(id))))
            }
            (StepSpec::SelectDeckCard { scope, filter, bind }, StepInput::Card(id)) => {
                let seat = scoped_seat(scope, actor);
                let in_deck = match filter {
                    CardFilter::Lands => self.zones(seat).land_deck.contains(id),
                    _ => self.zones(seat).deck.contains(id),
                };
                if !in_deck {
                    return Err(EngineError::illegal("card is not in that deck"));
                }
                self.check_filter(id, filter)?;
                if !self.tutor_admits(id)? {
                    return Err(EngineError::illegal("card does not match the filter"));
                }
                Ok(Some((bind, Binding::Card(id))))
            }
            (step, _) => Err(EngineError::illegal(format!(
                "wrong input kind for step {step:?}"
            ))),
        }
    }

    fn check_filter(&self, id: CardId, filter: CardFilter) -> Result<()> {
        let card = self.card(id)?;
        let ok = match filter {
            CardFilter::Monsters => card.is_monster(),
            CardFilter::Sorceries => card.is_sorcery(),
            CardFilter::Lands => card.is_land(),
            CardFilter::Any => true,
        };
        if ok {
            Ok(())
        } else {
            Err(EngineError::illegal("card does not match the filter"))
        }
    }

    /// Enumerate legal answers for an input step
    pub(crate) fn choices_for(&self, step: StepSpec) -> Result<ChoiceHint> {
        let pending = self
            .interaction
            .as_ref()
            .ok_or(EngineError::NoPendingInteraction)?;
        let actor = pending.owner;
        let source = pending.source;

        match step {
            StepSpec::DiscardFromHand { scope, .. } => {
                let seat = scoped_seat(scope, actor);
                let slots = self
                    .zones(seat)
                    .hand
                    .iter()
                    .enumerate()
                    .filter(|(_, id)| *id != source)
                    .map(|(i, _)| i)
                    .collect();
                Ok(ChoiceHint::HandSlots(slots))
            }
            StepSpec::SelectBoardTarget { scope, .. } => {
                let mut tiles = Vec::new();
                for (pos, id) in self.board.occupied() {
                    let owner = self.card(id)?.owner;
                    if scope.admits(actor, owner) {
                        tiles.push(pos);
                    }
                }
                Ok(ChoiceHint::BoardTiles(tiles))
            }
            StepSpec::SelectLandTarget { scope, .. } => {
                let mut tiles = Vec::new();
                for (pos, id) in self.land_board.occupied() {
                    let owner = self.card(id)?.owner;
                    if scope.admits(actor, owner) {
                        tiles.push(pos);
                    }
                }
                Ok(ChoiceHint::LandTiles(tiles))
            }
            StepSpec::SelectGraveyardCard { scope, filter, .. } => {
                let seat = scoped_seat(scope, actor);
                let cards = self
                    .zones(seat)
                    .graveyard
                    .iter()
                    .filter(|id| self.check_filter(*id, filter).is_ok())
                    .collect();
                Ok(ChoiceHint::Cards(cards))
            }
            StepSpec::SelectDeckCard { scope, filter, .. } => {
                let seat = scoped_seat(scope, actor);
                let zone = match filter {
                    CardFilter::Lands => &self.zones(seat).land_deck,
                    _ => &self.zones(seat).deck,
                };
                let cards = zone
                    .iter()
                    .filter(|id| {
                        self.check_filter(*id, filter).is_ok()
                            && self.tutor_admits(*id).unwrap_or(false)
                    })
                    .collect();
                Ok(ChoiceHint::Cards(cards))
            }
            StepSpec::PayCost | StepSpec::ApplyEffect(_) => {
                Err(EngineError::Internal("step takes no input".into()))
            }
        }
    }

    /// Extra per-card restriction a tutor filter imposes beyond kind
    fn tutor_admits(&self, id: CardId) -> Result<bool> {
        let Some(pending) = self.interaction.as_ref() else {
            return Ok(true);
        };
        let spec = match &self.card(pending.source)?.kind {
            CardKind::Sorcery(s) => s,
            _ => return Ok(true),
        };
        if let SorceryEffect::Tutor(TutorFilter::MonsterWithMaxAttack(max)) = spec.effect {
            let card = self.card(id)?;
            if let CardKind::Monster(m) = &card.kind {
                return Ok(m.attack <= max);
            }
            return Ok(false);
        }
        Ok(true)
    }

    fn apply_effect_op(&mut self, op: EffectOp) -> Result<()> {
        let pending = self
            .interaction
            .as_ref()
            .ok_or(EngineError::NoPendingInteraction)?;
        let actor = pending.owner;

        match op {
            EffectOp::Instant(e) => self.apply_instant(e, actor),
            EffectOp::ResolveTarget { effect, target } => {
                let pos = pending.bound_pos(target)?;
                self.apply_targeted(effect, pos, actor)
            }
            EffectOp::ResolveTutor { filter, pick } => {
                let id = pending.bound_card(pick)?;
                self.apply_tutor(filter, id, actor)
            }
            EffectOp::DestroyBound { target } => {
                let pos = pending.bound_pos(target)?;
                self.destroy_monster_at(pos)?;
                Ok(())
            }
            EffectOp::ReviveBound { card, at } => {
                let id = pending.bound_card(card)?;
                let pos = pending.bound_pos(at)?;
                if self.monster_at(pos).is_some() {
                    return Err(EngineError::illegal("revival tile is occupied"));
                }
                let owner = self.card(id)?.owner;
                if !self.zones_mut(owner).graveyard.remove(id) {
                    return Err(EngineError::Internal("revived card left the graveyard".into()));
                }
                // Stats come back at printed values
                if let Some(m) = self.card_mut(id)?.monster_mut() {
                    m.attack = m.base_attack;
                    m.defense = m.base_defense;
                }
                self.board.place(pos, id);
                let name = self.card(id)?.name.clone();
                self.logger.normal(&format!("{name} returned to the field"));
                Ok(())
            }
        }
    }

    fn apply_instant(&mut self, effect: InstantEffect, actor: PlayerSeat) -> Result<()> {
        match effect {
            InstantEffect::WeakenAllEnemyDefense(n) => {
                self.adjust_all(actor.opponent(), 0, -n)?;
            }
            InstantEffect::RaiseAllAlliedDefense(n) => {
                self.adjust_all(actor, 0, n)?;
            }
            InstantEffect::DrawCards(k) => {
                for _ in 0..k {
                    self.draw_card(actor);
                }
            }
            InstantEffect::DestroyAllMonsters => {
                let tiles: Vec<Pos> = self.board.occupied().map(|(p, _)| p).collect();
                for pos in tiles {
                    self.destroy_monster_at(pos)?;
                }
            }
            InstantEffect::WeakenAllEnemyAttack(n) => {
                self.adjust_all(actor.opponent(), -n, 0)?;
            }
        }
        Ok(())
    }

    /// Adjust stats of every monster a seat owns; lethal defense kills
    fn adjust_all(&mut self, seat: PlayerSeat, d_attack: i32, d_defense: i32) -> Result<()> {
        let targets: Vec<(Pos, CardId)> = self
            .board
            .occupied()
            .filter(|(_, id)| {
                self.card(*id)
                    .map(|c| c.owner == seat && c.is_monster())
                    .unwrap_or(false)
            })
            .collect();

        for (pos, id) in targets {
            let mut dead = false;
            if let Some(m) = self.card_mut(id)?.monster_mut() {
                m.attack += d_attack;
                m.defense += d_defense;
                dead = d_defense < 0 && m.defense <= 0;
            }
            if dead {
                self.destroy_monster_at(pos)?;
            }
        }
        Ok(())
    }

    fn apply_targeted(&mut self, effect: TargetedEffect, pos: Pos, actor: PlayerSeat) -> Result<()> {
        let id = self
            .monster_at(pos)
            .ok_or_else(|| EngineError::illegal("no monster on that tile"))?;
        let owner = self.card(id)?.owner;
        if effect.enemy_only() && owner == actor {
            return Err(EngineError::illegal("must target an enemy monster"));
        }

        match effect {
            TargetedEffect::DestroyEnemy => {
                self.destroy_monster_at(pos)?;
            }
            TargetedEffect::RaiseAttack(n) => {
                if let Some(m) = self.card_mut(id)?.monster_mut() {
                    m.attack += n;
                }
            }
            TargetedEffect::WeakenDefense(n) => {
                let mut dead = false;
                if let Some(m) = self.card_mut(id)?.monster_mut() {
                    m.defense -= n;
                    dead = m.defense <= 0;
                }
                if dead {
                    self.destroy_monster_at(pos)?;
                }
            }
            TargetedEffect::SeizeControl => {
                self.card_mut(id)?.owner = actor;
                let name = self.card(id)?.name.clone();
                self.logger.normal(&format!("{name} changed sides"));
            }
            TargetedEffect::DoubleStats => {
                if let Some(m) = self.card_mut(id)?.monster_mut() {
                    m.attack *= 2;
                    m.defense *= 2;
                }
            }
        }
        Ok(())
    }

    fn apply_tutor(&mut self, filter: TutorFilter, id: CardId, actor: PlayerSeat) -> Result<()> {
        let name = self.card(id)?.name.clone();
        match filter {
            TutorFilter::AnyLand => {
                // Lands are only playable from the land deck, so the pick
                // moves to its front instead of the hand.
                let zones = self.zones_mut(actor);
                if !zones.land_deck.remove(id) {
                    return Err(EngineError::Internal("tutored card left the deck".into()));
                }
                zones.land_deck.add_to_front(id);
                self.logger
                    .normal(&format!("{name} moved to the top of the land deck"));
            }
            _ => {
                let zones = self.zones_mut(actor);
                if !zones.deck.remove(id) {
                    return Err(EngineError::Internal("tutored card left the deck".into()));
                }
                zones.hand.add(id);
                self.logger.normal(&format!("{name} added to hand"));
            }
        }
        Ok(())
    }
}

fn scoped_seat(scope: OwnerScope, actor: PlayerSeat) -> PlayerSeat {
    match scope {
        OwnerScope::Actor | OwnerScope::Either => actor,
        OwnerScope::Opponent => actor.opponent(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn put(game: &mut GameState, template: &str, seat: PlayerSeat, pos: Pos) -> CardId {
        let card = catalog::instantiate(&template.into(), seat).unwrap();
        let id = game.spawn(card);
        game.board.place(pos, id);
        id
    }

    fn hand(game: &mut GameState, template: &str, seat: PlayerSeat) -> CardId {
        let card = catalog::instantiate(&template.into(), seat).unwrap();
        let id = game.spawn(card);
        game.zones_mut(seat).hand.add(id);
        id
    }

    /// Divine Reset has needs left+right; support both sides with walkers
    /// of a different role so the activation is paid, not free.
    fn supported_divine_reset(game: &mut GameState) -> (CardId, Pos) {
        let id = hand(game, "divine_reset", PlayerSeat::One);
        let pos = Pos::new(3, 3);
        // Bonecrawlers on either side point back via their left/right moves
        put(game, "bonecrawler", PlayerSeat::One, Pos::new(2, 3));
        put(game, "bonecrawler", PlayerSeat::One, Pos::new(4, 3));
        (id, pos)
    }

    #[test]
    fn test_instant_sorcery_resolves_in_one_call() {
        let mut game = GameState::new(0);
        let (source, pos) = supported_divine_reset(&mut game);
        let enemy = put(&mut game, "bonecrawler", PlayerSeat::Two, Pos::new(5, 0));

        let progress = game.begin_sorcery(PlayerSeat::One, 0, pos).unwrap();
        assert!(progress.awaiting.is_none());
        assert!(game.interaction.is_none());
        // Board swept: both supports and the enemy die
        assert_eq!(game.board.occupied().count(), 0);
        assert!(game.zones(PlayerSeat::Two).graveyard.contains(enemy));
        // Source went to the graveyard, flag set, cost paid (2 mana)
        assert!(game.zones(PlayerSeat::One).graveyard.contains(source));
        assert!(game.turn.flags.get(PlayerSeat::One).sorcery_used);
        assert_eq!(game.mana_of(PlayerSeat::One), 48);
    }

    #[test]
    fn test_interaction_locks_other_actions() {
        let mut game = GameState::new(0);
        hand(&mut game, "targeted_destruction", PlayerSeat::One);
        let enemy_pos = Pos::new(4, 0);
        put(&mut game, "bonecrawler", PlayerSeat::Two, enemy_pos);
        // Support "forward-right" for seat One from (3,3): (4,2)
        put(&mut game, "bloodthorn_reaper", PlayerSeat::One, Pos::new(4, 2));

        let progress = game
            .begin_sorcery(PlayerSeat::One, 0, Pos::new(3, 3))
            .unwrap();
        assert!(progress.awaiting.is_some());

        // Every ordinary action is rejected while the interaction is open
        let mover = put(&mut game, "bonecrawler", PlayerSeat::One, Pos::new(1, 4));
        let _ = mover;
        assert!(matches!(
            game.move_monster(PlayerSeat::One, Pos::new(1, 4), Pos::new(1, 3)),
            Err(EngineError::InteractionPending)
        ));
        assert!(matches!(
            game.end_turn(PlayerSeat::One),
            Err(EngineError::InteractionPending)
        ));

        // Answering the step resolves and unlocks
        let done = game
            .sorcery_step(PlayerSeat::One, StepInput::Pos(enemy_pos))
            .unwrap();
        assert!(done.awaiting.is_none());
        assert!(game.interaction.is_none());
        assert!(game.monster_at(enemy_pos).is_none());
        assert!(game
            .move_monster(PlayerSeat::One, Pos::new(1, 4), Pos::new(1, 3))
            .is_ok());
    }

    #[test]
    fn test_enemy_only_target_rejected_but_recoverable() {
        let mut game = GameState::new(0);
        hand(&mut game, "targeted_destruction", PlayerSeat::One);
        put(&mut game, "bloodthorn_reaper", PlayerSeat::One, Pos::new(4, 2));
        let own_pos = Pos::new(4, 2);
        let enemy_pos = Pos::new(0, 0);
        put(&mut game, "bonecrawler", PlayerSeat::Two, enemy_pos);

        game.begin_sorcery(PlayerSeat::One, 0, Pos::new(3, 3)).unwrap();

        // Picking an own monster fails but keeps the interaction open
        assert!(game
            .sorcery_step(PlayerSeat::One, StepInput::Pos(own_pos))
            .is_err());
        assert!(game.interaction.is_some());

        let done = game
            .sorcery_step(PlayerSeat::One, StepInput::Pos(enemy_pos))
            .unwrap();
        assert!(done.awaiting.is_none());
    }

    #[test]
    fn test_free_activation_skips_cost() {
        let mut game = GameState::new(0);
        // Frostbite Curse (aggressor) needs "forward"; Solar Paladin
        // (aggressor) at (3,2) points back at (3,3), so it scores free.
        hand(&mut game, "frostbite_curse", PlayerSeat::One);
        let paladin = put(&mut game, "solar_paladin", PlayerSeat::One, Pos::new(3, 2));

        let progress = game
            .begin_sorcery(PlayerSeat::One, 0, Pos::new(3, 3))
            .unwrap();
        assert!(progress.awaiting.is_some());
        assert_eq!(game.mana_of(PlayerSeat::One), 50);

        game.sorcery_step(PlayerSeat::One, StepInput::Pos(Pos::new(3, 2)))
            .unwrap();
        assert_eq!(game.mana_of(PlayerSeat::One), 50);
        let m = game.card(paladin).unwrap().monster().unwrap();
        assert_eq!(m.defense, 100);
    }

    #[test]
    fn test_tutor_moves_pick_to_hand() {
        let mut game = GameState::new(0);
        // Silent Recruiter needs "back": support at (3,4)
        hand(&mut game, "silent_recruiter", PlayerSeat::One);
        put(&mut game, "bonecrawler", PlayerSeat::One, Pos::new(3, 4));

        // Deck: one fetchable monster (atk 130 <= 180), one too strong
        let weak = catalog::instantiate(&"sylvan_archer".into(), PlayerSeat::One).unwrap();
        let weak_id = game.spawn(weak);
        game.zones_mut(PlayerSeat::One).deck.add(weak_id);
        let strong = catalog::instantiate(&"abyssal_leviathan".into(), PlayerSeat::One).unwrap();
        let strong_id = game.spawn(strong);
        game.zones_mut(PlayerSeat::One).deck.add(strong_id);

        let progress = game
            .begin_sorcery(PlayerSeat::One, 0, Pos::new(3, 3))
            .unwrap();
        match progress.awaiting.unwrap().choices {
            ChoiceHint::Cards(cards) => assert_eq!(cards, vec![weak_id]),
            other => panic!("expected card choices, got {other:?}"),
        }

        // The over-statted monster is not a legal pick
        assert!(game
            .sorcery_step(PlayerSeat::One, StepInput::Card(strong_id))
            .is_err());

        let done = game
            .sorcery_step(PlayerSeat::One, StepInput::Card(weak_id))
            .unwrap();
        assert!(done.awaiting.is_none());
        assert!(game.zones(PlayerSeat::One).hand.contains(weak_id));
        assert!(!game.zones(PlayerSeat::One).deck.contains(weak_id));
    }

    #[test]
    fn test_land_tutor_goes_to_land_deck_front() {
        let mut game = GameState::new(0);
        // Wanderer's Compass needs "left": support via a friendly walker at
        // (2,3) whose "right" points back.
        hand(&mut game, "wanderers_compass", PlayerSeat::One);
        put(&mut game, "bonecrawler", PlayerSeat::One, Pos::new(2, 3));

        let first = catalog::instantiate(&"volcanic_rift".into(), PlayerSeat::One).unwrap();
        let first_id = game.spawn(first);
        game.zones_mut(PlayerSeat::One).land_deck.add(first_id);
        let grove = catalog::instantiate(&"sacred_grove".into(), PlayerSeat::One).unwrap();
        let grove_id = game.spawn(grove);
        game.zones_mut(PlayerSeat::One).land_deck.add(grove_id);

        game.begin_sorcery(PlayerSeat::One, 0, Pos::new(3, 3)).unwrap();
        let done = game
            .sorcery_step(PlayerSeat::One, StepInput::Card(grove_id))
            .unwrap();
        assert!(done.awaiting.is_none());
        // The pick is now the next land draw
        assert_eq!(game.zones(PlayerSeat::One).land_deck.get(0), Some(grove_id));
        assert!(!game.zones(PlayerSeat::One).hand.contains(grove_id));
    }

    #[test]
    fn test_scripted_rite_full_run() {
        let mut game = GameState::new(0);
        let source = hand(&mut game, "rite_of_the_fallen", PlayerSeat::One);
        let fodder = hand(&mut game, "bonecrawler", PlayerSeat::One);

        // Rite needs "back": support at (3,4)
        put(&mut game, "magistra", PlayerSeat::One, Pos::new(3, 4));
        let enemy_pos = Pos::new(2, 1);
        let enemy = put(&mut game, "celestial_titan", PlayerSeat::Two, enemy_pos);

        // A fallen ally waits in the graveyard
        let fallen = catalog::instantiate(&"shadow_vine".into(), PlayerSeat::One).unwrap();
        let fallen_id = game.spawn(fallen);
        game.zones_mut(PlayerSeat::One).graveyard.add(fallen_id);

        // Step 1: discard
        let p = game.begin_sorcery(PlayerSeat::One, 0, Pos::new(3, 3)).unwrap();
        match p.awaiting.as_ref().unwrap().step {
            StepSpec::DiscardFromHand { .. } => {}
            other => panic!("expected discard step, got {other:?}"),
        }
        // The source itself is not discardable
        assert!(game
            .sorcery_step(PlayerSeat::One, StepInput::Slot(0))
            .is_err());
        let p = game
            .sorcery_step(PlayerSeat::One, StepInput::Slot(1))
            .unwrap();
        assert!(game.zones(PlayerSeat::One).graveyard.contains(fodder));

        // Step 2: pick the enemy monster to destroy
        match p.awaiting.as_ref().unwrap().step {
            StepSpec::SelectBoardTarget { scope: OwnerScope::Opponent, .. } => {}
            other => panic!("expected board target step, got {other:?}"),
        }
        let p = game
            .sorcery_step(PlayerSeat::One, StepInput::Pos(enemy_pos))
            .unwrap();
        assert!(game.monster_at(enemy_pos).is_none());
        assert!(game.zones(PlayerSeat::Two).graveyard.contains(enemy));

        // Step 3: pick the graveyard monster to revive onto the freed tile
        match p.awaiting.as_ref().unwrap().choices {
            ChoiceHint::Cards(ref cards) => assert!(cards.contains(&fallen_id)),
            ref other => panic!("expected card choices, got {other:?}"),
        }
        let done = game
            .sorcery_step(PlayerSeat::One, StepInput::Card(fallen_id))
            .unwrap();
        assert!(done.awaiting.is_none());
        assert_eq!(game.monster_at(enemy_pos), Some(fallen_id));
        assert!(!game.zones(PlayerSeat::One).graveyard.contains(fallen_id));
        assert!(game.zones(PlayerSeat::One).graveyard.contains(source));
        assert!(game.interaction.is_none());
    }

    #[test]
    fn test_one_sorcery_per_turn() {
        let mut game = GameState::new(0);
        let (_, pos) = supported_divine_reset(&mut game);
        game.begin_sorcery(PlayerSeat::One, 0, pos).unwrap();

        hand(&mut game, "divine_reset", PlayerSeat::One);
        let err = game.begin_sorcery(PlayerSeat::One, 0, pos);
        assert!(err.is_err());
    }
}
