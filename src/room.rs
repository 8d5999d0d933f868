//! Game rooms and the room registry
//!
//! Each room is a tokio task owning its [`GameState`]; clients talk to it
//! through an mpsc command channel and receive [`ServerMessage`]s on their
//! own outbound channel. The registry maps room ids to handles and spawns
//! rooms on first join. No global state: dropping the registry drops the
//! rooms.

use crate::catalog::{self, DeckSubmission};
use crate::core::{BySeat, PlayerSeat};
use crate::game::{GameState, OutputMode, TurnEnd};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::{EngineError, Result};
use rustc_hash::FxHashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Mutex};

/// Commands a room task accepts
pub enum RoomCommand {
    Join {
        username: String,
        outbound: mpsc::Sender<ServerMessage>,
        reply: oneshot::Sender<Result<PlayerSeat>>,
    },
    Message {
        seat: PlayerSeat,
        msg: ClientMessage,
    },
    /// Drop a seat's outbound channel on disconnect
    Leave {
        seat: PlayerSeat,
    },
}

/// Cheap clonable handle to a running room
#[derive(Clone)]
pub struct RoomHandle {
    tx: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub async fn join(
        &self,
        username: String,
        outbound: mpsc::Sender<ServerMessage>,
    ) -> Result<PlayerSeat> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(RoomCommand::Join {
                username,
                outbound,
                reply,
            })
            .await
            .map_err(|_| EngineError::Protocol("room is gone".into()))?;
        rx.await
            .map_err(|_| EngineError::Protocol("room is gone".into()))?
    }

    pub async fn send(&self, seat: PlayerSeat, msg: ClientMessage) -> Result<()> {
        self.tx
            .send(RoomCommand::Message { seat, msg })
            .await
            .map_err(|_| EngineError::Protocol("room is gone".into()))
    }

    pub async fn leave(&self, seat: PlayerSeat) {
        let _ = self.tx.send(RoomCommand::Leave { seat }).await;
    }
}

/// Maps room ids to live rooms, spawning them on demand
#[derive(Default)]
pub struct RoomRegistry {
    rooms: Mutex<FxHashMap<String, RoomHandle>>,
}

impl RoomRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(RoomRegistry::default())
    }

    /// Handle for a room, spawning its task on first use
    ///
    /// The game seed is derived from the room id, so replays of a room id
    /// shuffle identically.
    pub async fn room(&self, room_id: &str) -> RoomHandle {
        let mut rooms = self.rooms.lock().await;
        if let Some(handle) = rooms.get(room_id) {
            return handle.clone();
        }
        let seed = {
            let mut hasher = rustc_hash::FxHasher::default();
            room_id.hash(&mut hasher);
            hasher.finish()
        };
        let (tx, rx) = mpsc::channel(64);
        spawn_room(seed, rx);
        let handle = RoomHandle { tx };
        rooms.insert(room_id.to_string(), handle.clone());
        handle
    }

    pub async fn remove(&self, room_id: &str) {
        self.rooms.lock().await.remove(room_id);
    }
}

/// Rooms run on their own thread with a single-threaded runtime: the game
/// state holds `RefCell`s (logger buffer, RNG), so the room future is not
/// `Send` and cannot go on the shared worker pool. The room is `Send` as a
/// value, which is all the thread handoff needs.
fn spawn_room(seed: u64, rx: mpsc::Receiver<RoomCommand>) {
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
        {
            Ok(rt) => rt,
            // Dropping rx makes every handle report the room as gone
            Err(_) => return,
        };
        rt.block_on(Room::new(seed).run(rx));
    });
}

#[derive(Default)]
struct SeatLobby {
    username: Option<String>,
    deck: Option<DeckSubmission>,
    ready: bool,
}

/// A single game room
struct Room {
    seed: u64,
    game: Option<GameState>,
    lobby: BySeat<SeatLobby>,
    outbound: BySeat<Option<mpsc::Sender<ServerMessage>>>,
    finished: bool,
}

impl Room {
    fn new(seed: u64) -> Self {
        Room {
            seed,
            game: None,
            lobby: BySeat::new(SeatLobby::default(), SeatLobby::default()),
            outbound: BySeat::new(None, None),
            finished: false,
        }
    }

    async fn run(mut self, mut rx: mpsc::Receiver<RoomCommand>) {
        while let Some(cmd) = rx.recv().await {
            match cmd {
                RoomCommand::Join {
                    username,
                    outbound,
                    reply,
                } => {
                    let _ = reply.send(self.handle_join(username, outbound).await);
                }
                RoomCommand::Message { seat, msg } => {
                    self.handle_message(seat, msg).await;
                }
                RoomCommand::Leave { seat } => {
                    *self.outbound.get_mut(seat) = None;
                }
            }
        }
    }

    /// Seat assignments persist per username so reconnects land back in
    /// their old seat
    async fn handle_join(
        &mut self,
        username: String,
        outbound: mpsc::Sender<ServerMessage>,
    ) -> Result<PlayerSeat> {
        let seat = if self.lobby.get(PlayerSeat::One).username.as_deref() == Some(&username) {
            PlayerSeat::One
        } else if self.lobby.get(PlayerSeat::Two).username.as_deref() == Some(&username) {
            PlayerSeat::Two
        } else if self.lobby.get(PlayerSeat::One).username.is_none() {
            self.lobby.get_mut(PlayerSeat::One).username = Some(username.clone());
            PlayerSeat::One
        } else if self.lobby.get(PlayerSeat::Two).username.is_none() {
            self.lobby.get_mut(PlayerSeat::Two).username = Some(username.clone());
            PlayerSeat::Two
        } else {
            return Err(EngineError::Protocol("game room is full".into()));
        };

        let _ = outbound
            .send(ServerMessage::Joined {
                seat,
                username,
            })
            .await;
        *self.outbound.get_mut(seat) = Some(outbound);

        // A reconnect mid-game gets the current table immediately
        if let Some(game) = &self.game {
            if let Ok(snapshot) = game.snapshot() {
                self.send_to(
                    seat,
                    ServerMessage::Started {
                        snapshot: Box::new(snapshot),
                    },
                )
                .await;
            }
        } else {
            self.broadcast_lobby().await;
        }
        Ok(seat)
    }

    async fn handle_message(&mut self, seat: PlayerSeat, msg: ClientMessage) {
        if self.finished {
            self.error_to(seat, "game is over").await;
            return;
        }
        match msg {
            ClientMessage::Join { .. } => {
                self.error_to(seat, "already joined").await;
            }
            ClientMessage::ChooseDeck { deck } => {
                if self.game.is_some() {
                    self.error_to(seat, "game already started").await;
                    return;
                }
                if let Err(e) = deck.validate() {
                    self.error_to(seat, &e.to_string()).await;
                    return;
                }
                self.lobby.get_mut(seat).deck = Some(deck);
                self.broadcast_lobby().await;
            }
            ClientMessage::Ready => {
                if self.game.is_some() {
                    self.error_to(seat, "game already started").await;
                    return;
                }
                if self.lobby.get(seat).deck.is_none() {
                    self.error_to(seat, "choose a deck first").await;
                    return;
                }
                self.lobby.get_mut(seat).ready = true;
                if self.lobby.get(PlayerSeat::One).ready && self.lobby.get(PlayerSeat::Two).ready {
                    self.start_game().await;
                } else {
                    self.broadcast_lobby().await;
                }
            }
            ClientMessage::ResolveLand { slot, .. } => {
                self.error_to(seat, &format!("land in slot {slot} takes no target"))
                    .await;
            }
            action => self.handle_action(seat, action).await,
        }
    }

    async fn start_game(&mut self) {
        let mut game = GameState::new(self.seed);
        game.logger.set_output_mode(OutputMode::Memory);
        for seat in [PlayerSeat::One, PlayerSeat::Two] {
            // Validated at submission time, so always present here
            if let Some(deck) = &self.lobby.get(seat).deck {
                catalog::build_decks(&mut game, seat, deck);
            }
        }
        catalog::start_game(&mut game);
        let snapshot = game.snapshot();
        self.game = Some(game);
        if let Ok(snapshot) = snapshot {
            self.broadcast(ServerMessage::Started {
                snapshot: Box::new(snapshot),
            })
            .await;
        }
    }

    async fn handle_action(&mut self, seat: PlayerSeat, msg: ClientMessage) {
        let Some(game) = self.game.as_mut() else {
            self.error_to(seat, "game has not started").await;
            return;
        };

        enum Outcome {
            Info(String),
            Awaiting(String),
            Discard(usize),
            Win(PlayerSeat, String),
        }

        let result: Result<Outcome> = match msg {
            ClientMessage::Move { from, to } => {
                game.move_monster(seat, from, to).map(Outcome::Info)
            }
            ClientMessage::Summon { slot, to } => game.summon(seat, slot, to).map(Outcome::Info),
            ClientMessage::DirectAttack { pos } => game.direct_attack(seat, pos).map(|r| {
                match r.winner {
                    Some(winner) => Outcome::Win(winner, r.message),
                    None => Outcome::Info(r.message),
                }
            }),
            ClientMessage::ActivateSorcery { slot, pos } => {
                game.begin_sorcery(seat, slot, pos).map(|p| {
                    if p.awaiting.is_some() {
                        Outcome::Awaiting(p.message)
                    } else {
                        Outcome::Info(p.message)
                    }
                })
            }
            ClientMessage::SorceryStep { payload } => game.sorcery_step(seat, payload).map(|p| {
                if p.awaiting.is_some() {
                    Outcome::Awaiting(p.message)
                } else {
                    Outcome::Info(p.message)
                }
            }),
            ClientMessage::PlaceLand { slot, to } => {
                game.place_land(seat, slot, to).map(Outcome::Info)
            }
            ClientMessage::EndTurn => game.end_turn(seat).map(turn_end_outcome),
            ClientMessage::EndTurnWithDiscard { slot } => {
                game.end_turn_with_discard(seat, slot).map(turn_end_outcome)
            }
            ClientMessage::Join { .. }
            | ClientMessage::ChooseDeck { .. }
            | ClientMessage::Ready
            | ClientMessage::ResolveLand { .. } => {
                unreachable!("handled before dispatch")
            }
        };

        fn turn_end_outcome(end: TurnEnd) -> Outcome {
            match end {
                TurnEnd::DiscardRequired { hand_size } => Outcome::Discard(hand_size),
                TurnEnd::Victory { winner } => {
                    Outcome::Win(winner, "center control victory".into())
                }
                TurnEnd::Ended { next } => Outcome::Info(format!("turn passed to player {next}")),
            }
        }

        let snapshot = match self.game.as_ref().map(|g| g.snapshot()) {
            Some(Ok(s)) => Box::new(s),
            _ => {
                self.error_to(seat, "internal snapshot failure").await;
                return;
            }
        };

        match result {
            Ok(Outcome::Info(info)) => {
                self.broadcast(ServerMessage::Update {
                    success: true,
                    info,
                    snapshot,
                })
                .await;
            }
            Ok(Outcome::Awaiting(info)) => {
                // Only the acting player sees the choice prompt; the
                // opponent learns of the lock from the next update.
                self.send_to(seat, ServerMessage::AwaitingInput { info, snapshot })
                    .await;
            }
            Ok(Outcome::Discard(hand_size)) => {
                self.send_to(seat, ServerMessage::DiscardRequired { hand_size, snapshot })
                    .await;
            }
            Ok(Outcome::Win(winner, info)) => {
                self.finished = true;
                self.broadcast(ServerMessage::GameOver {
                    winner,
                    info,
                    snapshot,
                })
                .await;
            }
            Err(e) => {
                // Failed actions bounce back to the actor only
                self.send_to(
                    seat,
                    ServerMessage::Update {
                        success: false,
                        info: e.to_string(),
                        snapshot,
                    },
                )
                .await;
            }
        }
    }

    async fn broadcast_lobby(&self) {
        let msg = ServerMessage::Lobby {
            deck_chosen: self.lobby.map(|l| l.deck.is_some()),
            ready: self.lobby.map(|l| l.ready),
        };
        self.broadcast(msg).await;
    }

    async fn broadcast(&self, msg: ServerMessage) {
        for seat in [PlayerSeat::One, PlayerSeat::Two] {
            self.send_to(seat, msg.clone()).await;
        }
    }

    async fn send_to(&self, seat: PlayerSeat, msg: ServerMessage) {
        if let Some(tx) = self.outbound.get(seat) {
            let _ = tx.send(msg).await;
        }
    }

    async fn error_to(&self, seat: PlayerSeat, message: &str) {
        self.send_to(
            seat,
            ServerMessage::Error {
                message: message.to_string(),
            },
        )
        .await;
    }
}
