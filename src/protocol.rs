//! Wire messages between clients and a game room
//!
//! Everything is JSON, tagged by a `type` field in kebab-case. Client
//! messages address hand and deck cards by slot index; the server answers
//! with full [`Snapshot`]s rather than deltas.

use crate::board::Pos;
use crate::catalog::DeckSubmission;
use crate::core::{BySeat, PlayerSeat};
use crate::game::{Snapshot, StepInput};
use serde::{Deserialize, Serialize};

/// Messages a client sends to the room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// First message on a connection; reconnects reuse the username
    Join { username: String },
    /// Submit a deck for the coming game
    ChooseDeck { deck: DeckSubmission },
    /// Signal readiness; the game starts when both seats are ready
    Ready,
    Move { from: Pos, to: Pos },
    Summon { slot: usize, to: Pos },
    DirectAttack { pos: Pos },
    ActivateSorcery { slot: usize, pos: Pos },
    SorceryStep { payload: StepInput },
    PlaceLand { slot: usize, to: Pos },
    /// Supply a target for a placed land that demands one; no card in the
    /// base set does, so this always answers with an error today
    ResolveLand { slot: usize, target: Pos },
    EndTurn,
    EndTurnWithDiscard { slot: usize },
}

/// Messages the room sends back
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    Error {
        message: String,
    },
    /// Seat assignment after a successful join
    Joined {
        seat: PlayerSeat,
        username: String,
    },
    /// Lobby progress while decks are being chosen
    Lobby {
        deck_chosen: BySeat<bool>,
        ready: BySeat<bool>,
    },
    /// Both seats ready; initial table state
    Started {
        snapshot: Box<Snapshot>,
    },
    /// State after an action, successful or not
    Update {
        success: bool,
        info: String,
        snapshot: Box<Snapshot>,
    },
    /// A sorcery is waiting on a choice from its owner
    AwaitingInput {
        info: String,
        snapshot: Box<Snapshot>,
    },
    /// The hand is over the limit; a discard must accompany end-turn
    DiscardRequired {
        hand_size: usize,
        snapshot: Box<Snapshot>,
    },
    GameOver {
        winner: PlayerSeat,
        info: String,
        snapshot: Box<Snapshot>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_tags() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"move","from":[3,4],"to":[3,3]}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Move {
                from: Pos::new(3, 4),
                to: Pos::new(3, 3)
            }
        );

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"direct-attack","pos":[2,5]}"#).unwrap();
        assert_eq!(msg, ClientMessage::DirectAttack { pos: Pos::new(2, 5) });

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"end-turn-with-discard","slot":1}"#).unwrap();
        assert_eq!(msg, ClientMessage::EndTurnWithDiscard { slot: 1 });
    }

    #[test]
    fn test_step_payload_shapes() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"sorcery-step","payload":{"pos":[2,1]}}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::SorceryStep {
                payload: StepInput::Pos(Pos::new(2, 1))
            }
        );

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"sorcery-step","payload":{"slot":0}}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::SorceryStep {
                payload: StepInput::Slot(0)
            }
        );
    }

    #[test]
    fn test_server_message_round_trip() {
        let msg = ServerMessage::Error {
            message: "not your turn".into(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"error""#));
        let back: ServerMessage = serde_json::from_str(&json).unwrap();
        match back {
            ServerMessage::Error { message } => assert_eq!(message, "not your turn"),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = serde_json::from_str::<ClientMessage>(r#"{"type":"teleport"}"#);
        assert!(err.is_err());
    }
}
