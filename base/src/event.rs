//! Named lifecycle events of a hand.
//!
//! The engine records the symbol of the last emitted event in
//! `status.current_event`; resuming a persisted snapshot re-emits that
//! event, so handlers for the rest states (the events a driver is
//! expected to answer) are no-ops.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameEvent {
    Started,
    Initialized,
    ReadyRequested,
    AnteRequested,
    AntePaid,
    BlindsRequested,
    BlindsPaid,
    PreflopRoundEntered,
    FlopRoundEntered,
    TurnRoundEntered,
    RiverRoundEntered,
    RoundInitialized,
    RoundPrepared,
    RoundStarted,
    RoundClosed,
    GameCompleted,
    SettlementRequested,
    SettlementCompleted,
    GameClosed,
}

impl GameEvent {
    pub fn symbol(&self) -> &'static str {
        match self {
            GameEvent::Started => "Started",
            GameEvent::Initialized => "Initialized",
            GameEvent::ReadyRequested => "ReadyRequested",
            GameEvent::AnteRequested => "AnteRequested",
            GameEvent::AntePaid => "AntePaid",
            GameEvent::BlindsRequested => "BlindsRequested",
            GameEvent::BlindsPaid => "BlindsPaid",
            GameEvent::PreflopRoundEntered => "PreflopRoundEntered",
            GameEvent::FlopRoundEntered => "FlopRoundEntered",
            GameEvent::TurnRoundEntered => "TurnRoundEntered",
            GameEvent::RiverRoundEntered => "RiverRoundEntered",
            GameEvent::RoundInitialized => "RoundInitialized",
            GameEvent::RoundPrepared => "RoundPrepared",
            GameEvent::RoundStarted => "RoundStarted",
            GameEvent::RoundClosed => "RoundClosed",
            GameEvent::GameCompleted => "GameCompleted",
            GameEvent::SettlementRequested => "SettlementRequested",
            GameEvent::SettlementCompleted => "SettlementCompleted",
            GameEvent::GameClosed => "GameClosed",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<GameEvent> {
        let event = match symbol {
            "Started" => GameEvent::Started,
            "Initialized" => GameEvent::Initialized,
            "ReadyRequested" => GameEvent::ReadyRequested,
            "AnteRequested" => GameEvent::AnteRequested,
            "AntePaid" => GameEvent::AntePaid,
            "BlindsRequested" => GameEvent::BlindsRequested,
            "BlindsPaid" => GameEvent::BlindsPaid,
            "PreflopRoundEntered" => GameEvent::PreflopRoundEntered,
            "FlopRoundEntered" => GameEvent::FlopRoundEntered,
            "TurnRoundEntered" => GameEvent::TurnRoundEntered,
            "RiverRoundEntered" => GameEvent::RiverRoundEntered,
            "RoundInitialized" => GameEvent::RoundInitialized,
            "RoundPrepared" => GameEvent::RoundPrepared,
            "RoundStarted" => GameEvent::RoundStarted,
            "RoundClosed" => GameEvent::RoundClosed,
            "GameCompleted" => GameEvent::GameCompleted,
            "SettlementRequested" => GameEvent::SettlementRequested,
            "SettlementCompleted" => GameEvent::SettlementCompleted,
            "GameClosed" => GameEvent::GameClosed,
            _ => return None,
        };
        Some(event)
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
