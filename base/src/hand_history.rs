//! Per-hand action record kept alongside the game state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::essential::{ActionKind, Round};
use crate::evaluator::Category;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Copy, Clone)]
#[serde(rename_all = "lowercase")]
pub enum BlindType {
    Ante,
    Dealer,
    Sb,
    Bb,
}

/// A forced bet taken before the first action.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlindBet {
    pub seat: usize,
    pub blind_type: BlindType,
    pub amount: i64,
}

impl BlindBet {
    pub fn new(seat: usize, blind_type: BlindType, amount: i64) -> Self {
        Self {
            seat,
            blind_type,
            amount,
        }
    }
}

/// One voluntary action. `value` follows the last-action convention:
/// chips paid for a call, the level for a raise, zero for check/fold.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Copy, Clone)]
pub struct PlayerAction {
    pub seat: usize,
    pub kind: ActionKind,
    pub value: i64,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone)]
pub struct StreetActions {
    /// Pot size when the street closed.
    pub pot: i64,
    pub actions: Vec<PlayerAction>,
}

/// A seat's revealed hand at showdown.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Showdown {
    pub hole_cards: Vec<String>,
    pub category: Category,
    pub picks: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone)]
pub struct HandHistory {
    pub board: Vec<String>,
    pub blinds: Vec<BlindBet>,
    pub preflop: StreetActions,
    pub flop: StreetActions,
    pub turn: StreetActions,
    pub river: StreetActions,
    pub showdowns: BTreeMap<usize, Showdown>,
    /// Seat -> chips won (positive) or lost (negative).
    pub chips_change: BTreeMap<usize, i64>,
}

impl HandHistory {
    fn street_mut(&mut self, round: Round) -> Option<&mut StreetActions> {
        match round {
            Round::Init => None,
            Round::Preflop => Some(&mut self.preflop),
            Round::Flop => Some(&mut self.flop),
            Round::Turn => Some(&mut self.turn),
            Round::River => Some(&mut self.river),
        }
    }

    pub fn set_board(&mut self, board: Vec<String>) {
        self.board = board;
    }

    pub fn add_blind(&mut self, blind: BlindBet) {
        self.blinds.push(blind);
    }

    pub fn add_action(&mut self, round: Round, action: PlayerAction) {
        if let Some(street) = self.street_mut(round) {
            street.actions.push(action);
        }
    }

    pub fn set_pot(&mut self, round: Round, pot: i64) {
        if let Some(street) = self.street_mut(round) {
            street.pot = pot;
        }
    }

    pub fn add_showdown(&mut self, seat: usize, showdown: Showdown) {
        self.showdowns.insert(seat, showdown);
    }

    pub fn set_chips_change(&mut self, changes: impl IntoIterator<Item = (usize, i64)>) {
        for (seat, change) in changes {
            if change != 0 {
                self.chips_change.insert(seat, change);
            }
        }
    }
}
