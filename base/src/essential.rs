//! Game essentials: options, meta, per-seat player state, hand status
//! and the serializable game snapshot.

use serde::{Deserialize, Serialize};

use crate::deck;
use crate::evaluator::{CombinationInfo, CombinationPowers};
use crate::hand_history::HandHistory;
use crate::pot::Pot;

pub const POSITION_DEALER: &str = "dealer";
pub const POSITION_SB: &str = "sb";
pub const POSITION_BB: &str = "bb";

pub const LIMIT_NO_LIMIT: &str = "no-limit";

/// Seat index used as `last_action.source` for system-driven steps.
pub const SOURCE_SYSTEM: i64 = -1;

/// Betting rounds of a hand. `Init` is the pre-deal state.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Copy, Clone)]
#[serde(rename_all = "lowercase")]
pub enum Round {
    #[default]
    Init,
    Preflop,
    Flop,
    Turn,
    River,
}

impl Round {
    pub fn is_betting(&self) -> bool {
        !matches!(self, Round::Init)
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Round::Init => "init",
            Round::Preflop => "preflop",
            Round::Flop => "flop",
            Round::Turn => "turn",
            Round::River => "river",
        };
        write!(f, "{}", label)
    }
}

/// Everything a driver can deliver into the engine, including the
/// forced-payment and barrier pseudo-actions.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Copy, Clone)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Pass,
    Ready,
    Pay,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    Allin,
    Ante,
    Blind,
    Next,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActionKind::Pass => "pass",
            ActionKind::Ready => "ready",
            ActionKind::Pay => "pay",
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
            ActionKind::Allin => "allin",
            ActionKind::Ante => "ante",
            ActionKind::Blind => "blind",
            ActionKind::Next => "next",
        };
        write!(f, "{}", label)
    }
}

/// The most recent state change, for driver display and tests.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Copy, Clone)]
pub struct LastAction {
    /// Acting seat, or [`SOURCE_SYSTEM`] for engine-driven steps.
    pub source: i64,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Chips moved by the action; zero for check/fold/pass/next.
    pub value: i64,
}

/// Blind schedule. `dealer` is the dealer blind used by short-deck
/// style games; all values may be zero.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct BlindSetting {
    pub dealer: i64,
    pub sb: i64,
    pub bb: i64,
}

/// Per-seat configuration at game creation.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct PlayerSetting {
    pub positions: Vec<String>,
    pub bankroll: i64,
}

impl PlayerSetting {
    pub fn new(bankroll: i64, positions: &[&str]) -> Self {
        Self {
            positions: positions.iter().map(|p| p.to_string()).collect(),
            bankroll,
        }
    }
}

/// Options for a single hand.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct GameOptions {
    pub ante: i64,
    pub blind: BlindSetting,
    pub limit: String,
    pub hole_cards_count: usize,
    pub required_hole_cards_count: usize,
    pub combination_powers: Option<CombinationPowers>,
    pub deck: Vec<String>,
    pub burn_count: usize,
    /// Shuffle seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub players: Vec<PlayerSetting>,
}

impl GameOptions {
    /// Standard no-limit hold'em: SB 5 / BB 10, two hole cards,
    /// 52-card deck, one burn per street.
    pub fn standard() -> Self {
        Self {
            ante: 0,
            blind: BlindSetting {
                dealer: 0,
                sb: 5,
                bb: 10,
            },
            limit: LIMIT_NO_LIMIT.to_string(),
            hole_cards_count: 2,
            required_hole_cards_count: 0,
            combination_powers: None,
            deck: deck::standard_deck(),
            burn_count: 1,
            seed: None,
            players: Vec::new(),
        }
    }

    /// Short-deck (six-plus) hold'em: 36-card deck, dealer blind plus
    /// ante, flush ranked above full house.
    pub fn short_deck() -> Self {
        Self {
            ante: 10,
            blind: BlindSetting {
                dealer: 100,
                sb: 0,
                bb: 0,
            },
            limit: LIMIT_NO_LIMIT.to_string(),
            hole_cards_count: 2,
            required_hole_cards_count: 0,
            combination_powers: Some(CombinationPowers::short_deck()),
            deck: deck::short_deck(),
            burn_count: 1,
            seed: None,
            players: Vec::new(),
        }
    }
}

/// Immutable hand configuration, fixed at start.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Meta {
    pub ante: i64,
    pub blind: BlindSetting,
    pub limit: String,
    pub hole_cards_count: usize,
    pub required_hole_cards_count: usize,
    pub combination_powers: Option<CombinationPowers>,
    pub deck: Vec<String>,
    pub burn_count: usize,
}

/// Mutable hand status.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Status {
    pub round: Round,
    /// Symbol of the last emitted event; empty before start.
    pub current_event: String,
    pub board: Vec<String>,
    pub burned: Vec<String>,
    /// Monotonic cursor into `meta.deck`.
    pub current_deck_position: usize,
    /// Minimum legal opening bet, max(dealer blind, BB).
    pub mini_bet: i64,
    /// Increment of the last raise; minimum legal re-raise size.
    pub previous_raise_size: i64,
    pub max_wager: i64,
    /// In-round target each active seat must match.
    pub current_wager: i64,
    /// In-round wagers not yet rolled into pots.
    pub current_round_pot: i64,
    pub current_player: Option<usize>,
    /// Last raiser; doubles as the round anchor after a reset.
    pub current_raiser: usize,
    pub last_action: Option<LastAction>,
    pub pots: Vec<Pot>,
    /// Seats that confirmed the pending readiness barrier.
    pub ready_seats: Vec<usize>,
    /// Seats that settled the pending forced payment.
    pub paid_seats: Vec<usize>,
}

/// Per-seat mutable state.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct PlayerState {
    pub idx: usize,
    pub positions: Vec<String>,
    pub bankroll: i64,
    /// Stack at the start of the current round, before in-round wagers.
    pub initial_stack_size: i64,
    pub stack_size: i64,
    /// Chips committed in the current round.
    pub wager: i64,
    /// Chips committed in previous rounds this hand.
    pub pot: i64,
    pub vpip: bool,
    pub fold: bool,
    pub acted: bool,
    pub did_action: Option<ActionKind>,
    pub hole_cards: Vec<String>,
    pub combination: CombinationInfo,
    pub allowed_actions: Vec<ActionKind>,
}

impl PlayerState {
    pub fn check_position(&self, position: &str) -> bool {
        self.positions.iter().any(|p| p == position)
    }

    /// Not folded.
    pub fn is_alive(&self) -> bool {
        !self.fold
    }

    /// Alive with chips behind.
    pub fn is_movable(&self) -> bool {
        !self.fold && self.stack_size > 0
    }

    /// Total contributed to the hand so far.
    pub fn contributed(&self) -> i64 {
        self.pot + self.wager
    }

    /// Moves up to `chips` from the stack into the wager, returning
    /// the amount actually taken.
    pub fn take_chips(&mut self, chips: i64) -> i64 {
        let real = chips.min(self.stack_size);
        self.stack_size -= real;
        self.wager += real;
        real
    }
}

/// Per-seat settlement outcome.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone)]
pub struct PlayerResultState {
    pub idx: usize,
    /// Stack after all prizes were applied.
    pub final_chips: i64,
    /// Prize minus total contribution; sums to zero across seats.
    pub changed: i64,
}

/// Final hand result, populated when the game completes.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone)]
pub struct GameResult {
    pub players: Vec<PlayerResultState>,
}

/// The full, self-describing snapshot of a hand.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct GameState {
    pub game_id: String,
    /// Unix seconds at creation.
    pub created_at: i64,
    /// Unix nanoseconds, bumped monotonically on every mutation.
    pub updated_at: i64,
    pub meta: Meta,
    pub status: Status,
    pub players: Vec<PlayerState>,
    pub result: Option<GameResult>,
    pub history: HandHistory,
}

impl GameState {
    pub fn player(&self, idx: usize) -> Option<&PlayerState> {
        self.players.get(idx)
    }

    /// First seat holding `position`.
    pub fn seat_of(&self, position: &str) -> Option<usize> {
        self.players
            .iter()
            .find(|p| p.check_position(position))
            .map(|p| p.idx)
    }

    pub fn has_position(&self, idx: usize, position: &str) -> bool {
        self.player(idx)
            .map(|p| p.check_position(position))
            .unwrap_or(false)
    }

    pub fn has_action(&self, idx: usize, action: ActionKind) -> bool {
        self.player(idx)
            .map(|p| p.allowed_actions.contains(&action))
            .unwrap_or(false)
    }

    /// Stacks plus live wagers plus rolled-in contributions; constant
    /// over the whole hand.
    pub fn total_chips(&self) -> i64 {
        self.players
            .iter()
            .map(|p| p.stack_size + p.wager + p.pot)
            .sum()
    }

    /// Redacts information the given seat must not see: the deck, the
    /// burn pile and every other seat's hole cards and combination.
    pub fn as_player(&self, idx: usize) -> GameState {
        let mut view = self.clone();
        view.meta.deck = Vec::new();
        view.status.burned = Vec::new();
        for player in view.players.iter_mut() {
            if player.idx != idx {
                player.hole_cards = Vec::new();
                player.combination = CombinationInfo::default();
            }
        }
        view
    }
}
