//! Game state machine: the core of this lib.
//!
//! A [`Game`] drives a single hand from deal to settlement. External
//! drivers deliver actions one at a time; each call runs to completion,
//! possibly emitting several internal events, and the snapshot is then
//! observable through [`Game::state`]. Rest states awaiting driver
//! input are `ReadyRequested`, `AnteRequested`, `BlindsRequested`,
//! `RoundStarted`, `RoundClosed` and `GameClosed`.

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::deck::shuffle_cards;
use crate::errors::GameError;
use crate::essential::{
    ActionKind, GameOptions, GameState, LastAction, Meta, PlayerState, Round, POSITION_BB,
    POSITION_DEALER, POSITION_SB, SOURCE_SYSTEM,
};
use crate::event::GameEvent;
use crate::hand_history::{BlindBet, BlindType, PlayerAction};
use crate::pot::{build_pot_layers, layers_total};

fn unix_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0)
}

/// A single hand of poker, owned by the engine.
pub struct Game {
    pub(crate) gs: GameState,
    seed: Option<u64>,
}

impl Game {
    /// Creates a game from options. The deck stays in configured order
    /// until `Initialize` shuffles it.
    pub fn new(options: GameOptions) -> Game {
        let GameOptions {
            ante,
            blind,
            limit,
            hole_cards_count,
            required_hole_cards_count,
            combination_powers,
            deck,
            burn_count,
            seed,
            players,
        } = options;

        let players = players
            .into_iter()
            .enumerate()
            .map(|(idx, setting)| PlayerState {
                idx,
                positions: setting.positions,
                bankroll: setting.bankroll,
                initial_stack_size: setting.bankroll,
                stack_size: setting.bankroll,
                ..PlayerState::default()
            })
            .collect();

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();

        let gs = GameState {
            game_id: Uuid::new_v4().to_string(),
            created_at: now.as_secs() as i64,
            updated_at: now.as_nanos() as i64,
            meta: Meta {
                ante,
                blind,
                limit,
                hole_cards_count,
                required_hole_cards_count,
                combination_powers,
                deck,
                burn_count,
            },
            players,
            ..GameState::default()
        };

        Game { gs, seed }
    }

    /// Restores a game from a persisted snapshot. Call
    /// [`Game::resume`] afterwards to re-enter the state machine.
    pub fn from_state(gs: GameState) -> Game {
        Game { gs, seed: None }
    }

    pub fn from_state_json(json: &str) -> serde_json::Result<Game> {
        Ok(Game::from_state(serde_json::from_str(json)?))
    }

    pub fn state(&self) -> &GameState {
        &self.gs
    }

    pub fn state_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.gs)
    }

    /// Consumes the engine, yielding the snapshot.
    pub fn into_state(self) -> GameState {
        self.gs
    }

    // ------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------

    pub fn player_count(&self) -> usize {
        self.gs.players.len()
    }

    pub fn player(&self, idx: usize) -> Option<&PlayerState> {
        self.gs.players.get(idx)
    }

    pub fn dealer(&self) -> Option<&PlayerState> {
        self.position_player(POSITION_DEALER)
    }

    pub fn small_blind(&self) -> Option<&PlayerState> {
        self.position_player(POSITION_SB)
    }

    pub fn big_blind(&self) -> Option<&PlayerState> {
        self.position_player(POSITION_BB)
    }

    fn position_player(&self, position: &str) -> Option<&PlayerState> {
        self.gs.players.iter().find(|p| p.check_position(position))
    }

    pub fn current_player(&self) -> Option<&PlayerState> {
        self.gs
            .status
            .current_player
            .and_then(|idx| self.gs.players.get(idx))
    }

    /// Seat indices walked clockwise starting at the dealer.
    pub fn seats_from_dealer(&self) -> Vec<usize> {
        let count = self.player_count();
        let dealer = self.dealer_seat().unwrap_or(0);
        (0..count).map(|i| (dealer + i) % count).collect()
    }

    /// Players ordered clockwise starting at the dealer.
    pub fn players_from_dealer(&self) -> Vec<&PlayerState> {
        self.seats_from_dealer()
            .into_iter()
            .filter_map(|idx| self.gs.players.get(idx))
            .collect()
    }

    /// The actions the seat is allowed to take right now.
    pub fn allowed_actions(&self, idx: usize) -> Vec<ActionKind> {
        self.gs
            .players
            .get(idx)
            .map(|p| p.allowed_actions.clone())
            .unwrap_or_default()
    }

    /// The action set the seat would have as the current player,
    /// derived from wager, stack and raise state.
    pub fn available_actions(&self, idx: usize) -> Vec<ActionKind> {
        let Some(player) = self.gs.players.get(idx) else {
            return Vec::new();
        };
        let status = &self.gs.status;
        let mut actions = Vec::with_capacity(4);

        if player.fold || player.stack_size == 0 {
            actions.push(ActionKind::Pass);
            return actions;
        }
        actions.push(ActionKind::Allin);

        if player.wager < status.current_wager {
            actions.push(ActionKind::Fold);
            if player.initial_stack_size > status.current_wager {
                actions.push(ActionKind::Call);
                if player.initial_stack_size > status.current_wager + status.previous_raise_size {
                    actions.push(ActionKind::Raise);
                }
            }
        } else {
            actions.push(ActionKind::Check);
            if player.initial_stack_size >= status.mini_bet {
                if status.current_wager == 0 {
                    actions.push(ActionKind::Bet);
                } else {
                    actions.push(ActionKind::Raise);
                }
            }
        }

        actions
    }

    pub fn alive_count(&self) -> usize {
        self.gs.players.iter().filter(|p| p.is_alive()).count()
    }

    pub fn movable_count(&self) -> usize {
        self.gs.players.iter().filter(|p| p.is_movable()).count()
    }

    fn dealer_seat(&self) -> Result<usize, GameError> {
        self.gs
            .seat_of(POSITION_DEALER)
            .ok_or(GameError::NotFoundDealer)
    }

    /// First movable seat strictly clockwise of `from`, wrapping all
    /// the way around so `from` itself is considered last.
    fn next_movable_from(&self, from: usize) -> Option<usize> {
        let count = self.player_count();
        (1..=count)
            .map(|i| (from + i) % count)
            .find(|seat| self.gs.players[*seat].is_movable())
    }

    fn touch(&mut self) {
        let now = unix_nanos();
        self.gs.updated_at = now.max(self.gs.updated_at + 1);
    }

    // ------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------

    /// Records the event symbol and runs its transition handler.
    /// Handlers of rest states are no-ops, which is what makes
    /// [`Game::resume`] (re-emit the last event) safe.
    pub fn emit_event(&mut self, event: GameEvent) -> Result<(), GameError> {
        self.gs.status.current_event = event.symbol().to_string();
        self.touch();
        log::debug!("game {}: event {}", self.gs.game_id, event);

        match event {
            GameEvent::Started => self.initialize(),
            GameEvent::Initialized => self.request_ready(),
            GameEvent::AntePaid => self.on_ante_paid(),
            GameEvent::BlindsPaid => self.on_blinds_paid(),
            GameEvent::PreflopRoundEntered
            | GameEvent::FlopRoundEntered
            | GameEvent::TurnRoundEntered
            | GameEvent::RiverRoundEntered => self.initialize_round(),
            GameEvent::RoundInitialized => self.on_round_initialized(),
            GameEvent::RoundPrepared => self.on_round_prepared(),
            GameEvent::RoundClosed => self.on_round_closed(),
            GameEvent::GameCompleted => self.on_game_completed(),
            GameEvent::SettlementRequested => self.settle(),
            GameEvent::SettlementCompleted => self.emit_event(GameEvent::GameClosed),
            GameEvent::ReadyRequested
            | GameEvent::AnteRequested
            | GameEvent::BlindsRequested
            | GameEvent::RoundStarted
            | GameEvent::GameClosed => Ok(()),
        }
    }

    /// Re-enters the state machine of a loaded snapshot by re-emitting
    /// its last event.
    pub fn resume(&mut self) -> Result<(), GameError> {
        if self.gs.status.current_event.is_empty() {
            return Ok(());
        }
        let event = GameEvent::from_symbol(&self.gs.status.current_event)
            .ok_or(GameError::UnknownTask)?;
        log::info!("game {}: resuming at {}", self.gs.game_id, event);
        self.emit_event(event)
    }

    // ------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------

    /// Validates the configuration and enters the state machine.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.player_count() < 2 {
            return Err(GameError::InsufficientNumberOfPlayers);
        }
        if self.gs.seat_of(POSITION_DEALER).is_none() {
            return Err(GameError::NoDealer);
        }
        if self.gs.players.iter().any(|p| p.bankroll <= 0) {
            return Err(GameError::NotEnoughBankroll);
        }
        if self.gs.meta.deck.is_empty() {
            return Err(GameError::NoDeck);
        }

        self.gs.status.pots = Vec::new();
        self.gs.status.board = Vec::new();
        self.gs.status.burned = Vec::new();
        self.gs.status.current_event = String::new();

        self.emit_event(GameEvent::Started)
    }

    fn initialize(&mut self) -> Result<(), GameError> {
        self.gs.meta.deck = shuffle_cards(&self.gs.meta.deck, self.seed);
        self.gs.status.mini_bet = self.gs.meta.blind.dealer.max(self.gs.meta.blind.bb);
        self.reset_round_status()?;
        self.emit_event(GameEvent::Initialized)
    }

    fn reset_round_status(&mut self) -> Result<(), GameError> {
        let dealer = self.dealer_seat()?;
        let status = &mut self.gs.status;
        status.previous_raise_size = 0;
        status.max_wager = 0;
        status.current_round_pot = 0;
        status.current_wager = 0;
        status.current_raiser = dealer;
        status.current_player = Some(dealer);
        Ok(())
    }

    /// Rolls in-round wagers into per-hand contributions and snapshots
    /// each seat's stack as the next round's baseline.
    fn reset_all_player_status(&mut self) {
        for player in self.gs.players.iter_mut() {
            player.allowed_actions.clear();
            player.pot += player.wager;
            player.wager = 0;
            player.initial_stack_size = player.stack_size;
            player.did_action = if player.fold {
                Some(ActionKind::Fold)
            } else if player.initial_stack_size == 0 {
                Some(ActionKind::Allin)
            } else {
                None
            };
        }
    }

    /// Advances a closed betting round: rolls wagers, then either
    /// finishes the hand or enters the next street.
    pub fn next(&mut self) -> Result<(), GameError> {
        if !self.gs.status.round.is_betting() {
            return Err(GameError::UnknownRound);
        }
        if self.gs.status.current_event != GameEvent::RoundClosed.symbol() {
            return Err(GameError::NotClosedRound);
        }

        self.update_last_action(SOURCE_SYSTEM, ActionKind::Next, 0);
        self.next_round()
    }

    fn next_round(&mut self) -> Result<(), GameError> {
        let round = self.gs.status.round;
        self.reset_round_status()?;
        self.reset_all_player_status();

        if self.alive_count() == 1 {
            return self.emit_event(GameEvent::GameCompleted);
        }

        match round {
            Round::Preflop => self.enter_round(Round::Flop),
            Round::Flop => self.enter_round(Round::Turn),
            Round::Turn => self.enter_round(Round::River),
            Round::River => self.emit_event(GameEvent::GameCompleted),
            Round::Init => Err(GameError::UnknownRound),
        }
    }

    fn enter_round(&mut self, round: Round) -> Result<(), GameError> {
        self.gs.status.round = round;
        log::debug!("game {}: entering {}", self.gs.game_id, round);
        match round {
            Round::Preflop => self.emit_event(GameEvent::PreflopRoundEntered),
            Round::Flop => self.emit_event(GameEvent::FlopRoundEntered),
            Round::Turn => self.emit_event(GameEvent::TurnRoundEntered),
            Round::River => self.emit_event(GameEvent::RiverRoundEntered),
            Round::Init => Err(GameError::UnknownRound),
        }
    }

    // ------------------------------------------------------------
    // Dealing
    // ------------------------------------------------------------

    fn deal(&mut self, count: usize) -> Result<Vec<String>, GameError> {
        let status = &mut self.gs.status;
        let from = status.current_deck_position;
        let to = from + count;
        if to > self.gs.meta.deck.len() {
            return Err(GameError::NoDeck);
        }
        status.current_deck_position = to;
        Ok(self.gs.meta.deck[from..to].to_vec())
    }

    fn burn(&mut self, count: usize) -> Result<(), GameError> {
        let cards = self.deal(count)?;
        self.gs.status.burned.extend(cards);
        Ok(())
    }

    fn initialize_round(&mut self) -> Result<(), GameError> {
        let burn_count = self.gs.meta.burn_count;
        match self.gs.status.round {
            Round::Preflop => {
                let count = self.gs.meta.hole_cards_count;
                for idx in 0..self.player_count() {
                    let cards = self.deal(count)?;
                    self.gs.players[idx].hole_cards = cards;
                }
            }
            Round::Flop => {
                self.burn(burn_count)?;
                let cards = self.deal(3)?;
                self.gs.status.board.extend(cards);
            }
            Round::Turn | Round::River => {
                self.burn(burn_count)?;
                let cards = self.deal(1)?;
                self.gs.status.board.extend(cards);
            }
            Round::Init => return Err(GameError::UnknownRound),
        }

        self.gs.history.set_board(self.gs.status.board.clone());
        self.update_combinations();
        self.emit_event(GameEvent::RoundInitialized)
    }

    fn on_round_initialized(&mut self) -> Result<(), GameError> {
        if self.gs.status.round == Round::Preflop {
            self.request_blinds()
        } else {
            self.emit_event(GameEvent::RoundPrepared)
        }
    }

    fn on_round_prepared(&mut self) -> Result<(), GameError> {
        // Nothing to bet with one or zero movable seats postflop
        if self.gs.status.round != Round::Preflop && self.movable_count() <= 1 {
            return self.emit_event(GameEvent::RoundClosed);
        }
        self.request_ready()
    }

    // ------------------------------------------------------------
    // Readiness barrier
    // ------------------------------------------------------------

    fn request_ready(&mut self) -> Result<(), GameError> {
        self.gs.status.ready_seats.clear();
        for player in self.gs.players.iter_mut() {
            player.allowed_actions = vec![ActionKind::Ready];
        }
        self.emit_event(GameEvent::ReadyRequested)
    }

    /// Confirms a single seat's readiness; the last confirmation
    /// releases the barrier.
    pub fn ready(&mut self, seat: usize) -> Result<(), GameError> {
        if self.gs.status.current_event != GameEvent::ReadyRequested.symbol() {
            return Err(GameError::UnknownTask);
        }
        if seat >= self.player_count() {
            return Err(GameError::IllegalAction);
        }
        if self.gs.status.ready_seats.contains(&seat) {
            return Ok(());
        }

        self.gs.status.ready_seats.push(seat);
        self.gs.players[seat].allowed_actions.clear();
        self.touch();

        if self.gs.status.ready_seats.len() == self.player_count() {
            self.proceed_after_ready()
        } else {
            Ok(())
        }
    }

    /// Confirms every seat at once.
    pub fn ready_for_all(&mut self) -> Result<(), GameError> {
        if self.gs.status.current_event != GameEvent::ReadyRequested.symbol() {
            return Err(GameError::UnknownTask);
        }
        for player in self.gs.players.iter_mut() {
            player.allowed_actions.clear();
        }
        self.gs.status.ready_seats.clear();
        self.proceed_after_ready()
    }

    fn proceed_after_ready(&mut self) -> Result<(), GameError> {
        self.gs.status.ready_seats.clear();
        if self.gs.status.round == Round::Init {
            if self.gs.meta.ante > 0 {
                self.request_ante()
            } else {
                self.enter_round(Round::Preflop)
            }
        } else {
            self.start_round()
        }
    }

    // ------------------------------------------------------------
    // Forced payments
    // ------------------------------------------------------------

    fn request_ante(&mut self) -> Result<(), GameError> {
        self.gs.status.paid_seats.clear();
        for player in self.gs.players.iter_mut() {
            player.allowed_actions = vec![ActionKind::Pay];
        }
        self.emit_event(GameEvent::AnteRequested)
    }

    fn request_blinds(&mut self) -> Result<(), GameError> {
        let blind = self.gs.meta.blind;
        // Big-blind-only schedules size the mini-bet without posting
        if blind.dealer == 0 && blind.sb == 0 && blind.bb > 0 {
            return self.emit_event(GameEvent::BlindsPaid);
        }

        let owed = self.owed_blinds();
        if owed.is_empty() {
            return self.emit_event(GameEvent::BlindsPaid);
        }

        self.gs.status.paid_seats.clear();
        for (seat, _, _) in owed {
            self.gs.players[seat].allowed_actions = vec![ActionKind::Pay];
        }
        self.emit_event(GameEvent::BlindsRequested)
    }

    /// Blind obligations as (seat, type, amount), dealer first.
    fn owed_blinds(&self) -> Vec<(usize, BlindType, i64)> {
        let blind = self.gs.meta.blind;
        let mut owed = Vec::with_capacity(3);
        if blind.dealer > 0 {
            if let Some(seat) = self.gs.seat_of(POSITION_DEALER) {
                owed.push((seat, BlindType::Dealer, blind.dealer));
            }
        }
        if blind.sb > 0 {
            if let Some(seat) = self.gs.seat_of(POSITION_SB) {
                owed.push((seat, BlindType::Sb, blind.sb));
            }
        }
        if blind.bb > 0 {
            if let Some(seat) = self.gs.seat_of(POSITION_BB) {
                owed.push((seat, BlindType::Bb, blind.bb));
            }
        }
        owed
    }

    /// Settles one seat's pending forced payment (ante or blind).
    /// `chips` must equal the configured amount; short stacks are
    /// capped at what they have.
    pub fn pay(&mut self, seat: usize, chips: i64) -> Result<(), GameError> {
        if seat >= self.player_count() {
            return Err(GameError::IllegalAction);
        }

        if self.gs.status.current_event == GameEvent::AnteRequested.symbol() {
            if self.gs.status.paid_seats.contains(&seat) {
                return Ok(());
            }
            if chips != self.gs.meta.ante {
                return Err(GameError::AmountOutOfRange);
            }

            let taken = self.take_wager(seat, chips);
            self.update_last_action(seat as i64, ActionKind::Ante, taken);
            self.gs
                .history
                .add_blind(BlindBet::new(seat, BlindType::Ante, taken));
            self.gs.players[seat].allowed_actions.clear();
            self.gs.status.paid_seats.push(seat);

            if self.gs.status.paid_seats.len() == self.player_count() {
                self.gs.status.paid_seats.clear();
                return self.emit_event(GameEvent::AntePaid);
            }
            return Ok(());
        }

        if self.gs.status.current_event == GameEvent::BlindsRequested.symbol() {
            let Some((_, blind_type, amount)) = self
                .owed_blinds()
                .into_iter()
                .find(|(owed_seat, _, _)| *owed_seat == seat)
            else {
                return Err(GameError::IllegalAction);
            };
            if self.gs.status.paid_seats.contains(&seat) {
                return Ok(());
            }
            if chips != amount {
                return Err(GameError::AmountOutOfRange);
            }

            let taken = self.take_wager(seat, amount);
            self.update_last_action(seat as i64, ActionKind::Blind, taken);
            self.gs
                .history
                .add_blind(BlindBet::new(seat, blind_type, taken));
            self.gs.players[seat].allowed_actions.clear();
            self.gs.status.paid_seats.push(seat);

            if self.gs.status.paid_seats.len() == self.owed_blinds().len() {
                self.gs.status.paid_seats.clear();
                // Short-stacked blinds still owe the table the full
                // configured amount
                let blind = self.gs.meta.blind;
                let status = &mut self.gs.status;
                status.current_wager = blind.bb.max(blind.dealer);
                status.previous_raise_size = status.current_wager;
                return self.emit_event(GameEvent::BlindsPaid);
            }
            return Ok(());
        }

        Err(GameError::UnknownTask)
    }

    /// Collects the ante from every seat, clockwise from the dealer.
    pub fn pay_ante(&mut self) -> Result<(), GameError> {
        if self.gs.status.current_event != GameEvent::AnteRequested.symbol() {
            return Err(GameError::UnknownTask);
        }
        let ante = self.gs.meta.ante;
        for seat in self.seats_from_dealer() {
            if self.gs.status.current_event != GameEvent::AnteRequested.symbol() {
                break;
            }
            if !self.gs.status.paid_seats.contains(&seat) {
                self.pay(seat, ante)?;
            }
        }
        Ok(())
    }

    /// Posts every configured blind.
    pub fn pay_blinds(&mut self) -> Result<(), GameError> {
        if self.gs.status.current_event != GameEvent::BlindsRequested.symbol() {
            return Err(GameError::UnknownTask);
        }
        for (seat, _, amount) in self.owed_blinds() {
            if self.gs.status.current_event != GameEvent::BlindsRequested.symbol() {
                break;
            }
            if !self.gs.status.paid_seats.contains(&seat) {
                self.pay(seat, amount)?;
            }
        }
        Ok(())
    }

    fn on_ante_paid(&mut self) -> Result<(), GameError> {
        // Antes are committed before the first round
        self.reset_all_player_status();
        self.gs.status.max_wager = 0;
        self.gs.status.current_round_pot = 0;
        self.enter_round(Round::Preflop)
    }

    fn on_blinds_paid(&mut self) -> Result<(), GameError> {
        self.emit_event(GameEvent::RoundPrepared)
    }

    // ------------------------------------------------------------
    // Round start and turn order
    // ------------------------------------------------------------

    fn start_round(&mut self) -> Result<(), GameError> {
        if self.movable_count() == 0 {
            return self.emit_event(GameEvent::RoundClosed);
        }

        let dealer = self.dealer_seat()?;
        let anchor = if self.gs.status.round == Round::Preflop {
            self.gs.seat_of(POSITION_BB).unwrap_or(dealer)
        } else {
            dealer
        };

        match self.next_movable_from(anchor) {
            Some(seat) => {
                self.set_current_player(Some(seat));
                self.emit_event(GameEvent::RoundStarted)
            }
            None => self.emit_event(GameEvent::RoundClosed),
        }
    }

    pub(crate) fn set_current_player(&mut self, target: Option<usize>) {
        if let Some(old) = self.gs.status.current_player {
            if let Some(player) = self.gs.players.get_mut(old) {
                player.allowed_actions.clear();
            }
        }
        self.gs.status.current_player = target;
        if let Some(seat) = target {
            let actions = self.available_actions(seat);
            self.gs.players[seat].allowed_actions = actions;
        }
        self.touch();
    }

    /// Picks the next actor after an action, or closes the round when
    /// the turn wraps to a seat that has already acted, only one seat
    /// is alive, or nobody can move.
    fn request_player_action(&mut self) -> Result<(), GameError> {
        if self.alive_count() == 1 || self.movable_count() == 0 {
            return self.emit_event(GameEvent::RoundClosed);
        }

        let from = match self.gs.status.current_player {
            Some(seat) => seat,
            None => self.dealer_seat()?,
        };
        let Some(next) = self.next_movable_from(from) else {
            return self.emit_event(GameEvent::RoundClosed);
        };
        if self.gs.players[next].acted {
            return self.emit_event(GameEvent::RoundClosed);
        }

        self.set_current_player(Some(next));
        Ok(())
    }

    fn on_round_closed(&mut self) -> Result<(), GameError> {
        self.set_current_player(None);
        self.collect_pots();
        let pot_total = layers_total(&self.gs.status.pots);
        self.gs.history.set_pot(self.gs.status.round, pot_total);
        log::debug!(
            "game {}: {} closed, pot {}",
            self.gs.game_id,
            self.gs.status.round,
            pot_total
        );
        Ok(())
    }

    /// Rebuilds the layered pots from per-seat hand contributions.
    /// Recomputed from scratch, so closing and resuming are idempotent.
    pub(crate) fn collect_pots(&mut self) {
        let contributions: Vec<i64> = self.gs.players.iter().map(|p| p.contributed()).collect();
        let folded: Vec<bool> = self.gs.players.iter().map(|p| p.fold).collect();
        self.gs.status.pots = build_pot_layers(&contributions, &folded);
    }

    // ------------------------------------------------------------
    // Player actions
    // ------------------------------------------------------------

    /// Resolves the current player's seat if `kind` is allowed.
    fn acting_seat(&self, kind: ActionKind) -> Result<usize, GameError> {
        let seat = self
            .gs
            .status
            .current_player
            .ok_or(GameError::IllegalAction)?;
        let player = &self.gs.players[seat];
        if !player.allowed_actions.contains(&kind) {
            return Err(GameError::IllegalAction);
        }
        Ok(seat)
    }

    fn update_last_action(&mut self, source: i64, kind: ActionKind, value: i64) {
        self.gs.status.last_action = Some(LastAction {
            source,
            kind,
            value,
        });
        self.touch();
    }

    /// Moves chips into the seat's wager, capped at its stack, and
    /// keeps the round totals in step.
    fn take_wager(&mut self, seat: usize, chips: i64) -> i64 {
        let player = &mut self.gs.players[seat];
        let taken = player.take_chips(chips);
        let wager = player.wager;
        let status = &mut self.gs.status;
        status.current_round_pot += taken;
        status.max_wager = status.max_wager.max(wager);
        taken
    }

    fn become_raiser(&mut self, seat: usize) {
        if self.gs.players[seat].wager > 0 {
            self.gs.players[seat].vpip = true;
        }
        self.gs.status.current_raiser = seat;
        for player in self.gs.players.iter_mut() {
            player.acted = false;
        }
        self.gs.players[seat].acted = true;
    }

    fn finish_action(
        &mut self,
        seat: usize,
        kind: ActionKind,
        value: i64,
    ) -> Result<(), GameError> {
        self.gs.players[seat].did_action = Some(kind);
        self.update_last_action(seat as i64, kind, value);
        self.gs.history.add_action(
            self.gs.status.round,
            PlayerAction {
                seat,
                kind,
                value,
            },
        );
        self.request_player_action()
    }

    /// No-op acknowledgement for a seat that cannot act.
    pub fn pass(&mut self) -> Result<(), GameError> {
        let seat = self.acting_seat(ActionKind::Pass)?;
        self.gs.players[seat].acted = true;
        self.finish_action(seat, ActionKind::Pass, 0)
    }

    pub fn fold(&mut self) -> Result<(), GameError> {
        let seat = self.acting_seat(ActionKind::Fold)?;
        let player = &mut self.gs.players[seat];
        player.fold = true;
        player.acted = true;
        self.finish_action(seat, ActionKind::Fold, 0)
    }

    pub fn check(&mut self) -> Result<(), GameError> {
        let seat = self.acting_seat(ActionKind::Check)?;
        self.gs.players[seat].acted = true;
        self.finish_action(seat, ActionKind::Check, 0)
    }

    /// Matches the current wager; records the chips actually paid.
    pub fn call(&mut self) -> Result<(), GameError> {
        let seat = self.acting_seat(ActionKind::Call)?;
        let due = self.gs.status.current_wager - self.gs.players[seat].wager;
        let paid = self.take_wager(seat, due);
        let player = &mut self.gs.players[seat];
        player.acted = true;
        player.vpip = true;
        self.finish_action(seat, ActionKind::Call, paid)
    }

    /// Opens the betting with `chips`; only legal while the current
    /// wager is zero and `chips` is at least the mini-bet.
    pub fn bet(&mut self, chips: i64) -> Result<(), GameError> {
        let seat = self.acting_seat(ActionKind::Bet)?;
        if chips < self.gs.status.mini_bet || chips > self.gs.players[seat].stack_size {
            return Err(GameError::AmountOutOfRange);
        }

        self.take_wager(seat, chips);
        self.gs.status.current_wager = chips;
        self.gs.status.previous_raise_size = chips;
        self.become_raiser(seat);
        self.finish_action(seat, ActionKind::Bet, chips)
    }

    /// Raises the current wager to `chip_level`, which must be at
    /// least one full raise above it.
    pub fn raise(&mut self, chip_level: i64) -> Result<(), GameError> {
        let seat = self.acting_seat(ActionKind::Raise)?;
        let status = &self.gs.status;
        if chip_level < status.current_wager + status.previous_raise_size {
            return Err(GameError::AmountOutOfRange);
        }
        let due = chip_level - self.gs.players[seat].wager;
        if due > self.gs.players[seat].stack_size {
            return Err(GameError::AmountOutOfRange);
        }

        self.take_wager(seat, due);
        self.gs.status.previous_raise_size = chip_level - self.gs.status.current_wager;
        self.gs.status.current_wager = chip_level;
        self.become_raiser(seat);
        self.finish_action(seat, ActionKind::Raise, chip_level)
    }

    /// Commits the entire remaining stack. A short all-in raises the
    /// current wager without reopening the betting: everyone's acted
    /// flag is preserved.
    pub fn allin(&mut self) -> Result<(), GameError> {
        let seat = self.acting_seat(ActionKind::Allin)?;
        let stack = self.gs.players[seat].stack_size;
        let paid = self.take_wager(seat, stack);
        let new_wager = self.gs.players[seat].wager;
        let status = &self.gs.status;

        if new_wager > status.current_wager {
            let increment = new_wager - status.current_wager;
            let full_raise = if status.current_wager == 0 {
                increment >= status.mini_bet
            } else {
                increment >= status.previous_raise_size
            };
            if full_raise {
                self.gs.status.previous_raise_size = increment;
                self.gs.status.current_wager = new_wager;
                self.become_raiser(seat);
            } else {
                self.gs.status.current_wager = new_wager;
                self.gs.players[seat].acted = true;
            }
        } else {
            self.gs.players[seat].acted = true;
        }

        self.gs.players[seat].vpip = true;
        self.finish_action(seat, ActionKind::Allin, paid)
    }
}
