//! End-of-hand settlement: evaluate every live hand against the board,
//! award each pot layer to its strongest eligible contributors and
//! produce the zero-sum per-seat result.

use crate::errors::GameError;
use crate::essential::{GameResult, PlayerResultState};
use crate::evaluator::{evaluate_combination, wheel_rule_for_deck, CombinationPowers};
use crate::event::GameEvent;
use crate::game::Game;
use crate::hand_history::Showdown;
use crate::pot::{layers_total, split_prize};

impl Game {
    /// Recomputes every live seat's best combination with the board
    /// dealt so far. Before the flop (or after a preflop walkover)
    /// only the hole cards count.
    pub(crate) fn update_combinations(&mut self) {
        let powers = self
            .gs
            .meta
            .combination_powers
            .clone()
            .unwrap_or_else(CombinationPowers::standard);
        let wheel = wheel_rule_for_deck(&self.gs.meta.deck);
        let required = self.gs.meta.required_hole_cards_count;
        let board = self.gs.status.board.clone();

        for player in self.gs.players.iter_mut() {
            if player.is_alive() && !player.hole_cards.is_empty() {
                player.combination =
                    evaluate_combination(&player.hole_cards, &board, required, &powers, wheel);
            }
        }
    }

    pub(crate) fn on_game_completed(&mut self) -> Result<(), GameError> {
        self.set_current_player(None);
        self.collect_pots();
        self.emit_event(GameEvent::SettlementRequested)
    }

    pub(crate) fn settle(&mut self) -> Result<(), GameError> {
        self.update_combinations();

        let contributed: Vec<i64> = self.gs.players.iter().map(|p| p.contributed()).collect();
        let total_contributed: i64 = contributed.iter().sum();
        if layers_total(&self.gs.status.pots) != total_contributed {
            log::error!(
                "game {}: pot layers hold {} chips but {} were contributed",
                self.gs.game_id,
                layers_total(&self.gs.status.pots),
                total_contributed
            );
            return Err(GameError::InvariantViolated);
        }

        // Award each layer. Winners are ordered clockwise from the
        // dealer so the odd-chip remainder lands deterministically.
        let order = self.seats_from_dealer();
        let mut prizes = vec![0i64; self.player_count()];
        let mut pots = std::mem::take(&mut self.gs.status.pots);
        for pot in pots.iter_mut() {
            let best = pot
                .contributors
                .iter()
                .map(|seat| self.gs.players[*seat].combination.power)
                .max()
                .ok_or(GameError::InvariantViolated)?;
            let mut winners: Vec<usize> = pot
                .contributors
                .iter()
                .copied()
                .filter(|seat| self.gs.players[*seat].combination.power == best)
                .collect();
            winners.sort_by_key(|seat| order.iter().position(|s| s == seat));

            for (seat, amount) in split_prize(pot.total, &winners) {
                prizes[seat] += amount;
            }
            pot.winners = winners;
        }
        self.gs.status.pots = pots;

        // Apply prizes and reconcile
        let mut players = Vec::with_capacity(self.player_count());
        let mut changed_sum = 0i64;
        for player in self.gs.players.iter_mut() {
            let prize = prizes[player.idx];
            player.stack_size += prize;
            player.pot = 0;
            player.wager = 0;
            let changed = prize - contributed[player.idx];
            changed_sum += changed;
            players.push(PlayerResultState {
                idx: player.idx,
                final_chips: player.stack_size,
                changed,
            });
        }
        if changed_sum != 0 {
            return Err(GameError::InvariantViolated);
        }

        for result in players.iter() {
            let player = &self.gs.players[result.idx];
            if player.is_alive() {
                self.gs.history.add_showdown(
                    player.idx,
                    Showdown {
                        hole_cards: player.hole_cards.clone(),
                        category: player.combination.category,
                        picks: player.combination.cards.clone(),
                    },
                );
            }
        }
        self.gs
            .history
            .set_chips_change(players.iter().map(|p| (p.idx, p.changed)));
        self.gs.history.set_board(self.gs.status.board.clone());

        log::info!(
            "game {}: settled, winners {:?}",
            self.gs.game_id,
            self.gs
                .status
                .pots
                .iter()
                .map(|p| p.winners.clone())
                .collect::<Vec<_>>()
        );

        self.gs.result = Some(GameResult { players });
        self.emit_event(GameEvent::SettlementCompleted)
    }
}
