//! Every action must stamp `status.last_action` with the actor's seat,
//! the action name and the chips it moved.


use helper::*;
use holdem_engine_base::{ActionKind, Game, GameOptions};

fn nine_player_ante_options() -> GameOptions {
    let mut options = seeded_options(&[
        10_000, 10_000, 10_000, 10_000, 10_000, 10_000, 10_000, 10_000, 10_000,
    ]);
    options.ante = 10;
    options
}

#[test]
fn last_action_tracks_every_step() {
    let mut game = Game::new(nine_player_ante_options());
    game.start().unwrap();
    game.ready_for_all().unwrap();

    // Ante: the final payer is the seat right before the dealer
    assert_eq!("AnteRequested", game.state().status.current_event);
    game.pay_ante().unwrap();
    assert_last_action(&game, 8, ActionKind::Ante, 10);

    game.pay_blinds().unwrap();
    game.ready_for_all().unwrap();

    // Preflop: UTG (seat 3) through the table
    for seat in 3..=8 {
        game.call().unwrap();
        assert_last_action(&game, seat, ActionKind::Call, 10);
    }
    game.call().unwrap(); // dealer
    assert_last_action(&game, 0, ActionKind::Call, 10);
    game.call().unwrap(); // SB completes for 5
    assert_last_action(&game, 1, ActionKind::Call, 5);
    game.check().unwrap(); // BB
    assert_last_action(&game, 2, ActionKind::Check, 0);

    // Flop
    game.next().unwrap();
    assert_last_action(&game, -1, ActionKind::Next, 0);
    game.ready_for_all().unwrap();

    assert!(game.current_player().unwrap().check_position("sb"));
    game.check().unwrap();
    assert_last_action(&game, 1, ActionKind::Check, 0);
    game.check().unwrap();
    assert_last_action(&game, 2, ActionKind::Check, 0);
    game.bet(100).unwrap();
    assert_last_action(&game, 3, ActionKind::Bet, 100);
    for seat in 4..=8 {
        game.call().unwrap();
        assert_last_action(&game, seat, ActionKind::Call, 100);
    }
    game.call().unwrap(); // dealer
    assert_last_action(&game, 0, ActionKind::Call, 100);
    game.call().unwrap(); // SB
    assert_last_action(&game, 1, ActionKind::Call, 100);
    game.call().unwrap(); // BB
    assert_last_action(&game, 2, ActionKind::Call, 100);

    // Turn: a bet and two raises; call deltas shrink as wagers grow
    game.next().unwrap();
    assert_last_action(&game, -1, ActionKind::Next, 0);
    game.ready_for_all().unwrap();

    assert!(game.current_player().unwrap().check_position("sb"));
    game.check().unwrap();
    assert_last_action(&game, 1, ActionKind::Check, 0);
    game.bet(100).unwrap();
    assert_last_action(&game, 2, ActionKind::Bet, 100);
    game.raise(200).unwrap();
    assert_last_action(&game, 3, ActionKind::Raise, 200);
    game.raise(300).unwrap();
    assert_last_action(&game, 4, ActionKind::Raise, 300);
    for seat in 5..=8 {
        game.call().unwrap();
        assert_last_action(&game, seat, ActionKind::Call, 300);
    }
    game.call().unwrap(); // dealer
    assert_last_action(&game, 0, ActionKind::Call, 300);
    game.call().unwrap(); // SB
    assert_last_action(&game, 1, ActionKind::Call, 300);
    game.call().unwrap(); // BB already has 100 in
    assert_last_action(&game, 2, ActionKind::Call, 200);
    game.call().unwrap(); // first raiser already has 200 in
    assert_last_action(&game, 3, ActionKind::Call, 100);

    // River: checks around
    game.next().unwrap();
    assert_last_action(&game, -1, ActionKind::Next, 0);
    game.ready_for_all().unwrap();

    assert!(game.current_player().unwrap().check_position("sb"));
    for seat in [1, 2, 3, 4, 5, 6, 7, 8, 0] {
        game.check().unwrap();
        assert_last_action(&game, seat, ActionKind::Check, 0);
    }

    // Game closes
    game.next().unwrap();
    assert_last_action(&game, -1, ActionKind::Next, 0);
    assert_eq!("GameClosed", game.state().status.current_event);
    assert_chips_conserved(&game);
}
