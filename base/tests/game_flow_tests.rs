//! Full-hand walkthroughs: the event chain, turn order, round
//! transitions and final settlement of ordinary hands.


use helper::*;
use holdem_engine_base::{ActionKind, Game, GameError, GameOptions, PlayerSetting, Round};

#[test]
fn three_player_walkthrough() {
    let mut game = Game::new(seeded_options(&[10_000, 10_000, 10_000]));
    game.start().unwrap();
    assert_eq!("ReadyRequested", game.state().status.current_event);

    // No ante configured, so the first barrier enters preflop
    game.ready_for_all().unwrap();
    assert_eq!("BlindsRequested", game.state().status.current_event);
    assert_eq!(Round::Preflop, game.state().status.round);
    for player in game.state().players.iter() {
        assert_eq!(2, player.hole_cards.len());
        assert_eq!(0, player.wager);
        assert_eq!(0, player.pot);
    }

    game.pay_blinds().unwrap();
    assert_eq!(5, game.small_blind().unwrap().wager);
    assert_eq!(10, game.big_blind().unwrap().wager);
    assert_eq!(10, game.state().status.current_wager);
    assert_eq!(10, game.state().status.mini_bet);

    game.ready_for_all().unwrap();
    assert_eq!("RoundStarted", game.state().status.current_event);

    // First to act preflop is the seat after the BB: the dealer here
    assert_eq!(0, current_seat(&game));
    game.call().unwrap();
    assert_last_action(&game, 0, ActionKind::Call, 10);
    assert_eq!(1, current_seat(&game));
    game.call().unwrap();
    assert_last_action(&game, 1, ActionKind::Call, 5);
    game.check().unwrap();
    assert_eq!("RoundClosed", game.state().status.current_event);
    assert_eq!(None, game.state().status.current_player);

    // One pot of 30, everyone eligible
    assert_eq!(1, game.state().status.pots.len());
    assert_eq!(30, game.state().status.pots[0].total);
    assert_eq!(vec![0, 1, 2], game.state().status.pots[0].contributors);
    assert_chips_conserved(&game);

    // Flop: SB speaks first
    next_street(&mut game);
    assert_eq!(Round::Flop, game.state().status.round);
    assert_eq!(3, game.state().status.board.len());
    assert_eq!(1, game.state().status.burned.len());
    assert_eq!(1, current_seat(&game));
    game.check().unwrap();
    game.check().unwrap();
    game.check().unwrap();

    next_street(&mut game);
    assert_eq!(Round::Turn, game.state().status.round);
    assert_eq!(4, game.state().status.board.len());
    game.check().unwrap();
    game.check().unwrap();
    game.check().unwrap();

    next_street(&mut game);
    assert_eq!(Round::River, game.state().status.round);
    assert_eq!(5, game.state().status.board.len());
    game.check().unwrap();
    game.check().unwrap();
    game.check().unwrap();

    game.next().unwrap();
    assert_eq!("GameClosed", game.state().status.current_event);
    assert_eq!(None, game.state().status.current_player);

    let result = game.state().result.clone().expect("missing result");
    assert_eq!(0, result.players.iter().map(|p| p.changed).sum::<i64>());
    let won: i64 = result
        .players
        .iter()
        .map(|p| p.changed.max(0))
        .sum();
    let lost: i64 = result.players.iter().map(|p| p.changed.min(0)).sum();
    assert_eq!(won, -lost);

    // Every pot layer found a winner and all chips went somewhere
    assert!(game.state().status.pots.iter().all(|p| !p.winners.is_empty()));
    assert_eq!(
        30_000,
        game.state().players.iter().map(|p| p.stack_size).sum::<i64>()
    );
}

#[test]
fn heads_up_dealer_acts_first_preflop_and_last_postflop() {
    let mut options = GameOptions::standard();
    options.seed = Some(11);
    options.players = vec![
        PlayerSetting::new(1_000, &["dealer", "sb"]),
        PlayerSetting::new(1_000, &["bb"]),
    ];
    let mut game = Game::new(options);
    into_preflop(&mut game);

    // Dealer posted the small blind and still opens the preflop action
    assert_eq!(0, current_seat(&game));
    game.call().unwrap();
    assert_last_action(&game, 0, ActionKind::Call, 5);
    game.check().unwrap();
    assert_eq!("RoundClosed", game.state().status.current_event);

    // Postflop the BB speaks first
    next_street(&mut game);
    assert_eq!(1, current_seat(&game));
}

#[test]
fn walkover_completes_without_dealing_the_board() {
    let mut game = Game::new(seeded_options(&[1_000, 1_000, 1_000]));
    into_preflop(&mut game);

    game.fold().unwrap(); // dealer
    game.fold().unwrap(); // SB, leaving the BB alone
    assert_eq!("RoundClosed", game.state().status.current_event);

    game.next().unwrap();
    assert_eq!("GameClosed", game.state().status.current_event);
    assert!(game.state().status.board.is_empty());

    let result = game.state().result.clone().unwrap();
    let changed: Vec<i64> = result.players.iter().map(|p| p.changed).collect();
    assert_eq!(vec![0, -5, 5], changed);
    assert_chips_conserved(&game);
}

#[test]
fn start_rejects_bad_configurations() {
    let mut options = seeded_options(&[1_000]);
    let mut game = Game::new(options.clone());
    assert_eq!(
        Err(GameError::InsufficientNumberOfPlayers),
        game.start()
    );

    options = seeded_options(&[1_000, 1_000]);
    options.players[0].positions = vec![];
    let mut game = Game::new(options);
    assert_eq!(Err(GameError::NoDealer), game.start());

    options = seeded_options(&[1_000, 0, 1_000]);
    let mut game = Game::new(options);
    assert_eq!(Err(GameError::NotEnoughBankroll), game.start());

    options = seeded_options(&[1_000, 1_000, 1_000]);
    options.deck = vec![];
    let mut game = Game::new(options);
    assert_eq!(Err(GameError::NoDeck), game.start());
}

#[test]
fn lifecycle_operations_reject_wrong_phases() {
    let mut game = Game::new(seeded_options(&[1_000, 1_000, 1_000]));
    game.start().unwrap();

    // Before any round exists, `next` has nothing to advance
    assert_eq!(Err(GameError::UnknownRound), game.next());
    // No ante is configured, so there is no payment task to settle
    assert_eq!(Err(GameError::UnknownTask), game.pay_ante());
    assert_eq!(Err(GameError::UnknownTask), game.pay_blinds());

    game.ready_for_all().unwrap();
    game.pay_blinds().unwrap();
    game.ready_for_all().unwrap();

    // Round is open: `next` must refuse, actions must be legal only
    // for the current player's allowed set
    assert_eq!(Err(GameError::NotClosedRound), game.next());
    assert_eq!(Err(GameError::UnknownTask), game.ready_for_all());
}

#[test]
fn illegal_actions_do_not_mutate_state() {
    // Seat 3 sits with 15 chips behind a 10-chip wager and a 10-chip
    // raise increment: calling is legal, raising is not.
    let mut game = Game::new(seeded_options(&[10_000, 10_000, 10_000, 15]));
    into_preflop(&mut game);

    assert_eq!(3, current_seat(&game));
    assert_eq!(10, game.state().status.current_wager);
    assert_eq!(10, game.state().status.previous_raise_size);
    assert_eq!(
        vec![ActionKind::Allin, ActionKind::Fold, ActionKind::Call],
        game.allowed_actions(3)
    );

    let before = normalized_state(&game);
    assert_eq!(Err(GameError::IllegalAction), game.raise(20));
    assert_eq!(Err(GameError::IllegalAction), game.bet(20));
    assert_eq!(Err(GameError::IllegalAction), game.check());
    assert_eq!(before, normalized_state(&game));

    game.call().unwrap();
    let caller = game.player(3).unwrap();
    assert_eq!(10, caller.wager);
    assert_eq!(5, caller.stack_size);
}

#[test]
fn bet_amounts_are_range_checked() {
    let mut game = Game::new(seeded_options(&[1_000, 1_000, 1_000]));
    into_preflop(&mut game);

    // Preflop facing the blind: betting is not on the menu at all
    assert_eq!(Err(GameError::IllegalAction), game.bet(50));
    game.call().unwrap();
    game.call().unwrap();
    game.check().unwrap();
    next_street(&mut game);

    // Below the mini-bet and above the stack are both rejected
    let before = normalized_state(&game);
    assert_eq!(Err(GameError::AmountOutOfRange), game.bet(5));
    assert_eq!(Err(GameError::AmountOutOfRange), game.bet(10_000));
    assert_eq!(before, normalized_state(&game));

    game.bet(10).unwrap();
    assert_eq!(10, game.state().status.current_wager);

    // A raise below one full increment is rejected as well
    assert_eq!(Err(GameError::AmountOutOfRange), game.raise(15));
    game.raise(20).unwrap();
    assert_eq!(20, game.state().status.current_wager);
    assert_eq!(10, game.state().status.previous_raise_size);
}
