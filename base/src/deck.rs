//! Card and deck primitives.
//!
//! A single card is a two-character string: suit first, then rank.
//! For example `"SA"` is the ace of spades and `"HT"` the ten of hearts.
//! A standard deck holds 52 cards; a short deck drops ranks 2-5 and
//! holds 36.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const CARD_SUITS: [char; 4] = ['S', 'H', 'D', 'C'];

pub const CARD_RANKS: [char; 13] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

/// Builds an unshuffled 52-card deck, suit by suit.
pub fn standard_deck() -> Vec<String> {
    let mut cards = Vec::with_capacity(52);
    for suit in CARD_SUITS {
        for rank in CARD_RANKS {
            cards.push(format!("{}{}", suit, rank));
        }
    }
    cards
}

/// Builds an unshuffled 36-card short deck (ranks 2-5 removed).
pub fn short_deck() -> Vec<String> {
    let mut cards = Vec::with_capacity(36);
    for suit in CARD_SUITS {
        for rank in CARD_RANKS.iter().skip(4) {
            cards.push(format!("{}{}", suit, rank));
        }
    }
    cards
}

/// Shuffles a deck with a single Fisher-Yates pass.
///
/// The generator is ChaCha8, seeded from OS entropy unless an explicit
/// seed is supplied for reproducible play. The input is not modified.
pub fn shuffle_cards(cards: &[String], seed: Option<u64>) -> Vec<String> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut result = cards.to_vec();
    result.shuffle(&mut rng);
    result
}

/// Numeric order of a card's rank, ace high (2 -> 2 ... A -> 14).
///
/// Returns 0 for malformed input.
pub fn rank_order(card: &str) -> u8 {
    match card.as_bytes().get(1) {
        Some(b'A') => 14,
        Some(b'K') => 13,
        Some(b'Q') => 12,
        Some(b'J') => 11,
        Some(b'T') => 10,
        Some(r @ b'2'..=b'9') => r - b'0',
        _ => 0,
    }
}

/// The suit character of a card.
pub fn suit_of(card: &str) -> char {
    card.chars().next().unwrap_or('?')
}
