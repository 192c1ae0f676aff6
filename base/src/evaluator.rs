//! Hand evaluator: picks the strongest 5-card combination out of a set
//! of hole and community cards and condenses it into a single `power`
//! value that totally orders hands.
//!
//! The category-to-base ranking is table-driven so rule variants can
//! reorder categories (short deck ranks a flush above a full house).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::deck::{rank_order, suit_of};

/// Hand categories, weakest first.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Copy, Clone)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    HighCard,
    Pair,
    TwoPairs,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

/// Base power per category. Kickers break ties inside a category, so
/// only the relative order of these values matters.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct CombinationPowers {
    pub high_card: i64,
    pub pair: i64,
    pub two_pairs: i64,
    pub three_of_a_kind: i64,
    pub straight: i64,
    pub flush: i64,
    pub full_house: i64,
    pub four_of_a_kind: i64,
    pub straight_flush: i64,
}

impl Default for CombinationPowers {
    fn default() -> Self {
        Self::standard()
    }
}

impl CombinationPowers {
    pub fn standard() -> Self {
        Self {
            high_card: 0,
            pair: 1,
            two_pairs: 2,
            three_of_a_kind: 3,
            straight: 4,
            flush: 5,
            full_house: 6,
            four_of_a_kind: 7,
            straight_flush: 8,
        }
    }

    /// Short-deck ranking: a flush outranks a full house.
    pub fn short_deck() -> Self {
        Self {
            flush: 6,
            full_house: 5,
            ..Self::standard()
        }
    }

    pub fn of(&self, category: Category) -> i64 {
        match category {
            Category::HighCard => self.high_card,
            Category::Pair => self.pair,
            Category::TwoPairs => self.two_pairs,
            Category::ThreeOfAKind => self.three_of_a_kind,
            Category::Straight => self.straight,
            Category::Flush => self.flush,
            Category::FullHouse => self.full_house,
            Category::FourOfAKind => self.four_of_a_kind,
            Category::StraightFlush => self.straight_flush,
        }
    }
}

/// A player's evaluated combination: the ordering power and the cards
/// realizing it (significance first, at most five).
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone)]
pub struct CombinationInfo {
    pub power: i64,
    pub category: Category,
    pub cards: Vec<String>,
}

/// Which low straights (wheels) are recognized.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WheelRule {
    /// A-2-3-4-5 plays as a five-high straight.
    Standard,
    /// A-6-7-8-9 plays as a nine-high straight (2-5 absent from deck).
    ShortDeck,
}

/// The wheel rule implied by a deck: a deck without deuces is short.
pub fn wheel_rule_for_deck(deck: &[String]) -> WheelRule {
    if deck.iter().any(|c| rank_order(c) == 2) {
        WheelRule::Standard
    } else {
        WheelRule::ShortDeck
    }
}

// Packs a category base and up to five rank values into one integer.
// Four bits per rank keeps the kickers below the category base.
fn pack_power(base: i64, ranks: &[u8]) -> i64 {
    let mut power = base << 20;
    for (i, r) in ranks.iter().take(5).enumerate() {
        power |= (*r as i64) << (16 - 4 * i);
    }
    power
}

struct Candidate<'a> {
    category: Category,
    ranks: Vec<u8>,
    picks: Vec<&'a str>,
}

impl<'a> Candidate<'a> {
    fn into_info(self, powers: &CombinationPowers) -> CombinationInfo {
        let power = pack_power(powers.of(self.category), &self.ranks);
        CombinationInfo {
            power,
            category: self.category,
            cards: self.picks.iter().map(|c| c.to_string()).collect(),
        }
    }
}

// Ranks present in `cards`, grouped and sorted by count then rank,
// both descending. Cards inside a group keep input order.
fn rank_groups<'a>(cards: &[&'a str]) -> Vec<(u8, Vec<&'a str>)> {
    let mut by_rank: HashMap<u8, Vec<&'a str>> = HashMap::with_capacity(cards.len());
    for &card in cards {
        by_rank.entry(rank_order(card)).or_default().push(card);
    }
    let mut groups: Vec<(u8, Vec<&'a str>)> = by_rank.into_iter().collect();
    groups.sort_by(|(r1, g1), (r2, g2)| g2.len().cmp(&g1.len()).then(r2.cmp(r1)));
    groups
}

// Finds the highest straight within `cards`, returning one card per
// rank, high first; the wheel ace ranks as 1.
fn find_straight<'a>(cards: &[&'a str], wheel: WheelRule) -> Option<Candidate<'a>> {
    let card_of = |rank: u8| cards.iter().copied().find(|c| rank_order(c) == rank);

    for high in (6..=14u8).rev() {
        let mut picks: Vec<&'a str> = Vec::with_capacity(5);
        for i in 0..5u8 {
            match card_of(high - i) {
                Some(card) => picks.push(card),
                None => break,
            }
        }
        if picks.len() == 5 {
            return Some(Candidate {
                category: Category::Straight,
                ranks: (0..5).map(|i| high - i).collect(),
                picks,
            });
        }
    }

    // Wheels: the ace plays low and packs as rank 1.
    let wheel_ranks: [u8; 5] = match wheel {
        WheelRule::Standard => [5, 4, 3, 2, 14],
        WheelRule::ShortDeck => [9, 8, 7, 6, 14],
    };
    let mut picks: Vec<&'a str> = Vec::with_capacity(5);
    for rank in wheel_ranks {
        match card_of(rank) {
            Some(card) => picks.push(card),
            None => return None,
        }
    }
    let mut ranks = wheel_ranks.to_vec();
    ranks[4] = 1;
    Some(Candidate {
        category: Category::Straight,
        ranks,
        picks,
    })
}

// Cards of the dominant suit when five or more share it, sorted by
// rank descending.
fn find_suited<'a>(cards: &[&'a str]) -> Option<Vec<&'a str>> {
    let mut by_suit: HashMap<char, Vec<&'a str>> = HashMap::with_capacity(4);
    for &card in cards {
        by_suit.entry(suit_of(card)).or_default().push(card);
    }
    let mut suited = by_suit.into_values().find(|group| group.len() >= 5)?;
    suited.sort_by(|a, b| rank_order(b).cmp(&rank_order(a)));
    Some(suited)
}

// Builds a group-based candidate: `shape` lists the group sizes to
// consume (e.g. [3, 2] for a full house), then kickers fill up to five.
fn group_candidate<'a>(
    groups: &[(u8, Vec<&'a str>)],
    category: Category,
    shape: &[usize],
) -> Option<Candidate<'a>> {
    let mut picks: Vec<&'a str> = Vec::with_capacity(5);
    let mut ranks: Vec<u8> = Vec::with_capacity(5);
    let mut used = vec![false; groups.len()];

    for &size in shape {
        let pos = groups
            .iter()
            .enumerate()
            .position(|(i, (_, group))| !used[i] && group.len() >= size)?;
        used[pos] = true;
        let (rank, group) = &groups[pos];
        picks.extend(group.iter().take(size).copied());
        ranks.extend(std::iter::repeat(*rank).take(size));
    }

    // Kickers: highest remaining ranks
    let mut kickers: Vec<(u8, &'a str)> = Vec::new();
    for (i, (rank, group)) in groups.iter().enumerate() {
        if used[i] {
            continue;
        }
        for card in group.iter() {
            kickers.push((*rank, *card));
        }
    }
    kickers.sort_by(|(r1, _), (r2, _)| r2.cmp(r1));
    for (rank, card) in kickers {
        if picks.len() == 5 {
            break;
        }
        picks.push(card);
        ranks.push(rank);
    }

    Some(Candidate {
        category,
        ranks,
        picks,
    })
}

/// Evaluates the best combination available in `cards` (2 to 7 cards).
///
/// With fewer than five cards only groups and high cards can form; the
/// result still orders correctly against other hands of the same size.
pub fn evaluate_card_set(
    cards: &[&str],
    powers: &CombinationPowers,
    wheel: WheelRule,
) -> CombinationInfo {
    let groups = rank_groups(cards);
    let mut candidates: Vec<Candidate> = Vec::with_capacity(6);

    if let Some(suited) = find_suited(cards) {
        if let Some(sf) = find_straight(&suited, wheel) {
            candidates.push(Candidate {
                category: Category::StraightFlush,
                ..sf
            });
        }
        let ranks: Vec<u8> = suited.iter().take(5).map(|c| rank_order(c)).collect();
        candidates.push(Candidate {
            category: Category::Flush,
            ranks,
            picks: suited.into_iter().take(5).collect(),
        });
    }

    if let Some(straight) = find_straight(cards, wheel) {
        candidates.push(straight);
    }

    let shapes: [(Category, &[usize]); 5] = [
        (Category::FourOfAKind, &[4]),
        (Category::FullHouse, &[3, 2]),
        (Category::ThreeOfAKind, &[3]),
        (Category::TwoPairs, &[2, 2]),
        (Category::Pair, &[2]),
    ];
    for (category, shape) in shapes {
        if let Some(candidate) = group_candidate(&groups, category, shape) {
            candidates.push(candidate);
            break;
        }
    }

    // Always present as the floor
    if let Some(high) = group_candidate(&groups, Category::HighCard, &[]) {
        candidates.push(high);
    }

    candidates
        .into_iter()
        .map(|c| c.into_info(powers))
        .max_by_key(|info| info.power)
        .unwrap_or_default()
}

// C(n, k) index combinations, in lexicographic order.
fn combinations<'a>(pool: &[&'a str], k: usize) -> Vec<Vec<&'a str>> {
    if k == 0 {
        return vec![vec![]];
    }
    if pool.len() < k {
        return vec![];
    }
    let mut result = Vec::new();
    for (i, &first) in pool.iter().enumerate() {
        for mut tail in combinations(&pool[i + 1..], k - 1) {
            tail.insert(0, first);
            result.push(tail);
        }
    }
    result
}

/// Evaluates a player's combination from hole and community cards.
///
/// With `required_hole_cards == 0` the best five of all cards count.
/// Otherwise exactly that many hole cards must be used (the Omaha
/// rule), padding from the board; every legal selection is tried.
pub fn evaluate_combination(
    hole_cards: &[String],
    board: &[String],
    required_hole_cards: usize,
    powers: &CombinationPowers,
    wheel: WheelRule,
) -> CombinationInfo {
    let hole: Vec<&str> = hole_cards.iter().map(|c| c.as_str()).collect();
    let community: Vec<&str> = board.iter().map(|c| c.as_str()).collect();

    if required_hole_cards == 0 {
        let mut cards = hole.clone();
        cards.extend_from_slice(&community);
        return evaluate_card_set(&cards, powers, wheel);
    }

    let from_hole = required_hole_cards.min(hole.len());
    let from_board = 5usize.saturating_sub(from_hole).min(community.len());
    let mut best = CombinationInfo::default();
    for hole_pick in combinations(&hole, from_hole) {
        for board_pick in combinations(&community, from_board) {
            let mut cards = hole_pick.clone();
            cards.extend_from_slice(&board_pick);
            let info = evaluate_card_set(&cards, powers, wheel);
            if info.power > best.power || best.cards.is_empty() {
                best = info;
            }
        }
    }
    best
}
