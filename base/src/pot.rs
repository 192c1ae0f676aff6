//! Layered side-pot construction.
//!
//! Layers are rebuilt from per-seat total contributions whenever a
//! betting round closes and again at settlement; they are never
//! maintained incrementally. Folded seats feed every layer they
//! reached but are eligible to win none.

use serde::{Deserialize, Serialize};

/// One side-pot layer. `level` is the chip amount each contributor put
/// into this layer on top of the previous one; `contributors` are the
/// seats that can win it; `total` includes dead money from folded
/// seats; `winners` is populated at settlement.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone)]
pub struct Pot {
    pub level: i64,
    pub contributors: Vec<usize>,
    pub total: i64,
    pub winners: Vec<usize>,
}

/// Builds pot layers from per-seat hand contributions.
///
/// `contributions[seat]` is the total the seat has put in this hand and
/// `folded[seat]` whether it has folded. Layer boundaries are the
/// distinct contribution amounts of non-folded seats, so each layer has
/// a distinct contributor set. Chips a folded seat put in beyond the
/// highest live contribution are dead money in the top layer.
pub fn build_pot_layers(contributions: &[i64], folded: &[bool]) -> Vec<Pot> {
    let mut caps: Vec<i64> = contributions
        .iter()
        .zip(folded.iter())
        .filter(|(c, f)| !**f && **c > 0)
        .map(|(c, _)| *c)
        .collect();
    caps.sort_unstable();
    caps.dedup();

    if caps.is_empty() {
        return Vec::new();
    }

    let mut pots: Vec<Pot> = Vec::with_capacity(caps.len());
    let mut prev = 0i64;
    for cap in caps {
        let total: i64 = contributions
            .iter()
            .map(|c| c.min(&cap) - c.min(&prev))
            .sum();
        let contributors: Vec<usize> = contributions
            .iter()
            .enumerate()
            .filter(|(seat, c)| !folded[*seat] && **c >= cap)
            .map(|(seat, _)| seat)
            .collect();
        pots.push(Pot {
            level: cap - prev,
            contributors,
            total,
            winners: Vec::new(),
        });
        prev = cap;
    }

    // Folded overpay beyond the highest live contribution
    let residue: i64 = contributions.iter().map(|c| c - c.min(&prev)).sum();
    if residue > 0 {
        if let Some(top) = pots.last_mut() {
            top.total += residue;
        }
    }

    pots
}

/// Sum of all layer totals.
pub fn layers_total(pots: &[Pot]) -> i64 {
    pots.iter().map(|p| p.total).sum()
}

/// Splits a pot among its winners. `winners` must already be ordered
/// clockwise from the dealer; the odd-chip remainder goes to the first.
pub fn split_prize(total: i64, winners: &[usize]) -> Vec<(usize, i64)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let count = winners.len() as i64;
    let share = total / count;
    let remainder = total % count;
    winners
        .iter()
        .enumerate()
        .map(|(i, seat)| (*seat, if i == 0 { share + remainder } else { share }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uneven_allin_builds_two_layers() {
        // Seats 0,1,3 reach 100; seat 2 is all-in for 40.
        let contributions = [100, 100, 40, 100];
        let folded = [false, false, false, false];
        let pots = build_pot_layers(&contributions, &folded);

        assert_eq!(2, pots.len());
        assert_eq!(40, pots[0].level);
        assert_eq!(160, pots[0].total);
        assert_eq!(vec![0, 1, 2, 3], pots[0].contributors);
        assert_eq!(60, pots[1].level);
        assert_eq!(180, pots[1].total);
        assert_eq!(vec![0, 1, 3], pots[1].contributors);
        assert_eq!(340, layers_total(&pots));
    }

    #[test]
    fn folded_money_collapses_into_a_single_layer() {
        // Two live seats at 800; folded blinds left 100 and 200 behind.
        let contributions = [800, 100, 200, 800];
        let folded = [false, true, true, false];
        let pots = build_pot_layers(&contributions, &folded);

        assert_eq!(1, pots.len());
        assert_eq!(800, pots[0].level);
        assert_eq!(1900, pots[0].total);
        assert_eq!(vec![0, 3], pots[0].contributors);
    }

    #[test]
    fn folded_overpay_is_dead_money_in_the_top_layer() {
        // The folded seat put in more than any live seat.
        let contributions = [300, 500, 300];
        let folded = [false, true, false];
        let pots = build_pot_layers(&contributions, &folded);

        assert_eq!(1, pots.len());
        assert_eq!(300, pots[0].level);
        assert_eq!(1100, pots[0].total);
        assert_eq!(vec![0, 2], pots[0].contributors);
    }

    #[test]
    fn uncalled_raise_gets_its_own_layer() {
        let contributions = [500, 200, 0];
        let folded = [false, false, true];
        let pots = build_pot_layers(&contributions, &folded);

        assert_eq!(2, pots.len());
        assert_eq!(vec![0, 1], pots[0].contributors);
        assert_eq!(400, pots[0].total);
        // Only seat 0 reaches the top layer; it wins its excess back.
        assert_eq!(vec![0], pots[1].contributors);
        assert_eq!(300, pots[1].total);
    }

    #[test]
    fn split_gives_odd_chip_to_first_winner() {
        let shares = split_prize(101, &[2, 0]);
        assert_eq!(vec![(2, 51), (0, 50)], shares);

        let shares = split_prize(99, &[1, 2, 4]);
        assert_eq!(vec![(1, 33), (2, 33), (4, 33)], shares);
    }

    #[test]
    fn construction_conserves_chips() {
        let contributions = [123, 77, 345, 9, 345];
        let folded = [false, true, false, true, false];
        let pots = build_pot_layers(&contributions, &folded);
        assert_eq!(contributions.iter().sum::<i64>(), layers_total(&pots));
    }
}
