//! The standard deck and every six-tile draw from it

use crate::expr::Number;

/// Tiles dealt per game
pub const DRAW_SIZE: usize = 6;

/// Each distinct tile value and how many copies the deck holds
pub const DECK: [(Number, usize); 14] = [
    (1, 2),
    (2, 2),
    (3, 2),
    (4, 2),
    (5, 2),
    (6, 2),
    (7, 2),
    (8, 2),
    (9, 2),
    (10, 2),
    (25, 1),
    (50, 1),
    (75, 1),
    (100, 1),
];

/// Every distinct multiset of [`DRAW_SIZE`] tiles, each sorted ascending,
/// in lexicographic order.
pub fn standard_draws() -> Vec<Vec<Number>> {
    let mut draws = Vec::new();
    let mut current = Vec::with_capacity(DRAW_SIZE);
    collect_draws(0, &mut current, &mut draws);
    draws
}

fn collect_draws(kind: usize, current: &mut Vec<Number>, draws: &mut Vec<Vec<Number>>) {
    if current.len() == DRAW_SIZE {
        draws.push(current.clone());
        return;
    }
    let Some(&(value, copies)) = DECK.get(kind) else {
        return;
    };

    let most = copies.min(DRAW_SIZE - current.len());
    for taken in (0..=most).rev() {
        current.extend(std::iter::repeat(value).take(taken));
        collect_draws(kind + 1, current, draws);
        current.truncate(current.len() - taken);
    }
}
