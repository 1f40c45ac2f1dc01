use rand::Rng;
use rand::seq::SliceRandom;

use crate::pool::{InsufficientItems, ItemPool};

/// Cards are square with this many cells per side.
pub const CARD_SIZE: usize = 5;
/// Total cells on one card.
pub const CELL_COUNT: usize = CARD_SIZE * CARD_SIZE;
/// Grid position (row and column) of the free cell.
pub const FREE_CELL: usize = CARD_SIZE / 2;

/// What one grid position displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    /// The fixed center marker; never a pool item.
    Free,
    Item(&'a str),
}

/// One bingo card: 25 distinct items drawn uniformly from a pool, row-major.
///
/// The center position always displays the free marker. The item drawn into
/// that slot is shadowed by the marker but still counts as consumed, so the
/// unused listing subtracts the full 25-item draw from the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    items: Vec<String>,
}

impl Card {
    /// Draw a card from `pool` without replacement.
    ///
    /// Fails when the pool cannot fill all 25 cells. Uses a partial
    /// Fisher-Yates shuffle over the index space so both the chosen subset
    /// and its order are uniform.
    pub fn generate<R: Rng>(pool: &ItemPool, rng: &mut R) -> Result<Self, InsufficientItems> {
        if pool.len() < CELL_COUNT {
            return Err(InsufficientItems {
                required: CELL_COUNT,
                available: pool.len(),
            });
        }
        let mut indices: Vec<usize> = (0..pool.len()).collect();
        let (drawn, _) = indices.partial_shuffle(rng, CELL_COUNT);
        let items = drawn
            .iter()
            .map(|&i| pool.items()[i].clone())
            .collect();
        Ok(Self { items })
    }

    /// Content displayed at `(row, col)`, both 0-indexed.
    pub fn cell(&self, row: usize, col: usize) -> Cell<'_> {
        if row == FREE_CELL && col == FREE_CELL {
            Cell::Free
        } else {
            Cell::Item(&self.items[row * CARD_SIZE + col])
        }
    }

    /// All 25 drawn items in draw order, including the shadowed center draw.
    pub fn drawn_items(&self) -> &[String] {
        &self.items
    }

    /// The 24 items actually displayed on the card.
    pub fn used_items(&self) -> Vec<&str> {
        let center = FREE_CELL * CARD_SIZE + FREE_CELL;
        self.items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != center)
            .map(|(_, item)| item.as_str())
            .collect()
    }

    /// Pool items this card did not consume, in pool order.
    pub fn unused_items<'p>(&self, pool: &'p ItemPool) -> Vec<&'p str> {
        pool.iter()
            .filter(|item| !self.items.iter().any(|drawn| drawn == item))
            .collect()
    }
}

/// Generate `count` independent cards from the same pool.
///
/// Each card re-samples the full pool, so items may repeat across cards but
/// never within one. `count = 0` yields an empty set.
pub fn generate_card_set<R: Rng>(
    pool: &ItemPool,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Card>, InsufficientItems> {
    let mut cards = Vec::with_capacity(count);
    for _ in 0..count {
        cards.push(Card::generate(pool, rng)?);
    }
    Ok(cards)
}
