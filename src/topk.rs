//! Pick the k most frequent tokens without sorting the whole vocabulary
//!
//! A min-heap holds the best k entries seen so far. Its root is the weakest of them, so each new
//! entry only has to beat the root to get in. Memory stays O(k) however many distinct tokens
//! there are.
//!
//! Entries are ranked by count, and equal counts by token (alphabetically earlier wins). That
//! makes the order total, so the result doesn't depend on the map's iteration order, even for
//! ties right at the cutoff.
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use super::{Count, FrequencyMap, Token};

/// One line of the final ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub token: Token,
    pub count: Count,
}

/// Keeps the `capacity` greatest items offered to it
pub struct BoundedTopK<T> {
    capacity: usize,
    heap: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> BoundedTopK<T> {
    pub fn new(capacity: usize) -> BoundedTopK<T> {
        BoundedTopK { capacity: capacity, heap: BinaryHeap::new() }
    }

    /// Offer an item; returns whether it was kept (for now)
    pub fn offer(&mut self, item: T) -> bool {
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(item));
            return true;
        }
        let beats_weakest = match self.heap.peek() {
            Some(&Reverse(ref weakest)) => item > *weakest,
            None => false, // capacity is 0
        };
        if beats_weakest {
            if let Some(mut weakest) = self.heap.peek_mut() {
                // PeekMut sifts the new root down when dropped
                *weakest = Reverse(item);
            }
        }
        beats_weakest
    }

    /// The weakest item still kept
    pub fn weakest(&self) -> Option<&T> {
        self.heap.peek().map(|&Reverse(ref item)| item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Everything kept, greatest first
    pub fn into_sorted_vec(self) -> Vec<T> {
        // Ascending in Reverse<T> is descending in T
        self.heap.into_sorted_vec().into_iter().map(|Reverse(item)| item).collect()
    }
}

/// A borrowed (token, count) pair ordered by rank, so greater means more frequent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rank<'a> {
    count: Count,
    token: &'a str,
}

impl<'a> Ord for Rank<'a> {
    fn cmp(&self, other: &Rank<'a>) -> Ordering {
        self.count.cmp(&other.count)
            .then_with(|| other.token.cmp(self.token))
    }
}

impl<'a> PartialOrd for Rank<'a> {
    fn partial_cmp(&self, other: &Rank<'a>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The `k` most frequent tokens, most frequent first, ties in alphabetical order.
///
/// Gives `min(k, counts.len())` entries; `k == 0` gives none.
pub fn select_top_k(counts: &FrequencyMap, k: usize) -> Vec<RankedEntry> {
    let mut top = BoundedTopK::new(k);
    for (token, &count) in counts {
        top.offer(Rank { count: count, token: token.as_str() });
    }
    top.into_sorted_vec()
        .into_iter()
        .map(|rank| RankedEntry { token: rank.token.to_string(), count: rank.count })
        .collect()
}
