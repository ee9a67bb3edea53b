//! Pawn-king cache (C9).
//!
//! A direct-mapped table keyed by the board's pawn-king Zobrist hash,
//! memoizing the entire `PawnKingStructure` — passed pawns, outposts,
//! semi-open files, and the packed shelter/storm/structure score — since
//! every field in it is, by construction, a pure function of pawns and
//! king squares. The same skeleton recurs constantly across a search
//! tree, so recomputing it from scratch on every node is wasted work.
//!
//! Unlike the search's transposition table, nothing here is atomic: a
//! miss just costs a recompute, never a wrong score, so each thread
//! evaluating concurrently should simply own its own table rather than
//! share one behind a lock.

use chessboard::{zobrist, Board};

use crate::pawn_king::PawnKingStructure;
use crate::trace::{EvalTrace, Tracer};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Slot {
    hash: u64,
    structure: PawnKingStructure,
}

pub struct PawnKingCache {
    slots: Vec<Option<Slot>>,
    mask: usize,
    hits: u64,
    misses: u64,
}

impl PawnKingCache {
    /// Round the requested size down to the largest power-of-two slot
    /// count that fits, so indexing is a mask instead of a modulo.
    pub fn with_capacity_mb(size_mb: usize) -> Self {
        let slot_bytes = std::mem::size_of::<Slot>().max(1);
        let budget = (size_mb.max(1) << 20) / slot_bytes;
        let size = budget.max(1).next_power_of_two();

        Self { slots: vec![None; size], mask: size - 1, hits: 0, misses: 0 }
    }

    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Look up (or compute and insert) the pawn-king structure for `board`.
    pub fn get_or_compute(&mut self, board: &Board, trace: &mut impl Tracer<EvalTrace>) -> PawnKingStructure {
        let hash = zobrist::pawn_king_hash(board);
        let idx = self.index(hash);

        if let Some(slot) = self.slots[idx] {
            if slot.hash == hash {
                self.hits += 1;
                return slot.structure;
            }
        }

        self.misses += 1;
        let structure = PawnKingStructure::new(board, trace);
        self.slots[idx] = Some(Slot { hash, structure });
        structure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::NullTracer;
    use std::str::FromStr;

    #[test]
    fn repeated_lookups_of_the_same_position_hit() {
        let board = Board::from_str("4k3/8/8/8/8/8/PPP5/4K3 w - - 0 1").unwrap();
        let mut cache = PawnKingCache::with_capacity_mb(1);

        let first = cache.get_or_compute(&board, &mut NullTracer);
        let second = cache.get_or_compute(&board, &mut NullTracer);

        assert_eq!(first, second);
        assert_eq!(cache.hits, 1);
        assert_eq!(cache.misses, 1);
    }

    #[test]
    fn a_cache_hit_is_transparent_to_the_result() {
        let board = Board::from_str("4k3/8/8/8/8/8/PPP5/4K3 w - - 0 1").unwrap();
        let uncached = PawnKingStructure::new(&board, &mut NullTracer);

        let mut cache = PawnKingCache::with_capacity_mb(1);
        let cached = cache.get_or_compute(&board, &mut NullTracer);

        assert_eq!(uncached, cached);
    }

    #[test]
    fn different_pawn_structures_both_land_in_the_cache() {
        let a = Board::from_str("4k3/8/8/8/8/8/PPP5/4K3 w - - 0 1").unwrap();
        let b = Board::from_str("4k3/8/8/8/8/8/PP6/4K3 w - - 0 1").unwrap();
        let mut cache = PawnKingCache::with_capacity_mb(1);

        let score_a = cache.get_or_compute(&a, &mut NullTracer).score;
        let score_b = cache.get_or_compute(&b, &mut NullTracer).score;

        assert_ne!(score_a, score_b);
        assert_eq!(cache.misses, 2);
    }
}
