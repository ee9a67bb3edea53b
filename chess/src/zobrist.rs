//! A narrow Zobrist hash covering only pawns and kings.
//!
//! The evaluator's pawn-king cache only ever needs to recognize "have I
//! seen this exact arrangement of pawns and kings before", so the hash
//! deliberately ignores every other piece, castling rights, and en
//! passant — folding them in would only produce more distinct keys for
//! positions whose pawn structure score is identical.

use crate::board::Board;
use crate::piece::Color;
use crate::square::Square;
use std::sync::OnceLock;

struct Keys {
    pawns: [[u64; 64]; 2],
    kings: [[u64; 64]; 2],
}

/// A fixed-seed SplitMix64 stream, so the keys are reproducible across runs
/// without shipping a 128-entry literal table.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn keys() -> &'static Keys {
    static KEYS: OnceLock<Keys> = OnceLock::new();

    KEYS.get_or_init(|| {
        let mut state = 0xD1CE_BEEF_CAFE_F00D;
        let mut pawns = [[0u64; 64]; 2];
        let mut kings = [[0u64; 64]; 2];

        for color in 0..2 {
            for sq in 0..64 {
                pawns[color][sq] = splitmix64(&mut state);
                kings[color][sq] = splitmix64(&mut state);
            }
        }

        Keys { pawns, kings }
    })
}

/// Hash of the board's pawn placement and both kings' squares.
pub fn pawn_king_hash(board: &Board) -> u64 {
    let keys = keys();
    let mut hash = 0u64;

    for sq in board.pawns(Color::White) {
        hash ^= keys.pawns[Color::White as usize][sq as usize];
    }
    for sq in board.pawns(Color::Black) {
        hash ^= keys.pawns[Color::Black as usize][sq as usize];
    }

    if let Some(sq) = king_square(board, Color::White) {
        hash ^= keys.kings[Color::White as usize][sq as usize];
    }
    if let Some(sq) = king_square(board, Color::Black) {
        hash ^= keys.kings[Color::Black as usize][sq as usize];
    }

    hash
}

fn king_square(board: &Board, side: Color) -> Option<Square> {
    let kings = board.kings(side);
    if kings.is_empty() {
        None
    } else {
        Some(kings.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn identical_pawn_king_structure_hashes_equal() {
        let a = Board::from_str("4k3/8/8/8/8/8/PPP5/4K3 w - - 0 1").unwrap();
        let b = Board::from_str("4k3/8/8/8/8/8/PPP5/4K3 b - - 0 1").unwrap();
        assert_eq!(pawn_king_hash(&a), pawn_king_hash(&b));
    }

    #[test]
    fn differing_pawn_structure_hashes_differ() {
        let a = Board::from_str("4k3/8/8/8/8/8/PPP5/4K3 w - - 0 1").unwrap();
        let b = Board::from_str("4k3/8/8/8/8/8/PP6/4K3 w - - 0 1").unwrap();
        assert_ne!(pawn_king_hash(&a), pawn_king_hash(&b));
    }

    #[test]
    fn ignores_non_pawn_non_king_pieces() {
        let a = Board::from_str("4k3/8/8/8/8/8/PPP5/4K3 w - - 0 1").unwrap();
        let b = Board::from_str("4k1n1/8/8/8/8/8/PPP5/4K3 w - - 0 1").unwrap();
        assert_eq!(pawn_king_hash(&a), pawn_king_hash(&b));
    }
}
