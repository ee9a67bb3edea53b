//! Attack-bitboard generation.
//!
//! Deliberately plain ray-casting / delta tables rather than magic
//! bitboards: the evaluator calls these once per piece per side per
//! `evaluate()`, not billions of times in a search tree, so the constant
//! factor magic bitboards buy isn't worth the complexity here.

use crate::bitboard::Bitboard;
use crate::piece::Color;
use crate::square::Square;

const KNIGHT_DELTAS: [(i8, i8); 8] =
    [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];

const KING_DELTAS: [(i8, i8); 8] =
    [(1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1)];

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn deltas_to_bb(sq: Square, deltas: &[(i8, i8)]) -> Bitboard {
    let (rank, file) = (sq.rank() as i8, sq.file() as i8);
    let mut bb = Bitboard::EMPTY;

    for &(dr, df) in deltas {
        let (r, f) = (rank + dr, file + df);
        if (0..8).contains(&r) && (0..8).contains(&f) {
            bb |= Bitboard::from(Square::new((r * 8 + f) as u8).unwrap());
        }
    }

    bb
}

fn ray(sq: Square, blockers: Bitboard, dr: i8, df: i8) -> Bitboard {
    let (mut rank, mut file) = (sq.rank() as i8, sq.file() as i8);
    let mut bb = Bitboard::EMPTY;

    loop {
        rank += dr;
        file += df;

        if !(0..8).contains(&rank) || !(0..8).contains(&file) {
            break;
        }

        let landing = Square::new((rank * 8 + file) as u8).unwrap();
        bb |= Bitboard::from(landing);

        if blockers.contains(landing) {
            break;
        }
    }

    bb
}

pub fn knight_attacks(sq: Square) -> Bitboard {
    deltas_to_bb(sq, &KNIGHT_DELTAS)
}

pub fn king_attacks(sq: Square) -> Bitboard {
    deltas_to_bb(sq, &KING_DELTAS)
}

pub fn bishop_attacks(sq: Square, blockers: Bitboard) -> Bitboard {
    BISHOP_DIRS.iter().fold(Bitboard::EMPTY, |acc, &(dr, df)| acc | ray(sq, blockers, dr, df))
}

pub fn rook_attacks(sq: Square, blockers: Bitboard) -> Bitboard {
    ROOK_DIRS.iter().fold(Bitboard::EMPTY, |acc, &(dr, df)| acc | ray(sq, blockers, dr, df))
}

pub fn pawn_attacks(sq: Square, side: Color) -> Bitboard {
    let bb = Bitboard::from(sq);
    if side.is_white() {
        bb.forward_left::<true>() | bb.forward_right::<true>()
    } else {
        bb.forward_left::<false>() | bb.forward_right::<false>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn knight_corner() {
        let attacks = knight_attacks(A1);
        let expected: Bitboard = [B3, C2].into_iter().collect();
        assert_eq!(attacks, expected);
    }

    #[test]
    fn rook_blocked() {
        let blockers: Bitboard = [D4, A1].into_iter().collect();
        let attacks = rook_attacks(D1, blockers);
        let expected: Bitboard =
            [A1, B1, C1, E1, F1, G1, H1, D2, D3, D4].into_iter().collect();
        assert_eq!(attacks, expected);
    }

    #[test]
    fn bishop_open_center() {
        let attacks = bishop_attacks(D4, Bitboard::EMPTY);
        assert_eq!(attacks.count(), 13);
    }

    #[test]
    fn pawn_attacks_diagonal_only() {
        let attacks = pawn_attacks(D4, Color::White);
        let expected: Bitboard = [C5, E5].into_iter().collect();
        assert_eq!(attacks, expected);
    }
}
