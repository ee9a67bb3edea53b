//! A `Square` names a single point on the board (as opposed to a `Bitboard`,
//! which names a set of them). Squares double as indices into the various
//! 64-element arrays used throughout the evaluator (PSQTs, king distance
//! tables, etc).

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::piece::{Color, Piece};
use anyhow::anyhow;
use std::ops::{Index, IndexMut};
use std::{fmt::Display, str::FromStr};
use Square::*;

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    pub const COUNT: usize = 64;

    #[rustfmt::skip]
    pub const ALL: [Self; Self::COUNT] = [
        A1, B1, C1, D1, E1, F1, G1, H1,
        A2, B2, C2, D2, E2, F2, G2, H2,
        A3, B3, C3, D3, E3, F3, G3, H3,
        A4, B4, C4, D4, E4, F4, G4, H4,
        A5, B5, C5, D5, E5, F5, G5, H5,
        A6, B6, C6, D6, E6, F6, G6, H6,
        A7, B7, C7, D7, E7, F7, G7, H7,
        A8, B8, C8, D8, E8, F8, G8, H8,
    ];

    #[rustfmt::skip]
    pub const RANKS: [[Self; 8]; 8] = [
        [A8, B8, C8, D8, E8, F8, G8, H8],
        [A7, B7, C7, D7, E7, F7, G7, H7],
        [A6, B6, C6, D6, E6, F6, G6, H6],
        [A5, B5, C5, D5, E5, F5, G5, H5],
        [A4, B4, C4, D4, E4, F4, G4, H4],
        [A3, B3, C3, D3, E3, F3, G3, H3],
        [A2, B2, C2, D2, E2, F2, G2, H2],
        [A1, B1, C1, D1, E1, F1, G1, H1],
    ];

    #[rustfmt::skip]
    pub const NAMES: [&'static str; Self::COUNT] = [
        "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
        "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
        "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
        "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
        "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
        "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
        "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
        "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
    ];

    pub const fn rank(&self) -> usize {
        (*self as usize) / 8
    }

    pub const fn file(&self) -> usize {
        (*self as usize) % 8
    }

    /// Rank index counted from our own side of the board (0 = our back rank).
    pub const fn relative_rank<const WHITE: bool>(&self) -> usize {
        let rank = *self as usize / 8;
        if WHITE {
            rank
        } else {
            7 - rank
        }
    }

    pub fn forward(self, side: Color) -> Option<Self> {
        if side.is_white() {
            Self::ALL.get(self as usize + 8).copied()
        } else {
            (self as usize).checked_sub(8).map(|idx| Self::ALL[idx])
        }
    }

    pub fn backward(self, side: Color) -> Option<Self> {
        self.forward(side.opp())
    }

    pub fn distance(&self, other: Self) -> usize {
        self.file().abs_diff(other.file()) + self.rank().abs_diff(other.rank())
    }

    pub fn vdistance(&self, other: Self) -> usize {
        self.rank().abs_diff(other.rank())
    }

    pub fn hdistance(&self, other: Self) -> usize {
        self.file().abs_diff(other.file())
    }

    /// Chebyshev distance: the number of king-steps between two squares.
    pub fn max_dist(&self, other: Self) -> usize {
        usize::max(self.rank().abs_diff(other.rank()), self.file().abs_diff(other.file()))
    }

    /// Mirror vertically (swap ranks 1..8, keep file) — used to look a
    /// White-relative PSQT entry up for a Black piece.
    pub const fn flip(&self) -> Self {
        unsafe { Self::new_unchecked((*self as u8) ^ 56) }
    }

    /// Mirror horizontally (swap files a..h, keep rank).
    pub const fn mirror(&self) -> Self {
        unsafe { Self::new_unchecked((*self as u8) ^ 7) }
    }

    pub fn new(idx: u8) -> Option<Self> {
        if idx < 64 {
            Some(unsafe { Self::new_unchecked(idx) })
        } else {
            None
        }
    }

    /// # Safety
    /// `idx` must be less than 64.
    pub const unsafe fn new_unchecked(idx: u8) -> Self {
        unsafe { std::mem::transmute::<u8, Self>(idx) }
    }

    pub fn pawn_attacks(self, side: Color) -> Bitboard {
        attacks::pawn_attacks(self, side)
    }

    pub fn knight_squares(self) -> Bitboard {
        attacks::knight_attacks(self)
    }

    pub fn bishop_squares(self, blockers: Bitboard) -> Bitboard {
        attacks::bishop_attacks(self, blockers)
    }

    pub fn rook_squares(self, blockers: Bitboard) -> Bitboard {
        attacks::rook_attacks(self, blockers)
    }

    pub fn queen_squares(self, blockers: Bitboard) -> Bitboard {
        self.bishop_squares(blockers) | self.rook_squares(blockers)
    }

    pub fn king_squares(self) -> Bitboard {
        attacks::king_attacks(self)
    }

    pub fn is_promo_rank(&self, side: Color) -> bool {
        match side {
            Color::White => self.rank() == 7,
            Color::Black => self.rank() == 0,
        }
    }
}

impl From<usize> for Square {
    fn from(idx: usize) -> Self {
        Self::ALL[idx]
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Self::NAMES[*self])
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let idx = Self::NAMES
            .iter()
            .position(|&name| name == s.to_lowercase())
            .ok_or_else(|| anyhow!("'{s}' is not a valid square name"))?;

        Ok(Self::ALL[idx])
    }
}

impl<T> Index<Square> for [T; 64] {
    type Output = T;

    fn index(&self, index: Square) -> &Self::Output {
        unsafe { self.get_unchecked(index as usize) }
    }
}

impl<T> IndexMut<Square> for [T; 64] {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        unsafe { self.get_unchecked_mut(index as usize) }
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, sq: Square) -> &Self::Output {
        &self.piece_list[sq]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_and_mirror() {
        assert_eq!(A1.flip(), A8);
        assert_eq!(A1.mirror(), H1);
        assert_eq!(E4.flip().flip(), E4);
    }

    #[test]
    fn parses_names() {
        assert_eq!("e4".parse::<Square>().unwrap(), E4);
        assert_eq!(E4.to_string(), "e4");
    }

    #[test]
    fn relative_rank_flips_for_black() {
        assert_eq!(A2.relative_rank::<true>(), 1);
        assert_eq!(A2.relative_rank::<false>(), 6);
    }
}
