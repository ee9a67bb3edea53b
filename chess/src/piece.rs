//! Pieces, piece types, and colors.

use anyhow::anyhow;
use std::{
    fmt::Display,
    ops::{Index, IndexMut, Not},
    str::FromStr,
};
use Color::*;
use Piece::*;
use PieceType::*;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Piece {
    WP, BP, WN, BN, WB, BB, WR, BR, WQ, BQ, WK, BK,
}

impl Piece {
    pub const COUNT: usize = 12;

    pub fn new(ptype: PieceType, color: Color) -> Self {
        match (color, ptype) {
            (White, Pawn) => WP,
            (White, Knight) => WN,
            (White, Bishop) => WB,
            (White, Rook) => WR,
            (White, Queen) => WQ,
            (White, King) => WK,
            (Black, Pawn) => BP,
            (Black, Knight) => BN,
            (Black, Bishop) => BB,
            (Black, Rook) => BR,
            (Black, Queen) => BQ,
            (Black, King) => BK,
        }
    }

    /// White/Black pieces are interleaved in the enum, so the color falls
    /// straight out of the low bit.
    pub fn color(self) -> Color {
        if (self as usize) & 1 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn piece_type(self) -> PieceType {
        match self {
            WP | BP => Pawn,
            WN | BN => Knight,
            WB | BB => Bishop,
            WR | BR => Rook,
            WQ | BQ => Queen,
            WK | BK => King,
        }
    }

    pub fn is_pawn(&self) -> bool {
        self.piece_type() == Pawn
    }

    pub fn is_bishop(&self) -> bool {
        self.piece_type() == Bishop
    }

    pub fn is_king(&self) -> bool {
        self.piece_type() == King
    }

    pub fn mirror(self) -> Self {
        match self {
            WP => BP, WN => BN, WB => BB, WR => BR, WQ => BQ, WK => BK,
            BP => WP, BN => WN, BB => WB, BR => WR, BQ => WQ, BK => WK,
        }
    }
}

#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    pub const COUNT: usize = 6;
    pub const ALL: [Self; 6] = [Pawn, Knight, Bishop, Rook, Queen, King];
}

#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const COUNT: usize = 2;

    pub fn opp(self) -> Self {
        !self
    }

    pub fn is_white(self) -> bool {
        self == White
    }

    pub fn is_black(self) -> bool {
        self == Black
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match *self {
            WP => "P", WN => "N", WB => "B", WR => "R", WQ => "Q", WK => "K",
            BP => "p", BN => "n", BB => "b", BR => "r", BQ => "q", BK => "k",
        };
        write!(f, "{letter}")
    }
}

impl FromStr for Piece {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "P" => Ok(WP), "N" => Ok(WN), "B" => Ok(WB),
            "R" => Ok(WR), "Q" => Ok(WQ), "K" => Ok(WK),
            "p" => Ok(BP), "n" => Ok(BN), "b" => Ok(BB),
            "r" => Ok(BR), "q" => Ok(BQ), "k" => Ok(BK),
            _ => Err(anyhow!("'{s}' is not a valid piece letter")),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.is_white() { "w" } else { "b" })
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "w" => Ok(White),
            "b" => Ok(Black),
            _ => Err(anyhow!("'{s}' is not a valid side-to-move letter")),
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            White => Black,
            Black => White,
        }
    }
}

impl<T> Index<Color> for [T; 2] {
    type Output = T;

    fn index(&self, index: Color) -> &Self::Output {
        unsafe { self.get_unchecked(index as usize) }
    }
}

impl<T> IndexMut<Color> for [T; 2] {
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        unsafe { self.get_unchecked_mut(index as usize) }
    }
}

impl<T> Index<PieceType> for [T; 6] {
    type Output = T;

    fn index(&self, index: PieceType) -> &Self::Output {
        unsafe { self.get_unchecked(index as usize) }
    }
}

impl<T> IndexMut<PieceType> for [T; 6] {
    fn index_mut(&mut self, index: PieceType) -> &mut Self::Output {
        unsafe { self.get_unchecked_mut(index as usize) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_interleaving() {
        assert_eq!(WN.color(), White);
        assert_eq!(BQ.color(), Black);
    }

    #[test]
    fn mirror_swaps_color_keeps_type() {
        assert_eq!(WR.mirror(), BR);
        assert_eq!(WR.mirror().piece_type(), WR.piece_type());
    }

    #[test]
    fn round_trips_through_display() {
        for s in ["P", "n", "B", "r", "Q", "k"] {
            assert_eq!(Piece::from_str(s).unwrap().to_string(), s);
        }
    }
}
