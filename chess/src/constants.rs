//! Board-wide bitboard constants: files, ranks, and square colors.

use crate::bitboard::Bitboard;

pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const RANK_1: u64 = 0x0000_0000_0000_00FF;

#[rustfmt::skip]
pub const FILES: [Bitboard; 8] = [
    Bitboard(FILE_A),
    Bitboard(FILE_A << 1),
    Bitboard(FILE_A << 2),
    Bitboard(FILE_A << 3),
    Bitboard(FILE_A << 4),
    Bitboard(FILE_A << 5),
    Bitboard(FILE_A << 6),
    Bitboard(FILE_A << 7),
];

#[rustfmt::skip]
pub const RANKS: [Bitboard; 8] = [
    Bitboard(RANK_1),
    Bitboard(RANK_1 << 8),
    Bitboard(RANK_1 << 16),
    Bitboard(RANK_1 << 24),
    Bitboard(RANK_1 << 32),
    Bitboard(RANK_1 << 40),
    Bitboard(RANK_1 << 48),
    Bitboard(RANK_1 << 56),
];

pub const LIGHT_SQUARES: Bitboard = Bitboard(0x55AA_55AA_55AA_55AA);
pub const DARK_SQUARES: Bitboard = Bitboard(0xAA55_AA55_AA55_AA55);
