//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! A FEN string packs the piece placement, side to move, castling rights,
//! en passant target, half-move clock and full-move counter into one line,
//! e.g. `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::castling::CastlingRights;
use crate::piece::{Color, Piece, PieceType};
use crate::square::Square;
use anyhow::anyhow;
use itertools::Itertools;
use std::str::FromStr;

impl Board {
    pub fn to_fen(&self) -> String {
        let mut rank_strs = Vec::with_capacity(8);

        for rank in self.piece_list.chunks(8).rev() {
            let mut elements = Vec::new();
            for run in &rank.iter().group_by(|p| p.is_some()) {
                match run {
                    (true, pieces) => {
                        for piece in pieces {
                            elements.push(piece.unwrap().to_string());
                        }
                    }
                    (false, gaps) => elements.push(gaps.count().to_string()),
                }
            }
            rank_strs.push(elements.join(""));
        }

        let pieces = rank_strs.join("/");
        let side = self.current;
        let castling = self.castling_rights;
        let en_passant = self.en_passant.map(|sq| sq.to_string()).unwrap_or_else(|| "-".into());

        format!("{pieces} {side} {castling} {en_passant} {} {}", self.half_moves, self.full_moves)
    }

    pub fn from_fen(fen: &str) -> anyhow::Result<Board> {
        let mut parts = fen.split_whitespace();

        let piece_string = parts.next().ok_or_else(|| anyhow!("empty FEN string"))?;

        let mut piece_bbs = [Bitboard::EMPTY; PieceType::COUNT];
        let mut occupied_squares = [Bitboard::EMPTY; Color::COUNT];
        let mut piece_list = [None; Square::COUNT];
        let mut square_idx: usize = 0;

        // FEN lists ranks 8 down to 1; our square indices go the other way.
        for rank in piece_string.split('/').rev() {
            for ch in rank.chars() {
                if let Some(gap) = ch.to_digit(10) {
                    square_idx += gap as usize;
                } else {
                    let piece = Piece::from_str(&ch.to_string())?;
                    let square = Square::from(square_idx);
                    let bb = Bitboard::from(square);

                    piece_list[square_idx] = Some(piece);
                    piece_bbs[piece.piece_type()] |= bb;
                    occupied_squares[piece.color()] |= bb;
                    square_idx += 1;
                }
            }
        }

        let current: Color = parts.next().ok_or_else(|| anyhow!("missing side to move"))?.parse()?;

        let castling_rights: CastlingRights =
            parts.next().ok_or_else(|| anyhow!("missing castling rights"))?.parse()?;

        let en_passant: Option<Square> =
            parts.next().ok_or_else(|| anyhow!("missing en passant field"))?.parse().ok();

        let half_moves: u8 = parts.next().unwrap_or("0").parse().unwrap_or(0);
        let full_moves: u16 = parts.next().unwrap_or("1").parse().unwrap_or(1);

        Ok(Board::new(
            piece_list,
            piece_bbs,
            occupied_squares,
            current,
            castling_rights,
            en_passant,
            half_moves,
            full_moves,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_the_starting_position() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(Board::from_str(fen).unwrap().to_fen(), fen);
    }

    #[test]
    fn round_trips_an_endgame_position() {
        let fen = "8/8/8/p3kPp1/6P1/4K3/8/8 w - - 0 1";
        assert_eq!(Board::from_str(fen).unwrap().to_fen(), fen);
    }
}
