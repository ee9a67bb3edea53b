//! Shared, per-evaluation scratch state.
//!
//! Several evaluation terms need the same intermediate bitboards (who
//! attacks what, which squares are defended twice, where the king zones
//! are) — `EvalContext` computes the ones that are cheap to get up front,
//! and collects the rest (per-piece attack bitboards) as the piece
//! evaluators in `pieces.rs` run, so threats and king safety can reuse
//! them instead of recomputing attacks from scratch.

use chessboard::{Bitboard, Board, Color, Color::*, PieceType};

pub struct EvalContext {
    /// King + the 8 surrounding squares, per side.
    pub king_zones: [Bitboard; 2],

    /// Squares mobility counts may be taken over: excludes squares
    /// defended by an enemy pawn and squares occupied by our own king or
    /// blocked pawns.
    pub mobility_area: [Bitboard; 2],

    /// Own pawns blocked head-on by an enemy pawn specifically, used for
    /// the bishop's rammed-pawn penalty.
    pub rammed_pawns: [Bitboard; 2],

    /// Accumulated attack bitboard per side, per piece type, filled in as
    /// `pieces::evaluate` visits each piece.
    pub attacked_by: [[Bitboard; PieceType::COUNT]; 2],

    /// Union of every square a side attacks at all.
    pub attacked: [Bitboard; 2],

    /// Squares attacked by two or more of a side's pieces at once.
    pub attacked_twice: [Bitboard; 2],

    /// Running sum of `KS_ATTACK_WEIGHT` for every enemy piece that sees
    /// into this side's king zone, how many distinct attackers that was,
    /// and the total popcount of king-zone squares seen across all of
    /// them. Filled in by `pieces::evaluate`, consumed by `king_safety`.
    pub king_attackers_weight: [i32; 2],
    pub king_attackers_count: [i32; 2],
    pub king_attacks_count: [i32; 2],
}

impl EvalContext {
    pub fn new(board: &Board) -> Self {
        let white_king = board.kings(White).first();
        let black_king = board.kings(Black).first();

        let king_zones = [king_zone::<true>(white_king), king_zone::<false>(black_king)];

        // Rammed: blocked head-on by an enemy pawn specifically. Blocked:
        // blocked by any piece at all, own or enemy — the wider set that
        // mobility areas exclude.
        let rammed_pawns =
            [board.pawns(White) & board.pawns(Black).backward::<true>(), board.pawns(Black) & board.pawns(White).backward::<false>()];

        let white_blocked_pawns = board.pawns(White) & board.all_occupied().backward::<true>();
        let black_blocked_pawns = board.pawns(Black) & board.all_occupied().backward::<false>();

        let mobility_area = [
            !(board.pawn_attacks(Black) | board.kings(White) | white_blocked_pawns),
            !(board.pawn_attacks(White) | board.kings(Black) | black_blocked_pawns),
        ];

        Self {
            king_zones,
            mobility_area,
            rammed_pawns,
            attacked_by: [[Bitboard::EMPTY; PieceType::COUNT]; 2],
            attacked: [Bitboard::EMPTY; 2],
            attacked_twice: [Bitboard::EMPTY; 2],
            king_attackers_weight: [0, 0],
            king_attackers_count: [0, 0],
            king_attacks_count: [0, 0],
        }
    }

    /// Record that `side` attacks `targets` with a piece of type `ptype`,
    /// updating every derived bitboard that depends on it.
    pub fn record_attacks(&mut self, side: Color, ptype: PieceType, targets: Bitboard) {
        self.attacked_twice[side] |= self.attacked[side] & targets;
        self.attacked[side] |= targets;
        self.attacked_by[side][ptype] |= targets;
    }

    pub fn attacked_by(&self, side: Color, ptype: PieceType) -> Bitboard {
        self.attacked_by[side][ptype]
    }
}

/// The king's 3x3 neighborhood, shifted one rank toward enemy territory
/// when the king sits on its own back rank, so shelter squares one rank
/// further up are still part of the zone.
fn king_zone<const WHITE: bool>(king_sq: chessboard::Square) -> Bitboard {
    let mut zone = king_sq.king_squares() | Bitboard::from(king_sq);
    if king_sq.relative_rank::<WHITE>() == 0 {
        zone |= zone.forward_by::<WHITE>(1);
    }
    zone
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn mobility_area_excludes_own_king_square() {
        let board = Board::from_str("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let ctx = EvalContext::new(&board);
        assert!(!ctx.mobility_area[White].contains(board.kings(White).first()));
    }

    #[test]
    fn king_zone_extends_a_rank_further_when_king_is_on_the_back_rank() {
        let board = Board::from_str("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let ctx = EvalContext::new(&board);
        assert!(ctx.king_zones[White].contains(chessboard::Square::E3));
        assert!(!ctx.king_zones[White].contains(chessboard::Square::E4));
    }

    #[test]
    fn record_attacks_tracks_overlap() {
        let board = Board::default();
        let mut ctx = EvalContext::new(&board);
        let a: Bitboard = [chessboard::Square::D4].into_iter().collect();
        let b: Bitboard = [chessboard::Square::D4, chessboard::Square::E4].into_iter().collect();

        ctx.record_attacks(White, PieceType::Knight, a);
        ctx.record_attacks(White, PieceType::Bishop, b);

        assert!(ctx.attacked_twice[White].contains(chessboard::Square::D4));
        assert!(!ctx.attacked_twice[White].contains(chessboard::Square::E4));
    }
}
