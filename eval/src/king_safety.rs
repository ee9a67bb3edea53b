//! King safety: a weighted-attacker count run through a quadratic damping
//! curve, plus per-piece-kind safe check detection.
//!
//! Shelter and storm (the pawn-shape half of king safety) live in
//! `pawn_king` instead, since they depend only on pawns and kings and are
//! exactly what the pawn-king cache memoizes. This module is the part that
//! needs every other piece's attack bitboards, so it always runs.

use chessboard::{Board, Color, Color::*, PieceType};

use crate::context::EvalContext;
use crate::score::S;
use crate::trace::{EvalTrace, Tracer};

/// Net king-safety contribution to the white-perspective total: White's own
/// subtotal (always `<= 0`, since this term is purely a penalty) minus
/// Black's.
pub fn evaluate(board: &Board, ctx: &EvalContext, trace: &mut impl Tracer<EvalTrace>) -> S {
    danger_against::<true>(board, ctx, trace) - danger_against::<false>(board, ctx, trace)
}

/// This side's own subtotal for the term: a non-positive penalty charged
/// against `WHITE`'s king, computed from everything `them` (the opposite
/// color) threatens it with.
fn danger_against<const WHITE: bool>(board: &Board, ctx: &EvalContext, trace: &mut impl Tracer<EvalTrace>) -> S {
    let us = if WHITE { White } else { Black };
    let them = !us;
    let perspective = if WHITE { 1 } else { -1 };

    let them_has_queen = !board.queens(them).is_empty();
    let threshold = if them_has_queen { 0 } else { 1 };
    if ctx.king_attackers_count[them] <= threshold {
        return S::default();
    }

    let king_sq = board.kings(us).first();
    let blockers = board.all_occupied();
    let zone = ctx.king_zones[us];
    let zone_count = zone.count().max(1) as i32;

    let weak = ctx.attacked[them]
        & !ctx.attacked_twice[us]
        & (!ctx.attacked[us] | ctx.attacked_by(us, PieceType::Queen) | ctx.attacked_by(us, PieceType::King));

    let safe = !board.occupied_by(them) & (!ctx.attacked[us] | (weak & ctx.attacked_twice[them]));

    let knight_checks = king_sq.knight_squares() & safe & ctx.attacked_by(them, PieceType::Knight);
    let bishop_checks = king_sq.bishop_squares(blockers) & safe & ctx.attacked_by(them, PieceType::Bishop);
    let rook_checks = king_sq.rook_squares(blockers) & safe & ctx.attacked_by(them, PieceType::Rook);
    let queen_checks = king_sq.queen_squares(blockers) & safe & ctx.attacked_by(them, PieceType::Queen);

    // scaledAttackCounts = 9.0 * kingAttacksCount[them] / popcount(kingAreas[us]),
    // folded into the 44x term as fixed-point instead of a float round-trip.
    let scaled_attacks_term = 44 * 9 * ctx.king_attacks_count[them] / zone_count;

    let count = ctx.king_attackers_count[them] * ctx.king_attackers_weight[them]
        + scaled_attacks_term
        + 38 * (weak & zone).count() as i32
        - 22 * (board.pawns(us) & zone & !weak).count() as i32
        - 276 * i32::from(!them_has_queen)
        + 95 * queen_checks.count() as i32
        + 94 * rook_checks.count() as i32
        + 51 * bishop_checks.count() as i32
        + 123 * knight_checks.count() as i32
        - 18;

    trace.add(|t| t.king_danger_count += count * perspective);

    if count <= 0 {
        return S::default();
    }

    let penalty = S::new((count * count / 720) as i16, (count / 20) as i16);
    -penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::NullTracer;
    use std::str::FromStr;

    #[test]
    fn quiet_position_has_no_king_danger() {
        let board = Board::default();
        let mut ctx = EvalContext::new(&board);
        let pk = crate::pawn_king::PawnKingStructure::new(&board, &mut NullTracer);
        crate::pieces::evaluate(&board, &pk, &mut ctx, &mut NullTracer);

        let score = evaluate(&board, &ctx, &mut NullTracer);
        assert_eq!(score, S::default());
    }

    #[test]
    fn massed_attackers_near_an_exposed_king_trigger_a_penalty() {
        let board = Board::from_str("4k2r/8/3b4/8/8/7q/8/6K1 w - - 0 1").unwrap();
        let mut ctx = EvalContext::new(&board);
        let pk = crate::pawn_king::PawnKingStructure::new(&board, &mut NullTracer);
        crate::pieces::evaluate(&board, &pk, &mut ctx, &mut NullTracer);
        let score = evaluate(&board, &ctx, &mut NullTracer);
        // White's king is swarmed while black's sits safe behind its own
        // pawnless back rank, so the net king-safety term should favor black.
        assert!(score.mg() < 0);
    }
}
