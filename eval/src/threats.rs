//! Passed-pawn scoring and threats (C7).
//!
//! Both terms need every other piece's attack bitboards, which `pieces.rs`
//! only finishes populating once it has visited every piece on the board —
//! that's why they run here instead of folding into `pawn_king`, which only
//! ever sees pawns and kings.

use chessboard::{Board, Color::*, PieceType};

use crate::context::EvalContext;
use crate::params::PARAMS;
use crate::pawn_king::{passed_pawn_mask, PawnKingStructure};
use crate::score::S;
use crate::trace::{EvalTrace, Tracer};

pub fn evaluate(
    board: &Board,
    pk: &PawnKingStructure,
    ctx: &EvalContext,
    trace: &mut impl Tracer<EvalTrace>,
) -> S {
    evaluate_side::<true>(board, pk, ctx, trace) - evaluate_side::<false>(board, pk, ctx, trace)
}

fn evaluate_side<const WHITE: bool>(
    board: &Board,
    pk: &PawnKingStructure,
    ctx: &EvalContext,
    trace: &mut impl Tracer<EvalTrace>,
) -> S {
    passed_pawns::<WHITE>(board, pk, ctx, trace) + threats::<WHITE>(board, ctx, trace)
}

/// Rank, freedom of the path ahead, and the king race to the promotion
/// square. The bitboard of which squares hold a passer was already worked
/// out in `pawn_king`; this is just scoring it.
fn passed_pawns<const WHITE: bool>(
    board: &Board,
    pk: &PawnKingStructure,
    ctx: &EvalContext,
    trace: &mut impl Tracer<EvalTrace>,
) -> S {
    use chessboard::constants::FILES;

    let us = if WHITE { White } else { Black };
    let them = !us;
    let perspective = if WHITE { 1 } else { -1 };
    let own_king = board.kings(us).first();
    let enemy_king = board.kings(them).first();
    let occupied = board.all_occupied();

    let mut total = S::default();

    for sq in pk.passed_pawns(us) {
        let rank = sq.relative_rank::<WHITE>();
        let ahead = sq.forward(us);

        let can_advance = ahead.is_some_and(|a| !occupied.contains(a));
        let safe_advance = ahead.is_some_and(|a| !ctx.attacked[them].contains(a));

        total += PARAMS.passed_pawn[can_advance as usize][safe_advance as usize][rank];
        trace.add(|t| t.passed_pawn[can_advance as usize][safe_advance as usize][rank] += perspective);

        let friendly_dist = sq.max_dist(own_king) as i32;
        total += PARAMS.passers_friendly_king[rank] * friendly_dist;
        trace.add(|t| t.passers_friendly_king[rank] += friendly_dist * perspective);

        let enemy_dist = sq.max_dist(enemy_king) as i32;
        total += PARAMS.passers_enemy_king[rank] * enemy_dist;
        trace.add(|t| t.passers_enemy_king[rank] += enemy_dist * perspective);

        // passed_pawn_mask spans the pawn's file and both neighbors; ANDing
        // back with its own file leaves just the file ahead of it.
        let file_ahead = passed_pawn_mask::<WHITE>(sq) & FILES[sq.file()];
        if (file_ahead & ctx.attacked[them]).is_empty() {
            total += PARAMS.passed_safe_promotion_path;
            trace.add(|t| t.passed_safe_promotion_path += perspective);
        }
    }

    total
}

/// Pieces worth less than what attacks them, and the pawn pushes that
/// would create one next move.
fn threats<const WHITE: bool>(board: &Board, ctx: &EvalContext, trace: &mut impl Tracer<EvalTrace>) -> S {
    use chessboard::constants::RANKS;

    let us = if WHITE { White } else { Black };
    let them = !us;
    let perspective = if WHITE { 1 } else { -1 };

    let non_pawn_enemies = board.occupied_by(them) & !board.pawns(them);
    let minors = board.knights(them) | board.bishops(them);

    // Attacked by us and not defended at all, or attacked twice by us
    // without a matching double-defense or pawn cover from them.
    let poorly_defended = (ctx.attacked[us] & !ctx.attacked[them])
        | (ctx.attacked_twice[us] & !ctx.attacked_twice[them] & !ctx.attacked_by(them, PieceType::Pawn));

    // Carrying both an attacker and a defender, each exactly once: the
    // defender can't recapture without giving up whatever else it guards.
    let overloaded = non_pawn_enemies
        & ctx.attacked[us]
        & !ctx.attacked_twice[us]
        & ctx.attacked[them]
        & !ctx.attacked_twice[them];

    let mut total = S::default();

    let weak_pawns = (board.pawns(them) & poorly_defended).count() as i32;
    total += PARAMS.threat_weak_pawn * weak_pawns;
    trace.add(|t| t.threat_weak_pawn += weak_pawns * perspective);

    let minor_by_pawn = (minors & ctx.attacked_by(us, PieceType::Pawn)).count() as i32;
    total += PARAMS.threat_minor_by_pawn * minor_by_pawn;
    trace.add(|t| t.threat_minor_by_pawn += minor_by_pawn * perspective);

    let minor_by_minor =
        (minors & (ctx.attacked_by(us, PieceType::Knight) | ctx.attacked_by(us, PieceType::Bishop))).count() as i32;
    total += PARAMS.threat_minor_by_minor * minor_by_minor;
    trace.add(|t| t.threat_minor_by_minor += minor_by_minor * perspective);

    let minor_by_major =
        (minors & (ctx.attacked_by(us, PieceType::Rook) | ctx.attacked_by(us, PieceType::Queen))).count() as i32;
    total += PARAMS.threat_minor_by_major * minor_by_major;
    trace.add(|t| t.threat_minor_by_major += minor_by_major * perspective);

    let lesser_attacks = ctx.attacked_by(us, PieceType::Pawn)
        | ctx.attacked_by(us, PieceType::Knight)
        | ctx.attacked_by(us, PieceType::Bishop);
    let rook_by_lesser = (board.rooks(them) & lesser_attacks).count() as i32;
    total += PARAMS.threat_rook_by_lesser * rook_by_lesser;
    trace.add(|t| t.threat_rook_by_lesser += rook_by_lesser * perspective);

    let queen_by_one = (board.queens(them) & ctx.attacked[us]).count() as i32;
    total += PARAMS.threat_queen_by_one * queen_by_one;
    trace.add(|t| t.threat_queen_by_one += queen_by_one * perspective);

    let overload_count = overloaded.count() as i32;
    total += PARAMS.threat_overloaded * overload_count;
    trace.add(|t| t.threat_overloaded += overload_count * perspective);

    // Two-ply pawn push span: squares our pawns could reach next move (or
    // the move after, from their start square) without walking into an
    // attack, intersected with what pushing there would newly threaten.
    let empty = !board.all_occupied();
    let start_rank = if WHITE { RANKS[1] } else { RANKS[6] };
    let single_push = board.pawns(us).forward_by::<WHITE>(1) & empty;
    let double_push = ((board.pawns(us) & start_rank).forward_by::<WHITE>(1) & empty).forward_by::<WHITE>(1) & empty;
    let push_span = (single_push | double_push) & !ctx.attacked[them];
    let push_attacks = push_span.forward_left::<WHITE>() | push_span.forward_right::<WHITE>();
    let pawn_push = (push_attacks & non_pawn_enemies).count() as i32;
    total += PARAMS.threat_pawn_push * pawn_push;
    trace.add(|t| t.threat_pawn_push += pawn_push * perspective);

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pawn_king::PawnKingStructure;
    use crate::trace::NullTracer;
    use std::str::FromStr;

    fn eval(fen: &str) -> S {
        let board = Board::from_str(fen).unwrap();
        let pk = PawnKingStructure::new(&board, &mut NullTracer);
        let mut ctx = EvalContext::new(&board);
        crate::pieces::evaluate(&board, &pk, &mut ctx, &mut NullTracer);
        evaluate(&board, &pk, &ctx, &mut NullTracer)
    }

    #[test]
    fn a_hanging_knight_attacked_by_a_pawn_is_a_threat() {
        let hanging = eval("4k3/8/8/4n3/3P4/8/8/4K3 w - - 0 1");
        let safe = eval("4k3/8/8/6n1/3P4/8/8/4K3 w - - 0 1");
        assert!(hanging.mg() > safe.mg());
    }

    #[test]
    fn a_passed_pawn_on_the_sixth_outscores_one_on_the_fourth() {
        let advanced = eval("4k3/8/4P3/8/8/8/8/4K3 w - - 0 1");
        let rear = eval("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1");
        assert!(advanced.mg() > rear.mg() || advanced.eg() > rear.eg());
    }

    #[test]
    fn quiet_position_has_no_threats_or_passers() {
        let board = Board::default();
        let pk = PawnKingStructure::new(&board, &mut NullTracer);
        let mut ctx = EvalContext::new(&board);
        crate::pieces::evaluate(&board, &pk, &mut ctx, &mut NullTracer);
        let score = evaluate(&board, &pk, &ctx, &mut NullTracer);
        assert_eq!(score, S::default());
    }
}
