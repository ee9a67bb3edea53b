//! Knight, bishop, rook and queen evaluation: mobility, outposts, file
//! control, and the king-danger tally that `king_safety.rs` later turns
//! into a score.

use chessboard::{Bitboard, Board, Color, Color::*, PieceType};

use crate::context::EvalContext;
use crate::pawn_king::PawnKingStructure;
use crate::params::{KS_ATTACK_WEIGHT, PARAMS};
use crate::score::S;
use crate::trace::{EvalTrace, Tracer};

pub fn evaluate(
    board: &Board,
    pk: &PawnKingStructure,
    ctx: &mut EvalContext,
    trace: &mut impl Tracer<EvalTrace>,
) -> S {
    // Pawn attacks seed the attacked-by tables before any piece mobility
    // is computed, since a square defended by a pawn is never "safe"
    // mobility for the opponent.
    ctx.record_attacks(White, PieceType::Pawn, board.pawn_attacks(White));
    ctx.record_attacks(Black, PieceType::Pawn, board.pawn_attacks(Black));

    evaluate_side::<true>(board, pk, ctx, trace) - evaluate_side::<false>(board, pk, ctx, trace)
}

fn evaluate_side<const WHITE: bool>(
    board: &Board,
    pk: &PawnKingStructure,
    ctx: &mut EvalContext,
    trace: &mut impl Tracer<EvalTrace>,
) -> S {
    let us = if WHITE { White } else { Black };
    let perspective = if WHITE { 1 } else { -1 };
    let blockers = board.all_occupied();
    let mut total = S::default();

    if board.bishops(us).count() >= 2 {
        total += PARAMS.bishop_pair;
        trace.add(|t| t.bishop_pair += perspective);
    }

    for sq in board.knights(us) {
        let attacks = sq.knight_squares();
        ctx.record_attacks(us, PieceType::Knight, attacks);

        let mobility = (attacks & ctx.mobility_area[us]).count() as usize;
        total += PARAMS.knight_mobility[mobility];
        trace.add(|t| t.knight_mobility[mobility] += perspective);

        if pk.outposts(us).contains(sq) {
            let defended = board.pawn_attacks(us).contains(sq) as usize;
            total += PARAMS.knight_outpost[defended];
            trace.add(|t| t.knight_outpost[defended] += perspective);
        }

        if let Some(front) = sq.forward(us) {
            if board.pawns(us).contains(front) {
                total += PARAMS.behind_pawn;
                trace.add(|t| t.behind_pawn += perspective);
            }
        }

        accumulate_king_danger::<WHITE>(ctx, us, PieceType::Knight, attacks);
    }

    for sq in board.bishops(us) {
        let attacks = sq.bishop_squares(blockers);
        ctx.record_attacks(us, PieceType::Bishop, attacks);

        let mobility = (attacks & ctx.mobility_area[us]).count() as usize;
        total += PARAMS.bishop_mobility[mobility];
        trace.add(|t| t.bishop_mobility[mobility] += perspective);

        if pk.outposts(us).contains(sq) {
            let defended = board.pawn_attacks(us).contains(sq) as usize;
            total += PARAMS.bishop_outpost[defended];
            trace.add(|t| t.bishop_outpost[defended] += perspective);
        }

        if let Some(front) = sq.forward(us) {
            if board.pawns(us).contains(front) {
                total += PARAMS.behind_pawn;
                trace.add(|t| t.behind_pawn += perspective);
            }
        }

        let rammed_pawns = (same_color_complex(sq) & ctx.rammed_pawns[us]).count() as i32;
        total += PARAMS.bishop_rammed_pawn * rammed_pawns;
        trace.add(|t| t.bishop_rammed_pawn += rammed_pawns * perspective);

        accumulate_king_danger::<WHITE>(ctx, us, PieceType::Bishop, attacks);
    }

    for sq in board.rooks(us) {
        let attacks = sq.rook_squares(blockers);
        ctx.record_attacks(us, PieceType::Rook, attacks);

        let mobility = (attacks & ctx.mobility_area[us]).count() as usize;
        total += PARAMS.rook_mobility[mobility];
        trace.add(|t| t.rook_mobility[mobility] += perspective);

        let file = chessboard::constants::FILES[sq.file()];
        if !(file & pk.open_files()).is_empty() {
            total += PARAMS.rook_open_file;
            trace.add(|t| t.rook_open_file += perspective);
        } else if !(file & pk.semi_open_files(us)).is_empty() {
            total += PARAMS.rook_semiopen_file;
            trace.add(|t| t.rook_semiopen_file += perspective);
        }

        let enemy_king = board.kings(!us).first();
        if sq.relative_rank::<WHITE>() == 6 && enemy_king.relative_rank::<WHITE>() == 7 {
            total += PARAMS.rook_on_seventh;
            trace.add(|t| t.rook_on_seventh += perspective);
        }

        accumulate_king_danger::<WHITE>(ctx, us, PieceType::Rook, attacks);
    }

    for sq in board.queens(us) {
        let attacks = sq.queen_squares(blockers);
        ctx.record_attacks(us, PieceType::Queen, attacks);

        let mobility = (attacks & ctx.mobility_area[us]).count() as usize;
        total += PARAMS.queen_mobility[mobility];
        trace.add(|t| t.queen_mobility[mobility] += perspective);

        let file = chessboard::constants::FILES[sq.file()];
        if !(file & pk.open_files()).is_empty() {
            total += PARAMS.queen_open_file;
            trace.add(|t| t.queen_open_file += perspective);
        } else if !(file & pk.semi_open_files(us)).is_empty() {
            total += PARAMS.queen_semiopen_file;
            trace.add(|t| t.queen_semiopen_file += perspective);
        }

        accumulate_king_danger::<WHITE>(ctx, us, PieceType::Queen, attacks);
    }

    // The king itself doesn't get a mobility bonus, but its attacks still
    // count for the "attacked twice" bookkeeping threats rely on.
    let king_sq = board.kings(us).first();
    ctx.record_attacks(us, PieceType::King, king_sq.king_squares());

    total
}

fn same_color_complex(sq: chessboard::Square) -> Bitboard {
    use chessboard::constants::{DARK_SQUARES, LIGHT_SQUARES};

    if LIGHT_SQUARES.contains(sq) {
        LIGHT_SQUARES
    } else {
        DARK_SQUARES
    }
}

/// Add this piece's contribution to the enemy king's danger tally, if it
/// sees into the enemy king zone at all.
fn accumulate_king_danger<const WHITE: bool>(
    ctx: &mut EvalContext,
    us: Color,
    ptype: PieceType,
    attacks: Bitboard,
) {
    let them = !us;
    let seen = attacks & ctx.king_zones[them];

    if seen.is_empty() {
        return;
    }

    ctx.king_attacks_count[us] += seen.count() as i32;
    ctx.king_attackers_count[us] += 1;
    ctx.king_attackers_weight[us] += KS_ATTACK_WEIGHT[ptype as usize];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::NullTracer;
    use std::str::FromStr;

    #[test]
    fn bishop_pair_bonus_only_applies_with_two_bishops() {
        let with_pair = Board::from_str("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1").unwrap();
        let without_pair = Board::from_str("4k3/8/8/8/8/8/8/3BK3 w - - 0 1").unwrap();

        let pk_with = PawnKingStructure::new(&with_pair, &mut NullTracer);
        let pk_without = PawnKingStructure::new(&without_pair, &mut NullTracer);

        let mut ctx_with = EvalContext::new(&with_pair);
        let mut ctx_without = EvalContext::new(&without_pair);

        let with_score = evaluate(&with_pair, &pk_with, &mut ctx_with, &mut NullTracer);
        let without_score = evaluate(&without_pair, &pk_without, &mut ctx_without, &mut NullTracer);

        assert!(with_score.mg() > without_score.mg());
    }

    #[test]
    fn rook_on_open_file_beats_rook_on_closed_file() {
        let open = Board::from_str("4k3/8/8/8/8/8/8/3RK3 w - - 0 1").unwrap();
        let closed = Board::from_str("4k3/8/8/8/3p4/8/3P4/3RK3 w - - 0 1").unwrap();

        let pk_open = PawnKingStructure::new(&open, &mut NullTracer);
        let pk_closed = PawnKingStructure::new(&closed, &mut NullTracer);

        let mut ctx_open = EvalContext::new(&open);
        let mut ctx_closed = EvalContext::new(&closed);

        let open_score = evaluate(&open, &pk_open, &mut ctx_open, &mut NullTracer);
        let closed_score = evaluate(&closed, &pk_closed, &mut ctx_closed, &mut NullTracer);

        assert!(open_score.mg() > closed_score.mg());
    }

    #[test]
    fn rook_on_seventh_only_scores_with_the_enemy_king_trapped_on_its_back_rank() {
        // Rook and both kings kept off each other's files/ranks so mobility
        // and open-file terms are identical between the two boards; only
        // the enemy king's rank differs.
        let trapped = Board::from_str("7k/R7/8/8/8/8/8/7K w - - 0 1").unwrap();
        let escaped = Board::from_str("8/R7/7k/8/8/8/8/7K w - - 0 1").unwrap();

        let pk_trapped = PawnKingStructure::new(&trapped, &mut NullTracer);
        let pk_escaped = PawnKingStructure::new(&escaped, &mut NullTracer);

        let mut ctx_trapped = EvalContext::new(&trapped);
        let mut ctx_escaped = EvalContext::new(&escaped);

        let trapped_score = evaluate(&trapped, &pk_trapped, &mut ctx_trapped, &mut NullTracer);
        let escaped_score = evaluate(&escaped, &pk_escaped, &mut ctx_escaped, &mut NullTracer);

        assert_eq!(trapped_score - escaped_score, PARAMS.rook_on_seventh);
    }
}
