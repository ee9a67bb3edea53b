//! Static position evaluation.
//!
//! `evaluate` is the only entry point a caller (a search routine, a UCI
//! `eval` command, a tuner) needs. Everything else in this crate is the
//! pipeline that feeds it, run in a fixed order because each stage reads
//! bitboards the previous one built:
//!
//! 1. `context` seeds king zones and mobility areas from the raw board.
//! 2. `pawn_king` scores pawn structure and king shelter/storm — cacheable,
//!    since it only ever depends on pawns and king squares (`kp_cache`).
//! 3. `pieces` walks every knight/bishop/rook/queen, filling in the attack
//!    bitboards `context` left empty and tallying king-danger inputs.
//! 4. `king_safety` and `threats` turn those attack bitboards into the
//!    terms that need every piece's attacks at once.
//! 5. `tapering` blends the accumulated midgame/endgame score by game
//!    phase into a single side-to-move-relative centipawn value.

mod context;
mod king_safety;
mod kp_cache;
mod params;
mod pawn_king;
mod pieces;
mod psqt;
mod score;
mod tapering;
mod threats;
mod trace;

pub use context::EvalContext;
pub use kp_cache::PawnKingCache;
pub use pawn_king::PawnKingStructure;
pub use score::{Centipawns, S};
pub use trace::{EvalTrace, NullTracer, Tracer};

use chessboard::{Board, Color::*, PieceType};

/// Evaluate `board` from the perspective of the side to move, in
/// centipawns (~100 per pawn of middlegame advantage). Pass `cache` to
/// memoize the pawn-king term across repeated pawn skeletons; pass `None`
/// to force full recomputation every call.
pub fn evaluate(board: &Board, cache: Option<&mut PawnKingCache>) -> Centipawns {
    let mut tracer = NullTracer;
    let pk = match cache {
        Some(cache) => cache.get_or_compute(board, &mut tracer),
        None => PawnKingStructure::new(board, &mut tracer),
    };

    run_pipeline(board, pk, &mut tracer)
}

/// Same pipeline, but every term also reports its activation into `trace`
/// — used by the tuner, never by the search's hot path. Not compatible
/// with the pawn-king cache: a hit would silently skip every C4 term's
/// activation.
pub fn evaluate_traced(board: &Board, trace: &mut EvalTrace) -> Centipawns {
    let pk = PawnKingStructure::new(board, trace);
    run_pipeline(board, pk, trace)
}

fn run_pipeline(board: &Board, pk: PawnKingStructure, trace: &mut impl Tracer<EvalTrace>) -> Centipawns {
    let mut acc = material_and_psqt(board, trace) + pk.score;

    let mut ctx = EvalContext::new(board);
    acc += pieces::evaluate(board, &pk, &mut ctx, trace);
    acc += king_safety::evaluate(board, &ctx, trace);
    acc += threats::evaluate(board, &pk, &ctx, trace);

    tapering::taper(board, acc, trace)
}

/// Material plus piece-square tables: the flat per-piece sum every other
/// term in this crate only ever adjusts.
fn material_and_psqt(board: &Board, trace: &mut impl Tracer<EvalTrace>) -> S {
    use params::PARAMS;

    let mut total = S::default();

    for (ptype, table) in [
        (PieceType::Pawn, &PARAMS.pawn_psqt),
        (PieceType::Knight, &PARAMS.knight_psqt),
        (PieceType::Bishop, &PARAMS.bishop_psqt),
        (PieceType::Rook, &PARAMS.rook_psqt),
        (PieceType::Queen, &PARAMS.queen_psqt),
        (PieceType::King, &PARAMS.king_psqt),
    ] {
        let value = PARAMS.piece_values[ptype as usize];

        for sq in board.get_bb(ptype, White) {
            total += value + psqt::lookup::<true>(table, sq);
            let idx = psqt::index::<true>(sq);
            trace.add(|t| {
                t.piece_values[ptype as usize] += 1;
                psqt_trace_mut(t, ptype)[idx] += 1;
            });
        }
        for sq in board.get_bb(ptype, Black) {
            total -= value + psqt::lookup::<false>(table, sq);
            let idx = psqt::index::<false>(sq);
            trace.add(|t| {
                t.piece_values[ptype as usize] -= 1;
                psqt_trace_mut(t, ptype)[idx] -= 1;
            });
        }
    }

    total
}

/// The trace field backing a given piece type's PSQT, picked out so
/// `material_and_psqt` can record an activation without a six-way
/// `match` at every call site.
fn psqt_trace_mut(trace: &mut EvalTrace, ptype: PieceType) -> &mut [i32; 32] {
    match ptype {
        PieceType::Pawn => &mut trace.pawn_psqt,
        PieceType::Knight => &mut trace.knight_psqt,
        PieceType::Bishop => &mut trace.bishop_psqt,
        PieceType::Rook => &mut trace.rook_psqt,
        PieceType::Queen => &mut trace.queen_psqt,
        PieceType::King => &mut trace.king_psqt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn startpos_is_a_small_tempo_edge_for_white() {
        let board = Board::default();
        let score = evaluate(&board, None);
        assert!(score > 0 && score < 50);
    }

    #[test]
    fn evaluation_is_antisymmetric_under_mirroring() {
        let board = Board::from_str("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
        let mirrored = board.mirror();

        assert_eq!(evaluate(&board, None), evaluate(&mirrored, None));
    }

    #[test]
    fn a_lone_extra_queen_is_worth_a_large_advantage() {
        let board = Board::from_str("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let score = evaluate(&board, None);
        assert!(score > 800);
    }

    #[test]
    fn pawn_king_cache_does_not_change_the_result() {
        let board = Board::from_str("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
        let mut cache = PawnKingCache::with_capacity_mb(1);

        let uncached = evaluate(&board, None);
        let cached_first = evaluate(&board, Some(&mut cache));
        let cached_second = evaluate(&board, Some(&mut cache));

        assert_eq!(uncached, cached_first);
        assert_eq!(cached_first, cached_second);
    }

    #[test]
    fn evaluate_is_deterministic() {
        let board = Board::default();
        assert_eq!(evaluate(&board, None), evaluate(&board, None));
    }
}
