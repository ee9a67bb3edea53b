//! Pawn structure and king shelter/storm.
//!
//! Bundled into one type because both halves depend only on pawns and
//! king squares — nothing else on the board — which is exactly what makes
//! them cacheable: the same pawn skeleton recurs constantly across a
//! search tree, so its score is worth memoizing (see `kp_cache`).
//!
//! Passed-pawn *scoring* is deliberately not here: whether a passer can
//! safely advance depends on every piece's attacks, not just pawns and
//! kings, so that part runs later in `threats`, once `EvalContext` is
//! fully populated. This module only marks which squares hold one.

use chessboard::{Bitboard, Board, Color, Color::*};

use crate::params::PARAMS;
use crate::psqt;
use crate::score::S;
use crate::trace::{EvalTrace, Tracer};

fn ranks_above(rank: usize) -> Bitboard {
    if rank >= 7 {
        Bitboard::EMPTY
    } else {
        Bitboard(!0u64 << ((rank + 1) * 8))
    }
}

fn ranks_below(rank: usize) -> Bitboard {
    if rank == 0 {
        Bitboard::EMPTY
    } else if rank >= 8 {
        Bitboard::ALL
    } else {
        Bitboard((1u64 << (rank * 8)) - 1)
    }
}

/// All squares on `sq`'s file and its two neighbors, strictly ahead of
/// `sq` from `WHITE`'s point of view. A pawn is passed when none of them
/// hold an enemy pawn.
pub(crate) fn passed_pawn_mask<const WHITE: bool>(sq: chessboard::Square) -> Bitboard {
    use chessboard::constants::FILES;

    let file = sq.file();
    let mut files = FILES[file];
    if file > 0 {
        files |= FILES[file - 1];
    }
    if file < 7 {
        files |= FILES[file + 1];
    }

    let ahead = if WHITE { ranks_above(sq.rank()) } else { ranks_below(sq.rank()) };
    files & ahead
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PawnKingStructure {
    pub score: S,
    pub passed_pawns: [Bitboard; 2],
    pub semi_open_files: [Bitboard; 2],
    pub outposts: [Bitboard; 2],
}

impl PawnKingStructure {
    pub fn new(board: &Board, trace: &mut impl Tracer<EvalTrace>) -> Self {
        use chessboard::constants::FILES;

        let white_pawns = board.pawns(White);
        let black_pawns = board.pawns(Black);
        let white_attacks = board.pawn_attacks(White);
        let black_attacks = board.pawn_attacks(Black);

        // A pawn is passed when no enemy pawn sits on its passed-pawn mask
        // (its own file and its two neighbors, ranks ahead) — these are
        // exactly the "stoppers" in the per-pawn classification below.
        let passed_pawns = [
            white_pawns.filter(|&p| (passed_pawn_mask::<true>(p) & black_pawns).is_empty()).collect(),
            black_pawns.filter(|&p| (passed_pawn_mask::<false>(p) & white_pawns).is_empty()).collect(),
        ];

        let semi_open_files = [
            FILES.iter().filter(|&&f| (f & white_pawns).is_empty()).collect(),
            FILES.iter().filter(|&&f| (f & black_pawns).is_empty()).collect(),
        ];

        // An outpost is a square on ranks 4-6 (relative) that no enemy
        // pawn can ever contest, now or after advancing up to two ranks.
        // Whether it's currently defended by one of our own pawns is a
        // separate question, decided later where the bonus is applied.
        let outpost_ranks = |white: bool| -> Bitboard {
            if white {
                chessboard::constants::RANKS[3] | chessboard::constants::RANKS[4] | chessboard::constants::RANKS[5]
            } else {
                chessboard::constants::RANKS[2] | chessboard::constants::RANKS[3] | chessboard::constants::RANKS[4]
            }
        };

        let outposts = [
            outpost_ranks(true) & !(black_attacks | black_attacks.forward_by::<false>(1) | black_attacks.forward_by::<false>(2)),
            outpost_ranks(false) & !(white_attacks | white_attacks.forward_by::<true>(1) | white_attacks.forward_by::<true>(2)),
        ];

        let mut structure = Self { score: S::default(), passed_pawns, semi_open_files, outposts };

        structure.score =
            structure.compute_score::<true>(board, trace) - structure.compute_score::<false>(board, trace);

        structure
    }

    pub fn passed_pawns(&self, side: Color) -> Bitboard {
        self.passed_pawns[side]
    }

    pub fn semi_open_files(&self, side: Color) -> Bitboard {
        self.semi_open_files[side]
    }

    pub fn open_files(&self) -> Bitboard {
        self.semi_open_files(White) & self.semi_open_files(Black)
    }

    pub fn outposts(&self, side: Color) -> Bitboard {
        self.outposts[side]
    }

    fn compute_score<const WHITE: bool>(&self, board: &Board, trace: &mut impl Tracer<EvalTrace>) -> S {
        use chessboard::constants::FILES;

        let us = if WHITE { White } else { Black };
        let perspective = if WHITE { 1 } else { -1 };
        let our_pawns = board.pawns(us);
        let their_pawns = board.pawns(!us);
        let our_king = board.kings(us).first();
        let their_king = board.kings(!us).first();

        let isolated_mask = (self.semi_open_files(us).left() | FILES[7])
            & (self.semi_open_files(us).right() | FILES[0]);
        let phalanx_mask = our_pawns.left() | our_pawns.right();
        let protected_mask = board.pawn_attacks(us);

        let mut total = S::default();

        total += shelter_and_storm::<WHITE>(our_king, our_pawns, their_pawns, trace, perspective);

        // Doubled pawns: charge (count - 1) per file instead of a
        // per-square, order-dependent scan, which counts each stacked
        // pair exactly once.
        for file in FILES {
            let count = (file & our_pawns).count();
            if count > 1 {
                let excess = count as i32 - 1;
                total += PARAMS.pawn_stacked * excess;
                trace.add(|t| t.pawn_stacked += excess * perspective);
            }
        }

        for sq in our_pawns {
            let rank = sq.relative_rank::<WHITE>();
            let file = sq.file();

            let stoppers = passed_pawn_mask::<WHITE>(sq) & their_pawns;
            let threats = sq.pawn_attacks(us) & their_pawns;
            let support = sq.pawn_attacks(!us) & our_pawns;
            let (push_threats, push_support) = match sq.forward(us) {
                Some(push_sq) => {
                    (push_sq.pawn_attacks(us) & their_pawns, push_sq.pawn_attacks(!us) & our_pawns)
                }
                None => (Bitboard::EMPTY, Bitboard::EMPTY),
            };

            if stoppers.is_empty() {
                // Passed: scored later in `threats`, once full attack
                // maps are available to judge safe advancement.
            } else {
                let leftovers = stoppers ^ threats ^ push_threats;
                if leftovers.is_empty() && push_support.count() >= push_threats.count() {
                    let support_dominates = support.count() >= threats.count();
                    total += PARAMS.pawn_candidate_passer[support_dominates as usize][rank];
                    trace.add(|t| t.pawn_candidate_passer[support_dominates as usize][rank] += perspective);
                }
            }

            // Isolated and backward are scored independently of each
            // other; only the connected bonus is exclusive with backward,
            // since a backward pawn is by definition not safely connected.
            if isolated_mask.contains(sq) {
                total += PARAMS.pawn_isolated;
                trace.add(|t| t.pawn_isolated += perspective);
            }

            let backward = is_backward::<WHITE>(board, sq, us);
            if backward {
                let open_file = (FILES[file] & their_pawns).is_empty();
                total += PARAMS.pawn_backward[open_file as usize];
                trace.add(|t| t.pawn_backward[open_file as usize] += perspective);
            } else if phalanx_mask.contains(sq) || protected_mask.contains(sq) {
                let bonus = psqt::lookup::<WHITE>(&PARAMS.pawn_connected, sq);
                total += bonus;
                let idx = 4 * rank + [0, 1, 2, 3, 3, 2, 1, 0][file];
                trace.add(|t| t.pawn_connected[idx] += perspective);
            }
        }

        total
    }
}

/// King shelter and pawn-storm, scored per file around the king rather
/// than per pawn: for each of the (up to three) files straddling the
/// king, only the *closest* own and enemy pawn at or above the king on
/// that file matters, not every pawn that happens to sit there.
fn shelter_and_storm<const WHITE: bool>(
    king_sq: chessboard::Square,
    our_pawns: Bitboard,
    their_pawns: Bitboard,
    trace: &mut impl Tracer<EvalTrace>,
    perspective: i32,
) -> S {
    use chessboard::constants::{FILES, RANKS};

    let king_file = king_sq.file();
    let king_rank = king_sq.rank();
    let at_or_above = (if WHITE { ranks_above(king_rank) } else { ranks_below(king_rank) }) | RANKS[king_rank];

    let lo = king_file.saturating_sub(1);
    let hi = (king_file + 1).min(7);

    let mut total = S::default();

    for file in lo..=hi {
        let column = FILES[file] & at_or_above;

        let our_dist = closest_rank_distance(king_sq, column & our_pawns);
        let their_dist = closest_rank_distance(king_sq, column & their_pawns);

        let is_king_file = (file == king_file) as usize;
        total += PARAMS.king_shelter[is_king_file][file][our_dist];
        trace.add(|t| t.king_shelter[is_king_file][file][our_dist] += perspective);

        let blocked = our_dist != 7 && our_dist + 1 == their_dist;
        let mirror_file = 7 - file;
        total += PARAMS.king_storm[blocked as usize][mirror_file][their_dist];
        trace.add(|t| t.king_storm[blocked as usize][mirror_file][their_dist] += perspective);
    }

    total
}

/// Rank distance from `king_sq` to the nearest square in `candidates`, or
/// 7 — the cube tables' "no pawn on this file" sentinel — if it's empty.
fn closest_rank_distance(king_sq: chessboard::Square, candidates: Bitboard) -> usize {
    candidates.map(|sq| sq.vdistance(king_sq)).min().unwrap_or(7)
}

/// A pawn with no friendly pawn able to support its advance, whose stop
/// square an enemy pawn already controls.
fn is_backward<const WHITE: bool>(board: &Board, sq: chessboard::Square, us: Color) -> bool {
    use chessboard::constants::FILES;

    let Some(stop) = sq.forward(us) else { return false };
    let our_pawns = board.pawns(us);
    let file = sq.file();

    let mut adjacent_files = Bitboard::EMPTY;
    if file > 0 {
        adjacent_files |= FILES[file - 1];
    }
    if file < 7 {
        adjacent_files |= FILES[file + 1];
    }

    let support_behind = if WHITE { ranks_below(sq.rank() + 1) } else { ranks_above(sq.rank().saturating_sub(1)) };
    let can_be_supported = !(adjacent_files & support_behind & our_pawns).is_empty();

    !can_be_supported && board.pawn_attacks(!us).contains(stop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::NullTracer;
    use std::str::FromStr;

    #[test]
    fn finds_passed_pawns() {
        let board = Board::from_str("8/8/8/p3kPp1/6P1/4K3/8/8 w - - 0 1").unwrap();
        let structure = PawnKingStructure::new(&board, &mut NullTracer);
        assert_eq!(structure.passed_pawns(White).count(), 1);
        assert_eq!(structure.passed_pawns(Black).count(), 1);
    }

    #[test]
    fn no_passers_behind_a_blockading_wall() {
        let board =
            Board::from_str("r1bq1bnr/p1pp1kpp/p7/8/1n2P3/8/PPP2PPP/RNBQK1NR w KQ - 0 7").unwrap();
        let structure = PawnKingStructure::new(&board, &mut NullTracer);
        assert_eq!(structure.passed_pawns(White).count(), 0);
        assert_eq!(structure.passed_pawns(Black).count(), 0);
    }

    #[test]
    fn score_is_antisymmetric_for_a_mirrored_position() {
        let board = Board::from_str("8/pp3kpp/8/8/8/8/PP3KPP/8 w - - 0 1").unwrap();
        let mirrored = board.mirror();
        let a = PawnKingStructure::new(&board, &mut NullTracer).score;
        let b = PawnKingStructure::new(&mirrored, &mut NullTracer).score;
        assert_eq!(a.mg(), -b.mg());
        assert_eq!(a.eg(), -b.eg());
    }

    #[test]
    fn a_pawn_directly_in_front_of_the_king_shelters_better_than_one_far_away() {
        // Both positions have exactly one pawn, equally isolated either
        // way, so only the shelter/storm cube lookup can differ: e2 sits
        // on the king's own file one rank up, a2 sits outside the king's
        // three-file shelter window entirely.
        let near = Board::from_str("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let far = Board::from_str("4k3/8/8/8/8/8/P7/4K3 w - - 0 1").unwrap();

        let near_score = PawnKingStructure::new(&near, &mut NullTracer).score;
        let far_score = PawnKingStructure::new(&far, &mut NullTracer).score;

        assert!(near_score.mg() > far_score.mg());
    }

    #[test]
    fn doubling_a_pawn_charges_the_stacked_penalty_exactly_once() {
        // d2/e2 support each other (neither isolated), and with no black
        // pawns on the board every white pawn is passed, so the only term
        // that can differ between these two positions is the per-file
        // stacked count.
        let single = Board::from_str("k7/8/8/8/8/8/3PP3/K7 w - - 0 1").unwrap();
        let doubled = Board::from_str("k7/8/8/8/4P3/8/3PP3/K7 w - - 0 1").unwrap();

        let single_score = PawnKingStructure::new(&single, &mut NullTracer).score;
        let doubled_score = PawnKingStructure::new(&doubled, &mut NullTracer).score;

        let diff = doubled_score.mg() - single_score.mg();
        assert_eq!(diff, PARAMS.pawn_stacked.mg() as i32);
    }
}
