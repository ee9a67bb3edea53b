//! Evaluation weights.
//!
//! Values named directly in the governing specification (piece values,
//! `PawnIsolated`, `PawnStacked`, `BishopPair`, `RookOnSeventh`,
//! `PassedSafePromotionPath`, `Tempo` — 37 centipawns at the start
//! position, per the published reproduction test, not the `(25, 12)`
//! that appears in the surrounding prose — and the king-safety attacker
//! weights) are reproduced exactly. Everything else is a plausible,
//! internally consistent placeholder in the same style — a from-scratch
//! tune was never run against this implementation, so these should be
//! read as structurally correct rather than numerically final.

use crate::score::s;
use crate::score::S;

/// Shelter bonus for the closest own pawn `dist` ranks from the king on a
/// given file; `dist == 7` means no own pawn on that file at all. No
/// normative cube values exist for this table (the spec fixes only its
/// shape and indexing), so these are hand-authored placeholders, heavier
/// on the king's own file and falling off with distance.
const fn shelter_value(is_king_file: bool, dist: usize) -> S {
    if dist >= 7 {
        return S::new(if is_king_file { -24 } else { -14 }, 0);
    }
    let base: i16 = if is_king_file { 28 } else { 16 };
    S::new(base - dist as i16 * 5, 0)
}

/// Storm penalty for the closest enemy pawn `dist` ranks from the king on
/// the mirrored file; `blocked` softens it, since a storming pawn that's
/// already blocked can't close the distance on its own.
const fn storm_value(blocked: bool, dist: usize) -> S {
    if dist >= 7 {
        return S::new(0, 0);
    }
    // `dist` is at most 6 here, the `>= 7` case having already returned.
    let severity: i16 = 6 - dist as i16;
    let mg = if blocked { -severity * 2 } else { -severity * 5 };
    S::new(mg, 0)
}

const fn build_king_shelter() -> [[[S; 8]; 8]; 2] {
    let mut table = [[[S::new(0, 0); 8]; 8]; 2];
    let mut is_king_file = 0;
    while is_king_file < 2 {
        let mut file = 0;
        while file < 8 {
            let mut dist = 0;
            while dist < 8 {
                table[is_king_file][file][dist] = shelter_value(is_king_file == 1, dist);
                dist += 1;
            }
            file += 1;
        }
        is_king_file += 1;
    }
    table
}

const fn build_king_storm() -> [[[S; 8]; 8]; 2] {
    let mut table = [[[S::new(0, 0); 8]; 8]; 2];
    let mut blocked = 0;
    while blocked < 2 {
        let mut file = 0;
        while file < 8 {
            let mut dist = 0;
            while dist < 8 {
                table[blocked][file][dist] = storm_value(blocked == 1, dist);
                dist += 1;
            }
            file += 1;
        }
        blocked += 1;
    }
    table
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Weights {
    pub piece_values: [S; 6],

    pub pawn_psqt: [S; 32],
    pub knight_psqt: [S; 32],
    pub bishop_psqt: [S; 32],
    pub rook_psqt: [S; 32],
    pub queen_psqt: [S; 32],
    pub king_psqt: [S; 32],

    pub pawn_isolated: S,
    pub pawn_stacked: S,
    /// Indexed by `openFile` (the enemy has no pawn on this file at all).
    pub pawn_backward: [S; 2],
    /// Quarter-board table, same indexing scheme as the PSQTs.
    pub pawn_connected: [S; 32],
    /// Indexed by `[supportDominates][relativeRank]`.
    pub pawn_candidate_passer: [[S; 8]; 2],

    /// Indexed by `[canAdvance][safeAdvance][relativeRank]`.
    pub passed_pawn: [[[S; 8]; 2]; 2],
    /// Per-rank weight multiplied by the actual king distance.
    pub passers_friendly_king: [S; 8],
    pub passers_enemy_king: [S; 8],
    pub passed_safe_promotion_path: S,

    pub bishop_pair: S,
    pub rook_on_seventh: S,
    pub rook_open_file: S,
    pub rook_semiopen_file: S,
    pub queen_open_file: S,
    pub queen_semiopen_file: S,

    pub knight_mobility: [S; 9],
    pub bishop_mobility: [S; 14],
    pub rook_mobility: [S; 15],
    pub queen_mobility: [S; 28],

    /// Indexed by `defendedByOwnPawn`.
    pub knight_outpost: [S; 2],
    pub bishop_outpost: [S; 2],
    pub behind_pawn: S,
    pub bishop_rammed_pawn: S,

    /// `[fileIsKingFile][file][closestOwnPawnDistance]`.
    pub king_shelter: [[[S; 8]; 8]; 2],
    /// `[blocked][mirrorFile(file)][closestEnemyPawnDistance]`.
    pub king_storm: [[[S; 8]; 8]; 2],

    pub threat_weak_pawn: S,
    pub threat_minor_by_pawn: S,
    pub threat_minor_by_minor: S,
    pub threat_minor_by_major: S,
    pub threat_rook_by_lesser: S,
    pub threat_queen_by_one: S,
    pub threat_overloaded: S,
    pub threat_pawn_push: S,

    pub tempo: S,
}

/// Attacker-weighted contribution of each piece type to a king's danger
/// score. Index by `PieceType as usize`; pawns and kings don't count
/// towards the attack, so they carry a weight of zero.
pub const KS_ATTACK_WEIGHT: [i32; 6] = [0, 16, 6, 10, 8, 0];

#[rustfmt::skip]
pub const PARAMS: Weights = Weights {
    piece_values: [
        s!(110, 129),   // Pawn
        s!(460, 412),   // Knight
        s!(481, 430),   // Bishop
        s!(677, 714),   // Rook
        s!(1263, 1375), // Queen
        s!(0, 0),       // King
    ],

    // Quarter-board tables: index = 4*relative_rank + edge_distance(file).
    // Rank 0 is our own back rank, rank 7 is the promotion rank.
    pawn_psqt: [
        s!(0, 0),    s!(0, 0),    s!(0, 0),    s!(0, 0),
        s!(-6, -4),  s!(2, -2),   s!(4, 0),    s!(6, 2),
        s!(-8, -2),  s!(0, 0),    s!(8, 4),    s!(14, 8),
        s!(-4, 4),   s!(4, 4),    s!(10, 10),  s!(18, 16),
        s!(2, 14),   s!(8, 14),   s!(16, 18),  s!(24, 24),
        s!(12, 40),  s!(20, 40),  s!(28, 44),  s!(32, 48),
        s!(40, 80),  s!(48, 80),  s!(52, 84),  s!(52, 88),
        s!(0, 0),    s!(0, 0),    s!(0, 0),    s!(0, 0),
    ],
    knight_psqt: [
        s!(-60, -50), s!(-24, -30), s!(-16, -20), s!(-12, -16),
        s!(-24, -30), s!(-8, -10),  s!(0, 0),     s!(6, 4),
        s!(-12, -16), s!(4, -2),    s!(14, 10),   s!(20, 16),
        s!(-8, -10),  s!(10, 4),    s!(22, 18),   s!(28, 24),
        s!(-4, -10),  s!(14, 4),    s!(26, 18),   s!(32, 24),
        s!(-8, -16),  s!(10, -2),   s!(20, 10),   s!(24, 16),
        s!(-24, -24), s!(-4, -10),  s!(4, 0),     s!(10, 4),
        s!(-80, -50), s!(-30, -30), s!(-20, -20), s!(-14, -16),
    ],
    bishop_psqt: [
        s!(-16, -16), s!(-8, -8),  s!(-8, -8),  s!(-6, -6),
        s!(-4, -8),   s!(6, 0),    s!(4, 0),    s!(2, 0),
        s!(-2, -4),   s!(8, 2),    s!(10, 4),   s!(8, 4),
        s!(-2, -4),   s!(6, 2),    s!(12, 6),   s!(14, 8),
        s!(-2, -4),   s!(8, 2),    s!(10, 6),   s!(14, 8),
        s!(-4, -4),   s!(10, 2),   s!(10, 4),   s!(10, 4),
        s!(-6, -8),   s!(2, 0),    s!(4, 0),    s!(4, 2),
        s!(-18, -16), s!(-8, -8),  s!(-10, -8), s!(-8, -6),
    ],
    rook_psqt: [
        s!(-4, 0),  s!(0, 0),  s!(2, 0),  s!(4, 0),
        s!(-10, 0), s!(-2, 0), s!(0, 0),  s!(2, 0),
        s!(-10, 0), s!(-2, 0), s!(0, 0),  s!(2, 0),
        s!(-10, 0), s!(-2, 0), s!(0, 0),  s!(2, 0),
        s!(-10, 2), s!(-2, 2), s!(0, 2),  s!(2, 2),
        s!(-6, 4),  s!(2, 4),  s!(4, 4),  s!(6, 4),
        s!(4, 6),   s!(10, 6), s!(12, 6), s!(14, 6),
        s!(0, 4),   s!(4, 4),  s!(8, 4),  s!(10, 4),
    ],
    queen_psqt: [
        s!(-8, -20), s!(-4, -12), s!(-4, -8), s!(-2, -4),
        s!(-4, -12), s!(2, -6),   s!(2, -2),  s!(4, 2),
        s!(-2, -8),  s!(2, -2),   s!(6, 4),   s!(6, 8),
        s!(-2, -4),  s!(4, 2),    s!(6, 8),   s!(8, 12),
        s!(-2, -4),  s!(4, 2),    s!(6, 8),   s!(8, 12),
        s!(-4, -8),  s!(2, -2),   s!(4, 4),   s!(4, 8),
        s!(-6, -12), s!(0, -6),   s!(0, -2),  s!(2, 2),
        s!(-10, -20),s!(-6, -12), s!(-4, -8), s!(-2, -4),
    ],
    king_psqt: [
        s!(20, -40),  s!(30, -16), s!(10, -4), s!(0, 0),
        s!(20, -16),  s!(24, 4),   s!(4, 14),  s!(-8, 18),
        s!(-20, -4),  s!(-16, 10), s!(-20, 20),s!(-24, 24),
        s!(-40, -4),  s!(-36, 10), s!(-40, 20),s!(-44, 26),
        s!(-56, -10), s!(-50, 8),  s!(-56, 18),s!(-60, 24),
        s!(-64, -14), s!(-58, 2),  s!(-64, 12),s!(-68, 18),
        s!(-70, -24), s!(-64, -8), s!(-70, 2), s!(-74, 8),
        s!(-76, -40), s!(-70, -20),s!(-76, -8),s!(-80, 0),
    ],

    pawn_isolated: s!(-8, -10),
    pawn_stacked: s!(-19, -26),
    // [closed, open]: a backward pawn on an open file is more exposed.
    pawn_backward: [s!(-9, -12), s!(-14, -16)],
    // Quarter-board: index = 4*relative_rank + edge_distance(file).
    pawn_connected: [
        s!(0, 0),   s!(0, 0),   s!(0, 0),   s!(0, 0),
        s!(2, 2),   s!(2, 2),   s!(2, 2),   s!(2, 2),
        s!(4, 4),   s!(4, 4),   s!(4, 4),   s!(4, 4),
        s!(8, 8),   s!(8, 8),   s!(8, 8),   s!(8, 8),
        s!(14, 14), s!(14, 14), s!(14, 14), s!(14, 14),
        s!(24, 24), s!(24, 24), s!(24, 24), s!(24, 24),
        s!(36, 36), s!(36, 36), s!(36, 36), s!(36, 36),
        s!(0, 0),   s!(0, 0),   s!(0, 0),   s!(0, 0),
    ],
    // [supportDominates][relativeRank]
    pawn_candidate_passer: [
        [
            s!(0, 0), s!(1, 2), s!(2, 4), s!(4, 8),
            s!(7, 14), s!(11, 22), s!(0, 0), s!(0, 0),
        ],
        [
            s!(0, 0), s!(2, 4), s!(4, 8), s!(8, 16),
            s!(14, 28), s!(22, 44), s!(0, 0), s!(0, 0),
        ],
    ],

    // [canAdvance][safeAdvance][relativeRank]
    passed_pawn: [
        [
            [s!(0, 0), s!(-4, 4), s!(-6, 10), s!(-2, 22), s!(4, 40), s!(12, 64), s!(24, 92), s!(0, 0)],
            [s!(0, 0), s!(-2, 8), s!(-4, 16), s!(2, 32), s!(10, 56), s!(24, 92), s!(40, 130), s!(0, 0)],
        ],
        [
            [s!(0, 0), s!(-2, 6), s!(-2, 14), s!(4, 28), s!(10, 50), s!(20, 78), s!(36, 112), s!(0, 0)],
            [s!(0, 0), s!(0, 10), s!(0, 20), s!(6, 38), s!(14, 66), s!(30, 106), s!(48, 150), s!(0, 0)],
        ],
    ],
    passers_friendly_king: [
        s!(0, 0), s!(0, 18), s!(0, 10), s!(0, 2),
        s!(0, -4), s!(0, -8), s!(0, -10), s!(0, -12),
    ],
    passers_enemy_king: [
        s!(0, 0), s!(0, -22), s!(0, -4), s!(0, 6),
        s!(0, 14), s!(0, 18), s!(0, 20), s!(0, 22),
    ],
    passed_safe_promotion_path: s!(-27, 36),

    bishop_pair: s!(26, 70),
    rook_on_seventh: s!(0, 32),
    rook_open_file: s!(28, 8),
    rook_semiopen_file: s!(14, 6),
    queen_open_file: s!(12, 10),
    queen_semiopen_file: s!(6, 6),

    knight_mobility: [
        s!(-32, -40), s!(-18, -24), s!(-6, -10), s!(2, 0),
        s!(10, 8),    s!(16, 16),   s!(22, 20),  s!(26, 22),
        s!(28, 20),
    ],
    bishop_mobility: [
        s!(-24, -36), s!(-12, -20), s!(-2, -8), s!(6, 2),
        s!(14, 10),   s!(20, 18),   s!(26, 24), s!(30, 28),
        s!(32, 30),   s!(34, 32),   s!(36, 32), s!(38, 32),
        s!(40, 32),   s!(42, 32),
    ],
    rook_mobility: [
        s!(-20, -30), s!(-12, -18), s!(-4, -6), s!(2, 4),
        s!(6, 12),    s!(10, 20),   s!(12, 28), s!(16, 34),
        s!(20, 40),   s!(22, 44),   s!(24, 48), s!(26, 50),
        s!(28, 52),   s!(30, 52),   s!(32, 52),
    ],
    queen_mobility: [
        s!(-16, -20), s!(-10, -14), s!(-4, -8), s!(0, -2),
        s!(4, 4),     s!(8, 10),    s!(10, 16), s!(12, 22),
        s!(14, 28),   s!(16, 32),   s!(18, 36), s!(18, 40),
        s!(20, 42),   s!(20, 44),   s!(20, 46), s!(20, 46),
        s!(20, 46),   s!(20, 46),   s!(20, 46), s!(20, 46),
        s!(20, 46),   s!(20, 46),   s!(20, 46), s!(20, 46),
        s!(20, 46),   s!(20, 46),   s!(20, 46), s!(20, 46),
    ],

    knight_outpost: [s!(18, 12), s!(30, 22)],
    bishop_outpost: [s!(10, 6), s!(20, 14)],
    behind_pawn: s!(4, 10),
    bishop_rammed_pawn: s!(-10, -16),

    king_shelter: build_king_shelter(),
    king_storm: build_king_storm(),

    threat_weak_pawn: s!(-10, -18),
    threat_minor_by_pawn: s!(-48, -36),
    threat_minor_by_minor: s!(-22, -20),
    threat_minor_by_major: s!(-14, -22),
    threat_rook_by_lesser: s!(-48, -20),
    threat_queen_by_one: s!(-50, -18),
    threat_overloaded: s!(-8, -10),
    threat_pawn_push: s!(-16, -12),

    tempo: s!(37, 12),
};
