//! Castling rights bookkeeping.
//!
//! This only tracks *whether* a side has ever moved its king/rook off their
//! home squares — enough to round-trip a FEN string. It deliberately does
//! not know about attacked squares or line-of-sight blockers: that's a move
//! legality concern, and the evaluator never needs to know if a castle is
//! currently legal, only the eventual king/rook file structure.

use anyhow::anyhow;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WK: CastlingRights = CastlingRights(0b0001);
    pub const WQ: CastlingRights = CastlingRights(0b0010);
    pub const BK: CastlingRights = CastlingRights(0b0100);
    pub const BQ: CastlingRights = CastlingRights(0b1000);

    pub fn none() -> Self {
        Self(0)
    }

    fn has(&self, mask: CastlingRights) -> bool {
        self.0 & mask.0 != 0
    }

    /// Swap White's rights for Black's, for `Board::mirror`.
    pub fn mirror(self) -> Self {
        let white = self.0 & 0b0011;
        let black = self.0 & 0b1100;
        Self((white << 2) | (black >> 2))
    }
}

impl FromStr for CastlingRights {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut rights = CastlingRights::none();

        for ch in s.chars() {
            match ch {
                'K' => rights.0 |= Self::WK.0,
                'Q' => rights.0 |= Self::WQ.0,
                'k' => rights.0 |= Self::BK.0,
                'q' => rights.0 |= Self::BQ.0,
                '-' => {}
                other => return Err(anyhow!("'{other}' is not a valid castling letter")),
            }
        }

        Ok(rights)
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }

        if self.has(Self::WK) {
            write!(f, "K")?;
        }
        if self.has(Self::WQ) {
            write!(f, "Q")?;
        }
        if self.has(Self::BK) {
            write!(f, "k")?;
        }
        if self.has(Self::BQ) {
            write!(f, "q")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        for fen in ["KQkq", "Kk", "-", "Qq"] {
            let rights: CastlingRights = fen.parse().unwrap();
            assert_eq!(rights.to_string(), fen);
        }
    }

    #[test]
    fn mirror_swaps_sides() {
        let rights: CastlingRights = "KQ".parse().unwrap();
        assert_eq!(rights.mirror().to_string(), "kq");
    }
}
