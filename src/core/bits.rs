//! Small fixed-width bitsets for seats and board positions.
//!
//! `SeatMask` holds one bit per seat (at most 8). `PositionMask` holds one
//! bit per board position (at most 16).

use serde::{Deserialize, Serialize};

/// One bit per seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMask(pub u8);

impl SeatMask {
    /// Mask with the low `count` seats set.
    #[must_use]
    pub const fn fill(count: usize) -> Self {
        if count >= 8 {
            Self(u8::MAX)
        } else {
            Self(((1u16 << count) - 1) as u8)
        }
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, seat: usize) -> bool {
        self.0 & (1 << seat) != 0
    }

    #[inline]
    pub fn set(&mut self, seat: usize) {
        self.0 |= 1 << seat;
    }

    #[inline]
    pub fn clear(&mut self, seat: usize) {
        self.0 &= !(1 << seat);
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Seats in `self` but not in `other`.
    #[inline]
    #[must_use]
    pub const fn without(self, other: SeatMask) -> SeatMask {
        SeatMask(self.0 & !other.0)
    }

    /// True when every seat in `self` is also in `other`.
    #[inline]
    #[must_use]
    pub const fn is_subset_of(self, other: SeatMask) -> bool {
        self.0 & !other.0 == 0
    }
}

/// One bit per board position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionMask(pub u16);

impl PositionMask {
    /// Maximum number of positions a mask can track.
    pub const CAPACITY: usize = 16;

    #[inline]
    #[must_use]
    pub const fn contains(self, pos: usize) -> bool {
        self.0 & (1 << pos) != 0
    }

    #[inline]
    pub fn set(&mut self, pos: usize) {
        self.0 |= 1 << pos;
    }

    #[inline]
    pub fn clear(&mut self, pos: usize) {
        self.0 &= !(1 << pos);
    }

    /// Set or clear one position.
    #[inline]
    pub fn assign(&mut self, pos: usize, value: bool) {
        if value {
            self.set(pos);
        } else {
            self.clear(pos);
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Remove position `pos`, shifting every higher position down by one.
    pub fn drop_column(&mut self, pos: usize) {
        let low = self.0 & ((1u16 << pos) - 1);
        let high = if pos + 1 >= Self::CAPACITY {
            0
        } else {
            (self.0 >> (pos + 1)) << pos
        };
        self.0 = low | high;
    }

    /// Iterate over set positions in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let pos = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(pos)
        })
    }
}
