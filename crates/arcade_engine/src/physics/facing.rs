//! Facing flags for collision filtering and contact reporting
//!
//! The same bitmask describes which sides of a body accept collisions
//! (`allow_collisions`) and which sides were in contact during the current
//! tick (`touching`).

use bitflags::bitflags;

bitflags! {
    /// Sides of an axis-aligned body
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Facing: u16 {
        /// Left side
        const LEFT = 0x0001;
        /// Right side
        const RIGHT = 0x0010;
        /// Top side
        const UP = 0x0100;
        /// Bottom side
        const DOWN = 0x1000;
        /// Alias of `UP`
        const CEILING = Self::UP.bits();
        /// Alias of `DOWN`
        const FLOOR = Self::DOWN.bits();
        /// Left and right
        const WALL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Every side
        const ANY = Self::LEFT.bits() | Self::RIGHT.bits() | Self::UP.bits() | Self::DOWN.bits();
    }
}

impl Facing {
    /// No side
    pub const NONE: Self = Self::empty();

    /// Whether two bodies can meet with `first` moving into `second` through
    /// `side` of `first`
    pub fn permits(first: Self, second: Self, side: Self) -> bool {
        first.contains(side) && second.contains(side.opposite())
    }

    /// Mirror every side
    pub fn opposite(self) -> Self {
        let mut mirrored = Self::NONE;
        for (side, other) in [
            (Self::LEFT, Self::RIGHT),
            (Self::RIGHT, Self::LEFT),
            (Self::UP, Self::DOWN),
            (Self::DOWN, Self::UP),
        ] {
            if self.contains(side) {
                mirrored |= other;
            }
        }
        mirrored
    }
}
