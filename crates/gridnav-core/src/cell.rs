//! A single navigation tile ([`NavCell`]) and its [`CellFlags`].

use std::any::Any;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use crate::error::{GridError, check_cost};
use crate::geom::Point;

// ---------------------------------------------------------------------------
// CellFlags
// ---------------------------------------------------------------------------

/// Bitset of per-cell flags.
///
/// Only [`BLOCKED`](Self::BLOCKED) has a meaning for navigation; the other
/// bits are free for callers (terrain tags, hazards, ownership, ...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellFlags(pub u32);

impl CellFlags {
    pub const NONE: Self = Self(0);
    /// The cell can never be entered.
    pub const BLOCKED: Self = Self(1 << 0);

    /// Caller-defined flag number `n`, for `n` in `0..31` (bits 1..=31).
    /// Bit 0 is reserved for [`BLOCKED`](Self::BLOCKED).
    ///
    /// Larger `n` panics in debug builds and wraps modulo 31 in release
    /// builds, so `user(31) == user(0)` there.
    #[inline]
    pub const fn user(n: u32) -> Self {
        debug_assert!(n < Self::USER_FLAGS, "user flag index out of range");
        Self(1 << (n % Self::USER_FLAGS + 1))
    }

    /// Number of caller-defined flags.
    pub const USER_FLAGS: u32 = 31;

    /// Whether this set contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Set or clear every bit of `other`.
    #[inline]
    pub fn set(&mut self, other: Self, on: bool) {
        if on {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl BitOr for CellFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for CellFlags {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for CellFlags {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Self(!self.0)
    }
}

// ---------------------------------------------------------------------------
// NavCell
// ---------------------------------------------------------------------------

/// Type-erased payload attached to a cell.
pub type UserData = Box<dyn Any + Send + Sync>;

/// A single tile of a navigation grid.
///
/// The position is fixed at construction. `cost` is a movement-cost
/// multiplier applied when a search steps *into* the cell and is always
/// finite and non-negative.
///
/// Cloning a cell produces a read-only snapshot: position, cost and flags are
/// copied, the payload is not. Equality likewise ignores the payload.
pub struct NavCell {
    pos: Point,
    cost: f32,
    flags: CellFlags,
    user_data: Option<UserData>,
}

impl NavCell {
    /// Create a cell. Fails if `cost` is negative or not finite.
    pub fn new(pos: Point, cost: f32, flags: CellFlags) -> Result<Self, GridError> {
        Ok(Self {
            pos,
            cost: check_cost(cost)?,
            flags,
            user_data: None,
        })
    }

    /// A walkable cell with cost 1.0.
    #[inline]
    pub(crate) fn open(pos: Point) -> Self {
        Self {
            pos,
            cost: 1.0,
            flags: CellFlags::NONE,
            user_data: None,
        }
    }

    /// Snapshot of this cell carrying `cost` instead of the stored one.
    ///
    /// Used by policies that compute costs on the fly; `cost` is trusted as
    /// given.
    #[inline]
    pub fn snapshot_with_cost(&self, cost: f32) -> Self {
        Self {
            pos: self.pos,
            cost,
            flags: self.flags,
            user_data: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Set the movement cost. Negative, NaN and infinite costs are rejected
    /// and leave the cell unchanged.
    pub fn set_cost(&mut self, cost: f32) -> Result<(), GridError> {
        self.cost = check_cost(cost)?;
        Ok(())
    }

    #[inline]
    pub fn flags(&self) -> CellFlags {
        self.flags
    }

    #[inline]
    pub fn set_flags(&mut self, flags: CellFlags) {
        self.flags = flags;
    }

    /// Whether every bit of `flag` is set on this cell.
    #[inline]
    pub fn has_flag(&self, flag: CellFlags) -> bool {
        self.flags.contains(flag)
    }

    /// A cell is walkable unless it is [`BLOCKED`](CellFlags::BLOCKED),
    /// whatever its cost.
    #[inline]
    pub fn is_walkable(&self) -> bool {
        !self.flags.contains(CellFlags::BLOCKED)
    }

    /// Attach a payload, dropping any previous one first.
    pub fn set_user_data<T: Any + Send + Sync>(&mut self, value: T) {
        self.user_data = None;
        self.user_data = Some(Box::new(value));
    }

    /// Borrow the payload if it is a `T`.
    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_deref()?.downcast_ref::<T>()
    }

    /// Mutably borrow the payload if it is a `T`.
    pub fn user_data_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.user_data.as_deref_mut()?.downcast_mut::<T>()
    }

    /// Remove and return the payload, transferring ownership to the caller.
    pub fn take_user_data(&mut self) -> Option<UserData> {
        self.user_data.take()
    }

    /// Drop the payload, if any.
    pub fn clear_user_data(&mut self) {
        self.user_data = None;
    }

    #[inline]
    pub fn has_user_data(&self) -> bool {
        self.user_data.is_some()
    }

    /// Restore the freshly-constructed state: walkable, cost 1.0, no payload.
    pub(crate) fn reset(&mut self) {
        self.cost = 1.0;
        self.flags = CellFlags::NONE;
        self.user_data = None;
    }
}

impl Clone for NavCell {
    fn clone(&self) -> Self {
        self.snapshot_with_cost(self.cost)
    }
}

impl PartialEq for NavCell {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.cost == other.cost && self.flags == other.flags
    }
}

impl fmt::Debug for NavCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavCell")
            .field("pos", &self.pos)
            .field("cost", &self.cost)
            .field("flags", &self.flags)
            .field("user_data", &self.user_data.is_some())
            .finish()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;

    #[derive(serde::Serialize, serde::Deserialize)]
    struct CellRepr {
        pos: Point,
        cost: f32,
        flags: CellFlags,
    }

    impl serde::Serialize for NavCell {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            CellRepr {
                pos: self.pos,
                cost: self.cost,
                flags: self.flags,
            }
            .serialize(serializer)
        }
    }

    impl<'de> serde::Deserialize<'de> for NavCell {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = CellRepr::deserialize(deserializer)?;
            NavCell::new(repr.pos, repr.cost, repr.flags).map_err(serde::de::Error::custom)
        }
    }
}
