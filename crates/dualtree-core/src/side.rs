//! Side selection for values that exist once per compared location.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// One of the two compared locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Get the opposite side.
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// A pair of values, one per side, indexed by [`Side`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideArray<T>([T; 2]);

impl<T> SideArray<T> {
    /// Create a pair from its left and right values.
    pub fn new(left: T, right: T) -> Self {
        Self([left, right])
    }

    /// Create a pair by evaluating `f` once per side.
    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        Self([f(Side::Left), f(Side::Right)])
    }

    pub fn left(&self) -> &T {
        &self.0[0]
    }

    pub fn right(&self) -> &T {
        &self.0[1]
    }

    /// Exchange the left and right values.
    pub fn swap(&mut self) {
        self.0.swap(0, 1);
    }

    /// Set the value on `side`, returning the previous one.
    pub fn replace(&mut self, side: Side, value: T) -> T {
        std::mem::replace(&mut self[side], value)
    }

    /// Map both values, preserving sides.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> SideArray<U> {
        let [left, right] = self.0;
        SideArray([f(left), f(right)])
    }

    /// Iterate over `(side, value)` pairs, left first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.0.iter())
    }
}

impl<T: Clone> SideArray<T> {
    /// Create a pair holding the same value on both sides.
    pub fn splat(value: T) -> Self {
        Self([value.clone(), value])
    }
}

impl<T> Index<Side> for SideArray<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        &self.0[side.index()]
    }
}

impl<T> IndexMut<Side> for SideArray<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        &mut self.0[side.index()]
    }
}

/// Pick `left` or `right` depending on `side`.
pub fn select_for_side<T>(side: Side, left: T, right: T) -> T {
    match side {
        Side::Left => left,
        Side::Right => right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_side() {
        assert_eq!(Side::Left.other(), Side::Right);
        assert_eq!(Side::Right.other(), Side::Left);
    }

    #[test]
    fn test_side_array_index_and_swap() {
        let mut pair = SideArray::new("l", "r");
        assert_eq!(pair[Side::Left], "l");
        assert_eq!(pair[Side::Right], "r");

        pair.swap();
        assert_eq!(*pair.left(), "r");
        assert_eq!(*pair.right(), "l");

        let old = pair.replace(Side::Left, "x");
        assert_eq!(old, "r");
        assert_eq!(pair[Side::Left], "x");
    }

    #[test]
    fn test_select_for_side() {
        assert_eq!(select_for_side(Side::Left, 1, 2), 1);
        assert_eq!(select_for_side(Side::Right, 1, 2), 2);
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!(Side::Right.to_string(), "right");
    }
}
