use crate::change::Side;

/// Which opposite-side lines each side touched during one round.
///
/// `touched[side]` is a bitmap over the line indices of the *opposite* queue,
/// so it is sized once per round and never outgrows the remaining input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchedSet {
    touched: [Vec<bool>; 2],
}

impl TouchedSet {
    pub fn new(left_lines: usize, right_lines: usize) -> Self {
        TouchedSet {
            touched: [vec![false; right_lines], vec![false; left_lines]],
        }
    }

    /// Records that left line `left` and right line `right` share content.
    pub fn touch(&mut self, left: usize, right: usize) {
        if let Some(slot) = self.touched[Side::Left.index()].get_mut(right) {
            *slot = true;
        }
        if let Some(slot) = self.touched[Side::Right.index()].get_mut(left) {
            *slot = true;
        }
    }

    /// Opposite-side line indices touched from `side`, ascending.
    pub fn candidates(&self, side: Side) -> impl Iterator<Item = usize> + '_ {
        self.touched[side.index()]
            .iter()
            .enumerate()
            .filter_map(|(idx, &touched)| touched.then_some(idx))
    }
}
