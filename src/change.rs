use crate::diff::segment::Segment;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// One line of a hybrid diff.
///
/// Every payload holds exactly one line: it ends with `'\n'` unless it is the
/// last line of its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Unchanged {
        value: String,
    },
    Removed {
        left: String,
    },
    Added {
        right: String,
    },
    /// Two different lines judged to be the same line, edited. `diff` is the
    /// character level diff from `left` to `right`.
    Changed {
        left: String,
        right: String,
        diff: Vec<Segment>,
    },
}

impl Change {
    /// A line present on only one side.
    pub fn one_sided(side: Side, line: String) -> Self {
        match side {
            Side::Left => Change::Removed { left: line },
            Side::Right => Change::Added { right: line },
        }
    }

    pub fn left(&self) -> Option<&str> {
        match self {
            Change::Unchanged { value } => Some(value.as_str()),
            Change::Removed { left } | Change::Changed { left, .. } => Some(left.as_str()),
            Change::Added { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&str> {
        match self {
            Change::Unchanged { value } => Some(value.as_str()),
            Change::Added { right } | Change::Changed { right, .. } => Some(right.as_str()),
            Change::Removed { .. } => None,
        }
    }

    pub fn side(&self, side: Side) -> Option<&str> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }
}

impl Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Change::Unchanged { value } => write!(f, " {value:?}"),
            Change::Removed { left } => write!(f, "-{left:?}"),
            Change::Added { right } => write!(f, "+{right:?}"),
            Change::Changed { left, right, .. } => write!(f, "*{left:?} -> {right:?}"),
        }
    }
}

/// Rebuilds one of the two diffed inputs.
pub fn reconstruct(changes: &[Change], side: Side) -> String {
    changes.iter().filter_map(|change| change.side(side)).collect()
}

/// Line accounting over a hybrid diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub unchanged: usize,
    pub removed: usize,
    pub added: usize,
    pub changed: usize,
}

impl DiffSummary {
    pub fn from_changes(changes: &[Change]) -> Self {
        changes
            .iter()
            .fold(DiffSummary::default(), |mut summary, change| {
                match change {
                    Change::Unchanged { .. } => summary.unchanged += 1,
                    Change::Removed { .. } => summary.removed += 1,
                    Change::Added { .. } => summary.added += 1,
                    Change::Changed { .. } => summary.changed += 1,
                }
                summary
            })
    }

    pub fn left_lines(&self) -> usize {
        self.unchanged + self.removed + self.changed
    }

    pub fn right_lines(&self) -> usize {
        self.unchanged + self.added + self.changed
    }

    pub fn is_identical(&self) -> bool {
        self.removed == 0 && self.added == 0 && self.changed == 0
    }
}
