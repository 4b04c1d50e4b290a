#![allow(dead_code)]

use linediff::Change;

/// `(left_line, right_line)` indices of every entry that pairs a line from
/// each side, i.e. unchanged and changed lines.
pub fn paired_lines(changes: &[Change]) -> Vec<(usize, usize)> {
    let (mut left, mut right) = (0, 0);
    let mut pairs = Vec::new();

    for change in changes {
        match change {
            Change::Unchanged { .. } | Change::Changed { .. } => {
                pairs.push((left, right));
                left += 1;
                right += 1;
            }
            Change::Removed { .. } => left += 1,
            Change::Added { .. } => right += 1,
        }
    }

    pairs
}

/// One marker per entry: `=` unchanged, `-` removed, `+` added, `*` changed.
pub fn shape(changes: &[Change]) -> String {
    changes
        .iter()
        .map(|change| match change {
            Change::Unchanged { .. } => '=',
            Change::Removed { .. } => '-',
            Change::Added { .. } => '+',
            Change::Changed { .. } => '*',
        })
        .collect()
}

fn is_one_line(text: &str, is_last_line: bool) -> bool {
    match text.find('\n') {
        Some(pos) => pos == text.len() - 1,
        None => is_last_line,
    }
}

/// Every payload is one line, and only the last line of a side may lack its
/// line break.
pub fn has_one_line_per_entry(changes: &[Change]) -> bool {
    let (mut is_left_last, mut is_right_last) = (true, true);

    for change in changes.iter().rev() {
        let ok = match change {
            Change::Unchanged { value } => is_one_line(value, is_left_last && is_right_last),
            Change::Removed { left } => is_one_line(left, is_left_last),
            Change::Added { right } => is_one_line(right, is_right_last),
            Change::Changed { left, right, .. } => {
                is_one_line(left, is_left_last) && is_one_line(right, is_right_last)
            }
        };
        if !ok {
            return false;
        }

        if change.left().is_some() {
            is_left_last = false;
        }
        if change.right().is_some() {
            is_right_last = false;
        }
    }

    true
}

/// Changed entries pair two different, non-empty lines.
pub fn is_consistent(changes: &[Change]) -> bool {
    changes.iter().all(|change| match change {
        Change::Changed { left, right, .. } => !left.is_empty() && !right.is_empty() && left != right,
        Change::Removed { left } => !left.is_empty(),
        Change::Added { right } => !right.is_empty(),
        Change::Unchanged { .. } => true,
    })
}
