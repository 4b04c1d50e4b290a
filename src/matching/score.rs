use crate::config::MatchConfig;
use crate::diff::span::{SpanKind, diff_chars};
use derive_new::new;

/// How alike two lines are. Scores compare by `ratio` only; the character
/// counts back the containment rule of [`Score::is_above_threshold`].
#[derive(Debug, Clone, Copy, PartialEq, new)]
pub struct Score {
    pub ratio: f64,
    pub matched: usize,
    pub left_len: usize,
    pub right_len: usize,
}

impl Score {
    pub fn is_above_threshold(&self, config: &MatchConfig) -> bool {
        if self.ratio >= config.ratio_threshold {
            return true;
        }

        let shorter = self.left_len.min(self.right_len);
        self.ratio >= config.containment_ratio_threshold
            && shorter > 0
            && self.matched as f64 / shorter as f64 >= config.containment_threshold
    }
}

fn strip_line_break(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

/// Scores a candidate pairing of two lines.
///
/// The ratio is a Dice coefficient over matched characters, scaled down by the
/// number of separate matched fragments so that one long common run beats many
/// scattered ones with the same character count.
pub fn score(a: &str, b: &str, config: &MatchConfig) -> Score {
    let (a, b) = (strip_line_break(a), strip_line_break(b));

    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Score::new(1.0, 0, 0, 0),
        (true, false) | (false, true) => {
            return Score::new(0.0, 0, a.chars().count(), b.chars().count());
        }
        (false, false) => {}
    }

    let (mut left_len, mut right_len, mut matched, mut parts) = (0, 0, 0, 0);

    for span in diff_chars(a, b) {
        let length = span.value.chars().count();
        match span.kind {
            SpanKind::OnlyLeft => left_len += length,
            SpanKind::OnlyRight => right_len += length,
            SpanKind::Common => {
                parts += 1;
                left_len += length;
                right_len += length;
                matched += length;
            }
        }
    }

    let cap = config.max_fragments as f64;
    let parts = (parts as f64).min(cap);
    let ratio = (matched * 2) as f64 / (left_len + right_len) as f64 * (cap - parts) / cap;

    Score::new(ratio, matched, left_len, right_len)
}
