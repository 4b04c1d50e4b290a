use crate::change::{Change, Side};
use crate::config::MatchConfig;
use crate::diff::segment::Segment;
use crate::diff::span::diff_chars;
use crate::matching::queue::LineQueues;
use crate::matching::score::{Score, score};
use crate::matching::touched::TouchedSet;
use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome {
    /// The pending line was paired with the opposite line at `index`; the
    /// `index` lines before it were emitted as one-sided changes.
    Matched { index: usize, score: Score },
    Unmatched { best: Option<Score> },
}

#[derive(Debug, Clone, Copy, new)]
pub struct LineMatcher<'c> {
    config: &'c MatchConfig,
}

impl LineMatcher<'_> {
    /// Decides the fate of the first pending line of `side` against the
    /// opposite lines it touched this round. Always consumes at least that
    /// line when one is pending.
    pub fn match_first(
        &self,
        queues: &mut LineQueues,
        touched: &TouchedSet,
        side: Side,
        out: &mut Vec<Change>,
    ) -> MatchOutcome {
        let opposite = side.opposite();
        let best = self.best_candidate(queues, touched, side);

        match best {
            Some((index, score)) if score.ratio > 0.0 && score.is_above_threshold(self.config) => {
                queues.emit_front(opposite, index, out);
                if let (Some(left), Some(right)) = (queues.pop(Side::Left), queues.pop(Side::Right)) {
                    let diff = Segment::from_spans(diff_chars(&left, &right));
                    out.push(Change::Changed { left, right, diff });
                }

                MatchOutcome::Matched { index, score }
            }
            _ => {
                queues.emit_front(side, 1, out);

                MatchOutcome::Unmatched {
                    best: best.map(|(_, score)| score),
                }
            }
        }
    }

    /// Highest scoring touched candidate; the lowest index wins ties.
    fn best_candidate(
        &self,
        queues: &LineQueues,
        touched: &TouchedSet,
        side: Side,
    ) -> Option<(usize, Score)> {
        let pending = queues.front(side)?;
        let opposite = side.opposite();

        let mut best: Option<(usize, Score)> = None;
        for index in touched.candidates(side) {
            let Some(candidate) = queues.get(opposite, index) else {
                continue;
            };

            let score = match side {
                Side::Left => score(pending, candidate, self.config),
                Side::Right => score(candidate, pending, self.config),
            };
            if best.is_none_or(|(_, top)| score.ratio > top.ratio) {
                best = Some((index, score));
            }
        }

        best
    }
}
