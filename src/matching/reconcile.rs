use crate::change::{Change, Side};
use crate::config::MatchConfig;
use crate::diff::segment::{Segment, segments};
use crate::diff::span::char_spans;
use crate::matching::matcher::{LineMatcher, MatchOutcome};
use crate::matching::queue::LineQueues;
use crate::matching::touched::TouchedSet;
use derive_new::new;
use log::{debug, trace};

/// Dumps each scanned segment when built with the `debug_rounds` feature.
macro_rules! debug_round {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_rounds")]
        {
            log::trace!($($arg)*);
        }
    };
}

fn line_breaks(text: &str) -> usize {
    text.matches('\n').count()
}

/// Pairs up the lines of one changed block.
///
/// Each round diffs the *remaining* text of both sides at character level and
/// walks the script until both sides have crossed a line break. The side that
/// crossed fewer breaks gets its first line matched against the opposite lines
/// it touched, i.e. shared at least one common run with. A round consumes at
/// least one line, so a block of `m + n` lines takes at most `m + n` rounds.
/// Only the walked prefix of a round's script is ever computed.
#[derive(Debug, Clone, Copy, new)]
pub struct BlockReconciler<'c> {
    config: &'c MatchConfig,
}

impl BlockReconciler<'_> {
    /// Appends one entry per line of the block to `out` and returns how many
    /// of them pair a left line with a right line.
    pub fn reconcile(&self, left: &str, right: &str, out: &mut Vec<Change>) -> usize {
        let mut queues = LineQueues::new(left, right);
        let matcher = LineMatcher::new(self.config);
        let (mut rounds, mut paired) = (0usize, 0usize);

        debug!(
            "reconciling block of {} left and {} right lines",
            queues.len(Side::Left),
            queues.len(Side::Right)
        );

        while queues.both_pending() {
            let before = queues.total();
            rounds += 1;

            let left_chars: Vec<char> = queues.joined(Side::Left).chars().collect();
            let right_chars: Vec<char> = queues.joined(Side::Right).chars().collect();

            let mut touched = TouchedSet::new(queues.len(Side::Left), queues.len(Side::Right));
            let script = segments(char_spans(&left_chars, &right_chars));
            let side = self.scan(script, &mut queues, &mut touched, out);

            match matcher.match_first(&mut queues, &touched, side, out) {
                MatchOutcome::Matched { index, score } => {
                    paired += 1;
                    trace!(
                        "round {rounds}: {side:?} line paired with opposite line {index} (ratio {:.3})",
                        score.ratio
                    );
                }
                MatchOutcome::Unmatched { best } => {
                    trace!(
                        "round {rounds}: {side:?} line left unmatched (best ratio {:?})",
                        best.map(|score| score.ratio)
                    );
                }
            }

            if queues.total() == before {
                debug!("round {rounds} made no progress, flushing remaining lines");
                break;
            }
        }

        debug!("block reconciled in {rounds} rounds, {paired} lines paired");
        queues.flush(out);
        paired
    }

    /// Walks one round's script, recording touches, and returns the side whose
    /// first line must be decided now. Leading whole lines found only on one
    /// side are emitted on the way. A script that runs out behaves like a
    /// common line break at offset zero.
    fn scan(
        &self,
        segments: impl Iterator<Item = Segment>,
        queues: &mut LineQueues,
        touched: &mut TouchedSet,
        out: &mut Vec<Change>,
    ) -> Side {
        let mut cur_line = [0usize; 2];

        for (position, segment) in segments.enumerate() {
            debug_round!("segment {position}: {segment}");

            match segment {
                Segment::Unchanged(value) => {
                    let first_break = value.find('\n');
                    if first_break != Some(0) {
                        touched.touch(cur_line[Side::Left.index()], cur_line[Side::Right.index()]);
                    }
                    if first_break.is_some() {
                        return fewer_breaks(cur_line);
                    }
                }
                Segment::Removed(value) => {
                    if let Some(side) = one_sided_run(position, Side::Left, &value, &mut cur_line, queues, out) {
                        return side;
                    }
                }
                Segment::Added(value) => {
                    if let Some(side) = one_sided_run(position, Side::Right, &value, &mut cur_line, queues, out) {
                        return side;
                    }
                }
                Segment::Changed { left, right } => {
                    // at most one side of a changed run can hold a line break
                    let broken = [(Side::Left, left), (Side::Right, right)]
                        .into_iter()
                        .map(|(side, value)| (side, line_breaks(&value)))
                        .find(|&(_, breaks)| breaks > 0);

                    if let Some((side, breaks)) = broken {
                        if let Some(side) = crossed(&mut cur_line, side, breaks) {
                            return side;
                        }
                    }
                }
            }
        }

        trace!("edit script exhausted before a line boundary");
        fewer_breaks(cur_line)
    }
}

/// Handles a run present on one side only. A leading run has no possible
/// partner yet, so each whole line it ends is emitted directly.
fn one_sided_run(
    position: usize,
    side: Side,
    value: &str,
    cur_line: &mut [usize; 2],
    queues: &mut LineQueues,
    out: &mut Vec<Change>,
) -> Option<Side> {
    let breaks = line_breaks(value);

    if position == 0 {
        if breaks > 0 {
            trace!("emitting {breaks} leading {side:?} lines without matching");
            queues.emit_front(side, breaks, out);
        }
        None
    } else if breaks > 0 {
        crossed(cur_line, side, breaks)
    } else {
        None
    }
}

/// The side that has crossed fewer line breaks; ties favor the left.
fn fewer_breaks(cur_line: [usize; 2]) -> Side {
    if cur_line[Side::Left.index()] <= cur_line[Side::Right.index()] {
        Side::Left
    } else {
        Side::Right
    }
}

/// Registers `breaks` line breaks on `side`. Returns the side to match if the
/// opposite side already crossed a break this round.
fn crossed(cur_line: &mut [usize; 2], side: Side, breaks: usize) -> Option<Side> {
    if cur_line[side.opposite().index()] > 0 {
        Some(side)
    } else {
        cur_line[side.index()] += breaks;
        None
    }
}
