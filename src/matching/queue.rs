use crate::change::{Change, Side};
use crate::diff::span::split_lines;
use std::collections::VecDeque;

/// Lines of both sides of a changed block that still await a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineQueues {
    queues: [VecDeque<String>; 2],
}

impl LineQueues {
    pub fn new(left: &str, right: &str) -> Self {
        let queue = |text: &str| -> VecDeque<String> {
            split_lines(text).into_iter().map(str::to_string).collect()
        };
        LineQueues {
            queues: [queue(left), queue(right)],
        }
    }

    pub fn len(&self, side: Side) -> usize {
        self.queues[side.index()].len()
    }

    pub fn is_empty(&self, side: Side) -> bool {
        self.queues[side.index()].is_empty()
    }

    pub fn both_pending(&self) -> bool {
        Side::BOTH.iter().all(|&side| !self.is_empty(side))
    }

    pub fn total(&self) -> usize {
        self.len(Side::Left) + self.len(Side::Right)
    }

    pub fn front(&self, side: Side) -> Option<&str> {
        self.get(side, 0)
    }

    pub fn get(&self, side: Side, idx: usize) -> Option<&str> {
        self.queues[side.index()].get(idx).map(String::as_str)
    }

    pub fn pop(&mut self, side: Side) -> Option<String> {
        self.queues[side.index()].pop_front()
    }

    /// The remaining lines of `side` joined back into one text.
    pub fn joined(&self, side: Side) -> String {
        self.queues[side.index()].iter().map(String::as_str).collect()
    }

    /// Emits the first `count` lines of `side` as one-sided changes.
    pub fn emit_front(&mut self, side: Side, count: usize, out: &mut Vec<Change>) {
        for _ in 0..count {
            match self.pop(side) {
                Some(line) => out.push(Change::one_sided(side, line)),
                None => break,
            }
        }
    }

    /// Emits every remaining line, left side first.
    pub fn flush(&mut self, out: &mut Vec<Change>) {
        for side in Side::BOTH {
            let count = self.len(side);
            self.emit_front(side, count, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_queues_split_lines() {
        let queues = LineQueues::new("a\nb", "c\n");

        assert_eq!(queues.len(Side::Left), 2);
        assert_eq!(queues.len(Side::Right), 1);
        assert_eq!(queues.get(Side::Left, 1), Some("b"));
        assert_eq!(queues.joined(Side::Left), "a\nb");
        assert!(queues.both_pending());
    }

    #[test]
    fn test_emit_front_stops_at_empty_queue() {
        let mut queues = LineQueues::new("a\n", "x\ny\n");
        let mut out = Vec::new();

        queues.emit_front(Side::Left, 3, &mut out);

        assert_eq!(
            out,
            vec![Change::Removed {
                left: "a\n".to_string()
            }]
        );
        assert!(!queues.both_pending());
    }

    #[test]
    fn test_flush_emits_left_then_right() {
        let mut queues = LineQueues::new("a\n", "x\ny");
        let mut out = Vec::new();

        queues.flush(&mut out);

        assert_eq!(
            out,
            vec![
                Change::Removed {
                    left: "a\n".to_string()
                },
                Change::Added {
                    right: "x\n".to_string()
                },
                Change::Added {
                    right: "y".to_string()
                },
            ]
        );
        assert_eq!(queues.total(), 0);
    }
}
