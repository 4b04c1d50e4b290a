use crate::change::{Change, Side};
use crate::config::MatchConfig;
use crate::diff::segment::Segment;
use crate::diff::span::{diff_lines, split_lines};
use crate::matching::reconcile::BlockReconciler;
use log::debug;

/// Line diff whose changed lines also carry a character level diff.
#[derive(Debug, Clone, Default)]
pub struct HybridDiff {
    config: MatchConfig,
}

impl HybridDiff {
    pub fn new(config: MatchConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(HybridDiff { config })
    }

    /// Diffs `left` against `right`, one entry per line.
    ///
    /// Identical runs and runs present on one side only are split into lines
    /// as they are. Blocks replaced by other lines go through the
    /// [`BlockReconciler`], which decides which of their lines are edits of
    /// one another.
    pub fn diff(&self, left: &str, right: &str) -> Vec<Change> {
        if left.is_empty() && right.is_empty() {
            return vec![Change::Unchanged {
                value: String::new(),
            }];
        }

        let reconciler = BlockReconciler::new(&self.config);
        let mut changes = Vec::new();
        let mut paired = 0;

        for segment in Segment::from_spans(diff_lines(left, right)) {
            match segment {
                Segment::Unchanged(value) => {
                    changes.extend(split_lines(&value).into_iter().map(|line| Change::Unchanged {
                        value: line.to_string(),
                    }));
                }
                Segment::Removed(value) => push_lines(&mut changes, Side::Left, &value),
                Segment::Added(value) => push_lines(&mut changes, Side::Right, &value),
                Segment::Changed { left, right } => {
                    paired += reconciler.reconcile(&left, &right, &mut changes);
                }
            }
        }

        debug!(
            "hybrid diff produced {} entries, {paired} of them edited lines",
            changes.len()
        );
        changes
    }
}

fn push_lines(changes: &mut Vec<Change>, side: Side, text: &str) {
    changes.extend(
        split_lines(text)
            .into_iter()
            .map(|line| Change::one_sided(side, line.to_string())),
    );
}

/// [`HybridDiff::diff`] with the default calibration.
pub fn hybrid_diff(left: &str, right: &str) -> Vec<Change> {
    HybridDiff::default().diff(left, right)
}
