/// Calibration of the line matching heuristic.
///
/// The defaults are empirical and kept for behavioral compatibility; a
/// candidate pairing is accepted when its ratio reaches `ratio_threshold`, or
/// when it reaches `containment_ratio_threshold` while at least
/// `containment_threshold` of the shorter line is matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    pub ratio_threshold: f64,
    pub containment_ratio_threshold: f64,
    pub containment_threshold: f64,
    /// Cap on the number of matched fragments counted by the fragmentation
    /// penalty.
    pub max_fragments: usize,
}

pub const DEFAULT_RATIO_THRESHOLD: f64 = 0.45;
pub const DEFAULT_CONTAINMENT_RATIO_THRESHOLD: f64 = 0.25;
pub const DEFAULT_CONTAINMENT_THRESHOLD: f64 = 0.75;
pub const DEFAULT_MAX_FRAGMENTS: usize = 1000;

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            ratio_threshold: DEFAULT_RATIO_THRESHOLD,
            containment_ratio_threshold: DEFAULT_CONTAINMENT_RATIO_THRESHOLD,
            containment_threshold: DEFAULT_CONTAINMENT_THRESHOLD,
            max_fragments: DEFAULT_MAX_FRAGMENTS,
        }
    }
}

impl MatchConfig {
    pub fn with_ratio_threshold(mut self, threshold: f64) -> Self {
        self.ratio_threshold = threshold;
        self
    }

    pub fn with_containment_ratio_threshold(mut self, threshold: f64) -> Self {
        self.containment_ratio_threshold = threshold;
        self
    }

    pub fn with_containment_threshold(mut self, threshold: f64) -> Self {
        self.containment_threshold = threshold;
        self
    }

    pub fn with_max_fragments(mut self, max_fragments: usize) -> Self {
        self.max_fragments = max_fragments;
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("ratio_threshold", self.ratio_threshold),
            ("containment_ratio_threshold", self.containment_ratio_threshold),
            ("containment_threshold", self.containment_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{name} must be within [0, 1], got {value}");
            }
        }

        if self.max_fragments == 0 {
            anyhow::bail!("max_fragments must be positive");
        }

        Ok(())
    }
}
