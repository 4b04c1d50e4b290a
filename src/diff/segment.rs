use crate::diff::span::{Span, SpanKind};
use std::fmt::Display;

/// Four-way view over a span list: a left-only span directly followed by a
/// right-only span reads as one `Changed` segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Unchanged(String),
    Removed(String),
    Added(String),
    Changed { left: String, right: String },
}

impl Segment {
    pub fn from_spans(spans: impl IntoIterator<Item = Span>) -> Vec<Segment> {
        segments(spans).collect()
    }

    /// Text this segment contributes to the left input.
    pub fn left(&self) -> Option<&str> {
        match self {
            Segment::Unchanged(value) | Segment::Removed(value) => Some(value.as_str()),
            Segment::Changed { left, .. } => Some(left.as_str()),
            Segment::Added(_) => None,
        }
    }

    /// Text this segment contributes to the right input.
    pub fn right(&self) -> Option<&str> {
        match self {
            Segment::Unchanged(value) | Segment::Added(value) => Some(value.as_str()),
            Segment::Changed { right, .. } => Some(right.as_str()),
            Segment::Removed(_) => None,
        }
    }
}

/// Lazy form of [`Segment::from_spans`].
pub fn segments(spans: impl IntoIterator<Item = Span>) -> impl Iterator<Item = Segment> {
    let mut spans = spans.into_iter().peekable();

    std::iter::from_fn(move || {
        let span = spans.next()?;
        let segment = match span.kind {
            SpanKind::Common => Segment::Unchanged(span.value),
            SpanKind::OnlyRight => Segment::Added(span.value),
            SpanKind::OnlyLeft => match spans.next_if(|next| next.kind == SpanKind::OnlyRight) {
                Some(added) => Segment::Changed {
                    left: span.value,
                    right: added.value,
                },
                None => Segment::Removed(span.value),
            },
        };
        Some(segment)
    })
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Unchanged(value) => write!(f, " {value:?}"),
            Segment::Removed(value) => write!(f, "-{value:?}"),
            Segment::Added(value) => write!(f, "+{value:?}"),
            Segment::Changed { left, right } => write!(f, "*{left:?} -> {right:?}"),
        }
    }
}
