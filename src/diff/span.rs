use crate::diff::myers::{Edit, MyersDiff};
use derive_new::new;
use std::iter::Peekable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Common,
    OnlyLeft,
    OnlyRight,
}

/// A maximal run of common, left-only or right-only text.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Span {
    pub kind: SpanKind,
    pub value: String,
}

/// Splits text into lines, keeping each trailing `'\n'`.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

pub fn diff_chars(a: &str, b: &str) -> Vec<Span> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    char_spans(&a, &b).collect()
}

/// Char level spans, computed only as far as they are consumed.
pub fn char_spans<'d>(a: &'d [char], b: &'d [char]) -> impl Iterator<Item = Span> + 'd {
    Coalesce::new(MyersDiff::new(a, b).edits(), |buffer: &mut String, atom: char| {
        buffer.push(atom)
    })
}

pub fn diff_lines(a: &str, b: &str) -> Vec<Span> {
    let a = split_lines(a);
    let b = split_lines(b);

    Coalesce::new(MyersDiff::new(&a, &b).edits(), |buffer: &mut String, atom: &str| {
        buffer.push_str(atom)
    })
    .collect()
}

/// Folds a per-atom edit script into spans. Deletions and insertions found
/// between two common runs are gathered into one left-only span followed by
/// one right-only span, whatever order the edit script visits them in.
struct Coalesce<I: Iterator, F> {
    edits: Peekable<I>,
    append: F,
    pending: Option<Span>,
}

impl<I: Iterator, F> Coalesce<I, F> {
    fn new(edits: I, append: F) -> Self {
        Coalesce {
            edits: edits.peekable(),
            append,
            pending: None,
        }
    }
}

impl<T, I, F> Iterator for Coalesce<I, F>
where
    I: Iterator<Item = Edit<T>>,
    F: FnMut(&mut String, T),
{
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if let Some(span) = self.pending.take() {
            return Some(span);
        }

        let first = self.edits.next()?;
        let common_run = matches!(first, Edit::Equal { .. });
        let (mut common, mut deleted, mut inserted) = (String::new(), String::new(), String::new());

        let mut edit = Some(first);
        while let Some(current) = edit {
            match current {
                Edit::Equal { value } => (self.append)(&mut common, value),
                Edit::Delete { value } => (self.append)(&mut deleted, value),
                Edit::Insert { value } => (self.append)(&mut inserted, value),
            }
            edit = self
                .edits
                .next_if(|next| matches!(next, Edit::Equal { .. }) == common_run);
        }

        if common_run {
            return Some(Span::new(SpanKind::Common, common));
        }

        let inserted = (!inserted.is_empty()).then(|| Span::new(SpanKind::OnlyRight, inserted));
        if deleted.is_empty() {
            inserted
        } else {
            self.pending = inserted;
            Some(Span::new(SpanKind::OnlyLeft, deleted))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn joined(spans: &[Span], skip: SpanKind) -> String {
        spans
            .iter()
            .filter(|span| span.kind != skip)
            .map(|span| span.value.as_str())
            .collect()
    }

    #[rstest]
    #[case("a\nb\n", vec!["a\n", "b\n"])]
    #[case("a\nb", vec!["a\n", "b"])]
    #[case("\n\n", vec!["\n", "\n"])]
    #[case("", vec![])]
    fn test_split_lines(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_lines(text), expected);
    }

    #[test]
    fn test_diff_chars_groups_runs() {
        let spans = diff_chars("abcabba", "cbabac");

        assert_eq!(
            spans,
            vec![
                Span::new(SpanKind::OnlyLeft, "ab".to_string()),
                Span::new(SpanKind::Common, "c".to_string()),
                Span::new(SpanKind::OnlyRight, "b".to_string()),
                Span::new(SpanKind::Common, "ab".to_string()),
                Span::new(SpanKind::OnlyLeft, "b".to_string()),
                Span::new(SpanKind::Common, "a".to_string()),
                Span::new(SpanKind::OnlyRight, "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_char_spans_can_stop_early() {
        let a: Vec<char> = "abcabba".chars().collect();
        let b: Vec<char> = "cbabac".chars().collect();

        let first: Vec<Span> = char_spans(&a, &b).take(2).collect();

        assert_eq!(first, diff_chars("abcabba", "cbabac")[..2]);
    }

    #[test]
    fn test_diff_lines_keeps_line_boundaries() {
        let spans = diff_lines("one\ntwo\nthree\n", "one\n2\nthree\nfour");

        assert_eq!(
            spans,
            vec![
                Span::new(SpanKind::Common, "one\n".to_string()),
                Span::new(SpanKind::OnlyLeft, "two\n".to_string()),
                Span::new(SpanKind::OnlyRight, "2\n".to_string()),
                Span::new(SpanKind::Common, "three\n".to_string()),
                Span::new(SpanKind::OnlyRight, "four".to_string()),
            ]
        );
    }

    #[test]
    fn test_diff_of_empty_inputs_is_empty() {
        assert!(diff_chars("", "").is_empty());
        assert!(diff_lines("", "").is_empty());
    }

    #[rstest]
    #[case("kitten", "sitting")]
    #[case("héllo wörld", "hello world")]
    #[case("abc\ndef\n", "abX\ndeY")]
    fn test_spans_reconstruct_inputs(#[case] a: &str, #[case] b: &str) {
        let spans = diff_chars(a, b);

        assert_eq!(joined(&spans, SpanKind::OnlyRight), a);
        assert_eq!(joined(&spans, SpanKind::OnlyLeft), b);
    }
}
