use derive_new::new;
use std::cmp::Reverse;
use std::ops::{Index, IndexMut, Range};

/// Sub-problems of at most this many atoms, both sides together, are solved
/// by the greedy forward search.
const GREEDY_LIMIT: usize = 512;

/// Edit distances the middle snake search explores, at the least, before it
/// settles for the furthest point reached from the start.
const MIN_SEARCH_COST: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Delete { value: T },
    Insert { value: T },
    Equal { value: T },
}

impl<T> Edit<T> {
    pub fn value(&self) -> &T {
        match self {
            Edit::Delete { value } | Edit::Insert { value } | Edit::Equal { value } => value,
        }
    }
}

pub trait DiffAlgorithm {
    type EditScript;

    fn diff(&self) -> Self::EditScript;
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<'d, T: Eq + Clone> MyersDiff<'d, T> {
    /// The shortest edit script, produced lazily from the front.
    ///
    /// Inputs are split around middle snakes until the remaining pieces are
    /// small enough for the greedy search, so memory stays linear in the input
    /// and a consumer reading only a prefix of the script pays mostly for that
    /// prefix. Past a few hundred edits the middle snake search stops looking
    /// for the optimum and splits at the furthest point it reached.
    pub fn edits(&self) -> Edits<'d, T> {
        let max_d = (self.a.len() + self.b.len()).div_ceil(2) + 1;

        Edits {
            a: self.a,
            b: self.b,
            forward: Frontier::new(max_d),
            backward: Frontier::new(max_d),
            max_cost: (self.a.len() + self.b.len()).isqrt().max(MIN_SEARCH_COST) as isize,
            tasks: vec![Task::Conquer {
                old: 0..self.a.len(),
                new: 0..self.b.len(),
            }],
        }
    }
}

impl<T: Eq + Clone> DiffAlgorithm for MyersDiff<'_, T> {
    type EditScript = Vec<Edit<T>>;

    fn diff(&self) -> Self::EditScript {
        self.edits().collect()
    }
}

/// Furthest reaching `x` per diagonal `k`.
#[derive(Debug, Clone)]
struct Frontier {
    offset: isize,
    xs: Vec<isize>,
}

impl Frontier {
    fn new(max_d: usize) -> Self {
        Frontier {
            offset: max_d as isize,
            xs: vec![0; 2 * max_d + 1],
        }
    }
}

impl Index<isize> for Frontier {
    type Output = isize;

    fn index(&self, k: isize) -> &isize {
        &self.xs[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut isize {
        &mut self.xs[(k + self.offset) as usize]
    }
}

#[derive(Debug)]
enum Task<T> {
    Conquer { old: Range<usize>, new: Range<usize> },
    Equal(Range<usize>),
    Delete(Range<usize>),
    Insert(Range<usize>),
    Script(std::vec::IntoIter<Edit<T>>),
}

/// Iterator over the edit script of a [`MyersDiff`].
#[derive(Debug)]
pub struct Edits<'d, T> {
    a: &'d [T],
    b: &'d [T],
    forward: Frontier,
    backward: Frontier,
    max_cost: isize,
    // run in reverse push order
    tasks: Vec<Task<T>>,
}

impl<T: Eq + Clone> Iterator for Edits<'_, T> {
    type Item = Edit<T>;

    fn next(&mut self) -> Option<Edit<T>> {
        let (a, b) = (self.a, self.b);

        loop {
            let edit = match self.tasks.last_mut()? {
                Task::Equal(range) => range.next().map(|x| Edit::Equal { value: a[x].clone() }),
                Task::Delete(range) => range.next().map(|x| Edit::Delete { value: a[x].clone() }),
                Task::Insert(range) => range.next().map(|y| Edit::Insert { value: b[y].clone() }),
                Task::Script(script) => script.next(),
                Task::Conquer { .. } => None,
            };
            if edit.is_some() {
                return edit;
            }

            if let Some(Task::Conquer { old, new }) = self.tasks.pop() {
                self.conquer(old, new);
            }
        }
    }
}

impl<T: Eq + Clone> Edits<'_, T> {
    fn conquer(&mut self, mut old: Range<usize>, mut new: Range<usize>) {
        let prefix = common_prefix(&self.a[old.clone()], &self.b[new.clone()]);
        let head = old.start..old.start + prefix;
        old.start += prefix;
        new.start += prefix;

        let suffix = common_suffix(&self.a[old.clone()], &self.b[new.clone()]);
        let tail = old.end - suffix..old.end;
        old.end -= suffix;
        new.end -= suffix;

        self.tasks.push(Task::Equal(tail));
        if old.is_empty() || new.is_empty() {
            self.tasks.push(Task::Insert(new));
            self.tasks.push(Task::Delete(old));
        } else if old.len() + new.len() <= GREEDY_LIMIT {
            let script = greedy_script(&self.a[old], &self.b[new]);
            self.tasks.push(Task::Script(script.into_iter()));
        } else if let Some((x, y)) = self.middle_snake(old.clone(), new.clone()) {
            self.tasks.push(Task::Conquer {
                old: x..old.end,
                new: y..new.end,
            });
            self.tasks.push(Task::Conquer {
                old: old.start..x,
                new: new.start..y,
            });
        } else {
            self.tasks.push(Task::Insert(new));
            self.tasks.push(Task::Delete(old));
        }
        self.tasks.push(Task::Equal(head));
    }

    /// A point on a shortest path through `old` x `new`, found by running the
    /// search from both ends until the two frontiers overlap.
    fn middle_snake(&mut self, old: Range<usize>, new: Range<usize>) -> Option<(usize, usize)> {
        let (a, b) = (&self.a[old.clone()], &self.b[new.clone()]);
        let (n, m) = (a.len() as isize, b.len() as isize);
        let delta = n - m;
        let odd = delta & 1 == 1;
        let (forward, backward) = (&mut self.forward, &mut self.backward);

        forward[1] = 0;
        backward[1] = 0;

        for d in 0..=(n + m + 1) / 2 {
            for k in (-d..=d).rev().step_by(2) {
                let x = if k == -d || (k != d && forward[k - 1] < forward[k + 1]) {
                    forward[k + 1]
                } else {
                    forward[k - 1] + 1
                };
                let y = x - k;

                forward[k] = x + snake_from_start(a, b, x, y);

                if odd && (k - delta).abs() < d && forward[k] + backward[delta - k] >= n {
                    return split_point(&old, &new, x, y);
                }
            }

            for k in (-d..=d).rev().step_by(2) {
                let x = if k == -d || (k != d && backward[k - 1] < backward[k + 1]) {
                    backward[k + 1]
                } else {
                    backward[k - 1] + 1
                };
                let snake = snake_from_end(a, b, x, x - k);
                let (x, y) = (x + snake, x + snake - k);

                backward[k] = x;

                if !odd && (k - delta).abs() <= d && backward[k] + forward[delta - k] >= n {
                    return split_point(&old, &new, n - x, m - y);
                }
            }

            if d >= self.max_cost {
                return (-d..=d)
                    .step_by(2)
                    .map(|k| (forward[k], forward[k] - k))
                    .filter(|&(x, y)| x <= n && (0..=m).contains(&y) && (1..n + m).contains(&(x + y)))
                    .min_by_key(|&(x, y)| Reverse(x + y))
                    .and_then(|(x, y)| split_point(&old, &new, x, y));
            }
        }

        None
    }
}

fn split_point(old: &Range<usize>, new: &Range<usize>, x: isize, y: isize) -> Option<(usize, usize)> {
    let x = usize::try_from(x).ok().filter(|&x| x <= old.len())?;
    let y = usize::try_from(y).ok().filter(|&y| y <= new.len())?;

    Some((old.start + x, new.start + y))
}

fn common_prefix<T: Eq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix<T: Eq>(a: &[T], b: &[T]) -> usize {
    a.iter().rev().zip(b.iter().rev()).take_while(|(x, y)| x == y).count()
}

fn snake_from_start<T: Eq>(a: &[T], b: &[T], x: isize, y: isize) -> isize {
    match (usize::try_from(x), usize::try_from(y)) {
        (Ok(x), Ok(y)) if x < a.len() && y < b.len() => common_prefix(&a[x..], &b[y..]) as isize,
        _ => 0,
    }
}

/// Like [`snake_from_start`], with `x` and `y` counted back from the ends.
fn snake_from_end<T: Eq>(a: &[T], b: &[T], x: isize, y: isize) -> isize {
    match (usize::try_from(x), usize::try_from(y)) {
        (Ok(x), Ok(y)) if x < a.len() && y < b.len() => {
            common_suffix(&a[..a.len() - x], &b[..b.len() - y]) as isize
        }
        _ => 0,
    }
}

/// One snapshot of the furthest-reaching `x` per diagonal, taken before
/// exploring edit distance `d`. Only diagonals `-(d + 1)..=(d + 1)` are kept,
/// which is all the backtracking step ever reads back.
#[derive(Debug, Clone)]
struct Snapshot {
    radius: isize,
    xs: Vec<isize>,
}

impl Snapshot {
    fn capture(v: &[isize], offset: isize, d: isize) -> Self {
        let radius = d + 1;
        let xs = (-radius..=radius)
            .map(|k| {
                usize::try_from(offset + k)
                    .ok()
                    .and_then(|idx| v.get(idx).copied())
                    .unwrap_or(0)
            })
            .collect();
        Snapshot { radius, xs }
    }

    fn at(&self, k: isize) -> isize {
        self.xs[(k + self.radius) as usize]
    }
}

/// Forward pass of the greedy search, one snapshot per explored distance.
fn greedy_trace<T: Eq>(a: &[T], b: &[T]) -> Vec<Snapshot> {
    let (n, m) = (a.len() as isize, b.len() as isize);
    let offset = n + m;

    // one spare slot so that `v[idx + 1]` stays in bounds on the outermost diagonal
    let mut v = vec![0; (2 * offset + 2) as usize];

    let mut trace = Vec::new();

    for d in 0..=(n + m) {
        trace.push(Snapshot::capture(&v, offset, d));

        for k in (-d..=d).step_by(2) {
            let idx = (offset + k) as usize;

            let mut x = if k == -d {
                // we could have only come from k+1, thus an insertion
                v[idx + 1]
            } else if k == d {
                // we could have only come from k-1, thus a deletion
                v[idx - 1] + 1
            } else {
                let x_del = v[idx - 1] + 1;
                let x_ins = v[idx + 1];
                if x_del > x_ins { x_del } else { x_ins }
            };

            let mut y = x - k;
            while x < n && y < m && a[x as usize] == b[y as usize] {
                // snake
                x += 1;
                y += 1;
            }

            v[idx] = x;

            if x >= n && y >= m {
                return trace;
            }
        }
    }

    trace
}

/// Shortest edit script of `a` into `b`, backtracked from the greedy trace.
fn greedy_script<T: Eq + Clone>(a: &[T], b: &[T]) -> Vec<Edit<T>> {
    let (mut x, mut y) = (a.len() as isize, b.len() as isize);
    let mut script = Vec::new();

    if a.is_empty() && b.is_empty() {
        return script;
    }

    for (d, snapshot) in greedy_trace(a, b).iter().enumerate().rev() {
        let d = d as isize;
        let k = x - y;

        let prev_k = if k == -d {
            k + 1
        } else if k == d {
            k - 1
        } else if snapshot.at(k - 1) + 1 > snapshot.at(k + 1) {
            k - 1
        } else {
            k + 1
        };

        let prev_x = snapshot.at(prev_k);
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            script.push(Edit::Equal {
                value: a[(x - 1) as usize].clone(),
            });
            x -= 1;
            y -= 1;
        }

        if d > 0 {
            let edit = if x == prev_x {
                b.get(prev_y as usize).map(|value| Edit::Insert { value: value.clone() })
            } else {
                a.get(prev_x as usize).map(|value| Edit::Delete { value: value.clone() })
            };
            script.extend(edit);
        }

        (x, y) = (prev_x, prev_y);
    }

    script.reverse();
    script
}

#[cfg(test)]
mod tests {
    use super::{DiffAlgorithm, Edit, GREEDY_LIMIT, MyersDiff};
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn string_inputs() -> (Vec<char>, Vec<char>) {
        ("abcabba".chars().collect(), "cbabac".chars().collect())
    }

    #[fixture]
    fn line_inputs() -> (Vec<&'static str>, Vec<&'static str>) {
        (
            vec!["line1", "line2", "line3", "line4"],
            vec!["line2", "line3_modified", "line4", "line5"],
        )
    }

    fn sides<T: Copy>(script: &[Edit<T>]) -> (Vec<T>, Vec<T>) {
        let left = script
            .iter()
            .filter(|edit| !matches!(edit, Edit::Insert { .. }))
            .map(|edit| *edit.value())
            .collect();
        let right = script
            .iter()
            .filter(|edit| !matches!(edit, Edit::Delete { .. }))
            .map(|edit| *edit.value())
            .collect();
        (left, right)
    }

    fn edit_count<T>(script: &[Edit<T>]) -> usize {
        script
            .iter()
            .filter(|edit| !matches!(edit, Edit::Equal { .. }))
            .count()
    }

    /// Deterministic pseudo random text over a small alphabet.
    fn noise(seed: u64, len: usize) -> Vec<char> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                b"abcdefgh \n"[(state >> 33) as usize % 10] as char
            })
            .collect()
    }

    #[rstest]
    fn test_diff_strings(string_inputs: (Vec<char>, Vec<char>)) {
        let (a, b) = string_inputs;
        let result = MyersDiff::new(&a, &b).diff();
        let expected = vec![
            Edit::Delete { value: 'a' },
            Edit::Delete { value: 'b' },
            Edit::Equal { value: 'c' },
            Edit::Insert { value: 'b' },
            Edit::Equal { value: 'a' },
            Edit::Equal { value: 'b' },
            Edit::Delete { value: 'b' },
            Edit::Equal { value: 'a' },
            Edit::Insert { value: 'c' },
        ];

        assert_eq!(result, expected);
    }

    #[rstest]
    fn test_diff_lines(line_inputs: (Vec<&'static str>, Vec<&'static str>)) {
        let (a, b) = line_inputs;
        let result = MyersDiff::new(&a, &b).diff();
        let expected = vec![
            Edit::Delete { value: "line1" },
            Edit::Equal { value: "line2" },
            Edit::Delete { value: "line3" },
            Edit::Insert {
                value: "line3_modified",
            },
            Edit::Equal { value: "line4" },
            Edit::Insert { value: "line5" },
        ];

        assert_eq!(result, expected);
    }

    #[rstest]
    #[case("", "")]
    #[case("", "abc")]
    #[case("abc", "")]
    #[case("same", "same")]
    fn test_diff_degenerate_inputs(#[case] a: &str, #[case] b: &str) {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let result = MyersDiff::new(&a, &b).diff();

        assert_eq!(sides(&result), (a, b));
    }

    #[test]
    fn test_large_inputs_keep_a_shortest_script() {
        let a = noise(1, 3 * GREEDY_LIMIT);
        let mut b = a.clone();
        b.insert(1200, 'X');
        b.remove(700);
        b.insert(40, 'Y');

        let result = MyersDiff::new(&a, &b).diff();

        assert_eq!(edit_count(&result), 3);
        assert_eq!(sides(&result), (a, b));
    }

    #[test]
    fn test_unrelated_inputs_are_diffed_in_linear_space() {
        let a = noise(7, 20_000);
        let b = noise(11, 20_000);

        let result = MyersDiff::new(&a, &b).diff();

        assert_eq!(sides(&result), (a, b));
    }

    #[test]
    fn test_edits_stream_a_prefix_of_the_script() {
        let a = noise(3, 4 * GREEDY_LIMIT);
        let b = noise(5, 4 * GREEDY_LIMIT);
        let diff = MyersDiff::new(&a, &b);

        let prefix: Vec<Edit<char>> = diff.edits().take(50).collect();

        assert_eq!(prefix, diff.diff()[..50]);
    }
}
