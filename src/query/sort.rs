//! TimSort driven by a two-way comparator.
//!
//! `sort_by` compares with "greater than or not", so ties come back as `Less`
//! and the comparator is not a total order. `slice::sort_by` may panic on
//! such comparators, and its tie placement differs from the JavaScript engine
//! sort the operator is defined against. This routine follows that engine's
//! TimSort: run detection with reversal of "descending" runs, a minimum run
//! length, binary insertion, and the same merge-collapse rules. Merges are
//! plain linear merges (no galloping).

use std::cmp::Ordering;

const MIN_MERGE: usize = 64;

/// Sort `v` in place using `cmp`. Only `cmp(..) == Ordering::Less` is
/// inspected, so the comparator may never return `Equal`.
pub fn two_way_sort<T, F>(v: &mut [T], mut cmp: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    if n < 2 {
        return;
    }
    let min_run = min_run_length(n);
    // (base, len) of each pending run
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut low = 0usize;
    while low < n {
        let mut run_len = count_and_make_run(&mut v[low..], &mut cmp);
        if run_len < min_run {
            let forced = min_run.min(n - low);
            binary_insertion_sort(&mut v[low..low + forced], run_len, &mut cmp);
            run_len = forced;
        }
        runs.push((low, run_len));
        merge_collapse(v, &mut runs, &mut cmp);
        low += run_len;
    }
    merge_force_collapse(v, &mut runs, &mut cmp);
}

fn min_run_length(mut n: usize) -> usize {
    let mut r = 0usize;
    while n >= MIN_MERGE {
        r |= n & 1;
        n >>= 1;
    }
    n + r
}

/// Length of the run starting at `v[0]`. A run whose second element compares
/// `Less` than the first counts as descending and is reversed in place.
fn count_and_make_run<T, F>(v: &mut [T], cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    if v.len() < 2 {
        return v.len();
    }
    let descending = cmp(&v[1], &v[0]) == Ordering::Less;
    let mut run = 2usize;
    while run < v.len() {
        let is_less = cmp(&v[run], &v[run - 1]) == Ordering::Less;
        if is_less != descending {
            break;
        }
        run += 1;
    }
    if descending {
        v[..run].reverse();
    }
    run
}

/// Insert `v[start..]` one by one into the sorted prefix `v[..start]`.
fn binary_insertion_sort<T, F>(v: &mut [T], start: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let start = start.max(1);
    for i in start..v.len() {
        let (mut left, mut right) = (0usize, i);
        while left < right {
            let mid = left + (right - left) / 2;
            if cmp(&v[i], &v[mid]) == Ordering::Less {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        v[left..=i].rotate_right(1);
    }
}

fn run_invariant_established(runs: &[(usize, usize)], n: usize) -> bool {
    if n < 2 {
        return true;
    }
    runs[n - 2].1 > runs[n - 1].1 + runs[n].1
}

fn merge_collapse<T, F>(v: &mut [T], runs: &mut Vec<(usize, usize)>, cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    while runs.len() > 1 {
        let mut n = runs.len() - 2;
        if !run_invariant_established(runs, n + 1) || !run_invariant_established(runs, n) {
            if runs[n - 1].1 < runs[n + 1].1 {
                n -= 1;
            }
            merge_at(v, runs, n, cmp);
        } else if runs[n].1 <= runs[n + 1].1 {
            merge_at(v, runs, n, cmp);
        } else {
            break;
        }
    }
}

fn merge_force_collapse<T, F>(v: &mut [T], runs: &mut Vec<(usize, usize)>, cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    while runs.len() > 1 {
        let mut n = runs.len() - 2;
        if n > 0 && runs[n - 1].1 < runs[n + 1].1 {
            n -= 1;
        }
        merge_at(v, runs, n, cmp);
    }
}

/// Merge pending runs `i` and `i + 1`, which are adjacent in `v`.
fn merge_at<T, F>(v: &mut [T], runs: &mut Vec<(usize, usize)>, i: usize, cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let (base_a, len_a) = runs[i];
    let (base_b, len_b) = runs[i + 1];
    runs[i] = (base_a, len_a + len_b);
    runs.remove(i + 1);
    merge(&mut v[base_a..base_b + len_b], len_a, cmp);
}

/// An element of the right half goes first only when it compares `Less`.
fn merge<T, F>(v: &mut [T], mid: usize, cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let left: Vec<T> = v[..mid].to_vec();
    let (mut i, mut j, mut k) = (0usize, mid, 0usize);
    while i < left.len() && j < v.len() {
        if cmp(&v[j], &left[i]) == Ordering::Less {
            v[k] = v[j].clone();
            j += 1;
        } else {
            v[k] = left[i].clone();
            i += 1;
        }
        k += 1;
    }
    while i < left.len() {
        v[k] = left[i].clone();
        i += 1;
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asc(a: &(i32, char), b: &(i32, char)) -> Ordering {
        if a.0 > b.0 { Ordering::Greater } else { Ordering::Less }
    }

    fn desc(a: &(i32, char), b: &(i32, char)) -> Ordering {
        asc(a, b).reverse()
    }

    fn tags(v: &[(i32, char)]) -> String {
        v.iter().map(|p| p.1).collect()
    }

    #[test]
    fn min_run_matches_reference() {
        assert_eq!(min_run_length(10), 10);
        assert_eq!(min_run_length(63), 63);
        assert_eq!(min_run_length(64), 32);
        assert_eq!(min_run_length(65), 33);
        assert_eq!(min_run_length(200), 50);
    }

    #[test]
    fn equal_keys_reverse_when_ascending() {
        let mut v = vec![(1, 'a'), (1, 'b'), (1, 'c')];
        two_way_sort(&mut v, asc);
        assert_eq!(tags(&v), "cba");
    }

    #[test]
    fn equal_keys_keep_order_when_descending() {
        let mut v = vec![(1, 'a'), (1, 'b'), (1, 'c')];
        two_way_sort(&mut v, desc);
        assert_eq!(tags(&v), "abc");
    }

    #[test]
    fn mixed_ties_follow_binary_insertion() {
        let mut v = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        two_way_sort(&mut v, asc);
        assert_eq!(tags(&v), "dbca");
    }

    #[test]
    fn sorts_long_inputs_through_merges() {
        // Linear congruential sequence, long enough to force several runs.
        let mut x: u32 = 12345;
        let mut v: Vec<i64> = (0..1000)
            .map(|_| {
                x = x.wrapping_mul(1_103_515_245).wrapping_add(12345);
                i64::from(x >> 16) % 500
            })
            .collect();
        let mut expected = v.clone();
        expected.sort_unstable();
        two_way_sort(&mut v, |a, b| if a > b { Ordering::Greater } else { Ordering::Less });
        assert_eq!(v, expected);
    }

    #[test]
    fn tiny_inputs_are_untouched() {
        let mut empty: Vec<(i32, char)> = vec![];
        two_way_sort(&mut empty, asc);
        assert!(empty.is_empty());
        let mut one = vec![(5, 'x')];
        two_way_sort(&mut one, asc);
        assert_eq!(one, vec![(5, 'x')]);
    }
}
