use rand::{Rng, rngs::StdRng};

use super::Deadline;

const IMPROVEMENT_EPSILON: f64 = 1e-7;
const MAX_SEGMENT_LEN: usize = 3;

/// First-improvement descent with 2-opt and or-opt moves.
///
/// Returns `false` when the deadline interrupted the descent before a local
/// minimum was reached. `symmetric` lets 2-opt skip re-pricing the reversed
/// segment.
pub(crate) fn descend<W>(
    seq: &mut Vec<usize>,
    weight: &W,
    symmetric: bool,
    deadline: &Deadline,
    rng: &mut StdRng,
) -> bool
where
    W: Fn(usize, usize) -> f64,
{
    let interior = seq.len().saturating_sub(2);
    if interior < 2 {
        return true;
    }

    loop {
        let offset = rng.random_range(0..interior);
        let mut improved = false;

        for step in 0..interior {
            if deadline.expired() {
                return false;
            }
            let i = 1 + (step + offset) % interior;
            improved |= two_opt(seq, i, weight, symmetric);
            improved |= or_opt(seq, i, weight);
        }

        if !improved {
            return true;
        }
    }
}

/// Cost change of reversing `seq[i..=j]`.
fn two_opt_delta<W>(seq: &[usize], i: usize, j: usize, weight: &W, symmetric: bool) -> f64
where
    W: Fn(usize, usize) -> f64,
{
    let (a, b, c, d) = (seq[i - 1], seq[i], seq[j], seq[j + 1]);
    let mut delta = weight(a, c) + weight(b, d) - weight(a, b) - weight(c, d);

    if !symmetric {
        for k in i..j {
            delta += weight(seq[k + 1], seq[k]) - weight(seq[k], seq[k + 1]);
        }
    }
    delta
}

fn two_opt<W>(seq: &mut [usize], i: usize, weight: &W, symmetric: bool) -> bool
where
    W: Fn(usize, usize) -> f64,
{
    let last = seq.len() - 1;
    for j in i + 1..last {
        if two_opt_delta(seq, i, j, weight, symmetric) < -IMPROVEMENT_EPSILON {
            seq[i..=j].reverse();
            return true;
        }
    }
    false
}

/// Moves `seq[i..i + len]` (len 1..=3) between `seq[p]` and `seq[p + 1]`.
fn or_opt<W>(seq: &mut Vec<usize>, i: usize, weight: &W) -> bool
where
    W: Fn(usize, usize) -> f64,
{
    let last = seq.len() - 1;

    for len in 1..=MAX_SEGMENT_LEN {
        if i + len > last {
            break;
        }

        let (prev, first, tail, next) = (seq[i - 1], seq[i], seq[i + len - 1], seq[i + len]);
        let removal = weight(prev, next) - weight(prev, first) - weight(tail, next);

        for p in 0..last {
            if p + 1 >= i && p < i + len {
                continue;
            }
            let (u, v) = (seq[p], seq[p + 1]);
            let delta = removal + weight(u, first) + weight(tail, v) - weight(u, v);

            if delta < -IMPROVEMENT_EPSILON {
                relocate(seq, i, len, p);
                return true;
            }
        }
    }
    false
}

fn relocate(seq: &mut Vec<usize>, i: usize, len: usize, p: usize) {
    let segment: Vec<usize> = seq.drain(i..i + len).collect();
    let at = if p < i { p + 1 } else { p + 1 - len };
    seq.splice(at..at, segment);
}
