//! Longest matching blocks
//!
//! Sequence matcher over the `char`s of two strings. The longest contiguous
//! matching block is found first, then the unmatched pieces to its left and
//! right are matched the same way until nothing matches. The sum of the
//! block sizes drives [`SequenceMatcher::ratio`].
//!
//! # Complexity
//! - `find_longest_match`: O(len(a) * occurrences in b) time, O(len(b)) space
//! - `quick_ratio` / `real_quick_ratio`: O(len(a) + len(b)) and O(1)

use std::collections::HashMap;

/// Minimum length of `b` before popular elements are dropped from the index.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A matching block: `a[a..a + size] == b[b..b + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Compares two strings by their longest matching blocks.
///
/// The index is built over `b`; swapping the arguments can change the
/// result of [`ratio`](Self::ratio) for some inputs.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// char of `b` -> ascending positions in `b`, popular chars removed
    b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    /// Matcher with the popular-element heuristic enabled
    pub fn new(a: &str, b: &str) -> Self {
        Self::with_autojunk(a, b, true)
    }

    /// Matcher with explicit control over the popular-element heuristic.
    ///
    /// With `autojunk`, once `b` has at least 200 chars, any char occurring
    /// more than `len(b) / 100 + 1` times cannot start a match. Matches found
    /// from other chars are still extended across popular ones.
    pub fn with_autojunk(a: &str, b: &str, autojunk: bool) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let b2j = index_positions(&b, autojunk);
        Self { a, b, b2j }
    }

    /// Find the longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among blocks of equal size, the one starting earliest in `a` wins, and
    /// of those the one starting earliest in `b`. Returns a block of size 0 at
    /// `(alo, blo)` when nothing matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);

        // j2len[j] = length of the match ending at a[i - 1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        let mut next_j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            next_j2len.clear();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            std::mem::swap(&mut j2len, &mut next_j2len);
        }

        // Popular chars are missing from the index; grow across them.
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        Match {
            a: besti,
            b: bestj,
            size: bestsize,
        }
    }

    /// All matching blocks, ordered by position, adjacent blocks merged.
    ///
    /// The last entry is always the sentinel `Match { a: len(a), b: len(b), size: 0 }`.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());

        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
        }
        blocks.sort_unstable();

        let mut merged = Vec::with_capacity(blocks.len() + 1);
        let mut current = Match { a: 0, b: 0, size: 0 };
        for m in blocks {
            if current.a + current.size == m.a && current.b + current.size == m.b {
                current.size += m.size;
            } else {
                if current.size > 0 {
                    merged.push(current);
                }
                current = m;
            }
        }
        if current.size > 0 {
            merged.push(current);
        }
        merged.push(Match {
            a: la,
            b: lb,
            size: 0,
        });
        merged
    }

    /// Similarity in [0.0, 1.0]: `2 * matched / (len(a) + len(b))`.
    ///
    /// Two empty strings are identical, so their ratio is 1.0.
    pub fn ratio(&self) -> f64 {
        let matched: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        calculate_ratio(matched, self.a.len() + self.b.len())
    }

    /// Upper bound on [`ratio`](Self::ratio) from shared char counts, ignoring order.
    pub fn quick_ratio(&self) -> f64 {
        let mut available: HashMap<char, usize> = HashMap::new();
        for &c in &self.b {
            *available.entry(c).or_insert(0) += 1;
        }

        let mut matched = 0;
        for c in &self.a {
            if let Some(count) = available.get_mut(c) {
                if *count > 0 {
                    *count -= 1;
                    matched += 1;
                }
            }
        }
        calculate_ratio(matched, self.a.len() + self.b.len())
    }

    /// Upper bound on [`quick_ratio`](Self::quick_ratio) from the lengths alone.
    pub fn real_quick_ratio(&self) -> f64 {
        let (la, lb) = (self.a.len(), self.b.len());
        calculate_ratio(la.min(lb), la + lb)
    }
}

fn index_positions(b: &[char], autojunk: bool) -> HashMap<char, Vec<usize>> {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }

    if autojunk && b.len() >= AUTOJUNK_MIN_LEN {
        let limit = b.len() / 100 + 1;
        b2j.retain(|_, positions| positions.len() <= limit);
    }
    b2j
}

fn calculate_ratio(matched: usize, length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        2.0 * matched as f64 / length as f64
    }
}
