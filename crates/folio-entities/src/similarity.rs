//! Edit-based string similarity.
//!
//! The ratio is `2 * M / T`, where `T` is the combined length of both strings
//! and `M` is the size of the matching blocks found by recursively taking the
//! longest common substring and matching what lies left and right of it.
//! Lengths are counted in chars.

use std::collections::HashMap;

/// Sequences at least this long have their most frequent elements excluded
/// from match seeding.
const POPULAR_MIN_LEN: usize = 200;

/// A run of `size` equal chars at `a[a..a + size]` and `b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    /// Start offset in the first string.
    pub a: usize,
    /// Start offset in the second string.
    pub b: usize,
    /// Length of the run.
    pub size: usize,
}

/// Similarity ratio in [0, 1] between two (already normalized) strings.
///
/// Symmetric: the inputs are ordered before matching, since the block search
/// breaks ties differently depending on argument order. Two empty strings
/// score 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let first: Vec<char> = first.chars().collect();
    let second: Vec<char> = second.chars().collect();

    let total = first.len() + second.len();
    if total == 0 {
        return 1.0;
    }

    let matched: usize = Matcher::new(&first, &second)
        .matching_blocks()
        .iter()
        .map(|block| block.size)
        .sum();

    2.0 * matched as f64 / total as f64
}

/// Matching blocks between `a` and `b`, in increasing offset order.
///
/// Adjacent blocks are collapsed. Unlike [`similarity`] this is not
/// symmetric; offsets refer to the arguments as given.
pub fn matching_blocks(a: &str, b: &str) -> Vec<MatchingBlock> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    Matcher::new(&a, &b).matching_blocks()
}

struct Matcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each char in `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> Matcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        if b.len() >= POPULAR_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Longest equal run within `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among equally long runs the one starting earliest in `a`, then in `b`,
    /// wins.
    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // run length of the match ending at b[j], for the previous row of a
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
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
                    next.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular chars never seed a match; grow the run across them.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        MatchingBlock {
            a: best_i,
            b: best_j,
            size: best_size,
        }
    }

    fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            if alo < block.a && blo < block.b {
                pending.push((alo, block.a, blo, block.b));
            }
            if block.a + block.size < ahi && block.b + block.size < bhi {
                pending.push((block.a + block.size, ahi, block.b + block.size, bhi));
            }
            blocks.push(block);
        }
        blocks.sort();

        let mut collapsed: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match collapsed.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => collapsed.push(block),
            }
        }
        collapsed
    }
}
