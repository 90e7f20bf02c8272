// Ratcliff/Obershelp sequence matching over chars.
//
// Find the longest common contiguous run between the two sequences, then
// recurse into the unmatched stretches to its left and right. Matches never
// cross a run chosen at a higher level. The ratio is 2 * matched / total.

use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::mem;

/// Sequences shorter than this never have characters treated as junk.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A matching block: `a[a..a + size] == b[b..b + size]`.
///
/// Field order gives the ordering used to sort blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Run lengths for the previous and current char of `a`, indexed by `j + 1`.
///
/// Only entries listed in the `touched` vectors are nonzero, so moving to the
/// next row clears just those instead of the whole row.
struct Rows {
    prev: Vec<usize>,
    curr: Vec<usize>,
    prev_touched: Vec<usize>,
    curr_touched: Vec<usize>,
}

impl Rows {
    fn new(b_len: usize) -> Self {
        Self {
            prev: vec![0; b_len + 1],
            curr: vec![0; b_len + 1],
            prev_touched: Vec::new(),
            curr_touched: Vec::new(),
        }
    }

    /// Drop the previous row and make the current one previous. Calling it
    /// after the last row leaves both rows zeroed.
    fn advance(&mut self) {
        for &t in &self.prev_touched {
            self.prev[t] = 0;
        }
        self.prev_touched.clear();
        mem::swap(&mut self.prev, &mut self.curr);
        mem::swap(&mut self.prev_touched, &mut self.curr_touched);
    }
}

/// Precomputed matcher for one pair of texts.
pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// Positions of each char of `b`, ascending. Popular chars are left out.
    b2j: HashMap<char, Vec<usize>>,
    popular: HashSet<char>,
    blocks: OnceCell<Vec<Match>>,
}

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        Self::with_autojunk(a, b, false)
    }

    /// With `autojunk`, any char making up more than 1% (+1) of a `b` of at
    /// least 200 chars cannot seed a match. Matches still extend through it.
    pub fn with_autojunk(a: &str, b: &str, autojunk: bool) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        let mut popular = HashSet::new();
        if autojunk && b.len() >= AUTOJUNK_MIN_LEN {
            let threshold = b.len() / 100 + 1;
            b2j.retain(|&c, positions| {
                let keep = positions.len() <= threshold;
                if !keep {
                    popular.insert(c);
                }
                keep
            });
        }

        Self {
            a,
            b,
            b2j,
            popular,
            blocks: OnceCell::new(),
        }
    }

    /// Chars excluded from seeding matches by the autojunk heuristic.
    pub fn popular(&self) -> &HashSet<char> {
        &self.popular
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among equally long blocks the one starting earliest in `a` wins, then
    /// earliest in `b`. Returns a zero-size match at `(alo, blo)` when the
    /// ranges share nothing.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let mut rows = Rows::new(self.b.len());
        self.longest_match_in(alo, ahi, blo, bhi, &mut rows)
    }

    fn longest_match_in(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
        rows: &mut Rows,
    ) -> Match {
        let mut best = Match {
            a: alo,
            b: blo,
            size: 0,
        };

        for i in alo..ahi {
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                let from = positions.partition_point(|&j| j < blo);
                for &j in positions[from..].iter().take_while(|&&j| j < bhi) {
                    let k = rows.prev[j] + 1;
                    rows.curr[j + 1] = k;
                    rows.curr_touched.push(j + 1);
                    if k > best.size {
                        best = Match {
                            a: i + 1 - k,
                            b: j + 1 - k,
                            size: k,
                        };
                    }
                }
            }
            rows.advance();
        }
        rows.advance();

        // Popular chars never seeded a match; grow through them.
        while best.a > alo && best.b > blo && self.a[best.a - 1] == self.b[best.b - 1] {
            best.a -= 1;
            best.b -= 1;
            best.size += 1;
        }
        while best.a + best.size < ahi
            && best.b + best.size < bhi
            && self.a[best.a + best.size] == self.b[best.b + best.size]
        {
            best.size += 1;
        }

        best
    }

    /// All matching blocks, ascending in both sequences, adjacent blocks
    /// merged. Computed on first use and kept for the matcher's lifetime.
    pub fn matching_blocks(&self) -> &[Match] {
        self.blocks.get_or_init(|| self.compute_blocks())
    }

    fn compute_blocks(&self) -> Vec<Match> {
        let mut rows = Rows::new(self.b.len());
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let m = self.longest_match_in(alo, ahi, blo, bhi, &mut rows);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a && blo < m.b {
                pending.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                pending.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
        }
        blocks.sort();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged
    }

    /// Total chars covered by matching blocks.
    pub fn matched_len(&self) -> usize {
        self.matching_blocks().iter().map(|m| m.size).sum()
    }

    /// Combined length of both sequences in chars.
    pub fn total_len(&self) -> usize {
        self.a.len() + self.b.len()
    }

    pub fn ratio(&self) -> f64 {
        match_ratio(self.matched_len(), self.total_len())
    }
}

/// `2 * M / T`, or 1.0 when both sequences are empty.
pub fn match_ratio(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    2.0 * matched as f64 / total as f64
}
