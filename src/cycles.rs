//! Cycle decomposition of permutations.
use std::fmt;

use crate::action::LeftAction;
use crate::codec;
use crate::perm::Permutation;
use crate::El;

/// Iterator over the points of a permutation's cycle.
#[derive(Clone)]
pub struct Cycle<'a> {
    perm: &'a Permutation,
    pos: Option<El>,
    start: El,
}

impl<'a> Cycle<'a> {
    pub(crate) fn new(perm: &'a Permutation, start: El) -> Cycle<'a> {
        Cycle {
            perm,
            pos: Some(start),
            start,
        }
    }
}

impl<'a> Iterator for Cycle<'a> {
    type Item = El;

    fn next(&mut self) -> Option<El> {
        self.pos.map(|pos| {
            let next = self.perm.left_apply(pos);
            self.pos = if next == self.start { None } else { Some(next) };

            pos
        })
    }
}

/// Writes the cycle in cycle notation, e.g. `(0A3)`.
impl<'a> fmt::Display for Cycle<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        codec::write_cycle(f, self.clone())
    }
}

impl<'a> fmt::Debug for Cycle<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Iterator over the proper cycles of a permutation.
///
/// Cycles are produced in order of their smallest point and each cycle starts at its smallest
/// point.
#[derive(Clone)]
pub struct Cycles<'a> {
    perm: &'a Permutation,
    seen: Vec<bool>,
    pos: El,
}

impl<'a> Cycles<'a> {
    pub(crate) fn new(perm: &'a Permutation) -> Cycles<'a> {
        Cycles {
            perm,
            seen: vec![false; perm.len()],
            pos: perm.base(),
        }
    }

    fn offset(&self, el: El) -> usize {
        (el - self.perm.base()) as usize
    }
}

impl<'a> Iterator for Cycles<'a> {
    type Item = Cycle<'a>;

    fn next(&mut self) -> Option<Cycle<'a>> {
        loop {
            let offset = self.offset(self.pos);
            // Past the domain every point is fixed, so no further cycles can start
            if offset >= self.seen.len() {
                return None;
            } else if self.seen[offset] || self.perm.left_apply(self.pos) == self.pos {
                self.pos += 1;
            } else {
                let cycle = Cycle::new(self.perm, self.pos);
                for el in cycle.clone() {
                    let offset = self.offset(el);
                    self.seen[offset] = true;
                }
                return Some(cycle);
            }
        }
    }
}

/// Collect all proper cycles of a permutation.
pub(crate) fn decompose(perm: &Permutation) -> Vec<Vec<El>> {
    trace_log!(len = perm.len(), "computing cycle decomposition");
    Cycles::new(perm).map(Iterator::collect).collect()
}
