//! Removal of incidental start codons.
//!
//! Every window matching a forbidden codon is overwritten with three fresh random
//! bases, pass after pass, until none of the monitored codons is left or the pass
//! cap is reached. Pass `i` draws from a generator seeded with `pass_seed(i)`.

use log::{debug, warn};
use rayon::prelude::*;

use crate::rng::Mt19937;
use crate::seq::random_bases;

pub const MAX_PASSES: usize = 1000;

/// Start codons followed by their reverse complements, in the order they are paired.
pub const DEFAULT_FORBIDDEN: [[u8; 3]; 6] = [*b"ATG", *b"CAT", *b"TTG", *b"CAA", *b"CTG", *b"CAG"];

// only this many leading entries decide whether another pass is needed
const MONITORED: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scrubbed {
    pub sequence: Vec<u8>,
    pub passes: usize,
    pub converged: bool,
}

#[derive(Clone, Debug)]
pub struct Scrubber {
    pub forbidden: Vec<[u8; 3]>,
    pub max_passes: usize,
    pub pass_seed: fn(usize) -> u32,
}

fn pass_index_seed(pass: usize) -> u32 {
    pass as u32
}

impl Default for Scrubber {
    fn default() -> Self {
        Scrubber {
            forbidden: DEFAULT_FORBIDDEN.to_vec(),
            max_passes: MAX_PASSES,
            pass_seed: pass_index_seed,
        }
    }
}

impl Scrubber {
    fn monitored(&self) -> &[[u8; 3]] {
        &self.forbidden[..self.forbidden.len().min(MONITORED)]
    }

    fn needs_pass(&self, sequence: &[u8]) -> bool {
        let monitored = self.monitored();
        sequence
            .par_windows(3)
            .any(|window| monitored.iter().any(|codon| window == codon))
    }

    /// One replacement pass. Matches are found on `sequence` and written to a copy,
    /// in ascending position, so a later overlapping match overwrites an earlier one.
    fn pass(&self, sequence: &[u8], seed: u32) -> Vec<u8> {
        let hits: Vec<usize> = sequence
            .par_windows(3)
            .enumerate()
            .filter(|(_, window)| self.forbidden.iter().any(|codon| *window == codon))
            .map(|(i, _)| i)
            .collect();

        let mut rng = Mt19937::new(seed);
        let mut buffer = sequence.to_vec();
        for i in hits {
            buffer[i..i + 3].copy_from_slice(&random_bases(&mut rng, 3));
        }
        buffer
    }

    pub fn run(&self, sequence: &[u8]) -> Scrubbed {
        let mut current = sequence.to_vec();
        let mut passes = 0;
        loop {
            if !self.needs_pass(&current) {
                debug!("start codons scrubbed after {} pass(es)", passes);
                return Scrubbed { sequence: current, passes, converged: true };
            }
            if passes == self.max_passes {
                warn!(
                    "start codons still present after {} passes, keeping best effort sequence",
                    passes
                );
                return Scrubbed { sequence: current, passes, converged: false };
            }
            current = self.pass(&current, (self.pass_seed)(passes));
            passes += 1;
        }
    }
}

/// Scrub with the default codon set, pass cap and per-pass seeding.
pub fn scrub_start_codons(sequence: &[u8]) -> Vec<u8> {
    Scrubber::default().run(sequence).sequence
}
