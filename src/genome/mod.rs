use log::{debug, info};

use crate::error::{GenomeError, Result};
use crate::gene::{GeneInserter, GenePlacement, Strand};
use crate::scrub::Scrubber;
use crate::seq::{self, DEFAULT_SEED, MAX_SIZE};
use crate::table::insert_placements;

pub const MIN_SIZE: usize = 50;

#[derive(Clone, Debug)]
pub struct Params {
    pub size: usize,
    pub seed: u32,
    pub placements: Vec<GenePlacement>,
}

/// The two genes every default genome carries: one forward gene 40bp from the end,
/// then one reverse gene whose coordinates run backwards over the same window.
pub fn demo_placements(size: usize) -> Vec<GenePlacement> {
    vec![
        GenePlacement::new(size - 40, size - 10, Strand::Forward),
        GenePlacement::new(size - 10, size - 40, Strand::Reverse),
    ]
}

impl Params {
    pub fn new(size: usize, seed: u32, placements: Vec<GenePlacement>) -> Result<Self> {
        if size < MIN_SIZE {
            return Err(GenomeError::BelowMinimum { size, min: MIN_SIZE });
        }
        if size > MAX_SIZE {
            return Err(GenomeError::OutOfRange { size, max: MAX_SIZE });
        }
        Ok(Params { size, seed, placements })
    }

    pub fn demo(size: usize) -> Result<Self> {
        if size < MIN_SIZE {
            return Err(GenomeError::BelowMinimum { size, min: MIN_SIZE });
        }
        Params::new(size, DEFAULT_SEED, demo_placements(size))
    }
}

/// Generate, scrub, then insert every placement in order.
pub fn build(params: &Params) -> Result<Vec<u8>> {
    let sequence = seq::generate_with_seed(params.size, params.seed)?;
    debug!("generated {}bp with seed {}", sequence.len(), params.seed);

    let scrubbed = Scrubber::default().run(&sequence);
    info!(
        "scrubbed start codons in {} pass(es){}",
        scrubbed.passes,
        if scrubbed.converged { "" } else { " (pass cap reached)" }
    );

    let genome = insert_placements(&scrubbed.sequence, &params.placements, &GeneInserter::default())?;
    info!("inserted {} gene(s), genome is {}bp", params.placements.len(), genome.len());
    Ok(genome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_genome() {
        let genome = build(&Params::demo(100).unwrap()).unwrap();
        assert_eq!(genome.len(), 134);
        assert_eq!(&genome[60..63], b"CTG");
        assert_eq!(&genome[90..93], b"CAG");
        assert_eq!(genome, build(&Params::demo(100).unwrap()).unwrap());
    }

    #[test]
    fn test_size_limits() {
        assert!(matches!(Params::demo(49), Err(GenomeError::BelowMinimum { size: 49, min: 50 })));
        assert!(matches!(
            Params::new(MAX_SIZE + 1, DEFAULT_SEED, vec![]),
            Err(GenomeError::OutOfRange { .. })
        ));
        assert!(Params::demo(50).is_ok());
    }

    #[test]
    fn test_no_placements_is_scrubbed_sequence() {
        let params = Params::new(200, DEFAULT_SEED, vec![]).unwrap();
        let genome = build(&params).unwrap();
        assert_eq!(genome, crate::scrub::scrub_start_codons(&seq::generate(200).unwrap()));
    }
}
