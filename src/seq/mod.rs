use rayon::prelude::*;

use crate::error::{GenomeError, Result};
use crate::rng::Mt19937;

/// Largest genome the generator accepts.
pub const MAX_SIZE: usize = 100_000_000;
pub const DEFAULT_SEED: u32 = 123;

// draw order matters for reproducibility, not alphabetical
const DRAW_ALPHABET: [u8; 4] = [b'C', b'G', b'T', b'A'];
const UNIFORM: [f64; 4] = [0.25, 0.25, 0.25, 0.25];

struct Complementer;
trait Convert {
    fn convert(&self, value: u8) -> u8;
}

impl Convert for Complementer {
    fn convert(&self, value: u8) -> u8 {
        match value {
            b'A' => b'T',
            b'T' => b'A',
            b'C' => b'G',
            b'G' => b'C',
            other => other,
        }
    }
}

/// Random DNA of `size` bp drawn with the default seed; the same size always
/// yields the same sequence.
pub fn generate(size: usize) -> Result<Vec<u8>> {
    generate_with_seed(size, DEFAULT_SEED)
}

pub fn generate_with_seed(size: usize, seed: u32) -> Result<Vec<u8>> {
    if size > MAX_SIZE {
        return Err(GenomeError::OutOfRange { size, max: MAX_SIZE });
    }
    let mut rng = Mt19937::new(seed);
    Ok(random_bases(&mut rng, size))
}

/// `count` uniform nucleotides from `rng`.
pub(crate) fn random_bases(rng: &mut Mt19937, count: usize) -> Vec<u8> {
    rng.choose_weighted(&DRAW_ALPHABET, &UNIFORM, count)
}

pub fn reverse_complement(sequence: &[u8]) -> Result<Vec<u8>> {
    static COMPLEMENTER: Complementer = Complementer;
    if sequence.contains(&b'U') {
        return Err(GenomeError::InvalidAlphabet);
    }
    Ok(sequence
        .par_iter()
        .rev()
        .map(|&base| COMPLEMENTER.convert(base))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_reference() {
        assert_eq!(generate(10).unwrap(), b"TGCTTGATGG".to_vec());
    }

    #[test]
    fn test_generate_is_deterministic() {
        assert_eq!(generate(500).unwrap(), generate(500).unwrap());
        // a longer draw extends the shorter one
        assert_eq!(&generate(500).unwrap()[..10], b"TGCTTGATGG");
    }

    #[test]
    fn test_generate_length_and_alphabet() {
        for size in [0usize, 1, 7, 70, 1000] {
            let seq = generate(size).unwrap();
            assert_eq!(seq.len(), size);
            assert!(seq.iter().all(|b| b"ACGT".contains(b)));
        }
    }

    #[test]
    fn test_generate_too_large() {
        match generate(MAX_SIZE + 1) {
            Err(GenomeError::OutOfRange { size, max }) => {
                assert_eq!(size, MAX_SIZE + 1);
                assert_eq!(max, MAX_SIZE);
            }
            other => panic!("unexpected result: {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_other_seed_differs() {
        assert_eq!(generate_with_seed(5, 0).unwrap(), b"TTTTG".to_vec());
        assert_eq!(generate_with_seed(5, 42).unwrap(), b"GATTC".to_vec());
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement(b"TGCTTGATGG").unwrap(), b"CCATCAAGCA".to_vec());
        assert_eq!(reverse_complement(b"").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_reverse_complement_involution() {
        let seq = generate(1000).unwrap();
        let twice = reverse_complement(&reverse_complement(&seq).unwrap()).unwrap();
        assert_eq!(twice, seq);
    }

    #[test]
    fn test_reverse_complement_rejects_rna() {
        assert!(matches!(reverse_complement(b"AUG"), Err(GenomeError::InvalidAlphabet)));
    }
}
