//! Splicing of synthetic genes into a sequence.

use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::error::{GenomeError, Result};
use crate::rng::Mt19937;
use crate::seq::reverse_complement;

pub const START_CODONS: [&str; 3] = ["ATG", "TTG", "CTG"];
pub const STOP_CODONS: [&str; 3] = ["TAG", "TAA", "TGA"];
const CODON_WEIGHTS: [f64; 3] = [0.34, 0.33, 0.33];

pub const DEFAULT_GENE_SEED: u32 = 123;
/// Genes spanning this many bases or fewer are reported as abnormally small.
pub const SMALL_GENE: i64 = 75;
const MIN_SEQUENCE_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl FromStr for Strand {
    type Err = GenomeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            other => Err(GenomeError::InvalidStrand(other.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// Where a gene goes. Codons left as `None` are drawn by the inserter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenePlacement {
    pub start: usize,
    pub stop: usize,
    pub strand: Strand,
    pub start_codon: Option<String>,
    pub stop_codon: Option<String>,
}

impl GenePlacement {
    pub fn new(start: usize, stop: usize, strand: Strand) -> Self {
        GenePlacement { start, stop, strand, start_codon: None, stop_codon: None }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GeneInserter {
    pub seed: u32,
}

impl Default for GeneInserter {
    fn default() -> Self {
        GeneInserter { seed: DEFAULT_GENE_SEED }
    }
}

fn pick_codon(
    rng: &mut Mt19937,
    given: Option<&str>,
    allowed: &[&'static str; 3],
    kind: &'static str,
    listing: &'static str,
) -> Result<&'static str> {
    match given {
        None => Ok(rng.choose_weighted(allowed, &CODON_WEIGHTS, 1)[0]),
        Some(codon) => allowed
            .iter()
            .copied()
            .find(|c| *c == codon)
            .ok_or_else(|| GenomeError::InvalidCodon {
                kind,
                codon: codon.to_string(),
                allowed: listing,
            }),
    }
}

impl GeneInserter {
    pub fn new(seed: u32) -> Self {
        GeneInserter { seed }
    }

    /// Overwrite the window `start..stop+3` of `sequence` with a gene.
    ///
    /// The result is `sequence[..start]`, the start codon, the base at `start+3`,
    /// `sequence[start..stop-4]`, the stop codon and `sequence[stop+3..]`, so for
    /// `start < stop` the stop codon lands at `stop` and the length is unchanged.
    /// On the reverse strand both codons are reverse complemented. When `start > stop`
    /// the body is empty and the tail is repeated from `stop+3`.
    pub fn insert(
        &self,
        sequence: &[u8],
        start: usize,
        stop: usize,
        start_codon: Option<&str>,
        stop_codon: Option<&str>,
        strand: Strand,
    ) -> Result<Vec<u8>> {
        let len = sequence.len();
        if len <= MIN_SEQUENCE_LEN {
            return Err(GenomeError::SequenceTooShort { len });
        }

        let span = stop as i64 - start as i64;
        if span + 1 <= SMALL_GENE {
            warn!("gene size is abnormally small, check gene size in pos {}-{}", start, stop);
        }

        let mut rng = Mt19937::new(self.seed);
        let start_codon = pick_codon(&mut rng, start_codon, &START_CODONS, "start", "\"ATG\", \"TTG\", \"CTG\"")?;
        let stop_codon = pick_codon(&mut rng, stop_codon, &STOP_CODONS, "stop", "\"TAG\", \"TAA\", \"TGA\"")?;

        let rem = span.rem_euclid(3) as usize;
        if rem != 0 {
            return Err(GenomeError::FrameMismatch { start, stop, rem });
        }
        if start + 3 >= len {
            return Err(GenomeError::PositionOutOfRange { start, len });
        }

        let (start_codon, stop_codon) = match strand {
            Strand::Forward => (start_codon.as_bytes().to_vec(), stop_codon.as_bytes().to_vec()),
            Strand::Reverse => (
                reverse_complement(start_codon.as_bytes())?,
                reverse_complement(stop_codon.as_bytes())?,
            ),
        };

        let body_end = stop.saturating_sub(4).min(len);
        let body: &[u8] = if body_end > start { &sequence[start..body_end] } else { &[] };
        let tail = &sequence[(stop + 3).min(len)..];

        let mut out = Vec::with_capacity(start + body.len() + tail.len() + 7);
        out.extend_from_slice(&sequence[..start]);
        out.extend_from_slice(&start_codon);
        out.push(sequence[start + 3]);
        out.extend_from_slice(body);
        out.extend_from_slice(&stop_codon);
        out.extend_from_slice(tail);
        Ok(out)
    }

    pub fn insert_placement(&self, sequence: &[u8], placement: &GenePlacement) -> Result<Vec<u8>> {
        self.insert(
            sequence,
            placement.start,
            placement.stop,
            placement.start_codon.as_deref(),
            placement.stop_codon.as_deref(),
            placement.strand,
        )
    }
}

/// [`GeneInserter::insert`] with the default codon seed.
pub fn insert_gene(
    sequence: &[u8],
    start: usize,
    stop: usize,
    start_codon: Option<&str>,
    stop_codon: Option<&str>,
    strand: Strand,
) -> Result<Vec<u8>> {
    GeneInserter::default().insert(sequence, start, stop, start_codon, stop_codon, strand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrub::scrub_start_codons;
    use crate::seq::generate;

    const SEQ: &[u8] = b"GTTCTTGATGTTCTTGAT";

    #[test]
    fn test_insert_default_codons() {
        let out = insert_gene(SEQ, 2, 14, None, None, Strand::Forward).unwrap();
        assert_eq!(out, b"GTCTGTTCTTGATGTAGT".to_vec());
        assert_eq!(out.len(), SEQ.len());
        assert_eq!(&out[2..5], b"CTG");
        assert_eq!(&out[14..17], b"TAG");
    }

    #[test]
    fn test_insert_reverse_strand() {
        let out = insert_gene(SEQ, 2, 14, None, None, Strand::Reverse).unwrap();
        assert_eq!(out, b"GTCAGTTCTTGATGCTAT".to_vec());

        let out = insert_gene(SEQ, 2, 14, Some("ATG"), Some("TAA"), Strand::Reverse).unwrap();
        assert_eq!(out, b"GTCATTTCTTGATGTTAT".to_vec());
    }

    #[test]
    fn test_given_start_codon_shifts_stop_draw() {
        let out = insert_gene(SEQ, 2, 14, Some("ATG"), None, Strand::Forward).unwrap();
        assert_eq!(out, b"GTATGTTCTTGATGTGAT".to_vec());
    }

    #[test]
    fn test_strands_differ_only_in_codons() {
        let seq = scrub_start_codons(&generate(300).unwrap());
        let fwd = insert_gene(&seq, 30, 129, None, None, Strand::Forward).unwrap();
        let rev = insert_gene(&seq, 30, 129, None, None, Strand::Reverse).unwrap();
        assert_eq!(fwd.len(), rev.len());
        assert_eq!(&fwd[30..33], b"CTG");
        assert_eq!(&fwd[129..132], b"TAG");
        assert_eq!(reverse_complement(&fwd[30..33]).unwrap(), rev[30..33].to_vec());
        assert_eq!(reverse_complement(&fwd[129..132]).unwrap(), rev[129..132].to_vec());
        assert_eq!(fwd[..30], rev[..30]);
        assert_eq!(fwd[33..129], rev[33..129]);
        assert_eq!(fwd[132..], rev[132..]);
    }

    #[test]
    fn test_frame_mismatch() {
        for (start, stop) in [(2, 13), (2, 15), (0, 100), (10, 3)] {
            match insert_gene(SEQ, start, stop, None, None, Strand::Forward) {
                Err(GenomeError::FrameMismatch { rem, .. }) => assert_ne!(rem, 0),
                other => panic!("expected frame mismatch for {}-{}, got {:?}", start, stop, other),
            }
        }
    }

    #[test]
    fn test_sequence_too_short() {
        for seq in [&b""[..], b"ACGTAC", b"A"] {
            assert!(matches!(
                insert_gene(seq, 0, 3, None, None, Strand::Forward),
                Err(GenomeError::SequenceTooShort { .. })
            ));
        }
        assert!(insert_gene(b"ACGTACG", 0, 3, None, None, Strand::Forward).is_ok());
    }

    #[test]
    fn test_invalid_codons() {
        let err = insert_gene(SEQ, 2, 14, Some("CAT"), None, Strand::Forward).unwrap_err();
        assert!(matches!(err, GenomeError::InvalidCodon { kind: "start", .. }));
        let err = insert_gene(SEQ, 2, 14, None, Some("ATG"), Strand::Forward).unwrap_err();
        assert!(matches!(err, GenomeError::InvalidCodon { kind: "stop", .. }));
        let err = insert_gene(SEQ, 2, 14, Some("atg"), None, Strand::Forward).unwrap_err();
        assert!(matches!(err, GenomeError::InvalidCodon { .. }));
    }

    #[test]
    fn test_start_out_of_range() {
        assert!(matches!(
            insert_gene(SEQ, 15, 18, None, None, Strand::Forward),
            Err(GenomeError::PositionOutOfRange { start: 15, len: 18 })
        ));
    }

    #[test]
    fn test_start_after_stop() {
        let out = insert_gene(SEQ, 14, 5, None, None, Strand::Reverse).unwrap();
        assert_eq!(out, b"GTTCTTGATGTTCTCAGTCTATGTTCTTGAT".to_vec());
    }

    #[test]
    fn test_strand_parsing() {
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("-".parse::<Strand>().unwrap(), Strand::Reverse);
        assert!(matches!("x".parse::<Strand>(), Err(GenomeError::InvalidStrand(s)) if s == "x"));
        assert_eq!(Strand::Reverse.to_string(), "-");
    }

    #[test]
    fn test_insert_placement_matches_insert() {
        let placement = GenePlacement {
            start_codon: Some("TTG".to_string()),
            ..GenePlacement::new(2, 14, Strand::Forward)
        };
        let inserter = GeneInserter::default();
        assert_eq!(
            inserter.insert_placement(SEQ, &placement).unwrap(),
            inserter.insert(SEQ, 2, 14, Some("TTG"), None, Strand::Forward).unwrap()
        );
    }
}
