use std::path::PathBuf;

use thiserror::Error;

/// Every way building a synthetic genome can fail.
#[derive(Debug, Error)]
pub enum GenomeError {
    #[error("the size of the sequence to generate ({size}bp) is greater than the maximum size of {max}bp")]
    OutOfRange { size: usize, max: usize },

    #[error("a genome of {size}bp is too small to be useful, provide at least {min}bp")]
    BelowMinimum { size: usize, min: usize },

    #[error("reverse complement of an RNA instead of DNA (\"U\" within sequence)")]
    InvalidAlphabet,

    #[error("sequence of {len}bp is too short to hold a gene (more than 6bp required)")]
    SequenceTooShort { len: usize },

    #[error("invalid {kind} codon {codon:?}, provide one of {allowed}")]
    InvalidCodon {
        kind: &'static str,
        codon: String,
        allowed: &'static str,
    },

    #[error("start and stop of gene {start}-{stop} are not in the same frame ((stop-start)%3 = {rem})")]
    FrameMismatch { start: usize, stop: usize, rem: usize },

    #[error("invalid strand {0:?} in gene placement, use '+' or '-'")]
    InvalidStrand(String),

    #[error("gene start {start} lies outside a sequence of {len}bp")]
    PositionOutOfRange { start: usize, len: usize },

    #[error("refusing to overwrite existing file {}", .0.display())]
    FileExists(PathBuf),

    #[error("malformed gene table record: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("gene table error: {0}")]
    Table(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, GenomeError>;
