//! Artificial genomes for benchmarking bioinformatics tools.
//!
//! A genome is random DNA from a fixed seed, scrubbed of incidental start codons,
//! with synthetic genes spliced in at chosen coordinates on either strand.

pub mod error;
pub mod fasta;
pub mod gene;
pub mod genome;
pub mod logger;
pub mod rng;
pub mod scrub;
pub mod seq;
pub mod table;

pub use error::{GenomeError, Result};
pub use gene::{insert_gene, GeneInserter, GenePlacement, Strand};
pub use scrub::{scrub_start_codons, Scrubber};
pub use seq::{generate, reverse_complement};
