//! Gene placement tables.
//!
//! A table is a headerless CSV file with one gene per row:
//! `start,stop,strand[,start_codon[,stop_codon]]`.

use std::path::Path;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GenomeError, Result};
use crate::gene::{GeneInserter, GenePlacement, Strand};
use crate::rng::Mt19937;

pub const DEFAULT_TABLE_SEED: u32 = 1;
const MAX_CODONS: usize = 150;

#[derive(Debug, Serialize, Deserialize)]
struct Row {
    start: usize,
    stop: usize,
    strand: String,
    #[serde(default)]
    start_codon: Option<String>,
    #[serde(default)]
    stop_codon: Option<String>,
}

impl Row {
    fn into_placement(self) -> Result<GenePlacement> {
        Ok(GenePlacement {
            start: self.start,
            stop: self.stop,
            strand: self.strand.parse()?,
            start_codon: self.start_codon.filter(|c| !c.is_empty()),
            stop_codon: self.stop_codon.filter(|c| !c.is_empty()),
        })
    }
}

impl From<&GenePlacement> for Row {
    fn from(p: &GenePlacement) -> Self {
        Row {
            start: p.start,
            stop: p.stop,
            strand: p.strand.to_string(),
            start_codon: p.start_codon.clone(),
            stop_codon: p.stop_codon.clone(),
        }
    }
}

pub fn read_placements<P: AsRef<Path>>(path: P) -> Result<Vec<GenePlacement>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)?;

    let mut placements = Vec::new();
    for (line, row) in reader.deserialize::<Row>().enumerate() {
        let row = row.map_err(|e| GenomeError::Parse(format!("row {}: {}", line + 1, e)))?;
        placements.push(row.into_placement()?);
    }
    debug!("read {} gene placement(s)", placements.len());
    Ok(placements)
}

pub fn write_placements<P: AsRef<Path>>(path: P, placements: &[GenePlacement]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    for placement in placements {
        writer.serialize(Row::from(placement))?;
    }
    writer.flush()?;
    Ok(())
}

/// `count` reproducible placements for a genome of `size` bp: starts in `0..=size-6`,
/// between 1 and 150 codons long, on a random strand.
pub fn random_placements(size: usize, count: usize, seed: u32) -> Result<Vec<GenePlacement>> {
    if size <= 6 {
        return Err(GenomeError::SequenceTooShort { len: size });
    }
    let mut rng = Mt19937::new(seed);
    Ok((0..count)
        .map(|_| {
            let start = rng.gen_range(0..=size - 6);
            let stop = start + 3 * rng.gen_range(1..=MAX_CODONS);
            let strand = if rng.gen_bool(0.5) { Strand::Forward } else { Strand::Reverse };
            GenePlacement::new(start, stop, strand)
        })
        .collect())
}

/// One insertion per placement, in table order.
pub fn insert_placements(
    sequence: &[u8],
    placements: &[GenePlacement],
    inserter: &GeneInserter,
) -> Result<Vec<u8>> {
    placements.iter().try_fold(sequence.to_vec(), |current, placement| {
        inserter.insert_placement(&current, placement)
    })
}
