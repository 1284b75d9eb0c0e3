use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::{GenomeError, Result};

pub const LINE_WIDTH: usize = 70;

/// Record name for a genome written to `path`: the file name without its extension.
pub fn header_for<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Write `sequence` as a single-record FASTA file, never replacing an existing file.
pub fn write_fasta<P: AsRef<Path>>(path: P, sequence: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => GenomeError::FileExists(path.to_path_buf()),
            _ => GenomeError::Io(e),
        })?;

    let mut out = BufWriter::new(file);
    writeln!(out, ">{}", header_for(path))?;
    for line in sequence.chunks(LINE_WIDTH) {
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// First record of a FASTA file as `(header, sequence)`.
pub fn read_fasta<P: AsRef<Path>>(path: P) -> Result<(String, Vec<u8>)> {
    let reader = BufReader::new(File::open(path)?);
    let mut header: Option<String> = None;
    let mut sequence = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(name) = line.strip_prefix('>') {
            if header.is_some() {
                break;
            }
            header = Some(name.split_whitespace().next().unwrap_or("").to_string());
        } else if header.is_some() {
            sequence.extend(line.trim().bytes().filter(|&b| b != b' ' && b != b'\t'));
        }
    }

    match header {
        Some(name) => Ok((name, sequence)),
        None => Err(GenomeError::Io(std::io::Error::new(
            ErrorKind::InvalidData,
            "no FASTA record found",
        ))),
    }
}
