use std::path::PathBuf;

use insilico::genome::{self, Params};
use insilico::{fasta, logger, table, Result};

use log::{error, info};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "insilico",
    about = "Create artificial genomes, designed to be used in bioinformatics benchmarking programs"
)]
struct Opt {
    /// Output FASTA file, its base name without extension becomes the header
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,

    /// Genome size in bp (50 to 100 000 000)
    #[structopt(short, long)]
    size: usize,

    /// Gene table (start,stop,strand[,start codon[,stop codon]]) replacing the default genes
    #[structopt(short, long, parse(from_os_str), conflicts_with = "random-genes")]
    genes: Option<PathBuf>,

    /// Insert this many randomly placed genes instead of the default ones
    #[structopt(short, long)]
    random_genes: Option<usize>,

    /// Save the gene placements that were used
    #[structopt(long, parse(from_os_str))]
    table_out: Option<PathBuf>,

    /// Seed of the base sequence
    #[structopt(long, default_value = "123")]
    seed: u32,

    /// Seed of the random gene table
    #[structopt(long, default_value = "1")]
    table_seed: u32,

    /// More output (-v debug, -vv trace)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// Only warnings and errors
    #[structopt(short, long)]
    quiet: bool,
}

fn params_from(opt: &Opt) -> Result<Params> {
    let placements = match (&opt.genes, opt.random_genes) {
        (Some(path), _) => table::read_placements(path)?,
        (None, Some(count)) => table::random_placements(opt.size, count, opt.table_seed)?,
        (None, None) => return Params::demo(opt.size).map(|p| Params { seed: opt.seed, ..p }),
    };
    Params::new(opt.size, opt.seed, placements)
}

fn run(opt: &Opt) -> Result<()> {
    let params = params_from(opt)?;
    if let Some(path) = &opt.table_out {
        table::write_placements(path, &params.placements)?;
        info!("gene placements written to {}", path.display());
    }

    let genome = genome::build(&params)?;
    fasta::write_fasta(&opt.output, &genome)?;
    info!("a genome of {}bp has been written to {}", genome.len(), opt.output.display());
    Ok(())
}

fn main() {
    let opt = Opt::from_args();
    if let Err(e) = logger::init_logger(logger::level_for(opt.verbose, opt.quiet)) {
        eprintln!("could not install logger: {}", e);
    }

    if let Err(e) = run(&opt) {
        error!("{}", e);
        std::process::exit(1);
    }
}
