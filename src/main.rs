use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use mimalloc::MiMalloc;
use tokio::fs::File;

use fnvtable::config::{INITIAL_M, LOAD_FACTOR_THRESHOLD};
use fnvtable::counter::{ranked, write_ranked, WordCounts};
use fnvtable::logger::initialize_logger;
use fnvtable::reader::count_words;
use fnvtable::{CountError, TableConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Print the frequency of every unique word, most frequent first.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to read, stdin when omitted
    input: Option<PathBuf>,

    /// Initial number of hash table buckets
    #[arg(short, long, env = "COUNTWORDS_CAPACITY", default_value_t = INITIAL_M)]
    capacity: usize,

    /// Load factor above which the table doubles
    #[arg(short, long, env = "COUNTWORDS_THRESHOLD", default_value_t = LOAD_FACTOR_THRESHOLD)]
    threshold: f64,

    /// Skip the hash table dump on stderr
    #[arg(long)]
    no_dump: bool,

    /// Log table growth and chunk counts to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn count(input: Option<PathBuf>, config: TableConfig) -> Result<WordCounts, CountError> {
    match input {
        Some(path) => {
            info!("reading words from {}", path.display());
            let file = File::open(&path).await?;
            count_words(file, config).await
        }
        None => count_words(tokio::io::stdin(), config).await,
    }
}

fn run(args: Args) -> Result<(), CountError> {
    let config = TableConfig::new(args.capacity, args.threshold)?;
    let counts = count(args.input, config)?;

    let mut out = BufWriter::new(io::stdout().lock());
    write_ranked(&mut out, &ranked(&counts))?;
    out.flush()?;

    if !args.no_dump {
        let mut err = io::stderr().lock();
        writeln!(err, "Hash table dump:")?;
        writeln!(err, "----------------")?;
        counts.dump(&mut err)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logger(args.verbose);
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
