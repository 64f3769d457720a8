mod counters;
mod data_count;
mod error;
mod report;
mod sort;
mod tokenizer;

use clap::Parser;
use counters::{AvlTree, BinarySearchTree, Counter, HashTable, MemoryTrackedCounter, Shape};
use error::WordCountError;
use log::{debug, error, info};
use serde::Serialize;
use std::ffi::OsString;
use std::io::{self, BufWriter, Read, Write};
use std::time::Instant;
use tokenizer::FileWordReader;

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let exp = (bytes as f64).log(base).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);

    let value = bytes as f64 / base.powi(exp as i32);

    if exp == 0 {
        format!("{} {}", bytes, UNITS[exp])
    } else {
        format!("{:.2} {}", value, UNITS[exp])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CounterType {
    UnbalancedBst,
    Avl,
    HashTable,
}

impl std::str::FromStr for CounterType {
    type Err = WordCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-b" => Ok(CounterType::UnbalancedBst),
            "-a" => Ok(CounterType::Avl),
            "-h" => Ok(CounterType::HashTable),
            _ => Err(WordCountError::InvalidCounter(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
enum ReportMode {
    Frequency,
    NumUnique,
}

impl std::str::FromStr for ReportMode {
    type Err = WordCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-frequency" => Ok(ReportMode::Frequency),
            "-num_unique" => Ok(ReportMode::NumUnique),
            _ => Err(WordCountError::InvalidMode(s.to_string())),
        }
    }
}

// `-h` selects the hash table, so clap's own help and version flags are off.
// The three values are always passed after a `--`, so any token is literal.
#[derive(Parser, Debug)]
#[command(name = "wordcount")]
#[command(about = "Counts word occurrences in a text file", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Counter backend: -b (unbalanced BST), -a (AVL tree), -h (hash table)
    #[arg(allow_hyphen_values = true)]
    counter: String,

    /// Report to print: -frequency or -num_unique
    #[arg(allow_hyphen_values = true)]
    mode: String,

    /// Input text file
    #[arg(allow_hyphen_values = true)]
    filename: String,
}

#[derive(Serialize)]
struct Config {
    counter: CounterType,
    mode: ReportMode,
    filename: String,
}

fn round_to_3_decimals(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[derive(Serialize)]
struct Results {
    unique_words: usize,
    total_words: u64,
    #[serde(serialize_with = "serialize_f64_3dp")]
    vocabulary_ratio: f64,
    count_time_ms: f64,
    shape: Shape,
    #[serde(skip_serializing_if = "Option::is_none")]
    peak_memory_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    peak_memory_human: Option<String>,
}

fn serialize_f64_3dp<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(round_to_3_decimals(*value))
}

#[derive(Serialize)]
struct OutputData<'a> {
    config: &'a Config,
    results: Results,
}

fn run_with_counter<C: Counter, R: Read, W: Write>(
    config: &Config,
    mut reader: FileWordReader<R>,
    mut counter: C,
    out: &mut W,
) -> Result<(), WordCountError> {
    let count_start = Instant::now();
    while let Some(word) = reader.next_word().map_err(WordCountError::Parse)? {
        counter.inc_count(word);
    }
    let counts = counter.get_counts();
    let count_time = count_start.elapsed();

    let unique_words = counter.unique_count();
    debug_assert_eq!(unique_words, counts.len());
    let total_words = counter.total_count();
    let vocabulary_ratio = if total_words > 0 {
        unique_words as f64 / total_words as f64
    } else {
        0.0
    };
    let peak_memory = counter.peak_memory_bytes();

    let stats = OutputData {
        config,
        results: Results {
            unique_words,
            total_words,
            vocabulary_ratio,
            count_time_ms: count_time.as_secs_f64() * 1000.0,
            shape: counter.shape(),
            peak_memory_bytes: peak_memory,
            peak_memory_human: peak_memory.map(format_bytes),
        },
    };
    match serde_json::to_string(&stats) {
        Ok(json) => info!("{}", json),
        Err(e) => error!("failed to serialize run stats: {}", e),
    }

    let written = match config.mode {
        ReportMode::Frequency => report::frequency_report(out, counts),
        ReportMode::NumUnique => report::unique_report(out, unique_words),
    };
    written.map_err(WordCountError::Output)
}

/// Accepts exactly three values after the program name; anything else is a
/// usage error.
fn parse_args<I, T>(raw: I) -> Result<Args, WordCountError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let raw: Vec<OsString> = raw.into_iter().map(Into::into).collect();
    let [program, values @ ..] = raw.as_slice() else {
        return Err(WordCountError::Usage);
    };
    if values.len() != 3 {
        debug!("expected 3 arguments, got {}", values.len());
        return Err(WordCountError::Usage);
    }

    let argv = std::iter::once(program.clone())
        .chain(std::iter::once(OsString::from("--")))
        .chain(values.iter().cloned());
    Args::try_parse_from(argv).map_err(|e| {
        debug!("argument parsing failed: {}", e);
        WordCountError::Usage
    })
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), WordCountError> {
    // Backend token, then the file, then the report token.
    let counter: CounterType = args.counter.parse()?;
    let reader = FileWordReader::open(&args.filename).map_err(|e| {
        debug!("failed to open {}: {}", args.filename, e);
        WordCountError::FileNotFound(args.filename.clone())
    })?;
    let config = Config {
        counter,
        mode: args.mode.parse()?,
        filename: args.filename.clone(),
    };
    debug!("config: {:?} {:?} {}", config.counter, config.mode, config.filename);

    match config.counter {
        CounterType::UnbalancedBst => {
            let counter = MemoryTrackedCounter::<BinarySearchTree<String>>::new();
            run_with_counter(&config, reader, counter, out)
        }
        CounterType::Avl => {
            let counter = MemoryTrackedCounter::<AvlTree<String>>::new();
            run_with_counter(&config, reader, counter, out)
        }
        CounterType::HashTable => {
            let counter = MemoryTrackedCounter::<HashTable<String>>::new();
            run_with_counter(&config, reader, counter, out)
        }
    }
}

fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    let mut out = BufWriter::new(io::stdout().lock());
    let result = run(&args, &mut out).and_then(|()| out.flush().map_err(WordCountError::Output));
    drop(out);

    match result {
        Ok(()) => {}
        Err(WordCountError::Output(e)) => error!("failed to write report: {}", e),
        Err(e) => println!("{}", e),
    }
}
