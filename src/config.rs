//! Command line options and logging setup for the `merge-ip` binary.

use crate::input::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use crate::output::OutputFormat;
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Log line layout for the built-in stderr appender.
const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Takes CIDRs from the input (stdin or a file), sorts them, removes
/// duplicates, merges adjacent blocks and prints the result.
#[derive(Parser, Debug, Clone)]
#[command(name = "merge-ip", version)]
pub struct Cli {
    /// Input file to read CIDR blocks from. Reads stdin when absent.
    #[arg(short, long, env = "MERGE_IP_FILE")]
    pub file: Option<PathBuf>,

    /// Print debug information to stderr.
    #[arg(short, long)]
    pub debug: bool,

    /// Bytes requested from the input per read (1 to 1 MiB).
    #[arg(
        long,
        env = "MERGE_IP_CHUNK_SIZE",
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = parse_chunk_size
    )]
    pub chunk_size: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// log4rs configuration file, used when present.
    #[arg(long, env = "MERGE_IP_LOG_CONFIG", default_value = "log4rs.yml")]
    pub log_config: PathBuf,
}

fn parse_chunk_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("chunk size must be at least 1 byte".to_string()),
        Ok(size) if size > MAX_CHUNK_SIZE => {
            Err(format!("chunk size must be at most {MAX_CHUNK_SIZE} bytes"))
        }
        Ok(size) => Ok(size),
        Err(e) => Err(format!("invalid chunk size {s}: {e}")),
    }
}

impl Cli {
    /// Open the configured input: the file if one is given, stdin otherwise.
    pub fn open_input(&self) -> io::Result<Box<dyn Read>> {
        match &self.file {
            Some(path) => {
                log::debug!("Reading from file: {}", path.display());
                Ok(Box::new(File::open(path)?))
            }
            None => {
                log::debug!("Reading from stdin");
                Ok(Box::new(io::stdin().lock()))
            }
        }
    }
}

/// Initialise log4rs.
///
/// `--debug` always logs at debug level to stderr. Otherwise the log4rs file
/// is used when it exists, falling back to warnings on stderr.
pub fn init_logging(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if !cli.debug && cli.log_config.exists() {
        return init_logging_file(&cli.log_config);
    }
    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    init_logging_stderr(level)
}

fn init_logging_file(path: &Path) -> Result<(), Box<dyn Error>> {
    log4rs::init_file(path, Default::default())
        .map_err(|e| format!("Error initializing log4rs from {}: {e}", path.display()))?;
    Ok(())
}

fn init_logging_stderr(level: LevelFilter) -> Result<(), Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}
