use clap::Parser;
use merge_ip::config::{init_logging, Cli};
use merge_ip::output::write_cidrs;
use merge_ip::run_pipeline_with_chunk_size;
use std::error::Error;
use std::io;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli)?;
    log::info!("#Start main()");

    let input = cli.open_input()?;
    let blocks = run_pipeline_with_chunk_size(input, cli.chunk_size)?;
    log::debug!("Merged IP ranges as CIDR ({} items)", blocks.len());

    write_cidrs(&mut io::stdout().lock(), &blocks, cli.format)?;
    Ok(())
}
