extern crate env_logger;
#[macro_use]
extern crate log;

use anyhow::Result;
use clap::Parser;

mod cli;
mod io;

use cli::{Cli, Mode};

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_target(false)
        .init();

    debug!("genomepack v{}", cli::VERSION);

    match cli.mode {
        Mode::Compress => io::compress(&cli.input, &cli.output, cli.trim_newline)?,
        Mode::Expand => io::expand(&cli.input, &cli.output)?,
    }
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
