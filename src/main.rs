use clap::Parser;
use weather_prob::cli::{run, Cli};
use weather_prob::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
