use anyhow::Context;
use bikeshare_analytics::cli::{run, Cli};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).context("bikeshare-analytics failed")
}
