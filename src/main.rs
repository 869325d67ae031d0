use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cfg = quadstim::config::Config::parse();
    quadstim::app::run(cfg)
}
