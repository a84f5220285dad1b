//! SideNav CLI: check and query documentation sidebar trees.
//!
//! Loads a sidebar file, validates it (optionally against a docs directory),
//! and answers flatten, breadcrumb, and next/previous queries.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
