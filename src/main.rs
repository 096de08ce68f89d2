//! # hlv
//!
//! Command-line tool that extracts the phase-equilibrium (onset) point from
//! gas hydrate pressure/temperature logs.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive: list ./*.csv, pick one, confirm
//! hlv
//!
//! # Pressure sensor 2, temperature sensor 3, CSVs under ./exports
//! hlv -p 2 -t 3 -d ./exports/
//!
//! # Scripted: first file, no prompts, SVG plots
//! hlv -d ./exports/ -f 0 -y --plot-format svg
//! ```

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    let cli = cli::parse();
    cli::init_logging(cli.log_level());
    cli::dispatch(cli)
}
