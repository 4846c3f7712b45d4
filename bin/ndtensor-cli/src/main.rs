// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # ndt
//!
//! Command-line interface for the ndtensor engine. Tensors are read and
//! written in the JSON record form `{"type": "Tensor", "size": [..], "data": [..]}`.
//!
//! ## Usage
//! ```bash
//! # Contract two tensors over one shared axis
//! ndt product a.json b.json --degree 1
//!
//! # Entrywise sum of three tensors
//! ndt sum a.json b.json c.json --output total.json
//!
//! # Convert nested arrays to a record and inspect it
//! echo '[[1, 2], [3, 4]]' | ndt from-array - | ndt inspect -
//! ```

mod commands;
mod config;

use clap::{Parser, Subcommand};
use commands::entrywise::EntrywiseOp;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ndt",
    about = "Dense tensor arithmetic and contraction from the command line",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write the result here instead of stdout.
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Contract the last DEGREE axes of BASIS with the first DEGREE axes of FACTOR.
    Product {
        /// Basis tensor record (`-` for stdin).
        basis: PathBuf,
        /// Factor tensor record.
        factor: PathBuf,
        /// Number of contracted axes (defaults to `default_degree` from the config).
        #[arg(short, long)]
        degree: Option<usize>,
    },

    /// Entrywise sum of two or more tensors of one shape.
    Sum {
        #[arg(num_args = 2.., required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Entrywise difference, folded left to right.
    Difference {
        #[arg(num_args = 2.., required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Entrywise (Hadamard) product.
    Hadamard {
        #[arg(num_args = 2.., required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Entrywise quotient, folded left to right.
    Quotient {
        #[arg(num_args = 2.., required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Multiply every entry by a scalar.
    Scale {
        input: PathBuf,
        #[arg(allow_negative_numbers = true)]
        factor: f64,
    },

    /// Print rank, shape, strides, and the entry table.
    Inspect { input: PathBuf },

    /// Convert nested arrays to a tensor record.
    FromArray { input: PathBuf },

    /// Convert a tensor record to nested arrays.
    ToArray { input: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::CliConfig::from_file(path)?,
        None => config::CliConfig::default(),
    };

    commands::init_tracing(cli.verbose, &config.log_filter);
    tracing::debug!(?config, "configuration loaded");

    let output = cli.output.as_deref();
    match cli.command {
        Commands::Product {
            basis,
            factor,
            degree,
        } => commands::product::execute(
            &basis,
            &factor,
            degree.unwrap_or(config.default_degree),
            output,
            &config,
        ),
        Commands::Sum { inputs } => {
            commands::entrywise::execute(EntrywiseOp::Sum, &inputs, output, &config)
        }
        Commands::Difference { inputs } => {
            commands::entrywise::execute(EntrywiseOp::Difference, &inputs, output, &config)
        }
        Commands::Hadamard { inputs } => {
            commands::entrywise::execute(EntrywiseOp::Hadamard, &inputs, output, &config)
        }
        Commands::Quotient { inputs } => {
            commands::entrywise::execute(EntrywiseOp::Quotient, &inputs, output, &config)
        }
        Commands::Scale { input, factor } => {
            commands::scale::execute(&input, factor, output, &config)
        }
        Commands::Inspect { input } => commands::inspect::execute(&input, output, &config),
        Commands::FromArray { input } => commands::convert::from_array(&input, output, &config),
        Commands::ToArray { input } => commands::convert::to_array(&input, output, &config),
    }
}
