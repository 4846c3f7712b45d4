// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and the I/O helpers they share.

pub mod convert;
pub mod entrywise;
pub mod inspect;
pub mod product;
pub mod scale;

use crate::config::CliConfig;
use anyhow::Context;
use ndtensor::Tensor;
use std::io::{Read, Write};
use std::path::Path;

/// Initialises `tracing` on stderr, keeping stdout free for results.
///
/// With no `-v` flag the filter comes from the config; each `-v` raises the
/// level one step from `info` up to `trace`.
pub fn init_tracing(verbose: u8, config_filter: &str) {
    let directive = match verbose {
        0 => config_filter,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_new(directive)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

/// Reads a whole input; `-` means stdin.
pub fn read_text(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

/// Reads a tensor record.
pub fn read_tensor(path: &Path) -> anyhow::Result<Tensor> {
    let text = read_text(path)?;
    let tensor = Tensor::from_json(&text)
        .with_context(|| format!("'{}' is not a valid tensor record", path.display()))?;
    tracing::info!(input = %path.display(), shape = %tensor.shape(), "loaded tensor");
    Ok(tensor)
}

/// Renders any serialisable value as JSON, honouring `pretty`.
pub fn to_json<T: serde::Serialize>(value: &T, config: &CliConfig) -> anyhow::Result<String> {
    let text = if config.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

/// Writes `text` plus a trailing newline to `output`, or stdout when `None`.
pub fn write_output(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            tracing::info!(output = %path.display(), "result written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_tensor_and_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("t.json");
        std::fs::write(&input, r#"{"type":"Tensor","size":[2],"data":[1,2]}"#).unwrap();

        let t = read_tensor(&input).unwrap();
        assert_eq!(t.as_slice(), &[1.0, 2.0]);

        let out = dir.path().join("out.json");
        let text = to_json(&t, &CliConfig::default()).unwrap();
        write_output(Some(&out), &text).unwrap();
        let back = read_tensor(&out).unwrap();
        assert_eq!(back.as_slice(), t.as_slice());
    }

    #[test]
    fn test_read_tensor_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_tensor(&dir.path().join("missing.json")).is_err());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"type":"Tensor","size":[0],"data":[]}"#).unwrap();
        assert!(read_tensor(&bad).is_err());
    }

    #[test]
    fn test_pretty_output() {
        let t = Tensor::from_vec(&[1], vec![3.0]).unwrap();
        let config = CliConfig {
            pretty: true,
            ..Default::default()
        };
        assert!(to_json(&t, &config).unwrap().contains('\n'));
        assert!(!to_json(&t, &CliConfig::default()).unwrap().contains('\n'));
    }
}
