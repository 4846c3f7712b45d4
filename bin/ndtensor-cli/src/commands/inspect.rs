// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ndt inspect` command: display a tensor's layout and entries.

use crate::config::CliConfig;
use ndtensor::Tensor;
use std::fmt::Write;
use std::path::Path;

pub fn execute(input: &Path, output: Option<&Path>, config: &CliConfig) -> anyhow::Result<()> {
    let tensor = super::read_tensor(input)?;
    super::write_output(output, &report(&tensor, config.precision)?)
}

fn report(tensor: &Tensor, precision: usize) -> anyhow::Result<String> {
    let mut out = String::new();

    // ── Summary ────────────────────────────────────────────────
    writeln!(out, "  Rank:    {}", tensor.dimension())?;
    writeln!(out, "  Shape:   {}", tensor.shape())?;
    writeln!(out, "  Strides: {:?}", tensor.strides())?;
    writeln!(out, "  Length:  {}", tensor.length())?;
    writeln!(out)?;

    // ── Entries ────────────────────────────────────────────────
    let index_width = tensor.dims().len() * 4 + 2;
    writeln!(out, "  {:>6}  {:<index_width$}  {:>14}", "Key", "Indices", "Value")?;
    writeln!(out, "  {}", "-".repeat(6 + index_width + 18))?;
    for entry in tensor.entries() {
        writeln!(
            out,
            "  {:>6}  {:<index_width$}  {:>14.precision$}",
            entry.key,
            format!("{:?}", entry.indices),
            entry.value,
        )?;
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report() {
        let t = Tensor::from_vec(&[2, 2], vec![1.0, 2.5, -3.0, 4.0]).unwrap();
        let text = report(&t, 2).unwrap();
        assert!(text.contains("Rank:    2"));
        assert!(text.contains("Shape:   [2, 2]"));
        assert!(text.contains("Strides: [2, 1]"));
        assert!(text.contains("[1, 0]"));
        assert!(text.contains("-3.00"));
        assert_eq!(text.lines().count(), 5 + 2 + 4);
    }
}
