// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ndt scale` command: multiply every entry by a scalar.

use crate::config::CliConfig;
use std::path::Path;

pub fn execute(
    input: &Path,
    factor: f64,
    output: Option<&Path>,
    config: &CliConfig,
) -> anyhow::Result<()> {
    let text = render(input, factor, config)?;
    super::write_output(output, &text)
}

fn render(input: &Path, factor: f64, config: &CliConfig) -> anyhow::Result<String> {
    let mut tensor = super::read_tensor(input)?;
    tensor.scale(factor);
    super::to_json(&tensor, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndtensor::Tensor;

    #[test]
    fn test_scaled_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let t = Tensor::from_vec(&[2, 2], vec![1.0, -2.0, 0.5, 3.0]).unwrap();
        std::fs::write(&path, t.to_json_string().unwrap()).unwrap();

        let text = render(&path, -2.0, &CliConfig::default()).unwrap();
        let scaled = Tensor::from_json(&text).unwrap();
        assert!(scaled.shape().same(t.shape()));
        assert_eq!(scaled.as_slice(), &[-2.0, 4.0, -1.0, -6.0]);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let t = Tensor::from_vec(&[1], vec![1e308]).unwrap();
        std::fs::write(&path, t.to_json_string().unwrap()).unwrap();

        assert!(render(&path, 10.0, &CliConfig::default()).is_err());
    }
}
