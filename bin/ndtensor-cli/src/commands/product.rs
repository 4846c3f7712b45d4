// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ndt product` command: generalized contraction of two tensors.
//!
//! Prints a tensor record, or a bare number when every axis is contracted.

use crate::config::CliConfig;
use anyhow::Context;
use ndtensor::Contraction;
use std::path::Path;

pub fn execute(
    basis: &Path,
    factor: &Path,
    degree: usize,
    output: Option<&Path>,
    config: &CliConfig,
) -> anyhow::Result<()> {
    let text = render(basis, factor, degree, config)?;
    super::write_output(output, &text)
}

fn render(basis: &Path, factor: &Path, degree: usize, config: &CliConfig) -> anyhow::Result<String> {
    let basis_t = super::read_tensor(basis)?;
    let factor_t = super::read_tensor(factor)?;

    let result = ndtensor::product(&basis_t, &factor_t, degree).with_context(|| {
        format!(
            "cannot contract {} with {} over {degree} axes",
            basis_t.shape(),
            factor_t.shape()
        )
    })?;

    match result {
        Contraction::Scalar(x) if !x.is_finite() => {
            anyhow::bail!("contraction produced non-finite scalar {x}")
        }
        Contraction::Scalar(x) => Ok(serde_json::to_string(&x)?),
        Contraction::Tensor(t) => super::to_json(&t, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndtensor::Tensor;

    fn write(dir: &Path, name: &str, t: &Tensor) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, t.to_json_string().unwrap()).unwrap();
        path
    }

    #[test]
    fn test_scalar_and_tensor_results() {
        let dir = tempfile::tempdir().unwrap();
        let v = write(dir.path(), "v.json", &Tensor::from_vec(&[3], vec![1.0, 2.0, 3.0]).unwrap());
        let w = write(dir.path(), "w.json", &Tensor::from_vec(&[3], vec![2.0, 4.0, 6.0]).unwrap());
        assert_eq!(render(&v, &w, 1, &CliConfig::default()).unwrap(), "28.0");

        let m = write(
            dir.path(),
            "m.json",
            &Tensor::from_vec(&[3, 2], vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap(),
        );
        let text = render(&v, &m, 1, &CliConfig::default()).unwrap();
        let t = Tensor::from_json(&text).unwrap();
        assert_eq!(t.as_slice(), &[4.0, 5.0]);
    }

    #[test]
    fn test_incompatible_operands() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.json", &Tensor::zeros(&[2, 3]).unwrap());
        assert!(render(&a, &a, 1, &CliConfig::default()).is_err());
        assert!(render(&a, &a, 3, &CliConfig::default()).is_err());
    }
}
