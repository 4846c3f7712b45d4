// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ndt from-array` and `ndt to-array`: nested arrays <-> tensor records.

use crate::config::CliConfig;
use anyhow::Context;
use ndtensor::{NestedArray, Tensor};
use std::path::Path;

pub fn from_array(input: &Path, output: Option<&Path>, config: &CliConfig) -> anyhow::Result<()> {
    let tensor = parse_nested(&super::read_text(input)?)?;
    super::write_output(output, &super::to_json(&tensor, config)?)
}

pub fn to_array(input: &Path, output: Option<&Path>, config: &CliConfig) -> anyhow::Result<()> {
    let tensor = super::read_tensor(input)?;
    super::write_output(output, &super::to_json(&tensor.to_array(), config)?)
}

fn parse_nested(text: &str) -> anyhow::Result<Tensor> {
    let nested: NestedArray =
        serde_json::from_str(text).context("input is not a JSON array of numbers")?;
    Tensor::from_array(&nested).context("nested arrays do not form a tensor")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested() {
        let t = parse_nested("[[1, 2, 3], [4, 5, 6]]").unwrap();
        assert_eq!(t.dims(), &[2, 3]);
        assert_eq!(t.data_at(&[1, 1]).unwrap(), 5.0);
    }

    #[test]
    fn test_parse_nested_errors() {
        assert!(parse_nested("[[1, 2], [3]]").is_err());
        assert!(parse_nested(r#"[["a"]]"#).is_err());
        assert!(parse_nested("[]").is_err());
    }
}
