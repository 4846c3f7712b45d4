// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ndt sum | difference | hadamard | quotient` commands.

use crate::config::CliConfig;
use anyhow::Context;
use ndtensor::{Tensor, TensorError};
use std::path::{Path, PathBuf};

/// Which n-ary entrywise operation to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrywiseOp {
    Sum,
    Difference,
    Hadamard,
    Quotient,
}

impl EntrywiseOp {
    fn apply(self, operands: &[&Tensor]) -> Result<Tensor, TensorError> {
        match self {
            EntrywiseOp::Sum => ndtensor::sum(operands),
            EntrywiseOp::Difference => ndtensor::difference(operands),
            EntrywiseOp::Hadamard => ndtensor::hadamard_product(operands),
            EntrywiseOp::Quotient => ndtensor::hadamard_quotient(operands),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            EntrywiseOp::Sum => "sum",
            EntrywiseOp::Difference => "difference",
            EntrywiseOp::Hadamard => "hadamard",
            EntrywiseOp::Quotient => "quotient",
        }
    }
}

pub fn execute(
    op: EntrywiseOp,
    inputs: &[PathBuf],
    output: Option<&Path>,
    config: &CliConfig,
) -> anyhow::Result<()> {
    let result = apply(op, inputs)?;
    super::write_output(output, &super::to_json(&result, config)?)
}

fn apply(op: EntrywiseOp, inputs: &[PathBuf]) -> anyhow::Result<Tensor> {
    let tensors = inputs
        .iter()
        .map(|p| super::read_tensor(p))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let operands: Vec<&Tensor> = tensors.iter().collect();
    tracing::debug!(op = op.as_str(), operands = operands.len(), "applying entrywise op");
    op.apply(&operands)
        .with_context(|| format!("{} of {} tensors failed", op.as_str(), operands.len()))
}
