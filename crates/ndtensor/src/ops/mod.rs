// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor arithmetic operations.
//!
//! Every operation here validates its operands up front and writes into a
//! freshly allocated result; operands are never modified.

mod contraction_op;
mod elementwise_op;

pub use contraction_op::{product, product_naive, Contraction};
pub use elementwise_op::{difference, hadamard_product, hadamard_quotient, sum};
