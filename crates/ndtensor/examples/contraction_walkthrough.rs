// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: contractions of increasing degree on small tensors.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p ndtensor --example contraction_walkthrough
//! ```

use ndtensor::{product, Contraction, NestedArray, Tensor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let v = Tensor::from_vec(&[3], vec![1.0, 2.0, 3.0])?;
    let w = Tensor::from_vec(&[3], vec![2.0, 4.0, 6.0])?;
    report("v . w (degree 1)", product(&v, &w, 1)?);

    let a = Tensor::from_array(&NestedArray::from(vec![
        vec![1.0, 2.0, 3.0],
        vec![2.0, 4.0, 6.0],
    ]))?;
    let b = Tensor::from_array(&NestedArray::from(vec![
        vec![2.0, 0.0],
        vec![1.0, 2.0],
        vec![0.0, 1.0],
    ]))?;
    report("A . B (degree 1)", product(&a, &b, 1)?);
    report("A : A (degree 2)", product(&a, &a, 2)?);

    let n: usize = 2 * 3 * 2;
    let cube = Tensor::from_vec(&[2, 3, 2], (0..n).map(|i| i as f64).collect())?;
    report("cube : (B + 1) (degree 2)", product(&cube, &b.map(|x| x + 1.0), 2)?);

    println!("\nEntries of A:");
    for entry in a.entries() {
        println!("  key {:>2}  {:?}  {}", entry.key, entry.indices, entry.value);
    }

    println!("\nA as JSON: {}", a.to_json_string()?);
    Ok(())
}

fn report(label: &str, result: Contraction) {
    match result {
        Contraction::Scalar(x) => println!("{label:<28} = {x}"),
        Contraction::Tensor(t) => println!("{label:<28} = {t}  (shape {})", t.shape()),
    }
}
