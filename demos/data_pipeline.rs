//! Demonstration data pipeline.
//!
//! Builds the classic chain over the integers 1..=10:
//! keep odd values, add 1 then 2, take the first three, multiply by 10,
//! and print the collected output separated by spaces.
//!
//! Run with: cargo run --example data_pipeline
//! Set RUST_LOG=sluice=debug to see the engine's spans and events.

use std::sync::Arc;

use sluice::element::Transform;
use sluice::error::Result;
use sluice::memory::HeapResource;
use sluice::observability::init_metrics;
use sluice::ops::{add, mul, odd};
use sluice::pipeline;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    init_metrics();

    let data: Vec<i64> = (1..=10).collect();

    let transforms: Vec<Arc<dyn Transform<i64>>> = vec![Arc::new(add(1)), Arc::new(add(2))];
    let output = pipeline(HeapResource::new(), &data)
        .filter(odd())
        .map_all(transforms)
        .take(3)
        .map(mul(10))
        .collect()?;

    let rendered: Vec<String> = output.iter().map(|v| v.to_string()).collect();
    println!("{}", rendered.join(" "));

    Ok(())
}
