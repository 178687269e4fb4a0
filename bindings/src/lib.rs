use graph::DAGraph;
use pyo3::prelude::*;

mod edgespy;
mod graph;

/// A Python module implemented in Rust for directed acyclic graph manipulation.
///
/// This module provides Python bindings for the cgraph library, which implements
/// a DAG with cycle-rejecting edge insertion, reachability queries, and
/// deterministic traversal orders.
#[pymodule]
fn cgraphpy(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<DAGraph>()?;
    Ok(())
}
