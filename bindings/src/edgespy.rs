use pyo3::{
    Bound, FromPyObject, IntoPyObject, PyErr,
    types::{PyAnyMethods, PyList},
};

/// A Python-compatible wrapper around a list of directed edges.
///
/// This type bridges between Python lists of `(from, to)` pairs and
/// Rust Vec<(usize, usize)>
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EdgesPy {
    pub inner: Vec<(usize, usize)>,
}

impl AsRef<[(usize, usize)]> for EdgesPy {
    fn as_ref(&self) -> &[(usize, usize)] {
        self.inner.as_ref()
    }
}

/// Explain to Rust how to parse some random python object into an actual Rust
/// edge list. This involves new allocations because Python cannot be trusted
/// to keep this reference alive.
///
/// This can fail if the random object in question is not a list of pairs,
/// in which case it is automatically reported by raising a TypeError exception
/// in the Python code
impl<'a> FromPyObject<'a> for EdgesPy {
    fn extract_bound(ob: &pyo3::Bound<'a, pyo3::PyAny>) -> pyo3::PyResult<Self> {
        let list: Vec<(usize, usize)> = ob.downcast::<PyList>()?.extract()?;
        Ok(EdgesPy { inner: list })
    }
}

// Cast back the edge pairs to a Python list of tuples
impl<'a> IntoPyObject<'a> for EdgesPy {
    type Target = PyList;
    type Output = Bound<'a, PyList>;
    type Error = PyErr;

    fn into_pyobject(self, py: pyo3::Python<'a>) -> Result<Self::Output, Self::Error> {
        let internal = self.inner;
        PyList::new(py, internal)
    }
}
