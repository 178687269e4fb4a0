use cgraph::dag::{Dag, GraphError, NodeId};
use pyo3::{
    Py, PyAny, PyErr, PyResult,
    exceptions::{PyIOError, PyKeyError, PyValueError},
    pyclass, pymethods,
};

use crate::edgespy::EdgesPy;

/// Python wrapper for the cgraph DAG.
///
/// Nodes carry arbitrary Python objects as optional payloads and are addressed
/// by integer ids. Edges are directed, and any insertion that would close a
/// cycle is rejected with a ValueError.
///
/// # Thread Safety
/// This class is marked as `unsendable`, meaning it should not be accessed from
/// multiple Python threads. The implementation uses internal mutations that are
/// not thread-safe from Python's perspective.
#[pyclass(unsendable)]
pub struct DAGraph {
    inner: Dag<Option<Py<PyAny>>>,
}

#[pymethods]
impl DAGraph {
    /// Create an empty graph.
    #[new]
    pub fn new() -> Self {
        Self { inner: Dag::new() }
    }

    /// Build a graph from an edge list.
    ///
    /// Args:
    ///     num_nodes: Number of nodes to create, with ids 0..num_nodes
    ///     edges: List of (from, to) pairs
    ///
    /// Returns:
    ///     A new DAGraph instance with payload-free nodes
    ///
    /// Raises:
    ///     KeyError: If an edge names a node outside 0..num_nodes
    ///     ValueError: If the edge list describes a cycle
    #[staticmethod]
    pub fn from_edges(num_nodes: usize, edges: EdgesPy) -> PyResult<Self> {
        let mut inner = Dag::with_capacity(num_nodes);
        let ids: Vec<NodeId> = (0..num_nodes).map(|_| inner.add_node(None)).collect();

        for &(from, to) in edges.as_ref() {
            let resolve = |raw: usize| {
                ids.get(raw).copied().ok_or_else(|| {
                    PyKeyError::new_err(format!("node {raw} is outside 0..{num_nodes}"))
                })
            };
            inner
                .add_edge(resolve(from)?, resolve(to)?)
                .map_err(graph_err)?;
        }

        Ok(Self { inner })
    }

    /// Load a graph topology from an edge-list file.
    ///
    /// Args:
    ///     path: Path to the edge-list file
    ///
    /// Returns:
    ///     A new DAGraph instance; the loaded nodes carry no payloads
    ///
    /// Raises:
    ///     IOError: If the file cannot be read
    ///     ValueError: If the file is malformed or describes a cycle
    #[staticmethod]
    pub fn load_edge_list(path: String) -> PyResult<Self> {
        let plain = Dag::load_edge_list(&path).map_err(graph_err)?;

        // The loader hands out dense ids, so they transfer one to one.
        let mut inner = Dag::with_capacity(plain.node_count());
        for _ in plain.node_ids() {
            inner.add_node(None);
        }
        for (from, to) in plain.edges() {
            inner.add_edge(from, to).map_err(graph_err)?;
        }

        Ok(Self { inner })
    }

    /// Write the graph topology to an edge-list file, payloads dropped.
    ///
    /// Args:
    ///     path: Destination path
    ///
    /// Raises:
    ///     IOError: If the file cannot be written
    pub fn save_edge_list(&self, path: String) -> PyResult<()> {
        self.inner.save_edge_list(&path).map_err(graph_err)
    }

    /// Insert a node and return its id.
    ///
    /// Args:
    ///     payload: Arbitrary object attached to the node, if any
    ///
    /// Returns:
    ///     The id of the new node; ids of removed nodes may be reused
    #[pyo3(signature = (payload=None))]
    pub fn add_node(&mut self, payload: Option<Py<PyAny>>) -> usize {
        self.inner.add_node(payload).internal
    }

    /// Remove a node and every edge incident to it.
    ///
    /// Args:
    ///     id: Id of the node to remove
    ///
    /// Returns:
    ///     The payload the node carried, or None
    ///
    /// Raises:
    ///     KeyError: If the node does not exist
    pub fn remove_node(&mut self, id: usize) -> PyResult<Option<Py<PyAny>>> {
        self.inner
            .remove_node(NodeId { internal: id })
            .map_err(graph_err)
    }

    /// Insert the edge from -> to.
    ///
    /// Args:
    ///     from: Id of the source node
    ///     to: Id of the target node
    ///
    /// Returns:
    ///     True if the edge was inserted, False if it was already present
    ///
    /// Raises:
    ///     KeyError: If either endpoint does not exist
    ///     ValueError: If the edge would create a cycle
    pub fn add_edge(&mut self, from: usize, to: usize) -> PyResult<bool> {
        self.inner
            .add_edge(NodeId { internal: from }, NodeId { internal: to })
            .map_err(graph_err)
    }

    /// Remove the edge from -> to.
    ///
    /// Returns:
    ///     True if the edge existed, False if it did not
    ///
    /// Raises:
    ///     KeyError: If either endpoint does not exist
    pub fn remove_edge(&mut self, from: usize, to: usize) -> PyResult<bool> {
        self.inner
            .remove_edge(NodeId { internal: from }, NodeId { internal: to })
            .map_err(graph_err)
    }

    /// Check whether the edge from -> to exists.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.inner
            .has_edge(NodeId { internal: from }, NodeId { internal: to })
    }

    /// Get the payload attached to a node.
    ///
    /// Raises:
    ///     KeyError: If the node does not exist
    pub fn payload(&self, id: usize) -> PyResult<Option<Py<PyAny>>> {
        match self.inner.payload(NodeId { internal: id }) {
            Some(payload) => Ok(payload.clone()),
            None => Err(PyKeyError::new_err(format!("node {id} does not exist"))),
        }
    }

    /// Direct successors of a node, in edge insertion order.
    ///
    /// Raises:
    ///     KeyError: If the node does not exist
    pub fn successors(&self, id: usize) -> PyResult<Vec<usize>> {
        Ok(self
            .inner
            .successors(NodeId { internal: id })
            .map_err(graph_err)?
            .iter()
            .map(|child| child.internal)
            .collect())
    }

    /// Direct predecessors of a node, in edge insertion order.
    ///
    /// Raises:
    ///     KeyError: If the node does not exist
    pub fn predecessors(&self, id: usize) -> PyResult<Vec<usize>> {
        Ok(self
            .inner
            .predecessors(NodeId { internal: id })
            .map_err(graph_err)?
            .iter()
            .map(|parent| parent.internal)
            .collect())
    }

    /// Ids of all nodes without incoming edges, ascending.
    pub fn roots(&self) -> Vec<usize> {
        self.inner.roots().into_iter().map(|id| id.internal).collect()
    }

    /// Ids of all nodes without outgoing edges, ascending.
    pub fn leaves(&self) -> Vec<usize> {
        self.inner
            .leaves()
            .into_iter()
            .map(|id| id.internal)
            .collect()
    }

    /// All node ids in topological order.
    ///
    /// Returns:
    ///     A list with every node exactly once, parents before children,
    ///     ties broken toward the smallest id
    pub fn topological_order(&self) -> Vec<usize> {
        self.inner.topological().map(|id| id.internal).collect()
    }

    /// Every node reachable from a node, excluding the node itself.
    ///
    /// Raises:
    ///     KeyError: If the node does not exist
    pub fn descendants(&self, id: usize) -> PyResult<Vec<usize>> {
        Ok(self
            .inner
            .descendants(NodeId { internal: id })
            .map_err(graph_err)?
            .map(|node| node.internal)
            .collect())
    }

    /// Every node that reaches a node, excluding the node itself.
    ///
    /// Raises:
    ///     KeyError: If the node does not exist
    pub fn ancestors(&self, id: usize) -> PyResult<Vec<usize>> {
        Ok(self
            .inner
            .ancestors(NodeId { internal: id })
            .map_err(graph_err)?
            .map(|node| node.internal)
            .collect())
    }

    /// Check whether a directed path from -> to exists.
    ///
    /// Every node reaches itself through the empty path.
    ///
    /// Raises:
    ///     KeyError: If either endpoint does not exist
    pub fn is_reachable(&self, from: usize, to: usize) -> PyResult<bool> {
        self.inner
            .is_reachable(NodeId { internal: from }, NodeId { internal: to })
            .map_err(graph_err)
    }

    /// Number of edges on a longest directed path through the graph.
    pub fn depth(&self) -> usize {
        self.inner.depth()
    }

    /// Get the number of nodes in the graph.
    pub fn __len__(&self) -> usize {
        self.inner.node_count()
    }

    /// Check whether a node id is live.
    pub fn __contains__(&self, id: usize) -> bool {
        self.inner.contains(NodeId { internal: id })
    }
}

/// Maps graph errors onto the Python exceptions a dict-like API would raise.
fn graph_err(err: GraphError) -> PyErr {
    match &err {
        GraphError::NodeNotFound(_) => PyKeyError::new_err(err.to_string()),
        GraphError::WouldCycle { .. } => PyValueError::new_err(err.to_string()),
        GraphError::Io(_) => PyIOError::new_err(err.to_string()),
        GraphError::Corrupt(_) | GraphError::Json(_) => PyValueError::new_err(err.to_string()),
    }
}
