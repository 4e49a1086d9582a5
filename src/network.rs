/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Flow networks.
//!
//! A [`FlowNetwork`] is a [`Graph`] whose vertices carry an integer id
//! and a demand and whose edges carry a lower bound, an upper bound
//! (capacity), a cost per unit of flow and the current flow.
//!
//! The demand of a vertex is its required *net inflow*: a feasible
//! flow satisfies `Σ flow(in) - Σ flow(out) = demand(v)` at every
//! vertex, so supply vertices have negative demand.
//!
//! The id `0` is reserved for the artificial root vertex that the
//! network simplex inserts while it runs.
//!
//! # Example
//!
//! ```
//! use rs_netsimplex::FlowNetwork;
//!
//! let mut net = FlowNetwork::<i64>::new();
//! let s = net.add_vertex(1, -10).unwrap();
//! let t = net.add_vertex(2, 10).unwrap();
//! let e = net.add_edge(s, t, 0, 10, 5);
//!
//! assert_eq!(net.vertex(2), Some(t));
//! assert_eq!(net.flow(e), 0);
//! net.set_flow(e, 10);
//! assert_eq!(net.total_cost(), 50);
//! ```

use crate::attributes::{EdgeAttributes, NodeAttributes};
use crate::graph::{Edge, Graph, Node};
use crate::key::Key;

use num_traits::Num;

use std::collections::HashMap;
use std::error;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The id of the artificial root vertex.
pub const ROOT_ID: usize = 0;

/// Error when modifying a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The id 0 is reserved for the artificial root.
    ReservedId,
    /// A vertex with this id already exists.
    DuplicateId(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        match self {
            Error::ReservedId => write!(fmt, "vertex id {} is reserved", ROOT_ID),
            Error::DuplicateId(id) => write!(fmt, "duplicate vertex id {}", id),
        }
    }
}

impl error::Error for Error {}

/// Attributes of a vertex.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VertexData<F> {
    pub id: usize,
    pub demand: F,
}

/// Attributes of an edge.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ArcData<F> {
    pub lower: F,
    pub upper: F,
    pub cost: F,
    pub flow: F,
}

/// A directed network with demands, bounds, costs and flows.
///
/// Clones and deserialized networks get a fresh key.
#[derive(Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct FlowNetwork<F = i64> {
    #[cfg_attr(feature = "serialize", serde(skip, default = "Key::next"))]
    key: Key,
    revision: u64,
    graph: Graph<VertexData<F>, ArcData<F>>,
    ids: HashMap<usize, Node>,
}

impl<F: Clone> Clone for FlowNetwork<F> {
    fn clone(&self) -> Self {
        FlowNetwork {
            key: Key::next(),
            revision: self.revision,
            graph: self.graph.clone(),
            ids: self.ids.clone(),
        }
    }
}

impl<F: Copy> Default for FlowNetwork<F> {
    fn default() -> Self {
        FlowNetwork::new()
    }
}

impl<F: Copy> FlowNetwork<F> {
    pub fn new() -> Self {
        FlowNetwork::with_capacities(0, 0)
    }

    /// Create an empty network with memory reserved for `n` vertices
    /// and `m` edges.
    pub fn with_capacities(n: usize, m: usize) -> Self {
        FlowNetwork {
            key: Key::next(),
            revision: 0,
            graph: Graph::with_capacities(n, m),
            ids: HashMap::with_capacity(n),
        }
    }

    /// The unique key of this network.
    pub fn key(&self) -> Key {
        self.key
    }

    /// The modification counter.
    ///
    /// Every mutating operation increases the revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn graph(&self) -> &Graph<VertexData<F>, ArcData<F>> {
        &self.graph
    }

    /// Mutable access to the underlying graph.
    ///
    /// This counts as a modification, even if nothing is changed.
    /// Vertices must be added by `add_vertex`, otherwise they cannot
    /// be found by id.
    pub fn graph_mut(&mut self) -> &mut Graph<VertexData<F>, ArcData<F>> {
        self.touch();
        &mut self.graph
    }

    pub fn num_vertices(&self) -> usize {
        self.graph.num_nodes()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    /// Add a new vertex with the given id and demand.
    ///
    /// The name of the vertex is set to its decimal id.
    pub fn add_vertex(&mut self, id: usize, demand: F) -> Result<Node, Error> {
        if id == ROOT_ID {
            return Err(Error::ReservedId);
        }
        if self.ids.contains_key(&id) {
            return Err(Error::DuplicateId(id));
        }
        Ok(self.insert_vertex(id, demand))
    }

    /// Add the artificial root vertex.
    ///
    /// A stale root left behind by an interrupted solve is removed first.
    pub(crate) fn add_root(&mut self, zero: F) -> Node {
        if let Some(r) = self.vertex(ROOT_ID) {
            self.remove_vertex(r);
        }
        self.insert_vertex(ROOT_ID, zero)
    }

    fn insert_vertex(&mut self, id: usize, demand: F) -> Node {
        self.touch();
        let u = self.graph.add_node_with(VertexData { id, demand });
        self.graph.set_name(u, id.to_string());
        self.ids.insert(id, u);
        u
    }

    /// Remove a vertex and all its incident edges.
    pub fn remove_vertex(&mut self, u: Node) {
        self.touch();
        let data = self.graph.remove_node(u);
        self.ids.remove(&data.id);
    }

    /// Return the vertex with the given id.
    pub fn vertex(&self, id: usize) -> Option<Node> {
        self.ids.get(&id).copied()
    }

    pub fn vertex_by_key(&self, key: Key) -> Option<Node> {
        self.graph.node_by_key(key)
    }

    pub fn edge_by_key(&self, key: Key) -> Option<Edge> {
        self.graph.edge_by_key(key)
    }

    pub fn id(&self, u: Node) -> usize {
        self.graph.node(u).id
    }

    /// Add an edge from `u` to `v`.
    ///
    /// The flow of the new edge is its lower bound.
    pub fn add_edge(&mut self, u: Node, v: Node, lower: F, upper: F, cost: F) -> Edge {
        self.touch();
        self.graph.add_edge_with(
            u,
            v,
            ArcData {
                lower,
                upper,
                cost,
                flow: lower,
            },
        )
    }

    pub fn remove_edge(&mut self, e: Edge) {
        self.touch();
        self.graph.remove_edge(e);
    }

    pub fn src(&self, e: Edge) -> Node {
        self.graph.src(e)
    }

    pub fn snk(&self, e: Edge) -> Node {
        self.graph.snk(e)
    }

    pub fn demand(&self, u: Node) -> F {
        self.graph.node(u).demand
    }

    pub fn set_demand(&mut self, u: Node, demand: F) {
        self.touch();
        self.graph.node_mut(u).demand = demand;
    }

    pub fn lower(&self, e: Edge) -> F {
        self.graph.edge(e).lower
    }

    pub fn set_lower(&mut self, e: Edge, lower: F) {
        self.touch();
        self.graph.edge_mut(e).lower = lower;
    }

    /// The upper bound (capacity) of an edge.
    pub fn upper(&self, e: Edge) -> F {
        self.graph.edge(e).upper
    }

    pub fn set_upper(&mut self, e: Edge, upper: F) {
        self.touch();
        self.graph.edge_mut(e).upper = upper;
    }

    pub fn cost(&self, e: Edge) -> F {
        self.graph.edge(e).cost
    }

    pub fn set_cost(&mut self, e: Edge, cost: F) {
        self.touch();
        self.graph.edge_mut(e).cost = cost;
    }

    pub fn flow(&self, e: Edge) -> F {
        self.graph.edge(e).flow
    }

    pub fn set_flow(&mut self, e: Edge, flow: F) {
        self.touch();
        self.graph.edge_mut(e).flow = flow;
    }

    /// Return an iterator over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.graph.nodes()
    }

    /// Return an iterator over all edges.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edges()
    }
}

impl<F: Num + Copy> FlowNetwork<F> {
    /// Return the cost of the current flow.
    pub fn total_cost(&self) -> F {
        self.graph
            .edges()
            .fold(F::zero(), |acc, e| acc + self.flow(e) * self.cost(e))
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, FlowNetwork};

    #[test]
    fn test_vertices() {
        let mut net = FlowNetwork::<i64>::new();
        let u = net.add_vertex(3, -4).unwrap();
        let v = net.add_vertex(7, 4).unwrap();

        assert_eq!(net.add_vertex(0, 0), Err(Error::ReservedId));
        assert_eq!(net.add_vertex(3, 1), Err(Error::DuplicateId(3)));
        assert_eq!(net.num_vertices(), 2);
        assert_eq!(net.vertex(3), Some(u));
        assert_eq!(net.vertex(7), Some(v));
        assert_eq!(net.vertex(5), None);
        assert_eq!(net.id(v), 7);
        assert_eq!(net.graph().name(u), "3");
        assert_eq!(net.demand(u), -4);
        assert_eq!(net.vertex_by_key(net.graph().node_key(v)), Some(v));

        net.remove_vertex(u);
        assert_eq!(net.vertex(3), None);
        // the id can be used again
        assert!(net.add_vertex(3, 0).is_ok());
    }

    #[test]
    fn test_edges() {
        let mut net = FlowNetwork::<i64>::new();
        let u = net.add_vertex(1, 0).unwrap();
        let v = net.add_vertex(2, 0).unwrap();
        let e = net.add_edge(u, v, 2, 8, -3);
        let f = net.add_edge(v, u, 0, 5, 1);

        assert_eq!((net.src(e), net.snk(e)), (u, v));
        assert_eq!(net.lower(e), 2);
        assert_eq!(net.upper(e), 8);
        assert_eq!(net.cost(e), -3);
        assert_eq!(net.flow(e), 2);
        assert_eq!(net.flow(f), 0);
        assert_eq!(net.total_cost(), -6);

        net.set_flow(f, 4);
        assert_eq!(net.total_cost(), -2);

        net.remove_vertex(v);
        assert_eq!(net.num_edges(), 0);
        assert_eq!(net.total_cost(), 0);
    }

    #[test]
    fn test_revision() {
        let mut net = FlowNetwork::<i64>::new();
        let r0 = net.revision();
        let u = net.add_vertex(1, 0).unwrap();
        let v = net.add_vertex(2, 0).unwrap();
        let e = net.add_edge(u, v, 0, 1, 1);
        let r1 = net.revision();
        assert!(r1 > r0);

        // reading does not count
        let _ = net.flow(e);
        let _ = net.total_cost();
        assert_eq!(net.revision(), r1);

        net.set_cost(e, 2);
        let r2 = net.revision();
        assert!(r2 > r1);
        net.graph_mut();
        assert!(net.revision() > r2);

        // failed insertions do not count
        let r3 = net.revision();
        assert!(net.add_vertex(1, 0).is_err());
        assert_eq!(net.revision(), r3);
    }

    #[test]
    fn test_keys() {
        let a = FlowNetwork::<i64>::new();
        let b = FlowNetwork::<i64>::new();
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_clone() {
        let mut a = FlowNetwork::<i64>::new();
        let u = a.add_vertex(1, -2).unwrap();
        let v = a.add_vertex(2, 2).unwrap();
        let e = a.add_edge(u, v, 0, 5, 1);

        let mut b = a.clone();
        assert_ne!(a.key(), b.key());
        assert_eq!(a.revision(), b.revision());
        assert_eq!(b.vertex(2), Some(v));
        assert_eq!(b.upper(e), 5);

        b.set_demand(u, -4);
        assert_eq!(a.demand(u), -2);
        assert_eq!(b.demand(u), -4);
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn test_serde_key() {
        let mut a = FlowNetwork::<i64>::new();
        let u = a.add_vertex(1, -1).unwrap();
        let v = a.add_vertex(2, 1).unwrap();
        a.add_edge(u, v, 0, 1, 3);

        let txt = serde_json::to_string(&a).unwrap();
        let b: FlowNetwork<i64> = serde_json::from_str(&txt).unwrap();
        assert_ne!(a.key(), b.key());
        assert_eq!(a.revision(), b.revision());
        assert_eq!(b.num_edges(), 1);
        assert_eq!(b.demand(v), 1);
    }
}
