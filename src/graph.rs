/*
 * Copyright (c) 2017-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! A linked-list based directed graph with removable nodes and edges.
//!
//! Node and edge data are stored in arenas (`Vec`s), nodes and edges
//! are identified by their arena index. Removed entries leave a hole
//! that is reused by the next insertion, so handles of removed items
//! must not be used anymore.
//!
//! Each node keeps a doubly linked list of its outgoing and one of its
//! incoming edges, the links are stored in the edges. Hence adding and
//! removing an edge is O(1), removing a node is linear in its degree.
//!
//! `Graph` takes additional parameters for typed node and edge
//! attributes, thus it implements `NodeAttributes` and
//! `EdgeAttributes`. Besides those, every node and edge may carry
//! values for dynamically registered *slots* (see
//! [`crate::attributes`]).

use crate::attributes::{EdgeAttributes, NodeAttributes, SlotError, SlotKey, SlotRegistry, SlotValues, Value};
use crate::key::Key;

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

type ID = u32;

const NONE: ID = ID::max_value();

/// Node of a graph.
///
/// This is basically a newtype of the node index.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Node(ID);

impl Node {
    /// The arena index of this node.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Edge of a graph.
///
/// This is basically a newtype of the edge index.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Edge(ID);

impl Edge {
    /// The arena index of this edge.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Data for a node.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
struct NodeData<N> {
    key: Key,
    name: String,
    /// The first outgoing edge.
    first_out: ID,
    /// The first incoming edge.
    first_in: ID,
    /// Associated node attributes.
    attrs: N,
    slots: SlotValues,
}

/// Data for an edge.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
struct EdgeData<E> {
    key: Key,
    src: ID,
    snk: ID,
    /// Neighbours in the outgoing list of the source node.
    prev_out: ID,
    next_out: ID,
    /// Neighbours in the incoming list of the sink node.
    prev_in: ID,
    next_in: ID,
    /// Associated edge attributes.
    attrs: E,
    slots: SlotValues,
}

/// The linked list based graph data structure.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Graph<N = (), E = ()> {
    nodes: Vec<Option<NodeData<N>>>,
    edges: Vec<Option<EdgeData<E>>>,
    free_nodes: Vec<ID>,
    free_edges: Vec<ID>,
    num_nodes: usize,
    num_edges: usize,
    node_keys: HashMap<Key, Node>,
    edge_keys: HashMap<Key, Edge>,
    node_slots: SlotRegistry,
    edge_slots: SlotRegistry,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Graph::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Graph::with_capacities(0, 0)
    }

    /// Create a new, empty graph with memory reserved for `nnodes`
    /// nodes and `nedges` edges.
    pub fn with_capacities(nnodes: usize, nedges: usize) -> Self {
        Graph {
            nodes: Vec::with_capacity(nnodes),
            edges: Vec::with_capacity(nedges),
            free_nodes: vec![],
            free_edges: vec![],
            num_nodes: 0,
            num_edges: 0,
            node_keys: HashMap::with_capacity(nnodes),
            edge_keys: HashMap::with_capacity(nedges),
            node_slots: SlotRegistry::default(),
            edge_slots: SlotRegistry::default(),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Upper bound (exclusive) on the index of any node.
    pub fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    /// Upper bound (exclusive) on the index of any edge.
    pub fn edge_bound(&self) -> usize {
        self.edges.len()
    }

    fn ndata(&self, u: Node) -> &NodeData<N> {
        match self.nodes.get(u.index()) {
            Some(Some(data)) => data,
            _ => panic!("Invalid node {}", u),
        }
    }

    fn ndata_mut(&mut self, u: Node) -> &mut NodeData<N> {
        match self.nodes.get_mut(u.index()) {
            Some(Some(data)) => data,
            _ => panic!("Invalid node {}", u),
        }
    }

    fn edata(&self, e: Edge) -> &EdgeData<E> {
        match self.edges.get(e.index()) {
            Some(Some(data)) => data,
            _ => panic!("Invalid edge {}", e),
        }
    }

    fn edata_mut(&mut self, e: Edge) -> &mut EdgeData<E> {
        match self.edges.get_mut(e.index()) {
            Some(Some(data)) => data,
            _ => panic!("Invalid edge {}", e),
        }
    }

    /// Return `true` if `u` is a node of this graph.
    pub fn contains_node(&self, u: Node) -> bool {
        matches!(self.nodes.get(u.index()), Some(Some(_)))
    }

    /// Return `true` if `e` is an edge of this graph.
    pub fn contains_edge(&self, e: Edge) -> bool {
        matches!(self.edges.get(e.index()), Some(Some(_)))
    }

    /// Add a new node with the given attributes.
    pub fn add_node_with(&mut self, attrs: N) -> Node {
        let key = Key::next();
        let mut slots = SlotValues::default();
        for k in self.node_slots.keys() {
            slots.set(k, Value::Empty);
        }
        let data = NodeData {
            key,
            name: String::new(),
            first_out: NONE,
            first_in: NONE,
            attrs,
            slots,
        };
        let u = if let Some(id) = self.free_nodes.pop() {
            self.nodes[id as usize] = Some(data);
            Node(id)
        } else {
            assert!(self.nodes.len() + 1 < NONE as usize, "Node capacity exceeded");
            self.nodes.push(Some(data));
            Node((self.nodes.len() - 1) as ID)
        };
        self.node_keys.insert(key, u);
        self.num_nodes += 1;
        u
    }

    /// Add a new edge from `u` to `v` with the given attributes.
    pub fn add_edge_with(&mut self, u: Node, v: Node, attrs: E) -> Edge {
        let key = Key::next();
        let mut slots = SlotValues::default();
        for k in self.edge_slots.keys() {
            slots.set(k, Value::Empty);
        }
        let first_out = self.ndata(u).first_out;
        let first_in = self.ndata(v).first_in;
        let data = EdgeData {
            key,
            src: u.0,
            snk: v.0,
            prev_out: NONE,
            next_out: first_out,
            prev_in: NONE,
            next_in: first_in,
            attrs,
            slots,
        };
        let e = if let Some(id) = self.free_edges.pop() {
            self.edges[id as usize] = Some(data);
            Edge(id)
        } else {
            assert!(self.edges.len() + 1 < NONE as usize, "Edge capacity exceeded");
            self.edges.push(Some(data));
            Edge((self.edges.len() - 1) as ID)
        };

        if first_out != NONE {
            self.edata_mut(Edge(first_out)).prev_out = e.0;
        }
        if first_in != NONE {
            self.edata_mut(Edge(first_in)).prev_in = e.0;
        }
        self.ndata_mut(u).first_out = e.0;
        self.ndata_mut(v).first_in = e.0;

        self.edge_keys.insert(key, e);
        self.num_edges += 1;
        e
    }

    /// Remove an edge and return its attributes.
    pub fn remove_edge(&mut self, e: Edge) -> E {
        let (src, snk, prev_out, next_out, prev_in, next_in) = {
            let d = self.edata(e);
            (d.src, d.snk, d.prev_out, d.next_out, d.prev_in, d.next_in)
        };

        // unlink from the outgoing list of the source ...
        if prev_out != NONE {
            self.edata_mut(Edge(prev_out)).next_out = next_out;
        } else {
            self.ndata_mut(Node(src)).first_out = next_out;
        }
        if next_out != NONE {
            self.edata_mut(Edge(next_out)).prev_out = prev_out;
        }

        // ... and from the incoming list of the sink
        if prev_in != NONE {
            self.edata_mut(Edge(prev_in)).next_in = next_in;
        } else {
            self.ndata_mut(Node(snk)).first_in = next_in;
        }
        if next_in != NONE {
            self.edata_mut(Edge(next_in)).prev_in = prev_in;
        }

        let data = match self.edges[e.index()].take() {
            Some(data) => data,
            None => unreachable!(),
        };
        self.edge_keys.remove(&data.key);
        self.free_edges.push(e.0);
        self.num_edges -= 1;
        data.attrs
    }

    /// Remove a node together with all incident edges and return its attributes.
    pub fn remove_node(&mut self, u: Node) -> N {
        while let Some(e) = self.first_out(u) {
            self.remove_edge(e);
        }
        while let Some(e) = self.first_in(u) {
            self.remove_edge(e);
        }
        let data = match self.nodes[u.index()].take() {
            Some(data) => data,
            None => unreachable!(),
        };
        self.node_keys.remove(&data.key);
        self.free_nodes.push(u.0);
        self.num_nodes -= 1;
        data.attrs
    }

    fn first_out(&self, u: Node) -> Option<Edge> {
        let e = self.ndata(u).first_out;
        if e != NONE {
            Some(Edge(e))
        } else {
            None
        }
    }

    fn first_in(&self, u: Node) -> Option<Edge> {
        let e = self.ndata(u).first_in;
        if e != NONE {
            Some(Edge(e))
        } else {
            None
        }
    }

    /// Return an iterator over all nodes in index order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_some())
            .map(|(i, _)| Node(i as ID))
    }

    /// Return an iterator over all edges in index order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_some())
            .map(|(i, _)| Edge(i as ID))
    }

    /// Return an iterator over the edges leaving `u` and their sinks.
    pub fn outedges(&self, u: Node) -> OutEdges<'_, N, E> {
        OutEdges {
            graph: self,
            cur: self.ndata(u).first_out,
        }
    }

    /// Return an iterator over the edges entering `u` and their sources.
    pub fn inedges(&self, u: Node) -> InEdges<'_, N, E> {
        InEdges {
            graph: self,
            cur: self.ndata(u).first_in,
        }
    }

    pub fn src(&self, e: Edge) -> Node {
        Node(self.edata(e).src)
    }

    pub fn snk(&self, e: Edge) -> Node {
        Node(self.edata(e).snk)
    }

    /// Return the end nodes `(src, snk)` of an edge.
    pub fn enodes(&self, e: Edge) -> (Node, Node) {
        let d = self.edata(e);
        (Node(d.src), Node(d.snk))
    }

    pub fn node_key(&self, u: Node) -> Key {
        self.ndata(u).key
    }

    pub fn edge_key(&self, e: Edge) -> Key {
        self.edata(e).key
    }

    pub fn node_by_key(&self, key: Key) -> Option<Node> {
        self.node_keys.get(&key).copied()
    }

    pub fn edge_by_key(&self, key: Key) -> Option<Edge> {
        self.edge_keys.get(&key).copied()
    }

    pub fn name(&self, u: Node) -> &str {
        &self.ndata(u).name
    }

    pub fn set_name<S: Into<String>>(&mut self, u: Node, name: S) {
        self.ndata_mut(u).name = name.into();
    }

    /// Register a new node slot.
    ///
    /// Every existing node gets an empty value for the new slot.
    pub fn add_node_slot(&mut self, name: &str) -> Result<SlotKey, SlotError> {
        let key = self.node_slots.register(name)?;
        for data in self.nodes.iter_mut().flatten() {
            data.slots.set(key, Value::Empty);
        }
        Ok(key)
    }

    /// Register a new edge slot.
    ///
    /// Every existing edge gets an empty value for the new slot.
    pub fn add_edge_slot(&mut self, name: &str) -> Result<SlotKey, SlotError> {
        let key = self.edge_slots.register(name)?;
        for data in self.edges.iter_mut().flatten() {
            data.slots.set(key, Value::Empty);
        }
        Ok(key)
    }

    /// Return the key of the node slot with the given name.
    pub fn node_slot(&self, name: &str) -> Option<SlotKey> {
        self.node_slots.find(name)
    }

    /// Return the key of the edge slot with the given name.
    pub fn edge_slot(&self, name: &str) -> Option<SlotKey> {
        self.edge_slots.find(name)
    }

    pub fn node_slot_name(&self, key: SlotKey) -> Option<&str> {
        self.node_slots.name(key)
    }

    pub fn edge_slot_name(&self, key: SlotKey) -> Option<&str> {
        self.edge_slots.name(key)
    }

    /// Unregister a node slot and clear it from every node.
    ///
    /// Returns `false` if the slot had not been registered.
    pub fn remove_node_slot(&mut self, key: SlotKey) -> bool {
        if !self.node_slots.unregister(key) {
            return false;
        }
        for data in self.nodes.iter_mut().flatten() {
            data.slots.remove(key);
        }
        true
    }

    /// Unregister an edge slot and clear it from every edge.
    ///
    /// Returns `false` if the slot had not been registered.
    pub fn remove_edge_slot(&mut self, key: SlotKey) -> bool {
        if !self.edge_slots.unregister(key) {
            return false;
        }
        for data in self.edges.iter_mut().flatten() {
            data.slots.remove(key);
        }
        true
    }

    /// The value of a node slot, `Value::Empty` if it has not been set.
    pub fn node_value(&self, u: Node, key: SlotKey) -> &Value {
        self.ndata(u).slots.get(key)
    }

    /// The value of an edge slot, `Value::Empty` if it has not been set.
    pub fn edge_value(&self, e: Edge, key: SlotKey) -> &Value {
        self.edata(e).slots.get(key)
    }

    pub fn set_node_value<V: Into<Value>>(&mut self, u: Node, key: SlotKey, value: V) -> Result<(), SlotError> {
        self.node_slots.check(key)?;
        self.ndata_mut(u).slots.set(key, value.into());
        Ok(())
    }

    pub fn set_edge_value<V: Into<Value>>(&mut self, e: Edge, key: SlotKey, value: V) -> Result<(), SlotError> {
        self.edge_slots.check(key)?;
        self.edata_mut(e).slots.set(key, value.into());
        Ok(())
    }
}

impl<N: Default, E: Default> Graph<N, E> {
    /// Add a new node with default attributes.
    pub fn add_node(&mut self) -> Node {
        self.add_node_with(N::default())
    }

    /// Add `n` new nodes with default attributes.
    pub fn add_nodes(&mut self, n: usize) -> Vec<Node> {
        (0..n).map(|_| self.add_node()).collect()
    }

    /// Add a new edge with default attributes.
    pub fn add_edge(&mut self, u: Node, v: Node) -> Edge {
        self.add_edge_with(u, v, E::default())
    }
}

/// An iterator over the edges leaving a node.
pub struct OutEdges<'a, N, E> {
    graph: &'a Graph<N, E>,
    cur: ID,
}

impl<'a, N, E> Iterator for OutEdges<'a, N, E> {
    type Item = (Edge, Node);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur != NONE {
            let e = Edge(self.cur);
            let d = self.graph.edata(e);
            self.cur = d.next_out;
            Some((e, Node(d.snk)))
        } else {
            None
        }
    }
}

/// An iterator over the edges entering a node.
pub struct InEdges<'a, N, E> {
    graph: &'a Graph<N, E>,
    cur: ID,
}

impl<'a, N, E> Iterator for InEdges<'a, N, E> {
    type Item = (Edge, Node);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur != NONE {
            let e = Edge(self.cur);
            let d = self.graph.edata(e);
            self.cur = d.next_in;
            Some((e, Node(d.src)))
        } else {
            None
        }
    }
}

impl<N, E> NodeAttributes<N> for Graph<N, E> {
    fn node(&self, u: Node) -> &N {
        &self.ndata(u).attrs
    }

    fn node_mut(&mut self, u: Node) -> &mut N {
        &mut self.ndata_mut(u).attrs
    }
}

impl<N, E> EdgeAttributes<E> for Graph<N, E> {
    fn edge(&self, e: Edge) -> &E {
        &self.edata(e).attrs
    }

    fn edge_mut(&mut self, e: Edge) -> &mut E {
        &mut self.edata_mut(e).attrs
    }
}
