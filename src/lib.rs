// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! Exact minimum cost flows by the primal network simplex method.
//!
//! A [`FlowNetwork`] is a directed graph whose vertices have demands
//! and whose edges have lower bounds, capacities and costs. The
//! [`NetworkSimplex`] computes a flow of minimum cost that satisfies
//! all demands and bounds and stores it in the network.
//!
//! ```
//! use rs_netsimplex::{network_simplex, FlowNetwork};
//!
//! let mut net = FlowNetwork::<i64>::new();
//! let u = net.add_vertex(1, -1).unwrap();
//! let v = net.add_vertex(2, 0).unwrap();
//! let w = net.add_vertex(3, 1).unwrap();
//! let a = net.add_edge(u, v, 0, 10, 1);
//! let b = net.add_edge(v, w, 0, 10, 2);
//! let c = net.add_edge(w, u, 0, 10, 3);
//!
//! assert_eq!(network_simplex(&mut net), Some(3));
//! assert_eq!((net.flow(a), net.flow(b), net.flow(c)), (1, 1, 0));
//! ```

// # Data structures

pub mod key;
pub use self::key::Key;

pub mod graph;
pub use self::graph::{Edge, Graph, Node};

pub mod attributes;
pub use self::attributes::{EdgeAttributes, NodeAttributes, SlotError, SlotKey, Value};

pub mod network;
pub use self::network::FlowNetwork;

// # Algorithms

pub mod mcf;
pub use self::mcf::{network_simplex, NetworkSimplex, SolutionState};

#[cfg(feature = "dimacs")]
pub mod dimacs;
