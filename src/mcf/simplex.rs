/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! A primal network simplex implementation.
//!
//! The network is extended by an artificial root vertex connected to
//! every vertex by an artificial edge of cost *big-M* and unbounded
//! capacity. The star of artificial edges is the initial basis tree,
//! all original edges start at their lower bound. The pivot loop then
//! drives the flow out of the artificial edges; if some artificial edge
//! still carries flow at the end, the problem is infeasible.
//!
//! Degenerate pivots are handled by choosing the *last* blocking edge
//! on the cycle (oriented from the apex in the direction of the flow
//! change) as the leaving edge. `Pricing::Bland` together with
//! `LeavingRule::SmallestIndex` gives Bland's rule.
//!
//! # Example
//!
//! ```
//! use rs_netsimplex::mcf::{NetworkSimplex, SolutionState};
//! use rs_netsimplex::FlowNetwork;
//!
//! let mut net = FlowNetwork::<i64>::new();
//! let s = net.add_vertex(1, -10).unwrap();
//! let t = net.add_vertex(2, 10).unwrap();
//! let e = net.add_edge(s, t, 0, 10, 5);
//!
//! let mut spx = NetworkSimplex::new();
//! assert_eq!(spx.solve(&mut net), SolutionState::Optimal);
//! assert_eq!(net.flow(e), 10);
//! assert_eq!(net.total_cost(), 50);
//! ```

use super::tree::{TreeIndex, NONE, ROOT};
use super::SolutionState;
use crate::graph::{Edge, Node};
use crate::key::Key;
use crate::network::FlowNetwork;

use log::{debug, trace, warn};
use num_traits::{FromPrimitive, NumAssign, PrimInt, Signed, ToPrimitive};

use std::fmt::Display;

/// Rule for selecting the entering edge.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Pricing {
    /// Scan the edges at their lower bound, then those at their upper
    /// bound, and choose the most violating among the first
    /// `candidate_window` eligible edges.
    Block,
    /// Choose the most violating edge.
    Complete,
    /// Choose the first eligible edge.
    FirstEligible,
    /// Choose the eligible edge with the smallest index.
    Bland,
}

impl Default for Pricing {
    fn default() -> Self {
        Pricing::Block
    }
}

/// Rule for selecting the leaving edge among the blocking edges.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LeavingRule {
    /// The last blocking edge on the cycle.
    LastBlocking,
    /// The first blocking edge on the cycle.
    FirstBlocking,
    /// The blocking edge with the smallest index.
    SmallestIndex,
}

impl Default for LeavingRule {
    fn default() -> Self {
        LeavingRule::LastBlocking
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum EdgeState {
    Tree,
    Lower,
    Upper,
}

/// The final basis of an optimal solve.
struct Basis<F> {
    network: Key,
    revision: u64,
    state: Vec<EdgeState>,
    tree: TreeIndex,
    artificial_flow: Vec<F>,
}

/// A primal network simplex algorithm.
pub struct NetworkSimplex<F> {
    /// The pricing rule. Defaults to `Pricing::Block`.
    pub pricing: Pricing,
    /// The leaving edge rule. Defaults to `LeavingRule::LastBlocking`.
    pub leaving: LeavingRule,
    /// The number of candidates for block pricing.
    ///
    /// If `None` (the default) the window is
    /// `max(10, round(sqrt(m) / 2))` for `m` edges.
    pub candidate_window: Option<usize>,
    /// The artificial cost value.
    ///
    /// Should be larger than the value of any augmenting cycle. If
    /// `None` (the default) the artificial cost is set to
    /// `1 + round(n * max|cost| / 2)`.
    pub artificial_cost: Option<F>,
    /// The infinite flow value.
    ///
    /// Capacities greater than or equal to this are considered
    /// unbounded. The default is `F::max_value()`.
    pub infinite: F,

    niter: usize,
    solution_state: SolutionState,
    basis: Option<Basis<F>>,
}

impl<F> Default for NetworkSimplex<F>
where
    F: PrimInt + Signed + NumAssign + FromPrimitive + Display,
{
    fn default() -> Self {
        NetworkSimplex::new()
    }
}

impl<F> NetworkSimplex<F>
where
    F: PrimInt + Signed + NumAssign + FromPrimitive + Display,
{
    pub fn new() -> Self {
        NetworkSimplex {
            pricing: Pricing::default(),
            leaving: LeavingRule::default(),
            candidate_window: None,
            artificial_cost: None,
            infinite: F::max_value(),
            niter: 0,
            solution_state: SolutionState::Unknown,
            basis: None,
        }
    }

    /// Return the number of pivots of the latest solve.
    pub fn num_iterations(&self) -> usize {
        self.niter
    }

    /// Return the solution state of the latest solve.
    pub fn solution_state(&self) -> SolutionState {
        self.solution_state
    }

    /// Solve the min-cost-flow problem.
    ///
    /// On success the flow of every edge of `net` is set to an optimal
    /// flow. If `net` has not been modified since the last optimal
    /// solve with this instance, the previous basis is reused.
    pub fn solve(&mut self, net: &mut FlowNetwork<F>) -> SolutionState {
        self.niter = 0;
        self.solution_state = self.run(net);
        self.solution_state
    }

    fn run(&mut self, net: &mut FlowNetwork<F>) -> SolutionState {
        let basis = self
            .basis
            .take()
            .filter(|b| b.network == net.key() && b.revision == net.revision());

        // check trivial cases
        if net.num_vertices() == 0 {
            return SolutionState::Optimal;
        }
        if let Some(e) = net.edges().find(|&e| net.lower(e) > net.upper(e)) {
            warn!(
                "Network {} is infeasible: edge {} has lower bound {} > upper bound {}",
                net.key(),
                e,
                net.lower(e),
                net.upper(e)
            );
            return SolutionState::Infeasible;
        }

        let artificial_cost = self.artificial_cost.unwrap_or_else(|| default_artificial_cost(net));
        let window = self
            .candidate_window
            .unwrap_or_else(|| default_candidate_window(net.num_edges()))
            .max(1);

        debug!(
            "Solve network {} with {} vertices and {} edges, artificial cost {}{}",
            net.key(),
            net.num_vertices(),
            net.num_edges(),
            artificial_cost,
            if basis.is_some() { " (warm start)" } else { "" }
        );

        let mut ctx = Context::extend(net, artificial_cost, self.infinite);
        if let Some(basis) = basis {
            ctx.restore(basis);
        }
        ctx.init_potentials();

        let mut unbounded = false;
        while let Some(e_in) = ctx.find_entering_edge(self.pricing, window) {
            self.niter += 1;
            let rc = ctx.reduced_cost[e_in];
            match ctx.pivot(e_in, self.leaving) {
                Some((e_out, eps)) => trace!(
                    "Pivot {}: entering {} (rc {}), leaving {}, epsilon {}",
                    self.niter,
                    e_in,
                    rc,
                    e_out,
                    eps
                ),
                None => {
                    unbounded = true;
                    break;
                }
            }
        }

        let feasible = ctx.cleanup();
        let state = if unbounded {
            SolutionState::Unbounded
        } else if !feasible {
            SolutionState::Infeasible
        } else {
            SolutionState::Optimal
        };

        if state == SolutionState::Optimal {
            self.basis = Some(ctx.into_basis());
        } else {
            warn!("Network {} is {}", net.key(), state);
        }
        debug!("Finished after {} pivots: {}", self.niter, state);
        state
    }
}

/// Return `1 + round(n * max|cost| / 2)`.
///
/// On overflow a quarter of the largest representable value is used.
fn default_artificial_cost<F>(net: &FlowNetwork<F>) -> F
where
    F: PrimInt + Signed + NumAssign + FromPrimitive + Display,
{
    let max_cost = net.edges().map(|e| net.cost(e).abs()).max().unwrap_or_else(F::zero);
    let two = F::one() + F::one();
    F::from_usize(net.num_vertices())
        .and_then(|n| n.checked_mul(&max_cost))
        .and_then(|x| x.checked_add(&F::one()))
        .map(|x| x / two + F::one())
        .unwrap_or_else(|| {
            warn!("Artificial cost overflows, using {}", F::max_value() >> 2);
            F::max_value() >> 2
        })
}

fn default_candidate_window(m: usize) -> usize {
    ((m as f64).sqrt() * 0.5).round().to_usize().unwrap_or(0).max(10)
}

/// The state of a single solve on an extended network.
///
/// Vertices and edges are addressed by dense indices. Vertex 0 is the
/// root, vertices `1..=n` are the original vertices ordered by id.
/// Edges `0..m` are the original edges, edge `m + v - 1` is the
/// artificial edge of vertex `v`.
struct Context<'a, F> {
    net: &'a mut FlowNetwork<F>,
    nodes: Vec<Node>,
    node_index: Vec<usize>,
    edges: Vec<Edge>,
    edge_index: Vec<usize>,
    num_original: usize,

    src: Vec<usize>,
    snk: Vec<usize>,
    lower: Vec<F>,
    upper: Vec<F>,
    cost: Vec<F>,
    flow: Vec<F>,
    state: Vec<EdgeState>,

    tree: TreeIndex,
    potential: Vec<F>,
    reduced_cost: Vec<F>,

    infinite: F,
    /// The current cycle as (edge, forward) pairs.
    cycle: Vec<(usize, bool)>,
}

impl<'a, F> Context<'a, F>
where
    F: PrimInt + Signed + NumAssign + FromPrimitive + Display,
{
    /// Add the root and the artificial edges and set up the star basis.
    fn extend(net: &'a mut FlowNetwork<F>, artificial_cost: F, infinite: F) -> Self {
        let mut vertices: Vec<(usize, Node)> = net.vertices().map(|u| (net.id(u), u)).collect();
        vertices.sort_unstable();
        let original: Vec<Edge> = net.edges().collect();
        let n = vertices.len();
        let m = original.len();

        let root = net.add_root(F::zero());
        let mut nodes = Vec::with_capacity(n + 1);
        nodes.push(root);
        nodes.extend(vertices.into_iter().map(|(_, u)| u));
        let mut node_index = vec![NONE; net.graph().node_bound()];
        for (i, u) in nodes.iter().enumerate() {
            node_index[u.index()] = i;
        }

        let mut src = Vec::with_capacity(m + n);
        let mut snk = Vec::with_capacity(m + n);
        let mut lower = Vec::with_capacity(m + n);
        let mut upper = Vec::with_capacity(m + n);
        let mut cost = Vec::with_capacity(m + n);
        let mut flow = Vec::with_capacity(m + n);
        let mut state = Vec::with_capacity(m + n);

        // all original edges start at their lower bound
        let mut balance: Vec<F> = nodes.iter().map(|&u| net.demand(u)).collect();
        for &e in &original {
            let (u, v) = (node_index[net.src(e).index()], node_index[net.snk(e).index()]);
            let lb = net.lower(e);
            balance[u] += lb;
            balance[v] -= lb;
            src.push(u);
            snk.push(v);
            lower.push(lb);
            upper.push(net.upper(e));
            cost.push(net.cost(e));
            flow.push(lb);
            state.push(EdgeState::Lower);
        }

        // the artificial edges carry the remaining imbalance, edges
        // without flow point towards the root
        let mut edges = original;
        edges.reserve(n);
        for v in 1..=n {
            let b = balance[v];
            let (u, w, f) = if b > F::zero() { (ROOT, v, b) } else { (v, ROOT, -b) };
            edges.push(net.add_edge(nodes[u], nodes[w], F::zero(), infinite, artificial_cost));
            src.push(u);
            snk.push(w);
            lower.push(F::zero());
            upper.push(infinite);
            cost.push(artificial_cost);
            flow.push(f);
            state.push(EdgeState::Tree);
        }

        let mut edge_index = vec![NONE; net.graph().edge_bound()];
        for (i, e) in edges.iter().enumerate() {
            edge_index[e.index()] = i;
        }

        Context {
            net,
            nodes,
            node_index,
            edges,
            edge_index,
            num_original: m,
            src,
            snk,
            lower,
            upper,
            cost,
            flow,
            state,
            tree: TreeIndex::star(n, m),
            potential: vec![F::zero(); n + 1],
            reduced_cost: vec![F::zero(); m + n],
            infinite,
            cycle: Vec::new(),
        }
    }

    /// Replace the star basis by a previously computed one.
    ///
    /// The flows of the original edges are taken from the network.
    fn restore(&mut self, basis: Basis<F>) {
        let m = self.num_original;
        if basis.state.len() != self.state.len() || basis.tree.len() != self.tree.len() {
            return;
        }
        for e in 0..m {
            self.flow[e] = self.net.flow(self.edges[e]);
        }
        self.flow[m..].copy_from_slice(&basis.artificial_flow);
        self.state = basis.state;
        self.tree = basis.tree;
    }

    /// Compute potentials along the thread so that every tree edge has
    /// reduced cost 0, then the reduced cost of every edge.
    fn init_potentials(&mut self) {
        self.potential[ROOT] = F::zero();
        let mut v = self.tree.thread[ROOT];
        while v != ROOT {
            let p = self.tree.parent[v];
            let e = self.tree.parent_edge[v];
            self.potential[v] = if self.src[e] == p {
                self.potential[p] - self.cost[e]
            } else {
                self.potential[p] + self.cost[e]
            };
            v = self.tree.thread[v];
        }
        for e in 0..self.cost.len() {
            self.reduced_cost[e] = self.compute_reduced_cost(e);
        }
    }

    fn compute_reduced_cost(&self, e: usize) -> F {
        self.cost[e] + self.potential[self.snk[e]] - self.potential[self.src[e]]
    }

    /// Return by how much an edge violates the optimality conditions.
    fn violation(&self, e: usize) -> F {
        let rc = self.reduced_cost[e];
        match self.state[e] {
            EdgeState::Lower if rc < F::zero() => -rc,
            EdgeState::Upper if rc > F::zero() => rc,
            _ => F::zero(),
        }
    }

    /// The eligible edges, first those at the lower then those at the
    /// upper bound.
    fn eligible(&self) -> impl Iterator<Item = usize> + '_ {
        let m = self.state.len();
        let zero = F::zero();
        (0..m)
            .filter(move |&e| self.state[e] == EdgeState::Lower && self.reduced_cost[e] < zero)
            .chain((0..m).filter(move |&e| self.state[e] == EdgeState::Upper && self.reduced_cost[e] > zero))
    }

    fn most_violating<I: Iterator<Item = usize>>(&self, edges: I) -> Option<usize> {
        let mut best = None;
        let mut best_violation = F::zero();
        for e in edges {
            let v = self.violation(e);
            if v > best_violation {
                best = Some(e);
                best_violation = v;
            }
        }
        best
    }

    fn find_entering_edge(&self, pricing: Pricing, window: usize) -> Option<usize> {
        match pricing {
            Pricing::Block => self.most_violating(self.eligible().take(window)),
            Pricing::Complete => self.most_violating(self.eligible()),
            Pricing::FirstEligible => self.eligible().next(),
            Pricing::Bland => (0..self.state.len()).find(|&e| self.violation(e) > F::zero()),
        }
    }

    /// The amount of flow that can be pushed over an edge of the cycle.
    ///
    /// Returns `None` if it is unbounded.
    fn residual(&self, e: usize, forward: bool) -> Option<F> {
        if !forward {
            Some(self.flow[e] - self.lower[e])
        } else if self.upper[e] >= self.infinite {
            None
        } else {
            Some(self.upper[e] - self.flow[e])
        }
    }

    /// Collect the cycle of the entering edge.
    ///
    /// The cycle is oriented in the direction of the flow change and
    /// starts at the apex.
    fn find_cycle(&mut self, e_in: usize) {
        let at_lower = self.state[e_in] == EdgeState::Lower;
        let (first, second) = if at_lower {
            (self.src[e_in], self.snk[e_in])
        } else {
            (self.snk[e_in], self.src[e_in])
        };
        let apex = self.tree.apex(first, second);

        self.cycle.clear();
        let mut x = first;
        while x != apex {
            let e = self.tree.parent_edge[x];
            self.cycle.push((e, self.snk[e] == x));
            x = self.tree.parent[x];
        }
        self.cycle.reverse();
        self.cycle.push((e_in, at_lower));
        let mut x = second;
        while x != apex {
            let e = self.tree.parent_edge[x];
            self.cycle.push((e, self.src[e] == x));
            x = self.tree.parent[x];
        }
    }

    /// Perform one pivot with entering edge `e_in`.
    ///
    /// Returns the leaving edge and the flow change or `None` if the
    /// cycle has unbounded capacity.
    fn pivot(&mut self, e_in: usize, rule: LeavingRule) -> Option<(usize, F)> {
        self.find_cycle(e_in);

        let mut eps: Option<F> = None;
        for &(e, fwd) in &self.cycle {
            if let Some(r) = self.residual(e, fwd) {
                if eps.map_or(true, |d| r < d) {
                    eps = Some(r);
                }
            }
        }
        let eps = eps?;

        let mut leaving = None;
        for &(e, fwd) in &self.cycle {
            if self.residual(e, fwd) != Some(eps) {
                continue;
            }
            leaving = match (rule, leaving) {
                (LeavingRule::FirstBlocking, Some(l)) => Some(l),
                (LeavingRule::SmallestIndex, Some((l, lfwd))) if l < e => Some((l, lfwd)),
                _ => Some((e, fwd)),
            };
        }
        let (e_out, out_fwd) = leaving?;

        if eps > F::zero() {
            for &(e, fwd) in &self.cycle {
                if fwd {
                    self.flow[e] += eps;
                } else {
                    self.flow[e] -= eps;
                }
            }
        }

        if e_out == e_in {
            // the entering edge moves to its other bound, the tree stays
            self.state[e_in] = match self.state[e_in] {
                EdgeState::Lower => EdgeState::Upper,
                _ => EdgeState::Lower,
            };
            return Some((e_out, eps));
        }

        self.state[e_out] = if out_fwd { EdgeState::Upper } else { EdgeState::Lower };
        self.state[e_in] = EdgeState::Tree;

        let y = if self.tree.parent_edge[self.src[e_out]] == e_out {
            self.src[e_out]
        } else {
            self.snk[e_out]
        };
        let (v, moved) = self.tree.exchange(e_in, self.src[e_in], self.snk[e_in], y);

        // shift the potentials of the moved subtree so that the
        // entering edge gets reduced cost 0
        let rc = self.reduced_cost[e_in];
        let delta = if self.src[e_in] == v { rc } else { -rc };
        for &x in &moved {
            self.potential[x] += delta;
        }
        self.update_reduced_costs(&moved);

        Some((e_out, eps))
    }

    /// Recompute the reduced costs of all edges incident to `vertices`.
    fn update_reduced_costs(&mut self, vertices: &[usize]) {
        for &x in vertices {
            let u = self.nodes[x];
            let graph = self.net.graph();
            for (e, _) in graph.outedges(u).chain(graph.inedges(u)) {
                let e = self.edge_index[e.index()];
                self.reduced_cost[e] = self.cost[e] + self.potential[self.snk[e]] - self.potential[self.src[e]];
            }
        }
    }

    /// The objective value of the extended problem.
    #[cfg(test)]
    fn objective(&self) -> F {
        (0..self.flow.len()).fold(F::zero(), |acc, e| acc + self.flow[e] * self.cost[e])
    }

    /// Write the flows back to the network and remove the root.
    ///
    /// Returns `false` if some artificial edge carries flow.
    fn cleanup(&mut self) -> bool {
        let m = self.num_original;
        for e in 0..m {
            self.net.set_flow(self.edges[e], self.flow[e]);
        }
        self.net.remove_vertex(self.nodes[ROOT]);
        self.flow[m..].iter().all(|f| f.is_zero())
    }

    fn into_basis(self) -> Basis<F> {
        let m = self.num_original;
        Basis {
            network: self.net.key(),
            revision: self.net.revision(),
            artificial_flow: self.flow[m..].to_vec(),
            state: self.state,
            tree: self.tree,
        }
    }
}

/// Solve a min-cost-flow problem with the default network simplex.
///
/// Returns the optimal value or `None` if the problem is infeasible
/// or unbounded. The flows are stored in `net`.
pub fn network_simplex<F>(net: &mut FlowNetwork<F>) -> Option<F>
where
    F: PrimInt + Signed + NumAssign + FromPrimitive + Display,
{
    let mut spx = NetworkSimplex::new();
    match spx.solve(net) {
        SolutionState::Optimal => Some(net.total_cost()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{Context, EdgeState, LeavingRule, NetworkSimplex, Pricing};
    use crate::mcf::SolutionState;
    use crate::network::FlowNetwork;

    /// Run the pivot loop step by step, checking the tree after every pivot.
    fn solve_checked(net: &mut FlowNetwork<i64>, pricing: Pricing, rule: LeavingRule) -> (bool, usize) {
        let mut ctx = Context::extend(net, 1000, i64::max_value());
        ctx.init_potentials();
        let mut obj = ctx.objective();
        let mut npivots = 0;
        while let Some(e_in) = ctx.find_entering_edge(pricing, 10) {
            let (_, eps) = ctx.pivot(e_in, rule).unwrap();
            npivots += 1;
            assert_eq!(ctx.tree.check(), Ok(()));
            for e in 0..ctx.state.len() {
                if ctx.state[e] == EdgeState::Tree {
                    assert_eq!(ctx.reduced_cost[e], 0);
                }
                assert_eq!(ctx.reduced_cost[e], ctx.compute_reduced_cost(e));
            }
            let tree_edges = ctx.state.iter().filter(|&&s| s == EdgeState::Tree).count();
            assert_eq!(tree_edges, ctx.tree.len() - 1);
            let new_obj = ctx.objective();
            if eps > 0 {
                assert!(new_obj < obj);
            } else {
                assert_eq!(new_obj, obj);
            }
            obj = new_obj;
            assert!(npivots < 10_000);
        }
        (ctx.cleanup(), npivots)
    }

    fn grid() -> FlowNetwork<i64> {
        // 3x3 grid with right and down edges, supply in the top left,
        // demand in the bottom right
        let mut net = FlowNetwork::new();
        let mut nodes = vec![];
        for i in 0..9 {
            let d = match i {
                0 => -12,
                8 => 12,
                _ => 0,
            };
            nodes.push(net.add_vertex(i + 1, d).unwrap());
        }
        for r in 0..3 {
            for c in 0..3 {
                let i = 3 * r + c;
                if c < 2 {
                    net.add_edge(nodes[i], nodes[i + 1], 0, 10, ((i * 7) % 5) as i64 + 1);
                }
                if r < 2 {
                    net.add_edge(nodes[i], nodes[i + 3], 0, 10, ((i * 3) % 4) as i64 + 1);
                }
            }
        }
        net
    }

    #[test]
    fn test_degenerate_first_pivot() {
        let mut net = FlowNetwork::<i64>::new();
        let u = net.add_vertex(1, -7).unwrap();
        let v = net.add_vertex(2, 7).unwrap();
        let a = net.add_edge(u, v, 5, 5, -1);
        let b = net.add_edge(u, v, 0, 10, 3);

        let mut ctx = Context::extend(&mut net, 4, i64::max_value());
        ctx.init_potentials();
        // vertex 1 has a surplus of 2, vertex 2 a deficit of 2
        assert_eq!(ctx.flow, vec![5, 0, 2, 2]);
        assert_eq!(ctx.src[2], 1);
        assert_eq!(ctx.snk[3], 2);
        assert_eq!(ctx.reduced_cost, vec![-9, -5, 0, 0]);

        let e_in = ctx.find_entering_edge(Pricing::Block, 10).unwrap();
        assert_eq!(e_in, 0);
        let tree = ctx.tree.clone();
        fn tree_edges(ctx: &Context<'_, i64>) -> Vec<usize> {
            (0..ctx.state.len()).filter(|&e| ctx.state[e] == EdgeState::Tree).collect()
        }
        let basic = tree_edges(&ctx);
        assert_eq!(basic, vec![2, 3]);
        assert_eq!(ctx.pivot(e_in, LeavingRule::LastBlocking), Some((0, 0)));
        // only the bound of the entering edge changes
        assert_eq!(ctx.state[0], EdgeState::Upper);
        assert_eq!(ctx.state[1], EdgeState::Lower);
        assert_eq!(tree_edges(&ctx), basic);
        assert_eq!(ctx.tree.parent, tree.parent);
        assert_eq!(ctx.tree.parent_edge, tree.parent_edge);
        assert_eq!(ctx.tree.depth, tree.depth);
        assert_eq!(ctx.tree.thread, tree.thread);
        assert_eq!(ctx.flow, vec![5, 0, 2, 2]);

        let e_in = ctx.find_entering_edge(Pricing::Block, 10).unwrap();
        assert_eq!(e_in, 1);
        assert_eq!(ctx.pivot(e_in, LeavingRule::LastBlocking), Some((3, 2)));
        assert_eq!(ctx.flow, vec![5, 2, 0, 0]);
        assert_eq!(ctx.tree.parent[2], 1);
        assert_eq!(ctx.reduced_cost[1], 0);
        assert_eq!(ctx.find_entering_edge(Pricing::Block, 10), None);
        assert!(ctx.cleanup());

        assert_eq!(net.flow(a), 5);
        assert_eq!(net.flow(b), 2);
        assert_eq!(net.total_cost(), 1);
        assert_eq!(net.num_vertices(), 2);
        assert_eq!(net.num_edges(), 2);
    }

    #[test]
    fn test_bounds() {
        let mut net = FlowNetwork::<i64>::new();
        let s = net.add_vertex(1, -4).unwrap();
        let m = net.add_vertex(2, 0).unwrap();
        let t = net.add_vertex(3, 4).unwrap();
        let direct = net.add_edge(s, t, 2, 10, 5);
        let first = net.add_edge(s, m, 0, 3, 1);
        let second = net.add_edge(m, t, 0, 10, 1);

        let (feasible, _) = solve_checked(&mut net, Pricing::Complete, LeavingRule::LastBlocking);
        assert!(feasible);
        assert_eq!(net.flow(direct), 2);
        assert_eq!(net.flow(first), 2);
        assert_eq!(net.flow(second), 2);
        assert_eq!(net.total_cost(), 14);
    }

    #[test]
    fn test_tree_invariants() {
        let rules = [
            (Pricing::Block, LeavingRule::LastBlocking),
            (Pricing::Complete, LeavingRule::LastBlocking),
            (Pricing::FirstEligible, LeavingRule::LastBlocking),
            (Pricing::Bland, LeavingRule::LastBlocking),
            (Pricing::Bland, LeavingRule::SmallestIndex),
        ];
        let mut spx = NetworkSimplex::new();
        let mut reference = grid();
        assert_eq!(spx.solve(&mut reference), SolutionState::Optimal);
        for &(pricing, rule) in &rules {
            let mut net = grid();
            let (feasible, npivots) = solve_checked(&mut net, pricing, rule);
            assert!(feasible);
            assert!(npivots > 0);
            assert_eq!(net.total_cost(), reference.total_cost());
        }
    }

    #[test]
    fn test_default_artificial_cost() {
        let mut net = FlowNetwork::<i64>::new();
        let u = net.add_vertex(1, 0).unwrap();
        let v = net.add_vertex(2, 0).unwrap();
        let w = net.add_vertex(3, 0).unwrap();
        net.add_edge(u, v, 0, 1, -3);
        net.add_edge(v, w, 0, 1, 2);
        // 1 + round(3 * 3 / 2)
        assert_eq!(super::default_artificial_cost(&net), 6);

        let mut net = FlowNetwork::<i64>::new();
        net.add_vertex(1, 0).unwrap();
        assert_eq!(super::default_artificial_cost(&net), 1);

        let mut net = FlowNetwork::<i32>::new();
        let u = net.add_vertex(1, 0).unwrap();
        let v = net.add_vertex(2, 0).unwrap();
        net.add_edge(u, v, 0, 1, i32::max_value());
        assert_eq!(super::default_artificial_cost(&net), i32::max_value() >> 2);
    }

    #[test]
    fn test_candidate_window() {
        assert_eq!(super::default_candidate_window(0), 10);
        assert_eq!(super::default_candidate_window(100), 10);
        assert_eq!(super::default_candidate_window(1600), 20);
    }

    #[test]
    fn test_warm_start() {
        let mut net = grid();
        let mut spx = NetworkSimplex::new();
        assert_eq!(spx.solve(&mut net), SolutionState::Optimal);
        assert!(spx.num_iterations() > 0);
        let value = net.total_cost();

        assert_eq!(spx.solve(&mut net), SolutionState::Optimal);
        assert_eq!(spx.num_iterations(), 0);
        assert_eq!(net.total_cost(), value);

        // a modification invalidates the basis
        let u = net.vertex(1).unwrap();
        net.set_demand(u, -12);
        assert_eq!(spx.solve(&mut net), SolutionState::Optimal);
        assert!(spx.num_iterations() > 0);
        assert_eq!(net.total_cost(), value);
    }
}
