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

//! This module implements a read function for the DIMACS min cost
//! flow format. A DIMACS file must look as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `c` is a comment line and is ignored
//! 3. the problem line `p min <n> <m>` must appear exactly once and
//!    before any node or arc line, where `<n>` is the number of
//!    vertices and `<m>` the number of arcs. The vertices get the ids
//!    `1..=n` and demand 0.
//! 4. node lines of the form `n <id> <demand>` set the demand of a
//!    vertex. The demand is the required net inflow, i.e. supply
//!    vertices have negative demand.
//! 5. there must be exactly `m` arc lines `a <tail> <head> <lower>
//!    <capacity> <cost>`.
//!
//! Lines with any other descriptor are ignored. Loops and parallel
//! arcs are allowed.
//!
//! A solution file consists of the total cost on the first line
//! followed by one line `<tail> <head> <flow>` for each arc.

use super::{Error, LineReader, Result};
use crate::graph::Node;
use crate::network::FlowNetwork;

use num_traits::{Num, Zero};

use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

/// Read a min-cost-flow instance.
pub fn read<R, F>(r: R) -> Result<FlowNetwork<F>>
where
    R: Read,
    F: FromStr + Zero + Copy,
    F::Err: Display,
{
    let mut reader = LineReader::new(r);
    let mut net: Option<FlowNetwork<F>> = None;
    let mut nodes: Vec<Node> = vec![];
    let mut nedges = 0;
    let mut narcs = 0;

    while let Some(mut fields) = reader.next_line()? {
        let line = fields.line;
        match fields.field()? {
            "p" => {
                if net.is_some() {
                    return Err(Error::Format {
                        line,
                        msg: "duplicate problem line".to_string(),
                    });
                }
                fields.keyword("min")?;
                let n: usize = fields.number()?;
                let m: usize = fields.number()?;
                fields.finish()?;

                let mut g = FlowNetwork::with_capacities(n, m);
                for id in 1..=n {
                    let u = g.add_vertex(id, F::zero()).map_err(|e| Error::Data {
                        line,
                        msg: e.to_string(),
                    })?;
                    nodes.push(u);
                }
                net = Some(g);
                nedges = m;
            }
            "n" => {
                let g = net.as_mut().ok_or_else(|| Error::Format {
                    line,
                    msg: "node line before problem line".to_string(),
                })?;
                let id: usize = fields.number()?;
                let demand: F = fields.number()?;
                fields.finish()?;
                let u = node(&nodes, id, line)?;
                g.set_demand(u, demand);
            }
            "a" => {
                let g = net.as_mut().ok_or_else(|| Error::Format {
                    line,
                    msg: "arc line before problem line".to_string(),
                })?;
                let tail: usize = fields.number()?;
                let head: usize = fields.number()?;
                let lower: F = fields.number()?;
                let upper: F = fields.number()?;
                let cost: F = fields.number()?;
                fields.finish()?;

                let u = node(&nodes, tail, line)?;
                let v = node(&nodes, head, line)?;
                if narcs == nedges {
                    return Err(Error::Data {
                        line,
                        msg: format!("unexpected 'a' line (expected exactly {} arcs)", nedges),
                    });
                }
                g.add_edge(u, v, lower, upper, cost);
                narcs += 1;
            }
            _ => (),
        }
    }

    let net = net.ok_or_else(|| Error::Format {
        line: reader.line_number(),
        msg: "missing problem line".to_string(),
    })?;
    if narcs != nedges {
        return Err(Error::Data {
            line: reader.line_number(),
            msg: format!("expected {} arcs, found {}", nedges, narcs),
        });
    }

    Ok(net)
}

fn node(nodes: &[Node], id: usize, line: usize) -> Result<Node> {
    if id < 1 || id > nodes.len() {
        return Err(Error::Data {
            line,
            msg: format!("invalid node id {} (must be in 1..{})", id, nodes.len()),
        });
    }
    Ok(nodes[id - 1])
}

pub fn read_from_file<F>(filename: &str) -> Result<FlowNetwork<F>>
where
    F: FromStr + Zero + Copy,
    F::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write a min-cost-flow instance.
///
/// Vertices are written by their id, so the output can be read back
/// only if the ids are `1..=n`.
pub fn write<W, F>(mut w: W, net: &FlowNetwork<F>) -> std::io::Result<()>
where
    W: Write,
    F: Zero + Copy + Display,
{
    writeln!(w, "p min {} {}", net.num_vertices(), net.num_edges())?;
    let mut vertices: Vec<_> = net.vertices().map(|u| (net.id(u), u)).collect();
    vertices.sort_unstable();
    for (id, u) in vertices {
        let d = net.demand(u);
        if !d.is_zero() {
            writeln!(w, "n {} {}", id, d)?;
        }
    }
    for e in net.edges() {
        writeln!(
            w,
            "a {} {} {} {} {}",
            net.id(net.src(e)),
            net.id(net.snk(e)),
            net.lower(e),
            net.upper(e),
            net.cost(e)
        )?;
    }

    Ok(())
}

/// Write a min-cost-flow instance to a named file.
pub fn write_to_file<F>(filename: &str, net: &FlowNetwork<F>) -> std::io::Result<()>
where
    F: Zero + Copy + Display,
{
    write(&mut std::fs::File::create(filename)?, net)
}

/// Write the current flow of a network.
pub fn write_solution<W, F>(mut w: W, net: &FlowNetwork<F>) -> std::io::Result<()>
where
    W: Write,
    F: Num + Copy + Display,
{
    writeln!(w, "{}", net.total_cost())?;
    let g = net.graph();
    for e in net.edges() {
        writeln!(w, "{} {} {}", g.name(g.src(e)), g.name(g.snk(e)), net.flow(e))?;
    }

    Ok(())
}

/// Write the current flow of a network to a named file.
pub fn write_solution_to_file<F>(filename: &str, net: &FlowNetwork<F>) -> std::io::Result<()>
where
    F: Num + Copy + Display,
{
    write_solution(&mut std::fs::File::create(filename)?, net)
}

/// Read a solution of a min-cost-flow problem.
///
/// Returns the solution value and the list of `(tail, head, flow)`
/// triples.
pub fn read_solution<R, F>(r: R) -> Result<(F, Vec<(usize, usize, F)>)>
where
    R: Read,
    F: FromStr,
    F::Err: Display,
{
    let mut reader = LineReader::new(r);

    let mut fields = reader.next_line()?.ok_or_else(|| Error::Format {
        line: 0,
        msg: "missing solution value".to_string(),
    })?;
    let value = fields.number()?;
    fields.finish()?;

    let mut flows = vec![];
    while let Some(mut fields) = reader.next_line()? {
        flows.push((fields.number()?, fields.number()?, fields.number()?));
        fields.finish()?;
    }

    Ok((value, flows))
}

/// Read a solution of a min-cost-flow problem from a named file.
pub fn read_solution_from_file<F>(filename: &str) -> Result<(F, Vec<(usize, usize, F)>)>
where
    F: FromStr,
    F::Err: Display,
{
    read_solution(std::fs::File::open(filename)?)
}

#[cfg(test)]
mod tests {
    use crate::dimacs::{self, Error};
    use crate::network::FlowNetwork;
    use std::io::Cursor;

    #[test]
    fn parse_file_test() {
        let file = "c this is a test file

p min 8 11
n 1 -10
n 2 -20
n 4 5
n 7 15
n 8 10

c there might be empty lines

a 1 4 0 15 2
a 2 1 0 10 1
a 2 3 0 10 0
a 2 6 0 10 6
a 3 4 0 5 1
a 3 5 0 10 4
a 4 7 0 10 5
a 5 6 0 20 2
a 5 7 0 15 7
a 6 8 0 10 8
a 7 8 3 15 9
x unknown lines are skipped

c end of the file
";
        let net = dimacs::min::read::<_, i64>(Cursor::new(file)).unwrap();

        assert_eq!(net.num_vertices(), 8);
        assert_eq!(net.num_edges(), 11);

        let demands: Vec<_> = (1..=8).map(|id| net.demand(net.vertex(id).unwrap())).collect();
        assert_eq!(demands, vec![-10, -20, 0, 5, 0, 0, 15, 10]);

        let edges: Vec<_> = net.edges().collect();
        assert_eq!(
            edges.iter().map(|&e| net.upper(e)).collect::<Vec<_>>(),
            vec![15, 10, 10, 10, 5, 10, 10, 20, 15, 10, 15]
        );
        assert_eq!(
            edges.iter().map(|&e| net.cost(e)).collect::<Vec<_>>(),
            vec![2, 1, 0, 6, 1, 4, 5, 2, 7, 8, 9]
        );
        assert_eq!(net.lower(edges[10]), 3);
        assert_eq!(net.flow(edges[10]), 3);

        let ends = edges
            .iter()
            .map(|&e| (net.id(net.src(e)), net.id(net.snk(e))))
            .collect::<Vec<_>>();
        assert_eq!(
            ends,
            vec![
                (1, 4),
                (2, 1),
                (2, 3),
                (2, 6),
                (3, 4),
                (3, 5),
                (4, 7),
                (5, 6),
                (5, 7),
                (6, 8),
                (7, 8),
            ]
        );
    }

    fn read_err(file: &str) -> Error {
        match dimacs::min::read::<_, i64>(Cursor::new(file)) {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        }
    }

    #[test]
    fn parse_errors() {
        match read_err("n 1 5\np min 1 0\n") {
            Error::Format { line, .. } => assert_eq!(line, 1),
            e => panic!("unexpected error {}", e),
        }
        match read_err("c x\na 1 2 0 1 1\n") {
            Error::Format { line, .. } => assert_eq!(line, 2),
            e => panic!("unexpected error {}", e),
        }
        match read_err("p min 2 0\np min 2 0\n") {
            Error::Format { line, msg } => {
                assert_eq!(line, 2);
                assert!(msg.contains("duplicate"));
            }
            e => panic!("unexpected error {}", e),
        }
        assert!(matches!(read_err("p max 2 0\n"), Error::Format { .. }));
        assert!(matches!(read_err("p min 2\n"), Error::Format { .. }));
        assert!(matches!(read_err("p min 2 1\na 1 2 0 x 1\n"), Error::Format { .. }));
        assert!(matches!(read_err("p min 2 1\na 1 2 0 1 1 7\n"), Error::Format { .. }));
        assert!(matches!(read_err("c only comments\n"), Error::Format { .. }));

        match read_err("p min 2 1\nn 3 1\n") {
            Error::Data { line, .. } => assert_eq!(line, 2),
            e => panic!("unexpected error {}", e),
        }
        assert!(matches!(read_err("p min 2 1\na 0 2 0 1 1\n"), Error::Data { .. }));
        assert!(matches!(read_err("p min 2 2\na 1 2 0 1 1\n"), Error::Data { .. }));
        match read_err("p min 2 1\na 1 2 0 1 1\na 2 1 0 1 1\n") {
            Error::Data { line, .. } => assert_eq!(line, 3),
            e => panic!("unexpected error {}", e),
        }
    }

    #[test]
    fn loops_and_parallel_arcs() {
        let net = dimacs::min::read::<_, i64>(Cursor::new("p min 2 3\na 1 1 0 4 1\na 1 2 0 1 1\na 1 2 0 1 2\n")).unwrap();
        assert_eq!(net.num_edges(), 3);
        let e = net.edges().next().unwrap();
        assert_eq!(net.src(e), net.snk(e));
    }

    #[test]
    fn write_test_file() {
        let mut net = FlowNetwork::<i64>::new();
        let nodes: Vec<_> = [-4, 0, 0, 4]
            .iter()
            .enumerate()
            .map(|(i, &d)| net.add_vertex(i + 1, d).unwrap())
            .collect();
        net.add_edge(nodes[0], nodes[1], 0, 4, 2);
        net.add_edge(nodes[0], nodes[2], 0, 2, 2);
        net.add_edge(nodes[1], nodes[2], 0, 2, 1);
        net.add_edge(nodes[1], nodes[3], 1, 3, 3);
        net.add_edge(nodes[2], nodes[3], 0, 5, 1);

        let mut buf = Cursor::new(Vec::new());
        dimacs::min::write(&mut buf, &net).unwrap();
        let txt = String::from_utf8(buf.into_inner()).unwrap();

        assert_eq!(
            txt,
            "p min 4 5
n 1 -4
n 4 4
a 1 2 0 4 2
a 1 3 0 2 2
a 2 3 0 2 1
a 2 4 1 3 3
a 3 4 0 5 1
"
        );

        // reading it back gives the same instance
        let other = dimacs::min::read::<_, i64>(Cursor::new(txt.as_str())).unwrap();
        let mut buf = Cursor::new(Vec::new());
        dimacs::min::write(&mut buf, &other).unwrap();
        assert_eq!(String::from_utf8(buf.into_inner()).unwrap(), txt);
    }

    #[test]
    fn write_solution_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut net = FlowNetwork::<i64>::new();
        let nodes: Vec<_> = (1..=4).map(|id| net.add_vertex(id, 0).unwrap()).collect();
        let flow = [2, 2, 2, 0, 4];
        let edges = [
            net.add_edge(nodes[0], nodes[1], 0, 4, 2),
            net.add_edge(nodes[0], nodes[2], 0, 2, 2),
            net.add_edge(nodes[1], nodes[2], 0, 2, 1),
            net.add_edge(nodes[1], nodes[3], 0, 3, 3),
            net.add_edge(nodes[2], nodes[3], 0, 5, 1),
        ];
        for (&e, &f) in edges.iter().zip(flow.iter()) {
            net.set_flow(e, f);
        }

        let mut buf = Cursor::new(Vec::new());
        dimacs::min::write_solution(&mut buf, &net)?;

        let soltxt = String::from_utf8(buf.into_inner())?;
        assert_eq!(
            soltxt,
            "14
1 2 2
1 3 2
2 3 2
2 4 0
3 4 4
"
        );

        let (value, flows) = dimacs::min::read_solution::<_, i64>(Cursor::new(soltxt))?;
        assert_eq!(value, 14);
        assert_eq!(flows, vec![(1, 2, 2), (1, 3, 2), (2, 3, 2), (2, 4, 0), (3, 4, 4)]);

        Ok(())
    }
}
