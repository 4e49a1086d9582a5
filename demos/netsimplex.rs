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

//! Solve a DIMACS min-cost-flow instance and write the solution.
//!
//! Log output is controlled by `RUST_LOG`, e.g. `RUST_LOG=trace`
//! prints every pivot.

use rs_netsimplex::dimacs;
use rs_netsimplex::mcf::{LeavingRule, NetworkSimplex, Pricing, SolutionState};
use rs_netsimplex::FlowNetwork;

use std::error::Error;
use std::io::Write;
use std::result::Result;

use rustop::opts;
use time::OffsetDateTime;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve a min-cost-flow problem with a primal network simplex algorithm.";
        param file:String, desc:"Instance file name";
        param output:Option<String>, desc:"Solution file name (default: <file>.sol)";
        opt dantzig:bool, desc:"Dantzig's rule pricing (most violating edge)";
        opt first_eligible:bool, desc:"First eligible edge pricing";
        opt bland:bool, desc:"Bland's rule for entering and leaving edges";
        opt window:Option<usize>, desc:"Number of candidates for block pricing";
    }
    .parse_or_exit();

    let tstart = OffsetDateTime::now_utc();
    let mut net: FlowNetwork<i64> = dimacs::min::read_from_file(&args.file)?;
    let tend = OffsetDateTime::now_utc();

    println!("Instance            : {}", args.file);
    println!("Read Time (seconds) : {}", (tend - tstart).as_seconds_f64());
    println!("Number of vertices  : {}", net.num_vertices());
    println!("Number of edges     : {}", net.num_edges());

    let mut spx = NetworkSimplex::new();
    spx.candidate_window = args.window;
    if args.dantzig {
        spx.pricing = Pricing::Complete;
    } else if args.first_eligible {
        spx.pricing = Pricing::FirstEligible;
    } else if args.bland {
        spx.pricing = Pricing::Bland;
        spx.leaving = LeavingRule::SmallestIndex;
    }

    let tstart = OffsetDateTime::now_utc();
    let state = spx.solve(&mut net);
    let tend = OffsetDateTime::now_utc();
    let soltime = (tend - tstart).as_seconds_f64();

    println!();
    println!("Solution state      : {}", state);
    println!("Time (seconds)      : {:.2}", soltime);
    println!("Iterations (total)  : {}", spx.num_iterations());

    if state != SolutionState::Optimal {
        return Err(format!("no optimal solution: problem is {}", state).into());
    }

    let solfile = args.output.clone().unwrap_or_else(|| format!("{}.sol", args.file));
    println!("Value               : {}", net.total_cost());
    println!();
    println!("Write solution to   : {}", solfile);

    let f = &mut std::fs::File::create(&solfile)?;
    dimacs::min::write_solution(&mut *f, &net)?;
    f.flush()?;

    Ok(())
}
