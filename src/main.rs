//Matrisect
//Copyright (C) 2025 The Matrisect developers
//
//This program is free software: you can redistribute it and/or modify
//it under the terms of the GNU Affero General Public License as published by
//the Free Software Foundation, either version 3 of the License, or
//(at your option) any later version.
//
//This program is distributed in the hope that it will be useful,
//but WITHOUT ANY WARRANTY; without even the implied warranty of
//MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//GNU Affero General Public License for more details.
//
//You should have received a copy of the GNU Affero General Public License
//along with this program.  If not, see <http://www.gnu.org/licenses/>.

use clap::{Parser, Subcommand};
use serde::Serialize;

use matrisect::solvers::{Baseline, KuhnMatching, LocalSearch};
use matrisect::{validate_hamiltonian_path, validate_matching};
use matrisect::{Error, GraphGenerator, Problem, Solution};

#[derive(Debug, Parser)]
#[clap(name="matrisect", version, author, about)]
pub struct App {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Maximum matching in a random bipartite graph (two matroids)
    Bipartite {
        /// Number of vertices on each side
        n: usize,
        /// Probability of each edge
        p: f64,
        /// Seed of the instance generator
        #[clap(default_value_t = 42)]
        seed: u64,
        /// Time limit of the local search, in seconds
        #[clap(default_value_t = 10)]
        time_limit: u64,
    },
    /// 3-dimensional matching in a random tripartite hypergraph (three matroids)
    #[clap(name = "3dmatching")]
    ThreeDMatching {
        /// Number of vertices in each partition
        n: usize,
        /// Probability of each hyperedge
        p: f64,
        /// Seed of the instance generator
        #[clap(default_value_t = 42)]
        seed: u64,
        /// Time limit of the local search, in seconds
        #[clap(default_value_t = 10)]
        time_limit: u64,
    },
    /// Longest set of vertex-disjoint directed paths in a random digraph
    /// with a planted Hamiltonian path (three matroids)
    Hamiltonian {
        /// Number of vertices
        n: usize,
        /// Probability of each directed edge
        p: f64,
        /// Number of planted path edges
        #[clap(default_value_t = 0)]
        min_planted_path_len: usize,
        /// Seed of the instance generator
        #[clap(default_value_t = 42)]
        seed: u64,
        /// Time limit of the local search, in seconds
        #[clap(default_value_t = 10)]
        time_limit: u64,
    },
}

#[derive(Serialize)]
struct SolutionRecord<'a> {
    algorithm: &'a str,
    #[serde(rename = "approxRatio")]
    approx_ratio: f64,
    solution: Vec<usize>,
}

#[derive(Serialize)]
struct Output<'a> {
    problem_name: &'a str,
    graph: Vec<Vec<usize>>,
    solutions: Vec<SolutionRecord<'a>>,
}

impl<'a> SolutionRecord<'a> {
    fn new(algorithm: &'a str, solution: &Solution) -> Self {
        Self {
            algorithm,
            approx_ratio: solution.ratio(),
            solution: solution.selection().to_vec(),
        }
    }
}

fn print_output(output: &Output) -> Result<(), Error> {
    let json = serde_json::to_string(output)
        .map_err(|e| Error::InvalidOperation(format!("could not serialise the output: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn run_bipartite(n: usize, p: f64, seed: u64, time_limit: u64) -> Result<(), Error> {
    let mut generator = GraphGenerator::new(seed);
    let edge_pairs = generator.erdos_renyi_bipartite(n, p);
    eprintln!("Generated {} edges", edge_pairs.len());
    let edges: Vec<Vec<usize>> = edge_pairs.iter().map(|&(u, v)| vec![u, v]).collect();

    let mut problem = Problem::matching(2, n, &edges)?;
    let baseline = Baseline::new(&mut problem).run()?;
    problem.reset()?;
    let kuhn = KuhnMatching::new(n, &edges)?.run();
    problem.reset()?;
    let local_search = LocalSearch::<true>::new(&mut problem, time_limit).run()?;

    validate_matching(n, &edges, baseline.selection())?;
    validate_matching(n, &edges, kuhn.selection())?;
    for solution in local_search.iter() {
        validate_matching(n, &edges, solution.selection())?;
    }

    let mut solutions = vec![
        SolutionRecord::new("baseline", &baseline),
        SolutionRecord::new("kuhn", &kuhn),
    ];
    solutions.extend(local_search.iter().map(|s| SolutionRecord::new("localsearch", s)));
    print_output(&Output {
        problem_name: "BIPARTITE",
        graph: edges,
        solutions,
    })
}

fn run_3d_matching(n: usize, p: f64, seed: u64, time_limit: u64) -> Result<(), Error> {
    let mut generator = GraphGenerator::new(seed);
    let hyperedges = generator.tripartite(n, p);
    eprintln!("Generated {} hyperedges", hyperedges.len());
    let edges: Vec<Vec<usize>> = hyperedges.iter().map(|edge| edge.to_vec()).collect();

    let mut problem = Problem::matching(3, n, &edges)?;
    let baseline = Baseline::new(&mut problem).run()?;
    problem.reset()?;
    let local_search = LocalSearch::<true>::new(&mut problem, time_limit).run()?;

    validate_matching(n, &edges, baseline.selection())?;
    for solution in local_search.iter() {
        validate_matching(n, &edges, solution.selection())?;
    }

    let mut solutions = vec![SolutionRecord::new("baseline", &baseline)];
    solutions.extend(local_search.iter().map(|s| SolutionRecord::new("localsearch", s)));
    print_output(&Output {
        problem_name: "3DMATCHING",
        graph: edges,
        solutions,
    })
}

fn run_hamiltonian(
    n: usize,
    p: f64,
    min_planted_path_len: usize,
    seed: u64,
    time_limit: u64,
) -> Result<(), Error> {
    let mut generator = GraphGenerator::new(seed);
    let edges = generator.directed_with_planted_path(n, p, min_planted_path_len);
    eprintln!("Generated {} edges", edges.len());

    let mut problem = Problem::hamiltonian(n, &edges)?;
    let baseline = Baseline::new(&mut problem).run()?;
    problem.reset()?;
    let local_search = LocalSearch::<true>::new(&mut problem, time_limit).run()?;

    validate_hamiltonian_path(n, &edges, baseline.selection())?;
    for solution in local_search.iter() {
        validate_hamiltonian_path(n, &edges, solution.selection())?;
    }

    let mut solutions = vec![SolutionRecord::new("baseline", &baseline)];
    solutions.extend(local_search.iter().map(|s| SolutionRecord::new("localsearch", s)));
    print_output(&Output {
        problem_name: "HAMILTONIAN",
        graph: edges.iter().map(|&(a, b)| vec![a, b]).collect(),
        solutions,
    })
}

fn run(app: App) -> Result<(), Error> {
    match app.command {
        Command::Bipartite { n, p, seed, time_limit } => {
            run_bipartite(n, p, seed, time_limit)
        },
        Command::ThreeDMatching { n, p, seed, time_limit } => {
            run_3d_matching(n, p, seed, time_limit)
        },
        Command::Hamiltonian { n, p, min_planted_path_len, seed, time_limit } => {
            run_hamiltonian(n, p, min_planted_path_len, seed, time_limit)
        },
    }
}

fn main() {
    let app = App::parse();
    if let Err(e) = run(app) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
