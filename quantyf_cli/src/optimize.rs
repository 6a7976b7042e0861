use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use quantyf_optimizer::{
    json::types::{FromProblem, JsonSolution, JsonTransportProblem},
    solver::{
        network_optimizer::NetworkOptimizer,
        optimizer_params::Threads,
        solution::UnservedReason,
        termination::Termination,
    },
};
use tracing::{info, warn};

use crate::parsers;

#[derive(Args)]
pub struct OptimizeArgs {
    /// The network file to optimize
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Replaces the timeout of the input file (e.g., "30s", "5m", "PT1H30M")
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<jiff::SignedDuration>,

    /// Threads used to build the route candidates, all cores when omitted
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long)]
    max_hops: Option<usize>,

    /// Budget ceiling for the total cost
    #[arg(long)]
    budget: Option<f64>,

    /// Solution file, printed to stdout when omitted
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

fn reason_label(reason: &UnservedReason) -> String {
    match reason {
        UnservedReason::NoRouteExists => String::from("no route exists"),
        UnservedReason::AllRoutesExceedConstraints { violations } => {
            format!("{} constraint violations", violations.len())
        }
        UnservedReason::AllRoutesHubCapacityExhausted { hubs } => {
            format!("hub capacity exhausted ({})", hubs.join(", "))
        }
        UnservedReason::OptimizerTimeout => String::from("timeout"),
        UnservedReason::NotSelected => String::from("not selected"),
    }
}

fn summary_table(solution: &JsonSolution) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Demand",
        "Pallets",
        "Route",
        "Vehicles",
        "Handling",
        "Total cost",
    ]);

    for served in &solution.served {
        table.add_row(vec![
            served.demand_id.clone(),
            served.pallets.to_string(),
            served.route.join(" -> "),
            served.vehicle_count.to_string(),
            format!("{:.2}", served.handling_cost),
            format!("{:.2}", served.total_cost),
        ]);
    }

    for unserved in &solution.unserved {
        table.add_row(vec![
            unserved.demand_id.clone(),
            String::new(),
            reason_label(&unserved.reason),
            String::new(),
            String::new(),
            String::new(),
        ]);
    }

    table
}

pub fn run(args: OptimizeArgs) -> anyhow::Result<()> {
    let f = File::open(&args.input)?;
    let content: JsonTransportProblem = serde_json::from_reader(BufReader::new(f))?;

    let mut params = content.optimizer_params();
    if let Some(timeout) = args.timeout {
        params
            .terminations
            .retain(|termination| !matches!(termination, Termination::Duration(_)));
        params.terminations.push(Termination::Duration(timeout));
    }
    if let Some(threads) = args.threads {
        params.threads = Threads::Multi(threads);
    }
    if let Some(max_hops) = args.max_hops {
        params.max_hops = max_hops;
    }
    if args.budget.is_some() {
        params.budget_ceiling = args.budget;
    }

    let problem = content.build_problem()?;
    let optimizer = NetworkOptimizer::new(&problem, params)?;
    let solution = optimizer.optimize()?;
    let json_solution = JsonSolution::from_problem(&solution, &problem);

    eprintln!("{}", summary_table(&json_solution));
    info!(
        "Finished: served = {}, unserved = {}, total cost = {:.2}, rejected records = {}",
        json_solution.served.len(),
        json_solution.unserved.len(),
        json_solution.budget.total_cost,
        json_solution.rejected_records.len(),
    );

    if json_solution.budget.exceeded {
        warn!("Budget exceeded by {:.2}", json_solution.budget.overage);
    }

    let output = serde_json::to_string_pretty(&json_solution)?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, output)?;
        }
        None => println!("{output}"),
    }

    Ok(())
}
