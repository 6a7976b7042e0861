use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use quantyf_optimizer::report::roi::{RoiInput, RoiReport};

#[derive(Args)]
pub struct RoiArgs {
    /// JSON file with the ROI inputs, replaces the flags below
    #[arg(short = 'i', long, conflicts_with_all = ["baseline", "optimized", "implementation"])]
    input: Option<PathBuf>,

    /// Monthly cost of the current network
    #[arg(long, required_unless_present = "input")]
    baseline: Option<f64>,

    /// Monthly cost of the optimized network
    #[arg(long, required_unless_present = "input")]
    optimized: Option<f64>,

    /// One-time implementation cost
    #[arg(long, default_value_t = 0.0)]
    implementation: f64,

    #[arg(long, default_value_t = 12)]
    horizon_months: u32,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl RoiArgs {
    fn roi_input(&self) -> anyhow::Result<RoiInput> {
        if let Some(input) = &self.input {
            let f = File::open(input)?;
            return Ok(serde_json::from_reader(BufReader::new(f))?);
        }

        match (self.baseline, self.optimized) {
            (Some(baseline_monthly_cost), Some(optimized_monthly_cost)) => Ok(RoiInput {
                baseline_monthly_cost,
                optimized_monthly_cost,
                implementation_cost: self.implementation,
                horizon_months: self.horizon_months,
            }),
            _ => anyhow::bail!("--baseline and --optimized are required without --input"),
        }
    }
}

fn format_value(value: f64) -> String {
    if value.is_infinite() {
        String::from("never")
    } else {
        format!("{value:.2}")
    }
}

fn report_table(input: &RoiInput, report: &RoiReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["", "Value"]);
    table.add_row(vec![
        String::from("Monthly savings"),
        format_value(report.monthly_savings),
    ]);
    table.add_row(vec![
        String::from("Annual savings"),
        format_value(report.annual_savings),
    ]);
    table.add_row(vec![
        String::from("Payback (months)"),
        format_value(report.payback_months),
    ]);
    table.add_row(vec![
        format!("ROI over {} months (%)", input.horizon_months),
        if report.roi_percent.is_infinite() {
            String::from("unbounded")
        } else {
            format!("{:.2}", report.roi_percent)
        },
    ]);
    table
}

pub fn run(args: RoiArgs) -> anyhow::Result<()> {
    let input = args.roi_input()?;
    let report = input.compute()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report_table(&input, &report));
    }

    Ok(())
}
