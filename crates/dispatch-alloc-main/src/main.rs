// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use dispatch_alloc_core::{
    space::{Location, TravelSpeed},
    time::{TimeDelta, TimePoint},
};
use dispatch_alloc_model::{
    generator::{InstanceGenConfig, InstanceGenerator},
    prelude::*,
};
use dispatch_alloc_solver::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::{error::Error, fs::File, io::BufWriter, time::Duration};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

const REPORT_PATH: &str = "dispatch_report.json";

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct RoundReport {
    label: String,
    now_minutes: f64,
    termination: String,
    squared_delay_minutes: f64,
    travel_minutes: f64,
    iterations: u64,
    elapsed_ms: u128,
    moves: Vec<JobMove>,
    schedule: Schedule,
}

impl RoundReport {
    fn new(label: &str, now: TimePoint<i64>, outcome: &ExploreOutcome, schedule: Schedule) -> Self {
        Self {
            label: label.to_string(),
            now_minutes: now.as_minutes_f64(),
            termination: outcome.termination().to_string(),
            squared_delay_minutes: outcome.cost().squared_delay_minutes(),
            travel_minutes: outcome.cost().travel_minutes(),
            iterations: outcome.statistics().iterations,
            elapsed_ms: outcome.statistics().elapsed.as_millis(),
            moves: outcome.moves().to_vec(),
            schedule,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct DispatchReport {
    description: String,
    rounds: Vec<RoundReport>,
}

/// Nine half-hour jobs at two sites, five operators driving 250 m/min.
fn two_site_problem() -> Result<Problem, Box<dyn Error>> {
    let l1 = Location::new(0.0, 0.0);
    let l2 = Location::new(1000.0, 1000.0);
    let mut builder = ProblemBuilder::new(5, TravelSpeed::new(250.0)?);

    let first_batch = [l1, l1, l1, l2, l2];
    let second_batch = [l1, l1, l2, l2];
    let mut next_id = 0u64;
    for (batch, start) in [(&first_batch[..], 0), (&second_batch[..], 30)] {
        for &location in batch {
            builder.add(
                JobId::new(next_id),
                TimePoint::from_minutes(start),
                TimePoint::from_minutes(start + 30),
                location,
            )?;
            next_id += 1;
        }
    }
    Ok(builder.build()?)
}

fn print_round(explorer: &Explorer, problem: &Problem, outcome: &ExploreOutcome) {
    println!("{}", explorer.schedule(problem));
    println!("{}", outcome);
    print!("{}", outcome.statistics());
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut rounds = Vec::new();

    // Replanning scenario: plan at t = 0, then job 3 overruns by 25 minutes
    // and the remaining work is replanned at t = 25 min.
    let mut problem = two_site_problem()?;
    let mut explorer = Explorer::new(&problem, ExplorerConfig::default())?;

    let now = TimePoint::zero();
    let first = explorer.explore_with_monitor(&problem, now, &mut rng, &mut TracingMonitor::default())?;
    print_round(&explorer, &problem, &first);
    rounds.push(RoundReport::new("initial", now, &first, explorer.schedule(&problem)));
    println!("{}", "=".repeat(30));

    let overrun = JobId::new(3);
    problem.extend_job_end(overrun, TimeDelta::from_minutes(25))?;
    info!(job = %overrun, "Extended job end by 25 minutes");

    let now = TimePoint::from_minutes(25);
    let second = explorer.explore_with_monitor(&problem, now, &mut rng, &mut TracingMonitor::default())?;
    print_round(&explorer, &problem, &second);
    println!("{}", "-".repeat(30));
    for m in second.moves() {
        println!("{}", m);
    }
    println!("{}", "-".repeat(30));
    rounds.push(RoundReport::new("replanned", now, &second, explorer.schedule(&problem)));

    // A larger random instance under a time budget.
    let config = InstanceGenConfig::builder()
        .job_count(60)
        .operator_count(6)
        .seed(7)
        .build()?;
    info!(%config, "Generating instance");
    let generated = InstanceGenerator::new(config)?.generate()?;
    let mut explorer = Explorer::new(
        &generated,
        ExplorerConfig::default()
            .with_time_limit(Duration::from_secs(10))
            .with_parallel_evaluation(true),
    )?;
    let start_cost = explorer.cost();
    let now = TimePoint::zero();
    let outcome = explorer.explore_with_monitor(&generated, now, &mut rng, &mut TracingMonitor::default())?;
    println!("Generated instance: {} -> {}", start_cost, outcome.cost());
    print!("{}", outcome.statistics());
    rounds.push(RoundReport::new("generated", now, &outcome, explorer.schedule(&generated)));

    let report = DispatchReport {
        description: "Two-round replanning of the two-site scenario followed by a generated 60-job instance.".into(),
        rounds,
    };
    let file = File::create(REPORT_PATH)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report)?;

    println!();
    println!("Wrote: {}", REPORT_PATH);
    Ok(())
}
