use std::env;
use std::fs;

use hashbench::registry::CASES;
use hashbench::{Runner, RunnerConfig};
use tracing_subscriber::EnvFilter;

// Usage: suite [config.json]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match env::args().nth(1) {
        Some(path) => {
            let raw = fs::read_to_string(&path).unwrap();
            RunnerConfig::from_json(&raw).unwrap()
        }
        None => RunnerConfig::default(),
    };

    let report = match Runner::new(config).run_suite(CASES) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("run aborted: {}", err);
            std::process::exit(1);
        }
    };

    for m in &report.measurements {
        println!(
            "{:<28} {:>12} iters {:>10.2} ns/op {:>10.2} MB/s",
            m.name,
            m.iterations,
            m.ns_per_iter(),
            m.throughput() / 1e6
        );
    }
    println!("{}", report.to_json().unwrap());

    if !report.passed() {
        std::process::exit(1);
    }
}
