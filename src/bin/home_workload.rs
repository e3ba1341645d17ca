//! 家庭网络流量计划生成
//!
//! 生成 AP + 无线客户端 + 有线服务器的流量计划，可选写出 JSON 交给外部引擎执行。

use clap::Parser;
use homenet_workload::profile::ProfileKind;
use homenet_workload::scenario::{
    DEFAULT_PORT_BASE, DEFAULT_SEED, ScenarioConfig, Variant, build_scenario, execute,
};
use homenet_workload::sim::PlanFileEngine;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "home-workload",
    about = "Build a reproducible traffic plan for a home network (AP, wifi clients, wired servers)"
)]
struct Args {
    /// Scenario preset: basic, multi-server, capture, variable (or 1-4)
    #[arg(long, default_value = "variable")]
    variant: Variant,

    /// Number of wireless clients (defaults per variant)
    #[arg(long)]
    n_clients: Option<usize>,

    /// Number of wired servers
    #[arg(long)]
    n_servers: Option<usize>,

    /// Simulation duration in seconds (defaults per variant)
    #[arg(long)]
    simulation_time: Option<f64>,

    /// Draw packet size / rate from the profile ranges
    #[arg(long, conflicts_with = "no_variability")]
    variability: bool,

    /// Use nominal profile parameters even for the variable preset
    #[arg(long)]
    no_variability: bool,

    /// Print one line per client with its profile and destination
    #[arg(long)]
    verbose: bool,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// First sink port; server k listens on port_base + k
    #[arg(long, default_value_t = DEFAULT_PORT_BASE)]
    port_base: u16,

    /// Write the plan as JSON for the execution engine
    #[arg(long)]
    plan_json: Option<PathBuf>,
}

fn config_from_args(args: &Args) -> ScenarioConfig {
    let mut cfg = ScenarioConfig::for_variant(args.variant);
    if let Some(n) = args.n_clients {
        cfg.n_clients = n;
    }
    if let Some(n) = args.n_servers {
        cfg.n_servers = n;
    }
    if let Some(secs) = args.simulation_time {
        cfg.duration_secs = secs;
    }
    if args.variability {
        cfg.variability = true;
    } else if args.no_variability {
        cfg.variability = false;
    }
    cfg.verbose = args.verbose;
    cfg.seed = args.seed;
    cfg.port_base = args.port_base;
    cfg
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let cfg = config_from_args(&args);

    let plan = match build_scenario(&cfg) {
        Ok(plan) => plan,
        Err(e) => {
            error!(error = %e, "scenario rejected");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cfg.verbose {
        for line in plan.assignment_lines() {
            println!("{line}");
        }
    }

    println!(
        "plan variant={} clients={} servers={} sinks={} duration_s={} seed={} variability={}",
        cfg.variant,
        plan.clients.len(),
        plan.topology.servers.len(),
        plan.sinks.len(),
        cfg.duration_secs,
        cfg.seed,
        cfg.variability
    );
    let hist = plan.profile_histogram();
    let parts = ProfileKind::ALL
        .iter()
        .map(|k| {
            format!(
                "{}={}",
                k.name().to_ascii_lowercase(),
                hist.get(k).copied().unwrap_or(0)
            )
        })
        .collect::<Vec<_>>();
    println!("profile_histogram {}", parts.join(" "));
    println!("offered_load_bps={:.0}", plan.expected_load_bps());

    if let Some(path) = &args.plan_json {
        let mut engine = PlanFileEngine::new(path);
        if let Err(e) = execute(&plan, &mut engine) {
            error!(error = %e, path = %path.display(), "failed to hand plan to engine");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
