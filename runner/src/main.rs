use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use scheduler::{
    simulate, DpsaConfig, ExecutionInterval, Policy, ProcessRegistry, RunStatistics,
    SimulationConfig, TraceSink,
};

mod input;
use input::parse_workload;

/// Replays a process workload under a CPU scheduling policy and prints the trace
/// as `order/pid/start/stop/priority` lines.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Workload file; stdin when omitted
    input: Option<PathBuf>,

    /// Policy name (fcfs, sjf, srtf, rr, dpsa) or selector (1-5); overrides the input
    #[arg(short, long)]
    policy: Option<Policy>,

    /// The input starts directly with process records, without a selector line
    #[arg(long)]
    no_selector: bool,

    /// Run every policy on the same workload, one after the other
    #[arg(long, conflicts_with = "policy")]
    all: bool,

    /// Print turnaround, waiting and response figures after each trace
    #[arg(long)]
    stats: bool,

    /// Priority penalty applied by DPSA to the process that just ran
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(i32).range(0..))]
    dpsa_penalty: i32,

    /// Priority reward applied by DPSA to every waiting ready process
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i32).range(0..))]
    dpsa_aging: i32,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            dpsa: DpsaConfig {
                penalty: self.dpsa_penalty,
                aging: self.dpsa_aging,
                ..DpsaConfig::default()
            },
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Prints every interval the moment it is emitted and keeps a copy for the statistics
struct PrintSink<W: Write> {
    out: W,
    recorded: Vec<ExecutionInterval>,
}

impl<W: Write> TraceSink for PrintSink<W> {
    fn emit(&mut self, interval: &ExecutionInterval) -> scheduler::Result<()> {
        writeln!(self.out, "{interval}")?;
        self.recorded.push(*interval);
        Ok(())
    }
}

fn print_statistics<W: Write>(out: &mut W, stats: &RunStatistics) -> io::Result<()> {
    writeln!(out, "pid  arrival  burst  completion  turnaround  waiting  response")?;
    for process in &stats.processes {
        writeln!(
            out,
            "{:<4} {:>7}  {:>5}  {:>10}  {:>10}  {:>7}  {:>8}",
            process.pid,
            process.arrival,
            process.burst,
            process.completion,
            process.turnaround(),
            process.waiting(),
            process.response()
        )?;
    }
    writeln!(
        out,
        "avg turnaround {:.2}, avg waiting {:.2}, avg response {:.2}, utilization {:.2}",
        stats.average_turnaround(),
        stats.average_waiting(),
        stats.average_response(),
        stats.utilization()
    )
}

/// Parses `text` and writes the requested traces to `out`
fn run<W: Write>(cli: &Cli, text: &str, out: &mut W) -> Result<()> {
    let workload = parse_workload(text, !cli.no_selector)?;

    let policies: Vec<Policy> = if cli.all {
        Policy::ALL.to_vec()
    } else {
        let policy = cli
            .policy
            .or(workload.policy)
            .context("no policy given: pass --policy or start the input with a selector line")?;
        vec![policy]
    };

    let mut registry = ProcessRegistry::with_descriptors(&workload.descriptors)
        .context("failed to load the workload")?;
    let config = cli.config();

    for policy in policies {
        if cli.all {
            writeln!(out, "# {policy}")?;
        }

        let mut sink = PrintSink {
            out: &mut *out,
            recorded: Vec::new(),
        };
        let report = simulate(&mut registry, policy, &config, &mut sink)
            .with_context(|| format!("{policy} simulation failed"))?;
        info!(
            "{} produced {} intervals, last process done at {}",
            report.policy, report.intervals, report.finished_at
        );

        let PrintSink { recorded, .. } = sink;
        if cli.stats {
            let stats = RunStatistics::from_trace(&workload.descriptors, &recorded);
            print_statistics(out, &stats)?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read workload from {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("cannot read workload from stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    let cli = Cli::parse();

    Builder::from_env(Env::default().default_filter_or(cli.log_level().as_str()))
        .init();

    let text = read_input(cli.input.as_ref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run(&cli, &text, &mut out)?;
    out.flush()?;

    Ok(())
}

// Do not delete this line
#[cfg(test)]
mod tests;
