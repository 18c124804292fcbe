use log::info;

use crate::schedulers::{
    DynamicPriorityScheduler, FcfsScheduler, RoundRobinScheduler, ShortestJobScheduler,
    ShortestRemainingScheduler,
};
use crate::{Policy, ProcessRegistry, Result, Timestamp, TraceEmitter, TraceSink};

/// A policy engine
///
/// An engine receives a freshly reset registry, runs every process to
/// completion and closes intervals through the emitter as they happen.
pub trait Scheduler {
    fn policy(&self) -> Policy;

    /// Runs the simulation and returns the final clock
    fn run(
        &mut self,
        registry: &mut ProcessRegistry,
        emitter: &mut TraceEmitter<'_>,
    ) -> Result<Timestamp>;
}

/// Tunables of the Dynamic-Priority Scheduling Algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpsaConfig {
    /// Added to the priority of the process that just ran
    pub penalty: i32,
    /// Subtracted from the priority of every other waiting ready process
    pub aging: i32,
    /// Aging never lowers a priority below this value
    pub priority_floor: i32,
}

impl Default for DpsaConfig {
    fn default() -> Self {
        DpsaConfig {
            penalty: 3,
            aging: 1,
            priority_floor: crate::common_types::MIN_PRIO,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationConfig {
    pub dpsa: DpsaConfig,
}

/// Outcome of one completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub policy: Policy,
    pub intervals: usize,
    /// Clock value once the last process finished
    pub finished_at: Timestamp,
}

/// Builds the engine for `policy`
pub fn engine(policy: Policy, config: &SimulationConfig) -> Box<dyn Scheduler> {
    match policy {
        Policy::Fcfs => Box::new(FcfsScheduler::new()),
        Policy::Sjf => Box::new(ShortestJobScheduler::new()),
        Policy::Srtf => Box::new(ShortestRemainingScheduler::new()),
        Policy::RoundRobin => Box::new(RoundRobinScheduler::new()),
        Policy::Dpsa => Box::new(DynamicPriorityScheduler::new(config.dpsa)),
    }
}

/// Resets `registry` for `policy` and runs it to completion
///
/// Intervals reach `sink` as soon as they close. Validation happens before the
/// first interval is produced, so a rejected registry emits nothing.
pub fn simulate(
    registry: &mut ProcessRegistry,
    policy: Policy,
    config: &SimulationConfig,
    sink: &mut dyn TraceSink,
) -> Result<RunReport> {
    registry.reset(policy)?;

    info!("running {policy} over {} processes", registry.len());

    let mut scheduler = engine(policy, config);
    let mut emitter = TraceEmitter::new(sink);
    let finished_at = scheduler.run(registry, &mut emitter)?;

    let report = RunReport {
        policy,
        intervals: emitter.emitted(),
        finished_at,
    };
    info!(
        "{policy} finished at {} after {} intervals",
        report.finished_at, report.intervals
    );

    Ok(report)
}
