//! The policy engines
//!
//! Every engine lives in its own file and is exported here.

use log::debug;

use crate::{Policy, ProcessControlBlock, Result, SchedulerError, Timestamp};

mod fcfs;
pub use fcfs::FcfsScheduler;

mod shortest_job;
pub use shortest_job::ShortestJobScheduler;

mod shortest_remaining;
pub use shortest_remaining::ShortestRemainingScheduler;

mod round_robin;
pub use round_robin::RoundRobinScheduler;

mod dynamic_priority;
pub use dynamic_priority::DynamicPriorityScheduler;

pub(crate) fn violation(policy: Policy, detail: String) -> SchedulerError {
    SchedulerError::InternalInvariantViolation { policy, detail }
}

/// Refuses to run a process that is already done or has not arrived at `at`
pub(crate) fn ensure_runnable(
    policy: Policy,
    pcb: &ProcessControlBlock,
    at: Timestamp,
) -> Result<()> {
    if pcb.is_finished() || pcb.remaining() == 0 {
        return Err(violation(
            policy,
            format!("process {} dispatched with no remaining time", pcb.pid()),
        ));
    }

    if !pcb.has_arrived(at) {
        return Err(violation(
            policy,
            format!(
                "process {} dispatched at {} before its arrival at {}",
                pcb.pid(),
                at,
                pcb.arrival()
            ),
        ));
    }

    Ok(())
}

/// Opens an interval for `pcb` at `max(clock, arrival)` and returns its start
pub(crate) fn dispatch(
    policy: Policy,
    pcb: &mut ProcessControlBlock,
    clock: Timestamp,
) -> Result<Timestamp> {
    let start = clock.max(pcb.arrival());
    ensure_runnable(policy, pcb, start)?;

    if start > clock {
        debug!("{policy}: cpu idle from {clock} to {start}");
    }

    pcb.start_at(start);
    Ok(start)
}

/// Length of the next turn of `pcb` under a time-sliced policy
pub(crate) fn time_slice(policy: Policy, pcb: &ProcessControlBlock) -> Result<usize> {
    if pcb.slot() == 0 {
        return Err(violation(
            policy,
            format!("process {} has a zero slot", pcb.pid()),
        ));
    }

    Ok(pcb.slot().min(pcb.remaining()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{
        simulate, ExecutionInterval, Policy, ProcessDescriptor, ProcessRegistry, SimulationConfig,
    };

    /// `(pid, arrival, burst, priority, slot)`
    pub type Row = (i64, i64, i64, i64, i64);

    pub fn registry(rows: &[Row]) -> ProcessRegistry {
        let descriptors: Vec<ProcessDescriptor> = rows
            .iter()
            .map(|&(pid, arrival, burst, priority, slot)| {
                ProcessDescriptor::new(pid, arrival, burst, priority, slot).unwrap()
            })
            .collect();

        ProcessRegistry::with_descriptors(&descriptors).unwrap()
    }

    pub fn run(policy: Policy, rows: &[Row]) -> Vec<ExecutionInterval> {
        let mut registry = registry(rows);
        let mut trace: Vec<ExecutionInterval> = Vec::new();
        simulate(&mut registry, policy, &SimulationConfig::default(), &mut trace).unwrap();
        trace
    }

    /// `(order, pid, start, stop, priority)` of every interval
    pub fn rows(trace: &[ExecutionInterval]) -> Vec<(usize, usize, usize, usize, i32)> {
        trace
            .iter()
            .map(|i| (i.order, i.pid.get(), i.start.get(), i.stop.get(), i.priority))
            .collect()
    }
}
