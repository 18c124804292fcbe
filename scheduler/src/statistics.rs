//! Per-process and run-wide figures derived from a finished trace.

use std::collections::HashMap;

use crate::{ExecutionInterval, Pid, ProcessDescriptor, Timestamp};

/// Timings of one process over a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatistics {
    pub pid: Pid,
    pub arrival: Timestamp,
    pub burst: usize,
    /// Start of the first interval
    pub first_start: Timestamp,
    /// Stop of the last interval
    pub completion: Timestamp,
    /// Number of intervals the burst was split into
    pub intervals: usize,
}

impl ProcessStatistics {
    pub fn turnaround(&self) -> usize {
        self.completion - self.arrival
    }

    pub fn waiting(&self) -> usize {
        self.turnaround().saturating_sub(self.burst)
    }

    pub fn response(&self) -> usize {
        self.first_start - self.arrival
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    /// One entry per process that ran, sorted by pid
    pub processes: Vec<ProcessStatistics>,
    /// First start to last stop
    pub makespan: usize,
    /// Time units the cpu was busy
    pub busy: usize,
}

impl RunStatistics {
    /// Builds the statistics of `trace`, looking arrivals and bursts up in `descriptors`
    ///
    /// Intervals of processes missing from `descriptors` are ignored.
    pub fn from_trace(descriptors: &[ProcessDescriptor], trace: &[ExecutionInterval]) -> Self {
        let by_pid: HashMap<Pid, &ProcessDescriptor> =
            descriptors.iter().map(|d| (d.pid(), d)).collect();
        let mut stats: HashMap<Pid, ProcessStatistics> = HashMap::new();

        for interval in trace {
            let Some(descriptor) = by_pid.get(&interval.pid) else {
                continue;
            };

            stats
                .entry(interval.pid)
                .and_modify(|entry| {
                    entry.first_start = entry.first_start.min(interval.start);
                    entry.completion = entry.completion.max(interval.stop);
                    entry.intervals += 1;
                })
                .or_insert(ProcessStatistics {
                    pid: interval.pid,
                    arrival: descriptor.arrival(),
                    burst: descriptor.burst(),
                    first_start: interval.start,
                    completion: interval.stop,
                    intervals: 1,
                });
        }

        let mut processes: Vec<ProcessStatistics> = stats.into_values().collect();
        processes.sort_by_key(|entry| entry.pid);

        let first = trace.iter().map(|i| i.start).min();
        let last = trace.iter().map(|i| i.stop).max();
        let makespan = match (first, last) {
            (Some(first), Some(last)) => last - first,
            _ => 0,
        };

        RunStatistics {
            processes,
            makespan,
            busy: trace.iter().map(ExecutionInterval::duration).sum(),
        }
    }

    fn average(&self, figure: impl Fn(&ProcessStatistics) -> usize) -> f64 {
        if self.processes.is_empty() {
            return 0.0;
        }

        let total: usize = self.processes.iter().map(figure).sum();
        total as f64 / self.processes.len() as f64
    }

    pub fn average_turnaround(&self) -> f64 {
        self.average(ProcessStatistics::turnaround)
    }

    pub fn average_waiting(&self) -> f64 {
        self.average(ProcessStatistics::waiting)
    }

    pub fn average_response(&self) -> f64 {
        self.average(ProcessStatistics::response)
    }

    /// Busy time over makespan, 0 for an empty run
    pub fn utilization(&self) -> f64 {
        if self.makespan == 0 {
            return 0.0;
        }

        self.busy as f64 / self.makespan as f64
    }
}
