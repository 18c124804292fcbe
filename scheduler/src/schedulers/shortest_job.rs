use log::trace;

use super::dispatch;
use crate::comparators::{by_arrival_then_burst, pick_shortest_job};
use crate::{Policy, ProcessRegistry, Result, Scheduler, Timestamp, TraceEmitter};

/// Non-preemptive Shortest-Job-First
pub struct ShortestJobScheduler {
    timestamp: Timestamp,
}

impl ShortestJobScheduler {
    pub fn new() -> ShortestJobScheduler {
        ShortestJobScheduler {
            timestamp: Timestamp::new(0),
        }
    }
}

impl Default for ShortestJobScheduler {
    fn default() -> Self {
        ShortestJobScheduler::new()
    }
}

impl Scheduler for ShortestJobScheduler {
    fn policy(&self) -> Policy {
        Policy::Sjf
    }

    fn run(
        &mut self,
        registry: &mut ProcessRegistry,
        emitter: &mut TraceEmitter<'_>,
    ) -> Result<Timestamp> {
        self.timestamp = Timestamp::new(0);
        registry.sort_by(by_arrival_then_burst);

        while let Some(next) = pick_shortest_job(registry.as_slice(), self.timestamp) {
            let pcb = &mut registry[next];
            let start = dispatch(Policy::Sjf, pcb, self.timestamp)?;

            let burst = pcb.remaining();
            pcb.execute(burst);
            self.timestamp = start + burst;
            trace!("SJF: process {} holds the cpu until {}", pcb.pid(), self.timestamp);

            emitter.close(pcb, self.timestamp)?;
        }

        Ok(self.timestamp)
    }
}
