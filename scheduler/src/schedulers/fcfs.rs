use log::trace;

use super::dispatch;
use crate::comparators::by_arrival;
use crate::{Policy, ProcessRegistry, Result, Scheduler, Timestamp, TraceEmitter};

/// First-Come-First-Served: processes run to completion in arrival order
pub struct FcfsScheduler {
    timestamp: Timestamp,
}

impl FcfsScheduler {
    pub fn new() -> FcfsScheduler {
        FcfsScheduler {
            timestamp: Timestamp::new(0),
        }
    }
}

impl Default for FcfsScheduler {
    fn default() -> Self {
        FcfsScheduler::new()
    }
}

impl Scheduler for FcfsScheduler {
    fn policy(&self) -> Policy {
        Policy::Fcfs
    }

    fn run(
        &mut self,
        registry: &mut ProcessRegistry,
        emitter: &mut TraceEmitter<'_>,
    ) -> Result<Timestamp> {
        self.timestamp = Timestamp::new(0);
        registry.sort_by(by_arrival);

        for i in 0..registry.len() {
            let pcb = &mut registry[i];
            let start = dispatch(Policy::Fcfs, pcb, self.timestamp)?;

            /* Non-preemptive: the whole burst is executed in one go */
            let burst = pcb.remaining();
            pcb.execute(burst);
            self.timestamp = start + burst;
            trace!("FCFS: process {} holds the cpu until {}", pcb.pid(), self.timestamp);

            emitter.close(pcb, self.timestamp)?;
        }

        Ok(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{rows, run};
    use crate::Policy;

    #[test]
    fn runs_in_arrival_order() {
        let trace = run(Policy::Fcfs, &[(1, 0, 5, 0, 1), (2, 2, 3, 0, 1)]);
        assert_eq!(rows(&trace), vec![(1, 1, 0, 5, 0), (2, 2, 5, 8, 0)]);
    }

    #[test]
    fn equal_arrivals_go_by_pid() {
        let trace = run(Policy::Fcfs, &[(2, 0, 3, 4, 1), (1, 0, 2, 9, 1)]);
        assert_eq!(rows(&trace), vec![(1, 1, 0, 2, 9), (2, 2, 2, 5, 4)]);
    }

    #[test]
    fn idles_until_next_arrival() {
        let trace = run(Policy::Fcfs, &[(1, 0, 2, 0, 1), (2, 6, 1, 0, 1)]);
        assert_eq!(rows(&trace), vec![(1, 1, 0, 2, 0), (2, 2, 6, 7, 0)]);
    }
}
