use std::collections::VecDeque;

use log::{debug, trace, warn};

use super::{dispatch, time_slice, violation};
use crate::comparators::by_arrival;
use crate::{Policy, ProcessRegistry, Result, Scheduler, Timestamp, TraceEmitter};

/// Round-Robin where every process is preempted after its own slot
///
/// The ready flag of a process marks that it has been admitted to the queue
/// once; it is never cleared before the process finishes.
pub struct RoundRobinScheduler {
    /// Registry indices, in dispatch order
    ready: VecDeque<usize>,
    timestamp: Timestamp,
}

impl RoundRobinScheduler {
    pub fn new() -> RoundRobinScheduler {
        RoundRobinScheduler {
            ready: VecDeque::new(),
            timestamp: Timestamp::new(0),
        }
    }

    fn enqueue_process(&mut self, registry: &mut ProcessRegistry, index: usize) {
        registry[index].set_ready(true);
        self.ready.push_back(index);
    }

    fn dequeue_process(&mut self) -> Option<usize> {
        self.ready.pop_front()
    }

    /// Admits, in scan order, every process that has arrived by now
    fn admit_arrivals(&mut self, registry: &mut ProcessRegistry) {
        for i in 0..registry.len() {
            let pcb = &registry[i];
            if !pcb.is_finished() && !pcb.is_ready() && pcb.has_arrived(self.timestamp) {
                self.enqueue_process(registry, i);
            }
        }
    }

    /// Puts the earliest process not admitted yet in the empty queue
    fn admit_next(&mut self, registry: &mut ProcessRegistry) -> Result<()> {
        let next = registry
            .iter()
            .position(|pcb| !pcb.is_finished() && !pcb.is_ready())
            .ok_or_else(|| {
                violation(
                    Policy::RoundRobin,
                    "ready queue drained with unfinished processes queued".into(),
                )
            })?;

        if self.timestamp == Timestamp::new(0) {
            debug!("RR: seeding the ready queue with process {}", registry[next].pid());
        } else {
            warn!(
                "RR: ready queue empty at {}, waiting for process {}",
                self.timestamp,
                registry[next].pid()
            );
        }

        self.enqueue_process(registry, next);
        Ok(())
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        RoundRobinScheduler::new()
    }
}

impl Scheduler for RoundRobinScheduler {
    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn run(
        &mut self,
        registry: &mut ProcessRegistry,
        emitter: &mut TraceEmitter<'_>,
    ) -> Result<Timestamp> {
        self.timestamp = Timestamp::new(0);
        self.ready.clear();
        registry.sort_by(by_arrival);

        while !registry.all_finished() {
            let Some(current) = self.dequeue_process() else {
                self.admit_next(registry)?;
                continue;
            };

            let pcb = &mut registry[current];
            let start = dispatch(Policy::RoundRobin, pcb, self.timestamp)?;

            let quantum = time_slice(Policy::RoundRobin, pcb)?;
            pcb.execute(quantum);
            self.timestamp = start + quantum;
            trace!(
                "RR: process {} ran {} units, {} left",
                pcb.pid(),
                quantum,
                pcb.remaining()
            );

            emitter.close(pcb, self.timestamp)?;

            /* Arrivals during the quantum queue up before the preempted process */
            self.admit_arrivals(registry);
            if !registry[current].is_finished() {
                self.ready.push_back(current);
            }
        }

        Ok(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{rows, run};
    use crate::Policy;

    #[test]
    fn single_process_is_sliced_by_quantum() {
        let trace = run(Policy::RoundRobin, &[(1, 0, 5, 0, 2)]);
        assert_eq!(
            rows(&trace),
            vec![(1, 1, 0, 2, 0), (2, 1, 2, 4, 0), (3, 1, 4, 5, 0)]
        );
    }

    #[test]
    fn arrivals_queue_ahead_of_preempted_process() {
        let trace = run(
            Policy::RoundRobin,
            &[(1, 0, 5, 0, 2), (2, 1, 3, 0, 2), (3, 3, 1, 0, 2)],
        );

        assert_eq!(
            rows(&trace),
            vec![
                (1, 1, 0, 2, 0),
                (2, 2, 2, 4, 0),
                (3, 1, 4, 6, 0),
                (4, 3, 6, 7, 0),
                (5, 2, 7, 8, 0),
                (6, 1, 8, 9, 0)
            ]
        );
    }

    #[test]
    fn per_process_slots() {
        let trace = run(Policy::RoundRobin, &[(1, 0, 4, 0, 3), (2, 0, 2, 0, 1)]);
        assert_eq!(
            rows(&trace),
            vec![
                (1, 1, 0, 3, 0),
                (2, 2, 3, 4, 0),
                (3, 1, 4, 5, 0),
                (4, 2, 5, 6, 0)
            ]
        );
    }

    #[test]
    fn resumes_after_idle_gap() {
        let trace = run(Policy::RoundRobin, &[(1, 0, 1, 0, 2), (2, 5, 2, 0, 2)]);
        assert_eq!(rows(&trace), vec![(1, 1, 0, 1, 0), (2, 2, 5, 7, 0)]);
    }
}
