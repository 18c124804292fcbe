use log::{trace, warn};

use super::{ensure_runnable, violation};
use crate::comparators::{by_arrival_then_burst, pick_shortest_remaining};
use crate::{Policy, ProcessRegistry, Result, Scheduler, Timestamp, TraceEmitter};

/// Preemptive Shortest-Remaining-Time-First
///
/// A process keeps the cpu while nobody has strictly less remaining time.
/// Remaining times only change for the running process, so a preemption can
/// only happen at an arrival: the clock advances from one arrival or
/// completion to the next. Every contiguous run of the same process becomes
/// one interval.
pub struct ShortestRemainingScheduler {
    /// Process that ran during the previous step
    running: Option<usize>,
    timestamp: Timestamp,
}

impl ShortestRemainingScheduler {
    pub fn new() -> ShortestRemainingScheduler {
        ShortestRemainingScheduler {
            running: None,
            timestamp: Timestamp::new(0),
        }
    }

    fn make_timeskip(&mut self, time: usize) {
        self.timestamp = self.timestamp + time;
    }

    /// Time until the next arrival, if any process is still to arrive
    fn next_arrival_in(&self, registry: &ProcessRegistry) -> Option<usize> {
        registry
            .iter()
            .filter(|pcb| !pcb.is_finished() && !pcb.has_arrived(self.timestamp))
            .map(|pcb| pcb.arrival() - self.timestamp)
            .min()
    }

    /// Moves the clock to the next arrival when nothing is runnable
    fn idle(&mut self, registry: &ProcessRegistry) -> Result<()> {
        let next_arrival = registry
            .iter()
            .filter(|pcb| !pcb.is_finished())
            .map(|pcb| pcb.arrival())
            .min()
            .ok_or_else(|| violation(Policy::Srtf, "idle with every process finished".into()))?;

        warn!(
            "SRTF: no process has arrived at {}, idling until {}",
            self.timestamp, next_arrival
        );
        self.timestamp = next_arrival;

        Ok(())
    }
}

impl Default for ShortestRemainingScheduler {
    fn default() -> Self {
        ShortestRemainingScheduler::new()
    }
}

impl Scheduler for ShortestRemainingScheduler {
    fn policy(&self) -> Policy {
        Policy::Srtf
    }

    fn run(
        &mut self,
        registry: &mut ProcessRegistry,
        emitter: &mut TraceEmitter<'_>,
    ) -> Result<Timestamp> {
        self.timestamp = Timestamp::new(0);
        self.running = None;
        registry.sort_by(by_arrival_then_burst);

        while !registry.all_finished() {
            let Some(next) =
                pick_shortest_remaining(registry.as_slice(), self.timestamp, self.running)
            else {
                self.idle(registry)?;
                continue;
            };

            /* Context switch: close the preempted interval and open a new one */
            if self.running != Some(next) {
                if let Some(prev) = self.running {
                    if !registry[prev].is_finished() {
                        emitter.close(&mut registry[prev], self.timestamp)?;
                    }
                }

                ensure_runnable(Policy::Srtf, &registry[next], self.timestamp)?;
                registry[next].start_at(self.timestamp);
            }

            let step = match self.next_arrival_in(registry) {
                Some(until) => until.min(registry[next].remaining()),
                None => registry[next].remaining(),
            };
            let ran = registry[next].execute(step);
            self.make_timeskip(ran);
            trace!(
                "SRTF: process {} ran until {}, {} left",
                registry[next].pid(),
                self.timestamp,
                registry[next].remaining()
            );

            if registry[next].is_finished() {
                emitter.close(&mut registry[next], self.timestamp)?;
            }

            self.running = Some(next);
        }

        Ok(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{rows, run};
    use crate::{Policy, MAX_TIME};

    #[test]
    fn shorter_arrival_preempts() {
        let trace = run(Policy::Srtf, &[(1, 0, 7, 0, 1), (2, 2, 4, 0, 1), (3, 4, 1, 0, 1)]);

        assert_eq!(
            rows(&trace),
            vec![
                (1, 1, 0, 2, 0),
                (2, 2, 2, 4, 0),
                (3, 3, 4, 5, 0),
                (4, 2, 5, 7, 0),
                (5, 1, 7, 12, 0)
            ]
        );
    }

    #[test]
    fn equal_remaining_time_does_not_preempt() {
        let trace = run(Policy::Srtf, &[(1, 0, 4, 0, 1), (2, 1, 3, 0, 1)]);
        assert_eq!(rows(&trace), vec![(1, 1, 0, 4, 0), (2, 2, 4, 7, 0)]);
    }

    #[test]
    fn idles_across_gaps() {
        let trace = run(Policy::Srtf, &[(1, 0, 2, 0, 1), (2, 5, 1, 0, 1)]);
        assert_eq!(rows(&trace), vec![(1, 1, 0, 2, 0), (2, 2, 5, 6, 0)]);
    }

    #[test]
    fn late_first_arrival() {
        let trace = run(Policy::Srtf, &[(4, 3, 2, 1, 1)]);
        assert_eq!(rows(&trace), vec![(1, 4, 3, 5, 1)]);
    }

    #[test]
    fn widest_bursts_run_without_overflow() {
        let max = MAX_TIME as usize;
        let rows_in = [(1, 0, MAX_TIME, 0, 1), (2, 0, MAX_TIME, 0, 1), (3, 5, MAX_TIME, 0, 1)];

        for policy in [Policy::Fcfs, Policy::Srtf] {
            let trace = run(policy, &rows_in);
            let last = trace.last().unwrap();

            assert_eq!(trace.len(), 3, "{policy}");
            assert_eq!(last.stop.get(), 3 * max, "{policy}");
        }
    }
}
