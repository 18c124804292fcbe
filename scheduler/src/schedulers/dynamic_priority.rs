use log::trace;

use super::{dispatch, time_slice, violation};
use crate::comparators::{by_arrival, pick_dynamic_priority};
use crate::{DpsaConfig, Policy, ProcessRegistry, Result, Scheduler, Timestamp, TraceEmitter};

/// Dynamic-Priority Scheduling Algorithm
///
/// Lower priority values win. After each turn the process that ran is
/// penalized, and every other ready process that was already waiting is
/// aged towards the floor. Each turn lasts at most the process slot.
pub struct DynamicPriorityScheduler {
    config: DpsaConfig,
    timestamp: Timestamp,
}

impl DynamicPriorityScheduler {
    /// Creates a new DPSA engine
    ///
    /// * `config` - penalty, aging step and priority floor
    pub fn new(config: DpsaConfig) -> DynamicPriorityScheduler {
        DynamicPriorityScheduler {
            config,
            timestamp: Timestamp::new(0),
        }
    }

    /// Marks ready every unfinished process that has arrived by now
    fn admit_arrivals(&self, registry: &mut ProcessRegistry) {
        for pcb in registry.iter_mut() {
            if !pcb.is_finished() && !pcb.is_ready() && pcb.has_arrived(self.timestamp) {
                pcb.set_ready(true);
            }
        }
    }

    /// Rewards the ready processes that waited while `ran` held the cpu
    fn age_waiting(&self, registry: &mut ProcessRegistry, ran: usize) {
        for i in 0..registry.len() {
            let pcb = &mut registry[i];
            if i != ran && pcb.is_ready() && pcb.arrival() < self.timestamp {
                pcb.age(self.config.aging, self.config.priority_floor);
            }
        }
    }
}

impl Default for DynamicPriorityScheduler {
    fn default() -> Self {
        DynamicPriorityScheduler::new(DpsaConfig::default())
    }
}

impl Scheduler for DynamicPriorityScheduler {
    fn policy(&self) -> Policy {
        Policy::Dpsa
    }

    fn run(
        &mut self,
        registry: &mut ProcessRegistry,
        emitter: &mut TraceEmitter<'_>,
    ) -> Result<Timestamp> {
        self.timestamp = Timestamp::new(0);
        registry.sort_by(by_arrival);

        while !registry.all_finished() {
            let current = pick_dynamic_priority(registry.as_slice()).ok_or_else(|| {
                violation(Policy::Dpsa, "no candidate left with unfinished processes".into())
            })?;

            let pcb = &mut registry[current];
            let start = dispatch(Policy::Dpsa, pcb, self.timestamp)?;

            let quantum = time_slice(Policy::Dpsa, pcb)?;
            pcb.execute(quantum);
            self.timestamp = start + quantum;

            pcb.penalize(self.config.penalty);
            if !pcb.is_finished() {
                pcb.set_ready(true);
            }
            trace!(
                "DPSA: process {} ran {} units, priority now {}",
                pcb.pid(),
                quantum,
                pcb.priority()
            );

            /* The record carries the priority after the penalty */
            emitter.close(pcb, self.timestamp)?;

            self.admit_arrivals(registry);
            self.age_waiting(registry, current);
        }

        Ok(self.timestamp)
    }
}
