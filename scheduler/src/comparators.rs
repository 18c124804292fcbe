//! Tie-break rules shared by the policy engines.
//!
//! Every function here is a pure function of the runtime state. Selection
//! functions scan the registry slice in index order and only replace the
//! current best on a strictly better candidate, so remaining ties go to the
//! first-encountered-in-ascending-array-order process.

use std::cmp::Ordering;

use crate::{ProcessControlBlock, Timestamp};

/// FCFS, RR and DPSA scan order: arrival, then pid
pub fn by_arrival(a: &ProcessControlBlock, b: &ProcessControlBlock) -> Ordering {
    a.arrival().cmp(&b.arrival()).then(a.pid().cmp(&b.pid()))
}

/// SJF and SRTF scan order: arrival, then initial burst, then pid
pub fn by_arrival_then_burst(a: &ProcessControlBlock, b: &ProcessControlBlock) -> Ordering {
    a.arrival()
        .cmp(&b.arrival())
        .then(a.burst().cmp(&b.burst()))
        .then(a.pid().cmp(&b.pid()))
}

fn is_candidate(pcb: &ProcessControlBlock, clock: Timestamp) -> bool {
    !pcb.is_finished() && pcb.has_arrived(clock)
}

/// Index of the first unfinished process in scan order
pub fn first_unfinished(procs: &[ProcessControlBlock]) -> Option<usize> {
    procs.iter().position(|pcb| !pcb.is_finished())
}

/// Shortest job among the processes arrived by `clock`, ties to the smaller pid
///
/// Falls back to the first unfinished process in scan order when nothing has
/// arrived yet, so the caller can wait for it.
pub fn pick_shortest_job(procs: &[ProcessControlBlock], clock: Timestamp) -> Option<usize> {
    let mut best = first_unfinished(procs)?;

    for (i, pcb) in procs.iter().enumerate() {
        if !is_candidate(pcb, clock) {
            continue;
        }

        let current = &procs[best];
        if pcb.burst() < current.burst()
            || (pcb.burst() == current.burst() && pcb.pid() < current.pid())
        {
            best = i;
        }
    }

    Some(best)
}

/// Shortest remaining time among the processes arrived by `clock`
///
/// `incumbent` is the process that ran during the previous step. It keeps
/// the CPU unless another candidate has strictly less remaining time.
/// Returns `None` when no unfinished process has arrived.
pub fn pick_shortest_remaining(
    procs: &[ProcessControlBlock],
    clock: Timestamp,
    incumbent: Option<usize>,
) -> Option<usize> {
    let mut best = incumbent
        .filter(|&i| is_candidate(&procs[i], clock))
        .or_else(|| procs.iter().position(|pcb| is_candidate(pcb, clock)))?;

    for (i, pcb) in procs.iter().enumerate() {
        if is_candidate(pcb, clock) && pcb.remaining() < procs[best].remaining() {
            best = i;
        }
    }

    Some(best)
}

/// DPSA selection
///
/// With a non-empty ready set: lowest dynamic priority, ties to the earlier
/// arrival. Otherwise: earliest arrival among unfinished processes, ties to
/// the lower priority.
pub fn pick_dynamic_priority(procs: &[ProcessControlBlock]) -> Option<usize> {
    if let Some(mut best) = procs.iter().position(ProcessControlBlock::is_ready) {
        for (i, pcb) in procs.iter().enumerate() {
            if !pcb.is_ready() {
                continue;
            }

            let current = &procs[best];
            if pcb.priority() < current.priority()
                || (pcb.priority() == current.priority() && pcb.arrival() < current.arrival())
            {
                best = i;
            }
        }

        return Some(best);
    }

    let mut best = first_unfinished(procs)?;
    for (i, pcb) in procs.iter().enumerate() {
        if pcb.is_finished() {
            continue;
        }

        let current = &procs[best];
        if pcb.arrival() < current.arrival()
            || (pcb.arrival() == current.arrival() && pcb.priority() < current.priority())
        {
            best = i;
        }
    }

    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProcessDescriptor;

    fn pcb(pid: i64, arrival: i64, burst: i64, priority: i64) -> ProcessControlBlock {
        ProcessControlBlock::new(ProcessDescriptor::new(pid, arrival, burst, priority, 2).unwrap())
    }

    #[test]
    fn scan_orders() {
        let mut procs = vec![pcb(3, 1, 2, 0), pcb(2, 1, 5, 0), pcb(1, 1, 5, 0), pcb(4, 0, 9, 0)];

        procs.sort_by(by_arrival);
        let pids: Vec<usize> = procs.iter().map(|p| p.pid().get()).collect();
        assert_eq!(pids, vec![4, 1, 2, 3]);

        procs.sort_by(by_arrival_then_burst);
        let pids: Vec<usize> = procs.iter().map(|p| p.pid().get()).collect();
        assert_eq!(pids, vec![4, 3, 1, 2]);
    }

    #[test]
    fn shortest_job_ignores_future_arrivals() {
        let procs = vec![pcb(1, 0, 6, 0), pcb(2, 1, 3, 0), pcb(3, 1, 3, 0), pcb(4, 9, 1, 0)];

        assert_eq!(pick_shortest_job(&procs, Timestamp::new(0)), Some(0));
        assert_eq!(pick_shortest_job(&procs, Timestamp::new(2)), Some(1));
    }

    #[test]
    fn shortest_job_waits_for_next_arrival() {
        let mut procs = vec![pcb(1, 0, 2, 0), pcb(2, 10, 3, 0)];
        procs[0].execute(2);

        assert_eq!(pick_shortest_job(&procs, Timestamp::new(2)), Some(1));
        procs[1].execute(3);
        assert_eq!(pick_shortest_job(&procs, Timestamp::new(13)), None);
    }

    #[test]
    fn shortest_remaining_keeps_incumbent_on_tie() {
        let mut procs = vec![pcb(1, 0, 4, 0), pcb(2, 1, 3, 0)];
        procs[0].execute(1);

        assert_eq!(pick_shortest_remaining(&procs, Timestamp::new(1), Some(0)), Some(0));
        procs[0].execute(1);
        assert_eq!(pick_shortest_remaining(&procs, Timestamp::new(2), Some(0)), Some(0));
        assert_eq!(pick_shortest_remaining(&procs, Timestamp::new(2), Some(1)), Some(0));
    }

    #[test]
    fn shortest_remaining_without_arrivals() {
        let procs = vec![pcb(1, 5, 4, 0)];
        assert_eq!(pick_shortest_remaining(&procs, Timestamp::new(0), None), None);
    }

    #[test]
    fn dynamic_priority_prefers_ready_set() {
        let mut procs = vec![pcb(1, 0, 4, 1), pcb(2, 2, 4, 7), pcb(3, 1, 4, 7)];
        assert_eq!(pick_dynamic_priority(&procs), Some(0));

        procs[1].set_ready(true);
        procs[2].set_ready(true);
        assert_eq!(pick_dynamic_priority(&procs), Some(2));

        procs[1].age(1, 0);
        assert_eq!(pick_dynamic_priority(&procs), Some(1));
    }

    #[test]
    fn dynamic_priority_idle_pick_breaks_ties_by_priority() {
        let procs = vec![pcb(1, 3, 4, 5), pcb(2, 3, 4, 2), pcb(3, 6, 4, 0)];
        assert_eq!(pick_dynamic_priority(&procs), Some(1));
    }
}
