use crate::common_types::{MAX_PID, MAX_TIME};
use crate::{DescriptorFault, Pid, SchedulerError, Timestamp};

/// Immutable description of a process, validated once at load time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessDescriptor {
    pid: Pid,
    arrival: Timestamp,
    burst: usize,
    priority: i32,
    slot: usize,
}

impl ProcessDescriptor {
    /// Validates raw input values and builds a descriptor
    ///
    /// * `pid` - unique process identifier, within `0..=MAX_PID`
    /// * `arrival` - time the process enters the system, within `0..=MAX_TIME`
    /// * `burst` - total CPU time the process needs, within `1..=MAX_TIME`
    /// * `priority` - base priority, lower is better
    /// * `slot` - quantum used by the time-sliced policies, within `0..=MAX_TIME`
    pub fn new(
        pid: i64,
        arrival: i64,
        burst: i64,
        priority: i64,
        slot: i64,
    ) -> Result<ProcessDescriptor, SchedulerError> {
        let reject = |fault| SchedulerError::InvalidDescriptor { pid, fault };

        if pid < 0 || pid > MAX_PID as i64 {
            return Err(reject(DescriptorFault::PidOutOfRange { pid }));
        }
        if arrival < 0 {
            return Err(reject(DescriptorFault::NegativeArrival(arrival)));
        }
        if arrival > MAX_TIME {
            return Err(reject(DescriptorFault::ArrivalOutOfRange(arrival)));
        }
        if burst <= 0 {
            return Err(reject(DescriptorFault::NonPositiveBurst(burst)));
        }
        if burst > MAX_TIME {
            return Err(reject(DescriptorFault::BurstOutOfRange(burst)));
        }
        if slot < 0 {
            return Err(reject(DescriptorFault::NegativeSlot(slot)));
        }
        if slot > MAX_TIME {
            return Err(reject(DescriptorFault::SlotOutOfRange(slot)));
        }
        let priority =
            i32::try_from(priority).map_err(|_| reject(DescriptorFault::PriorityOutOfRange(priority)))?;

        Ok(ProcessDescriptor {
            pid: Pid::new(pid as usize),
            arrival: Timestamp::new(arrival as usize),
            burst: burst as usize,
            priority,
            slot: slot as usize,
        })
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival(&self) -> Timestamp {
        self.arrival
    }

    pub fn burst(&self) -> usize {
        self.burst
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// Runtime state of one process, owned by the engine that is running
#[derive(Clone, Copy, Debug)]
pub struct ProcessControlBlock {
    descriptor: ProcessDescriptor,
    /// Burst time still to be executed
    remaining: usize,
    /// Burst time executed so far
    executed: usize,
    /// Start of the interval currently open (or last opened)
    exec_start: Timestamp,
    /// Dynamic priority; only DPSA changes it
    priority: i32,
    finished: bool,
    in_ready: bool,
    /// Order of the last emitted interval
    order: Option<usize>,
}

impl ProcessControlBlock {
    pub fn new(descriptor: ProcessDescriptor) -> ProcessControlBlock {
        ProcessControlBlock {
            descriptor,
            remaining: descriptor.burst(),
            executed: 0,
            exec_start: Timestamp::default(),
            priority: descriptor.priority(),
            finished: false,
            in_ready: false,
            order: None,
        }
    }

    /// Drops every trace of a previous run
    pub fn reset(&mut self) {
        *self = ProcessControlBlock::new(self.descriptor);
    }

    pub fn descriptor(&self) -> &ProcessDescriptor {
        &self.descriptor
    }

    pub fn pid(&self) -> Pid {
        self.descriptor.pid()
    }

    pub fn arrival(&self) -> Timestamp {
        self.descriptor.arrival()
    }

    pub fn burst(&self) -> usize {
        self.descriptor.burst()
    }

    pub fn slot(&self) -> usize {
        self.descriptor.slot()
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn executed(&self) -> usize {
        self.executed
    }

    pub fn exec_start(&self) -> Timestamp {
        self.exec_start
    }

    pub fn order(&self) -> Option<usize> {
        self.order
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_ready(&self) -> bool {
        self.in_ready
    }

    pub fn has_arrived(&self, clock: Timestamp) -> bool {
        self.arrival() <= clock
    }

    /// Opens a new execution interval at `time`
    pub fn start_at(&mut self, time: Timestamp) {
        self.exec_start = time;
    }

    /// Runs the process for `time` units, never past its remaining burst
    ///
    /// Returns the time actually consumed
    pub fn execute(&mut self, time: usize) -> usize {
        let time = time.min(self.remaining);
        self.remaining -= time;
        self.executed += time;

        if self.remaining == 0 {
            self.finished = true;
            self.in_ready = false;
        }

        time
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.in_ready = ready;
    }

    pub fn set_order(&mut self, order: usize) {
        self.order = Some(order);
    }

    /// Raises the priority value, making the process less preferred
    pub fn penalize(&mut self, penalty: i32) {
        self.priority = self.priority.saturating_add(penalty);
    }

    /// Lowers the priority value by `step`, never below `floor`
    ///
    /// A priority already at or below the floor is left untouched
    pub fn age(&mut self, step: i32, floor: i32) {
        if self.priority <= floor {
            return;
        }

        self.priority = self.priority.saturating_sub(step).max(floor);
    }
}
