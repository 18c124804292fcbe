use std::fmt;

use log::debug;

use crate::{Pid, ProcessControlBlock, Result, Timestamp};

/// One contiguous stretch of CPU time given to a single process
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutionInterval {
    /// 1-based completion order within the run
    pub order: usize,
    pub pid: Pid,
    pub start: Timestamp,
    pub stop: Timestamp,
    /// Priority of the process when the interval was emitted
    pub priority: i32,
}

impl ExecutionInterval {
    pub fn duration(&self) -> usize {
        self.stop - self.start
    }

    /// Whether both intervals share at least one time unit
    pub fn overlaps(&self, other: &ExecutionInterval) -> bool {
        self.start < other.stop && other.start < self.stop
    }
}

/// Renders the record as `order/pid/start/stop/priority`
impl fmt::Display for ExecutionInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.order, self.pid, self.start, self.stop, self.priority
        )
    }
}

/// Receives intervals as soon as an engine closes them
pub trait TraceSink {
    fn emit(&mut self, interval: &ExecutionInterval) -> Result<()>;
}

impl TraceSink for Vec<ExecutionInterval> {
    fn emit(&mut self, interval: &ExecutionInterval) -> Result<()> {
        self.push(*interval);
        Ok(())
    }
}

/// Hands out execution orders and forwards closed intervals to a sink
pub struct TraceEmitter<'a> {
    sink: &'a mut dyn TraceSink,
    next_order: usize,
}

impl<'a> TraceEmitter<'a> {
    pub fn new(sink: &'a mut dyn TraceSink) -> TraceEmitter<'a> {
        TraceEmitter {
            sink,
            next_order: 1,
        }
    }

    /// Number of intervals emitted so far
    pub fn emitted(&self) -> usize {
        self.next_order - 1
    }

    /// Closes the interval of `pcb` that ran from its start to `stop`
    ///
    /// * `pcb` - the process that ran; receives the new execution order
    /// * `stop` - the time the interval ended
    pub fn close(
        &mut self,
        pcb: &mut ProcessControlBlock,
        stop: Timestamp,
    ) -> Result<ExecutionInterval> {
        pcb.set_order(self.next_order);

        let interval = ExecutionInterval {
            order: self.next_order,
            pid: pcb.pid(),
            start: pcb.exec_start(),
            stop,
            priority: pcb.priority(),
        };
        self.next_order += 1;

        debug!("emit {interval}");
        self.sink.emit(&interval)?;

        Ok(interval)
    }
}
