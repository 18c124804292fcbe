//! A CPU scheduling simulator library.
//!
//! This library replays a fixed set of processes under one of five classic
//! policies and streams the resulting execution trace:
//!
//! * FCFS - First-Come-First-Served
//! * SJF - non-preemptive Shortest-Job-First
//! * SRTF - preemptive Shortest-Remaining-Time-First
//! * RR - Round-Robin with a per-process slot
//! * DPSA - Dynamic-Priority Scheduling Algorithm with penalty and aging
//!
//! ```
//! use scheduler::{simulate, ExecutionInterval, Policy, ProcessDescriptor, ProcessRegistry,
//!     SimulationConfig};
//!
//! let descriptors = [
//!     ProcessDescriptor::new(1, 0, 5, 0, 2).unwrap(),
//!     ProcessDescriptor::new(2, 2, 3, 0, 2).unwrap(),
//! ];
//! let mut registry = ProcessRegistry::with_descriptors(&descriptors).unwrap();
//! let mut trace: Vec<ExecutionInterval> = Vec::new();
//!
//! simulate(&mut registry, Policy::Fcfs, &SimulationConfig::default(), &mut trace).unwrap();
//!
//! assert_eq!(trace[1].to_string(), "2/2/5/8/0");
//! ```

mod common_types;
pub use crate::common_types::{Pid, Timestamp, MAX_PID, MAX_TIME, MIN_PRIO};

mod error;
pub use crate::error::{DescriptorFault, Result, SchedulerError};

mod policy;
pub use crate::policy::Policy;

mod process_control_block;
pub use crate::process_control_block::{ProcessControlBlock, ProcessDescriptor};

mod registry;
pub use crate::registry::ProcessRegistry;

pub mod comparators;

mod trace;
pub use crate::trace::{ExecutionInterval, TraceEmitter, TraceSink};

mod scheduler;
pub use crate::scheduler::{engine, simulate, DpsaConfig, RunReport, Scheduler, SimulationConfig};

pub mod schedulers;
pub use schedulers::{
    DynamicPriorityScheduler, FcfsScheduler, RoundRobinScheduler, ShortestJobScheduler,
    ShortestRemainingScheduler,
};

pub mod statistics;
pub use crate::statistics::{ProcessStatistics, RunStatistics};
