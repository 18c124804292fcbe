use thiserror::Error;

use crate::{Pid, Policy};

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Why a process descriptor was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DescriptorFault {
    #[error("burst time must be positive, got {0}")]
    NonPositiveBurst(i64),
    #[error("arrival time must not be negative, got {0}")]
    NegativeArrival(i64),
    #[error("arrival time must not exceed {max}, got {0}", max = crate::common_types::MAX_TIME)]
    ArrivalOutOfRange(i64),
    #[error("burst time must not exceed {max}, got {0}", max = crate::common_types::MAX_TIME)]
    BurstOutOfRange(i64),
    #[error("slot must not exceed {max}, got {0}", max = crate::common_types::MAX_TIME)]
    SlotOutOfRange(i64),
    #[error("pid must be within 0..={max}, got {pid}", max = crate::common_types::MAX_PID)]
    PidOutOfRange { pid: i64 },
    #[error("priority {0} does not fit a 32-bit integer")]
    PriorityOutOfRange(i64),
    #[error("slot must not be negative, got {0}")]
    NegativeSlot(i64),
    #[error("{0} needs a positive slot")]
    ZeroSlot(Policy),
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A descriptor failed validation; nothing was loaded or run.
    #[error("invalid descriptor for process {pid}: {fault}")]
    InvalidDescriptor { pid: i64, fault: DescriptorFault },

    /// Two descriptors share the same pid.
    #[error("duplicate process id {0}")]
    DuplicateProcessId(Pid),

    /// The policy selector does not name a supported policy.
    #[error("unknown scheduling policy `{0}`")]
    UnknownPolicy(String),

    /// An engine was about to dispatch a process it must never pick.
    #[error("internal invariant violated in {policy}: {detail}")]
    InternalInvariantViolation { policy: Policy, detail: String },

    /// The trace sink refused an interval.
    #[error("failed to emit execution interval")]
    Emit(#[from] std::io::Error),
}

impl SchedulerError {
    /// Returns true for every load-time rejection, duplicates included
    pub fn is_invalid_descriptor(&self) -> bool {
        matches!(
            self,
            SchedulerError::InvalidDescriptor { .. } | SchedulerError::DuplicateProcessId(_)
        )
    }
}
