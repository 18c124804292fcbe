use std::fmt;
use std::ops::{Add, Sub};

/// Largest process id accepted by the registry
pub const MAX_PID: usize = 65535;

/// Largest arrival, burst or slot accepted in a descriptor
///
/// Keeps every clock value of a run far below `usize::MAX`.
pub const MAX_TIME: i64 = i32::MAX as i64;

/// Lowest priority value a process can be aged down to
pub const MIN_PRIO: i32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(usize);

impl Pid {
    /// Creates a new Pid object
    ///
    /// * `pid` - the process identifier as usize
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point on the simulated clock
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(usize);

impl Timestamp {
    /// Creates a new Timestamp object
    ///
    /// * `time` - initial value of the Timestamp
    pub fn new(time: usize) -> Timestamp {
        Timestamp(time)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Add<usize> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: usize) -> Self::Output {
        Timestamp::new(self.0 + rhs)
    }
}

/// Elapsed time between two timestamps, saturating at zero
impl Sub for Timestamp {
    type Output = usize;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_arithmetic() {
        let t = Timestamp::new(4) + 3;
        assert_eq!(t.get(), 7);
        assert_eq!(t - Timestamp::new(2), 5);
        assert_eq!(Timestamp::new(2) - t, 0);
    }

    #[test]
    fn pid_ordering_follows_value() {
        assert!(Pid::new(1) < Pid::new(2));
        assert_eq!(Pid::new(9).to_string(), "9");
    }
}
