use std::fmt;
use std::str::FromStr;

use crate::SchedulerError;

/// The five supported scheduling policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First-Come-First-Served
    Fcfs,
    /// Shortest-Job-First, non-preemptive
    Sjf,
    /// Shortest-Remaining-Time-First, preemptive
    Srtf,
    /// Round-Robin with a per-process quantum
    RoundRobin,
    /// Dynamic-Priority Scheduling Algorithm
    Dpsa,
}

impl Policy {
    /// Every policy, ordered by its numeric selector
    pub const ALL: [Policy; 5] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Srtf,
        Policy::RoundRobin,
        Policy::Dpsa,
    ];

    /// Maps the numeric selector of the classic input format (1..=5)
    pub fn from_selector(selector: i64) -> Result<Policy, SchedulerError> {
        match selector {
            1 => Ok(Policy::Fcfs),
            2 => Ok(Policy::Sjf),
            3 => Ok(Policy::Srtf),
            4 => Ok(Policy::RoundRobin),
            5 => Ok(Policy::Dpsa),
            other => Err(SchedulerError::UnknownPolicy(other.to_string())),
        }
    }

    pub fn selector(&self) -> u8 {
        match self {
            Policy::Fcfs => 1,
            Policy::Sjf => 2,
            Policy::Srtf => 3,
            Policy::RoundRobin => 4,
            Policy::Dpsa => 5,
        }
    }

    /// Whether a running process can be interrupted before its burst ends
    pub fn is_preemptive(&self) -> bool {
        !matches!(self, Policy::Fcfs | Policy::Sjf)
    }

    /// Whether the policy bounds each dispatch by the process slot
    pub fn is_time_sliced(&self) -> bool {
        matches!(self, Policy::RoundRobin | Policy::Dpsa)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::Srtf => "SRTF",
            Policy::RoundRobin => "RR",
            Policy::Dpsa => "DPSA",
        };
        f.write_str(name)
    }
}

/// Accepts a policy name (case-insensitive) or its numeric selector
impl FromStr for Policy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(selector) = trimmed.parse::<i64>() {
            return Policy::from_selector(selector);
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "srtf" => Ok(Policy::Srtf),
            "rr" | "round-robin" | "round_robin" => Ok(Policy::RoundRobin),
            "dpsa" => Ok(Policy::Dpsa),
            _ => Err(SchedulerError::UnknownPolicy(trimmed.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_selectors() {
        assert_eq!("fcfs".parse::<Policy>().unwrap(), Policy::Fcfs);
        assert_eq!("SRTF".parse::<Policy>().unwrap(), Policy::Srtf);
        assert_eq!("round-robin".parse::<Policy>().unwrap(), Policy::RoundRobin);
        assert_eq!(" 5 ".parse::<Policy>().unwrap(), Policy::Dpsa);

        for policy in Policy::ALL {
            assert_eq!(Policy::from_selector(policy.selector() as i64).unwrap(), policy);
        }
    }

    #[test]
    fn rejects_unknown_policies() {
        assert!(matches!(
            "lottery".parse::<Policy>(),
            Err(SchedulerError::UnknownPolicy(name)) if name == "lottery"
        ));
        assert!(matches!(
            Policy::from_selector(0),
            Err(SchedulerError::UnknownPolicy(_))
        ));
    }

    #[test]
    fn classifies_policies() {
        assert!(!Policy::Sjf.is_preemptive());
        assert!(Policy::Srtf.is_preemptive());
        assert!(!Policy::Srtf.is_time_sliced());
        assert!(Policy::Dpsa.is_time_sliced());
    }
}
