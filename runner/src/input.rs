//! Parser for the classic text workload format.
//!
//! ```text
//! 4
//! 1/0/5/3/2
//! 2/2/3/1/2
//! ```
//!
//! The first non-empty line selects the policy (1 = FCFS .. 5 = DPSA); every
//! following non-empty line is `pid/arrival/burst/priority/slot`.

use anyhow::{bail, Context, Result};
use scheduler::{Policy, ProcessDescriptor};

#[derive(Debug)]
pub struct Workload {
    /// Policy named by the selector line, if the input had one
    pub policy: Option<Policy>,
    pub descriptors: Vec<ProcessDescriptor>,
}

fn parse_field(field: &str, name: &str, line: usize) -> Result<i64> {
    field
        .trim()
        .parse::<i64>()
        .with_context(|| format!("line {line}: {name} `{}` is not an integer", field.trim()))
}

/// Parses one `pid/arrival/burst/priority/slot` record
pub fn parse_descriptor(record: &str, line: usize) -> Result<ProcessDescriptor> {
    let fields: Vec<&str> = record.split('/').collect();
    if fields.len() != 5 {
        bail!(
            "line {line}: expected pid/arrival/burst/priority/slot, found {} field(s)",
            fields.len()
        );
    }

    let pid = parse_field(fields[0], "pid", line)?;
    let arrival = parse_field(fields[1], "arrival", line)?;
    let burst = parse_field(fields[2], "burst", line)?;
    let priority = parse_field(fields[3], "priority", line)?;
    let slot = parse_field(fields[4], "slot", line)?;

    ProcessDescriptor::new(pid, arrival, burst, priority, slot)
        .with_context(|| format!("line {line}: rejected process record"))
}

/// Parses a whole workload
///
/// * `text` - the input document
/// * `expect_selector` - whether the first record is the policy selector line
pub fn parse_workload(text: &str, expect_selector: bool) -> Result<Workload> {
    let mut policy = None;
    let mut descriptors = Vec::new();
    let mut selector_pending = expect_selector;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let record = raw.trim();
        if record.is_empty() {
            continue;
        }

        if selector_pending {
            let selector = parse_field(record, "policy selector", line)?;
            policy = Some(
                Policy::from_selector(selector)
                    .with_context(|| format!("line {line}: bad policy selector"))?,
            );
            selector_pending = false;
            continue;
        }

        descriptors.push(parse_descriptor(record, line)?);
    }

    Ok(Workload {
        policy,
        descriptors,
    })
}
