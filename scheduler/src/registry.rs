use std::cmp::Ordering;
use std::collections::HashSet;
use std::ops::{Index, IndexMut};

use log::debug;

use crate::{
    DescriptorFault, Pid, Policy, ProcessControlBlock, ProcessDescriptor, Result, SchedulerError,
};

/// The fixed set of processes of a simulation together with their runtime state
///
/// Engines address processes by their index in the registry. The index order
/// is the scan order the tie-break rules refer to, and engines arrange it
/// with [`ProcessRegistry::sort_by`] before they start.
#[derive(Debug, Default, Clone)]
pub struct ProcessRegistry {
    processes: Vec<ProcessControlBlock>,
}

impl ProcessRegistry {
    pub fn new() -> ProcessRegistry {
        ProcessRegistry {
            processes: Vec::new(),
        }
    }

    /// Builds a registry already loaded with `descriptors`
    pub fn with_descriptors(descriptors: &[ProcessDescriptor]) -> Result<ProcessRegistry> {
        let mut registry = ProcessRegistry::new();
        registry.load(descriptors)?;
        Ok(registry)
    }

    /// Replaces the whole process set
    ///
    /// The current set is kept if any pid appears twice.
    pub fn load(&mut self, descriptors: &[ProcessDescriptor]) -> Result<()> {
        let mut seen = HashSet::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if !seen.insert(descriptor.pid()) {
                return Err(SchedulerError::DuplicateProcessId(descriptor.pid()));
            }
        }

        self.processes = descriptors
            .iter()
            .copied()
            .map(ProcessControlBlock::new)
            .collect();

        debug!("loaded {} processes", self.processes.len());
        Ok(())
    }

    /// Prepares every process for a fresh run of `policy`
    pub fn reset(&mut self, policy: Policy) -> Result<()> {
        if policy.is_time_sliced() {
            if let Some(pcb) = self.processes.iter().find(|pcb| pcb.slot() == 0) {
                return Err(SchedulerError::InvalidDescriptor {
                    pid: pcb.pid().get() as i64,
                    fault: DescriptorFault::ZeroSlot(policy),
                });
            }
        }

        for pcb in self.processes.iter_mut() {
            pcb.reset();
        }

        debug!("registry reset for {policy}");
        Ok(())
    }

    /// Reorders the scan order of the registry
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&ProcessControlBlock, &ProcessControlBlock) -> Ordering,
    {
        self.processes.sort_by(compare);
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessControlBlock> {
        self.processes.iter().find(|pcb| pcb.pid() == pid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessControlBlock> {
        self.processes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ProcessControlBlock> {
        self.processes.iter_mut()
    }

    pub fn as_slice(&self) -> &[ProcessControlBlock] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Sum of every initial burst
    pub fn total_burst(&self) -> usize {
        self.processes.iter().map(ProcessControlBlock::burst).sum()
    }

    pub fn all_finished(&self) -> bool {
        self.processes.iter().all(ProcessControlBlock::is_finished)
    }
}

impl Index<usize> for ProcessRegistry {
    type Output = ProcessControlBlock;

    fn index(&self, index: usize) -> &Self::Output {
        &self.processes[index]
    }
}

impl IndexMut<usize> for ProcessRegistry {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.processes[index]
    }
}
