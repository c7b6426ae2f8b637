use super::Process;

/// A private working copy of the source processes for a single simulation run.
#[derive(Debug, Clone)]
pub struct ProcessSnapshot {
    processes: Vec<Process>,
}

impl ProcessSnapshot {
    /// Copies `source` in order, resetting any run state it may carry.
    pub fn of(source: &[Process]) -> Self {
        Self {
            processes: source.iter().map(Process::fresh).collect(),
        }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Process> {
        self.processes.get_mut(index)
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Process> {
        self.processes.iter_mut()
    }

    pub fn all_finished(&self) -> bool {
        self.processes.iter().all(Process::is_finished)
    }

    /// Earliest arrival time among the unfinished processes.
    pub fn next_arrival(&self) -> Option<u32> {
        self.processes
            .iter()
            .filter(|process| !process.is_finished())
            .map(Process::arrival_time)
            .min()
    }

    pub fn into_processes(self) -> Vec<Process> {
        self.processes
    }
}
