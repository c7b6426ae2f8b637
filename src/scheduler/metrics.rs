use super::{Process, ProcessSnapshot, Timeline};

/// The outcome of one simulation run: finished processes in collection order,
/// the dispatch timeline, and the averaged metrics.
#[derive(Debug, Clone)]
pub struct Report {
    algorithm: String,
    processes: Vec<Process>,
    timeline: Timeline,
    average_waiting_time: f64,
    average_turnaround_time: f64,
}

impl Report {
    /// Fills in per-process turnaround/waiting time and averages them.
    ///
    /// An empty snapshot yields averages of zero.
    pub fn new(algorithm: String, snapshot: ProcessSnapshot, timeline: Timeline) -> Self {
        let mut processes = snapshot.into_processes();
        processes.iter_mut().for_each(Process::record_metrics);

        let average_waiting_time = mean(processes.iter().map(Process::waiting_time));
        let average_turnaround_time = mean(processes.iter().map(Process::turnaround_time));

        Self {
            algorithm,
            processes,
            timeline,
            average_waiting_time,
            average_turnaround_time,
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn average_waiting_time(&self) -> f64 {
        self.average_waiting_time
    }

    pub fn average_turnaround_time(&self) -> f64 {
        self.average_turnaround_time
    }
}

// Unset values count as zero but still count towards the divisor.
fn mean(values: impl ExactSizeIterator<Item = Option<u32>>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    let total: u64 = values.map(|value| u64::from(value.unwrap_or(0))).sum();
    total as f64 / count as f64
}
