/// One process of the simulated workload.
///
/// The input fields (`pid`, arrival, burst, priority) never change after
/// construction. Everything else is run state, owned by whichever
/// [`ProcessSnapshot`](super::ProcessSnapshot) the record lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: u32,
    arrival_time: u32,
    burst_time: u32,
    priority: i32,
    remaining_time: u32,
    start_time: Option<u32>,
    finish_time: Option<u32>,
    waiting_time: Option<u32>,
    turnaround_time: Option<u32>,
}

impl Process {
    #[cfg(test)]
    const DEFAULT_PRIORITY: i32 = 0;

    #[cfg(test)]
    pub fn new(pid: u32, arrival_time: u32, burst_time: u32) -> Self {
        Process::with_priority(pid, arrival_time, burst_time, Process::DEFAULT_PRIORITY)
    }

    pub fn with_priority(pid: u32, arrival_time: u32, burst_time: u32, priority: i32) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time,
            start_time: None,
            finish_time: None,
            waiting_time: None,
            turnaround_time: None,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn arrival_time(&self) -> u32 {
        self.arrival_time
    }

    pub fn burst_time(&self) -> u32 {
        self.burst_time
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn remaining_time(&self) -> u32 {
        self.remaining_time
    }

    pub fn start_time(&self) -> Option<u32> {
        self.start_time
    }

    pub fn finish_time(&self) -> Option<u32> {
        self.finish_time
    }

    pub fn waiting_time(&self) -> Option<u32> {
        self.waiting_time
    }

    pub fn turnaround_time(&self) -> Option<u32> {
        self.turnaround_time
    }

    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }

    pub fn has_arrived(&self, clock: u32) -> bool {
        self.arrival_time <= clock
    }

    /// Eligible for dispatch at `clock`: arrived and not yet finished.
    pub fn is_ready(&self, clock: u32) -> bool {
        !self.is_finished() && self.has_arrived(clock)
    }

    /// A copy carrying only the input fields, with all run state reset.
    pub fn fresh(&self) -> Self {
        Process::with_priority(self.pid, self.arrival_time, self.burst_time, self.priority)
    }

    /// Records the first dispatch; later dispatches leave the start time alone.
    pub(super) fn dispatch(&mut self, clock: u32) {
        if self.start_time.is_none() {
            self.start_time = Some(clock);
        }
    }

    pub(super) fn consume(&mut self, units: u32) {
        self.remaining_time -= units.min(self.remaining_time);
    }

    pub(super) fn complete(&mut self, clock: u32) {
        self.finish_time = Some(clock);
    }

    /// Fills in turnaround and waiting time. No-op until the process has finished.
    pub(super) fn record_metrics(&mut self) {
        if let Some(finish_time) = self.finish_time {
            let turnaround_time = finish_time - self.arrival_time;
            self.turnaround_time = Some(turnaround_time);
            self.waiting_time = Some(turnaround_time - self.burst_time);
        }
    }
}
