use super::{run_non_preemptive, Cpu, ProcessSnapshot, Scheduler};

/// Non-preemptive shortest-job-first.
///
/// Among the arrived, unfinished processes the shortest burst wins; equal
/// bursts go to the earlier arrival, and after that to whichever comes first
/// in the collection.
#[derive(Debug, Default, Clone, Copy)]
pub struct SjfScheduler;

impl Scheduler for SjfScheduler {
    const NAME: &'static str = "SJF (Non-preemptive)";

    fn run(&self, snapshot: &mut ProcessSnapshot, cpu: &mut Cpu) {
        run_non_preemptive(snapshot, cpu, |process| {
            (process.burst_time(), process.arrival_time())
        });
    }
}
