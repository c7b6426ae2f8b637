use super::{Cpu, ProcessSnapshot, Scheduler};
use log::trace;
use std::num::NonZeroU32;

/// Preemptive round robin.
///
/// The ready queue is modelled as repeated passes over the collection in
/// input order. Each arrived process with work left gets one slice of at most
/// `quantum` per pass. A process that arrives in the middle of a pass is only
/// seen once the scan reaches it, or on the next pass if the scan is already
/// past it.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobinScheduler {
    quantum: NonZeroU32,
}

impl RoundRobinScheduler {
    pub const DEFAULT_QUANTUM: NonZeroU32 = NonZeroU32::MIN;

    pub fn new(quantum: NonZeroU32) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> NonZeroU32 {
        self.quantum
    }

    /// One scan over the collection. Returns whether anything ran.
    fn run_pass(&self, snapshot: &mut ProcessSnapshot, cpu: &mut Cpu) -> bool {
        let mut executed = false;

        for process in snapshot.iter_mut() {
            if process.remaining_time() == 0 || !process.has_arrived(cpu.clock()) {
                continue;
            }

            let slice = process.remaining_time().min(self.quantum.get());
            trace!(
                "P{} gets {} of {} remaining",
                process.pid(),
                slice,
                process.remaining_time()
            );

            process.dispatch(cpu.clock());
            let end = cpu.execute(process.pid(), slice);
            process.consume(slice);
            executed = true;

            if process.remaining_time() == 0 {
                process.complete(end);
            }
        }

        executed
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        RoundRobinScheduler::new(RoundRobinScheduler::DEFAULT_QUANTUM)
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin";

    fn title(&self) -> String {
        format!("{} (Q={})", Self::NAME, self.quantum())
    }

    fn run(&self, snapshot: &mut ProcessSnapshot, cpu: &mut Cpu) {
        while !snapshot.all_finished() {
            if self.run_pass(snapshot, cpu) {
                continue;
            }

            // Nothing has arrived yet: skip ahead to the next arrival.
            match snapshot.next_arrival() {
                Some(arrival) if arrival > cpu.clock() => cpu.idle_until(arrival),
                _ => cpu.tick(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{simulate, FcfsScheduler, Process, Report};
    use super::*;

    fn quantum(value: u32) -> RoundRobinScheduler {
        RoundRobinScheduler::new(NonZeroU32::new(value).unwrap())
    }

    #[test]
    fn slices_alternate_between_arrived_processes() {
        let source = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];

        let report = simulate(&quantum(2), &source);

        let slices: Vec<_> = report
            .timeline()
            .slices()
            .iter()
            .map(|slice| (slice.pid, slice.start, slice.end))
            .collect();
        assert_eq!(
            slices,
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 7), (1, 7, 8)]
        );
        assert_eq!(report.processes()[0].finish_time(), Some(8));
        assert_eq!(report.processes()[1].finish_time(), Some(7));
        assert_eq!(report.processes()[1].start_time(), Some(2));
    }

    #[test]
    fn late_arrival_waits_for_next_pass() {
        // P1 is scanned at clock 0 before it arrives; P2 then runs until 4,
        // so P1 first runs on the second pass.
        let source = vec![Process::new(1, 1, 2), Process::new(2, 0, 4)];

        let report = simulate(&quantum(4), &source);

        assert_eq!(report.timeline().dispatch_order(), vec![2, 1]);
        assert_eq!(report.processes()[0].start_time(), Some(4));
    }

    #[test]
    fn idle_pass_jumps_to_next_arrival() {
        let source = vec![Process::new(1, 3, 2), Process::new(2, 9, 1)];

        let report = simulate(&quantum(2), &source);

        assert_eq!(report.processes()[0].start_time(), Some(3));
        assert_eq!(report.processes()[1].start_time(), Some(9));
        assert_eq!(report.timeline().idle_gaps(), vec![(0, 3), (5, 9)]);
    }

    #[test]
    fn large_quantum_matches_fcfs_completion() {
        let source = vec![
            Process::new(1, 0, 4),
            Process::new(2, 0, 2),
            Process::new(3, 0, 6),
        ];

        let round_robin = simulate(&quantum(6), &source);
        let fcfs = simulate(&FcfsScheduler, &source);

        let finish = |report: &Report| -> Vec<Option<u32>> {
            report.processes().iter().map(|p| p.finish_time()).collect()
        };
        assert_eq!(finish(&round_robin), finish(&fcfs));
        assert_eq!(round_robin.timeline(), fcfs.timeline());
    }

    #[test]
    fn unit_quantum_interleaves_every_tick() {
        let source = vec![Process::new(1, 0, 3), Process::new(2, 0, 2)];

        let report = simulate(&quantum(1), &source);

        assert_eq!(report.timeline().dispatch_order(), vec![1, 2, 1, 2, 1]);
        assert_eq!(report.processes()[0].finish_time(), Some(5));
        assert_eq!(report.processes()[1].finish_time(), Some(4));
    }

    #[test]
    fn remaining_time_drains_to_zero() {
        let report = simulate(&quantum(3), &[Process::new(1, 0, 7)]);

        let process = &report.processes()[0];
        assert_eq!(process.remaining_time(), 0);
        assert_eq!(process.start_time(), Some(0));
        assert_eq!(report.timeline().slices().len(), 3);
    }

    #[test]
    fn title_includes_quantum() {
        assert_eq!(quantum(4).title(), "Round Robin (Q=4)");
        assert_eq!(RoundRobinScheduler::default().quantum().get(), 1);
    }
}
