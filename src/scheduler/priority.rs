use super::{run_non_preemptive, Cpu, ProcessSnapshot, Scheduler};

/// Non-preemptive priority scheduling. A lower value means a higher priority;
/// ties go to whichever process comes first in the collection.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriorityScheduler;

impl Scheduler for PriorityScheduler {
    const NAME: &'static str = "Priority Scheduling (Non-preemptive)";

    fn run(&self, snapshot: &mut ProcessSnapshot, cpu: &mut Cpu) {
        run_non_preemptive(snapshot, cpu, |process| process.priority());
    }
}

#[cfg(test)]
mod tests {
    use super::super::{simulate, Process};
    use super::*;

    #[test]
    fn lower_value_runs_first_once_arrived() {
        let source = vec![
            Process::with_priority(1, 0, 5, 2),
            Process::with_priority(2, 1, 3, 1),
            Process::with_priority(3, 2, 8, 3),
        ];

        let report = simulate(&PriorityScheduler, &source);

        assert_eq!(report.timeline().dispatch_order(), vec![1, 2, 3]);
        let finish: Vec<_> = report.processes().iter().map(|p| p.finish_time()).collect();
        assert_eq!(finish, vec![Some(5), Some(8), Some(16)]);
    }

    #[test]
    fn ties_ignore_arrival_and_burst() {
        // P3 arrived earlier and is shorter, but P2 comes first in the collection.
        let source = vec![
            Process::with_priority(1, 0, 4, 0),
            Process::with_priority(2, 3, 9, 5),
            Process::with_priority(3, 1, 1, 5),
        ];

        let report = simulate(&PriorityScheduler, &source);

        assert_eq!(report.timeline().dispatch_order(), vec![1, 2, 3]);
    }

    #[test]
    fn negative_priorities_are_more_urgent() {
        let source = vec![
            Process::with_priority(1, 0, 1, 0),
            Process::with_priority(2, 0, 1, 3),
            Process::with_priority(3, 0, 1, -4),
        ];

        let report = simulate(&PriorityScheduler, &source);

        assert_eq!(report.timeline().dispatch_order(), vec![3, 1, 2]);
    }

    #[test]
    fn waits_for_late_arrivals() {
        let source = vec![Process::with_priority(1, 4, 2, 9)];

        let report = simulate(&PriorityScheduler, &source);

        assert_eq!(report.processes()[0].start_time(), Some(4));
        assert_eq!(report.processes()[0].finish_time(), Some(6));
    }
}
