mod cpu;
mod display;
mod fcfs;
mod metrics;
mod priority;
mod process;
mod round_robin;
mod runner;
mod sjf;
mod snapshot;

use log::{debug, info, trace};
use std::num::NonZeroU32;

pub use cpu::{Cpu, Timeline};
pub use display::{write_report, DisplayTerminal};
pub use fcfs::FcfsScheduler;
pub use metrics::Report;
pub use priority::PriorityScheduler;
pub use process::Process;
pub use round_robin::RoundRobinScheduler;
pub use runner::ProcessRunner;
pub use sjf::SjfScheduler;
pub use snapshot::ProcessSnapshot;

pub trait Scheduler {
    const NAME: &'static str;

    fn title(&self) -> String {
        Self::NAME.to_owned()
    }

    /// Runs every process in `snapshot` to completion on `cpu`.
    fn run(&self, snapshot: &mut ProcessSnapshot, cpu: &mut Cpu);
}

/// Simulates `scheduler` over a private copy of `source`. The source is never modified.
pub fn simulate<S: Scheduler>(scheduler: &S, source: &[Process]) -> Report {
    let mut snapshot = ProcessSnapshot::of(source);
    let mut cpu = Cpu::new();
    scheduler.run(&mut snapshot, &mut cpu);

    let report = Report::new(scheduler.title(), snapshot, cpu.into_timeline());
    for process in report.processes() {
        trace!(
            "P{} started {:?}, finished {:?}",
            process.pid(),
            process.start_time(),
            process.finish_time()
        );
    }
    let timeline = report.timeline();
    debug!(
        "{}: dispatch order {:?}, cpu busy {} of {}, idle gaps {:?}",
        report.algorithm(),
        timeline.dispatch_order(),
        timeline.busy_time(),
        timeline.end(),
        timeline.idle_gaps()
    );
    info!(
        "{}: {} processes, avg waiting {:.2}, avg turnaround {:.2}",
        report.algorithm(),
        report.processes().len(),
        report.average_waiting_time(),
        report.average_turnaround_time()
    );
    report
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin(NonZeroU32),
}

impl Algorithm {
    pub fn simulate(&self, source: &[Process]) -> Report {
        match *self {
            Algorithm::Fcfs => simulate(&FcfsScheduler, source),
            Algorithm::Sjf => simulate(&SjfScheduler, source),
            Algorithm::Priority => simulate(&PriorityScheduler, source),
            Algorithm::RoundRobin(quantum) => simulate(&RoundRobinScheduler::new(quantum), source),
        }
    }
}

/// Shared loop of the non-preemptive selectors: pick the ready process with
/// the smallest `key` (first one in collection order on ties) and run it to
/// completion, or idle until the next arrival when nothing is ready.
fn run_non_preemptive<K, F>(snapshot: &mut ProcessSnapshot, cpu: &mut Cpu, key: F)
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    while !snapshot.all_finished() {
        let clock = cpu.clock();
        let selected = snapshot
            .processes()
            .iter()
            .enumerate()
            .filter(|(_, process)| process.is_ready(clock))
            .min_by_key(|&(_, process)| key(process))
            .map(|(index, _)| index);

        match selected.and_then(|index| snapshot.get_mut(index)) {
            Some(process) => {
                trace!("selected P{} at {}", process.pid(), clock);
                process.dispatch(clock);
                let finish_time = cpu.execute(process.pid(), process.burst_time());
                process.complete(finish_time);
            }
            None => match snapshot.next_arrival() {
                Some(arrival) => cpu.idle_until(arrival),
                None => cpu.tick(),
            },
        }
    }
}
