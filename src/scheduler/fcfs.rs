use super::{Cpu, ProcessSnapshot, Scheduler};

/// First-come-first-served, in collection order.
///
/// The collection is trusted to already be in arrival order; it is never
/// sorted. A process that arrives after the clock simply leaves the CPU idle
/// until it shows up, even if a later entry had arrived earlier.
#[derive(Debug, Default, Clone, Copy)]
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "FCFS";

    fn run(&self, snapshot: &mut ProcessSnapshot, cpu: &mut Cpu) {
        for process in snapshot.iter_mut() {
            cpu.idle_until(process.arrival_time());
            process.dispatch(cpu.clock());
            let finish_time = cpu.execute(process.pid(), process.burst_time());
            process.complete(finish_time);
        }
    }
}
