use log::debug;
use std::fmt::Write;

/// One contiguous interval during which a single process held the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub pid: u32,
    pub start: u32,
    pub end: u32,
}

impl Slice {
    pub fn duration(&self) -> u32 {
        self.end - self.start
    }
}

/// The dispatch history of one run, in the order the slices were executed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    slices: Vec<Slice>,
}

/// Text form of a timeline: the block bar and the time axis under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gantt {
    pub bar: String,
    pub axis: String,
}

impl Timeline {
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn dispatch_order(&self) -> Vec<u32> {
        self.slices().iter().map(|slice| slice.pid).collect()
    }

    pub fn busy_time(&self) -> u32 {
        self.slices.iter().map(Slice::duration).sum()
    }

    pub fn end(&self) -> u32 {
        self.slices.last().map_or(0, |slice| slice.end)
    }

    /// Intervals where no process ran, including one before the first slice.
    pub fn idle_gaps(&self) -> Vec<(u32, u32)> {
        let mut gaps = Vec::new();
        let mut previous_end = 0;
        for slice in &self.slices {
            if slice.start > previous_end {
                gaps.push((previous_end, slice.start));
            }
            previous_end = slice.end;
        }
        gaps
    }

    pub fn gantt(&self) -> Gantt {
        let mut bar = String::from("|");
        let mut axis = String::from("0");
        let mut previous_end = 0;

        for slice in &self.slices {
            if slice.start > previous_end {
                push_block(&mut bar, &mut axis, "idle", slice.start);
            }
            push_block(&mut bar, &mut axis, &format!("P{}", slice.pid), slice.end);
            previous_end = slice.end;
        }

        Gantt { bar, axis }
    }

    fn push(&mut self, slice: Slice) {
        self.slices.push(slice);
    }
}

// The boundary time goes under the closing `|` of the block, or one space
// after the previous time when that one is too wide.
fn push_block(bar: &mut String, axis: &mut String, label: &str, end: u32) {
    let _ = write!(bar, " {label} |");
    let column = bar.len() - 1;
    let padding = column.saturating_sub(axis.len()).max(1);
    let _ = write!(axis, "{:padding$}{end}", "");
}

/// The single simulated CPU: a virtual clock plus the record of what ran on it.
#[derive(Debug, Default)]
pub struct Cpu {
    clock: u32,
    timeline: Timeline,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> u32 {
        self.clock
    }

    /// Leaves the CPU idle until `time`. The clock never moves backwards.
    pub fn idle_until(&mut self, time: u32) {
        if time > self.clock {
            debug!("cpu idle {} -> {}", self.clock, time);
            self.clock = time;
        }
    }

    pub fn tick(&mut self) {
        self.clock += 1;
    }

    /// Runs `pid` for `units` starting now and returns the time it stops.
    pub fn execute(&mut self, pid: u32, units: u32) -> u32 {
        let start = self.clock;
        self.clock += units;
        debug!("dispatch P{} {} -> {}", pid, start, self.clock);
        self.timeline.push(Slice {
            pid,
            start,
            end: self.clock,
        });
        self.clock
    }

    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_advances_clock_and_records_slice() {
        let mut cpu = Cpu::new();

        assert_eq!(cpu.execute(1, 5), 5);
        cpu.idle_until(7);
        assert_eq!(cpu.execute(2, 3), 10);

        assert_eq!(
            cpu.into_timeline().slices(),
            &[
                Slice { pid: 1, start: 0, end: 5 },
                Slice { pid: 2, start: 7, end: 10 },
            ]
        );
    }

    #[test]
    fn idle_until_never_rewinds() {
        let mut cpu = Cpu::new();
        cpu.execute(1, 4);

        cpu.idle_until(2);

        assert_eq!(cpu.clock(), 4);
    }

    #[test]
    fn timeline_reports_busy_time_and_gaps() {
        let mut cpu = Cpu::new();
        cpu.idle_until(2);
        cpu.execute(1, 3);
        cpu.idle_until(8);
        cpu.execute(2, 1);

        let timeline = cpu.into_timeline();

        assert_eq!(timeline.busy_time(), 4);
        assert_eq!(timeline.end(), 9);
        assert_eq!(timeline.idle_gaps(), vec![(0, 2), (5, 8)]);
        assert_eq!(timeline.dispatch_order(), vec![1, 2]);
    }

    #[test]
    fn gantt_places_times_under_block_edges() {
        let mut cpu = Cpu::new();
        cpu.execute(1, 5);
        cpu.execute(2, 3);
        cpu.execute(3, 8);

        let gantt = cpu.into_timeline().gantt();

        assert_eq!(gantt.bar, "| P1 | P2 | P3 |");
        assert_eq!(gantt.axis, "0    5    8    16");
    }

    #[test]
    fn gantt_marks_idle_gaps() {
        let mut cpu = Cpu::new();
        cpu.idle_until(3);
        cpu.execute(1, 2);

        let gantt = cpu.into_timeline().gantt();

        assert_eq!(gantt.bar, "| idle | P1 |");
        assert_eq!(gantt.axis, "0      3    5");
    }

    #[test]
    fn empty_timeline_has_bare_gantt() {
        let gantt = Timeline::default().gantt();

        assert_eq!(gantt.bar, "|");
        assert_eq!(gantt.axis, "0");
    }
}
