use super::{write_report, Algorithm, DisplayTerminal, Process, Report, RoundRobinScheduler};
use anyhow::{anyhow, bail, Context};
use log::{info, warn};
use std::{
    collections::VecDeque,
    io::{BufRead, Write},
    num::NonZeroU32,
    str::FromStr,
};

const MENU: &str = "\n\n------ CPU Scheduling Simulator ------\n\
                    1. FCFS\n\
                    2. SJF (Non-preemptive)\n\
                    3. Priority Scheduling (Non-preemptive)\n\
                    4. Round Robin (Preemptive)\n\
                    5. Exit\n";

pub enum RunnerEvent {
    Simulate(Algorithm),
    RoundRobin,
    Exit,
    Invalid,
}

impl From<&str> for RunnerEvent {
    fn from(token: &str) -> Self {
        match token.parse::<i64>() {
            Ok(1) => RunnerEvent::Simulate(Algorithm::Fcfs),
            Ok(2) => RunnerEvent::Simulate(Algorithm::Sjf),
            Ok(3) => RunnerEvent::Simulate(Algorithm::Priority),
            Ok(4) => RunnerEvent::RoundRobin,
            Ok(5) => RunnerEvent::Exit,
            _ => RunnerEvent::Invalid,
        }
    }
}

/// Whitespace separated tokens read lazily, line by line.
struct TokenReader<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// The next token, or `None` at end of input.
    fn next_token(&mut self) -> anyhow::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line).context("failed to read input")? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }

    /// Drops whatever is left of the current line.
    fn discard_line(&mut self) {
        self.pending.clear();
    }
}

/// The interactive session: reads the workload once, then serves menu requests.
pub struct ProcessRunner<R, W> {
    input: TokenReader<R>,
    output: W,
    terminal: Option<DisplayTerminal>,
    processes: Vec<Process>,
}

impl<R: BufRead, W: Write> ProcessRunner<R, W> {
    /// Reports are written to `output` unless a `terminal` is given.
    pub fn new(input: R, output: W, terminal: Option<DisplayTerminal>) -> Self {
        Self {
            input: TokenReader::new(input),
            output,
            terminal,
            processes: Vec::new(),
        }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    fn prompt(&mut self, text: &str) -> anyhow::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    fn read_value<T: FromStr>(&mut self, what: &str) -> anyhow::Result<T> {
        match self.input.next_token()? {
            Some(token) => token
                .parse()
                .map_err(|_| anyhow!("invalid {what}: {token:?}")),
            None => bail!("unexpected end of input while reading {what}"),
        }
    }

    /// Prompts for the process count and each process. Any malformed value is fatal.
    pub fn load_processes(&mut self) -> anyhow::Result<()> {
        self.prompt("Enter number of processes: ")?;
        let count: u32 = self.read_value("process count")?;
        if count == 0 {
            bail!("invalid process count: must be positive");
        }
        info!("reading {} processes", count);

        let mut processes = Vec::new();
        let mut total_burst: u64 = 0;
        for pid in 1..=count {
            self.prompt(&format!("\nProcess {pid} Arrival Time: "))?;
            let arrival_time: u32 = self.read_value(&format!("arrival time of process {pid}"))?;
            self.prompt(&format!("Process {pid} Burst Time: "))?;
            let burst_time: u32 = self.read_value(&format!("burst time of process {pid}"))?;
            if burst_time == 0 {
                bail!("invalid burst time of process {pid}: must be positive");
            }
            self.prompt(&format!("Process {pid} Priority (lower = higher): "))?;
            let priority: i32 = self.read_value(&format!("priority of process {pid}"))?;

            processes.push(Process::with_priority(pid, arrival_time, burst_time, priority));
            total_burst += u64::from(burst_time);
        }

        // The virtual clock never passes the latest arrival plus all the work.
        let latest_arrival = processes.iter().map(Process::arrival_time).max().unwrap_or(0);
        if u64::from(latest_arrival) + total_burst > u64::from(u32::MAX) {
            bail!(
                "workload too long: latest arrival {} plus total burst {} exceeds {}",
                latest_arrival,
                total_burst,
                u32::MAX
            );
        }

        self.processes = processes;
        Ok(())
    }

    fn read_quantum(&mut self) -> anyhow::Result<NonZeroU32> {
        self.prompt("Enter time quantum: ")?;
        let token = match self.input.next_token()? {
            Some(token) => token,
            None => bail!("unexpected end of input while reading time quantum"),
        };

        match token.parse::<u32>().ok().and_then(NonZeroU32::new) {
            Some(quantum) => Ok(quantum),
            None => {
                warn!("invalid quantum {:?}, using the default", token);
                writeln!(self.output, "Invalid quantum. Defaulting to 1.")?;
                Ok(RoundRobinScheduler::DEFAULT_QUANTUM)
            }
        }
    }

    fn present(&mut self, report: &Report) -> anyhow::Result<()> {
        match self.terminal.as_mut() {
            Some(terminal) => terminal.show(report)?,
            None => write_report(&mut self.output, report)?,
        }
        Ok(())
    }

    // Returns false once the operator asks to exit
    pub fn run(&mut self) -> anyhow::Result<bool> {
        self.prompt(MENU)?;
        self.prompt("Enter your choice: ")?;

        let token = match self.input.next_token()? {
            Some(token) => token,
            None => bail!("unexpected end of input at the menu"),
        };

        let algorithm = match RunnerEvent::from(token.as_str()) {
            RunnerEvent::Simulate(algorithm) => algorithm,
            RunnerEvent::RoundRobin => Algorithm::RoundRobin(self.read_quantum()?),
            RunnerEvent::Exit => {
                writeln!(self.output, "Exiting...")?;
                self.processes.clear();
                return Ok(false);
            }
            RunnerEvent::Invalid => {
                warn!("invalid menu choice {:?}", token);
                if token.parse::<i64>().is_ok() {
                    writeln!(self.output, "Invalid choice!")?;
                } else {
                    self.input.discard_line();
                    writeln!(self.output, "Invalid input! Try again.")?;
                }
                return Ok(true);
            }
        };

        info!("running {:?}", algorithm);
        let report = algorithm.simulate(&self.processes);
        self.present(&report)?;
        Ok(true)
    }
}
