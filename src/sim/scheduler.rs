//! Repeating timers on a session clock
//!
//! One task per `TimerKind`. Periods change in place, so there is never more
//! than one live timer of a kind and nothing leaks across reschedules.

/// The periodic triggers a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    ItemSpawn,
    BombSpawn,
    DifficultyTick,
    Countdown,
}

#[derive(Debug, Clone)]
struct RepeatingTask {
    kind: TimerKind,
    period_ms: f64,
    last_fired_ms: f64,
    next_due_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: f64,
    /// Registration order breaks ties between tasks due at the same instant
    tasks: Vec<RepeatingTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value (ms since the scheduler was created)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Start a repeating task, replacing any existing one of the same kind.
    /// First fire is one period from now.
    pub fn schedule(&mut self, kind: TimerKind, period_ms: u32) {
        self.cancel(kind);
        let period_ms = f64::from(period_ms.max(1));
        log::debug!("scheduling {:?} every {}ms", kind, period_ms);
        self.tasks.push(RepeatingTask {
            kind,
            period_ms,
            last_fired_ms: self.now_ms,
            next_due_ms: self.now_ms + period_ms,
        });
    }

    /// Change the period of a live task. The next fire moves to one new
    /// period after the last fire, but never into the past.
    /// Returns false if the task is missing or the period is unchanged.
    pub fn set_period(&mut self, kind: TimerKind, period_ms: u32) -> bool {
        let now = self.now_ms;
        let period_ms = f64::from(period_ms.max(1));
        let Some(task) = self.tasks.iter_mut().find(|t| t.kind == kind) else {
            return false;
        };
        if task.period_ms == period_ms {
            return false;
        }
        task.period_ms = period_ms;
        task.next_due_ms = (task.last_fired_ms + period_ms).max(now);
        log::debug!("{:?} period now {}ms", kind, period_ms);
        true
    }

    pub fn period_ms(&self, kind: TimerKind) -> Option<f64> {
        self.tasks
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.period_ms)
    }

    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind)
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.tasks.retain(|t| t.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock to
    /// its fire time. Call in a loop; handlers may reschedule between pops.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<TimerKind> {
        let mut earliest: Option<usize> = None;
        for (i, task) in self.tasks.iter().enumerate() {
            if task.next_due_ms > until_ms {
                continue;
            }
            match earliest {
                Some(e) if self.tasks[e].next_due_ms <= task.next_due_ms => {}
                _ => earliest = Some(i),
            }
        }

        let task = &mut self.tasks[earliest?];
        self.now_ms = self.now_ms.max(task.next_due_ms);
        task.last_fired_ms = task.next_due_ms;
        task.next_due_ms += task.period_ms;
        Some(task.kind)
    }

    /// Move the clock forward without firing anything (after draining `pop_due`)
    pub fn advance_to(&mut self, until_ms: f64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
