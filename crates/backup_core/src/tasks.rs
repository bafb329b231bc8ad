use std::fmt;

use crate::ConfigError;

/// One stage of a backup run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Task {
    Trigger,
    Monitor,
    Download,
}

impl Task {
    pub const ALL: [Task; 3] = [Task::Trigger, Task::Monitor, Task::Download];

    fn from_flag(flag: &str) -> Result<Self, ConfigError> {
        match flag.trim() {
            "t" | "T" => Ok(Task::Trigger),
            "m" | "M" => Ok(Task::Monitor),
            "d" | "D" => Ok(Task::Download),
            other => Err(ConfigError::InvalidTask(other.to_string())),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Trigger => write!(f, "trigger"),
            Task::Monitor => write!(f, "monitor"),
            Task::Download => write!(f, "download"),
        }
    }
}

/// Selected stages. Iteration always yields trigger, monitor, download order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSet {
    trigger: bool,
    monitor: bool,
    download: bool,
}

impl Default for TaskSet {
    fn default() -> Self {
        Self::all()
    }
}

impl TaskSet {
    pub fn all() -> Self {
        Self {
            trigger: true,
            monitor: true,
            download: true,
        }
    }

    /// Parses `--tasks` values. `None` selects every task.
    ///
    /// Each value may hold one or more flags separated by spaces or commas,
    /// so both `--tasks t d` and `--tasks "t,d"` work.
    pub fn parse<S: AsRef<str>>(values: Option<&[S]>) -> Result<Self, ConfigError> {
        let Some(values) = values else {
            return Ok(Self::all());
        };
        let mut set = Self {
            trigger: false,
            monitor: false,
            download: false,
        };
        let flags = values
            .iter()
            .flat_map(|value| value.as_ref().split([' ', ',']))
            .filter(|flag| !flag.trim().is_empty());
        for flag in flags {
            match Task::from_flag(flag)? {
                Task::Trigger => set.trigger = true,
                Task::Monitor => set.monitor = true,
                Task::Download => set.download = true,
            }
        }
        if set.is_empty() {
            return Err(ConfigError::EmptyTasks);
        }
        Ok(set)
    }

    pub fn contains(&self, task: Task) -> bool {
        match task {
            Task::Trigger => self.trigger,
            Task::Monitor => self.monitor,
            Task::Download => self.download,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.trigger || self.monitor || self.download)
    }

    pub fn iter(&self) -> impl Iterator<Item = Task> + '_ {
        Task::ALL.into_iter().filter(|task| self.contains(*task))
    }
}
