use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: Level,
    pub message: String,
}

/// Transient messages waiting to be shown once.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Toast>,
}

impl Notifications {
    pub fn info<T: Into<String>>(&mut self, message: T) {
        self.push(Level::Info, message);
    }

    pub fn error<T: Into<String>>(&mut self, message: T) {
        self.push(Level::Error, message);
    }

    fn push<T: Into<String>>(&mut self, level: Level, message: T) {
        self.queue.push_back(Toast {
            level,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Toast> + '_ {
        self.queue.drain(..)
    }
}
