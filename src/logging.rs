//! Logging setup
//!
//! Sequential runs log straight through `env_logger`. Parallel runs install a
//! `QueueLogger` as the process-wide logger: every worker enqueues its records
//! on one channel and a single `LogAggregator` thread owns the sink, so lines
//! from concurrent workers never interleave. The aggregator stops when it
//! reads the `Shutdown` sentinel, which FIFO ordering places after every
//! record sent before it.

use std::io::Write;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};
use log::{Level, LevelFilter, Log, Metadata, Record};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use crate::error::{WavShrinkError, Result};

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LevelFilter::Info }
}

/// `<timestamp> - <LEVEL> - <message>`
pub fn format_line(timestamp: OffsetDateTime, level: Level, message: &str) -> String {
    let ts = timestamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| timestamp.unix_timestamp().to_string());
    format!("{} - {} - {}", ts, level, message)
}

/// Direct logging for the sequential runner. `RUST_LOG` overrides the level.
pub fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(level_for(verbose))
        .parse_default_env()
        .format(|buf, record| {
            let line = format_line(OffsetDateTime::now_utc(), record.level(), &record.args().to_string());
            writeln!(buf, "{}", line)
        })
        .try_init()
        .ok();
}

/// Install a `QueueLogger` globally and start its aggregator on stderr.
pub fn init_queue_logging(verbose: bool) -> Result<LogAggregator> {
    let level = level_for(verbose);
    let aggregator = LogAggregator::spawn(std::io::stderr())?;

    log::set_boxed_logger(Box::new(aggregator.logger(level)))
        .map_err(|e| WavShrinkError::config(format!("Logger already installed: {}", e)))?;
    log::set_max_level(level);

    Ok(aggregator)
}

#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: OffsetDateTime,
    pub level: Level,
    pub target: String,
    pub message: String,
}

#[derive(Debug)]
pub enum LogMessage {
    Record(LogRecord),
    Shutdown,
}

/// Producer side of the log channel. Cheap to clone; one per worker is fine.
#[derive(Debug, Clone)]
pub struct QueueLogger {
    sender: Sender<LogMessage>,
    level: LevelFilter,
}

impl QueueLogger {
    pub fn new(sender: Sender<LogMessage>, level: LevelFilter) -> Self {
        Self { sender, level }
    }
}

impl Log for QueueLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let record = LogRecord {
            timestamp: OffsetDateTime::now_utc(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        // aggregator gone means shutdown already happened
        let _ = self.sender.send(LogMessage::Record(record));
    }

    fn flush(&self) {}
}

/// Single consumer that owns the log sink.
pub struct LogAggregator {
    sender: Sender<LogMessage>,
    handle: JoinHandle<usize>,
}

impl LogAggregator {
    pub fn spawn<W: Write + Send + 'static>(sink: W) -> Result<Self> {
        let (sender, receiver) = channel();
        let handle = thread::Builder::new()
            .name("log-aggregator".to_string())
            .spawn(move || drain(receiver, sink))?;

        Ok(Self { sender, handle })
    }

    pub fn logger(&self, level: LevelFilter) -> QueueLogger {
        QueueLogger::new(self.sender.clone(), level)
    }

    /// Send the sentinel and wait for the queue to drain. Returns the number
    /// of records written.
    pub fn shutdown(self) -> Result<usize> {
        self.sender
            .send(LogMessage::Shutdown)
            .map_err(|_| WavShrinkError::processing("Log aggregator stopped early"))?;

        self.handle
            .join()
            .map_err(|_| WavShrinkError::processing("Log aggregator panicked"))
    }
}

fn drain<W: Write>(receiver: Receiver<LogMessage>, mut sink: W) -> usize {
    let mut written = 0;
    while let Ok(message) = receiver.recv() {
        match message {
            LogMessage::Record(record) => {
                let line = format_line(record.timestamp, record.level, &record.message);
                if writeln!(sink, "{}", line).is_ok() {
                    written += 1;
                }
                let _ = sink.flush();
            }
            LogMessage::Shutdown => break,
        }
    }
    written
}
