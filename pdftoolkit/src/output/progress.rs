//! Progress indicator for page copying.
//!
//! Progress is drawn on stderr and only when stderr is a terminal, so piped
//! output of commands such as `count` stays clean. It never influences what
//! an operation does.
//!
//! # Examples
//!
//! ```
//! use pdftoolkit::output::progress::{ProgressBar, ProgressStyle};
//!
//! let mut progress = ProgressBar::new(10, ProgressStyle::Bar);
//! progress.set_message("Copying pages");
//! for _ in 0..10 {
//!     progress.increment();
//! }
//! progress.finish();
//! ```

use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

/// Style of progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStyle {
    /// Classic progress bar: [=====>    ]
    Bar,
    /// Simple counter: 42/100
    Counter,
}

/// Progress bar for visual feedback during operations.
#[derive(Debug)]
pub struct ProgressBar {
    /// Total number of items.
    total: usize,
    /// Current progress.
    current: usize,
    style: ProgressStyle,
    message: Option<String>,
    start_time: Instant,
    /// Last redraw, for rate limiting.
    last_update: Instant,
    update_interval: Duration,
    enabled: bool,
}

impl ProgressBar {
    /// Create a new progress bar, enabled when stderr is a terminal.
    pub fn new(total: usize, style: ProgressStyle) -> Self {
        Self {
            total,
            current: 0,
            style,
            message: None,
            start_time: Instant::now(),
            last_update: Instant::now(),
            update_interval: Duration::from_millis(100),
            enabled: io::stderr().is_terminal(),
        }
    }

    /// Create a bar when `show` is set, a disabled one otherwise.
    pub fn optional(total: usize, show: bool) -> Self {
        if show {
            Self::new(total, ProgressStyle::Bar)
        } else {
            Self::disabled()
        }
    }

    /// Create a disabled progress bar (no output).
    pub fn disabled() -> Self {
        let mut pb = Self::new(0, ProgressStyle::Counter);
        pb.enabled = false;
        pb
    }

    /// Set the message to display with the progress bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Update the progress bar to a specific value.
    pub fn update(&mut self, current: usize) {
        self.current = current;

        if self.last_update.elapsed() < self.update_interval && current < self.total {
            return;
        }

        self.last_update = Instant::now();
        self.render();
    }

    /// Increment the progress bar by one.
    pub fn increment(&mut self) {
        self.update(self.current + 1);
    }

    /// Mark the progress bar as finished and clear it.
    pub fn finish(&mut self) {
        self.current = self.total;
        if self.enabled {
            self.render();
            eprint!("\r\x1b[K");
            io::stderr().flush().ok();
        }
    }

    fn render(&self) {
        if !self.enabled {
            return;
        }

        let output = match self.style {
            ProgressStyle::Bar => self.render_bar(),
            ProgressStyle::Counter => self.render_counter(),
        };

        eprint!("\r{output}");
        io::stderr().flush().ok();
    }

    fn render_bar(&self) -> String {
        let width = 40;
        let percent = self.percent() as usize;

        let filled = (width * self.current.min(self.total)) / self.total.max(1);
        let empty = width - filled;

        let bar = format!(
            "[{}{}]",
            "=".repeat(filled.saturating_sub(1)) + if filled > 0 { ">" } else { "" },
            " ".repeat(empty)
        );

        let counter = format!("{}/{}", self.current, self.total);
        let elapsed = format_duration(self.start_time.elapsed());

        let mut parts = vec![bar, format!("{percent}%"), counter, elapsed];

        if let Some(ref msg) = self.message {
            parts.insert(0, msg.clone());
        }

        parts.join(" ")
    }

    fn render_counter(&self) -> String {
        let counter = format!("{}/{}", self.current, self.total);
        match &self.message {
            Some(msg) => format!("{msg} {counter}"),
            None => counter,
        }
    }

    /// Get the current progress percentage.
    pub fn percent(&self) -> f64 {
        if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Whether anything is drawn.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Format a duration as a human-readable string.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
