//! Progress heartbeat for long-running captured commands.
//!
//! While a compile runs, its log is captured rather than shown; the only
//! visible sign of life is a dot printed every tenth scanned line, with a
//! line break after 500 so the dots never run off the terminal edge. The
//! counter lives in this struct and is created per invocation, so two
//! runs never share heartbeat state.

use std::io::Write;

/// Per-invocation progress-dot counter.
#[derive(Debug, Default)]
pub struct Heartbeat {
    scanned: usize,
}

impl Heartbeat {
    /// Create a fresh heartbeat with zero lines scanned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one scanned line, emitting a dot every 10 lines and a
    /// newline every 500.
    pub fn tick(&mut self) {
        if self.scanned % 10 == 0 {
            print!(".");
            let _ = std::io::stdout().flush();
        }

        self.scanned += 1;
        if self.scanned > 500 {
            self.scanned = 0;
            println!();
        }
    }

    /// Terminate the dot line once the command is done.
    pub fn finish(&mut self) {
        println!();
    }

    /// Number of lines scanned since the last wrap.
    #[cfg(test)]
    pub fn scanned(&self) -> usize {
        self.scanned
    }
}
