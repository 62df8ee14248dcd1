//! Fixed-size ring of recent log lines.
//!
//! The simulator logger mirrors every record into a `LogBuffer` so the last
//! few lines can be dumped next to the rendered frame. On hardware the same
//! buffer can back an on-screen debug overlay without heap allocation.
//!
//! ```ignore
//! let mut log = LogBuffer::new();
//! log.push("relayout: 3 widgets");
//!
//! for line in log.iter() {
//!     println!("{}", line);
//! }
//! ```

use heapless::{Deque, String};

// =============================================================================
// Configuration
// =============================================================================

/// Number of lines kept before the oldest is dropped.
pub const LOG_BUFFER_SIZE: usize = 8;

/// Maximum characters kept per line.
pub const LOG_LINE_LENGTH: usize = 64;

// =============================================================================
// Ring Buffer
// =============================================================================

/// Ring buffer of the last [`LOG_BUFFER_SIZE`] log lines.
pub struct LogBuffer {
    lines: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
}

impl LogBuffer {
    pub const fn new() -> Self { Self { lines: Deque::new() } }

    /// Append a line, truncated to fit. Drops the oldest line when full.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        if self.lines.is_full() {
            self.lines.pop_front();
        }

        let mut line: String<LOG_LINE_LENGTH> = String::new();
        for c in msg.chars() {
            if line.push(c).is_err() {
                break;
            }
        }

        self.lines.push_back(line).ok();
    }

    /// Lines oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.lines.iter().map(|line| line.as_str()) }

    #[inline]
    pub fn len(&self) -> usize { self.lines.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    pub fn clear(&mut self) { self.lines.clear(); }
}

impl Default for LogBuffer {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
