/// Site-run state definitions
///
/// A site-run moves through these states exactly once, in order.
use std::fmt;

/// Represents the current state of one site-run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Nothing has started yet
    Idle,

    /// The browser session is being launched
    BrowserStarting,

    /// Pages are being opened and audited
    PageLoop,

    /// Pages and the browser session are being closed
    BrowserClosing,

    // ===== Terminal States =====
    /// Every URL was attempted and the session was closed
    Done,

    /// The browser could not be launched, or the session broke mid-run
    Failed,
}

impl RunState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if the run can move from this state to `next`
    ///
    /// A failure inside the page loop still passes through `BrowserClosing`
    /// so the session is released before the run ends as `Failed`.
    pub fn can_transition_to(&self, next: RunState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::BrowserStarting)
                | (Self::BrowserStarting, Self::PageLoop)
                | (Self::BrowserStarting, Self::Failed)
                | (Self::PageLoop, Self::BrowserClosing)
                | (Self::PageLoop, Self::Failed)
                | (Self::BrowserClosing, Self::Done)
                | (Self::BrowserClosing, Self::Failed)
        )
    }

    /// Returns a short lowercase name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::BrowserStarting => "browser_starting",
            Self::PageLoop => "page_loop",
            Self::BrowserClosing => "browser_closing",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
