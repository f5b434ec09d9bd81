//! The focus-session countdown state machine.
//!
//! The machine itself is pure: the tick source (the TUI event loop) calls
//! `tick` once per second while the session is running, and the caller
//! performs the completion write-back when a transition into `Completed` is
//! observed. The session value's lifetime is exactly the session screen's,
//! so no tick or write can outlive the screen.

/// Session lifecycle. A session starts directly in `Running`; `Completed`
/// and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Paused,
    Completed,
    Cancelled,
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One second elapsed, session still running.
    Decremented,
    /// The countdown reached zero on this tick; the session is now
    /// `Completed` and the caller must perform the write-back.
    Finished,
    /// The session was not running; nothing happened.
    Skipped,
}

/// A single countdown session against one task.
#[derive(Debug, Clone)]
pub struct FocusSession {
    task_id: u64,
    time_left: u32,
    state: SessionState,
}

impl FocusSession {
    /// Starts a session with `focus_minutes * 60` seconds on the clock.
    pub fn start(task_id: u64, focus_minutes: u32) -> FocusSession {
        FocusSession {
            task_id,
            time_left: focus_minutes * 60,
            state: SessionState::Running,
        }
    }

    pub fn task_id(&self) -> u64 {
        self.task_id
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, SessionState::Completed | SessionState::Cancelled)
    }

    /// Advances the countdown by one second.
    ///
    /// A tick that would reach zero completes the session instead of letting
    /// `time_left` go negative, and does so exactly once: further ticks are
    /// skipped because the state is terminal.
    pub fn tick(&mut self) -> Tick {
        if !self.is_running() {
            return Tick::Skipped;
        }
        if self.time_left <= 1 {
            self.time_left = 0;
            self.state = SessionState::Completed;
            Tick::Finished
        } else {
            self.time_left -= 1;
            Tick::Decremented
        }
    }

    /// Stops the countdown, preserving `time_left` exactly.
    pub fn pause(&mut self) {
        if self.is_running() {
            self.state = SessionState::Paused;
        }
    }

    /// Resumes from a pause; ticking continues from the preserved value.
    pub fn resume(&mut self) {
        if self.is_paused() {
            self.state = SessionState::Running;
        }
    }

    /// Reloads the clock from the (re-fetched) focus duration and leaves the
    /// session paused; it never auto-resumes after a reset.
    pub fn reset(&mut self, focus_minutes: u32) {
        if self.is_terminal() {
            return;
        }
        self.time_left = focus_minutes * 60;
        self.state = SessionState::Paused;
    }

    /// Abandons the session. No write-back occurs.
    pub fn cancel(&mut self) {
        if !self.is_terminal() {
            self.state = SessionState::Cancelled;
        }
    }

    /// Explicit "complete session" action from any non-terminal state.
    pub fn complete(&mut self) {
        if !self.is_terminal() {
            self.state = SessionState::Completed;
        }
    }
}

/// Renders seconds as `MM:SS`, zero-padded. Minutes roll past 59 unbounded;
/// there is no hour component.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_completes_exactly_once() {
        let mut s = FocusSession {
            task_id: 1,
            time_left: 5,
            state: SessionState::Running,
        };
        for _ in 0..4 {
            assert_eq!(s.tick(), Tick::Decremented);
        }
        assert_eq!(s.time_left(), 1);
        assert_eq!(s.tick(), Tick::Finished);
        assert_eq!(s.state(), SessionState::Completed);
        assert_eq!(s.time_left(), 0);
        // a sixth tick must not fire completion again
        assert_eq!(s.tick(), Tick::Skipped);
        assert_eq!(s.time_left(), 0);
    }

    #[test]
    fn pause_and_resume_preserve_time_left() {
        let mut s = FocusSession {
            task_id: 7,
            time_left: 100,
            state: SessionState::Running,
        };
        for _ in 0..10 {
            s.tick();
        }
        s.pause();
        assert_eq!(s.time_left(), 90);
        // ticks while paused are ignored
        assert_eq!(s.tick(), Tick::Skipped);
        assert_eq!(s.time_left(), 90);
        s.resume();
        assert!(s.is_running());
        assert_eq!(s.time_left(), 90);
        assert_eq!(s.tick(), Tick::Decremented);
        assert_eq!(s.time_left(), 89);
    }

    #[test]
    fn reset_reloads_duration_and_pauses() {
        let mut s = FocusSession::start(3, 25);
        for _ in 0..42 {
            s.tick();
        }
        s.reset(30);
        assert_eq!(s.time_left(), 30 * 60);
        assert!(s.is_paused());
        // no auto tick until resume
        assert_eq!(s.tick(), Tick::Skipped);
        s.resume();
        assert_eq!(s.tick(), Tick::Decremented);
    }

    #[test]
    fn reset_from_paused_is_allowed() {
        let mut s = FocusSession::start(3, 25);
        s.pause();
        s.reset(25);
        assert!(s.is_paused());
        assert_eq!(s.time_left(), 1500);
    }

    #[test]
    fn cancel_is_terminal_without_write() {
        let mut s = FocusSession::start(3, 25);
        s.cancel();
        assert_eq!(s.state(), SessionState::Cancelled);
        assert_eq!(s.tick(), Tick::Skipped);
        // terminal states cannot be resurrected
        s.resume();
        s.reset(25);
        s.complete();
        assert_eq!(s.state(), SessionState::Cancelled);
    }

    #[test]
    fn explicit_complete_from_paused() {
        let mut s = FocusSession::start(3, 25);
        s.pause();
        s.complete();
        assert_eq!(s.state(), SessionState::Completed);
    }

    #[test]
    fn default_duration_is_1500_seconds() {
        let s = FocusSession::start(3, 25);
        assert_eq!(s.time_left(), 1500);
    }

    #[test]
    fn time_formats_as_mm_ss() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(9), "00:09");
        assert_eq!(format_time(90), "01:30");
        assert_eq!(format_time(1500), "25:00");
        // minutes roll unbounded, no hour component
        assert_eq!(format_time(3900), "65:00");
    }
}
