//! Timer-driven playback engine
//!
//! The player owns a trace and advances a cursor through it on a deadline
//! schedule. Each tick consumes at most one step; the next deadline is
//! measured from the moment the current step was delivered, so a slow
//! frame never causes a burst of catch-up steps. Deadlines are tagged
//! with a generation counter and a reset or restart invalidates every
//! deadline issued before it.

use super::{Step, Trace};
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

pub const MIN_DELAY_MS: u64 = 100;
pub const MAX_DELAY_MS: u64 = 3000;
pub const DEFAULT_DELAY_MS: u64 = 800;
pub const DELAY_STEP_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Running,
    Paused,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// A run was started with a trace containing no steps.
    EmptyTrace,
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::EmptyTrace => write!(f, "cannot play an empty trace"),
        }
    }
}

impl Error for PlaybackError {}

#[derive(Debug)]
pub struct Player {
    trace: Option<Trace>,
    cursor: usize,
    state: PlaybackState,
    delay: Duration,
    /// Next time a step is due, tagged with the generation that armed it.
    deadline: Option<(u64, Instant)>,
    generation: u64,
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Player {
            trace: None,
            cursor: 0,
            state: PlaybackState::Idle,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            deadline: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay.as_millis() as u64
    }

    /// Set the inter-step delay, clamped to the supported range. Takes
    /// effect when the next deadline is armed; an already-armed deadline
    /// is left to fire on its old schedule.
    pub fn set_delay_ms(&mut self, ms: u64) {
        let ms = ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS);
        self.delay = Duration::from_millis(ms);
    }

    pub fn speed_up(&mut self) {
        self.set_delay_ms(self.delay_ms().saturating_sub(DELAY_STEP_MS));
    }

    pub fn slow_down(&mut self) {
        self.set_delay_ms(self.delay_ms() + DELAY_STEP_MS);
    }

    /// Begin playing a freshly generated trace. Replaces any previous
    /// trace and arms the first deadline immediately, so the first step
    /// is delivered on the first tick at or after `now`.
    pub fn start(&mut self, trace: Trace, now: Instant) -> Result<(), PlaybackError> {
        if trace.is_empty() {
            return Err(PlaybackError::EmptyTrace);
        }
        self.generation += 1;
        self.trace = Some(trace);
        self.cursor = 0;
        self.state = PlaybackState::Running;
        self.deadline = Some((self.generation, now));
        Ok(())
    }

    /// Deliver the next step if its deadline has passed. Returns `None`
    /// when not running, when the deadline is still in the future, or
    /// when a stale deadline from before a reset fires.
    pub fn tick(&mut self, now: Instant) -> Option<&Step> {
        if self.state != PlaybackState::Running {
            return None;
        }
        let (generation, due) = self.deadline?;
        if generation != self.generation || now < due {
            return None;
        }
        self.advance(now)
    }

    /// Deliver the next step immediately, regardless of deadlines. Works
    /// while running or paused; pausing first keeps the schedule quiet.
    pub fn step_once(&mut self, now: Instant) -> Option<&Step> {
        match self.state {
            PlaybackState::Running | PlaybackState::Paused => self.advance(now),
            _ => None,
        }
    }

    fn advance(&mut self, now: Instant) -> Option<&Step> {
        let trace = self.trace.as_ref()?;
        if self.cursor >= trace.len() {
            return None;
        }
        let index = self.cursor;
        self.cursor += 1;
        if self.cursor == trace.len() {
            self.state = PlaybackState::Done;
            self.deadline = None;
        } else if self.state == PlaybackState::Running {
            // Next deadline counts from delivery, not from the previous deadline.
            self.deadline = Some((self.generation, now + self.delay));
        }
        self.trace.as_ref().map(|t| &t.steps[index])
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Paused;
            self.deadline = None;
        }
    }

    /// Resume from a pause. The next step becomes due one full delay
    /// after `now`.
    pub fn resume(&mut self, now: Instant) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Running;
            self.deadline = Some((self.generation, now + self.delay));
        }
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.state {
            PlaybackState::Running => self.pause(),
            PlaybackState::Paused => self.resume(now),
            _ => {}
        }
    }

    /// Discard the trace and return to idle. Safe to call in any state,
    /// any number of times; the speed setting survives.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.trace = None;
        self.cursor = 0;
        self.state = PlaybackState::Idle;
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{Algorithm, Event, Outcome, Step, Trace};

    fn toy_trace(n: usize) -> Trace {
        let mut steps: Vec<Step> = (0..n.saturating_sub(1))
            .map(|i| Step::new(format!("step {}", i), Event::Done(Outcome::Finished), None))
            .collect();
        steps.push(Step::new("done", Event::Done(Outcome::Finished), None));
        Trace { algorithm: Algorithm::BubbleSort, steps, code: &[] }
    }

    #[test]
    fn refuses_empty_trace() {
        let mut player = Player::new();
        let empty = Trace { algorithm: Algorithm::BubbleSort, steps: vec![], code: &[] };
        assert_eq!(player.start(empty, Instant::now()), Err(PlaybackError::EmptyTrace));
        assert_eq!(player.state(), PlaybackState::Idle);
    }

    #[test]
    fn ticks_follow_deadlines() {
        let mut player = Player::new();
        player.set_delay_ms(100);
        let t0 = Instant::now();
        player.start(toy_trace(3), t0).unwrap();

        // first step is due immediately
        assert!(player.tick(t0).is_some());
        assert_eq!(player.cursor(), 1);
        // second step not due until one delay after the first delivery
        assert!(player.tick(t0 + Duration::from_millis(50)).is_none());
        assert!(player.tick(t0 + Duration::from_millis(100)).is_some());
        assert!(player.tick(t0 + Duration::from_millis(200)).is_some());
        assert_eq!(player.state(), PlaybackState::Done);
        // done means no further delivery, ever
        assert!(player.tick(t0 + Duration::from_millis(10_000)).is_none());
    }

    #[test]
    fn pause_freezes_and_resume_rearms() {
        let mut player = Player::new();
        player.set_delay_ms(100);
        let t0 = Instant::now();
        player.start(toy_trace(3), t0).unwrap();
        assert!(player.tick(t0).is_some());

        player.pause();
        assert!(player.tick(t0 + Duration::from_millis(500)).is_none());
        assert_eq!(player.cursor(), 1);

        let t1 = t0 + Duration::from_millis(600);
        player.resume(t1);
        assert!(player.tick(t1 + Duration::from_millis(99)).is_none());
        assert!(player.tick(t1 + Duration::from_millis(100)).is_some());
    }

    #[test]
    fn reset_is_idempotent_and_cancels_deadlines() {
        let mut player = Player::new();
        let t0 = Instant::now();
        player.start(toy_trace(2), t0).unwrap();
        player.reset();
        player.reset();
        assert_eq!(player.state(), PlaybackState::Idle);
        assert_eq!(player.cursor(), 0);
        assert!(player.trace().is_none());
        assert!(player.tick(t0 + Duration::from_millis(10_000)).is_none());
    }

    #[test]
    fn restart_invalidates_old_schedule() {
        let mut player = Player::new();
        player.set_delay_ms(3000);
        let t0 = Instant::now();
        player.start(toy_trace(5), t0).unwrap();
        assert!(player.tick(t0).is_some());

        // restart with a new trace; the old 3s deadline must not deliver
        // a step from the new trace early
        player.set_delay_ms(100);
        player.start(toy_trace(5), t0 + Duration::from_millis(10)).unwrap();
        assert_eq!(player.cursor(), 0);
        assert!(player.tick(t0 + Duration::from_millis(10)).is_some());
        assert_eq!(player.cursor(), 1);
    }

    #[test]
    fn delay_is_clamped() {
        let mut player = Player::new();
        player.set_delay_ms(1);
        assert_eq!(player.delay_ms(), MIN_DELAY_MS);
        player.set_delay_ms(1_000_000);
        assert_eq!(player.delay_ms(), MAX_DELAY_MS);
    }

    #[test]
    fn step_once_works_while_paused() {
        let mut player = Player::new();
        let t0 = Instant::now();
        player.start(toy_trace(3), t0).unwrap();
        player.pause();
        assert!(player.step_once(t0).is_some());
        assert_eq!(player.cursor(), 1);
        assert_eq!(player.state(), PlaybackState::Paused);
    }
}
