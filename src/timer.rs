//! Restartable countdown advanced by the simulation `dt`.
//!
//! Owners drive every timer themselves, once per tick.  `update` reports the
//! expiry so the owner can react to it on its own state; an optional
//! `on_expire` hook covers side effects that do not need the owner (sounds,
//! counters held by the caller).

use std::fmt;

pub type ExpireHook = Box<dyn FnMut()>;

pub struct Timer {
    duration: f32,
    elapsed: f32,
    active: bool,
    repeating: bool,
    on_expire: Option<ExpireHook>,
}

impl Timer {
    /// An inactive one-shot timer lasting `duration` seconds.
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
            active: false,
            repeating: false,
            on_expire: None,
        }
    }

    pub fn repeating(mut self) -> Self {
        self.repeating = true;
        self
    }

    pub fn with_hook(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_expire = Some(Box::new(hook));
        self
    }

    /// Builder form of [`Timer::activate`].
    pub fn started(mut self) -> Self {
        self.activate();
        self
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.elapsed = 0.0;
    }

    /// Cancel without firing the hook.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
    }

    /// Advance by `dt`.  Returns `true` on the tick the timer expires; a
    /// repeating timer restarts from zero so it fires at most once per call.
    ///
    /// Time past the deadline is dropped on restart, so when `dt` does not
    /// divide the period a repeating timer drifts late: a 0.5 s period
    /// stepped at 0.3 s fires every 0.6 s.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed < self.duration {
            return false;
        }
        if let Some(hook) = self.on_expire.as_mut() {
            hook();
        }
        if self.repeating {
            self.activate();
        } else {
            self.deactivate();
        }
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// A cooldown is ready exactly when its timer is not running.
    pub fn is_ready(&self) -> bool {
        !self.active
    }

    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn remaining(&self) -> f32 {
        if self.active {
            self.duration - self.elapsed
        } else {
            0.0
        }
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("active", &self.active)
            .field("repeating", &self.repeating)
            .field("has_hook", &self.on_expire.is_some())
            .finish()
    }
}
