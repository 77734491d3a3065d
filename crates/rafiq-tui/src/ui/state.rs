//! Self-contained state machines used by the views.

use std::time::Instant;

use rafiq_core::models::profile::{validate_submission, ProfileRejection};
use rafiq_core::models::{Gender, UserProfile};

// =============================================================================
// Text input
// =============================================================================

/// Minimal single-line text input: append at the end, backspace, take.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub value: String,
}

impl TextField {
    pub fn handle_char(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Trimmed contents, replacing the field with empty.
    pub fn take(&mut self) -> String {
        let out = self.value.trim().to_string();
        self.value.clear();
        out
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

// =============================================================================
// Focus timer
// =============================================================================

pub const FOCUS_SECS: u32 = 25 * 60;
pub const BREAK_SECS: u32 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusCompletion {
    /// A focus block finished; a break is queued.
    SessionComplete,
    /// A break finished; back to focus.
    BackToFocus,
}

/// Pomodoro timer: 25 minutes of focus, 5 of break. Completing either phase
/// stops the timer and arms the other phase.
#[derive(Debug)]
pub struct FocusTimer {
    pub remaining: u32,
    pub active: bool,
    pub is_break: bool,
    last_tick: Option<Instant>,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self {
            remaining: FOCUS_SECS,
            active: false,
            is_break: false,
            last_tick: None,
        }
    }
}

impl FocusTimer {
    pub fn toggle(&mut self) {
        self.active = !self.active;
        self.last_tick = None;
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.is_break = false;
        self.remaining = FOCUS_SECS;
        self.last_tick = None;
    }

    fn phase_total(&self) -> u32 {
        if self.is_break {
            BREAK_SECS
        } else {
            FOCUS_SECS
        }
    }

    /// Fraction of the current phase still remaining, in [0, 1].
    pub fn progress(&self) -> f64 {
        self.remaining as f64 / self.phase_total() as f64
    }

    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }

    /// Advance the timer. Call on every runtime tick with the current
    /// instant; whole elapsed seconds are consumed.
    pub fn on_tick(&mut self, now: Instant) -> Option<FocusCompletion> {
        if !self.active {
            return None;
        }
        let last = match self.last_tick {
            Some(last) => last,
            None => {
                self.last_tick = Some(now);
                return None;
            }
        };

        let elapsed = now.duration_since(last).as_secs() as u32;
        if elapsed == 0 {
            return None;
        }
        self.last_tick = Some(last + std::time::Duration::from_secs(elapsed as u64));
        self.remaining = self.remaining.saturating_sub(elapsed);

        if self.remaining > 0 {
            return None;
        }

        let completion = if self.is_break {
            FocusCompletion::BackToFocus
        } else {
            FocusCompletion::SessionComplete
        };
        self.is_break = !self.is_break;
        self.remaining = self.phase_total();
        self.active = false;
        self.last_tick = None;
        Some(completion)
    }
}

// =============================================================================
// Onboarding form
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardField {
    Name,
    Gender,
    Dob,
    Location,
}

impl OnboardField {
    pub fn next(&self) -> Self {
        match self {
            OnboardField::Name => OnboardField::Gender,
            OnboardField::Gender => OnboardField::Dob,
            OnboardField::Dob => OnboardField::Location,
            OnboardField::Location => OnboardField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            OnboardField::Name => OnboardField::Location,
            OnboardField::Gender => OnboardField::Name,
            OnboardField::Dob => OnboardField::Gender,
            OnboardField::Location => OnboardField::Dob,
        }
    }
}

/// The first-run identity form. DOB and missing-field validation happen on
/// submit; location plausibility is validated asynchronously afterwards.
#[derive(Debug)]
pub struct OnboardingForm {
    pub name: TextField,
    pub gender: usize,
    pub dob: TextField,
    pub location: TextField,
    pub focus: OnboardField,
    pub error: Option<String>,
    pub validating: bool,
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self {
            name: TextField::default(),
            gender: 0,
            dob: TextField::default(),
            location: TextField::default(),
            focus: OnboardField::Name,
            error: None,
            validating: false,
        }
    }
}

impl OnboardingForm {
    pub fn handle_char(&mut self, c: char) {
        match self.focus {
            OnboardField::Name => self.name.handle_char(c),
            OnboardField::Dob => self.dob.handle_char(c),
            OnboardField::Location => self.location.handle_char(c),
            OnboardField::Gender => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            OnboardField::Name => self.name.backspace(),
            OnboardField::Dob => self.dob.backspace(),
            OnboardField::Location => self.location.backspace(),
            OnboardField::Gender => {}
        }
    }

    pub fn cycle_gender(&mut self) {
        self.gender = (self.gender + 1) % Gender::ALL.len();
    }

    /// Run the synchronous checks and build the profile. The caller follows
    /// up with the async location validation before committing.
    pub fn build(&mut self) -> Result<UserProfile, ProfileRejection> {
        self.error = None;
        validate_submission(&self.name.value, &self.dob.value, &self.location.value)?;
        Ok(UserProfile {
            name: self.name.value.trim().to_string(),
            gender: Gender::ALL[self.gender],
            dob: self.dob.value.trim().to_string(),
            location: self.location.value.trim().to_string(),
            onboarded: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn focus_timer_counts_down_whole_seconds() {
        let mut timer = FocusTimer::default();
        timer.toggle();
        let t0 = Instant::now();
        assert!(timer.on_tick(t0).is_none());
        assert!(timer.on_tick(t0 + Duration::from_millis(400)).is_none());
        assert_eq!(timer.remaining, FOCUS_SECS);
        timer.on_tick(t0 + Duration::from_secs(3));
        assert_eq!(timer.remaining, FOCUS_SECS - 3);
    }

    #[test]
    fn focus_completion_arms_a_break() {
        let mut timer = FocusTimer::default();
        timer.remaining = 2;
        timer.toggle();
        let t0 = Instant::now();
        timer.on_tick(t0);
        let done = timer.on_tick(t0 + Duration::from_secs(2));
        assert_eq!(done, Some(FocusCompletion::SessionComplete));
        assert!(timer.is_break);
        assert!(!timer.active);
        assert_eq!(timer.remaining, BREAK_SECS);
    }

    #[test]
    fn break_completion_returns_to_focus() {
        let mut timer = FocusTimer::default();
        timer.is_break = true;
        timer.remaining = 1;
        timer.toggle();
        let t0 = Instant::now();
        timer.on_tick(t0);
        let done = timer.on_tick(t0 + Duration::from_secs(1));
        assert_eq!(done, Some(FocusCompletion::BackToFocus));
        assert!(!timer.is_break);
        assert_eq!(timer.remaining, FOCUS_SECS);
    }

    #[test]
    fn reset_restores_the_focus_phase() {
        let mut timer = FocusTimer::default();
        timer.is_break = true;
        timer.remaining = 17;
        timer.active = true;
        timer.reset();
        assert!(!timer.active);
        assert!(!timer.is_break);
        assert_eq!(timer.remaining, FOCUS_SECS);
    }

    #[test]
    fn onboarding_build_enforces_the_dob_floor() {
        let mut form = OnboardingForm::default();
        form.name.value = "Bilal".into();
        form.dob.value = "1949-06-01".into();
        form.location.value = "Makkah, Saudi Arabia".into();
        assert_eq!(form.build(), Err(ProfileRejection::DobTooEarly));

        form.dob.value = "1950-01-01".into();
        let profile = form.build().unwrap();
        assert!(profile.onboarded);
        assert_eq!(profile.name, "Bilal");
    }
}
