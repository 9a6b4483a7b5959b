// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optimistic on/off state after a command.
//!
//! A steam generator takes a while to report the state it was just told to
//! enter. After a command, the [`TransitionSmoother`] reports the commanded
//! state instead of the polled one until its window runs out.

use std::time::Duration;

use tokio::time::Instant;

/// How long a commanded state overrides the polled one.
pub const TRANSITION_WINDOW: Duration = Duration::from_secs(10);

/// Tracks the most recent on/off command for a short window.
///
/// # Examples
///
/// ```
/// use steamist_lib::TransitionSmoother;
///
/// let mut smoother = TransitionSmoother::new();
/// assert!(!smoother.is_active(false));
///
/// smoother.arm(true);
/// assert!(smoother.is_active(false));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionSmoother {
    pending_state: bool,
    expires_at: Option<Instant>,
}

impl TransitionSmoother {
    /// Creates a smoother that has never been armed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a commanded state for [`TRANSITION_WINDOW`].
    pub fn arm(&mut self, state: bool) {
        self.arm_for(state, TRANSITION_WINDOW);
    }

    /// Records a commanded state for a custom window.
    pub fn arm_for(&mut self, state: bool, window: Duration) {
        self.pending_state = state;
        self.expires_at = Some(Instant::now() + window);
        tracing::debug!(
            state,
            window_secs = window.as_secs_f64(),
            "Armed transition window"
        );
    }

    /// Returns whether the commanded state is still overriding polls.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Instant::now() < expires_at)
    }

    /// Returns the commanded state while the window is open.
    #[must_use]
    pub fn pending_state(&self) -> Option<bool> {
        self.is_transitioning().then_some(self.pending_state)
    }

    /// Resolves the active flag to report for a polled value.
    #[must_use]
    pub fn is_active(&self, polled: bool) -> bool {
        self.pending_state().unwrap_or(polled)
    }
}
