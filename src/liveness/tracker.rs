//! The dampening state machine.
//!
//! Converts a noisy stream of boolean check results into a stable,
//! hysteresis-gated status. A target flips status only after `threshold`
//! consecutive same-polarity results; a single opposite result anywhere in
//! the run resets the streak entirely.

use std::fmt;

/// Dampened status of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Alive,
    Dead,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Alive => write!(f, "alive"),
            Status::Dead => write!(f, "dead"),
        }
    }
}

/// A confirmed status crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Status,
    pub to: Status,
}

/// What a single update produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// No observable change.
    NoChange,
    /// A success streak is building toward resurrection while the target is
    /// still considered dead. Observability only; carries no state change.
    Dampening { successes: u32 },
    /// The dampened status flipped. Emitted exactly once per crossing.
    Transition(Transition),
}

/// Per-target dampening state machine.
///
/// Exclusively owned by the monitor task bound to one target. Starts
/// optimistically `Alive`.
#[derive(Debug)]
pub struct LivenessTracker {
    status: Status,
    consecutive_failures: u32,
    consecutive_successes: u32,
    threshold: u32,
}

impl LivenessTracker {
    /// `threshold` is the number of consecutive same-polarity results needed
    /// to flip status, in either direction. A threshold of 1 disables
    /// dampening. Must be at least 1 (enforced by config validation).
    pub fn new(threshold: u32) -> Self {
        Self {
            status: Status::Alive,
            consecutive_failures: 0,
            consecutive_successes: 0,
            threshold,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Consume one check result.
    ///
    /// The opposite-polarity counter is zeroed before the matching counter
    /// advances, so the two are never simultaneously nonzero.
    pub fn update(&mut self, alive: bool) -> Update {
        if alive {
            self.consecutive_failures = 0;

            match self.status {
                Status::Alive => {
                    self.consecutive_successes = 0;
                    Update::NoChange
                }
                Status::Dead => {
                    self.consecutive_successes += 1;
                    if self.consecutive_successes >= self.threshold {
                        self.consecutive_successes = 0;
                        self.status = Status::Alive;
                        Update::Transition(Transition {
                            from: Status::Dead,
                            to: Status::Alive,
                        })
                    } else {
                        Update::Dampening {
                            successes: self.consecutive_successes,
                        }
                    }
                }
            }
        } else {
            self.consecutive_successes = 0;
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);

            if self.status == Status::Alive && self.consecutive_failures >= self.threshold {
                self.consecutive_failures = 0;
                self.status = Status::Dead;
                Update::Transition(Transition {
                    from: Status::Alive,
                    to: Status::Dead,
                })
            } else {
                // Already dead, or the failure streak is still below the
                // threshold. Failure-side dampening is silent.
                Update::NoChange
            }
        }
    }

    #[cfg(test)]
    fn counters(&self) -> (u32, u32) {
        (self.consecutive_failures, self.consecutive_successes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transitions(tracker: &mut LivenessTracker, outcomes: &[bool]) -> Vec<Transition> {
        outcomes
            .iter()
            .filter_map(|&alive| match tracker.update(alive) {
                Update::Transition(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn starts_alive() {
        let tracker = LivenessTracker::new(3);
        assert_eq!(tracker.status(), Status::Alive);
    }

    #[test]
    fn counters_are_never_simultaneously_nonzero() {
        let mut tracker = LivenessTracker::new(4);
        let outcomes = [
            true, false, false, true, false, false, false, false, true, true, false, true,
        ];
        for alive in outcomes {
            tracker.update(alive);
            let (failures, successes) = tracker.counters();
            assert!(
                failures == 0 || successes == 0,
                "both counters nonzero: failures={failures} successes={successes}"
            );
        }
    }

    #[test]
    fn single_success_fully_resets_failure_streak() {
        let mut tracker = LivenessTracker::new(3);
        // threshold - 1 failures, then one success
        tracker.update(false);
        tracker.update(false);
        tracker.update(true);

        assert_eq!(tracker.status(), Status::Alive);
        assert_eq!(tracker.counters(), (0, 0));

        // A fresh full streak is still required afterwards.
        assert_eq!(tracker.update(false), Update::NoChange);
        assert_eq!(tracker.update(false), Update::NoChange);
        assert_eq!(
            tracker.update(false),
            Update::Transition(Transition {
                from: Status::Alive,
                to: Status::Dead,
            })
        );
    }

    #[test]
    fn exactly_threshold_failures_flip_to_dead_once() {
        let mut tracker = LivenessTracker::new(3);
        assert_eq!(tracker.update(false), Update::NoChange);
        assert_eq!(tracker.update(false), Update::NoChange);
        let update = tracker.update(false);
        assert_eq!(
            update,
            Update::Transition(Transition {
                from: Status::Alive,
                to: Status::Dead,
            })
        );
        assert_eq!(tracker.status(), Status::Dead);
    }

    #[test]
    fn resurrection_takes_exactly_threshold_successes() {
        let mut tracker = LivenessTracker::new(3);
        transitions(&mut tracker, &[false, false, false]);
        assert_eq!(tracker.status(), Status::Dead);

        // Symmetric: exactly threshold successes, not threshold + 1.
        assert_eq!(tracker.update(true), Update::Dampening { successes: 1 });
        assert_eq!(tracker.update(true), Update::Dampening { successes: 2 });
        assert_eq!(
            tracker.update(true),
            Update::Transition(Transition {
                from: Status::Dead,
                to: Status::Alive,
            })
        );
        assert_eq!(tracker.status(), Status::Alive);
    }

    #[test]
    fn latched_status_is_idempotent() {
        let mut tracker = LivenessTracker::new(2);
        let events = transitions(&mut tracker, &[false, false, false, false, false]);
        assert_eq!(events.len(), 1);
        assert_eq!(tracker.status(), Status::Dead);

        let mut tracker = LivenessTracker::new(2);
        let events = transitions(&mut tracker, &[true, true, true, true]);
        assert!(events.is_empty());
        assert_eq!(tracker.status(), Status::Alive);
    }

    #[test]
    fn failure_interrupts_resurrection_streak() {
        let mut tracker = LivenessTracker::new(3);
        transitions(&mut tracker, &[false, false, false]);

        tracker.update(true);
        tracker.update(true);
        tracker.update(false);
        assert_eq!(tracker.status(), Status::Dead);

        // The interrupted streak starts over from zero.
        assert_eq!(tracker.update(true), Update::Dampening { successes: 1 });
    }

    #[test]
    fn scenario_a_one_event_at_third_failure() {
        let mut tracker = LivenessTracker::new(3);
        let outcomes = [true, true, false, false, false, true];

        let mut events = Vec::new();
        for (index, alive) in outcomes.into_iter().enumerate() {
            if let Update::Transition(t) = tracker.update(alive) {
                events.push((index, t));
            }
        }

        assert_eq!(
            events,
            vec![(
                4, // the third consecutive failure
                Transition {
                    from: Status::Alive,
                    to: Status::Dead,
                }
            )]
        );
        // The trailing lone success is a streak of 1 < 3: still dead.
        assert_eq!(tracker.status(), Status::Dead);
    }

    #[test]
    fn scenario_b_threshold_one_is_no_dampening() {
        let mut tracker = LivenessTracker::new(1);
        assert_eq!(
            tracker.update(false),
            Update::Transition(Transition {
                from: Status::Alive,
                to: Status::Dead,
            })
        );
        assert_eq!(
            tracker.update(true),
            Update::Transition(Transition {
                from: Status::Dead,
                to: Status::Alive,
            })
        );
    }
}
