//! Minimal animation playback: one-shot clips with timed events.
//!
//! Looping activities never finish and carry no events.  A one-shot clip
//! fires each event once, when playback crosses its timestamp, and marks the
//! activity finished after `duration` seconds.

use ph_behavior::AnimEvent;
use ph_schedule::Activity;

/// A one-shot clip.
#[derive(Copy, Clone, Debug)]
pub struct Clip {
    pub duration: f32,
    /// `(seconds from start, event)` in ascending time order.
    pub events:   &'static [(f32, AnimEvent)],
}

const RANGE_ATTACK: Clip = Clip {
    duration: 1.5,
    events:   &[(0.0, AnimEvent::StartAttack), (0.9, AnimEvent::Thump)],
};

const LEAP: Clip = Clip {
    duration: 0.8,
    events:   &[(0.1, AnimEvent::HopBack)],
};

const DIE: Clip = Clip { duration: 1.0, events: &[] };

/// Clip for `activity`, or `None` when it loops.
pub fn clip(activity: Activity) -> Option<Clip> {
    match activity {
        Activity::RangeAttack1 => Some(RANGE_ATTACK),
        Activity::Leap         => Some(LEAP),
        Activity::Die          => Some(DIE),
        _                      => None,
    }
}

/// Playback cursor for one agent.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Playback {
    activity: Activity,
    elapsed:  f32,
    done:     bool,
}

impl Playback {
    /// Advance by `dt`.  Returns the events crossed and whether the clip
    /// has just finished.
    ///
    /// `restarted` is `true` when the agent's activity was re-requested
    /// since the last step (its finished flag was reset).
    pub fn step(&mut self, activity: Activity, restarted: bool, dt: f32) -> (Vec<AnimEvent>, bool) {
        if activity != self.activity || (self.done && restarted) {
            *self = Playback { activity, elapsed: 0.0, done: false };
        }
        let Some(clip) = clip(activity) else {
            return (Vec::new(), false);
        };
        if self.done {
            return (Vec::new(), false);
        }

        let from = self.elapsed;
        self.elapsed += dt;
        let events = clip
            .events
            .iter()
            .filter(|&&(t, _)| t >= from && t < self.elapsed)
            .map(|&(_, e)| e)
            .collect();
        if self.elapsed >= clip.duration {
            self.done = true;
        }
        (events, self.done)
    }
}
