use std::time::Duration;

use super::geometry::Point;

/// The two named progress transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Disc grows from the winner until it covers the screen.
    Reveal,
    /// Disc shrinks back to nothing.
    Restart,
}

/// Durations of both transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealConfig {
    pub reveal_duration: Duration,
    pub restart_duration: Duration,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            reveal_duration: Duration::from_millis(2500),
            restart_duration: Duration::from_millis(1000),
        }
    }
}

/// Ask the animation collaborator to move progress from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    pub transition: Transition,
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

/// Owns the fill origin and progress and allows one transition at a time.
#[derive(Debug, Clone)]
pub struct RevealAnimator {
    config: RevealConfig,
    fill_origin: Point,
    progress: f64,
    in_flight: Option<Transition>,
}

impl RevealAnimator {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            fill_origin: Point::default(),
            progress: 0.0,
            in_flight: None,
        }
    }

    pub fn fill_origin(&self) -> Point {
        self.fill_origin
    }

    /// Last value set directly or reached by a completed transition.
    #[cfg(test)]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> Option<Transition> {
        self.in_flight
    }

    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Snap the disc to `origin` (center-relative) at zero size and grow it.
    pub fn begin_reveal(&mut self, origin: Point) -> Option<AnimationRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        self.fill_origin = origin;
        self.progress = 0.0;
        self.in_flight = Some(Transition::Reveal);
        Some(AnimationRequest {
            transition: Transition::Reveal,
            from: self.progress,
            to: 1.0,
            duration: self.config.reveal_duration,
        })
    }

    /// Snap the disc to full size and shrink it. Origin is kept.
    pub fn begin_restart(&mut self) -> Option<AnimationRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        self.progress = 1.0;
        self.in_flight = Some(Transition::Restart);
        Some(AnimationRequest {
            transition: Transition::Restart,
            from: self.progress,
            to: 0.0,
            duration: self.config.restart_duration,
        })
    }

    /// Accept a completion for the in-flight transition.
    /// Returns `false` for anything else, so each hook runs at most once.
    pub fn complete(&mut self, transition: Transition) -> bool {
        if self.in_flight != Some(transition) {
            return false;
        }
        self.in_flight = None;
        self.progress = match transition {
            Transition::Reveal => 1.0,
            Transition::Restart => 0.0,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_request_targets_full_coverage() {
        let mut anim = RevealAnimator::new(RevealConfig::default());
        let req = anim.begin_reveal(Point::new(-3.0, 4.0)).unwrap();

        assert_eq!(req.transition, Transition::Reveal);
        assert_eq!((req.from, req.to), (0.0, 1.0));
        assert_eq!(req.duration, Duration::from_millis(2500));
        assert_eq!(anim.fill_origin(), Point::new(-3.0, 4.0));
        assert!(anim.is_animating());
    }

    #[test]
    fn restart_request_targets_zero() {
        let mut anim = RevealAnimator::new(RevealConfig::default());
        anim.begin_reveal(Point::default());
        anim.complete(Transition::Reveal);

        let req = anim.begin_restart().unwrap();
        assert_eq!((req.from, req.to), (1.0, 0.0));
        assert_eq!(req.duration, Duration::from_millis(1000));
        assert_eq!(anim.in_flight(), Some(Transition::Restart));
    }

    #[test]
    fn only_one_transition_in_flight() {
        let mut anim = RevealAnimator::new(RevealConfig::default());
        anim.begin_reveal(Point::new(1.0, 1.0));

        assert!(anim.begin_restart().is_none());
        assert!(anim.begin_reveal(Point::new(9.0, 9.0)).is_none());
        assert_eq!(anim.fill_origin(), Point::new(1.0, 1.0));
        assert_eq!(anim.in_flight(), Some(Transition::Reveal));
    }

    #[test]
    fn completion_is_accepted_once() {
        let mut anim = RevealAnimator::new(RevealConfig::default());
        anim.begin_reveal(Point::default());

        assert!(!anim.complete(Transition::Restart));
        assert!(anim.complete(Transition::Reveal));
        assert!(!anim.complete(Transition::Reveal));
        assert_eq!(anim.progress(), 1.0);
        assert!(!anim.is_animating());
    }
}
