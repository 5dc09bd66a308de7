use std::time::{Duration, Instant};

/// How long the completion overlay stays up.
pub const CELEBRATION_DURATION: Duration = Duration::from_secs(3);

/// One-shot overlay shown after a task is completed.
///
/// The event loop calls [`Celebration::tick`] every frame; the overlay
/// dismisses itself once the duration has elapsed. Tearing the dashboard
/// down calls [`Celebration::cancel`] so a stale overlay never outlives it.
#[derive(Debug, Clone, Default)]
pub struct Celebration {
    shown_at: Option<Instant>,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the overlay. Returns `false` if one is already pending, in which
    /// case its deadline is left alone.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.shown_at.is_some() {
            return false;
        }
        self.shown_at = Some(now);
        true
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(start) = self.shown_at {
            if now.saturating_duration_since(start) >= CELEBRATION_DURATION {
                self.shown_at = None;
            }
        }
    }

    pub fn cancel(&mut self) {
        self.shown_at = None;
    }

    pub fn is_visible(&self) -> bool {
        self.shown_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismisses_after_three_seconds() {
        let start = Instant::now();
        let mut c = Celebration::new();
        assert!(c.trigger(start));
        c.tick(start + Duration::from_millis(2999));
        assert!(c.is_visible());
        c.tick(start + CELEBRATION_DURATION);
        assert!(!c.is_visible());
    }

    #[test]
    fn second_trigger_while_pending_is_refused() {
        let start = Instant::now();
        let mut c = Celebration::new();
        assert!(c.trigger(start));
        assert!(!c.trigger(start + Duration::from_secs(2)));
        // Deadline still measured from the first trigger.
        c.tick(start + CELEBRATION_DURATION);
        assert!(!c.is_visible());
        assert!(c.trigger(start + Duration::from_secs(4)));
    }

    #[test]
    fn cancel_clears_pending_overlay() {
        let mut c = Celebration::new();
        c.trigger(Instant::now());
        c.cancel();
        assert!(!c.is_visible());
    }
}
