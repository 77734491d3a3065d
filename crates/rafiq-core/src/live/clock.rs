//! Playback scheduling for the live session.
//!
//! Buffers arrive at irregular intervals but must play back-to-back: each
//! buffer starts at the later of "now" and "the previous buffer's end".
//! Processing delay therefore never introduces a gap, and a burst of fast
//! arrivals queues up without overlap.

/// Monotonic playback clock. Times are seconds on whatever clock the caller
/// uses; only differences matter.
#[derive(Debug, Default)]
pub struct PlaybackClock {
    next_start: f64,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a buffer of `duration` seconds given the current clock time.
    /// Returns the start time the buffer must play at.
    pub fn schedule(&mut self, now: f64, duration: f64) -> f64 {
        let start = if now > self.next_start {
            now
        } else {
            self.next_start
        };
        self.next_start = start + duration;
        start
    }

    /// Seconds of audio queued beyond `now`. Zero when playback has drained.
    pub fn backlog(&self, now: f64) -> f64 {
        (self.next_start - now).max(0.0)
    }

    pub fn reset(&mut self) {
        self.next_start = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_arrivals_queue_back_to_back() {
        let mut clock = PlaybackClock::new();
        // Three buffers all arrive at t=1.0, each 0.5s long.
        let s1 = clock.schedule(1.0, 0.5);
        let s2 = clock.schedule(1.0, 0.5);
        let s3 = clock.schedule(1.0, 0.5);
        assert_eq!(s1, 1.0);
        assert_eq!(s2, 1.5);
        assert_eq!(s3, 2.0);
    }

    #[test]
    fn start_is_max_of_now_and_previous_end() {
        let mut clock = PlaybackClock::new();
        let s1 = clock.schedule(0.0, 1.0);
        // Arrives while s1 still playing: queued at its end.
        let s2 = clock.schedule(0.4, 1.0);
        // Arrives after the queue drained: plays immediately.
        let s3 = clock.schedule(5.0, 1.0);
        assert_eq!(s1, 0.0);
        assert_eq!(s2, 1.0);
        assert_eq!(s3, 5.0);
    }

    #[test]
    fn no_overlap_and_no_artificial_gap() {
        let mut clock = PlaybackClock::new();
        let arrivals = [(0.0, 0.3), (0.1, 0.2), (0.15, 0.4), (2.0, 0.1)];
        let mut prev_end: Option<f64> = None;
        for (now, dur) in arrivals {
            let start = clock.schedule(now, dur);
            if let Some(end) = prev_end {
                // Never overlaps the previous buffer.
                assert!(start >= end);
                // Never gaps unless the queue had drained.
                if now <= end {
                    assert_eq!(start, end);
                }
            }
            prev_end = Some(start + dur);
        }
    }

    #[test]
    fn backlog_reports_queued_audio() {
        let mut clock = PlaybackClock::new();
        clock.schedule(0.0, 2.0);
        assert!((clock.backlog(0.5) - 1.5).abs() < 1e-9);
        assert_eq!(clock.backlog(10.0), 0.0);
    }
}
