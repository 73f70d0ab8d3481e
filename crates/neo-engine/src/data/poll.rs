use crate::api::types::CelestialBody;
use crate::error::FeedError;

/// Timing and dedupe policy for re-fetching the asteroid feed.
///
/// The interval restarts when a poll completes, successful or not, so a slow
/// or failing endpoint is never hit more than once per interval. A result equal
/// to the last accepted list is dropped.
#[derive(Debug, Clone)]
pub struct Poller {
    interval_secs: f32,
    elapsed: f32,
    in_flight: bool,
    last: Option<Vec<CelestialBody>>,
}

impl Poller {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            interval_secs,
            elapsed: 0.0,
            in_flight: false,
            last: None,
        }
    }

    /// Record the list from the initial load so an identical first poll is skipped.
    pub fn prime(&mut self, initial: &[CelestialBody]) {
        self.last = Some(initial.to_vec());
        self.elapsed = 0.0;
    }

    /// Add elapsed host time. Returns true exactly when a poll should be started.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.in_flight {
            return false;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.interval_secs {
            self.elapsed = 0.0;
            self.in_flight = true;
            true
        } else {
            false
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Finish the in-flight poll. Returns the new list when it differs from the last one.
    pub fn complete(
        &mut self,
        result: Result<Vec<CelestialBody>, FeedError>,
    ) -> Option<Vec<CelestialBody>> {
        self.in_flight = false;
        self.elapsed = 0.0;
        match result {
            Err(e) => {
                log::warn!("asteroid poll failed, retrying in {}s: {e}", self.interval_secs);
                None
            }
            Ok(list) if self.last.as_ref() == Some(&list) => {
                log::info!("no new asteroid data, skipping update");
                None
            }
            Ok(list) => {
                self.last = Some(list.clone());
                Some(list)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moon() -> Vec<CelestialBody> {
        vec![CelestialBody::planet("Moon", 384_400.0, 3_474.0)]
    }

    #[test]
    fn fires_once_per_interval() {
        let mut poller = Poller::new(300.0);
        assert!(!poller.advance(299.0));
        assert!(poller.advance(1.0));
        assert!(poller.is_in_flight());
        // In flight: time does not count toward the next poll.
        assert!(!poller.advance(1_000.0));
        poller.complete(Ok(moon()));
        assert!(!poller.advance(299.0));
        assert!(poller.advance(1.0));
    }

    #[test]
    fn duplicate_results_are_dropped() {
        let mut poller = Poller::new(300.0);
        poller.prime(&moon());
        poller.advance(300.0);
        assert!(poller.complete(Ok(moon())).is_none());

        let mut changed = moon();
        changed[0].distance_km = 400_000.0;
        poller.advance(300.0);
        assert_eq!(poller.complete(Ok(changed.clone())), Some(changed.clone()));
        poller.advance(300.0);
        assert!(poller.complete(Ok(changed)).is_none());
    }

    #[test]
    fn failure_keeps_last_list_and_retries() {
        let mut poller = Poller::new(60.0);
        poller.prime(&moon());
        poller.advance(60.0);
        assert!(poller.complete(Err(FeedError::Network("offline".into()))).is_none());
        assert!(!poller.is_in_flight());
        assert!(poller.advance(60.0));
        assert!(poller.complete(Ok(moon())).is_none());
    }
}
