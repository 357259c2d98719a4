//! SubscriptionPoller - bounded reconciliation poll after checkout returns.
//!
//! The payment webhook lands on its own schedule, so after the user comes
//! back from the hosted checkout page the profile is re-read on a fixed
//! interval until the upgrade shows up or the attempt budget runs out.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::foundation::UserId;
use crate::ports::{Delay, ProfileReader};

/// Poll pacing. Defaults give a one-minute window.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Pause between attempts.
    pub interval: Duration,
    /// Total number of profile reads before giving up.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 12,
        }
    }
}

/// Terminal outcome of a poll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The subscription flag flipped within the window.
    Active,
    /// The window elapsed without confirmation; the webhook may still land.
    Pending,
}

/// Polls the stored profile for subscription activation.
pub struct SubscriptionPoller {
    profiles: Arc<dyn ProfileReader>,
    delay: Arc<dyn Delay>,
    config: PollConfig,
}

impl SubscriptionPoller {
    pub fn new(profiles: Arc<dyn ProfileReader>, delay: Arc<dyn Delay>, config: PollConfig) -> Self {
        Self {
            profiles,
            delay,
            config,
        }
    }

    /// Runs the bounded poll. Transient read failures consume an attempt
    /// and the loop keeps going; this never returns an error and never
    /// runs past the attempt budget.
    pub async fn poll(&self, user_id: &UserId) -> PollOutcome {
        for attempt in 1..=self.config.max_attempts {
            match self.profiles.find_by_user_id(user_id).await {
                Ok(Some(profile)) if profile.pro_subscription_active => {
                    debug!(%user_id, attempt, "subscription confirmed active");
                    return PollOutcome::Active;
                }
                Ok(_) => {
                    debug!(%user_id, attempt, "subscription not yet active");
                }
                Err(e) => {
                    warn!(%user_id, attempt, error = %e, "profile poll failed, retrying");
                }
            }

            if attempt < self.config.max_attempts {
                self.delay.sleep(self.config.interval).await;
            }
        }

        PollOutcome::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::foundation::{DomainError, Timestamp};
    use crate::domain::session::UserProfile;

    /// Returns each queued result in order, repeating the last one.
    struct SequencedProfiles {
        results: Mutex<Vec<Result<Option<UserProfile>, DomainError>>>,
        calls: Mutex<u32>,
    }

    impl SequencedProfiles {
        fn new(results: Vec<Result<Option<UserProfile>, DomainError>>) -> Self {
            Self {
                results: Mutex::new(results),
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ProfileReader for SequencedProfiles {
        async fn find_by_user_id(
            &self,
            _user_id: &UserId,
        ) -> Result<Option<UserProfile>, DomainError> {
            *self.calls.lock().unwrap() += 1;
            let mut results = self.results.lock().unwrap();
            if results.len() > 1 {
                results.remove(0)
            } else {
                results[0].clone()
            }
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<UserProfile>, DomainError> {
            Ok(None)
        }
    }

    struct InstantDelay {
        sleeps: Mutex<u32>,
    }

    impl InstantDelay {
        fn new() -> Self {
            Self {
                sleeps: Mutex::new(0),
            }
        }

        fn sleep_count(&self) -> u32 {
            *self.sleeps.lock().unwrap()
        }
    }

    #[async_trait]
    impl Delay for InstantDelay {
        async fn sleep(&self, _duration: Duration) {
            *self.sleeps.lock().unwrap() += 1;
        }
    }

    fn user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    fn inactive_profile() -> UserProfile {
        UserProfile::minimal(user_id(), "t@school.example")
    }

    fn active_profile() -> UserProfile {
        let mut profile = inactive_profile();
        profile.pro_subscription_active = true;
        profile.subscription_expires_at = Some(Timestamp::now().add_days(30));
        profile
    }

    fn poller(
        profiles: Arc<SequencedProfiles>,
        delay: Arc<InstantDelay>,
        max_attempts: u32,
    ) -> SubscriptionPoller {
        SubscriptionPoller::new(
            profiles,
            delay,
            PollConfig {
                interval: Duration::from_secs(5),
                max_attempts,
            },
        )
    }

    #[tokio::test]
    async fn stops_immediately_when_already_active() {
        let profiles = Arc::new(SequencedProfiles::new(vec![Ok(Some(active_profile()))]));
        let delay = Arc::new(InstantDelay::new());
        let p = poller(profiles.clone(), delay.clone(), 12);

        let outcome = p.poll(&user_id()).await;

        assert_eq!(outcome, PollOutcome::Active);
        assert_eq!(profiles.call_count(), 1);
        assert_eq!(delay.sleep_count(), 0);
    }

    #[tokio::test]
    async fn becomes_active_partway_through_the_window() {
        let profiles = Arc::new(SequencedProfiles::new(vec![
            Ok(Some(inactive_profile())),
            Ok(Some(inactive_profile())),
            Ok(Some(active_profile())),
        ]));
        let delay = Arc::new(InstantDelay::new());
        let p = poller(profiles.clone(), delay.clone(), 12);

        let outcome = p.poll(&user_id()).await;

        assert_eq!(outcome, PollOutcome::Active);
        assert_eq!(profiles.call_count(), 3);
        assert_eq!(delay.sleep_count(), 2);
    }

    #[tokio::test]
    async fn exhausted_window_is_pending() {
        let profiles = Arc::new(SequencedProfiles::new(vec![Ok(Some(inactive_profile()))]));
        let delay = Arc::new(InstantDelay::new());
        let p = poller(profiles.clone(), delay.clone(), 12);

        let outcome = p.poll(&user_id()).await;

        assert_eq!(outcome, PollOutcome::Pending);
        assert_eq!(profiles.call_count(), 12);
        // No sleep after the final attempt.
        assert_eq!(delay.sleep_count(), 11);
    }

    #[tokio::test]
    async fn read_failures_consume_attempts_without_aborting() {
        let profiles = Arc::new(SequencedProfiles::new(vec![
            Err(DomainError::database("connection refused")),
            Err(DomainError::database("connection refused")),
            Ok(Some(active_profile())),
        ]));
        let delay = Arc::new(InstantDelay::new());
        let p = poller(profiles.clone(), delay.clone(), 12);

        let outcome = p.poll(&user_id()).await;

        assert_eq!(outcome, PollOutcome::Active);
        assert_eq!(profiles.call_count(), 3);
    }

    #[tokio::test]
    async fn missing_profile_rows_count_as_not_active() {
        let profiles = Arc::new(SequencedProfiles::new(vec![Ok(None)]));
        let delay = Arc::new(InstantDelay::new());
        let p = poller(profiles.clone(), delay.clone(), 3);

        let outcome = p.poll(&user_id()).await;

        assert_eq!(outcome, PollOutcome::Pending);
        assert_eq!(profiles.call_count(), 3);
    }

    #[cfg(test)]
    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// The poll always terminates within the attempt budget,
            /// whatever mix of results the reader produces.
            #[test]
            fn poll_is_bounded_by_max_attempts(
                max_attempts in 1u32..=20,
                outcomes in proptest::collection::vec(0u8..3, 1..25),
            ) {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .unwrap();
                rt.block_on(async move {
                    let results = outcomes
                        .into_iter()
                        .map(|o| match o {
                            0 => Ok(Some(inactive_profile())),
                            1 => Ok(None),
                            _ => Err(DomainError::database("flaky")),
                        })
                        .collect();
                    let profiles = Arc::new(SequencedProfiles::new(results));
                    let delay = Arc::new(InstantDelay::new());
                    let p = poller(profiles.clone(), delay, max_attempts);

                    let outcome = p.poll(&user_id()).await;

                    prop_assert_eq!(outcome, PollOutcome::Pending);
                    prop_assert!(profiles.call_count() <= max_attempts);
                    Ok(())
                })?;
            }
        }
    }
}
