//! RefreshMetabolicProfileHandler - Command handler for recomputing BMR/TDEE.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::domain::foundation::UserId;
use crate::domain::metabolic::{
    MetabolicCalculator, MetabolicError, MetabolicProfile, DEFAULT_VALIDITY_DAYS,
};
use crate::ports::{Clock, MetabolicProfileStore, ProfileProvider};

/// Command to bring a user's metabolic profile up to date.
#[derive(Debug, Clone)]
pub struct RefreshMetabolicProfileCommand {
    pub user_id: UserId,
}

/// The profile in effect after the refresh.
#[derive(Debug, Clone)]
pub struct RefreshMetabolicProfileResult {
    pub profile: MetabolicProfile,
    /// True when a new profile was computed and stored.
    pub recalculated: bool,
}

/// Handler for refreshing metabolic profiles.
pub struct RefreshMetabolicProfileHandler {
    profiles: Arc<dyn ProfileProvider>,
    metabolic_profiles: Arc<dyn MetabolicProfileStore>,
    clock: Arc<dyn Clock>,
    calculator: MetabolicCalculator,
    validity_days: i64,
}

impl RefreshMetabolicProfileHandler {
    pub fn new(
        profiles: Arc<dyn ProfileProvider>,
        metabolic_profiles: Arc<dyn MetabolicProfileStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            metabolic_profiles,
            clock,
            calculator: MetabolicCalculator::default(),
            validity_days: DEFAULT_VALIDITY_DAYS,
        }
    }

    /// Applies the recalculation threshold and validity window from config.
    pub fn with_engine_config(mut self, config: &EngineConfig) -> Self {
        self.calculator = config.metabolic_calculator();
        self.validity_days = config.metabolic_validity_days;
        self
    }

    #[tracing::instrument(skip(self), fields(user_id = %cmd.user_id))]
    pub async fn handle(
        &self,
        cmd: RefreshMetabolicProfileCommand,
    ) -> Result<RefreshMetabolicProfileResult, MetabolicError> {
        // 1. Load physiological attributes
        let physiology = self
            .profiles
            .get(&cmd.user_id)
            .await?
            .ok_or_else(|| MetabolicError::user_not_found(cmd.user_id.clone()))?;

        // 2. Estimate; missing attributes mean nothing can be stored
        let estimate = self
            .calculator
            .estimate(&physiology)
            .ok_or_else(|| MetabolicError::insufficient_profile_data(cmd.user_id.clone()))?;

        // 3. Keep the stored profile unless it expired or drifted
        let now = self.clock.now();
        if let Some(existing) = self.metabolic_profiles.get_current(&cmd.user_id).await? {
            if !self.calculator.needs_recalculation(&existing, &estimate, now) {
                debug!(profile_id = %existing.id(), "metabolic profile still current");
                return Ok(RefreshMetabolicProfileResult {
                    profile: existing,
                    recalculated: false,
                });
            }
        }

        // 4. Persist the replacement
        let profile =
            MetabolicProfile::with_validity(cmd.user_id, estimate, now, self.validity_days);
        self.metabolic_profiles.put(&profile).await?;

        info!(
            profile_id = %profile.id(),
            bmr = profile.bmr(),
            tdee = profile.tdee(),
            "metabolic profile recalculated"
        );

        Ok(RefreshMetabolicProfileResult {
            profile,
            recalculated: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryMetabolicProfileStore, InMemoryProfileProvider};
    use crate::adapters::FixedClock;
    use crate::application::handlers::test_support::{complete_profile, noon, user};
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::profile::{PhysiologicalAttributes, UserPhysiologicalProfile};
    use async_trait::async_trait;

    struct Fixture {
        profiles: Arc<InMemoryProfileProvider>,
        store: Arc<InMemoryMetabolicProfileStore>,
        clock: Arc<FixedClock>,
        handler: RefreshMetabolicProfileHandler,
    }

    fn fixture() -> Fixture {
        let profiles = Arc::new(InMemoryProfileProvider::new());
        let store = Arc::new(InMemoryMetabolicProfileStore::new());
        let clock = Arc::new(FixedClock::new(noon(2024, 5, 1)));
        let handler =
            RefreshMetabolicProfileHandler::new(profiles.clone(), store.clone(), clock.clone());
        Fixture {
            profiles,
            store,
            clock,
            handler,
        }
    }

    fn command() -> RefreshMetabolicProfileCommand {
        RefreshMetabolicProfileCommand { user_id: user() }
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let f = fixture();
        let err = f.handler.handle(command()).await.unwrap_err();
        assert_eq!(err, MetabolicError::UserNotFound(user()));
        assert_eq!(f.store.count().await, 0);
    }

    #[tokio::test]
    async fn incomplete_profile_reports_insufficient_data() {
        let f = fixture();
        let partial = UserPhysiologicalProfile::try_new(
            user(),
            PhysiologicalAttributes {
                weight_kg: Some(75.0),
                ..Default::default()
            },
        )
        .unwrap();
        f.profiles.insert(partial).await;

        let err = f.handler.handle(command()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InsufficientProfileData);
    }

    #[tokio::test]
    async fn first_refresh_stores_profile() {
        let f = fixture();
        f.profiles.insert(complete_profile(75.0)).await;

        let result = f.handler.handle(command()).await.unwrap();

        assert!(result.recalculated);
        assert!((result.profile.bmr() - 1698.75).abs() < 1e-9);
        assert_eq!(*result.profile.valid_until(), noon(2024, 5, 1).add_days(30));
        assert_eq!(f.store.count().await, 1);
    }

    #[tokio::test]
    async fn unchanged_profile_is_kept() {
        let f = fixture();
        f.profiles.insert(complete_profile(75.0)).await;
        let first = f.handler.handle(command()).await.unwrap();

        f.clock.advance_days(5);
        let second = f.handler.handle(command()).await.unwrap();

        assert!(!second.recalculated);
        assert_eq!(second.profile.id(), first.profile.id());
        assert_eq!(f.store.count().await, 1);
    }

    #[tokio::test]
    async fn drift_beyond_threshold_recalculates() {
        let f = fixture();
        f.profiles.insert(complete_profile(75.0)).await;
        f.handler.handle(command()).await.unwrap();

        // 75 -> 90 kg moves BMR by 150 kcal, well over 5 %
        f.profiles.insert(complete_profile(90.0)).await;
        let result = f.handler.handle(command()).await.unwrap();

        assert!(result.recalculated);
        assert_eq!(f.store.count().await, 2);
    }

    #[tokio::test]
    async fn expired_profile_recalculates() {
        let f = fixture();
        f.profiles.insert(complete_profile(75.0)).await;
        f.handler.handle(command()).await.unwrap();

        f.clock.set(noon(2024, 5, 31));
        let result = f.handler.handle(command()).await.unwrap();

        assert!(result.recalculated);
    }

    #[tokio::test]
    async fn custom_validity_window_applies() {
        let f = fixture();
        f.profiles.insert(complete_profile(75.0)).await;
        let config = EngineConfig {
            metabolic_validity_days: 7,
            ..EngineConfig::default()
        };
        let handler = f.handler.with_engine_config(&config);

        let result = handler.handle(command()).await.unwrap();
        assert_eq!(*result.profile.valid_until(), noon(2024, 5, 1).add_days(7));
    }

    struct FailingStore;

    #[async_trait]
    impl MetabolicProfileStore for FailingStore {
        async fn get_current(
            &self,
            _user_id: &UserId,
        ) -> Result<Option<MetabolicProfile>, DomainError> {
            Err(DomainError::database("Simulated read failure"))
        }

        async fn put(&self, _profile: &MetabolicProfile) -> Result<(), DomainError> {
            Ok(())
        }

        async fn history(&self, _user_id: &UserId) -> Result<Vec<MetabolicProfile>, DomainError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let profiles = Arc::new(InMemoryProfileProvider::new());
        profiles.insert(complete_profile(75.0)).await;
        let handler = RefreshMetabolicProfileHandler::new(
            profiles,
            Arc::new(FailingStore),
            Arc::new(FixedClock::new(noon(2024, 5, 1))),
        );

        let err = handler.handle(command()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
