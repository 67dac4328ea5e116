//! In-memory application state and its persistence synchronizer.
//!
//! `AppState` owns the daily log collection (keyed by date, so the
//! one-log-per-date invariant is structural) and the user profile. Mutations
//! update memory first and enqueue a write to a background writer task;
//! callers never wait on storage, and reads are consistent immediately.

use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::{DailyLog, MealEntry, ProfileUpdate, UserProfile};
use crate::storage::{BlobStore, DAILY_LOGS_KEY, USER_PROFILE_KEY};

const WRITE_RETRY_DELAY: Duration = Duration::from_millis(250);

enum PersistJob {
    Logs(Vec<DailyLog>),
    Profile(UserProfile),
}

pub struct AppState {
    logs: BTreeMap<NaiveDate, DailyLog>,
    profile: UserProfile,
    tx: Option<mpsc::UnboundedSender<PersistJob>>,
    writer: Option<JoinHandle<()>>,
}

impl AppState {
    /// Loads logs and profile concurrently, substituting defaults for absent
    /// or unreadable blobs, and starts the background persistence writer.
    /// One key failing to load never blocks the other.
    pub async fn init(store: Arc<dyn BlobStore>) -> Self {
        let (logs, profile) = tokio::join!(load_logs(store.as_ref()), load_profile(store.as_ref()));

        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_writer(store, rx));

        Self {
            logs,
            profile,
            tx: Some(tx),
            writer: Some(writer),
        }
    }

    /// Today's log, or a fresh zeroed one if nothing has been recorded yet.
    /// The fresh log is NOT inserted into the collection; pure reads must not
    /// accumulate ghost empty records. Insertion happens only on mutation.
    pub fn today_log(&self) -> DailyLog {
        let date = today();
        self.logs
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DailyLog::empty(date))
    }

    /// All stored logs in date order.
    pub fn logs(&self) -> impl Iterator<Item = &DailyLog> {
        self.logs.values()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Appends a meal entry to today's log, recomputing the nutrition total,
    /// and enqueues persistence of the whole collection. Entries are keyed by
    /// generated id, so repeated identical meals stay distinct ledger lines.
    pub fn add_meal(&mut self, entry: MealEntry) {
        let updated = self.today_log().with_meal(entry);
        self.logs.insert(updated.date, updated);
        self.persist_logs();
    }

    /// Adds water to today's log. Returns false (and changes nothing) for
    /// non-positive or non-finite amounts; water intake is increment-only.
    pub fn add_water(&mut self, amount_ml: f64) -> bool {
        if !amount_ml.is_finite() || amount_ml <= 0.0 {
            warn!(amount_ml, "rejecting non-positive water amount");
            return false;
        }

        let updated = self.today_log().with_water(amount_ml);
        self.logs.insert(updated.date, updated);
        self.persist_logs();
        true
    }

    /// Shallow-merges the update into the profile and enqueues persistence.
    /// A supplied goals object replaces the current one wholesale.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        self.profile = self.profile.clone().apply(update);
        self.send(PersistJob::Profile(self.profile.clone()));
    }

    fn persist_logs(&self) {
        self.send(PersistJob::Logs(self.logs.values().cloned().collect()));
    }

    fn send(&self, job: PersistJob) {
        if let Some(tx) = &self.tx {
            if tx.send(job).is_err() {
                warn!("persistence writer is gone, dropping write");
            }
        }
    }

    /// Closes the persistence channel and waits for queued writes to land.
    /// A short-lived CLI process must call this before exit.
    pub async fn shutdown(mut self) {
        self.tx.take();
        if let Some(writer) = self.writer.take() {
            let _ = writer.await;
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

async fn load_logs(store: &dyn BlobStore) -> BTreeMap<NaiveDate, DailyLog> {
    match store.get(DAILY_LOGS_KEY).await {
        Ok(Some(blob)) => match serde_json::from_str::<Vec<DailyLog>>(&blob) {
            Ok(logs) => logs.into_iter().map(|log| (log.date, log)).collect(),
            Err(e) => {
                warn!(error = %e, "malformed daily logs, starting empty");
                BTreeMap::new()
            }
        },
        Ok(None) => BTreeMap::new(),
        Err(e) => {
            warn!(error = %e, "failed to load daily logs, starting empty");
            BTreeMap::new()
        }
    }
}

async fn load_profile(store: &dyn BlobStore) -> UserProfile {
    match store.get(USER_PROFILE_KEY).await {
        Ok(Some(blob)) => match serde_json::from_str(&blob) {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "malformed profile, using seed profile");
                UserProfile::seed()
            }
        },
        Ok(None) => UserProfile::seed(),
        Err(e) => {
            warn!(error = %e, "failed to load profile, using seed profile");
            UserProfile::seed()
        }
    }
}

async fn run_writer(store: Arc<dyn BlobStore>, mut rx: mpsc::UnboundedReceiver<PersistJob>) {
    while let Some(job) = rx.recv().await {
        let (key, payload) = match serialize_job(&job) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!(error = %e, "failed to serialize persistence job");
                continue;
            }
        };
        write_with_retry(store.as_ref(), key, &payload).await;
    }
}

fn serialize_job(job: &PersistJob) -> Result<(&'static str, String), serde_json::Error> {
    match job {
        PersistJob::Logs(logs) => Ok((DAILY_LOGS_KEY, serde_json::to_string(logs)?)),
        PersistJob::Profile(profile) => Ok((USER_PROFILE_KEY, serde_json::to_string(profile)?)),
    }
}

/// Writes are never surfaced to the caller: one retry after a short delay,
/// then the failure is logged and the write dropped.
async fn write_with_retry(store: &dyn BlobStore, key: &str, payload: &str) {
    match store.set(key, payload).await {
        Ok(()) => debug!(key, "persisted"),
        Err(first) => {
            warn!(key, error = %first, "persistence write failed, retrying");
            tokio::time::sleep(WRITE_RETRY_DELAY).await;
            if let Err(second) = store.set(key, payload).await {
                warn!(key, error = %second, "persistence write failed again, dropping");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodItem, MealType, NutritionInfo, UserGoals};
    use crate::storage::MemoryStore;

    const EPSILON: f64 = 1e-9;

    fn apple() -> FoodItem {
        FoodItem::new(
            "apple",
            "Apple",
            "1 medium",
            NutritionInfo::new(95.0, 0.5, 25.0, 0.3),
            "fruit",
        )
    }

    async fn fresh_state() -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::init(store.clone()).await;
        (state, store)
    }

    #[tokio::test]
    async fn test_init_empty_store_uses_defaults() {
        let (state, _store) = fresh_state().await;
        assert_eq!(state.logs().count(), 0);
        assert_eq!(state.profile(), &UserProfile::seed());
    }

    #[tokio::test]
    async fn test_today_log_read_does_not_insert() {
        let (state, _store) = fresh_state().await;
        let log = state.today_log();
        assert!(log.meals.is_empty());
        assert_eq!(state.logs().count(), 0);
    }

    #[tokio::test]
    async fn test_add_meal_apple_scenario() {
        let (mut state, _store) = fresh_state().await;
        state.add_meal(MealEntry::new(apple(), 2.0, MealType::Snack));

        let total = state.today_log().total_nutrition;
        assert!((total.calories - 190.0).abs() < EPSILON);
        assert!((total.protein - 1.0).abs() < EPSILON);
        assert!((total.carbs - 50.0).abs() < EPSILON);
        assert!((total.fat - 0.6).abs() < EPSILON);
        assert!(total.fiber_grams().abs() < EPSILON);
    }

    #[tokio::test]
    async fn test_add_meal_appends_and_keeps_total_invariant() {
        let (mut state, _store) = fresh_state().await;
        state.add_meal(MealEntry::new(apple(), 1.0, MealType::Breakfast));
        let entry = MealEntry::new(apple(), 3.0, MealType::Lunch);
        let entry_id = entry.id;
        state.add_meal(entry);

        let log = state.today_log();
        assert_eq!(log.meals.len(), 2);
        assert_eq!(log.meals[1].id, entry_id);
        assert_eq!(
            log.total_nutrition,
            NutritionInfo::aggregate(&log.meals),
            "total must equal the aggregate of the meal list"
        );
    }

    #[tokio::test]
    async fn test_identical_meals_stay_distinct() {
        let (mut state, _store) = fresh_state().await;
        state.add_meal(MealEntry::new(apple(), 1.0, MealType::Snack));
        state.add_meal(MealEntry::new(apple(), 1.0, MealType::Snack));

        let log = state.today_log();
        assert_eq!(log.meals.len(), 2);
        assert_ne!(log.meals[0].id, log.meals[1].id);
    }

    #[tokio::test]
    async fn test_add_water_accumulates() {
        let (mut state, _store) = fresh_state().await;
        assert!(state.add_water(250.0));
        assert!(state.add_water(250.0));
        assert_eq!(state.today_log().water_intake, 500.0);
    }

    #[tokio::test]
    async fn test_add_water_rejects_invalid_amounts() {
        let (mut state, _store) = fresh_state().await;
        assert!(state.add_water(100.0));
        assert!(!state.add_water(0.0));
        assert!(!state.add_water(-50.0));
        assert!(!state.add_water(f64::NAN));
        assert_eq!(state.today_log().water_intake, 100.0);
    }

    #[tokio::test]
    async fn test_mutations_keep_one_record_per_date() {
        let (mut state, store) = fresh_state().await;
        state.add_meal(MealEntry::new(apple(), 1.0, MealType::Breakfast));
        state.add_water(250.0);
        state.add_meal(MealEntry::new(apple(), 2.0, MealType::Dinner));
        state.shutdown().await;

        let blob = store.get(DAILY_LOGS_KEY).await.unwrap().unwrap();
        let persisted: Vec<DailyLog> = serde_json::from_str(&blob).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].meals.len(), 2);
        assert_eq!(persisted[0].water_intake, 250.0);
    }

    #[tokio::test]
    async fn test_state_roundtrips_through_store() {
        let store = Arc::new(MemoryStore::new());

        let mut state = AppState::init(store.clone()).await;
        state.add_meal(MealEntry::new(apple(), 2.0, MealType::Lunch));
        state.add_water(500.0);
        state.update_profile(ProfileUpdate {
            name: Some("Deniz".to_string()),
            ..Default::default()
        });
        let expected_log = state.today_log();
        let expected_profile = state.profile().clone();
        state.shutdown().await;

        let reloaded = AppState::init(store).await;
        assert_eq!(reloaded.today_log(), expected_log);
        assert_eq!(reloaded.profile(), &expected_profile);
    }

    #[tokio::test]
    async fn test_malformed_blobs_fall_back_to_defaults() {
        let store = Arc::new(MemoryStore::new());
        store.insert(DAILY_LOGS_KEY, "not json");
        store.insert(USER_PROFILE_KEY, "{\"broken\":");

        let state = AppState::init(store).await;
        assert_eq!(state.logs().count(), 0);
        assert_eq!(state.profile(), &UserProfile::seed());
    }

    #[tokio::test]
    async fn test_one_malformed_key_does_not_block_the_other() {
        let store = Arc::new(MemoryStore::new());
        store.insert(DAILY_LOGS_KEY, "garbage");
        let profile = UserProfile::seed().apply(ProfileUpdate {
            name: Some("Kept".to_string()),
            ..Default::default()
        });
        store.insert(
            USER_PROFILE_KEY,
            &serde_json::to_string(&profile).unwrap(),
        );

        let state = AppState::init(store).await;
        assert_eq!(state.logs().count(), 0);
        assert_eq!(state.profile().name, "Kept");
    }

    #[tokio::test]
    async fn test_update_profile_replaces_goals_and_persists() {
        let (mut state, store) = fresh_state().await;
        let goals = UserGoals {
            daily_calories: 1800.0,
            ..UserGoals::default()
        };
        state.update_profile(ProfileUpdate {
            goals: Some(goals.clone()),
            ..Default::default()
        });
        assert_eq!(state.profile().goals, goals);
        assert_eq!(state.profile().name, "User");
        state.shutdown().await;

        let blob = store.get(USER_PROFILE_KEY).await.unwrap().unwrap();
        let persisted: UserProfile = serde_json::from_str(&blob).unwrap();
        assert_eq!(persisted.goals.daily_calories, 1800.0);
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed_and_retried() {
        struct FlakyStore {
            inner: MemoryStore,
            failures: std::sync::atomic::AtomicUsize,
        }

        #[async_trait::async_trait]
        impl BlobStore for FlakyStore {
            async fn get(&self, key: &str) -> Result<Option<String>, crate::storage::StorageError> {
                self.inner.get(key).await
            }

            async fn set(&self, key: &str, value: &str) -> Result<(), crate::storage::StorageError> {
                use std::sync::atomic::Ordering;
                if self.failures.load(Ordering::SeqCst) > 0 {
                    self.failures.fetch_sub(1, Ordering::SeqCst);
                    return Err(crate::storage::StorageError::Io(
                        std::path::PathBuf::from(key),
                        std::io::Error::new(std::io::ErrorKind::Other, "flaky"),
                    ));
                }
                self.inner.set(key, value).await
            }
        }

        let store = Arc::new(FlakyStore {
            inner: MemoryStore::new(),
            failures: std::sync::atomic::AtomicUsize::new(1),
        });

        let mut state = AppState::init(store.clone()).await;
        state.add_water(250.0);
        state.shutdown().await;

        // First attempt failed, the retry landed; the caller never saw it.
        let blob = store.inner.get(DAILY_LOGS_KEY).await.unwrap();
        assert!(blob.is_some());
    }
}
