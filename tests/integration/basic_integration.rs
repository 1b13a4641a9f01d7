/// Basic integration tests
use chrono::NaiveDate;
use tempfile::NamedTempFile;
use triptailor_goals::*;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_server_basic_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = GoalTrackerServer::new(temp_file.path().to_path_buf(), OwnerId::new("user-1"))
            .expect("Failed to create server");

        // Verify the server exposes its storage and bound owner
        let _storage = server.storage();
        assert_eq!(server.owner().as_str(), "user-1");
    }

    #[test]
    fn test_database_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let owner = OwnerId::new("user-1");

        // Create a goal and toggle a completion through the first connection
        let goal = {
            let storage = SqliteStorage::new(db_path.clone()).expect("Failed to create storage");
            let goal = Goal::new(
                owner.clone(),
                "Drink water".to_string(),
                Cadence::Daily,
                date(2024, 1, 1),
            )
            .expect("Failed to create goal");
            storage.create_goal(&goal).expect("Failed to save goal");
            storage
                .set_completion(&owner, &goal.id, date(2024, 1, 2), true)
                .expect("Failed to set completion");
            goal
        };

        // A second connection to the same file sees the persisted state
        let storage = SqliteStorage::new(db_path).expect("Failed to reopen storage");
        let loaded = storage.get_goal(&owner, &goal.id).expect("Goal not persisted");
        assert_eq!(loaded.name, "Drink water");
        assert_eq!(loaded.completions, vec![date(2024, 1, 2)]);
    }

    #[test]
    fn test_storage_interface() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage =
            SqliteStorage::new(temp_file.path().to_path_buf()).expect("Failed to create storage");

        // Storage is usable through the GoalStore trait object
        let store: &dyn GoalStore = &storage;
        assert!(store.list_goals(&OwnerId::new("user-1")).unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_to_progress_pipeline() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage =
            SqliteStorage::new(temp_file.path().to_path_buf()).expect("Failed to create storage");
        let owner = OwnerId::new("user-1");

        let goal = Goal::new(
            owner.clone(),
            "Stretch".to_string(),
            Cadence::Daily,
            date(2024, 1, 1),
        )
        .expect("Failed to create goal");
        storage.create_goal(&goal).expect("Failed to save goal");
        for day in [date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)] {
            storage
                .set_completion(&owner, &goal.id, day, true)
                .expect("Failed to set completion");
        }

        // The stored snapshot feeds the pure engine directly
        let snapshot = storage.list_goals(&owner).expect("Failed to list goals");
        let stats = summary(&snapshot, date(2024, 1, 3));
        assert_eq!(stats.total_goals, 1);
        assert_eq!(stats.total_completions, 3);
        assert_eq!(stats.best_streak, 3);

        let buckets =
            completions_per_bucket(&snapshot, date(2024, 1, 1), date(2024, 1, 7), Granularity::Day)
                .expect("Failed to bucketize");
        assert_eq!(buckets.len(), 7);
        let total: u32 = buckets.iter().map(|b| b.completions).sum();
        assert_eq!(total, 3);
    }
}
