#![allow(dead_code)]

use cadence_core::{
    models::{GoalType, NewGoal, NewPlan, TaxonomyKind, TaxonomyRef, WeekMask},
    Database, Scheduler, SchedulerBuilder,
};
use jiff::civil::{date, Date};
use tempfile::{NamedTempFile, TempDir};

/// Monday 2030-01-07, the first day of every test plan.
pub const START: Date = date(2030, 1, 7);

/// Helper function to create a test scheduler
pub async fn create_test_scheduler() -> (TempDir, Scheduler) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let scheduler = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create scheduler");
    (temp_dir, scheduler)
}

/// Helper function to create a temporary database
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

/// Four hours a day on weekdays, open-ended.
pub fn weekday_plan(title: &str) -> NewPlan {
    NewPlan {
        student_id: "student-1".to_string(),
        title: title.to_string(),
        hours_per_day: 4.0,
        availability: WeekMask::WEEKDAYS,
        start_date: START,
        end_date: None,
    }
}

/// Adds Mathematics > Algebra > Quadratics and returns a reference to the
/// subject.
pub fn seed_taxonomy(db: &mut Database) -> TaxonomyRef {
    let discipline = db
        .add_taxonomy_node(TaxonomyKind::Discipline, "Mathematics", None)
        .expect("Failed to add discipline");
    let subject = db
        .add_taxonomy_node(TaxonomyKind::Subject, "Algebra", Some(discipline.id))
        .expect("Failed to add subject");
    db.add_taxonomy_node(TaxonomyKind::Topic, "Quadratics", Some(subject.id))
        .expect("Failed to add topic");
    TaxonomyRef {
        discipline_id: discipline.id,
        subject_id: subject.id,
        topic_id: None,
    }
}

pub fn study(taxonomy: TaxonomyRef, planned_minutes: u32) -> NewGoal {
    NewGoal {
        goal_type: GoalType::Study,
        taxonomy,
        planned_minutes,
        guidance: None,
        fixed: false,
    }
}
