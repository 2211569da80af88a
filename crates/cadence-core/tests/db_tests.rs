mod common;

use cadence_core::{
    engine::ScheduleConfig,
    models::{
        GoalFilter, GoalStatus, GoalType, ImportGoal, NewPlan, PlanChanges, PlanFilter,
        PlanStatus, TaxonomyKind, TaxonomyRef, WeekMask,
    },
    ConflictResolution, SchedulerError,
};
use common::{create_test_db, seed_taxonomy, study, weekday_plan, START};
use jiff::civil::date;

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());

    // reopening an initialized file is fine
    cadence_core::Database::new(temp_file.path()).expect("Failed to reopen database");
}

#[test]
fn test_create_and_list_plans() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan(&weekday_plan("Finals"))
        .expect("Failed to create plan");
    assert!(plan.id > 0);
    assert_eq!(plan.status, PlanStatus::Active);
    assert_eq!(plan.last_number_base, 0);

    let mut other = weekday_plan("Other student");
    other.student_id = "student-2".to_string();
    db.create_plan(&other).expect("Failed to create plan");

    let all = db
        .list_plans(&PlanFilter::default())
        .expect("Failed to list plans");
    assert_eq!(all.len(), 2);

    let mine = db
        .list_plans(&PlanFilter {
            student_id: Some("student-1".to_string()),
            status: None,
        })
        .expect("Failed to list plans");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Finals");
}

#[test]
fn test_create_plan_rejects_bad_hours() {
    let (_temp_file, mut db) = create_test_db();
    let plan = NewPlan {
        hours_per_day: 13.0,
        ..weekday_plan("Too long")
    };
    let err = db.create_plan(&plan).unwrap_err();
    assert!(err.is_validation());
    assert!(db.list_plans(&PlanFilter::default()).unwrap().is_empty());
}

#[test]
fn test_taxonomy_nesting_is_enforced() {
    let (_temp_file, mut db) = create_test_db();
    let taxonomy = seed_taxonomy(&mut db);

    let orphan = db.add_taxonomy_node(TaxonomyKind::Subject, "Geometry", None);
    assert!(orphan.is_err());

    let wrong_parent = db.add_taxonomy_node(
        TaxonomyKind::Topic,
        "Triangles",
        Some(taxonomy.discipline_id),
    );
    assert!(matches!(
        wrong_parent,
        Err(SchedulerError::InvalidInput { ref field, .. }) if field == "parent_id"
    ));

    assert_eq!(db.list_taxonomy_nodes().unwrap().len(), 3);
}

#[test]
fn test_place_goal_rejects_unknown_taxonomy() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan(&weekday_plan("Finals")).unwrap();
    let taxonomy = seed_taxonomy(&mut db);

    let bogus = TaxonomyRef {
        subject_id: 999,
        ..taxonomy
    };
    let err = db
        .place_goal(plan.id, study(bogus, 60), START, false, &ScheduleConfig::default())
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(db.count_goals(plan.id, GoalStatus::Pending).unwrap(), 0);
}

#[test]
fn test_place_goal_rejects_dates_outside_plan_and_paused_plans() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan(&weekday_plan("Finals")).unwrap();
    let taxonomy = seed_taxonomy(&mut db);
    let config = ScheduleConfig::default();

    let before_start = db.place_goal(plan.id, study(taxonomy, 60), date(2030, 1, 6), false, &config);
    assert!(before_start.unwrap_err().is_validation());

    db.update_plan(
        plan.id,
        &PlanChanges {
            status: Some(PlanStatus::Paused),
            ..Default::default()
        },
        START,
        &config,
    )
    .unwrap();
    let paused = db.place_goal(plan.id, study(taxonomy, 60), START, false, &config);
    assert!(paused.unwrap_err().is_validation());
}

#[test]
fn test_numbers_and_positions() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan(&weekday_plan("Finals")).unwrap();
    let taxonomy = seed_taxonomy(&mut db);
    let config = ScheduleConfig::default();

    let a = db.place_goal(plan.id, study(taxonomy, 60), date(2030, 1, 8), false, &config).unwrap();
    let b = db.place_goal(plan.id, study(taxonomy, 45), START, false, &config).unwrap();
    let c = db.place_goal(plan.id, study(taxonomy, 30), START, false, &config).unwrap();

    assert_eq!(a.goal.display_number(), "#001");
    assert_eq!(b.goal.display_number(), "#002");
    assert_eq!(c.goal.display_number(), "#003");
    assert_eq!((b.goal.position, c.goal.position), (1, 2));
    assert_eq!(db.get_plan(plan.id).unwrap().unwrap().last_number_base, 3);

    let by_number: Vec<u64> = db
        .list_goals_by_number(plan.id)
        .unwrap()
        .iter()
        .map(|goal| goal.id)
        .collect();
    assert_eq!(by_number, vec![a.goal.id, b.goal.id, c.goal.id]);

    let by_date: Vec<u64> = db
        .list_goals(plan.id, &GoalFilter::default())
        .unwrap()
        .iter()
        .map(|goal| goal.id)
        .collect();
    assert_eq!(by_date, vec![b.goal.id, c.goal.id, a.goal.id]);
}

#[test]
fn test_reorder_day() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan(&weekday_plan("Finals")).unwrap();
    let taxonomy = seed_taxonomy(&mut db);
    let config = ScheduleConfig::default();

    let ids: Vec<u64> = (0..3)
        .map(|_| {
            db.place_goal(plan.id, study(taxonomy, 30), START, false, &config)
                .unwrap()
                .goal
                .id
        })
        .collect();

    let reordered = db
        .reorder_day(plan.id, START, &[ids[2], ids[0], ids[1]])
        .expect("Failed to reorder");
    let order: Vec<(u64, u32)> = reordered.iter().map(|g| (g.id, g.position)).collect();
    assert_eq!(order, vec![(ids[2], 1), (ids[0], 2), (ids[1], 3)]);

    // missing goal
    assert!(db.reorder_day(plan.id, START, &[ids[0], ids[1]]).is_err());
    // duplicate goal
    assert!(db
        .reorder_day(plan.id, START, &[ids[0], ids[0], ids[1]])
        .is_err());
}

#[test]
fn test_moving_goal_compacts_source_day() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan(&weekday_plan("Finals")).unwrap();
    let taxonomy = seed_taxonomy(&mut db);
    let config = ScheduleConfig::default();

    let first = db.place_goal(plan.id, study(taxonomy, 30), START, false, &config).unwrap();
    let second = db.place_goal(plan.id, study(taxonomy, 30), START, false, &config).unwrap();

    let moved = db
        .reschedule_goal(first.goal.id, date(2030, 1, 9), false, &config)
        .expect("Failed to move goal");
    assert_eq!(moved.resolved_date(), date(2030, 1, 9));
    assert!(moved.conflict.is_none());

    let left = db.get_goal(second.goal.id).unwrap().unwrap();
    assert_eq!(left.position, 1);

    let log = db.list_redistributions(plan.id).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].entry.date_from, START);
    assert_eq!(log[0].entry.date_to, date(2030, 1, 9));
}

#[test]
fn test_forced_placement_overbooks_and_rebalance_moves_it() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan(&weekday_plan("Finals")).unwrap();
    let taxonomy = seed_taxonomy(&mut db);
    let config = ScheduleConfig::default();

    db.place_goal(plan.id, study(taxonomy, 200), START, false, &config).unwrap();
    let forced = db
        .place_goal(plan.id, study(taxonomy, 90), START, true, &config)
        .unwrap();
    assert_eq!(forced.resolved_date(), START);
    assert_eq!(
        forced.conflict.map(|c| c.resolution),
        Some(ConflictResolution::Forced)
    );

    let capacity = db.compute_capacity(plan.id, START).unwrap();
    assert_eq!(capacity.used, 290);
    assert_eq!(capacity.remaining, 0);
    assert!(capacity.is_overbooked());

    let report = db.rebalance_day(plan.id, START, &config).unwrap();
    assert_eq!(report.moves.len(), 1);
    assert_eq!(report.moves[0].goal_id, forced.goal.id);

    let again = db.rebalance_day(plan.id, START, &config).unwrap();
    assert!(again.is_noop());
    assert!(!db.compute_capacity(plan.id, START).unwrap().is_overbooked());
}

#[test]
fn test_fixed_goals_stay_put() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan(&weekday_plan("Finals")).unwrap();
    let taxonomy = seed_taxonomy(&mut db);
    let config = ScheduleConfig::default();

    let older = db.place_goal(plan.id, study(taxonomy, 120), START, false, &config).unwrap();
    let pinned = db.place_goal(plan.id, study(taxonomy, 120), START, false, &config).unwrap();
    db.set_goal_fixed(pinned.goal.id, true).unwrap();

    let update = db
        .update_plan(
            plan.id,
            &PlanChanges {
                hours_per_day: Some(2.0),
                ..Default::default()
            },
            START,
            &config,
        )
        .unwrap();

    assert_eq!(update.rebalance.moves.len(), 1);
    assert_eq!(update.rebalance.moves[0].goal_id, older.goal.id);
    assert_eq!(db.get_goal(pinned.goal.id).unwrap().unwrap().scheduled_date, START);
}

#[test]
fn test_no_room_before_plan_end_flags_goal() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db
        .create_plan(&NewPlan {
            hours_per_day: 1.0,
            end_date: Some(date(2030, 1, 8)),
            ..weekday_plan("Short")
        })
        .unwrap();
    let taxonomy = seed_taxonomy(&mut db);
    let config = ScheduleConfig::default();

    let first = db
        .place_goal(plan.id, study(taxonomy, 60), START, false, &config)
        .unwrap();
    db.place_goal(plan.id, study(taxonomy, 60), date(2030, 1, 8), false, &config).unwrap();

    let placement = db
        .place_goal(plan.id, study(taxonomy, 30), START, false, &config)
        .unwrap();
    assert_eq!(placement.resolved_date(), START);
    assert_eq!(
        placement.conflict.map(|c| c.resolution),
        Some(ConflictResolution::Flagged)
    );
    assert!(placement.goal.needs_review);
    assert!(!placement.warnings.is_empty());

    let flagged = db.list_goals(plan.id, &GoalFilter::flagged()).unwrap();
    assert_eq!(flagged.len(), 1);
    assert_eq!(db.plan_summary(plan.id).unwrap().flagged_goals, 1);

    // dropping the older goal frees the day, so the flag goes away
    db.omit_goal(first.goal.id, "covered in lecture").unwrap();
    let report = db.rebalance_day(plan.id, START, &config).unwrap();
    assert!(report.is_noop());
    assert!(db.list_goals(plan.id, &GoalFilter::flagged()).unwrap().is_empty());
    let goal = db.get_goal(placement.goal.id).unwrap().unwrap();
    assert_eq!(goal.scheduled_date, START);
}

#[test]
fn test_import_skips_duplicates_and_is_atomic() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan(&weekday_plan("Finals")).unwrap();
    let taxonomy = seed_taxonomy(&mut db);
    let config = ScheduleConfig::default();

    let rows = vec![
        ImportGoal {
            date: START,
            goal: study(taxonomy, 60),
        },
        ImportGoal {
            date: date(2030, 1, 8),
            goal: study(taxonomy, 60),
        },
        ImportGoal {
            date: START,
            goal: cadence_core::models::NewGoal {
                goal_type: GoalType::PracticeQuestions,
                ..study(taxonomy, 60)
            },
        },
    ];
    let report = db.import_goals(plan.id, rows.clone(), &config).unwrap();
    assert_eq!(report.placed.len(), 2);
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[0].date, date(2030, 1, 8));

    let again = db.import_goals(plan.id, rows, &config).unwrap();
    assert!(again.placed.is_empty());
    assert_eq!(again.duplicates.len(), 3);

    let bad = vec![
        ImportGoal {
            date: date(2030, 1, 9),
            goal: study(taxonomy, 90),
        },
        ImportGoal {
            date: date(2030, 1, 9),
            goal: study(taxonomy, 5),
        },
    ];
    assert!(db.import_goals(plan.id, bad, &config).is_err());
    assert_eq!(db.count_goals(plan.id, GoalStatus::Pending).unwrap(), 2);
}

#[test]
fn test_failed_operation_rolls_back() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan(&weekday_plan("Finals")).unwrap();
    let taxonomy = seed_taxonomy(&mut db);
    let config = ScheduleConfig::default();

    let placed = db.place_goal(plan.id, study(taxonomy, 60), START, false, &config).unwrap();
    db.complete_goal(placed.goal.id, 3_600, START, &config).unwrap();

    let err = db.omit_goal(placed.goal.id, "changed my mind").unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidTransition { .. }));
    assert!(db.list_omissions(plan.id).unwrap().is_empty());

    let goal = db.get_goal(placed.goal.id).unwrap().unwrap();
    assert_eq!(goal.status, GoalStatus::Done);
}

#[test]
fn test_availability_change_empties_dropped_weekday() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan(&weekday_plan("Finals")).unwrap();
    let taxonomy = seed_taxonomy(&mut db);
    let config = ScheduleConfig::default();

    let monday_goal = db.place_goal(plan.id, study(taxonomy, 60), START, false, &config).unwrap();

    let tue_to_fri: WeekMask = "tue,wed,thu,fri".parse().unwrap();
    let update = db
        .update_plan(
            plan.id,
            &PlanChanges {
                availability: Some(tue_to_fri),
                ..Default::default()
            },
            START,
            &config,
        )
        .unwrap();

    assert_eq!(update.plan.availability, tue_to_fri);
    assert_eq!(update.rebalance.moves.len(), 1);
    let moved = db.get_goal(monday_goal.goal.id).unwrap().unwrap();
    assert_eq!(moved.scheduled_date, date(2030, 1, 8));
    assert_eq!(db.compute_capacity(plan.id, START).unwrap().capacity, 0);
}

#[test]
fn test_title_edit_does_not_rebalance() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan(&weekday_plan("Finals")).unwrap();

    let update = db
        .update_plan(
            plan.id,
            &PlanChanges {
                title: Some("Finals 2030".to_string()),
                ..Default::default()
            },
            START,
            &ScheduleConfig::default(),
        )
        .unwrap();
    assert_eq!(update.plan.title, "Finals 2030");
    assert_eq!(update.rebalance.dates_checked, 0);
}
