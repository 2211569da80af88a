mod common;

use cadence_core::{
    models::{GoalStatus, GoalType, PlanChanges, TaxonomyKind, TaxonomyRef},
    params::{
        AddTaxonomyNode, CompleteGoal, Id, ImportGoals, ListGoals, ListPlans, MoveGoal, OmitGoal,
        PlaceGoal, PlanDate, RebalancePlan, ReorderDay, SetFixed, UpdatePlan,
    },
    Scheduler,
};
use common::{create_test_scheduler, study, weekday_plan, START};
use jiff::civil::date;

async fn seed_taxonomy(scheduler: &Scheduler) -> TaxonomyRef {
    let discipline = scheduler
        .add_taxonomy_node(&AddTaxonomyNode {
            kind: TaxonomyKind::Discipline,
            name: "History".to_string(),
            parent_id: None,
        })
        .await
        .expect("Failed to add discipline");
    let subject = scheduler
        .add_taxonomy_node(&AddTaxonomyNode {
            kind: TaxonomyKind::Subject,
            name: "Rome".to_string(),
            parent_id: Some(discipline.id),
        })
        .await
        .expect("Failed to add subject");
    TaxonomyRef {
        discipline_id: discipline.id,
        subject_id: subject.id,
        topic_id: None,
    }
}

#[tokio::test]
#[allow(clippy::too_many_lines)]
async fn test_complete_study_week_workflow() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plan = scheduler
        .create_plan(&weekday_plan("Finals"))
        .await
        .expect("Failed to create plan");
    let taxonomy = seed_taxonomy(&scheduler).await;

    // Fill Monday and overflow into Tuesday
    let mut placed = Vec::new();
    for minutes in [120, 90, 60] {
        let placement = scheduler
            .place_goal(&PlaceGoal {
                plan_id: plan.id,
                date: START,
                force: false,
                goal: study(taxonomy, minutes),
            })
            .await
            .expect("Failed to place goal");
        placed.push(placement);
    }
    assert_eq!(placed[0].resolved_date(), START);
    assert_eq!(placed[1].resolved_date(), START);
    assert_eq!(placed[2].resolved_date(), date(2030, 1, 8));

    let monday = scheduler
        .day_schedule(&PlanDate {
            plan_id: plan.id,
            date: START,
        })
        .await
        .expect("Failed to load day");
    assert_eq!(monday.goals.len(), 2);
    assert_eq!(monday.capacity.remaining, 30);

    // Swap Monday's order
    let reordered = scheduler
        .reorder_day(&ReorderDay {
            plan_id: plan.id,
            date: START,
            goal_ids: vec![placed[1].goal.id, placed[0].goal.id],
        })
        .await
        .expect("Failed to reorder");
    assert_eq!(reordered[0].id, placed[1].goal.id);

    // Pin the Tuesday goal, then try to move it onto full Monday
    scheduler
        .set_goal_fixed(&SetFixed {
            goal_id: placed[2].goal.id,
            fixed: true,
        })
        .await
        .expect("Failed to pin goal");
    let moved = scheduler
        .move_goal(&MoveGoal {
            goal_id: placed[2].goal.id,
            date: START,
            force: false,
        })
        .await
        .expect("Failed to move goal");
    // no room on Monday, the first day with room after it is Tuesday again
    assert!(moved.conflict.is_some());
    assert_eq!(moved.resolved_date(), date(2030, 1, 8));

    // Complete the Monday study goals
    let outcome = scheduler
        .complete_goal(&CompleteGoal {
            goal_id: placed[0].goal.id,
            actual_seconds: 100 * 60,
            completed_on: Some(START),
        })
        .await
        .expect("Failed to complete goal");
    assert_eq!(outcome.reviews_created.len(), 3);
    assert!(outcome
        .reviews_created
        .iter()
        .all(|review| review.planned_minutes == 60 && review.goal_type == GoalType::Review));

    // Omit the other Monday goal
    scheduler
        .omit_goal(&OmitGoal {
            goal_id: placed[1].goal.id,
            reason: "Exam moved".to_string(),
        })
        .await
        .expect("Failed to omit goal");

    let summary = scheduler
        .plan_summary(&Id { id: plan.id })
        .await
        .expect("Failed to summarize plan");
    assert_eq!(summary.done_goals, 1);
    assert_eq!(summary.omitted_goals, 1);
    assert_eq!(summary.pending_goals, 4);
    assert_eq!(summary.total_goals(), 6);

    let pending = scheduler
        .list_goals(&ListGoals {
            plan_id: plan.id,
            status: Some(GoalStatus::Pending),
            ..Default::default()
        })
        .await
        .expect("Failed to list goals");
    assert_eq!(pending.len(), 4);

    let by_number = scheduler
        .list_goals_by_number(&Id { id: plan.id })
        .await
        .expect("Failed to list goals");
    let numbers: Vec<String> = by_number.iter().map(|g| g.display_number()).collect();
    assert_eq!(
        numbers,
        vec!["#001", "#001.1", "#001.2", "#001.3", "#002", "#003"]
    );
}

#[tokio::test]
async fn test_rebalance_plan_is_idempotent() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plan = scheduler
        .create_plan(&weekday_plan("Finals"))
        .await
        .expect("Failed to create plan");
    let taxonomy = seed_taxonomy(&scheduler).await;

    for day in 7..=9 {
        for _ in 0..2 {
            scheduler
                .place_goal(&PlaceGoal {
                    plan_id: plan.id,
                    date: date(2030, 1, day),
                    force: false,
                    goal: study(taxonomy, 120),
                })
                .await
                .expect("Failed to place goal");
        }
    }

    let update = scheduler
        .update_plan(&UpdatePlan {
            id: plan.id,
            changes: PlanChanges {
                hours_per_day: Some(3.0),
                ..Default::default()
            },
            today: Some(START),
        })
        .await
        .expect("Failed to update plan");
    assert!(!update.rebalance.moves.is_empty());

    let second = scheduler
        .rebalance_plan(&RebalancePlan {
            plan_id: plan.id,
            from: None,
        })
        .await
        .expect("Failed to rebalance");
    assert!(second.moves.is_empty());

    for day in 7..=18 {
        let capacity = scheduler
            .compute_capacity(&PlanDate {
                plan_id: plan.id,
                date: date(2030, 1, day),
            })
            .await
            .expect("Failed to compute capacity");
        assert!(capacity.used <= capacity.capacity, "{capacity:?}");
    }
}

#[tokio::test]
async fn test_import_through_scheduler() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plan = scheduler
        .create_plan(&weekday_plan("Finals"))
        .await
        .expect("Failed to create plan");
    let taxonomy = seed_taxonomy(&scheduler).await;

    let json = format!(
        r#"{{
            "plan_id": {},
            "goals": [
                {{"date": "2030-01-07", "goal_type": "study", "taxonomy": {{"discipline_id": {}, "subject_id": {}}}, "planned_minutes": 240}},
                {{"date": "2030-01-07", "goal_type": "review", "taxonomy": {{"discipline_id": {}, "subject_id": {}}}, "planned_minutes": 30}}
            ]
        }}"#,
        plan.id, taxonomy.discipline_id, taxonomy.subject_id, taxonomy.discipline_id, taxonomy.subject_id
    );
    let params: ImportGoals = serde_json::from_str(&json).expect("Failed to parse import");

    let report = scheduler
        .import_goals(&params)
        .await
        .expect("Failed to import");
    assert_eq!(report.placed.len(), 2);
    assert!(report.placed[1].auto_resolved());
    assert_eq!(report.placed[1].resolved_date(), date(2030, 1, 8));
}

#[tokio::test]
async fn test_list_plans_by_status() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plan = scheduler
        .create_plan(&weekday_plan("Finals"))
        .await
        .expect("Failed to create plan");
    scheduler
        .create_plan(&weekday_plan("Midterms"))
        .await
        .expect("Failed to create plan");

    scheduler
        .update_plan(&UpdatePlan {
            id: plan.id,
            changes: PlanChanges {
                status: Some(cadence_core::PlanStatus::Completed),
                ..Default::default()
            },
            today: None,
        })
        .await
        .expect("Failed to update plan");

    let active = scheduler
        .list_plans(&ListPlans {
            student_id: None,
            status: Some(cadence_core::PlanStatus::Active),
        })
        .await
        .expect("Failed to list plans");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].title, "Midterms");
}
