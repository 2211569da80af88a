use jiff::{civil::date, Timestamp};

use crate::{
    engine::GoalNumber,
    models::{
        Goal, GoalKind, GoalStatus, GoalType, Plan, PlanStatus, TaxonomyRef, WeekMask,
    },
};

fn fixed_timestamp() -> Timestamp {
    Timestamp::from_second(1_893_456_000).unwrap() // 2030-01-01 00:00:00 UTC
}

fn create_test_plan() -> Plan {
    Plan {
        id: 4,
        student_id: "student-9".to_string(),
        title: "Bar exam".to_string(),
        hours_per_day: 2.5,
        availability: WeekMask::WEEKDAYS,
        start_date: date(2030, 1, 7),
        end_date: Some(date(2030, 6, 28)),
        status: PlanStatus::Active,
        last_number_base: 12,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

fn create_test_goal(status: GoalStatus) -> Goal {
    Goal {
        id: 31,
        plan_id: 4,
        kind: GoalKind::Origin,
        goal_type: GoalType::Study,
        status,
        taxonomy: TaxonomyRef {
            discipline_id: 1,
            subject_id: 2,
            topic_id: Some(3),
        },
        scheduled_date: date(2030, 1, 8),
        position: 2,
        planned_minutes: 90,
        actual_seconds: (status == GoalStatus::Done).then_some(4_000),
        completed_on: (status == GoalStatus::Done).then_some(date(2030, 1, 8)),
        guidance: Some("Work through chapter 3.".to_string()),
        fixed: false,
        needs_review: false,
        omission_reason: (status == GoalStatus::Omitted).then(|| "Sick".to_string()),
        content_hash: "abc".to_string(),
        number: GoalNumber::origin(7),
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

#[test]
fn test_consumed_minutes_by_status() {
    assert_eq!(create_test_goal(GoalStatus::Pending).consumed_minutes(), 90);
    // 4000 s rounds up to 67 minutes
    assert_eq!(create_test_goal(GoalStatus::Done).consumed_minutes(), 67);
    assert_eq!(create_test_goal(GoalStatus::Omitted).consumed_minutes(), 0);
}

#[test]
fn test_only_origin_study_goals_spawn_reviews() {
    let mut goal = create_test_goal(GoalStatus::Done);
    assert!(goal.spawns_reviews());

    goal.goal_type = GoalType::PracticeQuestions;
    assert!(!goal.spawns_reviews());

    goal.goal_type = GoalType::Study;
    goal.kind = GoalKind::GeneratedReview { parent_id: 2 };
    assert!(!goal.spawns_reviews());
    assert!(goal.auto_generated());
    assert_eq!(goal.parent_id(), Some(2));
}

#[test]
fn test_goal_serializes_kind_flat() {
    let mut goal = create_test_goal(GoalStatus::Pending);
    goal.kind = GoalKind::GeneratedReview { parent_id: 5 };
    let json = serde_json::to_value(&goal).unwrap();

    assert_eq!(json["kind"], "generated_review");
    assert_eq!(json["parent_id"], 5);
    assert_eq!(json["scheduled_date"], "2030-01-08");
    assert!(json.get("actual_seconds").is_none());

    let back: Goal = serde_json::from_value(json).unwrap();
    assert_eq!(back.kind, GoalKind::GeneratedReview { parent_id: 5 });
}

#[test]
fn test_plan_display() {
    let output = create_test_plan().to_string();

    assert!(output.starts_with("# 4. Bar exam"));
    assert!(output.contains("- Student: student-9"));
    assert!(output.contains("- Daily budget: 2h 30m"));
    assert!(output.contains("- Available: mon, tue, wed, thu, fri"));
    assert!(output.contains("- Runs: 2030-01-07 to 2030-06-28"));
}

#[test]
fn test_open_ended_plan_display() {
    let mut plan = create_test_plan();
    plan.end_date = None;
    assert!(plan.to_string().contains("from 2030-01-07, open-ended"));
}

#[test]
fn test_goal_display_by_status() {
    let pending = create_test_goal(GoalStatus::Pending).to_string();
    assert!(pending.contains("### #007 Study (ID: 31, ○ Pending)"));
    assert!(pending.contains("- Scheduled: 2030-01-08 (position 2)"));
    assert!(pending.contains("- Planned: 1h 30m"));
    assert!(pending.contains("discipline 1 / subject 2 / topic 3"));
    assert!(pending.contains("Work through chapter 3."));
    assert!(!pending.contains("Actual"));

    let done = create_test_goal(GoalStatus::Done).to_string();
    assert!(done.contains("✓ Done"));
    assert!(done.contains("- Actual: 1h 07m"));

    let omitted = create_test_goal(GoalStatus::Omitted).to_string();
    assert!(omitted.contains("- Omitted because: Sick"));
}

#[test]
fn test_flagged_goal_display() {
    let mut goal = create_test_goal(GoalStatus::Pending);
    goal.needs_review = true;
    goal.fixed = true;
    let output = goal.to_string();
    assert!(output.contains("Needs manual review"));
    assert!(output.contains("Fixed"));
}

#[test]
fn test_plan_covers_range() {
    let plan = create_test_plan();
    assert!(!plan.covers(date(2030, 1, 6)));
    assert!(plan.covers(date(2030, 1, 7)));
    assert!(plan.covers(date(2030, 6, 28)));
    assert!(!plan.covers(date(2030, 6, 29)));
}
