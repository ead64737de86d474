//! # End-to-end civic flows against a file-backed database
//!
//! - A resident reports an issue, neighbours support it, the county moves it
//!   to resolution, and the reporter earns XP along the way.
//! - An official's record (promises, projects, sittings, queries) is graded and
//!   the cached scorecard survives reopening the database.
//! - The audit trail attributes every step to the acting user.

use ama_core::enums::{
    AppRole, AuditAction, CivicActionStatus, EntityType, Grade, IssueCategory, PromiseStatus,
    ProjectStatus,
};
use ama_db::AmaDb;
use ama_db::repos::audit::AuditFilter;
use ama_db::repos::civic_action::NewCivicAction;
use ama_db::repos::project::NewProject;
use ama_db::service::AmaService;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

async fn open(path: &str, actor: Option<&str>) -> AmaService {
    let db = AmaDb::open_local(path).await.unwrap();
    AmaService::from_db(db).with_actor(actor.map(String::from))
}

#[tokio::test]
async fn reported_issue_reaches_resolution() {
    let svc = open(":memory:", None).await;
    svc.seed_default_goat_levels().await.unwrap();

    let reporter = svc
        .create_profile("amina", Some("Amina W."), AppRole::Citizen)
        .await
        .unwrap();
    let officer = svc
        .create_profile("county_roads", None, AppRole::Official)
        .await
        .unwrap();
    let svc = svc.with_actor(Some(reporter.id.clone()));

    let action = svc
        .report_civic_action(NewCivicAction::new(
            &reporter.id,
            IssueCategory::Roads,
            "Collapsed culvert on Outering Road",
        ))
        .await
        .unwrap();
    svc.award_xp(&reporter.id, 25).await.unwrap();

    for i in 0..4 {
        let neighbour = svc
            .create_profile(&format!("neighbour{i}"), None, AppRole::Citizen)
            .await
            .unwrap();
        svc.toggle_civic_action_support(&action.id, &neighbour.id)
            .await
            .unwrap();
    }
    assert_eq!(svc.get_civic_action(&action.id).await.unwrap().support_count, 4);

    let svc = svc.with_actor(Some(officer.id.clone()));
    for status in [
        CivicActionStatus::Acknowledged,
        CivicActionStatus::InProgress,
        CivicActionStatus::Resolved,
    ] {
        svc.transition_civic_action(&action.id, status, None)
            .await
            .unwrap();
    }
    let score = svc.award_xp(&reporter.id, 100).await.unwrap();
    assert_eq!(score.goat_level, 2);

    let detail = svc.civic_action_detail(&action.id).await.unwrap();
    assert_eq!(detail.action.status, CivicActionStatus::Resolved);
    assert_eq!(detail.progress_percent, 100);
    let steps: Vec<_> = detail.updates.iter().map(|u| u.new_status).collect();
    assert_eq!(
        steps,
        vec![
            CivicActionStatus::Submitted,
            CivicActionStatus::Acknowledged,
            CivicActionStatus::InProgress,
            CivicActionStatus::Resolved,
        ]
    );

    let by_officer = svc
        .query_audit(&AuditFilter {
            entity_type: Some(EntityType::CivicAction),
            actor_id: Some(officer.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_officer.len(), 3);
    assert!(by_officer
        .iter()
        .all(|e| e.action == AuditAction::StatusChanged));

    let stats = svc.user_stats(&reporter.id).await.unwrap();
    assert_eq!(stats.civic_actions, 1);
    assert_eq!(stats.resolved_actions, 1);
    assert_eq!(stats.goat_level, 2);
}

#[tokio::test]
async fn scorecard_cache_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ama.db");
    let path = path.to_str().unwrap();

    let official_id = {
        let svc = open(path, Some("usr-clerk001")).await;
        let mp = svc
            .create_profile("mp_kamukunji", None, AppRole::Official)
            .await
            .unwrap();

        for (i, outcome) in [
            PromiseStatus::Completed,
            PromiseStatus::Completed,
            PromiseStatus::Completed,
            PromiseStatus::Cancelled,
            PromiseStatus::Ongoing,
        ]
        .into_iter()
        .enumerate()
        {
            let p = svc
                .create_promise(&mp.id, &format!("Promise {i}"), None, None)
                .await
                .unwrap();
            if outcome != PromiseStatus::Cancelled {
                svc.transition_promise(&p.id, PromiseStatus::Ongoing, None)
                    .await
                    .unwrap();
            }
            if outcome != PromiseStatus::Ongoing {
                svc.transition_promise(&p.id, outcome, None).await.unwrap();
            }
        }

        let project = svc
            .create_project(NewProject {
                title: "Gikomba market roof".into(),
                official_id: Some(mp.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        svc.transition_project(&project.id, ProjectStatus::Ongoing, None)
            .await
            .unwrap();

        for day in 1..=4 {
            svc.record_attendance(
                &mp.id,
                NaiveDate::from_ymd_opt(2026, 5, day).unwrap(),
                day != 4,
            )
            .await
            .unwrap();
        }

        let card = svc.refresh_scorecard(&mp.id).await.unwrap();
        assert_eq!(card.promise_kept_percent, 60);
        assert_eq!(card.overall_grade, Some(Grade::B));
        assert_eq!(card.projects_active, 1);
        assert_eq!(card.attendance_percent, 75);
        mp.id
    };

    let svc = open(path, None).await;
    let card = svc.get_scorecard(&official_id).await.unwrap();
    assert_eq!(card.promises_total, 5);
    assert_eq!(card.promises_kept, 3);
    assert_eq!(card.overall_grade, Some(Grade::B));

    let recalculations = svc
        .query_audit(&AuditFilter {
            entity_type: Some(EntityType::Scorecard),
            action: Some(AuditAction::Recalculated),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(recalculations.len(), 1);
    assert_eq!(recalculations[0].actor_id.as_deref(), Some("usr-clerk001"));
}
