use chrono::Utc;
use uuid::Uuid;

use safereturn_api::error::ApiServiceError;
use safereturn_api::usecase::sighting::{
    CaseOverrides, CreateCaseFromSightingUseCase, GeneralSightingCountsUseCase,
    ListSightingsForCaseUseCase, MatchSightingToCaseUseCase, RejectSightingUseCase,
    SubmitGeneralSightingUseCase, SubmitLinkedSightingUseCase, SubmitSightingInput,
    VerifyLinkedSightingUseCase,
};
use safereturn_domain::status::{CaseStatus, SightingStatus};

use crate::helpers::{
    MockCaseIntakePort, MockCaseRepo, MockSightingRepo, MockUserRepo, test_case,
    test_general_sighting, test_linked_sighting, test_user,
};

fn submit_input() -> SubmitSightingInput {
    SubmitSightingInput {
        location: "Sadarghat terminal".to_owned(),
        description: "sitting alone near gate 3".to_owned(),
        sighted_at: Some(Utc::now()),
        ..Default::default()
    }
}

// ── Submission ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_submit_general_sighting_as_pending_and_private() {
    let reporter = test_user();
    let reporter_id = reporter.id;
    let sightings = MockSightingRepo::empty();
    let handle = sightings.sightings_handle();

    let usecase = SubmitGeneralSightingUseCase {
        users: MockUserRepo::new(vec![reporter]),
        sightings,
    };
    let sighting = usecase.execute(reporter_id, submit_input()).await.unwrap();

    assert!(sighting.is_general);
    assert_eq!(sighting.case_id, None);
    assert_eq!(sighting.status, SightingStatus::Pending);
    assert!(!sighting.is_public);
    assert_eq!(sighting.matched_to_case, None);
    assert_eq!(handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_submit_linked_sighting_against_existing_case() {
    let reporter = test_user();
    let reporter_id = reporter.id;
    let case = test_case(Uuid::now_v7());
    let case_id = case.id;

    let usecase = SubmitLinkedSightingUseCase {
        users: MockUserRepo::new(vec![reporter]),
        cases: MockCaseRepo::new(vec![case]),
        sightings: MockSightingRepo::empty(),
    };
    let sighting = usecase
        .execute(case_id, reporter_id, submit_input())
        .await
        .unwrap();

    assert!(!sighting.is_general);
    assert_eq!(sighting.case_id, Some(case_id));
    assert_eq!(sighting.status, SightingStatus::Pending);
}

#[tokio::test]
async fn should_refuse_linked_sighting_for_missing_case() {
    let reporter = test_user();
    let reporter_id = reporter.id;

    let usecase = SubmitLinkedSightingUseCase {
        users: MockUserRepo::new(vec![reporter]),
        cases: MockCaseRepo::empty(),
        sightings: MockSightingRepo::empty(),
    };
    let result = usecase
        .execute(Uuid::now_v7(), reporter_id, submit_input())
        .await;
    assert!(matches!(result, Err(ApiServiceError::CaseNotFound)));
}

#[tokio::test]
async fn should_refuse_sighting_from_flagged_reporter() {
    let mut reporter = test_user();
    reporter.is_flagged = true;
    let reporter_id = reporter.id;

    let usecase = SubmitGeneralSightingUseCase {
        users: MockUserRepo::new(vec![reporter]),
        sightings: MockSightingRepo::empty(),
    };
    let result = usecase.execute(reporter_id, submit_input()).await;
    assert!(matches!(result, Err(ApiServiceError::AccountFlagged)));
}

#[tokio::test]
async fn should_fill_contact_details_from_reporter_account() {
    let reporter = test_user();
    let reporter_id = reporter.id;
    let phone = reporter.phone.clone();

    let usecase = SubmitGeneralSightingUseCase {
        users: MockUserRepo::new(vec![reporter]),
        sightings: MockSightingRepo::empty(),
    };
    let sighting = usecase.execute(reporter_id, submit_input()).await.unwrap();
    assert_eq!(sighting.contact_phone, Some(phone));
}

#[tokio::test]
async fn should_require_location_description_and_time() {
    let reporter = test_user();
    let reporter_id = reporter.id;

    let usecase = SubmitGeneralSightingUseCase {
        users: MockUserRepo::new(vec![reporter]),
        sightings: MockSightingRepo::empty(),
    };

    let mut input = submit_input();
    input.sighted_at = None;
    let result = usecase.execute(reporter_id, input).await;
    assert!(matches!(result, Err(ApiServiceError::MissingData)));
}

// ── VerifyLinkedSightingUseCase ──────────────────────────────────────────────

#[tokio::test]
async fn should_publish_verified_and_helpful_sightings_only() {
    for (status, public) in [
        (SightingStatus::Verified, true),
        (SightingStatus::Helpful, true),
        (SightingStatus::False, false),
    ] {
        let admin_id = Uuid::now_v7();
        let sighting = test_linked_sighting(Uuid::now_v7(), Uuid::now_v7());
        let sighting_id = sighting.id;

        let usecase = VerifyLinkedSightingUseCase {
            sightings: MockSightingRepo::new(vec![sighting]),
        };
        let reviewed = usecase
            .execute(sighting_id, status, admin_id, Some("checked".to_owned()))
            .await
            .unwrap();

        assert_eq!(reviewed.status, status);
        assert_eq!(reviewed.is_public, public, "visibility for {status:?}");
        assert_eq!(reviewed.reviewed_by, Some(admin_id));
        assert_eq!(reviewed.admin_notes.as_deref(), Some("checked"));
    }
}

#[tokio::test]
async fn should_allow_re_review_of_linked_sighting() {
    let mut sighting = test_linked_sighting(Uuid::now_v7(), Uuid::now_v7());
    sighting.status = SightingStatus::Verified;
    sighting.is_public = true;
    let sighting_id = sighting.id;

    let usecase = VerifyLinkedSightingUseCase {
        sightings: MockSightingRepo::new(vec![sighting]),
    };
    let reviewed = usecase
        .execute(sighting_id, SightingStatus::False, Uuid::now_v7(), None)
        .await
        .unwrap();

    // A later false verdict withdraws public visibility.
    assert_eq!(reviewed.status, SightingStatus::False);
    assert!(!reviewed.is_public);
}

#[tokio::test]
async fn should_refuse_general_resolution_status_on_linked_review() {
    let sighting = test_linked_sighting(Uuid::now_v7(), Uuid::now_v7());
    let sighting_id = sighting.id;

    let usecase = VerifyLinkedSightingUseCase {
        sightings: MockSightingRepo::new(vec![sighting]),
    };
    let result = usecase
        .execute(sighting_id, SightingStatus::Matched, Uuid::now_v7(), None)
        .await;
    assert!(matches!(result, Err(ApiServiceError::InvalidStatus)));
}

#[tokio::test]
async fn should_refuse_linked_review_of_general_sighting() {
    let sighting = test_general_sighting(Uuid::now_v7());
    let sighting_id = sighting.id;

    let usecase = VerifyLinkedSightingUseCase {
        sightings: MockSightingRepo::new(vec![sighting]),
    };
    let result = usecase
        .execute(sighting_id, SightingStatus::Verified, Uuid::now_v7(), None)
        .await;
    assert!(matches!(result, Err(ApiServiceError::InvalidStatus)));
}

// ── MatchSightingToCaseUseCase ───────────────────────────────────────────────

#[tokio::test]
async fn should_match_general_sighting_to_case() {
    let admin_id = Uuid::now_v7();
    let case = test_case(Uuid::now_v7());
    let case_id = case.id;
    let sighting = test_general_sighting(Uuid::now_v7());
    let sighting_id = sighting.id;

    let usecase = MatchSightingToCaseUseCase {
        sightings: MockSightingRepo::new(vec![sighting]),
        cases: MockCaseRepo::new(vec![case]),
    };
    let matched = usecase
        .execute(sighting_id, case_id, admin_id, None)
        .await
        .unwrap();

    assert_eq!(matched.status, SightingStatus::Matched);
    assert_eq!(matched.matched_to_case, Some(case_id));
    assert!(matched.is_public);
    assert_eq!(matched.reviewed_by, Some(admin_id));
}

#[tokio::test]
async fn should_refuse_match_to_missing_case() {
    let sighting = test_general_sighting(Uuid::now_v7());
    let sighting_id = sighting.id;

    let usecase = MatchSightingToCaseUseCase {
        sightings: MockSightingRepo::new(vec![sighting]),
        cases: MockCaseRepo::empty(),
    };
    let result = usecase
        .execute(sighting_id, Uuid::now_v7(), Uuid::now_v7(), None)
        .await;
    assert!(matches!(result, Err(ApiServiceError::CaseNotFound)));
}

#[tokio::test]
async fn should_refuse_resolution_of_already_resolved_general_sighting() {
    let mut sighting = test_general_sighting(Uuid::now_v7());
    sighting.status = SightingStatus::Irrelevant;
    let sighting_id = sighting.id;
    let case = test_case(Uuid::now_v7());
    let case_id = case.id;

    let usecase = MatchSightingToCaseUseCase {
        sightings: MockSightingRepo::new(vec![sighting]),
        cases: MockCaseRepo::new(vec![case]),
    };
    let result = usecase
        .execute(sighting_id, case_id, Uuid::now_v7(), None)
        .await;
    // General resolutions are terminal.
    assert!(matches!(result, Err(ApiServiceError::InvalidTransition)));
}

#[tokio::test]
async fn should_refuse_general_resolution_of_linked_sighting() {
    let sighting = test_linked_sighting(Uuid::now_v7(), Uuid::now_v7());
    let sighting_id = sighting.id;
    let case = test_case(Uuid::now_v7());
    let case_id = case.id;

    let usecase = MatchSightingToCaseUseCase {
        sightings: MockSightingRepo::new(vec![sighting]),
        cases: MockCaseRepo::new(vec![case]),
    };
    let result = usecase
        .execute(sighting_id, case_id, Uuid::now_v7(), None)
        .await;
    assert!(matches!(result, Err(ApiServiceError::InvalidStatus)));
}

// ── CreateCaseFromSightingUseCase ────────────────────────────────────────────

#[tokio::test]
async fn should_promote_general_sighting_into_pending_case() {
    let admin_id = Uuid::now_v7();
    let reporter_id = Uuid::now_v7();
    let sighting = test_general_sighting(reporter_id);
    let sighting_id = sighting.id;

    let intake = MockCaseIntakePort::new();
    let committed = intake.committed_handle();

    let usecase = CreateCaseFromSightingUseCase {
        sightings: MockSightingRepo::new(vec![sighting]),
        intake,
    };
    let (case, updated) = usecase
        .execute(
            sighting_id,
            admin_id,
            CaseOverrides::default(),
            Some("promoted from intake queue".to_owned()),
        )
        .await
        .unwrap();

    // New case: pending, owned by the reporter, no number yet.
    assert_eq!(case.status, CaseStatus::Pending);
    assert_eq!(case.user_id, reporter_id);
    assert_eq!(case.case_number, None);
    assert_eq!(case.created_from_sighting, Some(sighting_id));
    assert_eq!(case.person_name, "unknown elderly man");
    assert_eq!(case.last_seen_location.as_deref(), Some("Sadarghat terminal"));

    // Source sighting: resolved as new_case and linked to the case.
    assert_eq!(updated.status, SightingStatus::NewCase);
    assert_eq!(updated.matched_to_case, Some(case.id));
    assert!(updated.is_public);
    assert_eq!(updated.reviewed_by, Some(admin_id));

    // Both writes go through the one transactional port call.
    let committed = committed.lock().unwrap();
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].0.id, case.id);
    assert_eq!(committed[0].1.id, updated.id);
}

#[tokio::test]
async fn should_apply_overrides_when_promoting() {
    let sighting = test_general_sighting(Uuid::now_v7());
    let sighting_id = sighting.id;

    let usecase = CreateCaseFromSightingUseCase {
        sightings: MockSightingRepo::new(vec![sighting]),
        intake: MockCaseIntakePort::new(),
    };
    let (case, _) = usecase
        .execute(
            sighting_id,
            Uuid::now_v7(),
            CaseOverrides {
                person_name: Some("Rafiq Islam".to_owned()),
                description: Some("identified by family".to_owned()),
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(case.person_name, "Rafiq Islam");
    assert_eq!(case.description.as_deref(), Some("identified by family"));
}

#[tokio::test]
async fn should_require_person_name_when_sighting_has_none() {
    let mut sighting = test_general_sighting(Uuid::now_v7());
    sighting.person_name = None;
    let sighting_id = sighting.id;

    let intake = MockCaseIntakePort::new();
    let committed = intake.committed_handle();

    let usecase = CreateCaseFromSightingUseCase {
        sightings: MockSightingRepo::new(vec![sighting]),
        intake,
    };
    let result = usecase
        .execute(sighting_id, Uuid::now_v7(), CaseOverrides::default(), None)
        .await;

    assert!(matches!(result, Err(ApiServiceError::MissingData)));
    assert!(committed.lock().unwrap().is_empty());
}

// ── RejectSightingUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_general_sighting_as_irrelevant() {
    let admin_id = Uuid::now_v7();
    let mut sighting = test_general_sighting(Uuid::now_v7());
    sighting.is_public = true;
    let sighting_id = sighting.id;

    let usecase = RejectSightingUseCase {
        sightings: MockSightingRepo::new(vec![sighting]),
    };
    let rejected = usecase
        .execute(sighting_id, admin_id, Some("duplicate report".to_owned()))
        .await
        .unwrap();

    assert_eq!(rejected.status, SightingStatus::Irrelevant);
    assert_eq!(rejected.matched_to_case, None);
    assert!(!rejected.is_public);
    assert_eq!(rejected.admin_notes.as_deref(), Some("duplicate report"));
}

// ── ListSightingsForCaseUseCase ──────────────────────────────────────────────

#[tokio::test]
async fn should_limit_full_sighting_list_to_owner_and_admin() {
    let owner_id = Uuid::now_v7();
    let case = test_case(owner_id);
    let case_id = case.id;
    let sighting = test_linked_sighting(Uuid::now_v7(), case_id);

    let usecase = ListSightingsForCaseUseCase {
        cases: MockCaseRepo::new(vec![case]),
        sightings: MockSightingRepo::new(vec![sighting]),
    };

    assert_eq!(usecase.execute(case_id, owner_id, false).await.unwrap().len(), 1);
    assert_eq!(
        usecase.execute(case_id, Uuid::now_v7(), true).await.unwrap().len(),
        1
    );

    let result = usecase.execute(case_id, Uuid::now_v7(), false).await;
    assert!(matches!(result, Err(ApiServiceError::Forbidden)));
}

// ── GeneralSightingCountsUseCase ─────────────────────────────────────────────

#[tokio::test]
async fn should_count_general_sightings_ignoring_linked_ones() {
    let mut matched = test_general_sighting(Uuid::now_v7());
    matched.status = SightingStatus::Matched;
    let linked = test_linked_sighting(Uuid::now_v7(), Uuid::now_v7());

    let usecase = GeneralSightingCountsUseCase {
        sightings: MockSightingRepo::new(vec![
            test_general_sighting(Uuid::now_v7()),
            matched,
            linked,
        ]),
    };
    let counts = usecase.execute().await.unwrap();
    assert_eq!(counts.pending, 1);
    assert_eq!(counts.matched, 1);
    assert_eq!(counts.new_case, 0);
    assert_eq!(counts.irrelevant, 0);
}
