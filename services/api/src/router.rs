use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use safereturn_core::health::{healthz, readyz};
use safereturn_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{check_token, create_token, refresh_token, register, revoke_token},
    case::{
        admin_case_counts, admin_get_case, admin_list_cases, admin_transition_case,
        get_public_case, list_active_cases, list_my_cases, submit_case,
    },
    sighting::{
        admin_create_case_from_sighting, admin_list_sightings, admin_match_sighting,
        admin_reject_sighting, admin_sighting_counts, admin_verify_sighting,
        list_public_general_sightings, list_public_sightings_for_case, list_sightings_for_case,
        submit_general_sighting, submit_linked_sighting,
    },
    user::{
        admin_delete_user, admin_flag_user, admin_get_user, admin_list_users,
        admin_review_verification, get_me, set_fcm_token, submit_verification, update_me,
        upload_profile_photo,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.upload_dir);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/token", get(check_token))
        .route("/auth/token", post(create_token))
        .route("/auth/token", patch(refresh_token))
        .route("/auth/token", delete(revoke_token))
        // Users
        .route("/users/@me", get(get_me))
        .route("/users/@me", patch(update_me))
        .route("/users/@me/photo", post(upload_profile_photo))
        .route("/users/@me/verification", post(submit_verification))
        .route("/users/@me/fcm-token", post(set_fcm_token))
        .route("/users/@me/cases", get(list_my_cases))
        // Cases
        .route("/cases", post(submit_case))
        .route("/cases", get(list_active_cases))
        .route("/cases/{case_id}", get(get_public_case))
        // Sightings
        .route("/cases/{case_id}/sightings", post(submit_linked_sighting))
        .route(
            "/cases/{case_id}/sightings",
            get(list_public_sightings_for_case),
        )
        .route(
            "/cases/{case_id}/sightings/all",
            get(list_sightings_for_case),
        )
        .route("/sightings", post(submit_general_sighting))
        .route("/sightings", get(list_public_general_sightings))
        // Admin: users
        .route("/admin/users", get(admin_list_users))
        .route("/admin/users/{user_id}", get(admin_get_user))
        .route("/admin/users/{user_id}", delete(admin_delete_user))
        .route(
            "/admin/users/{user_id}/verification",
            patch(admin_review_verification),
        )
        .route("/admin/users/{user_id}/flag", patch(admin_flag_user))
        // Admin: cases
        .route("/admin/cases", get(admin_list_cases))
        .route("/admin/cases/counts", get(admin_case_counts))
        .route("/admin/cases/{case_id}", get(admin_get_case))
        .route(
            "/admin/cases/{case_id}/status",
            patch(admin_transition_case),
        )
        // Admin: sightings
        .route("/admin/sightings", get(admin_list_sightings))
        .route("/admin/sightings/counts", get(admin_sighting_counts))
        .route(
            "/admin/sightings/{sighting_id}/verify",
            patch(admin_verify_sighting),
        )
        .route(
            "/admin/sightings/{sighting_id}/match",
            patch(admin_match_sighting),
        )
        .route(
            "/admin/sightings/{sighting_id}/case",
            post(admin_create_case_from_sighting),
        )
        .route(
            "/admin/sightings/{sighting_id}/reject",
            patch(admin_reject_sighting),
        )
        // Uploaded photos
        .nest_service("/uploads", uploads)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
