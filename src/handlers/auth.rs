use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::profiles;
use crate::models::profiles::{CompleteProfile, ProfileResponse};

/// GET /api/auth/me — return the currently authenticated profile.
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(ProfileResponse::from(user.0))
}

/// POST /api/auth/complete-profile — fill in contact fields and pick the
/// account type after first login. The account type is a one-shot choice:
/// once the profile has been completed it can no longer change.
pub async fn complete_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CompleteProfile>,
) -> impl Responder {
    let body = body.into_inner();

    if user.0.profile_completed
        && body
            .user_type
            .as_ref()
            .is_some_and(|t| *t != user.0.user_type)
    {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "The account type was already chosen and cannot be changed",
        }));
    }

    match profiles::complete_profile(db.get_ref(), user.0.id, body).await {
        Ok(updated) => HttpResponse::Ok().json(ProfileResponse::from(updated)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update profile: {e}"),
        })),
    }
}
