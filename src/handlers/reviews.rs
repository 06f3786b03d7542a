use actix_web::{HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, SqlErr};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::applications as application_db;
use crate::db::demands as demand_db;
use crate::db::partnership_applications as partnership_application_db;
use crate::db::projects as project_db;
use crate::db::reviews as review_db;
use crate::models::reviews::{CreateReview, ProfileReviews, rating_in_range};
use crate::models::status::{EngagementKind, EngagementStatus};

/// The two parties of a completed engagement: (owner, accepted counterpart).
async fn resolve_parties(
    db: &DatabaseConnection,
    kind: &EngagementKind,
    engagement_id: Uuid,
) -> Result<(Uuid, Uuid), HttpResponse> {
    let map_db_err = |e: sea_orm::DbErr| {
        HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        }))
    };

    match kind {
        EngagementKind::Project => {
            let project = project_db::get_project_by_id(db, engagement_id)
                .await
                .map_err(map_db_err)?
                .ok_or_else(|| {
                    HttpResponse::NotFound().json(serde_json::json!({
                        "error": format!("Project {engagement_id} not found"),
                    }))
                })?;

            if project.status != EngagementStatus::Completed {
                return Err(HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Reviews can only be submitted for completed engagements",
                })));
            }

            let accepted = application_db::get_accepted_for_project(db, engagement_id)
                .await
                .map_err(map_db_err)?
                .ok_or_else(|| {
                    HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "This project has no accepted professional to review",
                    }))
                })?;

            Ok((project.client_id, accepted.professional_id))
        }
        EngagementKind::Partnership => {
            let demand = demand_db::get_demand_by_id(db, engagement_id)
                .await
                .map_err(map_db_err)?
                .ok_or_else(|| {
                    HttpResponse::NotFound().json(serde_json::json!({
                        "error": format!("Demand {engagement_id} not found"),
                    }))
                })?;

            if demand.status != EngagementStatus::Completed {
                return Err(HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Reviews can only be submitted for completed engagements",
                })));
            }

            let accepted = partnership_application_db::get_accepted_for_demand(db, engagement_id)
                .await
                .map_err(map_db_err)?
                .ok_or_else(|| {
                    HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "This demand has no accepted partner to review",
                    }))
                })?;

            Ok((demand.professional_id, accepted.professional_id))
        }
    }
}

/// POST /api/reviews — submit a post-completion review.
///
/// The reviewer must be one of the engagement's two parties and the reviewed
/// must be the other. The unique (engagement, reviewer, reviewed) index makes
/// the second attempt fail with a conflict.
pub async fn create_review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateReview>,
) -> impl Responder {
    let input = body.into_inner();

    if !rating_in_range(input.rating) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Rating must be between 1 and 5",
        }));
    }

    let (owner, counterpart) =
        match resolve_parties(db.get_ref(), &input.engagement_kind, input.engagement_id).await {
            Ok(parties) => parties,
            Err(resp) => return resp,
        };

    let reviewer_id = user.0.id;

    if reviewer_id != owner && reviewer_id != counterpart {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only the two parties of the engagement can review it",
        }));
    }

    let expected_reviewed = if reviewer_id == owner { counterpart } else { owner };
    if input.reviewed_id != expected_reviewed {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "You can only review the other party of the engagement",
        }));
    }

    match review_db::insert_review(db.get_ref(), input, reviewer_id).await {
        Ok(review) => HttpResponse::Created().json(review),
        Err(e) => {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                HttpResponse::Conflict().json(serde_json::json!({
                    "error": "You have already reviewed this party for this engagement",
                }))
            } else {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Failed to create review: {e}"),
                }))
            }
        }
    }
}

/// GET /api/reviews/profile/{id} — reviews received by a profile, with the
/// count and mean rating shown on their page.
pub async fn get_reviews_for_profile(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let reviewed_id = path.into_inner();

    match review_db::get_reviews_for_reviewed(db.get_ref(), reviewed_id).await {
        Ok(reviews) => HttpResponse::Ok().json(ProfileReviews::from_reviews(reviews)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/reviews/{kind}/{engagement_id} — the mutual review slots of one
/// engagement (`kind` is `project` or `partnership`).
pub async fn get_reviews_for_engagement(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<(String, Uuid)>,
) -> impl Responder {
    let (kind, engagement_id) = path.into_inner();

    let kind = match kind.as_str() {
        "project" => EngagementKind::Project,
        "partnership" => EngagementKind::Partnership,
        other => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("Unknown engagement kind '{other}'"),
            }));
        }
    };

    match review_db::get_reviews_for_engagement(db.get_ref(), kind, engagement_id).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
