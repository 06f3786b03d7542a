use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::require_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{RedisCache, keys};
use crate::db::plans as plan_db;
use crate::db::profiles as profile_db;
use crate::models::plans::{AssignPlan, CreatePlan, UpdatePlan};
use crate::models::profiles::{ProfileResponse, UserType};

/// GET /api/plans — list active plans (requires authentication).
pub async fn get_plans(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
) -> impl Responder {
    let cache_key = keys::active_plans();

    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match plan_db::get_active_plans(db.get_ref()).await {
        Ok(plans) => {
            let _ = cache.set(&cache_key, &plans, Some(600)).await;
            HttpResponse::Ok().json(plans)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch plans: {e}"),
        })),
    }
}

/// GET /api/plans/{id} — get a single plan (requires authentication).
pub async fn get_plan(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match plan_db::get_plan_by_id(db.get_ref(), id).await {
        Ok(Some(plan)) => HttpResponse::Ok().json(plan),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Plan {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/plans — create a plan (admin only).
pub async fn create_plan(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<CreatePlan>,
) -> impl Responder {
    if let Err(resp) = require_admin(&user.0) {
        return resp;
    }

    match plan_db::insert_plan(db.get_ref(), body.into_inner()).await {
        Ok(plan) => {
            let _ = cache.delete(&keys::active_plans()).await;
            HttpResponse::Created().json(plan)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create plan: {e}"),
        })),
    }
}

/// PUT /api/plans/{id} — update a plan (admin only).
pub async fn update_plan(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePlan>,
) -> impl Responder {
    if let Err(resp) = require_admin(&user.0) {
        return resp;
    }

    let id = path.into_inner();
    match plan_db::update_plan(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::active_plans()).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update plan: {e}"),
            }))
        }
    }
}

/// DELETE /api/plans/{id} — delete a plan (admin only).
pub async fn delete_plan(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_admin(&user.0) {
        return resp;
    }

    let id = path.into_inner();
    match plan_db::delete_plan(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                let _ = cache.delete(&keys::active_plans()).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Plan {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Plan {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete plan: {e}"),
        })),
    }
}

/// PUT /api/profiles/{id}/plan — assign or clear a professional's plan
/// (admin only). Syncing the subscription with the billing provider happens
/// out of band.
pub async fn assign_plan(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<AssignPlan>,
) -> impl Responder {
    if let Err(resp) = require_admin(&user.0) {
        return resp;
    }

    let profile_id = path.into_inner();
    let plan_id = body.into_inner().plan_id;

    // The target must exist and be a professional.
    let target = match profile_db::get_profile_by_id(db.get_ref(), profile_id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Profile {profile_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if target.user_type != UserType::Professional {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Plans can only be assigned to professional accounts",
        }));
    }

    // When assigning (not clearing), the plan must exist.
    if let Some(plan_id) = plan_id {
        match plan_db::get_plan_by_id(db.get_ref(), plan_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Plan {plan_id} not found"),
                }));
            }
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        }
    }

    match profile_db::assign_plan(db.get_ref(), profile_id, plan_id).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::profile(&profile_id.to_string())).await;
            HttpResponse::Ok().json(ProfileResponse::from(updated))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to assign plan: {e}"),
        })),
    }
}
