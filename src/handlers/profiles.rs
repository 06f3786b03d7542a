use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{RedisCache, keys};
use crate::db::profiles as profile_db;
use crate::models::profiles::{ProfileListQuery, ProfileResponse, UpdateProfile, UserType};

/// GET /api/profiles — list profiles with pagination and an optional
/// user_type filter (requires authentication).
/// Query params: ?user_type=professional&page=1&limit=20
pub async fn get_profiles(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProfileListQuery>,
) -> impl Responder {
    let page = query.page();
    let limit = query.limit();

    match profile_db::get_profiles_paginated(db.get_ref(), query.user_type.clone(), page, limit)
        .await
    {
        Ok(profiles) => {
            let response: Vec<ProfileResponse> =
                profiles.into_iter().map(ProfileResponse::from).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch profiles: {e}"),
        })),
    }
}

/// GET /api/profiles/{id} — get a single profile (requires authentication).
pub async fn get_profile(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::profile(&id.to_string());

    // Try to get from cache first
    match cache.get::<serde_json::Value>(&cache_key).await {
        Ok(Some(cached)) => HttpResponse::Ok().json(cached),
        Ok(None) => {
            // Cache miss - fetch from database
            match profile_db::get_profile_by_id(db.get_ref(), id).await {
                Ok(Some(profile)) => {
                    let response = ProfileResponse::from(profile);
                    // Store in cache (15 minute TTL)
                    let _ = cache.set(&cache_key, &response, Some(900)).await;
                    HttpResponse::Ok().json(response)
                }
                Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Profile {id} not found"),
                })),
                Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                })),
            }
        }
        Err(e) => {
            // Cache error - fallback to database
            tracing::warn!("Cache error: {}", e);
            match profile_db::get_profile_by_id(db.get_ref(), id).await {
                Ok(Some(profile)) => HttpResponse::Ok().json(ProfileResponse::from(profile)),
                Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Profile {id} not found"),
                })),
                Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                })),
            }
        }
    }
}

/// PUT /api/profiles/{id} — update a profile (self or admin).
pub async fn update_profile(
    auth_user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProfile>,
) -> impl Responder {
    let id = path.into_inner();

    if auth_user.0.id != id && auth_user.0.user_type != UserType::Admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only update your own profile",
        }));
    }

    match profile_db::update_profile(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::profile(&id.to_string())).await;
            HttpResponse::Ok().json(ProfileResponse::from(updated))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update profile: {e}"),
        })),
    }
}

/// DELETE /api/profiles/{id} — delete a profile (self or admin).
pub async fn delete_profile(
    auth_user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    if auth_user.0.id != id && auth_user.0.user_type != UserType::Admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only delete your own profile",
        }));
    }

    match profile_db::delete_profile(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                let _ = cache.delete(&keys::profile(&id.to_string())).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Profile {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Profile {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete profile: {e}"),
        })),
    }
}
