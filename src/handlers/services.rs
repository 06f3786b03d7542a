use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::require_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{RedisCache, keys};
use crate::db::services as service_db;
use crate::models::services::{CreateService, UpdateService};

/// GET /api/services — the service catalog (requires authentication).
/// Served from cache when warm; the catalog rarely changes.
pub async fn get_services(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
) -> impl Responder {
    let cache_key = keys::service_catalog();

    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match service_db::get_all_services(db.get_ref()).await {
        Ok(services) => {
            let _ = cache.set(&cache_key, &services, Some(600)).await;
            HttpResponse::Ok().json(services)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch services: {e}"),
        })),
    }
}

/// GET /api/services/{id} — get a single service (requires authentication).
pub async fn get_service(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match service_db::get_service_by_id(db.get_ref(), id).await {
        Ok(Some(service)) => HttpResponse::Ok().json(service),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Service {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/services — add a service to the catalog (admin only).
pub async fn create_service(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<CreateService>,
) -> impl Responder {
    if let Err(resp) = require_admin(&user.0) {
        return resp;
    }

    match service_db::insert_service(db.get_ref(), body.into_inner()).await {
        Ok(service) => {
            let _ = cache.delete(&keys::service_catalog()).await;
            HttpResponse::Created().json(service)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create service: {e}"),
        })),
    }
}

/// PUT /api/services/{id} — update a catalog service (admin only).
pub async fn update_service(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateService>,
) -> impl Responder {
    if let Err(resp) = require_admin(&user.0) {
        return resp;
    }

    let id = path.into_inner();
    match service_db::update_service(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::service_catalog()).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update service: {e}"),
            }))
        }
    }
}

/// DELETE /api/services/{id} — remove a catalog service (admin only).
pub async fn delete_service(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_admin(&user.0) {
        return resp;
    }

    let id = path.into_inner();
    match service_db::delete_service(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                let _ = cache.delete(&keys::service_catalog()).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Service {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Service {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete service: {e}"),
        })),
    }
}
