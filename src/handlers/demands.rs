use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::require_professional;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::demands as demand_db;
use crate::db::partnership_applications as application_db;
use crate::db::services as service_db;
use crate::lifecycle::{self, ActorRelationship};
use crate::models::demands::{CreateDemand, DemandListQuery, UpdateDemand};
use crate::models::status::{EngagementKind, EngagementStatus, UpdateStatusRequest};

/// GET /api/demands — browse listing with status/service/collaboration
/// filters (requires authentication). Defaults to open demands.
pub async fn get_demands(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<DemandListQuery>,
) -> impl Responder {
    let mut query = query.into_inner();
    if query.status.is_none() {
        query.status = Some(EngagementStatus::Open);
    }

    match demand_db::list_demands(db.get_ref(), &query).await {
        Ok(demands) => HttpResponse::Ok().json(demands),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch demands: {e}"),
        })),
    }
}

/// GET /api/demands/{id} — get a single partnership demand.
pub async fn get_demand(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match demand_db::get_demand_by_id(db.get_ref(), id).await {
        Ok(Some(demand)) => HttpResponse::Ok().json(demand),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Demand {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/demands/professional/{professional_id} — demands created by a
/// professional. Creators can only view their own dashboard.
pub async fn get_demands_by_professional(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let professional_id = path.into_inner();

    if user.0.id != professional_id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only view your own demands",
        }));
    }

    match demand_db::get_demands_by_professional(db.get_ref(), professional_id).await {
        Ok(demands) => HttpResponse::Ok().json(demands),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/demands — a professional opens a collaboration request toward
/// other professionals. Demands start in Draft.
pub async fn create_demand(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateDemand>,
) -> impl Responder {
    if let Err(resp) = require_professional(&user.0) {
        return resp;
    }

    let input = body.into_inner();

    if input.title.trim().is_empty() || input.description.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Title and description are required",
        }));
    }

    match service_db::get_service_by_id(db.get_ref(), input.service_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("Service {} does not exist", input.service_id),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match demand_db::insert_demand(db.get_ref(), input, user.0.id).await {
        Ok(demand) => HttpResponse::Created().json(demand),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create demand: {e}"),
        })),
    }
}

/// PUT /api/demands/{id} — update a demand's descriptive fields.
/// Only the creator may edit, and only before work starts.
pub async fn update_demand(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateDemand>,
) -> impl Responder {
    let id = path.into_inner();

    let demand = match demand_db::get_demand_by_id(db.get_ref(), id).await {
        Ok(Some(d)) => d,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Demand {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if demand.professional_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only edit your own demands",
        }));
    }

    if !matches!(
        demand.status,
        EngagementStatus::Draft | EngagementStatus::Open
    ) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Demands can only be edited while draft or open",
        }));
    }

    match demand_db::update_demand(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update demand: {e}"),
        })),
    }
}

/// PUT /api/demands/{id}/status — request a status transition.
///
/// The caller's relationship (creator or accepted partner) is derived from
/// the rows; the transition table decides the rest.
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    let id = path.into_inner();
    let requested = body.into_inner().status;

    let demand = match demand_db::get_demand_by_id(db.get_ref(), id).await {
        Ok(Some(d)) => d,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Demand {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let actor = if demand.professional_id == user.0.id {
        ActorRelationship::Owner
    } else {
        match application_db::get_accepted_for_demand(db.get_ref(), id).await {
            Ok(Some(accepted)) if accepted.professional_id == user.0.id => {
                ActorRelationship::AcceptedCounterpart
            }
            Ok(_) => {
                return HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "Only the demand creator or the accepted partner can change its status",
                }));
            }
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        }
    };

    if let Err(e) = lifecycle::check_transition(
        &EngagementKind::Partnership,
        actor,
        &demand.status,
        &requested,
    ) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }

    match demand_db::update_demand_status(db.get_ref(), id, requested).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update demand status: {e}"),
        })),
    }
}

/// DELETE /api/demands/{id} — the creator discards a draft.
/// Published demands are cancelled through the status endpoint instead.
pub async fn delete_demand(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let demand = match demand_db::get_demand_by_id(db.get_ref(), id).await {
        Ok(Some(d)) => d,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Demand {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if demand.professional_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only delete your own demands",
        }));
    }

    if demand.status != EngagementStatus::Draft {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Only draft demands can be deleted; cancel published ones instead",
        }));
    }

    match demand_db::delete_demand(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Demand {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Demand {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete demand: {e}"),
        })),
    }
}
