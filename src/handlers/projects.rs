use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::require_client;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::applications as application_db;
use crate::db::projects as project_db;
use crate::db::services as service_db;
use crate::lifecycle::{self, ActorRelationship};
use crate::models::projects::{
    CreateProject, ProjectListQuery, UpdateProject, budget_bounds_ok,
};
use crate::models::status::{EngagementKind, EngagementStatus, UpdateStatusRequest};

/// GET /api/projects — browse listing with status/service filters
/// (requires authentication). Defaults to open projects so professionals
/// see what they can apply to.
pub async fn get_projects(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProjectListQuery>,
) -> impl Responder {
    let mut query = query.into_inner();
    if query.status.is_none() {
        query.status = Some(EngagementStatus::Open);
    }

    match project_db::list_projects(db.get_ref(), &query).await {
        Ok(projects) => HttpResponse::Ok().json(projects),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch projects: {e}"),
        })),
    }
}

/// GET /api/projects/{id} — get a single project (requires authentication).
pub async fn get_project(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match project_db::get_project_by_id(db.get_ref(), id).await {
        Ok(Some(project)) => HttpResponse::Ok().json(project),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Project {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/projects/client/{client_id} — all projects owned by a client.
/// Clients can only view their own dashboard.
pub async fn get_projects_by_client(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let client_id = path.into_inner();

    if user.0.id != client_id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only view your own projects",
        }));
    }

    match project_db::get_projects_by_client(db.get_ref(), client_id).await {
        Ok(projects) => HttpResponse::Ok().json(projects),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/projects — a client posts a new demand for an environmental
/// service. Projects start in Draft; publishing is a status transition.
pub async fn create_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProject>,
) -> impl Responder {
    if let Err(resp) = require_client(&user.0) {
        return resp;
    }

    let input = body.into_inner();

    if input.title.trim().is_empty() || input.description.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Title and description are required",
        }));
    }

    if !budget_bounds_ok(input.budget_min, input.budget_max) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "budget_min cannot be greater than budget_max",
        }));
    }

    // The referenced catalog service must exist.
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

    match project_db::insert_project(db.get_ref(), input, user.0.id).await {
        Ok(project) => HttpResponse::Created().json(project),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create project: {e}"),
        })),
    }
}

/// PUT /api/projects/{id} — update a project's descriptive fields.
/// Only the owning client may edit, and only before work starts.
pub async fn update_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProject>,
) -> impl Responder {
    let id = path.into_inner();

    let project = match project_db::get_project_by_id(db.get_ref(), id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Project {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if project.client_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only edit your own projects",
        }));
    }

    if !matches!(
        project.status,
        EngagementStatus::Draft | EngagementStatus::Open
    ) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Projects can only be edited while draft or open",
        }));
    }

    let input = body.into_inner();
    let next_min = input.budget_min.or(project.budget_min);
    let next_max = input.budget_max.or(project.budget_max);
    if !budget_bounds_ok(next_min, next_max) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "budget_min cannot be greater than budget_max",
        }));
    }

    match project_db::update_project(db.get_ref(), id, input).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update project: {e}"),
        })),
    }
}

/// PUT /api/projects/{id}/status — request a status transition.
///
/// The caller's relationship to the project (owner or accepted professional)
/// is derived from the rows; the transition table decides the rest.
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    let id = path.into_inner();
    let requested = body.into_inner().status;

    let project = match project_db::get_project_by_id(db.get_ref(), id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Project {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let actor = if project.client_id == user.0.id {
        ActorRelationship::Owner
    } else {
        match application_db::get_accepted_for_project(db.get_ref(), id).await {
            Ok(Some(accepted)) if accepted.professional_id == user.0.id => {
                ActorRelationship::AcceptedCounterpart
            }
            Ok(_) => {
                return HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "Only the project owner or the accepted professional can change its status",
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
        &EngagementKind::Project,
        actor,
        &project.status,
        &requested,
    ) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }

    match project_db::update_project_status(db.get_ref(), id, requested).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update project status: {e}"),
        })),
    }
}

/// DELETE /api/projects/{id} — the owning client discards a draft.
/// Published projects are cancelled through the status endpoint instead.
pub async fn delete_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let project = match project_db::get_project_by_id(db.get_ref(), id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Project {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if project.client_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only delete your own projects",
        }));
    }

    if project.status != EngagementStatus::Draft {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Only draft projects can be deleted; cancel published ones instead",
        }));
    }

    match project_db::delete_project(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Project {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Project {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete project: {e}"),
        })),
    }
}
