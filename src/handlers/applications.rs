use actix_web::{HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, SqlErr};
use uuid::Uuid;

use crate::auth::authorization::require_professional;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::applications as application_db;
use crate::db::projects as project_db;
use crate::models::applications::{ApplicationStatus, CreateApplication};
use crate::models::status::EngagementStatus;

/// POST /api/projects/{id}/applications — a professional applies to an open
/// project. The professional id comes from the JWT; duplicates are refused by
/// the unique (project, professional) index.
pub async fn create_application(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<CreateApplication>,
) -> impl Responder {
    if let Err(resp) = require_professional(&user.0) {
        return resp;
    }

    let project_id = path.into_inner();

    let project = match project_db::get_project_by_id(db.get_ref(), project_id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Project {project_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if project.status != EngagementStatus::Open {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Applications are only accepted while the project is open",
        }));
    }

    match application_db::insert_application(
        db.get_ref(),
        project_id,
        user.0.id,
        body.into_inner().proposal,
    )
    .await
    {
        Ok(application) => HttpResponse::Created().json(application),
        Err(e) => {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                HttpResponse::Conflict().json(serde_json::json!({
                    "error": "You have already applied to this project",
                }))
            } else {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Failed to create application: {e}"),
                }))
            }
        }
    }
}

/// GET /api/projects/{id}/applications — all applications on a project.
/// Only the owning client can see them.
pub async fn get_applications_by_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let project_id = path.into_inner();

    match project_db::get_project_by_id(db.get_ref(), project_id).await {
        Ok(Some(project)) if project.client_id == user.0.id => {}
        Ok(Some(_)) => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Only the project owner can view its applications",
            }));
        }
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Project {project_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match application_db::get_applications_by_project(db.get_ref(), project_id).await {
        Ok(applications) => HttpResponse::Ok().json(applications),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/applications/mine — the authenticated professional's applications.
pub async fn get_my_applications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match application_db::get_applications_by_professional(db.get_ref(), user.0.id).await {
        Ok(applications) => HttpResponse::Ok().json(applications),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/applications/{id}/accept — the project owner accepts one pending
/// application. One transaction marks it Accepted, rejects the pending
/// siblings, and moves the project to InProgress.
pub async fn accept_application(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let application_id = path.into_inner();

    let application = match application_db::get_application_by_id(db.get_ref(), application_id)
        .await
    {
        Ok(Some(a)) => a,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Application {application_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let project = match project_db::get_project_by_id(db.get_ref(), application.project_id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "The project for this application no longer exists",
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
            "error": "Only the project owner can accept applications",
        }));
    }

    if application.status != ApplicationStatus::Pending {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!(
                "Application is already {:?}. Only pending applications can be accepted.",
                application.status
            ),
        }));
    }

    if project.status != EngagementStatus::Open {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Applications can only be accepted while the project is open",
        }));
    }

    match application_db::accept_application_cascade(db.get_ref(), application_id).await {
        Ok(accepted) => HttpResponse::Ok().json(accepted),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to accept application: {e}"),
        })),
    }
}

/// PUT /api/applications/{id}/reject — the project owner rejects a pending
/// application. Terminal for that application.
pub async fn reject_application(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let application_id = path.into_inner();

    let application = match application_db::get_application_by_id(db.get_ref(), application_id)
        .await
    {
        Ok(Some(a)) => a,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Application {application_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match project_db::get_project_by_id(db.get_ref(), application.project_id).await {
        Ok(Some(project)) if project.client_id == user.0.id => {}
        Ok(Some(_)) => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Only the project owner can reject applications",
            }));
        }
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "The project for this application no longer exists",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    if application.status != ApplicationStatus::Pending {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!(
                "Application is already {:?}. Only pending applications can be rejected.",
                application.status
            ),
        }));
    }

    match application_db::reject_application(db.get_ref(), application_id).await {
        Ok(rejected) => HttpResponse::Ok().json(rejected),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to reject application: {e}"),
        })),
    }
}

/// DELETE /api/applications/{id} — the applicant withdraws a pending
/// application.
pub async fn withdraw_application(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let application_id = path.into_inner();

    let application = match application_db::get_application_by_id(db.get_ref(), application_id)
        .await
    {
        Ok(Some(a)) => a,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Application {application_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if application.professional_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only withdraw your own applications",
        }));
    }

    if application.status != ApplicationStatus::Pending {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!(
                "Application is already {:?}. Only pending applications can be withdrawn.",
                application.status
            ),
        }));
    }

    match application_db::delete_application(db.get_ref(), application_id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Application {application_id} withdrawn"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Application {application_id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to withdraw application: {e}"),
        })),
    }
}
