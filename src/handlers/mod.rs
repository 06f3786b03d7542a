pub mod applications;
pub mod auth;
pub mod chat;
pub mod demands;
pub mod partnership_applications;
pub mod plans;
pub mod profiles;
pub mod projects;
pub mod reviews;
pub mod services;

use actix_web::web;

use crate::chat::session;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (protected by JWT via the AuthenticatedUser extractor) ──
    cfg.service(
        web::scope("/auth")
            .route("/me", web::get().to(auth::me))
            .route("/complete-profile", web::post().to(auth::complete_profile)),
    );

    // ── Profile routes ──
    cfg.service(
        web::resource("/profiles").route(web::get().to(profiles::get_profiles)),
    );
    cfg.service(
        web::resource("/profiles/{id}")
            .route(web::get().to(profiles::get_profile))
            .route(web::put().to(profiles::update_profile))
            .route(web::delete().to(profiles::delete_profile)),
    );
    cfg.service(
        web::resource("/profiles/{id}/plan").route(web::put().to(plans::assign_plan)),
    );

    // ── Service catalog routes (reads for everyone, writes admin-only) ──
    cfg.service(
        web::scope("/services")
            .route("", web::get().to(services::get_services))
            .route("", web::post().to(services::create_service))
            .route("/{id}", web::get().to(services::get_service))
            .route("/{id}", web::put().to(services::update_service))
            .route("/{id}", web::delete().to(services::delete_service)),
    );

    // ── Plan routes (reads for everyone, writes admin-only) ──
    cfg.service(
        web::scope("/plans")
            .route("", web::get().to(plans::get_plans))
            .route("", web::post().to(plans::create_plan))
            .route("/{id}", web::get().to(plans::get_plan))
            .route("/{id}", web::put().to(plans::update_plan))
            .route("/{id}", web::delete().to(plans::delete_plan)),
    );

    // ── Project routes ──
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::get_projects))
            .route("", web::post().to(projects::create_project))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}", web::put().to(projects::update_project))
            .route("/{id}", web::delete().to(projects::delete_project))
            .route("/{id}/status", web::put().to(projects::update_status))
            .route(
                "/{id}/applications",
                web::post().to(applications::create_application),
            )
            .route(
                "/{id}/applications",
                web::get().to(applications::get_applications_by_project),
            )
            .route(
                "/client/{client_id}",
                web::get().to(projects::get_projects_by_client),
            ),
    );

    // ── Partnership demand routes ──
    cfg.service(
        web::scope("/demands")
            .route("", web::get().to(demands::get_demands))
            .route("", web::post().to(demands::create_demand))
            .route("/{id}", web::get().to(demands::get_demand))
            .route("/{id}", web::put().to(demands::update_demand))
            .route("/{id}", web::delete().to(demands::delete_demand))
            .route("/{id}/status", web::put().to(demands::update_status))
            .route(
                "/{id}/applications",
                web::post().to(partnership_applications::create_application),
            )
            .route(
                "/{id}/applications",
                web::get().to(partnership_applications::get_applications_by_demand),
            )
            .route(
                "/professional/{professional_id}",
                web::get().to(demands::get_demands_by_professional),
            ),
    );

    // ── Application routes (project candidacies) ──
    cfg.service(
        web::scope("/applications")
            .route("/mine", web::get().to(applications::get_my_applications))
            .route("/{id}/accept", web::put().to(applications::accept_application))
            .route("/{id}/reject", web::put().to(applications::reject_application))
            .route("/{id}", web::delete().to(applications::withdraw_application)),
    );

    // ── Partnership application routes (demand candidacies) ──
    cfg.service(
        web::scope("/partnership-applications")
            .route(
                "/mine",
                web::get().to(partnership_applications::get_my_applications),
            )
            .route(
                "/{id}/accept",
                web::put().to(partnership_applications::accept_application),
            )
            .route(
                "/{id}/reject",
                web::put().to(partnership_applications::reject_application),
            )
            .route(
                "/{id}",
                web::delete().to(partnership_applications::withdraw_application),
            ),
    );

    // ── Review routes ──
    cfg.service(
        web::scope("/reviews")
            .route("", web::post().to(reviews::create_review))
            .route("/profile/{id}", web::get().to(reviews::get_reviews_for_profile))
            .route(
                "/{kind}/{engagement_id}",
                web::get().to(reviews::get_reviews_for_engagement),
            ),
    );

    // ── Chat routes ──
    cfg.service(
        web::scope("/chat")
            .route("/conversations", web::get().to(chat::get_conversations))
            .route("/conversations", web::post().to(chat::start_conversation))
            .route(
                "/{conversation_id}/messages",
                web::get().to(chat::get_messages),
            )
            .route(
                "/{conversation_id}/messages",
                web::post().to(chat::send_message),
            )
            .route(
                "/{conversation_id}/read",
                web::put().to(chat::mark_conversation_read),
            )
            .route("/ws/{conversation_id}", web::get().to(session::ws_connect)),
    );
}
