//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod dashboard;
mod health;
mod posts;
mod search;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/search", web::get().to(search::search_posts))
            // Auth routes
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/me", web::get().to(auth::me))
            // Content routes
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("", web::get().to(posts::list_posts))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}/like", web::post().to(posts::toggle_like))
                    .route("/{id}/comments", web::get().to(posts::list_comments)),
            )
            .route("/comments", web::post().to(comments::create_comment))
            .route("/dashboard/stats", web::get().to(dashboard::stats)),
    );
}
