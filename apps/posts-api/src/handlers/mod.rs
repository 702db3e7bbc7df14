//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error))
        .app_data(web::PathConfig::default().error_handler(error::path_error))
        .app_data(web::QueryConfig::default().error_handler(error::query_error))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Post routes; create and delete require a bearer token
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(posts::create_post))
                        .route("", web::get().to(posts::list_posts))
                        .route("/count/{user_id}", web::get().to(posts::count_posts))
                        .route("/{id}", web::get().to(posts::get_post))
                        .route("/{id}", web::delete().to(posts::delete_post)),
                ),
        );
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use actix_web::web;
    use posts_core::PostService;
    use posts_core::ports::TokenService;
    use posts_core::testing::{FakeDiscussion, FakeIdentity, FakeRepository};
    use posts_infra::{JwtConfig, JwtTokenService};
    use uuid::Uuid;

    use crate::state::AppState;

    pub struct TestApp {
        pub repo: Arc<FakeRepository>,
        pub discussion: Arc<FakeDiscussion>,
        pub identity: Arc<FakeIdentity>,
        pub tokens: Arc<JwtTokenService>,
    }

    impl TestApp {
        pub fn new(repo: FakeRepository, discussion: FakeDiscussion, identity: FakeIdentity) -> Self {
            Self {
                repo: Arc::new(repo),
                discussion: Arc::new(discussion),
                identity: Arc::new(identity),
                tokens: Arc::new(JwtTokenService::new(JwtConfig::default())),
            }
        }

        pub fn bearer(&self, user_id: &str) -> (&'static str, String) {
            let token = self.tokens.issue_token(user_id).unwrap();
            ("Authorization", format!("Bearer {token}"))
        }

        pub fn configure(&self) -> impl FnOnce(&mut web::ServiceConfig) {
            let service = PostService::new(
                self.repo.clone(),
                self.discussion.clone(),
                self.identity.clone(),
                Uuid::nil(),
            );
            let state = AppState::from_service(service);
            let tokens: Arc<dyn TokenService> = self.tokens.clone();
            move |cfg| {
                cfg.app_data(web::Data::new(state))
                    .app_data(web::Data::new(tokens))
                    .configure(super::configure_routes);
            }
        }
    }
}
