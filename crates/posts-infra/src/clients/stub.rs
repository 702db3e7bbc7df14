//! Throwaway actix-web servers standing in for the remote services.

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use uuid::Uuid;

/// Nothing listens on port 1.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

pub const TAKEN_TITLE: &str = "Taken title";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";

pub struct StubServer {
    pub base_url: String,
    handle: ServerHandle,
}

impl StubServer {
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Bind a stub service on an ephemeral port and run it in the background.
pub async fn spawn(configure: fn(&mut web::ServiceConfig)) -> StubServer {
    let server = HttpServer::new(move || App::new().configure(configure))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind stub server");
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    StubServer {
        base_url: format!("http://{}", addr),
        handle,
    }
}

pub fn discussion(cfg: &mut web::ServiceConfig) {
    cfg.route("/discussion/{id}", web::get().to(get_category))
        .route("/topic", web::post().to(create_topic))
        .route("/topic/{id}", web::get().to(get_topic));
}

pub fn identity(cfg: &mut web::ServiceConfig) {
    cfg.route("/profile", web::get().to(profile));
}

pub fn storage(cfg: &mut web::ServiceConfig) {
    cfg.route("/repository/{id}", web::delete().to(delete_repository));
}

async fn get_category(path: web::Path<Uuid>) -> HttpResponse {
    if path.into_inner().is_nil() {
        return HttpResponse::InternalServerError().json(json!({"error": {"message": "boom"}}));
    }
    HttpResponse::Ok().json(json!({
        "data": {
            "id": "1",
            "name": "postdiscussion",
            "topics": [
                {"id": 123, "posts_count": 4, "title": "first"},
                {"id": "124", "posts_count": 1, "title": "second"}
            ]
        }
    }))
}

async fn create_topic(body: web::Json<Value>) -> HttpResponse {
    if body["title"] == TAKEN_TITLE {
        return HttpResponse::BadRequest()
            .json(json!({"error": {"message": "Title has already been used"}}));
    }
    HttpResponse::Created().json(json!({"data": {"topic_id": 777}}))
}

async fn get_topic(path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    if id == 404 {
        return HttpResponse::NotFound().json(json!({"error": {"message": "no such topic"}}));
    }
    HttpResponse::Ok().json(json!({
        "data": {
            "id": id,
            "posts": [
                {"post_number": 1, "cooked": "original"},
                {"post_number": 2, "cooked": "reply"},
                {"post_number": 3, "cooked": "another reply"}
            ]
        }
    }))
}

async fn profile(req: HttpRequest) -> HttpResponse {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        None => HttpResponse::Unauthorized().finish(),
        Some(ADMIN_TOKEN) => HttpResponse::Ok().json(json!({"data": {"roles": ["user", "ADMIN"]}})),
        Some(USER_TOKEN) => HttpResponse::Ok().json(json!({"data": {"roles": ["user"]}})),
        Some(_) => HttpResponse::InternalServerError().finish(),
    }
}

async fn delete_repository(path: web::Path<Uuid>) -> HttpResponse {
    if path.into_inner().is_nil() {
        return HttpResponse::BadGateway()
            .json(json!({"error": {"message": "gitlab unavailable"}}));
    }
    HttpResponse::NoContent().finish()
}
