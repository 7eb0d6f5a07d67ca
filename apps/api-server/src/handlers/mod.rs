//! HTTP handlers and route configuration.

mod admin;
mod health;
mod mapping;
mod posts;

use actix_web::web;

use crate::middleware::error::{json_error_handler, path_error_handler, query_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/tags", web::get().to(posts::tags))
            .route("/categories", web::get().to(posts::categories))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("/featured", web::get().to(posts::featured))
                    .route("/picks", web::get().to(posts::editors_picks))
                    .route("/search", web::get().to(posts::search))
                    .route("/category/{category}", web::get().to(posts::by_category))
                    .route("/tag/{tag}", web::get().to(posts::by_tag))
                    .route("/{slug}", web::get().to(posts::by_slug)),
            )
            // Admin routes
            .service(
                web::scope("/admin")
                    .route("/stats", web::get().to(admin::stats))
                    .route("/posts", web::get().to(admin::list))
                    .route("/posts", web::post().to(admin::create))
                    .route("/posts/{id}", web::get().to(admin::get))
                    .route("/posts/{id}", web::put().to(admin::update))
                    .route("/posts/{id}", web::delete().to(admin::delete))
                    .route("/posts/{id}/publish", web::post().to(admin::publish))
                    .route("/posts/{id}/unpublish", web::post().to(admin::unpublish)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::configure_routes;
    use crate::state::AppState;

    macro_rules! app {
        ($token:expr $(,)?) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory($token)))
                    .configure(configure_routes),
            )
            .await
        };
    }

    macro_rules! create {
        ($app:expr, $body:expr $(,)?) => {{
            let req = test::TestRequest::post()
                .uri("/api/admin/posts")
                .set_json($body)
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let body: Value = test::read_body_json(resp).await;
            body
        }};
    }

    macro_rules! get {
        ($app:expr, $uri:expr) => {{
            let req = test::TestRequest::get().uri($uri).to_request();
            let resp = test::call_service(&$app, req).await;
            let status = resp.status();
            let body: Value = test::read_body_json(resp).await;
            (status, body)
        }};
    }

    #[actix_web::test]
    async fn test_health() {
        let app = app!(None);
        let (status, body) = get!(app, "/api/health");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "in-memory");
    }

    #[actix_web::test]
    async fn test_create_then_read_by_slug() {
        let app = app!(None);
        let created = create!(
            app,
            json!({
                "title": "Política de Saúde!",
                "content": "Texto do artigo",
                "published": true,
                "tags": ["sus", " sus ", ""],
                "featuredImage": "https://example.com/capa.png"
            }),
        );

        assert_eq!(created["slug"], "politica-de-saude");
        assert_eq!(created["readingTime"], 1);
        assert_eq!(created["tags"], json!(["sus"]));
        assert!(created["publishedAt"].is_string());

        let (status, body) = get!(app, "/api/posts/politica-de-saude");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Política de Saúde!");
        assert_eq!(body["featuredImage"], "https://example.com/capa.png");
    }

    #[actix_web::test]
    async fn test_drafts_are_not_public() {
        let app = app!(None);
        let created = create!(app, json!({"title": "Rascunho", "content": "Texto"}));
        assert!(created["publishedAt"].is_null());

        let (status, body) = get!(app, "/api/posts/rascunho");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Post não encontrado");
        assert_eq!(body["status"], 404);

        let (_, page) = get!(app, "/api/posts");
        assert_eq!(page["posts"], json!([]));
        assert!(page["nextCursor"].is_null());

        let (status, admin) = get!(app, &format!("/api/admin/posts/{}", created["id"]));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(admin["slug"], "rascunho");
    }

    #[actix_web::test]
    async fn test_cursor_pagination() {
        let app = app!(None);
        for n in 0..3 {
            create!(
                app,
                json!({"title": format!("Artigo {n}"), "content": "Texto", "published": true}),
            );
        }

        let (status, first) = get!(app, "/api/posts?limit=2");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["posts"].as_array().map(Vec::len), Some(2));
        let cursor = first["nextCursor"].as_i64().unwrap();

        let (_, second) = get!(app, &format!("/api/posts?limit=2&cursor={cursor}"));
        assert_eq!(second["posts"].as_array().map(Vec::len), Some(1));
        assert!(second["nextCursor"].is_null());
    }

    #[actix_web::test]
    async fn test_bad_inputs_are_400() {
        let app = app!(None);

        let (status, body) = get!(app, "/api/posts?limit=0");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(body["detail"].as_str().unwrap().contains("entre 1 e 50"));

        let (status, _) = get!(app, "/api/posts?limit=muitos");
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get!(app, "/api/admin/posts/abc");
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/admin/posts")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{nada")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/admin/posts")
            .set_json(json!({"title": "  ", "content": "Texto"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "O título é obrigatório");
    }

    #[actix_web::test]
    async fn test_admin_token_is_enforced() {
        let app = app!(Some("segredo"));

        let (status, body) = get!(app, "/api/admin/stats");
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Não autorizado");

        let req = test::TestRequest::get()
            .uri("/api/admin/stats")
            .insert_header((header::AUTHORIZATION, "Bearer errado"))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::get()
            .uri("/api/admin/stats")
            .insert_header((header::AUTHORIZATION, "Bearer segredo"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"total": 0, "published": 0, "drafts": 0}));

        let (status, _) = get!(app, "/api/posts");
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_update_publish_and_delete() {
        let app = app!(None);
        let created = create!(
            app,
            json!({"title": "Vacinas", "content": "Texto", "featuredImage": "capa.png"}),
        );
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/admin/posts/{id}"))
            .set_json(json!({"featuredImage": null, "excerpt": "Resumo"}))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert!(updated["featuredImage"].is_null());
        assert_eq!(updated["excerpt"], "Resumo");

        let req = test::TestRequest::post()
            .uri(&format!("/api/admin/posts/{id}/publish"))
            .to_request();
        let live: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(live["published"], true);
        assert!(live["publishedAt"].is_string());

        let req = test::TestRequest::post()
            .uri(&format!("/api/admin/posts/{id}/unpublish"))
            .to_request();
        let draft: Value = test::call_and_read_body_json(&app, req).await;
        assert!(draft["publishedAt"].is_null());

        let delete = || {
            test::TestRequest::delete()
                .uri(&format!("/api/admin/posts/{id}"))
                .to_request()
        };
        assert_eq!(test::call_service(&app, delete()).await.status(), StatusCode::OK);
        assert_eq!(
            test::call_service(&app, delete()).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::put()
            .uri(&format!("/api/admin/posts/{id}"))
            .set_json(json!({"title": "Outro"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_listings() {
        let app = app!(None);
        create!(
            app,
            json!({
                "title": "Tecnologia na Saúde",
                "content": "Telemedicina e dados",
                "published": true,
                "category": "featured",
                "tags": ["tecnologia", "sus"],
                "featuredImage": "capa.png"
            }),
        );
        create!(
            app,
            json!({
                "title": "Epidemiologia",
                "content": "Estudos de coorte",
                "published": true,
                "category": "epidemiologia",
                "tags": ["pesquisa"]
            }),
        );

        let (_, featured) = get!(app, "/api/posts/featured");
        assert_eq!(featured.as_array().map(Vec::len), Some(1));

        let (_, picks) = get!(app, "/api/posts/picks?limit=10");
        assert_eq!(picks[0]["slug"], "tecnologia-na-saude");

        let (status, _) = get!(app, "/api/posts/picks?limit=11");
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, hits) = get!(app, "/api/posts/search?q=COORTE");
        assert_eq!(hits[0]["slug"], "epidemiologia");

        let (_, none) = get!(app, "/api/posts/search?q=");
        assert_eq!(none, json!([]));

        let (_, by_tag) = get!(app, "/api/posts/tag/sus");
        assert_eq!(by_tag.as_array().map(Vec::len), Some(1));

        let (_, by_category) = get!(app, "/api/posts/category/epidemiologia");
        assert_eq!(by_category[0]["title"], "Epidemiologia");

        let (_, tags) = get!(app, "/api/tags");
        assert_eq!(tags, json!(["pesquisa", "sus", "tecnologia"]));

        let (_, categories) = get!(app, "/api/categories");
        assert_eq!(categories, json!(["epidemiologia", "featured"]));
    }
}
