//! Service and HTTP tests for the news crate, run against the in-memory store

#[cfg(test)]
mod service_tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use kernel::id::{ArticleId, AuthorId, UserId};

    use crate::application::{
        ArticleService, AuthorService, BookmarkService, CreateArticleInput, CreateAuthorInput,
        UpdateArticleInput, UpdateAuthorInput,
    };
    use crate::error::NewsError;
    use crate::infra::memory::MemoryNewsRepository;

    struct Services {
        authors: AuthorService<MemoryNewsRepository>,
        articles: ArticleService<MemoryNewsRepository>,
        bookmarks: BookmarkService<MemoryNewsRepository>,
    }

    fn services() -> Services {
        let repo = Arc::new(MemoryNewsRepository::new());
        Services {
            authors: AuthorService::new(repo.clone()),
            articles: ArticleService::new(repo.clone()),
            bookmarks: BookmarkService::new(repo),
        }
    }

    async fn ada(s: &Services) -> AuthorId {
        s.authors
            .create(CreateAuthorInput {
                name: "Ada".into(),
                surname: "Lovelace".into(),
            })
            .await
            .unwrap()
    }

    fn article(author_id: AuthorId) -> CreateArticleInput {
        CreateArticleInput {
            author_id,
            title: "On the Analytical Engine".into(),
            content: "The engine weaves algebraic patterns.".into(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_author_lifecycle() {
        let s = services();
        let id = ada(&s).await;

        let author = s.authors.get(id).await.unwrap();
        assert_eq!(author.full_name(), "Ada Lovelace");

        let updated = s
            .authors
            .update(
                id,
                UpdateAuthorInput {
                    surname: Some("King".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name.as_str(), "Ada");
        assert_eq!(updated.surname.as_str(), "King");

        s.authors.delete(id).await.unwrap();
        assert!(matches!(s.authors.get(id).await, Err(NewsError::AuthorNotFound)));
        assert!(matches!(s.authors.delete(id).await, Err(NewsError::AuthorNotFound)));
    }

    #[tokio::test]
    async fn test_author_validation() {
        let s = services();
        let err = s
            .authors
            .create(CreateAuthorInput {
                name: "".into(),
                surname: "Lovelace".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::Validation(_)));
        assert!(s.authors.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_update_rejected() {
        let s = services();
        let id = ada(&s).await;

        let err = s
            .authors
            .update(id, UpdateAuthorInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::EmptyUpdate));

        let article_id = s.articles.create(article(id)).await.unwrap();
        let err = s
            .articles
            .update(article_id, UpdateArticleInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::EmptyUpdate));
    }

    #[tokio::test]
    async fn test_update_missing_author() {
        let s = services();
        let err = s
            .authors
            .update(
                AuthorId::from_i64(7),
                UpdateAuthorInput {
                    name: Some("Grace".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::AuthorNotFound));
    }

    #[tokio::test]
    async fn test_article_lifecycle() {
        let s = services();
        let author_id = ada(&s).await;
        let id = s.articles.create(article(author_id)).await.unwrap();

        let view = s.articles.get(id).await.unwrap();
        assert_eq!(view.author, "Ada Lovelace");
        assert_eq!(view.title, "On the Analytical Engine");

        s.articles
            .update(
                id,
                UpdateArticleInput {
                    title: Some("Notes by the translator".into()),
                    content: None,
                },
            )
            .await
            .unwrap();
        let view = s.articles.get(id).await.unwrap();
        assert_eq!(view.title, "Notes by the translator");
        assert_eq!(view.content, "The engine weaves algebraic patterns.");

        s.articles.delete(id).await.unwrap();
        assert!(matches!(s.articles.get(id).await, Err(NewsError::ArticleNotFound)));
    }

    #[tokio::test]
    async fn test_article_length_rules() {
        let s = services();
        let author_id = ada(&s).await;

        let short_title = s
            .articles
            .create(CreateArticleInput {
                title: "Too short".into(),
                ..article(author_id)
            })
            .await;
        assert!(matches!(short_title, Err(NewsError::Validation(_))));

        let short_content = s
            .articles
            .create(CreateArticleInput {
                content: "Not enough".into(),
                ..article(author_id)
            })
            .await;
        assert!(matches!(short_content, Err(NewsError::Validation(_))));

        let id = s.articles.create(article(author_id)).await.unwrap();
        let short_update = s
            .articles
            .update(
                id,
                UpdateArticleInput {
                    title: None,
                    content: Some("tiny".into()),
                },
            )
            .await;
        assert!(matches!(short_update, Err(NewsError::Validation(_))));
    }

    #[tokio::test]
    async fn test_article_for_unknown_author() {
        let s = services();
        let err = s
            .articles
            .create(article(AuthorId::from_i64(42)))
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::AuthorNotFound));
    }

    #[tokio::test]
    async fn test_explicit_created_at_kept() {
        let s = services();
        let author_id = ada(&s).await;
        let when = Utc.with_ymd_and_hms(1843, 9, 1, 12, 0, 0).unwrap();

        let id = s
            .articles
            .create(CreateArticleInput {
                created_at: Some(when),
                ..article(author_id)
            })
            .await
            .unwrap();
        assert_eq!(s.articles.get(id).await.unwrap().created_at, when);
    }

    #[tokio::test]
    async fn test_author_articles() {
        let s = services();
        let ada_id = ada(&s).await;
        let grace_id = s
            .authors
            .create(CreateAuthorInput {
                name: "Grace".into(),
                surname: "Hopper".into(),
            })
            .await
            .unwrap();
        s.articles.create(article(ada_id)).await.unwrap();
        s.articles.create(article(grace_id)).await.unwrap();

        let by_ada = s.authors.articles(ada_id).await.unwrap();
        assert_eq!(by_ada.len(), 1);
        assert_eq!(by_ada[0].author, "Ada Lovelace");
        assert_eq!(s.articles.list().await.unwrap().len(), 2);

        assert!(matches!(
            s.authors.articles(AuthorId::from_i64(99)).await,
            Err(NewsError::AuthorNotFound)
        ));
    }

    #[tokio::test]
    async fn test_bookmarks_are_per_user() {
        let s = services();
        let author_id = ada(&s).await;
        let id = s.articles.create(article(author_id)).await.unwrap();
        let (alice, bob) = (UserId::from_i64(1), UserId::from_i64(2));

        s.bookmarks.add(alice, id).await.unwrap();

        assert_eq!(s.bookmarks.list(alice).await.unwrap()[0].id, id);
        assert!(s.bookmarks.list(bob).await.unwrap().is_empty());

        let err = s
            .bookmarks
            .add(alice, ArticleId::from_i64(500))
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::ArticleNotFound));
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::{Router, middleware};
    use chrono::Utc;
    use kernel::id::UserId;
    use tower::ServiceExt;

    use auth::middleware::require_access_token;
    use auth::{AccessTokenCodec, AuthConfig};

    use crate::infra::memory::MemoryNewsRepository;
    use crate::presentation::router::news_router;

    struct TestApp {
        router: Router,
        codec: Arc<AccessTokenCodec>,
    }

    impl TestApp {
        fn new() -> Self {
            let config = AuthConfig::development();
            let codec = Arc::new(AccessTokenCodec::new(&config).unwrap());
            let router = news_router(MemoryNewsRepository::new()).layer(
                middleware::from_fn_with_state(codec.clone(), require_access_token),
            );
            Self { router, codec }
        }

        fn token(&self, user_id: i64) -> String {
            self.codec
                .issue(UserId::from_i64(user_id), Utc::now())
                .unwrap()
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            user_id: i64,
            body: Option<serde_json::Value>,
        ) -> (StatusCode, serde_json::Value) {
            let builder = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", self.token(user_id)));

            let request = match body {
                Some(json) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json.to_string())),
                None => builder.body(Body::empty()),
            }
            .unwrap();

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json = if bytes.is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, json)
        }
    }

    async fn seed(app: &TestApp) -> (i64, i64) {
        let (status, body) = app
            .send(
                "POST",
                "/authors",
                1,
                Some(serde_json::json!({ "name": "Ada", "surname": "Lovelace" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let author_id = body["id"].as_i64().unwrap();

        let (status, body) = app
            .send(
                "POST",
                "/articles",
                1,
                Some(serde_json::json!({
                    "author_id": author_id,
                    "title": "On the Analytical Engine",
                    "content": "The engine weaves algebraic patterns.",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        (author_id, body["id"].as_i64().unwrap())
    }

    #[tokio::test]
    async fn test_requires_access_token() {
        let app = TestApp::new();
        let response = app
            .router
            .clone()
            .oneshot(Request::get("/articles").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_and_get_shapes() {
        let app = TestApp::new();
        let (author_id, article_id) = seed(&app).await;

        let (status, body) = app.send("GET", "/authors", 1, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["id"], author_id);
        assert_eq!(body["data"][0]["surname"], "Lovelace");

        let (status, body) = app
            .send("GET", &format!("/articles/{article_id}"), 1, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["article"]["author"], "Ada Lovelace");
        assert!(body["article"]["created_at"].is_string());

        let (_, body) = app
            .send("GET", &format!("/authors/{author_id}/articles"), 1, None)
            .await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_path_ids() {
        let app = TestApp::new();
        for uri in ["/authors/0", "/authors/abc", "/articles/-3"] {
            let (status, _) = app.send("GET", uri, 1, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_not_found_and_validation_statuses() {
        let app = TestApp::new();
        let (author_id, article_id) = seed(&app).await;

        let (status, _) = app.send("GET", "/articles/999", 1, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app
            .send(
                "PUT",
                &format!("/articles/{article_id}"),
                1,
                Some(serde_json::json!({})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["action"].is_string());

        let (status, _) = app
            .send(
                "POST",
                "/articles",
                1,
                Some(serde_json::json!({
                    "author_id": author_id,
                    "title": "Short",
                    "content": "The engine weaves algebraic patterns.",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let app = TestApp::new();
        let (author_id, article_id) = seed(&app).await;

        let (status, body) = app
            .send(
                "PUT",
                &format!("/authors/{author_id}"),
                1,
                Some(serde_json::json!({ "name": "Augusta" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Augusta");

        let (status, body) = app
            .send("DELETE", &format!("/articles/{article_id}"), 1, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["status"].as_str().unwrap().contains("deleted"));

        let (status, _) = app
            .send("DELETE", &format!("/articles/{article_id}"), 1, None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bookmarks_follow_token_subject() {
        let app = TestApp::new();
        let (_, article_id) = seed(&app).await;

        let (status, _) = app
            .send("POST", &format!("/articles/{article_id}/bookmark"), 7, None)
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, mine) = app.send("GET", "/bookmarks", 7, None).await;
        assert_eq!(mine["data"][0]["id"], article_id);

        let (_, theirs) = app.send("GET", "/bookmarks", 8, None).await;
        assert!(theirs["data"].as_array().unwrap().is_empty());
    }
}
