#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use tower::ServiceExt;

use timetracker::auth::SESSION_COOKIE;
use timetracker::models::User;
use timetracker::{router, AppState, Config, Database};

pub struct TestApp {
    pub db: Database,
    router: Router,
}

/// A session cookie header value for a logged-in user.
pub struct Login {
    pub user: User,
    pub cookie: String,
}

pub async fn spawn() -> TestApp {
    let db = Database::in_memory().await.unwrap();
    db.migrate().await.unwrap();

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        session_ttl_hours: 1,
        secure_cookies: false,
    };

    TestApp {
        router: router(AppState::new(db.clone(), config)),
        db,
    }
}

impl TestApp {
    /// Create a user and a live session for them, bypassing the login form.
    pub async fn login(&self, username: &str) -> Login {
        let user = self.db.create_user(username, "unused").await.unwrap();
        let session = self
            .db
            .create_session(user.id, chrono::Duration::hours(1))
            .await
            .unwrap();
        Login {
            user,
            cookie: format!("{SESSION_COOKIE}={}", session.token),
        }
    }

    pub async fn get(&self, path: &str, login: Option<&Login>) -> Response<Body> {
        let mut req = Request::builder().method("GET").uri(path);
        if let Some(login) = login {
            req = req.header(header::COOKIE, &login.cookie);
        }
        self.send(req.body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, path: &str, login: Option<&Login>, body: &str) -> Response<Body> {
        let mut req = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(login) = login {
            req = req.header(header::COOKIE, &login.cookie);
        }
        self.send(req.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.db.get_pool())
            .await
            .unwrap()
    }

    pub async fn client(&self, login: &Login, name: &str) -> i64 {
        self.db
            .create_client(login.user.id, &timetracker::models::NewClient { name: name.into() })
            .await
            .unwrap()
    }

    pub async fn project(&self, login: &Login, name: &str, client_id: i64) -> i64 {
        self.db
            .create_project(
                login.user.id,
                &timetracker::models::NewProject {
                    name: name.into(),
                    client_id,
                },
            )
            .await
            .unwrap()
    }
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()[header::LOCATION].to_str().unwrap()
}
