//! Tower middleware that requires a logged-in session.
//!
//! `LoginRequiredLayer` wraps the application routes. Requests carrying a
//! live session cookie get a [`CurrentUser`] in their extensions; all others
//! are redirected to the login page before the inner service runs.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service};

use super::{redirect_to_login, session_token, CurrentUser};
use crate::db::Database;

#[derive(Clone)]
pub struct LoginRequiredLayer {
    db: Database,
}

impl LoginRequiredLayer {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl<S> Layer<S> for LoginRequiredLayer {
    type Service = LoginRequiredService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoginRequiredService {
            inner,
            db: self.db.clone(),
        }
    }
}

#[derive(Clone)]
pub struct LoginRequiredService<S> {
    inner: S,
    db: Database,
}

impl<S> Service<Request<Body>> for LoginRequiredService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let db = self.db.clone();

        Box::pin(async move {
            let next = req.uri().path_and_query().map(|pq| pq.as_str().to_string());

            let user = match session_token(req.headers()) {
                Some(token) => match db.get_session_user(&token).await {
                    Ok(user) => user,
                    Err(err) => return Ok(err.into_response()),
                },
                None => None,
            };

            match user {
                Some(user) => {
                    req.extensions_mut().insert(CurrentUser(user));
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                None => {
                    tracing::debug!(path = ?next, "anonymous request redirected to login");
                    Ok(redirect_to_login(next.as_deref()))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SESSION_COOKIE;
    use axum::http::{header, StatusCode};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Inner service that records which user reached it.
    #[derive(Clone)]
    struct MockService {
        seen: Arc<Mutex<Option<String>>>,
    }

    impl Service<Request<Body>> for MockService {
        type Response = Response;
        type Error = Infallible;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<Body>) -> Self::Future {
            let seen = self.seen.clone();
            Box::pin(async move {
                let user = req.extensions().get::<CurrentUser>().cloned();
                *seen.lock().unwrap() = user.map(|u| u.0.username);
                Ok((StatusCode::OK, "ok").into_response())
            })
        }
    }

    async fn setup() -> (Database, MockService) {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        let mock = MockService {
            seen: Arc::new(Mutex::new(None)),
        };
        (db, mock)
    }

    #[tokio::test]
    async fn anonymous_request_is_redirected_with_next() {
        let (db, mock) = setup().await;
        let seen = mock.seen.clone();
        let service = LoginRequiredLayer::new(db).layer(mock);

        let req = Request::builder()
            .uri("/clients/4")
            .body(Body::empty())
            .unwrap();
        let resp = service.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/login?next=%2Fclients%2F4");
        assert!(seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_token_is_redirected() {
        let (db, mock) = setup().await;
        let service = LoginRequiredLayer::new(db).layer(mock);

        let req = Request::builder()
            .uri("/clients")
            .header(header::COOKIE, format!("{SESSION_COOKIE}=bogus"))
            .body(Body::empty())
            .unwrap();
        let resp = service.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn live_session_passes_and_injects_user() {
        let (db, mock) = setup().await;
        let seen = mock.seen.clone();
        let user = db.create_user("alice", "x").await.unwrap();
        let session = db
            .create_session(user.id, chrono::Duration::hours(1))
            .await
            .unwrap();
        let service = LoginRequiredLayer::new(db).layer(mock);

        let req = Request::builder()
            .uri("/clients")
            .header(header::COOKIE, format!("{SESSION_COOKIE}={}", session.token))
            .body(Body::empty())
            .unwrap();
        let resp = service.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(seen.lock().unwrap().as_deref(), Some("alice"));
    }
}
