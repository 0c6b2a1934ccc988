use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use seguridad_digital::{
    routes::router,
    state::{AppState, SharedState},
    types::VoteType,
};
use std::io;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

fn setup() -> (Router, SharedState, sled::Db) {
    let db = sled::Config::new().temporary(true).open().unwrap();
    let state: SharedState = Arc::new(Mutex::new(AppState::new(db.clone()).unwrap()));
    (router(state.clone()), state, db)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>) {
    let resp = app
        .clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (resp.status(), location)
}

async fn login_admin(app: &Router) {
    let (status, location) = post_form(
        app,
        "/admin/login",
        "email=admin%40seguridad.com&password=Admin123%21",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/admin"));
}

#[tokio::test]
async fn test_every_page_renders() {
    let (app, _, _) = setup();
    for uri in ["/", "/phishing", "/security", "/gaming", "/social", "/grooming", "/admin", "/unknown"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.contains("<nav>"), "{uri}");
    }
    let (_, body) = get(&app, "/unknown").await;
    assert!(body.contains("Centro de Reportes Ciudadanos"));
}

#[tokio::test]
async fn test_report_flow() {
    let (app, state, _) = setup();

    let (status, _) = post_form(&app, "/reports", "title=++&description=algo").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(state.lock().unwrap().reports.get().is_empty());

    post_form(&app, "/reports", "title=Perfil+falso&description=Pide+fotos").await;
    let (_, body) = get(&app, "/").await;
    assert!(body.contains("Reporte enviado"));
    assert!(body.contains("Perfil falso"));
    assert_eq!(state.lock().unwrap().reports.get().len(), 1);
}

#[tokio::test]
async fn test_login_failure_is_generic() {
    let (app, state, _) = setup();
    post_form(&app, "/admin/login", "email=ADMIN%40seguridad.com&password=Admin123%21").await;
    let (_, body) = get(&app, "/admin").await;
    assert!(body.contains("Credenciales incorrectas"));
    assert!(!state.lock().unwrap().is_authenticated());

    login_admin(&app).await;
    let (_, body) = get(&app, "/admin").await;
    assert!(!body.contains("Credenciales incorrectas"));
    assert!(body.contains("Escribir Nueva Historia"));

    post_form(&app, "/admin/logout", "").await;
    assert!(!state.lock().unwrap().is_authenticated());
}

#[tokio::test]
async fn test_publish_requires_login() {
    let (app, state, _) = setup();
    post_form(&app, "/admin/posts", "title=T&body=B").await;
    assert!(state.lock().unwrap().posts.get().is_empty());

    login_admin(&app).await;
    post_form(&app, "/admin/posts", "title=T&body=+++").await;
    assert!(state.lock().unwrap().posts.get().is_empty());

    post_form(&app, "/admin/posts", "title=Caso+real&body=Un+adulto+contact%C3%B3").await;
    let (_, body) = get(&app, "/admin").await;
    assert!(body.contains("publicada con éxito"));
    assert!(body.contains("Historias Publicadas (1)"));

    let (_, body) = get(&app, "/grooming").await;
    assert!(body.contains("Caso real"));
    assert!(body.contains("Un adulto contactó..."));
}

#[tokio::test]
async fn test_one_vote_per_post() {
    let (app, state, db) = setup();
    login_admin(&app).await;
    post_form(&app, "/admin/posts", "title=Historia&body=Texto").await;
    let id = state.lock().unwrap().posts.get()[0].id;

    let (status, location) = post_form(&app, &format!("/grooming/{id}/vote/likes"), "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, Some(format!("/grooming/{id}")));
    post_form(&app, &format!("/grooming/{id}/vote/dislikes"), "").await;
    post_form(&app, &format!("/grooming/{id}/vote/likes"), "").await;

    {
        let s = state.lock().unwrap();
        let post = &s.posts.get()[0];
        assert_eq!((post.likes, post.dislikes), (1, 0));
        assert_eq!(s.votes.get().get(&id), Some(&VoteType::Likes));
    }

    let (status, body) = get(&app, &format!("/grooming/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(" disabled"));

    // a fresh process over the same store sees the same counters and vote
    let reloaded = AppState::new(db).unwrap();
    assert_eq!(reloaded.posts.get(), state.lock().unwrap().posts.get());
    assert_eq!(reloaded.votes.get().get(&id), Some(&VoteType::Likes));
}

#[tokio::test]
async fn test_vote_errors() {
    let (app, _, _) = setup();
    let (status, _) = post_form(&app, "/grooming/123/vote/likes", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = post_form(&app, "/grooming/123/vote/love", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get(&app, "/grooming/123").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quiz_first_answer_is_final() {
    let (app, state, _) = setup();
    post_form(&app, "/phishing/answer", "question=0&option=1").await;
    post_form(&app, "/phishing/answer", "question=0&option=0").await;
    assert_eq!(state.lock().unwrap().phishing.score(), 1);

    let (_, body) = get(&app, "/phishing").await;
    assert!(body.contains("1/3"));
    assert!(body.contains("Nunca compartas códigos"));

    let (status, _) = post_form(&app, "/phishing/answer", "question=7&option=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    post_form(&app, "/phishing/reset", "").await;
    assert_eq!(state.lock().unwrap().phishing.score(), 0);
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_password_evaluator_page() {
    let (app, _, _) = setup();
    let resp = app
        .clone()
        .oneshot(
            Request::post("/security")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("password=Aa1%21aaaa"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("data-strength=\"strong\""));
    assert!(body.contains("method=\"post\" action=\"/security\""));

    let (status, body) = get(&app, "/security").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("data-strength=\"empty\""));
}

#[tokio::test]
async fn test_password_stays_out_of_request_logs() {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let (app, _, _) = setup();
    let resp = app
        .clone()
        .oneshot(
            Request::post("/security")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("password=MySecretPw9%21"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // a query string is not evaluated
    let (_, body) = get(&app, "/security?password=Aa1%21aaaa").await;
    assert!(body.contains("data-strength=\"empty\""));

    let out = logs.contents();
    assert!(out.contains("uri=/security"));
    assert!(!out.contains("MySecretPw9"));
}
