use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;

use crate::error::CertificateError;
use crate::lookup::{activity_lines, display_name, find};
use crate::pdf::FILENAME;
use crate::state::AppState;
use crate::templates::render_template;

pub fn index_page(ready: bool, email: &str, message: &str) -> Html<String> {
    let mut ctx = Context::new();
    ctx.insert("ready", &ready);
    ctx.insert("email", email);
    ctx.insert("message", message);
    render_template("index.html", &ctx)
}

pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let ready = state.roster.read().await.roster().is_some();
    index_page(ready, "", "")
}

#[derive(Deserialize)]
pub struct CertificateForm {
    email: String,
}

pub async fn generate_certificate(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CertificateForm>,
) -> Result<Response, CertificateError> {
    let roster = state
        .roster
        .read()
        .await
        .roster()
        .cloned()
        .ok_or(CertificateError::NotReady)?;

    let email = form.email.trim().to_string();
    let records = find(&roster, &email);
    if records.is_empty() {
        tracing::warn!("No participant registered under {}", email);
        return Err(CertificateError::NotFound(email));
    }

    let name = display_name(&records)
        .ok_or_else(|| CertificateError::MissingName(email.clone()))?
        .to_string();
    let lines = activity_lines(&records);

    let mut renderer = state.renderer.clone().lock_owned().await;
    renderer
        .render(&state.assets, &name, &lines)
        .await
        .inspect_err(|e| tracing::error!("Certificate rendering failed: {}", e))?;

    // Encoding and PDF assembly are CPU-bound; the guard moves along so the
    // canvas stays locked until the export is done.
    let exporter = state.exporter.clone();
    let pdf = tokio::task::spawn_blocking(move || exporter.export(renderer.canvas()))
        .await?
        .inspect_err(|e| tracing::error!("Certificate export failed: {}", e))?;
    tracing::info!("Issued certificate for {} ({} activities)", email, lines.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", FILENAME),
            ),
        ],
        pdf,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{body_string, ready, state};
    use crate::render::certificate::LOGO;
    use crate::roster::RosterState;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use image::{ImageFormat, Rgba, RgbaImage};
    use tower::ServiceExt;

    fn form(email: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/certificate")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("email={email}")))
            .unwrap()
    }

    fn logo_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(30, 30, Rgba([200, 0, 0, 255]))
            .save_with_format(dir.path().join(LOGO), ImageFormat::Png)
            .unwrap();
        dir
    }

    #[tokio::test]
    async fn index_hides_form_until_roster_is_ready() {
        let dir = logo_dir();
        let state = state(RosterState::Uninitialized, dir.path());
        let response = crate::routes::router(state)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("display: none"));
    }

    #[tokio::test]
    async fn unknown_email_is_reported_without_a_document() {
        let dir = logo_dir();
        let state = state(ready(), dir.path());
        let response = crate::routes::router(state)
            .oneshot(form("nadie%40x.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_ne!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert!(body_string(response)
            .await
            .contains("no está registrado entre los participantes confirmados"));
    }

    #[tokio::test]
    async fn not_ready_roster_refuses_generation() {
        let dir = logo_dir();
        let state = state(RosterState::Failed("timeout".into()), dir.path());
        let response = crate::routes::router(state)
            .oneshot(form("a%40x.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let dir = logo_dir();
        let state = state(ready(), dir.path());
        let response = crate::routes::router(state)
            .oneshot(form("c%40z.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn matching_email_downloads_pdf() {
        let dir = logo_dir();
        let state = state(ready(), dir.path());
        let response = crate::routes::router(state)
            .oneshot(form("+A%40X.COM+"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"certificadoMaraton.pdf\""
        );
        assert!(body_string(response).await.starts_with("%PDF"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_requests_each_get_a_document() {
        let dir = logo_dir();
        let app = crate::routes::router(state(ready(), dir.path()));
        let (first, second) = tokio::join!(
            app.clone().oneshot(form("a%40x.com")),
            app.oneshot(form("b%40y.com")),
        );
        for response in [first.unwrap(), second.unwrap()] {
            assert_eq!(response.status(), StatusCode::OK);
            assert!(body_string(response).await.starts_with("%PDF"));
        }
    }

    #[tokio::test]
    async fn missing_logo_fails_generation() {
        let empty = tempfile::tempdir().unwrap();
        let state = state(ready(), empty.path());
        let response = crate::routes::router(state)
            .oneshot(form("a%40x.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
