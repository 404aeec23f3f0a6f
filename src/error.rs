use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::lookup::NOT_FOUND_MESSAGE;
use crate::pdf::PdfError;
use crate::render::RenderError;
use crate::routes::index_page;

pub const NOT_READY_MESSAGE: &str = "El listado de participantes aún no está disponible.";
pub const MISSING_NAME_MESSAGE: &str = "El registro de este correo no tiene un nombre asociado.";
pub const FAILURE_MESSAGE: &str = "No fue posible generar el certificado.";

#[derive(Debug, thiserror::Error)]
pub enum CertificateError {
    #[error("no participant registered under {0}")]
    NotFound(String),
    #[error("participant {0} has no name on the roster")]
    MissingName(String),
    #[error("roster is not ready")]
    NotReady,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Pdf(#[from] PdfError),
    #[error("certificate export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl CertificateError {
    pub fn status(&self) -> StatusCode {
        match self {
            CertificateError::NotFound(_) => StatusCode::NOT_FOUND,
            CertificateError::MissingName(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CertificateError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            CertificateError::Render(_)
            | CertificateError::Pdf(_)
            | CertificateError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            CertificateError::NotFound(_) => NOT_FOUND_MESSAGE,
            CertificateError::MissingName(_) => MISSING_NAME_MESSAGE,
            CertificateError::NotReady => NOT_READY_MESSAGE,
            CertificateError::Render(_)
            | CertificateError::Pdf(_)
            | CertificateError::Task(_) => FAILURE_MESSAGE,
        }
    }
}

impl IntoResponse for CertificateError {
    fn into_response(self) -> Response {
        let ready = !matches!(self, CertificateError::NotReady);
        let email = match &self {
            CertificateError::NotFound(email) | CertificateError::MissingName(email) => email.as_str(),
            _ => "",
        };
        (self.status(), index_page(ready, email, self.user_message())).into_response()
    }
}
