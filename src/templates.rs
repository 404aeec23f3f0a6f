use axum::response::Html;
use std::sync::OnceLock;
use tera::{Context, Tera};

static TERA: OnceLock<Tera> = OnceLock::new();

const INDEX: &str = include_str!("../templates/index.html");

pub fn get_tera() -> &'static Tera {
    TERA.get_or_init(|| {
        let mut tera = Tera::default();
        if let Err(e) = tera.add_raw_template("index.html", INDEX) {
            tracing::error!("Failed to load index template: {}", e);
        }
        tera
    })
}

pub fn render_template(name: &str, ctx: &Context) -> Html<String> {
    let rendered = get_tera().render(name, ctx).unwrap_or_else(|e| {
        tracing::error!("Template {} failed: {}", name, e);
        format!("Template error: {}", name)
    });
    Html(rendered)
}
