//! Home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::OptionalMerchant;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub signed_in: bool,
}

/// Display the landing page.
pub async fn home(OptionalMerchant(merchant): OptionalMerchant) -> impl IntoResponse {
    HomeTemplate {
        signed_in: merchant.is_some(),
    }
}
