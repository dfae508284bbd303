//! HTTP handlers and route configuration.

mod posts;
mod tags;
mod users;


use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, web};
use minijinja::Value;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Configure all application routes.
///
/// Literal `/new` segments are registered ahead of the `/{id}` patterns they overlap.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .service(
            web::scope("/users")
                .route("", web::get().to(users::index))
                .service(
                    web::resource("/new")
                        .route(web::get().to(users::new_form))
                        .route(web::post().to(users::create)),
                )
                .route("/{id}", web::get().to(users::show))
                .service(
                    web::resource("/{id}/edit")
                        .route(web::get().to(users::edit_form))
                        .route(web::post().to(users::update)),
                )
                .route("/{id}/delete", web::post().to(users::delete))
                .service(
                    web::resource("/{id}/posts/new")
                        .route(web::get().to(posts::new_form))
                        .route(web::post().to(posts::create)),
                ),
        )
        .service(
            web::scope("/posts")
                .route("/{id}", web::get().to(posts::show))
                .service(
                    web::resource("/{id}/edit")
                        .route(web::get().to(posts::edit_form))
                        .route(web::post().to(posts::update)),
                )
                .route("/{id}/delete", web::post().to(posts::delete)),
        )
        .service(
            web::scope("/tags")
                .route("", web::get().to(tags::index))
                .service(
                    web::resource("/new")
                        .route(web::get().to(tags::new_form))
                        .route(web::post().to(tags::create)),
                )
                .route("/{id}", web::get().to(tags::show))
                .service(
                    web::resource("/{id}/edit")
                        .route(web::get().to(tags::edit_form))
                        .route(web::post().to(tags::update)),
                )
                .route("/{id}/delete", web::post().to(tags::delete)),
        );
}

/// GET / - the user list is the home page.
async fn root() -> HttpResponse {
    redirect("/users")
}

/// Render `template` as a 200 HTML page.
fn render(state: &AppState, template: &str, context: Value) -> AppResult<HttpResponse> {
    let html = state.templates.render(template, context)?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

/// 302 to `location`.
fn redirect(location: impl Into<String>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.into()))
        .finish()
}
