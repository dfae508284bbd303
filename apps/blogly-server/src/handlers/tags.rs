//! Tag pages.

use actix_web::{HttpResponse, web};
use blogly_core::DomainError;
use blogly_core::domain::{NewTag, Tag};
use blogly_shared::{FormFields, TagForm};
use minijinja::context;

use super::{redirect, render};
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::templates::PostView;

async fn find_tag(state: &AppState, id: i32) -> AppResult<Tag> {
    state
        .tags
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Tag", id).into())
}

/// GET /tags
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.tags.find_all().await?;

    render(&state, "tags/index.html", context! { tags => tags })
}

/// GET /tags/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let tag = find_tag(&state, path.into_inner()).await?;
    let posts: Vec<PostView> = state
        .posts
        .find_by_tag(tag.id)
        .await?
        .iter()
        .map(PostView::from)
        .collect();

    render(
        &state,
        "tags/show.html",
        context! { tag => tag, posts => posts },
    )
}

/// GET /tags/new
pub async fn new_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render(&state, "tags/new.html", context! {})
}

/// POST /tags/new
pub async fn create(
    state: web::Data<AppState>,
    form: web::Form<FormFields>,
) -> AppResult<HttpResponse> {
    let form = TagForm::try_from(&form.into_inner())?;

    let tag = state.tags.create(NewTag::new(form.name)).await?;
    tracing::info!(tag_id = tag.id, tag_name = %tag.name, "Tag created");

    Ok(redirect("/tags"))
}

/// GET /tags/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let tag = find_tag(&state, path.into_inner()).await?;

    render(&state, "tags/edit.html", context! { tag => tag })
}

/// POST /tags/{id}/edit
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<FormFields>,
) -> AppResult<HttpResponse> {
    let tag = find_tag(&state, path.into_inner()).await?;
    let form = TagForm::try_from(&form.into_inner())?;

    let tag = state
        .tags
        .update(Tag {
            id: tag.id,
            name: form.name,
        })
        .await?;
    tracing::info!(tag_id = tag.id, tag_name = %tag.name, "Tag renamed");

    Ok(redirect(format!("/tags/{}", tag.id)))
}

/// POST /tags/{id}/delete
///
/// Posts keep existing; only their association with this tag is removed.
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let tag = find_tag(&state, path.into_inner()).await?;

    state.tags.delete(tag.id).await?;
    tracing::info!(tag_id = tag.id, "Tag deleted");

    Ok(redirect("/tags"))
}
