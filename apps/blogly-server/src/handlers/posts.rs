//! Post pages. Posts are created under their author: `/users/{id}/posts/new`.

use actix_web::{HttpResponse, web};
use blogly_core::DomainError;
use blogly_core::domain::{NewPost, Post, dedupe_tag_names};
use blogly_shared::{FormFields, PostForm};
use minijinja::context;

use super::users::find_user;
use super::{redirect, render};
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::templates::{PostView, TagOption, UserView};

async fn find_post(state: &AppState, id: i32) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", id).into())
}

/// Resolve submitted tag names to ids, collapsing repeats.
///
/// Every name must match an existing tag exactly; nothing is written otherwise.
async fn resolve_tags(state: &AppState, names: Vec<String>) -> AppResult<Vec<i32>> {
    let mut ids = Vec::new();
    for name in dedupe_tag_names(names) {
        let tag = state
            .tags
            .find_by_name(&name)
            .await?
            .ok_or_else(|| DomainError::UnknownTag(name.clone()))?;
        ids.push(tag.id);
    }
    Ok(ids)
}

/// GET /users/{id}/posts/new
pub async fn new_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user = find_user(&state, path.into_inner()).await?;
    let tags = state.tags.find_all().await?;

    render(
        &state,
        "posts/new.html",
        context! { user => UserView::from(&user), tags => tags },
    )
}

/// POST /users/{id}/posts/new
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<FormFields>,
) -> AppResult<HttpResponse> {
    let user = find_user(&state, path.into_inner()).await?;
    let form = PostForm::try_from(&form.into_inner())?;
    let tag_ids = resolve_tags(&state, form.selected_tags).await?;

    let post = state
        .posts
        .create(NewPost::new(user.id, form.title, form.content), &tag_ids)
        .await?;
    tracing::info!(post_id = post.id, author_id = user.id, "Post created");

    Ok(redirect(format!("/users/{}", user.id)))
}

/// GET /posts/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    let author = find_user(&state, post.author_id).await?;
    let tags = state.tags.find_by_post(post.id).await?;

    render(
        &state,
        "posts/show.html",
        context! {
            post => PostView::from(&post),
            user => UserView::from(&author),
            tags => tags,
        },
    )
}

/// GET /posts/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    let all_tags = state.tags.find_all().await?;
    let current = state.tags.find_by_post(post.id).await?;

    render(
        &state,
        "posts/edit.html",
        context! {
            post => PostView::from(&post),
            tags => TagOption::list(&all_tags, &current),
        },
    )
}

/// POST /posts/{id}/edit
///
/// The tag set is replaced wholesale, not diffed. Tag names are resolved before
/// anything is written, so an unknown name leaves the post untouched.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<FormFields>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    let form = PostForm::try_from(&form.into_inner())?;
    let tag_ids = resolve_tags(&state, form.selected_tags).await?;

    let post = state
        .posts
        .update(Post {
            title: form.title,
            content: form.content,
            ..post
        })
        .await?;
    state.posts.replace_tags(post.id, &tag_ids).await?;
    tracing::info!(post_id = post.id, tags = tag_ids.len(), "Post updated");

    Ok(redirect(format!("/posts/{}", post.id)))
}

/// POST /posts/{id}/delete
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;

    state.posts.delete(post.id).await?;
    tracing::info!(post_id = post.id, "Post deleted");

    Ok(redirect(format!("/users/{}", post.author_id)))
}
