//! User pages.

use actix_web::{HttpResponse, web};
use blogly_core::DomainError;
use blogly_core::domain::{NewUser, User};
use blogly_shared::{FormFields, UserForm};
use minijinja::context;

use super::{redirect, render};
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::templates::{PostView, UserView};

pub(super) async fn find_user(state: &AppState, id: i32) -> AppResult<User> {
    state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", id).into())
}

/// GET /users
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users: Vec<UserView> = state
        .users
        .list_by_name()
        .await?
        .iter()
        .map(UserView::from)
        .collect();

    render(&state, "users/index.html", context! { users => users })
}

/// GET /users/new
pub async fn new_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render(&state, "users/new.html", context! {})
}

/// POST /users/new
pub async fn create(
    state: web::Data<AppState>,
    form: web::Form<FormFields>,
) -> AppResult<HttpResponse> {
    let form = UserForm::try_from(&form.into_inner())?;

    let user = state
        .users
        .create(NewUser::new(form.first_name, form.last_name, form.image_url))
        .await?;
    tracing::info!(user_id = user.id, "User created");

    Ok(redirect("/users"))
}

/// GET /users/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let user = find_user(&state, path.into_inner()).await?;
    let posts: Vec<PostView> = state
        .posts
        .find_by_author(user.id)
        .await?
        .iter()
        .map(PostView::from)
        .collect();

    render(
        &state,
        "users/show.html",
        context! { user => UserView::from(&user), posts => posts },
    )
}

/// GET /users/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user = find_user(&state, path.into_inner()).await?;

    render(
        &state,
        "users/edit.html",
        context! { user => UserView::from(&user) },
    )
}

/// POST /users/{id}/edit
///
/// Values are stored as submitted: unlike creation, an empty image URL stays empty.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<FormFields>,
) -> AppResult<HttpResponse> {
    let user = find_user(&state, path.into_inner()).await?;
    let form = UserForm::try_from(&form.into_inner())?;

    let user = state
        .users
        .update(User {
            id: user.id,
            first_name: form.first_name,
            last_name: form.last_name,
            image_url: form.image_url,
        })
        .await?;
    tracing::info!(user_id = user.id, "User updated");

    Ok(redirect("/users"))
}

/// POST /users/{id}/delete
///
/// The user's posts go with them.
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let user = find_user(&state, path.into_inner()).await?;

    state.users.delete(user.id).await?;
    tracing::info!(user_id = user.id, "User deleted");

    Ok(redirect("/users"))
}
