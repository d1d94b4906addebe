use actix_web::{web, HttpResponse};

use super::context::AdminContext;
use super::dtos::todo::TodoId;
use super::errors::TodoApiError;
use crate::models::session::{Session, Store};

/// Api handler listing every todo of every user
pub async fn list_todos<S: Store>(ctx: AdminContext<S>) -> Result<HttpResponse, actix_web::Error> {
    let list = ctx.with_session(|session| session.all_todos()).await?;

    Ok(HttpResponse::Ok().json(&list))
}

/// Api to delete any TODO
pub async fn delete_todo<S: Store>(
    ctx: AdminContext<S>,
    todo_id: web::Path<TodoId>,
) -> Result<HttpResponse, actix_web::Error> {
    let todo_id = todo_id.into_inner().get();

    ctx.with_session(move |session| remove_todo(session, todo_id))
        .await?;

    log::info!("Admin {} deleted todo {}", ctx.identity.id, todo_id);

    Ok(HttpResponse::NoContent().finish())
}

/// Remove the todo with `todo_id`, failing if there is none
fn remove_todo<T: Session>(session: &mut T, todo_id: i32) -> Result<(), TodoApiError> {
    let not_found = || TodoApiError::NotFound(String::from("Todo"));

    if session.find_todo(todo_id)?.is_none() {
        return Err(not_found());
    }

    // The row may be gone by now if another request deleted it first
    if session.delete_todo(todo_id)? == 0 {
        return Err(not_found());
    }

    session.commit()
}
