use actix_web::{web, HttpResponse};

use super::auth_utils::{hash_password, verify_hash};
use super::context::RequestContext;
use super::dtos::user::ChangePasswordDTO;
use super::errors::{AuthError, TodoApiError};
use crate::models::{
    session::{Session, Store},
    user_model::{User, UserProfile},
};

/// Profile of the calling user
pub async fn get_user<S: Store>(ctx: RequestContext<S>) -> Result<HttpResponse, actix_web::Error> {
    let user_id = ctx.identity.id;

    let user = ctx
        .with_session(move |session| load_caller(session, user_id))
        .await?;

    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

/// Change the caller's password after checking the current one
pub async fn change_password<S: Store>(
    ctx: RequestContext<S>,
    request_data: web::Json<ChangePasswordDTO>,
) -> Result<HttpResponse, actix_web::Error> {
    let user_id = ctx.identity.id;
    let change = request_data.into_inner();

    ctx.with_session(move |session| replace_password(session, user_id, change))
        .await?;

    log::info!(
        "User {} ({}) changed their password",
        ctx.identity.username,
        user_id
    );

    Ok(HttpResponse::NoContent().finish())
}

/// The user behind the resolved identity. A token outliving its user does
/// not authenticate anybody.
fn load_caller<T: Session>(session: &mut T, user_id: i32) -> Result<User, TodoApiError> {
    session.find_user(user_id)?.ok_or_else(|| {
        log::warn!("Token refers to missing user {}", user_id);
        TodoApiError::authentication_failed()
    })
}

fn replace_password<T: Session>(
    session: &mut T,
    user_id: i32,
    change: ChangePasswordDTO,
) -> Result<(), TodoApiError> {
    let user = load_caller(session, user_id)?;

    if !verify_hash(&user.hashed_password, &change.password)? {
        log::warn!("Rejected password change for user {}", user_id);
        return Err(TodoApiError::AuthError(AuthError::PasswordChangeRejected));
    }

    let new_hash = hash_password(change.new_password.as_str())?;

    session.set_password(user_id, &new_hash)?;
    session.commit()
}
