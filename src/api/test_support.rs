//! Fixtures shared by the handler tests.

use actix_web::{
    http::{header::AUTHORIZATION, Method},
    test::TestRequest,
};

use super::{
    auth_utils::{encode_token, hash_password},
    middlewares::auth::Claims,
};
use crate::models::{
    todo_model::Todo,
    user_model::{Role, User},
};

/// Builds the full app around a `MemoryStore`, evaluates to the
/// `init_service` future
macro_rules! init_app {
    ($store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($store.clone()))
                .configure(
                    crate::api::api::configure::<crate::models::memory_store::MemoryStore>,
                ),
        )
    };
}

pub fn sample_todo(id: i32, owner_id: i32) -> Todo {
    Todo {
        id,
        title: format!("Todo #{}", id),
        description: String::from("something to do"),
        priority: 3,
        complete: false,
        owner_id,
    }
}

pub fn sample_user(id: i32, role: Role, password: &str) -> User {
    User {
        id,
        email: format!("user{}@example.com", id),
        username: format!("user{}", id),
        first_name: String::from("Test"),
        last_name: format!("User{}", id),
        hashed_password: hash_password(password).unwrap(),
        is_active: true,
        role,
        phone_number: None,
    }
}

/// `Authorization` header value for a caller
pub fn bearer(id: i32, role: Role) -> String {
    let claims = Claims::new(&format!("user{}", id), id, role);

    format!("Bearer {}", encode_token(&claims))
}

pub fn request(method: Method, uri: &str, authorization: Option<&str>) -> TestRequest {
    let req = TestRequest::default().method(method).uri(uri);

    match authorization {
        Some(value) => req.insert_header((AUTHORIZATION, value.to_string())),
        None => req,
    }
}

pub fn request_as(method: Method, uri: &str, id: i32, role: Role) -> TestRequest {
    request(method, uri, Some(&bearer(id, role)))
}
