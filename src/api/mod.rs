#[cfg(test)]
#[macro_use]
mod test_support;

mod admin_handler;
pub mod api;
mod auth_utils;
mod context;
mod dtos;
pub(crate) mod errors;
mod middlewares;
mod user_handler;
