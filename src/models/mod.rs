pub mod session;
pub mod todo_model;
pub mod user_model;

#[cfg(test)]
pub mod memory_store;

use diesel::{r2d2::ConnectionManager, PgConnection};

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;
