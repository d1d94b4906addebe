use diesel::{
    connection::TransactionManager,
    prelude::*,
    r2d2::{ConnectionManager, PooledConnection},
    PgConnection,
};

use super::{todo_model::Todo, user_model::User, Pool};
use crate::api::errors::TodoApiError;
use crate::schema::{todos, users};

/// One unit of work against the data store, bound to a single request.
///
/// Changes become visible to other sessions only after [`Session::commit`].
/// Dropping a session that was not committed discards its changes.
pub trait Session {
    fn all_todos(&mut self) -> Result<Vec<Todo>, TodoApiError>;

    fn find_todo(&mut self, todo_id: i32) -> Result<Option<Todo>, TodoApiError>;

    /// Returns the number of removed rows
    fn delete_todo(&mut self, todo_id: i32) -> Result<usize, TodoApiError>;

    fn find_user(&mut self, user_id: i32) -> Result<Option<User>, TodoApiError>;

    fn set_password(&mut self, user_id: i32, new_hash: &str) -> Result<(), TodoApiError>;

    fn commit(&mut self) -> Result<(), TodoApiError>;
}

/// Hands out a fresh [`Session`] per request
pub trait Store: Send + Sync + 'static {
    type Session: Session;

    fn open_session(&self) -> Result<Self::Session, TodoApiError>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl Store for PgStore {
    type Session = PgSession;

    fn open_session(&self) -> Result<PgSession, TodoApiError> {
        let conn = self.pool.get()?;

        begin_transaction(&conn)?;

        Ok(PgSession {
            conn,
            in_transaction: true,
        })
    }
}

fn begin_transaction(conn: &PgConnection) -> QueryResult<()> {
    conn.transaction_manager().begin_transaction(conn)
}

/// Pooled connection with an open transaction.
///
/// The transaction is rolled back on drop unless committed, the connection
/// goes back to the pool right after.
pub struct PgSession {
    conn: PooledConnection<ConnectionManager<PgConnection>>,
    in_transaction: bool,
}

impl PgSession {
    fn conn(&self) -> &PgConnection {
        &self.conn
    }
}

type TodoById = diesel::dsl::Filter<todos::table, diesel::dsl::Eq<todos::id, i32>>;
type UserById = diesel::dsl::Filter<users::table, diesel::dsl::Eq<users::id, i32>>;

fn todo_by_id(todo_id: i32) -> TodoById {
    todos::table.filter(todos::id.eq(todo_id))
}

fn user_by_id(user_id: i32) -> UserById {
    users::table.filter(users::id.eq(user_id))
}

impl Session for PgSession {
    fn all_todos(&mut self) -> Result<Vec<Todo>, TodoApiError> {
        Ok(todos::table.load::<Todo>(self.conn())?)
    }

    fn find_todo(&mut self, todo_id: i32) -> Result<Option<Todo>, TodoApiError> {
        let todo = todo_by_id(todo_id).first::<Todo>(self.conn()).optional()?;

        Ok(todo)
    }

    fn delete_todo(&mut self, todo_id: i32) -> Result<usize, TodoApiError> {
        Ok(diesel::delete(todo_by_id(todo_id)).execute(self.conn())?)
    }

    fn find_user(&mut self, user_id: i32) -> Result<Option<User>, TodoApiError> {
        let user = user_by_id(user_id).first::<User>(self.conn()).optional()?;

        Ok(user)
    }

    fn set_password(&mut self, user_id: i32, new_hash: &str) -> Result<(), TodoApiError> {
        let update_count = diesel::update(user_by_id(user_id))
            .set(users::hashed_password.eq(new_hash))
            .execute(self.conn())?;

        if update_count == 0 {
            return Err(TodoApiError::NotFound(String::from("User")));
        }

        Ok(())
    }

    fn commit(&mut self) -> Result<(), TodoApiError> {
        if self.in_transaction {
            let conn = self.conn();
            conn.transaction_manager().commit_transaction(conn)?;
            self.in_transaction = false;
        }

        Ok(())
    }
}

impl Drop for PgSession {
    fn drop(&mut self) {
        if !self.in_transaction {
            return;
        }

        let conn = self.conn();
        if let Err(e) = conn.transaction_manager().rollback_transaction(conn) {
            log::error!("Failed to roll back session: {}", e);
        }
    }
}
