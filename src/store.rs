//! Storage adapter for the `users` table.
//!
//! Every method issues exactly one statement in autocommit mode.

use entity::{prelude::User, user};
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectOptions, ConnectionTrait, Database,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;

const CREATE_USERS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS users
    (id INTEGER PRIMARY KEY, name TEXT NOT NULL, email TEXT NOT NULL)"#;

/// The fields a client supplies for `POST /users` and `PUT /users/:id`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserInput {
    pub(crate) name: String,
    pub(crate) email: String,
}

/// Handle to the database, constructed once and shared by all requests.
#[derive(Debug, Clone)]
pub(crate) struct Store {
    db: DatabaseConnection,
}

impl Store {
    /// Open a pool of at most `max_connections` connections to `url`.
    pub(crate) async fn connect(url: &str, max_connections: u32) -> Result<Store, DbErr> {
        let mut options = ConnectOptions::new(url.to_owned());
        options
            .max_connections(max_connections)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(options).await?;
        Ok(Store { db })
    }

    /// Create the users table if it does not exist yet.
    pub(crate) async fn bootstrap(&self) -> Result<(), DbErr> {
        self.db.execute_unprepared(CREATE_USERS_TABLE).await?;
        Ok(())
    }

    pub(crate) async fn list_users(&self) -> Result<Vec<user::Model>, DbErr> {
        User::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
    }

    /// Insert a user and return the id the store assigned to it.
    pub(crate) async fn create_user(&self, input: UserInput) -> Result<i64, DbErr> {
        let new_user = user::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            ..Default::default()
        };
        let res = User::insert(new_user).exec(&self.db).await?;
        Ok(res.last_insert_id)
    }

    /// Returns `false` if no row has this id.
    pub(crate) async fn update_user(&self, id: i64, input: UserInput) -> Result<bool, DbErr> {
        let res = User::update_many()
            .col_expr(user::Column::Name, Expr::value(input.name))
            .col_expr(user::Column::Email, Expr::value(input.email))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Returns `false` if no row has this id.
    pub(crate) async fn delete_user(&self, id: i64) -> Result<bool, DbErr> {
        let res = User::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
