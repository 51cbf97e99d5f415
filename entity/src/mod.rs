//! Database entities, in the layout `sea-orm-cli generate entity` produces.

pub mod prelude;

pub mod user;
