//! Filter-query compilation and paginated listing over an asset-management
//! catalog stored in SQLite.

pub mod assets;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod query;
pub mod schema;
pub mod scopes;
pub mod suppliers;
pub mod users;
pub mod utils;

#[cfg(test)]
mod test_fixtures;
