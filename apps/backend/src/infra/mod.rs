//! Wiring that touches the outside world: connections, migrations at
//! startup and `DbErr` translation.

pub mod db;
pub mod db_errors;
pub mod state;
