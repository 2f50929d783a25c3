//! CLI command implementations

pub mod interactive;
pub mod open;
pub mod routes;

pub use interactive::interactive_command;
pub use open::open_command;
pub use routes::routes_command;
