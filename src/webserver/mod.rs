mod server;

pub mod routes;
pub mod state;
pub mod ws;

// Public API for starting the webserver
pub use server::{bind_listener, serve, start_server};
