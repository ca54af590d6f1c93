mod handlers;
mod instrument;
mod routes;

pub use routes::create_router;
