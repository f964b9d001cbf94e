//! HTTP surface: routes over the mask store and the server entry point.

pub(crate) mod routes;
pub(crate) mod server;
