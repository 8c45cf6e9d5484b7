// HomeDash services
// Services talk to the outside: config file, dashboard server, upstream API, layout persistence, rendering.

pub mod config_store;
pub mod dashboard_client;
pub mod field_resolver;
pub mod preferences_client;
pub mod renderer;
pub mod status_poller;
pub mod sync_service;
