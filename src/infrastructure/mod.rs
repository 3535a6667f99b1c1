//! Adapters implementing the domain ports: in-memory stores, a scripted
//! gateway client, static configuration, and the HTML card renderer.

pub mod html_renderer;
pub mod in_memory;
pub mod scripted_gateway;
pub mod static_config;
