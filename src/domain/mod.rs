//! Domain layer: value objects, session state, and the ports the
//! orchestration talks to.

pub mod config;
pub mod gateway;
pub mod money;
pub mod order;
pub mod payment;
pub mod ports;
pub mod session;
pub mod vault;
