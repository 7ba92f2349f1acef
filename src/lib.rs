pub mod client;
pub mod configuration;
pub mod domain;
pub mod routes;
pub mod startup;
pub mod storage;
pub mod telemetry;
pub mod webhook_client;
