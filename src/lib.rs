// Library root
// -----------
// This crate exposes the CRM API client plus a small terminal frontend.
// The binary (`main.rs`) wires config, logging and the client together and
// hands control to the UI loop.
//
// Module responsibilities:
// - `config`: reads the API base URL once at startup.
// - `error`: error types for transport faults and bad configuration.
// - `normalize`: turns a raw response body into a value of the shape the
//   caller expects, substituting fallbacks for empty or malformed bodies.
// - `models`: request payloads and read views over normalized responses.
// - `session`: the bearer token and the dashboard's local customer list.
// - `api`: the four HTTP operations (register, login, list, add).
// - `ui`: interactive login/register/dashboard flows built on `api`.
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod session;
pub mod ui;

pub use api::ApiClient;
pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use models::{AuthReply, Credentials, Customer, NewCustomer};
pub use session::{Session, SessionToken};
