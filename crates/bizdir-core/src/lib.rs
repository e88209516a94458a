pub mod app_config;
pub mod config;
pub mod error;
pub mod geo;
pub mod query;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use geo::distance_km;
pub use query::{QueryPatch, QueryState};
pub use types::{BusinessRecord, Coordinate, RawBusinessRecord};
