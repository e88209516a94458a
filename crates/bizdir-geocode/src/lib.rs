pub mod client;
pub mod error;
pub mod suggest;
pub mod types;

pub use client::GeocodeClient;
pub use error::GeocodeError;
pub use suggest::{
    SuggestState, SuggestionConfig, SuggestionController, SuggestionProvider, SuggestionRequest,
};
pub use types::{GeocodeResponse, GeocodeResult, GeocodeStatus};
