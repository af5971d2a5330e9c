//! Error handling for Causa.
//! One error enum per concern, `thiserror` only, aggregated by `SearchError`.

pub mod config_error;
pub mod error_code;
pub mod generator_error;
pub mod graph_error;
pub mod search_error;
pub mod statistics_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use error_code::CausaErrorCode;
pub use generator_error::GeneratorError;
pub use graph_error::GraphError;
pub use search_error::{SearchError, SearchResult};
pub use statistics_error::StatisticsError;
pub use validation_error::ValidationError;
