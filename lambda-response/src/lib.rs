pub mod aws;
pub mod builder;
pub mod config;
pub mod errors;
pub mod options;
pub mod tracer;
pub mod utils;

pub use aws::lambda_events::response::{GatewayResponse, Headers};
pub use builder::{Completion, ResponseBuilder, ResponseBuilderConfig};
pub use errors::{ResponseError, ResponseResult};
pub use options::{ResponseOptions, SendOptions};
