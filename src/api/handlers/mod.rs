//! HTTP request handlers for API endpoints.

pub mod decode;
pub mod encode;
pub mod fallback;
pub mod health;
pub mod list;
pub mod redirect;
pub mod statistic;

pub use decode::decode_handler;
pub use encode::encode_handler;
pub use fallback::fallback_handler;
pub use health::health_handler;
pub use list::list_handler;
pub use redirect::redirect_handler;
pub use statistic::statistic_handler;
