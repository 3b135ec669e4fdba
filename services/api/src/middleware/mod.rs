pub mod request_id;
pub mod response_logging;

pub use request_id::request_id_middleware;
pub use response_logging::response_logging_middleware;
