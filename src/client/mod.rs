mod http;
mod traits;

pub use http::HttpUyuniClient;
pub use traits::{ClientError, ClientResult, UyuniClient};
