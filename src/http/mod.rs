mod rate_limit;
mod retry;
mod transport;

pub use rate_limit::RateLimiter;
pub use retry::{RetryConfig, RetryHandler};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

#[cfg(test)]
pub use transport::MockHttpTransport;
