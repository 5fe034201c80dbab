//! Observation points around each dispatch.

use crate::client::ApiResponse;
use crate::error::Error;
use crate::request::RequestDescriptor;

/// Receives the request descriptor before dispatch and exactly one of the
/// response or error afterwards. Nothing in the client depends on what an
/// observer does.
pub trait Observer: Send + Sync {
    /// Called with the full descriptor just before it goes to the transport.
    fn on_request(&self, _request: &RequestDescriptor) {}

    /// Called with the decoded, side-loaded response.
    fn on_response(&self, _response: &ApiResponse) {}

    /// Called when the transport or classification fails.
    fn on_error(&self, _error: &Error) {}
}
