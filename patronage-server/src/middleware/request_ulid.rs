//! Request-id generation.

use http::Request;
use tower_http::request_id::{MakeRequestId, RequestId};
use ulid::Ulid;

/// Generates a fresh [Ulid] for every incoming request.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeRequestUlid;

impl MakeRequestId for MakeRequestUlid {
    fn make_request_id<B>(&mut self, _: &Request<B>) -> Option<RequestId> {
        let id = Ulid::new().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}
