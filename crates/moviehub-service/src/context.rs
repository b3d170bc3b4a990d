//! Request context carrying the authenticated account.

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from a validated access token and passed into
/// mutating service methods so every change knows who made it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated account id.
    pub user_id: i64,
}

impl RequestContext {
    /// Creates a context for `user_id`.
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}
