/// What the SDK asks the user to approve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentRequest {
    pub app_id: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentDecision {
    Approved,
    Declined,
}

/// UI context the SDK presents its login dialog from.
///
/// Called on a blocking worker thread, never on the caller's thread.
pub trait Presenter: Send + Sync {
    fn present(&self, request: &ConsentRequest) -> std::io::Result<ConsentDecision>;
}
