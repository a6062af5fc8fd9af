/// Result alias that carries the custom [`DemoError`] type.
pub type Result<T> = std::result::Result<T, DemoError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Returned by [`NotificationChannel::detach`](crate::NotificationChannel::detach)
    /// when the observer was never attached (or was already removed).
    #[error("observer not found")]
    ObserverNotFound,
    /// A product identifier outside of `A`, `B` and `C`.
    #[error("unknown product `{0}`")]
    UnknownProduct(String),
    /// Free-form failure, e.g. an observer that could not update its display
    /// or a windowing backend error surfaced by the app.
    #[error("{0}")]
    Message(String),
    /// Snapshot serialisation failure.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl DemoError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for DemoError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for DemoError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
