use thiserror::Error;

/// Result type alias using SnippetError
pub type Result<T> = std::result::Result<T, SnippetError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure in Snippetbox is classified into one of these kinds. The
/// HTTP layer maps kinds to status codes; nothing else about an error is
/// allowed to influence what the caller sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Client-facing
    /// No visible snippet matches the requested id
    NotFound,
    /// Malformed client input (e.g. a non-numeric snippet id)
    InvalidRequest,
    /// Creation payload failed validation
    InvalidInput,
    /// Known path, wrong HTTP method
    MethodNotAllowed,
    /// No route matches the path
    RouteNotFound,

    // Internal
    /// Persistence unavailable or malfunctioning
    Persistence,
    /// The renderer could not produce a response body
    Render,
    Io,
    Concurrency,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidRequest => "ERR_INVALID_REQUEST",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MethodNotAllowed => "ERR_METHOD_NOT_ALLOWED",
            ExErrorKind::RouteNotFound => "ERR_ROUTE_NOT_FOUND",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Render => "ERR_RENDER",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether this kind is an internal fault rather than a client condition
    ///
    /// Internal faults are reported with full detail to the failure reporter
    /// and surface to the caller only as a generic server error.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ExErrorKind::Persistence
                | ExErrorKind::Render
                | ExErrorKind::Io
                | ExErrorKind::Concurrency
                | ExErrorKind::Internal
        )
    }
}

/// Canonical structured error type
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    allowed_methods: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            allowed_methods: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the methods permitted on the route (used for MethodNotAllowed)
    pub fn with_allowed_methods(mut self, methods: Vec<String>) -> Self {
        self.allowed_methods = Some(methods);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the permitted methods, if any
    pub fn allowed_methods(&self) -> Option<&[String]> {
        self.allowed_methods.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Typed errors raised by Snippetbox domain and request handling code
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnippetError {
    /// No visible snippet has this id (missing, or expired)
    #[error("Snippet not found: {id}")]
    SnippetNotFound { id: i64 },

    /// The snippet identifier could not be parsed or is not positive
    #[error("Invalid snippet id: {raw:?}")]
    InvalidIdentifier { raw: String },

    /// A required text field is empty
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    /// The lifetime is not a whole number of days in the accepted range
    #[error("Invalid lifetime: {raw:?}")]
    InvalidLifetime { raw: String },

    /// The request body exceeds the accepted size
    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// No route matches the path
    #[error("No route for path: {path}")]
    RouteNotFound { path: String },

    /// Known route, wrong method
    #[error("Method {method} not allowed (allowed: {})", .allowed.join(", "))]
    MethodNotAllowed { method: String, allowed: Vec<String> },

    /// The renderer failed to produce output
    #[error("Render failed: {reason}")]
    Render { reason: String },
}

/// Conversion from SnippetError to ExError
impl From<SnippetError> for ExError {
    fn from(err: SnippetError) -> Self {
        let message = err.to_string();
        match err {
            SnippetError::SnippetNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(id.to_string())
                .with_message(message),

            SnippetError::InvalidIdentifier { raw } => ExError::new(ExErrorKind::InvalidRequest)
                .with_entity_id(raw)
                .with_message(message),

            SnippetError::EmptyField { .. }
            | SnippetError::InvalidLifetime { .. }
            | SnippetError::PayloadTooLarge { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            SnippetError::RouteNotFound { .. } => {
                ExError::new(ExErrorKind::RouteNotFound).with_message(message)
            }

            SnippetError::MethodNotAllowed { allowed, .. } => {
                ExError::new(ExErrorKind::MethodNotAllowed)
                    .with_message(message)
                    .with_allowed_methods(allowed)
            }

            SnippetError::Render { .. } => ExError::new(ExErrorKind::Render)
                .with_op("render")
                .with_message(message),
        }
    }
}

impl From<std::fmt::Error> for SnippetError {
    fn from(err: std::fmt::Error) -> Self {
        SnippetError::Render {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ExError {
    fn from(err: std::io::Error) -> Self {
        ExError::new(ExErrorKind::Io).with_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_classification() {
        assert!(ExErrorKind::Persistence.is_internal());
        assert!(ExErrorKind::Render.is_internal());
        assert!(ExErrorKind::Internal.is_internal());
        assert!(!ExErrorKind::NotFound.is_internal());
        assert!(!ExErrorKind::InvalidRequest.is_internal());
        assert!(!ExErrorKind::MethodNotAllowed.is_internal());
        assert!(!ExErrorKind::RouteNotFound.is_internal());
    }

    #[test]
    fn test_display_includes_code_op_and_message() {
        let err = ExError::new(ExErrorKind::Persistence)
            .with_op("snippet_insert")
            .with_message("database is locked");
        assert_eq!(
            err.to_string(),
            "[ERR_PERSISTENCE] in operation 'snippet_insert': database is locked"
        );
    }

    #[test]
    fn test_method_not_allowed_carries_allowed_methods() {
        let err: ExError = SnippetError::MethodNotAllowed {
            method: "GET".to_string(),
            allowed: vec!["POST".to_string()],
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::MethodNotAllowed);
        assert_eq!(err.allowed_methods(), Some(&["POST".to_string()][..]));
    }

    #[test]
    fn test_allowed_methods_none_by_default() {
        let err = ExError::new(ExErrorKind::NotFound);
        assert!(err.allowed_methods().is_none());
    }
}
