/// Domain-level failures raised below the HTTP layer.
///
/// The `Display` output of each variant is what ends up in the response
/// envelope's `debug_param`, so keep messages short and free of secrets.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_renders_with_prefix() {
        let err = CoreError::Validation("email is required".into());
        assert_eq!(err.to_string(), "Validation failed: email is required");
    }
}
