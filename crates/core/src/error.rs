/// Configuration and lookup failures shared by every layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown {entity} '{name}', expected one of: {expected}")]
    UnknownName {
        entity: &'static str,
        name: String,
        expected: String,
    },
}

impl CoreError {
    /// An unrecognized name, listing the accepted ones.
    pub fn unknown_name<'a>(
        entity: &'static str,
        name: &str,
        expected: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        CoreError::UnknownName {
            entity,
            name: name.to_string(),
            expected: expected.into_iter().collect::<Vec<_>>().join(", "),
        }
    }
}
