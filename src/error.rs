use thiserror::Error;

pub type QueryResult<T> = Result<T, QueryError>;

/// Failures of terminal operators. Lazy operators never fail, they just
/// produce empty results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{operator}: sequence contains no matching element")]
    EmptySequence { operator: &'static str },

    #[error("{operator}: sequence contains more than one matching element")]
    MultipleMatches { operator: &'static str },

    #[error("element_at: index {index} is out of range for a sequence of length {length}")]
    IndexOutOfRange { index: usize, length: usize },

    #[error("{operator}: arithmetic overflow while accumulating")]
    ArithmeticOverflow { operator: &'static str },
}

impl QueryError {
    pub fn empty(operator: &'static str) -> Self {
        QueryError::EmptySequence { operator }
    }

    pub fn multiple(operator: &'static str) -> Self {
        QueryError::MultipleMatches { operator }
    }

    pub fn overflow(operator: &'static str) -> Self {
        QueryError::ArithmeticOverflow { operator }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(QueryError::empty("first").to_string(), "first: sequence contains no matching element");
        assert_eq!(QueryError::multiple("single").to_string(), "single: sequence contains more than one matching element");
        assert_eq!(
            QueryError::IndexOutOfRange { index: 6, length: 4 }.to_string(),
            "element_at: index 6 is out of range for a sequence of length 4"
        );
    }
}
