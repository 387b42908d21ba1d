use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn malformed(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    /// Returns `true` if this error was raised by the underlying file system.
    pub fn is_io(&self) -> bool {
        matches!(self.kind(), ErrorKind::Io { .. })
    }

    /// Returns `true` if this error reports malformed persisted or source data.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidFormat { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid format for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn test_error_kinds() {
        let err = Error::io(
            "data.csv",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.is_io());
        assert!(!err.is_invalid_format());
        assert!(err.to_string().contains("data.csv"));

        let err = Error::malformed("location", "expected <offset>,<length>");
        assert!(err.is_invalid_format());
        match err.into_kind() {
            ErrorKind::InvalidFormat { element, message } => {
                assert_eq!(element, "location");
                assert_eq!(message, "expected <offset>,<length>");
            }
            other => panic!("unexpected error kind: {other:?}"),
        }

        let err = Error::invalid_arg("index_name", "must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid argument index_name: must not be empty"
        );
    }
}
