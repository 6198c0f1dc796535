/// Errors returned by [`Opt::save`](crate::Opt::save) and
/// [`Opt::check_required`](crate::Opt::check_required).
///
/// Every variant displays as its fully rendered catalog message; the other
/// fields keep the substitutions around for callers that want them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{message}")]
    ConvertToInt {
        called_as: String,
        token: String,
        message: String,
    },

    #[error("{message}")]
    ConvertToFloat64 {
        called_as: String,
        token: String,
        message: String,
    },

    #[error("{message}")]
    NotKeyValue { token: String, message: String },

    #[error("{message}")]
    InvalidValue {
        called_as: String,
        token: String,
        message: String,
    },

    #[error("{message}")]
    MissingRequired { name: String, message: String },
}

impl Error {
    /// The offending token, if the error came from a conversion.
    pub fn token(&self) -> Option<&str> {
        match self {
            Error::ConvertToInt { token, .. }
            | Error::ConvertToFloat64 { token, .. }
            | Error::NotKeyValue { token, .. }
            | Error::InvalidValue { token, .. } => Some(token),
            Error::MissingRequired { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
