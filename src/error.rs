//! Redirect plugin errors.

use actix_web::{http::header::InvalidHeaderValue, ResponseError};
use derive_more::{Display, Error};

use crate::url::UrlError;

/// The plugin's collaborators are missing or do not provide a required capability.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// Controller is missing or cannot resolve plugins.
    #[display("Redirect plugin requires a controller that defines the plugins() method")]
    MissingPluginManager,

    /// Event does not compose a response.
    #[display("Redirect plugin requires event compose a response")]
    MissingResponse,

    /// Controller is missing or cannot provide the application event.
    #[display("Redirect plugin requires a controller that implements InjectApplicationEvent")]
    MissingEventInjection,
}

/// Errors returned from [`Redirect`](crate::Redirect) operations.
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum RedirectError {
    /// Plugin is not configured correctly.
    #[display("{_0}")]
    Configuration(#[error(not(source))] ConfigurationError),

    /// URL plugin could not generate a URL for the route.
    #[display("Failed to generate redirect URL")]
    Url(#[error(source)] UrlError),

    /// Redirect URL cannot be used as a `Location` header value.
    #[display("Redirect location is not a valid header value")]
    InvalidLocation(#[error(source)] InvalidHeaderValue),
}

impl From<ConfigurationError> for RedirectError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

impl From<UrlError> for RedirectError {
    fn from(err: UrlError) -> Self {
        Self::Url(err)
    }
}

impl ResponseError for RedirectError {}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;

    #[test]
    fn configuration_messages() {
        assert_eq!(
            RedirectError::from(ConfigurationError::MissingResponse).to_string(),
            "Redirect plugin requires event compose a response",
        );
        assert_eq!(
            ConfigurationError::MissingPluginManager.to_string(),
            "Redirect plugin requires a controller that defines the plugins() method",
        );
        assert_eq!(
            ConfigurationError::MissingEventInjection.to_string(),
            "Redirect plugin requires a controller that implements InjectApplicationEvent",
        );
    }

    #[test]
    fn configuration_error_has_no_source() {
        use std::error::Error as _;

        let err = RedirectError::from(ConfigurationError::MissingResponse);
        assert!(err.source().is_none());

        let err = RedirectError::from(crate::UrlError::NoRouteMatch);
        assert!(err.source().is_some());
    }

    #[test]
    fn responds_with_server_error() {
        let err = RedirectError::from(ConfigurationError::MissingEventInjection);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
