//! URL generation plugin.
//!
//! See [`UrlGenerator`] and [`RouteUrl`] docs.

use std::{collections::HashMap, sync::Arc};

use actix_router::ResourceDef;
use derive_more::{Display, Error};
use serde_json::Value;

use crate::{Params, RouteMatch, ScalarOption, StructuredOptions};

/// Options form passed to a [`UrlGenerator`].
#[derive(Debug, Clone, Copy)]
pub enum UrlOptions<'a> {
    /// Positional form: a single scalar stands in for route options.
    Positional(&'a ScalarOption),

    /// Full form: structured route options and whether to reuse matched route parameters.
    Structured {
        /// Route options.
        options: &'a StructuredOptions,

        /// Merge parameters of the current route match under the given parameters.
        reuse_matched_params: bool,
    },
}

/// Generates URLs from route names and parameters.
pub trait UrlGenerator {
    /// Generates a URL for `route`, or for the currently matched route when `route` is `None`.
    fn from_route(
        &self,
        route: Option<&str>,
        params: &Params,
        options: UrlOptions<'_>,
    ) -> Result<String, UrlError>;
}

/// Errors that can occur when generating URLs.
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum UrlError {
    /// No route match is available to resolve the current route.
    #[display("No route match is present to generate a URL for the current route")]
    NoRouteMatch,

    /// Route match is for an unnamed route.
    #[display("Route match does not contain a matched route name")]
    UnnamedRouteMatch,

    /// Route is not registered.
    #[display("Route \"{name}\" not found")]
    RouteNotFound {
        /// Route name.
        name: String,
    },

    /// Not all dynamic segments of the route could be filled.
    #[display("Route \"{name}\" is missing required parameters")]
    MissingParams {
        /// Route name.
        name: String,
    },

    /// Parameter value is an array or object.
    #[display("Parameter \"{name}\" is not a scalar value")]
    NonScalarParam {
        /// Parameter name.
        name: String,
    },

    /// Positional options were not a boolean.
    #[display("Positional URL options must be a boolean")]
    InvalidOptions,

    /// Query string could not be encoded.
    #[display("Failed to encode query string")]
    Query(serde_urlencoded::ser::Error),
}

/// A table of named route patterns.
///
/// # Examples
/// ```
/// use actix_web_redirect::{Params, RouteTable};
///
/// let routes = RouteTable::new().route("user", "/users/{id}");
///
/// let mut params = Params::new();
/// params.insert("id".to_owned(), 42.into());
///
/// assert_eq!(routes.assemble("user", &params).unwrap(), "/users/42");
/// ```
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<String, ResourceDef>,
}

impl RouteTable {
    /// Constructs an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route pattern under `name`, replacing any existing route with that name.
    ///
    /// # Panics
    /// Panics if `pattern` is not a valid resource pattern.
    pub fn route(mut self, name: impl Into<String>, pattern: &str) -> Self {
        self.routes.insert(name.into(), ResourceDef::new(pattern));
        self
    }

    /// Assembles the path of the named route, filling dynamic segments from `params`.
    ///
    /// Parameter values are percent-encoded, including any `/`. Parameters not used by the
    /// pattern are ignored.
    pub fn assemble(&self, name: &str, params: &Params) -> Result<String, UrlError> {
        let rdef = self
            .routes
            .get(name)
            .ok_or_else(|| UrlError::RouteNotFound {
                name: name.to_owned(),
            })?;

        let mut values = HashMap::with_capacity(params.len());
        for (key, val) in params {
            if let Some(val) = scalar_to_string(key, val)? {
                values.insert(key.as_str(), urlencoding::encode(&val).into_owned());
            }
        }

        let mut path = String::new();
        if !rdef.resource_path_from_map(&mut path, &values) {
            return Err(UrlError::MissingParams {
                name: name.to_owned(),
            });
        }

        Ok(path)
    }
}

/// URL generator backed by a [`RouteTable`] and the current request's [`RouteMatch`].
///
/// Structured options support a `query` object, appended as a query string, and a `fragment`
/// string. In the positional form, a boolean scalar is taken as the "reuse matched params" flag.
#[derive(Debug, Clone)]
pub struct RouteUrl {
    routes: Arc<RouteTable>,
    route_match: Option<RouteMatch>,
}

impl RouteUrl {
    /// Constructs a new URL generator.
    pub fn new(routes: Arc<RouteTable>, route_match: Option<RouteMatch>) -> Self {
        Self {
            routes,
            route_match,
        }
    }
}

impl UrlGenerator for RouteUrl {
    fn from_route(
        &self,
        route: Option<&str>,
        params: &Params,
        options: UrlOptions<'_>,
    ) -> Result<String, UrlError> {
        let (reuse_matched_params, options) = match options {
            UrlOptions::Positional(ScalarOption::Bool(reuse)) => (*reuse, None),
            UrlOptions::Positional(_) => return Err(UrlError::InvalidOptions),
            UrlOptions::Structured {
                options,
                reuse_matched_params,
            } => (reuse_matched_params, Some(options)),
        };

        let route = match route {
            Some(route) => route,
            None => self
                .route_match
                .as_ref()
                .ok_or(UrlError::NoRouteMatch)?
                .name()
                .ok_or(UrlError::UnnamedRouteMatch)?,
        };

        let mut merged = Params::new();

        if reuse_matched_params {
            if let Some(route_match) = &self.route_match {
                merged.extend(route_match.params().clone());
            }
        }

        merged.extend(params.clone());

        let mut url = self.routes.assemble(route, &merged)?;

        let Some(options) = options else {
            return Ok(url);
        };

        if let Some(query) = options.query() {
            let mut pairs = Vec::with_capacity(query.len());
            for (key, val) in query {
                if let Some(val) = scalar_to_string(key, val)? {
                    pairs.push((key.as_str(), val));
                }
            }

            if !pairs.is_empty() {
                url.push('?');
                url.push_str(&serde_urlencoded::to_string(pairs).map_err(UrlError::Query)?);
            }
        }

        if let Some(fragment) = options.fragment() {
            url.push('#');
            url.push_str(&urlencoding::encode(fragment));
        }

        Ok(url)
    }
}

/// Renders a scalar parameter value; nulls are skipped.
fn scalar_to_string(key: &str, val: &Value) -> Result<Option<String>, UrlError> {
    match val {
        Value::Null => Ok(None),
        Value::Bool(val) => Ok(Some(val.to_string())),
        Value::Number(num) => Ok(Some(num.to_string())),
        Value::String(val) => Ok(Some(val.clone())),
        Value::Array(_) | Value::Object(_) => Err(UrlError::NonScalarParam {
            name: key.to_owned(),
        }),
    }
}
