//! Application events and route matches.

use std::{
    convert::Infallible,
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use serde_json::Value;

use crate::{Params, SharedResponse};

/// The route matched for the current request.
///
/// Can be used as an extractor; the route name is only available for named resources.
///
/// # Examples
/// ```
/// use actix_web::{get, Responder};
/// use actix_web_redirect::RouteMatch;
///
/// #[get("/users/{id}", name = "user")]
/// async fn handler(route_match: RouteMatch) -> impl Responder {
///     format!("matched {:?}", route_match.name())
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMatch {
    name: Option<String>,
    params: Params,
}

impl RouteMatch {
    /// Constructs a route match for the named route with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            params: Params::new(),
        }
    }

    /// Adds a matched parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns the matched route name, if the route is named.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the matched parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl FromRequest for RouteMatch {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    #[inline]
    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let params = req
            .match_info()
            .iter()
            .map(|(key, val)| (key.to_owned(), Value::String(val.to_owned())))
            .collect();

        ready(Ok(RouteMatch {
            name: req.match_name().map(ToOwned::to_owned),
            params,
        }))
    }
}

/// The event composed by the application while dispatching a request to a controller.
#[derive(Debug, Default)]
pub struct MvcEvent {
    params: Params,
    response: Option<SharedResponse>,
    route_match: Option<RouteMatch>,
}

impl MvcEvent {
    /// Constructs an event with no parameters, response, or route match.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets event parameters.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Sets the response composed by this event.
    pub fn with_response(mut self, res: impl Into<SharedResponse>) -> Self {
        self.response = Some(res.into());
        self
    }

    /// Sets the route match for the current request.
    pub fn with_route_match(mut self, route_match: RouteMatch) -> Self {
        self.route_match = Some(route_match);
        self
    }

    /// Returns event parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the composed response, if any.
    pub fn response(&self) -> Option<&SharedResponse> {
        self.response.as_ref()
    }

    /// Returns the route match, if any.
    pub fn route_match(&self) -> Option<&RouteMatch> {
        self.route_match.as_ref()
    }
}

/// A named event that carries nothing but parameters.
#[derive(Debug, Clone, Default)]
pub struct GenericEvent {
    name: String,
    params: Params,
}

impl GenericEvent {
    /// Constructs a named event with the given parameters.
    pub fn new(name: impl Into<String>, params: Params) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Returns event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns event parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// An event provided by a controller.
#[derive(Debug, Clone)]
pub enum ApplicationEvent {
    /// MVC dispatch event.
    Mvc(Rc<MvcEvent>),

    /// Any other event.
    Generic(Rc<GenericEvent>),
}

impl ApplicationEvent {
    /// Returns event parameters.
    pub fn params(&self) -> &Params {
        match self {
            ApplicationEvent::Mvc(ev) => ev.params(),
            ApplicationEvent::Generic(ev) => ev.params(),
        }
    }
}

impl From<MvcEvent> for ApplicationEvent {
    fn from(ev: MvcEvent) -> Self {
        Self::Mvc(Rc::new(ev))
    }
}

impl From<Rc<MvcEvent>> for ApplicationEvent {
    fn from(ev: Rc<MvcEvent>) -> Self {
        Self::Mvc(ev)
    }
}

impl From<GenericEvent> for ApplicationEvent {
    fn from(ev: GenericEvent) -> Self {
        Self::Generic(Rc::new(ev))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use serde_json::json;

    use super::*;

    #[actix_web::test]
    async fn extracts_match_info() {
        let req = TestRequest::default()
            .param("id", "42")
            .to_http_request();

        let route_match = RouteMatch::extract(&req).await.unwrap();

        assert_eq!(route_match.params().get("id"), Some(&json!("42")));
    }

    #[test]
    fn event_params() {
        let mut params = Params::new();
        params.insert("lang".to_owned(), json!("en"));

        let ev = ApplicationEvent::from(GenericEvent::new("dispatch", params.clone()));
        assert_eq!(ev.params(), &params);

        let ev = ApplicationEvent::from(MvcEvent::new().with_params(params.clone()));
        assert_eq!(ev.params(), &params);
    }

    #[test]
    fn mvc_event_builders() {
        let ev = MvcEvent::new()
            .with_response(SharedResponse::default())
            .with_route_match(RouteMatch::new("home").with_param("page", 2));

        assert!(ev.response().is_some());
        assert_eq!(ev.route_match().unwrap().name(), Some("home"));
        assert_eq!(
            ev.route_match().unwrap().params().get("page"),
            Some(&json!(2)),
        );
    }
}
