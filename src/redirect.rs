//! See [`Redirect`] for plugin documentation.

use std::{fmt, rc::Rc};

use actix_web::http::{
    header::{self, HeaderValue},
    StatusCode,
};
use tracing::debug;

use crate::{
    ApplicationEvent, ConfigurationError, Controller, MvcEvent, Params, RedirectError,
    RedirectOptions, SharedResponse, UrlOptions,
};

/// Status used when no status code is requested: "302 Found".
pub const DEFAULT_REDIRECT_STATUS: StatusCode = StatusCode::FOUND;

/// A controller plugin for redirecting to a route or URL.
///
/// Redirects are written into the response composed by the controller's [`MvcEvent`]: a
/// `Location` header line is appended and the status code is set. The same shared response is
/// returned so it can be used as a [`Responder`](actix_web::Responder).
///
/// The event and response are looked up once and cached. A plugin serves a single request; use
/// [`reset`](Self::reset) or [`set_controller`](Self::set_controller) before reusing it.
///
/// # Examples
/// ```
/// use std::{rc::Rc, sync::Arc};
///
/// use actix_web::{http::StatusCode, HttpResponse};
/// use actix_web_redirect::{
///     ActionController, MvcEvent, Params, Redirect, RouteTable, RouteUrl, StructuredOptions,
/// };
///
/// let routes = Arc::new(RouteTable::new().route("login", "/login"));
/// let event = MvcEvent::new().with_response(HttpResponse::Ok().finish());
/// let controller = Rc::new(ActionController::new(event, RouteUrl::new(routes, None)));
///
/// let mut redirect = Redirect::new(controller);
///
/// let opts = StructuredOptions::new().with_status_code(StatusCode::SEE_OTHER);
/// let res = redirect
///     .to_route(Some("login"), &Params::new(), opts, false)
///     .unwrap();
///
/// assert_eq!(res.borrow().status(), StatusCode::SEE_OTHER);
/// assert_eq!(res.borrow().headers().get("location").unwrap(), "/login");
/// ```
#[derive(Default)]
pub struct Redirect {
    controller: Option<Rc<dyn Controller>>,
    event: Option<Rc<MvcEvent>>,
    response: Option<SharedResponse>,
}

impl Redirect {
    /// Constructs a new redirect plugin for `controller`.
    pub fn new(controller: Rc<dyn Controller>) -> Self {
        Self {
            controller: Some(controller),
            event: None,
            response: None,
        }
    }

    /// Sets the controller this plugin acts on and clears cached lookups.
    pub fn set_controller(&mut self, controller: Rc<dyn Controller>) {
        self.controller = Some(controller);
        self.reset();
    }

    /// Returns the controller this plugin acts on.
    pub fn controller(&self) -> Option<&Rc<dyn Controller>> {
        self.controller.as_ref()
    }

    /// Clears the cached event and response.
    pub fn reset(&mut self) {
        self.event = None;
        self.response = None;
    }

    /// Redirects to the URL generated for `route`.
    ///
    /// When `route` is `None`, the URL plugin generates a URL for the current route.
    ///
    /// Scalar options are passed to the URL plugin in positional form and the redirect always
    /// uses "302 Found". Structured options are passed together with `reuse_matched_params` and
    /// their status code is used, if set.
    pub fn to_route(
        &mut self,
        route: Option<&str>,
        params: &Params,
        options: impl Into<RedirectOptions>,
        reuse_matched_params: bool,
    ) -> Result<SharedResponse, RedirectError> {
        let url_plugin = match self.controller.as_deref().and_then(|ctrl| ctrl.plugins()) {
            Some(plugins) => plugins.url(),
            None => return Err(ConfigurationError::MissingPluginManager.into()),
        };

        let options: RedirectOptions = options.into();

        let (url, status) = match options {
            RedirectOptions::Scalar(scalar) => {
                let url = url_plugin.from_route(route, params, UrlOptions::Positional(&scalar))?;
                (url, DEFAULT_REDIRECT_STATUS)
            }

            RedirectOptions::Structured(options) => {
                let url = url_plugin.from_route(
                    route,
                    params,
                    UrlOptions::Structured {
                        options: &options,
                        reuse_matched_params,
                    },
                )?;

                let status = options.status_code().unwrap_or(DEFAULT_REDIRECT_STATUS);
                (url, status)
            }
        };

        self.to_url(&url, status)
    }

    /// Redirects to `url` as-is, using `status`.
    ///
    /// The `Location` header line is appended; other headers are left untouched.
    pub fn to_url(
        &mut self,
        url: &str,
        status: StatusCode,
    ) -> Result<SharedResponse, RedirectError> {
        let res = self.response()?;
        let location = HeaderValue::from_str(url).map_err(RedirectError::InvalidLocation)?;

        {
            let mut res = res.borrow_mut();
            res.headers_mut().append(header::LOCATION, location);
            *res.status_mut() = status;
        }

        debug!(location = url, %status, "redirecting");

        Ok(res)
    }

    /// Redirects to the current route, reusing its matched parameters.
    pub fn refresh(&mut self) -> Result<SharedResponse, RedirectError> {
        self.to_route(None, &Params::new(), RedirectOptions::default(), true)
    }

    fn response(&mut self) -> Result<SharedResponse, RedirectError> {
        if let Some(res) = &self.response {
            return Ok(res.clone());
        }

        let event = self.event()?;
        let res = event
            .response()
            .cloned()
            .ok_or(ConfigurationError::MissingResponse)?;

        self.response = Some(res.clone());
        Ok(res)
    }

    fn event(&mut self) -> Result<Rc<MvcEvent>, RedirectError> {
        if let Some(event) = &self.event {
            return Ok(Rc::clone(event));
        }

        let event = self
            .controller
            .as_deref()
            .and_then(|ctrl| ctrl.application_event())
            .ok_or(ConfigurationError::MissingEventInjection)?
            .event();

        let event = match event {
            ApplicationEvent::Mvc(event) => event,
            ApplicationEvent::Generic(event) => {
                debug!(
                    "controller provided non-MVC event `{}`; composing an MVC event from its params",
                    event.name()
                );

                Rc::new(MvcEvent::new().with_params(event.params().clone()))
            }
        };

        self.event = Some(Rc::clone(&event));
        Ok(event)
    }
}

impl fmt::Debug for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Redirect")
            .field("controller", &self.controller.as_ref().map(|_| ".."))
            .field("event", &self.event)
            .field("response", &self.response)
            .finish()
    }
}
