//! Controller capabilities required by controller plugins.

use std::{fmt, rc::Rc};

use crate::{ApplicationEvent, UrlGenerator};

/// Resolves plugins for a controller.
pub trait PluginManager {
    /// Returns the URL generation plugin.
    fn url(&self) -> Rc<dyn UrlGenerator>;
}

/// Provides the application event the controller is dispatched with.
pub trait InjectApplicationEvent {
    /// Returns the current application event.
    fn event(&self) -> ApplicationEvent;
}

/// A request handling controller.
///
/// Capabilities are opt-in; plugins that need a capability the controller does not provide fail
/// with a [`ConfigurationError`](crate::ConfigurationError).
pub trait Controller {
    /// Returns the controller's plugin manager, if it has one.
    fn plugins(&self) -> Option<&dyn PluginManager> {
        None
    }

    /// Returns the controller's application event provider, if it has one.
    fn application_event(&self) -> Option<&dyn InjectApplicationEvent> {
        None
    }
}

/// A controller composed of an application event and a URL generation plugin.
///
/// # Examples
/// ```
/// use std::{rc::Rc, sync::Arc};
///
/// use actix_web_redirect::{ActionController, MvcEvent, Redirect, RouteTable, RouteUrl};
///
/// let routes = Arc::new(RouteTable::new().route("home", "/"));
/// let event = MvcEvent::new().with_response(actix_web::HttpResponse::Ok().finish());
///
/// let controller = Rc::new(ActionController::new(event, RouteUrl::new(routes, None)));
/// let redirect = Redirect::new(controller);
/// ```
pub struct ActionController {
    event: ApplicationEvent,
    url: Rc<dyn UrlGenerator>,
}

impl ActionController {
    /// Constructs a new controller.
    pub fn new(event: impl Into<ApplicationEvent>, url: impl UrlGenerator + 'static) -> Self {
        Self {
            event: event.into(),
            url: Rc::new(url),
        }
    }
}

impl fmt::Debug for ActionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionController")
            .field("event", &self.event)
            .field("url", &"..")
            .finish()
    }
}

impl PluginManager for ActionController {
    fn url(&self) -> Rc<dyn UrlGenerator> {
        Rc::clone(&self.url)
    }
}

impl InjectApplicationEvent for ActionController {
    fn event(&self) -> ApplicationEvent {
        self.event.clone()
    }
}

impl Controller for ActionController {
    fn plugins(&self) -> Option<&dyn PluginManager> {
        Some(self)
    }

    fn application_event(&self) -> Option<&dyn InjectApplicationEvent> {
        Some(self)
    }
}
