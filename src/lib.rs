//! Redirect controller plugin for MVC-style Actix Web handlers.
//!
//! # What Is This Crate?
//! Handlers that dispatch to controllers compose an [`MvcEvent`] carrying the response and the
//! matched route. The [`Redirect`] plugin turns that response into a redirect, either to a named
//! route (resolved through the controller's [`UrlGenerator`] plugin) or to a literal URL, and can
//! refresh the current route using its matched parameters.
//!
//! # Examples
//! ```
//! use std::{rc::Rc, sync::Arc};
//!
//! use actix_web::{web, HttpResponse};
//! use actix_web_redirect::{
//!     ActionController, MvcEvent, Redirect, RedirectError, RouteMatch, RouteTable, RouteUrl,
//!     SharedResponse,
//! };
//!
//! async fn save(
//!     route_match: RouteMatch,
//!     routes: web::Data<RouteTable>,
//! ) -> Result<SharedResponse, RedirectError> {
//!     let event = MvcEvent::new()
//!         .with_response(HttpResponse::Ok().finish())
//!         .with_route_match(route_match.clone());
//!     let url = RouteUrl::new(routes.into_inner(), Some(route_match));
//!
//!     // post/redirect/get back to the page the form was submitted from
//!     Redirect::new(Rc::new(ActionController::new(event, url))).refresh()
//! }
//! ```

#![deny(rust_2018_idioms, nonstandard_style)]
#![warn(future_incompatible, missing_docs)]

mod controller;
mod error;
mod event;
mod options;
mod redirect;
mod response;
mod url;

pub use self::{
    controller::{ActionController, Controller, InjectApplicationEvent, PluginManager},
    error::{ConfigurationError, RedirectError},
    event::{ApplicationEvent, GenericEvent, MvcEvent, RouteMatch},
    options::{Params, RedirectOptions, ScalarOption, StructuredOptions},
    redirect::{Redirect, DEFAULT_REDIRECT_STATUS},
    response::SharedResponse,
    url::{RouteTable, RouteUrl, UrlError, UrlGenerator, UrlOptions},
};
