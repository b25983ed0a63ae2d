//! Shared response handle.
//!
//! See [`SharedResponse`] docs.

use std::{
    cell::{Ref, RefCell, RefMut},
    fmt, mem,
    rc::Rc,
};

use actix_web::{body::BoxBody, http::StatusCode, HttpRequest, HttpResponse, Responder};

/// A thread-local, shared handle to the response composed by an [`MvcEvent`](crate::MvcEvent).
///
/// Clones point to the same response, so mutations made through one handle (such as those made
/// by [`Redirect`](crate::Redirect)) are visible through all others.
///
/// # Examples
/// ```
/// # use actix_web::{http::StatusCode, HttpResponse};
/// use actix_web_redirect::SharedResponse;
///
/// let res = SharedResponse::new(HttpResponse::Ok().finish());
/// let other = res.clone();
///
/// *other.borrow_mut().status_mut() = StatusCode::FOUND;
/// assert_eq!(res.borrow().status(), StatusCode::FOUND);
/// ```
#[derive(Clone)]
pub struct SharedResponse(Rc<RefCell<HttpResponse>>);

impl SharedResponse {
    /// Wraps a response in a new shared handle.
    pub fn new(res: HttpResponse) -> Self {
        Self(Rc::new(RefCell::new(res)))
    }

    /// Immutably borrows the response.
    ///
    /// # Panics
    /// Panics if the response is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, HttpResponse> {
        self.0.borrow()
    }

    /// Mutably borrows the response.
    ///
    /// # Panics
    /// Panics if the response is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, HttpResponse> {
        self.0.borrow_mut()
    }

    /// Returns true if both handles point to the same response.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }

    /// Moves the response out of the handle, leaving an empty "200 OK" response in its place.
    pub fn take(&self) -> HttpResponse {
        mem::replace(&mut *self.0.borrow_mut(), HttpResponse::new(StatusCode::OK))
    }
}

impl Default for SharedResponse {
    fn default() -> Self {
        Self::new(HttpResponse::new(StatusCode::OK))
    }
}

impl From<HttpResponse> for SharedResponse {
    fn from(res: HttpResponse) -> Self {
        Self::new(res)
    }
}

impl fmt::Debug for SharedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let res = self.0.borrow();

        f.debug_struct("SharedResponse")
            .field("status", &res.status())
            .field("headers", res.headers())
            .finish()
    }
}

impl Responder for SharedResponse {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        self.take()
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::header, test::TestRequest};

    use super::*;

    #[test]
    fn clones_share_response() {
        let res = SharedResponse::default();
        let other = res.clone();

        other
            .borrow_mut()
            .headers_mut()
            .insert(header::CACHE_CONTROL, header::HeaderValue::from_static("no-store"));

        assert!(SharedResponse::ptr_eq(&res, &other));
        assert!(res.borrow().headers().contains_key(header::CACHE_CONTROL));
        assert!(!SharedResponse::ptr_eq(&res, &SharedResponse::default()));
    }

    #[test]
    fn responds_with_taken_response() {
        let res = SharedResponse::new(HttpResponse::SeeOther().finish());
        let handle = res.clone();

        let req = TestRequest::default().to_http_request();
        let taken = res.respond_to(&req);

        assert_eq!(taken.status(), StatusCode::SEE_OTHER);
        assert_eq!(handle.borrow().status(), StatusCode::OK);
    }
}
