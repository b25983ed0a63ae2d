use std::rc::Rc;

use actix_web::{
    http::{header, StatusCode},
    test, web, App, HttpResponse,
};
use actix_web_redirect::{
    ActionController, MvcEvent, Params, Redirect, RedirectError, RedirectOptions, RouteMatch,
    RouteTable, RouteUrl, SharedResponse,
};
use serde_json::{json, Value};

fn routes() -> RouteTable {
    RouteTable::new()
        .route("home", "/")
        .route("user", "/users/{id}")
        .route("user_edit", "/users/{id}/edit")
}

fn redirect_for(route_match: RouteMatch, routes: web::Data<RouteTable>) -> Redirect {
    let event = MvcEvent::new()
        .with_response(HttpResponse::Ok().finish())
        .with_route_match(route_match.clone());
    let url = RouteUrl::new(routes.into_inner(), Some(route_match));

    Redirect::new(Rc::new(ActionController::new(event, url)))
}

async fn refresh(
    route_match: RouteMatch,
    routes: web::Data<RouteTable>,
) -> Result<SharedResponse, RedirectError> {
    redirect_for(route_match, routes).refresh()
}

async fn to_route(
    route_match: RouteMatch,
    routes: web::Data<RouteTable>,
    opts: web::Json<Value>,
) -> Result<SharedResponse, RedirectError> {
    let opts = RedirectOptions::try_from(opts.into_inner()).unwrap();

    let mut params = Params::new();
    params.insert("id".to_owned(), json!(7));

    redirect_for(route_match, routes).to_route(Some("user"), &params, opts, false)
}

async fn edit_current(
    route_match: RouteMatch,
    routes: web::Data<RouteTable>,
) -> Result<SharedResponse, RedirectError> {
    redirect_for(route_match, routes).to_route(
        Some("user_edit"),
        &Params::new(),
        true,
        false,
    )
}

fn app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(routes()))
        .service(
            web::resource("/users/{id}")
                .name("user")
                .route(web::post().to(refresh)),
        )
        .service(
            web::resource("/users/{id}/edit")
                .name("user_edit")
                .route(web::get().to(edit_current)),
        )
        .service(
            web::resource("/unnamed/{id}")
                .route(web::post().to(refresh)),
        )
        .route("/go", web::post().to(to_route))
}

fn location(res: &actix_web::dev::ServiceResponse) -> &str {
    res.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

#[actix_web::test]
async fn refresh_redirects_to_current_route() {
    let app = test::init_service(app()).await;

    let req = test::TestRequest::post().uri("/users/42").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/users/42");
}

#[actix_web::test]
async fn refresh_requires_named_route() {
    let app = test::init_service(app()).await;

    let req = test::TestRequest::post().uri("/unnamed/1").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.headers().get(header::LOCATION).is_none());
}

#[actix_web::test]
async fn structured_options_set_status_and_query() {
    let app = test::init_service(app()).await;

    let req = test::TestRequest::post()
        .uri("/go")
        .set_json(json!({ "statusCode": 303, "query": { "tab": "profile" } }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/users/7?tab=profile");
}

#[actix_web::test]
async fn empty_options_use_found() {
    let app = test::init_service(app()).await;

    let req = test::TestRequest::post()
        .uri("/go")
        .set_json(json!({}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/users/7");
}

#[actix_web::test]
async fn positional_options_reuse_matched_params() {
    let app = test::init_service(app()).await;

    let req = test::TestRequest::get().uri("/users/5/edit").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/users/5/edit");
}

#[actix_web::test]
async fn refresh_encodes_decoded_params() {
    let app = test::init_service(app()).await;

    let req = test::TestRequest::post().uri("/users/a%20b").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/users/a%20b");
}
