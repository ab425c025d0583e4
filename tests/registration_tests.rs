use chains::{App, Branch, Error, Method, Request, Response};

use tracing_util::TestTracing;

fn ok_route(_req: &mut Request) -> chains::Result<Response> {
    let mut resp = Response::new(200, "OK");
    resp.set_body("ok")?;
    Ok(resp)
}

#[test]
fn branch_then_colliding_route_fails() {
    let _tracing = TestTracing::init();
    let mut app = App::new();
    app.mount("users", Branch::new()).unwrap();

    assert!(matches!(
        app.route("/users/x", Method::GET, ok_route),
        Err(Error::AmbiguousRegistration { segment }) if segment == "users"
    ));
}

#[test]
fn route_then_colliding_branch_fails() {
    let mut app = App::new();
    app.route("/users/x", Method::GET, ok_route).unwrap();

    assert!(matches!(
        app.mount("users", Branch::new()),
        Err(Error::AmbiguousRegistration { segment }) if segment == "users"
    ));
}

#[test]
fn similar_prefixes_do_not_collide() {
    let mut app = App::new();
    app.mount("user", Branch::new()).unwrap();
    // "users" is a different segment even though it shares a prefix
    app.route("/users/x", Method::GET, ok_route).unwrap();
    app.route("/profile", Method::GET, ok_route).unwrap();
}

#[test]
fn branch_names_must_be_single_non_empty_segments() {
    let mut app = App::new();
    assert!(matches!(
        app.mount("", Branch::new()),
        Err(Error::InvalidBranchName { .. })
    ));
    assert!(matches!(
        app.mount("/", Branch::new()),
        Err(Error::InvalidBranchName { .. })
    ));
    assert!(matches!(
        app.mount("a/b", Branch::new()),
        Err(Error::InvalidBranchName { .. })
    ));
    // one leading slash and trailing slashes are tolerated by normalization
    app.mount("/admin/", Branch::new()).unwrap();
}

#[test]
fn duplicate_branch_names_fail() {
    let mut app = App::new();
    app.mount("users", Branch::new()).unwrap();
    assert!(matches!(
        app.mount("users", Branch::new()),
        Err(Error::DuplicateRegistration { .. })
    ));
}

#[test]
fn duplicate_route_registration_fails() {
    let mut app = App::new();
    app.route("/a/b", Method::GET, ok_route).unwrap();
    assert!(matches!(
        app.route("/a/b", Method::GET, ok_route),
        Err(Error::DuplicateRegistration { .. })
    ));
    // a different method on the same path is fine
    app.route("/a/b", Method::POST, ok_route).unwrap();
}

#[test]
fn registration_errors_do_not_poison_the_app() {
    let mut app = App::new();
    app.route("/a", Method::GET, ok_route).unwrap();
    let _ = app.route("/a", Method::GET, ok_route);

    let engine = app.freeze();
    let mut request = Request::new(Method::GET, "/a");
    assert_eq!(engine.handle(&mut request).unwrap().status_code(), 200);
}
