#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use common::{alice_and_bob, location, session_cookie, titles};

async fn read_json<B: actix_web::body::MessageBody>(res: actix_web::dev::ServiceResponse<B>) -> Value {
    let body = test::read_body(res).await;
    serde_json::from_slice(&body).expect("json body")
}

#[actix_web::test]
async fn alice_adds_deletes_and_still_sees_detail() {
    let state = alice_and_bob();
    let app = test_app!(state);

    let res = login!(app, "alice", "pw1");
    assert_eq!(location(&res).as_deref(), Some("/list"));
    let alice = session_cookie(&res).expect("session cookie");

    let req = test::TestRequest::post()
        .uri("/add")
        .cookie(alice.clone())
        .set_form([("title", "T1"), ("content", "C1"), ("dueDate", "2024-01-01")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/list"));

    let req = test::TestRequest::get().uri("/list").cookie(alice.clone()).to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    assert_eq!(titles(&list), ["T1"]);
    assert_eq!(list["posts"][0]["writerName"], "alice");
    assert_eq!(list["posts"][0]["content"], "C1");
    assert_eq!(list["posts"][0]["dueDate"], "2024-01-01");
    assert_eq!(list["currentPage"], 1);
    assert_eq!(list["totalPages"], 1);
    let id = list["posts"][0]["id"].as_str().expect("post id").to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/delete/{id}"))
        .cookie(alice.clone())
        .to_request();
    let ack = read_json(test::call_service(&app, req).await).await;
    assert_eq!(ack["success"], true);

    let req = test::TestRequest::get().uri("/list").cookie(alice.clone()).to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    assert!(titles(&list).is_empty());
    assert_eq!(list["totalPages"], 0);

    let req = test::TestRequest::get()
        .uri(&format!("/detail/{id}"))
        .cookie(alice)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let detail = read_json(res).await;
    assert_eq!(detail["data"]["title"], "T1");
    assert_eq!(detail["data"]["isDeleted"], true);
}

#[actix_web::test]
async fn users_only_list_their_own_posts() {
    let state = alice_and_bob();
    let app = test_app!(state);
    let alice = session_cookie(&login!(app, "alice", "pw1")).expect("alice cookie");
    let bob = session_cookie(&login!(app, "bob", "pw2")).expect("bob cookie");

    for (cookie, title) in [(&alice, "from alice"), (&bob, "from bob")] {
        let req = test::TestRequest::post()
            .uri("/add")
            .cookie(cookie.clone())
            .set_json(serde_json::json!({ "title": title }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/list").cookie(alice).to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    assert_eq!(titles(&list), ["from alice"]);
    assert_eq!(list["user"], "alice");

    let req = test::TestRequest::get().uri("/list").cookie(bob).to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    assert_eq!(titles(&list), ["from bob"]);
}

#[actix_web::test]
async fn list_paginates_by_three() {
    let state = alice_and_bob();
    let app = test_app!(state);
    let alice = session_cookie(&login!(app, "alice", "pw1")).expect("session cookie");

    for n in 1..=7 {
        let title = format!("T{n}");
        let req = test::TestRequest::post()
            .uri("/add")
            .cookie(alice.clone())
            .set_form([("title", title.as_str())])
            .to_request();
        test::call_service(&app, req).await;
    }

    let page = |query: &str| {
        test::TestRequest::get()
            .uri(&format!("/list{query}"))
            .cookie(alice.clone())
            .to_request()
    };

    let first = read_json(test::call_service(&app, page("")).await).await;
    assert_eq!(first["posts"].as_array().map(Vec::len), Some(3));
    assert_eq!(first["totalPages"], 3);
    assert_eq!(first["currentPage"], 1);

    let third = read_json(test::call_service(&app, page("?page=3")).await).await;
    assert_eq!(third["posts"].as_array().map(Vec::len), Some(1));

    let beyond = read_json(test::call_service(&app, page("?page=10")).await).await;
    assert_eq!(beyond["posts"].as_array().map(Vec::len), Some(0));
    assert_eq!(beyond["currentPage"], 10);

    let garbage = read_json(test::call_service(&app, page("?page=zero")).await).await;
    assert_eq!(garbage["currentPage"], 1);
}

#[actix_web::test]
async fn editing_a_deleted_post_restores_it() {
    let state = alice_and_bob();
    let app = test_app!(state);
    let alice = session_cookie(&login!(app, "alice", "pw1")).expect("session cookie");

    let req = test::TestRequest::post()
        .uri("/add")
        .cookie(alice.clone())
        .set_form([("title", "draft")])
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/list").cookie(alice.clone()).to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    let id = list["posts"][0]["id"].as_str().expect("post id").to_string();

    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri(&format!("/delete/{id}"))
            .cookie(alice.clone())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri(&format!("/edit/{id}"))
        .cookie(alice.clone())
        .set_form([("title", "final"), ("content", "done"), ("dueDate", "2024-02-02")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(location(&res).as_deref(), Some("/list"));

    let req = test::TestRequest::get()
        .uri(&format!("/edit/{id}"))
        .cookie(alice.clone())
        .to_request();
    let form = read_json(test::call_service(&app, req).await).await;
    assert_eq!(form["data"]["title"], "final");
    assert_eq!(form["data"]["isDeleted"], false);

    let req = test::TestRequest::get().uri("/list").cookie(alice).to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    assert_eq!(titles(&list), ["final"]);
}

#[actix_web::test]
async fn any_user_can_read_a_post_by_id() {
    let state = alice_and_bob();
    let app = test_app!(state);
    let alice = session_cookie(&login!(app, "alice", "pw1")).expect("alice cookie");
    let bob = session_cookie(&login!(app, "bob", "pw2")).expect("bob cookie");

    let req = test::TestRequest::post()
        .uri("/add")
        .cookie(alice.clone())
        .set_form([("title", "alice only?")])
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/list").cookie(alice).to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    let id = list["posts"][0]["id"].as_str().expect("post id").to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/detail/{id}"))
        .cookie(bob)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn missing_post_and_unknown_route_are_404() {
    let state = alice_and_bob();
    let app = test_app!(state);
    let alice = session_cookie(&login!(app, "alice", "pw1")).expect("session cookie");

    let req = test::TestRequest::get()
        .uri("/detail/65a000000000000000000000")
        .cookie(alice.clone())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = read_json(res).await;
    assert_eq!(body["error"], "NOT_FOUND_ERROR");
    assert!(body["message"].as_str().unwrap_or_default().contains("Post not found"));

    let req = test::TestRequest::get().uri("/nowhere").cookie(alice).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = read_json(res).await;
    assert_eq!(body["message"], "Route does not exist");
}

#[actix_web::test]
async fn malformed_post_id_is_a_server_error() {
    let state = alice_and_bob();
    let app = test_app!(state);
    let alice = session_cookie(&login!(app, "alice", "pw1")).expect("session cookie");

    let req = test::TestRequest::get()
        .uri("/detail/not-an-object-id")
        .cookie(alice)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn add_without_a_body_stores_an_empty_post() {
    let state = alice_and_bob();
    let app = test_app!(state);

    let res = login!(app, "alice", "pw1");
    let alice = session_cookie(&res).expect("session cookie");

    let req = test::TestRequest::post().uri("/add").cookie(alice.clone()).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/list"));

    let req = test::TestRequest::get().uri("/list").cookie(alice).to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    let posts = list["posts"].as_array().expect("posts array");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], Value::Null);
    assert_eq!(posts[0]["content"], Value::Null);
    assert_eq!(posts[0]["dueDate"], Value::Null);
    assert_eq!(posts[0]["writerName"], "alice");
}

#[actix_web::test]
async fn add_and_edit_accept_json_bodies() {
    let state = alice_and_bob();
    let app = test_app!(state);

    let res = login!(app, "alice", "pw1");
    let alice = session_cookie(&res).expect("session cookie");

    let req = test::TestRequest::post()
        .uri("/add")
        .cookie(alice.clone())
        .set_json(serde_json::json!({ "title": "J1", "content": "from json" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let req = test::TestRequest::get().uri("/list").cookie(alice.clone()).to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    assert_eq!(titles(&list), ["J1"]);
    assert_eq!(list["posts"][0]["dueDate"], Value::Null);
    let id = list["posts"][0]["id"].as_str().expect("post id").to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/edit/{id}"))
        .cookie(alice.clone())
        .set_json(serde_json::json!({ "title": "J2", "content": "edited", "dueDate": "2025-02-02" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/list"));

    let req = test::TestRequest::get().uri("/list").cookie(alice).to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    assert_eq!(titles(&list), ["J2"]);
    assert_eq!(list["posts"][0]["dueDate"], "2025-02-02");
}
