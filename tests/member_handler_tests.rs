use actix_web::{App, http::StatusCode, test, web};
use pretty_assertions::assert_eq;
use serde_json::Value;

use member_search::database::{
    MemberRepository, pagination::Page, projection::MemberTeamDto, seed,
};
use member_search::routes;

mod common;

use common::TestAssertions;

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(MemberRepository::new($ctx.pool.clone())))
                .app_data(web::Data::new($ctx.config.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_v1_search_returns_filtered_rows() {
    common::setup_test_env();
    let ctx = common::TestContext::with_four_members().await.unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/v1/members?teamName=teamB&ageGoe=35&ageLoe=45")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let rows: Vec<MemberTeamDto> = TestAssertions::assert_success_response(&body);
    assert_eq!(common::usernames(&rows), vec!["member4"]);
}

#[actix_web::test]
async fn test_v1_search_serializes_camel_case_fields() {
    common::setup_test_env();
    let ctx = common::TestContext::with_four_members().await.unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/v1/members?username=member1&teamName=")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body["data"][0],
        serde_json::json!({
            "memberId": 1,
            "username": "member1",
            "age": 10,
            "teamId": 1,
            "teamName": "teamA"
        })
    );
}

#[actix_web::test]
async fn test_v2_and_v3_return_the_same_page() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    seed::seed_sample_data(&ctx.pool).await.unwrap();
    let app = init_app!(ctx);

    let query = "teamName=teamA&ageGoe=10&page=1&size=5&sort=age:desc";
    let mut pages = Vec::new();
    for version in ["v2", "v3"] {
        let req = test::TestRequest::get()
            .uri(&format!("/{}/members?{}", version, query))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let page: Page<MemberTeamDto> = TestAssertions::assert_success_response(&body);
        pages.push(page);
    }

    // teamA holds the even ages 0..98; 10..=98 leaves 45 members
    assert_eq!(pages[0], pages[1]);
    assert_eq!(pages[1].total, 45);
    assert_eq!(pages[1].offset, 5);
    assert_eq!(
        pages[1].content.iter().map(|row| row.age).collect::<Vec<_>>(),
        vec![88, 86, 84, 82, 80]
    );
}

#[actix_web::test]
async fn test_v3_defaults_page_size() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    seed::seed_sample_data(&ctx.pool).await.unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/v3/members").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let page: Page<MemberTeamDto> = TestAssertions::assert_success_response(&body);

    assert_eq!(page.limit, 20);
    assert_eq!(page.content.len(), 20);
    assert_eq!(page.total, 100);
}

#[actix_web::test]
async fn test_invalid_page_parameters_are_bad_requests() {
    common::setup_test_env();
    let ctx = common::TestContext::with_four_members().await.unwrap();
    let app = init_app!(ctx);

    for uri in [
        "/v3/members?size=0",
        "/v3/members?page=-1",
        "/v2/members?size=-5",
        "/v3/members?sort=password",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }
}

#[actix_web::test]
async fn test_health() {
    let ctx = common::TestContext::new().await.unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
}
