mod common;

use actix_web::{App, test, web};
use common::{
    mount_answer, mount_delayed_answer, mount_live_domain, mount_slow_live_domain,
    queries_of_type, worker_for,
};
use email_list_cleaner::graphql::schema::create_schema;
use email_list_cleaner::models::email::{BatchOptions, ValidationOptions};
use email_list_cleaner::worker::{CancelFlag, CollectingSink};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::MockServer;

#[tokio::test]
async fn unlikely_and_valid_addresses_end_to_end() {
    let server = MockServer::start().await;
    mount_live_domain(&server, "realcompany.io").await;

    let worker = worker_for(&server);
    let mut sink = CollectingSink::default();
    let report = worker
        .run(
            "test@example.com\nvalid.person@realcompany.io",
            &BatchOptions::default(),
            &mut sink,
            &CancelFlag::new(),
        )
        .await;

    assert_eq!(report.total, 2);
    assert_eq!(report.invalid_count, 1);
    assert_eq!(report.invalid[0].email, "test@example.com");
    assert_eq!(report.invalid[0].reason.as_deref(), Some("unlikely a valid email"));
    assert_eq!(report.valid_count, 1);
    assert_eq!(report.valid[0].email, "valid.person@realcompany.io");
    assert!(report.valid[0].has_mx);
    assert!(report.valid[0].has_a_record);
    assert_eq!(sink.progress.last(), Some(&(2, 2)));
}

#[tokio::test]
async fn dead_domains_are_rejected_with_their_reason() {
    let server = MockServer::start().await;
    mount_answer(&server, "no-mail.io", "MX", &[], None).await;
    mount_answer(&server, "mail-only.io", "MX", &[(15, "10 mx.mail-only.io.")], None).await;
    mount_answer(&server, "mail-only.io", "A", &[], None).await;

    let worker = worker_for(&server);
    let response = worker
        .clean_list(
            "jane@no-mail.io\njane@mail-only.io",
            &BatchOptions::default(),
        )
        .await;

    let reasons: Vec<Option<&str>> = response
        .report
        .invalid
        .iter()
        .map(|r| r.reason.as_deref())
        .collect();
    assert_eq!(
        reasons,
        vec![Some("no valid MX record"), Some("domain has no website")]
    );
    assert_eq!(response.summary.no_mx_record, 1);
    assert_eq!(response.summary.other_invalid, 1);
}

#[tokio::test]
async fn unreachable_resolver_lets_addresses_through() {
    // Nothing mounted: every lookup gets a 404 and fails open.
    let server = MockServer::start().await;
    let worker = worker_for(&server);

    let response = worker
        .clean_list("jane.doe@acme-corp.com", &BatchOptions::default())
        .await;
    assert_eq!(response.report.valid_count, 1);
}

#[tokio::test]
async fn duplicates_count_toward_total_only() {
    let server = MockServer::start().await;
    mount_live_domain(&server, "gmail.com").await;

    let worker = worker_for(&server);
    let response = worker
        .clean_list(
            "John.Doe+promo@gmail.com\njohndoe@gmail.com",
            &BatchOptions::default(),
        )
        .await;

    assert_eq!(response.report.total, 2);
    assert_eq!(response.report.valid_count, 1);
    assert_eq!(response.report.invalid_count, 0);
    assert_eq!(response.report.duplicate_count, 1);
    assert_eq!(
        response.log[2],
        "johndoe@gmail.com - Duplicate email (normalized to: johndoe@gmail.com)"
    );
}

#[tokio::test]
async fn order_is_preserved_across_chunks() {
    let server = MockServer::start().await;
    let lines: Vec<String> = (0..10)
        .map(|i| {
            if i % 3 == 0 {
                format!("bad-line-{}", i)
            } else {
                format!("person{}@site{}.io", i, i)
            }
        })
        .collect();
    // Earlier rows answer later, so tasks finish in reverse input order within each chunk.
    for i in (0..10).filter(|i| i % 3 != 0) {
        let delay = Duration::from_millis(40 * (10 - i) as u64);
        mount_slow_live_domain(&server, &format!("site{}.io", i), delay).await;
    }

    let worker = worker_for(&server).with_chunking(3, Duration::from_secs(30));
    let mut sink = CollectingSink::default();
    let report = worker
        .run(&lines.join("\n"), &BatchOptions::default(), &mut sink, &CancelFlag::new())
        .await;

    let valid: Vec<&str> = report.valid.iter().map(|r| r.email.as_str()).collect();
    assert_eq!(
        valid,
        vec![
            "person1@site1.io",
            "person2@site2.io",
            "person4@site4.io",
            "person5@site5.io",
            "person7@site7.io",
            "person8@site8.io",
        ]
    );
    let invalid: Vec<&str> = report.invalid.iter().map(|r| r.email.as_str()).collect();
    assert_eq!(invalid, vec!["bad-line-0", "bad-line-3", "bad-line-6", "bad-line-9"]);
    assert!(report.failed_chunks.is_empty());

    let item_lines: Vec<&String> = sink.lines[1..sink.lines.len() - 1].iter().collect();
    assert_eq!(item_lines.len(), lines.len());
    for (line, input) in item_lines.iter().zip(&lines) {
        assert!(line.starts_with(input.as_str()));
    }
    assert_eq!(sink.progress, vec![(3, 10), (6, 10), (9, 10), (10, 10)]);
}

#[tokio::test]
async fn shared_domain_in_one_chunk_is_resolved_once() {
    let server = MockServer::start().await;
    let delay = Duration::from_millis(100);
    mount_delayed_answer(&server, "acme-corp.com", "MX", &[(15, "10 mx1.acme-corp.com.")], Some(1), delay)
        .await;
    mount_delayed_answer(&server, "acme-corp.com", "A", &[(1, "93.184.216.34")], Some(1), delay).await;

    let worker = worker_for(&server);
    let response = worker
        .clean_list(
            "jane.doe@acme-corp.com\njohn.roe@acme-corp.com\nmary.major@acme-corp.com",
            &BatchOptions::default(),
        )
        .await;

    assert_eq!(response.report.valid_count, 3);
    assert_eq!(queries_of_type(&server, "MX").await, 1);
    assert_eq!(queries_of_type(&server, "A").await, 1);
}

#[tokio::test]
async fn relaxed_options_skip_lookups() {
    let server = MockServer::start().await;
    let worker = worker_for(&server);
    let options = BatchOptions {
        validation: ValidationOptions {
            check_mx: false,
            allow_no_website_domain: true,
            allow_role_based: true,
            ..ValidationOptions::default()
        },
        allow_duplicates: false,
    };

    let response = worker.clean_list("info@acme-corp.com", &options).await;
    assert_eq!(response.report.valid_count, 1);
    assert!(response.report.valid[0].is_role_based);
    assert_eq!(response.summary.role_based, 1);

    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[actix_web::test]
async fn service_routes_share_one_worker() {
    let server = MockServer::start().await;
    mount_live_domain(&server, "realcompany.io").await;
    let worker = worker_for(&server);
    let schema = create_schema(worker.clone());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(worker))
            .app_data(web::Data::new(schema))
            .configure(email_list_cleaner::routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clean-list")
        .set_json(json!({"text": "Val <valid.person@realcompany.io>\ntest@example.com"}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["report"]["valid_count"], 1);
    assert_eq!(body["report"]["valid"][0]["name"], "Val");

    let req = test::TestRequest::post()
        .uri("/api/v1/graphql")
        .set_json(json!({
            "query": "{ validateEmail(email: \"valid.person@realcompany.io\") { valid hasMx hasARecord } }"
        }))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["validateEmail"]["valid"], true);
    assert_eq!(body["data"]["validateEmail"]["hasARecord"], true);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
