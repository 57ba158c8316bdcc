#![allow(dead_code)]

use email_list_cleaner::handlers::validation::dnsmx::{DohResolver, DomainLookup};
use email_list_cleaner::handlers::validation::lists::CuratedLists;
use email_list_cleaner::handlers::validation::validator::EmailValidator;
use email_list_cleaner::worker::ValidationWorker;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DOH_PATH: &str = "/resolve";

/// Builds a DNS-over-HTTPS JSON body holding the given `(type, data)` answers.
pub fn doh_body(domain: &str, record_type: u16, answers: &[(u16, &str)]) -> Value {
    let answers: Vec<Value> = answers
        .iter()
        .map(|(answer_type, data)| {
            json!({
                "name": format!("{}.", domain),
                "type": answer_type,
                "TTL": 300,
                "data": data
            })
        })
        .collect();

    let mut body = json!({
        "Status": 0,
        "TC": false,
        "RD": true,
        "RA": true,
        "Question": [{"name": format!("{}.", domain), "type": record_type}]
    });
    if !answers.is_empty() {
        body["Answer"] = Value::Array(answers);
    }
    body
}

/// Mounts a resolver answer for `domain` / `kind` ("MX" or "A").
///
/// `expected_calls` is verified when the server is dropped.
pub async fn mount_answer(
    server: &MockServer,
    domain: &str,
    kind: &str,
    answers: &[(u16, &str)],
    expected_calls: Option<u64>,
) {
    mount_delayed_answer(server, domain, kind, answers, expected_calls, Duration::ZERO).await;
}

/// Same as [`mount_answer`], with the response held back for `delay`.
pub async fn mount_delayed_answer(
    server: &MockServer,
    domain: &str,
    kind: &str,
    answers: &[(u16, &str)],
    expected_calls: Option<u64>,
    delay: Duration,
) {
    let record_type = if kind == "MX" { 15 } else { 1 };
    let mock = Mock::given(method("GET"))
        .and(path(DOH_PATH))
        .and(query_param("name", domain))
        .and(query_param("type", kind))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(doh_body(domain, record_type, answers))
                .insert_header("content-type", "application/dns-json")
                .set_delay(delay),
        );
    let mock = match expected_calls {
        Some(calls) => mock.expect(calls),
        None => mock,
    };
    mock.mount(server).await;
}

/// Mounts MX and A answers making `domain` look fully alive.
pub async fn mount_live_domain(server: &MockServer, domain: &str) {
    mount_slow_live_domain(server, domain, Duration::ZERO).await;
}

/// Like [`mount_live_domain`], with both answers held back for `delay`.
pub async fn mount_slow_live_domain(server: &MockServer, domain: &str, delay: Duration) {
    mount_delayed_answer(server, domain, "MX", &[(15, "10 mx1.mail.test.")], None, delay).await;
    mount_delayed_answer(server, domain, "A", &[(1, "93.184.216.34")], None, delay).await;
}

/// Counts the resolver requests received so far for `kind` ("MX" or "A").
pub async fn queries_of_type(server: &MockServer, kind: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| {
            request
                .url
                .query_pairs()
                .any(|(key, value)| key == "type" && value == kind)
        })
        .count()
}

pub fn lookup_for(server: &MockServer) -> DomainLookup {
    let resolver = DohResolver::new(&format!("{}{}", server.uri(), DOH_PATH), Duration::from_secs(2))
        .expect("resolver client should build");
    DomainLookup::new(Arc::new(resolver))
}

pub fn worker_for(server: &MockServer) -> ValidationWorker {
    let lists = CuratedLists::builtin().expect("builtin lists must parse");
    ValidationWorker::new(EmailValidator::new(lists, lookup_for(server)))
}
