//! End-to-end runs against mock Cloudflare and echo servers
//!
//! Each test wires the real provider and IP source to wiremock servers and
//! checks both the report written to stdout and the HTTP calls made.

use cfddns_core::config::{Credentials, DdnsConfig, RecordSelection};
use cfddns_ip_http::HttpIpSource;
use cfddns_provider_cloudflare::CloudflareProvider;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
const RECORD_NAME: &str = "host.example.com";

struct Harness {
    api: MockServer,
    echo: MockServer,
}

impl Harness {
    async fn start() -> Self {
        let harness = Self {
            api: MockServer::start().await,
            echo: MockServer::start().await,
        };

        Mock::given(method("GET"))
            .and(path("/zones"))
            .and(query_param("name", "example.com"))
            .and(header("X-Auth-Email", "user@example.com"))
            .and(header("X-Auth-Key", "1234567890"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [{ "id": ZONE_ID, "name": "example.com" }]
            })))
            .mount(&harness.api)
            .await;

        harness
    }

    async fn with_record(&self, record_type: &str, record_id: &str, content: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/zones/{}/dns_records", ZONE_ID)))
            .and(query_param("type", record_type))
            .and(query_param("name", RECORD_NAME))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [{
                    "id": record_id,
                    "type": record_type,
                    "name": RECORD_NAME,
                    "content": content
                }]
            })))
            .mount(&self.api)
            .await;
    }

    async fn with_wan(&self, family_path: &str, address: &str) {
        Mock::given(method("GET"))
            .and(path(family_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("{}\n", address)))
            .mount(&self.echo)
            .await;
    }

    async fn expect_put(&self, record_id: &str, record_type: &str, content: &str, times: u64) {
        Mock::given(method("PUT"))
            .and(path(format!("/zones/{}/dns_records/{}", ZONE_ID, record_id)))
            .and(body_json(json!({
                "type": record_type,
                "name": RECORD_NAME,
                "content": content
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": { "id": record_id, "content": content }
            })))
            .expect(times)
            .mount(&self.api)
            .await;
    }

    async fn expect_no_put(&self) {
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.api)
            .await;
    }

    async fn run(
        &self,
        selection: RecordSelection,
        dry_run: bool,
    ) -> (anyhow::Result<cfddns_core::RunSummary>, String) {
        let credentials = Credentials::new("1234567890", "user@example.com");
        let config = DdnsConfig::new(credentials.clone(), "example.com", RECORD_NAME, selection);

        let provider =
            CloudflareProvider::with_base_url(credentials, self.api.uri(), dry_run).unwrap();
        let ip_source = HttpIpSource::with_endpoints(
            format!("{}/v4", self.echo.uri()),
            format!("{}/v6", self.echo.uri()),
        )
        .unwrap();

        let mut out = Vec::new();
        let result =
            cfddns::execute(config, Box::new(provider), Box::new(ip_source), &mut out).await;

        (result, String::from_utf8(out).unwrap())
    }
}

#[tokio::test]
async fn matching_a_record_is_left_alone() {
    let harness = Harness::start().await;
    harness.with_record("A", "rec-a", "1.1.1.1").await;
    harness.with_wan("/v4", "1.1.1.1").await;
    harness.expect_no_put().await;

    let (result, out) = harness.run(RecordSelection::A, false).await;

    let summary = result.unwrap();
    assert_eq!(summary.zone_id, ZONE_ID);
    assert_eq!(summary.updated_count(), 0);
    assert_eq!(
        out,
        "DNS record 1.1.1.1 matches the WAN IPv4, no update needed.\n"
    );
}

#[tokio::test]
async fn differing_a_record_is_overwritten() {
    let harness = Harness::start().await;
    harness.with_record("A", "rec-a", "1.1.1.1").await;
    harness.with_wan("/v4", "2.2.2.2").await;
    harness.expect_put("rec-a", "A", "2.2.2.2", 1).await;

    let (result, out) = harness.run(RecordSelection::A, false).await;

    assert_eq!(result.unwrap().updated_count(), 1);
    assert_eq!(out, "Updated ipv4 successfully!\n2.2.2.2\n");
}

#[tokio::test]
async fn both_updates_only_the_stale_family() {
    let harness = Harness::start().await;
    harness.with_record("A", "rec-a", "1.1.1.1").await;
    harness.with_record("AAAA", "rec-aaaa", "2001:db8::1").await;
    harness.with_wan("/v4", "1.1.1.1").await;
    harness.with_wan("/v6", "2001:db8::2").await;
    harness.expect_put("rec-aaaa", "AAAA", "2001:db8::2", 1).await;
    harness.expect_put("rec-a", "A", "1.1.1.1", 0).await;

    let (result, out) = harness.run(RecordSelection::Both, false).await;

    assert_eq!(result.unwrap().updated_count(), 1);
    assert_eq!(
        out,
        "DNS record 1.1.1.1 matches the WAN IPv4, no update needed.\n\
         Updated ipv6 successfully!\n2001:db8::2\n"
    );
}

#[tokio::test]
async fn unknown_zone_fails_without_record_calls() {
    let api = MockServer::start().await;
    let echo = MockServer::start().await;
    let harness = Harness { api, echo };

    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": [],
            "result": []
        })))
        .mount(&harness.api)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/zones/{}/dns_records", ZONE_ID)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&harness.api)
        .await;
    harness.expect_no_put().await;

    let (result, out) = harness.run(RecordSelection::A, false).await;

    let err = result.unwrap_err();
    assert!(
        err.to_string().contains("Zone not found: example.com"),
        "got {}",
        err
    );
    assert!(out.is_empty());
}

#[tokio::test]
async fn rejected_update_reports_api_message() {
    let harness = Harness::start().await;
    harness.with_record("A", "rec-a", "1.1.1.1").await;
    harness.with_wan("/v4", "2.2.2.2").await;

    Mock::given(method("PUT"))
        .and(path(format!("/zones/{}/dns_records/rec-a", ZONE_ID)))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "errors": [{ "code": 81058, "message": "record exists" }],
            "result": null
        })))
        .expect(1)
        .mount(&harness.api)
        .await;

    let (result, out) = harness.run(RecordSelection::A, false).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("record exists"), "got {}", err);
    assert!(!out.contains("successfully"));
}

#[tokio::test]
async fn dry_run_reports_without_put() {
    let harness = Harness::start().await;
    harness.with_record("A", "rec-a", "1.1.1.1").await;
    harness.with_wan("/v4", "2.2.2.2").await;
    harness.expect_no_put().await;

    let (result, out) = harness.run(RecordSelection::A, true).await;

    assert_eq!(result.unwrap().updated_count(), 0);
    assert_eq!(out, "[dry-run] Would update ipv4 to 2.2.2.2\n");
}
