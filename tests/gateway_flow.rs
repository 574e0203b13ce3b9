//! End-to-end flow: JSON/HTTP in, fixed-width TCP out, JSON back.

mod common;

use serde_json::json;
use systemi_gateway::config::{Destination, GatewayConfig, Route};

use common::{start_gateway, start_mock_system_i, transport_header};

fn gateway_config(audit_dir: &std::path::Path, card_sales_port: u16) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.audit.dir = audit_dir.display().to_string();
    config.routes.insert(
        "POST:/card/sales".to_string(),
        Route {
            system: "SYSI".to_string(),
            service: "CARDSALES".to_string(),
            format: "001".to_string(),
            ..Default::default()
        },
    );
    let mut dest = Destination {
        kind: "tcp".to_string(),
        ip: "127.0.0.1".to_string(),
        ports: Default::default(),
    };
    dest.ports
        .insert("GetCardSales".to_string(), vec![card_sales_port]);
    config.destinations.insert("systemI".to_string(), dest);
    config
}

fn card_sales_body() -> String {
    // TotalSales 91.00, one sale record of 45.50.
    format!(
        "{}{}{}{}{}{}",
        "000000009100",
        "001",
        "4111222233334444",
        "20230105",
        "0000004550",
        "POS   "
    )
}

#[tokio::test]
async fn successful_call_returns_decoded_json() {
    let backend = start_mock_system_i(format!(
        "{}{}",
        transport_header("", ""),
        card_sales_body()
    ))
    .await;
    let audit_dir = tempfile::tempdir().unwrap();
    let addr = start_gateway(gateway_config(audit_dir.path(), backend)).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/card/sales"))
        .header("x-request-id", "req-e2e-1")
        .json(&json!({
            "idCardNo": "1234567890123",
            "branchCode": "BK01",
            "saleDateFrom": 20230101,
            "saleDateTo": 20230131
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["totalSales"], 91.0);
    assert_eq!(body["data"]["sales"][0]["cardNo"], "4111222233334444");
    assert_eq!(body["data"]["sales"][0]["amount"], 45.5);
    assert!(body.get("error").is_none());

    // Both audit records landed in today's file.
    let files: Vec<_> = std::fs::read_dir(audit_dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
    let content = std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
    assert!(content.contains(" INFO line "));
    assert!(content.contains(" INFO main "));
    assert!(content.contains("req-e2e-1"));
}

#[tokio::test]
async fn backend_error_code_is_embedded_in_200_body() {
    let backend = start_mock_system_i(format!(
        "{}{}",
        transport_header("SVC117", "INVALID ID CARD"),
        "IGNORED BODY"
    ))
    .await;
    let audit_dir = tempfile::tempdir().unwrap();
    let addr = start_gateway(gateway_config(audit_dir.path(), backend)).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/card/sales"))
        .json(&json!({
            "idCardNo": "0000000000000",
            "branchCode": "BK01",
            "saleDateFrom": 20230101,
            "saleDateTo": 20230131
        }))
        .send()
        .await
        .unwrap();

    // Legacy contract: business errors are still HTTP 200.
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "SVC117");
    assert_eq!(body["error"]["errorCode"], "SI4001");
    assert_eq!(body["error"]["message"], "INVALID ID CARD");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn malformed_body_degrades_to_empty_200() {
    // Clean header, body far too short for the operation.
    let backend =
        start_mock_system_i(format!("{}{}", transport_header("", ""), "XX")).await;
    let audit_dir = tempfile::tempdir().unwrap();
    let addr = start_gateway(gateway_config(audit_dir.path(), backend)).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/card/sales"))
        .json(&json!({
            "idCardNo": "1234567890123",
            "branchCode": "BK01",
            "saleDateFrom": 20230101,
            "saleDateTo": 20230131
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body.get("data").is_none());
    assert!(body.get("error").is_none());

    let files: Vec<_> = std::fs::read_dir(audit_dir.path()).unwrap().collect();
    let content = std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
    assert!(content.contains("DECODE"));
}

#[tokio::test]
async fn dead_backend_surfaces_transport_error_status() {
    let audit_dir = tempfile::tempdir().unwrap();
    // Port 1 refuses connections.
    let addr = start_gateway(gateway_config(audit_dir.path(), 1)).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/card/sales"))
        .json(&json!({
            "idCardNo": "1234567890123",
            "branchCode": "BK01",
            "saleDateFrom": 20230101,
            "saleDateTo": 20230131
        }))
        .send()
        .await
        .unwrap();

    // Plain I/O failure classifies as the generic service error class.
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["errorCode"], "SI5000");
}

#[tokio::test]
async fn api_key_is_enforced_when_configured() {
    let audit_dir = tempfile::tempdir().unwrap();
    let mut config = gateway_config(audit_dir.path(), 1);
    config.security.api_keys = vec!["secret-key".to_string()];
    let addr = start_gateway(config).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/card/sales"))
        .json(&json!({
            "idCardNo": "1234567890123",
            "branchCode": "BK01",
            "saleDateFrom": 20230101,
            "saleDateTo": 20230131
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}
