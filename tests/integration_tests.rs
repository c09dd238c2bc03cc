use anyhow::Result;
use httpmock::prelude::*;
use rcs_check::{
    CapabilityPipeline, CheckEngine, ClientCredentials, CliConfig, DotgoChecker, LocalStorage,
    TokenCache,
};
use tempfile::TempDir;

fn cli_config(input: &str, output_path: &str) -> CliConfig {
    CliConfig {
        input: input.to_string(),
        column: "phonenumber".to_string(),
        region: "IN".to_string(),
        output_path: output_path.to_string(),
        verbose: false,
        log_json: false,
    }
}

fn token_cache(server: &MockServer) -> TokenCache {
    TokenCache::new(
        reqwest::Client::new(),
        server.base_url(),
        ClientCredentials {
            client_id: "api-id".to_string(),
            client_secret: "api-secret".to_string(),
        },
        ClientCredentials {
            client_id: "agg-id".to_string(),
            client_secret: "agg-secret".to_string(),
        },
    )
}

fn engine_for(
    server: &MockServer,
    input: &str,
    output_path: &str,
    chunk_size: usize,
) -> CheckEngine<CapabilityPipeline<LocalStorage, CliConfig, DotgoChecker>> {
    let storage = LocalStorage::new(".".to_string());
    let checker = DotgoChecker::new(
        reqwest::Client::new(),
        server.base_url(),
        "bot-42".to_string(),
        chunk_size,
    );
    let pipeline = CapabilityPipeline::new(
        storage,
        cli_config(input, output_path),
        token_cache(server),
        checker,
    );
    CheckEngine::new(pipeline)
}

#[tokio::test]
async fn test_end_to_end_check_with_real_http() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let input_path = temp_dir.path().join("contacts.csv");
    std::fs::write(
        &input_path,
        "phonenumber,name\n\
         9876543210,Asha\n\
         98765 43210,Asha again\n\
         9.87654321E9,Asha as a float\n\
         9812345678,Ravi\n\
         abc,Garbage\n\
         ,Blank\n",
    )?;

    let server = MockServer::start();
    let token_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/oauth/token")
            .body("grant_type=client_credentials");
        then.status(200)
            .json_body(serde_json::json!({"access_token": "tok-1", "expires_in": 3600}));
    });
    let capability_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bot/v1/bot-42/rcsEnabledContacts")
            .header("authorization", "Bearer tok-1")
            .json_body(serde_json::json!({
                "users": ["+919876543210", "+919812345678"]
            }));
        then.status(200)
            .json_body(serde_json::json!({"rcsEnabledContacts": ["+919876543210"]}));
    });

    let engine = engine_for(&server, input_path.to_str().unwrap(), &output_path, 10_000);
    let report = engine.run().await?;

    token_mock.assert_hits(1);
    capability_mock.assert_hits(1);

    let data = report.data.expect("success report carries data");
    assert_eq!(data.rcs_enabled, vec!["+919876543210"]);
    assert_eq!(data.rcs_not_enabled, vec!["+919812345678"]);
    assert_eq!(data.rejected_numbers, vec!["abc"]);

    // The same envelope is persisted under the output path.
    let written = std::fs::read(temp_dir.path().join("rcs_report.json"))?;
    let json: serde_json::Value = serde_json::from_slice(&written)?;
    assert_eq!(json["status"], "SUCCESS");
    assert_eq!(json["data"]["rcsEnabled"][0], "+919876543210");

    Ok(())
}

#[tokio::test]
async fn test_failing_batch_aborts_with_no_partial_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let input_path = temp_dir.path().join("contacts.csv");
    std::fs::write(
        &input_path,
        "phonenumber\n9876543210\n9876543211\n9876543212\n9876543213\n9876543214\n",
    )?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/oauth/token");
        then.status(200)
            .json_body(serde_json::json!({"access_token": "tok-1", "expires_in": 3600}));
    });

    let first_batch = server.mock(|when, then| {
        when.method(POST)
            .path("/bot/v1/bot-42/rcsEnabledContacts")
            .body_contains("+919876543210");
        then.status(200)
            .json_body(serde_json::json!({"rcsEnabledContacts": []}));
    });
    let second_batch = server.mock(|when, then| {
        when.method(POST)
            .path("/bot/v1/bot-42/rcsEnabledContacts")
            .body_contains("+919876543212");
        then.status(502);
    });
    let third_batch = server.mock(|when, then| {
        when.method(POST)
            .path("/bot/v1/bot-42/rcsEnabledContacts")
            .body_contains("+919876543214");
        then.status(200)
            .json_body(serde_json::json!({"rcsEnabledContacts": []}));
    });

    let engine = engine_for(&server, input_path.to_str().unwrap(), &output_path, 2);
    let result = engine.run().await;

    assert!(result.is_err());
    first_batch.assert_hits(1);
    second_batch.assert_hits(1);
    third_batch.assert_hits(0);

    // The run failed before the report stage: nothing was persisted.
    assert!(!temp_dir.path().join("rcs_report.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_missing_phone_column_stops_before_any_network_call() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let input_path = temp_dir.path().join("contacts.csv");
    std::fs::write(&input_path, "name\nAsha\nRavi\n")?;

    let server = MockServer::start();
    let token_mock = server.mock(|when, then| {
        when.method(POST).path("/oauth/token");
        then.status(200)
            .json_body(serde_json::json!({"access_token": "tok-1", "expires_in": 3600}));
    });

    let engine = engine_for(&server, input_path.to_str().unwrap(), &output_path, 10_000);
    let err = engine.run().await.unwrap_err();

    assert!(err.to_string().contains("phonenumber"));
    token_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_token_endpoint_without_token_aborts_classification() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let input_path = temp_dir.path().join("contacts.csv");
    std::fs::write(&input_path, "phonenumber\n9876543210\n")?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/oauth/token");
        then.status(200).json_body(serde_json::json!({}));
    });
    let capability_mock = server.mock(|when, then| {
        when.method(POST).path("/bot/v1/bot-42/rcsEnabledContacts");
        then.status(200)
            .json_body(serde_json::json!({"rcsEnabledContacts": []}));
    });

    let engine = engine_for(&server, input_path.to_str().unwrap(), &output_path, 10_000);
    let err = engine.run().await.unwrap_err();

    assert!(err.to_string().contains("no access_token"));
    capability_mock.assert_hits(0);

    Ok(())
}
