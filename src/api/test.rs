use super::client::{ApiClient, ApiError};
use super::product::{Product, ProductClient};
use super::project::ProjectClient;
use super::resource::RemoteClient;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create a test client connected to a mock server
async fn create_test_client(token: Option<&str>) -> (ApiClient, MockServer) {
    let mock_server = MockServer::start().await;
    let client = ApiClient::new(&mock_server.uri(), token.map(str::to_string));
    (client, mock_server)
}

fn mock_product(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "abbreviation": name.to_lowercase(),
        "description": format!("{name} product"),
        "productCode": "eap",
        "pgmSystemName": "jbosseap",
        "productVersions": {
            "12": { "id": "12", "version": "7.4" }
        }
    })
}

fn mock_page(index: u32, total_pages: u32, content: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "pageIndex": index,
        "pageSize": content.len(),
        "totalPages": total_pages,
        "totalHits": content.len(),
        "content": content
    })
}

#[tokio::test]
async fn test_get_specific_product() {
    let (client, mock_server) = create_test_client(None).await;

    Mock::given(method("GET"))
        .and(path("/pnc-rest/v2/products/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_product("42", "EAP")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let product = ProductClient::new(client).get_specific("42").await.unwrap();

    assert_eq!(product.id.as_deref(), Some("42"));
    assert_eq!(product.name.as_deref(), Some("EAP"));
    assert_eq!(product.pgm_system_name.as_deref(), Some("jbosseap"));
    assert!(product.other.contains_key("productVersions"));
}

#[tokio::test]
async fn test_get_specific_not_found() {
    let (client, mock_server) = create_test_client(None).await;

    Mock::given(method("GET"))
        .and(path("/pnc-rest/v2/products/404"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = ProductClient::new(client).get_specific("404").await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_get_all_walks_pages() {
    let (client, mock_server) = create_test_client(None).await;

    Mock::given(method("GET"))
        .and(path("/pnc-rest/v2/products"))
        .and(query_param("pageIndex", "0"))
        .and(query_param("sort", "=asc=name"))
        .and(query_param("q", "name==EAP*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_page(
            0,
            2,
            vec![mock_product("1", "EAP"), mock_product("2", "EAP-CD")],
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pnc-rest/v2/products"))
        .and(query_param("pageIndex", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_page(
            1,
            2,
            vec![mock_product("3", "EAP-XP")],
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let all = ProductClient::new(client)
        .get_all(Some("=asc=name"), Some("name==EAP*"))
        .await
        .unwrap();

    let ids: Vec<_> = all.into_iter().filter_map(|p| p.id).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_get_all_without_constraints() {
    let (client, mock_server) = create_test_client(None).await;

    Mock::given(method("GET"))
        .and(path("/pnc-rest/v2/projects"))
        .and(query_param_is_missing("sort"))
        .and(query_param_is_missing("q"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_page(0, 0, vec![])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let all = ProjectClient::new(client).get_all(None, None).await.unwrap();
    assert_eq!(all.into_iter().count(), 0);
}

#[tokio::test]
async fn test_create_new_sends_bearer_token() {
    let (client, mock_server) = create_test_client(Some("secret-token")).await;

    Mock::given(method("POST"))
        .and(path("/pnc-rest/v2/products"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(body_json(json!({ "name": "EAP", "abbreviation": "eap" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(mock_product("7", "EAP")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let product = Product {
        name: Some("EAP".to_string()),
        abbreviation: Some("eap".to_string()),
        ..Default::default()
    };
    let created = ProductClient::new(client)
        .create_new(&product)
        .await
        .unwrap();
    assert_eq!(created.id.as_deref(), Some("7"));
}

#[tokio::test]
async fn test_update_keeps_unmodelled_fields() {
    let (client, mock_server) = create_test_client(Some("t")).await;

    let mut expected = mock_product("42", "EAP");
    expected["abbreviation"] = json!("changed");

    Mock::given(method("PUT"))
        .and(path("/pnc-rest/v2/products/42"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut product: Product = serde_json::from_value(mock_product("42", "EAP")).unwrap();
    product.abbreviation = Some("changed".to_string());

    ProductClient::new(client)
        .update("42", &product)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unauthorized_and_server_errors() {
    let (client, mock_server) = create_test_client(None).await;

    Mock::given(method("PUT"))
        .and(path("/pnc-rest/v2/products/1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pnc-rest/v2/products/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let products = ProductClient::new(client);

    let result = products.update("1", &Product::default()).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));

    match products.get_specific("1").await {
        Err(ApiError::ServerError(msg)) => assert!(msg.contains("boom")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let (client, mock_server) = create_test_client(None).await;

    Mock::given(method("GET"))
        .and(path("/pnc-rest/v2/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let result = ProductClient::new(client).get_specific("1").await;
    assert!(matches!(result, Err(ApiError::Decode(_))));
}
