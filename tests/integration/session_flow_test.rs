use std::sync::Arc;

use anyhow::Result;

use smartsales_client::auth::{SessionManager, TokenStore, ACCESS_KEY, REFRESH_KEY};
use smartsales_client::{api, ApiClient, ClientConfig, Navigator, NoticeSink};

const PROFILE_BODY: &str = r#"{
    "id": 7,
    "username": "ana",
    "nombre": "Ana",
    "apellido_paterno": "García",
    "apellido_materno": "López",
    "email": "ana@example.com",
    "direccion": null,
    "fecha_nacimiento": null,
    "rol": { "id": 1, "nombre": "Administrador" }
}"#;

fn client_for(server: &mockito::ServerGuard) -> (Arc<ApiClient>, Arc<TokenStore>) {
    let config = ClientConfig {
        base_url: server.url(),
    };
    let tokens = Arc::new(TokenStore::in_memory());
    let client = Arc::new(ApiClient::new(
        config,
        Arc::clone(&tokens),
        Arc::new(Navigator::new()),
        Arc::new(NoticeSink::new()),
    ));
    (client, tokens)
}

#[tokio::test]
async fn signin_round_trip_over_http() -> Result<()> {
    smartsales_client::logging::init();
    let mut server = mockito::Server::new_async().await;

    let login = server
        .mock("POST", "/login/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access":"A","refresh":"R"}"#)
        .create_async()
        .await;
    let me = server
        .mock("GET", "/usuarios/me/")
        .match_header("authorization", "Bearer A")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PROFILE_BODY)
        .create_async()
        .await;

    let (client, tokens) = client_for(&server);
    let manager = SessionManager::new(client);

    let profile = manager.signin("ana", "secreta").await?;
    assert_eq!(profile.username, "ana");
    assert_eq!(tokens.get(ACCESS_KEY).as_deref(), Some("A"));
    assert_eq!(tokens.get(REFRESH_KEY).as_deref(), Some("R"));

    login.assert_async().await;
    me.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn expired_token_is_refreshed_transparently_over_http() -> Result<()> {
    let mut server = mockito::Server::new_async().await;

    let stale_catalog = server
        .mock("GET", "/productos/")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"token expired"}"#)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/token/refresh/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access":"fresh"}"#)
        .create_async()
        .await;
    let fresh_catalog = server
        .mock("GET", "/productos/")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":1,"nombre":"Teclado","precio":45.5,"marca":null,"modelo":null,"stock":12,"descripcion":"Mecánico","imagen":null}]"#,
        )
        .create_async()
        .await;

    let (client, tokens) = client_for(&server);
    tokens.set(ACCESS_KEY, "stale");
    tokens.set(REFRESH_KEY, "valid");

    let productos = api::productos::list(&client).await?;
    assert_eq!(productos.len(), 1);
    assert_eq!(productos[0].nombre, "Teclado");
    assert_eq!(tokens.get(ACCESS_KEY).as_deref(), Some("fresh"));

    stale_catalog.assert_async().await;
    refresh.assert_async().await;
    fresh_catalog.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn wrong_credentials_surface_over_http() -> Result<()> {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/login/")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"invalid credentials"}"#)
        .create_async()
        .await;

    let (client, tokens) = client_for(&server);
    let manager = SessionManager::new(client);

    let err = manager.signin("ana", "mala").await.unwrap_err();
    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "invalid credentials");
    assert_eq!(tokens.get(ACCESS_KEY), None);
    Ok(())
}
