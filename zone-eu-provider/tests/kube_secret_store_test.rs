//! Kubernetes Secret 存储测试
//!
//! 使用 wiremock 模拟 Kubernetes API server 的 core/v1 Secret 接口。

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zone_eu_provider::{
    ChallengeAction, ChallengeRequest, ClusterAccess, KubeSecretStore, ProviderError,
    SecretStore, Solver, SolverError, SolverOptions, ZoneEuSolver, resolve, watch,
};

const NAMESPACE: &str = "cert-manager";

fn kube_config(api_server: &MockServer) -> kube::Config {
    kube::Config::new(api_server.uri().parse().unwrap())
}

fn kube_store(api_server: &MockServer) -> KubeSecretStore {
    KubeSecretStore::new(kube::Client::try_from(kube_config(api_server)).unwrap())
}

fn secret_body(name: &str, data: serde_json::Value) -> serde_json::Value {
    json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": {"name": name, "namespace": NAMESPACE},
        "type": "Opaque",
        "data": data
    })
}

fn status_body(code: u16, reason: &str, name: &str) -> serde_json::Value {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": format!("secrets \"{name}\" {reason}"),
        "reason": reason,
        "details": {"name": name, "kind": "secrets"},
        "code": code
    })
}

async fn mount_secret(api_server: &MockServer, name: &str, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/namespaces/{NAMESPACE}/secrets/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(secret_body(name, data)))
        .mount(api_server)
        .await;
}

async fn mount_status(api_server: &MockServer, name: &str, code: u16, reason: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/namespaces/{NAMESPACE}/secrets/{name}")))
        .respond_with(ResponseTemplate::new(code).set_body_json(status_body(code, reason, name)))
        .mount(api_server)
        .await;
}

fn solver() -> ZoneEuSolver {
    ZoneEuSolver::new(SolverOptions {
        group_name: "acme.example.com".to_string(),
        ..SolverOptions::default()
    })
    .unwrap()
}

fn challenge(secret_name: &str, api_url: &str) -> ChallengeRequest {
    ChallengeRequest {
        uid: "0b7e4c1a".to_string(),
        action: ChallengeAction::Present,
        key: "proof-token".to_string(),
        resource_namespace: NAMESPACE.to_string(),
        resolved_fqdn: "_acme-challenge.example.com.".to_string(),
        resolved_zone: "example.com.".to_string(),
        config: Some(json!({
            "secretName": secret_name,
            "zoneName": "example.com",
            "apiUrl": api_url,
        })),
        ..ChallengeRequest::default()
    }
}

mod secret_store {
    use super::*;

    #[tokio::test]
    async fn test_get_secret_decodes_data() {
        let api_server = MockServer::start().await;
        // " k\n" / "u"
        mount_secret(
            &api_server,
            "zone-eu",
            json!({"api-key": "IGsK", "api-username": "dQ=="}),
        )
        .await;

        let store = kube_store(&api_server);

        let data = store.get_secret(NAMESPACE, "zone-eu").await.unwrap();
        assert_eq!(data.get("api-key").map(Vec::as_slice), Some(&b" k\n"[..]));
        assert_eq!(data.get("api-username").map(Vec::as_slice), Some(&b"u"[..]));

        let creds = resolve(&store, NAMESPACE, "zone-eu").await.unwrap();
        assert_eq!(creds.api_key, "k");
        assert_eq!(creds.api_username, "u");
    }

    #[tokio::test]
    async fn test_secret_without_data() {
        let api_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/namespaces/{NAMESPACE}/secrets/empty")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "apiVersion": "v1",
                "kind": "Secret",
                "metadata": {"name": "empty", "namespace": NAMESPACE}
            })))
            .mount(&api_server)
            .await;

        let store = kube_store(&api_server);

        assert!(store.get_secret(NAMESPACE, "empty").await.unwrap().is_empty());
        let err = resolve(&store, NAMESPACE, "empty").await.unwrap_err();
        assert!(
            matches!(err, ProviderError::MissingSecretKey { ref key, .. } if key == "api-key")
        );
    }

    #[tokio::test]
    async fn test_secret_not_found() {
        let api_server = MockServer::start().await;
        mount_status(&api_server, "missing", 404, "NotFound").await;

        let err = kube_store(&api_server)
            .get_secret(NAMESPACE, "missing")
            .await
            .unwrap_err();

        match err {
            ProviderError::SecretNotFound { namespace, name } => {
                assert_eq!(namespace, NAMESPACE);
                assert_eq!(name, "missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_secret_forbidden() {
        let api_server = MockServer::start().await;
        mount_status(&api_server, "zone-eu", 403, "Forbidden").await;

        let err = kube_store(&api_server)
            .get_secret(NAMESPACE, "zone-eu")
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::SecretStore { .. }));
        assert!(err.is_lookup_error());
    }
}

mod initialize {
    use super::*;

    #[tokio::test]
    async fn test_initialize_with_cluster_config() {
        let api_server = MockServer::start().await;
        let zone_api = MockServer::start().await;

        mount_secret(
            &api_server,
            "zone-eu",
            json!({"api-key": "aw==", "api-username": "dQ=="}),
        )
        .await;
        mount_status(&api_server, "missing", 404, "NotFound").await;

        Mock::given(method("POST"))
            .and(path("/dns/example.com/txt"))
            .and(basic_auth("u", "k"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&zone_api)
            .await;

        let solver = solver();
        let (_tx, rx) = watch::channel(false);

        solver
            .initialize(ClusterAccess::Config(kube_config(&api_server)), rx)
            .await
            .unwrap();
        assert!(solver.is_initialized().await);

        solver
            .present(&challenge("zone-eu", &zone_api.uri()))
            .await
            .unwrap();

        let err = solver
            .present(&challenge("missing", &zone_api.uri()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SolverError::CredentialResolution {
                source: ProviderError::SecretNotFound { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_shutdown_signal_releases_receiver() {
        let api_server = MockServer::start().await;

        let solver = solver();
        let (tx, rx) = watch::channel(false);
        solver
            .initialize(ClusterAccess::Config(kube_config(&api_server)), rx)
            .await
            .unwrap();

        assert!(tx.send(true).is_ok());
        let closed = tokio::time::timeout(Duration::from_secs(5), tx.closed()).await;
        assert!(closed.is_ok(), "solver should drop the shutdown receiver");
    }
}
