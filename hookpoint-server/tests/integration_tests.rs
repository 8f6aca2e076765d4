use std::sync::Arc;

use axum_test::TestServer;
use hookpoint::{FileHookStore, HookStore, MemoryHookStore};
use hookpoint_server::{AppState, config::ServerConfig, create_router};
use http::StatusCode;

const REGISTRATION: &str =
    "<hook>\n  <uri>http://agent.example:8888/api</uri>\n  <version>1</version>\n</hook>";

const CONFIRMATION: &str = "<hook id=\"1234\" href=\"/api/hooks/1234\">\n  <uri>http://agent.example:8888/api</uri>\n  <version>1</version>\n</hook>\n";

/// Helper function to create a test server over an in-memory store
fn create_test_server() -> TestServer {
    create_test_server_with(Arc::new(MemoryHookStore::new()))
}

fn create_test_server_with(store: Arc<dyn HookStore>) -> TestServer {
    let state = Arc::new(AppState::new(store, ServerConfig::default()));
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// Register the canonical test hook and assert it was accepted
async fn register(server: &TestServer) {
    server
        .post("/api/hooks")
        .content_type("application/xml")
        .bytes(REGISTRATION.into())
        .await
        .assert_status(StatusCode::CREATED);
}

mod routing {
    use super::*;

    #[tokio::test]
    async fn unknown_paths_are_404_regardless_of_method() {
        let server = create_test_server();

        for path in ["/", "/api", "/api/other", "/api/hooks/1234/extra"] {
            let response = server.get(path).await;
            response.assert_status(StatusCode::NOT_FOUND);
            assert_eq!(response.text(), "not found");
        }

        let response = server
            .post("/api/other")
            .content_type("application/xml")
            .bytes(REGISTRATION.into())
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_identifier_is_404() {
        let server = create_test_server();

        let response = server.get("/api/hooks/12ab").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "not found");
    }

    #[tokio::test]
    async fn unsupported_method_on_recognized_path_is_501() {
        let server = create_test_server();

        let response = server.put("/api/hooks").await;
        response.assert_status(StatusCode::NOT_IMPLEMENTED);
        assert_eq!(response.text(), "method not supported");

        let response = server.put("/api/hooks/1234").await;
        response.assert_status(StatusCode::NOT_IMPLEMENTED);
        assert_eq!(response.text(), "method not supported");
    }

    #[tokio::test]
    async fn trailing_slash_reaches_the_collection() {
        let server = create_test_server();

        let response = server.get("/api/hooks/").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "<hooks>\n</hooks>\n");
    }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn returns_confirmation_document_and_location() {
        let server = create_test_server();

        let response = server
            .post("/api/hooks")
            .content_type("application/xml")
            .bytes(REGISTRATION.into())
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.header("content-type"), "application/xml");
        assert_eq!(response.header("location"), "/api/hooks/1234");
        assert_eq!(response.text(), CONFIRMATION);
    }

    #[tokio::test]
    async fn stored_document_round_trips_through_fetch() {
        let server = create_test_server();
        register(&server).await;

        let response = server.get("/api/hooks/1234").await;
        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/xml");
        assert_eq!(response.text(), CONFIRMATION);
    }

    #[tokio::test]
    async fn missing_uri_is_400() {
        let server = create_test_server();

        let response = server
            .post("/api/hooks")
            .content_type("application/xml")
            .bytes("<hook><version>1</version></hook>".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "missing uri element");
    }

    #[tokio::test]
    async fn missing_version_is_400() {
        let server = create_test_server();

        let response = server
            .post("/api/hooks")
            .content_type("application/xml")
            .bytes("<hook><uri>http://agent.example:8888/api</uri></hook>".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "missing version element");
    }

    #[tokio::test]
    async fn malformed_xml_is_400() {
        let server = create_test_server();

        let response = server
            .post("/api/hooks")
            .content_type("application/xml")
            .bytes("<hook><uri>http://a</wrong></hook>".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_numeric_version_is_400_not_501() {
        let server = create_test_server();

        let response = server
            .post("/api/hooks")
            .content_type("application/xml")
            .bytes("<hook><uri>http://a</uri><version>one</version></hook>".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unsupported_version_is_501() {
        let server = create_test_server();

        let response = server
            .post("/api/hooks")
            .content_type("application/xml")
            .bytes("<hook><uri>http://a</uri><version>2</version></hook>".into())
            .await;

        response.assert_status(StatusCode::NOT_IMPLEMENTED);
        assert_eq!(response.text(), "version not supported");
    }

    #[tokio::test]
    async fn non_xml_content_type_is_415() {
        let server = create_test_server();

        let response = server.post("/api/hooks").text(REGISTRATION).await;
        response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(response.text(), "invalid Content-type");
    }

    #[tokio::test]
    async fn missing_content_type_is_415() {
        let server = create_test_server();

        let response = server.post("/api/hooks").bytes(REGISTRATION.into()).await;
        response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn failed_create_leaves_the_store_untouched() {
        let server = create_test_server();
        register(&server).await;

        server
            .post("/api/hooks")
            .content_type("application/xml")
            .bytes("<hook><version>1</version></hook>".into())
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/api/hooks")
            .content_type("application/xml")
            .bytes("<hook><uri>http://other</uri><version>2</version></hook>".into())
            .await
            .assert_status(StatusCode::NOT_IMPLEMENTED);

        // The earlier registration is still the stored document.
        let response = server.get("/api/hooks/1234").await;
        response.assert_status_ok();
        assert_eq!(response.text(), CONFIRMATION);
    }

    #[tokio::test]
    async fn repeated_create_overwrites_rather_than_accumulates() {
        let server = create_test_server();

        for _ in 0..2 {
            let response = server
                .post("/api/hooks")
                .content_type("application/xml")
                .bytes(REGISTRATION.into())
                .await;
            response.assert_status(StatusCode::CREATED);
            assert_eq!(response.text(), CONFIRMATION);
        }

        let response = server.get("/api/hooks").await;
        response.assert_status_ok();
        assert_eq!(
            response.text(),
            format!("<hooks>\n{CONFIRMATION}</hooks>\n")
        );
    }

    #[tokio::test]
    async fn replacement_registration_fully_replaces_the_prior_one() {
        let server = create_test_server();
        register(&server).await;

        server
            .post("/api/hooks")
            .content_type("application/xml")
            .bytes("<hook><uri>http://replacement:9999/api</uri><version>1</version></hook>".into())
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.get("/api/hooks/1234").await;
        assert!(response.text().contains("http://replacement:9999/api"));
        assert!(!response.text().contains("agent.example"));
    }
}

mod fetch {
    use super::*;

    #[tokio::test]
    async fn list_is_an_empty_container_before_any_create() {
        let server = create_test_server();

        let response = server.get("/api/hooks").await;
        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/xml");
        assert_eq!(response.text(), "<hooks>\n</hooks>\n");
    }

    #[tokio::test]
    async fn list_wraps_the_stored_document() {
        let server = create_test_server();
        register(&server).await;

        let response = server.get("/api/hooks").await;
        response.assert_status_ok();
        assert_eq!(
            response.text(),
            format!("<hooks>\n{CONFIRMATION}</hooks>\n")
        );
    }

    #[tokio::test]
    async fn by_id_before_any_create_is_404() {
        let server = create_test_server();

        let response = server.get("/api/hooks/1234").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "not found");
    }

    #[tokio::test]
    async fn unknown_identifier_is_404_even_when_a_hook_is_stored() {
        let server = create_test_server();
        register(&server).await;

        let response = server.get("/api/hooks/9999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "not found");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn nothing_stored_is_404() {
        let server = create_test_server();

        let response = server.delete("/api/hooks/1234").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "not found");
    }

    #[tokio::test]
    async fn removes_the_registration() {
        let server = create_test_server();
        register(&server).await;

        let response = server.delete("/api/hooks/1234").await;
        response.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(response.text(), "");

        server
            .get("/api/hooks/1234")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        // Second delete misses.
        server
            .delete("/api/hooks/1234")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        // The list is back to the empty container.
        let response = server.get("/api/hooks").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "<hooks>\n</hooks>\n");
    }

    #[tokio::test]
    async fn unknown_identifier_is_404_and_keeps_the_registration() {
        let server = create_test_server();
        register(&server).await;

        server
            .delete("/api/hooks/9999")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server.get("/api/hooks/1234").await.assert_status_ok();
    }

    #[tokio::test]
    async fn collection_delete_without_identifier_is_404() {
        let server = create_test_server();
        register(&server).await;

        server
            .delete("/api/hooks")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server.get("/api/hooks/1234").await.assert_status_ok();
    }
}

mod durability {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn registration_survives_a_server_restart() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        {
            let store = FileHookStore::open(temp_dir.path())
                .await
                .expect("Failed to open file store");
            let server = create_test_server_with(Arc::new(store));
            register(&server).await;
        }

        let store = FileHookStore::open(temp_dir.path())
            .await
            .expect("Failed to open file store");
        let server = create_test_server_with(Arc::new(store));

        let response = server.get("/api/hooks/1234").await;
        response.assert_status_ok();
        assert_eq!(response.text(), CONFIRMATION);
    }

    #[tokio::test]
    async fn delete_is_durable_too() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        {
            let store = FileHookStore::open(temp_dir.path())
                .await
                .expect("Failed to open file store");
            let server = create_test_server_with(Arc::new(store));
            register(&server).await;
            server
                .delete("/api/hooks/1234")
                .await
                .assert_status(StatusCode::NO_CONTENT);
        }

        let store = FileHookStore::open(temp_dir.path())
            .await
            .expect("Failed to open file store");
        let server = create_test_server_with(Arc::new(store));
        server
            .get("/api/hooks/1234")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
