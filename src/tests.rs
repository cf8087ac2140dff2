//! Integration tests for the parish backend.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::storage::Storage;
use crate::{create_router, AppState};

const ADMIN_EMAIL: &str = "admin@parish.test";
const ADMIN_PASSWORD: &str = "a-very-good-password";

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    admin: Client,
    base_url: String,
    temp_dir: TempDir,
}

impl TestFixture {
    /// Spin up a server and create the first admin account. `admin` sends a
    /// bearer token on every request; `client` is unauthenticated.
    async fn new() -> Self {
        let mut fixture = Self::without_admin().await;

        let resp = fixture
            .client
            .post(fixture.url("/api/auth/setup"))
            .json(&json!({
                "email": ADMIN_EMAIL,
                "name": "Parish Admin",
                "password": ADMIN_PASSWORD
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        let token = body["data"]["token"].as_str().unwrap();

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        fixture.admin = Client::builder().default_headers(headers).build().unwrap();

        fixture
    }

    /// Spin up a server with an empty database and no admin account.
    async fn without_admin() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let upload_dir = temp_dir.path().join("uploads");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        // Initialize upload storage
        let storage = Arc::new(
            Storage::new(upload_dir.clone(), None)
                .await
                .expect("Failed to init storage"),
        );

        // Create config
        let config = Config {
            db_path,
            upload_dir,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            session_secret: "integration-test-secret".to_string(),
            session_ttl_hours: 24,
            public_base_url: None,
            request_timeout_secs: 30,
            log_level: "warn".to_string(),
        };

        let state = AppState {
            repo,
            storage,
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            admin: Client::new(),
            base_url,
            temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create an activity through the admin API and return its id.
    async fn create_activity(&self, name: &str) -> String {
        let resp = self
            .admin
            .post(self.url("/api/admin/activities"))
            .json(&json!({
                "name": name,
                "date": "2025-06-15",
                "description": "Parish gathering"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Create an author through the admin API and return its id.
    async fn create_author(&self, first: &str, last: &str) -> String {
        let resp = self
            .admin
            .post(self.url("/api/admin/authors"))
            .json(&json!({ "firstName": first, "lastName": last }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Create a memory attached to an activity and return its id.
    async fn create_memory(&self, activity_id: &str) -> String {
        let resp = self
            .admin
            .post(self.url("/api/admin/memories"))
            .json(&json!({
                "imageUrl": "/uploads/photos/seed.png",
                "height": 800,
                "width": 600,
                "imgType": "png",
                "activityId": activity_id
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::without_admin().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_setup_and_login_flow() {
    let fixture = TestFixture::without_admin().await;

    // First setup succeeds and auto-logs-in
    let setup_resp = fixture
        .client
        .post(fixture.url("/api/auth/setup"))
        .json(&json!({
            "email": ADMIN_EMAIL,
            "name": "Parish Admin",
            "password": ADMIN_PASSWORD
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(setup_resp.status(), 200);
    let setup_body: Value = setup_resp.json().await.unwrap();
    assert_eq!(setup_body["status"], "Success");
    assert!(!setup_body["data"]["token"].as_str().unwrap().is_empty());
    assert_eq!(setup_body["data"]["admin"]["email"], ADMIN_EMAIL);
    assert_eq!(setup_body["data"]["admin"]["role"], "admin");
    assert_eq!(setup_body["data"]["expiresIn"], 24 * 3600);

    // Second setup is rejected
    let second_resp = fixture
        .client
        .post(fixture.url("/api/auth/setup"))
        .json(&json!({
            "email": "other@parish.test",
            "name": "Second Admin",
            "password": "another-password"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(second_resp.status(), 400);
    let second_body: Value = second_resp.json().await.unwrap();
    assert_eq!(second_body["status"], "Error");

    // Short password is rejected
    let weak_resp = fixture
        .client
        .post(fixture.url("/api/auth/setup"))
        .json(&json!({
            "email": "weak@parish.test",
            "name": "Weak",
            "password": "short"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(weak_resp.status(), 400);

    // Login with the right credentials
    let login_resp = fixture
        .client
        .post(fixture.url("/api/auth/login"))
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(login_resp.status(), 200);
    let login_body: Value = login_resp.json().await.unwrap();
    assert!(!login_body["data"]["token"].as_str().unwrap().is_empty());
    // The stored hash never leaves the server
    assert!(login_body["data"]["admin"].get("passwordHash").is_none());

    // Wrong password
    let wrong_resp = fixture
        .client
        .post(fixture.url("/api/auth/login"))
        .json(&json!({ "email": ADMIN_EMAIL, "password": "wrong-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_resp.status(), 401);

    // Unknown email
    let unknown_resp = fixture
        .client
        .post(fixture.url("/api/auth/login"))
        .json(&json!({ "email": "nobody@parish.test", "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_resp.status(), 401);
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let fixture = TestFixture::new().await;

    // No token
    let resp = fixture
        .client
        .post(fixture.url("/api/admin/activities"))
        .json(&json!({
            "name": "Easter Vigil",
            "date": "2025-04-19",
            "description": "Evening service"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "Error");

    // Garbage token
    let garbage_resp = fixture
        .client
        .post(fixture.url("/api/admin/activities"))
        .header("Authorization", "Bearer not-a-real-token")
        .json(&json!({
            "name": "Easter Vigil",
            "date": "2025-04-19",
            "description": "Evening service"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(garbage_resp.status(), 401);
}

#[tokio::test]
async fn test_session_me_endpoint() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .admin
        .get(fixture.url("/api/admin/auth/me"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["email"], ADMIN_EMAIL);
    assert_eq!(body["data"]["name"], "Parish Admin");

    // Unauthenticated session check fails
    let anon_resp = fixture
        .client
        .get(fixture.url("/api/admin/auth/me"))
        .send()
        .await
        .unwrap();
    assert_eq!(anon_resp.status(), 401);
}

#[tokio::test]
async fn test_activity_crud() {
    let fixture = TestFixture::new().await;

    // Create
    let create_resp = fixture
        .admin
        .post(fixture.url("/api/admin/activities"))
        .json(&json!({
            "name": "Harvest Festival",
            "date": "2025-09-21",
            "description": "Annual harvest celebration"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 200);
    let create_body: Value = create_resp.json().await.unwrap();
    assert_eq!(create_body["status"], "Success");
    assert_eq!(create_body["data"]["name"], "Harvest Festival");
    assert!(create_body["data"]["createdAt"].is_string());
    assert!(create_body["data"]["updatedAt"].is_string());
    let activity_id = create_body["data"]["id"].as_str().unwrap();

    // Get (public)
    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/activities/{}", activity_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 200);
    let get_body: Value = get_resp.json().await.unwrap();
    assert_eq!(get_body["data"]["name"], "Harvest Festival");
    assert_eq!(get_body["data"]["date"], "2025-09-21");

    // Update
    let update_resp = fixture
        .admin
        .put(fixture.url(&format!("/api/admin/activities/{}", activity_id)))
        .json(&json!({ "name": "Harvest Festival 2025" }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["data"]["name"], "Harvest Festival 2025");
    // Untouched fields survive the partial update
    assert_eq!(update_body["data"]["description"], "Annual harvest celebration");

    // List (public)
    let list_resp = fixture
        .client
        .get(fixture.url("/api/activities"))
        .send()
        .await
        .unwrap();
    assert_eq!(list_resp.status(), 200);
    let list_body: Value = list_resp.json().await.unwrap();
    assert_eq!(list_body["data"].as_array().unwrap().len(), 1);

    // Delete
    let delete_resp = fixture
        .admin
        .delete(fixture.url(&format!("/api/admin/activities/{}", activity_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    // Gone
    let get_deleted = fixture
        .client
        .get(fixture.url(&format!("/api/activities/{}", activity_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_deleted.status(), 404);
}

#[tokio::test]
async fn test_validation_errors() {
    let fixture = TestFixture::new().await;

    // Empty required field
    let empty_resp = fixture
        .admin
        .post(fixture.url("/api/admin/activities"))
        .json(&json!({
            "name": "",
            "date": "2025-06-15",
            "description": "x"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(empty_resp.status(), 400);
    let empty_body: Value = empty_resp.json().await.unwrap();
    assert_eq!(empty_body["status"], "Error");
    assert!(empty_body["message"].as_str().unwrap().contains("Name"));

    // Missing required key entirely
    let missing_resp = fixture
        .admin
        .post(fixture.url("/api/admin/activities"))
        .json(&json!({ "name": "No date" }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_resp.status(), 400);

    // Memory with non-positive dimensions
    let bad_memory = fixture
        .admin
        .post(fixture.url("/api/admin/memories"))
        .json(&json!({
            "imageUrl": "/uploads/photos/x.png",
            "height": 0,
            "width": 600,
            "imgType": "png",
            "activityId": "550e8400-e29b-41d4-a716-446655440000"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_memory.status(), 400);
}

#[tokio::test]
async fn test_malformed_id_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/activities/not-a-uuid"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "Error");

    let delete_resp = fixture
        .admin
        .delete(fixture.url("/api/admin/articles/not-a-uuid"))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 400);
}

#[tokio::test]
async fn test_not_found_errors() {
    let fixture = TestFixture::new().await;
    let missing = "550e8400-e29b-41d4-a716-446655440000";

    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/activities/{}", missing)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 404);
    let body: Value = get_resp.json().await.unwrap();
    assert_eq!(body["status"], "Error");

    let update_resp = fixture
        .admin
        .put(fixture.url(&format!("/api/admin/authors/{}", missing)))
        .json(&json!({ "firstName": "Ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 404);

    let delete_resp = fixture
        .admin
        .delete(fixture.url(&format!("/api/admin/pastors/{}", missing)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 404);
}

#[tokio::test]
async fn test_partial_update_preserves_other_fields() {
    let fixture = TestFixture::new().await;

    let create_resp = fixture
        .admin
        .post(fixture.url("/api/admin/coordinators"))
        .json(&json!({
            "name": "Maria Gonzalez",
            "occupation": "Youth Ministry",
            "email": "maria@parish.test",
            "isFeatured": true
        }))
        .send()
        .await
        .unwrap();
    let create_body: Value = create_resp.json().await.unwrap();
    let id = create_body["data"]["id"].as_str().unwrap();

    // Update only the phone number
    let update_resp = fixture
        .admin
        .put(fixture.url(&format!("/api/admin/coordinators/{}", id)))
        .json(&json!({ "phoneNumber": "+1 555 0100" }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);

    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/coordinators/{}", id)))
        .send()
        .await
        .unwrap();
    let get_body: Value = get_resp.json().await.unwrap();
    assert_eq!(get_body["data"]["name"], "Maria Gonzalez");
    assert_eq!(get_body["data"]["occupation"], "Youth Ministry");
    assert_eq!(get_body["data"]["email"], "maria@parish.test");
    assert_eq!(get_body["data"]["phoneNumber"], "+1 555 0100");
    assert_eq!(get_body["data"]["isFeatured"], true);
}

#[tokio::test]
async fn test_article_pagination() {
    let fixture = TestFixture::new().await;
    let author_id = fixture.create_author("John", "Wesley").await;

    for i in 0..25 {
        let resp = fixture
            .admin
            .post(fixture.url("/api/admin/articles"))
            .json(&json!({
                "title": format!("Reflection {}", i),
                "authorId": author_id,
                "text": "Body text",
                "date": "2025-05-01"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    // Default page size is 10
    let default_resp = fixture
        .client
        .get(fixture.url("/api/articles"))
        .send()
        .await
        .unwrap();
    assert_eq!(default_resp.status(), 200);
    let default_body: Value = default_resp.json().await.unwrap();
    assert_eq!(default_body["data"].as_array().unwrap().len(), 10);
    assert_eq!(default_body["pagination"]["currentPage"], 1);
    assert_eq!(default_body["pagination"]["totalPages"], 3);
    assert_eq!(default_body["pagination"]["totalItems"], 25);
    assert_eq!(default_body["pagination"]["itemsPerPage"], 10);
    assert_eq!(default_body["pagination"]["hasNext"], true);
    assert_eq!(default_body["pagination"]["hasPrev"], false);

    // Middle page
    let page2_resp = fixture
        .client
        .get(fixture.url("/api/articles?page=2&limit=10"))
        .send()
        .await
        .unwrap();
    let page2_body: Value = page2_resp.json().await.unwrap();
    assert_eq!(page2_body["data"].as_array().unwrap().len(), 10);
    assert_eq!(page2_body["pagination"]["hasNext"], true);
    assert_eq!(page2_body["pagination"]["hasPrev"], true);

    // Last page is short
    let page3_resp = fixture
        .client
        .get(fixture.url("/api/articles?page=3&limit=10"))
        .send()
        .await
        .unwrap();
    let page3_body: Value = page3_resp.json().await.unwrap();
    assert_eq!(page3_body["data"].as_array().unwrap().len(), 5);
    assert_eq!(page3_body["pagination"]["hasNext"], false);

    // Page past the end is an empty page, not an error
    let past_resp = fixture
        .client
        .get(fixture.url("/api/articles?page=4&limit=10"))
        .send()
        .await
        .unwrap();
    assert_eq!(past_resp.status(), 200);
    let past_body: Value = past_resp.json().await.unwrap();
    assert!(past_body["data"].as_array().unwrap().is_empty());
    assert_eq!(past_body["pagination"]["totalPages"], 3);
    assert_eq!(past_body["pagination"]["hasNext"], false);

    // Absurdly large page numbers degrade the same way
    let huge_resp = fixture
        .client
        .get(fixture.url(&format!("/api/articles?page={}&limit=100", i64::MAX)))
        .send()
        .await
        .unwrap();
    assert_eq!(huge_resp.status(), 200);
    let huge_body: Value = huge_resp.json().await.unwrap();
    assert!(huge_body["data"].as_array().unwrap().is_empty());
    assert_eq!(huge_body["pagination"]["hasNext"], false);

    // Out-of-range bounds
    for bad in ["page=0", "limit=0", "limit=101"] {
        let resp = fixture
            .client
            .get(fixture.url(&format!("/api/articles?{}", bad)))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "expected 400 for {}", bad);
    }
}

#[tokio::test]
async fn test_articles_by_author() {
    let fixture = TestFixture::new().await;
    let wesley = fixture.create_author("John", "Wesley").await;
    let luther = fixture.create_author("Martin", "Luther").await;

    for (title, author) in [
        ("On Grace", &wesley),
        ("On Faith", &wesley),
        ("On Works", &luther),
    ] {
        fixture
            .admin
            .post(fixture.url("/api/admin/articles"))
            .json(&json!({
                "title": title,
                "authorId": author,
                "text": "Body",
                "date": "2025-05-01"
            }))
            .send()
            .await
            .unwrap();
    }

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/articles/author/{}", wesley)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let articles = body["data"].as_array().unwrap();
    assert_eq!(articles.len(), 2);
    for article in articles {
        assert_eq!(article["authorId"].as_str().unwrap(), wesley);
    }
}

#[tokio::test]
async fn test_activity_delete_cascades_memories() {
    let fixture = TestFixture::new().await;
    let activity_id = fixture.create_activity("Summer Camp").await;

    let memory_id = fixture.create_memory(&activity_id).await;
    fixture.create_memory(&activity_id).await;
    fixture.create_memory(&activity_id).await;

    // Delete the parent activity
    let delete_resp = fixture
        .admin
        .delete(fixture.url(&format!("/api/admin/activities/{}", activity_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    // All attached memories are gone
    let list_resp = fixture
        .client
        .get(fixture.url(&format!("/api/memories/activity/{}", activity_id)))
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    assert!(list_body["data"].as_array().unwrap().is_empty());

    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/memories/{}", memory_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 404);
}

#[tokio::test]
async fn test_bulk_delete_memories_by_activity() {
    let fixture = TestFixture::new().await;
    let activity_id = fixture.create_activity("Choir Retreat").await;
    fixture.create_memory(&activity_id).await;
    fixture.create_memory(&activity_id).await;

    let resp = fixture
        .admin
        .delete(fixture.url(&format!("/api/admin/memories/activity/{}", activity_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"], 2);

    // The activity itself survives
    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/activities/{}", activity_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 200);
}

#[tokio::test]
async fn test_memories_grouped_under_activity() {
    let fixture = TestFixture::new().await;
    let camp = fixture.create_activity("Youth Camp").await;
    let other = fixture.create_activity("Bake Sale").await;

    let memory_id = fixture.create_memory(&camp).await;

    let body: Value = fixture
        .client
        .get(fixture.url(&format!("/api/memories/activity/{}", camp)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"].as_str().unwrap(), memory_id);
    assert_eq!(items[0]["activityId"].as_str().unwrap(), camp);

    let empty: Value = fixture
        .client
        .get(fixture.url(&format!("/api/memories/activity/{}", other)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(empty["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_category_gating_and_sort() {
    let fixture = TestFixture::new().await;

    for (name, sort_order, active) in [
        ("Teachings", 2, true),
        ("Sermons", 1, true),
        ("Archive", 3, false),
    ] {
        let resp = fixture
            .admin
            .post(fixture.url("/api/admin/categories"))
            .json(&json!({ "name": name, "sortOrder": sort_order, "isActive": active }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    // Public dropdown feed: active only, sorted by sortOrder
    let public_resp = fixture
        .client
        .get(fixture.url("/api/audio-messages/categories"))
        .send()
        .await
        .unwrap();
    assert_eq!(public_resp.status(), 200);
    let public_body: Value = public_resp.json().await.unwrap();
    let names: Vec<&str> = public_body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Sermons", "Teachings"]);

    // Admin sees everything
    let admin_resp = fixture
        .admin
        .get(fixture.url("/api/admin/categories"))
        .send()
        .await
        .unwrap();
    let admin_body: Value = admin_resp.json().await.unwrap();
    assert_eq!(admin_body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_message_publication_gating() {
    let fixture = TestFixture::new().await;
    let coordinator_id = "550e8400-e29b-41d4-a716-446655440000";

    let published_resp = fixture
        .admin
        .post(fixture.url("/api/admin/messages"))
        .json(&json!({
            "title": "Welcome Back",
            "content": "We are glad to see you.",
            "coordinatorId": coordinator_id,
            "isPublished": true,
            "datePublished": "2025-03-09"
        }))
        .send()
        .await
        .unwrap();
    let published_body: Value = published_resp.json().await.unwrap();
    let published_id = published_body["data"]["id"].as_str().unwrap();

    let draft_resp = fixture
        .admin
        .post(fixture.url("/api/admin/messages"))
        .json(&json!({
            "title": "Draft Notes",
            "content": "Not ready yet.",
            "coordinatorId": coordinator_id
        }))
        .send()
        .await
        .unwrap();
    let draft_body: Value = draft_resp.json().await.unwrap();
    let draft_id = draft_body["data"]["id"].as_str().unwrap();

    // Public list only carries the published message
    let public_list: Value = fixture
        .client
        .get(fixture.url("/api/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let public_items = public_list["data"].as_array().unwrap();
    assert_eq!(public_items.len(), 1);
    assert_eq!(public_items[0]["title"], "Welcome Back");

    // A draft id is indistinguishable from a missing one publicly
    let draft_public = fixture
        .client
        .get(fixture.url(&format!("/api/messages/{}", draft_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(draft_public.status(), 404);

    let published_public = fixture
        .client
        .get(fixture.url(&format!("/api/messages/{}", published_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(published_public.status(), 200);

    // The coordinator filter is also gated
    let by_coordinator: Value = fixture
        .client
        .get(fixture.url(&format!("/api/messages/coordinator/{}", coordinator_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_coordinator["data"].as_array().unwrap().len(), 1);

    // Admin sees both, draft included
    let admin_list: Value = fixture
        .admin
        .get(fixture.url("/api/admin/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin_list["data"].as_array().unwrap().len(), 2);

    let admin_draft = fixture
        .admin
        .get(fixture.url(&format!("/api/admin/messages/{}", draft_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(admin_draft.status(), 200);

    // Publishing the draft makes it visible
    let publish_resp = fixture
        .admin
        .put(fixture.url(&format!("/api/admin/messages/{}", draft_id)))
        .json(&json!({ "isPublished": true, "datePublished": "2025-03-16" }))
        .send()
        .await
        .unwrap();
    assert_eq!(publish_resp.status(), 200);

    let public_after: Value = fixture
        .client
        .get(fixture.url("/api/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items_after = public_after["data"].as_array().unwrap();
    assert_eq!(items_after.len(), 2);
    // Most recently published first
    assert_eq!(items_after[0]["title"], "Draft Notes");
}

#[tokio::test]
async fn test_pastor_active_gating() {
    let fixture = TestFixture::new().await;

    fixture
        .admin
        .post(fixture.url("/api/admin/pastors"))
        .json(&json!({ "name": "Sarah Okafor", "title": "Senior Pastor" }))
        .send()
        .await
        .unwrap();

    fixture
        .admin
        .post(fixture.url("/api/admin/pastors"))
        .json(&json!({
            "name": "Emeritus Brown",
            "title": "Pastor Emeritus",
            "isActive": false
        }))
        .send()
        .await
        .unwrap();

    let public_body: Value = fixture
        .client
        .get(fixture.url("/api/pastors"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let public_items = public_body["data"].as_array().unwrap();
    assert_eq!(public_items.len(), 1);
    assert_eq!(public_items[0]["name"], "Sarah Okafor");

    let admin_body: Value = fixture
        .admin
        .get(fixture.url("/api/admin/pastors"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin_body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_featured_coordinators_filter() {
    let fixture = TestFixture::new().await;

    fixture
        .admin
        .post(fixture.url("/api/admin/coordinators"))
        .json(&json!({ "name": "Featured Member", "isFeatured": true }))
        .send()
        .await
        .unwrap();
    fixture
        .admin
        .post(fixture.url("/api/admin/coordinators"))
        .json(&json!({ "name": "Regular Member" }))
        .send()
        .await
        .unwrap();

    let featured: Value = fixture
        .client
        .get(fixture.url("/api/coordinators/featured"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = featured["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Featured Member");

    let all: Value = fixture
        .client
        .get(fixture.url("/api/coordinators"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_upload_image_validation() {
    let fixture = TestFixture::new().await;

    // Wrong MIME type is rejected before any write
    let bad_form = Form::new().part(
        "image",
        Part::bytes(b"plain text".to_vec())
            .file_name("notes.txt")
            .mime_str("text/plain")
            .unwrap(),
    );
    let bad_resp = fixture
        .admin
        .post(fixture.url("/api/admin/articles/upload-image"))
        .multipart(bad_form)
        .send()
        .await
        .unwrap();
    assert_eq!(bad_resp.status(), 400);

    // Oversized image is rejected
    let oversized = vec![0u8; 6 * 1024 * 1024];
    let big_form = Form::new().part(
        "image",
        Part::bytes(oversized)
            .file_name("huge.png")
            .mime_str("image/png")
            .unwrap(),
    );
    let big_resp = fixture
        .admin
        .post(fixture.url("/api/admin/articles/upload-image"))
        .multipart(big_form)
        .send()
        .await
        .unwrap();
    assert_eq!(big_resp.status(), 400);

    // A valid upload succeeds and is publicly served
    let good_form = Form::new().part(
        "image",
        Part::bytes(b"fake png bytes".to_vec())
            .file_name("banner.png")
            .mime_str("image/png")
            .unwrap(),
    );
    let good_resp = fixture
        .admin
        .post(fixture.url("/api/admin/articles/upload-image"))
        .multipart(good_form)
        .send()
        .await
        .unwrap();
    assert_eq!(good_resp.status(), 200);
    let good_body: Value = good_resp.json().await.unwrap();
    assert_eq!(good_body["data"]["fallback"], false);
    let url = good_body["data"]["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/images/"));

    let served = fixture
        .client
        .get(fixture.url(url))
        .send()
        .await
        .unwrap();
    assert_eq!(served.status(), 200);
    assert_eq!(served.bytes().await.unwrap().as_ref(), b"fake png bytes");
}

#[tokio::test]
async fn test_upload_requires_session() {
    let fixture = TestFixture::new().await;

    let form = Form::new().part(
        "image",
        Part::bytes(b"bytes".to_vec())
            .file_name("x.png")
            .mime_str("image/png")
            .unwrap(),
    );
    let resp = fixture
        .client
        .post(fixture.url("/api/admin/articles/upload-image"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_upload_photo_for_memories() {
    let fixture = TestFixture::new().await;

    let form = Form::new().part(
        "photo",
        Part::bytes(b"gallery photo bytes".to_vec())
            .file_name("camp.jpg")
            .mime_str("image/jpeg")
            .unwrap(),
    );
    let resp = fixture
        .admin
        .post(fixture.url("/api/admin/memories/upload-photo"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let url = body["data"]["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/photos/"));
    assert!(url.ends_with(".jpg"));
}

#[tokio::test]
async fn test_audio_message_multipart_create() {
    let fixture = TestFixture::new().await;

    let form = Form::new()
        .text("title", "Easter Morning Sermon")
        .text("speaker", "Pastor Sarah")
        .text("date", "2025-04-20")
        .text("category", "Sermons")
        .text("description", "Resurrection Sunday message")
        .text("duration", "42:17")
        .part(
            "audio",
            Part::bytes(b"fake mp3 bytes".to_vec())
                .file_name("easter.mp3")
                .mime_str("audio/mpeg")
                .unwrap(),
        )
        .part(
            "thumbnail",
            Part::bytes(b"fake thumb bytes".to_vec())
                .file_name("thumb.png")
                .mime_str("image/png")
                .unwrap(),
        );

    let resp = fixture
        .admin
        .post(fixture.url("/api/admin/audio-messages"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "Success");
    assert_eq!(body["data"]["title"], "Easter Morning Sermon");
    assert_eq!(body["data"]["category"], "Sermons");
    assert!(body["data"]["audioUrl"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/audio/"));
    assert!(body["data"]["thumbnail"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/thumbnails/"));
    let id = body["data"]["id"].as_str().unwrap();

    // Publicly readable
    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/audio-messages/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 200);

    // Category filter finds it
    let by_category: Value = fixture
        .client
        .get(fixture.url("/api/audio-messages/category/Sermons"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_category["data"].as_array().unwrap().len(), 1);

    // Metadata updates over plain JSON
    let update_resp = fixture
        .admin
        .put(fixture.url(&format!("/api/admin/audio-messages/{}", id)))
        .json(&json!({ "title": "Easter Sermon (remastered)" }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["data"]["title"], "Easter Sermon (remastered)");
    assert_eq!(update_body["data"]["speaker"], "Pastor Sarah");
}

#[tokio::test]
async fn test_audio_create_flags_thumbnail_fallback() {
    let fixture = TestFixture::new().await;

    // Replace the thumbnails subdirectory with a file so writes under it fail.
    let thumbnails = fixture.temp_dir.path().join("uploads").join("thumbnails");
    std::fs::remove_dir(&thumbnails).unwrap();
    std::fs::write(&thumbnails, b"not a dir").unwrap();

    let form = Form::new()
        .text("title", "Midweek Devotion")
        .text("speaker", "Pastor Sarah")
        .text("date", "2025-05-07")
        .text("category", "Teachings")
        .part(
            "audio",
            Part::bytes(b"fake mp3 bytes".to_vec())
                .file_name("devotion.mp3")
                .mime_str("audio/mpeg")
                .unwrap(),
        )
        .part(
            "thumbnail",
            Part::bytes(b"fake thumb bytes".to_vec())
                .file_name("thumb.png")
                .mime_str("image/png")
                .unwrap(),
        );

    let resp = fixture
        .admin
        .post(fixture.url("/api/admin/audio-messages"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "Success");
    // Creation succeeds, but the envelope message must flag the substitution
    assert!(body["message"].as_str().unwrap().contains("default image"));
    assert!(body["data"]["thumbnail"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/defaults/"));
    assert!(body["data"]["audioUrl"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/audio/"));
}

#[tokio::test]
async fn test_audio_message_requires_audio_file() {
    let fixture = TestFixture::new().await;

    // Metadata only, no audio part
    let form = Form::new()
        .text("title", "Silent Sermon")
        .text("speaker", "Nobody")
        .text("date", "2025-04-20")
        .text("category", "Sermons");
    let resp = fixture
        .admin
        .post(fixture.url("/api/admin/audio-messages"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Non-audio MIME for the audio part
    let bad_form = Form::new()
        .text("title", "Video Sermon")
        .text("speaker", "Somebody")
        .text("date", "2025-04-20")
        .text("category", "Sermons")
        .part(
            "audio",
            Part::bytes(b"mp4 bytes".to_vec())
                .file_name("sermon.mp4")
                .mime_str("video/mp4")
                .unwrap(),
        );
    let bad_resp = fixture
        .admin
        .post(fixture.url("/api/admin/audio-messages"))
        .multipart(bad_form)
        .send()
        .await
        .unwrap();
    assert_eq!(bad_resp.status(), 400);
}

#[tokio::test]
async fn test_category_delete_leaves_orphaned_tags() {
    let fixture = TestFixture::new().await;

    // Create the category and tag an audio message with its name
    let category_resp = fixture
        .admin
        .post(fixture.url("/api/admin/categories"))
        .json(&json!({ "name": "Easter", "sortOrder": 1 }))
        .send()
        .await
        .unwrap();
    let category_body: Value = category_resp.json().await.unwrap();
    let category_id = category_body["data"]["id"].as_str().unwrap();

    let form = Form::new()
        .text("title", "Easter Message")
        .text("speaker", "Pastor Sarah")
        .text("date", "2025-04-20")
        .text("category", "Easter")
        .part(
            "audio",
            Part::bytes(b"mp3".to_vec())
                .file_name("m.mp3")
                .mime_str("audio/mpeg")
                .unwrap(),
        );
    let audio_resp = fixture
        .admin
        .post(fixture.url("/api/admin/audio-messages"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    let audio_body: Value = audio_resp.json().await.unwrap();
    let audio_id = audio_body["data"]["id"].as_str().unwrap();

    // Delete the category
    let delete_resp = fixture
        .admin
        .delete(fixture.url(&format!("/api/admin/categories/{}", category_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    // The message keeps its orphaned tag and stays filterable by it
    let get_body: Value = fixture
        .client
        .get(fixture.url(&format!("/api/audio-messages/{}", audio_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(get_body["data"]["category"], "Easter");

    let by_category: Value = fixture
        .client
        .get(fixture.url("/api/audio-messages/category/Easter"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_category["data"].as_array().unwrap().len(), 1);
}
