//! Shared test helpers for Jellyfin API integration tests
//!
//! Provides wiremock-based mock server setup and small in-memory port
//! implementations for driving the use cases against the real client.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use jellyinvite_core::domain::{
    Invitation, LibraryId, LocalUser, RemoteLibrary, ServerConfig, ServiceError, UserId,
};
use jellyinvite_core::ports::{IInvitationStore, ILibraryDirectory, ILocalUserStore};
use jellyinvite_jellyfin::client::JellyfinClient;

pub const API_KEY: &str = "test-api-key";

/// Matches the PascalCase JSON `Accept` header verbatim
pub struct AcceptsPascalCase;

impl Match for AcceptsPascalCase {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get("accept")
            .and_then(|v| v.to_str().ok())
            == Some("application/json, profile=\"PascalCase\"")
    }
}

/// Starts a mock server and returns a client pointing at it
pub async fn setup_jellyfin_mock() -> (MockServer, JellyfinClient) {
    let server = MockServer::start().await;
    let client = client_for(&server);
    (server, client)
}

pub fn client_for(server: &MockServer) -> JellyfinClient {
    let config = ServerConfig::new(server.uri(), API_KEY).expect("valid config");
    JellyfinClient::new(config).expect("build client")
}

pub fn user_json(id: &str, name: &str) -> Value {
    json!({
        "Id": id,
        "Name": name,
        "HasPassword": true,
        "Policy": { "IsAdministrator": false, "EnableAllFolders": true }
    })
}

/// Mounts `GET /Users` returning the given `(id, name)` accounts
pub async fn mount_users(server: &MockServer, users: &[(&str, &str)]) {
    let body: Vec<Value> = users.iter().map(|(id, name)| user_json(id, name)).collect();
    Mock::given(method("GET"))
        .and(path("/Users"))
        .and(header("X-Emby-Token", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(body)))
        .mount(server)
        .await;
}

pub fn uid(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

pub fn lid(id: &str) -> LibraryId {
    LibraryId::new(id).expect("valid library id")
}

// ---------------------------------------------------------------------------
// In-memory ports
// ---------------------------------------------------------------------------

/// Local user store held in a vector
#[derive(Default)]
pub struct MemoryUsers {
    users: Mutex<Vec<LocalUser>>,
}

impl MemoryUsers {
    pub fn new(users: &[(&str, &str)]) -> Self {
        let users = users
            .iter()
            .enumerate()
            .map(|(i, (token, name))| LocalUser::new(i as i64 + 1, *name, uid(token)))
            .collect();
        Self {
            users: Mutex::new(users),
        }
    }

    pub fn tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .map(|u| u.token.to_string())
            .collect();
        tokens.sort();
        tokens
    }
}

#[async_trait]
impl ILocalUserStore for MemoryUsers {
    async fn list(&self, verified_only: bool) -> anyhow::Result<Vec<LocalUser>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| !verified_only || u.verified)
            .cloned()
            .collect())
    }

    async fn create(&self, username: &str, token: &UserId) -> anyhow::Result<LocalUser> {
        let mut users = self.users.lock().unwrap();
        let user = LocalUser::new(users.len() as i64 + 1, username, token.clone());
        users.push(user.clone());
        Ok(user)
    }

    async fn get_by_token(&self, token: &UserId, verify: bool) -> anyhow::Result<Option<LocalUser>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| &u.token == token && (!verify || u.verified))
            .cloned())
    }

    async fn delete(&self, user: &LocalUser) -> anyhow::Result<()> {
        self.users.lock().unwrap().retain(|u| u.token != user.token);
        Ok(())
    }
}

/// Invitation store and library directory in one
pub struct MemoryCatalog {
    invitations: Vec<Invitation>,
    libraries: Vec<LibraryId>,
}

impl MemoryCatalog {
    pub fn new(invitations: Vec<Invitation>, libraries: &[&str]) -> Self {
        Self {
            invitations,
            libraries: libraries.iter().map(|id| lid(id)).collect(),
        }
    }
}

#[async_trait]
impl IInvitationStore for MemoryCatalog {
    async fn get_by_code(&self, code: &str) -> anyhow::Result<Invitation> {
        self.invitations
            .iter()
            .find(|i| i.code == code)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound("Invitation not found".to_string()).into())
    }

    async fn save(&self, _invitation: &Invitation) -> anyhow::Result<()> {
        anyhow::bail!("read-only catalog")
    }

    async fn list(&self) -> anyhow::Result<Vec<Invitation>> {
        Ok(self.invitations.clone())
    }
}

#[async_trait]
impl ILibraryDirectory for MemoryCatalog {
    async fn list_all_ids(&self) -> anyhow::Result<Vec<LibraryId>> {
        Ok(self.libraries.clone())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<RemoteLibrary>> {
        Ok(self
            .libraries
            .iter()
            .map(|id| RemoteLibrary::new(id.clone(), id.as_str()))
            .collect())
    }

    async fn replace_all(&self, _libraries: &[RemoteLibrary]) -> anyhow::Result<()> {
        anyhow::bail!("read-only catalog")
    }
}
