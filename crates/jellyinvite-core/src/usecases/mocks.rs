//! In-memory port implementations shared by the use case tests

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::domain::{
    AvatarRequest, ImageRequest, Invitation, LibraryId, LocalUser, RemoteLibrary, RemoteUser,
    ServiceError, UserId, UserPolicy,
};
use crate::ports::{
    IAvatarService, IInvitationStore, ILibraryDirectory, ILocalUserStore, IMediaServer,
};

pub fn uid(s: &str) -> UserId {
    UserId::new(s).unwrap()
}

pub fn lid(s: &str) -> LibraryId {
    LibraryId::new(s).unwrap()
}

// ============================================================================
// Media server
// ============================================================================

/// Records every call by name; serves users and libraries from memory
pub struct MockMediaServer {
    users: Mutex<Vec<RemoteUser>>,
    libraries: Vec<RemoteLibrary>,
    calls: Mutex<Vec<String>>,
    policy_updates: Mutex<Vec<(UserId, UserPolicy)>>,
    default_policy: Option<UserPolicy>,
    image: Option<Vec<u8>>,
}

impl MockMediaServer {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            libraries: Vec::new(),
            calls: Mutex::new(Vec::new()),
            policy_updates: Mutex::new(Vec::new()),
            default_policy: None,
            image: None,
        }
    }

    pub fn with_users(self, users: &[(&str, &str)]) -> Self {
        *self.users.lock().unwrap() = users
            .iter()
            .map(|(id, name)| RemoteUser::new(uid(id), *name))
            .collect();
        self
    }

    pub fn with_libraries(mut self, ids: &[&str]) -> Self {
        self.libraries = ids
            .iter()
            .map(|id| RemoteLibrary::new(lid(id), format!("Library {id}")))
            .collect();
        self
    }

    /// Policy attached to accounts returned by `create_user`
    pub fn with_default_policy(mut self, policy: Value) -> Self {
        self.default_policy = Some(serde_json::from_value(policy).unwrap());
        self
    }

    pub fn with_image(mut self, bytes: &[u8]) -> Self {
        self.image = Some(bytes.to_vec());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn policy_updates(&self) -> Vec<(UserId, UserPolicy)> {
        self.policy_updates.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait::async_trait]
impl IMediaServer for MockMediaServer {
    async fn list_libraries(&self) -> anyhow::Result<Vec<RemoteLibrary>> {
        self.record("list_libraries");
        Ok(self.libraries.clone())
    }

    async fn list_users(&self) -> anyhow::Result<Vec<RemoteUser>> {
        self.record("list_users");
        Ok(self.users.lock().unwrap().clone())
    }

    async fn get_user(&self, user_id: &UserId) -> anyhow::Result<RemoteUser> {
        self.record("get_user");
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.id == user_id)
            .cloned()
            .ok_or_else(|| ServiceError::RemoteApi { status: 404 }.into())
    }

    async fn get_user_policy(&self, user_id: &UserId) -> anyhow::Result<UserPolicy> {
        self.record("get_user_policy");
        let user = self.get_user(user_id).await?;
        user.policy
            .ok_or_else(|| ServiceError::NotFound("User does not have a policy.".into()).into())
    }

    async fn delete_user(&self, user_id: &UserId) -> anyhow::Result<()> {
        self.record("delete_user");
        self.users.lock().unwrap().retain(|u| &u.id != user_id);
        Ok(())
    }

    async fn create_user(&self, name: &str, _password: &str) -> anyhow::Result<RemoteUser> {
        self.record("create_user");
        let mut user = RemoteUser::new(uid(&format!("new-{name}")), name);
        user.policy = self.default_policy.clone();
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update_user_policy(
        &self,
        user_id: &UserId,
        policy: &UserPolicy,
    ) -> anyhow::Result<Value> {
        self.record("update_user_policy");
        self.policy_updates
            .lock()
            .unwrap()
            .push((user_id.clone(), policy.clone()));
        Ok(json!({ "Id": user_id.as_str(), "Updated": true }))
    }

    async fn get_profile_image(
        &self,
        _user_id: &UserId,
        _request: &ImageRequest,
    ) -> anyhow::Result<Vec<u8>> {
        self.record("get_profile_image");
        self.image
            .clone()
            .ok_or_else(|| ServiceError::RemoteApi { status: 404 }.into())
    }
}

// ============================================================================
// Local users
// ============================================================================

pub struct MockLocalUsers {
    users: Mutex<Vec<LocalUser>>,
    next_id: Mutex<i64>,
    created: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    fail_create_for: Option<String>,
}

impl MockLocalUsers {
    pub fn new(users: &[(&str, &str)]) -> Self {
        let users: Vec<LocalUser> = users
            .iter()
            .enumerate()
            .map(|(i, (token, name))| LocalUser::new(i as i64 + 1, *name, uid(token)))
            .collect();
        let next_id = users.len() as i64 + 1;
        Self {
            users: Mutex::new(users),
            next_id: Mutex::new(next_id),
            created: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            fail_create_for: None,
        }
    }

    /// Makes `create` fail for the given username
    pub fn failing_create_for(mut self, username: &str) -> Self {
        self.fail_create_for = Some(username.to_string());
        self
    }

    pub fn verify(&self, token: &str) {
        for user in self.users.lock().unwrap().iter_mut() {
            if user.token.as_str() == token {
                user.verified = true;
            }
        }
    }

    pub fn usernames(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .map(|u| u.username.clone())
            .collect();
        names.sort();
        names
    }

    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ILocalUserStore for MockLocalUsers {
    async fn list(&self, verified_only: bool) -> anyhow::Result<Vec<LocalUser>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| !verified_only || u.verified)
            .cloned()
            .collect())
    }

    async fn create(&self, username: &str, token: &UserId) -> anyhow::Result<LocalUser> {
        if self.fail_create_for.as_deref() == Some(username) {
            anyhow::bail!("disk full");
        }
        let mut next_id = self.next_id.lock().unwrap();
        let user = LocalUser::new(*next_id, username, token.clone());
        *next_id += 1;
        self.users.lock().unwrap().push(user.clone());
        self.created.lock().unwrap().push(username.to_string());
        Ok(user)
    }

    async fn get_by_token(
        &self,
        token: &UserId,
        verify: bool,
    ) -> anyhow::Result<Option<LocalUser>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.token == token && (!verify || u.verified))
            .cloned())
    }

    async fn delete(&self, user: &LocalUser) -> anyhow::Result<()> {
        self.users.lock().unwrap().retain(|u| u.id != user.id);
        self.deleted.lock().unwrap().push(user.username.clone());
        Ok(())
    }
}

// ============================================================================
// Invitations and libraries
// ============================================================================

pub struct MockInvitations {
    invitations: Mutex<HashMap<String, Invitation>>,
}

impl MockInvitations {
    pub fn new(invitations: Vec<Invitation>) -> Self {
        Self {
            invitations: Mutex::new(
                invitations
                    .into_iter()
                    .map(|i| (i.code.clone(), i))
                    .collect(),
            ),
        }
    }
}

#[async_trait::async_trait]
impl IInvitationStore for MockInvitations {
    async fn get_by_code(&self, code: &str) -> anyhow::Result<Invitation> {
        self.invitations
            .lock()
            .unwrap()
            .get(code)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("Invitation {code}")).into())
    }

    async fn save(&self, invitation: &Invitation) -> anyhow::Result<()> {
        self.invitations
            .lock()
            .unwrap()
            .insert(invitation.code.clone(), invitation.clone());
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<Invitation>> {
        Ok(self.invitations.lock().unwrap().values().cloned().collect())
    }
}

pub struct MockLibraries {
    libraries: Mutex<Vec<RemoteLibrary>>,
}

impl MockLibraries {
    pub fn new(ids: &[&str]) -> Self {
        Self {
            libraries: Mutex::new(
                ids.iter()
                    .map(|id| RemoteLibrary::new(lid(id), format!("Library {id}")))
                    .collect(),
            ),
        }
    }
}

#[async_trait::async_trait]
impl ILibraryDirectory for MockLibraries {
    async fn list_all_ids(&self) -> anyhow::Result<Vec<LibraryId>> {
        Ok(self
            .libraries
            .lock()
            .unwrap()
            .iter()
            .map(|l| l.id.clone())
            .collect())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<RemoteLibrary>> {
        Ok(self.libraries.lock().unwrap().clone())
    }

    async fn replace_all(&self, libraries: &[RemoteLibrary]) -> anyhow::Result<()> {
        *self.libraries.lock().unwrap() = libraries.to_vec();
        Ok(())
    }
}

// ============================================================================
// Avatar service
// ============================================================================

pub struct MockAvatars {
    requests: Mutex<Vec<AvatarRequest>>,
    status: u16,
}

impl MockAvatars {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            status: 200,
        }
    }

    pub fn failing_with(status: u16) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            status,
        }
    }

    pub fn requests(&self) -> Vec<AvatarRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IAvatarService for MockAvatars {
    async fn generate(&self, request: &AvatarRequest) -> anyhow::Result<Vec<u8>> {
        self.requests.lock().unwrap().push(request.clone());
        if self.status != 200 {
            return Err(ServiceError::RemoteApi {
                status: self.status,
            }
            .into());
        }
        Ok(format!("avatar:{}", request.name).into_bytes())
    }
}
