use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use chrono::Utc;
use directory_service::domain::user::models::DisplayName;
use directory_service::domain::user::models::EmailAddress;
use directory_service::domain::user::models::NewUser;
use directory_service::domain::user::models::Nickname;
use directory_service::domain::user::models::User;
use directory_service::domain::user::models::UserId;
use directory_service::domain::user::ports::UserRepository;
use directory_service::domain::user::service::UserService;
use directory_service::inbound::http::router::create_router;
use directory_service::user::errors::UserError;

const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
const JWT_EXPIRATION_HOURS: i64 = 6;

/// In-memory `UserRepository` so the API tests run without a database.
pub struct InMemoryUserRepository {
    inner: Mutex<Inner>,
}

struct Inner {
    users: HashMap<i64, User>,
    followers: HashSet<(i64, i64)>,
    next_id: i64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: HashMap::new(),
                followers: HashSet::new(),
                next_id: 1,
            }),
        }
    }

    pub fn follower_count(&self, user_id: &UserId) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .followers
            .iter()
            .filter(|(followed, _)| *followed == user_id.0)
            .count()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut inner = self.inner.lock().unwrap();

        if inner
            .users
            .values()
            .any(|u| u.nick.as_str() == user.nick.as_str())
        {
            return Err(UserError::NickAlreadyExists(user.nick.as_str().to_string()));
        }
        if inner
            .users
            .values()
            .any(|u| u.email.as_str() == user.email.as_str())
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let user = User {
            id: UserId(id),
            name: user.name,
            nick: user.nick,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
        };
        inner.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn search(&self, name_or_nick: &str) -> Result<Vec<User>, UserError> {
        let filter = name_or_nick.to_lowercase();
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .values()
            .filter(|u| {
                u.name.as_str().to_lowercase().contains(&filter)
                    || u.nick.as_str().to_lowercase().contains(&filter)
            })
            .cloned()
            .collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut inner = self.inner.lock().unwrap();

        if !inner.users.contains_key(&user.id.0) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if inner
            .users
            .values()
            .any(|u| u.id != user.id && u.nick.as_str() == user.nick.as_str())
        {
            return Err(UserError::NickAlreadyExists(user.nick.as_str().to_string()));
        }
        if inner
            .users
            .values()
            .any(|u| u.id != user.id && u.email.as_str() == user.email.as_str())
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        inner.users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut inner = self.inner.lock().unwrap();

        if inner.users.remove(&id.0).is_none() {
            return Err(UserError::NotFound(id.to_string()));
        }
        inner
            .followers
            .retain(|(followed, follower)| *followed != id.0 && *follower != id.0);

        Ok(())
    }

    async fn follow(&self, user_id: &UserId, follower_id: &UserId) -> Result<(), UserError> {
        let mut inner = self.inner.lock().unwrap();
        inner.followers.insert((user_id.0, follower_id.0));
        Ok(())
    }

    async fn unfollow(&self, user_id: &UserId, follower_id: &UserId) -> Result<(), UserError> {
        let mut inner = self.inner.lock().unwrap();
        inner.followers.remove(&(user_id.0, follower_id.0));
        Ok(())
    }

    async fn find_followers(&self, user_id: &UserId) -> Result<Vec<User>, UserError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .followers
            .iter()
            .filter(|(followed, _)| *followed == user_id.0)
            .filter_map(|(_, follower)| inner.users.get(follower).cloned())
            .collect())
    }
}

/// Test application that spawns the real router on a random port.
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));
        let user_service = Arc::new(UserService::new(Arc::clone(&repository)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(
            user_service,
            Arc::clone(&authenticator),
            JWT_EXPIRATION_HOURS,
        );

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Insert a user directly through the repository. Registration itself
    /// is a protected route, so tests bootstrap their first user here.
    pub async fn seed_user(&self, name: &str, nick: &str, email: &str, password: &str) -> User {
        let password_hash = self
            .authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        self.repository
            .create(NewUser {
                name: DisplayName::new(name.to_string()).unwrap(),
                nick: Nickname::new(nick.to_string()).unwrap(),
                email: EmailAddress::new(email.to_string()).unwrap(),
                password_hash,
                created_at: Utc::now(),
            })
            .await
            .expect("Failed to seed user")
    }

    /// Log in through the API and return the raw token body.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.text().await.expect("Failed to read token body")
    }

    /// Mint a token for a user without going through login.
    pub fn token_for(&self, user: &User) -> String {
        self.authenticator
            .issue_token(&Claims::for_user(user.id.0, JWT_EXPIRATION_HOURS))
            .expect("Failed to issue token")
    }

    /// Mint a correctly-signed token whose expiry is already in the past.
    pub fn expired_token_for(&self, user: &User) -> String {
        self.authenticator
            .issue_token(&Claims::for_user(user.id.0, -1))
            .expect("Failed to issue token")
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}
