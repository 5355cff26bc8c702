//! HTTP recipe storage
//!
//! Talks to a JSON API exposing `/recipes` and `/recipes/{id}`.

use super::StorageError;
use crate::auth::{TokenPreference, TokenSet};
use crate::http::{client_with_timeout, DEFAULT_TIMEOUT};
use crate::recipe::{NewRecipe, Recipe};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct RemoteStorage {
    base: String,
    client: Client,
    tokens: Option<TokenSet>,
}

impl RemoteStorage {
    pub fn new(base_url: &str, tokens: Option<TokenSet>) -> Result<Self, StorageError> {
        let parsed =
            Url::parse(base_url).map_err(|e| StorageError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StorageError::InvalidBaseUrl(format!(
                "{base_url}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            client: client_with_timeout(DEFAULT_TIMEOUT)?,
            tokens,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens
            .as_ref()
            .is_some_and(|t| t.is_authenticated(chrono::Utc::now().timestamp()))
    }

    pub async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        let response = self.send(self.client.get(self.collection_url())).await?;
        let recipes: Vec<Recipe> = response.json().await?;
        debug!("Fetched {} recipes from {}", recipes.len(), self.base);
        Ok(recipes)
    }

    /// A 404 means the recipe does not exist, not that the request failed
    pub async fn get(&self, id: &str) -> Result<Option<Recipe>, StorageError> {
        let response = self.authorize(self.client.get(self.item_url(id))).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;
        Ok(Some(response.json().await?))
    }

    pub async fn create(&self, draft: NewRecipe) -> Result<Recipe, StorageError> {
        let request = self.client.post(self.collection_url()).json(&draft);
        let recipe: Recipe = self.send(request).await?.json().await?;
        info!("Created remote recipe {}", recipe.id);
        Ok(recipe)
    }

    pub async fn update(&self, id: &str, draft: NewRecipe) -> Result<Recipe, StorageError> {
        let request = self.client.put(self.item_url(id)).json(&draft);
        let response = self.authorize(request).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(id.to_string()));
        }
        let recipe: Recipe = check_status(response).await?.json().await?;
        info!("Updated remote recipe {}", id);
        Ok(recipe)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.send(self.client.delete(self.item_url(id))).await?;
        info!("Deleted remote recipe {}", id);
        Ok(())
    }

    fn collection_url(&self) -> String {
        format!("{}/recipes", self.base)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/recipes/{}", self.base, urlencoding::encode(id))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let now = chrono::Utc::now().timestamp();
        match self
            .tokens
            .as_ref()
            .and_then(|t| t.bearer(TokenPreference::Id, now))
        {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StorageError> {
        let response = self.authorize(request).send().await?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("Recipe API returned {}: {}", status, body);
    Err(StorageError::Http {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session() -> TokenSet {
        TokenSet {
            access_token: "access-123".to_string(),
            id_token: Some("id-456".to_string()),
            token_type: "Bearer".to_string(),
            expires_at: chrono::Utc::now().timestamp() + 3600,
        }
    }

    #[test]
    fn test_rejects_invalid_base() {
        assert!(matches!(
            RemoteStorage::new("ftp://example.com", None),
            Err(StorageError::InvalidBaseUrl(_))
        ));
        assert!(RemoteStorage::new("https://example.com/api/", None).is_ok());
    }

    #[test]
    fn test_item_url_encodes_id() {
        let storage = RemoteStorage::new("https://example.com/api/", None).unwrap();
        assert_eq!(storage.item_url("a b/c"), "https://example.com/api/recipes/a%20b%2Fc");
        assert_eq!(storage.collection_url(), "https://example.com/api/recipes");
    }

    #[tokio::test]
    async fn test_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "1", "title": "Soup", "tags": ["dinner"]},
                {"id": "2", "title": "Cake"}
            ])))
            .mount(&server)
            .await;

        let storage = RemoteStorage::new(&server.uri(), None).unwrap();
        let recipes = storage.list().await.unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].tags, vec!["dinner"]);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/42"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let storage = RemoteStorage::new(&server.uri(), None).unwrap();
        assert!(storage.get("42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recipes"))
            .and(header("authorization", "Bearer id-456"))
            .and(body_partial_json(json!({"title": "Bread"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"id": "7", "title": "Bread"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let storage = RemoteStorage::new(&server.uri(), Some(session())).unwrap();
        assert!(storage.is_authenticated());
        let draft = NewRecipe {
            title: "Bread".to_string(),
            ..Default::default()
        };
        let created = storage.create(draft).await.unwrap();
        assert_eq!(created.id, "7");
    }

    #[tokio::test]
    async fn test_unauthorized_write() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/recipes/7"))
            .respond_with(ResponseTemplate::new(401).set_body_string("login required"))
            .mount(&server)
            .await;

        let storage = RemoteStorage::new(&server.uri(), None).unwrap();
        match storage.delete("7").await {
            Err(StorageError::Http { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "login required");
            }
            other => panic!("expected http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/recipes/9"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let storage = RemoteStorage::new(&server.uri(), Some(session())).unwrap();
        assert!(matches!(
            storage.update("9", NewRecipe::default()).await,
            Err(StorageError::NotFound(_))
        ));
    }
}
