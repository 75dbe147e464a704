// src/api/api_client.rs

use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{common::error::AppError, config::AppConfig, session::AuthContext};

// Corpo de erro do backend: `{ "detail": "..." }` (opcional)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Listagens chegam como array puro ou como envelope paginado `{ "results": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Paged {
        #[serde(default = "Vec::new")]
        results: Vec<T>,
    },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Paged { results } => results,
        }
    }
}

// Cliente HTTP fino sobre o `reqwest`, com a URL base já resolvida.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, auth: &AuthContext) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("➡️ {} {}", method, url);

        let mut req = self.http.request(method, &url);

        // Listagens toleram ausência de token; quem exige é o controller.
        if let Some(token) = auth.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    // Envia e separa sucesso (corpo bruto) de falha HTTP (status + detail).
    async fn execute(req: RequestBuilder) -> Result<Vec<u8>, AppError> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail);
            tracing::warn!("API respondeu {} (detail: {:?})", status, detail);
            return Err(AppError::Api { status, detail });
        }

        Ok(body.to_vec())
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &AuthContext,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let mut req = self.request(Method::GET, path, auth);
        if !query.is_empty() {
            req = req.query(query);
        }
        let body = Self::execute(req).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &AuthContext,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, AppError> {
        let envelope: ListEnvelope<T> = self.get_json(path, auth, query).await?;
        Ok(envelope.into_vec())
    }

    /// POST/PATCH/PUT com corpo JSON. Devolve o corpo da resposta sem interpretar.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        auth: &AuthContext,
        body: &B,
    ) -> Result<Vec<u8>, AppError> {
        let req = self.request(method, path, auth).json(body);
        Self::execute(req).await
    }

    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        auth: &AuthContext,
        body: &B,
    ) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let raw = self.send(method, path, auth, body).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    pub async fn delete(&self, path: &str, auth: &AuthContext) -> Result<(), AppError> {
        let req = self.request(Method::DELETE, path, auth);
        Self::execute(req).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn accepts_bare_array() {
        let env: ListEnvelope<Item> = serde_json::from_str(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(env.into_vec(), vec![Item { id: 1 }, Item { id: 2 }]);
    }

    #[test]
    fn accepts_results_envelope() {
        let env: ListEnvelope<Item> =
            serde_json::from_str(r#"{"count": 1, "next": null, "results": [{"id": 7}]}"#).unwrap();
        assert_eq!(env.into_vec(), vec![Item { id: 7 }]);
    }

    #[test]
    fn object_without_results_is_empty() {
        let env: ListEnvelope<Item> = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(env.into_vec().is_empty());
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        assert!(serde_json::from_str::<ListEnvelope<Item>>(r#""oops""#).is_err());
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = AppConfig {
            api_base_url: "http://localhost:8000/api/v1/".into(),
            ..AppConfig::default()
        };
        let api = ApiClient::new(&config).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000/api/v1");
    }
}
