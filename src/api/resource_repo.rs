// src/api/resource_repo.rs

use std::marker::PhantomData;

use reqwest::Method;
use serde::Serialize;

use crate::{common::error::AppError, models::Resource, session::AuthContext};

use super::ApiClient;

// Repositório genérico: as quatro operações REST de uma coleção.
#[derive(Debug, Clone)]
pub struct ResourceRepository<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceRepository<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    // GET {PATH}
    pub async fn list(&self, auth: &AuthContext) -> Result<Vec<R>, AppError> {
        self.api.get_list(R::PATH, auth, &[]).await
    }

    // GET {PATH}?search=termo (busca feita pelo servidor)
    pub async fn search(&self, auth: &AuthContext, term: &str) -> Result<Vec<R>, AppError> {
        let term = term.trim();
        if term.is_empty() {
            return self.list(auth).await;
        }
        self.api.get_list(R::PATH, auth, &[("search", term)]).await
    }

    // POST {PATH}
    // O corpo de resposta é opcional: um 2xx sem JSON legível ainda é sucesso.
    pub async fn create(&self, auth: &AuthContext, form: &R::Form) -> Result<Option<R>, AppError> {
        let raw = self.api.send(Method::POST, R::PATH, auth, form).await?;
        Ok(serde_json::from_slice(&raw).ok())
    }

    // POST {PATH} com corpo livre; aqui o item criado precisa vir na resposta.
    pub async fn create_returning<B: Serialize + ?Sized>(
        &self,
        auth: &AuthContext,
        body: &B,
    ) -> Result<R, AppError> {
        self.api.send_json(Method::POST, R::PATH, auth, body).await
    }

    // PATCH {PATH}{id}/
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: i64,
        form: &R::Form,
    ) -> Result<Option<R>, AppError> {
        let raw = self
            .api
            .send(Method::PATCH, &R::item_path(id), auth, form)
            .await?;
        Ok(serde_json::from_slice(&raw).ok())
    }

    // DELETE {PATH}{id}/
    pub async fn delete(&self, auth: &AuthContext, id: i64) -> Result<(), AppError> {
        if !R::DELETABLE {
            return Err(AppError::DeleteNotAllowed);
        }
        self.api.delete(&R::item_path(id), auth).await
    }
}
