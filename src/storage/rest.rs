// src/storage/rest.rs
//
// Cliente da API REST de object storage (bucket "processos").

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::{
    common::error::AppError,
    models::case::UploadFile,
    storage::{BlobEntry, BlobStore},
};

#[derive(Clone)]
pub struct RestBlobStore {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

#[derive(Debug, Deserialize)]
struct SignedUrlBody {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

impl RestBlobStore {
    pub fn new(base_url: &str, bucket: &str, service_key: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            service_key: service_key.to_string(),
        })
    }

    fn auth_headers(&self) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.service_key))
            .map_err(|e| anyhow::anyhow!("Chave do storage inválida: {}", e))?;
        headers.insert(AUTHORIZATION, bearer);
        let apikey = HeaderValue::from_str(&self.service_key)
            .map_err(|e| anyhow::anyhow!("Chave do storage inválida: {}", e))?;
        headers.insert("apikey", apikey);
        Ok(headers)
    }

    fn object_url(&self, action: &str, path: &str) -> String {
        if action.is_empty() {
            format!("{}/object/{}/{}", self.base_url, self.bucket, path)
        } else {
            format!("{}/object/{}/{}/{}", self.base_url, action, self.bucket, path)
        }
    }

    /// A API devolve o link relativo à raiz do storage.
    fn absolute(&self, signed: &str) -> String {
        if signed.starts_with("http://") || signed.starts_with("https://") {
            signed.to_string()
        } else {
            format!("{}/{}", self.base_url, signed.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl BlobStore for RestBlobStore {
    async fn upload(&self, path: &str, file: &UploadFile, overwrite: bool) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.object_url("", path))
            .headers(self.auth_headers()?)
            .header(CONTENT_TYPE, file.content_type.as_str())
            .header("x-upsert", if overwrite { "true" } else { "false" })
            .body(file.bytes.clone())
            .send()
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UploadFailed(format!("{status}: {body}")));
        }

        tracing::debug!(path, bytes = file.size(), "Arquivo enviado ao storage");
        Ok(())
    }

    async fn list(&self, prefix: &str, limit: usize) -> Result<Vec<BlobEntry>, AppError> {
        let url = format!("{}/object/list/{}", self.base_url, self.bucket);
        let response = self
            .http
            .post(url)
            .headers(self.auth_headers()?)
            .json(&json!({ "prefix": prefix, "limit": limit, "offset": 0 }))
            .send()
            .await
            .map_err(|e| AppError::LookupFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::LookupFailed(format!(
                "listagem de '{prefix}' falhou com {}",
                response.status()
            )));
        }

        response
            .json::<Vec<BlobEntry>>()
            .await
            .map_err(|e| AppError::LookupFailed(e.to_string()))
    }

    async fn create_signed_url(&self, path: &str, ttl_secs: u64) -> Result<String, AppError> {
        let response = self
            .http
            .post(self.object_url("sign", path))
            .headers(self.auth_headers()?)
            .json(&json!({ "expiresIn": ttl_secs }))
            .send()
            .await
            .map_err(|e| AppError::LookupFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::LookupFailed(format!(
                "assinatura de '{path}' falhou com {}",
                response.status()
            )));
        }

        let body: SignedUrlBody = response
            .json()
            .await
            .map_err(|e| AppError::LookupFailed(e.to_string()))?;
        Ok(self.absolute(&body.signed_url))
    }
}
