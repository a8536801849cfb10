//! HTTP implementation of the document store against the CRM REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;

use leadvault_core::config::api::ApiConfig;
use leadvault_core::error::{AppError, ErrorKind};
use leadvault_core::result::AppResult;
use leadvault_core::traits::store::{
    CreateFolderRequest, DocumentSnapshot, DocumentStore, FileDto, FolderDto, MoveFileRequest,
    UploadRequest,
};
use leadvault_core::types::{FileId, FolderId, RecordId};

/// Document store backed by the CRM document API.
///
/// Non-success responses and transport failures both surface as
/// [`ErrorKind::Sync`]; model-level errors never originate here.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    /// Shared HTTP client.
    client: reqwest::Client,
    /// API base URL without a trailing slash.
    base_url: String,
    /// Optional bearer token attached to every request.
    bearer_token: Option<String>,
}

impl HttpDocumentStore {
    /// Create a store from API configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::sync(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        context: &str,
    ) -> AppResult<reqwest::Response> {
        let response = builder.send().await.map_err(|e| {
            AppError::with_source(ErrorKind::Sync, format!("{context}: transport error: {e}"), e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::sync(format!("{context}: API returned {status}")));
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        context: &str,
    ) -> AppResult<T> {
        self.send(builder, context)
            .await?
            .json::<T>()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Sync,
                    format!("{context}: malformed response body: {e}"),
                    e,
                )
            })
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn fetch_documents(&self, record_id: RecordId) -> AppResult<DocumentSnapshot> {
        let path = format!("/records/{record_id}/documents");
        self.json(self.request(Method::GET, &path), "fetch documents")
            .await
    }

    async fn create_folder(
        &self,
        record_id: RecordId,
        req: &CreateFolderRequest,
    ) -> AppResult<FolderDto> {
        let path = format!("/records/{record_id}/folders");
        self.json(self.request(Method::POST, &path).json(req), "create folder")
            .await
    }

    async fn rename_folder(&self, folder_id: FolderId, name: &str) -> AppResult<FolderDto> {
        let path = format!("/folders/{folder_id}");
        let body = serde_json::json!({ "name": name });
        self.json(self.request(Method::PATCH, &path).json(&body), "rename folder")
            .await
    }

    async fn move_folder(
        &self,
        folder_id: FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<FolderDto> {
        let path = format!("/folders/{folder_id}/move");
        let body = serde_json::json!({ "newParentId": new_parent_id });
        self.json(self.request(Method::POST, &path).json(&body), "move folder")
            .await
    }

    async fn delete_folder(&self, folder_id: FolderId) -> AppResult<()> {
        let path = format!("/folders/{folder_id}");
        self.send(self.request(Method::DELETE, &path), "delete folder")
            .await?;
        Ok(())
    }

    async fn upload_files(
        &self,
        record_id: RecordId,
        req: &UploadRequest,
    ) -> AppResult<Vec<FileDto>> {
        let path = format!("/records/{record_id}/files");
        self.json(self.request(Method::POST, &path).json(req), "upload files")
            .await
    }

    async fn delete_file(&self, file_id: FileId) -> AppResult<()> {
        let path = format!("/files/{file_id}");
        self.send(self.request(Method::DELETE, &path), "delete file")
            .await?;
        Ok(())
    }

    async fn move_file(&self, req: &MoveFileRequest) -> AppResult<FileDto> {
        self.json(self.request(Method::POST, "/files/move").json(req), "move file")
            .await
    }
}
