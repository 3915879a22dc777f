pub mod dto;
pub mod memory;
pub mod reference;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, header};
use tracing::{debug, warn};

use crate::config::RecordsConfig;
use crate::error::AppError;
use crate::models::{EntityKind, RecordId};

pub use memory::InMemoryRecordClient;
pub use reference::{RecordLinks, extract_record_id, record_url};

/// One record as the store returns it: id plus its raw field bag.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub id: RecordId,
    pub fields: serde_json::Value,
}

#[async_trait]
pub trait RecordClient: Send + Sync {
    async fn list(&self, kind: EntityKind) -> Result<Vec<RawRecord>, AppError>;
    async fn get(&self, kind: EntityKind, id: &RecordId) -> Result<RawRecord, AppError>;
    /// Returns the id the store assigned, when the response carries one.
    async fn create(
        &self,
        kind: EntityKind,
        fields: serde_json::Value,
    ) -> Result<Option<RecordId>, AppError>;
    async fn update(
        &self,
        kind: EntityKind,
        id: &RecordId,
        fields: serde_json::Value,
    ) -> Result<(), AppError>;
    async fn delete(&self, kind: EntityKind, id: &RecordId) -> Result<(), AppError>;
}

pub struct HttpRecordClient {
    client: Client,
    config: RecordsConfig,
}

impl HttpRecordClient {
    pub fn new(config: RecordsConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn records_url(&self, kind: EntityKind) -> String {
        format!(
            "{}/apps/{}/records",
            self.config.base_url,
            self.config.app_ids.get(kind)
        )
    }

    fn record_url(&self, kind: EntityKind, id: &RecordId) -> String {
        record_url(&self.config.base_url, self.config.app_ids.get(kind), id)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        match &self.config.session_cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    /// Sends the request and turns any non-2xx status into `AppError::Request`
    /// carrying the response body.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Request {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let body_text = response.text().await?;
        serde_json::from_str::<T>(&body_text).map_err(|e| {
            tracing::error!("Failed to parse record API response: {}", e);
            AppError::Decode(e)
        })
    }
}

#[async_trait]
impl RecordClient for HttpRecordClient {
    async fn list(&self, kind: EntityKind) -> Result<Vec<RawRecord>, AppError> {
        let url = self.records_url(kind);
        let response = self.send(self.request(Method::GET, &url)).await?;
        let body: dto::ListRecordsResponse = Self::read_json(response).await?;

        let mut records: Vec<RawRecord> = body
            .into_iter()
            .map(|(id, envelope)| RawRecord {
                id: RecordId::new(id),
                fields: envelope.fields,
            })
            .collect();
        // The keyed object has no order of its own.
        records.sort_by(|a, b| a.id.cmp(&b.id));

        debug!("Fetched {} {} records", records.len(), kind);
        Ok(records)
    }

    async fn get(&self, kind: EntityKind, id: &RecordId) -> Result<RawRecord, AppError> {
        let url = self.record_url(kind, id);
        let response = self.send(self.request(Method::GET, &url)).await?;
        let envelope: dto::RecordEnvelope = Self::read_json(response).await?;

        Ok(RawRecord {
            id: envelope.id.map(RecordId::new).unwrap_or_else(|| id.clone()),
            fields: envelope.fields,
        })
    }

    async fn create(
        &self,
        kind: EntityKind,
        fields: serde_json::Value,
    ) -> Result<Option<RecordId>, AppError> {
        let url = self.records_url(kind);
        let request_body = dto::FieldsRequest { fields: &fields };
        let response = self
            .send(self.request(Method::POST, &url).json(&request_body))
            .await?;

        let body_text = response.text().await.unwrap_or_default();
        let created = serde_json::from_str::<dto::CreateRecordResponse>(&body_text)
            .unwrap_or_else(|e| {
                warn!("Create response for {} is not a record: {}", kind, e);
                dto::CreateRecordResponse::default()
            });

        Ok(created.assigned_id().map(RecordId::new))
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &RecordId,
        fields: serde_json::Value,
    ) -> Result<(), AppError> {
        let url = self.record_url(kind, id);
        let request_body = dto::FieldsRequest { fields: &fields };
        self.send(self.request(Method::PATCH, &url).json(&request_body))
            .await?;
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: &RecordId) -> Result<(), AppError> {
        let url = self.record_url(kind, id);
        self.send(self.request(Method::DELETE, &url)).await?;
        Ok(())
    }
}
