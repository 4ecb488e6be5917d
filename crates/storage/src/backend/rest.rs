use async_trait::async_trait;
use reqwest::header::{CONTENT_RANGE, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::Backend;
use crate::error::{BackendError, BackendResult, Result, StorageError};
use crate::models::{
    Competition, NewParticipant, NewParticipantCompetition, Participant, ParticipantCompetition,
};

/// Client for a hosted PostgREST-style endpoint (`/rest/v1/<table>`)
pub struct RestBackend {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RestBackend {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("merdeka-storage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StorageError::Configuration(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> BackendResult<Vec<T>> {
        let response = self.request(Method::GET, table).query(query).send().await?;
        let rows = ensure_success(response).await?.json::<Vec<T>>().await?;

        Ok(rows)
    }
}

async fn ensure_success(response: Response) -> BackendResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Total from a `Content-Range` header such as `0-24/310` or `*/0`
fn parse_content_range_total(value: &str) -> Option<i64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

#[async_trait]
impl Backend for RestBackend {
    async fn list_competitions(&self) -> BackendResult<Vec<Competition>> {
        self.select(
            "competitions",
            &[("select", "*"), ("order", "category.asc,name.asc")],
        )
        .await
    }

    async fn list_participants(&self) -> BackendResult<Vec<Participant>> {
        self.select(
            "participants",
            &[("select", "*"), ("order", "created_at.desc")],
        )
        .await
    }

    async fn list_participant_competitions(&self) -> BackendResult<Vec<ParticipantCompetition>> {
        self.select(
            "participant_competitions",
            &[("select", "*"), ("order", "seq.asc")],
        )
        .await
    }

    async fn count_participants(&self) -> BackendResult<i64> {
        let response = self
            .request(Method::HEAD, "participants")
            .query(&[("select", "id")])
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = ensure_success(response).await?;

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value: &HeaderValue| value.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| {
                BackendError::UnexpectedResponse("missing or malformed Content-Range".to_string())
            })
    }

    async fn insert_participant(&self, participant: &NewParticipant) -> BackendResult<Participant> {
        let response = self
            .request(Method::POST, "participants")
            .header("Prefer", "return=representation")
            .json(participant)
            .send()
            .await?;

        ensure_success(response)
            .await?
            .json::<Vec<Participant>>()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                BackendError::UnexpectedResponse("insert returned no participant".to_string())
            })
    }

    async fn insert_participant_competitions(
        &self,
        rows: &[NewParticipantCompetition],
    ) -> BackendResult<()> {
        let response = self
            .request(Method::POST, "participant_competitions")
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;
        ensure_success(response).await?;

        Ok(())
    }
}
