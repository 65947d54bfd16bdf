use crate::core::report::SetReport;
use crate::domain::ports::{ChallengeSet, RunConfig};
use crate::domain::sample::SampleData;
use crate::utils::error::Result;
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A todo item as served by the public practice API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTodo {
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudyNote {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u32,
}

/// What the practice API echoes back for a created resource.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedNote {
    pub id: u32,
}

/// Exercises for the async HTTP client. All calls go to the endpoint from
/// the run configuration, so tests point this at a local mock server.
pub struct HttpChallenges<C: RunConfig> {
    config: C,
    client: Client,
}

impl<C: RunConfig> HttpChallenges<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_endpoint().trim_end_matches('/'), path)
    }

    /// Plain typed GET: fetch one todo by id.
    pub async fn fetch_todo(&self, id: u32) -> Result<RemoteTodo> {
        let response = self
            .client
            .get(self.url(&format!("/todos/{}", id)))
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// POST with a JSON body; the practice API answers with the id it
    /// would have assigned.
    pub async fn post_note(&self, note: &StudyNote) -> Result<CreatedNote> {
        let response = self
            .client
            .post(self.url("/posts"))
            .json(note)
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Fan-out with a concurrency bound: fetch all ids, at most
    /// `concurrent_requests` in flight at a time.
    pub async fn fetch_todos_bounded(&self, ids: &[u32]) -> Result<Vec<RemoteTodo>> {
        let limit = self.config.concurrent_requests().max(1);
        let mut todos = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(limit) {
            let batch = join_all(chunk.iter().map(|&id| self.fetch_todo(id))).await;
            for result in batch {
                todos.push(result?);
            }
        }

        Ok(todos)
    }

    /// Retry with linear backoff. Purely illustrative: a fixed number of
    /// attempts, 100ms more of waiting after each failure.
    pub async fn fetch_todo_with_retry(&self, id: u32, attempts: u32) -> Result<RemoteTodo> {
        let mut last_error = None;

        for attempt in 1..=attempts.max(1) {
            match self.fetch_todo(id).await {
                Ok(todo) => return Ok(todo),
                Err(e) => {
                    tracing::warn!("Attempt {}/{} failed: {}", attempt, attempts, e);
                    last_error = Some(e);
                    if attempt < attempts {
                        tokio::time::sleep(Duration::from_millis(100 * u64::from(attempt))).await;
                    }
                }
            }
        }

        Err(last_error.expect("at least one attempt was made"))
    }
}

#[async_trait]
impl<C: RunConfig> ChallengeSet for HttpChallenges<C> {
    fn name(&self) -> &'static str {
        "http"
    }

    fn summary(&self) -> &'static str {
        "async HTTP client against the public practice API"
    }

    async fn run(&self, _data: &SampleData) -> Result<SetReport> {
        let mut report = SetReport::new(self.name());

        if self.config.offline() {
            report.push("skipped", "offline mode, no outbound requests");
            return Ok(report);
        }

        let todo = self.fetch_todo(1).await?;
        report.push("GET /todos/1", format!("'{}' (done: {})", todo.title, todo.completed));

        let created = self
            .post_note(&StudyNote {
                title: "Revision plan".to_string(),
                body: "Redo the ownership katas before Friday".to_string(),
                user_id: todo.user_id,
            })
            .await?;
        report.push("POST /posts", format!("created id {}", created.id));

        let batch = self.fetch_todos_bounded(&[1, 2, 3, 4, 5, 6]).await?;
        report.push(
            format!("bounded fan-out ({} at a time)", self.config.concurrent_requests()),
            format!("{} todos fetched", batch.len()),
        );

        let retried = self.fetch_todo_with_retry(2, 3).await?;
        report.push("GET with retry", retried.title);

        Ok(report)
    }
}
