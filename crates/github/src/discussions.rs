//! GraphQL discussions collector.
//!
//! Discussions are fetched and handed through as-is — they are never scored
//! or cached by the search engine. The REST API has no discussions surface,
//! hence the one GraphQL query in the codebase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GitHubClient, GitHubError};

const DISCUSSIONS_QUERY: &str = r#"
query($owner: String!, $name: String!, $first: Int!) {
  repository(owner: $owner, name: $name) {
    discussions(first: $first, orderBy: {field: UPDATED_AT, direction: DESC}) {
      nodes {
        id
        number
        title
        body
        url
        createdAt
        author { login }
      }
    }
  }
}
"#;

/// A discussion thread, passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: String,
    pub number: i64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "author_login")]
    pub author: Option<String>,
}

fn author_login<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Actor {
        login: String,
    }
    let actor: Option<Actor> = Option::deserialize(deserializer)?;
    Ok(actor.map(|a| a.login))
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<DiscussionsData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct DiscussionsData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    discussions: DiscussionConnection,
}

#[derive(Debug, Deserialize)]
struct DiscussionConnection {
    #[serde(default)]
    nodes: Vec<Discussion>,
}

impl GitHubClient {
    /// Collect up to `first` discussion threads for a repository.
    pub async fn list_discussions(
        &self,
        owner: &str,
        name: &str,
        first: u32,
    ) -> Result<Vec<Discussion>, GitHubError> {
        let url = format!("{}/graphql", self.base_url());
        let request = GraphQlRequest {
            query: DISCUSSIONS_QUERY,
            variables: serde_json::json!({
                "owner": owner,
                "name": name,
                "first": first,
            }),
        };

        let response = self.post_graphql(&url, &request).await?;
        let body: GraphQlResponse = response.json().await?;

        if let Some(err) = body.errors.first() {
            return Err(GitHubError::GraphQl(err.message.clone()));
        }

        Ok(body
            .data
            .and_then(|d| d.repository)
            .map(|r| r.discussions.nodes)
            .unwrap_or_default())
    }
}
