// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Read-only GitHub queries for weekly contribution activity.
///
/// Three independent calls are exposed: the calendar total for the window,
/// the per-repository breakdown of commits, pull requests and issues, and a
/// commit search for the most recent public commits. Each call returns its own
/// [`Result`]; nothing is cached or retried.
use octocrab::Octocrab;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use time::{
    Duration, OffsetDateTime, format_description::well_known::Rfc3339,
    macros::format_description
};
use tracing::debug;

use crate::{
    aggregate::{RepositoryBreakdown, RepositoryCount, RepositoryRef},
    error::Error
};

/// Upper bound of repositories requested per contribution category.
pub const MAX_REPOSITORIES: u32 = 100;

const WEEKLY_TOTAL_QUERY: &str = r"
query($username: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $username) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
      }
    }
  }
}";

const BY_REPOSITORY_QUERY: &str = r"
query($username: String!, $from: DateTime!, $to: DateTime!, $max: Int!) {
  user(login: $username) {
    contributionsCollection(from: $from, to: $to) {
      commitContributionsByRepository(maxRepositories: $max) {
        repository { nameWithOwner url isPrivate }
        contributions { totalCount }
      }
      pullRequestContributionsByRepository(maxRepositories: $max) {
        repository { nameWithOwner url isPrivate }
        contributions { totalCount }
      }
      issueContributionsByRepository(maxRepositories: $max) {
        repository { nameWithOwner url isPrivate }
        contributions { totalCount }
      }
    }
  }
}";

/// Trailing seven-day period used to scope every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Inclusive start of the window.
    pub from: OffsetDateTime,
    /// End of the window, the invocation time.
    pub to:   OffsetDateTime
}

impl Window {
    /// Window covering exactly the seven days that end at `now`.
    pub fn trailing_week(now: OffsetDateTime) -> Self {
        Self {
            from: now - Duration::days(7),
            to:   now
        }
    }

    fn rfc3339(value: OffsetDateTime) -> Result<String, Error> {
        value
            .format(&Rfc3339)
            .map_err(|e| Error::validation(format!("failed to format window bound: {e}")))
    }

    /// Start date in `YYYY-MM-DD` form, as expected by search qualifiers.
    pub fn start_date(&self) -> Result<String, Error> {
        self.from
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(|e| Error::validation(format!("failed to format window start: {e}")))
    }
}

/// Single commit reduced to what the README shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// `owner/repo` of the repository that received the commit.
    pub repository: String,
    /// First line of the commit message.
    pub message:    String,
    /// Web URL of the commit.
    pub url:        String,
    /// Committer timestamp as reported by GitHub.
    pub timestamp:  Option<String>
}

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    data:   Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String
}

impl<T> GraphQlResponse<T> {
    /// Returns the payload, or the first reported error.
    pub(crate) fn into_data(self) -> Result<T, Error> {
        if let Some(error) = self.errors.as_ref().and_then(|errors| errors.first()) {
            return Err(Error::remote_query(error.message.clone()));
        }
        self.data
            .ok_or_else(|| Error::remote_query("response contained no data"))
    }
}

#[derive(Debug, Deserialize)]
struct UserData<C> {
    user: Option<UserNode<C>>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode<C> {
    contributions_collection: C
}

impl<C> UserData<C> {
    fn into_collection(self, username: &str) -> Result<C, Error> {
        self.user
            .map(|user| user.contributions_collection)
            .ok_or_else(|| Error::remote_query(format!("user '{username}' was not found")))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarCollection {
    contribution_calendar: Calendar
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Calendar {
    total_contributions: u32
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BreakdownCollection {
    #[serde(default)]
    commit_contributions_by_repository:       Vec<ContributionsByRepository>,
    #[serde(default)]
    pull_request_contributions_by_repository: Vec<ContributionsByRepository>,
    #[serde(default)]
    issue_contributions_by_repository:        Vec<ContributionsByRepository>
}

#[derive(Debug, Deserialize)]
struct ContributionsByRepository {
    repository:    RepositoryRef,
    contributions: ContributionCount
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionCount {
    total_count: u32
}

impl From<ContributionsByRepository> for RepositoryCount {
    fn from(entry: ContributionsByRepository) -> Self {
        Self {
            repository: entry.repository,
            count:      entry.contributions.total_count
        }
    }
}

impl From<BreakdownCollection> for RepositoryBreakdown {
    fn from(collection: BreakdownCollection) -> Self {
        let convert = |entries: Vec<ContributionsByRepository>| {
            entries.into_iter().map(RepositoryCount::from).collect()
        };
        Self {
            commits:       convert(collection.commit_contributions_by_repository),
            pull_requests: convert(collection.pull_request_contributions_by_repository),
            issues:        convert(collection.issue_contributions_by_repository)
        }
    }
}

#[derive(Debug, Serialize)]
struct CommitSearchParams<'a> {
    q:        String,
    sort:     &'a str,
    order:    &'a str,
    per_page: u8
}

#[derive(Debug, Deserialize)]
struct CommitSearchResponse {
    #[serde(default)]
    items: Vec<CommitSearchItem>
}

#[derive(Debug, Deserialize)]
struct CommitSearchItem {
    html_url:   String,
    repository: SearchRepository,
    commit:     SearchCommit
}

#[derive(Debug, Deserialize)]
struct SearchRepository {
    full_name: String
}

#[derive(Debug, Deserialize)]
struct SearchCommit {
    message:   String,
    #[serde(default)]
    committer: Option<SearchCommitter>
}

#[derive(Debug, Deserialize)]
struct SearchCommitter {
    #[serde(default)]
    date: Option<String>
}

impl From<CommitSearchItem> for CommitRecord {
    fn from(item: CommitSearchItem) -> Self {
        Self {
            repository: item.repository.full_name,
            message:    first_line(&item.commit.message).to_owned(),
            url:        item.html_url,
            timestamp:  item.commit.committer.and_then(|committer| committer.date)
        }
    }
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

/// Builds the search query for public commits authored inside the window.
pub fn commit_search_query(username: &str, window: &Window) -> Result<String, Error> {
    Ok(format!(
        "author:{username} committer-date:>={} is:public",
        window.start_date()?
    ))
}

/// Authenticated client bound to one user and one window.
#[derive(Clone)]
pub struct ContributionClient {
    octocrab: Octocrab,
    username: String,
    window:   Window
}

impl ContributionClient {
    /// Creates a client authenticated with a personal access token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RemoteQuery`] when the HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use time::OffsetDateTime;
    /// use zoorofile::{ContributionClient, Window};
    ///
    /// # async fn example() -> Result<(), zoorofile::Error> {
    /// let window = Window::trailing_week(OffsetDateTime::now_utc());
    /// let client = ContributionClient::new("ghp_token", "octocat", window)?;
    /// let total = client.fetch_weekly_total().await?;
    /// println!("{total} contributions this week");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(token: &str, username: impl Into<String>, window: Window) -> Result<Self, Error> {
        let octocrab = Octocrab::builder()
            .personal_token(token)
            .build()
            .map_err(|e| Error::remote_query(format!("failed to initialize GitHub client: {e}")))?;

        Ok(Self {
            octocrab,
            username: username.into(),
            window
        })
    }

    /// Login whose activity is queried.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Window every query is scoped to.
    pub fn window(&self) -> &Window {
        &self.window
    }

    async fn graphql<C>(&self, query: &str, max: Option<u32>) -> Result<C, Error>
    where
        C: DeserializeOwned
    {
        let mut variables = json!({
            "username": self.username,
            "from": Window::rfc3339(self.window.from)?,
            "to": Window::rfc3339(self.window.to)?
        });
        if let Some(max) = max {
            variables["max"] = json!(max);
        }

        let response: GraphQlResponse<UserData<C>> = self
            .octocrab
            .graphql(&json!({ "query": query, "variables": variables }))
            .await?;

        response.into_data()?.into_collection(&self.username)
    }

    /// Total contributions in the window according to the contribution
    /// calendar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RemoteQuery`] when GitHub reports errors or the
    /// request fails.
    pub async fn fetch_weekly_total(&self) -> Result<u32, Error> {
        debug!("Fetching weekly contribution total for {}", self.username);
        let collection: CalendarCollection = self.graphql(WEEKLY_TOTAL_QUERY, None).await?;
        Ok(collection.contribution_calendar.total_contributions)
    }

    /// Per-repository commit, pull-request and issue counts in the window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RemoteQuery`] when GitHub reports errors or the
    /// request fails.
    pub async fn fetch_weekly_by_repository(&self) -> Result<RepositoryBreakdown, Error> {
        debug!("Fetching per-repository contributions for {}", self.username);
        let collection: BreakdownCollection =
            self.graphql(BY_REPOSITORY_QUERY, Some(MAX_REPOSITORIES)).await?;
        Ok(collection.into())
    }

    /// Most recent public commits authored in the window, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RemoteQuery`] when the search request fails.
    pub async fn fetch_recent_commits(&self, limit: u8) -> Result<Vec<CommitRecord>, Error> {
        let params = CommitSearchParams {
            q:        commit_search_query(&self.username, &self.window)?,
            sort:     "committer-date",
            order:    "desc",
            per_page: limit
        };
        debug!("Searching commits with query '{}'", params.q);

        let response: CommitSearchResponse =
            self.octocrab.get("/search/commits", Some(&params)).await?;

        Ok(response
            .items
            .into_iter()
            .take(usize::from(limit))
            .map(CommitRecord::from)
            .collect())
    }
}
