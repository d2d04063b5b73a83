// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Per-repository aggregation of weekly contributions.
///
/// Folds commit, pull-request and issue counts reported per repository into a
/// single entry per repository, splits the result by visibility and derives
/// the summary counters shown in the README table.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Repository identity as reported by the contributions API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRef {
    /// `owner/repo` identifier.
    pub name_with_owner: String,
    /// Web URL of the repository.
    #[serde(default)]
    pub url:             Option<String>,
    /// Whether the repository is private.
    pub is_private:      bool
}

/// Contribution count of one category for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryCount {
    pub repository: RepositoryRef,
    pub count:      u32
}

/// The three per-category lists returned by the breakdown query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryBreakdown {
    pub commits:       Vec<RepositoryCount>,
    pub pull_requests: Vec<RepositoryCount>,
    pub issues:        Vec<RepositoryCount>
}

/// Repository visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private
}

/// Merged weekly activity of a single repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoContribution {
    /// `owner/repo` identifier, the identity key.
    pub name:          String,
    /// Web URL taken from the first entry seen for this repository.
    pub url:           Option<String>,
    /// Visibility taken from the first entry seen for this repository.
    pub visibility:    Visibility,
    pub commits:       u32,
    pub pull_requests: u32,
    pub issues:        u32,
    /// `commits + pull_requests + issues`.
    pub total:         u32
}

/// Counters shown in the summary table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSummary {
    pub public_repo_count:     usize,
    pub public_contributions:  u32,
    pub private_repo_count:    usize,
    pub private_contributions: u32
}

impl ContributionSummary {
    /// Number of repositories with any activity.
    pub fn total_repos(&self) -> usize {
        self.public_repo_count + self.private_repo_count
    }

    /// Sum of all contributions across both visibilities.
    pub fn total_contributions(&self) -> u32 {
        self.public_contributions.saturating_add(self.private_contributions)
    }
}

/// Result of [`aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    /// Public repositories sorted by total, descending.
    pub public_repos:  Vec<RepoContribution>,
    /// Private repositories sorted by total, descending.
    pub private_repos: Vec<RepoContribution>,
    pub summary:       ContributionSummary
}

#[derive(Clone, Copy)]
enum Category {
    Commits,
    PullRequests,
    Issues
}

/// Merges the three per-category lists into per-repository entries.
///
/// Lists are folded in the order commits, pull requests, issues. Entries with
/// equal totals keep the order in which their repository was first seen.
///
/// # Example
///
/// ```
/// use zoorofile::{RepositoryCount, RepositoryRef, aggregate};
///
/// let repo = RepositoryRef {
///     name_with_owner: "octocat/hello".to_owned(),
///     url:             Some("https://github.com/octocat/hello".to_owned()),
///     is_private:      false
/// };
/// let commits = vec![RepositoryCount {
///     repository: repo.clone(),
///     count:      3
/// }];
/// let prs = vec![RepositoryCount {
///     repository: repo,
///     count:      1
/// }];
///
/// let result = aggregate(&commits, &prs, &[]);
/// assert_eq!(result.public_repos[0].total, 4);
/// assert_eq!(result.summary.public_contributions, 4);
/// ```
pub fn aggregate(
    commits: &[RepositoryCount],
    pull_requests: &[RepositoryCount],
    issues: &[RepositoryCount]
) -> Aggregation {
    let capacity = commits.len() + pull_requests.len() + issues.len();
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(capacity);
    let mut merged: Vec<RepoContribution> = Vec::with_capacity(capacity);

    for (entries, category) in [
        (commits, Category::Commits),
        (pull_requests, Category::PullRequests),
        (issues, Category::Issues)
    ] {
        for entry in entries {
            let name = entry.repository.name_with_owner.as_str();
            let position = *index.entry(name).or_insert_with(|| {
                merged.push(RepoContribution {
                    name:          name.to_owned(),
                    url:           entry.repository.url.clone(),
                    visibility:    if entry.repository.is_private {
                        Visibility::Private
                    } else {
                        Visibility::Public
                    },
                    commits:       0,
                    pull_requests: 0,
                    issues:        0,
                    total:         0
                });
                merged.len() - 1
            });

            let repo = &mut merged[position];
            match category {
                Category::Commits => repo.commits = repo.commits.saturating_add(entry.count),
                Category::PullRequests => {
                    repo.pull_requests = repo.pull_requests.saturating_add(entry.count)
                }
                Category::Issues => repo.issues = repo.issues.saturating_add(entry.count)
            }
        }
    }

    let (mut public_repos, mut private_repos): (Vec<_>, Vec<_>) = merged
        .into_iter()
        .map(|mut repo| {
            repo.total = repo
                .commits
                .saturating_add(repo.pull_requests)
                .saturating_add(repo.issues);
            repo
        })
        .partition(|repo| repo.visibility == Visibility::Public);

    public_repos.sort_by(|a, b| b.total.cmp(&a.total));
    private_repos.sort_by(|a, b| b.total.cmp(&a.total));

    let summary = ContributionSummary {
        public_repo_count:     public_repos.len(),
        public_contributions:  sum_totals(&public_repos),
        private_repo_count:    private_repos.len(),
        private_contributions: sum_totals(&private_repos)
    };

    Aggregation {
        public_repos,
        private_repos,
        summary
    }
}

fn sum_totals(repos: &[RepoContribution]) -> u32 {
    repos.iter().fold(0u32, |sum, repo| sum.saturating_add(repo.total))
}
