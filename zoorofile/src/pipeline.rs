// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// End-to-end assembly of the managed README block.
///
/// The three remote fetches run concurrently and each keeps its own
/// [`Result`]. A failed fetch is logged and only removes the parts of the
/// output that depend on it; a missing pet image aborts the run before
/// anything is written.
use std::{path::Path, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::{
    aggregate::{Aggregation, RepositoryBreakdown, aggregate},
    assets::resolve_pet_image,
    config::Settings,
    error::Error,
    github::{CommitRecord, ContributionClient},
    render::{RenderInput, render_document}
};

/// Number of recent commits requested from the search API.
pub const RECENT_COMMIT_LIMIT: u8 = 5;

const SPINNER_TICK: Duration = Duration::from_millis(120);

/// Raw outcome of the three independent fetches.
#[derive(Debug)]
pub struct Activity {
    pub weekly_total:   Result<u32, Error>,
    pub breakdown:      Result<RepositoryBreakdown, Error>,
    pub recent_commits: Result<Vec<CommitRecord>, Error>
}

/// Data available for rendering after failed fetches were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Weekly total, zero when the total could not be fetched.
    pub weekly_total:   u32,
    pub aggregation:    Option<Aggregation>,
    pub recent_commits: Option<Vec<CommitRecord>>
}

impl Activity {
    /// Runs the three fetches concurrently.
    ///
    /// The fetches only log at debug level; results are reported by
    /// [`Activity::into_snapshot`] once the spinner is cleared.
    pub async fn collect(client: &ContributionClient) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.yellow} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
        );
        spinner.set_message(format!("Fetching activity for {}...", client.username()));
        spinner.enable_steady_tick(SPINNER_TICK);

        let (weekly_total, breakdown, recent_commits) = tokio::join!(
            client.fetch_weekly_total(),
            client.fetch_weekly_by_repository(),
            client.fetch_recent_commits(RECENT_COMMIT_LIMIT)
        );

        spinner.finish_and_clear();

        Self {
            weekly_total,
            breakdown,
            recent_commits
        }
    }

    /// Logs every failure and keeps what succeeded.
    pub fn into_snapshot(self) -> Snapshot {
        let weekly_total = match self.weekly_total {
            Ok(total) => {
                info!("Weekly contributions: {total}");
                total
            }
            Err(error) => {
                warn!("Weekly contribution total unavailable: {error}");
                0
            }
        };

        let aggregation = match self.breakdown {
            Ok(breakdown) => {
                let aggregation = aggregate(
                    &breakdown.commits,
                    &breakdown.pull_requests,
                    &breakdown.issues
                );
                let summary = &aggregation.summary;
                info!(
                    "Repository contributions: public {} ({}), private {} ({})",
                    summary.public_repo_count,
                    summary.public_contributions,
                    summary.private_repo_count,
                    summary.private_contributions
                );
                Some(aggregation)
            }
            Err(error) => {
                warn!("Per-repository contributions unavailable: {error}");
                None
            }
        };

        let recent_commits = match self.recent_commits {
            Ok(commits) => {
                info!("Found {} recent public commits", commits.len());
                Some(commits)
            }
            Err(error) => {
                warn!("Recent commits unavailable: {error}");
                None
            }
        };

        Snapshot {
            weekly_total,
            aggregation,
            recent_commits
        }
    }
}

/// Builds the managed block for `snapshot`.
///
/// # Errors
///
/// Returns [`Error::MissingAsset`] when no image exists for the configured
/// animal and the resolved mood.
pub fn build_document(
    settings: &Settings,
    snapshot: &Snapshot,
    root: &Path,
    generated_at: OffsetDateTime
) -> Result<String, Error> {
    let mood = settings.mood_bands.mood_of(snapshot.weekly_total);
    let mood_label = mood.label(settings.locale);
    info!("Mood: {} -> {}", mood, mood_label);

    let image = resolve_pet_image(root, &settings.animal, mood)?;
    info!("Pet image: {}", image.relative_path);

    render_document(&RenderInput {
        locale: settings.locale,
        image_path: &image.relative_path,
        mood_label,
        aggregation: snapshot.aggregation.as_ref(),
        recent_commits: snapshot.recent_commits.as_deref(),
        weekly_section: settings.features.weekly_contributions,
        generated_at
    })
}
