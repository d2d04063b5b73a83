//! Renders a GitHub profile pet whose mood follows weekly contribution
//! activity.
//!
//! The library is a linear pipeline: the [`ContributionClient`] fetches the
//! trailing week's activity, [`aggregate`] merges the per-repository counts,
//! [`MoodBands`] maps the weekly total to a [`Mood`], [`render_document`]
//! produces the Markdown block and [`update_readme`] splices it between the
//! Zoorofile markers of README.md.

mod aggregate;
mod assets;
mod config;
mod error;
mod github;
mod locale;
mod mood;
mod pipeline;
mod readme;
mod render;

pub use aggregate::{
    Aggregation, ContributionSummary, RepoContribution, RepositoryBreakdown, RepositoryCount,
    RepositoryRef, Visibility, aggregate
};
pub use assets::{ASSETS_DIR, PetImage, missing_pet_images, pet_image_path, resolve_pet_image};
pub use config::{Config, Features, Settings, load_config, parse_config};
pub use error::{Error, io_error, readme_io_error};
pub use github::{CommitRecord, ContributionClient, MAX_REPOSITORIES, Window, commit_search_query};
pub use locale::{Locale, Text};
pub use mood::{Mood, MoodBand, MoodBandEntry, MoodBands};
pub use pipeline::{Activity, RECENT_COMMIT_LIMIT, Snapshot, build_document};
pub use readme::{patch, read_readme, update_readme};
pub use render::{
    END_MARKER, RenderInput, START_MARKER, headline, render_document, render_weekly_section,
    short_repo_name, truncate_message
};
