// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Markdown rendering of the managed README block.
///
/// Every function here is pure; the only non-deterministic input is the
/// `generated_at` timestamp carried by [`RenderInput`].
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    aggregate::{Aggregation, ContributionSummary, RepoContribution},
    error::Error,
    github::CommitRecord,
    locale::{Locale, Text}
};

/// Opening marker of the managed region.
pub const START_MARKER: &str = "<!-- ZOOROFILE_START -->";
/// Closing marker of the managed region.
pub const END_MARKER: &str = "<!-- ZOOROFILE_END -->";

/// Number of public repositories listed in the detail subsection.
pub const MAX_LISTED_REPOS: usize = 5;
/// Number of commits listed in the recent commits subsection.
pub const MAX_LISTED_COMMITS: usize = 5;
/// Longest commit message rendered without truncation, in characters.
pub const MESSAGE_DISPLAY_LIMIT: usize = 50;

const ELLIPSIS: &str = "...";

/// Everything needed to render the managed block.
#[derive(Debug, Clone)]
pub struct RenderInput<'a> {
    pub locale:         Locale,
    /// README-relative path of the pet image.
    pub image_path:     &'a str,
    pub mood_label:     &'a str,
    /// Per-repository breakdown, when it could be fetched.
    pub aggregation:    Option<&'a Aggregation>,
    /// Recent commits, when they could be fetched.
    pub recent_commits: Option<&'a [CommitRecord]>,
    /// Whether the weekly contributions section is enabled.
    pub weekly_section: bool,
    pub generated_at:   OffsetDateTime
}

/// Headline sentence shown under the mood label.
///
/// Empty when the breakdown is unavailable.
pub fn headline(summary: Option<&ContributionSummary>, locale: Locale) -> String {
    match summary {
        None => String::new(),
        Some(summary) if summary.total_contributions() == 0 => {
            locale.text(Text::NoContributionsYet).to_owned()
        }
        Some(summary) => {
            locale.weekly_headline(summary.total_contributions(), summary.total_repos())
        }
    }
}

/// Truncates `message` to [`MESSAGE_DISPLAY_LIMIT`] characters, replacing the
/// tail with `...` when it is longer.
pub fn truncate_message(message: &str) -> String {
    if message.chars().count() <= MESSAGE_DISPLAY_LIMIT {
        return message.to_owned();
    }
    let keep = MESSAGE_DISPLAY_LIMIT - ELLIPSIS.len();
    let mut truncated: String = message.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Repository name without its owner.
pub fn short_repo_name(full_name: &str) -> &str {
    match full_name.rsplit_once('/') {
        Some((_, name)) if !name.is_empty() => name,
        _ => full_name
    }
}

fn repo_line(repo: &RepoContribution) -> String {
    let terms: Vec<String> = [
        (repo.commits, "commits"),
        (repo.pull_requests, "PRs"),
        (repo.issues, "issues")
    ]
    .into_iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, unit)| format!("{count} {unit}"))
    .collect();

    let url = repo.url.as_deref().unwrap_or_default();
    format!("- [{}]({url}) — {}\n", repo.name, terms.join(", "))
}

fn commit_line(commit: &CommitRecord) -> String {
    format!(
        "- `{}` [{}]({})\n",
        short_repo_name(&commit.repository),
        truncate_message(&commit.message),
        commit.url
    )
}

/// Renders the weekly contributions section.
///
/// The summary table is always present; the public repository and recent
/// commit subsections are omitted when their lists are empty.
pub fn render_weekly_section(
    aggregation: &Aggregation,
    recent_commits: &[CommitRecord],
    locale: Locale
) -> String {
    let summary = &aggregation.summary;
    let suffix = locale.text(Text::RepoCountSuffix);

    let mut section = format!("### {}\n\n", locale.text(Text::WeeklyTitle));

    section.push_str(&format!("**{}**\n\n", locale.text(Text::SummaryTitle)));
    section.push_str(&format!(
        "| | {} | {} |\n",
        locale.text(Text::ReposColumn),
        locale.text(Text::ContributionsColumn)
    ));
    section.push_str("|:---|:---:|:---:|\n");
    section.push_str(&format!(
        "| 🔓 {} | {}{suffix} | {} |\n",
        locale.text(Text::PublicRepos),
        summary.public_repo_count,
        summary.public_contributions
    ));
    section.push_str(&format!(
        "| 🔒 {} | {}{suffix} | {} |\n\n",
        locale.text(Text::PrivateRepos),
        summary.private_repo_count,
        summary.private_contributions
    ));

    if !aggregation.public_repos.is_empty() {
        section.push_str(&format!("**{}**\n\n", locale.text(Text::PublicDetailTitle)));
        for repo in aggregation.public_repos.iter().take(MAX_LISTED_REPOS) {
            section.push_str(&repo_line(repo));
        }
        section.push('\n');
    }

    if !recent_commits.is_empty() {
        section.push_str(&format!("**{}**\n\n", locale.text(Text::RecentCommitsTitle)));
        for commit in recent_commits.iter().take(MAX_LISTED_COMMITS) {
            section.push_str(&commit_line(commit));
        }
        section.push('\n');
    }

    section
}

/// Renders the complete managed block, markers included.
///
/// The block ends right after the end marker so that splicing it over an
/// existing region leaves the suffix byte-for-byte unchanged.
///
/// # Errors
///
/// Returns [`Error::Validation`] when the timestamp cannot be formatted.
pub fn render_document(input: &RenderInput<'_>) -> Result<String, Error> {
    let generated_at = input
        .generated_at
        .format(&Rfc3339)
        .map_err(|e| Error::validation(format!("failed to format timestamp: {e}")))?;
    let headline = headline(input.aggregation.map(|a| &a.summary), input.locale);

    let mut document = format!(
        "{START_MARKER}
<!-- Auto-generated by Zoorofile 🐾 | Do not edit manually -->
<!-- Last updated: {generated_at} -->

<div align=\"center\">

<img src=\"{}\" alt=\"{}\" width=\"150\" />

{}

{headline}

</div>

",
        input.image_path,
        input.locale.text(Text::ImageAlt),
        input.mood_label
    );

    if input.weekly_section
        && let Some(aggregation) = input.aggregation
    {
        document.push_str(&render_weekly_section(
            aggregation,
            input.recent_commits.unwrap_or_default(),
            input.locale
        ));
    }

    document.push_str(&format!(
        "---

<div align=\"center\">

{}

</div>
{END_MARKER}",
        input.locale.text(Text::Footer)
    ));

    Ok(document)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::aggregate::Visibility;

    fn repo(name: &str, commits: u32, pull_requests: u32, issues: u32) -> RepoContribution {
        RepoContribution {
            name: name.to_owned(),
            url: Some(format!("https://github.com/{name}")),
            visibility: Visibility::Public,
            commits,
            pull_requests,
            issues,
            total: commits + pull_requests + issues
        }
    }

    fn commit(repository: &str, message: &str) -> CommitRecord {
        CommitRecord {
            repository: repository.to_owned(),
            message:    message.to_owned(),
            url:        format!("https://github.com/{repository}/commit/abc"),
            timestamp:  None
        }
    }

    fn scenario_aggregation() -> Aggregation {
        Aggregation {
            public_repos:  vec![repo("me/a", 6, 0, 0), repo("me/b", 3, 1, 0), repo("me/c", 1, 0, 1)],
            private_repos: Vec::new(),
            summary:       ContributionSummary {
                public_repo_count:     3,
                public_contributions:  12,
                private_repo_count:    1,
                private_contributions: 4
            }
        }
    }

    #[test]
    fn summary_table_rows_in_english() {
        let section = render_weekly_section(&scenario_aggregation(), &[], Locale::En);
        assert!(section.contains("| 🔓 Public repos | 3 | 12 |\n"));
        assert!(section.contains("| 🔒 Private repos | 1 | 4 |\n"));
        assert!(section.starts_with("### 📅 This Week's Contributions\n\n**Summary**\n\n"));
    }

    #[test]
    fn summary_table_rows_in_korean_carry_count_suffix() {
        let section = render_weekly_section(&scenario_aggregation(), &[], Locale::Ko);
        assert!(section.contains("| 🔓 Public 레포 | 3개 | 12 |\n"));
        assert!(section.contains("| 🔒 Private 레포 | 1개 | 4 |\n"));
    }

    #[test]
    fn repo_lines_list_only_non_zero_terms() {
        let section = render_weekly_section(&scenario_aggregation(), &[], Locale::En);
        assert!(section.contains("- [me/a](https://github.com/me/a) — 6 commits\n"));
        assert!(section.contains("- [me/b](https://github.com/me/b) — 3 commits, 1 PRs\n"));
        assert!(section.contains("- [me/c](https://github.com/me/c) — 1 commits, 1 issues\n"));
    }

    #[test]
    fn at_most_five_repos_and_commits_are_listed() {
        let mut aggregation = scenario_aggregation();
        aggregation.public_repos = (0..7).map(|i| repo(&format!("me/r{i}"), 7 - i, 0, 0)).collect();
        let commits: Vec<CommitRecord> =
            (0..7).map(|i| commit("me/r0", &format!("commit {i}"))).collect();

        let section = render_weekly_section(&aggregation, &commits, Locale::En);
        assert!(section.contains("[me/r4]"));
        assert!(!section.contains("[me/r5]"));
        assert!(section.contains("[commit 4]"));
        assert!(!section.contains("[commit 5]"));
    }

    #[test]
    fn empty_recent_commits_omit_subsection() {
        let section = render_weekly_section(&scenario_aggregation(), &[], Locale::En);
        assert!(!section.contains("Recent Commits"));
    }

    #[test]
    fn empty_public_repos_omit_detail_subsection() {
        let mut aggregation = scenario_aggregation();
        aggregation.public_repos.clear();
        let section = render_weekly_section(&aggregation, &[], Locale::En);
        assert!(!section.contains("Public Contributions"));
        assert!(section.contains("| 🔓 Public repos |"));
    }

    #[test]
    fn commit_lines_use_short_repository_name() {
        let section = render_weekly_section(
            &scenario_aggregation(),
            &[commit("octocat/zoorofile", "feat: pets")],
            Locale::En
        );
        assert!(section.contains(
            "**💬 Recent Commits**\n\n- `zoorofile` [feat: pets](https://github.com/octocat/zoorofile/commit/abc)\n"
        ));
    }

    #[test]
    fn truncation_boundary() {
        let fifty = "a".repeat(50);
        let fifty_one = "b".repeat(51);
        assert_eq!(truncate_message(&fifty), fifty);
        assert_eq!(truncate_message(&fifty_one), format!("{}...", "b".repeat(47)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let message = "기".repeat(51);
        let truncated = truncate_message(&message);
        assert_eq!(truncated.chars().count(), 50);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn short_repo_name_falls_back_to_full_name() {
        assert_eq!(short_repo_name("owner/repo"), "repo");
        assert_eq!(short_repo_name("repo"), "repo");
        assert_eq!(short_repo_name("owner/"), "owner/");
    }

    #[test]
    fn headline_variants() {
        let summary = scenario_aggregation().summary;
        assert_eq!(headline(None, Locale::En), "");
        assert_eq!(
            headline(Some(&summary), Locale::En),
            "16 contributions to 4 repositories this week"
        );
        assert_eq!(
            headline(Some(&ContributionSummary::default()), Locale::En),
            "No contributions yet this week"
        );
    }

    fn input(aggregation: Option<&Aggregation>, weekly_section: bool) -> RenderInput<'_> {
        RenderInput {
            locale: Locale::En,
            image_path: "assets/raccoon_happy.png",
            mood_label: "😊 Feeling happy!",
            aggregation,
            recent_commits: None,
            weekly_section,
            generated_at: datetime!(2025-03-10 09:00:00 UTC)
        }
    }

    #[test]
    fn document_is_wrapped_in_markers() {
        let document = render_document(&input(None, true)).expect("rendered");
        assert!(document.starts_with(START_MARKER));
        assert!(document.ends_with(END_MARKER));
        assert!(document.contains("<!-- Last updated: 2025-03-10T09:00:00Z -->"));
        assert!(document.contains("<img src=\"assets/raccoon_happy.png\" alt=\"My Zoorofile Pet\" width=\"150\" />"));
        assert!(document.contains("😊 Feeling happy!"));
    }

    #[test]
    fn document_omits_weekly_section_without_breakdown() {
        let document = render_document(&input(None, true)).expect("rendered");
        assert!(!document.contains("This Week's Contributions"));
    }

    #[test]
    fn document_respects_disabled_weekly_section() {
        let aggregation = scenario_aggregation();
        let disabled = render_document(&input(Some(&aggregation), false)).expect("rendered");
        let enabled = render_document(&input(Some(&aggregation), true)).expect("rendered");
        assert!(!disabled.contains("This Week's Contributions"));
        assert!(enabled.contains("This Week's Contributions"));
        assert!(disabled.contains("16 contributions to 4 repositories this week"));
    }

    #[test]
    fn rendering_is_deterministic_apart_from_timestamp() {
        let aggregation = scenario_aggregation();
        let first = render_document(&input(Some(&aggregation), true)).expect("rendered");
        let mut later = input(Some(&aggregation), true);
        later.generated_at = datetime!(2025-03-11 09:00:00 UTC);
        let second = render_document(&later).expect("rendered");

        let strip = |text: &str| {
            text.lines()
                .filter(|line| !line.starts_with("<!-- Last updated:"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        assert_ne!(first, second);
        assert_eq!(strip(&first), strip(&second));
    }
}
