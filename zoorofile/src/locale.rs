// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Locale-keyed string table used by the renderer.
//!
//! Every user-facing heading and label is looked up by `(Locale, Text)` so the
//! rendering code never branches on the language itself.

use serde::{Deserialize, Serialize};

/// Languages supported by the rendered README section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Korean, used when no language is configured.
    #[default]
    Ko,
    /// English.
    En
}

/// Identifiers of the static strings used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Text {
    WeeklyTitle,
    SummaryTitle,
    ReposColumn,
    ContributionsColumn,
    PublicRepos,
    PrivateRepos,
    RepoCountSuffix,
    PublicDetailTitle,
    RecentCommitsTitle,
    NoContributionsYet,
    ImageAlt,
    Footer
}

impl Locale {
    /// Returns the string registered for `text` in this locale.
    pub fn text(self, text: Text) -> &'static str {
        match (self, text) {
            (Self::Ko, Text::WeeklyTitle) => "📅 이번 주 기여",
            (Self::En, Text::WeeklyTitle) => "📅 This Week's Contributions",
            (Self::Ko, Text::SummaryTitle) => "요약",
            (Self::En, Text::SummaryTitle) => "Summary",
            (Self::Ko, Text::ReposColumn) => "레포 수",
            (Self::En, Text::ReposColumn) => "Repos",
            (Self::Ko, Text::ContributionsColumn) => "기여 수",
            (Self::En, Text::ContributionsColumn) => "Contributions",
            (Self::Ko, Text::PublicRepos) => "Public 레포",
            (Self::En, Text::PublicRepos) => "Public repos",
            (Self::Ko, Text::PrivateRepos) => "Private 레포",
            (Self::En, Text::PrivateRepos) => "Private repos",
            (Self::Ko, Text::RepoCountSuffix) => "개",
            (Self::En, Text::RepoCountSuffix) => "",
            (Self::Ko, Text::PublicDetailTitle) => "🔓 Public 기여 상세",
            (Self::En, Text::PublicDetailTitle) => "🔓 Public Contributions",
            (Self::Ko, Text::RecentCommitsTitle) => "💬 최근 커밋",
            (Self::En, Text::RecentCommitsTitle) => "💬 Recent Commits",
            (Self::Ko, Text::NoContributionsYet) => "이번 주는 아직 기여가 없어요",
            (Self::En, Text::NoContributionsYet) => "No contributions yet this week",
            (_, Text::ImageAlt) => "My Zoorofile Pet",
            (_, Text::Footer) => {
                "*🐾 Generated by [Zoorofile](https://github.com/YangHyeonBin/zoorofile) — Choose your git pet!*"
            }
        }
    }

    /// Formats the weekly headline sentence for non-zero activity.
    pub fn weekly_headline(self, contributions: u32, repositories: usize) -> String {
        match self {
            Self::Ko => {
                format!("이번 주 {repositories}개의 레포지토리에 {contributions}개의 기여를 하고 있어요")
            }
            Self::En => {
                format!("{contributions} contributions to {repositories} repositories this week")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TEXTS: [Text; 12] = [
        Text::WeeklyTitle,
        Text::SummaryTitle,
        Text::ReposColumn,
        Text::ContributionsColumn,
        Text::PublicRepos,
        Text::PrivateRepos,
        Text::RepoCountSuffix,
        Text::PublicDetailTitle,
        Text::RecentCommitsTitle,
        Text::NoContributionsYet,
        Text::ImageAlt,
        Text::Footer
    ];

    #[test]
    fn default_locale_is_korean() {
        assert_eq!(Locale::default(), Locale::Ko);
    }

    #[test]
    fn locale_deserializes_from_lowercase_code() {
        let locale: Locale = serde_json::from_str("\"en\"").expect("valid locale");
        assert_eq!(locale, Locale::En);
        assert!(serde_json::from_str::<Locale>("\"fr\"").is_err());
    }

    #[test]
    fn english_table_has_expected_labels() {
        assert_eq!(Locale::En.text(Text::PublicRepos), "Public repos");
        assert_eq!(Locale::En.text(Text::RecentCommitsTitle), "💬 Recent Commits");
        assert_eq!(Locale::En.text(Text::RepoCountSuffix), "");
    }

    #[test]
    fn korean_table_has_expected_labels() {
        assert_eq!(Locale::Ko.text(Text::SummaryTitle), "요약");
        assert_eq!(Locale::Ko.text(Text::RepoCountSuffix), "개");
    }

    #[test]
    fn only_shared_and_suffix_entries_may_be_equal_across_locales() {
        for text in ALL_TEXTS {
            let ko = Locale::Ko.text(text);
            let en = Locale::En.text(text);
            if matches!(text, Text::ImageAlt | Text::Footer) {
                assert_eq!(ko, en);
            } else {
                assert_ne!(ko, en, "{text:?} is not translated");
            }
        }
    }

    #[test]
    fn weekly_headline_formats_counts() {
        assert_eq!(
            Locale::En.weekly_headline(16, 4),
            "16 contributions to 4 repositories this week"
        );
        assert_eq!(
            Locale::Ko.weekly_headline(16, 4),
            "이번 주 4개의 레포지토리에 16개의 기여를 하고 있어요"
        );
    }
}
