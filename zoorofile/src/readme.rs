// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Updates the managed Zoorofile region of README.md.
///
/// The document is treated as three regions: the prefix before the start
/// marker, the managed region between the markers, and the suffix after the
/// end marker. Only the managed region is ever replaced.
use std::{fs, io::ErrorKind, path::Path};

use tracing::{debug, info};

use crate::{
    error::{Error, readme_io_error},
    render::{END_MARKER, START_MARKER}
};

/// Splices `block` over the region delimited by `start_marker` and
/// `end_marker`.
///
/// The first start marker and the first end marker after it delimit the
/// region; both markers are replaced together with the content between them,
/// so `block` must carry its own markers. When either marker is missing the
/// block is appended, separated by a blank line from non-empty content.
///
/// # Example
///
/// ```
/// use zoorofile::patch;
///
/// let text = "# Me\n<!-- S -->old<!-- E -->\nbye\n";
/// let patched = patch(text, "<!-- S -->new<!-- E -->", "<!-- S -->", "<!-- E -->");
/// assert_eq!(patched, "# Me\n<!-- S -->new<!-- E -->\nbye\n");
/// ```
pub fn patch(existing: &str, block: &str, start_marker: &str, end_marker: &str) -> String {
    if let Some(start_idx) = existing.find(start_marker) {
        let search_from = start_idx + start_marker.len();
        if let Some(offset) = existing[search_from..].find(end_marker) {
            let end_idx = search_from + offset + end_marker.len();

            let mut result =
                String::with_capacity(existing.len() - (end_idx - start_idx) + block.len());
            result.push_str(&existing[..start_idx]);
            result.push_str(block);
            result.push_str(&existing[end_idx..]);
            return result;
        }
    }

    if existing.is_empty() {
        return block.to_owned();
    }

    let mut result = String::with_capacity(existing.len() + 2 + block.len());
    result.push_str(existing);
    result.push_str("\n\n");
    result.push_str(block);
    result
}

/// Reads the README at `readme_path`, treating a missing file as empty.
///
/// # Errors
///
/// Returns [`Error::ReadmeIo`] for any failure other than a missing file.
pub fn read_readme(readme_path: &Path) -> Result<String, Error> {
    match fs::read_to_string(readme_path) {
        Ok(content) => Ok(content),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            debug!("README {} does not exist yet", readme_path.display());
            Ok(String::new())
        }
        Err(error) => Err(readme_io_error(readme_path, error))
    }
}

/// Writes `block` into the managed region of the README at `readme_path`.
///
/// Returns `true` when the file was written and `false` when the content was
/// already up to date.
///
/// # Errors
///
/// Returns [`Error::ReadmeIo`] when the file cannot be read or written.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use zoorofile::update_readme;
///
/// # fn main() -> Result<(), zoorofile::Error> {
/// let block = "<!-- ZOOROFILE_START -->\nhello\n<!-- ZOOROFILE_END -->";
/// update_readme(Path::new("README.md"), block)?;
/// # Ok(())
/// # }
/// ```
pub fn update_readme(readme_path: &Path, block: &str) -> Result<bool, Error> {
    info!("Reading README from {}", readme_path.display());
    let content = read_readme(readme_path)?;
    let updated = patch(&content, block, START_MARKER, END_MARKER);

    if updated == content {
        info!("No changes to README");
        return Ok(false);
    }

    info!("Writing updated README to {}", readme_path.display());
    fs::write(readme_path, updated).map_err(|e| readme_io_error(readme_path, e))?;
    info!("README updated successfully");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tempfile::tempdir;

    use super::*;

    fn block(body: &str) -> String {
        format!("{START_MARKER}\n{body}\n{END_MARKER}")
    }

    #[test]
    fn replaces_existing_region() {
        let existing = format!("# Hello\n\n{}\n## Footer\n", block("old"));
        let patched = patch(&existing, &block("new"), START_MARKER, END_MARKER);
        assert_eq!(patched, format!("# Hello\n\n{}\n## Footer\n", block("new")));
    }

    #[test]
    fn appends_when_markers_absent() {
        let existing = "# Existing profile";
        let patched = patch(existing, &block("pet"), START_MARKER, END_MARKER);
        assert_eq!(patched, format!("{existing}\n\n{}", block("pet")));
    }

    #[test]
    fn empty_document_becomes_block() {
        let patched = patch("", &block("pet"), START_MARKER, END_MARKER);
        assert_eq!(patched, block("pet"));
    }

    #[test]
    fn appends_when_end_marker_missing() {
        let existing = format!("intro\n{START_MARKER}\nstale");
        let patched = patch(&existing, &block("pet"), START_MARKER, END_MARKER);
        assert_eq!(patched, format!("{existing}\n\n{}", block("pet")));
    }

    #[test]
    fn end_marker_before_start_marker_is_ignored() {
        let existing = format!("{END_MARKER}\nintro\n{START_MARKER}\nold\n{END_MARKER}\ntail");
        let patched = patch(&existing, &block("new"), START_MARKER, END_MARKER);
        assert_eq!(patched, format!("{END_MARKER}\nintro\n{}\ntail", block("new")));
    }

    #[test]
    fn only_first_region_is_replaced() {
        let existing = format!("{}{}", block("one"), block("two"));
        let patched = patch(&existing, &block("new"), START_MARKER, END_MARKER);
        assert_eq!(patched, format!("{}{}", block("new"), block("two")));
    }

    #[test]
    fn update_readme_creates_missing_file() {
        let temp = tempdir().expect("failed to create tempdir");
        let readme_path = temp.path().join("README.md");

        let written = update_readme(&readme_path, &block("pet")).expect("update failed");
        assert!(written);
        let content = fs::read_to_string(&readme_path).expect("failed to read README");
        assert_eq!(content, block("pet"));
    }

    #[test]
    fn update_readme_preserves_surrounding_content() {
        let temp = tempdir().expect("failed to create tempdir");
        let readme_path = temp.path().join("README.md");
        fs::write(&readme_path, format!("# Me\n\n{}\nThanks!\n", block("old")))
            .expect("failed to write README");

        update_readme(&readme_path, &block("new")).expect("update failed");

        let content = fs::read_to_string(&readme_path).expect("failed to read README");
        assert_eq!(content, format!("# Me\n\n{}\nThanks!\n", block("new")));
    }

    #[test]
    fn update_readme_skips_identical_content() {
        let temp = tempdir().expect("failed to create tempdir");
        let readme_path = temp.path().join("README.md");
        fs::write(&readme_path, block("same")).expect("failed to write README");

        let written = update_readme(&readme_path, &block("same")).expect("update failed");
        assert!(!written);
    }

    #[test]
    fn read_readme_reports_directory() {
        let temp = tempdir().expect("failed to create tempdir");
        let error = read_readme(temp.path()).expect_err("expected io error");
        assert!(matches!(error, Error::ReadmeIo { .. }));
    }

    proptest! {
        #[test]
        fn second_patch_keeps_prefix_and_suffix(
            prefix in "[a-zA-Z0-9 #\n]{0,40}",
            suffix in "[a-zA-Z0-9 #\n]{0,40}",
            first in "[a-z ]{0,20}",
            second in "[a-z ]{0,20}"
        ) {
            let original = format!("{prefix}{}{suffix}", block("seed"));
            let once = patch(&original, &block(&first), START_MARKER, END_MARKER);
            let twice = patch(&once, &block(&second), START_MARKER, END_MARKER);
            prop_assert_eq!(twice, format!("{prefix}{}{suffix}", block(&second)));
        }
    }
}
