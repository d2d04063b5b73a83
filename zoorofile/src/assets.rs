// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Pet image lookup.
///
/// Images live under `assets/` in the project root and are named
/// `{animal}_{mood}.png`. The README references them by relative path, so a
/// run must not write a document pointing at an image that does not exist.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::Error, mood::Mood};

/// Directory, relative to the project root, that holds pet images.
pub const ASSETS_DIR: &str = "assets";

/// Resolved pet image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetImage {
    /// Path used in the README, relative to the project root.
    pub relative_path: String,
    /// Location of the image on disk.
    pub location:      PathBuf
}

/// Returns the README-relative path of the image for `animal` and `mood`.
///
/// # Example
///
/// ```
/// use zoorofile::{Mood, pet_image_path};
///
/// assert_eq!(pet_image_path("raccoon", Mood::Happy), "assets/raccoon_happy.png");
/// ```
pub fn pet_image_path(animal: &str, mood: Mood) -> String {
    format!("{ASSETS_DIR}/{animal}_{}.png", mood.key())
}

/// Locates the image for `animal` and `mood` below `root`.
///
/// # Errors
///
/// Returns [`Error::MissingAsset`] when the image is absent or is not a
/// regular file.
pub fn resolve_pet_image(root: &Path, animal: &str, mood: Mood) -> Result<PetImage, Error> {
    let relative_path = pet_image_path(animal, mood);
    let location = root.join(&relative_path);

    if !location.is_file() {
        return Err(Error::MissingAsset {
            path: location
        });
    }

    debug!("Using pet image {}", location.display());
    Ok(PetImage {
        relative_path,
        location
    })
}

/// Lists the images missing for `animal` across every mood.
pub fn missing_pet_images(root: &Path, animal: &str) -> Vec<PathBuf> {
    Mood::ALL
        .into_iter()
        .map(|mood| root.join(pet_image_path(animal, mood)))
        .filter(|location| !location.is_file())
        .collect()
}
