// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Mapping from weekly contribution volume to the pet's mood.
//!
//! Moods are ordered by intensity. [`MoodBands`] holds threshold bands that
//! are evaluated from the highest minimum down; the first band whose minimum
//! does not exceed the weekly total wins. A band starting at zero is always
//! present, which makes [`MoodBands::mood_of`] total.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::Error, locale::Locale};

/// Discrete mood categories, declared from least to most active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Sleeping,
    Calm,
    Happy,
    Excited
}

impl Mood {
    /// Every mood in increasing intensity.
    pub const ALL: [Mood; 4] = [Mood::Sleeping, Mood::Calm, Mood::Happy, Mood::Excited];

    /// Stable key used in asset file names (`{animal}_{key}.png`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Sleeping => "sleeping",
            Self::Calm => "calm",
            Self::Happy => "happy",
            Self::Excited => "excited"
        }
    }

    /// Human-readable label shown under the pet image.
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Sleeping, Locale::Ko) => "😴 쿨쿨 자는 중...",
            (Self::Sleeping, Locale::En) => "😴 Sleeping...",
            (Self::Calm, Locale::Ko) => "🙂 느긋하게 쉬는 중",
            (Self::Calm, Locale::En) => "🙂 Taking it easy",
            (Self::Happy, Locale::Ko) => "😊 기분 좋은 하루!",
            (Self::Happy, Locale::En) => "😊 Feeling happy!",
            (Self::Excited, Locale::Ko) => "🔥 신나서 뛰어다니는 중!",
            (Self::Excited, Locale::En) => "🔥 Super excited!"
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Mood {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mood| mood.key() == normalized)
            .ok_or_else(|| Error::UnknownMood {
                name: value.to_owned()
            })
    }
}

/// Single threshold band: totals at or above `min` map to `mood`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodBand {
    /// Inclusive lower bound of the band.
    pub min:  u32,
    /// Mood assigned to totals inside the band.
    pub mood: Mood
}

/// Raw band entry as written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodBandEntry {
    /// Inclusive lower bound of the band.
    pub min:  u32,
    /// Mood name, parsed with [`Mood::from_str`].
    pub mood: String
}

/// Validated, top-down ordered list of threshold bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodBands {
    bands: Vec<MoodBand>
}

impl Default for MoodBands {
    fn default() -> Self {
        Self {
            bands: vec![
                MoodBand {
                    min:  15,
                    mood: Mood::Excited
                },
                MoodBand {
                    min:  5,
                    mood: Mood::Happy
                },
                MoodBand {
                    min:  1,
                    mood: Mood::Calm
                },
                MoodBand {
                    min:  0,
                    mood: Mood::Sleeping
                },
            ]
        }
    }
}

impl MoodBands {
    /// Builds bands from arbitrary-order entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the list is empty, has no band
    /// starting at zero, repeats a minimum, or assigns a less intense mood to a
    /// higher minimum.
    pub fn new(mut bands: Vec<MoodBand>) -> Result<Self, Error> {
        if bands.is_empty() {
            return Err(Error::validation("mood_bands must not be empty"));
        }

        bands.sort_by(|a, b| b.min.cmp(&a.min));

        if bands.last().map(|band| band.min) != Some(0) {
            return Err(Error::validation("mood_bands must include a band with min 0"));
        }

        for pair in bands.windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            if upper.min == lower.min {
                return Err(Error::validation(format!(
                    "mood_bands repeat the minimum {}",
                    upper.min
                )));
            }
            if upper.mood < lower.mood {
                return Err(Error::validation(format!(
                    "mood '{}' at {} is calmer than '{}' at {}",
                    upper.mood, upper.min, lower.mood, lower.min
                )));
            }
        }

        Ok(Self {
            bands
        })
    }

    /// Parses configuration entries into validated bands.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMood`] for a mood name outside [`Mood::ALL`] and
    /// the validation errors of [`MoodBands::new`].
    pub fn from_entries(entries: &[MoodBandEntry]) -> Result<Self, Error> {
        let bands = entries
            .iter()
            .map(|entry| {
                Ok(MoodBand {
                    min:  entry.min,
                    mood: entry.mood.parse()?
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Self::new(bands)
    }

    /// Returns the mood for a weekly contribution total.
    pub fn mood_of(&self, weekly_total: u32) -> Mood {
        self.bands
            .iter()
            .find(|band| weekly_total >= band.min)
            .map_or(Mood::Sleeping, |band| band.mood)
    }

    /// Bands in evaluation order.
    pub fn bands(&self) -> &[MoodBand] {
        &self.bands
    }
}
