//! Common types used across the tracker

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Disease selector value: either every disease or one exact name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DiseaseFilter {
    #[default]
    All,
    Only(String),
}

impl DiseaseFilter {
    /// Parse the selector string; `"All"` is the sentinel for no filtering.
    pub fn parse(value: &str) -> Self {
        if value == "All" {
            DiseaseFilter::All
        } else {
            DiseaseFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, disease_name: &str) -> bool {
        match self {
            DiseaseFilter::All => true,
            DiseaseFilter::Only(name) => name == disease_name,
        }
    }
}

/// Inclusive date range selected in the picker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Light/dark display mode. Affects only presentation styling, never data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Self {
        match value {
            "dark" | "Dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Base tile layer for the map.
    pub fn map_tiles(&self) -> &'static str {
        match self {
            Theme::Light => "CartoDB Positron",
            Theme::Dark => "CartoDB Dark Matter",
        }
    }

    /// Trend line color.
    pub fn line_color(&self) -> &'static str {
        match self {
            Theme::Light => "#4CAF50",
            Theme::Dark => "#81C784",
        }
    }
}
