//! Event model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::utils::errors::{PlayMateError, Result};

/// Half-width in degrees of the map window around an event
const MAP_SPAN_DEGREES: f64 = 0.01;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub level: SkillLevel,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub start: DateTime<Utc>,
    pub finish: DateTime<Utc>,
    pub capacity: i32,
    pub courts: i32,
    pub price: f64,
    pub contact: String,
    pub pay_in_person: bool,
    pub waitlist_enabled: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// A validated event ready to be inserted into a store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateEventRequest {
    pub title: String,
    pub level: SkillLevel,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub start: DateTime<Utc>,
    pub finish: DateTime<Utc>,
    pub capacity: i32,
    pub courts: i32,
    pub price: f64,
    pub contact: String,
    pub pay_in_person: bool,
    pub waitlist_enabled: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    #[default]
    AllLevels,
    Beginner,
    Intermediate,
    Advanced,
    Competitive,
}

#[derive(Error, Debug)]
#[error("unknown skill level: {0}")]
pub struct UnknownSkillLevel(pub String);

impl SkillLevel {
    pub const ALL: [SkillLevel; 5] = [
        SkillLevel::AllLevels,
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Competitive,
    ];

    /// Stable identifier used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::AllLevels => "all_levels",
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Competitive => "competitive",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::AllLevels => "All Levels",
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Competitive => "Competitive (4-2/5-1)",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SkillLevel {
    type Err = UnknownSkillLevel;

    /// Accepts the storage identifier, the label, or the label's first word
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "all_levels" | "all" => Ok(SkillLevel::AllLevels),
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            n if n.starts_with("competitive") => Ok(SkillLevel::Competitive),
            _ => Err(UnknownSkillLevel(s.to_string())),
        }
    }
}

impl Event {
    /// OpenStreetMap embed link centred on the venue
    pub fn map_embed_url(&self) -> Result<Url> {
        let bbox = format!(
            "{},{},{},{}",
            self.longitude - MAP_SPAN_DEGREES,
            self.latitude - MAP_SPAN_DEGREES,
            self.longitude + MAP_SPAN_DEGREES,
            self.latitude + MAP_SPAN_DEGREES
        );
        let marker = format!("{},{}", self.latitude, self.longitude);

        let url = Url::parse_with_params(
            "https://www.openstreetmap.org/export/embed.html",
            &[("bbox", bbox.as_str()), ("layer", "mapnik"), ("marker", marker.as_str())],
        )?;
        Ok(url)
    }
}

impl CreateEventRequest {
    /// Check the invariants every stored event must satisfy
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PlayMateError::InvalidInput("Event title is required".to_string()));
        }
        if self.finish <= self.start {
            return Err(PlayMateError::InvalidInput(
                "Event must finish after it starts".to_string(),
            ));
        }
        if self.capacity <= 0 {
            return Err(PlayMateError::InvalidInput(
                "Capacity must be greater than 0".to_string(),
            ));
        }
        if self.courts <= 0 {
            return Err(PlayMateError::InvalidInput(
                "Court count must be greater than 0".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(PlayMateError::InvalidInput(
                "Price must be a non-negative number".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(PlayMateError::InvalidInput(
                "Coordinates are out of range".to_string(),
            ));
        }
        Ok(())
    }

    /// Materialize the request into an event with a fresh identifier
    pub fn into_event(self) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: self.title,
            level: self.level,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            start: self.start,
            finish: self.finish,
            capacity: self.capacity,
            courts: self.courts,
            price: self.price,
            contact: self.contact,
            pay_in_person: self.pay_in_person,
            waitlist_enabled: self.waitlist_enabled,
            notes: self.notes,
            created_at: Utc::now(),
        }
    }
}
