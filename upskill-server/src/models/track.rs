//! Track: a named learning program with a level and a workload

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{self, ValidationError};

const NAME_MIN: usize = 5;
const NAME_MAX: usize = 150;
const FOCUS_MAX: usize = 100;

/// Difficulty level of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackLevel {
    #[serde(rename = "INICIANTE")]
    Beginner,
    #[serde(rename = "INTERMEDIARIO")]
    Intermediate,
    #[serde(rename = "AVANCADO")]
    Advanced,
}

impl TrackLevel {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Wire and column representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "INICIANTE",
            Self::Intermediate => "INTERMEDIARIO",
            Self::Advanced => "AVANCADO",
        }
    }
}

impl fmt::Display for TrackLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "nivel",
                value: s.to_owned(),
            })
    }
}

/// Stored track record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub level: TrackLevel,
    /// Always > 0
    pub workload_hours: i32,
    pub focus: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrack {
    pub name: String,
    pub description: String,
    pub level: TrackLevel,
    pub workload_hours: i32,
    pub focus: String,
}

/// Fields to overlay on an existing track. `None` leaves the field as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub level: Option<TrackLevel>,
    pub workload_hours: Option<i32>,
    pub focus: Option<String>,
}

impl Track {
    pub fn apply(&mut self, changes: TrackChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(level) = changes.level {
            self.level = level;
        }
        if let Some(hours) = changes.workload_hours {
            self.workload_hours = hours;
        }
        if let Some(focus) = changes.focus {
            self.focus = focus;
        }
    }
}

fn positive_hours(hours: i32) -> Result<i32, ValidationError> {
    if hours <= 0 {
        return Err(ValidationError::NotPositive {
            field: "carga_horaria",
        });
    }
    Ok(hours)
}

/// POST /trilhas body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTrackRequest {
    #[serde(default, rename = "nome")]
    pub name: String,
    #[serde(default, rename = "descricao")]
    pub description: String,
    #[serde(default, rename = "nivel")]
    pub level: String,
    #[serde(default, rename = "carga_horaria")]
    pub workload_hours: i32,
    #[serde(default, rename = "foco_principal")]
    pub focus: String,
}

impl CreateTrackRequest {
    pub fn validate(self) -> Result<NewTrack, ValidationError> {
        validation::required_text("nome", &self.name, NAME_MIN, NAME_MAX)?;
        if self.level.is_empty() {
            return Err(ValidationError::Empty { field: "nivel" });
        }
        let level = self.level.parse()?;
        let workload_hours = positive_hours(self.workload_hours)?;
        validation::max_text("foco_principal", &self.focus, FOCUS_MAX)?;

        Ok(NewTrack {
            name: self.name,
            description: self.description,
            level,
            workload_hours,
            focus: self.focus,
        })
    }
}

/// PUT /trilhas/{id} body. Empty strings and a zero workload mean "unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTrackRequest {
    #[serde(default, rename = "nome")]
    pub name: Option<String>,
    #[serde(default, rename = "descricao")]
    pub description: Option<String>,
    #[serde(default, rename = "nivel")]
    pub level: Option<String>,
    #[serde(default, rename = "carga_horaria")]
    pub workload_hours: Option<i32>,
    #[serde(default, rename = "foco_principal")]
    pub focus: Option<String>,
}

impl UpdateTrackRequest {
    pub fn validate(self) -> Result<TrackChanges, ValidationError> {
        let name = validation::non_empty(self.name);
        if let Some(name) = &name {
            validation::bounded_text("nome", name, NAME_MIN, NAME_MAX)?;
        }

        let level = validation::non_empty(self.level)
            .map(|l| l.parse::<TrackLevel>())
            .transpose()?;

        let workload_hours = self
            .workload_hours
            .filter(|h| *h != 0)
            .map(positive_hours)
            .transpose()?;

        let focus = validation::non_empty(self.focus);
        if let Some(focus) = &focus {
            validation::max_text("foco_principal", focus, FOCUS_MAX)?;
        }

        Ok(TrackChanges {
            name,
            description: validation::non_empty(self.description),
            level,
            workload_hours,
            focus,
        })
    }
}

/// Track representation returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "nivel")]
    pub level: TrackLevel,
    #[serde(rename = "carga_horaria")]
    pub workload_hours: i32,
    #[serde(
        rename = "foco_principal",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub focus: String,
}

impl From<Track> for TrackResponse {
    fn from(t: Track) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            level: t.level,
            workload_hours: t.workload_hours,
            focus: t.focus,
        }
    }
}
