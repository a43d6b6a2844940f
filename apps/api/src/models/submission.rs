use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::patch::Patch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormationSystem {
    #[serde(rename = "4-3-3")]
    FourThreeThree,
    #[serde(rename = "3-5-2")]
    ThreeFiveTwo,
}

impl FormationSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormationSystem::FourThreeThree => "4-3-3",
            FormationSystem::ThreeFiveTwo => "3-5-2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrongFoot {
    Droit,
    Gauche,
    Ambidextre,
}

impl StrongFoot {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrongFoot::Droit => "Droit",
            StrongFoot::Gauche => "Gauche",
            StrongFoot::Ambidextre => "Ambidextre",
        }
    }
}

// ---------------------------------------------------------------------------
// Full submission (create path): every required field must be present.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CompleteSubmission {
    pub resume: ResumeInput,
    pub player_profile: PlayerProfileInput,
    pub contacts: ContactInput,
    #[serde(default)]
    pub qualities: Vec<String>,
    #[serde(default)]
    pub career_seasons: Vec<CareerSeasonInput>,
    #[serde(default)]
    pub training_entries: Vec<TrainingEntryInput>,
    #[serde(default)]
    pub club_interests: Vec<ClubInterestInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResumeInput {
    pub color: String,
    pub formation_system: FormationSystem,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerProfileInput {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub nationalities: Vec<String>,
    pub strong_foot: StrongFoot,
    pub height_cm: i32,
    pub weight_kg: i32,
    pub main_position: String,
    #[serde(default)]
    pub positions: Vec<String>,
    pub vma: Option<f64>,
    /// Presence marks the player as a goalkeeper for stats purposes.
    pub wingspan_cm: Option<i32>,
    pub stats_url: Option<String>,
    pub video_url: Option<String>,
    pub photo_path: String,
    #[serde(default)]
    pub is_international: bool,
    pub international_country: Option<String>,
    pub international_division: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactInput {
    pub player_email: String,
    pub player_phone: String,
    pub agent_email: Option<String>,
    pub agent_phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CareerSeasonInput {
    pub start_year: i32,
    pub end_year: i32,
    pub display_order: i32,
    pub clubs: Vec<CareerClubInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CareerClubInput {
    /// Reference to an existing division.
    pub division_id: Option<Uuid>,
    /// Free-text division name; resolved by find-or-create.
    pub division_name: Option<String>,
    /// Explicit presence (including null) overwrites the shared division logo.
    #[serde(default)]
    pub division_logo_url: Patch<String>,
    pub club_name: String,
    pub club_logo_url: Option<String>,
    pub category: String,
    pub start_month: Option<i32>,
    pub end_month: Option<i32>,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_promoted: bool,
    #[serde(default)]
    pub is_champion: bool,
    #[serde(default)]
    pub is_cup_winner: bool,
    pub matches_played: i32,
    pub goals: Option<i32>,
    pub assists: Option<i32>,
    pub avg_playtime_minutes: Option<i32>,
    pub clean_sheets: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainingEntryInput {
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub location: String,
    pub title: String,
    pub details: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClubInterestInput {
    pub club_name: String,
    pub club_logo_url: Option<String>,
    /// 4-digit year string.
    pub year: String,
    pub display_order: i32,
}

// ---------------------------------------------------------------------------
// Partial submission (update path): only explicitly-present keys are applied.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialSubmission {
    pub resume: Option<ResumePatch>,
    pub player_profile: Option<PlayerProfilePatch>,
    pub contacts: Option<ContactPatch>,
    pub qualities: Option<Vec<String>>,
    pub career_seasons: Option<Vec<CareerSeasonPatch>>,
    pub training_entries: Option<Vec<TrainingEntryPatch>>,
    pub club_interests: Option<Vec<ClubInterestPatch>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumePatch {
    pub color: Option<String>,
    pub formation_system: Option<FormationSystem>,
    pub is_treated: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub nationalities: Option<Vec<String>>,
    pub strong_foot: Option<StrongFoot>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<i32>,
    pub main_position: Option<String>,
    pub positions: Option<Vec<String>>,
    #[serde(default)]
    pub vma: Patch<f64>,
    #[serde(default)]
    pub wingspan_cm: Patch<i32>,
    #[serde(default)]
    pub stats_url: Patch<String>,
    #[serde(default)]
    pub video_url: Patch<String>,
    pub photo_path: Option<String>,
    pub is_international: Option<bool>,
    #[serde(default)]
    pub international_country: Patch<String>,
    #[serde(default)]
    pub international_division: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPatch {
    pub player_email: Option<String>,
    pub player_phone: Option<String>,
    #[serde(default)]
    pub agent_email: Patch<String>,
    #[serde(default)]
    pub agent_phone: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CareerSeasonPatch {
    pub id: Option<Uuid>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub display_order: Option<i32>,
    pub clubs: Option<Vec<CareerClubPatch>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CareerClubPatch {
    pub id: Option<Uuid>,
    pub division_id: Option<Uuid>,
    pub division_name: Option<String>,
    #[serde(default)]
    pub division_logo_url: Patch<String>,
    pub club_name: Option<String>,
    #[serde(default)]
    pub club_logo_url: Patch<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub start_month: Patch<i32>,
    #[serde(default)]
    pub end_month: Patch<i32>,
    pub is_captain: Option<bool>,
    pub is_promoted: Option<bool>,
    pub is_champion: Option<bool>,
    pub is_cup_winner: Option<bool>,
    pub matches_played: Option<i32>,
    #[serde(default)]
    pub goals: Patch<i32>,
    #[serde(default)]
    pub assists: Patch<i32>,
    #[serde(default)]
    pub avg_playtime_minutes: Patch<i32>,
    #[serde(default)]
    pub clean_sheets: Patch<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrainingEntryPatch {
    pub id: Option<Uuid>,
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Patch<i32>,
    pub location: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub details: Patch<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClubInterestPatch {
    pub id: Option<Uuid>,
    pub club_name: Option<String>,
    #[serde(default)]
    pub club_logo_url: Patch<String>,
    pub year: Option<String>,
    pub display_order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Required-on-create conversions: a partial element without a known id is a
// create, and every required field of the record kind must be present.
// ---------------------------------------------------------------------------

fn missing(kind: &str, field: &str) -> AppError {
    AppError::Validation(format!("{field} is required to create a {kind}"))
}

impl CareerClubPatch {
    pub fn require_complete(&self) -> Result<CareerClubInput, AppError> {
        Ok(CareerClubInput {
            division_id: self.division_id,
            division_name: self.division_name.clone(),
            division_logo_url: self.division_logo_url.clone(),
            club_name: self
                .club_name
                .clone()
                .ok_or_else(|| missing("career club", "club_name"))?,
            club_logo_url: self.club_logo_url.value().cloned(),
            category: self
                .category
                .clone()
                .ok_or_else(|| missing("career club", "category"))?,
            start_month: self.start_month.value().copied(),
            end_month: self.end_month.value().copied(),
            is_captain: self.is_captain.unwrap_or(false),
            is_promoted: self.is_promoted.unwrap_or(false),
            is_champion: self.is_champion.unwrap_or(false),
            is_cup_winner: self.is_cup_winner.unwrap_or(false),
            matches_played: self
                .matches_played
                .ok_or_else(|| missing("career club", "matches_played"))?,
            goals: self.goals.value().copied(),
            assists: self.assists.value().copied(),
            avg_playtime_minutes: self.avg_playtime_minutes.value().copied(),
            clean_sheets: self.clean_sheets.value().copied(),
        })
    }
}

impl CareerSeasonPatch {
    /// `(start_year, end_year, display_order)` for a season create.
    pub fn require_complete(&self) -> Result<(i32, i32, i32), AppError> {
        let start_year = self
            .start_year
            .ok_or_else(|| missing("career season", "start_year"))?;
        let end_year = self
            .end_year
            .ok_or_else(|| missing("career season", "end_year"))?;
        let display_order = self
            .display_order
            .ok_or_else(|| missing("career season", "display_order"))?;
        Ok((start_year, end_year, display_order))
    }
}

impl TrainingEntryPatch {
    /// `position_order` is the 1-based position in the incoming array, used
    /// when no explicit display_order is supplied.
    pub fn require_complete(&self, position_order: i32) -> Result<TrainingEntryInput, AppError> {
        Ok(TrainingEntryInput {
            start_year: self
                .start_year
                .ok_or_else(|| missing("training entry", "start_year"))?,
            end_year: self.end_year.value().copied(),
            location: self
                .location
                .clone()
                .ok_or_else(|| missing("training entry", "location"))?,
            title: self
                .title
                .clone()
                .ok_or_else(|| missing("training entry", "title"))?,
            details: self.details.value().cloned(),
            display_order: self.display_order.unwrap_or(position_order),
        })
    }
}

impl ClubInterestPatch {
    pub fn require_complete(&self, position_order: i32) -> Result<ClubInterestInput, AppError> {
        Ok(ClubInterestInput {
            club_name: self
                .club_name
                .clone()
                .ok_or_else(|| missing("club interest", "club_name"))?,
            club_logo_url: self.club_logo_url.value().cloned(),
            year: self
                .year
                .clone()
                .ok_or_else(|| missing("club interest", "year"))?,
            display_order: self.display_order.unwrap_or(position_order),
        })
    }
}
