use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub is_treated: bool,
    pub color: String,
    pub formation_system: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlayerProfileRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub nationalities: Vec<String>,
    pub strong_foot: String,
    pub height_cm: i32,
    pub weight_kg: i32,
    pub main_position: String,
    pub positions: Vec<String>,
    pub qualities: Vec<String>,
    pub vma: Option<f64>,
    pub wingspan_cm: Option<i32>,
    pub stats_url: Option<String>,
    pub video_url: Option<String>,
    pub photo_path: String,
    pub is_international: bool,
    pub international_country: Option<String>,
    pub international_division: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub player_email: String,
    pub player_phone: String,
    pub agent_email: Option<String>,
    pub agent_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerSeasonRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub start_year: i32,
    pub end_year: i32,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerClubRow {
    pub id: Uuid,
    pub season_id: Uuid,
    pub division_id: Uuid,
    pub club_name: String,
    pub club_logo_url: Option<String>,
    pub category: String,
    pub start_month: Option<i32>,
    pub end_month: Option<i32>,
    pub is_captain: bool,
    pub is_promoted: bool,
    pub is_champion: bool,
    pub is_cup_winner: bool,
    pub matches_played: i32,
    pub goals: Option<i32>,
    pub assists: Option<i32>,
    pub avg_playtime_minutes: Option<i32>,
    pub clean_sheets: Option<i32>,
}

/// Shared across resumes; never deleted by the resume cascade.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DivisionRow {
    pub id: Uuid,
    pub division_name: String,
    pub logo_url: Option<String>,
    pub is_official: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainingEntryRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub location: String,
    pub title: String,
    pub details: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClubInterestRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub club_name: String,
    pub club_logo_url: Option<String>,
    pub year: String,
    pub display_order: i32,
}
