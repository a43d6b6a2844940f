use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::rows::CareerClubRow;

/// Explicit player-role discriminant, derived once from the profile when the
/// aggregate is assembled. Gates which stat block each club exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    FieldPlayer,
    Goalkeeper,
}

impl PlayerRole {
    /// A recorded wingspan marks the player as a goalkeeper.
    pub fn from_wingspan(wingspan_cm: Option<i32>) -> Self {
        if wingspan_cm.is_some() {
            PlayerRole::Goalkeeper
        } else {
            PlayerRole::FieldPlayer
        }
    }
}

/// Per-club stats, tagged by role so consumers never have to re-infer it
/// from which nullable fields happen to be set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ClubStats {
    FieldPlayer {
        goals: Option<i32>,
        assists: Option<i32>,
    },
    Goalkeeper {
        clean_sheets: Option<i32>,
    },
}

impl ClubStats {
    pub fn for_role(role: PlayerRole, row: &CareerClubRow) -> Self {
        match role {
            PlayerRole::FieldPlayer => ClubStats::FieldPlayer {
                goals: row.goals,
                assists: row.assists,
            },
            PlayerRole::Goalkeeper => ClubStats::Goalkeeper {
                clean_sheets: row.clean_sheets,
            },
        }
    }
}

/// Fully assembled aggregate: one resume with every owned child resolved,
/// division name/logo inlined into each club.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteResume {
    pub resume: ResumeMeta,
    pub player_profile: PlayerProfileView,
    pub contacts: ContactView,
    pub qualities: Vec<String>,
    pub career_seasons: Vec<CareerSeasonView>,
    pub training_entries: Vec<TrainingEntryView>,
    pub club_interests: Vec<ClubInterestView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeMeta {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_treated: bool,
    pub color: String,
    pub formation_system: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfileView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub nationalities: Vec<String>,
    pub strong_foot: String,
    pub height_cm: i32,
    pub weight_kg: i32,
    pub main_position: String,
    pub positions: Vec<String>,
    pub role: PlayerRole,
    pub vma: Option<f64>,
    pub wingspan_cm: Option<i32>,
    pub stats_url: Option<String>,
    pub video_url: Option<String>,
    pub photo_path: String,
    pub is_international: bool,
    pub international_country: Option<String>,
    pub international_division: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactView {
    pub id: Uuid,
    pub player_email: String,
    pub player_phone: String,
    pub agent_email: Option<String>,
    pub agent_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CareerSeasonView {
    pub id: Uuid,
    pub start_year: i32,
    pub end_year: i32,
    pub display_order: i32,
    pub clubs: Vec<CareerClubView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CareerClubView {
    pub id: Uuid,
    pub division_id: Uuid,
    pub division_name: String,
    pub division_logo_url: Option<String>,
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
    pub avg_playtime_minutes: Option<i32>,
    #[serde(flatten)]
    pub stats: ClubStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingEntryView {
    pub id: Uuid,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub location: String,
    pub title: String,
    pub details: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClubInterestView {
    pub id: Uuid,
    pub club_name: String,
    pub club_logo_url: Option<String>,
    pub year: String,
    pub display_order: i32,
}

/// One row of the resume list view, newest submissions first.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeListItem {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub main_position: String,
    pub created_at: DateTime<Utc>,
    pub is_treated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club_row() -> CareerClubRow {
        CareerClubRow {
            id: Uuid::new_v4(),
            season_id: Uuid::new_v4(),
            division_id: Uuid::new_v4(),
            club_name: "FC Test".to_string(),
            club_logo_url: None,
            category: "Séniors".to_string(),
            start_month: None,
            end_month: None,
            is_captain: false,
            is_promoted: false,
            is_champion: false,
            is_cup_winner: false,
            matches_played: 10,
            goals: Some(4),
            assists: Some(2),
            avg_playtime_minutes: None,
            clean_sheets: Some(7),
        }
    }

    #[test]
    fn test_role_from_wingspan_presence() {
        assert_eq!(PlayerRole::from_wingspan(Some(190)), PlayerRole::Goalkeeper);
        assert_eq!(PlayerRole::from_wingspan(None), PlayerRole::FieldPlayer);
    }

    #[test]
    fn test_field_player_stats_hide_clean_sheets() {
        let stats = ClubStats::for_role(PlayerRole::FieldPlayer, &club_row());
        assert_eq!(
            stats,
            ClubStats::FieldPlayer {
                goals: Some(4),
                assists: Some(2)
            }
        );
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["role"], "field_player");
        assert_eq!(json["goals"], 4);
        assert!(json.get("clean_sheets").is_none());
    }

    #[test]
    fn test_goalkeeper_stats_hide_goals() {
        let stats = ClubStats::for_role(PlayerRole::Goalkeeper, &club_row());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["role"], "goalkeeper");
        assert_eq!(json["clean_sheets"], 7);
        assert!(json.get("goals").is_none());
    }
}
