//! Request-boundary validation. Runs before the aggregate writer is invoked;
//! the writer itself only enforces relational invariants (existence,
//! required-on-create fields).

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::AppError;
use crate::models::submission::{
    CareerClubInput, CareerClubPatch, CareerSeasonInput, CareerSeasonPatch, ClubInterestInput,
    ClubInterestPatch, CompleteSubmission, ContactInput, ContactPatch, PartialSubmission,
    PlayerProfileInput, PlayerProfilePatch, TrainingEntryInput, TrainingEntryPatch,
};

pub const MAX_SEASONS: usize = 5;
pub const MAX_CLUBS_PER_SEASON: usize = 2;
pub const MAX_TRAINING_ENTRIES: usize = 5;
pub const MAX_CLUB_INTERESTS: usize = 5;
pub const MAX_QUALITIES: usize = 6;
pub const MAX_QUALITY_LEN: usize = 24;

fn hex_color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap())
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}$").unwrap())
}

fn reject(msg: impl Into<String>) -> AppError {
    AppError::Validation(msg.into())
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(reject(format!("{field} must not exceed {max} characters")));
    }
    Ok(())
}

fn check_color(color: &str) -> Result<(), AppError> {
    if !hex_color_re().is_match(color) {
        return Err(reject("color must be a hex string (#RRGGBB)"));
    }
    Ok(())
}

fn check_email(field: &str, email: &str) -> Result<(), AppError> {
    check_len(field, email, 255)?;
    if !email_re().is_match(email) {
        return Err(reject(format!("{field} is not a valid email address")));
    }
    Ok(())
}

fn check_month(field: &str, month: i32) -> Result<(), AppError> {
    if !(1..=12).contains(&month) {
        return Err(reject(format!("{field} must be between 1 and 12")));
    }
    Ok(())
}

fn check_qualities(qualities: &[String]) -> Result<(), AppError> {
    if qualities.len() > MAX_QUALITIES {
        return Err(reject(format!("at most {MAX_QUALITIES} qualities allowed")));
    }
    for q in qualities {
        if q.trim().is_empty() {
            return Err(reject("qualities must not be blank"));
        }
        check_len("quality", q, MAX_QUALITY_LEN)?;
    }
    Ok(())
}

fn check_season_order(display_order: i32) -> Result<(), AppError> {
    if !(1..=MAX_SEASONS as i32).contains(&display_order) {
        return Err(reject(format!(
            "season display_order must be between 1 and {MAX_SEASONS}"
        )));
    }
    Ok(())
}

fn check_year_range(start_year: i32, end_year: i32) -> Result<(), AppError> {
    if start_year > end_year {
        return Err(reject(format!(
            "start_year ({start_year}) must not exceed end_year ({end_year})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Full submission (create)
// ---------------------------------------------------------------------------

pub fn validate_complete(sub: &CompleteSubmission) -> Result<(), AppError> {
    check_color(&sub.resume.color)?;
    validate_profile(&sub.player_profile)?;
    validate_contacts(&sub.contacts)?;
    check_qualities(&sub.qualities)?;

    if sub.career_seasons.len() > MAX_SEASONS {
        return Err(reject(format!(
            "at most {MAX_SEASONS} career seasons allowed"
        )));
    }
    for season in &sub.career_seasons {
        validate_season(season)?;
    }

    if sub.training_entries.len() > MAX_TRAINING_ENTRIES {
        return Err(reject(format!(
            "at most {MAX_TRAINING_ENTRIES} training entries allowed"
        )));
    }
    for entry in &sub.training_entries {
        validate_training_entry(entry)?;
    }

    if sub.club_interests.len() > MAX_CLUB_INTERESTS {
        return Err(reject(format!(
            "at most {MAX_CLUB_INTERESTS} club interests allowed"
        )));
    }
    for interest in &sub.club_interests {
        validate_club_interest(interest)?;
    }

    Ok(())
}

fn validate_profile(profile: &PlayerProfileInput) -> Result<(), AppError> {
    check_len("first_name", &profile.first_name, 100)?;
    check_len("last_name", &profile.last_name, 100)?;
    check_len("main_position", &profile.main_position, 100)?;
    check_len("photo_path", &profile.photo_path, 255)?;
    Ok(())
}

fn validate_contacts(contacts: &ContactInput) -> Result<(), AppError> {
    check_email("player_email", &contacts.player_email)?;
    check_len("player_phone", &contacts.player_phone, 20)?;
    if let Some(agent_email) = &contacts.agent_email {
        check_email("agent_email", agent_email)?;
    }
    if let Some(agent_phone) = &contacts.agent_phone {
        check_len("agent_phone", agent_phone, 20)?;
    }
    Ok(())
}

fn validate_season(season: &CareerSeasonInput) -> Result<(), AppError> {
    check_season_order(season.display_order)?;
    check_year_range(season.start_year, season.end_year)?;
    if season.clubs.is_empty() {
        return Err(reject("each season must have at least one club"));
    }
    if season.clubs.len() > MAX_CLUBS_PER_SEASON {
        return Err(reject(format!(
            "each season can have at most {MAX_CLUBS_PER_SEASON} clubs"
        )));
    }
    for club in &season.clubs {
        validate_club(club)?;
    }
    Ok(())
}

fn validate_club(club: &CareerClubInput) -> Result<(), AppError> {
    if club.division_id.is_none() && club.division_name.is_none() {
        return Err(reject(format!(
            "club \"{}\" must reference a division by id or name",
            club.club_name
        )));
    }
    check_len("club_name", &club.club_name, 200)?;
    check_len("category", &club.category, 50)?;
    if let Some(month) = club.start_month {
        check_month("start_month", month)?;
    }
    if let Some(month) = club.end_month {
        check_month("end_month", month)?;
    }
    Ok(())
}

fn validate_training_entry(entry: &TrainingEntryInput) -> Result<(), AppError> {
    check_len("location", &entry.location, 200)?;
    check_len("title", &entry.title, 1000)?;
    if let Some(details) = &entry.details {
        check_len("details", details, 1000)?;
    }
    Ok(())
}

fn validate_club_interest(interest: &ClubInterestInput) -> Result<(), AppError> {
    check_len("club_name", &interest.club_name, 200)?;
    if !year_re().is_match(&interest.year) {
        return Err(reject("club interest year must be a 4-digit year (YYYY)"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Partial submission (update): only present keys are checked.
// ---------------------------------------------------------------------------

pub fn validate_partial(sub: &PartialSubmission) -> Result<(), AppError> {
    if let Some(resume) = &sub.resume {
        if let Some(color) = &resume.color {
            check_color(color)?;
        }
    }
    if let Some(profile) = &sub.player_profile {
        validate_profile_patch(profile)?;
    }
    if let Some(contacts) = &sub.contacts {
        validate_contact_patch(contacts)?;
    }
    if let Some(qualities) = &sub.qualities {
        check_qualities(qualities)?;
    }

    if let Some(seasons) = &sub.career_seasons {
        if seasons.len() > MAX_SEASONS {
            return Err(reject(format!(
                "at most {MAX_SEASONS} career seasons allowed"
            )));
        }
        for season in seasons {
            validate_season_patch(season)?;
        }
    }

    if let Some(entries) = &sub.training_entries {
        if entries.len() > MAX_TRAINING_ENTRIES {
            return Err(reject(format!(
                "at most {MAX_TRAINING_ENTRIES} training entries allowed"
            )));
        }
        for entry in entries {
            validate_training_patch(entry)?;
        }
    }

    if let Some(interests) = &sub.club_interests {
        if interests.len() > MAX_CLUB_INTERESTS {
            return Err(reject(format!(
                "at most {MAX_CLUB_INTERESTS} club interests allowed"
            )));
        }
        for interest in interests {
            validate_interest_patch(interest)?;
        }
    }

    Ok(())
}

fn validate_profile_patch(profile: &PlayerProfilePatch) -> Result<(), AppError> {
    if let Some(first_name) = &profile.first_name {
        check_len("first_name", first_name, 100)?;
    }
    if let Some(last_name) = &profile.last_name {
        check_len("last_name", last_name, 100)?;
    }
    if let Some(main_position) = &profile.main_position {
        check_len("main_position", main_position, 100)?;
    }
    if let Some(photo_path) = &profile.photo_path {
        check_len("photo_path", photo_path, 255)?;
    }
    Ok(())
}

fn validate_contact_patch(contacts: &ContactPatch) -> Result<(), AppError> {
    if let Some(player_email) = &contacts.player_email {
        check_email("player_email", player_email)?;
    }
    if let Some(player_phone) = &contacts.player_phone {
        check_len("player_phone", player_phone, 20)?;
    }
    if let Some(agent_email) = contacts.agent_email.value() {
        check_email("agent_email", agent_email)?;
    }
    if let Some(agent_phone) = contacts.agent_phone.value() {
        check_len("agent_phone", agent_phone, 20)?;
    }
    Ok(())
}

fn validate_season_patch(season: &CareerSeasonPatch) -> Result<(), AppError> {
    if let Some(display_order) = season.display_order {
        check_season_order(display_order)?;
    }
    // Year ordering is only checkable here when both years travel together;
    // a lone year is merged against store state inside the transaction.
    if let (Some(start_year), Some(end_year)) = (season.start_year, season.end_year) {
        check_year_range(start_year, end_year)?;
    }
    if let Some(clubs) = &season.clubs {
        if clubs.len() > MAX_CLUBS_PER_SEASON {
            return Err(reject(format!(
                "each season can have at most {MAX_CLUBS_PER_SEASON} clubs"
            )));
        }
        for club in clubs {
            validate_club_patch(club)?;
        }
    }
    Ok(())
}

fn validate_club_patch(club: &CareerClubPatch) -> Result<(), AppError> {
    if let Some(club_name) = &club.club_name {
        check_len("club_name", club_name, 200)?;
    }
    if let Some(category) = &club.category {
        check_len("category", category, 50)?;
    }
    if let Some(month) = club.start_month.value() {
        check_month("start_month", *month)?;
    }
    if let Some(month) = club.end_month.value() {
        check_month("end_month", *month)?;
    }
    Ok(())
}

fn validate_training_patch(entry: &TrainingEntryPatch) -> Result<(), AppError> {
    if let Some(location) = &entry.location {
        check_len("location", location, 200)?;
    }
    if let Some(title) = &entry.title {
        check_len("title", title, 1000)?;
    }
    if let Some(details) = entry.details.value() {
        check_len("details", details, 1000)?;
    }
    Ok(())
}

fn validate_interest_patch(interest: &ClubInterestPatch) -> Result<(), AppError> {
    if let Some(club_name) = &interest.club_name {
        check_len("club_name", club_name, 200)?;
    }
    if let Some(year) = &interest.year {
        if !year_re().is_match(year) {
            return Err(reject("club interest year must be a 4-digit year (YYYY)"));
        }
    }
    Ok(())
}
