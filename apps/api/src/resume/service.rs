//! Resume aggregate writer: create / read / update / delete / list.
//!
//! Every write runs inside one transaction; any error aborts the whole
//! operation and no partial writes survive. Partial updates are applied
//! read-merge-write: load the row, merge the explicitly-present fields,
//! write all columns back.

use sqlx::{FromRow, PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{
    CareerClubView, CareerSeasonView, ClubInterestView, ClubStats, CompleteResume, ContactView,
    PlayerProfileView, PlayerRole, ResumeListItem, ResumeMeta, TrainingEntryView,
};
use crate::models::rows::{
    CareerClubRow, CareerSeasonRow, ClubInterestRow, ContactRow, PlayerProfileRow, ResumeRow,
    TrainingEntryRow,
};
use crate::models::submission::{
    CompleteSubmission, ContactPatch, PartialSubmission, PlayerProfilePatch, ResumePatch,
};
use crate::resume::reconcile::{
    insert_career_club, insert_club_interest, insert_season, insert_training_entry,
    is_valid_training_input, is_valid_training_row, reconcile_club_interests, reconcile_seasons,
    reconcile_training_entries,
};

/// Creates a complete resume aggregate and returns the new id.
/// No reconciliation: there is no prior state, everything is a bulk create.
/// Division resolution still applies per club.
pub async fn create_resume(pool: &PgPool, sub: &CompleteSubmission) -> Result<Uuid, AppError> {
    let mut tx = pool.begin().await?;

    let resume_id: Uuid = sqlx::query_scalar(
        "INSERT INTO resumes (color, formation_system, is_treated)
         VALUES ($1, $2, FALSE)
         RETURNING id",
    )
    .bind(&sub.resume.color)
    .bind(sub.resume.formation_system.as_str())
    .fetch_one(&mut *tx)
    .await?;

    let profile = &sub.player_profile;
    sqlx::query(
        "INSERT INTO player_profiles
            (resume_id, first_name, last_name, birth_date, nationalities,
             strong_foot, height_cm, weight_kg, main_position, positions,
             qualities, vma, wingspan_cm, stats_url, video_url, photo_path,
             is_international, international_country, international_division)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                 $11, $12, $13, $14, $15, $16, $17, $18, $19)",
    )
    .bind(resume_id)
    .bind(&profile.first_name)
    .bind(&profile.last_name)
    .bind(profile.birth_date)
    .bind(&profile.nationalities)
    .bind(profile.strong_foot.as_str())
    .bind(profile.height_cm)
    .bind(profile.weight_kg)
    .bind(&profile.main_position)
    .bind(&profile.positions)
    .bind(&sub.qualities)
    .bind(profile.vma)
    .bind(profile.wingspan_cm)
    .bind(&profile.stats_url)
    .bind(&profile.video_url)
    .bind(&profile.photo_path)
    .bind(profile.is_international)
    .bind(&profile.international_country)
    .bind(&profile.international_division)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO contacts (resume_id, player_email, player_phone, agent_email, agent_phone)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(resume_id)
    .bind(&sub.contacts.player_email)
    .bind(&sub.contacts.player_phone)
    .bind(&sub.contacts.agent_email)
    .bind(&sub.contacts.agent_phone)
    .execute(&mut *tx)
    .await?;

    for season in &sub.career_seasons {
        let season_id = insert_season(
            &mut tx,
            resume_id,
            season.start_year,
            season.end_year,
            season.display_order,
        )
        .await?;
        for club in &season.clubs {
            insert_career_club(&mut tx, season_id, club).await?;
        }
    }

    for entry in sub.training_entries.iter().filter(|e| is_valid_training_input(e)) {
        insert_training_entry(&mut tx, resume_id, entry).await?;
    }

    for interest in &sub.club_interests {
        insert_club_interest(&mut tx, resume_id, interest).await?;
    }

    tx.commit().await?;
    info!("Created resume {resume_id}");
    Ok(resume_id)
}

#[derive(Debug, FromRow)]
struct ClubWithDivisionRow {
    #[sqlx(flatten)]
    club: CareerClubRow,
    division_name: String,
    division_logo_url: Option<String>,
}

/// Loads the full aggregate with divisions inlined into each club.
/// A resume missing its profile or contact is a corrupt aggregate and is
/// reported, never repaired.
pub async fn get_resume(pool: &PgPool, resume_id: Uuid) -> Result<CompleteResume, AppError> {
    let resume: ResumeRow = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    let profile: PlayerProfileRow =
        sqlx::query_as("SELECT * FROM player_profiles WHERE resume_id = $1")
            .bind(resume_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                AppError::IncompleteAggregate(format!("Resume {resume_id}: player profile missing"))
            })?;

    let contact: ContactRow = sqlx::query_as("SELECT * FROM contacts WHERE resume_id = $1")
        .bind(resume_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            AppError::IncompleteAggregate(format!("Resume {resume_id}: contacts missing"))
        })?;

    let seasons: Vec<CareerSeasonRow> = sqlx::query_as(
        "SELECT * FROM career_seasons WHERE resume_id = $1 ORDER BY display_order ASC",
    )
    .bind(resume_id)
    .fetch_all(pool)
    .await?;

    let role = PlayerRole::from_wingspan(profile.wingspan_cm);

    let mut season_views = Vec::with_capacity(seasons.len());
    for season in seasons {
        // Clubs with no month sort first (single-club seasons).
        let clubs: Vec<ClubWithDivisionRow> = sqlx::query_as(
            "SELECT c.*, d.division_name, d.logo_url AS division_logo_url
             FROM career_clubs c
             JOIN divisions d ON d.id = c.division_id
             WHERE c.season_id = $1
             ORDER BY c.start_month ASC NULLS FIRST, c.end_month ASC NULLS FIRST",
        )
        .bind(season.id)
        .fetch_all(pool)
        .await?;

        season_views.push(CareerSeasonView {
            id: season.id,
            start_year: season.start_year,
            end_year: season.end_year,
            display_order: season.display_order,
            clubs: clubs.into_iter().map(|row| club_view(role, row)).collect(),
        });
    }

    let training: Vec<TrainingEntryRow> = sqlx::query_as(
        "SELECT * FROM training_entries WHERE resume_id = $1 ORDER BY display_order ASC",
    )
    .bind(resume_id)
    .fetch_all(pool)
    .await?;

    let interests: Vec<ClubInterestRow> = sqlx::query_as(
        "SELECT * FROM club_interests WHERE resume_id = $1 ORDER BY display_order ASC",
    )
    .bind(resume_id)
    .fetch_all(pool)
    .await?;

    Ok(CompleteResume {
        resume: ResumeMeta {
            id: resume.id,
            created_at: resume.created_at,
            updated_at: resume.updated_at,
            is_treated: resume.is_treated,
            color: resume.color,
            formation_system: resume.formation_system,
        },
        qualities: profile.qualities.clone(),
        player_profile: PlayerProfileView {
            id: profile.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            birth_date: profile.birth_date,
            nationalities: profile.nationalities,
            strong_foot: profile.strong_foot,
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            main_position: profile.main_position,
            positions: profile.positions,
            role,
            vma: profile.vma,
            wingspan_cm: profile.wingspan_cm,
            stats_url: profile.stats_url,
            video_url: profile.video_url,
            photo_path: profile.photo_path,
            is_international: profile.is_international,
            international_country: profile.international_country,
            international_division: profile.international_division,
        },
        contacts: ContactView {
            id: contact.id,
            player_email: contact.player_email,
            player_phone: contact.player_phone,
            agent_email: contact.agent_email,
            agent_phone: contact.agent_phone,
        },
        career_seasons: season_views,
        training_entries: training
            .iter()
            .filter(|row| is_valid_training_row(row))
            .map(|row| TrainingEntryView {
                id: row.id,
                start_year: row.start_year,
                end_year: row.end_year,
                location: row.location.clone(),
                title: row.title.clone(),
                details: row.details.clone(),
                display_order: row.display_order,
            })
            .collect(),
        club_interests: interests
            .into_iter()
            .map(|row| ClubInterestView {
                id: row.id,
                club_name: row.club_name,
                club_logo_url: row.club_logo_url,
                year: row.year,
                display_order: row.display_order,
            })
            .collect(),
    })
}

fn club_view(role: PlayerRole, row: ClubWithDivisionRow) -> CareerClubView {
    let stats = ClubStats::for_role(role, &row.club);
    CareerClubView {
        id: row.club.id,
        division_id: row.club.division_id,
        division_name: row.division_name,
        division_logo_url: row.division_logo_url,
        club_name: row.club.club_name,
        club_logo_url: row.club.club_logo_url,
        category: row.club.category,
        start_month: row.club.start_month,
        end_month: row.club.end_month,
        is_captain: row.club.is_captain,
        is_promoted: row.club.is_promoted,
        is_champion: row.club.is_champion,
        is_cup_winner: row.club.is_cup_winner,
        matches_played: row.club.matches_played,
        avg_playtime_minutes: row.club.avg_playtime_minutes,
        stats,
    }
}

/// Applies a partial submission to an existing aggregate. Only explicitly
/// present keys change anything; list-valued keys hand off to the
/// reconcilers. All inside one transaction.
pub async fn update_resume(
    pool: &PgPool,
    resume_id: Uuid,
    patch: &PartialSubmission,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let resume: ResumeRow = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    let profile: PlayerProfileRow =
        sqlx::query_as("SELECT * FROM player_profiles WHERE resume_id = $1")
            .bind(resume_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::IncompleteAggregate(format!("Resume {resume_id}: player profile missing"))
            })?;

    let contact: ContactRow = sqlx::query_as("SELECT * FROM contacts WHERE resume_id = $1")
        .bind(resume_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::IncompleteAggregate(format!("Resume {resume_id}: contacts missing"))
        })?;

    if let Some(resume_patch) = &patch.resume {
        let mut row = resume;
        apply_resume_patch(&mut row, resume_patch);
        sqlx::query(
            "UPDATE resumes
             SET color = $1, formation_system = $2, is_treated = $3, updated_at = now()
             WHERE id = $4",
        )
        .bind(&row.color)
        .bind(&row.formation_system)
        .bind(row.is_treated)
        .bind(resume_id)
        .execute(&mut *tx)
        .await?;
    }

    if patch.player_profile.is_some() || patch.qualities.is_some() {
        let mut row = profile;
        if let Some(profile_patch) = &patch.player_profile {
            apply_profile_patch(&mut row, profile_patch);
        }
        if let Some(qualities) = &patch.qualities {
            row.qualities = qualities.clone();
        }
        write_profile(&mut tx, &row).await?;
    }

    if let Some(contact_patch) = &patch.contacts {
        let mut row = contact;
        apply_contact_patch(&mut row, contact_patch);
        sqlx::query(
            "UPDATE contacts
             SET player_email = $1, player_phone = $2, agent_email = $3, agent_phone = $4
             WHERE id = $5",
        )
        .bind(&row.player_email)
        .bind(&row.player_phone)
        .bind(&row.agent_email)
        .bind(&row.agent_phone)
        .bind(row.id)
        .execute(&mut *tx)
        .await?;
    }

    if let Some(seasons) = &patch.career_seasons {
        reconcile_seasons(&mut tx, resume_id, seasons).await?;
    }
    if let Some(entries) = &patch.training_entries {
        reconcile_training_entries(&mut tx, resume_id, entries).await?;
    }
    if let Some(interests) = &patch.club_interests {
        reconcile_club_interests(&mut tx, resume_id, interests).await?;
    }

    tx.commit().await?;
    info!("Updated resume {resume_id}");
    Ok(())
}

/// Deletes a resume; the schema cascade removes all owned children.
/// Divisions outlive the resumes referencing them. Returns false when the
/// resume does not exist.
pub async fn delete_resume(pool: &PgPool, resume_id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(resume_id)
        .execute(pool)
        .await?;
    let deleted = result.rows_affected() > 0;
    if deleted {
        info!("Deleted resume {resume_id}");
    }
    Ok(deleted)
}

/// Lists resumes newest-first. Resumes without a profile are skipped here;
/// `get_resume` is where they are reported as corrupt.
pub async fn list_resumes(pool: &PgPool) -> Result<Vec<ResumeListItem>, AppError> {
    let items: Vec<ResumeListItem> = sqlx::query_as(
        "SELECT r.id, p.first_name, p.last_name, p.main_position, r.created_at, r.is_treated
         FROM resumes r
         JOIN player_profiles p ON p.resume_id = r.id
         ORDER BY r.created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

// ---------------------------------------------------------------------------
// Pure merge functions for the root and its 1:1 children.
// ---------------------------------------------------------------------------

pub fn apply_resume_patch(row: &mut ResumeRow, patch: &ResumePatch) {
    if let Some(color) = &patch.color {
        row.color = color.clone();
    }
    if let Some(formation_system) = patch.formation_system {
        row.formation_system = formation_system.as_str().to_string();
    }
    if let Some(is_treated) = patch.is_treated {
        row.is_treated = is_treated;
    }
}

pub fn apply_profile_patch(row: &mut PlayerProfileRow, patch: &PlayerProfilePatch) {
    if let Some(first_name) = &patch.first_name {
        row.first_name = first_name.clone();
    }
    if let Some(last_name) = &patch.last_name {
        row.last_name = last_name.clone();
    }
    if let Some(birth_date) = patch.birth_date {
        row.birth_date = birth_date;
    }
    if let Some(nationalities) = &patch.nationalities {
        row.nationalities = nationalities.clone();
    }
    if let Some(strong_foot) = patch.strong_foot {
        row.strong_foot = strong_foot.as_str().to_string();
    }
    if let Some(height_cm) = patch.height_cm {
        row.height_cm = height_cm;
    }
    if let Some(weight_kg) = patch.weight_kg {
        row.weight_kg = weight_kg;
    }
    if let Some(main_position) = &patch.main_position {
        row.main_position = main_position.clone();
    }
    if let Some(positions) = &patch.positions {
        row.positions = positions.clone();
    }
    patch.vma.apply_to(&mut row.vma);
    patch.wingspan_cm.apply_to(&mut row.wingspan_cm);
    patch.stats_url.apply_to(&mut row.stats_url);
    patch.video_url.apply_to(&mut row.video_url);
    if let Some(photo_path) = &patch.photo_path {
        row.photo_path = photo_path.clone();
    }
    if let Some(is_international) = patch.is_international {
        row.is_international = is_international;
    }
    patch
        .international_country
        .apply_to(&mut row.international_country);
    patch
        .international_division
        .apply_to(&mut row.international_division);
}

pub fn apply_contact_patch(row: &mut ContactRow, patch: &ContactPatch) {
    if let Some(player_email) = &patch.player_email {
        row.player_email = player_email.clone();
    }
    if let Some(player_phone) = &patch.player_phone {
        row.player_phone = player_phone.clone();
    }
    patch.agent_email.apply_to(&mut row.agent_email);
    patch.agent_phone.apply_to(&mut row.agent_phone);
}

async fn write_profile(conn: &mut PgConnection, row: &PlayerProfileRow) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE player_profiles
         SET first_name = $1, last_name = $2, birth_date = $3, nationalities = $4,
             strong_foot = $5, height_cm = $6, weight_kg = $7, main_position = $8,
             positions = $9, qualities = $10, vma = $11, wingspan_cm = $12,
             stats_url = $13, video_url = $14, photo_path = $15,
             is_international = $16, international_country = $17,
             international_division = $18
         WHERE id = $19",
    )
    .bind(&row.first_name)
    .bind(&row.last_name)
    .bind(row.birth_date)
    .bind(&row.nationalities)
    .bind(&row.strong_foot)
    .bind(row.height_cm)
    .bind(row.weight_kg)
    .bind(&row.main_position)
    .bind(&row.positions)
    .bind(&row.qualities)
    .bind(row.vma)
    .bind(row.wingspan_cm)
    .bind(&row.stats_url)
    .bind(&row.video_url)
    .bind(&row.photo_path)
    .bind(row.is_international)
    .bind(&row.international_country)
    .bind(&row.international_division)
    .bind(row.id)
    .execute(conn)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn resume_row() -> ResumeRow {
        ResumeRow {
            id: Uuid::new_v4(),
            is_treated: false,
            color: "#112233".to_string(),
            formation_system: "4-3-3".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn profile_row() -> PlayerProfileRow {
        PlayerProfileRow {
            id: Uuid::new_v4(),
            resume_id: Uuid::new_v4(),
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2005, 4, 1).unwrap(),
            nationalities: vec!["FR".to_string()],
            strong_foot: "Droit".to_string(),
            height_cm: 180,
            weight_kg: 75,
            main_position: "MC".to_string(),
            positions: vec![],
            qualities: vec!["vision".to_string()],
            vma: Some(17.0),
            wingspan_cm: None,
            stats_url: None,
            video_url: Some("https://v".to_string()),
            photo_path: "/x.jpg".to_string(),
            is_international: false,
            international_country: None,
            international_division: None,
        }
    }

    #[test]
    fn test_resume_patch_only_present_keys() {
        let mut row = resume_row();
        let patch: ResumePatch = serde_json::from_str(r#"{"is_treated": true}"#).unwrap();
        apply_resume_patch(&mut row, &patch);
        assert!(row.is_treated);
        assert_eq!(row.color, "#112233");
        assert_eq!(row.formation_system, "4-3-3");
    }

    #[test]
    fn test_resume_patch_formation_uses_wire_name() {
        let mut row = resume_row();
        let patch: ResumePatch =
            serde_json::from_str(r#"{"formation_system": "3-5-2"}"#).unwrap();
        apply_resume_patch(&mut row, &patch);
        assert_eq!(row.formation_system, "3-5-2");
    }

    #[test]
    fn test_profile_patch_idempotent_when_identical() {
        let mut row = profile_row();
        let before = row.clone();
        let patch: PlayerProfilePatch = serde_json::from_str(
            r#"{"first_name": "Jean", "height_cm": 180, "vma": 17.0}"#,
        )
        .unwrap();
        apply_profile_patch(&mut row, &patch);
        assert_eq!(row.first_name, before.first_name);
        assert_eq!(row.height_cm, before.height_cm);
        assert_eq!(row.vma, before.vma);
        assert_eq!(row.video_url, before.video_url);
    }

    #[test]
    fn test_profile_patch_null_clears_nullable_fields() {
        let mut row = profile_row();
        let patch: PlayerProfilePatch =
            serde_json::from_str(r#"{"vma": null, "video_url": null}"#).unwrap();
        apply_profile_patch(&mut row, &patch);
        assert_eq!(row.vma, None);
        assert_eq!(row.video_url, None);
        // Untouched fields survive.
        assert_eq!(row.first_name, "Jean");
        assert_eq!(row.qualities, vec!["vision".to_string()]);
    }

    #[test]
    fn test_profile_patch_wingspan_toggles_goalkeeper() {
        let mut row = profile_row();
        let patch: PlayerProfilePatch =
            serde_json::from_str(r#"{"wingspan_cm": 192}"#).unwrap();
        apply_profile_patch(&mut row, &patch);
        assert_eq!(
            PlayerRole::from_wingspan(row.wingspan_cm),
            PlayerRole::Goalkeeper
        );
    }

    #[test]
    fn test_contact_patch_agent_null_vs_absent() {
        let mut row = ContactRow {
            id: Uuid::new_v4(),
            resume_id: Uuid::new_v4(),
            player_email: "a@b.com".to_string(),
            player_phone: "+33600000000".to_string(),
            agent_email: Some("agent@x.fr".to_string()),
            agent_phone: Some("+33700000000".to_string()),
        };

        // Absent key: untouched.
        let patch: ContactPatch = serde_json::from_str(r#"{"player_phone": "+33611111111"}"#).unwrap();
        apply_contact_patch(&mut row, &patch);
        assert_eq!(row.agent_email.as_deref(), Some("agent@x.fr"));
        assert_eq!(row.player_phone, "+33611111111");

        // Explicit null: cleared.
        let patch: ContactPatch = serde_json::from_str(r#"{"agent_email": null}"#).unwrap();
        apply_contact_patch(&mut row, &patch);
        assert_eq!(row.agent_email, None);
        assert_eq!(row.agent_phone.as_deref(), Some("+33700000000"));
    }
}
