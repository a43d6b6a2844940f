//! Identifier-diff reconciliation of child collections.
//!
//! An incoming ordered list of partial child records is diffed against the
//! persisted set for a parent: elements carrying a known id become updates
//! (only explicitly-supplied fields change), everything else becomes a
//! create (all required fields must be present). What happens to persisted
//! rows the payload never mentions depends on the collection's `Prune`
//! mode: training entries and club interests use full-collection-replace
//! semantics and delete unseen rows; career seasons and the clubs nested
//! under them keep them.
//!
//! All executors run on the caller's transaction connection.

use std::collections::HashSet;

use sqlx::PgConnection;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::rows::{CareerClubRow, CareerSeasonRow, ClubInterestRow, TrainingEntryRow};
use crate::models::submission::{
    CareerClubInput, CareerClubPatch, CareerSeasonPatch, ClubInterestInput, ClubInterestPatch,
    TrainingEntryInput, TrainingEntryPatch,
};
use crate::resume::division::{resolve_division, DivisionRef};

/// What to do with persisted rows the incoming list never mentions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prune {
    DeleteUnseen,
    Keep,
}

/// A partial child record that may carry its persisted identifier.
pub trait Identified {
    fn record_id(&self) -> Option<Uuid>;
}

impl Identified for CareerSeasonPatch {
    fn record_id(&self) -> Option<Uuid> {
        self.id
    }
}

impl Identified for CareerClubPatch {
    fn record_id(&self) -> Option<Uuid> {
        self.id
    }
}

impl Identified for TrainingEntryPatch {
    fn record_id(&self) -> Option<Uuid> {
        self.id
    }
}

impl Identified for ClubInterestPatch {
    fn record_id(&self) -> Option<Uuid> {
        self.id
    }
}

impl<T: Identified> Identified for &T {
    fn record_id(&self) -> Option<Uuid> {
        (**self).record_id()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOp {
    /// The element carries an id that matches a persisted row.
    Update(Uuid),
    /// No id, or an id the store does not know for this parent.
    Create,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilePlan {
    /// One op per incoming element, in incoming order.
    pub ops: Vec<ChildOp>,
    /// Unseen persisted ids; empty unless pruning is enabled.
    pub deletions: Vec<Uuid>,
}

impl ReconcilePlan {
    /// The collection changes size when anything is created or deleted;
    /// that is when dense renumbering applies.
    pub fn resizes(&self) -> bool {
        !self.deletions.is_empty() || self.ops.iter().any(|op| *op == ChildOp::Create)
    }
}

/// Pure diff planner shared by every reconciler instantiation.
pub fn plan_children<T: Identified>(
    incoming: &[T],
    existing: &[Uuid],
    prune: Prune,
) -> ReconcilePlan {
    let known: HashSet<Uuid> = existing.iter().copied().collect();
    let mut seen: HashSet<Uuid> = HashSet::new();

    let ops = incoming
        .iter()
        .map(|item| match item.record_id().filter(|id| known.contains(id)) {
            Some(id) => {
                seen.insert(id);
                ChildOp::Update(id)
            }
            None => ChildOp::Create,
        })
        .collect();

    let deletions = match prune {
        Prune::DeleteUnseen => existing
            .iter()
            .copied()
            .filter(|id| !seen.contains(id))
            .collect(),
        Prune::Keep => Vec::new(),
    };

    ReconcilePlan { ops, deletions }
}

// ---------------------------------------------------------------------------
// Training-entry validity filters: incomplete entries are silently dropped,
// never an error. Applied on create, update and read.
// ---------------------------------------------------------------------------

fn training_fields_valid(
    start_year: i32,
    end_year: Option<i32>,
    title: &str,
    location: &str,
) -> bool {
    start_year > 0
        && end_year.is_some_and(|y| y > 0)
        && !title.trim().is_empty()
        && !location.trim().is_empty()
}

pub fn is_valid_training_input(entry: &TrainingEntryInput) -> bool {
    training_fields_valid(entry.start_year, entry.end_year, &entry.title, &entry.location)
}

pub fn is_valid_training_patch(entry: &TrainingEntryPatch) -> bool {
    let (Some(start_year), Some(end_year), Some(title), Some(location)) = (
        entry.start_year,
        entry.end_year.value().copied(),
        entry.title.as_deref(),
        entry.location.as_deref(),
    ) else {
        return false;
    };
    training_fields_valid(start_year, Some(end_year), title, location)
}

pub fn is_valid_training_row(row: &TrainingEntryRow) -> bool {
    training_fields_valid(row.start_year, row.end_year, &row.title, &row.location)
}

// ---------------------------------------------------------------------------
// Pure merge functions: apply only explicitly-supplied fields to a loaded
// row; the executor writes the whole row back.
// ---------------------------------------------------------------------------

pub fn apply_season_patch(row: &mut CareerSeasonRow, patch: &CareerSeasonPatch) {
    if let Some(start_year) = patch.start_year {
        row.start_year = start_year;
    }
    if let Some(end_year) = patch.end_year {
        row.end_year = end_year;
    }
    if let Some(display_order) = patch.display_order {
        row.display_order = display_order;
    }
}

pub fn apply_club_patch(row: &mut CareerClubRow, patch: &CareerClubPatch) {
    if let Some(club_name) = &patch.club_name {
        row.club_name = club_name.clone();
    }
    patch.club_logo_url.apply_to(&mut row.club_logo_url);
    if let Some(category) = &patch.category {
        row.category = category.clone();
    }
    patch.start_month.apply_to(&mut row.start_month);
    patch.end_month.apply_to(&mut row.end_month);
    if let Some(is_captain) = patch.is_captain {
        row.is_captain = is_captain;
    }
    if let Some(is_promoted) = patch.is_promoted {
        row.is_promoted = is_promoted;
    }
    if let Some(is_champion) = patch.is_champion {
        row.is_champion = is_champion;
    }
    if let Some(is_cup_winner) = patch.is_cup_winner {
        row.is_cup_winner = is_cup_winner;
    }
    if let Some(matches_played) = patch.matches_played {
        row.matches_played = matches_played;
    }
    patch.goals.apply_to(&mut row.goals);
    patch.assists.apply_to(&mut row.assists);
    patch.avg_playtime_minutes.apply_to(&mut row.avg_playtime_minutes);
    patch.clean_sheets.apply_to(&mut row.clean_sheets);
}

pub fn apply_training_patch(row: &mut TrainingEntryRow, patch: &TrainingEntryPatch) {
    if let Some(start_year) = patch.start_year {
        row.start_year = start_year;
    }
    patch.end_year.apply_to(&mut row.end_year);
    if let Some(location) = &patch.location {
        row.location = location.clone();
    }
    if let Some(title) = &patch.title {
        row.title = title.clone();
    }
    patch.details.apply_to(&mut row.details);
    if let Some(display_order) = patch.display_order {
        row.display_order = display_order;
    }
}

pub fn apply_interest_patch(row: &mut ClubInterestRow, patch: &ClubInterestPatch) {
    if let Some(club_name) = &patch.club_name {
        row.club_name = club_name.clone();
    }
    patch.club_logo_url.apply_to(&mut row.club_logo_url);
    if let Some(year) = &patch.year {
        row.year = year.clone();
    }
    if let Some(display_order) = patch.display_order {
        row.display_order = display_order;
    }
}

// ---------------------------------------------------------------------------
// Insert helpers, shared by the create path (bulk create, no prior state)
// and the reconcilers' create branches.
// ---------------------------------------------------------------------------

pub async fn insert_season(
    conn: &mut PgConnection,
    resume_id: Uuid,
    start_year: i32,
    end_year: i32,
    display_order: i32,
) -> Result<Uuid, AppError> {
    let season_id: Uuid = sqlx::query_scalar(
        "INSERT INTO career_seasons (resume_id, start_year, end_year, display_order)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(resume_id)
    .bind(start_year)
    .bind(end_year)
    .bind(display_order)
    .fetch_one(conn)
    .await?;
    Ok(season_id)
}

/// Resolves the club's division, then inserts the club under `season_id`.
pub async fn insert_career_club(
    conn: &mut PgConnection,
    season_id: Uuid,
    club: &CareerClubInput,
) -> Result<Uuid, AppError> {
    let division_id = resolve_division(conn, &DivisionRef::from_input(club)).await?;

    let club_id: Uuid = sqlx::query_scalar(
        "INSERT INTO career_clubs
            (season_id, division_id, club_name, club_logo_url, category,
             start_month, end_month, is_captain, is_promoted, is_champion,
             is_cup_winner, matches_played, goals, assists,
             avg_playtime_minutes, clean_sheets)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
         RETURNING id",
    )
    .bind(season_id)
    .bind(division_id)
    .bind(&club.club_name)
    .bind(&club.club_logo_url)
    .bind(&club.category)
    .bind(club.start_month)
    .bind(club.end_month)
    .bind(club.is_captain)
    .bind(club.is_promoted)
    .bind(club.is_champion)
    .bind(club.is_cup_winner)
    .bind(club.matches_played)
    .bind(club.goals)
    .bind(club.assists)
    .bind(club.avg_playtime_minutes)
    .bind(club.clean_sheets)
    .fetch_one(conn)
    .await?;
    Ok(club_id)
}

pub async fn insert_training_entry(
    conn: &mut PgConnection,
    resume_id: Uuid,
    entry: &TrainingEntryInput,
) -> Result<Uuid, AppError> {
    let entry_id: Uuid = sqlx::query_scalar(
        "INSERT INTO training_entries
            (resume_id, start_year, end_year, location, title, details, display_order)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id",
    )
    .bind(resume_id)
    .bind(entry.start_year)
    .bind(entry.end_year)
    .bind(&entry.location)
    .bind(&entry.title)
    .bind(&entry.details)
    .bind(entry.display_order)
    .fetch_one(conn)
    .await?;
    Ok(entry_id)
}

pub async fn insert_club_interest(
    conn: &mut PgConnection,
    resume_id: Uuid,
    interest: &ClubInterestInput,
) -> Result<Uuid, AppError> {
    let interest_id: Uuid = sqlx::query_scalar(
        "INSERT INTO club_interests
            (resume_id, club_name, club_logo_url, year, display_order)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(resume_id)
    .bind(&interest.club_name)
    .bind(&interest.club_logo_url)
    .bind(&interest.year)
    .bind(interest.display_order)
    .fetch_one(conn)
    .await?;
    Ok(interest_id)
}

// ---------------------------------------------------------------------------
// Reconcilers
// ---------------------------------------------------------------------------

/// Reconciles the seasons of a resume. Unseen persisted seasons survive
/// (`Prune::Keep`); each season's `clubs` array, when present, is delegated
/// to the club reconciler with the season as parent.
pub async fn reconcile_seasons(
    conn: &mut PgConnection,
    resume_id: Uuid,
    incoming: &[CareerSeasonPatch],
) -> Result<(), AppError> {
    let existing: Vec<CareerSeasonRow> =
        sqlx::query_as("SELECT * FROM career_seasons WHERE resume_id = $1")
            .bind(resume_id)
            .fetch_all(&mut *conn)
            .await?;
    let existing_ids: Vec<Uuid> = existing.iter().map(|s| s.id).collect();

    let plan = plan_children(incoming, &existing_ids, Prune::Keep);

    for (season, op) in incoming.iter().zip(&plan.ops) {
        match op {
            ChildOp::Update(season_id) => {
                let mut row = existing
                    .iter()
                    .find(|s| s.id == *season_id)
                    .cloned()
                    .ok_or_else(|| AppError::NotFound(format!("Season {season_id} not found")))?;
                apply_season_patch(&mut row, season);
                sqlx::query(
                    "UPDATE career_seasons
                     SET start_year = $1, end_year = $2, display_order = $3
                     WHERE id = $4",
                )
                .bind(row.start_year)
                .bind(row.end_year)
                .bind(row.display_order)
                .bind(row.id)
                .execute(&mut *conn)
                .await?;

                if let Some(clubs) = &season.clubs {
                    reconcile_career_clubs(conn, *season_id, clubs).await?;
                }
            }
            ChildOp::Create => {
                let (start_year, end_year, display_order) = season.require_complete()?;
                let season_id =
                    insert_season(conn, resume_id, start_year, end_year, display_order).await?;
                if let Some(clubs) = &season.clubs {
                    reconcile_career_clubs(conn, season_id, clubs).await?;
                }
            }
        }
    }

    Ok(())
}

/// Reconciles the clubs of one season. Nested under the season reconciler,
/// unseen persisted clubs survive (`Prune::Keep`). On update, a club that
/// names neither `division_id` nor `division_name` keeps its current
/// division with no resolver call.
pub async fn reconcile_career_clubs(
    conn: &mut PgConnection,
    season_id: Uuid,
    incoming: &[CareerClubPatch],
) -> Result<(), AppError> {
    let existing: Vec<CareerClubRow> =
        sqlx::query_as("SELECT * FROM career_clubs WHERE season_id = $1")
            .bind(season_id)
            .fetch_all(&mut *conn)
            .await?;
    let existing_ids: Vec<Uuid> = existing.iter().map(|c| c.id).collect();

    let plan = plan_children(incoming, &existing_ids, Prune::Keep);

    for (club, op) in incoming.iter().zip(&plan.ops) {
        match op {
            ChildOp::Update(club_id) => {
                let mut row = existing
                    .iter()
                    .find(|c| c.id == *club_id)
                    .cloned()
                    .ok_or_else(|| AppError::NotFound(format!("Club {club_id} not found")))?;

                let division = DivisionRef::from_patch(club);
                if !division.is_empty() {
                    row.division_id = resolve_division(conn, &division).await?;
                }
                apply_club_patch(&mut row, club);

                sqlx::query(
                    "UPDATE career_clubs
                     SET division_id = $1, club_name = $2, club_logo_url = $3,
                         category = $4, start_month = $5, end_month = $6,
                         is_captain = $7, is_promoted = $8, is_champion = $9,
                         is_cup_winner = $10, matches_played = $11, goals = $12,
                         assists = $13, avg_playtime_minutes = $14, clean_sheets = $15
                     WHERE id = $16",
                )
                .bind(row.division_id)
                .bind(&row.club_name)
                .bind(&row.club_logo_url)
                .bind(&row.category)
                .bind(row.start_month)
                .bind(row.end_month)
                .bind(row.is_captain)
                .bind(row.is_promoted)
                .bind(row.is_champion)
                .bind(row.is_cup_winner)
                .bind(row.matches_played)
                .bind(row.goals)
                .bind(row.assists)
                .bind(row.avg_playtime_minutes)
                .bind(row.clean_sheets)
                .bind(row.id)
                .execute(&mut *conn)
                .await?;
            }
            ChildOp::Create => {
                let full = club.require_complete()?;
                insert_career_club(conn, season_id, &full).await?;
            }
        }
    }

    Ok(())
}

/// Reconciles training entries with full-collection-replace semantics:
/// unseen persisted entries are deleted, and the surviving set is
/// dense-renumbered 1..N in incoming order whenever the collection resizes.
/// Incomplete incoming entries are dropped by the validity filter first.
pub async fn reconcile_training_entries(
    conn: &mut PgConnection,
    resume_id: Uuid,
    incoming: &[TrainingEntryPatch],
) -> Result<(), AppError> {
    let valid: Vec<&TrainingEntryPatch> = incoming
        .iter()
        .filter(|e| is_valid_training_patch(e))
        .collect();

    let existing: Vec<TrainingEntryRow> =
        sqlx::query_as("SELECT * FROM training_entries WHERE resume_id = $1")
            .bind(resume_id)
            .fetch_all(&mut *conn)
            .await?;
    let existing_ids: Vec<Uuid> = existing.iter().map(|e| e.id).collect();

    let plan = plan_children(&valid, &existing_ids, Prune::DeleteUnseen);

    let mut survivors: Vec<Uuid> = Vec::with_capacity(valid.len());
    for (position, (entry, op)) in valid.iter().copied().zip(&plan.ops).enumerate() {
        match op {
            ChildOp::Update(entry_id) => {
                let mut row = existing
                    .iter()
                    .find(|e| e.id == *entry_id)
                    .cloned()
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Training entry {entry_id} not found"))
                    })?;
                apply_training_patch(&mut row, entry);
                sqlx::query(
                    "UPDATE training_entries
                     SET start_year = $1, end_year = $2, location = $3,
                         title = $4, details = $5, display_order = $6
                     WHERE id = $7",
                )
                .bind(row.start_year)
                .bind(row.end_year)
                .bind(&row.location)
                .bind(&row.title)
                .bind(&row.details)
                .bind(row.display_order)
                .bind(row.id)
                .execute(&mut *conn)
                .await?;
                survivors.push(row.id);
            }
            ChildOp::Create => {
                let full = entry.require_complete(position as i32 + 1)?;
                let entry_id = insert_training_entry(conn, resume_id, &full).await?;
                survivors.push(entry_id);
            }
        }
    }

    delete_rows(conn, "training_entries", &plan.deletions).await?;
    if plan.resizes() {
        renumber(conn, "training_entries", &survivors).await?;
    }

    Ok(())
}

/// Reconciles club interests, same full-collection-replace semantics as
/// training entries but with no validity filter.
pub async fn reconcile_club_interests(
    conn: &mut PgConnection,
    resume_id: Uuid,
    incoming: &[ClubInterestPatch],
) -> Result<(), AppError> {
    let existing: Vec<ClubInterestRow> =
        sqlx::query_as("SELECT * FROM club_interests WHERE resume_id = $1")
            .bind(resume_id)
            .fetch_all(&mut *conn)
            .await?;
    let existing_ids: Vec<Uuid> = existing.iter().map(|i| i.id).collect();

    let plan = plan_children(incoming, &existing_ids, Prune::DeleteUnseen);

    let mut survivors: Vec<Uuid> = Vec::with_capacity(incoming.len());
    for (position, (interest, op)) in incoming.iter().zip(&plan.ops).enumerate() {
        match op {
            ChildOp::Update(interest_id) => {
                let mut row = existing
                    .iter()
                    .find(|i| i.id == *interest_id)
                    .cloned()
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Club interest {interest_id} not found"))
                    })?;
                apply_interest_patch(&mut row, interest);
                sqlx::query(
                    "UPDATE club_interests
                     SET club_name = $1, club_logo_url = $2, year = $3, display_order = $4
                     WHERE id = $5",
                )
                .bind(&row.club_name)
                .bind(&row.club_logo_url)
                .bind(&row.year)
                .bind(row.display_order)
                .bind(row.id)
                .execute(&mut *conn)
                .await?;
                survivors.push(row.id);
            }
            ChildOp::Create => {
                let full = interest.require_complete(position as i32 + 1)?;
                let interest_id = insert_club_interest(conn, resume_id, &full).await?;
                survivors.push(interest_id);
            }
        }
    }

    delete_rows(conn, "club_interests", &plan.deletions).await?;
    if plan.resizes() {
        renumber(conn, "club_interests", &survivors).await?;
    }

    Ok(())
}

async fn delete_rows(
    conn: &mut PgConnection,
    table: &str,
    ids: &[Uuid],
) -> Result<(), AppError> {
    if ids.is_empty() {
        return Ok(());
    }
    sqlx::query(&format!("DELETE FROM {table} WHERE id = ANY($1)"))
        .bind(ids)
        .execute(conn)
        .await?;
    Ok(())
}

/// Rewrites display_order to 1..N following `ordered_ids`.
async fn renumber(
    conn: &mut PgConnection,
    table: &str,
    ordered_ids: &[Uuid],
) -> Result<(), AppError> {
    for (position, id) in ordered_ids.iter().enumerate() {
        sqlx::query(&format!("UPDATE {table} SET display_order = $1 WHERE id = $2"))
            .bind(position as i32 + 1)
            .bind(id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch_with_id(id: Option<Uuid>) -> ClubInterestPatch {
        ClubInterestPatch {
            id,
            ..Default::default()
        }
    }

    #[test]
    fn test_plan_known_id_is_update() {
        let id = Uuid::new_v4();
        let plan = plan_children(&[patch_with_id(Some(id))], &[id], Prune::DeleteUnseen);
        assert_eq!(plan.ops, vec![ChildOp::Update(id)]);
        assert!(plan.deletions.is_empty());
        assert!(!plan.resizes());
    }

    #[test]
    fn test_plan_missing_id_is_create() {
        let plan = plan_children(&[patch_with_id(None)], &[], Prune::DeleteUnseen);
        assert_eq!(plan.ops, vec![ChildOp::Create]);
        assert!(plan.resizes());
    }

    #[test]
    fn test_plan_unknown_id_is_create() {
        // An id the store does not know for this parent is treated as a
        // create, not an error.
        let stranger = Uuid::new_v4();
        let known = Uuid::new_v4();
        let plan = plan_children(&[patch_with_id(Some(stranger))], &[known], Prune::DeleteUnseen);
        assert_eq!(plan.ops, vec![ChildOp::Create]);
        assert_eq!(plan.deletions, vec![known]);
    }

    #[test]
    fn test_plan_prunes_unseen_when_enabled() {
        let kept = Uuid::new_v4();
        let dropped = Uuid::new_v4();
        let plan = plan_children(
            &[patch_with_id(Some(kept))],
            &[kept, dropped],
            Prune::DeleteUnseen,
        );
        assert_eq!(plan.ops, vec![ChildOp::Update(kept)]);
        assert_eq!(plan.deletions, vec![dropped]);
    }

    #[test]
    fn test_plan_keeps_unseen_when_disabled() {
        let kept = Uuid::new_v4();
        let unseen = Uuid::new_v4();
        let plan = plan_children(&[patch_with_id(Some(kept))], &[kept, unseen], Prune::Keep);
        assert!(plan.deletions.is_empty());
    }

    #[test]
    fn test_plan_empty_incoming_prunes_everything() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let plan = plan_children::<ClubInterestPatch>(&[], &[a, b], Prune::DeleteUnseen);
        assert!(plan.ops.is_empty());
        assert_eq!(plan.deletions, vec![a, b]);
        assert!(plan.resizes());
    }

    #[test]
    fn test_plan_preserves_incoming_order() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let incoming = vec![
            patch_with_id(Some(second)),
            patch_with_id(None),
            patch_with_id(Some(first)),
        ];
        let plan = plan_children(&incoming, &[first, second], Prune::Keep);
        assert_eq!(
            plan.ops,
            vec![ChildOp::Update(second), ChildOp::Create, ChildOp::Update(first)]
        );
    }

    #[test]
    fn test_pure_updates_do_not_resize() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let incoming = vec![patch_with_id(Some(a)), patch_with_id(Some(b))];
        let plan = plan_children(&incoming, &[a, b], Prune::DeleteUnseen);
        assert!(!plan.resizes());
    }

    // -- training validity filter ------------------------------------------

    fn training_patch(json: &str) -> TrainingEntryPatch {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_training_patch_complete_is_valid() {
        assert!(is_valid_training_patch(&training_patch(
            r#"{"start_year": 2020, "end_year": 2021, "title": "Académie", "location": "Lyon"}"#
        )));
    }

    #[test]
    fn test_training_patch_missing_end_year_dropped() {
        assert!(!is_valid_training_patch(&training_patch(
            r#"{"start_year": 2020, "title": "Académie", "location": "Lyon"}"#
        )));
    }

    #[test]
    fn test_training_patch_null_end_year_dropped() {
        assert!(!is_valid_training_patch(&training_patch(
            r#"{"start_year": 2020, "end_year": null, "title": "Académie", "location": "Lyon"}"#
        )));
    }

    #[test]
    fn test_training_patch_blank_title_dropped() {
        assert!(!is_valid_training_patch(&training_patch(
            r#"{"start_year": 2020, "end_year": 2021, "title": "  ", "location": "Lyon"}"#
        )));
    }

    #[test]
    fn test_training_patch_zero_year_dropped() {
        assert!(!is_valid_training_patch(&training_patch(
            r#"{"start_year": 0, "end_year": 2021, "title": "Académie", "location": "Lyon"}"#
        )));
    }

    #[test]
    fn test_training_input_filter() {
        let entry: TrainingEntryInput = serde_json::from_str(
            r#"{"start_year": 2020, "end_year": 2021, "title": "Académie",
                "location": "Lyon", "display_order": 1}"#,
        )
        .unwrap();
        assert!(is_valid_training_input(&entry));

        let entry: TrainingEntryInput = serde_json::from_str(
            r#"{"start_year": 2020, "title": "Académie", "location": "Lyon", "display_order": 1}"#,
        )
        .unwrap();
        assert!(!is_valid_training_input(&entry));
    }

    // -- merge semantics -----------------------------------------------------

    fn club_row() -> CareerClubRow {
        CareerClubRow {
            id: Uuid::new_v4(),
            season_id: Uuid::new_v4(),
            division_id: Uuid::new_v4(),
            club_name: "FC Avant".to_string(),
            club_logo_url: Some("/logo.png".to_string()),
            category: "Séniors".to_string(),
            start_month: Some(7),
            end_month: None,
            is_captain: true,
            is_promoted: false,
            is_champion: false,
            is_cup_winner: true,
            matches_played: 22,
            goals: Some(9),
            assists: Some(4),
            avg_playtime_minutes: Some(80),
            clean_sheets: None,
        }
    }

    #[test]
    fn test_club_rename_leaves_stats_and_badges_untouched() {
        let mut row = club_row();
        let division_id = row.division_id;
        let patch: CareerClubPatch =
            serde_json::from_str(r#"{"club_name": "FC Après"}"#).unwrap();
        apply_club_patch(&mut row, &patch);

        assert_eq!(row.club_name, "FC Après");
        assert_eq!(row.division_id, division_id);
        assert_eq!(row.goals, Some(9));
        assert_eq!(row.assists, Some(4));
        assert!(row.is_captain);
        assert!(row.is_cup_winner);
        assert_eq!(row.matches_played, 22);
    }

    #[test]
    fn test_club_patch_explicit_null_clears_logo_and_month() {
        let mut row = club_row();
        let patch: CareerClubPatch =
            serde_json::from_str(r#"{"club_logo_url": null, "start_month": null}"#).unwrap();
        apply_club_patch(&mut row, &patch);
        assert_eq!(row.club_logo_url, None);
        assert_eq!(row.start_month, None);
    }

    #[test]
    fn test_club_patch_is_idempotent_on_identical_values() {
        let mut row = club_row();
        let before = row.clone();
        let patch: CareerClubPatch = serde_json::from_str(
            r#"{"club_name": "FC Avant", "matches_played": 22, "goals": 9}"#,
        )
        .unwrap();
        apply_club_patch(&mut row, &patch);
        assert_eq!(row.club_name, before.club_name);
        assert_eq!(row.matches_played, before.matches_played);
        assert_eq!(row.goals, before.goals);
    }

    #[test]
    fn test_season_patch_partial_year() {
        let mut row = CareerSeasonRow {
            id: Uuid::new_v4(),
            resume_id: Uuid::new_v4(),
            start_year: 2020,
            end_year: 2021,
            display_order: 2,
        };
        let patch: CareerSeasonPatch = serde_json::from_str(r#"{"end_year": 2022}"#).unwrap();
        apply_season_patch(&mut row, &patch);
        assert_eq!(row.start_year, 2020);
        assert_eq!(row.end_year, 2022);
        assert_eq!(row.display_order, 2);
    }

    #[test]
    fn test_training_patch_merge_clears_details() {
        let mut row = TrainingEntryRow {
            id: Uuid::new_v4(),
            resume_id: Uuid::new_v4(),
            start_year: 2019,
            end_year: Some(2020),
            location: "Paris".to_string(),
            title: "Centre de formation".to_string(),
            details: Some("internat".to_string()),
            display_order: 1,
        };
        let patch: TrainingEntryPatch =
            serde_json::from_str(r#"{"details": null, "location": "Lille"}"#).unwrap();
        apply_training_patch(&mut row, &patch);
        assert_eq!(row.details, None);
        assert_eq!(row.location, "Lille");
        assert_eq!(row.title, "Centre de formation");
    }

    #[test]
    fn test_interest_patch_merge() {
        let mut row = ClubInterestRow {
            id: Uuid::new_v4(),
            resume_id: Uuid::new_v4(),
            club_name: "PSG".to_string(),
            club_logo_url: None,
            year: "2024".to_string(),
            display_order: 1,
        };
        let patch: ClubInterestPatch = serde_json::from_str(r#"{"year": "2025"}"#).unwrap();
        apply_interest_patch(&mut row, &patch);
        assert_eq!(row.year, "2025");
        assert_eq!(row.club_name, "PSG");
    }
}
