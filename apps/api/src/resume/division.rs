//! Division resolution: by id (must exist) or by name (find-or-create).
//!
//! Divisions are shared across resumes. A logo supplied through one club's
//! submission overwrites the division row itself, so the change is visible
//! to every resume referencing that division once the owning transaction
//! commits. That cross-aggregate side effect is intentional.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::patch::Patch;
use crate::models::submission::{CareerClubInput, CareerClubPatch};

/// The division-related slice of a club submission.
#[derive(Debug, Clone)]
pub struct DivisionRef {
    pub division_id: Option<Uuid>,
    pub division_name: Option<String>,
    pub division_logo_url: Patch<String>,
    /// Only used in error messages.
    pub club_name: String,
}

impl DivisionRef {
    pub fn from_input(club: &CareerClubInput) -> Self {
        DivisionRef {
            division_id: club.division_id,
            division_name: club.division_name.clone(),
            division_logo_url: club.division_logo_url.clone(),
            club_name: club.club_name.clone(),
        }
    }

    pub fn from_patch(club: &CareerClubPatch) -> Self {
        DivisionRef {
            division_id: club.division_id,
            division_name: club.division_name.clone(),
            division_logo_url: club.division_logo_url.clone(),
            club_name: club.club_name.clone().unwrap_or_default(),
        }
    }

    /// True when the submission carries no division reference at all, in
    /// which case an update keeps the club's current division untouched.
    pub fn is_empty(&self) -> bool {
        self.division_id.is_none() && self.division_name.is_none()
    }
}

/// Resolves a club's division reference to a division id, creating ad-hoc
/// divisions (`is_official = false`) for unknown names. `is_official` is set
/// only at creation and never touched again.
pub async fn resolve_division(
    conn: &mut PgConnection,
    division: &DivisionRef,
) -> Result<Uuid, AppError> {
    if let Some(division_id) = division.division_id {
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM divisions WHERE id = $1")
            .bind(division_id)
            .fetch_optional(&mut *conn)
            .await?;
        let division_id = exists
            .ok_or_else(|| AppError::NotFound(format!("Division {division_id} not found")))?;

        if let Some(logo_url) = division.division_logo_url.explicit() {
            update_logo(conn, division_id, logo_url).await?;
        }
        return Ok(division_id);
    }

    if let Some(division_name) = &division.division_name {
        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM divisions WHERE division_name = $1 LIMIT 1")
                .bind(division_name)
                .fetch_optional(&mut *conn)
                .await?;

        return match existing {
            Some(division_id) => {
                if let Some(logo_url) = division.division_logo_url.explicit() {
                    update_logo(conn, division_id, logo_url).await?;
                }
                Ok(division_id)
            }
            None => {
                let division_id: Uuid = sqlx::query_scalar(
                    "INSERT INTO divisions (division_name, logo_url, is_official)
                     VALUES ($1, $2, FALSE)
                     RETURNING id",
                )
                .bind(division_name)
                .bind(division.division_logo_url.value())
                .fetch_one(&mut *conn)
                .await?;
                tracing::info!("Created ad-hoc division \"{division_name}\" ({division_id})");
                Ok(division_id)
            }
        };
    }

    Err(AppError::Validation(format!(
        "division missing for club \"{}\"",
        division.club_name
    )))
}

async fn update_logo(
    conn: &mut PgConnection,
    division_id: Uuid,
    logo_url: Option<&String>,
) -> Result<(), AppError> {
    sqlx::query("UPDATE divisions SET logo_url = $1 WHERE id = $2")
        .bind(logo_url)
        .bind(division_id)
        .execute(conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_ref_empty_detection() {
        let club: CareerClubPatch = serde_json::from_str(r#"{"club_name": "FC Test"}"#).unwrap();
        assert!(DivisionRef::from_patch(&club).is_empty());

        let club: CareerClubPatch =
            serde_json::from_str(r#"{"club_name": "FC Test", "division_name": "N2"}"#).unwrap();
        assert!(!DivisionRef::from_patch(&club).is_empty());
    }

    #[test]
    fn test_division_ref_carries_explicit_null_logo() {
        // An explicit null must survive into the ref so the resolver clears
        // the shared logo instead of skipping the write.
        let club: CareerClubPatch = serde_json::from_str(
            r#"{"club_name": "FC Test", "division_id": "7f3c1d9a-8a6a-4f0e-9f3c-0a1b2c3d4e5f",
                "division_logo_url": null}"#,
        )
        .unwrap();
        let division = DivisionRef::from_patch(&club);
        assert_eq!(division.division_logo_url.explicit(), Some(None));
    }
}
