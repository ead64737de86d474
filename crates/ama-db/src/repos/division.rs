//! Administrative division tree (country → county → constituency → ward, or
//! whatever levels a country uses).

use chrono::Utc;

use ama_core::entities::AdministrativeDivision;
use ama_core::enums::{AuditAction, EntityType};
use ama_core::ids::PREFIX_DIVISION;
use ama_core::responses::DivisionPath;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_opt_u64, get_u32, opt_integer, opt_text, parse_datetime};
use crate::service::AmaService;
use crate::updates::SetClauses;
use crate::updates::division::DivisionUpdate;

const SELECT_COLS: &str = "id, country_code, name, governance_level, level_index, parent_id, \
     division_code, population, created_at, updated_at";

/// Walking further than this many parents means the tree has a cycle.
const MAX_DIVISION_DEPTH: usize = 32;

fn row_to_division(row: &libsql::Row) -> Result<AdministrativeDivision, DatabaseError> {
    Ok(AdministrativeDivision {
        id: row.get(0)?,
        country_code: row.get(1)?,
        name: row.get(2)?,
        governance_level: row.get(3)?,
        level_index: get_u32(row, 4)?,
        parent_id: get_opt_string(row, 5)?,
        division_code: get_opt_string(row, 6)?,
        population: get_opt_u64(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

/// Input for [`AmaService::create_division`].
#[derive(Debug, Clone, Default)]
pub struct NewDivision {
    pub country_code: String,
    pub name: String,
    pub governance_level: String,
    pub parent_id: Option<String>,
    pub division_code: Option<String>,
    pub population: Option<u64>,
}

impl AmaService {
    /// Create a division. Children sit one level below their parent and
    /// inherit its country; roots are level 0.
    pub async fn create_division(
        &self,
        input: NewDivision,
    ) -> Result<AdministrativeDivision, DatabaseError> {
        if input.name.trim().is_empty() {
            return Err(DatabaseError::Validation("division name must not be empty".into()));
        }

        let (level_index, country_code) = match input.parent_id.as_deref() {
            Some(parent_id) => {
                let parent = self.get_division(parent_id).await?;
                (parent.level_index + 1, parent.country_code)
            }
            None => {
                if input.country_code.trim().is_empty() {
                    return Err(DatabaseError::Validation(
                        "root divisions need a country code".into(),
                    ));
                }
                (0, input.country_code.to_ascii_uppercase())
            }
        };

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_DIVISION).await?;
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO administrative_divisions ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
                ),
                vec![
                    libsql::Value::from(id.as_str()),
                    country_code.as_str().into(),
                    input.name.as_str().into(),
                    input.governance_level.as_str().into(),
                    i64::from(level_index).into(),
                    opt_text(input.parent_id.as_deref()),
                    opt_text(input.division_code.as_deref()),
                    opt_integer(input.population),
                    now.to_rfc3339().into(),
                    now.to_rfc3339().into(),
                ],
            )
            .await?;

        self.audit::<()>(EntityType::AdministrativeDivision, &id, AuditAction::Created, None)
            .await?;

        Ok(AdministrativeDivision {
            id,
            country_code,
            name: input.name,
            governance_level: input.governance_level,
            level_index,
            parent_id: input.parent_id,
            division_code: input.division_code,
            population: input.population,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_division(&self, id: &str) -> Result<AdministrativeDivision, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM administrative_divisions WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_division(&row)
    }

    pub async fn update_division(
        &self,
        division_id: &str,
        update: DivisionUpdate,
    ) -> Result<AdministrativeDivision, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(ref name) = update.name {
            sets.push("name", name.clone());
        }
        if let Some(ref level) = update.governance_level {
            sets.push("governance_level", level.clone());
        }
        if let Some(ref code) = update.division_code {
            sets.push("division_code", code.clone());
        }
        if let Some(population) = update.population {
            sets.push("population", opt_integer(population));
        }

        if sets.is_empty() {
            return self.get_division(division_id).await;
        }
        sets.push("updated_at", Utc::now().to_rfc3339());

        let (sql, params) = sets.into_update("administrative_divisions", "id", division_id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.audit(
            EntityType::AdministrativeDivision,
            division_id,
            AuditAction::Updated,
            Some(&update),
        )
        .await?;
        self.get_division(division_id).await
    }

    /// Delete a leaf division. Divisions with children are refused.
    pub async fn delete_division(&self, division_id: &str) -> Result<(), DatabaseError> {
        let children = self.list_child_divisions(division_id).await?;
        if !children.is_empty() {
            return Err(DatabaseError::InvalidState(format!(
                "division {division_id} still has {} child division(s)",
                children.len()
            )));
        }

        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM administrative_divisions WHERE id = ?1", [division_id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.audit::<()>(
            EntityType::AdministrativeDivision,
            division_id,
            AuditAction::Deleted,
            None,
        )
        .await
    }

    pub async fn list_child_divisions(
        &self,
        parent_id: &str,
    ) -> Result<Vec<AdministrativeDivision>, DatabaseError> {
        self.query_divisions(
            &format!(
                "SELECT {SELECT_COLS} FROM administrative_divisions WHERE parent_id = ?1 ORDER BY name"
            ),
            vec![parent_id.into()],
        )
        .await
    }

    /// Top-level divisions, optionally for one country.
    pub async fn list_root_divisions(
        &self,
        country_code: Option<&str>,
    ) -> Result<Vec<AdministrativeDivision>, DatabaseError> {
        match country_code {
            Some(code) => {
                self.query_divisions(
                    &format!(
                        "SELECT {SELECT_COLS} FROM administrative_divisions
                         WHERE parent_id IS NULL AND country_code = ?1 ORDER BY name"
                    ),
                    vec![code.to_ascii_uppercase().into()],
                )
                .await
            }
            None => {
                self.query_divisions(
                    &format!(
                        "SELECT {SELECT_COLS} FROM administrative_divisions
                         WHERE parent_id IS NULL ORDER BY country_code, name"
                    ),
                    Vec::new(),
                )
                .await
            }
        }
    }

    /// The chain from the root down to `division_id` (inclusive).
    pub async fn division_ancestors(&self, division_id: &str) -> Result<DivisionPath, DatabaseError> {
        let mut path = vec![self.get_division(division_id).await?];
        while let Some(parent_id) = path.last().and_then(|d| d.parent_id.clone()) {
            if path.len() >= MAX_DIVISION_DEPTH {
                return Err(DatabaseError::InvalidState(format!(
                    "division {division_id} has a cyclic parent chain"
                )));
            }
            path.push(self.get_division(&parent_id).await?);
        }
        path.reverse();
        Ok(DivisionPath {
            division_id: division_id.to_string(),
            path,
        })
    }

    async fn query_divisions(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<AdministrativeDivision>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut divisions = Vec::new();
        while let Some(row) = rows.next().await? {
            divisions.push(row_to_division(&row)?);
        }
        Ok(divisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;
    use crate::updates::division::DivisionUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn division(name: &str, level: &str, parent: Option<&str>) -> NewDivision {
        NewDivision {
            country_code: "ke".into(),
            name: name.into(),
            governance_level: level.into(),
            parent_id: parent.map(String::from),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn tree_levels_and_ancestors() {
        let svc = test_service().await;
        let county = svc
            .create_division(division("Nairobi", "county", None))
            .await
            .unwrap();
        let constituency = svc
            .create_division(division("Kibra", "constituency", Some(&county.id)))
            .await
            .unwrap();
        let ward = svc
            .create_division(division("Laini Saba", "ward", Some(&constituency.id)))
            .await
            .unwrap();

        assert_eq!(county.level_index, 0);
        assert_eq!(county.country_code, "KE");
        assert_eq!(constituency.level_index, 1);
        assert_eq!(ward.level_index, 2);

        let ancestry = svc.division_ancestors(&ward.id).await.unwrap();
        let names: Vec<_> = ancestry.path.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Nairobi", "Kibra", "Laini Saba"]);

        let roots = svc.list_root_divisions(Some("KE")).await.unwrap();
        assert_eq!(roots.len(), 1);
        let children = svc.list_child_divisions(&county.id).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, constituency.id);
    }

    #[tokio::test]
    async fn delete_refused_with_children() {
        let svc = test_service().await;
        let county = svc
            .create_division(division("Mombasa", "county", None))
            .await
            .unwrap();
        let child = svc
            .create_division(division("Nyali", "constituency", Some(&county.id)))
            .await
            .unwrap();

        let result = svc.delete_division(&county.id).await;
        assert!(matches!(result, Err(DatabaseError::InvalidState(_))));

        svc.delete_division(&child.id).await.unwrap();
        svc.delete_division(&county.id).await.unwrap();
        assert!(matches!(
            svc.get_division(&county.id).await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn rename_and_set_population() {
        let svc = test_service().await;
        let county = svc
            .create_division(division("Kisumu", "county", None))
            .await
            .unwrap();
        let updated = svc
            .update_division(
                &county.id,
                DivisionUpdateBuilder::new()
                    .name("Kisumu County")
                    .population(Some(1_155_574))
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Kisumu County");
        assert_eq!(updated.population, Some(1_155_574));
    }

    #[tokio::test]
    async fn missing_parent_is_no_result() {
        let svc = test_service().await;
        let result = svc
            .create_division(division("Orphan", "ward", Some("div-missing0")))
            .await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }
}
