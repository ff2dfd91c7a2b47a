//! Repository for components and the projects that consume them.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{
    ComponentRow, ElectronicComponent, LineRow, NewComponent, NewProject, Project, ProjectComponent, ProjectRow,
};
use crate::search;
use exn::{OptionExt, ResultExt};
use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashMap};
use time::OffsetDateTime;
use tracing::instrument;

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Repository for the stock and its projects.
///
/// Every operation that reads before it writes (adding a known MPN, opening
/// a project) runs in a single transaction.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self::new(db.pool().clone())
    }
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// The whole stock, in id order.
    pub async fn all(&self) -> Result<Vec<ElectronicComponent>> {
        let rows: Vec<ComponentRow> = sqlx::query_as(include_str!("../queries/select_components.sql"))
            .bind(None::<i64>)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(ElectronicComponent::try_from).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Option<ElectronicComponent>> {
        let row: Option<ComponentRow> = sqlx::query_as(include_str!("../queries/select_components.sql"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(ElectronicComponent::try_from).transpose()
    }

    /// Looks a component up by its exact MPN.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::DuplicateMpn`] if more than one component carries it.
    pub async fn find_by_mpn(&self, mpn: &str) -> Result<Option<ElectronicComponent>> {
        let rows: Vec<ComponentRow> = sqlx::query_as(
            "SELECT id, mpn, description, count, place, datasheet, packaging
             FROM components WHERE mpn = ?1 ORDER BY id LIMIT 2",
        )
        .bind(mpn.trim())
        .fetch_all(&self.pool)
        .await
        .or_raise(|| ErrorKind::Database)?;
        if rows.len() > 1 {
            exn::bail!(ErrorKind::DuplicateMpn(mpn.trim().to_string()));
        }
        rows.into_iter().next().map(ElectronicComponent::try_from).transpose()
    }

    /// Adds one unit of a part to the stock.
    ///
    /// A new MPN becomes a new component with a count of 1. A known MPN only
    /// has its count incremented; the other fields of `component` are ignored.
    #[instrument(skip(self, component), fields(mpn = component.mpn.as_str()))]
    pub async fn add(&self, component: NewComponent) -> Result<ElectronicComponent> {
        let mpn = component.mpn.trim();
        if mpn.is_empty() {
            exn::bail!(ErrorKind::MissingField("mpn"));
        }
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        let existing: Vec<(i64,)> = sqlx::query_as("SELECT id FROM components WHERE mpn = ?1 ORDER BY id LIMIT 2")
            .bind(mpn)
            .fetch_all(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let row: ComponentRow = match existing.as_slice() {
            [] => sqlx::query_as(include_str!("../queries/insert_component.sql"))
                .bind(mpn)
                .bind(component.description.trim())
                .bind(component.place.trim())
                .bind(non_blank(component.datasheet.as_deref()))
                .bind(non_blank(component.packaging.as_deref()))
                .fetch_one(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?,
            [(id,)] => sqlx::query_as(
                "UPDATE components SET count = count + 1 WHERE id = ?1
                 RETURNING id, mpn, description, count, place, datasheet, packaging",
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?,
            _ => exn::bail!(ErrorKind::DuplicateMpn(mpn.to_string())),
        };
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        tracing::debug!(id = row.id, count = row.count, "stocked component");
        ElectronicComponent::try_from(row)
    }

    /// Overwrites every field of an existing component.
    #[instrument(skip(self, component), fields(id = component.id))]
    pub async fn write(&self, component: &ElectronicComponent) -> Result<ElectronicComponent> {
        let mpn = component.mpn.trim();
        if mpn.is_empty() {
            exn::bail!(ErrorKind::MissingField("mpn"));
        }
        let row: Option<ComponentRow> = sqlx::query_as(include_str!("../queries/update_component.sql"))
            .bind(component.id)
            .bind(mpn)
            .bind(component.description.trim())
            .bind(i64::from(component.count))
            .bind(component.place.trim())
            .bind(non_blank(component.datasheet.as_deref()))
            .bind(non_blank(component.packaging.as_deref()))
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        ElectronicComponent::try_from(row.ok_or_raise(|| ErrorKind::ComponentNotFound(component.id))?)
    }

    /// Removes a component from the stock, returning what was removed.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::ComponentInUse`] if a project still lists it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<ElectronicComponent> {
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        let (uses,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM project_components WHERE component_id = ?1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        if uses > 0 {
            exn::bail!(ErrorKind::ComponentInUse(id));
        }
        let row: Option<ComponentRow> = sqlx::query_as(
            "DELETE FROM components WHERE id = ?1
             RETURNING id, mpn, description, count, place, datasheet, packaging",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .or_raise(|| ErrorKind::Database)?;
        let row = row.ok_or_raise(|| ErrorKind::ComponentNotFound(id))?;
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        ElectronicComponent::try_from(row)
    }

    /// Free-text search over the stock, see [`search::filter`].
    pub async fn search<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<ElectronicComponent>> {
        let tokens = search::parse_terms(terms);
        search::filter(self.all().await?, &tokens)
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// Opens a project, taking its components out of the stock.
    ///
    /// Lines naming the same component are merged. Either every line is
    /// reserved or, on any error, nothing is.
    #[instrument(skip(self, project), fields(name = project.name.as_str(), lines = project.components.len()))]
    pub async fn create_project(&self, project: NewProject) -> Result<Project> {
        let name = project.name.trim();
        if name.is_empty() {
            exn::bail!(ErrorKind::MissingField("name"));
        }
        let mut needed: BTreeMap<i64, u32> = BTreeMap::new();
        for line in &project.components {
            if line.quantity == 0 {
                exn::bail!(ErrorKind::InvalidQuantity(line.component_id));
            }
            let total = needed.entry(line.component_id).or_default();
            *total = total
                .checked_add(line.quantity)
                .ok_or_raise(|| ErrorKind::InvalidQuantity(line.component_id))?;
        }

        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        for (&component_id, &quantity) in &needed {
            let row: Option<ComponentRow> = sqlx::query_as(include_str!("../queries/select_components.sql"))
                .bind(component_id)
                .fetch_optional(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
            let component =
                ElectronicComponent::try_from(row.ok_or_raise(|| ErrorKind::ComponentNotFound(component_id))?)?;
            if component.count < quantity {
                exn::bail!(ErrorKind::InsufficientStock {
                    mpn: component.mpn,
                    needed: quantity,
                    available: component.count,
                });
            }
            sqlx::query("UPDATE components SET count = count - ?2 WHERE id = ?1")
                .bind(component_id)
                .bind(i64::from(quantity))
                .execute(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
        }

        let insert_project = "INSERT INTO projects (name, opened_at) VALUES (?1, ?2) RETURNING id";
        let (project_id,): (i64,) = sqlx::query_as(insert_project)
            .bind(name)
            .bind(OffsetDateTime::now_utc().unix_timestamp())
            .fetch_one(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        for (&component_id, &quantity) in &needed {
            sqlx::query("INSERT INTO project_components (project_id, component_id, quantity) VALUES (?1, ?2, ?3)")
                .bind(project_id)
                .bind(component_id)
                .bind(i64::from(quantity))
                .execute(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
        }
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        tracing::info!(project_id, "opened project");

        self.project(project_id).await?.ok_or_raise(|| ErrorKind::Database)
    }

    pub async fn project(&self, id: i64) -> Result<Option<Project>> {
        Ok(self.load_projects(Some(id)).await?.into_iter().next())
    }

    /// Every project with its components, in id order.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.load_projects(None).await
    }

    async fn load_projects(&self, id: Option<i64>) -> Result<Vec<Project>> {
        let rows: Vec<ProjectRow> =
            sqlx::query_as("SELECT id, name, opened_at FROM projects WHERE (?1 IS NULL OR id = ?1) ORDER BY id")
                .bind(id)
                .fetch_all(&self.pool)
                .await
                .or_raise(|| ErrorKind::Database)?;
        let lines: Vec<LineRow> = sqlx::query_as(include_str!("../queries/project_lines.sql"))
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;

        let mut components: HashMap<i64, Vec<ProjectComponent>> = HashMap::new();
        for line in lines {
            let project_id = line.project_id;
            components.entry(project_id).or_default().push(ProjectComponent::try_from(line)?);
        }
        rows.into_iter()
            .map(|row| -> Result<Project> {
                let mut project = Project::try_from(row)?;
                project.components = components.remove(&project.id).unwrap_or_default();
                Ok(project)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectLine;

    async fn repo() -> Repository {
        let db = Database::connect_in_memory().await.unwrap();
        Repository::from(&db)
    }

    fn part(mpn: &str, description: &str) -> NewComponent {
        NewComponent {
            description: description.to_string(),
            place: "Drawer 1".to_string(),
            ..NewComponent::new(mpn)
        }
    }

    async fn stock(repo: &Repository, mpn: &str, count: u32) -> ElectronicComponent {
        let mut component = repo.add(part(mpn, "")).await.unwrap();
        component.count = count;
        repo.write(&component).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_inserts_then_increments() {
        let repo = repo().await;
        let first = repo.add(part(" NE555 ", "Timer")).await.unwrap();
        assert_eq!(first.mpn, "NE555");
        assert_eq!(first.count, 1);
        assert_eq!(first.datasheet, None);

        let second = repo.add(part("NE555", "ignored")).await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.count, 2);
        assert_eq!(second.description, "Timer");
        assert_eq!(repo.all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_requires_mpn() {
        let repo = repo().await;
        let err = repo.add(part("  ", "Nameless")).await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::MissingField("mpn"));
    }

    #[tokio::test]
    async fn test_find_by_mpn() {
        let repo = repo().await;
        let added = repo.add(part("LM7805", "Regulator")).await.unwrap();
        assert_eq!(repo.find_by_mpn("LM7805").await.unwrap(), Some(added));
        assert_eq!(repo.find_by_mpn("LM7806").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_by_mpn_duplicate() {
        let repo = repo().await;
        repo.add(part("BC547", "")).await.unwrap();
        let mut other = repo.add(part("BC548", "")).await.unwrap();
        other.mpn = "BC547".to_string();
        repo.write(&other).await.unwrap();

        let err = repo.find_by_mpn("BC547").await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::DuplicateMpn("BC547".to_string()));
        let err = repo.add(part("BC547", "")).await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::DuplicateMpn("BC547".to_string()));
    }

    #[tokio::test]
    async fn test_write_and_get() {
        let repo = repo().await;
        let mut component = repo.add(part("LM317", "")).await.unwrap();
        component.description = "Adjustable regulator".to_string();
        component.datasheet = Some("https://example.com/lm317.pdf".to_string());
        component.packaging = Some("  ".to_string());
        let written = repo.write(&component).await.unwrap();
        assert_eq!(written.description, "Adjustable regulator");
        assert_eq!(written.packaging, None);
        assert_eq!(repo.get(component.id).await.unwrap(), Some(written));
    }

    #[tokio::test]
    async fn test_write_unknown_component() {
        let repo = repo().await;
        let mut component = repo.add(part("LM317", "")).await.unwrap();
        component.id += 100;
        let err = repo.write(&component).await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::ComponentNotFound(component.id));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let component = repo.add(part("1N4148", "Diode")).await.unwrap();
        assert_eq!(repo.delete(component.id).await.unwrap(), component);
        assert_eq!(repo.get(component.id).await.unwrap(), None);
        let err = repo.delete(component.id).await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::ComponentNotFound(component.id));
    }

    #[tokio::test]
    async fn test_search() {
        let repo = repo().await;
        repo.add(part("LM7805A", "5V regulator")).await.unwrap();
        repo.add(part("NE555", "Timer")).await.unwrap();
        let found = repo.search(&["lm", "7805"]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].mpn, "LM7805A");
        let none: [&str; 0] = [];
        assert_eq!(repo.search(&none).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_project_reserves_stock() {
        let repo = repo().await;
        let timer = stock(&repo, "NE555", 5).await;
        let cap = stock(&repo, "C100N", 10).await;
        let project = repo
            .create_project(NewProject {
                name: " Blinker ".to_string(),
                components: vec![
                    ProjectLine { component_id: timer.id, quantity: 1 },
                    ProjectLine { component_id: cap.id, quantity: 2 },
                    ProjectLine { component_id: timer.id, quantity: 1 },
                ],
            })
            .await
            .unwrap();
        assert_eq!(project.name, "Blinker");
        let lines = project
            .components
            .iter()
            .map(|line| (line.component.mpn.as_str(), line.quantity))
            .collect::<Vec<_>>();
        assert_eq!(lines, vec![("NE555", 2), ("C100N", 2)]);
        assert_eq!(repo.get(timer.id).await.unwrap().unwrap().count, 3);
        assert_eq!(repo.get(cap.id).await.unwrap().unwrap().count, 8);
        assert_eq!(repo.projects().await.unwrap(), vec![project]);
    }

    #[tokio::test]
    async fn test_create_project_insufficient_stock_changes_nothing() {
        let repo = repo().await;
        let timer = stock(&repo, "NE555", 5).await;
        let cap = stock(&repo, "C100N", 1).await;
        let err = repo
            .create_project(NewProject {
                name: "Blinker".to_string(),
                components: vec![
                    ProjectLine { component_id: timer.id, quantity: 2 },
                    ProjectLine { component_id: cap.id, quantity: 2 },
                ],
            })
            .await
            .unwrap_err();
        assert_eq!(
            &*err,
            &ErrorKind::InsufficientStock {
                mpn: "C100N".to_string(),
                needed: 2,
                available: 1,
            }
        );
        assert!(err.is_invalid_input());
        assert_eq!(repo.get(timer.id).await.unwrap().unwrap().count, 5);
        assert!(repo.projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_project_unknown_component() {
        let repo = repo().await;
        let err = repo
            .create_project(NewProject {
                name: "Ghost".to_string(),
                components: vec![ProjectLine { component_id: 42, quantity: 1 }],
            })
            .await
            .unwrap_err();
        assert_eq!(&*err, &ErrorKind::ComponentNotFound(42));
    }

    #[tokio::test]
    async fn test_create_project_rejects_zero_quantity_and_blank_name() {
        let repo = repo().await;
        let timer = stock(&repo, "NE555", 5).await;
        let line = ProjectLine { component_id: timer.id, quantity: 0 };
        let err = repo
            .create_project(NewProject {
                name: "Blinker".to_string(),
                components: vec![line],
            })
            .await
            .unwrap_err();
        assert_eq!(&*err, &ErrorKind::InvalidQuantity(timer.id));
        let err = repo.create_project(NewProject::default()).await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::MissingField("name"));
    }

    #[tokio::test]
    async fn test_delete_component_in_use() {
        let repo = repo().await;
        let timer = stock(&repo, "NE555", 5).await;
        repo.create_project(NewProject {
            name: "Blinker".to_string(),
            components: vec![ProjectLine { component_id: timer.id, quantity: 1 }],
        })
        .await
        .unwrap();
        let err = repo.delete(timer.id).await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::ComponentInUse(timer.id));
    }

    #[tokio::test]
    async fn test_project_without_components() {
        let repo = repo().await;
        let project = repo
            .create_project(NewProject {
                name: "Someday".to_string(),
                components: vec![],
            })
            .await
            .unwrap();
        assert!(project.components.is_empty());
        assert_eq!(repo.project(project.id).await.unwrap(), Some(project));
        assert_eq!(repo.project(999).await.unwrap(), None);
    }
}
