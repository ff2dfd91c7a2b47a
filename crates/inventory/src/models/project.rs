use super::{ComponentRow, ElectronicComponent, Project, ProjectComponent};
use crate::error::{Error, ErrorKind};
use exn::ResultExt;
use time::OffsetDateTime;

#[derive(sqlx::FromRow)]
pub(crate) struct ProjectRow {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) opened_at: i64,
}
impl TryFrom<ProjectRow> for Project {
    type Error = Error;
    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            opened_at: OffsetDateTime::from_unix_timestamp(row.opened_at)
                .or_raise(|| ErrorKind::InvalidData("opened at"))?,
            components: Vec::new(),
        })
    }
}

/// A project line joined with its component.
#[derive(sqlx::FromRow)]
pub(crate) struct LineRow {
    pub(crate) line_id: i64,
    pub(crate) project_id: i64,
    pub(crate) quantity: i64,
    #[sqlx(flatten)]
    pub(crate) component: ComponentRow,
}
impl TryFrom<LineRow> for ProjectComponent {
    type Error = Error;
    fn try_from(row: LineRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.line_id,
            quantity: u32::try_from(row.quantity).or_raise(|| ErrorKind::InvalidData("quantity"))?,
            component: ElectronicComponent::try_from(row.component)?,
        })
    }
}
