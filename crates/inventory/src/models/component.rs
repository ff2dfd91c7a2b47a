use super::ElectronicComponent;
use crate::error::{Error, ErrorKind};
use exn::ResultExt;

#[derive(sqlx::FromRow)]
pub(crate) struct ComponentRow {
    pub(crate) id: i64,
    pub(crate) mpn: String,
    pub(crate) description: String,
    pub(crate) count: i64,
    pub(crate) place: String,
    #[sqlx(default)]
    pub(crate) datasheet: Option<String>,
    #[sqlx(default)]
    pub(crate) packaging: Option<String>,
}
impl TryFrom<ComponentRow> for ElectronicComponent {
    type Error = Error;
    fn try_from(row: ComponentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            mpn: row.mpn,
            description: row.description,
            count: u32::try_from(row.count).or_raise(|| ErrorKind::InvalidData("count"))?,
            place: row.place,
            datasheet: row.datasheet,
            packaging: row.packaging,
        })
    }
}
