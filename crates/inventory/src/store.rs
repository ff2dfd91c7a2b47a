use crate::Repository;
use crate::error::Result;
use crate::models::ElectronicComponent;
use async_trait::async_trait;

/// The slice of the stock that enrichment needs: look a part up, write it
/// back.
#[async_trait]
pub trait Inventory: Send + Sync {
    async fn find_by_mpn(&self, mpn: &str) -> Result<Option<ElectronicComponent>>;
    async fn write(&self, component: &ElectronicComponent) -> Result<ElectronicComponent>;
}

#[async_trait]
impl Inventory for Repository {
    async fn find_by_mpn(&self, mpn: &str) -> Result<Option<ElectronicComponent>> {
        Repository::find_by_mpn(self, mpn).await
    }

    async fn write(&self, component: &ElectronicComponent) -> Result<ElectronicComponent> {
        Repository::write(self, component).await
    }
}
