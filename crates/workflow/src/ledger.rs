use std::sync::Arc;

use tracing::info;

use coverline_core::domain::conversion::Conversion;
use coverline_core::tenant::TenantContext;
use coverline_store::{Collection, CollectionKey, LocalStore, StoreError};

/// Append-only log of won deals. There is no update or delete surface;
/// insertion order is preserved and any further ordering is left to the
/// aggregation layer.
pub struct ConversionLedger<S> {
    store: Arc<S>,
}

impl<S> ConversionLedger<S>
where
    S: LocalStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn collection(ctx: &TenantContext) -> Collection<Conversion> {
        Collection::new(CollectionKey::conversions(&ctx.agency_id))
    }

    pub async fn append(
        &self,
        ctx: &TenantContext,
        conversion: Conversion,
    ) -> Result<Conversion, StoreError> {
        let collection = Self::collection(ctx);
        let mut entries = collection.read(self.store.as_ref()).await?;
        entries.push(conversion.clone());
        collection.write(self.store.as_ref(), &entries).await?;

        info!(
            agency = %ctx.agency_id,
            attribution = %conversion.attribution_id.0,
            value = %conversion.value,
            "conversion recorded"
        );
        Ok(conversion)
    }

    pub async fn entries(&self, ctx: &TenantContext) -> Result<Vec<Conversion>, StoreError> {
        Self::collection(ctx).read(self.store.as_ref()).await
    }
}
