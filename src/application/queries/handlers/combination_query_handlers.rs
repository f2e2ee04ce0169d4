//! Combination Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::EngineRegistryPort;
use crate::application::queries::{
    CheckCombinationQuery, GetCombinationStatsQuery, GetCurrentIndexQuery,
};
use crate::application::services::CombinationStats;
use crate::domain::combination::Availability;

/// CheckCombination Handler
pub struct CheckCombinationHandler {
    registry: Arc<dyn EngineRegistryPort>,
}

impl CheckCombinationHandler {
    pub fn new(registry: Arc<dyn EngineRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: CheckCombinationQuery) -> Result<Availability, ApplicationError> {
        let engine = self.registry.resolve(query.project.as_deref()).await?;
        Ok(engine.check(&query.combination).await)
    }
}

/// GetCombinationStats Handler
pub struct GetCombinationStatsHandler {
    registry: Arc<dyn EngineRegistryPort>,
}

impl GetCombinationStatsHandler {
    pub fn new(registry: Arc<dyn EngineRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        query: GetCombinationStatsQuery,
    ) -> Result<CombinationStats, ApplicationError> {
        let engine = self.registry.resolve(query.project.as_deref()).await?;
        Ok(engine.stats().await)
    }
}

/// GetCurrentIndex Handler
pub struct GetCurrentIndexHandler {
    registry: Arc<dyn EngineRegistryPort>,
}

impl GetCurrentIndexHandler {
    pub fn new(registry: Arc<dyn EngineRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: GetCurrentIndexQuery) -> Result<usize, ApplicationError> {
        let engine = self.registry.resolve(query.project.as_deref()).await?;
        Ok(engine.current_index().await)
    }
}
