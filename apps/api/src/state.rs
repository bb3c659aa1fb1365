use std::sync::Arc;

use anyhow::{Context, Result};

use crate::ats::{AtsScorer, KeywordAtsScorer};
use crate::config::Config;
use crate::export::raster::{BlockRasterizer, Rasterizer};
use crate::export::ActivityIndicator;
use crate::persistence::Persistence;
use crate::render::html::Views;
use crate::store::KeyValueStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub persistence: Persistence,
    pub config: Config,
    /// Pluggable ATS scorer. Default: KeywordAtsScorer.
    pub ats_scorer: Arc<dyn AtsScorer>,
    /// Captures the laid-out resume into pixels for PDF/PNG export.
    pub rasterizer: Arc<dyn Rasterizer>,
    /// "Generating PDF, please wait..." while an export is capturing.
    pub activity: ActivityIndicator,
    pub views: Arc<Views>,
}

impl AppState {
    /// State with the default scorer and rasterizer over `store`.
    pub fn new(store: Arc<dyn KeyValueStore>, config: Config) -> Result<Self> {
        Ok(AppState {
            persistence: Persistence::new(store),
            config,
            ats_scorer: Arc::new(KeywordAtsScorer),
            rasterizer: Arc::new(BlockRasterizer),
            activity: ActivityIndicator::default(),
            views: Arc::new(Views::new().context("Failed to compile HTML views")?),
        })
    }
}
