use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::DashboardConfig;
use crate::data::export::ExportCache;
use crate::data::filter::{CategoryFilter, FilterParams};
use crate::data::loader::DatasetCache;
use crate::data::model::Table;
use crate::error::DataLoadError;
use crate::pipeline::Snapshot;

// ---------------------------------------------------------------------------
// Dashboard sections (tabs)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Overview,
    StrengthFlexibility,
    Throws,
    DataExplorer,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Overview,
        Section::StrengthFlexibility,
        Section::Throws,
        Section::DataExplorer,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Overview => "📊 Overview",
            Section::StrengthFlexibility => "🏋 Strength & Flexibility",
            Section::Throws => "📏 Javelin/Throw Performance",
            Section::DataExplorer => "📋 Data Explorer",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Load-once cache around the source file.
    cache: DatasetCache,

    /// Loaded dataset (None when loading failed).
    pub table: Option<Arc<Table>>,

    /// Why the dataset could not be loaded; replaces the whole dashboard.
    pub load_error: Option<String>,

    /// Sidebar selections.
    pub filters: FilterParams,

    /// View, metrics and charts for the current selections.
    pub snapshot: Option<Snapshot>,

    export_cache: ExportCache,

    /// Section currently shown in the central panel.
    pub section: Section,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state and perform the initial load.
    pub fn new(config: DashboardConfig) -> Self {
        let cache = DatasetCache::new(&config.data_path);
        let mut state = Self {
            config,
            cache,
            table: None,
            load_error: None,
            filters: FilterParams::default(),
            snapshot: None,
            export_cache: ExportCache::default(),
            section: Section::default(),
            status_message: None,
        };
        let loaded = state.cache.get();
        state.apply_load(loaded);
        state
    }

    /// Re-read the source file, keeping the category selection if it still applies.
    pub fn reload(&mut self) {
        log::info!("Reloading {}", self.cache.path().display());
        let loaded = self.cache.reload();
        self.apply_load(loaded);
    }

    fn apply_load(&mut self, loaded: Result<Arc<Table>, DataLoadError>) {
        self.export_cache.clear();
        match loaded {
            Ok(table) => {
                let category = self.filters.category;
                self.filters = FilterParams::select_all(&table);
                self.filters.category = category;
                self.filters.retain_present(&table);
                self.table = Some(table);
                self.load_error = None;
                self.status_message = None;
                self.refilter();
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                self.table = None;
                self.snapshot = None;
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Recompute the snapshot after a filter change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.snapshot = Some(Snapshot::compute(table, &self.filters));
        }
    }

    pub fn toggle_name(&mut self, name: &str) {
        self.filters.toggle_name(name);
        self.refilter();
    }

    pub fn select_all(&mut self) {
        if let Some(table) = &self.table {
            self.filters.names = table.iter().map(|r| r.name.clone()).collect();
            self.refilter();
        }
    }

    pub fn select_none(&mut self) {
        self.filters.names.clear();
        self.refilter();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        if self.filters.category != category {
            self.filters.category = category;
            self.refilter();
        }
    }

    /// Whether the source file changed since it was loaded.
    pub fn source_changed(&self) -> bool {
        self.config.watch_source && self.cache.source_changed()
    }

    /// CSV bytes for the current view, reused while the view is unchanged.
    pub fn export_bytes(&mut self) -> Result<Arc<[u8]>> {
        let view = self
            .snapshot
            .as_ref()
            .map(|s| &s.view)
            .context("no dataset loaded")?;
        self.export_cache
            .get_or_export(view)
            .context("serialising filtered data")
    }

    /// Write the current view to `path` as CSV.
    pub fn save_export(&mut self, path: &Path) -> Result<()> {
        let bytes = self.export_bytes()?;
        std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
