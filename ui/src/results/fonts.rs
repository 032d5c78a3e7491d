//! System font database for rasterizing chart snapshots on native targets.
//!
//! Loading system fonts takes a noticeable moment on first use, so it runs
//! once on a background thread (see `charts::start_engine`) and the result is
//! shared by every later rasterization.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use usvg::fontdb::{Database, Family, Query};

static FONT_DB: OnceCell<Arc<Database>> = OnceCell::new();

/// Shared font database, loaded on first call.
pub fn database() -> Arc<Database> {
    FONT_DB.get_or_init(|| Arc::new(load())).clone()
}

fn load() -> Database {
    let mut db = Database::new();
    db.load_system_fonts();

    // Point the generic family at something installed so chart text never
    // silently disappears on systems without the usual defaults.
    let has_sans = db
        .query(&Query {
            families: &[Family::SansSerif],
            ..Query::default()
        })
        .is_some();
    if !has_sans {
        let fallback = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()));
        if let Some(name) = fallback {
            tracing::debug!(family = %name, "sans-serif fallback family selected");
            db.set_sans_serif_family(name);
        }
    }

    tracing::info!(faces = db.len(), "chart fonts loaded");
    db
}
