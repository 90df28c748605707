//! Reading, rendering and formatting batches of program units.

use crate::config::BatchConfig;
use crate::error::{Error, Result};
use j2k_syntax::{CommentConverter, Unit, render_unit};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Accepted shapes of a unit file.
#[derive(Deserialize)]
#[serde(untagged)]
enum UnitFile {
    Many { units: Vec<Unit> },
    One(Unit),
}

/// Rendered text of one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedUnit {
    pub name: String,
    pub text: String,
}

/// Read the units stored in `path`: a single unit, or `{ "units": [...] }`.
pub fn read_units(path: &Path) -> Result<Vec<Unit>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: UnitFile = serde_json::from_str(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let units = match file {
        UnitFile::Many { units } => units,
        UnitFile::One(unit) => vec![unit],
    };
    debug!(path = %path.display(), units = units.len(), "read unit file");
    Ok(units)
}

/// Render every unit, keeping input order.
pub fn render_units(
    units: &[Unit],
    comments: &dyn CommentConverter,
    config: &BatchConfig,
) -> Result<Vec<RenderedUnit>> {
    let rendered = if !config.parallel() {
        units.iter().map(|unit| render_one(unit, comments)).collect()
    } else if let Some(threads) = config.threads() {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        pool.install(|| render_parallel(units, comments))
    } else {
        render_parallel(units, comments)
    };
    info!(
        units = units.len(),
        parallel = config.parallel(),
        "rendered units"
    );
    Ok(rendered)
}

fn render_parallel(units: &[Unit], comments: &dyn CommentConverter) -> Vec<RenderedUnit> {
    units
        .par_iter()
        .map(|unit| render_one(unit, comments))
        .collect()
}

fn render_one(unit: &Unit, comments: &dyn CommentConverter) -> RenderedUnit {
    debug!(unit = %unit.name, expressions = unit.expressions.len(), "rendering unit");
    RenderedUnit {
        name: unit.name.clone(),
        text: render_unit(unit, comments),
    }
}

/// `// <name>` followed by the unit's lines; units separated by a blank line.
pub fn format_text(rendered: &[RenderedUnit]) -> String {
    let mut out = String::new();
    for (i, unit) in rendered.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("// ");
        out.push_str(&unit.name);
        out.push('\n');
        out.push_str(&unit.text);
    }
    out
}

/// `[{ "name": ..., "text": ... }]`
pub fn format_json(rendered: &[RenderedUnit]) -> Result<String> {
    let mut out = serde_json::to_string_pretty(rendered)?;
    out.push('\n');
    Ok(out)
}
