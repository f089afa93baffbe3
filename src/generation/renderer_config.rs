//! The renderer's project-local configuration file.
//!
//! The renderer picks its template directory from a configuration file in the
//! working directory, so every generation overwrites that file for the duration
//! of the run. [`RendererConfigGuard`] snapshots whatever was there before and
//! puts it back when the run ends, whether the renderer succeeded, failed, could
//! not be spawned, or the user hit Ctrl-C.

use serde_json::Value;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::{debug, warn};

use crate::core::error::Result;
use crate::core::types::FieldType;

const CONFIG_TEMPLATE: &str = r#"{% if helpers %}const typeMapping = {{ ts_types | safe }};
const propertyTypeMapping = {{ property_types | safe }};

const has = (table, key) => Object.prototype.hasOwnProperty.call(table, key);

const helpers = {
  getType: (type) => (has(typeMapping, type) ? typeMapping[type] : 'any'),
  getPropertyType: (type) => (has(propertyTypeMapping, type) ? propertyTypeMapping[type] : type),
};

{% endif %}module.exports = {
{% if helpers %}  helpers,
{% endif %}  templates: {{ templates | safe }},
};
"#;

/// Render the configuration file contents for a template root.
///
/// With `helpers` set the file also exports `getType` and `getPropertyType`,
/// built from the same tables as [`FieldType::ts_type`] and
/// [`FieldType::decorator_type`].
pub fn render_config(template_root: &Path, helpers: bool) -> Result<String> {
    let root = template_root.display().to_string().replace('\\', "/");

    let mut ts_types = BTreeMap::new();
    let mut property_types = BTreeMap::new();
    for ty in FieldType::KNOWN.iter() {
        ts_types.insert(ty.as_str(), ty.ts_type());
        property_types.insert(ty.as_str(), ty.decorator_type().into_owned());
    }

    let mut context = Context::new();
    context.insert("helpers", &helpers);
    context.insert("templates", &Value::String(root).to_string());
    context.insert("ts_types", &serde_json::to_string(&ts_types)?);
    context.insert("property_types", &serde_json::to_string(&property_types)?);

    let mut tera = Tera::default();
    tera.add_raw_template("hygen.js", CONFIG_TEMPLATE)?;
    Ok(tera.render("hygen.js", &context)?)
}

/// Scoped ownership of the renderer configuration file
#[derive(Debug)]
pub struct RendererConfigGuard {
    path: PathBuf,
    original: Option<Vec<u8>>,
    restored: bool,
}

impl RendererConfigGuard {
    /// Snapshot the existing file (if any) and write `contents` in its place
    pub fn install(path: impl Into<PathBuf>, contents: &str) -> Result<Self> {
        let path = path.into();
        let original = match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let guard = Self {
            path,
            original,
            restored: false,
        };
        std::fs::write(&guard.path, contents)?;
        debug!(
            path = %guard.path.display(),
            had_original = guard.original.is_some(),
            "Installed renderer configuration"
        );
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Put back the original bytes, or remove the generated file.
    ///
    /// Safe to call more than once. Failures are logged, never returned.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        let result = match &self.original {
            Some(bytes) => std::fs::write(&self.path, bytes),
            None => match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };

        match result {
            Ok(()) => debug!(path = %self.path.display(), "Restored renderer configuration"),
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to restore renderer configuration"
            ),
        }
    }
}

impl Drop for RendererConfigGuard {
    fn drop(&mut self) {
        self.restore();
    }
}
