//! Signage Layout Editor - Entry Point

use chrono::{DateTime, Utc};
use clap::Parser;
use signage_layout::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides, ConfigError, ResolvedConfig,
};
use signage_layout::geometry::ResizeSettings;
use signage_layout::model::persist::{load_document, save_document};
use signage_layout::model::{
    AppError, ContentRef, LayoutNode, ScreenDocument, UuidIds, DOCUMENT_VERSION,
};
use signage_layout::state::{ChangeSink, ContentPalette, LayoutEditor};
use signage_layout::view::{run_with_editor, ScreenOptions};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Signage Layout Editor - split a screen into panes in the terminal
#[derive(Parser, Debug)]
#[command(name = "signage-layout")]
#[command(version)]
#[command(about = "Edit recursive split-pane screen layouts in the terminal")]
pub struct Args {
    /// Screen document to edit (created on the first change if missing)
    pub layout_file: PathBuf,

    /// Screen name (defaults to the stored name, then the file name)
    #[arg(long)]
    pub name: Option<String>,

    /// Open the layout without edit affordances
    #[arg(long)]
    pub read_only: bool,

    /// Show node ids in pane titles
    #[arg(long)]
    pub show_ids: bool,

    /// Snap to 50% within this many percent, below 49 (0 disables snapping)
    #[arg(long, value_parser = parse_snap_threshold)]
    pub snap_threshold: Option<f64>,

    /// Content reference offered for placement (repeatable)
    #[arg(long = "content", value_name = "URL")]
    pub content: Vec<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_snap_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    let limit = ResizeSettings::snap_threshold_limit(ResizeSettings::DEFAULT_COLLAPSE_EPSILON);
    if value.is_finite() && (0.0..limit).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not within 0..{limit}"))
    }
}

/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, ConfigError> {
    let config_file = load_config_with_precedence(args.config.clone())?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged);
    let config = apply_cli_overrides(
        with_env,
        CliOverrides {
            read_only: args.read_only,
            show_ids: args.show_ids,
            snap_threshold: args.snap_threshold,
            content: args.content.clone(),
        },
    );
    config.validate()?;
    Ok(config)
}

/// Screen name derived from the document's file name.
fn default_screen_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("screen")
        .to_string()
}

/// Persists every committed layout to the screen document.
///
/// Failures are logged and reported through [`ChangeSink::status`]; the
/// editor keeps working on its in-memory tree.
#[derive(Debug)]
struct FileSink {
    path: PathBuf,
    name: String,
    last_saved: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl FileSink {
    fn new(path: PathBuf, name: String) -> Self {
        Self {
            path,
            name,
            last_saved: None,
            last_error: None,
        }
    }
}

impl ChangeSink for FileSink {
    fn layout_changed(&mut self, next: &LayoutNode) {
        let now = Utc::now();
        let document = ScreenDocument {
            version: DOCUMENT_VERSION,
            name: self.name.clone(),
            updated_at: Some(now),
            layout: next.clone(),
        };
        match save_document(&self.path, &document) {
            Ok(()) => {
                info!(path = ?self.path, leaves = next.count_leaves(), "Screen document saved");
                self.last_saved = Some(now);
                self.last_error = None;
            }
            Err(e) => {
                error!(path = ?self.path, error = %e, "Failed to save screen document");
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn status(&self) -> Option<String> {
        if let Some(e) = &self.last_error {
            return Some(format!("save failed: {e}"));
        }
        self.last_saved
            .map(|at| format!("saved {}", at.format("%H:%M:%S")))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(&args)?;
    Ok(())
}

/// Open the document, run the editor until quit, and log the outcome.
fn run(args: &Args) -> Result<(), AppError> {
    let config = resolve_config(args)?;

    signage_layout::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let mut ids = UuidIds;
    let fallback_name = default_screen_name(&args.layout_file);
    let document = load_document(&args.layout_file, &fallback_name, &mut ids)?;
    let loaded = document.is_some();
    let (stored_name, layout) = match document {
        Some(document) => (document.name, Some(document.layout)),
        None => (fallback_name, None),
    };
    let name = args.name.clone().unwrap_or(stored_name);

    info!(path = ?args.layout_file, name = %name, loaded, "Screen document opened");

    let sink = FileSink::new(args.layout_file.clone(), name.clone());
    let editor = LayoutEditor::new(layout, sink, Box::new(ids))
        .with_settings(config.resize_settings())
        .with_read_only(config.read_only);

    let palette = ContentPalette::new(config.content.into_iter().map(ContentRef::new).collect());
    let options = ScreenOptions::new(name, config.show_ids, palette);

    let editor = run_with_editor(editor, options)?;
    info!(revision = editor.revision(), "Editor closed");

    Ok(())
}
