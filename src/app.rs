//! Command execution against a file-backed page.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use canvas::doc::{ElementId, GeometryPatch};
use canvas::engine::{Action, EngineCore};
use canvas::export::{self, LAYOUT_HTML_FILE, LAYOUT_JSON_FILE};
use canvas::geometry::Point;
use canvas::input::{HandleCorner, HitPart};
use canvas::persist::{PersistError, StateStore};
use canvas::props::{PROPERTY_NAMES, UnknownProperty};
use tracing::{debug, warn};

use crate::cli::{Cli, Command, ExportFormat};
use crate::store::FileStore;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Persist(#[from] PersistError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} (expected one of: {names})", names = PROPERTY_NAMES.join(", "))]
    Property(#[from] UnknownProperty),
    #[error("no element with id `{0}`")]
    UnknownElement(String),
    #[error("cancelled")]
    Declined,
}

/// An editor loaded from the state file for the duration of one command.
struct Session<'io> {
    core: EngineCore,
    store: FileStore,
    assume_yes: bool,
    input: &'io mut dyn BufRead,
    out: &'io mut dyn Write,
}

/// Run one command. `input` answers confirmation prompts; results go to `out`.
///
/// # Errors
///
/// Fails on unreadable or corrupt state (the file is left untouched), unknown
/// ids or properties, a declined confirmation, or an I/O error.
pub fn run(cli: Cli, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<(), CliError> {
    let store = FileStore::new(cli.state);
    let mut core = EngineCore::new();
    core.hydrate(&store)?;
    debug!(path = %store.path().display(), elements = core.doc.len(), "page loaded");
    let mut session = Session { core, store, assume_yes: cli.yes, input, out };

    match cli.command {
        Command::New => session.reset(),
        Command::Add { kind } => {
            let actions = session.core.create(kind.into());
            session.commit(&actions)?;
            let id = session.core.selection().map(ElementId::to_string).unwrap_or_default();
            writeln!(session.out, "{id}")?;
            Ok(())
        }
        Command::Delete { id } => session.delete(&id),
        Command::Layer { id, direction } => {
            let id = session.require(&id)?;
            let actions = session.core.move_layer(&id, direction.into());
            if actions.is_empty() {
                warn!(%id, ?direction, "already at the end of the stack");
            }
            session.commit(&actions)
        }
        Command::Set { id, property, value } => {
            let id = session.require(&id)?;
            let actions = session.core.edit_property(&id, &property, &value)?;
            if actions.is_empty() {
                warn!(%id, %property, %value, "value rejected");
            }
            session.commit(&actions)
        }
        Command::Drag { id, dx, dy } => session.gesture(&id, HitPart::Body, dx, dy),
        Command::Resize { id, dx, dy } => session.gesture(&id, HitPart::ResizeHandle(HandleCorner::Se), dx, dy),
        Command::Rotate { id, degrees } => {
            let id = session.require(&id)?;
            let current = session.core.element(&id).map_or(0.0, |e| e.rotation);
            let patch = GeometryPatch { rotation: Some(current + degrees), ..Default::default() };
            let actions = session.core.set_geometry(&id, &patch);
            session.commit(&actions)
        }
        Command::List => {
            for layer in session.core.layers() {
                writeln!(session.out, "{}\t{}", layer.z_index, layer.label)?;
            }
            Ok(())
        }
        Command::Show => {
            let json = serde_json::to_string_pretty(&session.core.projection())?;
            writeln!(session.out, "{json}")?;
            Ok(())
        }
        Command::Export { format, out } => session.export(format, out.as_deref()),
    }
}

impl Session<'_> {
    fn require(&self, id: &str) -> Result<ElementId, CliError> {
        let id = ElementId::from(id);
        match self.core.element(&id) {
            Some(_) => Ok(id),
            None => Err(CliError::UnknownElement(id.to_string())),
        }
    }

    /// Save if `actions` changed the document.
    fn commit(&mut self, actions: &[Action]) -> Result<(), CliError> {
        if actions.contains(&Action::Cleared) {
            self.store.clear()?;
        } else if actions.iter().any(Action::is_mutation) {
            self.core.save(&mut self.store)?;
        }
        Ok(())
    }

    fn confirm(&mut self, message: &str) -> Result<bool, CliError> {
        if self.assume_yes {
            return Ok(true);
        }
        eprint!("{message} [y/N] ");
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    /// Resolve the pending confirmation the last command raised.
    fn settle(&mut self, requested: &[Action]) -> Result<(), CliError> {
        let Some(message) = requested.iter().find_map(|a| match a {
            Action::ConfirmRequested(c) => Some(c.message()),
            _ => None,
        }) else {
            return Ok(());
        };
        let accepted = self.confirm(message)?;
        let actions = self.core.resolve_confirmation(accepted);
        if !accepted {
            return Err(CliError::Declined);
        }
        self.commit(&actions)
    }

    fn reset(&mut self) -> Result<(), CliError> {
        let requested = self.core.request_reset();
        self.settle(&requested)
    }

    fn delete(&mut self, id: &str) -> Result<(), CliError> {
        let id = self.require(id)?;
        self.core.select(Some(id));
        let requested = self.core.request_delete();
        self.settle(&requested)
    }

    /// Replay a pointer drag of `(dx, dy)` on `part` of an element.
    fn gesture(&mut self, id: &str, part: HitPart, dx: f64, dy: f64) -> Result<(), CliError> {
        let id = self.require(id)?;
        let mut actions = self.core.begin_gesture(&id, part, Point::new(0.0, 0.0));
        actions.extend(self.core.on_pointer_move(Point::new(dx, dy)));
        actions.extend(self.core.on_pointer_up());
        self.commit(&actions)
    }

    fn export(&mut self, format: ExportFormat, out: Option<&Path>) -> Result<(), CliError> {
        let elements = self.core.doc.elements();
        let (body, file_name) = match format {
            ExportFormat::Json => (export::layout_json(elements)?, LAYOUT_JSON_FILE),
            ExportFormat::Html => (export::static_html(elements), LAYOUT_HTML_FILE),
        };
        let Some(target) = out else {
            writeln!(self.out, "{body}")?;
            return Ok(());
        };
        let path = if target.is_dir() { target.join(file_name) } else { target.to_path_buf() };
        fs::write(&path, body)?;
        writeln!(self.out, "{}", path.display())?;
        Ok(())
    }
}
