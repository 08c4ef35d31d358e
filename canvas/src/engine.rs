use serde::Serialize;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

use crate::consts::NUDGE_STEP;
use crate::doc::{DocStore, Element, ElementId, ElementKind, GeometryPatch, StylePatch};
use crate::export;
use crate::geometry::{self, Point, clamp_position};
use crate::hit::hit_test;
use crate::input::{Gesture, HandleCorner, HitPart, Key, Mode, Tool, UiState};
use crate::persist::{self, LocalStore, PersistError, PersistedState, StateStore};
use crate::props::{self, Edit, UnknownProperty};
use crate::render::{self, LayerItem, Projection};
use crate::zorder::Direction;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from commands for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ElementCreated(Element),
    ElementUpdated { id: ElementId },
    ElementDeleted { id: ElementId },
    SelectionChanged(Option<ElementId>),
    /// A destructive command is waiting for [`EngineCore::resolve_confirmation`].
    ConfirmRequested(Confirmation),
    /// Every element was removed and id generation restarted.
    Cleared,
    RenderNeeded,
}

impl Action {
    /// Whether this action changed persisted state.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::ElementCreated(_) | Self::ElementUpdated { .. } | Self::ElementDeleted { .. } | Self::Cleared
        )
    }
}

/// A destructive command held until the user confirms it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    DeleteElement(ElementId),
    ResetPage,
}

impl Confirmation {
    /// Prompt text shown to the user.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::DeleteElement(_) => "Delete this element?",
            Self::ResetPage => "This will delete all elements and create a new page. Continue?",
        }
    }
}

/// Editor state and command handling with no browser dependencies.
///
/// [`Engine`] wraps this for the browser; tests and the CLI drive it directly.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub doc: DocStore,
    pub ui: UiState,
    pub gesture: Gesture,
    pub pending: Option<Confirmation>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Persistence ---

    /// Replace the document with a persisted record. Selection and gesture reset.
    pub fn load_state(&mut self, state: PersistedState) {
        self.doc.load(state.elements, state.element_counter);
        self.ui.selected_id = None;
        self.gesture = Gesture::Idle;
        self.pending = None;
    }

    /// Hydrate from `store`. Returns `false` when nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns the storage error, or [`PersistError::Corrupt`]; the document is left unchanged.
    pub fn hydrate(&mut self, store: &dyn StateStore) -> Result<bool, PersistError> {
        match persist::load_state(store)? {
            Some(state) => {
                debug!(elements = state.elements.len(), "hydrated editor state");
                self.load_state(state);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The persisted record for the current document.
    #[must_use]
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            elements: self.doc.elements().to_vec(),
            element_counter: self.doc.counter(),
        }
    }

    /// Write the current document to `store`.
    ///
    /// # Errors
    ///
    /// Returns the serialization or backend error.
    pub fn save(&self, store: &mut dyn StateStore) -> Result<(), PersistError> {
        persist::save_state(store, &self.snapshot())
    }

    // --- Commands ---

    /// Create an element of `kind` at the default position and select it.
    pub fn create(&mut self, kind: ElementKind) -> Vec<Action> {
        let created = self.doc.create(kind).clone();
        debug!(id = %created.id, %kind, z = created.z_index, "element created");
        self.ui.tool = Tool::Select;
        let mut actions = vec![Action::ElementCreated(created.clone())];
        actions.extend(self.select(Some(created.id)));
        if !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Select `id`, or clear the selection with `None`.
    ///
    /// Unknown ids are ignored. A selection change ends any active gesture.
    pub fn select(&mut self, id: Option<ElementId>) -> Vec<Action> {
        if let Some(ref target) = id {
            if self.doc.get(target).is_none() {
                return Vec::new();
            }
        }
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.gesture = Gesture::Idle;
        self.ui.selected_id.clone_from(&id);
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }

    /// Remove an element immediately. Unknown ids are ignored.
    pub fn delete(&mut self, id: &ElementId) -> Vec<Action> {
        if self.doc.remove(id).is_none() {
            return Vec::new();
        }
        debug!(%id, remaining = self.doc.len(), "element deleted");
        let mut actions = vec![Action::ElementDeleted { id: id.clone() }];
        if self.gesture.target() == Some(id) {
            self.gesture = Gesture::Idle;
        }
        if self.ui.selected_id.as_ref() == Some(id) {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Swap an element with its neighbour in paint order.
    pub fn move_layer(&mut self, id: &ElementId, direction: Direction) -> Vec<Action> {
        if !self.doc.move_layer(id, direction) {
            return Vec::new();
        }
        debug!(%id, ?direction, "layer moved");
        vec![Action::ElementUpdated { id: id.clone() }, Action::RenderNeeded]
    }

    /// Apply a geometry edit, keeping the element on the canvas.
    pub fn set_geometry(&mut self, id: &ElementId, patch: &GeometryPatch) -> Vec<Action> {
        if !self.doc.apply_geometry(id, patch) {
            return Vec::new();
        }
        vec![Action::ElementUpdated { id: id.clone() }, Action::RenderNeeded]
    }

    /// Apply a style edit. Text-only fields are ignored on shapes.
    pub fn set_style(&mut self, id: &ElementId, patch: &StylePatch) -> Vec<Action> {
        if patch.is_empty() || !self.doc.apply_style(id, patch) {
            return Vec::new();
        }
        vec![Action::ElementUpdated { id: id.clone() }, Action::RenderNeeded]
    }

    /// Apply one raw panel input (`name`, `raw`) to an element.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownProperty`] if `name` is not a panel property.
    pub fn edit_property(&mut self, id: &ElementId, name: &str, raw: &str) -> Result<Vec<Action>, UnknownProperty> {
        Ok(match props::edit_for(name, raw)? {
            Some(Edit::Geometry(patch)) => self.set_geometry(id, &patch),
            Some(Edit::Style(patch)) => self.set_style(id, &patch),
            None => Vec::new(),
        })
    }

    /// Drop every element and restart id generation.
    pub fn reset(&mut self) -> Vec<Action> {
        debug!(dropped = self.doc.len(), "page reset");
        self.doc.clear();
        self.ui = UiState::default();
        self.gesture = Gesture::Idle;
        self.pending = None;
        vec![Action::Cleared, Action::SelectionChanged(None), Action::RenderNeeded]
    }

    /// Set the active toolbar tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    /// Toolbar click: shape tools create their element at once and hand
    /// control back to [`Tool::Select`].
    pub fn pick_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.set_tool(tool);
        match tool.creates() {
            Some(kind) => self.create(kind),
            None => Vec::new(),
        }
    }

    // --- Confirmation ---

    /// Ask to delete the selected element. Nothing happens until confirmed.
    pub fn request_delete(&mut self) -> Vec<Action> {
        let Some(id) = self.ui.selected_id.clone() else {
            return Vec::new();
        };
        self.request(Confirmation::DeleteElement(id))
    }

    /// Ask to clear the page. Nothing happens until confirmed.
    pub fn request_reset(&mut self) -> Vec<Action> {
        self.request(Confirmation::ResetPage)
    }

    /// Perform (`accepted`) or drop the pending destructive command.
    pub fn resolve_confirmation(&mut self, accepted: bool) -> Vec<Action> {
        let Some(pending) = self.pending.take() else {
            return Vec::new();
        };
        if !accepted {
            debug!(?pending, "confirmation declined");
            return Vec::new();
        }
        match pending {
            Confirmation::DeleteElement(id) => self.delete(&id),
            Confirmation::ResetPage => self.reset(),
        }
    }

    fn request(&mut self, confirmation: Confirmation) -> Vec<Action> {
        self.pending = Some(confirmation.clone());
        vec![Action::ConfirmRequested(confirmation)]
    }

    // --- Pointer input ---

    /// Pointer pressed at `point` (canvas coordinates).
    ///
    /// Hits on an element select it and start the gesture for the part that
    /// was hit; a press on empty canvas clears the selection.
    pub fn on_pointer_down(&mut self, point: Point) -> Vec<Action> {
        match hit_test(point, &self.doc, self.ui.selected_id.as_ref()) {
            Some(hit) => self.begin_gesture(&hit.element_id, hit.part, point),
            None => self.select(None),
        }
    }

    /// Start a gesture on a known element part, for hosts that hit-test themselves.
    pub fn begin_gesture(&mut self, id: &ElementId, part: HitPart, point: Point) -> Vec<Action> {
        let Some(snapshot) = self.doc.get(id).map(Element::snapshot) else {
            return Vec::new();
        };
        let mut actions = self.select(Some(id.clone()));
        self.gesture = Gesture::begin(id.clone(), part, point, snapshot);
        debug!(%id, mode = ?self.gesture.mode(), "gesture started");
        if !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Pointer moved to `point`. Recomputes the target from its gesture snapshot.
    pub fn on_pointer_move(&mut self, point: Point) -> Vec<Action> {
        let gesture = self.gesture.clone();
        let Some(id) = gesture.target() else {
            return Vec::new();
        };
        let Some(elem) = self.doc.get_mut(id) else {
            self.gesture = Gesture::Idle;
            return Vec::new();
        };
        match &gesture {
            Gesture::Idle => return Vec::new(),
            Gesture::Dragging { origin, snapshot, .. } => {
                (elem.x, elem.y) = geometry::translate(snapshot, *origin, point);
            }
            Gesture::Resizing { origin, snapshot, .. } => {
                (elem.width, elem.height) = geometry::resize(snapshot, *origin, point);
            }
            Gesture::Rotating { origin, snapshot, .. } => {
                elem.rotation = geometry::rotate(snapshot, *origin, point);
            }
        }
        vec![Action::ElementUpdated { id: id.clone() }, Action::RenderNeeded]
    }

    /// Pointer released. Ends any gesture unconditionally.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if self.gesture.is_idle() {
            return Vec::new();
        }
        debug!(mode = ?self.gesture.mode(), "gesture committed");
        self.gesture = Gesture::Idle;
        vec![Action::RenderNeeded]
    }

    /// The window lost focus mid-gesture; commit as if the pointer was released.
    pub fn on_blur(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    // --- Keyboard ---

    /// Delete/Backspace remove the selection; arrow keys nudge it.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        let Some(id) = self.ui.selected_id.clone() else {
            return Vec::new();
        };
        if key.is_delete() {
            return self.delete(&id);
        }
        let Some((ux, uy)) = key.arrow() else {
            return Vec::new();
        };
        let Some(elem) = self.doc.get_mut(&id) else {
            return Vec::new();
        };
        (elem.x, elem.y) = clamp_position(
            elem.x + ux * NUDGE_STEP,
            elem.y + uy * NUDGE_STEP,
            elem.width,
            elem.height,
        );
        vec![Action::ElementUpdated { id }, Action::RenderNeeded]
    }

    // --- Queries ---

    /// The currently selected element id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&ElementId> {
        self.ui.selected_id.as_ref()
    }

    /// The current interaction mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.gesture.mode()
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.doc.get(id)
    }

    /// The render projection for the current frame.
    #[must_use]
    pub fn projection(&self) -> Projection<'_> {
        render::project(&self.doc, &self.ui, &self.gesture)
    }

    /// The layers panel feed, bottom first.
    #[must_use]
    pub fn layers(&self) -> Vec<LayerItem<'_>> {
        render::layers(&self.doc, &self.ui)
    }
}

/// The browser editor. Wraps `EngineCore` and persists to `localStorage`.
#[wasm_bindgen]
pub struct Engine {
    core: EngineCore,
    store: LocalStore,
}

#[wasm_bindgen]
impl Engine {
    /// Create an engine hydrated from `localStorage`.
    ///
    /// A corrupt stored record is logged and replaced by an empty page.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        let mut core = EngineCore::new();
        let store = LocalStore;
        if let Err(e) = core.hydrate(&store) {
            warn!(error = %e, "ignoring stored editor state");
        }
        Self { core, store }
    }

    // --- Commands ---

    /// Toolbar click on `"select"`, `"rectangle"`, `"circle"` or `"text"`.
    /// Returns false for unknown tools.
    pub fn pick_tool(&mut self, tool: &str) -> bool {
        let tool = match tool {
            "select" => Tool::Select,
            "rectangle" => Tool::Rectangle,
            "circle" => Tool::Circle,
            "text" => Tool::Text,
            _ => return false,
        };
        let actions = self.core.pick_tool(tool);
        self.commit(&actions);
        true
    }

    /// The active tool name.
    #[must_use]
    pub fn tool(&self) -> String {
        self.core.ui.tool.as_str().to_owned()
    }

    pub fn select(&mut self, id: Option<String>) -> bool {
        let actions = self.core.select(id.map(ElementId));
        !actions.is_empty()
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let actions = self.core.delete(&id.into());
        self.commit(&actions)
    }

    /// Returns the confirmation prompt, or `None` when nothing is selected.
    pub fn request_delete(&mut self) -> Option<String> {
        Self::prompt(&self.core.request_delete())
    }

    /// Returns the confirmation prompt.
    pub fn request_reset(&mut self) -> Option<String> {
        Self::prompt(&self.core.request_reset())
    }

    pub fn resolve_confirmation(&mut self, accepted: bool) -> bool {
        let actions = self.core.resolve_confirmation(accepted);
        if actions.contains(&Action::Cleared) {
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "failed to clear stored editor state");
            }
            return true;
        }
        self.commit(&actions)
    }

    pub fn move_layer(&mut self, id: &str, up: bool) -> bool {
        let direction = if up { Direction::Up } else { Direction::Down };
        let actions = self.core.move_layer(&id.into(), direction);
        self.commit(&actions)
    }

    /// Apply a JSON-encoded [`GeometryPatch`].
    ///
    /// # Errors
    ///
    /// Returns a JS error if `patch` is not a valid patch.
    pub fn set_geometry(&mut self, id: &str, patch: &str) -> Result<bool, JsValue> {
        let patch: GeometryPatch = serde_json::from_str(patch).map_err(js_error)?;
        let actions = self.core.set_geometry(&id.into(), &patch);
        Ok(self.commit(&actions))
    }

    /// Apply a JSON-encoded [`StylePatch`].
    ///
    /// # Errors
    ///
    /// Returns a JS error if `patch` is not a valid patch.
    pub fn set_style(&mut self, id: &str, patch: &str) -> Result<bool, JsValue> {
        let patch: StylePatch = serde_json::from_str(patch).map_err(js_error)?;
        let actions = self.core.set_style(&id.into(), &patch);
        Ok(self.commit(&actions))
    }

    /// Apply a raw panel input to the selected element.
    ///
    /// # Errors
    ///
    /// Returns a JS error for an unknown property name.
    pub fn edit_selected(&mut self, name: &str, raw: &str) -> Result<bool, JsValue> {
        let Some(id) = self.core.selection().cloned() else {
            return Ok(false);
        };
        let actions = self.core.edit_property(&id, name, raw).map_err(js_error)?;
        Ok(self.commit(&actions))
    }

    // --- Pointer / keyboard ---

    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        !self.core.on_pointer_down(Point::new(x, y)).is_empty()
    }

    /// Start a gesture on a DOM-hit element. `part` is `"body"`, `"rotate"`, or a corner (`"nw"`, `"ne"`, `"sw"`, `"se"`).
    pub fn begin_gesture(&mut self, id: &str, part: &str, x: f64, y: f64) -> bool {
        let part = match part {
            "rotate" => HitPart::RotateHandle,
            "nw" => HitPart::ResizeHandle(HandleCorner::Nw),
            "ne" => HitPart::ResizeHandle(HandleCorner::Ne),
            "sw" => HitPart::ResizeHandle(HandleCorner::Sw),
            "se" => HitPart::ResizeHandle(HandleCorner::Se),
            _ => HitPart::Body,
        };
        !self.core.begin_gesture(&id.into(), part, Point::new(x, y)).is_empty()
    }

    /// Returns whether a re-render is needed. Nothing is saved until pointer-up.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        !self.core.on_pointer_move(Point::new(x, y)).is_empty()
    }

    pub fn pointer_up(&mut self) -> bool {
        let actions = self.core.on_pointer_up();
        self.flush(!actions.is_empty())
    }

    pub fn blur(&mut self) -> bool {
        let actions = self.core.on_blur();
        self.flush(!actions.is_empty())
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        let actions = self.core.on_key_down(&Key::new(key));
        self.commit(&actions)
    }

    // --- Views ---

    /// The render projection as JSON.
    ///
    /// # Errors
    ///
    /// Returns a JS error if serialization fails.
    pub fn projection_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.core.projection()).map_err(js_error)
    }

    /// The layers panel feed as JSON.
    ///
    /// # Errors
    ///
    /// Returns a JS error if serialization fails.
    pub fn layers_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.core.layers()).map_err(js_error)
    }

    /// The `layout.json` export.
    ///
    /// # Errors
    ///
    /// Returns a JS error if serialization fails.
    pub fn export_json(&self) -> Result<String, JsValue> {
        export::layout_json(self.core.doc.elements()).map_err(js_error)
    }

    /// The `layout.html` export.
    #[must_use]
    pub fn export_html(&self) -> String {
        export::static_html(self.core.doc.elements())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// The wrapped core, for hosts embedding the engine from Rust.
    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    /// Save when `actions` changed the document. Returns whether anything happened.
    fn commit(&mut self, actions: &[Action]) -> bool {
        self.flush(actions.iter().any(Action::is_mutation));
        !actions.is_empty()
    }

    fn flush(&mut self, dirty: bool) -> bool {
        if dirty {
            if let Err(e) = self.core.save(&mut self.store) {
                warn!(error = %e, "failed to save editor state");
            }
        }
        dirty
    }

    fn prompt(actions: &[Action]) -> Option<String> {
        actions.iter().find_map(|a| match a {
            Action::ConfirmRequested(c) => Some(c.message().to_owned()),
            _ => None,
        })
    }
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}
