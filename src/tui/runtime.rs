//! Board driver and TUI application state.

use tokio::runtime::Runtime;
use tracing::warn;

use crate::assets::{EnergyAsset, Sector};
use crate::board::AssetBoard;
use crate::source::AssetSource;

/// Dialog field that receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Display name text.
    Name,
    /// Demand/supply toggle.
    Sector,
    /// Supply type selector.
    Type,
    /// Capacity text (kW).
    Capacity,
}

impl Field {
    /// Label shown next to the field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Sector => "Sector",
            Self::Type => "Type",
            Self::Capacity => "Capacity (kW)",
        }
    }
}

/// TUI application state.
///
/// Drives the async [`AssetBoard`] from the synchronous event loop by
/// blocking on a runtime it owns.
pub struct App<S> {
    runtime: Runtime,
    board: AssetBoard<S>,
    /// Index of the highlighted row in the raw table.
    pub selected: usize,
    /// Dialog field with input focus.
    pub focus: Field,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// Transient confirmation shown in the footer.
    pub notice: Option<String>,
}

impl<S: AssetSource> App<S> {
    /// Creates the app and fetches the first page.
    pub fn new(runtime: Runtime, board: AssetBoard<S>) -> Self {
        let mut app = Self {
            runtime,
            board,
            selected: 0,
            focus: Field::Name,
            quit: false,
            notice: None,
        };
        app.refresh();
        app
    }

    /// The underlying board.
    pub fn board(&self) -> &AssetBoard<S> {
        &self.board
    }

    /// Returns `true` while the add/edit dialog is open.
    pub fn dialog_open(&self) -> bool {
        self.board.dialog().is_open()
    }

    /// Asset under the table cursor.
    pub fn selected_asset(&self) -> Option<&EnergyAsset> {
        self.board.assets().get(self.selected)
    }

    /// Re-fetches the current page. Errors are surfaced by the board.
    pub fn refresh(&mut self) {
        let _ = self.runtime.block_on(self.board.refresh());
        self.clamp_selection();
    }

    /// Moves to the next page, if there is one.
    pub fn next_page(&mut self) {
        if !self.board.cached_page().has_next() {
            return;
        }
        let _ = self.runtime.block_on(self.board.next_page());
        self.selected = 0;
    }

    /// Moves to the previous page.
    pub fn prev_page(&mut self) {
        if self.board.page().skip == 0 {
            return;
        }
        let _ = self.runtime.block_on(self.board.prev_page());
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.board.assets().len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Opens the "add" dialog.
    pub fn open_new(&mut self) {
        if self.board.open_new() {
            self.focus = Field::Name;
        }
    }

    /// Opens the "edit" dialog for the selected asset.
    pub fn open_edit_selected(&mut self) {
        let Some(id) = self.selected_asset().map(|a| a.id.clone()) else {
            return;
        };
        match self.runtime.block_on(self.board.open_edit(&id)) {
            Ok(true) => self.focus = Field::Name,
            Ok(false) => {}
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    /// Deletes the selected asset.
    pub fn delete_selected(&mut self) {
        let Some(asset) = self.selected_asset() else {
            return;
        };
        let (id, name) = (asset.id.clone(), asset.name.clone());
        match self.runtime.block_on(self.board.delete(&id)) {
            Ok(()) => self.notice = Some(format!("deleted {name}")),
            Err(e) => warn!(error = %e, "delete from TUI failed"),
        }
        self.clamp_selection();
    }

    /// Fields shown for the open form, in tab order.
    pub fn visible_fields(&self) -> &'static [Field] {
        match self.board.dialog().form().map(|f| f.sector) {
            Some(Sector::Demand) => &[Field::Name, Field::Sector],
            _ => &[Field::Name, Field::Sector, Field::Type, Field::Capacity],
        }
    }

    /// Moves focus to the next visible field.
    pub fn cycle_focus(&mut self) {
        let fields = self.visible_fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + 1) % fields.len()];
    }

    /// Left/right on the focused selector. `forward` is right.
    pub fn adjust(&mut self, forward: bool) {
        let focus = self.focus;
        let Some(form) = self.board.form_mut() else {
            return;
        };
        match focus {
            Field::Sector => form.sector = form.sector.toggled(),
            Field::Type if forward => form.next_supply_type(),
            Field::Type => form.prev_supply_type(),
            Field::Name | Field::Capacity => {}
        }
    }

    /// Appends a typed character to the focused text field.
    pub fn type_char(&mut self, c: char) {
        let focus = self.focus;
        let Some(form) = self.board.form_mut() else {
            return;
        };
        match focus {
            Field::Name => form.name.push(c),
            Field::Capacity => form.capacity_kw.push(c),
            Field::Sector | Field::Type => {}
        }
    }

    /// Removes the last character of the focused text field.
    pub fn backspace(&mut self) {
        let focus = self.focus;
        let Some(form) = self.board.form_mut() else {
            return;
        };
        match focus {
            Field::Name => {
                form.name.pop();
            }
            Field::Capacity => {
                form.capacity_kw.pop();
            }
            Field::Sector | Field::Type => {}
        }
    }

    /// Submits the open form. Failures stay inline in the dialog.
    pub fn submit(&mut self) {
        if let Ok(asset) = self.runtime.block_on(self.board.submit()) {
            self.notice = Some(format!("saved {}", asset.name));
            self.clamp_selection();
        }
    }

    /// Closes the dialog without saving.
    pub fn cancel(&mut self) {
        self.board.cancel_dialog();
    }

    fn clamp_selection(&mut self) {
        let len = self.board.assets().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}
