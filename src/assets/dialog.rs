//! Add/edit dialog state machine.
//!
//! ```text
//! Closed --open_new--------> Open(New)
//! Closed --open_edit(asset)-> Open(Edit)
//! Open   --cancel----------> Closed
//! Open   --submitted-------> Closed
//! Open   --submit_failed---> Open (form kept, error shown)
//! ```
//!
//! Any other transition is rejected and leaves the state untouched.

use super::form::AssetFormState;
use super::types::EnergyAsset;

/// Whether the open dialog creates a new asset or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    New,
    Edit { asset_id: String },
}

/// State of the asset dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AssetDialog {
    #[default]
    Closed,
    Open {
        mode: DialogMode,
        form: AssetFormState,
        /// Last submit error, shown inline.
        error: Option<String>,
    },
}

impl AssetDialog {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Opens an empty form. Returns `false` if a dialog is already open.
    pub fn open_new(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        *self = Self::Open {
            mode: DialogMode::New,
            form: AssetFormState::empty(),
            error: None,
        };
        true
    }

    /// Opens a form pre-filled from `asset`. Returns `false` if a dialog is already open.
    pub fn open_edit(&mut self, asset: &EnergyAsset) -> bool {
        if self.is_open() {
            return false;
        }
        *self = Self::Open {
            mode: DialogMode::Edit {
                asset_id: asset.id.clone(),
            },
            form: AssetFormState::from_asset(asset),
            error: None,
        };
        true
    }

    /// Closes the dialog, discarding the form. Returns `false` if already closed.
    pub fn cancel(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        *self = Self::Closed;
        true
    }

    /// Closes the dialog after the backend acknowledged the submission.
    pub fn submitted(&mut self) -> bool {
        self.cancel()
    }

    /// Records a submit failure; the dialog stays open with its fields intact.
    pub fn submit_failed(&mut self, message: impl Into<String>) -> bool {
        match self {
            Self::Open { error, .. } => {
                *error = Some(message.into());
                true
            }
            Self::Closed => false,
        }
    }

    pub fn mode(&self) -> Option<&DialogMode> {
        match self {
            Self::Open { mode, .. } => Some(mode),
            Self::Closed => None,
        }
    }

    pub fn form(&self) -> Option<&AssetFormState> {
        match self {
            Self::Open { form, .. } => Some(form),
            Self::Closed => None,
        }
    }

    /// Mutable form access. Editing clears the previous inline error.
    pub fn form_mut(&mut self) -> Option<&mut AssetFormState> {
        match self {
            Self::Open { form, error, .. } => {
                *error = None;
                Some(form)
            }
            Self::Closed => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Open { error, .. } => error.as_deref(),
            Self::Closed => None,
        }
    }
}
