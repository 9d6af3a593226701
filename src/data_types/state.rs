use crate::data_types::Dataset;

/// Which series the detail view stacks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    All,
    Only(String),
}

impl SelectionState {
    /// Clicking the isolated key restores `All`; any other key isolates it.
    pub fn toggle(&mut self, key: &str) {
        *self = match self {
            Self::Only(current) if current == key => Self::All,
            _ => Self::Only(key.to_string()),
        };
    }

    pub fn active_keys(&self, dataset: &Dataset) -> Vec<String> {
        match self {
            Self::All => dataset.keys().to_vec(),
            Self::Only(key) => vec![key.clone()],
        }
    }

    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(key) => Some(key),
        }
    }
}

/// Brush gesture state, in plot pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BrushState {
    #[default]
    Idle,
    /// Drawing a new selection from `anchor`.
    Selecting { anchor: f32 },
    /// Dragging an existing selection of fixed `width`.
    Moving { grab_offset: f32, width: f32 },
}

impl BrushState {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Drag-to-pan bookkeeping for the detail view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanDrag {
    pub press_x: f32,
    pub press_y: f32,
    pub last_x: f32,
    pub last_y: f32,
    /// Set once the pointer has moved far enough to count as a pan.
    pub panning: bool,
}
