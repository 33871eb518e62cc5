//! Interactive placement controller
//!
//! Turns pointer input over the preview into position updates for the
//! configuration model.
//!
//! ```text
//! Idle -> Dragging(target)   (press over a draggable element)
//! Dragging -> Dragging       (move: emits one clamped position update)
//! Any -> Idle                (release or pointer leaving the surface)
//! ```
//!
//! Every move is independent: the update depends only on the pointer
//! coordinate and the preview rectangle, so the last move wins.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{JerseyConfig, JerseyUpdate, Position, TextField};

/// Element a drag gesture moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragTarget {
    Logo,
    Name,
    Number,
    TeamName,
    FrontText,
}

impl DragTarget {
    /// Text element owned by this target, `None` for the logo
    pub fn text_field(&self) -> Option<TextField> {
        match self {
            DragTarget::Logo => None,
            DragTarget::Name => Some(TextField::Name),
            DragTarget::Number => Some(TextField::Number),
            DragTarget::TeamName => Some(TextField::TeamName),
            DragTarget::FrontText => Some(TextField::FrontText),
        }
    }

    /// Build the configuration update that moves this target
    pub fn update(&self, position: Position) -> JerseyUpdate {
        match self.text_field() {
            Some(field) => JerseyUpdate::text_position(field, position),
            None => JerseyUpdate::logo_position(position),
        }
    }
}

/// Current drag state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragTarget),
}

/// Bounding box of the preview surface in client pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PreviewRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        PreviewRect { left, top, width, height }
    }

    /// Pointer position in clamped percentage space. `None` when the
    /// rectangle has no usable area.
    pub fn to_percent(&self, client_x: f64, client_y: f64) -> Option<Position> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(self.width) || !usable(self.height) {
            return None;
        }

        let x = (client_x - self.left) / self.width * 100.0;
        let y = (client_y - self.top) / self.height * 100.0;
        Some(Position::new(x, y))
    }
}

/// Drag state machine for one preview
#[derive(Debug, Clone, Default)]
pub struct PlacementController {
    state: DragState,
    preview_only: bool,
}

impl PlacementController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller for a read-only preview (e.g. another player's jersey)
    pub fn read_only() -> Self {
        PlacementController {
            state: DragState::Idle,
            preview_only: true,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn is_preview_only(&self) -> bool {
        self.preview_only
    }

    /// Switching to read-only ends any drag in progress
    pub fn set_preview_only(&mut self, preview_only: bool) {
        self.preview_only = preview_only;
        if preview_only {
            self.state = DragState::Idle;
        }
    }

    /// Press over a draggable element. Ignored in read-only mode.
    pub fn press(&mut self, target: DragTarget) -> bool {
        if self.preview_only {
            return false;
        }
        debug!(target = ?target, "Drag started");
        self.state = DragState::Dragging(target);
        true
    }

    /// Pointer moved. Emits an update only while dragging.
    pub fn pointer_move(&self, rect: &PreviewRect, client_x: f64, client_y: f64) -> Option<JerseyUpdate> {
        let DragState::Dragging(target) = self.state else {
            return None;
        };
        let position = rect.to_percent(client_x, client_y)?;
        Some(target.update(position))
    }

    /// Move and fold the resulting update into `model`
    pub fn apply_move(&self, model: &JerseyConfig, rect: &PreviewRect, client_x: f64, client_y: f64) -> JerseyConfig {
        match self.pointer_move(rect, client_x, client_y) {
            Some(update) => model.apply(&update),
            None => model.clone(),
        }
    }

    pub fn release(&mut self) {
        if let DragState::Dragging(target) = self.state {
            debug!(target = ?target, "Drag finished");
        }
        self.state = DragState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{default_configuration, SAFE_MAX, SAFE_MIN};

    fn rect() -> PreviewRect {
        PreviewRect::new(100.0, 50.0, 320.0, 420.0)
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let controller = PlacementController::new();
        assert!(controller.pointer_move(&rect(), 200.0, 200.0).is_none());
    }

    #[test]
    fn test_logo_drag_updates_logo_position() {
        let mut controller = PlacementController::new();
        assert!(controller.press(DragTarget::Logo));

        let model = default_configuration("builder-crew-classic");
        // quarter across, half down
        let next = controller.apply_move(&model, &rect(), 180.0, 260.0);
        assert_eq!(next.logo_position, Position { x: 25.0, y: 50.0 });
        assert_eq!(next.name, model.name);
    }

    #[test]
    fn test_far_outside_coordinates_stay_clamped() {
        let mut controller = PlacementController::new();
        let mut model = default_configuration("builder-crew-classic");

        for target in [DragTarget::Logo, DragTarget::FrontText, DragTarget::Number] {
            controller.press(target);
            for (x, y) in [(-1.0e6, -1.0e6), (1.0e6, 1.0e6), (f64::MAX, -f64::MAX), (-50.0, 9000.0)] {
                model = controller.apply_move(&model, &rect(), x, y);
                assert!(model.logo_position.is_within_safe_region());
                assert!(model.front_text.position.is_within_safe_region());
                assert!(model.number.position.is_within_safe_region());
            }
            controller.release();
        }
        assert_eq!(model.logo_position.x, SAFE_MIN);
        assert_eq!(model.front_text.position.y, SAFE_MAX);
    }

    #[test]
    fn test_vertical_only_target_keeps_center() {
        let mut controller = PlacementController::new();
        controller.press(DragTarget::Name);
        let update = controller.pointer_move(&rect(), 110.0, 300.0).unwrap();
        let position = update.name.and_then(|t| t.position).unwrap();

        let model = default_configuration("builder-crew-classic").apply(&JerseyUpdate::text_position(TextField::Name, position));
        assert_eq!(model.name.position.x, 50.0);
    }

    #[test]
    fn test_release_and_leave_return_to_idle() {
        let mut controller = PlacementController::new();
        controller.press(DragTarget::TeamName);
        assert_eq!(controller.state(), DragState::Dragging(DragTarget::TeamName));

        controller.release();
        assert_eq!(controller.state(), DragState::Idle);
        assert!(controller.pointer_move(&rect(), 200.0, 200.0).is_none());

        controller.press(DragTarget::Logo);
        controller.pointer_leave();
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_preview_only_ignores_presses() {
        let mut controller = PlacementController::read_only();
        assert!(!controller.press(DragTarget::Logo));
        assert_eq!(controller.state(), DragState::Idle);

        let mut editable = PlacementController::new();
        editable.press(DragTarget::Logo);
        editable.set_preview_only(true);
        assert!(!editable.is_dragging());
    }

    #[test]
    fn test_degenerate_rect_emits_nothing() {
        let mut controller = PlacementController::new();
        controller.press(DragTarget::Logo);
        let empty = PreviewRect::new(0.0, 0.0, 0.0, 420.0);
        assert!(controller.pointer_move(&empty, 10.0, 10.0).is_none());
        let nan = PreviewRect::new(0.0, 0.0, f64::NAN, 420.0);
        assert!(controller.pointer_move(&nan, 10.0, 10.0).is_none());
    }
}
