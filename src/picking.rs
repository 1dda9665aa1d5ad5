//! Pointer picking against labels.
//!
//! A pointer position in NDC becomes a ray from the camera; the nearest label
//! it crosses is the pick. [`Picker`] keeps the hover state so a label is only
//! recoloured when the hovered label actually changes.

use glam::DVec2;

use crate::camera::Camera;
use crate::render::{CursorIcon, NodeId, RenderBackend};
use crate::scene::Scene;

/// Which label, if any, is under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(NodeId),
}

/// A picked body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub body: usize,
    pub label: NodeId,
    pub distance: f64,
}

/// Hover tracking and label picking.
#[derive(Debug, Default)]
pub struct Picker {
    state: HoverState,
}

impl Picker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    /// Nearest labelled body under `ndc`, if any.
    pub fn pick(&self, ndc: DVec2, camera: &Camera, scene: &Scene, backend: &dyn RenderBackend) -> Option<Pick> {
        let ray = camera.pick_ray(ndc);
        backend
            .intersect(&ray, scene.labels())
            .into_iter()
            .find_map(|hit| {
                scene.body_for_label(hit.node).map(|body| Pick {
                    body,
                    label: hit.node,
                    distance: hit.distance,
                })
            })
    }

    /// Update hover state for a pointer move.
    ///
    /// Entering a label makes it active and shows the pointer cursor; moving to
    /// another label swaps the highlight; leaving every label restores the base
    /// colour and the default cursor. Repeating the same move changes nothing.
    pub fn hover(
        &mut self,
        ndc: DVec2,
        camera: &Camera,
        scene: &Scene,
        backend: &mut dyn RenderBackend,
    ) -> Option<Pick> {
        let pick = self.pick(ndc, camera, scene, &*backend);
        let next = pick.map_or(HoverState::Idle, |p| HoverState::Hovering(p.label));
        if next != self.state {
            if let HoverState::Hovering(old) = self.state {
                scene.set_label_active(backend, old, false);
            }
            match next {
                HoverState::Hovering(label) => {
                    scene.set_label_active(backend, label, true);
                    backend.set_cursor(CursorIcon::Pointer);
                }
                HoverState::Idle => backend.set_cursor(CursorIcon::Default),
            }
            log::debug!("Hover {:?} -> {:?}", self.state, next);
            self.state = next;
        }
        pick
    }

    /// Drop any highlight, e.g. when the pointer leaves the window.
    pub fn clear(&mut self, scene: &Scene, backend: &mut dyn RenderBackend) {
        if let HoverState::Hovering(label) = self.state {
            scene.set_label_active(backend, label, false);
            backend.set_cursor(CursorIcon::Default);
        }
        self.state = HoverState::Idle;
    }
}
