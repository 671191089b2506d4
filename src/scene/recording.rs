use slotmap::SlotMap;
use tracing::warn;

use super::{PrimitiveGeometry, PrimitiveHandle, PrimitiveKind, PrimitiveStyle, Scene};

/// A primitive as stored by [`RecordingScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub geometry: PrimitiveGeometry,
    pub style: PrimitiveStyle,
}

/// In-memory [`Scene`] that keeps live primitives in an arena.
///
/// Useful headless and in tests: it tracks how many primitives are alive and
/// counts removals of handles that were already gone.
#[derive(Debug, Default)]
pub struct RecordingScene {
    primitives: SlotMap<PrimitiveHandle, Primitive>,
    added: usize,
    removed: usize,
    stale_requests: usize,
}

impl RecordingScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of primitives currently alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.primitives.len()
    }

    /// Live primitives of one kind.
    #[must_use]
    pub fn count_kind(&self, kind: PrimitiveKind) -> usize {
        self.primitives.values().filter(|p| p.kind == kind).count()
    }

    #[must_use]
    pub fn get(&self, handle: PrimitiveHandle) -> Option<&Primitive> {
        self.primitives.get(handle)
    }

    /// Total add requests received.
    #[must_use]
    pub fn added(&self) -> usize {
        self.added
    }

    /// Total successful removals.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Remove or update requests for handles that were not alive.
    #[must_use]
    pub fn stale_requests(&self) -> usize {
        self.stale_requests
    }
}

impl Scene for RecordingScene {
    fn add_primitive(
        &mut self,
        kind: PrimitiveKind,
        geometry: PrimitiveGeometry,
        style: PrimitiveStyle,
    ) -> PrimitiveHandle {
        self.added += 1;
        self.primitives.insert(Primitive {
            kind,
            geometry,
            style,
        })
    }

    fn remove_primitive(&mut self, handle: PrimitiveHandle) {
        if self.primitives.remove(handle).is_some() {
            self.removed += 1;
        } else {
            warn!(?handle, "remove requested for unknown primitive");
            self.stale_requests += 1;
        }
    }

    fn update_style(&mut self, handle: PrimitiveHandle, style: PrimitiveStyle) {
        match self.primitives.get_mut(handle) {
            Some(p) => p.style = style,
            None => {
                warn!(?handle, "style update requested for unknown primitive");
                self.stale_requests += 1;
            }
        }
    }

    fn update_geometry(&mut self, handle: PrimitiveHandle, geometry: PrimitiveGeometry) {
        match self.primitives.get_mut(handle) {
            Some(p) => p.geometry = geometry,
            None => {
                warn!(?handle, "geometry update requested for unknown primitive");
                self.stale_requests += 1;
            }
        }
    }
}
