//! Transient visual feedback, such as the pulsing marker shown after a snap.
//!
//! Pulses are independent of the path store: each owns one scene primitive,
//! advances one frame per [`FeedbackAnimator::tick`], and removes its primitive
//! when its frame budget runs out or it is cancelled. Nothing here blocks
//! input handling; the host simply ticks once per rendered frame.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::math::Point3;
use crate::path::LineType;
use crate::resolver::ResolverConfig;
use crate::scene::{PrimitiveGeometry, PrimitiveHandle, PrimitiveKind, PrimitiveStyle, Scene};

slotmap::new_key_type! {
    /// Identifier of a running pulse.
    pub struct PulseId;
}

/// Pulse animation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedbackConfig {
    /// Lifetime of a pulse in frames.
    pub frames: u32,
    /// Peak radius growth, as a fraction of the marker size.
    pub amplitude: f64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            frames: 30,
            amplitude: 0.5,
        }
    }
}

#[derive(Debug)]
struct Pulse {
    handle: PrimitiveHandle,
    center: Point3,
    radius: f64,
    color: u32,
    frame: u32,
}

/// Owner of all running pulses.
#[derive(Debug, Default)]
pub struct FeedbackAnimator {
    config: FeedbackConfig,
    pulses: SlotMap<PulseId, Pulse>,
}

impl FeedbackAnimator {
    #[must_use]
    pub fn new(config: FeedbackConfig) -> Self {
        Self {
            config,
            pulses: SlotMap::with_key(),
        }
    }

    /// Number of pulses still running.
    #[must_use]
    pub fn active(&self) -> usize {
        self.pulses.len()
    }

    #[must_use]
    pub fn is_running(&self, id: PulseId) -> bool {
        self.pulses.contains_key(id)
    }

    /// Starts a pulse at `center`, sized and colored like the resolver's marker.
    pub fn pulse<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        center: Point3,
        marker: &ResolverConfig,
    ) -> PulseId {
        let handle = scene.add_primitive(
            PrimitiveKind::Marker,
            PrimitiveGeometry::Sphere {
                center,
                radius: marker.marker_size,
            },
            pulse_style(marker.marker_color, 1.0),
        );
        self.pulses.insert(Pulse {
            handle,
            center,
            radius: marker.marker_size,
            color: marker.marker_color,
            frame: 0,
        })
    }

    /// Advances every pulse by one frame and retires the expired ones.
    /// Returns the number still running.
    pub fn tick<S: Scene + ?Sized>(&mut self, scene: &mut S) -> usize {
        let frames = self.config.frames.max(1);
        let amplitude = self.config.amplitude;

        self.pulses.retain(|_, pulse| {
            pulse.frame += 1;
            if pulse.frame >= frames {
                scene.remove_primitive(pulse.handle);
                return false;
            }
            let progress = f64::from(pulse.frame) / f64::from(frames);
            let radius = pulse.radius * (1.0 + amplitude * (PI * progress).sin());
            scene.update_geometry(
                pulse.handle,
                PrimitiveGeometry::Sphere {
                    center: pulse.center,
                    radius,
                },
            );
            scene.update_style(pulse.handle, pulse_style(pulse.color, 1.0 - progress));
            true
        });

        self.pulses.len()
    }

    /// Stops one pulse early. Returns `false` if it had already finished.
    pub fn cancel<S: Scene + ?Sized>(&mut self, scene: &mut S, id: PulseId) -> bool {
        match self.pulses.remove(id) {
            Some(pulse) => {
                scene.remove_primitive(pulse.handle);
                true
            }
            None => false,
        }
    }

    /// Stops every running pulse.
    pub fn cancel_all<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        for (_, pulse) in self.pulses.drain() {
            scene.remove_primitive(pulse.handle);
        }
    }
}

fn pulse_style(color: u32, opacity: f64) -> PrimitiveStyle {
    PrimitiveStyle {
        color,
        opacity,
        line_width: 1.0,
        line_type: LineType::Solid,
    }
}
