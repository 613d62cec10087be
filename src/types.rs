use std::fmt;

bitflags::bitflags! {
    /// Pressed-button bitmap of a tracked controller.
    ///
    /// Bit positions match SteamVR's `ButtonMaskFromId(k_EButton_*)`, so the
    /// runtime's raw `u64` mask converts with `from_bits_truncate` and every
    /// button the workflow doesn't care about falls away.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Buttons: u64 {
        const MENU    = 1 << 1;
        const GRIP    = 1 << 2;
        const TRIGGER = 1 << 33;
    }
}

/// The buttons the calibration workflow reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Records a corner point (and selects the controller initially).
    Trigger,
    /// Finishes the session.
    Menu,
    /// Discards every recorded point and starts over.
    Grip,
}

impl Button {
    /// Bit mask for this button in a [`Buttons`] bitmap.
    pub const fn mask(self) -> Buttons {
        match self {
            Button::Trigger => Buttons::TRIGGER,
            Button::Menu => Buttons::MENU,
            Button::Grip => Buttons::GRIP,
        }
    }
}

/// Tracked-device slot handle, immutable once a controller is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceIndex(pub u32);

impl fmt::Display for DeviceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a tracked-device slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// Empty or unusable slot.
    Invalid,
    Hmd,
    Controller,
    GenericTracker,
    TrackingReference,
    Other,
}

/// Tracking-space reference frame, read once at startup for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginMode {
    Seated,
    Standing,
    Uncalibrated,
}

impl fmt::Display for OriginMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OriginMode::Seated => "seated",
            OriginMode::Standing => "standing",
            OriginMode::Uncalibrated => "uncalibrated",
        };
        f.write_str(name)
    }
}

/// Quality classification of a single pose read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseQuality {
    /// The runtime reports no usable pose at all.
    Invalid,
    /// A pose exists but tracking is not running cleanly.
    Degraded,
    Valid,
}

/// One point-in-time reading of a tracked device: pressed buttons plus the
/// simultaneous pose. Produced every tick, never retained.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub buttons: Buttons,
    pub pose_valid: bool,
    /// Tracking result is "running OK" (not calibrating or out of range).
    pub tracking_ok: bool,
    /// Device-to-tracking-space translation in meters [x, y, z].
    pub position: [f32; 3],
}

impl Sample {
    /// Classify this sample's pose for capture validation.
    pub fn pose_quality(&self) -> PoseQuality {
        if !self.pose_valid {
            PoseQuality::Invalid
        } else if !self.tracking_ok {
            PoseQuality::Degraded
        } else {
            PoseQuality::Valid
        }
    }
}

impl Default for Sample {
    /// A no-buttons, invalid-pose sample — what a refused runtime read
    /// degrades to.
    fn default() -> Self {
        Sample {
            buttons: Buttons::empty(),
            pose_valid: false,
            tracking_ok: false,
            position: [0.0; 3],
        }
    }
}

/// A recorded play-space corner, projected onto the floor plane.
///
/// The height axis is dropped at capture time; insertion order defines the
/// boundary polygon (point i connects to point i+1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPoint {
    pub x: f32,
    pub z: f32,
}

impl BoundaryPoint {
    /// Project a 3-D tracking-space position onto the floor.
    pub fn from_position(position: [f32; 3]) -> Self {
        BoundaryPoint {
            x: position[0],
            z: position[2],
        }
    }
}

/// One vertical boundary wall, derived from a consecutive point pair.
///
/// Output-only: built when the session finishes, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    /// Four corners in the fixed chaperone_info order:
    /// floor/prev.z, ceiling/prev.z, floor/curr.z, ceiling/curr.z.
    pub vertices: [[f32; 3]; 4],
}
