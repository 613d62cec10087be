//! OpenVR runtime adapter. Everything above this module is runtime-agnostic;
//! this is the only place that talks to the actual SteamVR installation.

use crate::types::{Buttons, DeviceClass, DeviceIndex, OriginMode, Sample};
use crate::{ChaperoneError, Result, TrackingSystem};

/// An open connection to the OpenVR runtime.
///
/// Owns the runtime context for the lifetime of the calibration run and
/// shuts it down again on drop, on every exit path.
pub struct OpenVrSystem {
    context: openvr::Context,
    system: openvr::System,
    universe: openvr::TrackingUniverseOrigin,
    origin: OriginMode,
}

impl OpenVrSystem {
    /// Initialize the runtime and check compositor availability.
    ///
    /// Both failures are fatal before the calibration workflow starts;
    /// nothing downstream ever sees a half-connected runtime.
    pub fn connect() -> Result<OpenVrSystem> {
        let context = unsafe { openvr::init(openvr::ApplicationType::Other) }
            .map_err(|e| ChaperoneError::RuntimeInit(e.to_string()))?;

        let system = context
            .system()
            .map_err(|e| ChaperoneError::RuntimeInit(e.to_string()))?;

        let compositor = context
            .compositor()
            .map_err(|e| ChaperoneError::CompositorUnavailable(e.to_string()))?;

        // Read the tracking space once; poses are sampled relative to it
        // for the whole run.
        let universe = compositor.tracking_space();
        let origin = match universe {
            openvr::TrackingUniverseOrigin::Seated => OriginMode::Seated,
            openvr::TrackingUniverseOrigin::Standing => OriginMode::Standing,
            openvr::TrackingUniverseOrigin::RawAndUncalibrated => OriginMode::Uncalibrated,
        };

        log::info!("Connected to OpenVR, {} tracking space", origin);

        Ok(OpenVrSystem {
            context,
            system,
            universe,
            origin,
        })
    }
}

impl TrackingSystem for OpenVrSystem {
    fn device_count(&self) -> u32 {
        openvr::MAX_TRACKED_DEVICE_COUNT as u32
    }

    fn device_class(&self, device: DeviceIndex) -> DeviceClass {
        match self.system.tracked_device_class(device.0) {
            openvr::TrackedDeviceClass::Invalid => DeviceClass::Invalid,
            openvr::TrackedDeviceClass::HMD => DeviceClass::Hmd,
            openvr::TrackedDeviceClass::Controller => DeviceClass::Controller,
            openvr::TrackedDeviceClass::GenericTracker => DeviceClass::GenericTracker,
            openvr::TrackedDeviceClass::TrackingReference => DeviceClass::TrackingReference,
            _ => DeviceClass::Other,
        }
    }

    fn is_connected(&self, device: DeviceIndex) -> bool {
        self.system.is_tracked_device_connected(device.0)
    }

    fn sample(&self, device: DeviceIndex) -> Sample {
        match self
            .system
            .controller_state_with_pose(self.universe, device.0)
        {
            Some((state, pose)) => {
                // Translation is the last column of the 3x4
                // device-to-absolute-tracking matrix.
                let m = pose.device_to_absolute_tracking();
                Sample {
                    buttons: Buttons::from_bits_truncate(state.button_pressed),
                    pose_valid: pose.pose_is_valid(),
                    tracking_ok: pose.tracking_result() == openvr::TrackingResult::RunningOK,
                    position: [m[0][3], m[1][3], m[2][3]],
                }
            }
            None => Sample::default(),
        }
    }

    fn origin_mode(&self) -> OriginMode {
        self.origin
    }
}

impl Drop for OpenVrSystem {
    fn drop(&mut self) {
        // Invalidates the interface handles; nothing uses them past this.
        unsafe { self.context.shutdown() }
    }
}
