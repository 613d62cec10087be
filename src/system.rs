use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::types::{DeviceClass, DeviceIndex, OriginMode, Sample};

/// Read-only boundary to the tracking subsystem.
///
/// Implemented by the OpenVR adapter in production and by [`ScriptedSystem`]
/// in tests. All methods are pure reads; nothing here mutates tracking
/// state.
pub trait TrackingSystem {
    /// Number of tracked-device slots the subsystem exposes.
    fn device_count(&self) -> u32;

    /// Classification of the device in a slot.
    fn device_class(&self, device: DeviceIndex) -> DeviceClass;

    /// Whether the device in a slot is currently connected.
    fn is_connected(&self, device: DeviceIndex) -> bool;

    /// Combined button+pose reading of one device, taken at a single
    /// instant so a press edge and its pose are logically coincident.
    ///
    /// A read the runtime refuses degrades to `Sample::default()` (invalid
    /// pose, no buttons); the caller ignores it and the user retries.
    fn sample(&self, device: DeviceIndex) -> Sample;

    /// The tracking-space reference frame, for informational display.
    fn origin_mode(&self) -> OriginMode;
}

/// One scan pass over all device slots, returning the first connected
/// controller if any.
pub fn first_connected_controller<S: TrackingSystem>(system: &S) -> Option<DeviceIndex> {
    (0..system.device_count()).map(DeviceIndex).find(|&device| {
        system.device_class(device) == DeviceClass::Controller && system.is_connected(device)
    })
}

struct ScriptedDevice {
    class: DeviceClass,
    connected: Cell<bool>,
    script: RefCell<VecDeque<Sample>>,
    /// Last sample handed out; replayed once the script runs dry.
    last: Cell<Sample>,
}

/// A [`TrackingSystem`] that plays back pre-recorded sample scripts.
///
/// Each device hands out its scripted samples in order, then keeps
/// repeating the final one, which mimics a controller whose physical state
/// simply stops changing. Connectivity is settable mid-run so tests can
/// model a controller powering on during the enumeration wait.
pub struct ScriptedSystem {
    devices: Vec<ScriptedDevice>,
    origin: OriginMode,
}

impl ScriptedSystem {
    pub fn new(origin: OriginMode) -> Self {
        ScriptedSystem {
            devices: Vec::new(),
            origin,
        }
    }

    /// Add a device slot and return its index.
    pub fn push_device(
        &mut self,
        class: DeviceClass,
        connected: bool,
        script: impl IntoIterator<Item = Sample>,
    ) -> DeviceIndex {
        self.devices.push(ScriptedDevice {
            class,
            connected: Cell::new(connected),
            script: RefCell::new(script.into_iter().collect()),
            last: Cell::new(Sample::default()),
        });
        DeviceIndex(self.devices.len() as u32 - 1)
    }

    /// Flip a device's connectivity flag.
    pub fn set_connected(&self, device: DeviceIndex, connected: bool) {
        if let Some(dev) = self.devices.get(device.0 as usize) {
            dev.connected.set(connected);
        }
    }
}

impl TrackingSystem for ScriptedSystem {
    fn device_count(&self) -> u32 {
        self.devices.len() as u32
    }

    fn device_class(&self, device: DeviceIndex) -> DeviceClass {
        self.devices
            .get(device.0 as usize)
            .map_or(DeviceClass::Invalid, |dev| dev.class)
    }

    fn is_connected(&self, device: DeviceIndex) -> bool {
        self.devices
            .get(device.0 as usize)
            .is_some_and(|dev| dev.connected.get())
    }

    fn sample(&self, device: DeviceIndex) -> Sample {
        let Some(dev) = self.devices.get(device.0 as usize) else {
            return Sample::default();
        };
        match dev.script.borrow_mut().pop_front() {
            Some(sample) => {
                dev.last.set(sample);
                sample
            }
            None => dev.last.get(),
        }
    }

    fn origin_mode(&self) -> OriginMode {
        self.origin
    }
}
