//! Device state store — the single owner of the house state.
//!
//! One mutex guards the whole [`HouseState`]. Every primitive, bulk
//! operation and scene runs inside one critical section, so calls are
//! linearizable and no half-applied scene is ever observable.

use std::sync::{Mutex, MutexGuard, PoisonError};

use homedeck_domain::command::Primitive;
use homedeck_domain::entity::Outcome;
use homedeck_domain::error::HomeError;
use homedeck_domain::house::HouseState;
use homedeck_domain::location::{
    AcLocation, BlindLocation, DoorLocation, LightLocation, Location, TvLocation,
};
use homedeck_domain::scene::{self, Scene};
use homedeck_domain::status::{StatusCategory, StatusReport};
use homedeck_domain::value::{BlindPosition, Channel, LockState, Power, Temperature, Volume};

/// Lock-guarded registry of every device.
///
/// Location arguments are plain strings, parsed against the fixed location
/// set of the targeted device type. Validation happens before the lock is
/// taken, so a rejected call never mutates anything.
#[derive(Debug, Default)]
pub struct DeviceStore {
    state: Mutex<HouseState>,
}

impl DeviceStore {
    /// Create a store holding the default house.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the whole house.
    #[must_use]
    pub fn snapshot(&self) -> HouseState {
        self.lock().clone()
    }

    /// Turn a light on or off.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownLocation`] for a location without a light.
    pub fn set_light_power(&self, location: &str, power: Power) -> Result<Outcome, HomeError> {
        let location = LightLocation::parse(location)?;
        Ok(self.apply(Primitive::LightPower { location, power }))
    }

    /// Turn an AC unit on or off.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownLocation`] for a location without an AC.
    pub fn set_ac_power(&self, location: &str, power: Power) -> Result<Outcome, HomeError> {
        let location = AcLocation::parse(location)?;
        Ok(self.apply(Primitive::AcPower { location, power }))
    }

    /// Set an AC set-point, turning the unit on if needed.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownLocation`] for a location without an AC,
    /// or [`HomeError::InvalidArgument`] when `temperature` is out of range.
    pub fn set_ac_temperature(
        &self,
        location: &str,
        temperature: i64,
    ) -> Result<Outcome, HomeError> {
        let location = AcLocation::parse(location)?;
        let temperature = Temperature::new(temperature)?;
        Ok(self.apply(Primitive::AcTemperature {
            location,
            temperature,
        }))
    }

    /// Turn the TV on or off.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownLocation`] unless `location` is the living room.
    pub fn set_tv_power(&self, location: &str, power: Power) -> Result<Outcome, HomeError> {
        let location = TvLocation::parse(location)?;
        Ok(self.apply(Primitive::TvPower { location, power }))
    }

    /// Change the TV channel, turning the TV on if needed.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownLocation`] unless `location` is the living
    /// room, or [`HomeError::InvalidArgument`] for a non-positive channel.
    pub fn set_tv_channel(&self, location: &str, channel: i64) -> Result<Outcome, HomeError> {
        let location = TvLocation::parse(location)?;
        let channel = Channel::new(channel)?;
        Ok(self.apply(Primitive::TvChannel { location, channel }))
    }

    /// Set the TV volume.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownLocation`] unless `location` is the living
    /// room, or [`HomeError::InvalidArgument`] outside 0..=100.
    pub fn set_tv_volume(&self, location: &str, volume: i64) -> Result<Outcome, HomeError> {
        let location = TvLocation::parse(location)?;
        let volume = Volume::new(volume)?;
        Ok(self.apply(Primitive::TvVolume { location, volume }))
    }

    /// Lock or unlock a door.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownLocation`] for an unknown door.
    pub fn set_door_lock(&self, location: &str, lock: LockState) -> Result<Outcome, HomeError> {
        let location = DoorLocation::parse(location)?;
        Ok(self.apply(Primitive::DoorLock { location, lock }))
    }

    /// Open or close a blind.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownLocation`] for a location without blinds.
    pub fn set_blind_position(
        &self,
        location: &str,
        position: BlindPosition,
    ) -> Result<Outcome, HomeError> {
        let location = BlindLocation::parse(location)?;
        Ok(self.apply(Primitive::BlindPosition { location, position }))
    }

    /// Start or stop the coffee machine.
    pub fn set_coffee_machine_power(&self, power: Power) -> Outcome {
        self.apply(Primitive::CoffeeMachinePower { power })
    }

    /// Snapshot of one category, `None` meaning the whole house.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownCategory`] for an unrecognised category.
    pub fn status(&self, category: Option<&str>) -> Result<StatusReport, HomeError> {
        let category = match category {
            Some(name) => name.parse()?,
            None => StatusCategory::All,
        };
        Ok(self.status_of(category))
    }

    /// Snapshot of one already-parsed category.
    #[must_use]
    pub fn status_of(&self, category: StatusCategory) -> StatusReport {
        self.lock().status(category)
    }

    /// Turn every light off.
    pub fn turn_off_all_lights(&self) -> Outcome {
        self.run(
            scene::all_lights(Power::Off),
            "All lights have been turned off.",
        )
    }

    /// Turn every light on.
    pub fn turn_on_all_lights(&self) -> Outcome {
        self.run(scene::all_lights(Power::On), "All lights have been turned on.")
    }

    /// Apply every step of `scene` as one critical section.
    #[tracing::instrument(skip(self))]
    pub fn activate_scene(&self, scene: Scene) -> Outcome {
        let outcome = self.run(scene.steps(), scene.summary());
        tracing::info!(%scene, changes = outcome.changes.len(), "scene activated");
        outcome
    }

    /// Apply one validated primitive.
    #[tracing::instrument(skip(self, primitive), fields(primitive = %primitive))]
    pub fn apply(&self, primitive: Primitive) -> Outcome {
        let outcome = self.lock().apply(primitive);
        for change in &outcome.changes {
            tracing::info!(%change, "state changed");
        }
        outcome
    }

    fn run(&self, steps: Vec<Primitive>, message: &str) -> Outcome {
        let changes = self.lock().apply_all(steps);
        for change in &changes {
            tracing::debug!(%change, "state changed");
        }
        Outcome::new(message, changes)
    }

    /// Every transition is total over plain data, so a panic in another
    /// thread cannot leave the state half-written; recover from poisoning.
    fn lock(&self) -> MutexGuard<'_, HouseState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
