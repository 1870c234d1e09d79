//! The canonical state of every device in the house.

use serde::Serialize;

use crate::command::Primitive;
use crate::entity::{Attribute, Change, EntityRef, Outcome};
use crate::location::{AcLocation, BlindLocation, DoorLocation, LightLocation, TvLocation};
use crate::status::{StatusCategory, StatusReport};
use crate::table::LocationTable;
use crate::value::{BlindPosition, Channel, LockState, Power, Temperature, Volume};

/// State of one AC unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AcState {
    pub power: Power,
    pub temperature: Temperature,
}

/// State of the TV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TvState {
    pub power: Power,
    pub channel: Channel,
    pub volume: Volume,
}

/// State of the coffee machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoffeeMachineState {
    pub power: Power,
}

/// Snapshot of the whole house.
///
/// The topology is fixed: every table holds exactly one entry per location
/// of its device type, from construction until drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseState {
    pub lamps: LocationTable<LightLocation, Power>,
    pub ac_units: LocationTable<AcLocation, AcState>,
    pub tv: LocationTable<TvLocation, TvState>,
    pub doors: LocationTable<DoorLocation, LockState>,
    pub blinds: LocationTable<BlindLocation, BlindPosition>,
    pub coffee_machine: CoffeeMachineState,
}

impl Default for HouseState {
    fn default() -> Self {
        Self {
            lamps: LocationTable::filled(Power::Off),
            ac_units: LocationTable::from_fn(|location| AcState {
                power: Power::Off,
                temperature: match location {
                    AcLocation::Room1 => Temperature(24),
                    AcLocation::Kitchen => Temperature(25),
                },
            }),
            tv: LocationTable::filled(TvState {
                power: Power::Off,
                channel: Channel(1),
                volume: Volume(20),
            }),
            doors: LocationTable::filled(LockState::Locked),
            blinds: LocationTable::filled(BlindPosition::Closed),
            coffee_machine: CoffeeMachineState { power: Power::Off },
        }
    }
}

impl HouseState {
    /// Apply one primitive and describe what happened.
    pub fn apply(&mut self, primitive: Primitive) -> Outcome {
        match primitive {
            Primitive::LightPower { location, power } => self.set_light_power(location, power),
            Primitive::AcPower { location, power } => self.set_ac_power(location, power),
            Primitive::AcTemperature {
                location,
                temperature,
            } => self.set_ac_temperature(location, temperature),
            Primitive::TvPower { location, power } => self.set_tv_power(location, power),
            Primitive::TvChannel { location, channel } => self.set_tv_channel(location, channel),
            Primitive::TvVolume { location, volume } => self.set_tv_volume(location, volume),
            Primitive::DoorLock { location, lock } => self.set_door_lock(location, lock),
            Primitive::BlindPosition { location, position } => {
                self.set_blind_position(location, position)
            }
            Primitive::CoffeeMachinePower { power } => self.set_coffee_machine_power(power),
        }
    }

    /// Apply primitives in order and collect every change they made.
    pub fn apply_all(&mut self, steps: impl IntoIterator<Item = Primitive>) -> Vec<Change> {
        steps
            .into_iter()
            .flat_map(|step| self.apply(step).changes)
            .collect()
    }

    /// Read-only view of one category.
    #[must_use]
    pub fn status(&self, category: StatusCategory) -> StatusReport {
        match category {
            StatusCategory::All => StatusReport::All(self.clone()),
            StatusCategory::Lamps => StatusReport::Lamps(self.lamps.clone()),
            StatusCategory::AcUnits => StatusReport::AcUnits(self.ac_units.clone()),
            StatusCategory::Tv => StatusReport::Tv(self.tv.clone()),
            StatusCategory::Doors => StatusReport::Doors(self.doors.clone()),
            StatusCategory::Blinds => StatusReport::Blinds(self.blinds.clone()),
            StatusCategory::CoffeeMachine => StatusReport::CoffeeMachine(self.coffee_machine),
        }
    }

    fn set_light_power(&mut self, location: LightLocation, power: Power) -> Outcome {
        let slot = &mut self.lamps[location];
        if *slot == power {
            return Outcome::new(format!("The {location} light is already {power}."), vec![]);
        }
        let change = Change::between(EntityRef::Light(location), Attribute::Power, *slot, power);
        *slot = power;
        Outcome::new(
            format!("Successfully turned the {location} light {power}."),
            change.into_iter().collect(),
        )
    }

    fn set_ac_power(&mut self, location: AcLocation, power: Power) -> Outcome {
        let ac = &mut self.ac_units[location];
        if ac.power == power {
            return Outcome::new(format!("The AC in {location} is already {power}."), vec![]);
        }
        let change = Change::between(EntityRef::AcUnit(location), Attribute::Power, ac.power, power);
        ac.power = power;
        Outcome::new(
            format!("Successfully turned the AC in {location} {power}."),
            change.into_iter().collect(),
        )
    }

    fn set_ac_temperature(&mut self, location: AcLocation, temperature: Temperature) -> Outcome {
        let entity = EntityRef::AcUnit(location);
        let ac = &mut self.ac_units[location];
        let turned_on = ac.power == Power::Off;

        let changes: Vec<Change> = [
            Change::between(entity, Attribute::Temperature, ac.temperature, temperature),
            Change::between(entity, Attribute::Power, ac.power, Power::On),
        ]
        .into_iter()
        .flatten()
        .collect();

        ac.temperature = temperature;
        ac.power = Power::On;

        let message = if turned_on {
            format!("Successfully set the AC in {location} to {temperature} and turned it on.")
        } else if changes.is_empty() {
            format!("The AC in {location} is already set to {temperature}.")
        } else {
            format!("Successfully set the AC temperature in {location} to {temperature}.")
        };
        Outcome::new(message, changes)
    }

    fn set_tv_power(&mut self, location: TvLocation, power: Power) -> Outcome {
        let tv = &mut self.tv[location];
        if tv.power == power {
            return Outcome::new(format!("The TV in {location} is already {power}."), vec![]);
        }
        let change = Change::between(EntityRef::Tv(location), Attribute::Power, tv.power, power);
        tv.power = power;
        Outcome::new(
            format!("The TV in {location} is now turned {power}."),
            change.into_iter().collect(),
        )
    }

    fn set_tv_channel(&mut self, location: TvLocation, channel: Channel) -> Outcome {
        let entity = EntityRef::Tv(location);
        let tv = &mut self.tv[location];
        let turned_on = tv.power == Power::Off;

        let changes: Vec<Change> = [
            Change::between(entity, Attribute::Channel, tv.channel, channel),
            Change::between(entity, Attribute::Power, tv.power, Power::On),
        ]
        .into_iter()
        .flatten()
        .collect();

        tv.channel = channel;
        tv.power = Power::On;

        let message = if turned_on {
            format!("Turned on the TV in {location} and changed to channel {channel}.")
        } else if changes.is_empty() {
            format!("The TV in {location} is already on channel {channel}.")
        } else {
            format!("Changed the TV channel in {location} to channel {channel}.")
        };
        Outcome::new(message, changes)
    }

    fn set_tv_volume(&mut self, location: TvLocation, volume: Volume) -> Outcome {
        let tv = &mut self.tv[location];
        if tv.volume == volume {
            return Outcome::new(
                format!("The TV volume in {location} is already {volume}."),
                vec![],
            );
        }
        let change = Change::between(EntityRef::Tv(location), Attribute::Volume, tv.volume, volume);
        tv.volume = volume;
        Outcome::new(
            format!("Successfully set TV volume in {location} to {volume}."),
            change.into_iter().collect(),
        )
    }

    fn set_door_lock(&mut self, location: DoorLocation, lock: LockState) -> Outcome {
        let slot = &mut self.doors[location];
        if *slot == lock {
            return Outcome::new(format!("The {location} door is already {lock}."), vec![]);
        }
        let change = Change::between(EntityRef::Door(location), Attribute::Lock, *slot, lock);
        *slot = lock;
        Outcome::new(
            format!("The {location} door is now {lock}."),
            change.into_iter().collect(),
        )
    }

    fn set_blind_position(&mut self, location: BlindLocation, position: BlindPosition) -> Outcome {
        let slot = &mut self.blinds[location];
        if *slot == position {
            return Outcome::new(
                format!("The blinds in {location} are already {position}."),
                vec![],
            );
        }
        let change = Change::between(
            EntityRef::Blind(location),
            Attribute::Position,
            *slot,
            position,
        );
        *slot = position;
        Outcome::new(
            format!("The blinds in {location} are now {position}."),
            change.into_iter().collect(),
        )
    }

    fn set_coffee_machine_power(&mut self, power: Power) -> Outcome {
        let machine = &mut self.coffee_machine;
        if machine.power == power {
            return Outcome::new(format!("The coffee machine is already {power}."), vec![]);
        }
        let change = Change::between(
            EntityRef::CoffeeMachine,
            Attribute::Power,
            machine.power,
            power,
        );
        machine.power = power;
        let message = match power {
            Power::On => "The coffee machine has been started. Enjoy your coffee soon!",
            Power::Off => "The coffee machine has been stopped.",
        };
        Outcome::new(message, change.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;

    fn temperature(value: i64) -> Temperature {
        Temperature::new(value).unwrap()
    }

    #[test]
    fn should_start_with_documented_defaults() {
        let house = HouseState::default();
        assert!(house.lamps.values().all(|p| *p == Power::Off));
        assert_eq!(house.ac_units[AcLocation::Room1].temperature.value(), 24);
        assert_eq!(house.ac_units[AcLocation::Kitchen].temperature.value(), 25);
        assert!(house.ac_units.values().all(|ac| ac.power == Power::Off));
        let tv = house.tv[TvLocation::LivingRoom];
        assert_eq!(tv.power, Power::Off);
        assert_eq!(tv.channel.value(), 1);
        assert_eq!(tv.volume.value(), 20);
        assert!(house.doors.values().all(|d| *d == LockState::Locked));
        assert!(house.blinds.values().all(|b| *b == BlindPosition::Closed));
        assert_eq!(house.coffee_machine.power, Power::Off);
    }

    #[test]
    fn should_set_only_the_targeted_light() {
        for &location in LightLocation::ALL {
            let mut house = HouseState::default();
            let outcome = house.apply(Primitive::LightPower {
                location,
                power: Power::On,
            });

            assert_eq!(outcome.changes.len(), 1);
            for (other, power) in house.lamps.iter() {
                let expected = if other == location { Power::On } else { Power::Off };
                assert_eq!(*power, expected);
            }
        }
    }

    #[test]
    fn should_report_already_when_light_is_in_requested_state() {
        let mut house = HouseState::default();
        let outcome = house.apply(Primitive::LightPower {
            location: LightLocation::Kitchen,
            power: Power::Off,
        });
        assert!(outcome.is_noop());
        assert_eq!(outcome.message, "The kitchen light is already off.");
    }

    #[test]
    fn should_turn_ac_on_when_setting_temperature_while_off() {
        let mut house = HouseState::default();
        let outcome = house.apply(Primitive::AcTemperature {
            location: AcLocation::Room1,
            temperature: temperature(20),
        });

        let ac = house.ac_units[AcLocation::Room1];
        assert_eq!(ac.power, Power::On);
        assert_eq!(ac.temperature.value(), 20);
        assert!(outcome.message.contains("turned it on"));
        assert_eq!(outcome.changes.len(), 2);
    }

    #[test]
    fn should_not_mention_power_when_setting_temperature_while_on() {
        let mut house = HouseState::default();
        house.apply(Primitive::AcPower {
            location: AcLocation::Kitchen,
            power: Power::On,
        });
        let outcome = house.apply(Primitive::AcTemperature {
            location: AcLocation::Kitchen,
            temperature: temperature(19),
        });

        assert_eq!(
            outcome.message,
            "Successfully set the AC temperature in kitchen to 19°C."
        );
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].attribute, Attribute::Temperature);
    }

    #[test]
    fn should_report_already_when_ac_is_on_at_same_temperature() {
        let mut house = HouseState::default();
        let step = Primitive::AcTemperature {
            location: AcLocation::Room1,
            temperature: temperature(24),
        };
        house.apply(step);
        let outcome = house.apply(step);
        assert!(outcome.is_noop());
        assert_eq!(outcome.message, "The AC in room1 is already set to 24°C.");
    }

    #[test]
    fn should_turn_tv_on_when_changing_channel() {
        let mut house = HouseState::default();
        let outcome = house.apply(Primitive::TvChannel {
            location: TvLocation::LivingRoom,
            channel: Channel::new(5).unwrap(),
        });
        let tv = house.tv[TvLocation::LivingRoom];
        assert_eq!(tv.power, Power::On);
        assert_eq!(tv.channel.value(), 5);
        assert!(outcome.message.starts_with("Turned on the TV"));
    }

    #[test]
    fn should_keep_tv_power_when_changing_volume() {
        let mut house = HouseState::default();
        house.apply(Primitive::TvVolume {
            location: TvLocation::LivingRoom,
            volume: Volume::new(55).unwrap(),
        });
        let tv = house.tv[TvLocation::LivingRoom];
        assert_eq!(tv.volume.value(), 55);
        assert_eq!(tv.power, Power::Off);
    }

    #[test]
    fn should_lock_and_unlock_doors() {
        let mut house = HouseState::default();
        let outcome = house.apply(Primitive::DoorLock {
            location: DoorLocation::Back,
            lock: LockState::Unlocked,
        });
        assert_eq!(outcome.message, "The back door is now unlocked.");
        assert_eq!(house.doors[DoorLocation::Back], LockState::Unlocked);
        assert_eq!(house.doors[DoorLocation::Front], LockState::Locked);
    }

    #[test]
    fn should_open_blinds() {
        let mut house = HouseState::default();
        let outcome = house.apply(Primitive::BlindPosition {
            location: BlindLocation::Kitchen,
            position: BlindPosition::Open,
        });
        assert_eq!(outcome.message, "The blinds in kitchen are now open.");
        assert_eq!(house.blinds[BlindLocation::Kitchen], BlindPosition::Open);
    }

    #[test]
    fn should_report_already_when_coffee_machine_is_on() {
        let mut house = HouseState::default();
        let step = Primitive::CoffeeMachinePower { power: Power::On };
        let first = house.apply(step);
        let second = house.apply(step);
        assert!(!first.is_noop());
        assert!(second.is_noop());
        assert_eq!(second.message, "The coffee machine is already on.");
    }

    #[test]
    fn should_produce_same_state_when_applied_twice() {
        let steps = [
            Primitive::TvPower {
                location: TvLocation::LivingRoom,
                power: Power::On,
            },
            Primitive::BlindPosition {
                location: BlindLocation::Room1,
                position: BlindPosition::Open,
            },
            Primitive::AcPower {
                location: AcLocation::Room1,
                power: Power::On,
            },
            Primitive::TvChannel {
                location: TvLocation::LivingRoom,
                channel: Channel::new(7).unwrap(),
            },
            Primitive::TvVolume {
                location: TvLocation::LivingRoom,
                volume: Volume::new(45).unwrap(),
            },
        ];
        for step in steps {
            let mut once = HouseState::default();
            once.apply(step);
            let mut twice = once.clone();
            let second = twice.apply(step);
            assert_eq!(once, twice);
            assert!(second.is_noop());
            assert!(second.message.contains("already"));
        }
    }

    #[test]
    fn should_serialize_union_schema() {
        let json = serde_json::to_value(HouseState::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "lamps": {"kitchen": "off", "bathroom": "off", "room1": "off", "room2": "off"},
                "ac_units": {
                    "room1": {"power": "off", "temperature": 24},
                    "kitchen": {"power": "off", "temperature": 25},
                },
                "tv": {"living_room": {"power": "off", "channel": 1, "volume": 20}},
                "doors": {"front": "locked", "back": "locked"},
                "blinds": {"kitchen": "closed", "room1": "closed"},
                "coffee_machine": {"power": "off"},
            })
        );
    }
}
