//! # homedeck-domain
//!
//! Pure domain model for the homedeck smart-home command surface.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the fixed **location sets** per device type (lights, AC units,
//!   TV, doors, blinds, coffee machine)
//! - Define **attribute values** and their validation (power, lock,
//!   position, bounded temperature/channel/volume)
//! - Define the **house state**, its defaults, and the deterministic
//!   transition applied by each **primitive** command
//! - Define **scenes** as ordered lists of primitives
//! - Define **events** recording every change
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! Locking, dispatch and event delivery live in the `app` crate.

pub mod error;
pub mod id;
pub mod time;

pub mod command;
pub mod entity;
pub mod event;
pub mod house;
pub mod location;
pub mod scene;
pub mod status;
pub mod table;
pub mod value;
