//! # PLand LDAPI
//!
//! A statically typed client for the PLand land-management host, spoken
//! through the host's dynamically typed remote-call surface (the
//! `PLand_LDAPI` namespace).
//!
//! ## Features
//!
//! - **Binding Registry**: every host symbol is bound once at startup into a typed `Procedure`
//! - **Expected**: success-or-failure results decoded from the host's self-describing text
//! - **Overload Dispatch**: one logical operation, several host symbols, first match wins
//! - **Events**: typed listeners exported back to the host, answered with a `Decision`
//!
//! ## Architecture Design
//!
//! The domain layer follows the **Anemic Domain Model (贫血模型)** pattern:
//! - **State**: plain data such as `LandAabb`, `LandPermTable`, `PlayerSettings`
//! - **Service**: `AabbService`, `LandRegistryService` forward to the host
//! - **Handle**: `Land` carries only an id; all land state lives in the host
//!
//! ### Example
//!
//! ```ignore
//! use pland_ldapi::{ClientConfig, LdApi, LandQuery};
//!
//! let api = LdApi::connect(host, ClientConfig::default())?;
//! for land in api.registry().get_lands(LandQuery::owner(uuid))? {
//!     println!("{}: {}", land.id(), land.name()?);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: errors, logging, macros
//! - [`bindings`]: value model, host boundary, registry, `Expected`, overloads
//! - [`land`]: land, registry and AABB facades
//! - [`events`]: listener registry and event catalogue
//! - [`config`]: client configuration

/// Core infrastructure: errors, logging and macros
pub mod core;
/// The host boundary and the binding machinery on top of it
pub mod bindings;
/// Client configuration
pub mod config;
/// Land domain facades
pub mod land;
/// Event listeners
pub mod events;
/// Client entry point
pub mod client;

#[cfg(test)]
mod test_support;

pub use bindings::{Expected, Host, IntPos, LocalHost, PlayerHandle, RemoteValue};
pub use client::{required_symbols, LdApi};
pub use config::{ClientConfig, LogLevel, LoggingConfig};
pub use core::{LdApiError, LdApiResult};
pub use events::{Decision, EventKind, LandEvent, ListenerId};
pub use land::{
    CollisionQuery, Land, LandAabb, LandAt, LandAtQuery, LandId, LandQuery, INVALID_LAND_ID,
};
