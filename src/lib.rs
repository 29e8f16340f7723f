//! Sail and boat physics for interactive scenes.
//!
//! `sailsim` simulates a triangular sail as a Verlet mass-spring cloth whose
//! luff and foot are carried by a rigid-body boat floating on a parametric sea.
//!
//! # Features
//!
//! - **Verlet cloth**: damped Verlet particles, distance constraints enforced
//!   positionally or as spring forces, self-intersection repulsion
//! - **Aerodynamics**: wind pressure on every face plus a lift curve over the
//!   angle of attack
//! - **Boat**: buoyancy over a flat or wavy waterline, righting torque, keel
//! - **Obstacles**: floor, axis-aligned box and moving sphere with friction
//! - **Observable**: monitor ticks via the `StepObserver` trait
//! - **`no_std` compatible**: needs only `alloc`
//!
//! # Example
//! ```
//! use sailsim::{Simulation, SimConfig};
//!
//! let mut sim: Simulation<f32> = Simulation::new(SimConfig::new()).unwrap();
//! for _ in 0..10 {
//!     sim.step();
//! }
//! assert!(sim.cloth().positions().iter().all(|p| p.is_finite()));
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod collision;
pub mod aero;
pub mod water;
pub mod cloth;
pub mod boat;
pub mod query;
pub mod simulation;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Axis, Vec2, Vec3};
pub use particle::Particle;
pub use constraint::{DistanceConstraint, LinkKind};
pub use collision::{AxisBox, Floor, Obstacle, Sphere};
pub use water::WaterField;
pub use cloth::{ClothMesh, Face, LockedParticles};
pub use boat::{Boat, BoatStep, Hull, PoseDelta};
pub use query::{Pick, Ray};
pub use simulation::Simulation;
pub use config::{
    AttachmentPattern, BoatConfig, BuoyancyModel, ClothConfig, CollisionConfig, ConstraintMode,
    ParamEffect, ParamValue, SimConfig, WaterConfig, WindConfig,
};
pub use observer::{NoOpStepObserver, StepObserver, StepReport};
pub use error::SimError;
