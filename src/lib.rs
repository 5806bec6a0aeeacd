#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Linear static analysis of pin-jointed trusses.
//!
//! A [`Truss`] is built from joints and members, each member carrying a
//! [`Material`] and a [`CrossSection`]. [`analyze`] assembles the global stiffness
//! matrix with the direct stiffness method, removes the restrained degrees of
//! freedom, solves for joint displacements and recovers member forces, support
//! reactions and factors of safety against yielding and Euler buckling.
//!
//! ```
//! use trussfos::{analyze, force, point, Axis, Support, Truss};
//!
//! let mut truss = Truss::planar();
//! let a = truss.add_supported_joint(point(0.0, 0.0, 0.0), Support::pinned());
//! let b = truss.add_supported_joint(point(4.0, 0.0, 0.0), Support::roller(Axis::Y));
//! let c = truss.add_joint(point(2.0, 1.5, 0.0));
//! truss.set_load(c, force(0.0, -10_000.0, 0.0)).unwrap();
//! for (start, end) in [(a, b), (b, c), (a, c)] {
//!     truss.add_member(start, end).unwrap();
//! }
//!
//! let result = analyze(&truss).unwrap();
//! let governing = result.governing.unwrap();
//! println!("governing FOS {:.2} ({:?})", governing.fos, governing.limit_state);
//! ```
//!
//! Every analysis is a pure function of the truss it reads, so independent
//! design variants can be analysed from several threads at once.

mod analysis;
mod assembly;
mod errors;
mod extended_float;
mod geometry;
mod goals;
mod mass;
mod material;
mod recovery;
mod reduction;
mod results;
mod safety;
mod section;
mod settings;
mod solver;
mod truss;

pub use analysis::{analyze, analyze_with};
pub use errors::{
    AnalysisError, Instability, MemberPropertyError, ModelError, SettingsError, TrussEditError,
};
pub use geometry::{force, point, Dimension, Displacement, Force, MemberGeometry, Point};
pub use goals::{DesignAssessment, DesignGoals, GoalCheck, MemberRecommendation};
pub use mass::member_mass;
pub use material::Material;
pub use results::{AnalysisResult, JointResult, MemberResult};
pub use safety::{
    buckling_fos, euler_critical_load, governing, yield_fos, GoverningFos, LimitState,
};
pub use section::{CrossSection, Shape};
pub use settings::{AnalysisSettings, STANDARD_GRAVITY};
pub use truss::{Axis, Support, Truss};
