//! Row-major 4x4 transform math for 3D pipelines.
//!
//! This crate provides the matrix layer of a rendering pipeline: world,
//! view and projection transforms, plus the small vector types they
//! operate on. Everything is single-precision.
//!
//! # Conventions
//!
//! - Matrices are **row-major**; translation lives in the last row
//! - Vectors are **row vectors**, transformed as `v' = v * M`
//! - `a * b` applies `b` first, then `a`
//! - Projections map depth to [0, 1] (DirectX-style), with left- and
//!   right-handed variants of each builder
//!
//! # Quick Start
//!
//! ```ignore
//! use rowmath::prelude::*;
//!
//! let mut world = Mat4::identity();
//! world
//!     .set_rotation_radians(Vec3::new(0.0, angle, 0.0))
//!     .set_translation(Vec3::new(0.0, 0.0, 10.0));
//!
//! let view = Mat4::look_at_lh(eye, target, Vec3::Y);
//! let proj = Mat4::perspective_fov_lh(fov, aspect, 0.1, 1000.0);
//!
//! let clip = proj * view * world;
//! let p = clip.transform_vect4(vertex).to_vec3_perspective();
//! ```

pub mod float;
pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;

// Re-export the core types at crate root for convenience
pub use mat4::Mat4;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use rowmath::prelude::*;
/// ```
pub mod prelude {
    pub use crate::mat4::Mat4;
    pub use crate::vec2::Vec2;
    pub use crate::vec3::Vec3;
    pub use crate::vec4::Vec4;
}
