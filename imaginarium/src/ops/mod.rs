mod blend;
pub mod mask;
mod transform;

pub use blend::{Blend, BlendMode};
pub use transform::{Affine2, FilterMode, Transform, Vec2, resize};
