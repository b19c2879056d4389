//! Engine components
//!
//! Value components (position, size, opacity and so on) mark themselves dirty
//! and fire an `updated` signal on every change; on DOM layers their render
//! hook turns dirty values into queued CSS updates.

pub mod alpha;
pub mod bounds;
pub mod color;
pub mod factory;
pub mod input;
pub mod position;
pub mod rotation;
pub mod scale;
pub mod size;
pub mod texture;
pub mod visible;

pub use alpha::{Alpha, AlphaChange};
pub use bounds::{hitbox_of, Bounds};
pub use color::{Color, ColorChange, ColorError};
pub use factory::SpriteFactory;
pub use input::{Input, PointerState};
pub use position::{Position, PositionChange};
pub use rotation::{Rotation, RotationChange};
pub use scale::{Scale, ScaleChange};
pub use size::{Size, SizeChange};
pub use texture::{Texture, TextureChange, TextureInfo};
pub use visible::{Visible, VisibleChange};
