//! Scene actors
//!
//! Each actor owns its physics body handle and lazily creates its drawables
//! the first time it renders into a layer.

pub mod decoration;
pub mod goo;
pub mod mouse;
pub mod planet;
pub mod water;
pub mod wheel;

pub use decoration::{Decoration, DecorationOptions, DecorationSize};
pub use goo::{GooBall, GooOptions};
pub use mouse::{CursorOptions, UserMouse};
pub use planet::{Planet, PlanetOptions};
pub use water::{PlanetWater, WaterConfig};
pub use wheel::{Wheel, WheelOptions};
