mod shape;
mod circle;
mod edge;
mod polygon;
mod chain;

pub use self::shape::{MassData, Shape, ShapeKind, ShapeType};
pub use self::circle::CircleShape;
pub use self::edge::EdgeShape;
pub use self::polygon::PolygonShape;
pub use self::chain::ChainShape;
