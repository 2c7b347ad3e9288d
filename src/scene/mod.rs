pub mod background;
pub mod compositor;
pub mod display;
pub mod figure;
pub mod layout;
pub mod primitives;
