//! Input Mapper
//!
//! Raw key, mouse and wheel events become `Intent`s on a bounded queue.
//! Nothing here touches the camera or draws; the viewer drains the queue
//! once at the start of every tick.

mod gesture;
mod intent;
mod mapper;

pub use gesture::*;
pub use intent::*;
pub use mapper::*;
