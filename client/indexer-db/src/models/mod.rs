pub mod account;
pub mod block;
pub mod event;
pub mod extrinsic;
pub mod log;
pub mod runtime;

pub use account::*;
pub use block::*;
pub use event::*;
pub use extrinsic::*;
pub use log::*;
pub use runtime::*;
