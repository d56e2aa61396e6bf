pub mod bar;
pub mod instrument;
pub mod notification;
pub mod signals;

pub use bar::*;
pub use instrument::*;
pub use notification::*;
pub use signals::*;
