pub mod analysis;
pub mod anomaly;
pub mod bar;
pub mod external;
pub mod indicators;
pub mod risk;
pub mod signals;

pub use analysis::*;
pub use anomaly::*;
pub use bar::*;
pub use external::*;
pub use indicators::*;
pub use risk::*;
pub use signals::*;
