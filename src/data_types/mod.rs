pub mod axis;
pub mod events;
pub mod plot_configs;
pub mod state;

pub use axis::*;
pub use events::*;
pub use plot_configs::*;
pub use state::*;
