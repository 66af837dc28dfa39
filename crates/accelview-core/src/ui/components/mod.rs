pub mod chart;
pub mod counter;
pub mod text;

pub use chart::{Chart, ChartError, ChartSeries};
pub use counter::CounterButton;
pub use text::TextComponent;
