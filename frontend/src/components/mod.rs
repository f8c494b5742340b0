pub mod chart_renderer;
pub mod data_table;
pub mod footer;
pub mod glass_card;
pub mod header;
pub mod kpi_card;
pub mod live_indicator;
pub mod status;
pub mod tabs;

pub use chart_renderer::{Chart, ChartSize};
pub use data_table::{Column, DataTable};
pub use glass_card::GlassCard;
pub use kpi_card::{KpiCard, KpiGrid};
pub use status::{phase_view, EmptyState, ErrorBanner, LoadingState};
pub use tabs::Tabs;
