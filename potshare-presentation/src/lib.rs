#![warn(clippy::uninlined_format_args)]

pub mod currency;
pub mod render_context;
pub mod summary_presenter;
pub mod text_table;

pub use currency::CurrencyFormat;
pub use render_context::RenderContext;
pub use summary_presenter::{LedgerView, PotView, SummaryPresenter};
