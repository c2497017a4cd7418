mod margin;

pub use margin::{compute_margin, MarginBreakdown, WineMarginInput, WineMarginReport};
