pub mod profitability;
pub mod schedule;

pub use profitability::{
    break_even_price, evaluate_channel, summarize_channels, ChannelConfig,
    ChannelPortfolioSummary, ChannelProfitabilityResult, ChannelResultEntry,
};
pub use schedule::{fee_schedule, ChannelType, FeeKind, FeeSource, FeeTerm};
