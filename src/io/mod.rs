/// CSV export of daily averages.
pub mod export;
