/// CSV export of the asset table.
pub mod export;
