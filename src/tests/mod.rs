mod order_independence;
mod properties;
mod sharing;
mod stress;
