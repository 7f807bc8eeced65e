pub mod breakeven;
pub mod cost;
