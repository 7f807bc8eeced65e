pub mod ev;
pub mod ice;
pub mod series;
pub mod traits;
