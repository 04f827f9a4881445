pub mod generate;
pub mod score;
