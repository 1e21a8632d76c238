pub mod chat;
pub mod product_grid;
pub mod search;
