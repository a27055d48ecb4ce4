pub mod compare;
pub mod mexc;
pub mod symbol;
pub mod types;
