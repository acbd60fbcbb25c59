pub mod describe;
pub mod evaluate;
