pub mod candidate;
pub mod enrollment;
pub mod fee;
pub mod reference;
pub mod result;
