pub mod amortize;
pub mod assess;
pub mod regions;
