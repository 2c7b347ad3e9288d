pub mod joint;
pub mod pose;
