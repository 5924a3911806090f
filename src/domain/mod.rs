// Domain layer - Pure heat-stress models and classification logic
pub mod dashboard;
pub mod enso;
pub mod latest;
pub mod series;
pub mod severity;
pub mod site;
