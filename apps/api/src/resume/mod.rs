pub mod division;
pub mod handlers;
pub mod reconcile;
pub mod service;
pub mod validation;
