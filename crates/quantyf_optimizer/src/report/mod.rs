pub mod kpi;
pub mod roi;
