pub type Distance = f64;
pub type Hours = f64;
pub type Cost = f64;
