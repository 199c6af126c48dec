// src/lib.rs
pub mod service {
    pub mod registry;
    pub mod params;
    pub mod driver;
}
