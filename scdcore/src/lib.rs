// data module
pub mod data {
    pub mod peak;
    pub mod collection;
}

// algorithm module
pub mod algorithm {
    pub mod matching;
    pub mod combine;
}

// error module
pub mod error;
