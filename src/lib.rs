pub mod repeat_analysis;
pub mod test_utils;
pub mod utils;

// Parallel processing
extern crate rayon;

// Utilities
extern crate rand;
extern crate thiserror;

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;
