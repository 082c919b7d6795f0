//! Struct `Sample` represents a batch sample.  
//! Each row holds the feature values followed by the label.

// Provides sample struct.
pub(crate) mod sample_struct;

// Provides a struct that reads a file.
pub(crate) mod sample_reader;


pub use sample_reader::SampleReader;
pub use sample_struct::Sample;
