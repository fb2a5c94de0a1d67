/// Decoding of every supported encoding class.
pub mod decode;
