pub mod backdrop;
pub mod png_io;

pub use backdrop::compose;
pub use png_io::{decode_png, decode_png_file, encode_rgb_png, write_png_file};
