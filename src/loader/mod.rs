pub mod dax_parser;
pub mod parser;
