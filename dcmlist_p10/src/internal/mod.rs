pub mod byte_cursor;
pub mod data_element_header;
pub mod nesting;
