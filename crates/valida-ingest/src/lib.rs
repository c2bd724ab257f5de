mod cell;
mod dataset;

pub use cell::{
    any_to_f64, any_to_string, cell_key, format_numeric, parse_cell_date, parse_date_str,
    parse_f64,
};
pub use dataset::read_dataset;
