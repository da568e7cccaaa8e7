pub mod formatter;

pub use formatter::{
    format_breakdown, format_commute_detail, format_estimate, format_listing_detail,
    format_ranked_table, format_rent, format_score, format_unit_types, should_use_colors,
};
