pub mod formatter;

pub use formatter::{
    format_aid_estimate, format_aid_json, format_aid_tsv, format_breakdown, format_college_json,
    format_college_table, format_college_tsv, format_dollars, format_fit_score, format_money,
    format_percent, format_recommendations, format_recommendations_json, format_recommendations_tsv,
    format_scholarship_json, format_scholarship_table, format_scholarship_tsv, should_use_colors,
    truncate_name,
};
