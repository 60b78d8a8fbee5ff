//! Analysis module - aggregation queries and age distributions

mod aggregator;
mod distributions;

pub use aggregator::{
    country_event_heatmap, data_over_time, events_heatmap, medal_tally, men_vs_women,
    most_successful, most_successful_countrywise, overall_counts, selector_lists, weight_vs_height,
    xy_points, yearwise_medal_tally, OverallCounts, SelectorLists, OVERALL,
};
pub use distributions::{famous_sport_age_series, medal_age_series, DensityCurve};
