//! Aggregation Queries Module
//! Pure queries over the prepared table: tallies, time series, rankings and
//! cross-tabulations. Every function reads (table, filters) and returns a
//! derived frame; an unknown filter value produces an empty frame.

use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Sentinel entry heading every selector list; the UI maps it to `None`.
pub const OVERALL: &str = "Overall";

/// Dedup key for medal arithmetic: one squad winning one medal in one event
/// counts once, no matter how many athletes stood on the podium.
const TEAM_MEDAL_KEY: [&str; 8] = [
    "Team", "NOC", "Games", "Year", "City", "Sport", "Event", "Medal",
];

/// Selector lists for the UI combo boxes, each headed by [`OVERALL`].
#[derive(Debug, Clone, Default)]
pub struct SelectorLists {
    pub years: Vec<String>,
    pub countries: Vec<String>,
    pub sports: Vec<String>,
}

/// Distinct-value counts behind the Top Statistics panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverallCounts {
    pub editions: usize,
    pub cities: usize,
    pub sports: usize,
    pub events: usize,
    pub athletes: usize,
    pub nations: usize,
}

/// Keep-first mask over the given key columns. Null cells participate in the
/// key (two nulls compare equal), matching how the source material collapses
/// duplicate rows.
fn first_occurrence_mask(df: &DataFrame, subset: &[&str]) -> PolarsResult<BooleanChunked> {
    let columns: Vec<&Column> = subset
        .iter()
        .map(|name| df.column(name))
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut seen: HashSet<String> = HashSet::with_capacity(df.height());
    let mut keep = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        let mut key = String::new();
        for column in &columns {
            let value = column.get(i)?;
            if matches!(value, AnyValue::Null) {
                key.push('\u{0}');
            } else {
                key.push_str(&value.to_string());
            }
            key.push('\u{1f}');
        }
        keep.push(seen.insert(key));
    }

    Ok(BooleanChunked::from_slice("keep".into(), &keep))
}

/// One row per (team, edition, event, medal), see [`TEAM_MEDAL_KEY`].
fn drop_team_duplicates(df: &DataFrame) -> PolarsResult<DataFrame> {
    df.filter(&first_occurrence_mask(df, &TEAM_MEDAL_KEY)?)
}

/// One row per athlete: first appearance wins.
pub fn unique_athletes(df: &DataFrame) -> PolarsResult<DataFrame> {
    df.filter(&first_occurrence_mask(df, &["Name", "region"])?)
}

/// The combo-box lists: edition years (descending), regions and sports
/// (ascending, nulls excluded), each prefixed with the "Overall" sentinel.
pub fn selector_lists(df: &DataFrame) -> PolarsResult<SelectorLists> {
    let years_ca = df.column("Year")?.i32()?;
    let distinct_years: BTreeSet<i32> = years_ca.into_iter().flatten().collect();
    let mut years = vec![OVERALL.to_string()];
    years.extend(distinct_years.into_iter().rev().map(|y| y.to_string()));

    Ok(SelectorLists {
        years,
        countries: string_selector(df, "region")?,
        sports: string_selector(df, "Sport")?,
    })
}

fn string_selector(df: &DataFrame, column: &str) -> PolarsResult<Vec<String>> {
    let ca = df.column(column)?.str()?;
    let distinct: BTreeSet<&str> = ca.into_iter().flatten().collect();
    let mut list = vec![OVERALL.to_string()];
    list.extend(distinct.into_iter().map(|s| s.to_string()));
    Ok(list)
}

/// Medal tally, optionally filtered by edition year and/or region
/// (`None` = no filter on that axis).
///
/// Grouped per region and ranked by (Gold, Silver, Bronze) descending,
/// except when one country is viewed across all editions, which reads better
/// as a per-year progression sorted by year. A `Total` column is always
/// appended.
pub fn medal_tally(
    df: &DataFrame,
    year: Option<i32>,
    country: Option<&str>,
) -> PolarsResult<DataFrame> {
    let deduped = drop_team_duplicates(df)?;

    let per_year = country.is_some() && year.is_none();
    let mut lf = deduped.lazy();
    if let Some(y) = year {
        lf = lf.filter(col("Year").eq(lit(y)));
    }
    match country {
        Some(c) => lf = lf.filter(col("region").eq(lit(c))),
        // Rows with an unmapped NOC have no region to credit the medals to.
        None if !per_year => lf = lf.filter(col("region").is_not_null()),
        None => {}
    }
    let group_key = if per_year { "Year" } else { "region" };

    let tally = lf
        .group_by_stable([col(group_key)])
        .agg([col("Gold").sum(), col("Silver").sum(), col("Bronze").sum()])
        .with_column((col("Gold") + col("Silver") + col("Bronze")).alias("Total"))
        .collect()?;

    if per_year {
        tally.sort(["Year"], SortMultipleOptions::default())
    } else {
        tally.sort(
            ["Gold", "Silver", "Bronze"],
            SortMultipleOptions::default()
                .with_order_descending_multi(vec![true, true, true])
                .with_maintain_order(true),
        )
    }
}

/// Distinct values of `column` seen per edition, ascending by year.
/// A null counts as one distinct value, so e.g. nations-over-time includes
/// the unmapped-NOC bucket exactly like the source material does.
pub fn data_over_time(df: &DataFrame, column: &str) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .group_by([col("Year")])
        .agg([col(column).n_unique().alias("Count")])
        .select([col("Year").alias("Edition"), col("Count")])
        .sort(["Edition"], SortMultipleOptions::default())
        .collect()
}

/// Top 15 athletes by medal count, optionally restricted to one sport.
/// Returns {Name, Medals, Sport, region}.
pub fn most_successful(df: &DataFrame, sport: Option<&str>) -> PolarsResult<DataFrame> {
    let mut lf = df.clone().lazy().filter(col("Medal").is_not_null());
    if let Some(s) = sport {
        lf = lf.filter(col("Sport").eq(lit(s)));
    }
    let medal_rows = lf.collect()?;
    ranked_athletes(&medal_rows, df, 15, true)
}

/// Top 10 athletes of one region by medal count. Returns {Name, Medals, Sport}.
pub fn most_successful_countrywise(df: &DataFrame, country: &str) -> PolarsResult<DataFrame> {
    let medal_rows = df
        .clone()
        .lazy()
        .filter(col("Medal").is_not_null().and(col("region").eq(lit(country))))
        .collect()?;
    ranked_athletes(&medal_rows, df, 10, false)
}

/// Count medal rows per athlete, rank descending with first-seen order
/// breaking ties, cut to `limit`, then look up each athlete's sport (and
/// region) from their first row in the full table.
fn ranked_athletes(
    medal_rows: &DataFrame,
    lookup: &DataFrame,
    limit: usize,
    with_region: bool,
) -> PolarsResult<DataFrame> {
    let names = medal_rows.column("Name")?.str()?;

    let mut counts: HashMap<&str, u32> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for name in names.into_iter().flatten() {
        let slot = counts.entry(name).or_insert(0);
        if *slot == 0 {
            order.push(name);
        }
        *slot += 1;
    }

    let mut ranked: Vec<(&str, u32)> = order.iter().map(|&name| (name, counts[name])).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1)); // stable: ties keep first-seen order
    ranked.truncate(limit);

    let lookup_names = lookup.column("Name")?.str()?;
    let lookup_sports = lookup.column("Sport")?.str()?;
    let lookup_regions = lookup.column("region")?.str()?;
    let mut first_row: HashMap<&str, usize> = HashMap::with_capacity(counts.len());
    for i in 0..lookup.height() {
        if let Some(name) = lookup_names.get(i) {
            first_row.entry(name).or_insert(i);
        }
    }

    let mut out_names: Vec<&str> = Vec::with_capacity(ranked.len());
    let mut out_medals: Vec<u32> = Vec::with_capacity(ranked.len());
    let mut out_sports: Vec<Option<&str>> = Vec::with_capacity(ranked.len());
    let mut out_regions: Vec<Option<&str>> = Vec::with_capacity(ranked.len());
    for (name, medals) in ranked {
        let row = first_row.get(name).copied();
        out_names.push(name);
        out_medals.push(medals);
        out_sports.push(row.and_then(|i| lookup_sports.get(i)));
        out_regions.push(row.and_then(|i| lookup_regions.get(i)));
    }

    let mut columns = vec![
        Column::new("Name".into(), out_names),
        Column::new("Medals".into(), out_medals),
        Column::new("Sport".into(), out_sports),
    ];
    if with_region {
        columns.push(Column::new("region".into(), out_regions));
    }
    DataFrame::new(columns)
}

/// Medals won by one region per edition, ascending by year. A region with no
/// medal rows yields an empty frame.
pub fn yearwise_medal_tally(df: &DataFrame, country: &str) -> PolarsResult<DataFrame> {
    let filtered = medal_rows_for_country(df, country)?;

    let years = filtered.column("Year")?.i32()?;
    let mut per_year: BTreeMap<i32, u32> = BTreeMap::new();
    for year in years.into_iter().flatten() {
        *per_year.entry(year).or_insert(0) += 1;
    }

    DataFrame::new(vec![
        Column::new("Year".into(), per_year.keys().copied().collect::<Vec<i32>>()),
        Column::new(
            "Medals".into(),
            per_year.values().copied().collect::<Vec<u32>>(),
        ),
    ])
}

/// Sport × year medal-count matrix for one region, zero-filled.
pub fn country_event_heatmap(df: &DataFrame, country: &str) -> PolarsResult<DataFrame> {
    let filtered = medal_rows_for_country(df, country)?;
    pivot_year_counts(&filtered, "Sport")
}

/// Medal rows credited to `country`, team duplicates removed.
/// Dedup runs before the region filter, mirroring the source material.
fn medal_rows_for_country(df: &DataFrame, country: &str) -> PolarsResult<DataFrame> {
    let medal_rows = df
        .clone()
        .lazy()
        .filter(col("Medal").is_not_null())
        .collect()?;
    let deduped = drop_team_duplicates(&medal_rows)?;
    deduped
        .lazy()
        .filter(col("region").eq(lit(country)))
        .collect()
}

/// Sport × year matrix counting distinct events held (Overall Analysis
/// heatmap): one cell entry per (Year, Sport, Event) combination.
pub fn events_heatmap(df: &DataFrame) -> PolarsResult<DataFrame> {
    let deduped = df.filter(&first_occurrence_mask(df, &["Year", "Sport", "Event"])?)?;
    pivot_year_counts(&deduped, "Sport")
}

/// Cross-tabulate `row_key` × Year into count columns, one per edition,
/// missing cells filled with 0. Row labels ascending, year columns ascending.
fn pivot_year_counts(df: &DataFrame, row_key: &str) -> PolarsResult<DataFrame> {
    let labels = df.column(row_key)?.str()?;
    let years = df.column("Year")?.i32()?;

    let mut year_set: BTreeSet<i32> = BTreeSet::new();
    let mut cells: BTreeMap<&str, BTreeMap<i32, u32>> = BTreeMap::new();
    for i in 0..df.height() {
        if let (Some(label), Some(year)) = (labels.get(i), years.get(i)) {
            year_set.insert(year);
            *cells.entry(label).or_default().entry(year).or_insert(0) += 1;
        }
    }

    let mut columns = vec![Column::new(
        row_key.into(),
        cells.keys().map(|s| s.to_string()).collect::<Vec<String>>(),
    )];
    for year in &year_set {
        let values: Vec<u32> = cells
            .values()
            .map(|row| row.get(year).copied().unwrap_or(0))
            .collect();
        columns.push(Column::new(year.to_string().into(), values));
    }

    DataFrame::new(columns)
}

/// Per-athlete rows for the weight/height scatter: first appearance per
/// athlete, null medal outcomes renamed "No Medal", optional sport filter.
pub fn weight_vs_height(df: &DataFrame, sport: Option<&str>) -> PolarsResult<DataFrame> {
    let athletes = unique_athletes(df)?;
    let mut lf = athletes
        .lazy()
        .with_column(col("Medal").fill_null(lit("No Medal")));
    if let Some(s) = sport {
        lf = lf.filter(col("Sport").eq(lit(s)));
    }
    lf.collect()
}

/// Participation by sex over the years: each athlete counted once, in their
/// first edition. Missing counts filled with 0, ascending by year.
pub fn men_vs_women(df: &DataFrame) -> PolarsResult<DataFrame> {
    let athletes = unique_athletes(df)?;
    let years = athletes.column("Year")?.i32()?;
    let sexes = athletes.column("Sex")?.str()?;

    let mut per_year: BTreeMap<i32, (u32, u32)> = BTreeMap::new();
    for i in 0..athletes.height() {
        let Some(year) = years.get(i) else { continue };
        let counts = per_year.entry(year).or_insert((0, 0));
        match sexes.get(i) {
            Some("M") => counts.0 += 1,
            Some("F") => counts.1 += 1,
            _ => {}
        }
    }

    DataFrame::new(vec![
        Column::new("Year".into(), per_year.keys().copied().collect::<Vec<i32>>()),
        Column::new(
            "Male".into(),
            per_year.values().map(|c| c.0).collect::<Vec<u32>>(),
        ),
        Column::new(
            "Female".into(),
            per_year.values().map(|c| c.1).collect::<Vec<u32>>(),
        ),
    ])
}

/// Distinct-value counts for the Top Statistics panel. `nations` counts a
/// null region as one value, like the source material's unique() call; the
/// "editions minus one" display adjustment is the view's business.
pub fn overall_counts(df: &DataFrame) -> PolarsResult<OverallCounts> {
    let distinct = |name: &str| -> PolarsResult<usize> {
        df.column(name)?.as_materialized_series().n_unique()
    };

    Ok(OverallCounts {
        editions: distinct("Year")?,
        cities: distinct("City")?,
        sports: distinct("Sport")?,
        events: distinct("Event")?,
        athletes: distinct("Name")?,
        nations: distinct("region")?,
    })
}

/// (x, y) pairs from two numeric columns, rows with a null on either axis
/// skipped. Used to turn query output into plottable series.
pub fn xy_points(df: &DataFrame, x: &str, y: &str) -> PolarsResult<Vec<[f64; 2]>> {
    let xs = df.column(x)?.cast(&DataType::Float64)?;
    let xs = xs.f64()?;
    let ys = df.column(y)?.cast(&DataType::Float64)?;
    let ys = ys.f64()?;

    let mut points = Vec::with_capacity(xs.len());
    for i in 0..xs.len() {
        if let (Some(px), Some(py)) = (xs.get(i), ys.get(i)) {
            points.push([px, py]);
        }
    }
    Ok(points)
}
