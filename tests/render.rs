// Rendering the finished sample table to files.

use std::{fs, path::PathBuf};

use worldpop::{LinearRegression, Predictor, TerritoryMergeRule, major_cities, prepare_table, render};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/world_population_sample.csv")
}

#[test]
fn renders_every_output() {
    let table = prepare_table(&sample_path(), Some(&TerritoryMergeRule::default()), 0).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let continents = table.by_continent(2022).unwrap();
    let bars = dir.path().join("continents.svg");
    render::write_continent_bar_chart(&bars, &continents, 2022).unwrap();
    let svg = fs::read_to_string(&bars).unwrap();
    assert_eq!(svg.matches(r#"class="bar""#).count(), continents.len());

    let series = table.time_series("Morocco").unwrap();
    let mut model = LinearRegression::new();
    model.fit(&series).unwrap();
    let growth = dir.path().join("growth.svg");
    render::write_growth_line_chart(&growth, &series, Some((2030.0, model.predict(2030.0).unwrap()))).unwrap();
    assert!(fs::read_to_string(&growth).unwrap().contains("Population Growth in Morocco"));

    let cities = dir.path().join("cities.svg");
    render::write_city_point_map(&cities, &major_cities()).unwrap();
    assert_eq!(fs::read_to_string(&cities).unwrap().matches("<circle").count(), 30);

    let choropleth = dir.path().join("choropleth.csv");
    render::write_choropleth_csv(&choropleth, &table).unwrap();
    let csv = fs::read_to_string(&choropleth).unwrap();
    assert_eq!(csv.lines().count(), table.len() + 1);
    assert!(csv.lines().any(|l| l.starts_with("MAR,Morocco,38033957,")));
}

#[test]
fn unwritable_path_is_render_error() {
    let table = prepare_table(&sample_path(), None, 0).unwrap();
    let err = render::write_choropleth_csv(&PathBuf::from("/nonexistent/dir/out.csv"), &table).unwrap_err();
    assert!(matches!(err, worldpop::PipelineError::Render(_)));
}
