//! Config file -> saved response -> layout -> scene, without a window or GPU.

use std::path::PathBuf;

use planetarium::{
    config::{CameraMode, Config, Overrides, Preset},
    data::fetch_organisations,
    error::DataError,
    gfx::scene::Scene,
    layout::{Placer, RadiusFormula},
};

fn demo_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn demo_config() -> Config {
    let mut config = Config::load_with_preset(demo_path("planetarium.toml"), Preset::Planets)
        .expect("demo config loads");
    config.apply_overrides(&Overrides {
        file: Some(demo_path("organisations.json")),
        ..Default::default()
    });
    config.validate().expect("demo config validates");
    config
}

#[test]
fn demo_config_layers_over_preset() {
    let config = demo_config();

    assert_eq!(config.source.limit, 25);
    assert_eq!(config.layout.seed, Some(7));
    assert_eq!(config.camera.mode, CameraMode::Orbit);
    assert!(config.scene.starfield);
    assert_eq!(
        config.layout.radius,
        RadiusFormula::Quadratic {
            multiplier: 4.0,
            minimum: 0.2
        }
    );
}

#[test]
fn saved_response_keeps_server_order() {
    let config = demo_config();
    let organisations = fetch_organisations(&config.source).unwrap();

    let names: Vec<&str> = organisations.iter().map(|o| o.ens_name.as_str()).collect();
    assert_eq!(
        names,
        [
            "lido.eth",
            "aave.eth",
            "uniswap.eth",
            "gitcoin.eth",
            "ens.eth",
            "nouns.eth"
        ]
    );
    // Numeric strings are accepted.
    assert_eq!(organisations[0].aum, 1250000.5);
    assert_eq!(organisations[1].token_count, 31);
    assert_eq!(organisations[2].score, 0.86);
}

#[test]
fn limit_truncates_saved_response() {
    let mut config = demo_config();
    config.apply_overrides(&Overrides {
        limit: Some(3),
        ..Default::default()
    });

    let organisations = fetch_organisations(&config.source).unwrap();
    assert_eq!(organisations.len(), 3);
    assert_eq!(organisations[2].ens_name, "uniswap.eth");
}

#[test]
fn missing_response_file_is_an_io_error() {
    let mut config = demo_config();
    config.source.file = Some(demo_path("does-not-exist.json"));

    let error = fetch_organisations(&config.source).unwrap_err();
    assert!(matches!(error, DataError::Io { .. }));
}

#[test]
fn placements_follow_scores_and_bounds() {
    let config = demo_config();
    let organisations = fetch_organisations(&config.source).unwrap();
    let placements = Placer::new(&config.layout).place_all(&organisations);

    assert_eq!(placements.len(), organisations.len());
    for (organisation, placement) in organisations.iter().zip(&placements) {
        let score = organisation.score as f32;
        let expected = 4.0 * score * score + 0.2;
        assert!((placement.radius - expected).abs() < 1e-5);
        assert!(config.layout.bounds.contains(placement.position));
    }

    // Same seed, same sky.
    let again = Placer::new(&config.layout).place_all(&organisations);
    assert_eq!(placements, again);
}

#[test]
fn scene_reflects_the_layout() {
    let config = demo_config();
    let organisations = fetch_organisations(&config.source).unwrap();
    let placements = Placer::new(&config.layout).place_all(&organisations);

    let mut scene = Scene::from_placements(&config, &placements, 1200, 800);
    let stats = scene.statistics();
    assert_eq!(stats.planet_count, organisations.len());
    // Scores arrive sorted, so the first planet is the largest.
    assert_eq!(stats.max_radius, placements[0].radius);
    assert_eq!(stats.min_radius, placements[placements.len() - 1].radius);

    scene.select(Some(2));
    let instances = scene.instances();
    assert_eq!(instances.len(), organisations.len());
    assert_eq!(instances[2].color[3], 1.0);
    assert!(instances
        .iter()
        .enumerate()
        .all(|(i, instance)| i == 2 || instance.color[3] == 0.0));
}
