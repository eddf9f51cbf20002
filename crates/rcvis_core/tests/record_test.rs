//! Tests for result records and narration helpers.

use rcvis_core::{
    ElectionSummary, MovieArtifact, MovieGenerationStatus, Orientation, Resolution, ResultRecord,
    RoundSummary,
};

fn artifact(width: u32, height: u32) -> MovieArtifact {
    MovieArtifact {
        generator_version: rcvis_core::GENERATOR_VERSION.to_string(),
        file_path: format!("movies/slug-{width}x{height}.mp4"),
        url: format!("https://cdn.example.com/movies/slug-{width}x{height}.mp4"),
        resolution: Resolution::new(width, height).unwrap(),
    }
}

#[test]
fn test_builder_defaults() {
    let record = ResultRecord::builder()
        .id(7)
        .slug("macomb-multiwinner-surplusjson")
        .summary(ElectionSummary::default())
        .build()
        .unwrap();

    assert_eq!(record.movie_generation_status, MovieGenerationStatus::NotRequested);
    assert!(record.movies().is_none());
}

#[test]
fn test_movies_requires_both_variants() {
    let mut record = ResultRecord::builder()
        .id(1)
        .slug("s")
        .summary(ElectionSummary::default())
        .build()
        .unwrap();

    record.movie_horizontal = Some(artifact(1920, 1080));
    assert!(record.movies().is_none());

    record.movie_vertical = Some(artifact(1080, 1920));
    let (h, v) = record.movies().unwrap();
    assert_eq!(h.orientation(), Orientation::Horizontal);
    assert_eq!(v.orientation(), Orientation::Vertical);
    assert_eq!(v.resolution_width(), 1080);
}

#[test]
fn test_resolution_rejects_out_of_range_on_deserialize() {
    let ok: Resolution = serde_json::from_str(r#"{"width":1,"height":1920}"#).unwrap();
    assert_eq!(ok.to_string(), "1x1920");
    assert!(serde_json::from_str::<Resolution>(r#"{"width":2000,"height":10}"#).is_err());
}

#[test]
fn test_summary_counts() {
    let summary = ElectionSummary {
        title: "Council".to_string(),
        threshold: 101.0,
        winner_names: vec!["Ada".to_string(), "Grace".to_string()],
        rounds: vec![
            RoundSummary {
                eliminated_names: vec!["Bob".to_string(), "Eve".to_string()],
                ..Default::default()
            },
            RoundSummary {
                eliminated_names: vec!["Mallory".to_string()],
                winner_names: vec!["Ada".to_string(), "Grace".to_string()],
                redistribution: None,
            },
        ],
    };
    assert_eq!(summary.num_winners(), 2);
    assert_eq!(summary.num_eliminated(), 3);
    assert_eq!(summary.num_rounds(), 2);
}
