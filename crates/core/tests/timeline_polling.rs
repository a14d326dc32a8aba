//! Driving the generator through a host-side timeline
use tracing_subscriber::EnvFilter;
use weather_gen_core::{
    DownfallCondition, DownfallKind, DownfallKindPolicy, Episode, Severity, Vec2,
    WeatherCondition, WeatherConditionProvider, WeatherGenerator, WeatherTimeline,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_timeline_replays_generator_sequence() {
    let mut reference = WeatherGenerator::new(12354, 50.0).unwrap();
    let mut timeline = WeatherTimeline::new(WeatherGenerator::new(12354, 50.0).unwrap()).unwrap();

    assert_eq!(*timeline.current(), reference.next_episode().unwrap());
    for _ in 0..20 {
        let step = timeline.remaining() + 0.001;
        let next = timeline.update(step).unwrap().copied().unwrap();
        assert_eq!(next, reference.next_episode().unwrap());
    }
}

#[test]
fn test_small_steps_change_weather_eventually() {
    let mut timeline = WeatherTimeline::new(WeatherGenerator::new(7, 10.0).unwrap()).unwrap();
    let mut changes = 0;
    for _ in 0..1_000 {
        if timeline.update(1.0).unwrap().is_some() {
            changes += 1;
        }
    }
    // 1000 time units at a mean of 10 per episode
    assert!((50..=200).contains(&changes), "changes: {changes}");
}

#[test]
fn test_forced_snow_storm() {
    let mut timeline = WeatherTimeline::new(WeatherGenerator::new(7, 10.0).unwrap()).unwrap();
    let snow = DownfallCondition::new(Severity::Heavy, DownfallKind::Snow, true).unwrap();
    let storm = WeatherCondition::new(Severity::Heavy, snow, Vec2::new(3.0, 1.0));
    timeline.force(Episode::new(storm, 25.0).unwrap());

    assert!(timeline.update(24.0).unwrap().is_none());
    assert_eq!(
        timeline.current().to_string(),
        "Densely clouded and heavy snow with thunder (25)"
    );
    assert!(timeline.update(2.0).unwrap().is_some());
    assert_eq!(
        timeline.provider().display_name(),
        "Markov chain weather generator"
    );
}

#[test]
fn test_policy_on_generated_episodes() {
    let mut generator = WeatherGenerator::new(31, 10.0).unwrap();
    let policy = DownfallKindPolicy::temperature();

    for _ in 0..300 {
        let episode = generator.next_episode().unwrap();
        let frozen = policy.apply(&episode, -10.0).unwrap();
        let downfall = frozen.condition().downfall();

        assert_eq!(downfall.severity(), episode.condition().downfall().severity());
        if downfall.is_falling() {
            assert_eq!(downfall.kind(), DownfallKind::Snow);
        } else {
            assert_eq!(downfall.kind(), DownfallKind::None);
        }
    }
}
