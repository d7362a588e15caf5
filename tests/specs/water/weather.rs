//! Weather scaling specs
//!
//! Verify that live weather scales the watering duration and that missing
//! weather data falls back to the configured duration.

use crate::prelude::*;
use similar_asserts::assert_eq;

fn first_fire() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 2, 6, 0, 0).unwrap()
}

fn weather_controlled(control: WeatherControl) -> WaterSchedule {
    daily_water_schedule().with_weather_control(control)
}

#[tokio::test]
async fn hot_weather_waters_longer() {
    let world = World::at(june_1(12, 0));
    let station = ResourceId::new();
    world.weather.set_temperature(station, 100.0);
    let ws = weather_controlled(WeatherControl {
        rain: None,
        temperature: Some(ScaleControl::new(90.0, 0.5, 30.0, station)),
    });
    world.zone_using(&ws, 0).await;
    world.save_water_schedule(&ws).await;

    world.run_at(first_fire()).await;

    assert_eq!(world.dispatch.water_durations(), vec![minutes(35)]);
}

#[tokio::test]
async fn rain_waters_less() {
    let world = World::at(june_1(12, 0));
    let station = ResourceId::new();
    world.weather.set_rain(station, 31.75);
    let ws = weather_controlled(WeatherControl {
        rain: Some(ScaleControl::new(25.4, 0.5, 12.7, station)),
        temperature: None,
    });
    world.zone_using(&ws, 0).await;
    world.save_water_schedule(&ws).await;

    world.run_at(first_fire()).await;

    assert_eq!(
        world.dispatch.water_durations(),
        vec![Duration::from_secs(22 * 60 + 30)]
    );
}

#[tokio::test]
async fn light_rain_does_not_change_watering() {
    let world = World::at(june_1(12, 0));
    let station = ResourceId::new();
    world.weather.set_rain(station, 10.0);
    let ws = weather_controlled(WeatherControl {
        rain: Some(ScaleControl::new(25.4, 0.5, 12.7, station)),
        temperature: None,
    });
    world.zone_using(&ws, 0).await;
    world.save_water_schedule(&ws).await;

    world.run_at(first_fire()).await;

    assert_eq!(world.dispatch.water_durations(), vec![minutes(30)]);
}

#[tokio::test]
async fn unavailable_weather_waters_unscaled() {
    let world = World::at(june_1(12, 0));
    let station = ResourceId::new();
    world
        .weather
        .fail_temperature(station, WeatherError::FetchFailed("timeout".into()));
    let ws = weather_controlled(WeatherControl {
        rain: None,
        temperature: Some(ScaleControl::new(90.0, 0.5, 30.0, station)),
    });
    world.zone_using(&ws, 0).await;
    world.save_water_schedule(&ws).await;

    world.run_at(first_fire()).await;

    assert_eq!(world.dispatch.water_durations(), vec![minutes(30)]);
}
