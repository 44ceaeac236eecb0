//! Test that the shipped configuration loads and drives the mock bus

use std::time::Duration;
use wii_classic::bus::MockBus;
use wii_classic::{Config, DriverConfig, WiiClassic};

#[test]
fn test_default_config_file() {
    let config = Config::load_default().unwrap();

    assert_eq!(config.bus.device, "/dev/i2c-1");
    assert_eq!(config.driver(), DriverConfig::default());
}

#[test]
fn test_config_drives_initialization() {
    let config = Config::from_toml(
        r#"
        [controller]
        read_delay_us = 500
        init_attempts = 2
        init_retry_delay_ms = 5
        "#,
    )
    .unwrap();

    let mut bus = MockBus::new().with_open_failures(1);
    let delay = bus.delay();
    let mut controller = WiiClassic::from_config(&mut bus, delay.clone(), config.driver()).unwrap();

    assert_eq!(bus.open_count(), 2);
    assert_eq!(controller.read_delay(), Duration::from_micros(500));

    controller.read_frame().unwrap();
    // retry + two settle delays + one read delay
    assert_eq!(
        delay.total(),
        Duration::from_millis(5) + Duration::from_millis(200) + Duration::from_micros(500)
    );
}
