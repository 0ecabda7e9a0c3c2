use kano_sensor::domain::leds::LED_CENTER;
use kano_sensor::domain::models::{AppEvent, LedColor, MessageSeverity};
use kano_sensor::domain::settings::SettingsService;
use kano_sensor::domain::visualizer;
use kano_sensor::infrastructure::bluetooth::protocol;
use kano_sensor::infrastructure::bluetooth::simulated::SimulatedTransport;
use kano_sensor::infrastructure::bluetooth::transport::TransportEvent;
use kano_sensor::infrastructure::bluetooth::KanoSession;
use kano_sensor::infrastructure::logging;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};

/// Hand passes played into the simulated sensor: (sample, pause after it in ms)
const SCRIPT: &[([u8; 4], u64)] = &[
    ([255, 255, 255, 255], 100),
    // West then East: RIGHT
    ([255, 255, 255, 90], 150),
    ([255, 120, 255, 255], 150),
    ([255, 255, 255, 255], 300),
    // North then South: DOWN
    ([80, 255, 255, 255], 150),
    ([255, 255, 110, 255], 150),
    ([255, 255, 255, 255], 300),
    // East, then West too late: no swipe, West re-arms
    ([255, 100, 255, 255], 1200),
    ([255, 255, 255, 100], 150),
    // East right after: RIGHT
    ([255, 100, 255, 255], 150),
    ([255, 255, 255, 255], 300),
];

async fn play_script(notifier: mpsc::UnboundedSender<TransportEvent>) {
    for (sample, pause_ms) in SCRIPT {
        if notifier
            .send(TransportEvent::Notification(sample.to_vec()))
            .is_err()
        {
            return;
        }
        tokio::time::sleep(Duration::from_millis(*pause_ms)).await;
    }
    let _ = notifier.send(TransportEvent::Disconnected);
}

fn log_event(event: AppEvent) {
    match event {
        AppEvent::Sensor {
            raw,
            brightness,
            max_brightness,
        } => trace!(
            "Sensor raw={:?} brightness={:?} max={}",
            raw,
            brightness,
            max_brightness
        ),
        AppEvent::Gesture(direction) => info!(">>> SWIPE DETECTED: {} <<<", direction),
        AppEvent::ConnectionStatus(status) => debug!("Connection status: {:?}", status),
        AppEvent::LogMessage(msg) => match msg.severity {
            MessageSeverity::Info | MessageSeverity::Success => info!("{}", msg.message),
            MessageSeverity::Warning => warn!("{}", msg.message),
            MessageSeverity::Error => error!("{}", msg.message),
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings_service = SettingsService::new()?;
    let settings = settings_service.get().clone();
    let _log_guard = logging::init_logger(&settings.log_settings)?;
    info!("Starting Kano sensor demo");
    debug!("Settings loaded from {}", settings_service.path().display());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let transport = SimulatedTransport::new("Kano Sensor Kit");
    let mut session = KanoSession::from_settings(transport, &settings, event_tx)?;

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            log_event(event);
        }
    });

    session.connect().await?;
    tokio::spawn(play_script(session.transport().notifier()));

    // Force-field view, with the center flashing white after each swipe
    let flash = Duration::from_millis(settings.swipe_flash_ms);
    let mut flash_until: Option<Instant> = None;
    session
        .run(|outcome, leds| {
            visualizer::force_field(&outcome.zones, leds);

            let now = Instant::now();
            if outcome.gesture.is_some() {
                flash_until = Some(now + flash);
            }
            if flash_until.is_some_and(|until| now < until) {
                leds.set_led(LED_CENTER, LedColor::WHITE);
            }
        })
        .await?;

    let frames = session.transport().writes_to(protocol::LED_CHAR).count();
    info!("Demo finished, {} LED frames written", frames);
    Ok(())
}
