//! `overplay simulate`: replay a scripted gesture session.
//!
//! Drives a full playback screen with scripted sensors and a simulated
//! transport, one scenario frame per tick, and prints every transport call
//! followed by the control counters.

use std::sync::Arc;

use clap::Args;
use overplay::gesture::GestureProfile;
use overplay::log::SharedLogger;
use overplay::playback::TransportCommand;
use overplay::sim::{Scenario, ScriptedLocationSource, ScriptedMotionSource, SimulatedTransport};
use overplay::telemetry::ControlMetrics;
use overplay::{OverplayConfig, PlaybackScreen, PlaybackScreenBuilder};
use serde_json::json;

use crate::error::CliError;

/// Length of the simulated video, in seconds.
const VIDEO_DURATION_SECS: f64 = 600.0;

/// Where playback starts, so backward scrubs have room.
const VIDEO_START_SECS: f64 = 60.0;

/// Sample queue depth while simulating. The scenario pushes a whole frame
/// of samples before the worker gets to run.
const SIMULATION_QUEUE_CAPACITY: usize = 64;

type SimScreen = PlaybackScreen<SimulatedTransport, ScriptedMotionSource, ScriptedLocationSource>;

/// Arguments for `overplay simulate`.
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Scenario to replay: tilt-seek, tilt-volume, shake or walk
    #[arg(long, short, default_value = "tilt-seek")]
    pub scenario: Scenario,

    /// Gesture profile overriding the configured thresholds
    #[arg(long)]
    pub profile: Option<GestureProfile>,

    /// Print transport calls as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// Run the simulation with the loaded configuration.
pub fn run(
    args: SimulateArgs,
    config: OverplayConfig,
    logger: SharedLogger,
) -> Result<(), CliError> {
    let mut config = config;
    if let Some(profile) = args.profile {
        config.gesture = config.gesture.with_profile(profile);
    }
    config.motion = config
        .motion
        .with_sample_queue_capacity(SIMULATION_QUEUE_CAPACITY);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let motion = ScriptedMotionSource::new();
    let metrics = Arc::new(ControlMetrics::new());
    let mut screen: SimScreen = PlaybackScreenBuilder::new()
        .with_transport(
            SimulatedTransport::new(VIDEO_DURATION_SECS).with_current_time(VIDEO_START_SECS),
        )
        .with_motion_source(motion.clone())
        .with_location_source(ScriptedLocationSource::authorized())
        .with_config(config)
        .with_logger(logger)
        .with_metrics(metrics)
        .with_runtime(runtime.handle().clone())
        .build()?;

    tracing::info!(
        scenario = args.scenario.name(),
        duration_secs = args.scenario.duration_secs(),
        "Starting simulation"
    );

    runtime.block_on(replay(&mut screen, &motion, args.scenario, args.json))?;

    screen.disappear();
    report(
        args.scenario.duration_secs(),
        screen.transport_mut().take_calls(),
        args.json,
    )?;
    print_summary(&mut screen, args.json)
}

async fn replay(
    screen: &mut SimScreen,
    motion: &ScriptedMotionSource,
    scenario: Scenario,
    json: bool,
) -> Result<(), CliError> {
    screen.appear();
    report(0.0, screen.transport_mut().take_calls(), json)?;

    let tick = screen.tick_interval();
    for frame in scenario.frames(tick) {
        for sample in frame.samples {
            let mut attempts = 0;
            while !motion.push(Ok(sample)) {
                if !motion.is_updating() {
                    return Err(CliError::Simulate(
                        "motion source stopped accepting samples".to_string(),
                    ));
                }
                attempts += 1;
                if attempts > 1_000 {
                    return Err(CliError::Simulate("motion worker is not draining".to_string()));
                }
                tokio::task::yield_now().await;
            }
        }
        if let Some(point) = frame.location {
            if !screen.geofence().source().push_fix(point) {
                tracing::warn!(time = frame.time, "Location fix dropped");
            }
        }

        // Give the motion worker a turn before the tick reads its events.
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        screen.tick();
        report(frame.time, screen.transport_mut().take_calls(), json)?;
        screen.transport_mut().advance(tick.as_secs_f64());
    }

    Ok(())
}

fn report(time: f64, calls: Vec<TransportCommand>, json: bool) -> Result<(), CliError> {
    for call in calls {
        if json {
            println!("{}", json!({ "time": time, "call": call }));
        } else {
            println!("{:>7.3}s  {}", time, describe(&call));
        }
    }
    Ok(())
}

fn describe(call: &TransportCommand) -> String {
    match call {
        TransportCommand::SetRate { rate } => format!("set rate {:.2}", rate),
        TransportCommand::SetVolume { volume } => format!("set volume {:.2}", volume),
        TransportCommand::Seek { ticket, request } => format!(
            "seek {} to {:.3}s (-{:.3}s/+{:.3}s)",
            ticket, request.target, request.tolerance_before, request.tolerance_after
        ),
        TransportCommand::Restart => "restart".to_string(),
    }
}

fn print_summary(screen: &mut SimScreen, json: bool) -> Result<(), CliError> {
    let metrics = screen.metrics();
    let controller = screen.controller_mut();
    let phase = controller.phase();
    let playing = controller.is_playing();
    let indicator = controller.indicator();
    let progress = controller.progress();

    if json {
        let summary = json!({
            "summary": {
                "phase": phase,
                "playing": playing,
                "indicator": indicator,
                "progress": progress,
                "metrics": metrics,
            }
        });
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!();
    println!("Final state");
    println!("===========");
    println!("  phase     {}", phase);
    println!("  playing   {}", playing);
    println!("  indicator {:?}", indicator);
    println!("  progress  {:.1}%", progress * 100.0);
    println!();
    println!("{}", metrics);
    Ok(())
}
