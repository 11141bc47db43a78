use clap::Parser;

use finger_lightning::camera::CameraCapture;
use finger_lightning::cli::{handle_config_action, list_cameras, Args, Command};
use finger_lightning::config::Config;
use finger_lightning::display::WindowDisplay;
use finger_lightning::error::AppError;
use finger_lightning::event_loop::{self, LoopOptions, StopReason};
use finger_lightning::hands::MediaPipeDetector;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = Args::parse();

    let result = match args.command.take() {
        Some(Command::ListCameras) => list_cameras(),
        Some(Command::Config { action }) => handle_config_action(action, args.config.as_deref()),
        None => run(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(device) = args.camera {
        config.camera.device = device;
    }

    event_loop::setup_ctrlc_handler()?;

    let compositor = config.compositor();
    let mut detector = MediaPipeDetector::spawn(&config.hands.python, compositor.hand_config())?;
    // The detector shuts its helper down on drop if the camera fails to open
    let mut camera = CameraCapture::open(config.camera_settings())?;
    let mut display = WindowDisplay::new(config.window.title.clone());

    log::info!(
        "Running on camera {} (press q to quit)",
        camera.settings().device_index
    );

    let summary = event_loop::run(
        &mut camera,
        &mut detector,
        &mut display,
        &compositor,
        LoopOptions {
            mirror: config.camera.mirror,
        },
        &mut rand::thread_rng(),
    );

    match summary.reason {
        StopReason::DisplayFailed(msg) => {
            log::error!("Display failed: {}", msg);
        }
        StopReason::DetectorFailed(msg) => {
            log::error!("Hand detector failed: {}", msg);
        }
        StopReason::CaptureFailed(msg) if summary.frames_shown == 0 => {
            log::error!("Camera produced no frames: {}", msg);
        }
        reason => log::info!("Stopped: {:?}", reason),
    }
    Ok(())
}
