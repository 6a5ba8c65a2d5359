//! Plant Growth entry point
//!
//! Native builds run a headless host loop over a state directory. The web
//! build is driven from JavaScript through `platform::web::PlantHandle`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use anyhow::Context;
    use clap::Parser;

    use plant_growth::consts::*;
    use plant_growth::persistence::FileStorage;
    use plant_growth::sim::{GrowthEvent, GrowthPhase};
    use plant_growth::{PlantController, PlantSettings};

    #[derive(Parser)]
    #[command(name = "plant-growth")]
    #[command(about = "Grow a plant: water it, then watch it move through its stages", long_about = None)]
    struct Cli {
        /// Directory holding saved progress and settings
        #[arg(long, default_value = ".plant-growth")]
        state_dir: PathBuf,

        /// Seconds of watered growth to reach the final stage
        #[arg(long)]
        duration: Option<f32>,

        /// Number of growth stages
        #[arg(long)]
        stages: Option<u32>,

        /// Seconds of growth between periodic saves
        #[arg(long)]
        autosave: Option<f32>,

        /// Store the effective settings for later runs
        #[arg(long)]
        save_settings: bool,

        /// Simulated frames per second
        #[arg(long, default_value_t = FRAME_RATE)]
        fps: f32,

        /// Stop after this many simulated seconds even if growth isn't finished
        #[arg(long)]
        max_seconds: Option<f32>,

        /// Pace frames against the wall clock instead of running flat out
        #[arg(long)]
        realtime: bool,

        /// Water the plant before running
        #[arg(long)]
        water: bool,

        /// Debug: jump to one second before completion
        #[arg(long)]
        fast: bool,

        /// Reset the plant to an unwatered seedling
        #[arg(long)]
        reset: bool,

        /// Delete saved progress and exit
        #[arg(long)]
        delete_save: bool,

        /// Print the current status and exit
        #[arg(long)]
        status: bool,
    }

    /// Host loop state
    struct Host {
        controller: PlantController<FileStorage>,
        accumulator: f32,
        step: f32,
        /// Last whole second reported
        last_reported: u32,
    }

    impl Host {
        fn new(controller: PlantController<FileStorage>, fps: f32) -> Self {
            let last_reported = controller.state().elapsed_time().floor() as u32;
            Self {
                controller,
                accumulator: 0.0,
                step: 1.0 / fps,
                last_reported,
            }
        }

        /// Run simulation ticks for `dt` seconds of host time
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
                let events = self.controller.on_tick(self.step);
                self.accumulator -= self.step;
                substeps += 1;
                self.report(&events);
            }
        }

        fn report(&mut self, events: &[GrowthEvent]) {
            for event in events {
                match event {
                    GrowthEvent::StageChanged { to, .. } => {
                        println!(
                            "Stage {}/{} reached",
                            to + 1,
                            self.controller.settings().stage_count
                        );
                    }
                    GrowthEvent::ProgressUpdated { .. } => {
                        let second = self.controller.state().elapsed_time().floor() as u32;
                        if second > self.last_reported {
                            self.last_reported = second;
                            println!("{}", self.controller.status());
                        }
                    }
                    GrowthEvent::Completed => println!("{}", self.controller.status()),
                    GrowthEvent::Watered => println!("Plant watered! Growth started."),
                    GrowthEvent::Reset => println!("Plant reset"),
                }
            }
        }
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
        let cli = Cli::parse();

        if !(cli.fps.is_finite() && cli.fps > 0.0) {
            anyhow::bail!("--fps must be a positive number, got {}", cli.fps);
        }

        let mut storage = FileStorage::new(&cli.state_dir);
        let mut settings = PlantSettings::load(&storage);
        if let Some(duration) = cli.duration {
            settings.growth_duration = duration;
        }
        if let Some(stages) = cli.stages {
            settings.stage_count = stages;
        }
        if let Some(autosave) = cli.autosave {
            settings.autosave_interval = autosave;
        }
        settings.validate().context("invalid plant settings")?;
        if cli.save_settings {
            settings.save(&mut storage);
        }

        log::info!("Plant growth starting (state in {})", cli.state_dir.display());
        let mut controller =
            PlantController::new(settings, storage).context("invalid plant settings")?;

        if cli.delete_save {
            if controller.delete_save_data() {
                println!("Saved progress deleted");
            } else {
                anyhow::bail!("could not delete saved progress in {}", cli.state_dir.display());
            }
            return Ok(());
        }

        controller.start();
        if cli.reset {
            controller.reset_plant();
            println!("Plant reset");
        }

        if cli.status {
            println!("{}", controller.status());
            return Ok(());
        }

        let mut host = Host::new(controller, cli.fps);
        if cli.water {
            let events = host.controller.on_water_requested();
            host.report(&events);
        }
        if cli.fast {
            let events = host.controller.fast_growth();
            host.report(&events);
        }

        if host.controller.phase() != GrowthPhase::Growing {
            println!("{}", host.controller.status());
            return Ok(());
        }

        let limit = cli.max_seconds.unwrap_or(f32::INFINITY);
        let frame = Duration::from_secs_f32(host.step);
        let mut simulated = 0.0f32;
        let mut last_frame = Instant::now();

        while host.controller.phase() == GrowthPhase::Growing && simulated < limit {
            let dt = if cli.realtime {
                std::thread::sleep(frame.saturating_sub(last_frame.elapsed()));
                let now = Instant::now();
                let dt = now.duration_since(last_frame).as_secs_f32();
                last_frame = now;
                dt
            } else {
                host.step
            };
            host.update(dt);
            simulated += dt.min(MAX_FRAME_DT);
        }

        if host.controller.phase() == GrowthPhase::Growing {
            host.controller.save();
            println!("Stopped: {}", host.controller.status());
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
